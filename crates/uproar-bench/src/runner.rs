use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use uproar_audio::{NullPlayback, TickStats, UproarSubsystem};
use uproar_core::settings::UproarSettings;
use uproar_core::types::{PhysicsEventKind, PhysicsEventSink};
use uproar_rules::{
    BreakEventSettings, CollisionEventSettings, EventClassifier, LoadError, SoundDefinitionTable,
};

use crate::scenes::{self, SceneConfig};

/// Fixed frame step the scenes are replayed at.
const TICK_DT: f32 = 1.0 / 60.0;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub events_submitted: u64,
    pub classified: u64,
    pub admitted: u64,
    pub suppressed: u64,
    pub expired: u64,
    pub missing_definition: u64,
    pub tick_count: u32,
    pub timings: TimingSeries,
}

/// Replays synthetic physics events through classification and the
/// deduplication subsystem.
pub struct BenchmarkRunner {
    tick_count: u32,
    seed: u64,
    settings: UproarSettings,
    table: SoundDefinitionTable,
    break_settings: BreakEventSettings,
    collision_settings: CollisionEventSettings,
}

impl BenchmarkRunner {
    /// Load the shipped settings, classifiers and sound definitions.
    pub fn new(tick_count: u32, seed: u64) -> Result<Self, LoadError> {
        let settings = uproar_rules::load_settings_from_str(include_str!("../../../data/uproar.ron"))?;
        let rows = uproar_rules::load_sound_definitions_from_str(include_str!(
            "../../../data/sound_definitions.ron"
        ))?;
        if let Err(errors) = uproar_rules::validator::validate_sound_definitions(&rows) {
            for e in &errors {
                log::warn!("Sound definition validation: {e}");
            }
        }
        let break_settings = uproar_rules::load_break_settings_from_str(include_str!(
            "../../../data/classifiers/break.ron"
        ))?;
        let collision_settings = uproar_rules::load_collision_settings_from_str(include_str!(
            "../../../data/classifiers/collision.ron"
        ))?;

        Ok(Self {
            tick_count,
            seed,
            settings,
            table: SoundDefinitionTable::build(&rows),
            break_settings,
            collision_settings,
        })
    }

    /// Run a single benchmark scene and return its counters and timings.
    pub fn run_scene(&self, config: &SceneConfig) -> BenchmarkResult {
        log::info!(
            "Running scene '{}' ({} events per tick)...",
            config.name,
            config.events_per_tick
        );

        let mut uproar = UproarSubsystem::with_table(self.settings.clone(), self.table.clone());
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut playback = NullPlayback;

        let mut totals = TickStats::default();
        let mut events_submitted = 0u64;
        let mut classified = 0u64;
        let mut frame_times = Vec::with_capacity(self.tick_count as usize);

        for tick in 0..self.tick_count {
            let samples = scenes::generate_tick_events(config, &mut rng);
            uproar.set_listener_translations(scenes::listener_translations(config, tick));
            events_submitted += samples.len() as u64;

            let frame_start = Instant::now();

            for sample in &samples {
                let event = match sample.kind {
                    PhysicsEventKind::Break => self.break_settings.classify(sample, &mut rng),
                    PhysicsEventKind::Collision => {
                        self.collision_settings.classify(sample, &mut rng)
                    }
                };
                if let Some(event) = event {
                    classified += 1;
                    uproar.physics_event(event);
                }
            }
            let stats = uproar.tick(TICK_DT, &mut playback);

            let elapsed = frame_start.elapsed().as_secs_f64() * 1000.0;
            frame_times.push(elapsed);
            totals.accumulate(&stats);
        }

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: {} admitted, {} suppressed, mean={:.3}ms, p99={:.3}ms",
            totals.admitted,
            totals.suppressed,
            timings.mean_ms,
            timings.p99_ms
        );

        BenchmarkResult {
            scene_name: config.name.to_string(),
            events_submitted,
            classified,
            admitted: totals.admitted as u64,
            suppressed: totals.suppressed as u64,
            expired: totals.expired as u64,
            missing_definition: totals.missing_definition as u64,
            tick_count: self.tick_count,
            timings,
        }
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_timings() {
        let timings = compute_timings(&[4.0, 1.0, 3.0, 2.0]);
        assert!((timings.mean_ms - 2.5).abs() < f64::EPSILON);
        assert!((timings.median_ms - 2.5).abs() < f64::EPSILON);
        assert!((timings.min_ms - 1.0).abs() < f64::EPSILON);
        assert!((timings.max_ms - 4.0).abs() < f64::EPSILON);
        assert!((timings.p99_ms - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compute_timings_empty() {
        let timings = compute_timings(&[]);
        assert_eq!(timings.max_ms, 0.0);
    }

    #[test]
    fn test_scene_counters_balance() {
        let runner = BenchmarkRunner::new(30, 1).expect("shipped data loads");
        for config in scenes::standard_scenes() {
            let result = runner.run_scene(&config);
            assert_eq!(result.events_submitted, 30 * config.events_per_tick as u64);
            assert!(result.classified <= result.events_submitted);
            assert_eq!(
                result.admitted + result.suppressed + result.missing_definition,
                result.classified,
                "scene {}",
                config.name
            );
            assert!(result.admitted > 0, "scene {} admitted nothing", config.name);
        }
    }

    #[test]
    fn test_dense_scene_suppresses_more() {
        let runner = BenchmarkRunner::new(30, 2).expect("shipped data loads");
        let scenes = scenes::standard_scenes();
        let dense = runner.run_scene(&scenes[0]);
        let sparse = runner.run_scene(&scenes[1]);
        assert!(dense.suppressed > sparse.suppressed);
    }
}
