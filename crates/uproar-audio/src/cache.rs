use std::collections::HashMap;

use glam::Vec3;
use uproar_core::key::SoundDefinitionKey;
use uproar_core::math::{CellKey, SpatialGrid};
use uproar_core::settings::UproarSettings;
use uproar_core::types::ClassifiedEvent;
use uproar_rules::registry::SoundDefinitionTable;

use crate::debug_cells::{age_markers, DebugCellMarker};
use crate::listener::ListenerLocator;
use crate::playback::PlaybackSink;

/// A sound occupying its spatial cell until its lifetime runs out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEvent {
    /// True world location of the event.
    pub location: Vec3,
    pub type_key: SoundDefinitionKey,
    pub volume_modifier: f32,
    /// Seconds since admission.
    pub lifetime: f32,
    pub max_lifetime: f32,
}

/// Counters for one deduplication pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub expired: usize,
    pub admitted: usize,
    pub suppressed: usize,
    pub missing_definition: usize,
}

impl TickStats {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn accumulate(&mut self, other: &TickStats) {
        self.expired += other.expired;
        self.admitted += other.admitted;
        self.suppressed += other.suppressed;
        self.missing_definition += other.missing_definition;
    }
}

/// Spatial-temporal deduplication: at most one sound per listener-relative
/// grid cell for the lifetime of the admitted event.
#[derive(Debug, Clone)]
pub struct DedupCache {
    grid: SpatialGrid,
    event_lifetime: f32,
    draw_debug_cells: bool,
    active_events: Vec<ActiveEvent>,
    active_index: HashMap<CellKey, ActiveEvent>,
    pending_events: Vec<ActiveEvent>,
    debug_cells: Vec<DebugCellMarker>,
}

impl Default for DedupCache {
    fn default() -> Self {
        Self::new(&UproarSettings::default())
    }
}

impl DedupCache {
    /// Create an empty cache. `settings` should already be clamped.
    pub fn new(settings: &UproarSettings) -> Self {
        Self {
            grid: settings.grid(),
            event_lifetime: settings.event_lifetime_seconds,
            draw_debug_cells: settings.draw_debug_cells,
            active_events: Vec::new(),
            active_index: HashMap::new(),
            pending_events: Vec::new(),
            debug_cells: Vec::new(),
        }
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Queue a classified event for the next tick.
    pub fn push(&mut self, event: &ClassifiedEvent) {
        self.pending_events.push(ActiveEvent {
            location: event.location,
            type_key: event.sound_key(),
            volume_modifier: event.volume_modifier,
            lifetime: 0.0,
            max_lifetime: self.event_lifetime,
        });
    }

    /// Run one deduplication pass: age, rebuild the cell index, admit pending
    /// events in submission order, then clear the pending queue.
    pub fn tick<S: PlaybackSink + ?Sized>(
        &mut self,
        dt: f32,
        listeners: &ListenerLocator,
        table: &SoundDefinitionTable,
        sink: &mut S,
    ) -> TickStats {
        let mut stats = TickStats::default();

        // Age
        let before = self.active_events.len();
        for event in &mut self.active_events {
            event.lifetime += dt;
        }
        self.active_events.retain(|e| e.lifetime < e.max_lifetime);
        stats.expired = before - self.active_events.len();
        age_markers(&mut self.debug_cells, dt);

        // Rebuild; the earliest surviving event keeps a contested cell
        self.active_index.clear();
        for event in &self.active_events {
            let key = self.cell_key(listeners, event.location);
            self.active_index.entry(key).or_insert(*event);
        }

        // Admit
        for pending in std::mem::take(&mut self.pending_events) {
            let key = self.cell_key(listeners, pending.location);
            if self.active_index.contains_key(&key) {
                stats.suppressed += 1;
                continue;
            }
            let Some(sound) = table.lookup(pending.type_key) else {
                log::trace!("No sound definition for key {}", pending.type_key.value());
                stats.missing_definition += 1;
                continue;
            };

            sink.play_sound_at_location(sound, pending.location, pending.volume_modifier);
            self.active_events.push(pending);
            self.active_index.insert(key, pending);
            stats.admitted += 1;

            if self.draw_debug_cells {
                self.debug_cells.push(DebugCellMarker {
                    center: self.grid.cell_center(pending.location),
                    half_extent: self.grid.half_extent(),
                    remaining: pending.max_lifetime,
                });
            }
        }

        if !stats.is_empty() {
            log::trace!(
                "Dedup pass: {} admitted, {} suppressed, {} missing, {} expired, {} active",
                stats.admitted,
                stats.suppressed,
                stats.missing_definition,
                stats.expired,
                self.active_events.len()
            );
        }
        stats
    }

    fn cell_key(&self, listeners: &ListenerLocator, location: Vec3) -> CellKey {
        self.grid.cell_key(listeners.closest_listener_relative(location))
    }

    /// Event occupying `key` after the last tick, if any.
    pub fn occupant(&self, key: CellKey) -> Option<&ActiveEvent> {
        self.active_index.get(&key)
    }

    pub fn active_events(&self) -> &[ActiveEvent] {
        &self.active_events
    }

    pub fn active_count(&self) -> usize {
        self.active_events.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending_events.len()
    }

    pub fn debug_cells(&self) -> &[DebugCellMarker] {
        &self.debug_cells
    }

    /// Drop all active, pending and debug state.
    pub fn clear(&mut self) {
        self.active_events.clear();
        self.active_index.clear();
        self.pending_events.clear();
        self.debug_cells.clear();
    }
}
