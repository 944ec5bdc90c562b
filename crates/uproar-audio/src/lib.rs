pub mod cache;
pub mod debug_cells;
pub mod listener;
pub mod playback;

pub use cache::{ActiveEvent, DedupCache, TickStats};
pub use debug_cells::{DebugCellMarker, DebugVertex};
pub use listener::ListenerLocator;
pub use playback::{NullPlayback, PlaybackRequest, PlaybackSink};

use glam::{Affine3A, Vec3};
use uproar_core::settings::UproarSettings;
use uproar_core::types::{ClassifiedEvent, PhysicsEventSink};
use uproar_rules::registry::SoundDefinitionTable;

/// Kind of world a subsystem instance is created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorldKind {
    Game,
    PlayInEditor,
    Editor,
    EditorPreview,
    GamePreview,
    Inactive,
}

/// Top-level facade. Owns the sound definition table, the listener set and
/// the deduplication cache. While inactive, ingestion and ticking are no-ops.
pub struct UproarSubsystem {
    settings: UproarSettings,
    table: SoundDefinitionTable,
    listeners: ListenerLocator,
    cache: DedupCache,
    active: bool,
}

impl Default for UproarSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl UproarSubsystem {
    /// Create an inactive subsystem with default settings and an empty table.
    pub fn new() -> Self {
        let settings = UproarSettings::default();
        Self {
            cache: DedupCache::new(&settings),
            settings,
            table: SoundDefinitionTable::default(),
            listeners: ListenerLocator::default(),
            active: false,
        }
    }

    /// Create an active subsystem around an already built table.
    pub fn with_table(settings: UproarSettings, table: SoundDefinitionTable) -> Self {
        let settings = settings.clamped();
        log::info!("Uproar subsystem active with {} sound definitions", table.len());
        Self {
            cache: DedupCache::new(&settings),
            settings,
            table,
            listeners: ListenerLocator::default(),
            active: true,
        }
    }

    /// Whether a subsystem should be created for this world.
    pub fn supports_world(kind: WorldKind) -> bool {
        matches!(kind, WorldKind::Game | WorldKind::PlayInEditor)
    }

    /// Apply settings, load the sound definition table and start ticking.
    /// A missing or malformed table is logged and leaves the table empty.
    pub fn initialize(&mut self, settings: UproarSettings) {
        self.settings = settings.clamped();
        if let Err(errors) = uproar_rules::validator::validate_project_settings(&self.settings) {
            for e in &errors {
                log::warn!("Uproar settings: {e}");
            }
        }
        self.table = match &self.settings.sound_definition_path {
            Some(path) => match uproar_rules::load_sound_definitions_from_path(path) {
                Ok(rows) => SoundDefinitionTable::build(&rows),
                Err(e) => {
                    log::warn!("Sound definitions unavailable, no sounds will play: {}", e);
                    SoundDefinitionTable::default()
                }
            },
            None => {
                log::warn!("No sound definition table configured, no sounds will play");
                SoundDefinitionTable::default()
            }
        };
        self.cache = DedupCache::new(&self.settings);
        self.active = true;
        log::info!(
            "Uproar subsystem initialized: {} sound definitions, cell size {}, lifetime {}s",
            self.table.len(),
            self.settings.cell_size,
            self.settings.event_lifetime_seconds
        );
    }

    /// Stop ticking and drop all in-flight events.
    pub fn deinitialize(&mut self) {
        self.active = false;
        self.cache.clear();
        log::info!("Uproar subsystem deinitialized");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn settings(&self) -> &UproarSettings {
        &self.settings
    }

    pub fn table(&self) -> &SoundDefinitionTable {
        &self.table
    }

    pub fn cache(&self) -> &DedupCache {
        &self.cache
    }

    /// Replace the listener set from listener world transforms.
    pub fn set_listeners(&mut self, transforms: &[Affine3A]) {
        self.listeners = ListenerLocator::from_transforms(transforms);
    }

    pub fn set_listener_translations(&mut self, translations: Vec<Vec3>) {
        self.listeners = ListenerLocator::new(translations);
    }

    pub fn listeners(&self) -> &ListenerLocator {
        &self.listeners
    }

    /// Run one deduplication pass. Returns empty stats while inactive.
    pub fn tick<S: PlaybackSink + ?Sized>(&mut self, dt: f32, sink: &mut S) -> TickStats {
        if !self.active {
            return TickStats::default();
        }
        self.cache.tick(dt, &self.listeners, &self.table, sink)
    }

    /// Line-list vertices for every live debug cell marker.
    pub fn debug_cell_vertices(&self) -> Vec<DebugVertex> {
        self.cache
            .debug_cells()
            .iter()
            .flat_map(DebugCellMarker::wireframe)
            .collect()
    }
}

impl PhysicsEventSink for UproarSubsystem {
    fn physics_event(&mut self, event: ClassifiedEvent) {
        if !self.active {
            return;
        }
        self.cache.push(&event);
    }
}
