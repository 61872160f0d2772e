/// Recording collaborators for transition tests
///
/// Every mock writes into one shared journal so tests can assert on the
/// relative order of loads, paints, slides and playback.
use async_trait::async_trait;
use segue_core::{
    AudioAsset, PlayMode, Presentation, Rgba, StaticPlaylist, TrackEntry, TrackId,
    TrackMetadata, VideoPlaylist, Visual,
};
use segue_queue::{QueueConfig, QueueController};
use segue_transition::{
    Cover, CoverSurface, CoverTiming, InputLock, PanelColors, PreparedTrack, ResourceLoader,
    SharedQueue, SlideDirection, Stage, Transport, TransitionOrchestrator,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type Journal = Arc<Mutex<Vec<String>>>;

fn record(journal: &Journal, entry: impl Into<String>) {
    journal.lock().unwrap().push(entry.into());
}

// ===== Loader =====

#[derive(Clone, Default)]
pub struct MockTrack {
    pub metadata: Option<TrackMetadata>,
    pub audio: bool,
    pub videos: usize,
}

pub struct MockLoader {
    journal: Journal,
    tracks: HashMap<TrackId, MockTrack>,
    load_delay: Duration,
    pub started: Mutex<Vec<PreparedTrack>>,
}

impl MockLoader {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            tracks: HashMap::new(),
            load_delay: Duration::ZERO,
            started: Mutex::new(Vec::new()),
        }
    }

    /// Track with metadata, audio and one video
    pub fn with_full_track(self, id: &str, primary: Rgba, secondary: Rgba) -> Self {
        let metadata = TrackMetadata {
            title: format!("Title {}", id),
            color1: primary,
            color2: secondary,
            ..TrackMetadata::default()
        };
        self.with_track(
            id,
            MockTrack {
                metadata: Some(metadata),
                audio: true,
                videos: 1,
            },
        )
    }

    pub fn with_track(mut self, id: &str, track: MockTrack) -> Self {
        self.tracks.insert(TrackId::new(id), track);
        self
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    fn track(&self, id: &TrackId) -> MockTrack {
        self.tracks.get(id).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl ResourceLoader for MockLoader {
    fn load_metadata_instant(&self, id: &TrackId) -> Option<TrackMetadata> {
        record(&self.journal, format!("metadata:{}", id));
        self.track(id).metadata
    }

    async fn prepare_audio(&self, id: &TrackId) -> Option<AudioAsset> {
        tokio::time::sleep(self.load_delay).await;
        record(&self.journal, format!("audio:{}", id));
        self.track(id)
            .audio
            .then(|| AudioAsset::new(format!("song{}.mp3", id)))
    }

    async fn prepare_visual(&self, id: &TrackId) -> Visual {
        tokio::time::sleep(self.load_delay).await;
        record(&self.journal, format!("visual:{}", id));
        let clips: Vec<PathBuf> = (0..self.track(id).videos)
            .map(|n| PathBuf::from(format!("video{}_{}.mp4", id, n)))
            .collect();
        VideoPlaylist::new(clips).map_or(Visual::Artwork(None), Visual::Video)
    }

    fn start_playback(&self, track: &PreparedTrack) {
        record(&self.journal, format!("start:{}", track.id));
        self.started.lock().unwrap().push(track.clone());
    }
}

// ===== Surface and stage =====

pub struct MockSurface {
    journal: Journal,
    pub paints: Mutex<Vec<PanelColors>>,
}

impl MockSurface {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            paints: Mutex::new(Vec::new()),
        }
    }
}

impl CoverSurface for MockSurface {
    fn set_overlay_visible(&self, visible: bool) {
        record(&self.journal, format!("overlay:{}", visible));
    }

    fn place_offscreen(&self) {
        record(&self.journal, "offscreen");
    }

    fn paint(&self, colors: &PanelColors) {
        record(&self.journal, "paint");
        self.paints.lock().unwrap().push(*colors);
    }

    fn begin_slide(&self, panel: usize, direction: SlideDirection, _duration: Duration) {
        let direction = match direction {
            SlideDirection::In => "in",
            SlideDirection::Out => "out",
        };
        record(&self.journal, format!("slide-{}:{}", direction, panel));
    }
}

pub struct MockStage {
    journal: Journal,
}

impl Stage for MockStage {
    fn close_navigation_instant(&self) {
        record(&self.journal, "close-navigation");
    }

    fn open_panels_instant(&self) {
        record(&self.journal, "open-panels");
    }

    fn apply_metadata(&self, id: &TrackId, metadata: &TrackMetadata) {
        record(&self.journal, format!("apply:{}:{}", id, metadata.title));
    }

    fn set_presentation(&self, presentation: Presentation) {
        record(&self.journal, format!("presentation:{:?}", presentation));
    }
}

// ===== Transport =====

#[derive(Debug, Default)]
pub struct TransportState {
    pub position: Duration,
    pub duration: Option<Duration>,
    pub playing: bool,
    pub finished: bool,
}

#[derive(Default)]
pub struct MockTransport {
    pub state: Mutex<TransportState>,
}

impl MockTransport {
    pub fn at(position_secs: u64, duration_secs: u64) -> Self {
        Self {
            state: Mutex::new(TransportState {
                position: Duration::from_secs(position_secs),
                duration: Some(Duration::from_secs(duration_secs)),
                playing: true,
                finished: false,
            }),
        }
    }

    /// Transport of a track whose length is unknown
    pub fn unbounded(position_secs: u64) -> Self {
        let transport = Self::at(position_secs, 0);
        transport.state.lock().unwrap().duration = None;
        transport
    }

    pub fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }
}

impl Transport for MockTransport {
    fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }

    fn duration(&self) -> Option<Duration> {
        self.state.lock().unwrap().duration
    }

    fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    fn has_finished(&self) -> bool {
        self.state.lock().unwrap().finished
    }

    fn seek(&self, position: Duration) {
        let mut state = self.state.lock().unwrap();
        state.position = position;
        state.finished = false;
    }

    fn play(&self) {
        self.state.lock().unwrap().playing = true;
    }

    fn pause(&self) {
        self.state.lock().unwrap().playing = false;
    }
}

// ===== Harness =====

pub struct Harness {
    pub orchestrator: Arc<TransitionOrchestrator>,
    pub queue: SharedQueue,
    pub lock: InputLock,
    pub journal: Journal,
    pub surface: Arc<MockSurface>,
    pub loader: Arc<MockLoader>,
}

impl Harness {
    pub fn entries(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.entries()
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .count()
    }

    pub fn clear_journal(&self) {
        self.journal.lock().unwrap().clear();
        self.surface.paints.lock().unwrap().clear();
    }

    pub fn current_index(&self) -> Option<usize> {
        self.queue.lock().unwrap().current_index()
    }
}

pub fn journal() -> Journal {
    Arc::default()
}

/// Loader whose tracks all have metadata, audio and video
pub fn full_loader(journal: &Journal, ids: &[&str]) -> MockLoader {
    ids.iter().fold(MockLoader::new(Arc::clone(journal)), |loader, id| {
        loader.with_full_track(id, Rgba::WHITE, Rgba::BLACK)
    })
}

pub fn harness(ids: &[&str], mode: PlayMode, journal: Journal, loader: MockLoader) -> Harness {
    let playlist = StaticPlaylist::new(ids.iter().map(|id| TrackEntry::new(*id)).collect());
    let queue: SharedQueue = Arc::new(Mutex::new(QueueController::new(
        Arc::new(playlist),
        QueueConfig {
            mode,
            shuffle_seed: Some(99),
            ..QueueConfig::default()
        },
    )));

    let surface = Arc::new(MockSurface::new(Arc::clone(&journal)));
    let loader = Arc::new(loader);
    let stage = Arc::new(MockStage {
        journal: Arc::clone(&journal),
    });
    let lock = InputLock::new();

    let orchestrator = Arc::new(TransitionOrchestrator::new(
        Arc::clone(&queue),
        loader.clone(),
        Cover::new(surface.clone(), CoverTiming::default()),
        stage,
        lock.clone(),
    ));

    journal.lock().unwrap().clear();
    Harness {
        orchestrator,
        queue,
        lock,
        journal,
        surface,
        loader,
    }
}
