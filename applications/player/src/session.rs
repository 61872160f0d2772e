//! Player session
//!
//! Wires the library, queue, orchestrator and controls to the simulated deck
//! and terminal surface, and executes parsed commands against them.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use segue_core::{PlayMode, PlaylistProvider, SubscriptionId, TrackId};
use segue_library::{FsResourceLoader, Library};
use segue_queue::{QueueController, QueueSnapshot};
use segue_transition::{
    ControlOutcome, Cover, InputLock, Key, KeyDispatcher, PlayerControls, SharedQueue,
    TransitionEvent, TransitionOrchestrator, TransitionOutcome, Transport,
};
use tracing::{debug, info, warn};

use crate::commands::{PlayerCommand, HELP};
use crate::config::PlayerConfig;
use crate::deck::SimulatedDeck;
use crate::error::{PlayerError, Result};
use crate::surface::TerminalSurface;

/// Result of one executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A control ran
    Control(ControlOutcome),
    /// Text for the terminal
    Message(String),
    /// The user asked to leave
    Quit,
}

/// A running player over one library directory
pub struct Session {
    library: Arc<Library>,
    queue: SharedQueue,
    loader: Arc<FsResourceLoader>,
    deck: Arc<SimulatedDeck>,
    surface: Arc<TerminalSurface>,
    orchestrator: Arc<TransitionOrchestrator>,
    controls: PlayerControls,
    keys: Mutex<KeyDispatcher>,
    pressed: Mutex<HashSet<Key>>,
    playing: Arc<Mutex<Option<TrackId>>>,
    library_listener: SubscriptionId,
}

impl Session {
    /// Open the configured library and build the player around it
    pub fn new(config: &PlayerConfig) -> Result<Self> {
        let library = Arc::new(Library::open(&config.library.directory)?);
        let view = config.library_view();
        library.set_sort(view.sort, view.ascending);
        library.set_favorites_only(view.favorites_only);

        let queue: SharedQueue = Arc::new(Mutex::new(QueueController::new(
            library.clone(),
            config.queue_config(),
        )));

        let deck = Arc::new(SimulatedDeck::new(
            Duration::from_secs(config.playback.track_seconds),
            Duration::from_secs(config.playback.clip_seconds),
        ));
        let loader = Arc::new(FsResourceLoader::new(
            library.root().to_path_buf(),
            deck.clone(),
        ));
        let surface = Arc::new(TerminalSurface::new());

        let orchestrator = Arc::new(TransitionOrchestrator::new(
            queue.clone(),
            loader.clone(),
            Cover::new(surface.clone(), config.cover_timing()),
            surface.clone(),
            InputLock::new(),
        ));
        let controls = PlayerControls::new(
            orchestrator.clone(),
            deck.clone(),
            config.control_settings(),
        );

        let playing = Arc::new(Mutex::new(None));
        {
            let playing = Arc::clone(&playing);
            orchestrator.subscribe(move |event| match event {
                TransitionEvent::TrackResolved { track, .. } => {
                    *guard(&playing) = Some(track.clone());
                }
                TransitionEvent::PhaseChanged { phase } => debug!("Transition phase {}", phase),
                _ => {}
            });
        }

        // Re-point the queue at the playing track whenever the list reshapes.
        // Weak handles: the library owns this callback and the queue owns the library.
        let library_listener = {
            let queue = Arc::downgrade(&queue);
            let playing = Arc::downgrade(&playing);
            library.on_change(move |change| {
                debug!("Library changed, {} visible", change.len);
                resync_queue(&queue, &playing);
            })
        };

        info!(
            "Session ready: {} tracks from {}",
            library.len(),
            library.root().display()
        );

        Ok(Self {
            library,
            queue,
            loader,
            deck,
            surface,
            orchestrator,
            controls,
            keys: Mutex::new(KeyDispatcher::default()),
            pressed: Mutex::new(HashSet::new()),
            playing,
            library_listener,
        })
    }

    /// Play the starting track
    pub async fn start(&self) -> TransitionOutcome {
        self.orchestrator.play_current().await
    }

    /// Run one command
    pub async fn execute(&self, command: PlayerCommand) -> Result<Response> {
        let response = match command {
            PlayerCommand::Control(command) => {
                Response::Control(self.controls.dispatch(command).await)
            }
            PlayerCommand::Skip(seconds) => Response::Control(self.controls.skip_by(seconds).await),
            PlayerCommand::Goto(index) => Response::Control(ControlOutcome::Transition(
                self.orchestrator.go_to_index(index).await,
            )),
            PlayerCommand::Mode(mode) => Response::Control(self.set_mode(mode)),
            PlayerCommand::Sort(key) => {
                let view = self.library.sort_by(key);
                Response::Message(format!(
                    "sorted by {} {}",
                    view.sort,
                    if view.ascending { "ascending" } else { "descending" }
                ))
            }
            PlayerCommand::Favorites => {
                let on = self.library.toggle_favorites_only();
                Response::Message(format!(
                    "favorites only: {}, {} visible",
                    on_off(on),
                    self.library.len()
                ))
            }
            PlayerCommand::Favorite { id, favorite } => {
                if !self.library.set_favorite(&id, favorite) {
                    return Err(PlayerError::Command(format!("unknown track: {}", id)));
                }
                Response::Message(format!("track {} favorite: {}", id, on_off(favorite)))
            }
            PlayerCommand::Keys(keys) => {
                *guard(&self.pressed) = keys.into_iter().collect();
                Response::Message(String::new())
            }
            PlayerCommand::Rescan => {
                let count = self.library.rescan()?;
                Response::Message(format!("{} tracks", count))
            }
            PlayerCommand::List => Response::Message(self.render_list()),
            PlayerCommand::Status => Response::Message(self.render_status()),
            PlayerCommand::Help => Response::Message(HELP.to_string()),
            PlayerCommand::Quit => Response::Quit,
        };
        Ok(response)
    }

    /// Advance the simulated clock and react to it
    ///
    /// Rotates background clips, dispatches key-downs since the last tick and
    /// moves on when the running track ends.
    pub async fn tick(&self, elapsed: Duration) -> Vec<ControlOutcome> {
        if self.deck.advance(elapsed).clip_finished {
            self.loader.on_video_finished();
        }

        let pressed = std::mem::take(&mut *guard(&self.pressed));
        let commands = guard(&self.keys).tick(&pressed, self.orchestrator.input_lock().is_locked());

        let mut outcomes = Vec::with_capacity(commands.len() + 1);
        for command in commands {
            debug!("Key command {}", command.as_str());
            outcomes.push(self.controls.dispatch(command).await);
        }

        let end_of_track = self.controls.on_tick().await;
        if end_of_track != ControlOutcome::Ignored {
            outcomes.push(end_of_track);
        }
        outcomes
    }

    fn set_mode(&self, mode: PlayMode) -> ControlOutcome {
        if self.orchestrator.input_lock().is_locked() {
            return ControlOutcome::Ignored;
        }
        QueueController::update(&self.queue, |queue| queue.set_mode(mode));
        ControlOutcome::Mode(mode)
    }

    // ===== Accessors =====

    pub fn library(&self) -> &Arc<Library> {
        &self.library
    }

    pub fn orchestrator(&self) -> &Arc<TransitionOrchestrator> {
        &self.orchestrator
    }

    pub fn deck(&self) -> &Arc<SimulatedDeck> {
        &self.deck
    }

    pub fn surface(&self) -> &Arc<TerminalSurface> {
        &self.surface
    }

    pub fn queue_snapshot(&self) -> QueueSnapshot {
        guard(&self.queue).snapshot()
    }

    /// Track most recently resolved by a transition
    pub fn playing(&self) -> Option<TrackId> {
        current_track(&self.playing)
    }

    // ===== Rendering =====

    fn render_list(&self) -> String {
        let current = guard(&self.queue).current_index();
        let view = self.library.view();
        let mut out = format!(
            "sort {} {}{}\n",
            view.sort,
            if view.ascending { "asc" } else { "desc" },
            if view.favorites_only { ", favorites only" } else { "" }
        );
        for (index, entry) in self.library.visible_entries().iter().enumerate() {
            let _ = writeln!(
                out,
                "{} {:>3}  [{}] {} - {}{}",
                if current == Some(index) { '>' } else { ' ' },
                index,
                entry.id,
                entry.title(),
                entry.game(),
                if entry.is_favorite() { " *" } else { "" }
            );
        }
        out.trim_end().to_string()
    }

    fn render_status(&self) -> String {
        let screen = self.surface.screen();
        let snapshot = self.queue_snapshot();
        let position = self.deck.position().as_secs();
        let duration = self
            .deck
            .duration()
            .map_or_else(|| "--:--".to_string(), |d| clock(d.as_secs()));

        format!(
            "{} - {}\n{}\n{:?} {} / {} {}\nmode {}, index {}, phase {}",
            screen.track.as_ref().map_or("-", TrackId::as_str),
            screen.title.as_deref().unwrap_or("-"),
            screen.credit.as_deref().unwrap_or(""),
            screen.presentation,
            clock(position),
            duration,
            if self.deck.is_playing() { "playing" } else { "paused" },
            snapshot.mode,
            snapshot
                .current_index
                .map_or_else(|| "-".to_string(), |i| i.to_string()),
            self.orchestrator.phase(),
        )
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.library.remove_listener(self.library_listener);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("library", &self.library)
            .field("playing", &self.playing())
            .finish_non_exhaustive()
    }
}

fn resync_queue(queue: &Weak<Mutex<QueueController>>, playing: &Weak<Mutex<Option<TrackId>>>) {
    let Some(queue) = queue.upgrade() else {
        return;
    };
    let playing = playing.upgrade().and_then(|playing| current_track(&playing));

    let mut queue = guard(&queue);
    queue.notify_list_changed();
    if let Some(id) = playing {
        if queue.sync_with_track(&id).is_none() {
            warn!("Track {} left the visible list", id);
        }
    }
}

fn current_track(playing: &Mutex<Option<TrackId>>) -> Option<TrackId> {
    guard(playing).clone()
}

fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

fn clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
