//! Timer-driven step sequencer
//!
//! One cooperative tokio task owns a finished [`StepTrace`] and a
//! [`PlaybackCursor`]. Commands arrive on an mpsc channel; emitted steps
//! leave on another. The trace is never re-run: seeking jumps the cursor and
//! emits the target step immediately, without replaying intermediate
//! delays. Shutdown simply stops scheduling further timers; steps already
//! emitted are immutable snapshots, so cancellation needs no cleanup.

use tokio::sync::mpsc;

use crate::playback::cursor::{PlaybackCursor, PlaybackStatus};
use crate::step::{Step, StepTrace};

/// Capacity of both sequencer channels.
const CHANNEL_CAPACITY: usize = 64;

/// Control messages accepted by a running sequencer.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    Play { speed: f64 },
    Pause,
    Seek { index: usize },
    Reset,
    Shutdown,
}

/// Emitted playback progress.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent<S> {
    /// The step at `index` became current.
    Step { index: usize, step: Step<S> },
    /// The last step has been reached.
    Finished,
}

/// Playback command-boundary errors.
///
/// Cursor misuse is a silent no-op; these cover the two things that cannot
/// be: a speed the interval formula has no answer for, and a sequencer task
/// that is no longer running.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlaybackError {
    #[error("playback speed {speed} is not a positive finite number")]
    InvalidSpeed { speed: f64 },
    #[error("sequencer task has shut down")]
    Closed,
}

/// Client half of a spawned sequencer: a command sender and the event
/// stream.
#[derive(Debug)]
pub struct SequencerHandle<S> {
    commands: mpsc::Sender<PlaybackCommand>,
    /// Emitted steps and completion notices, in playback order.
    pub events: mpsc::Receiver<PlaybackEvent<S>>,
}

impl<S> SequencerHandle<S> {
    /// Start or resume playback. Speed is validated here, before the
    /// command crosses into the task.
    pub async fn play(&self, speed: f64) -> Result<(), PlaybackError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(PlaybackError::InvalidSpeed { speed });
        }
        self.send(PlaybackCommand::Play { speed }).await
    }

    pub async fn pause(&self) -> Result<(), PlaybackError> {
        self.send(PlaybackCommand::Pause).await
    }

    pub async fn seek(&self, index: usize) -> Result<(), PlaybackError> {
        self.send(PlaybackCommand::Seek { index }).await
    }

    pub async fn reset(&self) -> Result<(), PlaybackError> {
        self.send(PlaybackCommand::Reset).await
    }

    pub async fn shutdown(&self) -> Result<(), PlaybackError> {
        self.send(PlaybackCommand::Shutdown).await
    }

    async fn send(&self, command: PlaybackCommand) -> Result<(), PlaybackError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| PlaybackError::Closed)
    }
}

/// Sequencer task state: the trace being played and the cursor over it.
pub struct StepSequencer<S> {
    trace: StepTrace<S>,
    cursor: PlaybackCursor,
}

impl<S> StepSequencer<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Spawn the playback task for `trace` and return its handle.
    pub fn spawn(trace: StepTrace<S>) -> SequencerHandle<S> {
        let (command_tx, command_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let sequencer = Self {
            cursor: PlaybackCursor::new(trace.len()),
            trace,
        };
        tokio::spawn(sequencer.run(command_rx, event_tx));
        SequencerHandle {
            commands: command_tx,
            events: event_rx,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<PlaybackCommand>,
        events: mpsc::Sender<PlaybackEvent<S>>,
    ) {
        loop {
            let command = if self.cursor.status() == PlaybackStatus::Playing {
                tokio::select! {
                    command = commands.recv() => match command {
                        Some(command) => Some(command),
                        None => break,
                    },
                    _ = tokio::time::sleep(self.cursor.interval()) => None,
                }
            } else {
                match commands.recv().await {
                    Some(command) => Some(command),
                    None => break,
                }
            };

            match command {
                Some(command) => {
                    if !self.handle(command, &events).await {
                        break;
                    }
                }
                // Timer tick while playing.
                None => {
                    if let Some(index) = self.cursor.advance() {
                        if !self.emit(index, &events).await {
                            break;
                        }
                    }
                    if self.cursor.status() == PlaybackStatus::Done
                        && events.send(PlaybackEvent::Finished).await.is_err()
                    {
                        break;
                    }
                }
            }
        }
        log::debug!("sequencer task stopping at index {}", self.cursor.index());
    }

    /// Apply one command. Returns false when the task should stop.
    async fn handle(
        &mut self,
        command: PlaybackCommand,
        events: &mpsc::Sender<PlaybackEvent<S>>,
    ) -> bool {
        log::trace!("playback command {command:?} at index {}", self.cursor.index());
        match command {
            PlaybackCommand::Play { speed } => {
                let was_done = self.cursor.status() == PlaybackStatus::Done;
                // First play emits the step the cursor already stands on;
                // a resume continues with the next tick instead.
                if self.cursor.play(speed) && !self.emit(self.cursor.index(), events).await {
                    return false;
                }
                // A one-step trace completes on the spot.
                if !was_done && self.cursor.status() == PlaybackStatus::Done {
                    return events.send(PlaybackEvent::Finished).await.is_ok();
                }
                true
            }
            PlaybackCommand::Pause => {
                self.cursor.pause();
                true
            }
            PlaybackCommand::Seek { index } => {
                match self.cursor.seek(index) {
                    Some(clamped) => self.emit(clamped, events).await,
                    None => true,
                }
            }
            PlaybackCommand::Reset => {
                self.cursor.reset();
                true
            }
            PlaybackCommand::Shutdown => false,
        }
    }

    async fn emit(&self, index: usize, events: &mpsc::Sender<PlaybackEvent<S>>) -> bool {
        let Some(step) = self.trace.get(index) else {
            return true;
        };
        events
            .send(PlaybackEvent::Step {
                index,
                step: step.clone(),
            })
            .await
            .is_ok()
    }
}
