//! Playback cursor state machine
//!
//! Pure transitions over a step index, separated from the timer loop so the
//! whole control surface is unit-testable without an async runtime. Misuse
//! (pausing while idle, playing past the end, seeking an empty trace) is a
//! silent no-op; only an invalid speed is an error, and that is rejected at
//! the command boundary before a cursor ever sees it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lower bound on the tick interval. Speeds high enough to hit the floor
/// all play at this fastest rate.
pub const FLOOR_MS: u64 = 16;

/// Tick interval at speed 1.0.
pub const BASE_MS: u64 = 400;

/// Tick interval for `speed`: `max(FLOOR_MS, BASE_MS / speed)`.
///
/// Callers must have validated `speed` as finite and positive.
pub fn interval_for(speed: f64) -> Duration {
    let ms = (BASE_MS as f64 / speed).max(FLOOR_MS as f64);
    Duration::from_millis(ms.round() as u64)
}

/// Lifecycle of a playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No playback has started yet.
    Idle,
    /// Timer is scheduling step advances.
    Playing,
    /// Stopped on the current step, position retained.
    Paused,
    /// The last step has been reached.
    Done,
}

/// Position and mode of playback over a trace of known length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackCursor {
    index: usize,
    len: usize,
    status: PlaybackStatus,
    speed: f64,
}

impl PlaybackCursor {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len,
            status: PlaybackStatus::Idle,
            speed: 1.0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Current tick interval.
    pub fn interval(&self) -> Duration {
        interval_for(self.speed)
    }

    fn last_index(&self) -> usize {
        self.len.saturating_sub(1)
    }

    /// Start or resume playback at `speed`.
    ///
    /// Idempotent while already playing (only the speed updates). A no-op
    /// once `Done` and on an empty trace. Playing while already standing on
    /// the last step completes the session instead of scheduling timers
    /// that have nothing left to advance. Returns whether the call started
    /// playback from `Idle`, in which case the current step has not been
    /// emitted yet.
    pub fn play(&mut self, speed: f64) -> bool {
        if self.len == 0 || self.status == PlaybackStatus::Done {
            return false;
        }
        self.speed = speed;
        let from_idle = self.status == PlaybackStatus::Idle;
        self.status = if self.index == self.last_index() {
            PlaybackStatus::Done
        } else {
            PlaybackStatus::Playing
        };
        from_idle
    }

    /// Stop on the current step. No-op unless playing.
    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Jump to `index`, clamped to the trace bounds, without replaying the
    /// intermediate delays. Returns the clamped index, or `None` on an
    /// empty trace.
    ///
    /// Seeking away from the end re-opens a `Done` session as `Paused`;
    /// seeking to the last step completes it.
    pub fn seek(&mut self, index: usize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.index = index.min(self.last_index());
        if self.index == self.last_index() {
            self.status = PlaybackStatus::Done;
        } else if self.status != PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
        Some(self.index)
    }

    /// Return to `Idle` at index 0. Speed is retained.
    pub fn reset(&mut self) {
        self.index = 0;
        self.status = PlaybackStatus::Idle;
    }

    /// Move one step forward while playing. Returns the new index, or
    /// `None` when not playing or already on the last step.
    pub fn advance(&mut self) -> Option<usize> {
        if self.status != PlaybackStatus::Playing || self.index >= self.last_index() {
            return None;
        }
        self.index += 1;
        if self.index == self.last_index() {
            self.status = PlaybackStatus::Done;
        }
        Some(self.index)
    }
}
