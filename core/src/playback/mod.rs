//! Playback
//!
//! Walks finished step traces under interactive control. Split into the pure
//! [`cursor`] state machine and the timer-owning [`sequencer`] task.

pub mod cursor;
pub mod sequencer;

pub use cursor::{interval_for, PlaybackCursor, PlaybackStatus, BASE_MS, FLOOR_MS};
pub use sequencer::{
    PlaybackCommand, PlaybackError, PlaybackEvent, SequencerHandle, StepSequencer,
};
