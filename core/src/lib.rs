//! stepscope-core: deterministic step traces for algorithm animation
//!
//! The crate separates three concerns that visualization codebases tend to
//! tangle together:
//!
//! - [`algorithm`]: pure cores that run a textbook algorithm to completion
//!   and record every unit of progress as an immutable [`step::Step`].
//! - [`step`]: the trace model those cores produce.
//! - [`playback`]: a timer-driven sequencer that walks a finished trace
//!   under play/pause/seek/reset control, without ever re-running the
//!   algorithm.
//!
//! Cores never sleep and the sequencer never computes; given the same input,
//! a core's serialized trace is byte-identical across runs.

pub mod algorithm;
pub mod data_structures;
pub mod playback;
pub mod step;

pub use algorithm::{Algorithm, AlgorithmError, AlgorithmId, Category};
pub use playback::{PlaybackCursor, PlaybackStatus, SequencerHandle, StepSequencer};
pub use step::{ElementId, HighlightRole, Step, StepRecorder, StepTrace};
