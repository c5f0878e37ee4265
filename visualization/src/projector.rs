//! Projector trait
//!
//! A projector is a pure function from one step to one scene. Projectors
//! own their layout parameters (viewport size, bar widths, node radii) and
//! nothing else: no timers, no caches, no mutable state, so projecting the
//! same step twice always yields equal scenes.

use stepscope_core::Step;

use crate::scene::Scene;
use crate::theme::Theme;

/// Maps steps of one state family onto declarative scenes.
pub trait Projector {
    /// State family this projector renders.
    type State;

    /// Build the scene for `step` under `theme`.
    fn project(&self, step: &Step<Self::State>, theme: &Theme) -> Scene;
}
