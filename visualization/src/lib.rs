//! stepscope-visualization: declarative scene projection for step traces
//!
//! Projection is the pure last stage of the pipeline: a [`projector::Projector`]
//! turns one recorded step into a [`scene::Scene`] of drawable shapes under a
//! [`theme::Theme`]. No timers, no mutation, no knowledge of playback; the
//! same step always projects to the same scene, which makes scenes directly
//! usable as golden-test fixtures.

pub mod projector;
pub mod scene;
pub mod theme;
pub mod view;

pub use projector::Projector;
pub use scene::{Color, Label, Scene, Shape};
pub use theme::Theme;
pub use view::{
    ArrayProjector, BoardProjector, CallStackProjector, GraphProjector, MatrixProjector,
    PointSetProjector, TreeProjector,
};

#[cfg(test)]
mod tests {
    use super::*;
    use stepscope_core::algorithm::sorting::QuickSort;
    use stepscope_core::Algorithm;

    /// Byte-deterministic end-to-end fixture: core run -> projection ->
    /// serialized scene. Guards the full pipeline against accidental
    /// nondeterminism.
    #[test]
    fn quicksort_scene_golden() {
        let trace = QuickSort.run(&vec![2, 1]).unwrap();
        let scene = ArrayProjector::default().project(trace.last().unwrap(), &Theme::dark());
        let a = serde_json::to_string(&scene).unwrap();

        let trace = QuickSort.run(&vec![2, 1]).unwrap();
        let scene = ArrayProjector::default().project(trace.last().unwrap(), &Theme::dark());
        let b = serde_json::to_string(&scene).unwrap();

        assert_eq!(a, b);
        assert!(a.contains("\"annotation\":\"Array sorted\""));
    }
}
