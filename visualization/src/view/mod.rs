//! Per-family projectors.

pub mod array_view;
pub mod board_view;
pub mod graph_view;
pub mod matrix_view;
pub mod point_view;
pub mod stack_view;
pub mod tree_view;

pub use array_view::ArrayProjector;
pub use board_view::BoardProjector;
pub use graph_view::GraphProjector;
pub use matrix_view::MatrixProjector;
pub use point_view::PointSetProjector;
pub use stack_view::CallStackProjector;
pub use tree_view::TreeProjector;
