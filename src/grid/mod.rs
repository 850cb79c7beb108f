// Grid module - binary shape masks edited cell by cell

pub mod shape;
pub mod traits;

pub use shape::ShapeGrid;
pub use traits::{GridError, GridResult, GridTrait};

pub use crate::config::GridConfig;
