// Configuration types shared by the shape editor and the project form
pub mod grid_config;

pub use grid_config::GridConfig;
