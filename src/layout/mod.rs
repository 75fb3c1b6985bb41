//! Layout module: centering model, refinement ratio and ghost-width config.

pub mod centering;
pub mod config;
pub mod ratio;

pub use centering::Centering;
pub use config::LayoutConfig;
pub use ratio::RefinementRatio;
