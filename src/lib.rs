//! Physarum-style trail formation. Agents sense a decaying, diffusing pheromone grid, steer towards
//! stronger trail and deposit more of it; every tick yields a [`FrameSnapshot`] of agent positions
//! that can be rendered into an animated GIF.

pub mod agent;
pub mod blur;
pub mod config;
pub mod error;
pub mod grid;
pub mod math;
pub mod model;
pub mod palette;
pub mod render;
pub mod snapshot;

pub use agent::{Agent, Sensors};
pub use config::Config;
pub use error::{ConfigError, RenderError};
pub use grid::Grid;
pub use model::Model;
pub use palette::Palette;
pub use snapshot::FrameSnapshot;
