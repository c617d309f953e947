//! Engine configuration

pub mod consts;
mod model;

pub use model::EngineConfig;
