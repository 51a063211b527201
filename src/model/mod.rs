// MODEL: Entity data and configuration
pub mod config;
pub mod entity;

pub use config::{
    ConfigError, JumpLimits, PhysicsConfig, PhysicsPreset, TimeStepConfig, MAX_TICKS_PER_FRAME,
};
pub use entity::{Dimensions, Entity, JumpState};
