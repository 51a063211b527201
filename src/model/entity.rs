use glam::Vec3;

use super::config::{ConfigError, PhysicsConfig};

/// On-screen size of the sprite. Not used by the physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub w: f32,
    pub h: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { w: 32.0, h: 32.0 }
    }
}

/// Jump bookkeeping carried between ticks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpState {
    /// Jumps consumed since the entity last touched the ground.
    pub jump_count: u8,
    /// Seconds of thrust already fed into the current jump.
    pub jump_time: f32,
    /// Airborne milliseconds accrued towards the next jump.
    pub jump_cooldown: f32,
}

impl JumpState {
    /// Landing resets the counters gating the next jump; `jump_time` is reset on takeoff.
    pub fn reset_on_landing(&mut self) {
        self.jump_count = 0;
        self.jump_cooldown = 0.0;
    }
}

/// The single simulated actor
#[derive(Debug, Clone)]
pub struct Entity {
    /// Planar position in `x`/`y`, height above the ground in `z`. `z >= 0` after every tick.
    pub transform: Vec3,
    /// Per-tick accumulator, zeroed at the end of each tick.
    pub force: Vec3,
    pub acceleration: Vec3,
    pub velocity: Vec3,
    pub dimensions: Dimensions,
    pub jump: JumpState,
    config: PhysicsConfig,
}

impl Entity {
    pub fn new(config: PhysicsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            transform: Vec3::ZERO,
            force: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            velocity: Vec3::ZERO,
            dimensions: Dimensions::default(),
            jump: JumpState::default(),
            config,
        })
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn is_airborne(&self) -> bool {
        self.transform.z > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_rest_on_the_ground() {
        let entity = Entity::new(PhysicsConfig::standard()).unwrap();
        assert_eq!(entity.transform, Vec3::ZERO);
        assert_eq!(entity.force, Vec3::ZERO);
        assert_eq!(entity.acceleration, Vec3::ZERO);
        assert_eq!(entity.velocity, Vec3::ZERO);
        assert_eq!(entity.jump, JumpState::default());
        assert!(!entity.is_airborne());
    }

    #[test]
    fn zero_mass_is_rejected_at_construction() {
        let config = PhysicsConfig { mass: 0.0, ..PhysicsConfig::standard() };
        assert_eq!(Entity::new(config).unwrap_err(), ConfigError::NonPositiveMass(0.0));
    }

    #[test]
    fn landing_keeps_jump_time() {
        let mut jump = JumpState { jump_count: 2, jump_time: 0.1, jump_cooldown: 100.0 };
        jump.reset_on_landing();
        assert_eq!(jump.jump_count, 0);
        assert_eq!(jump.jump_cooldown, 0.0);
        assert_eq!(jump.jump_time, 0.1);
    }
}
