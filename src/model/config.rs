use std::str::FromStr;
use thiserror::Error;

/// Rejected configuration values. Raised at construction, never during a tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f32),
    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },
    #[error("fixed time step must be positive, got {0}")]
    NonPositiveTimeStep(f64),
    #[error("`{field}` must not be negative, got {value}")]
    NegativeLimit { field: &'static str, value: f64 },
    #[error("jump power {jump_power} cannot lift a weight of {weight}")]
    JumpCannotLift { jump_power: f32, weight: f32 },
    #[error("up to {ticks} ticks per frame (max_delta_time / fixed_time_step), limit is {limit}")]
    TooManyTicksPerFrame { ticks: f64, limit: u32 },
    #[error("unknown physics preset `{0}` (expected `standard` or `springy`)")]
    UnknownPreset(String),
}

/// Upper bound on the fixed ticks a single frame may run after the delta clamp
pub const MAX_TICKS_PER_FRAME: u32 = 1024;

/// How long and how often upward force may be fed into a jump
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpLimits {
    /// Seconds a held jump keeps receiving `jump_power`.
    pub max_jump_time: f32,
    /// Airborne milliseconds required before the next jump may start.
    pub max_jump_cooldown: f32,
}

/// Per-entity physics constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    pub mass: f32,
    pub speed: f32,
    pub run_power: f32,
    pub jump_power: f32,
    pub gravity: f32,
    /// Horizontal damping rate. `deceleration * dt > 1` flips the velocity sign every
    /// tick; that configuration is accepted and behaves as an oscillating decay.
    pub deceleration: f32,
    pub jump: JumpLimits,
}

impl PhysicsConfig {
    pub fn standard() -> Self {
        Self {
            mass: 1.0,
            speed: 3_000.0,
            run_power: 2_000.0,
            jump_power: 10_000.0,
            gravity: 2_000.0,
            deceleration: 15.0,
            jump: JumpLimits {
                max_jump_time: 0.2,
                max_jump_cooldown: 100.0,
            },
        }
    }

    /// Short, violent first jump and a slower double-jump gate
    pub fn springy() -> Self {
        Self {
            jump_power: 40_000.0,
            jump: JumpLimits {
                max_jump_time: 0.2,
                max_jump_cooldown: 250.0,
            },
            ..Self::standard()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("mass", self.mass),
            ("speed", self.speed),
            ("run_power", self.run_power),
            ("jump_power", self.jump_power),
            ("gravity", self.gravity),
            ("deceleration", self.deceleration),
            ("max_jump_time", self.jump.max_jump_time),
            ("max_jump_cooldown", self.jump.max_jump_cooldown),
        ];
        if let Some(&(field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }
        if self.mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass(self.mass));
        }
        for (field, value) in [
            ("max_jump_time", self.jump.max_jump_time),
            ("max_jump_cooldown", self.jump.max_jump_cooldown),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeLimit { field, value: value as f64 });
            }
        }
        // A takeoff must leave the ground within its own tick.
        let weight = self.mass * self.gravity;
        if self.jump_power <= weight {
            return Err(ConfigError::JumpCannotLift { jump_power: self.jump_power, weight });
        }
        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Named physics variants selectable at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhysicsPreset {
    #[default]
    Standard,
    Springy,
}

impl PhysicsPreset {
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" | "" => Ok(PhysicsPreset::Standard),
            "springy" => Ok(PhysicsPreset::Springy),
            _ => Err(ConfigError::UnknownPreset(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PhysicsPreset::Standard => "standard",
            PhysicsPreset::Springy => "springy",
        }
    }

    pub fn config(self) -> PhysicsConfig {
        match self {
            PhysicsPreset::Standard => PhysicsConfig::standard(),
            PhysicsPreset::Springy => PhysicsConfig::springy(),
        }
    }
}

impl FromStr for PhysicsPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Frame-to-tick conversion settings, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStepConfig {
    pub fixed_time_step: f64,
    /// Ceiling applied to a single frame's delta so stalls cannot explode the simulation.
    pub max_delta_time: f64,
}

impl TimeStepConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fixed_time_step.is_finite() {
            return Err(ConfigError::NonFinite { field: "fixed_time_step" });
        }
        if !self.max_delta_time.is_finite() {
            return Err(ConfigError::NonFinite { field: "max_delta_time" });
        }
        if self.fixed_time_step <= 0.0 {
            return Err(ConfigError::NonPositiveTimeStep(self.fixed_time_step));
        }
        if self.max_delta_time < 0.0 {
            return Err(ConfigError::NegativeLimit {
                field: "max_delta_time",
                value: self.max_delta_time,
            });
        }
        let ticks = (self.max_delta_time / self.fixed_time_step).ceil();
        if ticks > f64::from(MAX_TICKS_PER_FRAME) {
            return Err(ConfigError::TooManyTicksPerFrame { ticks, limit: MAX_TICKS_PER_FRAME });
        }
        Ok(())
    }
}

impl Default for TimeStepConfig {
    fn default() -> Self {
        Self {
            fixed_time_step: 1.0 / 60.0,
            max_delta_time: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn presets_are_valid() {
        assert_eq!(PhysicsConfig::standard().validate(), Ok(()));
        assert_eq!(PhysicsConfig::springy().validate(), Ok(()));
        assert_eq!(TimeStepConfig::default().validate(), Ok(()));
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-2.5)]
    fn rejects_non_positive_mass(#[case] mass: f32) {
        let config = PhysicsConfig { mass, ..PhysicsConfig::standard() };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveMass(mass)));
    }

    #[test]
    fn rejects_nan_fields_by_name() {
        let config = PhysicsConfig { gravity: f32::NAN, ..PhysicsConfig::standard() };
        assert_eq!(config.validate(), Err(ConfigError::NonFinite { field: "gravity" }));
    }

    #[test]
    fn rejects_negative_cooldown() {
        let mut config = PhysicsConfig::standard();
        config.jump.max_jump_cooldown = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeLimit { field: "max_jump_cooldown", .. })
        ));
    }

    #[test]
    fn oversized_damping_is_accepted() {
        let config = PhysicsConfig { deceleration: 120.0, ..PhysicsConfig::standard() };
        assert_eq!(config.validate(), Ok(()));
    }

    #[rstest]
    #[case::equal_to_weight(2_000.0)]
    #[case::below_weight(500.0)]
    fn rejects_jump_that_cannot_leave_the_ground(#[case] jump_power: f32) {
        let config = PhysicsConfig { jump_power, ..PhysicsConfig::standard() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::JumpCannotLift { jump_power, weight: 2_000.0 })
        );
    }

    #[test]
    fn weightless_entity_only_needs_positive_jump_power() {
        let config = PhysicsConfig { gravity: 0.0, ..PhysicsConfig::standard() };
        assert_eq!(config.validate(), Ok(()));
    }

    #[rstest]
    #[case::tiny_step(1e-12, 0.1)]
    #[case::huge_ceiling(1.0 / 60.0, 3_600.0)]
    fn rejects_unbounded_tick_bursts(#[case] fixed_time_step: f64, #[case] max_delta_time: f64) {
        let config = TimeStepConfig { fixed_time_step, max_delta_time };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyTicksPerFrame { limit: MAX_TICKS_PER_FRAME, .. })
        ));
    }

    #[test]
    fn tick_burst_at_the_limit_is_accepted() {
        let config = TimeStepConfig { fixed_time_step: 0.125 / 1024.0, max_delta_time: 0.125 };
        assert_eq!(config.validate(), Ok(()));
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-1.0 / 60.0)]
    fn rejects_non_positive_time_step(#[case] step: f64) {
        let config = TimeStepConfig { fixed_time_step: step, ..TimeStepConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveTimeStep(step)));
    }

    #[rstest]
    #[case("standard", PhysicsPreset::Standard)]
    #[case("Springy", PhysicsPreset::Springy)]
    #[case("  springy ", PhysicsPreset::Springy)]
    #[case("", PhysicsPreset::Standard)]
    fn parses_preset_names(#[case] name: &str, #[case] expected: PhysicsPreset) {
        assert_eq!(name.parse::<PhysicsPreset>(), Ok(expected));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert_eq!(
            PhysicsPreset::from_name("moon"),
            Err(ConfigError::UnknownPreset("moon".to_string()))
        );
    }
}
