use glam::Vec3;

use crate::model::Entity;
use super::input::{Action, InputSnapshot};

/// Advances linear dynamics for one fixed tick (semi-implicit Euler)
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementIntegrator;

impl MovementIntegrator {
    pub fn new() -> Self {
        Self
    }

    /// Write planar force from directional input. Opposing keys do not cancel:
    /// the later one in up, right, down, left order wins. Diagonals are not normalised.
    pub fn apply_input(&self, entity: &mut Entity, input: &impl InputSnapshot) {
        let config = entity.config();
        let speed = if input.is_action_held(Action::Run) {
            config.speed + config.run_power
        } else {
            config.speed
        };

        if input.is_action_held(Action::MoveUp) {
            entity.force.y = -speed;
        }
        if input.is_action_held(Action::MoveRight) {
            entity.force.x = speed;
        }
        if input.is_action_held(Action::MoveDown) {
            entity.force.y = speed;
        }
        if input.is_action_held(Action::MoveLeft) {
            entity.force.x = -speed;
        }
    }

    /// Integrate force into position. With `glide` set, vertical momentum and
    /// gravity are cancelled before the entity moves; upward force queued this
    /// tick (a takeoff or held thrust) still lifts it.
    ///
    /// Returns `true` when the entity ended the tick in ground contact.
    pub fn integrate(&self, entity: &mut Entity, glide: bool, dt: f32) -> bool {
        let config = *entity.config();

        entity.acceleration = entity.force / config.mass;
        entity.acceleration.z -= config.gravity;

        entity.velocity += entity.acceleration * dt;
        if glide {
            entity.velocity.z = entity.force.z / config.mass * dt;
        }
        entity.transform += entity.velocity * dt;

        // Exponential-style decay. Flips sign every tick once deceleration * dt > 1.
        let damping = 1.0 - config.deceleration * dt;
        entity.velocity.x *= damping;
        entity.velocity.y *= damping;

        let grounded = entity.transform.z < 0.0;
        if grounded {
            entity.transform.z = 0.0;
            entity.velocity.z = 0.0;
        }

        entity.force = Vec3::ZERO;
        grounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::ActionSet;
    use crate::model::PhysicsConfig;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn entity() -> Entity {
        Entity::new(PhysicsConfig::standard()).unwrap()
    }

    #[test]
    fn run_adds_power_to_speed() {
        let integrator = MovementIntegrator::new();
        let mut e = entity();
        integrator.apply_input(&mut e, &ActionSet::held(&[Action::MoveRight]));
        assert_eq!(e.force.x, 3_000.0);

        let mut e = entity();
        integrator.apply_input(&mut e, &ActionSet::held(&[Action::MoveUp, Action::Run]));
        assert_eq!(e.force.y, -5_000.0);
    }

    #[test]
    fn last_opposing_direction_wins() {
        let integrator = MovementIntegrator::new();
        let mut e = entity();
        let all = ActionSet::held(&[
            Action::MoveUp,
            Action::MoveRight,
            Action::MoveDown,
            Action::MoveLeft,
        ]);
        integrator.apply_input(&mut e, &all);
        assert_eq!(e.force.x, -3_000.0);
        assert_eq!(e.force.y, 3_000.0);
    }

    #[test]
    fn semi_implicit_step_uses_updated_velocity() {
        let integrator = MovementIntegrator::new();
        let mut e = entity();
        e.force.x = 3_000.0;
        integrator.integrate(&mut e, false, DT);

        let v = 3_000.0 * DT;
        assert_relative_eq!(e.acceleration.x, 3_000.0);
        assert_relative_eq!(e.transform.x, v * DT);
        assert_relative_eq!(e.velocity.x, v * (1.0 - 15.0 * DT));
        assert_eq!(e.force, Vec3::ZERO, "force never outlives its tick");
    }

    #[test]
    fn mass_divides_force() {
        let config = PhysicsConfig { mass: 4.0, gravity: 0.0, ..PhysicsConfig::standard() };
        let mut e = Entity::new(config).unwrap();
        e.force = Vec3::new(8.0, -4.0, 2.0);
        MovementIntegrator::new().integrate(&mut e, false, DT);
        assert_eq!(e.acceleration, Vec3::new(2.0, -1.0, 0.5));
    }

    #[test]
    fn gravity_acts_even_under_jump_force() {
        let mut e = entity();
        e.force.z = 10_000.0;
        MovementIntegrator::new().integrate(&mut e, false, DT);
        assert_relative_eq!(e.acceleration.z, 8_000.0);
        assert!(e.transform.z > 0.0);
    }

    #[test]
    fn resting_entity_never_sinks() {
        let integrator = MovementIntegrator::new();
        let mut e = entity();
        for _ in 0..1000 {
            let grounded = integrator.integrate(&mut e, false, DT);
            assert!(grounded);
            assert_eq!(e.transform, Vec3::ZERO);
            assert_eq!(e.velocity, Vec3::ZERO);
        }
    }

    #[test]
    fn damping_decays_without_changing_sign() {
        let integrator = MovementIntegrator::new();
        let mut e = entity();
        e.velocity.x = -250.0;
        let mut previous = e.velocity.x.abs();
        for _ in 0..600 {
            integrator.integrate(&mut e, false, DT);
            let speed = e.velocity.x.abs();
            assert!(speed <= previous);
            assert!(e.velocity.x <= 0.0);
            previous = speed;
        }
        assert!(previous < 1e-3);
    }

    #[test]
    fn oversized_damping_flips_sign() {
        // deceleration * dt = 2: documented degenerate configuration, not clamped.
        let config = PhysicsConfig { deceleration: 120.0, ..PhysicsConfig::standard() };
        let mut e = Entity::new(config).unwrap();
        e.velocity.x = 10.0;
        MovementIntegrator::new().integrate(&mut e, false, DT);
        assert_relative_eq!(e.velocity.x, -10.0, epsilon = 1e-4);
    }

    #[test]
    fn glide_cancels_fall_before_moving() {
        let mut e = entity();
        e.transform.z = 50.0;
        e.velocity.z = -300.0;
        let grounded = MovementIntegrator::new().integrate(&mut e, true, DT);
        assert!(!grounded);
        assert_eq!(e.velocity.z, 0.0);
        assert_eq!(e.transform.z, 50.0);
        assert_relative_eq!(e.acceleration.z, -2_000.0);
    }

    #[test]
    fn glide_keeps_queued_jump_force() {
        let mut e = entity();
        e.force.z = 10_000.0;
        let grounded = MovementIntegrator::new().integrate(&mut e, true, DT);
        assert!(!grounded, "takeoff under glide still leaves the ground");
        assert_relative_eq!(e.velocity.z, 10_000.0 * DT);
        assert_relative_eq!(e.transform.z, 10_000.0 * DT * DT);
    }

    #[test]
    fn ground_clamp_zeroes_height_and_vertical_velocity() {
        let mut e = entity();
        e.transform.z = 1.0;
        e.velocity = Vec3::new(60.0, 0.0, -600.0);
        let grounded = MovementIntegrator::new().integrate(&mut e, false, DT);
        assert!(grounded);
        assert_eq!(e.transform.z, 0.0);
        assert_eq!(e.velocity.z, 0.0);
        assert!(e.velocity.x > 0.0, "horizontal motion survives landing");
    }
}
