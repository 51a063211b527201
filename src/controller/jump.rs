use tracing::debug;

use crate::model::{Entity, JumpState, JumpLimits};
use super::input::{Action, InputSnapshot};

/// Jumps available between two landings
pub const MAX_JUMPS: u8 = 2;

/// Where an entity stands in its jump cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    Grounded,
    FirstJump,
    SecondJump,
}

impl JumpPhase {
    pub fn of(entity: &Entity) -> Self {
        if !entity.is_airborne() {
            JumpPhase::Grounded
        } else if entity.jump.jump_count >= MAX_JUMPS {
            JumpPhase::SecondJump
        } else {
            JumpPhase::FirstJump
        }
    }
}

/// What the state machine decided for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumpDecision {
    /// Ordinal of the jump that took off this tick, if any.
    pub started: Option<u8>,
    /// Upward thrust is being sustained by a held jump.
    pub thrusting: bool,
    /// Vertical momentum and gravity are to be cancelled for this tick.
    pub glide: bool,
}

/// Gates upward force: how many jumps, how long each is fed, and how soon the next may start
#[derive(Debug, Clone, Copy, Default)]
pub struct JumpStateMachine;

impl JumpStateMachine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate jump and glide intent for one tick. Must run before integration,
    /// since sustained thrust and cooldown depend on the pre-tick height.
    pub fn update(&self, entity: &mut Entity, input: &impl InputSnapshot, dt: f32) -> JumpDecision {
        let config = *entity.config();
        let jump_pressed = input.is_action_held(Action::Jump);
        let airborne = entity.is_airborne();
        let mut decision = JumpDecision::default();

        if jump_pressed && Self::can_take_off(&entity.jump, &config.jump) {
            entity.jump.jump_count += 1;
            entity.jump.jump_time = 0.0;
            entity.force.z = config.jump_power;
            decision.started = Some(entity.jump.jump_count);
            debug!(
                jump = entity.jump.jump_count,
                z = entity.transform.z,
                cooldown = entity.jump.jump_cooldown,
                "jump started"
            );
        }

        // Holding the button keeps feeding thrust until the jump's time ceiling.
        if airborne && jump_pressed && entity.jump.jump_time < config.jump.max_jump_time {
            entity.force.z = config.jump_power;
            entity.jump.jump_time += dt;
            decision.thrusting = true;
        }

        if airborne {
            entity.jump.jump_cooldown =
                (entity.jump.jump_cooldown + dt * 1000.0).min(config.jump.max_jump_cooldown);
        }

        decision.glide = input.is_action_held(Action::Glide);
        decision
    }

    /// Ground contact after integration. Returns whether an airborne jump ended here.
    pub fn land(&self, entity: &mut Entity) -> bool {
        let ended_jump = entity.jump.jump_count > 0;
        entity.jump.reset_on_landing();
        if ended_jump {
            debug!(x = entity.transform.x, y = entity.transform.y, "landed");
        }
        ended_jump
    }

    fn can_take_off(jump: &JumpState, limits: &JumpLimits) -> bool {
        match jump.jump_count {
            0 => true,
            n if n < MAX_JUMPS => jump.jump_cooldown >= limits.max_jump_cooldown,
            _ => false,
        }
    }
}
