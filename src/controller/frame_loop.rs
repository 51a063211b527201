use tracing::trace;

use crate::model::{ConfigError, Entity, PhysicsConfig, TimeStepConfig};
use crate::view::Renderer;
use super::events::{CombatEvent, CombatEventQueue};
use super::input::{ActionSet, InputSnapshot};
use super::jump::{JumpDecision, JumpStateMachine};
use super::physics::MovementIntegrator;
use super::time_step::TimeStepper;

/// What happened during one fixed tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub jump: JumpDecision,
    /// An airborne jump ended in ground contact this tick.
    pub landed: bool,
}

/// One entity plus the two systems that move it
#[derive(Debug, Clone)]
pub struct Simulation {
    pub entity: Entity,
    jump: JumpStateMachine,
    integrator: MovementIntegrator,
}

impl Simulation {
    pub fn new(config: PhysicsConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_entity(Entity::new(config)?))
    }

    pub fn from_entity(entity: Entity) -> Self {
        Self {
            entity,
            jump: JumpStateMachine::new(),
            integrator: MovementIntegrator::new(),
        }
    }

    /// Run a single fixed tick: jump transition, integration, then ground contact.
    pub fn tick(&mut self, input: &impl InputSnapshot, dt: f32) -> TickReport {
        let input = ActionSet::capture(input);
        let entity = &mut self.entity;

        let jump = self.jump.update(entity, &input, dt);
        self.integrator.apply_input(entity, &input);
        let grounded = self.integrator.integrate(entity, jump.glide, dt);
        let landed = grounded && self.jump.land(entity);

        trace!(
            x = entity.transform.x,
            y = entity.transform.y,
            z = entity.transform.z,
            vz = entity.velocity.z,
            jumps = entity.jump.jump_count,
            "tick"
        );
        TickReport { jump, landed }
    }
}

/// Per-frame bookkeeping for hosts and the debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    pub ticks: u32,
    pub events_drained: usize,
    pub landed: bool,
}

/// Main loop state: turns each animation-frame callback into fixed ticks,
/// drains queued events, then hands the result to a renderer.
#[derive(Debug)]
pub struct FrameLoop {
    pub simulation: Simulation,
    stepper: TimeStepper,
    events: CombatEventQueue,
    frames: u64,
}

impl FrameLoop {
    /// `start_time` is the host clock in seconds at the moment the loop is created.
    pub fn new(
        physics: PhysicsConfig,
        timing: TimeStepConfig,
        start_time: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            simulation: Simulation::new(physics)?,
            stepper: TimeStepper::new(timing, start_time)?,
            events: CombatEventQueue::new(),
            frames: 0,
        })
    }

    pub fn frame(
        &mut self,
        now: f64,
        input: &impl InputSnapshot,
        renderer: &mut impl Renderer,
    ) -> FrameStats {
        let ticks = self.stepper.advance(now);
        let dt = self.stepper.fixed_time_step() as f32;
        // Input is frozen for the whole batch so every tick of a frame agrees.
        let input = ActionSet::capture(input);

        let mut landed = false;
        for _ in 0..ticks {
            landed |= self.simulation.tick(&input, dt).landed;
        }
        let events_drained = self.events.drain();
        self.frames += 1;

        let entity = &self.simulation.entity;
        renderer.render(entity.transform, entity.dimensions);

        FrameStats { ticks, events_drained, landed }
    }

    pub fn emit(&mut self, event: CombatEvent) {
        self.events.emit(event);
    }

    pub fn entity(&self) -> &Entity {
        &self.simulation.entity
    }

    pub fn stepper(&self) -> &TimeStepper {
        &self.stepper
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
