// CONTROLLER: Input, fixed-step simulation, and the frame loop
pub mod input;
pub mod time_step;
pub mod jump;
pub mod physics;
pub mod events;
pub mod frame_loop;

pub use input::{Action, ActionSet, InputEvent, InputProcessor, InputSnapshot, InputState, KeyBindings};
pub use time_step::TimeStepper;
pub use jump::{JumpDecision, JumpPhase, JumpStateMachine, MAX_JUMPS};
pub use physics::MovementIntegrator;
pub use events::{CombatEvent, CombatEventQueue};
pub use frame_loop::{FrameLoop, FrameStats, Simulation, TickReport};
