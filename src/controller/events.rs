use std::collections::VecDeque;
use tracing::debug;

/// Gameplay events raised between frames
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    /// An attack swing. Hit resolution against other entities is not modelled,
    /// so draining only records that it happened.
    Attack { power: f32 },
}

/// FIFO of combat events, drained once per frame after the tick batch.
/// The simulation never waits on it.
#[derive(Debug, Default)]
pub struct CombatEventQueue {
    queue: VecDeque<CombatEvent>,
}

impl CombatEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: CombatEvent) {
        self.queue.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Process every queued event in emission order; returns how many were handled
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.queue.pop_front() {
            Self::process(&event);
            handled += 1;
        }
        handled
    }

    fn process(event: &CombatEvent) {
        match event {
            CombatEvent::Attack { power } => debug!(power, "attack event discarded"),
        }
    }
}
