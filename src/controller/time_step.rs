use crate::model::{ConfigError, TimeStepConfig};

/// Turns variable frame timing into whole fixed-size simulation ticks.
///
/// Leftover time below one step is carried into the next frame, so the total
/// simulated time tracks wall time to within one step (minus whatever the
/// `max_delta_time` clamp discarded).
#[derive(Debug, Clone)]
pub struct TimeStepper {
    config: TimeStepConfig,
    previous_time: f64,
    accumulated_time: f64,
    total_ticks: u64,
}

impl TimeStepper {
    /// `start_time` is in seconds, on the same clock later passed to [`advance`](Self::advance).
    pub fn new(config: TimeStepConfig, start_time: f64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            previous_time: start_time,
            accumulated_time: 0.0,
            total_ticks: 0,
        })
    }

    /// Record a new frame time and return how many fixed ticks should now run
    pub fn advance(&mut self, current_time: f64) -> u32 {
        let raw_delta = current_time - self.previous_time;
        self.previous_time = current_time;

        if raw_delta > self.config.max_delta_time {
            tracing::warn!(
                raw_delta,
                max_delta = self.config.max_delta_time,
                "frame delta clamped"
            );
        }
        // Clock anomalies can go backwards; those frames simply produce no ticks.
        let delta = raw_delta.clamp(0.0, self.config.max_delta_time);
        self.accumulated_time += delta;

        let mut ticks = 0;
        while self.accumulated_time >= self.config.fixed_time_step {
            self.accumulated_time -= self.config.fixed_time_step;
            ticks += 1;
        }
        self.total_ticks += u64::from(ticks);
        ticks
    }

    pub fn fixed_time_step(&self) -> f64 {
        self.config.fixed_time_step
    }

    pub fn accumulated_time(&self) -> f64 {
        self.accumulated_time
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn simulated_time(&self) -> f64 {
        self.total_ticks as f64 * self.config.fixed_time_step
    }
}
