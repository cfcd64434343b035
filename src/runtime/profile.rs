//! Ramping virtual-user profiles.
//!
//! A profile is a list of stages; each stage moves the virtual-user count
//! linearly from where the previous stage ended to its own target.

use std::time::Duration;

/// One stage of a ramping profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    /// Stage length.
    pub duration: Duration,
    /// Virtual users at the end of the stage.
    pub target: u32,
}

impl Stage {
    /// Create a stage.
    pub const fn new(duration: Duration, target: u32) -> Self {
        Self { duration, target }
    }
}

/// Ordered ramping stages plus the starting virtual-user count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadProfile {
    /// Virtual users at time zero.
    pub start_vus: u32,
    /// Stages, run back to back.
    pub stages: Vec<Stage>,
}

impl LoadProfile {
    /// Profile with the given start and stages.
    pub const fn new(start_vus: u32, stages: Vec<Stage>) -> Self {
        Self { start_vus, stages }
    }

    /// The stock "average load" ramp: warm up to 20 users, climb to 200 over
    /// fifteen minutes, hold around 150, then wind down to 20.
    pub fn average_load() -> Self {
        let secs = Duration::from_secs;
        let mins = |m: u64| Duration::from_secs(m * 60);
        Self::new(
            1,
            vec![
                Stage::new(secs(30), 10),
                Stage::new(secs(50), 20),
                Stage::new(mins(5), 40),
                Stage::new(mins(5), 100),
                Stage::new(mins(5), 200),
                Stage::new(mins(10), 150),
                Stage::new(mins(2), 100),
                Stage::new(mins(2), 120),
                Stage::new(secs(30), 80),
                Stage::new(secs(30), 40),
                Stage::new(secs(30), 20),
            ],
        )
    }

    /// Sum of all stage durations, saturating at [`Duration::MAX`].
    pub fn total_duration(&self) -> Duration {
        self.stages
            .iter()
            .fold(Duration::ZERO, |acc, s| acc.saturating_add(s.duration))
    }

    /// Highest virtual-user count the profile reaches.
    pub fn peak(&self) -> u32 {
        self.stages
            .iter()
            .map(|s| s.target)
            .fold(self.start_vus, u32::max)
    }

    /// Virtual users the profile asks for at `elapsed`.
    ///
    /// Within a stage the value is interpolated linearly and rounded to the
    /// nearest integer. Past the end, the last target holds.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn target_at(&self, elapsed: Duration) -> u32 {
        let mut from = self.start_vus;
        let mut stage_start = Duration::ZERO;
        for stage in &self.stages {
            let stage_end = stage_start.saturating_add(stage.duration);
            if elapsed < stage_end {
                let into = (elapsed - stage_start).as_secs_f64();
                let fraction = into / stage.duration.as_secs_f64();
                let value = f64::from(from)
                    + (f64::from(stage.target) - f64::from(from)) * fraction;
                return value.round().max(0.0) as u32;
            }
            from = stage.target;
            stage_start = stage_end;
        }
        from
    }
}

impl Default for LoadProfile {
    fn default() -> Self {
        Self::average_load()
    }
}
