use log::{debug, log_enabled, Level};
use std::time::{Duration, Instant};

fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    let secs = duration.as_secs();
    let mins = secs / 60;
    let secs_rem = secs % 60;
    let millis_rem = duration.subsec_millis();

    if millis < 1_000 {
        format!("{millis} ms")
    } else if secs < 60 {
        format!("{secs}.{millis_rem:03} s")
    } else {
        format!("{mins}:{secs_rem:02}.{millis_rem:03} min")
    }
}

/// Logs the duration of the steps of a run at debug level.
pub struct StepMeasure {
    enabled: bool,
    name: String,
    start: Instant,
    step_start: Instant,
}

impl StepMeasure {
    pub fn new(name: &str) -> Self {
        Self {
            enabled: log_enabled!(Level::Debug),
            name: name.to_owned(),
            start: Instant::now(),
            step_start: Instant::now(),
        }
    }

    pub fn tick(&mut self, step: &str) {
        if self.enabled {
            debug!("{}: processed {step} in {}", self.name, format_duration(self.step_start.elapsed()));
            self.step_start = Instant::now();
        }
    }

    pub fn stop(&mut self, step: &str) {
        if self.enabled {
            if !step.is_empty() {
                debug!("{}: processed {step} in {}", self.name, format_duration(self.step_start.elapsed()));
            }
            debug!("{}: finished in {}", self.name, format_duration(self.start.elapsed()));
            self.enabled = false;
        }
    }
}

impl Drop for StepMeasure {
    fn drop(&mut self) {
        self.stop("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250 ms");
        assert_eq!(format_duration(Duration::from_millis(2_050)), "2.050 s");
        assert_eq!(format_duration(Duration::from_millis(125_003)), "2:05.003 min");
    }
}
