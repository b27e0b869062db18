use std::time::Duration;

use matcher_logging::matcher_debug;

use crate::{EngineEvent, EventSink, Marker};

/// Timed marker sequence shown while an analysis is pending.
///
/// `Step1` is already active when the sequence starts; each entry waits its
/// delay and then activates its marker, and `settle` is waited at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSchedule {
    pub steps: Vec<(Duration, Marker)>,
    pub settle: Duration,
}

impl Default for AnimationSchedule {
    fn default() -> Self {
        Self {
            steps: vec![
                (Duration::from_millis(1500), Marker::Step2),
                (Duration::from_millis(2000), Marker::Step3),
            ],
            settle: Duration::from_millis(1500),
        }
    }
}

impl AnimationSchedule {
    /// No delays at all; markers still fire in order.
    pub fn instant() -> Self {
        Self {
            steps: vec![(Duration::ZERO, Marker::Step2), (Duration::ZERO, Marker::Step3)],
            settle: Duration::ZERO,
        }
    }

    pub fn total(&self) -> Duration {
        self.steps.iter().map(|(delay, _)| *delay).sum::<Duration>() + self.settle
    }
}

pub async fn run_animation(schedule: &AnimationSchedule, sink: &dyn EventSink) {
    for (delay, marker) in &schedule.steps {
        tokio::time::sleep(*delay).await;
        matcher_debug!("Animation marker {:?} active", marker);
        sink.emit(EngineEvent::MarkerActivated(*marker));
    }
    tokio::time::sleep(schedule.settle).await;
}
