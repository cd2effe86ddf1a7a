use crate::sink::InputSink;
use crate::{Action, Config, Macro};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Outcome of one replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    /// Number of actions replayed
    pub steps: usize,

    /// Injections the sink reported as failed; the replay went on regardless
    pub injection_failures: usize,

    pub elapsed: Duration,
}

/// Replay `mac` against `sink`.
///
/// Move, click and key steps are followed by the configured default delay,
/// delay steps wait their own duration only. Injection failures are logged
/// and counted, never returned. Blocks until the last step and its trailing
/// pause are done; there is no way to cancel mid-replay.
#[instrument(skip(mac, config, sink), fields(name = %mac.name))]
pub fn play<S: InputSink + ?Sized>(mac: &Macro, config: &Config, sink: &mut S) -> ReplayReport {
    let start = Instant::now();
    info!(name = %mac.name, steps = mac.actions.len(), "Replaying macro");

    let default_delay = config.default_delay();
    let mut injection_failures = 0;

    for (index, action) in mac.actions.iter().enumerate() {
        debug!(step = index + 1, %action, "Injecting");
        let injected = match *action {
            Action::Move { dx, dy } => sink.move_relative(dx, dy),
            Action::Click { button } => sink.click(button),
            Action::Key { vk } => sink.key(vk),
            Action::Delay { ms } => {
                sink.wait(delay_duration(ms));
                continue;
            }
        };
        if let Err(e) = injected {
            injection_failures += 1;
            warn!(step = index + 1, %action, "Injection failed: {}", e);
        }
        sink.wait(default_delay);
    }

    let elapsed = start.elapsed();
    info!(
        name = %mac.name,
        duration_ms = elapsed.as_millis(),
        injection_failures,
        "Macro replay finished"
    );

    ReplayReport {
        steps: mac.actions.len(),
        injection_failures,
        elapsed,
    }
}

/// Negative delays are replayed as no wait at all
fn delay_duration(ms: i32) -> Duration {
    if ms < 0 {
        warn!(ms, "Negative delay clamped to 0");
        return Duration::ZERO;
    }
    Duration::from_millis(ms as u64)
}
