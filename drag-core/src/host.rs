use log::debug;
use web_time::Instant;

use crate::platform::Platform;

/// Gesture state shared by all drag controllers of one plot.
///
/// Controllers write to it over the course of a gesture so that other
/// components (hover labels, click handlers) can tell whether an interaction
/// is in progress and whether it was a click or a drag.
#[derive(Debug, Clone, Default)]
pub struct HostState {
    /// Start time of the current click train.
    pub mouse_down_time: Option<Instant>,
    pub dragging: bool,
    pub dragged: bool,
    pub replot_pending: bool,
}

impl HostState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a replot. While a gesture is running it is deferred until the
    /// gesture ended.
    pub fn request_replot<P: Platform>(&mut self, platform: &mut P) {
        if self.dragging {
            debug!("deferring replot until the gesture ended");
            self.replot_pending = true;
        } else {
            platform.replot();
        }
    }
}

/// Mark the gesture as finished and run a replot that was requested while it
/// was active.
pub fn finish_drag<P: Platform>(host: &mut HostState, platform: &mut P) {
    host.dragging = false;
    if host.replot_pending {
        host.replot_pending = false;
        platform.replot();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePlatform;

    #[test]
    fn test_replot_is_deferred_while_dragging() {
        let mut platform = FakePlatform::new();
        let mut host = HostState {
            dragging: true,
            ..Default::default()
        };
        host.request_replot(&mut platform);
        assert_eq!(platform.replots, 0);
        assert!(host.replot_pending);

        finish_drag(&mut host, &mut platform);
        assert_eq!(platform.replots, 1);
        assert!(!host.replot_pending);
        assert!(!host.dragging);
    }

    #[test]
    fn test_replot_runs_immediately_when_idle() {
        let mut platform = FakePlatform::new();
        let mut host = HostState::new();
        host.request_replot(&mut platform);
        assert_eq!(platform.replots, 1);

        finish_drag(&mut host, &mut platform);
        assert_eq!(platform.replots, 1);
    }
}
