//! Latest-value slot between the hand detector and the frame loop.
//!
//! The detector reports whenever inference finishes, usually slower than
//! the frame rate and never in step with it. It overwrites the slot; the
//! frame loop samples it once per tick. Only the most recent level matters,
//! so reports overwritten before a sample are simply counted as dropped.

/// One detector report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Report {
    hands: u32,
    tick: u64,
}

/// Single-slot hand-presence channel.
#[derive(Debug, Clone, Default)]
pub struct DetectionSlot {
    latest: Option<Report>,
    unread: bool,
    stale_after: Option<u64>,
    stale_reported: bool,
    dropped: u64,
}

impl DetectionSlot {
    /// A slot whose reports never expire.
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that treats a report older than `ticks` frames as absent.
    pub fn with_stale_after(ticks: Option<u64>) -> Self {
        Self {
            stale_after: ticks,
            ..Self::default()
        }
    }

    /// Record a detector result: `hands` is how many hands it found.
    /// `tick` is the frame counter at the time of the report.
    pub fn publish(&mut self, hands: u32, tick: u64) {
        if self.unread {
            self.dropped += 1;
        }
        self.latest = Some(Report { hands, tick });
        self.unread = true;
        self.stale_reported = false;
    }

    /// Read the hand-presence level for frame `tick`.
    ///
    /// `false` before the first report and once the last report has gone
    /// stale; a detector that never starts leaves the sketch in flower mode.
    pub fn sample(&mut self, tick: u64) -> bool {
        self.unread = false;
        let Some(report) = self.latest else {
            return false;
        };

        if let Some(limit) = self.stale_after {
            if tick.saturating_sub(report.tick) > limit {
                if !self.stale_reported {
                    log::warn!(
                        "hand detection stale for {} ticks, treating as no hand",
                        tick.saturating_sub(report.tick)
                    );
                    self.stale_reported = true;
                }
                return false;
            }
        }

        report.hands > 0
    }

    /// Reports overwritten before any frame sampled them.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_hand() {
        let mut slot = DetectionSlot::new();
        assert!(!slot.sample(0));
        assert!(!slot.sample(10_000));
        assert_eq!(slot.dropped(), 0);
    }

    #[test]
    fn latest_report_wins() {
        let mut slot = DetectionSlot::new();
        slot.publish(1, 1);
        slot.publish(0, 2);
        slot.publish(2, 3);
        assert!(slot.sample(3));
        assert_eq!(slot.dropped(), 2);
    }

    #[test]
    fn level_holds_between_reports() {
        let mut slot = DetectionSlot::new();
        slot.publish(1, 0);
        for tick in 0..50 {
            assert!(slot.sample(tick));
        }
        assert_eq!(slot.dropped(), 0);
    }

    #[test]
    fn stale_report_reads_as_absent() {
        let mut slot = DetectionSlot::with_stale_after(Some(10));
        slot.publish(1, 5);
        assert!(slot.sample(15));
        assert!(!slot.sample(16));
        assert!(!slot.sample(100));

        slot.publish(1, 100);
        assert!(slot.sample(101));
    }

    #[test]
    fn no_limit_never_goes_stale() {
        let mut slot = DetectionSlot::with_stale_after(None);
        slot.publish(1, 0);
        assert!(slot.sample(u64::MAX));
    }
}
