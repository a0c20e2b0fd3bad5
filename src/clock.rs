use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// `HH:MM:SS`, zero padded.
pub fn format_clock(time: NaiveTime) -> String {
    format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())
}

/// Decides when the dashboard has crossed into a new day.
///
/// Fires on the first tick of a new calendar date: the `00:00:00` tick when
/// the timer is on time, or the first late tick after it. A tick at exactly
/// midnight also fires when nothing has been observed yet. Repeated ticks
/// within the same date never fire again, unless [`rearm`](Self::rearm)
/// was called since.
#[derive(Debug, Clone, Default)]
pub struct RolloverDetector {
    last_seen: Option<NaiveDate>,
    rearmed: bool,
}

impl RolloverDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, now: NaiveDateTime) -> bool {
        let date = now.date();
        let rearmed = std::mem::take(&mut self.rearmed);
        let fired = rearmed
            || match self.last_seen {
                None => now.time() == NaiveTime::MIN,
                Some(previous) => date > previous,
            };
        if self.last_seen.is_none_or(|previous| date >= previous) {
            self.last_seen = Some(date);
        }
        fired
    }

    /// Makes the next observation fire again, for a rollover whose work failed.
    pub fn rearm(&mut self) {
        self.rearmed = true;
    }
}

#[derive(Debug, Clone)]
pub struct Clock {
    display: String,
    rollover: RolloverDetector,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            display: format_clock(NaiveTime::MIN),
            rollover: RolloverDetector::new(),
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Refreshes the display. Returns true when the tick starts a new day.
    pub fn tick(&mut self, now: NaiveDateTime) -> bool {
        self.display = format_clock(now.time());
        self.rollover.observe(now)
    }

    pub fn rearm(&mut self) {
        self.rollover.rearm();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 7, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn fields_are_two_digits() {
        assert_eq!(format_clock(NaiveTime::from_hms_opt(7, 5, 9).unwrap()), "07:05:09");
        assert_eq!(format_clock(NaiveTime::from_hms_opt(23, 59, 59).unwrap()), "23:59:59");
        assert_eq!(format_clock(NaiveTime::MIN), "00:00:00");
        for h in 0..24 {
            for m in [0, 9, 10, 59] {
                let text = format_clock(NaiveTime::from_hms_opt(h, m, m).unwrap());
                assert_eq!(text.len(), 8);
                assert!(text.split(':').all(|field| field.len() == 2));
            }
        }
    }

    #[test]
    fn midnight_fires_once() {
        let mut clock = Clock::new();
        assert!(!clock.tick(at(1, 23, 59, 59)));
        assert!(clock.tick(at(2, 0, 0, 0)));
        assert_eq!(clock.display(), "00:00:00");
        assert!(!clock.tick(at(2, 0, 0, 0)));
        assert!(!clock.tick(at(2, 0, 0, 1)));
    }

    #[test]
    fn late_tick_still_rolls_over() {
        let mut detector = RolloverDetector::new();
        assert!(!detector.observe(at(1, 23, 59, 58)));
        assert!(detector.observe(at(2, 0, 0, 2)));
        assert!(!detector.observe(at(2, 0, 0, 3)));
    }

    #[test]
    fn first_tick_fires_only_at_midnight() {
        assert!(!RolloverDetector::new().observe(at(3, 12, 0, 0)));
        assert!(RolloverDetector::new().observe(at(3, 0, 0, 0)));
    }

    #[test]
    fn rearmed_detector_fires_on_next_tick() {
        let mut clock = Clock::new();
        clock.tick(at(6, 23, 59, 59));
        assert!(clock.tick(at(7, 0, 0, 0)));
        clock.rearm();
        assert!(clock.tick(at(7, 0, 0, 1)));
        assert!(!clock.tick(at(7, 0, 0, 2)));
    }

    #[test]
    fn clock_moving_backwards_does_not_fire() {
        let mut detector = RolloverDetector::new();
        detector.observe(at(5, 0, 0, 30));
        assert!(!detector.observe(at(4, 23, 59, 59)));
        assert!(!detector.observe(at(5, 0, 0, 31)));
    }
}
