/// Daily exp that fills the bar completely.
pub const MAX_DAILY_EXP: u64 = 500;

/// The daily progress bar. Always derived from the completed tasks, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpBar {
    pub daily_exp: u64,
    pub percentage: f64,
}

impl ExpBar {
    pub fn from_completed<I>(exp_values: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let daily_exp: u64 = exp_values.into_iter().map(u64::from).sum();
        let percentage = (daily_exp as f64 * 100.0 / MAX_DAILY_EXP as f64).min(100.0);
        Self {
            daily_exp,
            percentage,
        }
    }

    /// CSS width of the bar fill, e.g. `"50%"`.
    pub fn width(&self) -> String {
        format!("{}%", self.percentage)
    }

    pub fn label(&self) -> String {
        self.daily_exp.to_string()
    }
}

impl Default for ExpBar {
    fn default() -> Self {
        Self::from_completed([])
    }
}

/// Running total exp. Credited on each confirmed completion and reset from the
/// service on resync, so it may drift in between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpLedger {
    total_exp: u64,
}

impl ExpLedger {
    pub fn total_exp(&self) -> u64 {
        self.total_exp
    }

    pub fn credit(&mut self, exp_gained: u32) {
        self.total_exp = self.total_exp.saturating_add(u64::from(exp_gained));
    }

    pub fn reset(&mut self, total_exp: u64) {
        self.total_exp = total_exp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_tracks_sum() {
        let bar = ExpBar::from_completed([100, 150]);
        assert_eq!(bar.daily_exp, 250);
        assert_eq!(bar.percentage, 50.0);
        assert_eq!(bar.width(), "50%");
        assert_eq!(bar.label(), "250");
    }

    #[test]
    fn percentage_is_capped_at_full() {
        for exps in [vec![500], vec![300, 300], vec![u32::MAX, u32::MAX]] {
            let bar = ExpBar::from_completed(exps);
            assert_eq!(bar.percentage, 100.0);
        }
        assert_eq!(ExpBar::from_completed([499]).percentage, 99.8);
    }

    #[test]
    fn percentage_never_exceeds_full_for_any_total() {
        let mut exps = Vec::new();
        for exp in (0..1200).step_by(37) {
            exps.push(exp);
            let bar = ExpBar::from_completed(exps.iter().copied());
            let expected = (bar.daily_exp as f64 / 500.0 * 100.0).min(100.0);
            assert!((bar.percentage - expected).abs() < 1e-9);
            assert!(bar.percentage <= 100.0);
        }
    }

    #[test]
    fn empty_bar_is_zero() {
        let bar = ExpBar::default();
        assert_eq!(bar.daily_exp, 0);
        assert_eq!(bar.width(), "0%");
    }

    #[test]
    fn ledger_credits_and_resets() {
        let mut ledger = ExpLedger::default();
        ledger.reset(10);
        ledger.credit(40);
        assert_eq!(ledger.total_exp(), 50);
        ledger.reset(7);
        assert_eq!(ledger.total_exp(), 7);
    }
}
