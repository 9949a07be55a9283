use chrono::{DateTime, Duration, Utc};

use crate::model::stats::ratio;

/// Running totals for one study session.
///
/// Lives exactly as long as the session engine; starting a new session starts
/// from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    attempts: u32,
    correct: u32,
    streak: u32,
    best_streak: u32,
}

impl SessionStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one graded answer. A wrong answer resets the streak.
    pub fn record(&mut self, correct: bool) {
        self.attempts = self.attempts.saturating_add(1);
        if correct {
            self.correct = self.correct.saturating_add(1);
            self.streak = self.streak.saturating_add(1);
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct, self.attempts)
    }

    /// Consecutive correct answers ending with the latest one.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }
}

/// End-of-session report.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    stats: SessionStats,
    started_at: DateTime<Utc>,
    as_of: DateTime<Utc>,
}

impl SessionSummary {
    #[must_use]
    pub fn new(stats: SessionStats, started_at: DateTime<Utc>, as_of: DateTime<Utc>) -> Self {
        Self {
            stats,
            started_at,
            as_of: as_of.max(started_at),
        }
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.stats.attempts()
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.stats.correct()
    }

    /// `correct / attempts`, or 0 when nothing was answered.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.stats.accuracy()
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.stats.streak()
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.stats.best_streak()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.as_of - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn stats_track_streaks() {
        let mut stats = SessionStats::new();
        for correct in [true, true, false, true, true, true, false] {
            stats.record(correct);
        }

        assert_eq!(stats.attempts(), 7);
        assert_eq!(stats.correct(), 5);
        assert_eq!(stats.streak(), 0);
        assert_eq!(stats.best_streak(), 3);
    }

    #[test]
    fn empty_summary_has_zero_accuracy() {
        let now = fixed_now();
        let summary = SessionSummary::new(SessionStats::new(), now, now);
        assert_eq!(summary.attempts(), 0);
        assert_eq!(summary.accuracy(), 0.0);
        assert_eq!(summary.elapsed(), Duration::zero());
    }

    #[test]
    fn summary_reports_elapsed_time() {
        let start = fixed_now();
        let mut stats = SessionStats::new();
        stats.record(true);
        stats.record(false);

        let summary = SessionSummary::new(stats, start, start + Duration::minutes(3));

        assert!((summary.accuracy() - 0.5).abs() < f64::EPSILON);
        assert_eq!(summary.elapsed(), Duration::minutes(3));
    }
}
