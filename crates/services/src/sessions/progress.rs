/// Aggregated view of session progress, useful for UI.
///
/// `total` is only known for test sessions; normal and learning sessions run
/// until the caller stops them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub answered: usize,
    pub total: Option<usize>,
    pub infinite: bool,
}

impl SessionProgress {
    /// Share of the session answered, in `0.0..=1.0`. `None` for endless sessions.
    #[must_use]
    pub fn fraction(&self) -> Option<f64> {
        let total = self.total?;
        if total == 0 {
            return Some(1.0);
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = self.answered as f64 / total as f64;
        Some(fraction.min(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endless_sessions_have_no_fraction() {
        let progress = SessionProgress {
            answered: 12,
            total: None,
            infinite: true,
        };
        assert_eq!(progress.fraction(), None);
    }

    #[test]
    fn fraction_tracks_answers() {
        let progress = SessionProgress {
            answered: 1,
            total: Some(4),
            infinite: false,
        };
        assert_eq!(progress.fraction(), Some(0.25));
    }
}
