//! Outcome-series statistics
//!
//! Consumes only the ordered list of per-episode winners produced by a
//! run; the numbers here back whatever display or plotting frontend sits
//! on top.

use serde::{Deserialize, Serialize};

use crate::game::{Outcome, Seat};

/// Ordered per-episode outcomes of one run, with summary accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeSeries {
    outcomes: Vec<Outcome>,
}

impl OutcomeSeries {
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Number of wins for the given seat.
    pub fn wins_for(&self, seat: Seat) -> usize {
        self.outcomes.iter().filter(|o| o.is_win_for(seat)).count()
    }

    /// Number of draws.
    pub fn draws(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|&&o| o == Outcome::Draw)
            .count()
    }

    /// Fraction of games won by the given seat.
    pub fn win_rate(&self, seat: Seat) -> f64 {
        if self.outcomes.is_empty() {
            0.0
        } else {
            self.wins_for(seat) as f64 / self.outcomes.len() as f64
        }
    }

    /// Cumulative win fraction for the given seat after each episode.
    ///
    /// Entry `i` is the seat's win count over episodes `0..=i` divided by
    /// `i + 1`.
    pub fn cumulative_win_fraction(&self, seat: Seat) -> Vec<f64> {
        let mut wins = 0usize;
        self.outcomes
            .iter()
            .enumerate()
            .map(|(i, outcome)| {
                if outcome.is_win_for(seat) {
                    wins += 1;
                }
                wins as f64 / (i + 1) as f64
            })
            .collect()
    }
}

impl From<Vec<Outcome>> for OutcomeSeries {
    fn from(outcomes: Vec<Outcome>) -> Self {
        Self::new(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_rates() {
        let series = OutcomeSeries::new(vec![
            Outcome::Win(Seat::One),
            Outcome::Draw,
            Outcome::Win(Seat::Two),
            Outcome::Win(Seat::One),
        ]);

        assert_eq!(series.len(), 4);
        assert_eq!(series.wins_for(Seat::One), 2);
        assert_eq!(series.wins_for(Seat::Two), 1);
        assert_eq!(series.draws(), 1);
        assert!((series.win_rate(Seat::One) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cumulative_win_fraction() {
        let series = OutcomeSeries::new(vec![
            Outcome::Win(Seat::One),
            Outcome::Win(Seat::Two),
            Outcome::Win(Seat::One),
        ]);

        let fractions = series.cumulative_win_fraction(Seat::One);
        assert_eq!(fractions.len(), 3);
        assert!((fractions[0] - 1.0).abs() < 1e-12);
        assert!((fractions[1] - 0.5).abs() < 1e-12);
        assert!((fractions[2] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_series() {
        let series = OutcomeSeries::new(Vec::new());
        assert!(series.is_empty());
        assert_eq!(series.win_rate(Seat::One), 0.0);
        assert!(series.cumulative_win_fraction(Seat::One).is_empty());
    }
}
