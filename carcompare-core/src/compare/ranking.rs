//! Tie-aware best/worst ranking over a sequence of values

use std::cmp::Ordering;

/// Which end of the scale wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

impl Direction {
    /// Stand-in for a missing value: the worst value that direction allows,
    /// so an unknown value can never take "best" from a known one.
    pub fn missing_sentinel(self) -> f64 {
        match self {
            Direction::HigherIsBetter => 0.0,
            Direction::LowerIsBetter => f64::MAX,
        }
    }

    /// Ordering of `a` relative to `b` where `Greater` means `a` is better
    ///
    /// Numeric equality decides ties, so `0.0` and `-0.0` tie. Values are
    /// never NaN.
    fn rank(self, a: f64, b: f64) -> Ordering {
        let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Direction::HigherIsBetter => ordering,
            Direction::LowerIsBetter => ordering.reverse(),
        }
    }
}

/// Positions of the best and worst values, all ties included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extremes {
    pub best: Vec<usize>,
    pub worst: Vec<usize>,
}

/// Find every position holding the best and the worst value
///
/// Returns `None` for fewer than two values, where best and worst carry no
/// meaning. Ties compare by exact equality.
pub fn rank_extremes(values: &[f64], direction: Direction) -> Option<Extremes> {
    let (&first, rest) = values.split_first()?;
    if rest.is_empty() {
        return None;
    }

    let mut best_value = first;
    let mut worst_value = first;
    let mut best = vec![0];
    let mut worst = vec![0];

    for (i, &value) in values.iter().enumerate().skip(1) {
        match direction.rank(value, best_value) {
            Ordering::Greater => {
                best_value = value;
                best = vec![i];
            }
            Ordering::Equal => best.push(i),
            Ordering::Less => {}
        }

        match direction.rank(value, worst_value) {
            Ordering::Less => {
                worst_value = value;
                worst = vec![i];
            }
            Ordering::Equal => worst.push(i),
            Ordering::Greater => {}
        }
    }

    Some(Extremes { best, worst })
}

/// Substitute the direction's sentinel for missing values, then rank
pub fn rank_optional(values: &[Option<f64>], direction: Direction) -> Option<Extremes> {
    let filled: Vec<f64> = values
        .iter()
        .map(|v| v.unwrap_or_else(|| direction.missing_sentinel()))
        .collect();
    rank_extremes(&filled, direction)
}
