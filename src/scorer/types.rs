use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::AddAssign;

/// Phone tallies for one aligned group (or a sum of groups).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    // Filtered phone totals per side
    pub target: usize,
    pub actual: usize,

    // Target side breakdown
    pub correct: usize,
    pub substituted: usize,
    pub deleted: usize,

    // Actual side
    pub epen: usize,
}

fn percent(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64 * 100.0)
}

impl ScoreResult {
    pub fn percent_correct(&self) -> Option<f64> {
        percent(self.correct, self.target)
    }

    pub fn percent_substituted(&self) -> Option<f64> {
        percent(self.substituted, self.target)
    }

    pub fn percent_deleted(&self) -> Option<f64> {
        percent(self.deleted, self.target)
    }

    pub fn percent_epenthesized(&self) -> Option<f64> {
        percent(self.epen, self.actual)
    }

    /// Every filtered target phone is correct, substituted or deleted, and
    /// epenthesized phones are a subset of the filtered actual phones.
    pub fn is_consistent(&self) -> bool {
        self.correct + self.substituted + self.deleted == self.target && self.epen <= self.actual
    }
}

impl AddAssign for ScoreResult {
    fn add_assign(&mut self, rhs: Self) {
        self.target += rhs.target;
        self.actual += rhs.actual;
        self.correct += rhs.correct;
        self.substituted += rhs.substituted;
        self.deleted += rhs.deleted;
        self.epen += rhs.epen;
    }
}

impl Sum for ScoreResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, r| {
            acc += r;
            acc
        })
    }
}

impl<'a> Sum<&'a ScoreResult> for ScoreResult {
    fn sum<I: Iterator<Item = &'a ScoreResult>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
