use serde::{Deserialize, Serialize};

/// Attempt scores for one activity, in provider order.
///
/// Entries are `None` for attempts that never reported a score. The set is
/// handed to client scripts exactly as received, so nothing here reorders or
/// drops entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreSet(Vec<Option<f64>>);

impl ScoreSet {
    #[must_use]
    pub fn new(scores: Vec<Option<f64>>) -> Self {
        Self(scores)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build a set where every attempt reported a score.
    pub fn from_scores(scores: impl IntoIterator<Item = f64>) -> Self {
        Self(scores.into_iter().map(Some).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Option<f64>] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.0.iter().copied()
    }

    /// Sum of the scores that are present and non-zero.
    ///
    /// Missing and zero scores drop out of the sum only; `len` still counts
    /// them.
    #[must_use]
    pub fn filtered_sum(&self) -> f64 {
        self.0
            .iter()
            .flatten()
            .filter(|score| **score != 0.0)
            .sum()
    }
}

impl From<Vec<Option<f64>>> for ScoreSet {
    fn from(scores: Vec<Option<f64>>) -> Self {
        Self(scores)
    }
}

impl FromIterator<Option<f64>> for ScoreSet {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filtered_sum_skips_zero_and_missing() {
        let scores = ScoreSet::new(vec![Some(0.0), None, Some(40.0), Some(60.5)]);
        assert_eq!(scores.filtered_sum(), 100.5);
        assert_eq!(scores.len(), 4);
    }

    #[test]
    fn serializes_missing_scores_as_null() {
        let scores = ScoreSet::new(vec![Some(75.0), None]);
        assert_eq!(serde_json::to_string(&scores).unwrap(), "[75.0,null]");
    }

    #[test]
    fn empty_set_sums_to_zero() {
        assert!(ScoreSet::empty().is_empty());
        assert_eq!(ScoreSet::empty().filtered_sum(), 0.0);
    }
}
