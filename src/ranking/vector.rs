use std::collections::BTreeSet;

pub(super) const SUM_EPS: f64 = 1e-12;

/// Normalized importance scores of the retained top phrases.
///
/// Index `i` holds the score of phrase id `i`. A vector whose raw scores do
/// not sum to a positive finite value is degenerate: every segment is then
/// equally distant from the centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitVector {
    scores: Vec<f64>,
    degenerate: bool,
}

impl UnitVector {
    pub fn from_scores(raw: Vec<f64>) -> Self {
        let total: f64 = raw.iter().sum();
        if !total.is_finite() || total <= SUM_EPS {
            return Self {
                scores: raw,
                degenerate: true,
            };
        }
        Self {
            scores: raw.into_iter().map(|score| score / total).collect(),
            degenerate: false,
        }
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Euclidean norm of the phrase mass a segment does not cover.
    pub fn distance(&self, covered: &BTreeSet<usize>) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        self.scores
            .iter()
            .enumerate()
            .filter(|(id, _)| !covered.contains(id))
            .map(|(_, score)| score * score)
            .sum::<f64>()
            .sqrt()
    }
}
