use std::{cmp::Ordering, fmt};

use itertools::Itertools;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::{Label, Side, Strategy, Tableaux};

/// Probability with which the strategy `label` is played.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub label: usize,
    pub probability: f64,
}

/// Mixed strategy pair found by the algorithm, as the strategies in its support sorted by label.
/// Labels `1..=dim1` belong to player A and the rest to player B.
///
/// The empty equilibrium is the artificial one the algorithm starts from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    weights: Vec<Weight>,
}

impl Equilibrium {
    pub fn artificial() -> Self {
        Self::default()
    }

    /// Reads the equilibrium at the current vertex of the tableaux. The basic strategy variables
    /// of each tableau are scaled to sum one.
    ///
    /// Only meaningful once a path has converged: a tableau with basic strategies all valued
    /// zero has no normalization.
    pub fn from_tableaux(tableaux: &Tableaux) -> Self {
        let mut weights = Vec::new();
        for side in [Side::A, Side::B] {
            let t = tableaux.tableau(side);
            let support: Vec<(Label, f64)> = t
                .basis()
                .iter()
                .zip(t.values())
                .filter(|(label, _)| **label > 0)
                .map(|(label, value)| (*label, *value))
                .collect();
            let total: f64 = support.iter().map(|(_, value)| value).sum();
            weights.extend(support.into_iter().map(|(label, value)| Weight {
                label: label as usize,
                probability: value / total,
            }));
        }
        Self {
            weights: weights.into_iter().sorted_by_key(|w| w.label).collect(),
        }
    }

    pub fn is_artificial(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn support_size(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    pub fn labels(&self) -> impl Iterator<Item = usize> + '_ {
        self.weights.iter().map(|w| w.label)
    }

    /// Probability of `label`, zero when it is outside the support.
    pub fn probability(&self, label: usize) -> f64 {
        self.weights
            .binary_search_by_key(&label, |w| w.label)
            .map_or(0., |i| self.weights[i].probability)
    }

    /// Lexicographic order of the supports. Probabilities are ignored, so two equilibria with the
    /// same support compare equal.
    pub fn cmp_support(&self, other: &Equilibrium) -> Ordering {
        self.labels().cmp(other.labels())
    }

    /// Dense strategy vectors of both players.
    pub fn to_strategy(&self, dim1: usize, dim2: usize) -> Strategy {
        let mut s = Strategy(Array1::zeros(dim1), Array1::zeros(dim2));
        for w in &self.weights {
            if w.label <= dim1 {
                s.0[w.label - 1] = w.probability;
            } else {
                s.1[w.label - dim1 - 1] = w.probability;
            }
        }
        s
    }
}

impl fmt::Display for Equilibrium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Strategy\tProbability")?;
        for w in &self.weights {
            writeln!(f, "{}\t\t{:.7}", w.label, w.probability)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BimatrixGame, SolverConfig};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn equilibrium(weights: &[(usize, f64)]) -> Equilibrium {
        Equilibrium {
            weights: weights
                .iter()
                .map(|&(label, probability)| Weight { label, probability })
                .collect(),
        }
    }

    #[test]
    fn artificial_equilibrium() {
        let game = BimatrixGame::new(array![[1., 2.], [3., 1.]], array![[2., 1.], [1., 2.]]).unwrap();
        let tableaux = Tableaux::new(&game, &SolverConfig::default()).unwrap();

        let eq = Equilibrium::from_tableaux(&tableaux);
        assert!(eq.is_artificial());
        assert_eq!(eq, Equilibrium::artificial());
        assert_eq!(eq.support_size(), 0);
    }

    #[test]
    fn normalize_after_pivots() {
        let game = BimatrixGame::new(array![[1.]], array![[1.]]).unwrap();
        let mut tableaux = Tableaux::new(&game, &SolverConfig::default()).unwrap();
        assert_eq!(tableaux.pivot(1), Ok(-2));
        assert_eq!(tableaux.pivot(2), Ok(-1));

        let eq = Equilibrium::from_tableaux(&tableaux);
        assert_eq!(eq, equilibrium(&[(1, 1.), (2, 1.)]));
    }

    #[test]
    fn support_order() {
        let e1 = equilibrium(&[(1, 1.), (3, 1.)]);
        let e2 = equilibrium(&[(1, 0.5), (2, 0.5), (3, 0.5), (4, 0.5)]);
        let e3 = equilibrium(&[(2, 1.), (4, 1.)]);
        let e4 = equilibrium(&[(1, 1.)]);

        assert_eq!(e2.cmp_support(&e1), Ordering::Less);
        assert_eq!(e1.cmp_support(&e3), Ordering::Less);
        assert_eq!(e4.cmp_support(&e1), Ordering::Less);
        assert_eq!(Equilibrium::artificial().cmp_support(&e4), Ordering::Less);
    }

    #[test]
    fn same_support_different_probabilities_compare_equal() {
        // Degenerate games may have distinct equilibria on one support; they are not told apart.
        let e1 = equilibrium(&[(1, 0.25), (2, 0.75), (3, 1.)]);
        let e2 = equilibrium(&[(1, 0.5), (2, 0.5), (3, 1.)]);

        assert_eq!(e1.cmp_support(&e2), Ordering::Equal);
        assert_ne!(e1, e2);
    }

    #[test]
    fn dense_strategy() {
        let eq = equilibrium(&[(2, 1.), (3, 0.25), (5, 0.75)]);

        assert_abs_diff_eq!(eq.probability(3), 0.25);
        assert_abs_diff_eq!(eq.probability(1), 0.);
        assert_eq!(
            eq.to_strategy(2, 3),
            Strategy(array![0., 1.], array![0.25, 0., 0.75])
        );
    }

    #[test]
    fn display_table() {
        let eq = equilibrium(&[(1, 1.), (4, 0.5), (5, 0.5)]);

        assert_eq!(
            eq.to_string(),
            "Strategy\tProbability\n1\t\t1.0000000\n4\t\t0.5000000\n5\t\t0.5000000\n"
        );
    }
}
