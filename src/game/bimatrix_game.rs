use ndarray::prelude::*;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;

use super::GameError;

/// Two-player game in normal form. Player A chooses the row, player B the column.
#[derive(Debug, Clone, PartialEq)]
pub struct BimatrixGame {
    payoff: (Array2<f64>, Array2<f64>),
}

/// Pair of mixed strategies, one dense probability vector per player.
#[derive(Debug, Clone)]
pub struct Strategy(pub Array1<f64>, pub Array1<f64>);

impl PartialEq for Strategy {
    fn eq(&self, other: &Strategy) -> bool {
        self.0.abs_diff_eq(&other.0, 1e-6) && self.1.abs_diff_eq(&other.1, 1e-6)
    }
}

impl BimatrixGame {
    pub fn new(p1: Array2<f64>, p2: Array2<f64>) -> Result<Self, GameError> {
        if p1.shape() != p2.shape() {
            return Err(GameError::ShapeMismatch(
                p1.shape().to_vec(),
                p2.shape().to_vec(),
            ));
        }
        if p1.is_empty() {
            return Err(GameError::EmptyGame(p1.nrows(), p1.ncols()));
        }
        for (player, payoff) in [&p1, &p2].into_iter().enumerate() {
            if let Some(((row, column), value)) = payoff.indexed_iter().find(|(_, v)| !v.is_finite())
            {
                return Err(GameError::NonFinitePayoff {
                    player,
                    row,
                    column,
                    value: *value,
                });
            }
        }
        Ok(BimatrixGame { payoff: (p1, p2) })
    }

    /// Game with payoffs drawn uniformly from [-1, 1].
    pub fn random<R: Rng + ?Sized>(
        num_strategies0: usize,
        num_strategies1: usize,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let shape = (num_strategies0, num_strategies1);
        let a = Array::random_using(shape, Uniform::new_inclusive(-1., 1.), rng);
        let b = Array::random_using(shape, Uniform::new_inclusive(-1., 1.), rng);
        Self::new(a, b)
    }

    pub fn num_strategies(&self) -> (usize, usize) {
        (self.payoff.0.shape()[0], self.payoff.0.shape()[1])
    }

    pub fn total_strategies(&self) -> usize {
        self.payoff.0.shape()[0] + self.payoff.1.shape()[1]
    }

    pub fn payoff_matrix(&self, player: usize) -> &Array2<f64> {
        if player == 0 {
            &self.payoff.0
        } else {
            &self.payoff.1
        }
    }

    pub fn min_payoff(&self) -> f64 {
        self.payoff
            .0
            .iter()
            .chain(self.payoff.1.iter())
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    /// Shifts every payoff of both players by the same offset so that the smallest one becomes 1.
    /// Equilibria are preserved.
    pub fn rectified(&self) -> BimatrixGame {
        let offset = self.min_payoff() - 1.;
        BimatrixGame {
            payoff: (&self.payoff.0 - offset, &self.payoff.1 - offset),
        }
    }

    /// Checks the positivity required to build the tableaux.
    pub fn check_positive(&self) -> Result<(), GameError> {
        for player in 0..2 {
            let payoff = self.payoff_matrix(player);
            if let Some(((row, column), value)) = payoff.indexed_iter().find(|(_, v)| **v <= 0.) {
                return Err(GameError::NonPositivePayoff {
                    player,
                    row,
                    column,
                    value: *value,
                });
            }
        }
        Ok(())
    }

    pub fn strategy_payoff(&self, strategy: &Strategy) -> (f64, f64) {
        let payoff0 = self.payoff.0.dot(&strategy.1).dot(&strategy.0);
        let payoff1 = self.payoff.1.dot(&strategy.1).dot(&strategy.0);

        (payoff0, payoff1)
    }

    pub fn regret(&self, strategy: &Strategy) -> (f64, f64) {
        let strategy_payoff = self.strategy_payoff(strategy);
        let payoff0 = self.payoff.0.dot(&strategy.1);
        let payoff1 = strategy.0.dot(&self.payoff.1);

        let max_payoff0 = payoff0.into_iter().fold(f64::NEG_INFINITY, f64::max);
        let max_payoff1 = payoff1.into_iter().fold(f64::NEG_INFINITY, f64::max);
        (
            max_payoff0 - strategy_payoff.0,
            max_payoff1 - strategy_payoff.1,
        )
    }

    pub fn is_ne(&self, strategy: &Strategy) -> bool {
        let r = self.regret(strategy);

        r.0 < 1e-6 && r.1 < 1e-6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn bimatrixgame_new() {
        let a = array![[2., 1.], [1., 2.]];
        let b = array![[2., 1.], [1., 2.], [3., 4.]];

        assert_eq!(
            BimatrixGame::new(a, b),
            Err(GameError::ShapeMismatch(vec![2, 2], vec![3, 2]))
        );
    }

    #[test]
    fn bimatrixgame_empty() {
        let a = Array2::<f64>::zeros((0, 3));
        let b = Array2::<f64>::zeros((0, 3));

        assert_eq!(BimatrixGame::new(a, b), Err(GameError::EmptyGame(0, 3)));
    }

    #[test]
    fn bimatrixgame_not_finite() {
        let a = array![[2., 1.], [1., f64::NAN]];
        let b = array![[2., 1.], [1., 2.]];

        assert!(matches!(
            BimatrixGame::new(a, b),
            Err(GameError::NonFinitePayoff {
                player: 0,
                row: 1,
                column: 1,
                ..
            })
        ));
    }

    #[test]
    fn rectify() {
        let a = array![[-2., 1.], [0.5, 3.]];
        let b = array![[1., -0.5], [2., 0.]];
        let game = BimatrixGame::new(a, b).unwrap();

        assert_eq!(
            game.check_positive(),
            Err(GameError::NonPositivePayoff {
                player: 0,
                row: 0,
                column: 0,
                value: -2.
            })
        );

        let rectified = game.rectified();
        assert_abs_diff_eq!(rectified.min_payoff(), 1.);
        assert_abs_diff_eq!(
            rectified.payoff_matrix(0),
            &array![[1., 4.], [3.5, 6.]],
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            rectified.payoff_matrix(1),
            &array![[4., 2.5], [5., 3.]],
            epsilon = 1e-12
        );
        assert!(rectified.check_positive().is_ok());
    }

    #[test]
    fn random_game() {
        let mut rng = StdRng::seed_from_u64(7);
        let game = BimatrixGame::random(3, 4, &mut rng).unwrap();

        assert_eq!(game.num_strategies(), (3, 4));
        assert_eq!(game.total_strategies(), 7);
        assert!(
            game.payoff_matrix(0)
                .iter()
                .chain(game.payoff_matrix(1).iter())
                .all(|p| (-1. ..=1.).contains(p))
        );

        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(BimatrixGame::random(3, 4, &mut rng).unwrap(), game);
    }

    #[test]
    fn regret() {
        let a = array![[1. / 3., 0.], [1., 1.]];
        let b = array![[1. / 3., 1.], [0., 1.]];
        let game = BimatrixGame::new(a, b).unwrap();

        let s = Strategy(array![0., 1.], array![0., 1.]);

        assert!(game.is_ne(&s));

        let r = Strategy(array![0., 1.], array![0.5, 0.5]);
        assert_eq!(game.regret(&r), (0., 0.5));
    }
}
