use std::fmt;

use log::{debug, trace};
use ndarray::Zip;
use ndarray::prelude::*;

use super::{BimatrixGame, GameError, Label, LabelSpace, Side, SolverConfig};

/// Linear system of one player. Row `i` reads
/// `basis[i] = coefficients[i, 0] + sum_j coefficients[i, j] * x_j`, where `x_j` is the non-basic
/// variable whose [`LabelSpace::column`] is `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    basis: Vec<Label>,
    coefficients: Array2<f64>,
}

impl Tableau {
    /// Labels of the basic variables, one per row.
    pub fn basis(&self) -> &[Label] {
        &self.basis
    }

    pub fn coefficients(&self) -> &Array2<f64> {
        &self.coefficients
    }

    /// Current values of the basic variables.
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.coefficients.column(0)
    }

    pub fn num_rows(&self) -> usize {
        self.basis.len()
    }
}

/// The pair of tableaux the Lemke-Howson algorithm pivots on. It is the whole state of the solver
/// and is mutated in place by every pivot.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableaux {
    a: Tableau,
    b: Tableau,
    labels: LabelSpace,
    eps: f64,
}

impl Tableaux {
    /// Builds the tableaux of the artificial equilibrium, where every slack variable is basic.
    /// Payoffs must be strictly positive, see [`BimatrixGame::rectified`].
    pub fn new(game: &BimatrixGame, config: &SolverConfig) -> Result<Tableaux, GameError> {
        game.check_positive()?;
        let config = SolverConfig::new(config.eps)?;

        let (dim1, dim2) = game.num_strategies();
        let num_labels = game.total_strategies();
        let mut tableaux = Tableaux {
            a: Tableau {
                basis: (-(dim1 as isize)..=-1).rev().collect(),
                coefficients: Array2::<f64>::zeros((dim1, num_labels + 1)),
            },
            b: Tableau {
                basis: (-(num_labels as isize)..-(dim1 as isize)).rev().collect(),
                coefficients: Array2::<f64>::zeros((dim2, num_labels + 1)),
            },
            labels: LabelSpace::new(dim1, dim2),
            eps: config.eps,
        };

        tableaux.a.coefficients.column_mut(0).fill(1.);
        tableaux.b.coefficients.column_mut(0).fill(1.);

        Zip::from(
            &mut tableaux
                .a
                .coefficients
                .slice_mut(s![.., dim1 + 1..num_labels + 1]),
        )
        .and(game.payoff_matrix(0))
        .for_each(|a, b| *a = -b);

        Zip::from(
            &mut tableaux
                .b
                .coefficients
                .slice_mut(s![.., dim2 + 1..num_labels + 1]),
        )
        .and(game.payoff_matrix(1).t())
        .for_each(|a, b| *a = -b);

        Ok(tableaux)
    }

    pub fn labels(&self) -> LabelSpace {
        self.labels
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn tableau(&self, side: Side) -> &Tableau {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    fn tableau_mut(&mut self, side: Side) -> &mut Tableau {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    pub fn is_basic(&self, label: Label) -> bool {
        self.a.basis.contains(&label) || self.b.basis.contains(&label)
    }

    /// Entering label that starts a path from `label`: the label itself, or its complement when
    /// the label is already basic.
    pub fn resolve_pivot(&self, label: Label) -> Label {
        if self.is_basic(label) { -label } else { label }
    }

    /// Whether exactly one of `l` and `-l` is basic for every strategy `l`.
    pub fn is_complementary(&self) -> bool {
        self.labels
            .strategies()
            .all(|l| self.is_basic(l) != self.is_basic(-l))
    }

    /// Brings `e_var` into the basis and returns the label that leaves it.
    ///
    /// The leaving row is chosen by the minimum ratio test. Ties are broken in favour of the
    /// lowest row: a ratio only replaces the current minimum when it is smaller by more than
    /// `eps`. A column with no negative coefficient means the system was not built from a
    /// positive game or has been corrupted, and yields [`GameError::NoEligibleRow`].
    pub fn pivot(&mut self, e_var: Label) -> Result<Label, GameError> {
        let eps = self.eps;
        let labels = self.labels;
        let side = labels.tableau(e_var);
        let e_var_col = labels.column(e_var);
        let t = self.tableau_mut(side);

        let (min_row, _) = Zip::indexed(&t.coefficients.column(0))
            .and(&t.coefficients.column(e_var_col))
            .fold(None, |min: Option<(usize, f64)>, i, a, b| {
                if *b > -eps {
                    return min;
                }
                let ratio = -*a / *b;
                match min {
                    Some((_, min_ratio)) if ratio >= min_ratio - eps => min,
                    _ => Some((i, ratio)),
                }
            })
            .ok_or(GameError::NoEligibleRow(e_var))?;

        let l_var = t.basis[min_row];
        t.basis[min_row] = e_var;
        t.coefficients[[min_row, labels.column(l_var)]] = -1.;
        let e_var_coeff = -t.coefficients[[min_row, e_var_col]];

        let mut pivot_row = t.coefficients.row_mut(min_row);
        pivot_row.mapv_inplace(|b| b / e_var_coeff);
        pivot_row[e_var_col] = 0.;

        let r = t.coefficients.row(min_row).to_owned();
        for (i, mut row) in t.coefficients.rows_mut().into_iter().enumerate() {
            let coeff = row[e_var_col];
            if i == min_row || coeff.abs() <= eps {
                continue;
            }
            row.scaled_add(coeff, &r);
            row[e_var_col] = 0.;
        }

        debug!("{e_var:>6} in, {l_var:>6} out, row {min_row} of tableau {side:?}");
        trace!("\n{self}");

        Ok(l_var)
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, row) in self.basis.iter().zip(self.coefficients.rows()) {
            write!(f, "{label:>6} |")?;
            for c in row {
                write!(f, " {c:>10.6}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Tableaux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tableau A:")?;
        write!(f, "{}", self.a)?;
        writeln!(f, "Tableau B:")?;
        write!(f, "{}", self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn test_tableaux() -> Tableaux {
        let a = array![[1., 2., 3.], [4., 5., 6.],];
        let b = array![[7., 8., 9.], [10., 11., 12.],];
        let game = BimatrixGame::new(a, b).unwrap();

        Tableaux::new(&game, &SolverConfig::default()).unwrap()
    }

    #[test]
    fn tableau_size() {
        let tableaux = test_tableaux();

        assert_eq!(tableaux.a.basis.len(), 2);
        assert_eq!(tableaux.b.basis.len(), 3);
        assert_eq!(tableaux.a.coefficients.shape(), [2, 6]);
        assert_eq!(tableaux.b.coefficients.shape(), [3, 6]);
    }

    #[test]
    fn tableau_content() {
        let tableaux = test_tableaux();

        assert_eq!(tableaux.a.basis, vec![-1, -2]);
        assert_eq!(
            tableaux.a.coefficients,
            array![[1., 0., 0., -1., -2., -3.], [1., 0., 0., -4., -5., -6.]]
        );

        assert_eq!(tableaux.b.basis, vec![-3, -4, -5]);
        assert_eq!(
            tableaux.b.coefficients,
            array![
                [1., 0., 0., 0., -7., -10.],
                [1., 0., 0., 0., -8., -11.],
                [1., 0., 0., 0., -9., -12.]
            ]
        );
        assert!(tableaux.is_complementary());
    }

    #[test]
    fn tableau_for_var() {
        let tableaux = test_tableaux();
        let labels = tableaux.labels();

        for (var, rows) in [
            (1, 3),
            (2, 3),
            (3, 2),
            (4, 2),
            (5, 2),
            (-1, 2),
            (-2, 2),
            (-3, 3),
            (-4, 3),
            (-5, 3),
        ] {
            assert_eq!(
                tableaux.tableau(labels.tableau(var)).num_rows(),
                rows,
                "label {var}"
            );
        }
    }

    #[test]
    fn tableau_pivot() {
        let a = array![[2., 4., 1.], [1., 1., 3.], [3., 2., 2.]];
        let b = array![[3., 2., 1.], [2., 4., 2.], [1., 1., 4.]];
        let game = BimatrixGame::new(a, b).unwrap();
        let mut tableaux = Tableaux::new(&game, &SolverConfig::default()).unwrap();
        let l_var = tableaux.pivot(1).unwrap();

        assert_eq!(l_var, -4);
        assert_eq!(tableaux.b.basis, vec![1, -5, -6]);
        assert_abs_diff_eq!(
            tableaux.b.coefficients,
            arr2(&[
                [1. / 3., -1. / 3., 0., 0., 0., -2. / 3., -1. / 3.],
                [1. / 3., 2. / 3., 0., 0., 0., -8. / 3., -1. / 3.],
                [2. / 3., 1. / 3., 0., 0., 0., -4. / 3., -11. / 3.]
            ]),
            epsilon = 1e-12,
        );
        assert_eq!(tableaux.a, Tableaux::new(&game, &SolverConfig::default()).unwrap().a);
        // Half way along the path neither 4 nor its slack is basic.
        assert!(!tableaux.is_basic(4) && !tableaux.is_basic(-4));
        assert!(!tableaux.is_complementary());
    }

    #[test]
    fn pivot_ties_go_to_first_row() {
        let game = BimatrixGame::new(array![[1., 1.]], array![[2., 2.]]).unwrap();
        let mut tableaux = Tableaux::new(&game, &SolverConfig::default()).unwrap();

        assert_eq!(tableaux.pivot(1), Ok(-2));
        assert_eq!(tableaux.b.basis, vec![1, -3]);
    }

    #[test]
    fn pivot_ratio_must_improve_by_more_than_eps() {
        let game = BimatrixGame::new(array![[1., 1.]], array![[2., 2.0000001]]).unwrap();

        let mut tableaux = Tableaux::new(&game, &SolverConfig::new(1e-3).unwrap()).unwrap();
        assert_eq!(tableaux.pivot(1), Ok(-2));

        let mut tableaux = Tableaux::new(&game, &SolverConfig::default()).unwrap();
        assert_eq!(tableaux.pivot(1), Ok(-3));
    }

    #[test]
    fn resolve_pivot() {
        let mut tableaux = test_tableaux();

        assert_eq!(tableaux.resolve_pivot(1), 1);
        assert_eq!(tableaux.resolve_pivot(-1), 1);
        tableaux.pivot(1).unwrap();
        assert!(tableaux.is_basic(1));
        assert_eq!(tableaux.resolve_pivot(1), -1);
    }

    #[test]
    fn pivot_without_eligible_row() {
        let mut tableaux = test_tableaux();

        // The slack -1 is basic, so its column has no coefficient to pivot on.
        assert_eq!(tableaux.pivot(-1), Err(GameError::NoEligibleRow(-1)));
    }

    #[test]
    fn rejects_non_positive_payoffs() {
        let a = array![[1., 0.], [2., 3.]];
        let b = array![[1., 1.], [2., 3.]];
        let game = BimatrixGame::new(a, b).unwrap();

        assert!(matches!(
            Tableaux::new(&game, &SolverConfig::default()),
            Err(GameError::NonPositivePayoff {
                player: 0,
                row: 0,
                column: 1,
                ..
            })
        ));
        assert!(Tableaux::new(&game.rectified(), &SolverConfig::default()).is_ok());
    }

    #[test]
    fn rejects_invalid_tolerance() {
        let game = BimatrixGame::new(array![[1.]], array![[1.]]).unwrap();

        assert_eq!(
            Tableaux::new(&game, &SolverConfig { eps: 0. }),
            Err(GameError::InvalidTolerance(0.))
        );
    }
}
