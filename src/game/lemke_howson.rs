use log::debug;
use serde::Serialize;

use super::{BimatrixGame, Equilibrium, GameError, Label, SolverConfig, Tableaux};

/// Outcome of following one complementary pivoting path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRun {
    pub equilibrium: Equilibrium,
    pub steps: usize,
}

/// Handle to revert a path followed by [`Tableaux::apply`].
///
/// Complementary pivoting paths are reversible: following the path from the same label once more
/// walks back to the vertex it started from, so reverting needs no copy of the tableaux.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    label: Label,
}

impl Undo {
    pub fn label(&self) -> Label {
        self.label
    }
}

impl Tableaux {
    /// Follows the complementary pivoting path that drops `start` from the current vertex until
    /// it reaches the next equilibrium.
    ///
    /// When `start` is basic its complement enters first. Each step brings in the complement of
    /// the label that left on the previous one, and the path is closed once `start` or `-start`
    /// leaves the basis.
    pub fn run(&mut self, start: Label) -> Result<PivotRun, GameError> {
        let n = self.labels().len();
        if start < 1 || start as usize > n {
            return Err(GameError::InvalidStartLabel { label: start, max: n });
        }

        let mut e_var = self.resolve_pivot(start);
        let mut steps = 0;
        debug!("path from label {start}: {e_var} enters first");
        loop {
            steps += 1;
            let l_var = self.pivot(e_var)?;
            if l_var == start || l_var == -start {
                break;
            }
            e_var = -l_var;
        }
        debug_assert!(self.is_complementary());

        let equilibrium = Equilibrium::from_tableaux(self);
        debug!(
            "path from label {start} closed after {steps} steps, support size {}",
            equilibrium.support_size()
        );
        Ok(PivotRun { equilibrium, steps })
    }

    /// Same as [`Tableaux::run`], also returning the handle that brings the tableaux back to
    /// their current state.
    pub fn apply(&mut self, start: Label) -> Result<(PivotRun, Undo), GameError> {
        let run = self.run(start)?;
        Ok((run, Undo { label: start }))
    }

    /// Walks back a path followed by [`Tableaux::apply`]. Returns the number of steps taken.
    pub fn undo(&mut self, undo: Undo) -> Result<usize, GameError> {
        self.run(undo.label).map(|run| run.steps)
    }
}

/// Finds one equilibrium of `game` following the Lemke-Howson path that starts at the artificial
/// equilibrium by dropping `start`, a label in `1..=dim1 + dim2`.
///
/// Payoffs must be strictly positive; use [`BimatrixGame::rectified`] otherwise.
pub fn lemke_howson(
    game: &BimatrixGame,
    start: Label,
    config: &SolverConfig,
) -> Result<PivotRun, GameError> {
    let n = game.total_strategies();
    if start < 1 || start as usize > n {
        return Err(GameError::InvalidStartLabel { label: start, max: n });
    }
    let mut tableaux = Tableaux::new(game, config)?;
    tableaux.run(start)
}
