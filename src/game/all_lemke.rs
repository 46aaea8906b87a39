use log::debug;
use serde::Serialize;

use super::{BimatrixGame, EquilibriumStore, GameError, Label, SolverConfig, Tableaux};

/// Work done by an enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnumerationStats {
    /// Pivoting paths followed, including the ones walked back.
    pub runs: usize,
    /// Pivot steps over all paths.
    pub steps: usize,
    /// Deepest recursion level, the artificial equilibrium being level 0.
    pub max_depth: usize,
}

impl Tableaux {
    /// Collects into `store` every equilibrium reachable from the current vertex, dropping each
    /// label except `taboo` in turn.
    ///
    /// Every new equilibrium is explored recursively, with the label that led to it as taboo
    /// since dropping it again only walks back. The tableaux are left as they were found.
    pub fn all_reachable(
        &mut self,
        taboo: Option<Label>,
        store: &mut EquilibriumStore,
    ) -> Result<(), GameError> {
        let mut stats = EnumerationStats::default();
        explore(self, taboo, store, 0, &mut stats, &mut |_: &EnumerationStats| {})
    }
}

fn explore<F>(
    tableaux: &mut Tableaux,
    taboo: Option<Label>,
    store: &mut EquilibriumStore,
    depth: usize,
    stats: &mut EnumerationStats,
    on_run: &mut F,
) -> Result<(), GameError>
where
    F: FnMut(&EnumerationStats),
{
    stats.max_depth = stats.max_depth.max(depth);
    for label in tableaux.labels().strategies() {
        if Some(label) == taboo {
            continue;
        }

        let (run, undo) = tableaux.apply(label)?;
        stats.runs += 1;
        stats.steps += run.steps;
        on_run(stats);

        if !run.equilibrium.is_artificial() && !store.insert(run.equilibrium) {
            debug!(
                "equilibrium {} found dropping label {label} at depth {depth}",
                store.len()
            );
            explore(tableaux, Some(label), store, depth + 1, stats, on_run)?;
        }

        stats.steps += tableaux.undo(undo)?;
        stats.runs += 1;
        on_run(stats);
    }
    Ok(())
}

/// Every equilibrium of `game` reachable through Lemke-Howson paths from the artificial
/// equilibrium, sorted by support.
pub fn all_lemke(game: &BimatrixGame, config: &SolverConfig) -> Result<EquilibriumStore, GameError> {
    all_lemke_with(game, config, |_| {}).map(|(store, _)| store)
}

/// Same as [`all_lemke`], calling `on_run` after every path followed.
pub fn all_lemke_with<F>(
    game: &BimatrixGame,
    config: &SolverConfig,
    mut on_run: F,
) -> Result<(EquilibriumStore, EnumerationStats), GameError>
where
    F: FnMut(&EnumerationStats),
{
    let mut tableaux = Tableaux::new(game, config)?;
    let mut store = EquilibriumStore::new();
    let mut stats = EnumerationStats::default();

    explore(&mut tableaux, None, &mut store, 0, &mut stats, &mut on_run)?;
    debug!(
        "{} equilibria after {} paths and {} pivots",
        store.len(),
        stats.runs,
        stats.steps
    );

    Ok((store, stats))
}
