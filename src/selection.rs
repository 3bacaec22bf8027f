use std::fmt;

use log::debug;

use crate::clause::{Clause, ClauseArena, ClauseId, ClauseType};
use crate::clause_set::ClauseStore;

// Which seeding rule produced relevance level zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedRule {
    NegatedConjecture,
    Plain,
    All,
}

impl SeedRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeedRule::NegatedConjecture => "negated_conjecture",
            SeedRule::Plain => "plain",
            SeedRule::All => "all",
        }
    }
}

impl fmt::Display for SeedRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Options shared by both path selectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionOptions {
    // Maximum path depth to explore. None is unbounded.
    pub limit: Option<usize>,

    // Answer partner queries from the indexed store instead of the linear one.
    pub indexed: bool,

    // Hold equality axioms out of saturation and re-attach them to the final
    // selection unconditionally.
    pub exclude_equality: bool,
}

// One visit of a clause within a relevance level.
// entered_through is the literal the path arrived at; the alternation rule
// forbids leaving through it again. Seed entries have no incoming literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEntry {
    pub clause: ClauseId,
    pub entered_through: Option<usize>,
}

impl LevelEntry {
    pub fn seed(clause: ClauseId) -> LevelEntry {
        LevelEntry {
            clause,
            entered_through: None,
        }
    }
}

// State shared by the simple-path and alternating-path selectors: the clause
// arena, the seed partition, the relevance levels and the selection order.
//
// Clauses move between three places. Seeds start selected. Everything else
// starts in the unprocessed store and leaves it when the selector is done
// pairing against it; the alternating-path selector keeps partially paired
// clauses in the store so later paths can still reach their remaining
// literals. Clauses held out by the equality exclusion sit in a side list
// until the run finishes.
pub struct SelectionState {
    pub arena: ClauseArena,
    pub limit: Option<usize>,
    pub seed_rule: SeedRule,
    pub levels: Vec<Vec<LevelEntry>>,
    pub selected: Vec<ClauseId>,
    pub unprocessed: ClauseStore,
    selected_mask: Vec<bool>,
    equality_excluded: Vec<ClauseId>,
}

impl SelectionState {
    pub fn new(clauses: Vec<Clause>, options: &SelectionOptions) -> SelectionState {
        let arena = ClauseArena::from_clauses(clauses);

        // Seed level zero by priority: the negated conjectures, else the
        // plain clauses (equality axioms are never plain), else everything.
        let mut seed_rule = SeedRule::NegatedConjecture;
        let mut seeds: Vec<ClauseId> = arena
            .iter()
            .filter(|(_, c)| c.clause_type == ClauseType::NegatedConjecture)
            .map(|(id, _)| id)
            .collect();
        if seeds.is_empty() {
            seed_rule = SeedRule::Plain;
            seeds = arena
                .iter()
                .filter(|(_, c)| c.clause_type == ClauseType::Plain)
                .map(|(id, _)| id)
                .collect();
        }
        if seeds.is_empty() {
            seed_rule = SeedRule::All;
            seeds = arena.ids().collect();
        }

        let mut selected_mask = vec![false; arena.len()];
        for &id in &seeds {
            selected_mask[id.index()] = true;
        }

        let mut unprocessed = ClauseStore::new(options.indexed);
        for id in arena.ids() {
            if !selected_mask[id.index()] {
                unprocessed.add(&arena, id);
            }
        }

        // The equality hold-out happens before saturation, so the held-out
        // clauses never seed and never answer partner queries.
        let mut equality_excluded = vec![];
        if options.exclude_equality {
            for (id, clause) in arena.iter() {
                if clause.clause_type == ClauseType::EqualityAxiom && unprocessed.contains(id) {
                    equality_excluded.push(id);
                }
            }
            for &id in &equality_excluded {
                unprocessed.extract(&arena, id);
            }
        }

        let levels = vec![seeds.iter().map(|&id| LevelEntry::seed(id)).collect()];
        debug!(
            "seeded {} clauses by {}, {} unprocessed, {} held out",
            seeds.len(),
            seed_rule,
            unprocessed.len(),
            equality_excluded.len()
        );

        SelectionState {
            arena,
            limit: options.limit,
            seed_rule,
            levels,
            selected: seeds,
            unprocessed,
            selected_mask,
            equality_excluded,
        }
    }

    // The relevance depth reached so far: the number of levels beyond the seed.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    fn below_limit(&self) -> bool {
        match self.limit {
            Some(limit) => self.depth() < limit,
            None => true,
        }
    }

    pub fn is_selected(&self, id: ClauseId) -> bool {
        self.selected_mask[id.index()]
    }

    pub fn mark_selected(&mut self, id: ClauseId) {
        debug_assert!(!self.selected_mask[id.index()]);
        self.selected_mask[id.index()] = true;
        self.selected.push(id);
    }

    pub fn extract_unprocessed(&mut self, id: ClauseId) {
        self.unprocessed.extract(&self.arena, id);
    }

    // The saturation loop shared by both selectors. Each round expands every
    // entry of the current level through find_next_paths; a round that finds
    // nothing terminates the loop without counting an empty level.
    pub fn saturate(
        &mut self,
        mut find_next_paths: impl FnMut(&mut SelectionState, LevelEntry, &mut Vec<LevelEntry>),
    ) {
        while !self.unprocessed.is_empty() && self.below_limit() {
            let level_index = self.levels.len() - 1;
            let mut next = vec![];
            for i in 0..self.levels[level_index].len() {
                let entry = self.levels[level_index][i];
                find_next_paths(self, entry, &mut next);
            }
            if next.is_empty() {
                break;
            }
            debug!("level {}: {} path entries", self.levels.len(), next.len());
            self.levels.push(next);
        }
    }

    // Appends the clauses held out by the equality exclusion, unconditionally.
    pub fn attach_excluded(&mut self) {
        let excluded = std::mem::take(&mut self.equality_excluded);
        for id in excluded {
            self.mark_selected(id);
        }
    }

    // The per-level selection with every clause counted only at the level of
    // its first appearance. The raw levels keep repeat visits.
    pub fn unique_levels(&self) -> Vec<Vec<ClauseId>> {
        let mut seen = vec![false; self.arena.len()];
        self.levels
            .iter()
            .map(|level| {
                level
                    .iter()
                    .filter_map(|entry| {
                        if seen[entry.clause.index()] {
                            None
                        } else {
                            seen[entry.clause.index()] = true;
                            Some(entry.clause)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    pub fn statistics(&self) -> SelectionStatistics {
        SelectionStatistics {
            initial_clauses: self.arena.len(),
            selected_clauses: self.selected.len(),
            selected_per_level: self.unique_levels().iter().map(|level| level.len()).collect(),
            all_per_level: self.levels.iter().map(|level| level.len()).collect(),
            max_path_depth: self.depth(),
            depth_limit: self.limit,
            start_selected_by: self.seed_rule,
        }
    }
}

// Everything the driver reports about one selection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionStatistics {
    pub initial_clauses: usize,
    pub selected_clauses: usize,
    pub selected_per_level: Vec<usize>,
    pub all_per_level: Vec<usize>,
    pub max_path_depth: usize,
    pub depth_limit: Option<usize>,
    pub start_selected_by: SeedRule,
}

impl fmt::Display for SelectionStatistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "# Initial clauses     : {}", self.initial_clauses)?;
        writeln!(f, "# Selected clauses    : {}", self.selected_clauses)?;
        writeln!(f, "# Selected per level  : {:?}", self.selected_per_level)?;
        writeln!(f, "# All per level       : {:?}", self.all_per_level)?;
        writeln!(f, "# Max path depth      : {}", self.max_path_depth)?;
        match self.depth_limit {
            Some(limit) => writeln!(f, "# Depth limit         : {}", limit)?,
            None => writeln!(f, "# Depth limit         : ∞")?,
        }
        write!(f, "# 0-level selected by : {}", self.start_selected_by)
    }
}
