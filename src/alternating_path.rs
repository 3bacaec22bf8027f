use crate::clause::{Clause, ClauseId};
use crate::selection::{
    LevelEntry, SelectionOptions, SelectionState, SelectionStatistics,
};
use crate::unification::mgu;

// Premise selection by alternating-path reachability.
//
// An alternating path is a chain of complementary unifiable literal pairs
// where the literal a path uses to enter a clause is never the one it leaves
// through. Two rules encode this:
//
// - a level entry records the literal it was entered through, and expansion
//   skips exactly that literal;
// - each (clause, literal) position accepts an incoming path at most once,
//   tracked in the consumed masks below.
//
// A reached clause stays in the unprocessed store as long as it has literals
// that no path has entered through yet, so later paths can still reach them.
// Once every literal has been consumed the clause is fully processed and
// leaves the store. Unit clauses are therefore terminal: their single
// literal is consumed by the path that discovers them.
pub struct AlternatingPathSelection {
    state: SelectionState,
    // consumed[clause][literal] is true once that literal has served as the
    // incoming endpoint of a path. Keeping the alternation state here, keyed
    // by clause id, leaves the shared clause and literal values immutable,
    // so nothing has to be cleaned up when the selection is handed back.
    consumed: Vec<Vec<bool>>,
}

impl AlternatingPathSelection {
    pub fn new(clauses: Vec<Clause>, options: SelectionOptions) -> AlternatingPathSelection {
        let state = SelectionState::new(clauses, &options);
        let consumed = state
            .arena
            .iter()
            .map(|(_, clause)| vec![false; clause.len()])
            .collect();
        AlternatingPathSelection { state, consumed }
    }

    // Runs the saturation loop and returns the selection, ordered by the
    // relevance level of first discovery, then by discovery order within the
    // level.
    pub fn select_clauses(&mut self) -> Vec<ClauseId> {
        let consumed = &mut self.consumed;
        self.state.saturate(|state, entry, next| {
            Self::find_next_paths(state, consumed, entry, next);
        });
        self.state.attach_excluded();
        self.state.selected.clone()
    }

    // Expands one level entry: every literal except the entry's incoming one
    // may start a path, and a partner literal qualifies only if no earlier
    // path already entered through it.
    fn find_next_paths(
        state: &mut SelectionState,
        consumed: &mut [Vec<bool>],
        entry: LevelEntry,
        next: &mut Vec<LevelEntry>,
    ) {
        for lit_index in 0..state.arena[entry.clause].len() {
            if entry.entered_through == Some(lit_index) {
                continue;
            }
            let literal = state.arena[entry.clause].literals[lit_index].clone();
            let partners = state.unprocessed.resolution_literals(&state.arena, &literal);
            for (partner_id, partner_index) in partners {
                if partner_id == entry.clause {
                    // No paths from a clause back into itself.
                    continue;
                }
                if consumed[partner_id.index()][partner_index] {
                    continue;
                }
                let partner = &state.arena[partner_id].literals[partner_index];
                if literal.positive == partner.positive {
                    continue;
                }
                if mgu(&literal.atom, &partner.atom).is_none() {
                    continue;
                }

                if !state.is_selected(partner_id) {
                    state.mark_selected(partner_id);
                }
                consumed[partner_id.index()][partner_index] = true;
                if consumed[partner_id.index()].iter().all(|&used| used) {
                    // Every literal has taken a path; the clause is fully
                    // processed and stops answering partner queries.
                    state.extract_unprocessed(partner_id);
                }
                // The raw level keeps one entry per path, including repeat
                // visits of an already selected clause; the statistics and
                // the unique view account for them separately.
                next.push(LevelEntry {
                    clause: partner_id,
                    entered_through: Some(partner_index),
                });
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.state.depth()
    }

    pub fn statistics(&self) -> SelectionStatistics {
        self.state.statistics()
    }

    pub fn clause(&self, id: ClauseId) -> &Clause {
        &self.state.arena[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SeedRule;
    use crate::test_problems::*;

    fn run(
        clauses: Vec<Clause>,
        options: SelectionOptions,
    ) -> (AlternatingPathSelection, Vec<ClauseId>) {
        let mut selection = AlternatingPathSelection::new(clauses, options);
        let selected = selection.select_clauses();
        (selection, selected)
    }

    fn indexed_options() -> SelectionOptions {
        SelectionOptions {
            indexed: true,
            ..SelectionOptions::default()
        }
    }

    fn selected_names(
        selection: &AlternatingPathSelection,
        selected: &[ClauseId],
    ) -> Vec<String> {
        selected
            .iter()
            .map(|&id| selection.clause(id).name.clone())
            .collect()
    }

    #[test]
    fn test_initialization() {
        let clauses = barbers();
        let selection = AlternatingPathSelection::new(clauses.clone(), SelectionOptions::default());
        assert_eq!(selection.state.levels[0].len(), 1);
        let seed = selection.state.levels[0][0].clause;
        assert_eq!(
            selection.clause(seed).name,
            "prove_petruchio_has_shaved_lorenzo"
        );
        assert_eq!(selection.state.unprocessed.len(), clauses.len() - 1);
        // Nothing is consumed before the run starts.
        assert!(selection.consumed.iter().flatten().all(|&used| !used));
    }

    #[test]
    fn test_selects_whole_barbers_problem() {
        let clauses = barbers();
        let total = clauses.len();
        let (selection, selected) = run(clauses, SelectionOptions::default());
        assert_eq!(selected.len(), total);
        assert_eq!(selection.depth(), 3);
    }

    #[test]
    fn test_selects_whole_sorites_problem() {
        let clauses = sorites();
        let total = clauses.len();
        let (selection, selected) = run(clauses, SelectionOptions::default());
        assert_eq!(selected.len(), total);
        assert_eq!(selection.depth(), 11);
    }

    #[test]
    fn test_prunes_irrelevant_axioms() {
        // The two extra axioms are only reachable through literals the paths
        // already entered through, so alternation keeps them out.
        let (selection, selected) = run(sorites_with_irrelevant(), SelectionOptions::default());
        assert_eq!(selected.len(), 12);
        let names = selected_names(&selection, &selected);
        assert!(!names.iter().any(|name| name == "cat_not_useful"));
        assert!(!names.iter().any(|name| name == "kangaroos_are_jumpers"));
        assert_eq!(selection.depth(), 11);
    }

    #[test]
    fn test_two_literal_conjecture() {
        // The conjecture has two literals, so both may start level-1 paths;
        // the deeper kill(a,b) unit is still reached through alternation.
        let (selection, selected) = run(two_literal_conjecture(), SelectionOptions::default());
        assert_eq!(selected.len(), 4);
        assert_eq!(selection.depth(), 3);
    }

    #[test]
    fn test_indexed_selection() {
        for (problem, expected_len, expected_depth) in [
            (barbers(), 8, 3),
            (sorites(), 12, 11),
            (sorites_with_irrelevant(), 12, 11),
            (two_literal_conjecture(), 4, 3),
        ] {
            let (selection, selected) = run(problem, indexed_options());
            assert_eq!(selected.len(), expected_len);
            assert_eq!(selection.depth(), expected_depth);
        }
    }

    #[test]
    fn test_store_equivalence() {
        for problem in [barbers(), sorites(), sorites_with_irrelevant()] {
            let (linear, linear_selected) = run(problem.clone(), SelectionOptions::default());
            let (indexed, indexed_selected) = run(problem, indexed_options());

            let mut linear_names = selected_names(&linear, &linear_selected);
            let mut indexed_names = selected_names(&indexed, &indexed_selected);
            linear_names.sort();
            indexed_names.sort();
            assert_eq!(linear_names, indexed_names);
            assert_eq!(linear.depth(), indexed.depth());
            assert_eq!(linear_selected.len(), indexed_selected.len());
        }
    }

    #[test]
    fn test_limit_bounds_depth_and_keeps_relevance_order() {
        let expected_order = sorites_discovery_order();

        let assert_limit = |limit: usize, expected_len: usize| {
            let options = SelectionOptions {
                limit: Some(limit),
                ..SelectionOptions::default()
            };
            let (selection, selected) = run(sorites(), options);
            assert_eq!(selected.len(), expected_len);
            assert_eq!(
                selected_names(&selection, &selected),
                expected_order[..expected_len].to_vec()
            );
        };

        assert_limit(1, 2);
        assert_limit(5, 6);
        assert_limit(8, 9);
        assert_limit(20, 12);
    }

    #[test]
    fn test_bag_invariants_after_run() {
        let (selection, selected) = run(two_literal_conjecture(), SelectionOptions::default());
        for id in selection.state.unprocessed.ids() {
            // A selected clause still in the store is partly processed: some
            // literal took a path in, and some literal is still open.
            if selected.contains(id) {
                let mask = &selection.consumed[id.index()];
                assert!(mask.iter().any(|&used| used));
                assert!(mask.iter().any(|&used| !used));
            } else {
                assert!(selection.consumed[id.index()].iter().all(|&used| !used));
            }
        }
    }

    #[test]
    fn test_returned_clauses_are_untouched() {
        // Selection state never leaks into the clause values themselves.
        let clauses = sorites();
        let (selection, selected) = run(clauses.clone(), SelectionOptions::default());
        for &id in &selected {
            let original = clauses
                .iter()
                .find(|c| c.name == selection.clause(id).name)
                .unwrap();
            assert_eq!(original, selection.clause(id));
        }
    }

    #[test]
    fn test_reselection_is_idempotent() {
        let (first, first_selected) = run(sorites_with_irrelevant(), SelectionOptions::default());
        let (second, second_selected) = run(sorites_with_irrelevant(), SelectionOptions::default());
        assert_eq!(
            selected_names(&first, &first_selected),
            selected_names(&second, &second_selected)
        );
        assert_eq!(first.statistics(), second.statistics());
    }

    #[test]
    fn test_equality_exclusion() {
        let problem = || {
            vec![
                Clause::parse("cnf(c,negated_conjecture,(a!=b))."),
                Clause::parse("cnf(sym,equality_axiom,(a=b))."),
                Clause::parse("cnf(x,axiom,(p(a)))."),
            ]
        };

        // Left in, the equality axiom is an ordinary partner.
        let (selection, selected) = run(problem(), SelectionOptions::default());
        assert_eq!(selected_names(&selection, &selected), vec!["c", "sym"]);
        assert_eq!(selection.depth(), 1);

        // Held out, it answers no partner query but is re-attached at the end.
        let options = SelectionOptions {
            exclude_equality: true,
            ..SelectionOptions::default()
        };
        let (selection, selected) = run(problem(), options);
        assert_eq!(selected_names(&selection, &selected), vec!["c", "sym"]);
        assert_eq!(selection.depth(), 0);
        assert_eq!(selection.statistics().all_per_level, vec![1]);
    }

    #[test]
    fn test_statistics_for_sorites() {
        let (selection, _) = run(sorites(), SelectionOptions::default());
        let statistics = selection.statistics();
        assert_eq!(statistics.initial_clauses, 12);
        assert_eq!(statistics.selected_clauses, 12);
        assert_eq!(statistics.selected_per_level, vec![1; 12]);
        assert_eq!(statistics.all_per_level, vec![1; 12]);
        assert_eq!(statistics.max_path_depth, 11);
        assert_eq!(statistics.depth_limit, None);
        assert_eq!(statistics.start_selected_by, SeedRule::NegatedConjecture);
    }
}
