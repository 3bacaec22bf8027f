use crate::clause::{Clause, ClauseId};
use crate::selection::{
    LevelEntry, SelectionOptions, SelectionState, SelectionStatistics,
};
use crate::unification::mgu;

// Premise selection by plain path reachability, without the alternation
// discipline: a clause is relevant at level k+1 if any of its literals forms
// a complementary unifiable pair with any literal of a level-k clause. This
// is a weaker criterion than alternating paths and selects more clauses; it
// exists as a baseline and a fallback.
pub struct SimplePathSelection {
    state: SelectionState,
}

impl SimplePathSelection {
    pub fn new(clauses: Vec<Clause>, options: SelectionOptions) -> SimplePathSelection {
        SimplePathSelection {
            state: SelectionState::new(clauses, &options),
        }
    }

    // Runs the saturation loop and returns the selection, ordered by the
    // relevance level of first discovery, then by discovery order within the
    // level.
    pub fn select_clauses(&mut self) -> Vec<ClauseId> {
        self.state.saturate(Self::find_next_paths);
        self.state.attach_excluded();
        self.state.selected.clone()
    }

    // Expands one clause of the current level: every literal is paired
    // against every complementary unifiable partner in the unprocessed
    // store, and each newly reached clause moves to the next level.
    fn find_next_paths(state: &mut SelectionState, entry: LevelEntry, next: &mut Vec<LevelEntry>) {
        for lit_index in 0..state.arena[entry.clause].len() {
            let literal = state.arena[entry.clause].literals[lit_index].clone();
            let partners = state.unprocessed.resolution_literals(&state.arena, &literal);
            for (partner_id, partner_index) in partners {
                let partner = &state.arena[partner_id].literals[partner_index];
                if literal.positive == partner.positive {
                    continue;
                }
                if mgu(&literal.atom, &partner.atom).is_none() {
                    continue;
                }
                if !state.is_selected(partner_id) {
                    state.mark_selected(partner_id);
                    state.extract_unprocessed(partner_id);
                    next.push(LevelEntry::seed(partner_id));
                }
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
