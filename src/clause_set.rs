use fxhash::FxHashMap;

use crate::clause::{ClauseArena, ClauseId};
use crate::literal::Literal;

// One bucket key of the indexed store: partner positions are grouped by the
// predicate symbol, its arity and the literal sign.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PartnerKey {
    predicate: String,
    arity: usize,
    positive: bool,
}

impl PartnerKey {
    fn for_literal(literal: &Literal) -> Option<PartnerKey> {
        let (predicate, arity) = literal.predicate()?;
        Some(PartnerKey {
            predicate: predicate.to_string(),
            arity,
            positive: literal.positive,
        })
    }

    // The key a complementary partner of this literal would be filed under.
    fn complement(literal: &Literal) -> Option<PartnerKey> {
        let mut key = PartnerKey::for_literal(literal)?;
        key.positive = !key.positive;
        Some(key)
    }
}

// The linear clause store: clauses in insertion order, partner queries scan.
#[derive(Debug, Default, Clone)]
pub struct ClauseSet {
    members: Vec<ClauseId>,
}

impl ClauseSet {
    pub fn new() -> ClauseSet {
        ClauseSet { members: vec![] }
    }

    pub fn add(&mut self, id: ClauseId) {
        self.members.push(id);
    }

    pub fn extract(&mut self, id: ClauseId) {
        self.members.retain(|&member| member != id);
    }

    pub fn contains(&self, id: ClauseId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn ids(&self) -> &[ClauseId] {
        &self.members
    }

    // Every literal position in the store with the opposite sign and the
    // same predicate symbol and arity as the query. Unifiability is not
    // checked here; that is the caller's job.
    pub fn resolution_literals(
        &self,
        arena: &ClauseArena,
        query: &Literal,
    ) -> Vec<(ClauseId, usize)> {
        let mut partners = vec![];
        for &id in &self.members {
            for (i, literal) in arena[id].literals.iter().enumerate() {
                if literal.complements(query) {
                    partners.push((id, i));
                }
            }
        }
        partners
    }
}

// The indexed clause store: the same contract as ClauseSet, answered from
// buckets keyed by (predicate symbol, arity, sign). A query touches exactly
// one bucket. Buckets are maintained incrementally on add and extract.
#[derive(Debug, Default, Clone)]
pub struct IndexedClauseSet {
    members: Vec<ClauseId>,
    buckets: FxHashMap<PartnerKey, Vec<(ClauseId, usize)>>,
}

impl IndexedClauseSet {
    pub fn new() -> IndexedClauseSet {
        IndexedClauseSet {
            members: vec![],
            buckets: FxHashMap::default(),
        }
    }

    pub fn add(&mut self, arena: &ClauseArena, id: ClauseId) {
        self.members.push(id);
        for (i, literal) in arena[id].literals.iter().enumerate() {
            if let Some(key) = PartnerKey::for_literal(literal) {
                self.buckets.entry(key).or_default().push((id, i));
            }
        }
    }

    pub fn extract(&mut self, arena: &ClauseArena, id: ClauseId) {
        if !self.contains(id) {
            return;
        }
        self.members.retain(|&member| member != id);
        for literal in &arena[id].literals {
            if let Some(key) = PartnerKey::for_literal(literal) {
                if let Some(bucket) = self.buckets.get_mut(&key) {
                    bucket.retain(|&(member, _)| member != id);
                }
            }
        }
    }

    pub fn contains(&self, id: ClauseId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn ids(&self) -> &[ClauseId] {
        &self.members
    }

    pub fn resolution_literals(
        &self,
        _arena: &ClauseArena,
        query: &Literal,
    ) -> Vec<(ClauseId, usize)> {
        match PartnerKey::complement(query) {
            Some(key) => self.buckets.get(&key).cloned().unwrap_or_default(),
            None => vec![],
        }
    }
}

// The store implementation is picked at run time, so both variants live
// behind one dispatching wrapper. On identical contents the two answer
// partner queries with set-equal results; only the traversal order differs.
#[derive(Debug, Clone)]
pub enum ClauseStore {
    Linear(ClauseSet),
    Indexed(IndexedClauseSet),
}

impl ClauseStore {
    pub fn new(indexed: bool) -> ClauseStore {
        if indexed {
            ClauseStore::Indexed(IndexedClauseSet::new())
        } else {
            ClauseStore::Linear(ClauseSet::new())
        }
    }

    pub fn add(&mut self, arena: &ClauseArena, id: ClauseId) {
        match self {
            ClauseStore::Linear(store) => store.add(id),
            ClauseStore::Indexed(store) => store.add(arena, id),
        }
    }

    // Removes the clause if present. Extracting an absent clause is a no-op.
    pub fn extract(&mut self, arena: &ClauseArena, id: ClauseId) {
        match self {
            ClauseStore::Linear(store) => store.extract(id),
            ClauseStore::Indexed(store) => store.extract(arena, id),
        }
    }

    pub fn contains(&self, id: ClauseId) -> bool {
        match self {
            ClauseStore::Linear(store) => store.contains(id),
            ClauseStore::Indexed(store) => store.contains(id),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ClauseStore::Linear(store) => store.len(),
            ClauseStore::Indexed(store) => store.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> &[ClauseId] {
        match self {
            ClauseStore::Linear(store) => store.ids(),
            ClauseStore::Indexed(store) => store.ids(),
        }
    }

    pub fn resolution_literals(
        &self,
        arena: &ClauseArena,
        query: &Literal,
    ) -> Vec<(ClauseId, usize)> {
        match self {
            ClauseStore::Linear(store) => store.resolution_literals(arena, query),
            ClauseStore::Indexed(store) => store.resolution_literals(arena, query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Clause;

    fn test_arena() -> ClauseArena {
        ClauseArena::from_clauses(vec![
            Clause::parse("cnf(a1,axiom,(~member(X)|~member(Y)|~shaved(X,Y)|shaved(members,X)))."),
            Clause::parse("cnf(a2,axiom,(~shaved(members,X)|~member(Y)|shaved(Y,X)))."),
            Clause::parse("cnf(h1,hypothesis,(member(guido)))."),
            Clause::parse("cnf(h2,hypothesis,(shaved(guido,cesare)))."),
            Clause::parse("cnf(c,negated_conjecture,(~shaved(petruchio,lorenzo)))."),
        ])
    }

    fn fill(store: &mut ClauseStore, arena: &ClauseArena) {
        for id in arena.ids() {
            store.add(arena, id);
        }
    }

    fn sorted(mut partners: Vec<(ClauseId, usize)>) -> Vec<(ClauseId, usize)> {
        partners.sort();
        partners
    }

    #[test]
    fn test_linear_partner_query() {
        let arena = test_arena();
        let mut store = ClauseStore::new(false);
        fill(&mut store, &arena);

        // A negative shaved query finds every positive shaved literal.
        let query = Literal::parse("~shaved(petruchio,lorenzo)");
        let partners = store.resolution_literals(&arena, &query);
        let expected: Vec<(ClauseId, usize)> = {
            let ids: Vec<ClauseId> = arena.ids().collect();
            vec![(ids[0], 3), (ids[1], 2), (ids[3], 0)]
        };
        assert_eq!(partners, expected);

        // Same predicate and sign is not a partner.
        let query = Literal::parse("shaved(members,X)");
        let partners = store.resolution_literals(&arena, &query);
        assert!(partners.iter().all(|&(id, i)| arena[id].literals[i].is_negative()));
        assert_eq!(partners.len(), 3);
    }

    #[test]
    fn test_stores_agree() {
        let arena = test_arena();
        let mut linear = ClauseStore::new(false);
        let mut indexed = ClauseStore::new(true);
        fill(&mut linear, &arena);
        fill(&mut indexed, &arena);

        for query in [
            Literal::parse("~shaved(A,B)"),
            Literal::parse("shaved(members,X)"),
            Literal::parse("member(Z)"),
            Literal::parse("~member(Z)"),
            Literal::parse("~unknown_predicate(X)"),
        ] {
            let from_linear = sorted(linear.resolution_literals(&arena, &query));
            let from_indexed = sorted(indexed.resolution_literals(&arena, &query));
            assert_eq!(from_linear, from_indexed, "stores disagree on {}", query);
        }
    }

    #[test]
    fn test_extract_is_idempotent() {
        let arena = test_arena();
        for indexed in [false, true] {
            let mut store = ClauseStore::new(indexed);
            fill(&mut store, &arena);
            let id = arena.ids().next().unwrap();

            assert!(store.contains(id));
            store.extract(&arena, id);
            assert!(!store.contains(id));
            store.extract(&arena, id);
            assert_eq!(store.len(), arena.len() - 1);

            // The extracted clause no longer answers partner queries.
            let query = Literal::parse("member(Z)");
            let partners = store.resolution_literals(&arena, &query);
            assert!(partners.iter().all(|&(partner, _)| partner != id));
        }
    }
}
