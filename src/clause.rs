use std::fmt;
use std::ops::Index;

use crate::literal::Literal;
use crate::tptp;

// The role a clause plays in the input problem.
// Selection only cares about NegatedConjecture and Plain (for seeding) and
// EqualityAxiom (for the optional equality hold-out); the rest is carried
// through so the listing can reproduce the input faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseType {
    Axiom,
    Hypothesis,
    Plain,
    NegatedConjecture,
    EqualityAxiom,
    Unknown,
}

impl ClauseType {
    pub fn from_role(role: &str) -> ClauseType {
        match role {
            "axiom" => ClauseType::Axiom,
            "hypothesis" => ClauseType::Hypothesis,
            "plain" => ClauseType::Plain,
            "negated_conjecture" => ClauseType::NegatedConjecture,
            "equality_axiom" => ClauseType::EqualityAxiom,
            _ => ClauseType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseType::Axiom => "axiom",
            ClauseType::Hypothesis => "hypothesis",
            ClauseType::Plain => "plain",
            ClauseType::NegatedConjecture => "negated_conjecture",
            ClauseType::EqualityAxiom => "equality_axiom",
            ClauseType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ClauseType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// A clause is a disjunction (an "or") of literals, universally quantified
// over its variables. The literal order is meaningful: partner queries and
// therefore selection order follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub name: String,
    pub clause_type: ClauseType,
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn new(name: &str, clause_type: ClauseType, literals: Vec<Literal>) -> Clause {
        Clause {
            name: name.to_string(),
            clause_type,
            literals,
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    // Parses a clause from its cnf(...) display form. Only for tests and tools.
    pub fn parse(s: &str) -> Clause {
        match tptp::parse_clause(s) {
            Ok(clause) => clause,
            Err(e) => panic!("cannot parse clause '{}': {}", s, e),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cnf({},{},(", self.name, self.clause_type)?;
        if self.literals.is_empty() {
            write!(f, "$false")?;
        }
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{}", literal)?;
        }
        write!(f, ")).")
    }
}

// A stable identity handle for a clause within one selection run.
// Two structurally equal clauses registered separately stay distinct; bag
// membership and level bookkeeping go through ids, never through structural
// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClauseId(u32);

impl ClauseId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// Owns every clause of a selection run and hands out ids in registration
// order. The engine never creates clauses of its own; the arena is filled
// once from the producer's output and stays fixed for the whole run.
#[derive(Debug, Default, Clone)]
pub struct ClauseArena {
    clauses: Vec<Clause>,
}

impl ClauseArena {
    pub fn new() -> ClauseArena {
        ClauseArena { clauses: vec![] }
    }

    pub fn from_clauses(clauses: Vec<Clause>) -> ClauseArena {
        ClauseArena { clauses }
    }

    pub fn add(&mut self, clause: Clause) -> ClauseId {
        let id = ClauseId(self.clauses.len() as u32);
        self.clauses.push(clause);
        id
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ClauseId> {
        (0..self.clauses.len() as u32).map(ClauseId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClauseId, &Clause)> {
        self.clauses
            .iter()
            .enumerate()
            .map(|(i, clause)| (ClauseId(i as u32), clause))
    }
}

impl Index<ClauseId> for ClauseArena {
    type Output = Clause;

    fn index(&self, id: ClauseId) -> &Clause {
        &self.clauses[id.index()]
    }
}
