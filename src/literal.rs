use std::fmt;

use crate::substitution::Substitution;
use crate::term::Term;
use crate::tptp;

// The predicate symbol used for equality atoms. Equality gets no special
// treatment during selection; it is an ordinary predicate that happens to
// have infix concrete syntax.
pub const EQUALITY: &str = "=";

// A literal is a signed atom. The atom is a term headed by a predicate symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub positive: bool,
    pub atom: Term,
}

impl Literal {
    pub fn new(positive: bool, atom: Term) -> Literal {
        Literal { positive, atom }
    }

    pub fn is_negative(&self) -> bool {
        !self.positive
    }

    // The predicate symbol and arity of the atom.
    // None for a malformed atom whose head is a variable.
    pub fn predicate(&self) -> Option<(&str, usize)> {
        match &self.atom {
            Term::Application(symbol, args) => Some((symbol, args.len())),
            Term::Variable(_) => None,
        }
    }

    // Two literals are potential resolution partners when their signs differ
    // and their atoms share a predicate symbol and arity. Whether the atoms
    // actually unify is a separate question, answered by the selector.
    pub fn complements(&self, other: &Literal) -> bool {
        if self.positive == other.positive {
            return false;
        }
        match (self.predicate(), other.predicate()) {
            (Some(p1), Some(p2)) => p1 == p2,
            _ => false,
        }
    }

    pub fn apply(&self, subst: &Substitution) -> Literal {
        Literal {
            positive: self.positive,
            atom: subst.apply(&self.atom),
        }
    }

    // Parses a literal from its display form. Only for tests and tools.
    pub fn parse(s: &str) -> Literal {
        match tptp::parse_literal(s) {
            Ok(literal) => literal,
            Err(e) => panic!("cannot parse literal '{}': {}", s, e),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Equality atoms render infix, with the sign folded into the operator.
        if let Term::Application(symbol, args) = &self.atom {
            if symbol == EQUALITY && args.len() == 2 {
                let operator = if self.positive { "=" } else { "!=" };
                return write!(f, "{}{}{}", args[0], operator, args[1]);
            }
        }
        if !self.positive {
            write!(f, "~")?;
        }
        write!(f, "{}", self.atom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_display_roundtrip() {
        for s in ["member(guido)", "~shaved(X,Y)", "a=b", "f(X)!=g(Y)"] {
            assert_eq!(Literal::parse(s).to_string(), s);
        }
    }

    #[test]
    fn test_predicate() {
        assert_eq!(Literal::parse("~shaved(X,Y)").predicate(), Some(("shaved", 2)));
        assert_eq!(Literal::parse("kangaroo(the_kangaroo)").predicate(), Some(("kangaroo", 1)));
        assert_eq!(Literal::parse("a=b").predicate(), Some(("=", 2)));
    }

    #[test]
    fn test_apply() {
        let mut subst = Substitution::new();
        subst.bind("X", Term::parse("petruchio"));
        subst.bind("Y", Term::parse("lorenzo"));
        let literal = Literal::parse("~shaved(X,Y)").apply(&subst);
        assert_eq!(literal, Literal::parse("~shaved(petruchio,lorenzo)"));
        assert!(literal.is_negative());
    }

    #[test]
    fn test_complements() {
        let pos = Literal::parse("shaved(members,X)");
        let neg = Literal::parse("~shaved(petruchio,lorenzo)");
        assert!(pos.complements(&neg));
        assert!(neg.complements(&pos));

        // Same sign is never complementary.
        assert!(!pos.complements(&pos));
        // Neither is a different predicate or arity.
        assert!(!pos.complements(&Literal::parse("~member(X)")));
        assert!(!pos.complements(&Literal::parse("~shaved(X)")));
    }
}
