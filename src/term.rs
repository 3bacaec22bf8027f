use std::fmt;

use crate::tptp;

// A first-order term: either a variable, or a function symbol applied to
// arguments. Constants are applications with no arguments.
// By convention variable names start with an uppercase letter and function
// symbols with a lowercase one. Atoms reuse this type, with a predicate
// symbol at the head; nothing but context tells an atom apart from a term.
// Terms are immutable values. Anything that "changes" a term builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(String),
    Application(String, Vec<Term>),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Variable(name) => write!(f, "{}", name),
            Term::Application(symbol, args) => {
                write!(f, "{}", symbol)?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

impl Term {
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    // Whether the named variable occurs anywhere in this term.
    // This is the occurs-check used by unification.
    pub fn contains_variable(&self, name: &str) -> bool {
        match self {
            Term::Variable(var) => var == name,
            Term::Application(_, args) => args.iter().any(|arg| arg.contains_variable(name)),
        }
    }

    // Collects the names of all variables in the term, in first-occurrence order.
    pub fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Term::Variable(name) => {
                if !vars.iter().any(|v| v == name) {
                    vars.push(name.clone());
                }
            }
            Term::Application(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    // Parses a term from its display form. Only for tests and tools.
    pub fn parse(s: &str) -> Term {
        match tptp::parse_term(s) {
            Ok(term) => term,
            Err(e) => panic!("cannot parse term '{}': {}", s, e),
        }
    }
}
