use std::fmt;

use fxhash::FxHashMap;

use crate::term::Term;

// A substitution is a finite mapping from variables to terms.
// Identity bindings are never stored, so the empty substitution is identity.
// Variable alphabets are global, which makes application capture-free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: FxHashMap<String, Term>,
}

impl Substitution {
    pub fn new() -> Substitution {
        Substitution {
            map: FxHashMap::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn get(&self, var: &str) -> Option<&Term> {
        self.map.get(var)
    }

    // Binds a single variable, dropping identity bindings.
    pub fn bind(&mut self, var: &str, term: Term) {
        if let Term::Variable(name) = &term {
            if name == var {
                return;
            }
        }
        self.map.insert(var.to_string(), term);
    }

    // Applies the substitution to a term, replacing every bound variable.
    pub fn apply(&self, term: &Term) -> Term {
        match term {
            Term::Variable(name) => match self.map.get(name) {
                Some(bound) => bound.clone(),
                None => term.clone(),
            },
            Term::Application(symbol, args) => Term::Application(
                symbol.clone(),
                args.iter().map(|arg| self.apply(arg)).collect(),
            ),
        }
    }

    // The composition self∘tau: applying the result is applying tau first,
    // then self.
    pub fn compose(&self, tau: &Substitution) -> Substitution {
        let mut result = Substitution::new();
        for (var, term) in &tau.map {
            result.bind(var, self.apply(term));
        }
        for (var, term) in &self.map {
            if !tau.map.contains_key(var) {
                result.bind(var, term.clone());
            }
        }
        result
    }

    // Extends the substitution with var -> term, rewriting the existing range
    // under the new binding first. Keeps the substitution idempotent, so a
    // single application pass is a full application.
    pub fn compose_binding(&mut self, var: &str, term: &Term) {
        let mut binding = Substitution::new();
        binding.bind(var, term.clone());
        for bound in self.map.values_mut() {
            *bound = binding.apply(bound);
        }
        self.bind(var, term.clone());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.map.iter().map(|(var, term)| (var.as_str(), term))
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut bindings: Vec<_> = self.map.iter().collect();
        bindings.sort_by_key(|(var, _)| var.as_str());
        write!(f, "{{")?;
        for (i, (var, term)) in bindings.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}<-{}", var, term)?;
        }
        write!(f, "}}")
    }
}
