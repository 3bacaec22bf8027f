use crate::substitution::Substitution;
use crate::term::Term;

// Robinson unification.
// Returns the most general unifier of the two terms, or None when there is
// no unifier. Failure is an ordinary result here, not an error: the
// selectors probe many candidate literal pairs and most of them don't unify.
pub fn mgu(s: &Term, t: &Term) -> Option<Substitution> {
    let mut subst = Substitution::new();
    let mut pairs = vec![(s.clone(), t.clone())];
    while let Some((left, right)) = pairs.pop() {
        let left = subst.apply(&left);
        let right = subst.apply(&right);
        match (left, right) {
            (Term::Variable(x), Term::Variable(y)) if x == y => {}
            (Term::Variable(x), other) | (other, Term::Variable(x)) => {
                if other.contains_variable(&x) {
                    // Occurs-check: X cannot unify with a term containing X.
                    return None;
                }
                subst.compose_binding(&x, &other);
            }
            (Term::Application(f, f_args), Term::Application(g, g_args)) => {
                if f != g || f_args.len() != g_args.len() {
                    return None;
                }
                pairs.extend(f_args.into_iter().zip(g_args));
            }
        }
    }
    Some(subst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unifies(s: &str, t: &str) -> Substitution {
        let s = Term::parse(s);
        let t = Term::parse(t);
        let sigma = match mgu(&s, &t) {
            Some(sigma) => sigma,
            None => panic!("expected {} and {} to unify", s, t),
        };
        // Soundness: the unifier actually equates the two terms.
        assert_eq!(sigma.apply(&s), sigma.apply(&t));
        sigma
    }

    fn assert_no_unifier(s: &str, t: &str) {
        assert!(mgu(&Term::parse(s), &Term::parse(t)).is_none());
    }

    #[test]
    fn test_basic_unification() {
        assert_unifies("X", "a");
        assert_unifies("X", "Y");
        assert_unifies("f(X,b)", "f(a,Y)");
        assert_unifies("shaved(Y,X)", "shaved(petruchio,lorenzo)");
        assert_unifies("p(X,f(X))", "p(a,Y)");
    }

    #[test]
    fn test_unification_failures() {
        assert_no_unifier("a", "b");
        assert_no_unifier("f(a)", "g(a)");
        assert_no_unifier("f(a)", "f(a,b)");
        assert_no_unifier("f(X,X)", "f(a,b)");
    }

    #[test]
    fn test_occurs_check() {
        assert_no_unifier("X", "f(X)");
        assert_no_unifier("f(X,g(X))", "f(Y,g(f(Y)))");
        // Indirect occurrence through an earlier binding.
        assert_no_unifier("p(X,Y,X)", "p(Y,f(X),X)");
    }

    #[test]
    fn test_unify_with_self() {
        let sigma = assert_unifies("f(X,g(Y))", "f(X,g(Y))");
        assert!(sigma.is_empty());
    }

    #[test]
    fn test_most_general() {
        // Any other unifier tau factors through the mgu: tau = rho∘sigma.
        let s = Term::parse("p(X,f(Y))");
        let t = Term::parse("p(g(Z),f(b))");
        let sigma = assert_unifies("p(X,f(Y))", "p(g(Z),f(b))");

        let mut tau = Substitution::new();
        tau.bind("X", Term::parse("g(a)"));
        tau.bind("Y", Term::parse("b"));
        tau.bind("Z", Term::parse("a"));
        assert_eq!(tau.apply(&s), tau.apply(&t));

        let mut rho = Substitution::new();
        rho.bind("Z", Term::parse("a"));
        assert_eq!(rho.compose(&sigma), tau);
    }
}
