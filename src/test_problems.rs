// Shared fixture problems for the selector tests. These are the classic
// puzzle problems the selection algorithms were validated against.

use indoc::indoc;

use crate::clause::Clause;
use crate::tptp;

fn parse(input: &str) -> Vec<Clause> {
    match tptp::parse_problem(input) {
        Ok(clauses) => clauses,
        Err(e) => panic!("fixture problem failed to parse: {}", e),
    }
}

// Guido's barbers: seven hypotheses and axioms about who shaved whom, plus a
// negated conjecture. Every clause is relevant.
pub fn barbers() -> Vec<Clause> {
    parse(indoc! {"
        cnf(one_shaved_then_all_shaved,axiom,
            ( ~ member(X)
            | ~ member(Y)
            | ~ shaved(X,Y)
            | shaved(members,X) )).

        cnf(all_shaved_then_one_shaved,axiom,
            ( ~ shaved(members,X)
            | ~ member(Y)
            | shaved(Y,X) )).

        cnf(guido,hypothesis,
            ( member(guido) )).

        cnf(lorenzo,hypothesis,
            ( member(lorenzo) )).

        cnf(petruchio,hypothesis,
            ( member(petruchio) )).

        cnf(cesare,hypothesis,
            ( member(cesare) )).

        cnf(guido_has_shaved_cesare,hypothesis,
            ( shaved(guido,cesare) )).

        cnf(prove_petruchio_has_shaved_lorenzo,negated_conjecture,
            ( ~ shaved(petruchio,lorenzo) )).
    "})
}

// Lewis Carroll's kangaroo sorites: a chain of twelve clauses that are all
// needed, reached one per relevance level.
pub fn sorites() -> Vec<Clause> {
    parse(indoc! {"
        cnf(only_cats_in_house,axiom,
            ( ~ in_house(Cat)
            | cat(Cat) )).

        cnf(gazers_are_suitable_pets,axiom,
            ( ~ gazer(Gazer)
            | suitable_pet(Gazer) )).

        cnf(avoid_detested,axiom,
            ( ~ detested(Detested)
            | avoided(Detested) )).

        cnf(carnivores_are_prowlers,axiom,
            ( ~ carnivore(Carnivore)
            | prowler(Carnivore) )).

        cnf(cats_are_mice_killers,axiom,
            ( ~ cat(Cat)
            | mouse_killer(Cat) )).

        cnf(in_house_if_takes_to_me,axiom,
            ( ~ takes_to_me(Taken_animal)
            | in_house(Taken_animal) )).

        cnf(kangaroos_are_not_pets,axiom,
            ( ~ kangaroo(Kangaroo)
            | ~ suitable_pet(Kangaroo) )).

        cnf(mouse_killers_are_carnivores,axiom,
            ( ~ mouse_killer(Killer)
            | carnivore(Killer) )).

        cnf(takes_to_me_or_detested,axiom,
            ( takes_to_me(Animal)
            | detested(Animal) )).

        cnf(prowlers_are_gazers,axiom,
            ( ~ prowler(Prowler)
            | gazer(Prowler) )).

        cnf(kangaroo_is_a_kangaroo,axiom,
            ( kangaroo(the_kangaroo) )).

        cnf(avoid_kangaroo,negated_conjecture,
            ( ~ avoided(the_kangaroo) )).
    "})
}

// The sorites problem plus two axioms that no refutation needs. Plain path
// reachability picks them up anyway; alternation does not.
pub fn sorites_with_irrelevant() -> Vec<Clause> {
    let mut clauses = sorites();
    clauses.extend(parse(indoc! {"
        cnf(cat_not_useful,axiom,
            ( ~ useful(Cat)
            | cat(Cat) )).

        cnf(kangaroos_are_jumpers,axiom,
            ( ~ kangaroo(Kangaroo)
            | jumper(Kangaroo) )).
    "}));
    clauses
}

// A conjecture with two literals, so two paths leave level zero; the kill
// unit at the far end is only reachable if alternation is handled right.
pub fn two_literal_conjecture() -> Vec<Clause> {
    parse(indoc! {"
        cnf(c,negated_conjecture,
            ( kill(b,a)
            | kill(c,a) )).

        cnf(a1,axiom,
            ( ~ kill(X,Y)
            | hate(X,Y)
            | rich(X,Y) )).

        cnf(a2,axiom,
            ( ~ kill(X,Y)
            | ~ rich(X,Y) )).

        cnf(a3,axiom,
            ( kill(a,b) )).
    "})
}

// The canonical discovery order for the sorites problem: one clause per
// level, starting at the conjecture and walking the chain backwards.
pub fn sorites_discovery_order() -> Vec<String> {
    [
        "avoid_kangaroo",
        "avoid_detested",
        "takes_to_me_or_detested",
        "in_house_if_takes_to_me",
        "only_cats_in_house",
        "cats_are_mice_killers",
        "mouse_killers_are_carnivores",
        "carnivores_are_prowlers",
        "prowlers_are_gazers",
        "gazers_are_suitable_pets",
        "kangaroos_are_not_pets",
        "kangaroo_is_a_kangaroo",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}
