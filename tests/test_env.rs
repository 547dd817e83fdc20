// tests/test_env.rs

use pts_kernel::env::{Declaration, Environment, Fetch, LocalEnv, Lookup, Param};
use pts_kernel::term::{Sort, Term};

#[test]
fn fetch_not_found_on_empty_environment() {
    let env = Environment::new();
    assert!(!env.fetch("x").is_found());
}

#[test]
fn fetch_finds_registered_declaration() {
    let mut env = Environment::new();
    env.register(Declaration::axiom("x", vec![]));
    assert!(env.fetch("x").is_found());
}

#[test]
fn inner_scope_shadows_outer() {
    let mut env = Environment::new();
    env.register(Declaration::axiom("x", vec![Param::new("p", Term::sort(Sort::Type))]));
    env.push_scope();
    env.register(Declaration::axiom("x", vec![]));
    match env.fetch("x") {
        Fetch::Found(decl) => assert_eq!(decl.arity(), 0),
        Fetch::NotFound => panic!("expected to find x"),
    }
    env.pop_scope();
    match env.fetch("x") {
        Fetch::Found(decl) => assert_eq!(decl.arity(), 1),
        Fetch::NotFound => panic!("expected to find x"),
    }
}

#[test]
fn local_env_is_flat() {
    let mut local = LocalEnv::new();
    local.register(Declaration::axiom("y", vec![]));
    assert!(local.fetch("y").is_found());
    assert!(!local.fetch("z").is_found());
}

#[test]
#[should_panic(expected = "cannot pop the base environment scope")]
fn popping_the_base_scope_panics() {
    let mut env = Environment::new();
    env.pop_scope();
}
