// tests/test_beta.rs

use pts_kernel::beta::{beta_normalize, beta_step};
use pts_kernel::subst::alpha_eq;
use pts_kernel::term::{Sort, Term};

fn ty() -> Term {
    Term::sort(Sort::Type)
}

#[test]
fn scenario_1_identity_application() {
    // (\x:*. x) y -> y
    let t = Term::app(Term::lambda("x", ty(), Term::var("x")), Term::var("y"));
    let (result, reduced) = beta_step(&t).unwrap();
    assert!(reduced);
    assert_eq!(result, Term::var("y"));
}

#[test]
fn scenario_2_capture_avoiding_contraction() {
    // (\z:*. \x:*. x z) x -> \x':*. x' x   (bound x renamed to avoid capture)
    let inner = Term::lambda("x", ty(), Term::app(Term::var("x"), Term::var("z")));
    let t = Term::app(Term::lambda("z", ty(), inner), Term::var("x"));
    let (result, reduced) = beta_step(&t).unwrap();
    assert!(reduced);
    match &result {
        Term::Binder { var, body, .. } => {
            assert_ne!(var, "x");
            assert!(alpha_eq(body, &Term::app(Term::var(var.clone()), Term::var("x"))));
        }
        _ => panic!("expected a lambda"),
    }
}

#[test]
fn beta_step_reduces_at_most_one_redex() {
    // Two independent redexes as reference arguments: only the first reduces.
    let redex = |n: i32| Term::app(Term::lambda("x", ty(), Term::var("x")), Term::var(format!("v{n}")));
    let t = Term::reference("f", vec![redex(1), redex(2)]);
    let (result, reduced) = beta_step(&t).unwrap();
    assert!(reduced);
    match result {
        Term::Ref(_, args) => {
            assert_eq!(args[0], Term::var("v1"));
            assert_eq!(args[1], redex(2));
        }
        _ => panic!("expected a reference"),
    }
}

#[test]
fn beta_step_on_normal_form_reports_unchanged() {
    let t = Term::var("x");
    let (result, reduced) = beta_step(&t).unwrap();
    assert!(!reduced);
    assert_eq!(result, t);
}

#[test]
fn scenario_3_beta_normalize_through_a_binder_domain() {
    // \y:((\x:□. x) *). ((\x:*. x) y) -> \y:*. y
    let dom = Term::app(Term::lambda("x", Term::sort(Sort::Kind), Term::var("x")), ty());
    let body = Term::app(Term::lambda("x", ty(), Term::var("x")), Term::var("y"));
    let t = Term::lambda("y", dom, body);
    let result = beta_normalize(&t).unwrap();
    assert_eq!(result, Term::lambda("y", ty(), Term::var("y")));
}

#[test]
fn beta_normalize_on_a_product_type() {
    let dom = Term::app(Term::lambda("x", ty(), Term::var("x")), Term::var("a"));
    let t = Term::product("p", dom, Term::sort(Sort::Type));
    let result = beta_normalize(&t).unwrap();
    assert_eq!(result, Term::product("p", Term::var("a"), Term::sort(Sort::Type)));
}

#[test]
fn law_5_beta_step_strictly_shrinks_redex_count() {
    fn redex_count(t: &Term) -> usize {
        match t {
            Term::App(fun, arg) => {
                let here = if fun.is_lambda() { 1 } else { 0 };
                here + redex_count(fun) + redex_count(arg)
            }
            Term::Binder { dom, body, .. } => redex_count(dom) + redex_count(body),
            Term::Ref(_, args) => args.iter().map(redex_count).sum(),
            Term::Variable(_) | Term::Sort(_) => 0,
        }
    }

    let t = Term::app(
        Term::lambda("x", ty(), Term::var("x")),
        Term::app(Term::lambda("y", ty(), Term::var("y")), Term::var("a")),
    );
    let before = redex_count(&t);
    let (after_term, reduced) = beta_step(&t).unwrap();
    assert!(reduced);
    assert!(redex_count(&after_term) < before);
}
