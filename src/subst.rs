//! Capture-avoiding substitution and alpha-equivalence.
//!
//! This is the part of the kernel most prone to soundness bugs in a naive
//! implementation: a substitution that lets a replacement's free variable
//! fall under a binder that happens to share its name produces an unsound
//! term. Every binder case below restricts the substitution to the body's
//! free variables first, then renames the bound variable when, and only
//! when, that restricted substitution would capture it.

use std::collections::HashMap;

use crate::term::{Binder, Term};

/// Produces a term equal to `term` with free occurrences of `var` replaced
/// by `replacement`, renaming bound variables as needed to avoid capture.
pub fn subst(term: &Term, var: &str, replacement: &Term) -> Term {
    let mut map = HashMap::new();
    map.insert(var.to_string(), replacement.clone());
    subst_many(term, &map)
}

/// Applies every replacement in `map` simultaneously (not sequentially:
/// a replacement term is never itself substituted into).
pub fn subst_many(term: &Term, map: &HashMap<String, Term>) -> Term {
    match term {
        Term::Variable(v) => match map.get(v) {
            Some(replacement) => replacement.clone(),
            None => term.clone(),
        },
        Term::Sort(_) => term.clone(),
        Term::App(fun, arg) => Term::app(subst_many(fun, map), subst_many(arg, map)),
        Term::Ref(name, args) => {
            Term::reference(name.clone(), args.iter().map(|a| subst_many(a, map)).collect())
        }
        Term::Binder { binder, var, dom, body } => subst_binder(*binder, var, dom, body, map),
    }
}

fn subst_binder(binder: Binder, var: &str, dom: &Term, body: &Term, map: &HashMap<String, Term>) -> Term {
    // sigma: the substitution restricted to the body's free variables, minus
    // the bound variable itself (which, if substituted for, is re-bound here).
    let body_free = body.free_variables();
    let sigma: HashMap<String, Term> = map
        .iter()
        .filter(|(k, _)| k.as_str() != var && body_free.contains(k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let new_dom = subst_many(dom, map);

    if sigma.is_empty() {
        return Term::Binder {
            binder,
            var: var.to_string(),
            dom: Box::new(new_dom),
            body: Box::new(body.clone()),
        };
    }

    let captures = sigma.values().any(|r| r.is_free(var));
    if captures {
        let fresh = fresh_name_for(var, body, sigma.values());
        let renamed_body = subst(body, var, &Term::var(fresh.clone()));
        let mut sigma_prime = sigma;
        sigma_prime.insert(var.to_string(), Term::var(fresh.clone()));
        let new_body = subst_many(&renamed_body, &sigma_prime);
        Term::Binder {
            binder,
            var: fresh,
            dom: Box::new(new_dom),
            body: Box::new(new_body),
        }
    } else {
        let new_body = subst_many(body, &sigma);
        Term::Binder {
            binder,
            var: var.to_string(),
            dom: Box::new(new_dom),
            body: Box::new(new_body),
        }
    }
}

/// The first `base'`, `base''`, ... not free in `body` nor in any of `avoid`.
fn fresh_name_for<'a>(base: &str, body: &Term, avoid: impl Iterator<Item = &'a Term>) -> String {
    let avoid: Vec<&Term> = avoid.collect();
    let mut candidate = format!("{base}'");
    loop {
        let clashes = body.is_free(&candidate) || avoid.iter().any(|t| t.is_free(&candidate));
        if !clashes {
            return candidate;
        }
        candidate.push('\'');
    }
}

/// Structural equality modulo consistent renaming of bound variables.
///
/// Bound variables are tracked as a stack of corresponding `(t1-name,
/// t2-name)` pairs, innermost binder last; a free occurrence is one with no
/// entry on the stack, and must then match literally on both sides.
pub fn alpha_eq(t1: &Term, t2: &Term) -> bool {
    alpha_eq_under(t1, t2, &mut Vec::new())
}

fn alpha_eq_under(t1: &Term, t2: &Term, pairs: &mut Vec<(String, String)>) -> bool {
    match (t1, t2) {
        (Term::Variable(v1), Term::Variable(v2)) => {
            match pairs.iter().rev().find(|(a, _)| a == v1) {
                Some((_, b)) => b == v2,
                None => v1 == v2 && !pairs.iter().any(|(_, b)| b == v2),
            }
        }
        (Term::Sort(s1), Term::Sort(s2)) => s1 == s2,
        (Term::App(f1, a1), Term::App(f2, a2)) => {
            alpha_eq_under(f1, f2, pairs) && alpha_eq_under(a1, a2, pairs)
        }
        (Term::Ref(n1, args1), Term::Ref(n2, args2)) => {
            n1 == n2
                && args1.len() == args2.len()
                && args1
                    .iter()
                    .zip(args2.iter())
                    .all(|(a1, a2)| alpha_eq_under(a1, a2, pairs))
        }
        (
            Term::Binder {
                binder: b1,
                var: v1,
                dom: d1,
                body: body1,
            },
            Term::Binder {
                binder: b2,
                var: v2,
                dom: d2,
                body: body2,
            },
        ) => {
            if b1 != b2 || !alpha_eq_under(d1, d2, pairs) {
                return false;
            }
            pairs.push((v1.clone(), v2.clone()));
            let equal = alpha_eq_under(body1, body2, pairs);
            pairs.pop();
            equal
        }
        _ => false,
    }
}
