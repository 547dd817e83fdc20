//! One-step and iterated beta reduction.
//!
//! `beta_step` performs at most one contraction, descending in a fixed,
//! deterministic order (leftmost-outermost, binder-first) so that repeated
//! callers — the combined normalizer, instrumentation, tests — all observe
//! the same sequence of intermediate terms.

use crate::error::Result;
use crate::subst::subst;
use crate::term::{Binder, Term};

/// Performs at most one beta contraction in `t`, returning the (possibly
/// unchanged) term and whether a reduction occurred.
///
/// Search order:
/// 1. at a binder, try the domain, then the body;
/// 2. at an application `(f, a)`, try `f`; if `f` is a lambda with no
///    reducible subterm, contract; otherwise try `a`;
/// 3. at a reference, reduce arguments left to right, first reducible wins;
/// 4. otherwise, unchanged.
pub fn beta_step(t: &Term) -> Result<(Term, bool)> {
    match t {
        Term::Binder { binder, var, dom, body } => {
            let (new_dom, dom_reduced) = beta_step(dom)?;
            if dom_reduced {
                return Ok((
                    Term::Binder {
                        binder: *binder,
                        var: var.clone(),
                        dom: Box::new(new_dom),
                        body: body.clone(),
                    },
                    true,
                ));
            }
            let (new_body, body_reduced) = beta_step(body)?;
            Ok((
                Term::Binder {
                    binder: *binder,
                    var: var.clone(),
                    dom: Box::new(new_dom),
                    body: Box::new(new_body),
                },
                body_reduced,
            ))
        }
        Term::App(fun, arg) => {
            let (new_fun, fun_reduced) = beta_step(fun)?;
            if fun_reduced {
                return Ok((Term::app(new_fun, (**arg).clone()), true));
            }
            if let Term::Binder { binder: Binder::Lambda, var, body, .. } = &new_fun {
                let contracted = subst(body, var, arg);
                return Ok((contracted, true));
            }
            let (new_arg, arg_reduced) = beta_step(arg)?;
            Ok((Term::app(new_fun, new_arg), arg_reduced))
        }
        Term::Ref(name, args) => {
            let mut new_args = Vec::with_capacity(args.len());
            let mut reduced_any = false;
            for a in args {
                if reduced_any {
                    new_args.push(a.clone());
                    continue;
                }
                let (new_a, did_reduce) = beta_step(a)?;
                reduced_any = did_reduce;
                new_args.push(new_a);
            }
            Ok((Term::reference(name.clone(), new_args), reduced_any))
        }
        Term::Variable(_) | Term::Sort(_) => Ok((t.clone(), false)),
    }
}

/// Iterates [`beta_step`] until it reports no further reduction.
///
/// Not guaranteed to terminate on ill-typed input; termination is a property
/// of well-typed terms (strong normalization of the Calculus of
/// Constructions), which is the caller's responsibility.
pub fn beta_normalize(t: &Term) -> Result<Term> {
    let mut current = t.clone();
    loop {
        let (next, reduced) = beta_step(&current)?;
        if !reduced {
            return Ok(current);
        }
        current = next;
    }
}
