//! One-step and iterated special reduction: invoking host-side computation
//! attached to a [`Special`](crate::env::DeclKind::Special) declaration.

use crate::env::{Context, DeclKind, Environment, Fetch};
use crate::error::{CoreError, Result};
use crate::term::Term;

/// Attempts to reduce the reference `name[args]` by invoking its special
/// handler, if `name` names a [`Special`](DeclKind::Special) in `env`.
///
/// Unlike delta reduction, a special is never eta-expanded: supplying fewer
/// arguments than its arity is fatal (`InsufficientArgs`), since the host
/// function needs all of them to compute.
fn special_reduce(env: &Environment, ctx: &Context, name: &str, args: &[Term]) -> Result<(Term, bool)> {
    match env.fetch(name) {
        Fetch::NotFound => Ok((Term::reference(name.to_string(), args.to_vec()), false)),
        Fetch::Found(decl) => match &decl.kind {
            DeclKind::Special { handler } => {
                let arity = decl.arity();
                if args.len() > arity {
                    return Err(CoreError::TooManyArgs { name: name.to_string(), arity, got: args.len() });
                }
                if args.len() < arity {
                    return Err(CoreError::InsufficientArgs { name: name.to_string(), arity, got: args.len() });
                }
                let result = handler(env, ctx, args)?;
                Ok((result, true))
            }
            _ => Ok((Term::reference(name.to_string(), args.to_vec()), false)),
        },
    }
}

/// Performs at most one special reduction in `t`.
///
/// Descends structurally (binders, applications, references) exactly as
/// [`crate::delta::delta_step`]: at a [`Term::Ref`] it reduces arguments
/// left-to-right first, and only attempts the special reduction itself once
/// no argument reduced.
pub fn special_step(env: &Environment, ctx: &Context, t: &Term) -> Result<(Term, bool)> {
    match t {
        Term::Binder { binder, var, dom, body } => {
            let (new_dom, dom_reduced) = special_step(env, ctx, dom)?;
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
            let (new_body, body_reduced) = special_step(env, ctx, body)?;
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
            let (new_fun, fun_reduced) = special_step(env, ctx, fun)?;
            if fun_reduced {
                return Ok((Term::app(new_fun, (**arg).clone()), true));
            }
            let (new_arg, arg_reduced) = special_step(env, ctx, arg)?;
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
                let (new_a, did_reduce) = special_step(env, ctx, a)?;
                reduced_any = did_reduce;
                new_args.push(new_a);
            }
            if reduced_any {
                return Ok((Term::reference(name.clone(), new_args), true));
            }
            special_reduce(env, ctx, name, &new_args)
        }
        Term::Variable(_) | Term::Sort(_) => Ok((t.clone(), false)),
    }
}

/// Iterates [`special_step`] to a fixpoint.
pub fn special_normalize(env: &Environment, ctx: &Context, t: &Term) -> Result<Term> {
    let mut current = t.clone();
    loop {
        let (next, reduced) = special_step(env, ctx, &current)?;
        if !reduced {
            return Ok(current);
        }
        current = next;
    }
}
