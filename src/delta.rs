//! One-step and iterated delta reduction: unfolding named definitions.

use crate::env::{Context, DeclKind, Declaration, Fetch, Lookup, Param};
use crate::error::{CoreError, Result};
use crate::subst::subst_many;
use crate::term::{Binder, Term};
use std::collections::HashMap;

/// Builds the instantiated body for a declaration applied to `args`.
///
/// - More arguments than parameters is a fatal [`CoreError::TooManyArgs`].
/// - Exactly as many, or fewer, is legal: the first `args.len()` parameters
///   are paired with `args` into a parallel substitution, applied to `body`.
///   Any leftover parameters (when `args.len() < params.len()`) are
///   re-wrapped as lambdas around the substituted body, in their original
///   order, using their declared types — an eta-expansion. Substitution is
///   applied to `body` *after* wrapping, so leftover parameter names appear
///   as bound variables in the result and are renamed by the ordinary
///   capture-avoidance rule if they collide with a free variable of a
///   replacement.
pub fn instantiate(name: &str, params: &[Param], body: &Term, args: &[Term]) -> Result<Term> {
    if args.len() > params.len() {
        return Err(CoreError::TooManyArgs {
            name: name.to_string(),
            arity: params.len(),
            got: args.len(),
        });
    }

    let bound: HashMap<String, Term> = params
        .iter()
        .zip(args.iter())
        .map(|(p, a)| (p.name.clone(), a.clone()))
        .collect();

    let leftover = &params[args.len()..];
    if leftover.is_empty() {
        return Ok(subst_many(body, &bound));
    }

    let wrapped = leftover.iter().rev().fold(body.clone(), |acc, p| Term::Binder {
        binder: Binder::Lambda,
        var: p.name.clone(),
        dom: Box::new(p.ty.clone()),
        body: Box::new(acc),
    });
    Ok(subst_many(&wrapped, &bound))
}

/// Which environment mode a delta step resolves references against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The registering environment, with full layered lookup.
    Global,
    /// A flat, single-map scratch environment.
    Local,
}

/// Attempts to unfold the declaration named `name` applied to `args`,
/// looked up in `lookup` under `mode`'s semantics (the lookup contract
/// itself is mode-agnostic; `mode` only documents which shape of
/// environment the caller passed in).
fn delta_reduce<L: Lookup>(lookup: &L, _mode: Mode, name: &str, args: &[Term]) -> Result<(Term, bool)> {
    match lookup.fetch(name) {
        Fetch::NotFound => Ok((Term::reference(name.to_string(), args.to_vec()), false)),
        Fetch::Found(decl) => {
            if args.len() > decl.arity() {
                return Err(CoreError::TooManyArgs {
                    name: name.to_string(),
                    arity: decl.arity(),
                    got: args.len(),
                });
            }
            match &decl.kind {
                DeclKind::Definition { body: Some(body) } => {
                    let result = instantiate(name, &decl.params, body, args)?;
                    Ok((result, true))
                }
                DeclKind::Definition { body: None } => Err(CoreError::CorruptDefinition(name.to_string())),
                DeclKind::Theorem { proof: Some(_) } => {
                    Ok((Term::reference(name.to_string(), args.to_vec()), false))
                }
                DeclKind::Theorem { proof: None } => Err(CoreError::UnprovenTheorem(name.to_string())),
                DeclKind::Axiom => Ok((Term::reference(name.to_string(), args.to_vec()), false)),
                DeclKind::Special { .. } => Err(CoreError::UnexpectedSpecial(name.to_string())),
            }
        }
    }
}

/// Performs at most one delta reduction in `t`, under the given lookup mode.
///
/// Descends structurally exactly like [`crate::beta::beta_step`]; at a
/// [`Term::Ref`] it reduces arguments left-to-right first, and only
/// attempts to unfold the reference itself once no argument reduced.
pub fn delta_step<L: Lookup>(lookup: &L, mode: Mode, t: &Term) -> Result<(Term, bool)> {
    match t {
        Term::Binder { binder, var, dom, body } => {
            let (new_dom, dom_reduced) = delta_step(lookup, mode, dom)?;
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
            let (new_body, body_reduced) = delta_step(lookup, mode, body)?;
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
            let (new_fun, fun_reduced) = delta_step(lookup, mode, fun)?;
            if fun_reduced {
                return Ok((Term::app(new_fun, (**arg).clone()), true));
            }
            let (new_arg, arg_reduced) = delta_step(lookup, mode, arg)?;
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
                let (new_a, did_reduce) = delta_step(lookup, mode, a)?;
                reduced_any = did_reduce;
                new_args.push(new_a);
            }
            if reduced_any {
                return Ok((Term::reference(name.clone(), new_args), true));
            }
            delta_reduce(lookup, mode, name, &new_args)
        }
        Term::Variable(_) | Term::Sort(_) => Ok((t.clone(), false)),
    }
}

/// Iterates [`delta_step`] against the full layered environment until it
/// reports no further reduction.
pub fn delta_normalize<L: Lookup>(lookup: &L, t: &Term) -> Result<Term> {
    delta_normalize_with_mode(lookup, Mode::Global, t)
}

/// As [`delta_normalize`], but resolving references against a flat scratch
/// environment instead of the full layered one.
pub fn delta_normalize_local<L: Lookup>(lookup: &L, t: &Term) -> Result<Term> {
    delta_normalize_with_mode(lookup, Mode::Local, t)
}

fn delta_normalize_with_mode<L: Lookup>(lookup: &L, mode: Mode, t: &Term) -> Result<Term> {
    let mut current = t.clone();
    loop {
        let (next, reduced) = delta_step(lookup, mode, &current)?;
        if !reduced {
            return Ok(current);
        }
        current = next;
    }
}

/// An empty [`Context`], for callers that have none to provide.
pub fn empty_context() -> Context {
    Vec::new()
}
