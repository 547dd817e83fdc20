//! The combined normalizer and the definitional-equality decision procedure
//! it backs.
//!
//! At each step, [`normalize`] prefers a special reduction, then a delta
//! reduction, then a beta reduction, looping until none applies. Specials
//! first because a special may insert a definition that wasn't there
//! before; delta before beta so that unfolding a definition which exposes a
//! new redex doesn't get a chance to blow up before delta has had its turn.

use log::trace;

use crate::beta::beta_step;
use crate::delta::{delta_step, Mode};
use crate::env::{Context, Environment};
use crate::error::{CoreError, Result};
use crate::special::special_step;
use crate::subst::alpha_eq;
use crate::term::Term;

// Re-exported so the full set of convenience entries named in the spec is
// reachable from this module as well as from their home modules.
pub use crate::beta::beta_normalize;
pub use crate::delta::{delta_normalize, delta_normalize_local};
pub use crate::special::special_normalize;

/// A step-count budget for callers that want to bound an otherwise
/// unbounded normalization. Spec-conformant default behaviour has no fuel
/// at all (use the plain `normalize*` entry points); this is strictly
/// opt-in, for embedding untrusted input.
#[derive(Debug, Clone, Copy)]
pub struct Fuel(pub usize);

/// One step of the combined strategy: special, then delta, then beta.
fn combined_step(env: &Environment, ctx: &Context, t: &Term) -> Result<(Term, bool)> {
    let (t, reduced) = special_step(env, ctx, t)?;
    if reduced {
        return Ok((t, true));
    }
    let (t, reduced) = delta_step(env, Mode::Global, &t)?;
    if reduced {
        return Ok((t, true));
    }
    let (t, reduced) = beta_step(&t)?;
    Ok((t, reduced))
}

/// Drives `t` to a normal form under the combined special/delta/beta
/// strategy, with an environment and a context.
pub fn normalize(env: &Environment, ctx: &Context, t: &Term) -> Result<Term> {
    let mut current = t.clone();
    loop {
        let (next, reduced) = combined_step(env, ctx, &current)?;
        if !reduced {
            return Ok(current);
        }
        trace!("normalize: step taken");
        current = next;
    }
}

/// As [`normalize`], bounded by a step budget; exhausting it surfaces
/// [`CoreError::FuelExhausted`] instead of looping forever.
pub fn normalize_with_fuel(env: &Environment, ctx: &Context, t: &Term, fuel: Fuel) -> Result<Term> {
    let mut current = t.clone();
    let mut remaining = fuel.0;
    loop {
        let (next, reduced) = combined_step(env, ctx, &current)?;
        if !reduced {
            return Ok(current);
        }
        if remaining == 0 {
            return Err(CoreError::FuelExhausted);
        }
        remaining -= 1;
        current = next;
    }
}

/// [`normalize`] with an empty context.
pub fn normalize_in_env(env: &Environment, t: &Term) -> Result<Term> {
    normalize(env, &Vec::new(), t)
}

/// [`normalize`] with an empty environment and an empty context: pure beta
/// normalization plus special/delta steps against declarations that will
/// never be found, i.e. equivalent to beta-normalizing `t`.
pub fn normalize_term(t: &Term) -> Result<Term> {
    normalize(&Environment::new(), &Vec::new(), t)
}

/// Decides definitional equality: normalizes both terms, then compares
/// modulo alpha. This is the decision procedure the type checker uses for
/// conversion.
pub fn beta_eq(env: &Environment, ctx: &Context, t1: &Term, t2: &Term) -> Result<bool> {
    let n1 = normalize(env, ctx, t1)?;
    let n2 = normalize(env, ctx, t2)?;
    Ok(alpha_eq(&n1, &n2))
}

/// [`beta_eq`] with an empty context.
pub fn beta_eq_in_env(env: &Environment, t1: &Term, t2: &Term) -> Result<bool> {
    beta_eq(env, &Vec::new(), t1, t2)
}

/// [`beta_eq`] with an empty environment and context.
pub fn beta_eq_terms(t1: &Term, t2: &Term) -> Result<bool> {
    beta_eq(&Environment::new(), &Vec::new(), t1, t2)
}
