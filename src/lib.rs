//! The term normalizer and conversion checker for a Pure Type System in the
//! Calculus of Constructions family.
//!
//! This crate is the trust kernel of a proof assistant: it reduces terms
//! under three rewrite relations (beta, delta, special) to a normal form,
//! and decides when two terms are definitionally equal up to
//! alpha-renaming. It does not parse, elaborate, infer types, or search for
//! proofs — it only reduces the terms a caller has already built and
//! decides equality between them.
//!
//! Modules:
//! - [`term`]: the term algebra and structural predicates.
//! - [`subst`]: capture-avoiding substitution and alpha-equivalence.
//! - [`env`]: the definition environment (definitions, theorems, axioms,
//!   specials) in both layered and flat forms.
//! - [`beta`], [`delta`], [`special`]: the three one-step reducers and
//!   their iterated normal-form entry points.
//! - [`normalize`]: the combined strategy and the `beta_eq` conversion
//!   check built on top of it.
//! - [`error`]: the shared fatal-failure taxonomy.

pub mod beta;
pub mod delta;
pub mod env;
pub mod error;
pub mod normalize;
pub mod special;
pub mod subst;
pub mod term;

pub use env::{Context, Declaration, DeclKind, Environment, Fetch, LocalEnv, Lookup, Param, SpecialFn};
pub use error::{CoreError, Result};
pub use normalize::{
    beta_eq, beta_eq_in_env, beta_eq_terms, beta_normalize, delta_normalize, delta_normalize_local,
    normalize, normalize_in_env, normalize_term, normalize_with_fuel, special_normalize, Fuel,
};
pub use subst::{alpha_eq, subst, subst_many};
pub use term::{Binder, Sort, Term};
