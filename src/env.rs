//! The definition environment: the registry of named declarations that the
//! delta and special reducers consult.
//!
//! Two lookup shapes share one contract (`fetch`): a global, layered
//! [`Environment`] — a stack of scopes, innermost first, used by elaboration
//! to push a scratch scope over a stable base without mutating it — and a
//! flat [`LocalEnv`] used when delta reduction is asked to resolve only
//! against a throwaway scratch environment.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::term::Term;

/// A formal parameter: its name and declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Term,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Term) -> Param {
        Param { name: name.into(), ty }
    }
}

/// The current binding scope, as an ordered list of (name, type) pairs.
/// Needed only by special reducers, which may inspect it when computing.
pub type Context = Vec<(String, Term)>;

/// A host-side function implementing a [`Special`](DeclKind::Special)'s
/// reduction rule. `Send + Sync` so that an environment containing specials
/// may be shared across threads normalizing independent terms concurrently.
pub type SpecialFn = Arc<dyn Fn(&Environment, &Context, &[Term]) -> Result<Term> + Send + Sync>;

/// The unfolding behaviour associated with a declaration's tag.
#[derive(Clone)]
pub enum DeclKind {
    /// Unfolds to its (possibly partially applied) body at delta time.
    /// `None` models a corrupt declaration (registered without a body);
    /// unfolding one is fatal.
    Definition { body: Option<Term> },
    /// Opaque once proved; unfolding a theorem with no proof is fatal.
    Theorem { proof: Option<Term> },
    /// Never unfolds.
    Axiom,
    /// Reduces by invoking a host function at special-reduction time.
    Special { handler: SpecialFn },
}

impl fmt::Debug for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclKind::Definition { body } => {
                f.debug_struct("Definition").field("body", body).finish()
            }
            DeclKind::Theorem { proof } => f.debug_struct("Theorem").field("proof", proof).finish(),
            DeclKind::Axiom => write!(f, "Axiom"),
            DeclKind::Special { .. } => write!(f, "Special {{ .. }}"),
        }
    }
}

/// A named declaration: a definition, theorem, axiom, or special.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: String,
    pub params: Vec<Param>,
    pub kind: DeclKind,
}

impl Declaration {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn definition(name: impl Into<String>, params: Vec<Param>, body: Option<Term>) -> Declaration {
        Declaration {
            name: name.into(),
            params,
            kind: DeclKind::Definition { body },
        }
    }

    pub fn theorem(name: impl Into<String>, params: Vec<Param>, proof: Option<Term>) -> Declaration {
        Declaration {
            name: name.into(),
            params,
            kind: DeclKind::Theorem { proof },
        }
    }

    pub fn axiom(name: impl Into<String>, params: Vec<Param>) -> Declaration {
        Declaration {
            name: name.into(),
            params,
            kind: DeclKind::Axiom,
        }
    }

    pub fn special(name: impl Into<String>, params: Vec<Param>, handler: SpecialFn) -> Declaration {
        Declaration {
            name: name.into(),
            params,
            kind: DeclKind::Special { handler },
        }
    }
}

/// The result of looking a name up in an environment.
pub enum Fetch<'a> {
    Found(&'a Declaration),
    NotFound,
}

impl<'a> Fetch<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, Fetch::Found(_))
    }
}

/// Anything that can answer `fetch(name)`. Implemented by both the layered
/// [`Environment`] and the flat [`LocalEnv`] so the delta reducer can be
/// generic over lookup mode.
pub trait Lookup {
    fn fetch(&self, name: &str) -> Fetch<'_>;
}

/// A layered registry of declarations: a stack of scopes, searched innermost
/// (last pushed) first. Immutable during a normalization call; a caller
/// builds one, shares it behind an `Arc` if normalizing concurrently, and
/// never mutates it while a reduction is in flight.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    layers: Vec<HashMap<String, Declaration>>,
}

impl Environment {
    pub fn new() -> Environment {
        Environment { layers: vec![HashMap::new()] }
    }

    /// Pushes a fresh, empty scope on top of the current one. Declarations
    /// registered after this call shadow same-named declarations below it
    /// until [`Environment::pop_scope`] removes it.
    pub fn push_scope(&mut self) {
        self.layers.push(HashMap::new());
    }

    /// Removes the innermost scope. Panics if called on the base scope,
    /// mirroring the invariant that every `push_scope` is paired with a pop.
    pub fn pop_scope(&mut self) {
        assert!(self.layers.len() > 1, "cannot pop the base environment scope");
        self.layers.pop();
    }

    /// Registers `decl` in the innermost scope under its own name.
    pub fn register(&mut self, decl: Declaration) {
        let name = decl.name.clone();
        self.layers
            .last_mut()
            .expect("environment always has at least one scope")
            .insert(name, decl);
    }
}

impl Lookup for Environment {
    fn fetch(&self, name: &str) -> Fetch<'_> {
        for layer in self.layers.iter().rev() {
            if let Some(decl) = layer.get(name) {
                return Fetch::Found(decl);
            }
        }
        Fetch::NotFound
    }
}

/// A flat, single-map environment with no layering, used when delta
/// reduction is asked to resolve only against a scratch environment (e.g.
/// parse-time name resolution reusing the delta machinery).
#[derive(Debug, Clone, Default)]
pub struct LocalEnv {
    decls: HashMap<String, Declaration>,
}

impl LocalEnv {
    pub fn new() -> LocalEnv {
        LocalEnv { decls: HashMap::new() }
    }

    pub fn register(&mut self, decl: Declaration) {
        self.decls.insert(decl.name.clone(), decl);
    }
}

impl Lookup for LocalEnv {
    fn fetch(&self, name: &str) -> Fetch<'_> {
        match self.decls.get(name) {
            Some(decl) => Fetch::Found(decl),
            None => Fetch::NotFound,
        }
    }
}
