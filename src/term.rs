//! The term algebra and structural predicates.
//!
//! A [`Term`] is an immutable value tree. Every reduction in this crate
//! produces a new tree rather than mutating an existing one; subtrees may be
//! shared between an input and its output, but callers must never assume
//! exclusive ownership of a term handed back from a reduction.

use std::collections::HashSet;
use std::fmt;

/// The two universes of the underlying Pure Type System.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Sort {
    /// `*`, the sort of types.
    Type,
    /// `□`, the sort of kinds.
    Kind,
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Type => write!(f, "*"),
            Sort::Kind => write!(f, "\u{25a1}"),
        }
    }
}

/// Which binder a [`Term::Lambda`]/[`Term::Product`] node represents.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Binder {
    /// `λ`, term abstraction.
    Lambda,
    /// `Π`, dependent function type.
    Product,
}

/// A term in the dependent-type lambda calculus.
///
/// Application is strictly binary; a surface multi-argument application is
/// represented as nested, left-associative [`Term::App`] nodes. [`Term::Ref`]
/// is the exception: it carries a flat argument list for the named
/// declaration it stands for, since a declaration's arity is a property of
/// the environment, not of the term shape.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Term {
    /// A free or bound variable occurrence.
    Variable(String),
    /// A universe.
    Sort(Sort),
    /// `λ(x : dom). body` or `Π(x : dom). body`, depending on `binder`.
    Binder {
        binder: Binder,
        var: String,
        dom: Box<Term>,
        body: Box<Term>,
    },
    /// `fun arg`.
    App(Box<Term>, Box<Term>),
    /// An applied occurrence of a named declaration.
    Ref(String, Vec<Term>),
}

impl Term {
    pub fn var(name: impl Into<String>) -> Term {
        Term::Variable(name.into())
    }

    pub fn sort(sort: Sort) -> Term {
        Term::Sort(sort)
    }

    pub fn lambda(var: impl Into<String>, dom: Term, body: Term) -> Term {
        Term::Binder {
            binder: Binder::Lambda,
            var: var.into(),
            dom: Box::new(dom),
            body: Box::new(body),
        }
    }

    pub fn product(var: impl Into<String>, dom: Term, body: Term) -> Term {
        Term::Binder {
            binder: Binder::Product,
            var: var.into(),
            dom: Box::new(dom),
            body: Box::new(body),
        }
    }

    pub fn app(fun: Term, arg: Term) -> Term {
        Term::App(Box::new(fun), Box::new(arg))
    }

    /// Builds a left-associative chain of applications, `f a1 a2 ... an`.
    pub fn apps(fun: Term, args: impl IntoIterator<Item = Term>) -> Term {
        args.into_iter().fold(fun, Term::app)
    }

    pub fn reference(name: impl Into<String>, args: Vec<Term>) -> Term {
        Term::Ref(name.into(), args)
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn is_sort(&self) -> bool {
        matches!(self, Term::Sort(_))
    }

    pub fn is_lambda(&self) -> bool {
        matches!(
            self,
            Term::Binder {
                binder: Binder::Lambda,
                ..
            }
        )
    }

    pub fn is_product(&self) -> bool {
        matches!(
            self,
            Term::Binder {
                binder: Binder::Product,
                ..
            }
        )
    }

    pub fn is_binder(&self) -> bool {
        matches!(self, Term::Binder { .. })
    }

    pub fn is_app(&self) -> bool {
        matches!(self, Term::App(_, _))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Term::Ref(_, _))
    }

    /// Destructures a binder, failing if `self` is not one.
    pub fn as_binder(&self) -> crate::error::Result<(Binder, &str, &Term, &Term)> {
        match self {
            Term::Binder {
                binder,
                var,
                dom,
                body,
            } => Ok((*binder, var.as_str(), dom, body)),
            other => Err(crate::error::CoreError::BadTerm(other.clone())),
        }
    }

    /// The exact set of free variable names occurring in `self`.
    pub fn free_variables(&self) -> HashSet<String> {
        let mut out = HashSet::new();
        collect_free_variables(self, &mut out);
        out
    }

    /// `true` iff `name` occurs free anywhere in `self`.
    pub fn is_free(&self, name: &str) -> bool {
        match self {
            Term::Variable(v) => v == name,
            Term::Sort(_) => false,
            Term::Binder { var, dom, body, .. } => dom.is_free(name) || (var != name && body.is_free(name)),
            Term::App(fun, arg) => fun.is_free(name) || arg.is_free(name),
            Term::Ref(_, args) => args.iter().any(|a| a.is_free(name)),
        }
    }
}

fn collect_free_variables(term: &Term, out: &mut HashSet<String>) {
    match term {
        Term::Variable(v) => {
            out.insert(v.clone());
        }
        Term::Sort(_) => {}
        Term::Binder { var, dom, body, .. } => {
            collect_free_variables(dom, out);
            let mut body_vars = HashSet::new();
            collect_free_variables(body, &mut body_vars);
            body_vars.remove(var);
            out.extend(body_vars);
        }
        Term::App(fun, arg) => {
            collect_free_variables(fun, out);
            collect_free_variables(arg, out);
        }
        Term::Ref(_, args) => {
            for a in args {
                collect_free_variables(a, out);
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{v}"),
            Term::Sort(s) => write!(f, "{s}"),
            Term::Binder {
                binder,
                var,
                dom,
                body,
            } => {
                let symbol = match binder {
                    Binder::Lambda => "\u{3bb}",
                    Binder::Product => "\u{3a0}",
                };
                write!(f, "({symbol} {var}:{dom} . {body})")
            }
            Term::App(fun, arg) => write!(f, "({fun} {arg})"),
            Term::Ref(name, args) => {
                if args.is_empty() {
                    write!(f, "{name}")
                } else {
                    write!(f, "{name}[")?;
                    for (i, a) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{a}")?;
                    }
                    write!(f, "]")
                }
            }
        }
    }
}
