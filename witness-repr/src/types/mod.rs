//! Type representation used by proof resolution
//!
//! # Shape
//! Host types are projected onto a small closed enum: nominal constructors
//! with arguments, function types, nullability, type parameters and the two
//! lattice ends (`⊤?` and `⊥`).
//!
//! # Matching
//! Declared proof types are matched one-sided against queried types,
//! producing a [`Substitution`] for the declaration's type parameters.

mod matching;
mod subst;
mod ty;
mod variance;

pub use matching::{match_open, match_types, MatchError, DEFAULT_MAX_DEPTH};
pub use subst::{apply_substitution, Substitution};
pub use ty::{Type, TypeName, TypeVar};
pub use variance::{default_variance_env, param_variance, Variance, VarianceEnv};
