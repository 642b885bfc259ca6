//! One-sided type matching
//!
//! A declared proof type is a pattern: its type parameters are solvable.
//! The queried type is rigid, including any type parameters of its own.
//! Matching either extends the substitution, rejects the pair outright, or
//! leaves a ground disagreement for the host subtype oracle to settle.
//!
//! Rules, applied structurally:
//!
//! | pattern        | target         | result                                 |
//! |----------------|----------------|----------------------------------------|
//! | `α`            | `τ`            | bind `α ↦ τ` (or check earlier binding) |
//! | `α`, fixed     | `τ`            | defer                                   |
//! | `C<p..>`       | `C<t..>`       | arities agree, match pointwise          |
//! | `C<p..>`, n>0  | `D<t..>`       | reject                                  |
//! | `C`            | `D`            | defer                                   |
//! | `p?`           | `t?`           | match `p`, `t`                          |
//! | `p?`           | `t`            | match `p`, `t`                          |
//! | `p`            | `t?`           | match `p`, `t`                          |
//! | `(p..) → r`    | `(t..) → s`    | arities agree, match pointwise          |
//! | anything else  |                | defer                                   |
//!
//! A fixed parameter is one the caller has already solved elsewhere; it is
//! left for the oracle instead of being re-bound (see [`match_open`]).

use thiserror::Error;

use super::{Substitution, Type, TypeName, TypeVar};

/// Default recursion bound for matching
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Why a declared type cannot match a queried type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Parameterised declared type with a different nominal head
    #[error("head mismatch: declared {declared:?}, found {found:?}")]
    HeadMismatch { declared: TypeName, found: TypeName },

    /// Same head or function shape, different number of arguments
    #[error("arity mismatch: expected {expected}, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// A type parameter would need two different instantiations
    #[error("conflicting instantiation for type parameter {var:?}")]
    ConflictingBinding { var: TypeVar },

    /// Nesting deeper than the configured bound
    #[error("type nesting exceeds depth {limit}")]
    DepthExceeded { limit: usize },
}

/// Match `pattern` against `target`, extending `subst`.
///
/// On `Err`, `subst` may hold partial bindings and should be discarded.
pub fn match_types(
    pattern: &Type,
    target: &Type,
    subst: &mut Substitution,
    max_depth: usize,
) -> Result<(), MatchError> {
    match_at(pattern, target, subst, &|_| true, 0, max_depth)
}

/// Match `pattern` against `target`, solving only the parameters in `open`.
///
/// Any other variable in `pattern` is treated as already fixed and its
/// position is deferred to the oracle. `target` stays rigid throughout, so a
/// query variable sharing a name with a pattern parameter is never bound.
pub fn match_open(
    pattern: &Type,
    target: &Type,
    open: &[TypeVar],
    subst: &mut Substitution,
    max_depth: usize,
) -> Result<(), MatchError> {
    match_at(pattern, target, subst, &|v| open.contains(&v), 0, max_depth)
}

fn match_at(
    pattern: &Type,
    target: &Type,
    subst: &mut Substitution,
    solvable: &dyn Fn(TypeVar) -> bool,
    depth: usize,
    limit: usize,
) -> Result<(), MatchError> {
    if depth > limit {
        return Err(MatchError::DepthExceeded { limit });
    }

    match (pattern, target) {
        (Type::Var(v), _) if !solvable(*v) => Ok(()),

        (Type::Var(v), _) => match subst.get(*v) {
            Some(bound) if bound == target => Ok(()),
            Some(_) => Err(MatchError::ConflictingBinding { var: *v }),
            None => {
                subst.bind(*v, target.clone());
                Ok(())
            }
        },

        (
            Type::Con { name: n1, args: a1 },
            Type::Con { name: n2, args: a2 },
        ) => {
            if n1 != n2 {
                return if a1.is_empty() {
                    Ok(())
                } else {
                    Err(MatchError::HeadMismatch {
                        declared: *n1,
                        found: *n2,
                    })
                };
            }
            if a1.len() != a2.len() {
                return Err(MatchError::ArityMismatch {
                    expected: a1.len(),
                    found: a2.len(),
                });
            }
            for (p, t) in a1.iter().zip(a2.iter()) {
                match_at(p, t, subst, solvable, depth + 1, limit)?;
            }
            Ok(())
        }

        (Type::Nullable(p), Type::Nullable(t)) => match_at(p, t, subst, solvable, depth + 1, limit),

        // T can stand where T? is declared
        (Type::Nullable(p), t) if !matches!(t, Type::Top) => {
            match_at(p, t, subst, solvable, depth + 1, limit)
        }

        // T is usable where T? is expected
        (p, Type::Nullable(t)) => match_at(p, t, subst, solvable, depth + 1, limit),

        (
            Type::Func { params: p1, ret: r1 },
            Type::Func { params: p2, ret: r2 },
        ) => {
            if p1.len() != p2.len() {
                return Err(MatchError::ArityMismatch {
                    expected: p1.len(),
                    found: p2.len(),
                });
            }
            for (p, t) in p1.iter().zip(p2.iter()) {
                match_at(p, t, subst, solvable, depth + 1, limit)?;
            }
            match_at(r1, r2, subst, solvable, depth + 1, limit)
        }

        // Ground disagreement: the subtype oracle decides
        _ => Ok(()),
    }
}
