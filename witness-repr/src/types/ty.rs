//! Main `Type` enum with 6 constructors
//!
//! The host type system is projected onto this shape before any proof is
//! matched. Nominal types carry their (possibly empty) argument list, so a
//! non-parameterised class is just `Con { name, args: [] }`.

use lasso::Spur;
use serde::{Deserialize, Serialize};

/// Type variable identifier (interned string)
pub type TypeVar = Spur;

/// Named type reference (interned string)
pub type TypeName = Spur;

/// Type as seen by proof resolution.
///
/// ```text
///   τ ::= ⊤?            nullable top
///       | ⊥             nothing
///       | α             declaration type parameter
///       | C<τ₁..τₙ>     nominal type, n ≥ 0
///       | (τ₁..τₙ) → τ  function type
///       | τ?            nullable
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// Nullable top type `⊤?`: every type is a subtype of it.
    Top,

    /// Bottom type `⊥`: a subtype of every type.
    Nothing,

    /// Type parameter: `A`, `T`
    Var(TypeVar),

    /// Nominal type: `Int`, `List<A>`, `Map<K, V>`
    Con { name: TypeName, args: Vec<Type> },

    /// Function type: `(A, B) -> R`
    Func { params: Vec<Type>, ret: Box<Type> },

    /// Nullable type `T?`
    Nullable(Box<Type>),
}

impl Type {
    /// Create a non-parameterised nominal type
    pub fn named(name: TypeName) -> Self {
        Self::Con {
            name,
            args: Vec::new(),
        }
    }

    /// Create a parameterised nominal type `C<args>`
    pub fn app(name: TypeName, args: Vec<Type>) -> Self {
        Self::Con { name, args }
    }

    /// Create a function type `(params) -> ret`
    pub fn func(params: Vec<Type>, ret: Type) -> Self {
        Self::Func {
            params,
            ret: Box::new(ret),
        }
    }

    /// Create a nullable type `T?`. Nullable of nullable collapses.
    pub fn nullable(inner: Type) -> Self {
        match inner {
            Self::Nullable(_) | Self::Top => inner,
            other => Self::Nullable(Box::new(other)),
        }
    }

    /// The nullable top sentinel, upper bound of every type parameter.
    pub const fn nullable_top() -> Self {
        Self::Top
    }

    /// Type parameters occurring in this type, in first-occurrence order.
    pub fn free_vars(&self) -> Vec<TypeVar> {
        let mut result = Vec::new();
        collect_free_vars(self, &mut result);
        result
    }
}

fn collect_free_vars(ty: &Type, result: &mut Vec<TypeVar>) {
    match ty {
        Type::Var(v) => {
            if !result.contains(v) {
                result.push(*v);
            }
        }
        Type::Top | Type::Nothing => {}
        Type::Con { args, .. } => {
            for a in args {
                collect_free_vars(a, result);
            }
        }
        Type::Func { params, ret } => {
            for p in params {
                collect_free_vars(p, result);
            }
            collect_free_vars(ret, result);
        }
        Type::Nullable(inner) => collect_free_vars(inner, result),
    }
}

impl Default for Type {
    fn default() -> Self {
        Self::Top
    }
}
