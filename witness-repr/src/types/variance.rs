//! Variance of nominal type parameters
//!
//! ```text
//!   +  covariant      T <: U implies F<T> <: F<U>
//!   -  contravariant  T <: U implies F<U> <: F<T>
//!   =  invariant      arguments must be equal
//!   ±  bivariant      argument ignored
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::TypeName;

/// Declared variance of one type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variance {
    /// `+T`
    Covariant,
    /// `-T`
    Contravariant,
    /// `=T`
    #[default]
    Invariant,
    /// `±T`
    Bivariant,
}

impl Variance {
    /// Format as symbol
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Covariant => "+",
            Self::Contravariant => "-",
            Self::Invariant => "=",
            Self::Bivariant => "±",
        }
    }
}

impl std::fmt::Display for Variance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Variance environment: nominal head to the variance of each parameter.
pub type VarianceEnv = FxHashMap<TypeName, Vec<Variance>>;

/// Variance of parameter `index` of `head`. Undeclared heads and positions
/// are invariant.
#[must_use]
pub fn param_variance(env: &VarianceEnv, head: TypeName, index: usize) -> Variance {
    env.get(&head)
        .and_then(|vs| vs.get(index))
        .copied()
        .unwrap_or(Variance::Invariant)
}

/// Creates the default variance environment for common read-only
/// collections and function shapes.
///
/// # Arguments
/// * `intern` - A closure that interns a string and returns a `TypeName`
#[must_use]
pub fn default_variance_env<F>(mut intern: F) -> VarianceEnv
where
    F: FnMut(&str) -> TypeName,
{
    let mut env = VarianceEnv::default();

    for name in ["Option", "List", "Set", "Sequence", "Iterable", "Collection", "Lazy"] {
        env.insert(intern(name), vec![Variance::Covariant]);
    }

    for name in ["MutableList", "MutableSet", "Array", "Cell"] {
        env.insert(intern(name), vec![Variance::Invariant]);
    }

    for name in ["Pair", "Either", "Result"] {
        env.insert(intern(name), vec![Variance::Covariant, Variance::Covariant]);
    }

    // Read-only map: keys invariant, values covariant
    env.insert(intern("Map"), vec![Variance::Invariant, Variance::Covariant]);

    env.insert(intern("Comparator"), vec![Variance::Contravariant]);

    // Function1<A, R> = (A) -> R
    env.insert(
        intern("Function1"),
        vec![Variance::Contravariant, Variance::Covariant],
    );

    env
}
