//! Reference subtype oracle for nominal types with declared variance.
//!
//! Hosts normally plug in their own type checker. `NominalOracle` covers the
//! cases where none is at hand (tests, benchmarks, small embedders):
//!
//! ```text
//!   τ <: τ                       reflexive
//!   τ <: ⊤?   ⊥ <: τ             lattice ends
//!   σ? <: τ?  iff σ <: τ
//!   σ  <: τ?  iff σ <: τ         (σ non-null)
//!   C<σ..> <: C<τ..>             pointwise, per declared variance
//!   C<σ..> <: D<τ..>             through C's declared supertypes
//!   (σ..) → ρ <: (τ..) → υ       params contravariant, return covariant
//! ```
//!
//! Type parameters are rigid: a `Var` is only a subtype of itself, `⊤?`, or
//! a nullable of itself.

use rustc_hash::FxHashMap;
use tracing::trace;
use witness_repr::types::{param_variance, DEFAULT_MAX_DEPTH};
use witness_repr::{Substitution, Type, TypeName, TypeVar, Variance, VarianceEnv};

use crate::host::SubtypeOracle;

/// Declared direct supertypes of a nominal head, over its own parameters.
#[derive(Debug, Clone, Default)]
struct Supertypes {
    params: Vec<TypeVar>,
    supers: Vec<Type>,
}

/// Subtype relation over declared nominal hierarchies.
#[derive(Debug, Clone)]
pub struct NominalOracle {
    hierarchy: FxHashMap<TypeName, Supertypes>,
    variance: VarianceEnv,
    max_depth: usize,
}

impl Default for NominalOracle {
    fn default() -> Self {
        Self::new(VarianceEnv::default())
    }
}

impl NominalOracle {
    pub fn new(variance: VarianceEnv) -> Self {
        Self {
            hierarchy: FxHashMap::default(),
            variance,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Declare `name<params>` with direct supertypes written over `params`,
    /// e.g. `ArrayList<A> : List<A>, RandomAccess`.
    pub fn declare(&mut self, name: TypeName, params: Vec<TypeVar>, supers: Vec<Type>) -> &mut Self {
        self.hierarchy.insert(name, Supertypes { params, supers });
        self
    }

    /// Set the variance of `name`'s parameters.
    pub fn set_variance(&mut self, name: TypeName, variance: Vec<Variance>) -> &mut Self {
        self.variance.insert(name, variance);
        self
    }

    pub fn variance_env(&self) -> &VarianceEnv {
        &self.variance
    }

    fn check(&self, sub: &Type, sup: &Type, depth: usize) -> bool {
        if depth > self.max_depth {
            trace!(depth, "subtype check exceeded depth bound");
            return false;
        }
        if sub == sup {
            return true;
        }

        match (sub, sup) {
            (_, Type::Top) | (Type::Nothing, _) => true,
            (Type::Top, _) => false,

            (Type::Nullable(a), Type::Nullable(b)) => self.check(a, b, depth + 1),
            (Type::Nullable(_), _) => false,
            (_, Type::Nullable(b)) => self.check(sub, b, depth + 1),

            (Type::Var(_), _) | (_, Type::Var(_)) => false,

            (Type::Con { name: n1, args: a1 }, Type::Con { name: n2, args: a2 })
                if n1 == n2 && a1.len() == a2.len() =>
            {
                a1.iter()
                    .zip(a2.iter())
                    .enumerate()
                    .all(|(i, (a, b))| {
                        self.argument(param_variance(&self.variance, *n1, i), a, b, depth)
                    })
            }

            (Type::Con { name, args }, Type::Con { .. }) => self
                .direct_supertypes(*name, args)
                .iter()
                .any(|st| self.check(st, sup, depth + 1)),

            (Type::Func { params: p1, ret: r1 }, Type::Func { params: p2, ret: r2 }) => {
                p1.len() == p2.len()
                    && p1
                        .iter()
                        .zip(p2.iter())
                        .all(|(a, b)| self.check(b, a, depth + 1))
                    && self.check(r1, r2, depth + 1)
            }

            _ => false,
        }
    }

    fn argument(&self, variance: Variance, a: &Type, b: &Type, depth: usize) -> bool {
        match variance {
            Variance::Covariant => self.check(a, b, depth + 1),
            Variance::Contravariant => self.check(b, a, depth + 1),
            Variance::Invariant => a == b,
            Variance::Bivariant => true,
        }
    }

    /// Supertypes of `name<args>`, instantiated with `args`.
    fn direct_supertypes(&self, name: TypeName, args: &[Type]) -> Vec<Type> {
        let Some(entry) = self.hierarchy.get(&name) else {
            return Vec::new();
        };
        if entry.params.len() != args.len() {
            return Vec::new();
        }

        let mut subst = Substitution::new();
        for (param, arg) in entry.params.iter().zip(args.iter()) {
            subst.bind(*param, arg.clone());
        }
        entry.supers.iter().map(|st| subst.apply(st)).collect()
    }
}

impl SubtypeOracle for NominalOracle {
    fn is_subtype_of(&self, sub: &Type, sup: &Type) -> bool {
        self.check(sub, sup, 0)
    }
}
