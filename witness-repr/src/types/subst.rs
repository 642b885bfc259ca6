//! Type substitution
//!
//! A substitution maps declaration type parameters to query types. It is
//! applied in a single simultaneous pass: the image of a binding is never
//! substituted again, so a rigid query variable that happens to share a name
//! with a declaration parameter is left alone.

use rustc_hash::FxHashMap;

use super::{Type, TypeVar};

/// Mapping from type parameters to types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: FxHashMap<TypeVar, Type>,
}

impl Substitution {
    /// Create an empty substitution
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a binding
    #[must_use]
    pub fn get(&self, var: TypeVar) -> Option<&Type> {
        self.bindings.get(&var)
    }

    /// Bind `var` to `ty`, returning the previous binding if any.
    pub fn bind(&mut self, var: TypeVar, ty: Type) -> Option<Type> {
        self.bindings.insert(var, ty)
    }

    #[must_use]
    pub fn contains(&self, var: TypeVar) -> bool {
        self.bindings.contains_key(&var)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Apply the substitution to a type.
    #[must_use]
    pub fn apply(&self, ty: &Type) -> Type {
        if self.bindings.is_empty() {
            return ty.clone();
        }
        apply_substitution(ty, &self.bindings)
    }

    /// Apply the substitution, then replace any parameter left unbound with
    /// the nullable top type (the implicit upper bound of a parameter).
    #[must_use]
    pub fn apply_closed(&self, ty: &Type) -> Type {
        let unbound: Vec<TypeVar> = ty
            .free_vars()
            .into_iter()
            .filter(|v| !self.contains(*v))
            .collect();
        if unbound.is_empty() {
            return self.apply(ty);
        }
        // Close in the same pass so images are never revisited.
        let mut closed = self.bindings.clone();
        closed.extend(unbound.into_iter().map(|v| (v, Type::Top)));
        apply_substitution(ty, &closed)
    }
}

/// Apply a substitution map to a type, replacing type variables with their
/// bindings. Single pass; bindings are not applied to their own images.
#[must_use]
pub fn apply_substitution(ty: &Type, subst: &FxHashMap<TypeVar, Type>) -> Type {
    match ty {
        Type::Var(v) => subst.get(v).cloned().unwrap_or_else(|| ty.clone()),
        Type::Top | Type::Nothing => ty.clone(),
        Type::Con { name, args } => Type::Con {
            name: *name,
            args: args.iter().map(|a| apply_substitution(a, subst)).collect(),
        },
        Type::Func { params, ret } => Type::Func {
            params: params.iter().map(|p| apply_substitution(p, subst)).collect(),
            ret: Box::new(apply_substitution(ret, subst)),
        },
        Type::Nullable(inner) => Type::nullable(apply_substitution(inner, subst)),
    }
}
