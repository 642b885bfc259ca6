//! Proof model
//!
//! A proof is a declared witness relating types:
//!
//! | variant      | relation                   | implicit (`coerce`) |
//! |--------------|----------------------------|---------------------|
//! | `Given`      | `→ to` (no source value)   | no                  |
//! | `Coercion`   | `from ⇒ to`                | yes                 |
//! | `Projection` | members of `to` on `from`  | no                  |
//! | `Refinement` | `from ⇒ to`, validated     | yes                 |
//!
//! The variant set is closed. Dispatch goes through `match` or
//! [`Proof::fold`], both of which force every variant to be handled.
//! Identity is structural: two proofs with equal fields are the same proof.

use serde::{Deserialize, Serialize};

use crate::callable::{Callable, FunctionRef, Symbol};
use crate::error::{ProofError, ReprResult};
use crate::types::Type;

/// A default instance of `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GivenProof {
    pub to: Type,
    pub through: Callable,
}

/// An implicit conversion `from ⇒ to`, eligible for compiler-inserted calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoercionProof {
    pub from: Type,
    pub to: Type,
    pub through: FunctionRef,
}

/// Members of `to` made visible on values of `from`, without conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectionProof {
    pub from: Type,
    pub to: Type,
    pub through: FunctionRef,
}

/// A validated narrowing of `from` to the stricter `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefinementProof {
    pub from: Type,
    pub to: Type,
    pub through: Callable,
}

impl CoercionProof {
    pub const COERCE: bool = true;
}

impl ProjectionProof {
    pub const COERCE: bool = false;
}

impl RefinementProof {
    pub const COERCE: bool = true;
}

/// Variant tag, for logging and counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProofKind {
    Given,
    Coercion,
    Projection,
    Refinement,
}

impl ProofKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::Coercion => "coercion",
            Self::Projection => "projection",
            Self::Refinement => "refinement",
        }
    }
}

impl std::fmt::Display for ProofKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared proof.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Proof {
    Given(GivenProof),
    Coercion(CoercionProof),
    Projection(ProjectionProof),
    Refinement(RefinementProof),
}

impl Proof {
    /// Exhaustive dispatch over the four variants.
    pub fn fold<'a, A>(
        &'a self,
        given: impl FnOnce(&'a GivenProof) -> A,
        coercion: impl FnOnce(&'a CoercionProof) -> A,
        projection: impl FnOnce(&'a ProjectionProof) -> A,
        refinement: impl FnOnce(&'a RefinementProof) -> A,
    ) -> A {
        match self {
            Self::Given(p) => given(p),
            Self::Coercion(p) => coercion(p),
            Self::Projection(p) => projection(p),
            Self::Refinement(p) => refinement(p),
        }
    }

    pub const fn kind(&self) -> ProofKind {
        match self {
            Self::Given(_) => ProofKind::Given,
            Self::Coercion(_) => ProofKind::Coercion,
            Self::Projection(_) => ProofKind::Projection,
            Self::Refinement(_) => ProofKind::Refinement,
        }
    }

    /// Produced type
    pub fn to_type(&self) -> &Type {
        self.fold(|p| &p.to, |p| &p.to, |p| &p.to, |p| &p.to)
    }

    /// Source type; givens have none
    pub fn from_type(&self) -> Option<&Type> {
        self.fold(
            |_| None,
            |p| Some(&p.from),
            |p| Some(&p.from),
            |p| Some(&p.from),
        )
    }

    /// Is the proof eligible for implicit, compiler-inserted use?
    pub fn coerce(&self) -> bool {
        self.fold(
            |_| false,
            |_| CoercionProof::COERCE,
            |_| ProjectionProof::COERCE,
            |_| RefinementProof::COERCE,
        )
    }

    /// Name of the backing declaration
    pub fn through_name(&self) -> Symbol {
        self.fold(
            |p| p.through.name(),
            |p| p.through.name,
            |p| p.through.name,
            |p| p.through.name(),
        )
    }

    /// The concrete invokable behind this proof.
    ///
    /// Properties resolve to their getter and classes to their primary
    /// constructor. A property without a getter or a class without a primary
    /// constructor is a malformed declaration and yields
    /// [`ProofError::UnsupportedWitness`].
    pub fn witness_callable(&self) -> ReprResult<&FunctionRef> {
        self.fold(
            |p| resolve_witness(&p.through),
            |p| Ok(&p.through),
            |p| Ok(&p.through),
            |p| resolve_witness(&p.through),
        )
    }

    pub fn as_extension(&self) -> Option<ExtensionProof> {
        match self {
            Self::Coercion(p) => Some(ExtensionProof::Coercion(p.clone())),
            Self::Projection(p) => Some(ExtensionProof::Projection(p.clone())),
            Self::Given(_) | Self::Refinement(_) => None,
        }
    }

    pub fn as_given(&self) -> Option<&GivenProof> {
        match self {
            Self::Given(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_refinement(&self) -> Option<&RefinementProof> {
        match self {
            Self::Refinement(p) => Some(p),
            _ => None,
        }
    }
}

fn resolve_witness(callable: &Callable) -> ReprResult<&FunctionRef> {
    match callable {
        Callable::Function(f) => Ok(f),
        Callable::Property(p) => p
            .getter
            .as_ref()
            .ok_or(ProofError::UnsupportedWitness {
                name: p.name,
                reason: "property has no getter",
            }),
        Callable::Class(c) => c
            .primary_constructor
            .as_ref()
            .ok_or(ProofError::UnsupportedWitness {
                name: c.name,
                reason: "class has no primary constructor",
            }),
    }
}

/// The proofs that relate a source type to a target type through a
/// one-argument function: coercions and projections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtensionProof {
    Coercion(CoercionProof),
    Projection(ProjectionProof),
}

impl ExtensionProof {
    pub fn from_type(&self) -> &Type {
        match self {
            Self::Coercion(p) => &p.from,
            Self::Projection(p) => &p.from,
        }
    }

    pub fn to_type(&self) -> &Type {
        match self {
            Self::Coercion(p) => &p.to,
            Self::Projection(p) => &p.to,
        }
    }

    pub fn through(&self) -> &FunctionRef {
        match self {
            Self::Coercion(p) => &p.through,
            Self::Projection(p) => &p.through,
        }
    }

    pub const fn coerce(&self) -> bool {
        match self {
            Self::Coercion(_) => CoercionProof::COERCE,
            Self::Projection(_) => ProjectionProof::COERCE,
        }
    }

    pub fn into_proof(self) -> Proof {
        match self {
            Self::Coercion(p) => Proof::Coercion(p),
            Self::Projection(p) => Proof::Projection(p),
        }
    }
}

impl TryFrom<Proof> for ExtensionProof {
    type Error = ProofError;

    fn try_from(proof: Proof) -> Result<Self, Self::Error> {
        match proof {
            Proof::Coercion(p) => Ok(Self::Coercion(p)),
            Proof::Projection(p) => Ok(Self::Projection(p)),
            other => Err(ProofError::NotAnExtension { kind: other.kind() }),
        }
    }
}

impl From<ExtensionProof> for Proof {
    fn from(p: ExtensionProof) -> Self {
        p.into_proof()
    }
}
