//! Proof representation
//!
//! Data model shared by the witness resolver and its hosts:
//!
//! - [`types`] - the `Type` shape, substitution, one-sided matching, variance
//! - [`callable`] - functions, properties and classes that back proofs,
//!   and the proof markers that identify them
//! - [`proof`] - the closed four-variant `Proof` model
//! - [`catalogue`] - the ordered proof list of one compilation unit
//!
//! Names are `lasso::Spur`s interned by the host; this crate never owns an
//! interner.

pub mod callable;
pub mod catalogue;
pub mod proof;
pub mod types;
mod error;

pub use callable::{
    is_proof_declaration, Callable, ClassRef, FunctionRef, MarkerKind, ProofMarkers, PropertyRef,
    Symbol,
};
pub use catalogue::Catalogue;
pub use error::{ProofError, ReprResult};
pub use proof::{
    CoercionProof, ExtensionProof, GivenProof, ProjectionProof, Proof, ProofKind, RefinementProof,
};
pub use types::{Substitution, Type, TypeName, TypeVar, Variance, VarianceEnv};
