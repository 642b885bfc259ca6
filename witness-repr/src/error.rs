//! Error types for the representation crate

use thiserror::Error;

use crate::callable::Symbol;
use crate::proof::ProofKind;

/// Result type alias for repr operations
pub type ReprResult<T> = Result<T, ProofError>;

/// Defects in proof data handed to the resolver.
///
/// These indicate a declaration that should have been rejected upstream;
/// absence of a proof is never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    /// The backing declaration cannot be invoked
    #[error("unsupported proof witness {name:?}: {reason}")]
    UnsupportedWitness {
        name: Symbol,
        reason: &'static str,
    },

    /// A coercion or projection was required
    #[error("{kind} proof is not an extension proof")]
    NotAnExtension { kind: ProofKind },
}
