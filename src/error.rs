//! Error types for proof resolution.
//!
//! Absence of a proof is not an error anywhere in this crate; queries
//! return `None` or an empty `Vec`. The types here cover configuration,
//! catalogue construction and malformed proof data.

use std::path::PathBuf;

use thiserror::Error;
use witness_repr::{ProofError, Symbol};

use crate::cache::UnitId;

// ---------------------------------------------------------------------------
// Catalogue construction
// ---------------------------------------------------------------------------

/// Failure while building the proof catalogue of a unit.
///
/// The cache never propagates these: a failed build is logged and the unit
/// gets an empty catalogue.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("declaration scan failed for {unit}: {detail}")]
    Scan { unit: UnitId, detail: String },

    #[error("malformed {} declaration {name:?}: {detail}", .marker.as_str())]
    Malformed {
        marker: witness_repr::MarkerKind,
        name: Symbol,
        detail: String,
    },

    #[error("{0} was discarded by the host")]
    UnitDiscarded(UnitId),

    #[error("host error: {0}")]
    Host(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BuildError {
    /// Create a scan error
    pub fn scan(unit: UnitId, detail: impl Into<String>) -> Self {
        Self::Scan {
            unit,
            detail: detail.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Errors loading or validating a [`ResolverConfig`](crate::ResolverConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Top level
// ---------------------------------------------------------------------------

/// Main error type for the witness crate.
#[derive(Error, Debug)]
pub enum WitnessError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("catalogue build error: {0}")]
    Build(#[from] BuildError),

    #[error("proof error: {0}")]
    Proof(#[from] ProofError),
}

pub type Result<T> = std::result::Result<T, WitnessError>;
