//! witness - proof resolution for ad-hoc polymorphism
//!
//! Given a catalogue of declared proofs (givens, coercions, projections and
//! refinements), answers which proofs apply to a queried pair of types, or to
//! a single type for givens. Results come back in declaration order so the
//! host can take the first match or diagnose ambiguity with a stable policy.
//!
//! # Modules
//!
//! - [`host`] - collaborator traits implemented by the host compiler
//! - [`matcher`] - pure candidate filtering against a query
//! - [`cache`] - per-unit catalogue cache with single-build semantics
//! - [`resolve`] - the query façade, [`ResolutionContext`]
//! - [`scanner`] - a marker-driven [`CatalogueBuilder`]
//! - [`oracle`] - a nominal reference [`SubtypeOracle`]
//! - [`config`] - [`ResolverConfig`] loading and validation
//!
//! The data model lives in the `witness-repr` crate and is re-exported here.
//!
//! # Example
//!
//! ```ignore
//! use witness::{ProofCache, ResolutionContext, UnitId};
//!
//! let ctx = ResolutionContext::new(UnitId::new(1), &checker, &scanner)
//!     .with_cache(&cache);
//! if let Some(proof) = ctx.coerce_proof(&int, &string) {
//!     insert_call(proof.through());
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod host;
pub mod matcher;
pub mod oracle;
pub mod resolve;
pub mod scanner;

pub use cache::{CacheStats, ProofCache, UnitId};
pub use config::{MarkerNames, ResolverConfig, CONFIG_FILE_NAME};
pub use error::{BuildError, ConfigError, Result, WitnessError};
pub use host::{CatalogueBuilder, DeclarationSource, MemberScope, SubtypeOracle};
pub use matcher::{matches_pair, matches_single, matching_pairs, matching_single, Candidate};
pub use oracle::NominalOracle;
pub use resolve::ResolutionContext;
pub use scanner::MarkerScanner;

pub use witness_repr;
pub use witness_repr::{
    is_proof_declaration, Callable, Catalogue, ClassRef, CoercionProof, ExtensionProof,
    FunctionRef, GivenProof, MarkerKind, ProjectionProof, Proof, ProofError, ProofKind,
    ProofMarkers, PropertyRef, RefinementProof, Substitution, Symbol, Type, TypeName, TypeVar,
    Variance, VarianceEnv,
};
