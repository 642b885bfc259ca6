//! Catalogue construction from marked declarations.
//!
//! `MarkerScanner` walks a unit's declarations in source order and turns
//! each one carrying a proof marker into a `Proof`:
//!
//! | marker       | declaration           | proof                                   |
//! |--------------|-----------------------|-----------------------------------------|
//! | `Given`      | function              | `GivenProof(to = return type)`          |
//! | `Given`      | property              | `GivenProof(to = property type)`        |
//! | `Given`      | class                 | `GivenProof(to = C<params>)`            |
//! | `Coercion`   | one-parameter function| `CoercionProof(from = param, to = ret)` |
//! | `Extension`  | one-parameter function| `ProjectionProof(from = param, to = ret)` |
//! | `Refinement` | one-parameter function| `RefinementProof(from = param, to = ret)` |
//!
//! Any other marked shape is malformed. By default it is skipped with a
//! warning; in strict mode the whole scan fails.

use tracing::{debug, warn};
use witness_repr::{
    Callable, Catalogue, CoercionProof, FunctionRef, GivenProof, MarkerKind, ProjectionProof,
    Proof, ProofMarkers, RefinementProof,
};

use crate::cache::UnitId;
use crate::config::ResolverConfig;
use crate::error::BuildError;
use crate::host::{CatalogueBuilder, DeclarationSource};

/// Reference [`CatalogueBuilder`] over a host [`DeclarationSource`].
#[derive(Debug, Clone)]
pub struct MarkerScanner<S> {
    source: S,
    markers: ProofMarkers,
    strict: bool,
}

impl<S: DeclarationSource> MarkerScanner<S> {
    pub fn new(source: S, markers: ProofMarkers) -> Self {
        Self {
            source,
            markers,
            strict: false,
        }
    }

    /// Scanner using the strictness setting of `config`.
    pub fn with_config(source: S, markers: ProofMarkers, config: &ResolverConfig) -> Self {
        Self::new(source, markers).strict(config.strict_scan)
    }

    /// Fail on malformed marked declarations instead of skipping them.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn markers(&self) -> &ProofMarkers {
        &self.markers
    }

    /// Scan `unit` into a catalogue, preserving declaration order.
    pub fn scan(&self, unit: UnitId) -> Result<Catalogue, BuildError> {
        let declarations = self.source.declarations(unit)?;
        let mut proofs = Vec::new();

        for callable in &declarations {
            let Some(kind) = self.markers.marker_kind(callable) else {
                continue;
            };

            match proof_for(kind, callable) {
                Ok(proof) => proofs.push(proof),
                Err(detail) if self.strict => {
                    return Err(BuildError::Malformed {
                        marker: kind,
                        name: callable.name(),
                        detail: detail.to_string(),
                    });
                }
                Err(detail) => {
                    warn!(
                        %unit,
                        marker = kind.as_str(),
                        name = ?callable.name(),
                        "skipping malformed proof declaration: {}",
                        detail
                    );
                }
            }
        }

        debug!(
            "Scanned {} declarations in {}, found {} proofs",
            declarations.len(),
            unit,
            proofs.len()
        );
        Ok(Catalogue::new(proofs))
    }
}

impl<S: DeclarationSource> CatalogueBuilder for MarkerScanner<S> {
    fn build(&self, unit: UnitId) -> Result<Catalogue, BuildError> {
        self.scan(unit)
    }
}

fn proof_for(kind: MarkerKind, callable: &Callable) -> Result<Proof, &'static str> {
    match kind {
        MarkerKind::Given => Ok(Proof::Given(GivenProof {
            to: callable.produced_type(),
            through: callable.clone(),
        })),
        MarkerKind::Coercion => {
            let (from, through) = unary(callable)?;
            Ok(Proof::Coercion(CoercionProof {
                from,
                to: through.ret.clone(),
                through,
            }))
        }
        MarkerKind::Extension => {
            let (from, through) = unary(callable)?;
            Ok(Proof::Projection(ProjectionProof {
                from,
                to: through.ret.clone(),
                through,
            }))
        }
        MarkerKind::Refinement => {
            let (from, through) = unary(callable)?;
            Ok(Proof::Refinement(RefinementProof {
                from,
                to: through.ret.clone(),
                through: Callable::Function(through),
            }))
        }
    }
}

/// The sole parameter and a copy of a one-parameter function.
fn unary(callable: &Callable) -> Result<(witness_repr::Type, FunctionRef), &'static str> {
    let function = callable
        .as_function()
        .ok_or("marker requires a function declaration")?;
    let param = function
        .single_param()
        .ok_or("marker requires exactly one parameter")?;
    Ok((param.clone(), function.clone()))
}
