//! Capabilities the resolver consumes from the host compiler.
//!
//! - [`SubtypeOracle`] - the host's native subtype relation
//! - [`CatalogueBuilder`] - produces the proof catalogue of a unit
//! - [`DeclarationSource`] - lists the declarations of a unit, for
//!   [`MarkerScanner`](crate::MarkerScanner)
//! - [`MemberScope`] - members contributed by a type
//!
//! Closures implement the first two, which keeps test doubles short.

use witness_repr::{Callable, Catalogue, Type};

use crate::cache::UnitId;
use crate::error::BuildError;

/// The host type checker's subtype relation.
///
/// Must be reflexive. Type parameters in either argument are rigid.
pub trait SubtypeOracle {
    fn is_subtype_of(&self, sub: &Type, sup: &Type) -> bool;
}

impl<F> SubtypeOracle for F
where
    F: Fn(&Type, &Type) -> bool,
{
    fn is_subtype_of(&self, sub: &Type, sup: &Type) -> bool {
        self(sub, sup)
    }
}

/// Builds the proof catalogue of a compilation unit.
pub trait CatalogueBuilder {
    fn build(&self, unit: UnitId) -> Result<Catalogue, BuildError>;
}

impl<F> CatalogueBuilder for F
where
    F: Fn(UnitId) -> Result<Catalogue, BuildError>,
{
    fn build(&self, unit: UnitId) -> Result<Catalogue, BuildError> {
        self(unit)
    }
}

/// Declarations of a compilation unit, in source order.
pub trait DeclarationSource {
    fn declarations(&self, unit: UnitId) -> Result<Vec<Callable>, BuildError>;
}

/// Callable members visible on a type.
pub trait MemberScope {
    fn members(&self, ty: &Type) -> Vec<Callable>;
}
