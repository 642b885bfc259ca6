//! Resolution façade
//!
//! `ResolutionContext` binds one compilation unit to the host collaborators
//! and answers proof queries for it. Every query fetches the unit's
//! catalogue through the [`ProofCache`] (building it on first use) and
//! filters it with the [`matcher`](crate::matcher). Results are in catalogue
//! order; the singular forms return the first match.
//!
//! ```text
//!   host ──query──▶ ResolutionContext ──unit──▶ ProofCache ──build──▶ CatalogueBuilder
//!                          │
//!                          └──candidates──▶ matcher ──▶ SubtypeOracle
//! ```

use std::sync::Arc;

use tracing::trace;
use witness_repr::{Callable, Catalogue, ExtensionProof, GivenProof, Proof, RefinementProof, Symbol, Type};

use crate::cache::{ProofCache, UnitId};
use crate::config::ResolverConfig;
use crate::host::{CatalogueBuilder, MemberScope, SubtypeOracle};
use crate::matcher::{matches_pair, matches_single};

/// Proof queries for one compilation unit.
pub struct ResolutionContext<'a> {
    unit: UnitId,
    oracle: &'a dyn SubtypeOracle,
    builder: &'a dyn CatalogueBuilder,
    cache: &'a ProofCache,
    max_depth: usize,
}

impl<'a> ResolutionContext<'a> {
    /// Context over the process-wide cache with default settings.
    pub fn new(
        unit: UnitId,
        oracle: &'a dyn SubtypeOracle,
        builder: &'a dyn CatalogueBuilder,
    ) -> Self {
        Self {
            unit,
            oracle,
            builder,
            cache: ProofCache::global(),
            max_depth: ResolverConfig::default().max_match_depth,
        }
    }

    /// Use `cache` instead of the process-wide one.
    #[must_use]
    pub fn with_cache(mut self, cache: &'a ProofCache) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: &ResolverConfig) -> Self {
        self.max_depth = config.max_match_depth;
        self
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    /// The unit's whole catalogue.
    pub fn proofs(&self) -> Arc<Catalogue> {
        let (unit, builder) = (self.unit, self.builder);
        self.cache.get_or_initialize(unit, || builder.build(unit))
    }

    /// Coercions and projections from `sub` to `sup`.
    pub fn extension_proofs(&self, sub: &Type, sup: &Type) -> Vec<ExtensionProof> {
        let catalogue = self.proofs();
        let found = self
            .pairs(&catalogue, sub, sup, false)
            .filter_map(Proof::as_extension)
            .collect();
        found
    }

    pub fn extension_proof(&self, sub: &Type, sup: &Type) -> Option<ExtensionProof> {
        let catalogue = self.proofs();
        let found = self.pairs(&catalogue, sub, sup, false).find_map(Proof::as_extension);
        found
    }

    /// Extension proofs eligible for implicit conversion from `sub` to `sup`.
    pub fn coerce_proofs(&self, sub: &Type, sup: &Type) -> Vec<ExtensionProof> {
        let catalogue = self.proofs();
        let found = self
            .pairs(&catalogue, sub, sup, true)
            .filter_map(Proof::as_extension)
            .collect();
        found
    }

    pub fn coerce_proof(&self, sub: &Type, sup: &Type) -> Option<ExtensionProof> {
        let catalogue = self.proofs();
        let found = self.pairs(&catalogue, sub, sup, true).find_map(Proof::as_extension);
        found
    }

    /// Givens producing a value usable as `sup`.
    pub fn given_proofs(&self, sup: &Type) -> Vec<GivenProof> {
        let catalogue = self.proofs();
        let found = self
            .givens(&catalogue, sup)
            .cloned()
            .collect();
        found
    }

    pub fn given_proof(&self, sup: &Type) -> Option<GivenProof> {
        let catalogue = self.proofs();
        let found = self.givens(&catalogue, sup).next().cloned();
        found
    }

    /// Refinements from `sub` to `sup`.
    pub fn refinement_proofs(&self, sub: &Type, sup: &Type) -> Vec<RefinementProof> {
        let catalogue = self.proofs();
        let found = self
            .refinements(&catalogue, sub, sup)
            .cloned()
            .collect();
        found
    }

    pub fn refinement_proof(&self, sub: &Type, sup: &Type) -> Option<RefinementProof> {
        let catalogue = self.proofs();
        let found = self.refinements(&catalogue, sub, sup).next().cloned();
        found
    }

    /// Native subtyping extended with coercion proofs.
    ///
    /// True only when the oracle rejects `sub <: sup` and a coercion proof
    /// exists. The proof lookup is skipped when the oracle accepts.
    pub fn are_coerced(&self, sub: &Type, sup: &Type) -> bool {
        if self.oracle.is_subtype_of(sub, sup) {
            return false;
        }
        let coerced = self.coerce_proof(sub, sup).is_some();
        trace!(unit = %self.unit, coerced, "coercion check");
        coerced
    }

    /// Every extension proof applicable to each of `types`, in input order.
    pub fn extending(&self, types: &[Type]) -> Vec<ExtensionProof> {
        let top = Type::nullable_top();
        types
            .iter()
            .flat_map(|ty| self.extension_proofs(ty, &top))
            .collect()
    }

    /// Members of the proof's target type whose name passes `name_filter`.
    pub fn proof_members<F>(
        &self,
        proof: &Proof,
        scope: &dyn MemberScope,
        name_filter: F,
    ) -> Vec<Callable>
    where
        F: Fn(Symbol) -> bool,
    {
        scope
            .members(proof.to_type())
            .into_iter()
            .filter(|member| name_filter(member.name()))
            .collect()
    }

    /// Drop this unit's cached catalogue.
    pub fn invalidate(&self) -> bool {
        self.cache.invalidate(self.unit)
    }

    fn pairs<'c>(
        &self,
        catalogue: &'c Catalogue,
        sub: &'c Type,
        sup: &'c Type,
        coerce_only: bool,
    ) -> impl Iterator<Item = &'c Proof> + 'c
    where
        'a: 'c,
    {
        let (oracle, max_depth): (&'c dyn SubtypeOracle, usize) = (self.oracle, self.max_depth);
        catalogue
            .extensions()
            .filter(move |p| !coerce_only || p.coerce())
            .filter(move |p| matches_pair(*p, sub, sup, oracle, max_depth))
    }

    fn givens<'c>(
        &self,
        catalogue: &'c Catalogue,
        sup: &'c Type,
    ) -> impl Iterator<Item = &'c GivenProof> + 'c
    where
        'a: 'c,
    {
        let (oracle, max_depth): (&'c dyn SubtypeOracle, usize) = (self.oracle, self.max_depth);
        catalogue
            .iter()
            .filter_map(Proof::as_given)
            .filter(move |g| matches_single(*g, sup, oracle, max_depth))
    }

    fn refinements<'c>(
        &self,
        catalogue: &'c Catalogue,
        sub: &'c Type,
        sup: &'c Type,
    ) -> impl Iterator<Item = &'c RefinementProof> + 'c
    where
        'a: 'c,
    {
        let (oracle, max_depth): (&'c dyn SubtypeOracle, usize) = (self.oracle, self.max_depth);
        catalogue
            .iter()
            .filter_map(Proof::as_refinement)
            .filter(move |r| matches_pair(*r, sub, sup, oracle, max_depth))
    }
}
