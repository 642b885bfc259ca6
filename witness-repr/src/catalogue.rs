//! Proof catalogue of one compilation unit
//!
//! Order is significant: it is the tie-break order for ambiguous matches,
//! first declared, first returned.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::proof::{Proof, ProofKind};

/// Ordered, immutable list of the proofs visible in a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    proofs: Vec<Proof>,
}

impl Catalogue {
    /// Create a catalogue, dropping structurally equal repeats so that the
    /// first declaration keeps its position.
    pub fn new(proofs: Vec<Proof>) -> Self {
        let mut seen: FxHashSet<Proof> = FxHashSet::default();
        let mut unique = Vec::with_capacity(proofs.len());
        for proof in proofs {
            if seen.insert(proof.clone()) {
                unique.push(proof);
            }
        }
        Self { proofs: unique }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.proofs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }

    pub fn proofs(&self) -> &[Proof] {
        &self.proofs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Proof> {
        self.proofs.iter()
    }

    /// Proofs of one variant, in catalogue order
    pub fn of_kind(&self, kind: ProofKind) -> impl Iterator<Item = &Proof> + '_ {
        self.proofs.iter().filter(move |p| p.kind() == kind)
    }

    /// Coercions and projections, in catalogue order
    pub fn extensions(&self) -> impl Iterator<Item = &Proof> + '_ {
        self.proofs
            .iter()
            .filter(|p| matches!(p, Proof::Coercion(_) | Proof::Projection(_)))
    }

    /// Number of proofs per variant: `[given, coercion, projection, refinement]`
    pub fn counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for proof in &self.proofs {
            let slot = match proof.kind() {
                ProofKind::Given => 0,
                ProofKind::Coercion => 1,
                ProofKind::Projection => 2,
                ProofKind::Refinement => 3,
            };
            counts[slot] += 1;
        }
        counts
    }
}

impl FromIterator<Proof> for Catalogue {
    fn from_iter<I: IntoIterator<Item = Proof>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a Proof;
    type IntoIter = std::slice::Iter<'a, Proof>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
