//! Candidate matching
//!
//! Pure, stable filters from a catalogue slice to the proofs applicable to
//! a query. Two query shapes:
//!
//! - pair `(sub, sup)`: the declared `from` must accept `sub` and the
//!   declared `to` must be usable where `sup` is expected
//! - single `sup`: the declared `to` must be usable where `sup` is expected
//!
//! Each side is first matched structurally (`match_types`), which solves the
//! declaration's type parameters or rejects the candidate outright. The
//! `from` side is matched first. The target side may then only solve the
//! parameters the source left open, so a parameter fixed by the source is
//! compared against the target by the oracle rather than re-bound. Query
//! types stay rigid on both sides. Parameters left unbound are closed with
//! `⊤?`, and the instantiated types must then pass the host oracle:
//!
//! ```text
//!   sub <: σ(from)    and    σ(to) <: sup
//! ```
//!
//! Output order is input order. Nothing here allocates beyond the result
//! vector and the per-candidate substitution.

use tracing::trace;
use witness_repr::types::{match_open, match_types, MatchError};
use witness_repr::{
    ExtensionProof, GivenProof, Proof, ProofKind, RefinementProof, Substitution, Symbol, Type,
};

use crate::host::SubtypeOracle;

/// Anything with declared source and target types.
pub trait Candidate {
    /// Declared source type; `None` for givens.
    fn declared_from(&self) -> Option<&Type>;

    fn declared_to(&self) -> &Type;

    fn kind(&self) -> ProofKind;

    /// Backing declaration, for diagnostics.
    fn through_name(&self) -> Symbol;
}

impl Candidate for Proof {
    fn declared_from(&self) -> Option<&Type> {
        self.from_type()
    }

    fn declared_to(&self) -> &Type {
        self.to_type()
    }

    fn kind(&self) -> ProofKind {
        Proof::kind(self)
    }

    fn through_name(&self) -> Symbol {
        Proof::through_name(self)
    }
}

impl Candidate for ExtensionProof {
    fn declared_from(&self) -> Option<&Type> {
        Some(self.from_type())
    }

    fn declared_to(&self) -> &Type {
        self.to_type()
    }

    fn kind(&self) -> ProofKind {
        match self {
            Self::Coercion(_) => ProofKind::Coercion,
            Self::Projection(_) => ProofKind::Projection,
        }
    }

    fn through_name(&self) -> Symbol {
        self.through().name
    }
}

impl Candidate for GivenProof {
    fn declared_from(&self) -> Option<&Type> {
        None
    }

    fn declared_to(&self) -> &Type {
        &self.to
    }

    fn kind(&self) -> ProofKind {
        ProofKind::Given
    }

    fn through_name(&self) -> Symbol {
        self.through.name()
    }
}

impl Candidate for RefinementProof {
    fn declared_from(&self) -> Option<&Type> {
        Some(&self.from)
    }

    fn declared_to(&self) -> &Type {
        &self.to
    }

    fn kind(&self) -> ProofKind {
        ProofKind::Refinement
    }

    fn through_name(&self) -> Symbol {
        self.through.name()
    }
}

/// Candidates applicable to the pair query `(sub, sup)`, in input order.
pub fn matching_pairs<'c, C, I, O>(
    candidates: I,
    sub: &Type,
    sup: &Type,
    oracle: &O,
    max_depth: usize,
) -> Vec<&'c C>
where
    C: Candidate + 'c,
    I: IntoIterator<Item = &'c C>,
    O: SubtypeOracle + ?Sized,
{
    candidates
        .into_iter()
        .filter(|c| matches_pair(*c, sub, sup, oracle, max_depth))
        .collect()
}

/// Candidates applicable to the single-type query `sup`, in input order.
pub fn matching_single<'c, C, I, O>(
    candidates: I,
    sup: &Type,
    oracle: &O,
    max_depth: usize,
) -> Vec<&'c C>
where
    C: Candidate + 'c,
    I: IntoIterator<Item = &'c C>,
    O: SubtypeOracle + ?Sized,
{
    candidates
        .into_iter()
        .filter(|c| matches_single(*c, sup, oracle, max_depth))
        .collect()
}

/// Does `candidate` apply to the pair query `(sub, sup)`?
pub fn matches_pair<C, O>(
    candidate: &C,
    sub: &Type,
    sup: &Type,
    oracle: &O,
    max_depth: usize,
) -> bool
where
    C: Candidate + ?Sized,
    O: SubtypeOracle + ?Sized,
{
    let Some(from) = candidate.declared_from() else {
        return false;
    };
    let to = candidate.declared_to();

    let mut source = Substitution::new();
    if let Err(err) = match_types(from, sub, &mut source, max_depth) {
        trace!(kind = %candidate.kind(), through = ?candidate.through_name(), %err, "source rejected");
        return false;
    }

    let subst = match extend_with_target(to, sup, source, max_depth) {
        Ok(subst) => subst,
        Err(err) => {
            trace!(kind = %candidate.kind(), through = ?candidate.through_name(), %err, "target rejected");
            return false;
        }
    };

    let from = subst.apply_closed(from);
    let to = subst.apply_closed(to);
    let accepted = oracle.is_subtype_of(sub, &from) && oracle.is_subtype_of(&to, sup);
    if !accepted {
        trace!(kind = %candidate.kind(), through = ?candidate.through_name(), "oracle rejected instantiation");
    }
    accepted
}

/// Does `candidate` apply to the single-type query `sup`?
pub fn matches_single<C, O>(candidate: &C, sup: &Type, oracle: &O, max_depth: usize) -> bool
where
    C: Candidate + ?Sized,
    O: SubtypeOracle + ?Sized,
{
    let to = candidate.declared_to();

    let mut subst = Substitution::new();
    if let Err(err) = match_types(to, sup, &mut subst, max_depth) {
        trace!(kind = %candidate.kind(), through = ?candidate.through_name(), %err, "target rejected");
        return false;
    }

    let to = subst.apply_closed(to);
    let accepted = oracle.is_subtype_of(&to, sup);
    if !accepted {
        trace!(kind = %candidate.kind(), through = ?candidate.through_name(), "oracle rejected instantiation");
    }
    accepted
}

/// Match the target side for the parameters the source left open.
///
/// The declared `to` is matched as written, with only the still-open
/// parameters solvable. Parameters fixed by the source are left to the
/// oracle, and the query's own variables are never read as parameters.
fn extend_with_target(
    to: &Type,
    sup: &Type,
    mut source: Substitution,
    max_depth: usize,
) -> Result<Substitution, MatchError> {
    let open: Vec<_> = to
        .free_vars()
        .into_iter()
        .filter(|v| !source.contains(*v))
        .collect();

    let mut target = Substitution::new();
    match_open(to, sup, &open, &mut target, max_depth)?;
    for var in open {
        if let Some(ty) = target.get(var) {
            source.bind(var, ty.clone());
        }
    }
    Ok(source)
}
