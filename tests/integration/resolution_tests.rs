//! Resolution façade integration tests.
//!
//! Queries run through `ResolutionContext` with a private cache, the
//! nominal oracle and fixed catalogues.

use witness::{
    Callable, Catalogue, ExtensionProof, MemberScope, Proof, ProofCache, ProofKind,
    ResolutionContext, Type, UnitId,
};

use crate::common::{fixed, World};

// =============================================================================
// End-to-end scenario
// =============================================================================

#[test]
fn test_end_to_end_scenario() {
    let mut w = World::new();
    let int = w.ty("Int");
    let string = w.ty("String");
    let config = w.ty("Config");

    let coercion = w.coercion("f", int.clone(), string.clone());
    let given = w.given("g", config.clone());
    let builder = fixed(Catalogue::new(vec![coercion.clone(), given.clone()]));
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    let found = ctx.coerce_proof(&int, &string).map(ExtensionProof::into_proof);
    assert_eq!(found, Some(coercion.clone()));

    assert!(ctx.coerce_proof(&string, &int).is_none());

    let found = ctx.given_proof(&config).map(Proof::Given);
    assert_eq!(found, Some(given));

    let all: Vec<Proof> = ctx
        .extension_proofs(&int, &string)
        .into_iter()
        .map(Proof::from)
        .collect();
    assert_eq!(all, vec![coercion]);
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_order_preservation() {
    let mut w = World::new();
    let int = w.ty("Int");
    let string = w.ty("String");
    let boolean = w.ty("Boolean");

    let p1 = w.coercion("p1", int.clone(), string.clone());
    let p2 = w.coercion("p2", boolean, string.clone());
    let p3 = w.coercion("p3", int.clone(), string.clone());
    let builder = fixed(Catalogue::new(vec![p1, p2, p3]));
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    let found: Vec<Proof> = ctx
        .coerce_proofs(&int, &string)
        .into_iter()
        .map(Proof::from)
        .collect();
    assert_eq!(w.names(&found), vec!["p1", "p3"]);

    let first = ctx.coerce_proof(&int, &string).map(|p| p.through().name);
    assert_eq!(first.map(|s| w.name_of(s).to_string()), Some("p1".to_string()));
}

#[test]
fn test_repeated_queries_are_identical() {
    let mut w = World::new();
    let int = w.ty("Int");
    let number = w.ty("Number");
    let string = w.ty("String");
    let a = w.var("A");

    let catalogue = Catalogue::new(vec![
        w.coercion("numberToString", number, string.clone()),
        w.projection("anyToString", Type::nullable(a), string.clone()),
        w.coercion("intToString", int.clone(), string.clone()),
    ]);
    let builder = fixed(catalogue);
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    let first = ctx.extension_proofs(&int, &string);
    for _ in 0..10 {
        assert_eq!(ctx.extension_proofs(&int, &string), first);
    }
    assert_eq!(first.len(), 3);
}

// =============================================================================
// Coerce filtering and short-circuit
// =============================================================================

#[test]
fn test_projection_never_coerces() {
    let mut w = World::new();
    let int = w.ty("Int");
    let string = w.ty("String");

    let projection = w.projection("asText", int.clone(), string.clone());
    let builder = fixed(Catalogue::new(vec![projection.clone()]));
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    let extensions = ctx.extension_proofs(&int, &string);
    assert_eq!(extensions.len(), 1);
    assert!(!extensions[0].coerce());
    assert_eq!(extensions[0].clone().into_proof(), projection);

    assert!(ctx.coerce_proofs(&int, &string).is_empty());
    assert!(ctx.coerce_proof(&int, &string).is_none());
    assert!(!ctx.are_coerced(&int, &string));
}

#[test]
fn test_are_coerced_respects_native_subtyping() {
    let mut w = World::new();
    let int = w.ty("Int");
    let number = w.ty("Number");
    let string = w.ty("String");

    let builder = fixed(Catalogue::new(vec![
        w.coercion("intToInt", int.clone(), int.clone()),
        w.coercion("intToNumber", int.clone(), number.clone()),
        w.coercion("intToString", int.clone(), string.clone()),
    ]));
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    // Reflexive and native subtypes never count as coerced.
    assert!(!ctx.are_coerced(&int, &int));
    assert!(!ctx.are_coerced(&int, &number));
    assert!(cache.get(UnitId::new(1)).is_none(), "native checks must not build");

    assert!(ctx.are_coerced(&int, &string));
    assert!(!ctx.are_coerced(&string, &int));
}

// =============================================================================
// Generic proofs
// =============================================================================

#[test]
fn test_generic_coercion_instantiates() {
    let mut w = World::new();
    let a = w.var("A");
    let int = w.ty("Int");
    let number = w.ty("Number");
    let string = w.ty("String");

    let list_a = w.app("List", vec![a.clone()]);
    let set_a = w.app("Set", vec![a]);
    let builder = fixed(Catalogue::new(vec![w.coercion("toSet", list_a, set_a)]));
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    let list_int = w.app("List", vec![int.clone()]);
    let array_int = w.app("ArrayList", vec![int.clone()]);
    let set_int = w.app("Set", vec![int]);
    let set_number = w.app("Set", vec![number]);
    let set_string = w.app("Set", vec![string]);

    assert!(ctx.coerce_proof(&list_int, &set_int).is_some());
    assert!(ctx.coerce_proof(&list_int, &set_number).is_some());
    assert!(ctx.coerce_proof(&list_int, &set_string).is_none());

    // ArrayList has a different head from the parameterised List<A>.
    assert!(ctx.coerce_proof(&array_int, &set_int).is_none());
}

#[test]
fn test_rigid_query_parameters() {
    let mut w = World::new();
    let a = w.var("A");
    let t = w.var("T");
    let int = w.ty("Int");
    let string = w.ty("String");

    let list_a = w.app("List", vec![a.clone()]);
    let builder = fixed(Catalogue::new(vec![
        w.coercion("listToString", list_a, string.clone()),
        w.coercion("intToString", int, string.clone()),
    ]));
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    // The query's own T stays rigid and is only matched by the generic proof.
    let list_t = w.app("List", vec![t.clone()]);
    let found: Vec<Proof> = ctx
        .coerce_proofs(&list_t, &string)
        .into_iter()
        .map(Proof::from)
        .collect();
    assert_eq!(w.names(&found), vec!["listToString"]);
    assert!(ctx.coerce_proof(&t, &string).is_none());
}

#[test]
fn test_generic_proofs_answer_nullable_queries() {
    let mut w = World::new();
    let a = w.var("A");
    let int = w.ty("Int");
    let string = w.ty("String");

    let list_a = w.app("List", vec![a]);
    let builder = fixed(Catalogue::new(vec![
        w.given("emptyList", list_a.clone()),
        w.coercion("singleton", int.clone(), list_a),
    ]));
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    let list_string = w.app("List", vec![string]);
    let wanted = Type::nullable(list_string);

    let given = ctx.given_proof(&wanted).map(Proof::Given);
    assert_eq!(w.names(given.iter()), vec!["emptyList"]);

    let found: Vec<Proof> = ctx
        .coerce_proofs(&int, &wanted)
        .into_iter()
        .map(Proof::from)
        .collect();
    assert_eq!(w.names(&found), vec!["singleton"]);
}

#[test]
fn test_query_variable_names_do_not_leak_into_proofs() {
    let mut w = World::new();
    let a = w.var("A");
    let b = w.var("B");
    let t = w.var("T");
    let int = w.ty("Int");

    let box_a = w.app("Box", vec![a.clone()]);
    let pair_ab = w.app("Pair", vec![a, b.clone()]);
    let builder = fixed(Catalogue::new(vec![w.coercion("pairUp", box_a, pair_ab)]));
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    let mut answers = Vec::new();
    for query_var in [b, t] {
        let sub = w.app("Box", vec![query_var.clone()]);
        let sup = w.app("Pair", vec![query_var, int.clone()]);
        answers.push(ctx.coerce_proof(&sub, &sup).is_some());
    }
    assert_eq!(answers, vec![true, true]);
}

// =============================================================================
// Givens, refinements and extensions
// =============================================================================

#[test]
fn test_given_proofs_by_target() {
    let mut w = World::new();
    let int = w.ty("Int");
    let number = w.ty("Number");
    let a = w.var("A");
    let list_a = w.app("List", vec![a]);

    let builder = fixed(Catalogue::new(vec![
        w.given("zero", int.clone()),
        w.given("emptyList", list_a),
        w.given("pi", number.clone()),
    ]));
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    // An Int is usable where a Number is expected.
    let givens: Vec<Proof> = ctx.given_proofs(&number).into_iter().map(Proof::Given).collect();
    assert_eq!(w.names(&givens), vec!["zero", "pi"]);

    let list_string = {
        let string = w.ty("String");
        w.app("List", vec![string])
    };
    let given = ctx.given_proof(&list_string).map(Proof::Given);
    assert_eq!(w.names(given.iter()), vec!["emptyList"]);
}

#[test]
fn test_refinement_queries() {
    let mut w = World::new();
    let int = w.ty("Int");
    let positive = w.ty("PositiveInt");

    let builder = fixed(Catalogue::new(vec![
        w.refinement("positive", int.clone(), positive.clone()),
        w.coercion("widen", positive.clone(), int.clone()),
    ]));
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    let refinement = ctx.refinement_proof(&int, &positive).map(Proof::Refinement);
    assert_eq!(w.names(refinement.iter()), vec!["positive"]);
    assert_eq!(ctx.refinement_proofs(&int, &positive).len(), 1);

    // Refinements are not extension proofs.
    assert!(ctx.extension_proofs(&int, &positive).is_empty());
    assert!(ctx.refinement_proof(&positive, &int).is_none());
}

#[test]
fn test_extending_collects_per_type() {
    let mut w = World::new();
    let int = w.ty("Int");
    let string = w.ty("String");
    let boolean = w.ty("Boolean");
    let text = w.ty("Text");

    let builder = fixed(Catalogue::new(vec![
        w.projection("intText", int.clone(), text.clone()),
        w.coercion("boolToString", boolean.clone(), string),
        w.projection("boolText", boolean.clone(), text),
    ]));
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    let found: Vec<Proof> = ctx
        .extending(&[boolean, int])
        .into_iter()
        .map(Proof::from)
        .collect();
    assert_eq!(w.names(&found), vec!["boolToString", "boolText", "intText"]);
}

struct TextMembers {
    members: Vec<Callable>,
}

impl MemberScope for TextMembers {
    fn members(&self, _ty: &Type) -> Vec<Callable> {
        self.members.clone()
    }
}

#[test]
fn test_proof_members_filtered_by_name() {
    let mut w = World::new();
    let int = w.ty("Int");
    let text = w.ty("Text");
    let projection = w.projection("intText", int.clone(), text.clone());

    let length = w.func("length", vec![text.clone()], int.clone());
    let upper = w.func("upper", vec![text.clone()], text.clone());
    let scope = TextMembers {
        members: vec![length.into(), upper.into()],
    };

    let builder = fixed(Catalogue::new(vec![projection.clone()]));
    let oracle = w.oracle.clone();
    let cache = ProofCache::new();
    let ctx = ResolutionContext::new(UnitId::new(1), &oracle, &builder).with_cache(&cache);

    let upper_sym = w.sym("upper");
    let found = ctx.proof_members(&projection, &scope, |name| name == upper_sym);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), upper_sym);
    assert_eq!(ctx.proof_members(&projection, &scope, |_| true).len(), 2);
    assert_eq!(projection.kind(), ProofKind::Projection);
}
