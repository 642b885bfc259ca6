//! Shared fixtures: a small type world with a nominal oracle.

use lasso::Rodeo;
use witness::witness_repr::types::default_variance_env;
use witness::{
    Callable, Catalogue, CoercionProof, FunctionRef, GivenProof, NominalOracle, ProjectionProof,
    Proof, RefinementProof, Symbol, Type,
};

pub struct World {
    pub rodeo: Rodeo,
    pub oracle: NominalOracle,
}

impl World {
    /// `Int <: Number`, `ArrayList<A> <: List<A>`, default variances.
    pub fn new() -> Self {
        let mut rodeo = Rodeo::default();
        let env = default_variance_env(|s| rodeo.get_or_intern(s));
        let mut oracle = NominalOracle::new(env);

        let number = Type::named(rodeo.get_or_intern("Number"));
        oracle.declare(rodeo.get_or_intern("Int"), vec![], vec![number]);

        let a = rodeo.get_or_intern("A");
        let list = rodeo.get_or_intern("List");
        oracle.declare(
            rodeo.get_or_intern("ArrayList"),
            vec![a],
            vec![Type::app(list, vec![Type::Var(a)])],
        );

        Self { rodeo, oracle }
    }

    pub fn sym(&mut self, name: &str) -> Symbol {
        self.rodeo.get_or_intern(name)
    }

    pub fn ty(&mut self, name: &str) -> Type {
        Type::named(self.sym(name))
    }

    pub fn app(&mut self, name: &str, args: Vec<Type>) -> Type {
        Type::app(self.sym(name), args)
    }

    pub fn var(&mut self, name: &str) -> Type {
        Type::Var(self.sym(name))
    }

    pub fn func(&mut self, name: &str, params: Vec<Type>, ret: Type) -> FunctionRef {
        let type_params = params
            .iter()
            .chain(std::iter::once(&ret))
            .flat_map(Type::free_vars)
            .fold(Vec::new(), |mut acc, v| {
                if !acc.contains(&v) {
                    acc.push(v);
                }
                acc
            });
        FunctionRef::new(self.sym(name), params, ret).with_type_params(type_params)
    }

    pub fn coercion(&mut self, name: &str, from: Type, to: Type) -> Proof {
        let through = self.func(name, vec![from.clone()], to.clone());
        Proof::Coercion(CoercionProof { from, to, through })
    }

    pub fn projection(&mut self, name: &str, from: Type, to: Type) -> Proof {
        let through = self.func(name, vec![from.clone()], to.clone());
        Proof::Projection(ProjectionProof { from, to, through })
    }

    pub fn refinement(&mut self, name: &str, from: Type, to: Type) -> Proof {
        let through = self.func(name, vec![from.clone()], to.clone());
        Proof::Refinement(RefinementProof {
            from,
            to,
            through: Callable::Function(through),
        })
    }

    pub fn given(&mut self, name: &str, to: Type) -> Proof {
        let through = self.func(name, vec![], to.clone());
        Proof::Given(GivenProof {
            to,
            through: Callable::Function(through),
        })
    }

    pub fn name_of(&self, symbol: Symbol) -> &str {
        self.rodeo.resolve(&symbol)
    }

    pub fn names<'p, I>(&self, proofs: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'p Proof>,
    {
        proofs
            .into_iter()
            .map(|p| self.name_of(p.through_name()).to_string())
            .collect()
    }
}

/// Builder closure returning a fixed catalogue.
pub fn fixed(catalogue: Catalogue) -> impl Fn(witness::UnitId) -> Result<Catalogue, witness::BuildError> {
    move |_| Ok(catalogue.clone())
}

/// Route `tracing` output through the test harness. `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
