//! Callables that back proofs
//!
//! A proof's witness is something the host can invoke: a function, a
//! property (through its getter) or a class (through its primary
//! constructor). Only the shape needed to build and resolve proofs is kept.

use lasso::Spur;
use serde::{Deserialize, Serialize};

use crate::types::{Type, TypeVar};

/// Interned declaration or annotation name
pub type Symbol = Spur;

/// A function, accessor or constructor signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionRef {
    /// Fully-qualified name
    pub name: Symbol,
    /// Declared type parameters
    pub type_params: Vec<TypeVar>,
    /// Value parameter types, extension receiver first
    pub params: Vec<Type>,
    /// Return type
    pub ret: Type,
    /// Annotation names attached to the declaration
    pub annotations: Vec<Symbol>,
}

impl FunctionRef {
    pub fn new(name: Symbol, params: Vec<Type>, ret: Type) -> Self {
        Self {
            name,
            type_params: Vec::new(),
            params,
            ret,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_type_params(mut self, type_params: Vec<TypeVar>) -> Self {
        self.type_params = type_params;
        self
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Symbol) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// The sole parameter of a one-argument function
    pub fn single_param(&self) -> Option<&Type> {
        match self.params.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// A property declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyRef {
    pub name: Symbol,
    pub ty: Type,
    /// Accessor, absent for write-only or synthetic properties
    pub getter: Option<FunctionRef>,
    pub annotations: Vec<Symbol>,
}

impl PropertyRef {
    /// A property with a synthesised zero-argument getter
    pub fn with_getter(name: Symbol, ty: Type) -> Self {
        Self {
            name,
            getter: Some(FunctionRef::new(name, Vec::new(), ty.clone())),
            ty,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Symbol) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassRef {
    pub name: Symbol,
    pub type_params: Vec<TypeVar>,
    pub primary_constructor: Option<FunctionRef>,
    pub annotations: Vec<Symbol>,
}

impl ClassRef {
    /// The class type applied to its own type parameters: `C<A, B>`
    pub fn self_type(&self) -> Type {
        Type::app(
            self.name,
            self.type_params.iter().copied().map(Type::Var).collect(),
        )
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Symbol) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Anything a proof can be declared on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Callable {
    Function(FunctionRef),
    Property(PropertyRef),
    Class(ClassRef),
}

impl Callable {
    pub fn name(&self) -> Symbol {
        match self {
            Self::Function(f) => f.name,
            Self::Property(p) => p.name,
            Self::Class(c) => c.name,
        }
    }

    pub fn annotations(&self) -> &[Symbol] {
        match self {
            Self::Function(f) => &f.annotations,
            Self::Property(p) => &p.annotations,
            Self::Class(c) => &c.annotations,
        }
    }

    /// Type of the value this callable produces
    pub fn produced_type(&self) -> Type {
        match self {
            Self::Function(f) => f.ret.clone(),
            Self::Property(p) => p.ty.clone(),
            Self::Class(c) => c.self_type(),
        }
    }

    pub fn as_function(&self) -> Option<&FunctionRef> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl From<FunctionRef> for Callable {
    fn from(f: FunctionRef) -> Self {
        Self::Function(f)
    }
}

impl From<PropertyRef> for Callable {
    fn from(p: PropertyRef) -> Self {
        Self::Property(p)
    }
}

impl From<ClassRef> for Callable {
    fn from(c: ClassRef) -> Self {
        Self::Class(c)
    }
}

/// The four proof markers a declaration can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Given,
    Coercion,
    Extension,
    Refinement,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 4] = [
        MarkerKind::Given,
        MarkerKind::Coercion,
        MarkerKind::Extension,
        MarkerKind::Refinement,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::Coercion => "coercion",
            Self::Extension => "extension",
            Self::Refinement => "refinement",
        }
    }
}

/// Interned annotation names recognised as proof markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofMarkers {
    pub given: Symbol,
    pub coercion: Symbol,
    pub extension: Symbol,
    pub refinement: Symbol,
}

impl ProofMarkers {
    /// Intern the four marker names.
    ///
    /// # Arguments
    /// * `names` - fully-qualified names in `MarkerKind::ALL` order
    /// * `intern` - closure interning a string to a `Symbol`
    pub fn intern<F>(names: [&str; 4], mut intern: F) -> Self
    where
        F: FnMut(&str) -> Symbol,
    {
        Self {
            given: intern(names[0]),
            coercion: intern(names[1]),
            extension: intern(names[2]),
            refinement: intern(names[3]),
        }
    }

    pub const fn symbol(&self, kind: MarkerKind) -> Symbol {
        match kind {
            MarkerKind::Given => self.given,
            MarkerKind::Coercion => self.coercion,
            MarkerKind::Extension => self.extension,
            MarkerKind::Refinement => self.refinement,
        }
    }

    /// Which marker, if any, an annotation name denotes
    pub fn kind_of(&self, annotation: Symbol) -> Option<MarkerKind> {
        MarkerKind::ALL
            .into_iter()
            .find(|kind| self.symbol(*kind) == annotation)
    }

    /// First proof marker on a callable, in annotation order
    pub fn marker_kind(&self, callable: &Callable) -> Option<MarkerKind> {
        callable
            .annotations()
            .iter()
            .find_map(|a| self.kind_of(*a))
    }
}

/// Does the callable carry at least one of the proof markers?
pub fn is_proof_declaration(callable: &Callable, markers: &ProofMarkers) -> bool {
    markers.marker_kind(callable).is_some()
}
