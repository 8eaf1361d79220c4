use crate::{
    resolver::NamespaceContext,
    value::{PrimitiveFormat, Value},
};

/// Name of the fuzzy-match helper function.
pub const FUZZY_FUNCTION: &str = "fuzzy";

///
/// Expression
///
/// Operand of a predicate: a property reference, a literal, or a function
/// application.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Property(PropertyRef),
    Literal(Value),
    Function(Function),
}

impl Expression {
    #[must_use]
    pub fn property(name: impl Into<String>) -> Self {
        Self::Property(PropertyRef::new(name))
    }

    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    #[must_use]
    pub const fn as_property(&self) -> Option<&PropertyRef> {
        match self {
            Self::Property(property) => Some(property),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(value) => Some(value),
            _ => None,
        }
    }
}

impl From<PropertyRef> for Expression {
    fn from(property: PropertyRef) -> Self {
        Self::Property(property)
    }
}

impl From<Function> for Expression {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

///
/// PropertyRef
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyRef {
    pub name: String,
    pub namespaces: Option<NamespaceContext>,
}

impl PropertyRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespaces: None,
        }
    }

    #[must_use]
    pub fn with_namespaces(mut self, namespaces: NamespaceContext) -> Self {
        self.namespaces = Some(namespaces);
        self
    }
}

///
/// Function
///
/// Named built-in applied to ordered arguments. `return_format` is the
/// declared result type, when the function has one.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub name: String,
    pub args: Vec<Expression>,
    pub return_format: Option<PrimitiveFormat>,
}

impl Function {
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            args,
            return_format: None,
        }
    }

    #[must_use]
    pub fn returning(mut self, format: PrimitiveFormat) -> Self {
        self.return_format = Some(format);
        self
    }

    /// Fuzzy match over a property: `fuzzy(property, ...)`.
    #[must_use]
    pub fn fuzzy(property: impl Into<String>) -> Self {
        Self::new(FUZZY_FUNCTION, vec![Expression::property(property)])
    }

    #[must_use]
    pub fn is_fuzzy(&self) -> bool {
        self.name.eq_ignore_ascii_case(FUZZY_FUNCTION)
    }
}
