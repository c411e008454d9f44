use std::fmt;
use std::sync::Arc;

/// Zero-argument producer of a value
pub type Factory<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// A value that is either known up front or produced on demand.
///
/// Field defaults and late-bound rule configuration (choices, bounds,
/// comparison targets) use this instead of probing whether a stored value
/// happens to be callable.
pub enum Deferred<T> {
    /// Used as-is
    Literal(T),
    /// Invoked every time the value is resolved
    Factory(Factory<T>),
}

impl<T: Clone> Deferred<T> {
    /// Wrap a known value
    pub fn literal(value: T) -> Self {
        Deferred::Literal(value)
    }

    /// Wrap a producer that is called on every resolution
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Deferred::Factory(Arc::new(factory))
    }

    /// Produce the value, invoking the factory if there is one
    pub fn resolve(&self) -> T {
        match self {
            Deferred::Literal(value) => value.clone(),
            Deferred::Factory(factory) => factory(),
        }
    }

    pub fn is_factory(&self) -> bool {
        matches!(self, Deferred::Factory(_))
    }
}

impl<T> From<T> for Deferred<T> {
    fn from(value: T) -> Self {
        Deferred::Literal(value)
    }
}

impl<T: Clone> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        match self {
            Deferred::Literal(value) => Deferred::Literal(value.clone()),
            Deferred::Factory(factory) => Deferred::Factory(Arc::clone(factory)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deferred::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Deferred::Factory(_) => f.debug_tuple("Factory").field(&"<factory_fn>").finish(),
        }
    }
}
