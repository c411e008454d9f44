//! Schema instances and their value stores

use crate::errors::{SchemaError, SchemaResult};
use crate::field::Field;
use crate::schema::Schema;
use crate::sequence;
use serde_json::Value;
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Zero-argument callable stored in place of a value
pub type Thunk = Arc<dyn Fn() -> Value + Send + Sync>;

/// One entry of an instance's value store
#[derive(Clone)]
pub enum Slot {
    /// A concrete value
    Value(Value),
    /// A late-bound value; callback fields invoke it on read
    Callable(Thunk),
}

impl Slot {
    pub fn callable<F>(callable: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Slot::Callable(Arc::new(callable))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Slot::Callable(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Slot::Value(value) => Some(value),
            Slot::Callable(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Slot::Value(value) => Some(value),
            Slot::Callable(_) => None,
        }
    }

    /// The concrete value, invoking a callable if necessary
    pub fn resolve(&self) -> Value {
        match self {
            Slot::Value(value) => value.clone(),
            Slot::Callable(callable) => callable(),
        }
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Slot::Value(value)
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Slot::Value(left), Slot::Value(right)) => left == right,
            (Slot::Callable(left), Slot::Callable(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Slot::Callable(_) => f.debug_tuple("Callable").field(&"<callable>").finish(),
        }
    }
}

/// An object of a declared schema.
///
/// Field values live in a store keyed by each field's storage name. The store
/// uses interior mutability so that reads can commit defaults; an instance is
/// therefore `Send` but not `Sync`, and concurrent access must be serialized
/// by the caller.
pub struct Instance {
    schema: Arc<Schema>,
    sequence: u64,
    store: RefCell<HashMap<String, Slot>>,
}

impl Instance {
    /// Create an empty instance of `schema`
    pub fn new(schema: &Arc<Schema>) -> Self {
        Self {
            schema: Arc::clone(schema),
            sequence: sequence::next(),
            store: RefCell::new(HashMap::new()),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Sequence number drawn at instantiation (orders instances, not fields)
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    fn field(&self, attribute: &str) -> SchemaResult<&Arc<Field>> {
        self.schema
            .field(attribute)
            .ok_or_else(|| SchemaError::unknown_field(self.schema.name(), attribute))
    }

    /// Read a field by declaration name through its descriptor
    pub fn get(&self, attribute: &str) -> SchemaResult<Slot> {
        Ok(self.field(attribute)?.get(self)?)
    }

    /// Read a field and resolve it to a concrete value
    pub fn value(&self, attribute: &str) -> SchemaResult<Value> {
        self.get(attribute).map(|slot| slot.resolve())
    }

    /// Assign a field by declaration name through its descriptor
    pub fn set(&self, attribute: &str, value: impl Into<Slot>) -> SchemaResult<()> {
        Ok(self.field(attribute)?.set(self, value)?)
    }

    /// Delete a field's stored value by declaration name
    pub fn delete(&self, attribute: &str) -> SchemaResult<()> {
        Ok(self.field(attribute)?.delete(self)?)
    }

    /// Raw store lookup by storage key, bypassing descriptors
    pub fn raw(&self, key: &str) -> Option<Slot> {
        self.store.borrow().get(key).cloned()
    }

    /// Raw store write by storage key, bypassing descriptors
    pub fn insert_raw(&self, key: impl Into<String>, slot: impl Into<Slot>) -> Option<Slot> {
        self.store.borrow_mut().insert(key.into(), slot.into())
    }

    /// Raw store removal by storage key, bypassing descriptors
    pub fn remove_raw(&self, key: &str) -> Option<Slot> {
        self.store.borrow_mut().remove(key)
    }

    /// Borrow the whole value store
    pub fn store(&self) -> Ref<'_, HashMap<String, Slot>> {
        self.store.borrow()
    }

    /// Concrete stored values, resolved, keyed by storage name
    pub fn to_json(&self) -> Value {
        let store = self.store.borrow();
        let mut object = serde_json::Map::new();
        for (key, slot) in store.iter() {
            object.insert(key.clone(), slot.resolve());
        }
        Value::Object(object)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("schema", &self.schema.name())
            .field("sequence", &self.sequence)
            .field("store", &*self.store.borrow())
            .finish()
    }
}
