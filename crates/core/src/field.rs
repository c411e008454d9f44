//! Field descriptors
//!
//! A [`Field`] governs one declared attribute of a schema: the key its value
//! is stored under, its default, and what happens on read and write.

use crate::concern::Concern;
use crate::deferred::Deferred;
use crate::errors::AttributeMissing;
use crate::instance::{Instance, Slot};
use crate::registry::Element;
use crate::schema::Schema;
use crate::sequence;
use crate::validator::Validator;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Hook fired once the containing schema has been declared
pub type AttachHook = Arc<dyn Fn(&mut Schema, &Field) + Send + Sync>;

/// Read/write behaviour of a field
#[derive(Clone)]
pub enum FieldKind {
    /// Plain storage
    Data,
    /// Stored callables are invoked on read and their result returned
    Callback,
    /// Every assignment is checked by the validator first
    Validated(Arc<dyn Validator>),
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Data => "data",
            FieldKind::Callback => "callback",
            FieldKind::Validated(_) => "validated",
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Data => write!(f, "Data"),
            FieldKind::Callback => write!(f, "Callback"),
            FieldKind::Validated(validator) => f
                .debug_tuple("Validated")
                .field(&validator.rule_name())
                .finish(),
        }
    }
}

/// One declared attribute of a schema.
///
/// Cloning draws a fresh sequence number, so a clone orders after every
/// field constructed before it.
pub struct Field {
    name: String,
    alias: Option<String>,
    sequence: u64,
    default: Option<Deferred<Value>>,
    assign: bool,
    kind: FieldKind,
    annotation: Option<String>,
    on_attach: Option<AttachHook>,
}

impl Field {
    fn with_kind(kind: FieldKind) -> Self {
        Self {
            name: String::new(),
            alias: None,
            sequence: sequence::next(),
            default: None,
            assign: false,
            kind,
            annotation: None,
            on_attach: None,
        }
    }

    /// Plain data field
    pub fn data() -> Self {
        Self::with_kind(FieldKind::Data)
    }

    /// Field whose callable values are invoked on read
    pub fn callback() -> Self {
        Self::with_kind(FieldKind::Callback)
    }

    /// Field that validates every assignment
    pub fn validated<V>(validator: V) -> Self
    where
        V: Validator + 'static,
    {
        Self::with_kind(FieldKind::Validated(Arc::new(validator)))
    }

    /// Store the value under `alias` instead of the declaration name
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Use a fixed default when no value is stored
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(Deferred::Literal(default.into()));
        self
    }

    /// Produce the default on demand; the factory runs on every miss
    pub fn default_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(Deferred::factory(factory));
        self
    }

    /// Commit a resolved default to storage, so later reads see a stored value
    pub fn assign(mut self, assign: bool) -> Self {
        self.assign = assign;
        self
    }

    /// Record a type annotation for the declaring schema
    pub fn annotate(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Run `hook` after the declaring schema is complete
    pub fn on_attach<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Schema, &Field) + Send + Sync + 'static,
    {
        self.on_attach = Some(Arc::new(hook));
        self
    }

    /// Bind the declaration name. An explicit alias always takes precedence.
    pub(crate) fn declare(&mut self, attribute: &str) {
        self.name = self.alias.clone().unwrap_or_else(|| attribute.to_string());
    }

    pub(crate) fn attach_hook(&self) -> Option<&AttachHook> {
        self.on_attach.as_ref()
    }

    /// Key the value is stored under
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn default_value(&self) -> Option<&Deferred<Value>> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn assigns_default(&self) -> bool {
        self.assign
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// Replace the default after construction
    #[cfg(any(test, feature = "test-hooks"))]
    pub fn set_default(&mut self, default: Option<Deferred<Value>>) {
        self.default = default;
    }

    /// Toggle default assignment after construction
    #[cfg(any(test, feature = "test-hooks"))]
    pub fn set_assign(&mut self, assign: bool) {
        self.assign = assign;
    }

    fn missing(&self, instance: &Instance) -> AttributeMissing {
        AttributeMissing::new(instance.schema().name(), &self.name)
    }

    /// Read this field from an instance.
    ///
    /// A stored value wins. Otherwise the default is resolved (invoking a
    /// factory) and, if the field assigns defaults, written back first.
    pub fn get(&self, instance: &Instance) -> Result<Slot, AttributeMissing> {
        let slot = match instance.raw(&self.name) {
            Some(slot) => slot,
            None => {
                let default = self.default.as_ref().ok_or_else(|| self.missing(instance))?;
                let slot = Slot::Value(default.resolve());
                if self.assign {
                    instance.insert_raw(&self.name, slot.clone());
                }
                slot
            }
        };

        match (&self.kind, slot) {
            (FieldKind::Callback, Slot::Callable(callable)) => Ok(Slot::Value(callable())),
            (_, slot) => Ok(slot),
        }
    }

    /// Assign a value. Validated fields store the assigned value once the
    /// validator accepts it and leave storage untouched on failure.
    pub fn set(&self, instance: &Instance, value: impl Into<Slot>) -> Result<(), Concern> {
        let slot = match (&self.kind, value.into()) {
            (FieldKind::Validated(validator), Slot::Value(value)) => {
                validator.validate(value.clone(), Some(instance as &dyn Any))?;
                Slot::Value(value)
            }
            (FieldKind::Validated(_), Slot::Callable(_)) => {
                let message = "Field '{0}' requires a concrete value, not a callable.";
                return Err(Concern::new(message).arg(self.name.clone()));
            }
            (_, slot) => slot,
        };

        instance.insert_raw(&self.name, slot);
        Ok(())
    }

    /// Remove the stored value
    pub fn delete(&self, instance: &Instance) -> Result<(), AttributeMissing> {
        instance
            .remove_raw(&self.name)
            .map(|_| ())
            .ok_or_else(|| self.missing(instance))
    }
}

impl Clone for Field {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            alias: self.alias.clone(),
            sequence: sequence::next(),
            default: self.default.clone(),
            assign: self.assign,
            kind: self.kind.clone(),
            annotation: self.annotation.clone(),
            on_attach: self.on_attach.clone(),
        }
    }
}

impl Element for Field {
    fn sequence(&self) -> u64 {
        self.sequence
    }

    fn set_sequence(&mut self, sequence: u64) {
        self.sequence = sequence;
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("sequence", &self.sequence)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("assign", &self.assign)
            .field("annotation", &self.annotation)
            .field("has_attach_hook", &self.on_attach.is_some())
            .finish()
    }
}
