//! Structured type declaration
//!
//! A [`Schema`] is declared once through a [`SchemaBuilder`], which performs
//! the registry merge against every base and fires declaration hooks. After
//! `build` the schema is shared immutably behind an `Arc`.

use crate::field::Field;
use crate::instance::Instance;
use crate::registry::Registry;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Hook fired when a schema's own declaration completes
pub type DeclaredHook = Arc<dyn Fn(&Schema) + Send + Sync>;

/// A declared structured type
pub struct Schema {
    name: String,
    bases: Vec<Arc<Schema>>,
    fields: Registry<Field>,
    annotations: BTreeMap<String, String>,
    metadata: Map<String, Value>,
}

impl Schema {
    /// Start declaring a schema
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct bases, in declaration order
    pub fn bases(&self) -> &[Arc<Schema>] {
        &self.bases
    }

    /// The merged, ordered field registry
    pub fn fields(&self) -> &Registry<Field> {
        &self.fields
    }

    /// The descriptor declared under `attribute`
    pub fn field(&self, attribute: &str) -> Option<&Arc<Field>> {
        self.fields.get(attribute)
    }

    /// Fields matching `predicate`, preserving registry order
    pub fn fields_where<P>(&self, predicate: P) -> Vec<(&str, &Arc<Field>)>
    where
        P: Fn(&Field) -> bool,
    {
        self.fields
            .iter()
            .filter(|(_, field)| predicate(field))
            .collect()
    }

    /// Type annotations gathered from the fields, keyed by declaration name
    pub fn annotations(&self) -> &BTreeMap<String, String> {
        &self.annotations
    }

    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Record arbitrary metadata; intended for declaration hooks
    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Whether `other` appears anywhere in this schema's ancestry (or is this schema)
    pub fn is_derived_from(&self, other: &Schema) -> bool {
        std::ptr::eq(self, other) || self.bases.iter().any(|base| base.is_derived_from(other))
    }

    /// Create an empty instance
    pub fn instantiate(self: &Arc<Self>) -> Instance {
        Instance::new(self)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("bases", &self.bases.iter().map(|base| base.name()).collect::<Vec<_>>())
            .field("fields", &self.fields)
            .finish()
    }
}

/// Declares a schema: bases, local fields, and a completion hook
pub struct SchemaBuilder {
    name: String,
    bases: Vec<Arc<Schema>>,
    locals: Vec<(String, Field)>,
    on_declared: Vec<DeclaredHook>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            locals: Vec::new(),
            on_declared: Vec::new(),
        }
    }

    /// Inherit from `base`. Later bases take precedence for shared names.
    pub fn extends(mut self, base: &Arc<Schema>) -> Self {
        self.bases.push(Arc::clone(base));
        self
    }

    /// Declare a field under `attribute`
    pub fn field(mut self, attribute: impl Into<String>, mut field: Field) -> Self {
        let attribute = attribute.into();
        field.declare(&attribute);
        self.locals.push((attribute, field));
        self
    }

    /// Run `hook` once the schema is declared, before any field attach hooks
    pub fn on_declared<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Schema) + Send + Sync + 'static,
    {
        self.on_declared.push(Arc::new(hook));
        self
    }

    /// Merge the registry, fire hooks, and freeze the schema
    pub fn build(self) -> Arc<Schema> {
        let SchemaBuilder {
            name,
            bases,
            locals,
            on_declared,
        } = self;

        let local_names: Vec<String> =
            locals.iter().map(|(attribute, _)| attribute.clone()).collect();
        let fields = Registry::merge(bases.iter().map(|base| &base.fields), locals);

        let mut annotations = BTreeMap::new();
        for (attribute, field) in fields.iter() {
            if let Some(annotation) = field.annotation() {
                annotations
                    .entry(attribute.to_string())
                    .or_insert_with(|| annotation.to_string());
            }
        }

        let mut schema = Schema {
            name,
            bases,
            fields,
            annotations,
            metadata: Map::new(),
        };

        tracing::debug!(
            schema = %schema.name,
            fields = schema.fields.len(),
            bases = schema.bases.len(),
            "declared schema"
        );

        for hook in &on_declared {
            hook(&schema);
        }

        let mut attached: Vec<&str> = Vec::new();
        let mut pending = Vec::new();
        for attribute in &local_names {
            if attached.contains(&attribute.as_str()) {
                continue;
            }
            attached.push(attribute);
            if let Some(field) = schema.fields.get(attribute) {
                if field.attach_hook().is_some() {
                    pending.push(Arc::clone(field));
                }
            }
        }

        for field in pending {
            if let Some(hook) = field.attach_hook() {
                tracing::trace!(schema = %schema.name, field = %field.name(), "attach hook");
                hook(&mut schema, &field);
            }
        }

        Arc::new(schema)
    }
}
