//! Compound validators
//!
//! A [`Compound`] gathers child rules from two places: named rules declared
//! on it (merged with the same ordered registry schemas use, so inheriting
//! and overriding keep positions stable) followed by validators appended as a
//! plain list. [`All`], [`Any`], [`Pipe`], [`Iterable`], and [`Mapping`] wrap a
//! compound and differ only in how they evaluate and aggregate.

use fieldset_core::value::repr;
use fieldset_core::{sequence, Concern, Context, Element, Registry, ValidationResult, Validator};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// A validator declared by name on a compound
#[derive(Clone)]
pub struct Rule {
    sequence: u64,
    validator: Arc<dyn Validator>,
}

impl Rule {
    pub fn new<V>(validator: V) -> Self
    where
        V: Validator + 'static,
    {
        Self::from_arc(Arc::new(validator))
    }

    pub fn from_arc(validator: Arc<dyn Validator>) -> Self {
        Self {
            sequence: sequence::next(),
            validator,
        }
    }

    pub fn validator(&self) -> &Arc<dyn Validator> {
        &self.validator
    }
}

impl Element for Rule {
    fn sequence(&self) -> u64 {
        self.sequence
    }

    fn set_sequence(&mut self, sequence: u64) {
        self.sequence = sequence;
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("sequence", &self.sequence)
            .field("validator", &self.validator.rule_name())
            .finish()
    }
}

/// The child rules of a compound validator
#[derive(Clone, Default)]
pub struct Compound {
    rules: Registry<Rule>,
    validators: Vec<Arc<dyn Validator>>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a named rule. Redeclaring a name replaces the rule in place.
    pub fn declare<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.rules = Registry::merge([&self.rules], vec![(name.into(), Rule::new(validator))]);
        self
    }

    /// Inherit the named rules of `base`. Rules already declared here that
    /// share a name with one of `base` take over its position.
    pub fn inherit<C>(mut self, base: &C) -> Self
    where
        C: AsRef<Compound>,
    {
        let locals = self
            .rules
            .iter()
            .map(|(name, rule)| (name.to_string(), Rule::clone(rule)))
            .collect();
        self.rules = Registry::merge([&base.as_ref().rules], locals);
        self
    }

    /// Append a validator after every declared rule
    pub fn with<V>(mut self, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Append already shared validators
    pub fn extend<I>(mut self, validators: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Validator>>,
    {
        self.validators.extend(validators);
        self
    }

    pub fn rules(&self) -> &Registry<Rule> {
        &self.rules
    }

    /// Every child rule in evaluation order: declared rules, then appended ones
    pub fn children(&self) -> Vec<Arc<dyn Validator>> {
        self.rules
            .values()
            .map(|rule| Arc::clone(&rule.validator))
            .chain(self.validators.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len() + self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AsRef<Compound> for Compound {
    fn as_ref(&self) -> &Compound {
        self
    }
}

impl fmt::Debug for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compound")
            .field("rules", &self.rules)
            .field(
                "validators",
                &self.validators.iter().map(|v| v.rule_name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn run_all(
    children: &[Arc<dyn Validator>],
    mut value: Value,
    context: Context<'_>,
) -> ValidationResult<Value> {
    for child in children {
        value = child.validate(value, context)?;
    }
    Ok(value)
}

fn run_any(
    children: &[Arc<dyn Validator>],
    value: Value,
    context: Context<'_>,
) -> ValidationResult<Value> {
    if children.is_empty() {
        return Ok(value);
    }

    let mut failures = Vec::new();
    for child in children {
        match child.validate(value.clone(), context) {
            Ok(value) => return Ok(value),
            Err(concern) => failures.push(concern),
        }
    }

    tracing::trace!(failures = failures.len(), "any: every child failed");
    Err(Concern::aggregate("All validators failed.", failures))
}

fn run_pipe(
    children: &[Arc<dyn Validator>],
    mut value: Value,
    context: Context<'_>,
) -> ValidationResult<Value> {
    let mut failures = Vec::new();
    for child in children {
        match child.validate(value.clone(), context) {
            Ok(next) => value = next,
            Err(concern) => failures.push(concern),
        }
    }

    if failures.is_empty() {
        Ok(value)
    } else {
        tracing::trace!(failures = failures.len(), "pipe: collected failures");
        Err(Concern::aggregate("One or more validators failed.", failures))
    }
}

/// How [`Iterable`] and [`Mapping`] combine their children per element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Require {
    /// Every child must pass, stopping at the first failure
    #[default]
    All,
    /// At least one child must pass
    Any,
    /// Every child must pass, and every failure is reported
    Pipe,
}

impl Require {
    pub fn apply(
        &self,
        children: &[Arc<dyn Validator>],
        value: Value,
        context: Context<'_>,
    ) -> ValidationResult<Value> {
        match self {
            Require::All => run_all(children, value, context),
            Require::Any => run_any(children, value, context),
            Require::Pipe => run_pipe(children, value, context),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Require::All => "all",
            Require::Any => "any",
            Require::Pipe => "pipe",
        }
    }
}

/// One concern passes through untouched; several are wrapped.
fn collect_element_failures(mut concerns: Vec<Concern>) -> ValidationResult<()> {
    match concerns.len() {
        0 => Ok(()),
        1 => Err(concerns.remove(0)),
        count => {
            tracing::trace!(failures = count, "element failures aggregated");
            Err(Concern::aggregate("Multiple validation concerns.", concerns))
        }
    }
}

macro_rules! compound_validator {
    ($name:ident) => {
        impl $name {
            /// Evaluate `validators` in the given order
            pub fn new<I>(validators: I) -> Self
            where
                I: IntoIterator<Item = Arc<dyn Validator>>,
            {
                Self::from(Compound::new().extend(validators))
            }

            /// Declare a named rule
            pub fn declare<V>(mut self, name: impl Into<String>, validator: V) -> Self
            where
                V: Validator + 'static,
            {
                self.compound = self.compound.declare(name, validator);
                self
            }

            /// Inherit the named rules of another compound
            pub fn inherit<C>(mut self, base: &C) -> Self
            where
                C: AsRef<Compound>,
            {
                self.compound = self.compound.inherit(base);
                self
            }

            /// Append a validator
            pub fn with<V>(mut self, validator: V) -> Self
            where
                V: Validator + 'static,
            {
                self.compound = self.compound.with(validator);
                self
            }

            pub fn compound(&self) -> &Compound {
                &self.compound
            }
        }

        impl From<Compound> for $name {
            fn from(compound: Compound) -> Self {
                let mut this = Self::default();
                this.compound = compound;
                this
            }
        }

        impl AsRef<Compound> for $name {
            fn as_ref(&self) -> &Compound {
                &self.compound
            }
        }
    };
}

/// Every child must pass; the first failure is returned as-is, and each
/// success feeds its value to the next child.
#[derive(Debug, Clone, Default)]
pub struct All {
    compound: Compound,
}

compound_validator!(All);

impl Validator for All {
    fn validate(&self, value: Value, context: Context<'_>) -> ValidationResult<Value> {
        run_all(&self.compound.children(), value, context)
    }

    fn rule_name(&self) -> &'static str {
        "all"
    }
}

/// The first child to pass wins. If all fail, the failures are aggregated.
/// No children means success.
#[derive(Debug, Clone, Default)]
pub struct Any {
    compound: Compound,
}

compound_validator!(Any);

impl Validator for Any {
    fn validate(&self, value: Value, context: Context<'_>) -> ValidationResult<Value> {
        run_any(&self.compound.children(), value, context)
    }

    fn rule_name(&self) -> &'static str {
        "any"
    }
}

/// Every child runs. Successes chain their values; failures are collected
/// and reported together.
#[derive(Debug, Clone, Default)]
pub struct Pipe {
    compound: Compound,
}

compound_validator!(Pipe);

impl Validator for Pipe {
    fn validate(&self, value: Value, context: Context<'_>) -> ValidationResult<Value> {
        run_pipe(&self.compound.children(), value, context)
    }

    fn rule_name(&self) -> &'static str {
        "pipe"
    }
}

/// Validate every element of a sequence.
///
/// Arrays yield their elements, strings their characters, and objects their
/// keys. Failure messages are prefixed with the element's index. The value
/// itself is returned unchanged.
#[derive(Debug, Clone, Default)]
pub struct Iterable {
    compound: Compound,
    require: Require,
}

compound_validator!(Iterable);

impl Iterable {
    pub fn require(mut self, require: Require) -> Self {
        self.require = require;
        self
    }
}

impl Validator for Iterable {
    fn validate(&self, value: Value, context: Context<'_>) -> ValidationResult<Value> {
        let elements: Vec<Value> = match &value {
            Value::Array(items) => items.clone(),
            Value::String(text) => text.chars().map(|c| Value::String(c.to_string())).collect(),
            Value::Object(map) => map.keys().cloned().map(Value::String).collect(),
            _ => return Err(Concern::new("Value must be iterable.")),
        };

        let children = self.compound.children();
        let concerns = elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| {
                self.require
                    .apply(&children, element, context)
                    .err()
                    .map(|concern| concern.prefixed(&format!("Element {}: ", index)))
            })
            .collect();

        collect_element_failures(concerns)?;
        Ok(value)
    }

    fn rule_name(&self) -> &'static str {
        "iterable"
    }

    fn parameters(&self) -> Option<Value> {
        Some(json!({ "require": self.require.name() }))
    }
}

/// Validate every value of an object. Failure messages name the key.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    compound: Compound,
    require: Require,
}

compound_validator!(Mapping);

impl Mapping {
    pub fn require(mut self, require: Require) -> Self {
        self.require = require;
        self
    }
}

impl Validator for Mapping {
    fn validate(&self, value: Value, context: Context<'_>) -> ValidationResult<Value> {
        let map = match &value {
            Value::Object(map) => map,
            _ => return Err(Concern::new("Value must be a mapping.")),
        };

        let children = self.compound.children();
        let concerns = map
            .iter()
            .filter_map(|(key, element)| {
                self.require
                    .apply(&children, element.clone(), context)
                    .err()
                    .map(|concern| {
                        let key = repr(&Value::String(key.clone()));
                        concern.prefixed(&format!("Element {}: ", key))
                    })
            })
            .collect();

        collect_element_failures(concerns)?;
        Ok(value)
    }

    fn rule_name(&self) -> &'static str {
        "mapping"
    }

    fn parameters(&self) -> Option<Value> {
        Some(json!({ "require": self.require.name() }))
    }
}
