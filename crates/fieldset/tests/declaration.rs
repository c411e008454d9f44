use fieldset::prelude::*;
use fieldset::core::registry::Element;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn sample() -> Arc<Schema> {
    Schema::builder("Sample")
        .field("foo", Field::data().with_default(Value::Null))
        .field("bar", Field::data().with_default(42).assign(true))
        .field("baz", Field::data())
        .build()
}

#[test]
fn test_sample_defaults() {
    let schema = sample();
    let instance = schema.instantiate();

    assert_eq!(instance.value("bar").unwrap(), json!(42));
    assert_eq!(instance.to_json(), json!({"bar": 42}));

    assert_eq!(instance.value("foo").unwrap(), Value::Null);
    assert!(instance.raw("foo").is_none());

    let error = instance.value("baz").unwrap_err();
    assert!(error.is_missing());
    assert!(instance.delete("baz").unwrap_err().is_missing());
}

#[test]
fn test_unknown_field() {
    let instance = sample().instantiate();
    let error = instance.value("nope").unwrap_err();
    assert!(matches!(error, SchemaError::UnknownField { .. }));
}

#[test]
fn test_factory_default_without_assignment() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let schema = Schema::builder("Counter")
        .field(
            "value",
            Field::data().default_factory(move || json!(counter.fetch_add(1, Ordering::SeqCst))),
        )
        .build();
    let instance = schema.instantiate();

    assert_eq!(instance.value("value").unwrap(), json!(0));
    assert_eq!(instance.value("value").unwrap(), json!(1));
    assert!(instance.store().is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_factory_default_with_assignment() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let schema = Schema::builder("Counter")
        .field(
            "value",
            Field::data()
                .default_factory(move || json!(counter.fetch_add(1, Ordering::SeqCst)))
                .assign(true),
        )
        .build();
    let instance = schema.instantiate();

    assert_eq!(instance.value("value").unwrap(), json!(0));
    assert_eq!(instance.value("value").unwrap(), json!(0));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_inherited_order_and_override_position() {
    let base = Schema::builder("Base")
        .field("a", Field::data())
        .field("b", Field::data())
        .build();
    let derived = Schema::builder("Derived")
        .extends(&base)
        .field("c", Field::data())
        .field("a", Field::data().with_default("override"))
        .build();

    let names: Vec<&str> = derived.fields().names().collect();
    assert_eq!(names, ["a", "b", "c"]);

    let inherited = base.field("a").unwrap().sequence();
    assert_eq!(derived.field("a").unwrap().sequence(), inherited);
    assert_eq!(derived.instantiate().value("a").unwrap(), json!("override"));
    assert!(derived.is_derived_from(&base));
    assert!(!base.is_derived_from(&derived));
}

#[test]
fn test_inheriting_without_overrides_shares_entries() {
    let base = Schema::builder("Base")
        .field("a", Field::data())
        .field("b", Field::data())
        .build();
    let derived = Schema::builder("Derived").extends(&base).build();

    let base_entries: Vec<_> = base.fields().iter().collect();
    let derived_entries: Vec<_> = derived.fields().iter().collect();
    assert_eq!(base_entries.len(), derived_entries.len());
    for ((base_name, base_field), (name, field)) in base_entries.into_iter().zip(derived_entries) {
        assert_eq!(base_name, name);
        assert!(Arc::ptr_eq(base_field, field));
    }
}

#[test]
fn test_later_base_wins() {
    let left = Schema::builder("Left")
        .field("shared", Field::data().with_default("left"))
        .build();
    let right = Schema::builder("Right")
        .field("shared", Field::data().with_default("right"))
        .build();
    let both = Schema::builder("Both").extends(&left).extends(&right).build();

    assert_eq!(both.instantiate().value("shared").unwrap(), json!("right"));
}

#[test]
fn test_hooks_and_metadata() {
    let declared = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&declared);

    let schema = Schema::builder("Hooked")
        .field(
            "title",
            Field::data()
                .annotate("str")
                .on_attach(|schema, field| schema.set_meta("indexed", field.name())),
        )
        .on_declared(move |schema| {
            assert_eq!(schema.fields().len(), 1);
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    assert_eq!(declared.load(Ordering::SeqCst), 1);
    assert_eq!(schema.meta("indexed"), Some(&json!("title")));
    assert_eq!(schema.annotations().get("title").map(String::as_str), Some("str"));
}

#[test]
fn test_alias_and_callback_fields() {
    let schema = Schema::builder("Aliased")
        .field("display", Field::data().alias("_display"))
        .field("now", Field::callback())
        .build();
    let instance = schema.instantiate();

    instance.set("display", json!("shown")).unwrap();
    assert_eq!(instance.raw("_display"), Some(Slot::from(json!("shown"))));

    instance.set("now", Slot::callable(|| json!(1700000000))).unwrap();
    assert_eq!(instance.value("now").unwrap(), json!(1700000000));
    assert!(instance.raw("now").unwrap().is_callable());
}
