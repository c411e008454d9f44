use fieldset::core::registry::Element;
use fieldset::core::sequence;
use fieldset::prelude::*;
use serial_test::serial;

#[test]
#[serial]
fn test_reset_rewinds_the_counter() {
    Field::data();
    sequence::reset();

    assert_eq!(sequence::peek(), 0);
    assert_eq!(Field::data().sequence(), 0);
    assert_eq!(Field::data().sequence(), 1);
}

#[test]
#[serial]
fn test_declaration_order_after_reset() {
    sequence::reset();

    let schema = Schema::builder("Ordered")
        .field("first", Field::data())
        .field("second", Field::data())
        .build();

    let sequences: Vec<u64> = schema.fields().values().map(|field| field.sequence()).collect();
    assert_eq!(sequences, [0, 1]);
}

#[test]
#[serial]
fn test_mutating_defaults_before_declaration() {
    let mut field = Field::data();
    field.set_default(Some(Deferred::literal(json!("fallback"))));
    field.set_assign(true);

    let schema = Schema::builder("Mutated").field("value", field).build();
    let instance = schema.instantiate();

    assert_eq!(instance.value("value").unwrap(), json!("fallback"));
    assert_eq!(instance.to_json(), json!({"value": "fallback"}));
}
