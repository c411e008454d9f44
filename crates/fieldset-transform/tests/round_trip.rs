use fieldset_transform::{
    Array, Boolean, Decimal, Encoding, Integer, Number, SplitTransform, TextTransform, Token,
    Transform, TransformOptions, WebBoolean,
};
use serde_json::{json, Value};
use std::io::Cursor;

#[test]
fn test_integer_round_trip() {
    let integer = Integer::default();
    for value in [i64::MIN, -27, -1, 0, 1, 42, i64::MAX] {
        let text = integer.dumps(json!(value), None).unwrap();
        assert_eq!(integer.loads(&text, None).unwrap(), json!(value), "{}", text);
    }
}

#[test]
fn test_unsigned_integer_round_trip() {
    let integer = Integer::default();
    for value in [i64::MAX as u64 + 1, u64::MAX] {
        let foreign = integer.foreign(json!(value), None).unwrap();
        assert_eq!(integer.native(foreign, None).unwrap(), json!(value));
    }
}

#[test]
fn test_decimal_round_trip() {
    let decimal = Decimal::default();
    for value in [-27.0, -0.5, 0.0, 1.5, 2.15, 1e10] {
        let text = decimal.dumps(json!(value), None).unwrap();
        assert_eq!(decimal.loads(&text, None).unwrap(), json!(value), "{}", text);
    }
}

#[test]
fn test_number_keeps_kind_across_round_trip() {
    let number = Number::default();
    for value in [json!(5), json!(-27), json!(1.5), json!(-27.0)] {
        let text = number.dumps(value.clone(), None).unwrap();
        let loaded = number.loads(&text, None).unwrap();
        assert_eq!(loaded, value);
        assert_eq!(loaded.is_f64(), value.is_f64());
    }
}

#[test]
fn test_boolean_round_trip_with_custom_tokens() {
    let boolean = Boolean::default().truthy(["on"]).falsy(["off"]);
    for flag in [true, false] {
        let text = boolean.dumps(json!(flag), None).unwrap();
        assert_eq!(boolean.loads(&text, None).unwrap(), json!(flag));
    }
    assert_eq!(boolean.dumps(json!(true), None).unwrap(), "on");
}

#[test]
fn test_blank_input_loads_as_null() {
    let transforms: Vec<Box<dyn Transform>> = vec![
        Box::new(Boolean::default()),
        Box::new(Integer::default()),
        Box::new(Decimal::default()),
        Box::new(Number::default()),
        Box::new(Token::tags()),
        Box::new(TextTransform::default()),
    ];

    for transform in &transforms {
        assert_eq!(transform.loads("  ", None).unwrap(), Value::Null);
        assert_eq!(transform.dumps(Value::Null, None).unwrap(), "");
    }
}

#[test]
fn test_split_uses_independent_options() {
    let split = SplitTransform::builder()
        .reader(Array::default())
        .writer(Array::default().separator(" | "))
        .build()
        .unwrap();

    let native = split.loads("foo, bar,baz", None).unwrap();
    assert_eq!(native, json!(["foo", "bar", "baz"]));
    assert_eq!(split.dumps(native, None).unwrap(), "foo|bar|baz");
}

#[test]
fn test_streams_honor_encoding() {
    let options = TransformOptions::new().encoding(Encoding::Latin1);
    let tags = Token::new(options.clone()).separators(" ,");

    let mut input = Cursor::new(b"caf\xe9, th\xe9".to_vec());
    assert_eq!(tags.load(&mut input, None).unwrap(), json!(["café", "thé"]));

    let mut output = Vec::new();
    let written = tags.dump(&mut output, json!(["café", "thé"]), None).unwrap();
    assert_eq!(written, 8);
    assert_eq!(output, b"caf\xe9 th\xe9".to_vec());

    let ascii = TextTransform::new(options.encoding(Encoding::Ascii));
    let mut output = Vec::new();
    assert!(ascii.dump(&mut output, json!("café"), None).is_err());
}

#[test]
fn test_web_boolean_from_form_values() {
    let web = WebBoolean::default();
    assert_eq!(web.native(json!(["false", "on"]), None).unwrap(), json!(true));
    assert_eq!(web.native(json!(["false"]), None).unwrap(), json!(false));
    assert_eq!(web.native(json!([]), None).unwrap(), json!(false));
    assert_eq!(web.dumps(json!(true), None).unwrap(), "true");
}
