use fieldset::prelude::*;
use fieldset::validation::testing::{assert_invalid, assert_valid};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn failing(message: &'static str) -> Callback {
    Callback::new(move |_, _| Err(Concern::new(message)))
}

#[test]
fn test_all_and_pipe_diverge() {
    let all = All::default().with(failing("first")).with(failing("second"));
    let concern = all.validate(json!(1), None).unwrap_err();
    assert_eq!(concern.render(), "first");
    assert!(concern.children().is_empty());

    let pipe = Pipe::default().with(failing("first")).with(failing("second"));
    let concern = pipe.validate(json!(1), None).unwrap_err();
    let children: Vec<String> = concern.children().iter().map(Concern::render).collect();
    assert_eq!(children, ["first", "second"]);
}

#[test]
fn test_any_stops_at_first_success() {
    let evaluated = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evaluated);

    let any = Any::default()
        .with(Never)
        .with(Always)
        .with(Callback::new(move |value, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(value)
        }));

    assert_eq!(any.validate(json!("kept"), None).unwrap(), json!("kept"));
    assert_eq!(evaluated.load(Ordering::SeqCst), 0);
}

#[test]
fn test_iterable_reports_element_index() {
    let iterable = Iterable::default().with(AlwaysTruthy);
    let concern = iterable.validate(json!([true, false]), None).unwrap_err();
    assert!(concern.render().contains('1'));
}

#[test]
fn test_aggregate_severity_is_the_maximum() {
    let warn = Callback::new(|_, _| Err(Concern::with_severity(Severity::Warning, "soft")));
    let critical = Callback::new(|_, _| Err(Concern::with_severity(Severity::Critical, "hard")));

    let concern = Pipe::default().with(warn).with(critical).validate(json!(1), None).unwrap_err();
    assert_eq!(concern.severity(), Severity::Critical);
}

#[test]
fn test_rule_catalog_through_prelude() {
    assert_valid(&In::new(vec![json!("red"), json!("green")]), [json!("red")]);
    assert_invalid(&In::new(vec![json!("red"), json!("green")]), [json!("blue")]);

    let username = All::default()
        .with(InstanceOf::new(ValueKind::String))
        .with(Length::new(LengthBounds::between(3, 9)))
        .with(Pattern::new(r"[a-z]+$").unwrap());
    assert_valid(&username, [json!("alice"), json!("bob")]);

    let concerns = assert_invalid(&username, [json!(27), json!("al"), json!("Alice")]);
    assert_eq!(concerns[0].render(), "Value is not an instance of 'string'.");
    assert!(concerns[1].render().starts_with("Length out of bounds"));
    assert_eq!(concerns[2].render(), "Failed to match required pattern.");
}

#[test]
fn test_mapping_of_scores() {
    let scores = Mapping::default().with(Range::new().maximum(100)).require(Require::All);
    assert_valid(&scores, [json!({"alice": 90, "bob": 75})]);

    let concern = scores.validate(json!({"alice": 90, "bob": 175}), None).unwrap_err();
    assert_eq!(concern.render(), "Element 'bob': Too large; must be less than 100.");
}

#[test]
fn test_transform_then_validate() {
    let schema = Schema::builder("Filter")
        .field("limit", Field::validated(Range::between(1, 50)).with_default(10))
        .field("tags", Field::validated(Iterable::default().with(Length::non_empty())))
        .build();
    let filter = schema.instantiate();

    let limit = Integer::default().loads("25", None).unwrap();
    filter.set("limit", limit).unwrap();
    assert_eq!(filter.value("limit").unwrap(), json!(25));

    let limit = Integer::default().loads("500", None).unwrap();
    assert!(filter.set("limit", limit).is_err());
    assert_eq!(filter.value("limit").unwrap(), json!(25));

    let tags = Token::tags().loads("Rust, cargo", None).unwrap();
    filter.set("tags", tags).unwrap();
    assert_eq!(filter.value("tags").unwrap(), json!(["rust", "cargo"]));
}
