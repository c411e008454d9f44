use fieldset::prelude::*;
use fieldset::core::registry::Element;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn assert_shareable<T: Send + Sync>() {}

#[test]
fn test_declarations_are_shareable() {
    assert_shareable::<Schema>();
    assert_shareable::<Field>();
    assert_shareable::<Concern>();
    assert_shareable::<All>();
    assert_shareable::<Token>();
}

#[test]
fn test_fields_built_concurrently_get_distinct_sequences() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                (0..200)
                    .map(|_| Field::data().sequence())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        let sequences = handle.join().unwrap();
        assert!(sequences.windows(2).all(|pair| pair[0] < pair[1]));
        for sequence in sequences {
            assert!(seen.insert(sequence));
        }
    }
    assert_eq!(seen.len(), 8 * 200);
}

#[test]
fn test_schema_shared_across_threads() {
    let schema = Schema::builder("Shared")
        .field("count", Field::validated(Range::new().minimum(0)).with_default(0))
        .build();

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let instance = schema.instantiate();
                instance.set("count", json!(n)).unwrap();
                (instance.sequence(), instance.value("count").unwrap())
            })
        })
        .collect();

    let mut sequences = HashSet::new();
    for (n, handle) in handles.into_iter().enumerate() {
        let (sequence, count) = handle.join().unwrap();
        assert!(sequences.insert(sequence));
        assert_eq!(count, json!(n));
    }
}
