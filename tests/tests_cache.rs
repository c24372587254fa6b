//! Resolution Cache Tests - Eviction and Concurrency
//!
//! The registry memoizes (visitor kind, node kind) resolutions with
//! last-used stamps and trims to its low watermark when the high
//! watermark is exceeded. Eviction must remove exactly the oldest
//! entries, and lookups must stay consistent when traversals on several
//! threads share one registry.

use std::any::TypeId;
use std::thread;

use arbor::{Kind, KindSet, Registry, Resolution};

// Marker types standing in for distinct visitor kinds.
struct Reader;
struct Printer;
struct Checker;
struct Rewriter;

fn concrete_kinds() -> Vec<Kind> {
    Kind::ALL.into_iter().filter(|k| k.is_concrete()).collect()
}

fn any_node() -> KindSet {
    [Kind::AnyNode].into_iter().collect()
}

#[test]
fn test_eviction_keeps_exactly_the_most_recent() {
    let registry = Registry::with_bounds(4, 8);
    let kinds = concrete_kinds();
    assert_eq!(kinds.len(), 12);

    for &kind in &kinds {
        registry
            .resolution_for(TypeId::of::<Reader>(), "Reader", any_node(), kind)
            .unwrap();
    }

    // The ninth insert crossed the high watermark: entries 0..=4 were the
    // five oldest and got evicted, 5..=8 survived, 9..=11 came after.
    for (index, &kind) in kinds.iter().enumerate() {
        assert_eq!(
            registry.cached(TypeId::of::<Reader>(), kind),
            index >= 5,
            "unexpected cache state for {}",
            kind.name()
        );
    }
    assert_eq!(registry.len(), 7);
}

#[test]
fn test_hits_protect_entries_from_eviction() {
    let registry = Registry::with_bounds(2, 5);
    let kinds = [Kind::Document, Kind::Title, Kind::Body, Kind::Paragraph, Kind::Section];
    for kind in kinds {
        registry
            .resolution_for(TypeId::of::<Reader>(), "Reader", any_node(), kind)
            .unwrap();
    }
    // Touch the two oldest, then overflow: recency, not insertion order,
    // decides survival.
    for kind in [Kind::Document, Kind::Title] {
        registry
            .resolution_for(TypeId::of::<Reader>(), "Reader", any_node(), kind)
            .unwrap();
    }
    registry
        .resolution_for(TypeId::of::<Reader>(), "Reader", any_node(), Kind::Link)
        .unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.cached(TypeId::of::<Reader>(), Kind::Title));
    assert!(registry.cached(TypeId::of::<Reader>(), Kind::Link));
}

#[test]
fn test_eviction_loss_is_invisible_to_lookups() {
    let registry = Registry::with_bounds(2, 4);
    let kinds = concrete_kinds();
    // Two full passes: every lookup after an eviction just re-resolves.
    for _ in 0..2 {
        for &kind in &kinds {
            let got = registry
                .resolution_for(TypeId::of::<Printer>(), "Printer", any_node(), kind)
                .unwrap();
            assert_eq!(got, Resolution::Handler(Kind::AnyNode));
        }
    }
}

#[test]
fn test_clear_resets_the_registry() {
    let registry = Registry::new();
    registry
        .resolution_for(TypeId::of::<Reader>(), "Reader", any_node(), Kind::Text)
        .unwrap();
    assert!(!registry.is_empty());
    registry.clear();
    assert!(registry.is_empty());
    assert!(!registry.cached(TypeId::of::<Reader>(), Kind::Text));
}

#[test]
fn test_concurrent_lookups_stay_consistent() {
    let registry = Registry::with_bounds(8, 16);
    let kinds = concrete_kinds();

    thread::scope(|scope| {
        for worker in 0..4usize {
            let registry = &registry;
            let kinds = &kinds;
            scope.spawn(move || {
                let declared = any_node();
                for round in 0..500usize {
                    let kind = kinds[(worker + round) % kinds.len()];
                    let (id, name) = match worker % 4 {
                        0 => (TypeId::of::<Reader>(), "Reader"),
                        1 => (TypeId::of::<Printer>(), "Printer"),
                        2 => (TypeId::of::<Checker>(), "Checker"),
                        _ => (TypeId::of::<Rewriter>(), "Rewriter"),
                    };
                    let got = registry.resolution_for(id, name, declared, kind).unwrap();
                    assert_eq!(got, Resolution::Handler(Kind::AnyNode));
                }
            });
        }
    });

    // Sweeps ran during the stampede; the registry never ends a call
    // above its high watermark.
    assert!(registry.len() <= 16, "len = {}", registry.len());
}
