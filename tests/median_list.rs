//! Tests for the median list API: the worked scenario, boundaries, and the
//! error taxonomy seen from the top-level type.

use median_list::key::Key;
use median_list::list::HintPolicy;
use median_list::list::ListConfig;
use median_list::list::ListError;
use median_list::list::MedianList;
use median_list::list::Relation;

// =============================================================================
// Helper functions
// =============================================================================

fn key(name: &str) -> Key {
    return Key::derive(name.as_bytes());
}

/// A list holding `(name, value)` pairs, inserted with a scan.
fn list_of(pairs: &[(&str, u64)]) -> MedianList<Key, u64> {
    let mut list = MedianList::new();
    for &(name, value) in pairs {
        list.insert_unhinted(key(name), value).unwrap();
    }
    list.assert_consistent();
    return list;
}

fn values(list: &MedianList<Key, u64>) -> Vec<u64> {
    return list.elements().into_iter().map(|(_, v)| v).collect();
}

// =============================================================================
// Worked scenario
// =============================================================================

#[test]
fn scenario_insert_remove_insert() {
    let (a, b, c, d) = (key("A"), key("B"), key("C"), key("D"));
    let mut list = MedianList::new();

    list.insert(a, 10u64, None, None).unwrap();
    list.insert(b, 20, None, None).unwrap();
    list.insert(c, 5, None, None).unwrap();
    assert_eq!(list.keys(), vec![c, a, b]);
    assert_eq!(list.median(), Some(a));
    assert_eq!(list.median_value(), Some(10));

    list.remove(a).unwrap();
    assert_eq!(list.keys(), vec![c, b]);
    assert_eq!(list.median(), Some(c));
    assert_eq!(list.median_value(), Some(5));

    // 15 sits between C and B
    list.insert(d, 15, Some(c), Some(b)).unwrap();
    assert_eq!(list.keys(), vec![c, d, b]);
    assert_eq!(values(&list), vec![5, 15, 20]);
    assert_eq!(list.median(), Some(d));
    assert_eq!(list.median_value(), Some(15));

    assert_eq!(list.relation(c), Relation::Lesser);
    assert_eq!(list.relation(d), Relation::Equal);
    assert_eq!(list.relation(b), Relation::Greater);
    assert_eq!(list.relation(a), Relation::Undefined);
    list.assert_consistent();
}

#[test]
fn scenario_with_zero_hints_for_d_fails_cleanly() {
    let (a, b, c, d) = (key("A"), key("B"), key("C"), key("D"));
    let mut list = MedianList::new();
    list.insert(a, 10u64, None, None).unwrap();
    list.insert(b, 20, None, None).unwrap();
    list.insert(c, 5, None, None).unwrap();
    list.remove(a).unwrap();

    // Neither end fits 15, and there is nothing else to try
    assert_eq!(list.insert(d, 15, None, None), Err(ListError::NoValidPosition));
    assert_eq!(list.keys(), vec![c, b]);
    assert_eq!(list.median(), Some(c));
}

// =============================================================================
// Boundaries
// =============================================================================

#[test]
fn head_n_zero_is_empty() {
    let list = list_of(&[("a", 1), ("b", 2)]);
    assert_eq!(list.head_n(0).unwrap(), Vec::<Key>::new());
}

#[test]
fn head_n_walks_down_from_largest() {
    let list = list_of(&[("a", 1), ("b", 3), ("c", 2)]);
    assert_eq!(list.head_n(2).unwrap(), vec![key("b"), key("c")]);
}

#[test]
fn pop_n_everything_returns_ascending() {
    let mut list = list_of(&[("a", 40), ("b", 10), ("c", 30), ("d", 20)]);
    let popped = list.pop_n(4).unwrap();
    assert_eq!(popped, vec![key("b"), key("d"), key("c"), key("a")]);
    assert!(list.is_empty());
    assert_eq!(list.median(), None);
    assert_eq!(list.head(), None);
    assert_eq!(list.tail(), None);
    list.assert_consistent();
}

#[test]
fn pop_n_too_many_changes_nothing() {
    let mut list = list_of(&[("a", 1), ("b", 2)]);
    assert_eq!(
        list.pop_n(3),
        Err(ListError::InsufficientElements { requested: 3, available: 2 })
    );
    assert_eq!(list.len(), 2);
}

#[test]
fn single_element_lifecycle() {
    let mut list = MedianList::new();
    let a = key("a");
    list.insert(a, 1u64, None, None).unwrap();
    assert_eq!(list.head(), Some(a));
    assert_eq!(list.tail(), Some(a));
    assert_eq!(list.median(), Some(a));

    assert_eq!(list.remove(a), Ok(1));
    assert!(list.is_empty());
    assert_eq!(list.median(), None);

    // Reinserting starts over as a new element
    list.insert(a, 2, None, None).unwrap();
    assert_eq!(list.value(a), Some(2));
    list.assert_consistent();
}

#[test]
fn zero_byte_key_is_an_ordinary_key() {
    let zero = Key::new([0u8; 32]);
    let mut list = MedianList::new();
    list.insert(zero, 5u64, None, None).unwrap();
    list.insert(key("x"), 6, Some(zero), None).unwrap();
    assert_eq!(list.tail(), Some(zero));
    assert_eq!(list.median(), Some(zero));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn error_kinds_from_top_level() {
    let mut list = list_of(&[("a", 10), ("b", 20), ("c", 30)]);
    let (a, b, c, z) = (key("a"), key("b"), key("c"), key("z"));

    assert_eq!(list.insert(a, 15, None, None), Err(ListError::InvalidKey));
    assert_eq!(list.insert(z, 15, Some(z), None), Err(ListError::InvalidKey));
    assert_eq!(list.insert(z, 15, Some(key("nope")), None), Err(ListError::DanglingNeighbor));
    assert_eq!(list.insert(z, 35, Some(a), Some(b)), Err(ListError::NoValidPosition));
    assert_eq!(list.remove(z), Err(ListError::NotFound));
    assert_eq!(list.update(z, 1, None, None), Err(ListError::NotFound));
    assert_eq!(list.update(c, 1, Some(c), None), Err(ListError::InvalidKey));

    assert_eq!(values(&list), vec![10, 20, 30]);
    assert_eq!(list.median(), Some(b));
    list.assert_consistent();
}

#[test]
fn capacity_bounds_inserts_not_updates() {
    let config = ListConfig::default().with_capacity(3);
    let mut list = MedianList::with_config(&config);
    for (i, value) in [10u64, 20, 30].into_iter().enumerate() {
        list.insert_unhinted(Key::from_u64(i as u64), value).unwrap();
    }
    assert_eq!(
        list.insert_unhinted(Key::from_u64(9), 40),
        Err(ListError::CapacityExceeded { capacity: 3 })
    );

    list.update(Key::from_u64(0), 50, None, None).unwrap();
    assert_eq!(list.median_value(), Some(30));
    list.assert_consistent();
}

// =============================================================================
// Hints
// =============================================================================

#[test]
fn locate_produces_working_hints() {
    let mut list = list_of(&[("a", 10), ("b", 20), ("c", 30), ("d", 40)]);
    let (lesser, greater) = list.locate(25);
    list.insert(key("e"), 25, lesser, greater).unwrap();
    assert_eq!(values(&list), vec![10, 20, 25, 30, 40]);
    assert_eq!(list.median_value(), Some(25));
}

#[test]
fn scan_on_miss_policy_never_reports_no_valid_position() {
    let config = ListConfig::default().with_hint_policy(HintPolicy::ScanOnMiss);
    let mut list = MedianList::with_config(&config);
    for i in 0..20u64 {
        // Always hint the tail, which is almost always wrong
        let tail = list.tail();
        list.insert(Key::from_u64(i), (i * 37) % 101, tail, None).unwrap();
    }
    list.assert_consistent();
    assert_eq!(list.len(), 20);
}

#[test]
fn push_adds_default_at_tail() {
    let mut list = list_of(&[("a", 10), ("b", 20)]);
    list.push(key("p")).unwrap();
    assert_eq!(list.tail(), Some(key("p")));
    assert_eq!(list.value(key("p")), Some(0));
    assert_eq!(list.median(), Some(key("a")));
    list.assert_consistent();
}
