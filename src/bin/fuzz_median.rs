//! AFL fuzz harness for the median list
//!
//! Replays a byte-encoded operation stream against `MedianList` and the
//! sorted-vector oracle and checks after every step:
//! 1. Order: values never decrease from tail to head, links are symmetric
//! 2. Median: the tracked median equals the oracle's, relations match rank
//! 3. Atomicity: a rejected operation leaves the list exactly as it was
//! 4. Contents: accepted operations are replayed into the oracle, and both
//!    must hold the same values

use afl::fuzz;
use median_list::list::{HintPolicy, ListConfig, MedianList};
use reference::NaiveMedian;

/// Keys are drawn from a small pool so removes and updates often hit.
const KEY_POOL: u8 = 32;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Insert with raw key hints, which may be wrong or absent
    Insert { key: u8, value: u8, lesser: u8, greater: u8 },
    /// Insert with a scan
    InsertUnhinted { key: u8, value: u8 },
    Remove { key: u8 },
    /// Update with raw key hints
    Update { key: u8, value: u8, lesser: u8, greater: u8 },
    PopN { n: u8 },
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 5;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 4 => {
                let op = FuzzOp::Insert {
                    key: rest[0] % KEY_POOL,
                    value: rest[1],
                    lesser: rest[2],
                    greater: rest[3],
                };
                Some((op, &rest[4..]))
            }
            1 if rest.len() >= 2 => {
                let op = FuzzOp::InsertUnhinted {
                    key: rest[0] % KEY_POOL,
                    value: rest[1],
                };
                Some((op, &rest[2..]))
            }
            2 if !rest.is_empty() => Some((FuzzOp::Remove { key: rest[0] % KEY_POOL }, &rest[1..])),
            3 if rest.len() >= 4 => {
                let op = FuzzOp::Update {
                    key: rest[0] % KEY_POOL,
                    value: rest[1],
                    lesser: rest[2],
                    greater: rest[3],
                };
                Some((op, &rest[4..]))
            }
            4 if !rest.is_empty() => Some((FuzzOp::PopN { n: rest[0] % 4 }, &rest[1..])),
            _ => None,
        }
    }
}

/// Hint byte to key: values at or above the pool size mean "no hint".
fn hint(byte: u8) -> Option<u8> {
    if byte < KEY_POOL {
        return Some(byte);
    }
    return None;
}

fn main() {
    fuzz!(|data: &[u8]| {
        // First byte picks the hint policy so both paths get coverage
        let Some((&policy, mut remaining)) = data.split_first() else {
            return;
        };
        let policy = if policy % 2 == 0 { HintPolicy::Strict } else { HintPolicy::ScanOnMiss };
        let config = ListConfig::default().with_hint_policy(policy);

        let mut list: MedianList<u8, u8> = MedianList::with_config(&config);
        let mut naive: NaiveMedian<u8, u8> = NaiveMedian::new();

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;
            let before = list.elements();
            let median_before = list.median();

            let accepted = match op {
                FuzzOp::Insert { key, value, lesser, greater } => {
                    let ok = list.insert(key, value, hint(lesser), hint(greater)).is_ok();
                    if ok {
                        assert!(naive.insert(key, value), "Oracle already held {}", key);
                    }
                    ok
                }
                FuzzOp::InsertUnhinted { key, value } => {
                    let ok = list.insert_unhinted(key, value).is_ok();
                    if ok {
                        assert!(naive.insert(key, value), "Oracle already held {}", key);
                    }
                    ok
                }
                FuzzOp::Remove { key } => match list.remove(key) {
                    Ok(value) => {
                        assert_eq!(naive.remove(key), Some(value), "Removed value mismatch");
                        true
                    }
                    Err(_) => false,
                },
                FuzzOp::Update { key, value, lesser, greater } => {
                    let old = list.value(key);
                    let ok = list.update(key, value, hint(lesser), hint(greater)).is_ok();
                    if ok {
                        assert_eq!(naive.remove(key), old, "Updated value mismatch");
                        naive.insert(key, value);
                    }
                    ok
                }
                FuzzOp::PopN { n } => match list.pop_n(n as usize) {
                    Ok(keys) => {
                        // Equal values at the cut may be split differently, so
                        // the popped values are pinned and the list's keys dropped
                        let expected = naive.smallest_values(keys.len());
                        let popped: Vec<Option<u8>> = keys.iter().map(|&key| naive.remove(key)).collect();
                        let expected: Vec<Option<u8>> = expected.into_iter().map(Some).collect();
                        assert_eq!(popped, expected, "Popped values mismatch");
                        true
                    }
                    Err(_) => false,
                },
            };

            if !accepted {
                assert_eq!(list.elements(), before, "Rejected {:?} changed the list", op);
                assert_eq!(list.median(), median_before, "Rejected {:?} moved the median", op);
                continue;
            }

            let values: Vec<u8> = list.elements().into_iter().map(|(_, v)| v).collect();
            assert_eq!(values, naive.values(), "Contents diverged after {:?}", op);
            list.assert_consistent();
            assert_eq!(
                list.median_value(),
                naive.median_value(),
                "Median mismatch after {:?}",
                op
            );
            if policy == HintPolicy::ScanOnMiss {
                if let FuzzOp::Insert { key, .. } = op {
                    assert!(list.contains(key));
                }
            }
        }

        assert_eq!(list.len(), naive.len(), "Length mismatch");
    });
}
