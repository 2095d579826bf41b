//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the LRU against a naive recency-list model.

use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};

use crate::cache::{LruCache, LruCore};

// == Strategies ==
/// Keys from a small alphabet so sequences revisit keys often.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{0,16}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Put { key, value }),
        2 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

// == Model ==
/// O(n) reference LRU: front = most recently used.
struct Model {
    order: VecDeque<String>,
    values: HashMap<String, String>,
    capacity: usize,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Self {
            order: VecDeque::new(),
            values: HashMap::new(),
            capacity,
        }
    }

    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.push_front(key.to_string());
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let value = self.values.get(key).cloned()?;
        self.touch(key);
        Some(value)
    }

    fn put(&mut self, key: &str, value: &str) -> Option<String> {
        let is_new = self.values.insert(key.to_string(), value.to_string()).is_none();
        self.touch(key);
        if is_new && self.order.len() > self.capacity {
            let evicted = self.order.pop_back()?;
            self.values.remove(&evicted);
            return Some(evicted);
        }
        None
    }

    fn delete(&mut self, key: &str) {
        self.values.remove(key);
        self.order.retain(|k| k != key);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // After every put the cache holds at most `capacity` distinct keys.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..8,
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..100)
    ) {
        let mut lru = LruCore::new(capacity).unwrap();

        for (key, value) in entries {
            lru.put(key, value);
            prop_assert!(lru.len() <= capacity, "len {} > capacity {}", lru.len(), capacity);
        }
    }

    // Any operation sequence leaves the cache agreeing with the model:
    // same values, same recency order, same evicted key on every overflow.
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let mut lru = LruCore::new(capacity).unwrap();
        let mut model = Model::new(capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    let evicted = lru.put(key.clone(), value.clone()).map(|e| e.key);
                    prop_assert_eq!(evicted, model.put(&key, &value));
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(lru.get(&key).cloned(), model.get(&key));
                }
                CacheOp::Delete { key } => {
                    lru.delete(&key);
                    model.delete(&key);
                }
            }

            prop_assert!(lru.is_consistent());
            let expected: Vec<String> = model.order.iter().cloned().collect();
            prop_assert_eq!(lru.keys_mru(), expected);
        }
    }

    // The key evicted on overflow is the least recently touched resident.
    #[test]
    fn prop_evicts_least_recently_touched(
        capacity in 2usize..6,
        touches in prop::collection::vec(0usize..6, 0..20)
    ) {
        let mut lru = LruCore::new(capacity).unwrap();
        for i in 0..capacity {
            lru.put(format!("k{}", i), "v".to_string());
        }

        let mut last_touch: HashMap<String, usize> =
            (0..capacity).map(|i| (format!("k{}", i), i)).collect();
        for (step, t) in touches.into_iter().enumerate() {
            let key = format!("k{}", t % capacity);
            lru.get(&key);
            last_touch.insert(key, capacity + step);
        }

        let oldest = last_touch
            .iter()
            .min_by_key(|&(_, at)| *at)
            .map(|(k, _)| k.clone());

        let evicted = lru.put("fresh".to_string(), "v".to_string()).map(|e| e.key);
        prop_assert_eq!(evicted, oldest);
        prop_assert_eq!(lru.len(), capacity);
    }

    // Overwriting a key keeps one entry and returns the newest value.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let cache = LruCache::new(4).unwrap();

        cache.put(key.as_str(), value1);
        cache.put(key.as_str(), value2.clone());

        prop_assert_eq!(cache.get(&key), Some(value2));
        prop_assert_eq!(cache.len(), 1);
    }

    // Deleted keys are gone and the rest of the cache is untouched.
    #[test]
    fn prop_delete_removes_only_target(
        keys in prop::collection::hash_set(key_strategy(), 2..8),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let cache = LruCache::new(keys.len()).unwrap();
        for key in &keys {
            cache.put(key.as_str(), "v");
        }

        prop_assert!(cache.delete(&keys[0]));
        prop_assert_eq!(cache.get(&keys[0]), None);
        for key in &keys[1..] {
            prop_assert!(cache.contains(key));
        }
        prop_assert!(cache.is_consistent());
    }
}
