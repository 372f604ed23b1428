/// Ephemeral cache tests
///
/// Registration, lookup and reclamation behaviour of the weak-reference cache
/// Run with: cargo test --test cache_tests

use fieldguard::{CacheError, EphemeralCache, Value};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, PartialEq)]
struct Session {
    user: String,
}

fn session(user: &str) -> Rc<Session> {
    Rc::new(Session { user: user.into() })
}

#[test]
fn test_lookup_by_semantic_key() {
    let mut cache: EphemeralCache<String, Session> = EphemeralCache::new();
    let s = session("alice");

    cache.add("alice".to_string(), &s).unwrap();

    let found = cache.get(&"alice".to_string()).unwrap().unwrap();
    assert!(Rc::ptr_eq(&found, &s));
    assert!(cache.get(&"bob".to_string()).unwrap().is_none());
}

#[test]
fn test_entry_vanishes_when_last_holder_drops() {
    let mut cache: EphemeralCache<u32, Session> = EphemeralCache::new();
    let s = session("alice");
    let other_holder = Rc::clone(&s);
    cache.add(1, &s).unwrap();

    drop(s);
    assert!(cache.get(&1).unwrap().is_some());
    assert_eq!(cache.size(), 1);

    drop(other_holder);
    assert!(cache.get(&1).unwrap().is_none());
    assert_eq!(cache.size(), 0);
}

#[test]
fn test_size_drops_without_cache_calls() {
    let mut cache: EphemeralCache<u32, Session> = EphemeralCache::new();
    let sessions: Vec<_> = (0..4).map(|i| session(&format!("u{}", i))).collect();
    for (i, s) in sessions.iter().enumerate() {
        cache.add(i as u32, s).unwrap();
    }
    assert_eq!(cache.size(), 4);

    let mut sessions = sessions;
    sessions.truncate(1);

    assert_eq!(cache.size(), 1);
    assert_eq!(cache.keys(), vec![0]);
}

#[test]
fn test_replacing_key_keeps_old_object_alive_elsewhere() {
    let mut cache: EphemeralCache<u32, Session> = EphemeralCache::new();
    let old = session("old");
    let new = session("new");

    cache.add(7, &old).unwrap();
    cache.add(7, &new).unwrap();

    assert_eq!(cache.get(&7).unwrap().unwrap().user, "new");
    assert_eq!(old.user, "old");
    assert_eq!(Rc::strong_count(&old), 1);
    assert_eq!(cache.size(), 1);
}

#[test]
fn test_readd_after_drop() {
    let mut cache: EphemeralCache<u32, Session> = EphemeralCache::new();
    cache.add(1, &session("gone")).unwrap();
    assert!(cache.get(&1).unwrap().is_none());

    let s = session("back");
    cache.add(1, &s).unwrap();
    assert_eq!(cache.get(&1).unwrap().unwrap().user, "back");
}

#[test]
fn test_remove_missing_key_is_noop() {
    let mut cache: EphemeralCache<u32, Session> = EphemeralCache::new();
    let s = session("alice");
    cache.add(1, &s).unwrap();

    assert!(cache.remove(&2).unwrap().is_none());
    assert_eq!(cache.size(), 1);
}

#[test]
fn test_interior_mutation_through_cache() {
    let mut cache: EphemeralCache<u32, RefCell<Vec<u8>>> = EphemeralCache::new();
    let buf = Rc::new(RefCell::new(vec![1]));
    cache.add(1, &buf).unwrap();

    cache.get(&1).unwrap().unwrap().borrow_mut().push(2);
    assert_eq!(*buf.borrow(), vec![1, 2]);
}

#[test]
fn test_value_keys_reject_null_and_float() {
    let mut cache: EphemeralCache<Value, Session> = EphemeralCache::new();
    let s = session("alice");

    let err = cache.add(Value::Null, &s).unwrap_err();
    assert!(matches!(err, CacheError::InvalidKey(_)));
    assert!(cache.add(Value::Float(2.5), &s).is_err());

    cache.add(Value::Integer(2), &s).unwrap();
    assert!(cache.get(&Value::Integer(2)).unwrap().is_some());
    assert_eq!(cache.size(), 1);
}

#[test]
fn test_sweep_then_clear() {
    let mut cache: EphemeralCache<u32, Session> = EphemeralCache::new();
    let keep = session("keep");
    cache.add(1, &keep).unwrap();
    cache.add(2, &session("drop")).unwrap();

    assert_eq!(cache.tracked(), 2);
    assert_eq!(cache.sweep(), 1);
    assert_eq!(cache.values().len(), 1);

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(Rc::strong_count(&keep), 1);
}
