/// User profile tests
///
/// Field rules of the profile entity and the identity-keyed profile directory
/// Run with: cargo test --test profile_tests

use fieldguard::profile::{EMAIL, USERNAME};
use fieldguard::{DirectoryConfig, FieldError, ProfileDirectory, UserProfile, Value};
use std::rc::Rc;

#[test]
fn test_non_empty_usernames_accepted() {
    for name in ["a", "alice", "ünïcode", " "] {
        let mut profile = UserProfile::new();
        profile.set_username(name).unwrap();
        assert_eq!(profile.username(), Some(name));
    }
}

#[test]
fn test_empty_username_rejected() {
    let mut profile = UserProfile::new();
    let err = profile.set_username("").unwrap_err();
    assert_eq!(
        err,
        FieldError::Validation {
            field: USERNAME.into(),
            value: Value::from(""),
        }
    );
    assert_eq!(profile.username(), None);
}

#[test]
fn test_valid_emails_accepted() {
    for email in ["a@b.c", "first.last@example.com", ".@"] {
        let mut profile = UserProfile::new();
        profile.set_email(email).unwrap();
        assert_eq!(profile.email(), Some(email));
    }
}

#[test]
fn test_invalid_emails_rejected() {
    let mut profile = UserProfile::new();

    let err = profile.set_email("no-at-symbol.com").unwrap_err();
    assert_eq!(err.field(), Some(EMAIL));

    let err = profile.set_email("missing-dot@example").unwrap_err();
    assert_eq!(err.rejected_value(), Some(&Value::from("missing-dot@example")));

    assert_eq!(profile.email(), None);
}

#[test]
fn test_last_login_defaults_to_none() {
    let profile = UserProfile::new();
    assert!(profile.last_login().is_none());
    assert!(profile.snapshot().last_login.is_none());
}

#[test]
fn test_with_identity_propagates_first_failure() {
    let err = UserProfile::with_identity("", "bad").unwrap_err();
    assert_eq!(err.field(), Some(USERNAME));

    let err = UserProfile::with_identity("bob", "bad").unwrap_err();
    assert_eq!(err.field(), Some(EMAIL));
}

#[test]
fn test_directory_roundtrip_and_reclamation() {
    let mut directory = ProfileDirectory::new();
    let profile = UserProfile::with_identity("alice", "alice@example.com")
        .unwrap()
        .into_shared();

    let id = directory.add_to_cache(&profile).unwrap();
    let found = directory.get_from_cache(id).unwrap().unwrap();
    assert!(Rc::ptr_eq(&found, &profile));
    drop(found);

    assert_eq!(directory.live_count(), 1);
    drop(profile);
    assert!(directory.get_from_cache(id).unwrap().is_none());
    assert_eq!(directory.live_count(), 0);
}

#[test]
fn test_directory_lists_live_ids() {
    let mut directory =
        ProfileDirectory::with_config(DirectoryConfig::new().disable_auto_sweep());
    let a = UserProfile::new().into_shared();
    let b = UserProfile::new().into_shared();
    let id_a = directory.add_to_cache(&a).unwrap();
    let id_b = directory.add_to_cache(&b).unwrap();

    let mut expected = vec![id_a, id_b];
    expected.sort();
    assert_eq!(directory.ids(), expected);

    drop(a);
    assert_eq!(directory.ids(), vec![id_b]);
    assert_eq!(directory.sweep(), 1);
    assert_eq!(directory.sweep(), 0);
}

#[test]
fn test_find_by_username_after_rename() {
    let mut directory = ProfileDirectory::new();
    let profile = UserProfile::with_identity("carol", "carol@example.com")
        .unwrap()
        .into_shared();
    directory.add_to_cache(&profile).unwrap();

    assert!(profile.borrow_mut().set_username("").is_err());
    assert!(directory.find_by_username("carol").is_some());

    profile.borrow_mut().set_username("caroline").unwrap();
    assert!(directory.find_by_username("carol").is_none());
    assert!(directory.find_by_username("caroline").is_some());
}
