use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::Duration;
use guestbook_core::clock::{self, ManualClock};
use guestbook_core::storage::json_users::VERIFICATION_CODE_TTL;
use guestbook_core::{
    EntryStore, GuestbookEntry, GuestbookError, JsonEntryStore, JsonUserStore, User, UserStore,
};
use tempfile::tempdir;
use uuid::Uuid;

#[test]
fn test_entries_survive_reopen() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("entries.json");
    let owner = Uuid::new_v4();

    let store = JsonEntryStore::create(&path, clock::system()).expect("create should succeed");
    let id = store
        .create_entry(GuestbookEntry::new("John Doe", "this is a test").with_user(owner))
        .expect("create_entry should succeed");
    let written = store.get_entry(&id).expect("get").expect("entry exists");
    drop(store);

    let reopened = JsonEntryStore::open(&path, clock::system()).expect("open should succeed");
    let read = reopened.get_entry(&id).expect("get").expect("entry exists");
    assert_eq!(read, written);
    assert_eq!(reopened.get_entry_by_id(&owner).expect("by owner").len(), 1);
}

#[test]
fn test_concurrent_creates_lose_nothing() {
    const WRITERS: usize = 16;

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("entries.json");
    let store = Arc::new(JsonEntryStore::create(&path, clock::system()).expect("create"));

    let ids: Vec<Uuid> = thread::scope(|scope| {
        let handles: Vec<_> = (0..WRITERS)
            .map(|n| {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    store
                        .create_entry(GuestbookEntry::new(format!("writer {}", n), "hello"))
                        .expect("create_entry should succeed")
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("writer thread panicked"))
            .collect()
    });

    let distinct: HashSet<Uuid> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), WRITERS);
    assert_eq!(store.list_entries().expect("list").len(), WRITERS);

    let reopened = JsonEntryStore::open(&path, clock::system()).expect("open");
    assert_eq!(reopened.list_entries().expect("list").len(), WRITERS);
}

#[test]
fn test_users_survive_reopen_with_password_bytes() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("users.json");

    let store = JsonUserStore::open(&path, clock::system()).expect("open");
    let id = store
        .create_user(User::new("peter@example.com", "Peter", vec![0, 159, 146, 150]).admin())
        .expect("create_user");
    drop(store);

    let reopened = JsonUserStore::open(&path, clock::system()).expect("reopen");
    let user = reopened.get_user_by_id(&id).expect("get").expect("user exists");
    assert_eq!(user.password, vec![0, 159, 146, 150]);
    assert!(user.is_admin);
    assert_eq!(
        reopened
            .get_user_by_email("peter@example.com")
            .expect("by email")
            .map(|u| u.id),
        Some(id)
    );
}

#[test]
fn test_verification_flow() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("users.json");
    let clock = Arc::new(ManualClock::default());
    let store = JsonUserStore::open(&path, clock.clone()).expect("open");

    let id = store
        .create_user(User::new("alice@example.com", "Alice", Vec::new()))
        .expect("create_user");
    let code = store.create_verification_code(&id).expect("code");
    assert_eq!(code.len(), 6);

    assert!(matches!(
        store.code_validation(&id, "wrong"),
        Err(GuestbookError::WrongCode)
    ));
    assert!(!store.get_user_by_id(&id).expect("get").expect("user").is_verified);

    store.code_validation(&id, &code).expect("validation should succeed");

    let reopened = JsonUserStore::open(&path, clock.clone()).expect("reopen");
    assert!(reopened.get_user_by_id(&id).expect("get").expect("user").is_verified);
}

#[test]
fn test_expired_code_purges_user_on_disk() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("users.json");
    let clock = Arc::new(ManualClock::default());
    let store = JsonUserStore::open(&path, clock.clone()).expect("open");

    let id = store
        .create_user(User::new("late@example.com", "Late", Vec::new()))
        .expect("create_user");
    let code = store.create_verification_code(&id).expect("code");
    clock.advance(VERIFICATION_CODE_TTL + Duration::seconds(1));

    assert!(matches!(
        store.code_validation(&id, &code),
        Err(GuestbookError::Expired(_))
    ));

    let reopened = JsonUserStore::open(&path, clock.clone()).expect("reopen");
    assert!(reopened.get_user_by_id(&id).expect("get").is_none());
}
