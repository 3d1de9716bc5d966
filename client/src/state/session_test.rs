use super::*;
use crate::util::storage::MemoryStorage;

// =============================================================
// Helpers
// =============================================================

fn user(id: &str) -> User {
    User { id: id.to_owned(), name: "A".to_owned(), email: "a@b.com".to_owned() }
}

fn store() -> (SessionStore<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    (SessionStore::new(storage.clone()), storage)
}

fn assert_paired(store: &SessionStore<MemoryStorage>) {
    assert_eq!(store.user().is_some(), store.credential().is_some());
}

// =============================================================
// set / clear
// =============================================================

#[test]
fn new_store_is_empty() {
    let (store, storage) = store();
    assert!(store.credential().is_none());
    assert!(store.user().is_none());
    assert!(!store.snapshot().is_authenticated());
    assert!(storage.is_empty());
}

#[test]
fn set_session_writes_memory_and_storage() {
    let (store, storage) = store();
    store.set_session(user("1"), "T".to_owned());
    assert_eq!(store.credential().as_deref(), Some("T"));
    assert_eq!(store.user().map(|u| u.id), Some("1".to_owned()));
    assert_eq!(storage.get(CREDENTIAL_KEY).as_deref(), Some("T"));
    let persisted: User = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(persisted, user("1"));
}

#[test]
fn clear_session_removes_memory_and_storage() {
    let (store, storage) = store();
    store.set_session(user("1"), "T".to_owned());
    store.clear_session();
    assert!(store.credential().is_none());
    assert!(store.user().is_none());
    assert!(storage.is_empty());
}

#[test]
fn clones_share_one_session() {
    let (store, _) = store();
    let reader = store.clone();
    store.set_session(user("1"), "T".to_owned());
    assert_eq!(reader.credential().as_deref(), Some("T"));
}

#[test]
fn failed_persist_leaves_no_half_written_entries() {
    let (store, storage) = store();
    storage.reject_writes_to(USER_KEY);
    store.set_session(user("1"), "T".to_owned());
    assert!(storage.get(CREDENTIAL_KEY).is_none());
    assert!(storage.get(USER_KEY).is_none());
    assert_eq!(store.credential().as_deref(), Some("T"));
    assert_paired(&store);
}

#[test]
fn user_present_iff_credential_present_for_all_short_sequences() {
    // 0 = set, 1 = clear, 2 = suspend, 3 = rehydrate
    for seq in 0..256u32 {
        let (store, _) = store();
        for step in 0..4 {
            match (seq >> (step * 2)) & 0b11 {
                0 => store.set_session(user("1"), format!("T{step}")),
                1 => store.clear_session(),
                2 => store.suspend(),
                _ => {
                    store.rehydrate();
                }
            }
            assert_paired(&store);
        }
    }
}

// =============================================================
// tickets
// =============================================================

#[test]
fn stale_ticket_cannot_set_session_after_clear() {
    let (store, storage) = store();
    let ticket = store.ticket();
    store.clear_session();
    assert!(!store.set_session_if_current(ticket, user("1"), "T".to_owned()));
    assert!(store.credential().is_none());
    assert!(storage.is_empty());
}

#[test]
fn current_ticket_sets_session() {
    let (store, _) = store();
    let ticket = store.ticket();
    assert!(store.set_session_if_current(ticket, user("1"), "T".to_owned()));
    assert!(!store.is_current(ticket));
}

#[test]
fn stale_ticket_cannot_clear_newer_session() {
    let (store, _) = store();
    let ticket = store.ticket();
    store.set_session(user("2"), "T2".to_owned());
    assert!(!store.clear_if_current(ticket));
    assert_eq!(store.credential().as_deref(), Some("T2"));
}

#[test]
fn suspend_keeps_persisted_copy() {
    let (store, storage) = store();
    store.set_session(user("1"), "T".to_owned());
    let ticket = store.ticket();
    assert!(store.suspend_if_current(ticket));
    assert!(store.credential().is_none());
    assert_eq!(storage.get(CREDENTIAL_KEY).as_deref(), Some("T"));
    assert_eq!(store.rehydrate(), Rehydrated::Restored);
    assert_eq!(store.credential().as_deref(), Some("T"));
}

#[test]
fn refresh_user_keeps_generation_and_persists() {
    let (store, storage) = store();
    store.set_session(user("1"), "T".to_owned());
    let ticket = store.ticket();

    let renamed = User { name: "Renamed".to_owned(), ..user("1") };
    assert!(store.refresh_user("T", renamed.clone()));

    assert!(store.is_current(ticket));
    assert_eq!(store.user(), Some(renamed));
    assert!(storage.get(USER_KEY).is_some_and(|raw| raw.contains("Renamed")));
}

#[test]
fn refresh_user_ignores_other_credential() {
    let (store, _) = store();
    store.set_session(user("1"), "T2".to_owned());
    assert!(!store.refresh_user("T1", user("9")));
    assert_eq!(store.user().map(|u| u.id), Some("1".to_owned()));

    store.clear_session();
    assert!(!store.refresh_user("T2", user("9")));
    assert!(store.user().is_none());
}

#[test]
fn restore_suspended_brings_back_persisted_session() {
    let (store, _) = store();
    store.set_session(user("1"), "T".to_owned());
    store.suspend();
    assert!(store.restore_suspended());
    assert_eq!(store.credential().as_deref(), Some("T"));
}

#[test]
fn restore_suspended_leaves_logged_out_store_untouched() {
    let (store, _) = store();
    let ticket = store.ticket();
    assert!(!store.restore_suspended());
    assert!(store.is_current(ticket));
}

#[test]
fn restore_suspended_is_noop_while_session_in_memory() {
    let (store, _) = store();
    store.set_session(user("1"), "T".to_owned());
    let ticket = store.ticket();
    assert!(!store.restore_suspended());
    assert!(store.is_current(ticket));
}

// =============================================================
// rehydrate
// =============================================================

#[test]
fn rehydrate_restores_persisted_session() {
    let (store, storage) = store();
    storage.set(CREDENTIAL_KEY, "T").unwrap();
    storage.set(USER_KEY, r#"{"uid":"1","name":"A"}"#).unwrap();
    assert_eq!(store.rehydrate(), Rehydrated::Restored);
    assert_eq!(store.credential().as_deref(), Some("T"));
    assert_eq!(store.user().map(|u| u.id), Some("1".to_owned()));
}

#[test]
fn rehydrate_with_nothing_persisted_is_empty() {
    let (store, _) = store();
    assert_eq!(store.rehydrate(), Rehydrated::Empty);
    assert!(store.credential().is_none());
}

#[test]
fn rehydrate_discards_corrupted_user_record() {
    let (store, storage) = store();
    storage.set(CREDENTIAL_KEY, "T").unwrap();
    storage.set(USER_KEY, "{not json").unwrap();
    assert_eq!(store.rehydrate(), Rehydrated::Discarded);
    assert!(store.credential().is_none());
    assert!(store.user().is_none());
    assert!(storage.is_empty());
}

#[test]
fn rehydrate_discards_credential_without_user() {
    let (store, storage) = store();
    storage.set(CREDENTIAL_KEY, "T").unwrap();
    assert_eq!(store.rehydrate(), Rehydrated::Discarded);
    assert!(store.credential().is_none());
    assert!(storage.is_empty());
}

#[test]
fn rehydrate_discards_user_without_credential() {
    let (store, storage) = store();
    storage.set(USER_KEY, r#"{"id":"1"}"#).unwrap();
    assert_eq!(store.rehydrate(), Rehydrated::Discarded);
    assert!(storage.is_empty());
}

#[test]
fn rehydrate_discards_blank_credential() {
    let (store, storage) = store();
    storage.set(CREDENTIAL_KEY, "  ").unwrap();
    storage.set(USER_KEY, r#"{"id":"1"}"#).unwrap();
    assert_eq!(store.rehydrate(), Rehydrated::Discarded);
    assert!(store.credential().is_none());
}
