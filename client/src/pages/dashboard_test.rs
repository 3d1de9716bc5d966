use super::*;

fn notification(id: &str, read: bool) -> Notification {
    Notification {
        id: id.to_owned(),
        title: format!("note {id}"),
        message: None,
        time: "2024-01-01".to_owned(),
        read,
    }
}

#[test]
fn unread_count_skips_read_notifications() {
    let list = vec![notification("1", false), notification("2", true), notification("3", false)];
    assert_eq!(unread_count(&list), 2);
    assert_eq!(unread_count(&[]), 0);
}

#[test]
fn mark_read_locally_flags_only_matching_id() {
    let mut list = vec![notification("1", false), notification("2", false)];
    mark_read_locally(&mut list, "2");
    assert!(!list[0].read);
    assert!(list[1].read);
}

#[test]
fn mark_read_locally_ignores_unknown_id() {
    let mut list = vec![notification("1", false)];
    mark_read_locally(&mut list, "9");
    assert_eq!(unread_count(&list), 1);
}

#[test]
fn greeting_name_prefers_profile_then_session_user() {
    let profile = UserProfile { name: "Grace".to_owned(), ..UserProfile::default() };
    assert_eq!(greeting_name(Some(&profile), Some("G")), "Grace");
    assert_eq!(greeting_name(None, Some(" Ada ")), "Ada");
    let blank = UserProfile::default();
    assert_eq!(greeting_name(Some(&blank), None), "there");
}

#[test]
fn progress_width_clamps_to_percentage() {
    assert_eq!(progress_width(42.4), "42%");
    assert_eq!(progress_width(130.0), "100%");
    assert_eq!(progress_width(-5.0), "0%");
    assert_eq!(progress_width(f64::NAN), "0%");
}
