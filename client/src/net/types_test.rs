use super::*;

// =============================================================
// User
// =============================================================

#[test]
fn user_accepts_uid_alias_and_missing_email() {
    let user: User = serde_json::from_str(r#"{"uid":"u-9","name":"Ada"}"#).unwrap();
    assert_eq!(user.id, "u-9");
    assert_eq!(user.name, "Ada");
    assert_eq!(user.email, "");
}

#[test]
fn user_accepts_display_name_and_numeric_id() {
    let user: User = serde_json::from_str(r#"{"id":7,"displayName":"Grace","email":"g@x.io"}"#).unwrap();
    assert_eq!(user.id, "7");
    assert_eq!(user.name, "Grace");
    assert_eq!(user.email, "g@x.io");
}

#[test]
fn user_without_id_is_rejected() {
    assert!(serde_json::from_str::<User>(r#"{"name":"Nobody"}"#).is_err());
}

#[test]
fn user_serializes_with_canonical_keys() {
    let user = User { id: "1".to_owned(), name: "A".to_owned(), email: "a@b.com".to_owned() };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json, serde_json::json!({"id": "1", "name": "A", "email": "a@b.com"}));
}

// =============================================================
// Auth payloads
// =============================================================

#[test]
fn auth_response_parses_backend_login_reply() {
    let raw = r#"{"message":"Login successful","token":"T","user":{"uid":"1","name":"A","email":"a@b.com"}}"#;
    let reply: AuthResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(reply.token, "T");
    assert_eq!(reply.user.id, "1");
    assert_eq!(reply.message.as_deref(), Some("Login successful"));
}

#[test]
fn verify_response_tolerates_empty_object() {
    let reply: VerifyResponse = serde_json::from_str("{}").unwrap();
    assert!(reply.user.is_none());
}

#[test]
fn signup_profile_omits_absent_optional_fields() {
    let profile = SignupProfile {
        name: "A".to_owned(),
        email: "a@b.com".to_owned(),
        password: "pw".to_owned(),
        location: Some("Lagos".to_owned()),
        ..SignupProfile::default()
    };
    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"name": "A", "email": "a@b.com", "password": "pw", "location": "Lagos"})
    );
}

// =============================================================
// Dashboard data
// =============================================================

#[test]
fn initials_for_takes_first_letter_of_each_word() {
    assert_eq!(initials_for("ada lovelace"), "AL");
    assert_eq!(initials_for("  Grace   Brewster Hopper "), "GBH");
    assert_eq!(initials_for(""), "");
}

#[test]
fn profile_display_initials_prefers_backend_value() {
    let mut profile = UserProfile { name: "Ada Lovelace".to_owned(), ..UserProfile::default() };
    assert_eq!(profile.display_initials(), "AL");
    profile.initials = "X".to_owned();
    assert_eq!(profile.display_initials(), "X");
}

#[test]
fn notification_accepts_numeric_id() {
    let raw = r#"{"id":12,"title":"Welcome","time":"2024-01-01T00:00:00Z","read":false}"#;
    let n: Notification = serde_json::from_str(raw).unwrap();
    assert_eq!(n.id, "12");
    assert!(n.message.is_none());
    assert!(!n.read);
}

#[test]
fn resource_parses_partial_record() {
    let raw = r#"{"id":"r1","title":"Grant writing 101","category":"Funding","rating":4.5}"#;
    let r: Resource = serde_json::from_str(raw).unwrap();
    assert_eq!(r.id, "r1");
    assert_eq!(r.rating, Some(4.5));
    assert!(r.duration.is_none());
}

// =============================================================
// ResourceQuery
// =============================================================

#[test]
fn resource_query_omits_blank_fields() {
    let query = ResourceQuery { category: "Funding".to_owned(), search: "  ".to_owned(), ..ResourceQuery::default() };
    assert_eq!(query.to_query_string(), "category=Funding");
    assert_eq!(query.path(), "/resources?category=Funding");
}

#[test]
fn resource_query_encodes_values_and_maps_kind_to_type() {
    let query = ResourceQuery {
        search: "grant & loan".to_owned(),
        kind: "Course".to_owned(),
        ..ResourceQuery::default()
    };
    assert_eq!(query.to_query_string(), "search=grant+%26+loan&type=Course");
}

#[test]
fn empty_resource_query_has_bare_path() {
    assert_eq!(ResourceQuery::default().path(), "/resources");
}

// =============================================================
// Funding and dashboard extras
// =============================================================

#[test]
fn funding_statistics_parses_backend_reply() {
    let raw = r#"{"data_points":[{"date":"2024-03-02","amount":5000.0,"category":"Tech"}],
                  "total_amount":5000.0,"count":1,"average":5000.0}"#;
    let stats: FundingStatistics = serde_json::from_str(raw).unwrap();
    assert_eq!(stats.data_points.len(), 1);
    assert_eq!(stats.data_points[0].date, "2024-03-02");
    assert_eq!(stats.count, Some(1));
}

#[test]
fn funding_statistics_accepts_legacy_resource_list() {
    let raw = r#"{"fundingResources":[{"uploaded_at":"2024-01-09","amount":250}]}"#;
    let stats: FundingStatistics = serde_json::from_str(raw).unwrap();
    assert_eq!(stats.data_points[0].date, "2024-01-09");
    assert_eq!(stats.data_points[0].amount, 250.0);
    assert_eq!(stats.data_points[0].category, "");
    assert!(stats.total_amount.is_none());
}

#[test]
fn success_story_accepts_numeric_id_and_null_description() {
    let raw = r#"{"id":3,"title":"Solar co-op","description":null,"amount":12000,"date":"2024-05-01","category":"Energy"}"#;
    let story: SuccessStory = serde_json::from_str(raw).unwrap();
    assert_eq!(story.id, "3");
    assert!(story.description.is_none());
}

#[test]
fn insight_reads_type_into_kind() {
    let insight: Insight = serde_json::from_str(r#"{"id":1,"title":"Apply early","type":"tip"}"#).unwrap();
    assert_eq!(insight.kind, "tip");
}

#[test]
fn stats_keep_backend_labels() {
    let stats: PortalStats =
        serde_json::from_str(r#"{"Total Resources":12,"Community Members":4}"#).unwrap();
    assert_eq!(stats.get("Total Resources"), Some(&12.0));
    assert_eq!(stats.len(), 2);
}

#[test]
fn time_range_builds_query_path() {
    assert_eq!(TimeRange::default(), TimeRange::SixMonths);
    assert_eq!(TimeRange::OneYear.path(), "/funding/statistics?timeRange=1Y");
}

#[test]
fn new_resource_serializes_flat_body() {
    let resource = NewResource {
        title: "Mentor guide".to_owned(),
        link: "https://example.org/guide".to_owned(),
        category: "Mentoring".to_owned(),
        description: String::new(),
        user_id: "7".to_owned(),
    };
    let json = serde_json::to_value(&resource).unwrap();
    assert_eq!(json["user_id"], "7");
    assert_eq!(json["description"], "");
}
