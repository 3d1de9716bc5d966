use super::*;

fn resource() -> Resource {
    Resource {
        id: "r1".to_owned(),
        title: "Mentor circle".to_owned(),
        description: String::new(),
        category: "Mentorship".to_owned(),
        tags: None,
        rating: None,
        duration: None,
        members: None,
    }
}

#[test]
fn resource_facts_lists_present_fields_in_order() {
    let r = Resource {
        rating: Some(4.5),
        duration: Some("Short Term".to_owned()),
        members: Some(120),
        ..resource()
    };
    assert_eq!(resource_facts(&r), vec!["4.5/5", "Short Term", "120 members"]);
}

#[test]
fn resource_facts_skips_missing_and_empty_fields() {
    let r = Resource { duration: Some("  ".to_owned()), members: Some(0), ..resource() };
    assert!(resource_facts(&r).is_empty());
}

#[test]
fn current_value_reads_selected_field() {
    let mut filters = ResourceFilters::default();
    filters.set(FilterField::Duration, "Long Term".to_owned());
    assert_eq!(current_value(&filters, FilterField::Duration), "Long Term");
    assert_eq!(current_value(&filters, FilterField::Category), ANY_CATEGORY);
}

// =============================================================
// Add-resource form
// =============================================================

#[test]
fn validate_new_resource_trims_and_attaches_user() {
    let draft =
        validate_new_resource(" Grant guide ", " https://example.org/g ", "Funding", " Steps ", Some("7")).unwrap();
    assert_eq!(
        draft,
        NewResource {
            title: "Grant guide".to_owned(),
            link: "https://example.org/g".to_owned(),
            category: "Funding".to_owned(),
            description: "Steps".to_owned(),
            user_id: "7".to_owned(),
        }
    );
}

#[test]
fn validate_new_resource_requires_title_link_and_real_category() {
    let missing = "Title, link and category are required.";
    assert_eq!(validate_new_resource("", "https://x.io", "Funding", "", Some("7")), Err(missing));
    assert_eq!(validate_new_resource("T", "https://x.io", "", "", Some("7")), Err(missing));
    assert_eq!(validate_new_resource("T", "https://x.io", ANY_CATEGORY, "", Some("7")), Err(missing));
}

#[test]
fn validate_new_resource_rejects_non_http_links() {
    assert_eq!(
        validate_new_resource("T", "javascript:alert(1)", "Funding", "", Some("7")),
        Err("Links must start with http:// or https://.")
    );
}

#[test]
fn validate_new_resource_needs_a_session_user() {
    assert!(validate_new_resource("T", "http://x.io", "Funding", "", None).is_err());
    assert!(validate_new_resource("T", "http://x.io", "Funding", "", Some(" ")).is_err());
}

#[test]
fn format_count_drops_fraction_for_whole_numbers() {
    assert_eq!(format_count(12.0), "12");
    assert_eq!(format_count(2.5), "2.5");
}
