use booking_timeline::core::{
    Appointment, AssetClassRule, AssetClassification, classify_appointments, classify_assets,
};

fn names(group_assets: &[String]) -> Vec<&str> {
    group_assets.iter().map(String::as_str).collect()
}

#[test]
fn default_rules_bucket_boats_and_sloops() {
    let groups = classify_assets(
        ["Sloep 2", "Boot 1", "boot 10", "Kano", "sloepje3", "Boot 1"],
        &AssetClassification::default(),
    );
    let ids: Vec<&str> = groups.iter().map(|group| group.id.as_str()).collect();
    assert_eq!(ids, vec!["large-boats", "sloops", "other"]);

    assert_eq!(names(&groups[0].asset_ids), vec!["Boot 1", "boot 10"]);
    assert_eq!(names(&groups[1].asset_ids), vec!["Sloep 2", "sloepje3"]);
    assert_eq!(names(&groups[2].asset_ids), vec!["Kano"]);
    assert!(groups.iter().all(|group| group.expanded));
}

#[test]
fn keyword_without_number_falls_back() {
    let groups = classify_assets(["Bootcamp", "Sloep"], &AssetClassification::default());
    let other = groups
        .iter()
        .find(|group| group.id == "other")
        .expect("fallback group");
    assert_eq!(names(&other.asset_ids), vec!["Bootcamp", "Sloep"]);
}

#[test]
fn fixed_groups_are_listed_even_when_empty() {
    let groups = classify_assets(std::iter::empty(), &AssetClassification::default());
    let ids: Vec<&str> = groups.iter().map(|group| group.id.as_str()).collect();
    assert_eq!(ids, vec!["large-boats", "sloops"]);
    assert!(groups.iter().all(|group| group.asset_ids.is_empty()));
}

#[test]
fn custom_rules_can_hide_empty_groups() {
    let classification = AssetClassification {
        rules: vec![AssetClassRule {
            group_id: "rooms".to_owned(),
            group_name: "Rooms".to_owned(),
            keywords: vec!["room".to_owned()],
            always_listed: false,
        }],
        fallback_group_id: "misc".to_owned(),
        fallback_group_name: "Misc".to_owned(),
    };

    let groups = classify_assets(["Projector"], &classification);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id, "misc");

    let groups = classify_assets(["ROOM 4", "Room 12"], &classification);
    assert_eq!(groups.len(), 1);
    assert_eq!(names(&groups[0].asset_ids), vec!["Room 12", "ROOM 4"]);
}

#[test]
fn groups_follow_the_appointment_set() {
    let appointments = vec![
        Appointment::new("Boot 2", 0, 10).expect("valid"),
        Appointment::new("Boot 1", 20, 30).expect("valid"),
        Appointment::new("Boot 2", 40, 50).expect("valid"),
    ];
    let groups = classify_appointments(&appointments, &AssetClassification::default());
    assert_eq!(names(&groups[0].asset_ids), vec!["Boot 1", "Boot 2"]);
    assert!(groups[1].asset_ids.is_empty());
}
