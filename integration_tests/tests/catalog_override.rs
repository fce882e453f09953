mod common;

use anyhow::Result;
use core_estimate::{load_catalog, load_catalog_from_env, MissionSession};

#[test]
fn env_override_replaces_builtin_catalog() -> Result<()> {
    let expected = common::ensure_test_catalog();
    let (catalog, metadata) = load_catalog_from_env();
    assert!(!metadata.is_builtin());
    assert_eq!(metadata.path(), Some(&expected));
    assert_eq!(catalog.stations.len(), 1);
    assert_eq!(catalog.districts.len(), 2);
    assert_eq!(catalog.policy.contingency_rate, 0.05);
    // Omitted sections keep their defaults.
    assert_eq!(catalog.policy.override_label_radius_km, 5.0);
    assert_eq!(catalog.roles.len(), 5);

    let mut session = MissionSession::new(catalog)?;
    assert_eq!(session.inputs().station, "Ndola");
    assert_eq!(session.estimate().rate_district, "Ndola");
    assert_eq!(session.preview_rate("Mine Surveyor"), 1150.0);

    session.add_boundary_document("mine.txt", "28.62,-12.95 28.64,-12.97")?;
    assert_eq!(session.estimate().rate_district, "Ndola");

    session.set_manual_district("Luanshya");
    assert_eq!(session.estimate().rate_district, "Luanshya");
    assert_eq!(session.preview_rate("Mine Surveyor"), 1250.0);
    let totals = session.estimate().totals;
    assert!((totals.contingency - totals.cumulative_total * 0.05).abs() < 1e-9);
    Ok(())
}

#[test]
fn unreadable_override_falls_back_to_builtin() {
    let missing = common::fixture_path("does_not_exist.json");
    let (catalog, metadata) = load_catalog(Some(missing.as_path()));
    assert!(metadata.is_builtin());
    assert_eq!(catalog.stations.len(), 7);
}
