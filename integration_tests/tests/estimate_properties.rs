use core_estimate::{
    distance_km, recompute, resolve_rate, Catalog, Coordinate, MissionInputs, MissionMetrics,
    PersonnelEntry, PersonnelId, Site, SiteId, EARTH_RADIUS_KM,
};
use estimate_runtime::parse_boundary_document;

const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

fn site_at(id: u32, coordinate: Coordinate) -> Site {
    Site {
        id: SiteId(id),
        name: format!("site {id}"),
        coordinate,
        boundary: vec![coordinate],
    }
}

fn mission(days: u32) -> MissionInputs {
    let mut inputs = MissionInputs::new("Lusaka");
    inputs
        .personnel
        .push(PersonnelEntry::new(PersonnelId(0), "Mine Surveyor", 2, days));
    inputs
        .personnel
        .push(PersonnelEntry::new(PersonnelId(1), "Driver", 1, 1));
    inputs.fuel_price = 27.5;
    inputs.fleet_count = 2;
    inputs
}

#[test]
fn station_and_district_tables_agree_on_lusaka() {
    let catalog = Catalog::builtin();
    let station = catalog.station("Lusaka").expect("lusaka station");
    let district = catalog.district_named("Lusaka").expect("lusaka district");
    assert_eq!(distance_km(district.coordinate(), station.coordinate()), 0.0);
}

#[test]
fn distance_is_symmetric_across_catalog() {
    let catalog = Catalog::builtin();
    for a in &catalog.districts {
        assert_eq!(distance_km(a.coordinate(), a.coordinate()), 0.0);
        for b in &catalog.districts {
            let there = distance_km(a.coordinate(), b.coordinate());
            let back = distance_km(b.coordinate(), a.coordinate());
            assert!((there - back).abs() < 1e-9, "{} <-> {}", a.name, b.name);
        }
    }
}

#[test]
fn single_vertex_list_parses_to_centroid() {
    let parsed = parse_boundary_document("28.0,-15.0 28.1,-15.1 28.2,-15.2").expect("parse");
    assert_eq!(parsed.len(), 1);
    assert!((parsed[0].coordinate.lat + 15.1).abs() < 1e-9);
    assert!((parsed[0].coordinate.lng - 28.1).abs() < 1e-9);
    assert_eq!(parsed[0].vertices.len(), 3);
}

#[test]
fn document_without_coordinates_is_rejected() {
    assert!(parse_boundary_document("<kml><Document/></kml>").is_err());
    assert!(parse_boundary_document("no numbers here").is_err());
}

#[test]
fn published_rate_examples() {
    let catalog = Catalog::builtin();
    assert_eq!(resolve_rate(&catalog, "Driver", "Lusaka"), 900.0);
    assert_eq!(resolve_rate(&catalog, "Mine Surveyor", "Chipata"), 1150.0);
    assert_eq!(
        resolve_rate(&catalog, "Assistant Mine Surveyor", "Nowhereville"),
        950.0
    );
}

#[test]
fn empty_site_collection_zeroes_metrics_and_fuel() {
    let catalog = Catalog::builtin();
    let estimate = recompute(&mission(3), &catalog).expect("estimate");
    assert_eq!(estimate.metrics, MissionMetrics::empty());
    assert_eq!(estimate.totals.fuel_total, 0.0);
}

#[test]
fn site_fifty_km_south_of_lusaka() {
    let catalog = Catalog::builtin();
    let station = catalog.station("Lusaka").expect("station").coordinate();
    let site = Coordinate::new(station.lat - 50.0 / KM_PER_DEGREE, station.lng);

    let mut two_days = mission(2);
    two_days.sites.push(site_at(0, site));
    let short = recompute(&two_days, &catalog).expect("estimate");

    let station_leg = distance_km(station, site);
    assert!((station_leg - 50.0).abs() < 1e-6);
    assert_eq!(short.metrics.nearest_district.as_deref(), Some("Lusaka"));
    let district_leg = distance_km(
        site,
        catalog.district_named("Lusaka").expect("district").coordinate(),
    );
    assert_eq!(short.metrics.station_to_site_km, station_leg);
    assert_eq!(short.metrics.district_distance_km, district_leg);
    assert_eq!(
        short.metrics.total_distance_km,
        station_leg + 2.0 * 2.0 * district_leg
    );

    let mut four_days = two_days.clone();
    four_days.personnel[0].days = 4;
    let long = recompute(&four_days, &catalog).expect("estimate");
    assert_eq!(long.metrics.station_to_site_km, short.metrics.station_to_site_km);
    assert_eq!(
        long.metrics.working_radius_km,
        2.0 * short.metrics.working_radius_km
    );
}

#[test]
fn grand_total_is_subtotal_plus_ten_percent() {
    let catalog = Catalog::builtin();
    let mut inputs = mission(5);
    inputs.sites.push(site_at(0, Coordinate::new(-12.6, 27.9)));
    inputs.sites.push(site_at(1, Coordinate::new(-13.1, 28.5)));

    let first = recompute(&inputs, &catalog).expect("estimate");
    let second = recompute(&inputs, &catalog).expect("estimate");
    assert_eq!(first, second);

    let totals = first.totals;
    assert_eq!(
        totals.cumulative_total,
        totals.personnel_total + totals.fuel_total
    );
    assert_eq!(totals.grand_total, totals.cumulative_total + totals.contingency);
    let relative = (totals.grand_total - totals.cumulative_total * 1.10).abs() / totals.grand_total;
    assert!(relative < 1e-12);
}

#[test]
fn override_label_switches_at_five_km() {
    let catalog = Catalog::builtin();
    let kabwe = catalog.district_named("Kabwe").expect("kabwe").coordinate();
    let inside = Coordinate::new(kabwe.lat + 4.9 / KM_PER_DEGREE, kabwe.lng);
    let outside = Coordinate::new(kabwe.lat + 5.1 / KM_PER_DEGREE, kabwe.lng);
    let site = Coordinate::new(-13.0, 28.4);

    let mut inputs = mission(1);
    inputs.sites.push(site_at(0, site));

    inputs.custom_override = Some(inside);
    let near = recompute(&inputs, &catalog).expect("estimate");
    inputs.custom_override = Some(outside);
    let far = recompute(&inputs, &catalog).expect("estimate");

    assert_eq!(near.metrics.nearest_district.as_deref(), Some("Kabwe"));
    assert_eq!(far.metrics.nearest_district.as_deref(), Some("Other Areas"));

    assert_eq!(near.metrics.district_distance_km, distance_km(site, inside));
    assert_eq!(far.metrics.district_distance_km, distance_km(site, outside));
    let jump = (far.metrics.district_distance_km - near.metrics.district_distance_km).abs();
    assert!(jump <= 0.2 + 1e-6, "distance jumped by {jump} km");

    // Kabwe is a group B district, "Other Areas" is not.
    assert_eq!(near.rate_for(PersonnelId(0)), Some(1150.0));
    assert_eq!(far.rate_for(PersonnelId(0)), Some(1050.0));
}
