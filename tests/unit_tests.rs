// Unit tests for the drive-time pipeline

use drivetimes::core::{
    cuisine_options, normalize_cuisine_list, normalize_record, normalize_records, partition,
    select_routable, sort_by_drive_time, to_nullable_string, to_number, ListingFilter,
    DEFAULT_CHUNK_SIZE,
};
use drivetimes::models::{DurationMap, RestaurantEntity};
use serde_json::json;

#[test]
fn test_cuisine_list_from_json_string() {
    assert_eq!(
        normalize_cuisine_list(&json!(r#"["Thai", "Korean"]"#)),
        vec!["Thai", "Korean"]
    );
}

#[test]
fn test_cuisine_list_from_delimited_string() {
    assert_eq!(normalize_cuisine_list(&json!("Thai, Korean ,")), vec!["Thai", "Korean"]);
}

#[test]
fn test_cuisine_list_from_malformed_brackets() {
    // Not valid JSON, falls back to delimiter splitting
    assert_eq!(
        normalize_cuisine_list(&json!("['Thai', 'Korean'")),
        vec!["Thai", "Korean"]
    );
    assert_eq!(normalize_cuisine_list(&json!("[Thai, Korean]")), vec!["Thai", "Korean"]);
}

#[test]
fn test_cuisine_list_from_other_shapes() {
    assert!(normalize_cuisine_list(&json!(null)).is_empty());
    assert!(normalize_cuisine_list(&json!(42)).is_empty());
    assert!(normalize_cuisine_list(&json!("")).is_empty());
    assert_eq!(normalize_cuisine_list(&json!([" Thai ", "", 7])), vec!["Thai", "7"]);
}

#[test]
fn test_number_coercion() {
    assert_eq!(to_number(&json!("34.05")), Some(34.05));
    assert_eq!(to_number(&json!(" -118.25 ")), Some(-118.25));
    assert_eq!(to_number(&json!("12abc")), Some(12.0));
    assert_eq!(to_number(&json!("abc")), None);
    assert_eq!(to_number(&json!(true)), None);
    assert_eq!(to_number(&json!(null)), None);
}

#[test]
fn test_nullable_string_coercion() {
    assert_eq!(to_nullable_string(&json!("  Silver Lake  ")), Some("Silver Lake".to_string()));
    assert_eq!(to_nullable_string(&json!(["Echo", "Park"])), Some("Echo,Park".to_string()));
    assert_eq!(to_nullable_string(&json!(12)), Some("12".to_string()));
    assert_eq!(to_nullable_string(&json!("   ")), None);
    assert_eq!(to_nullable_string(&json!({"a": 1})), None);
}

#[test]
fn test_normalize_table_row() {
    let raw = json!({
        "id": "recHowlin",
        "createdTime": "2024-01-01T00:00:00.000Z",
        "fields": {
            "Name": "Howlin' Ray's",
            "Cuisine(s)": "[\"Southern\", \"Fried Chicken\"]",
            "Neighborhood": "Chinatown",
            "Address": "727 N Broadway #128",
            "Latitude": "34.0614",
            "Longitude": -118.2385,
            "Google Maps URL": "https://maps.google.com/?cid=1"
        }
    });

    let restaurant = normalize_record(&raw).unwrap();
    assert_eq!(restaurant.id, "recHowlin");
    assert_eq!(restaurant.name, "Howlin' Ray's");
    assert_eq!(restaurant.cuisines, vec!["Southern", "Fried Chicken"]);
    assert_eq!(restaurant.neighborhood.as_deref(), Some("Chinatown"));
    assert_eq!(restaurant.latitude, Some(34.0614));
    assert_eq!(restaurant.longitude, Some(-118.2385));
    assert_eq!(restaurant.maps_url.as_deref(), Some("https://maps.google.com/?cid=1"));
}

#[test]
fn test_normalize_flat_record_with_lowercase_keys() {
    let restaurant = normalize_record(&json!({
        "id": 17,
        "name": "Guisados",
        "cuisines": ["Mexican"],
        "lat": 34.0696,
        "lng": -118.2922
    }))
    .unwrap();

    assert_eq!(restaurant.id, "17");
    assert_eq!(restaurant.cuisines, vec!["Mexican"]);
    assert!(restaurant.coordinate().is_some());
}

#[test]
fn test_normalize_records_drops_unidentifiable() {
    let records = vec![
        json!({"id": "rec1", "fields": {"Name": "Kismet"}}),
        json!({"fields": {"Name": "No id"}}),
        json!("not a record"),
        json!({"id": "rec2", "fields": {}}),
    ];

    let restaurants = normalize_records(&records);
    let ids: Vec<_> = restaurants.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["rec1", "rec2"]);
    assert_eq!(restaurants[1].name, "rec2");
}

fn mapped(id: &str, name: &str, lat: Option<f64>) -> RestaurantEntity {
    RestaurantEntity {
        id: id.to_string(),
        name: name.to_string(),
        cuisines: vec![],
        neighborhood: None,
        address: None,
        maps_url: None,
        latitude: lat,
        longitude: lat.map(|_| -118.3),
    }
}

#[test]
fn test_partition_eighty_five_into_forty() {
    let items: Vec<usize> = (0..85).collect();
    let batches = partition(&items, DEFAULT_CHUNK_SIZE);

    let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![40, 40, 5]);
    assert_eq!(batches.concat(), items);
}

#[test]
fn test_select_routable_keeps_order_and_skips_unmapped() {
    let restaurants = vec![
        mapped("a", "A", Some(34.1)),
        mapped("b", "B", None),
        mapped("c", "C", Some(f64::NAN)),
        mapped("d", "D", Some(34.2)),
    ];

    let ids: Vec<_> = select_routable(&restaurants).into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec!["a", "d"]);
}

#[test]
fn test_sort_by_drive_time_puts_unknown_last() {
    let restaurants = vec![
        mapped("slow", "Slow", Some(34.1)),
        mapped("unknown", "Unknown", None),
        mapped("fast", "Fast", Some(34.2)),
    ];
    let mut durations = DurationMap::new();
    durations.insert("slow".to_string(), 1800.0);
    durations.insert("fast".to_string(), 600.0);

    let ids: Vec<_> = sort_by_drive_time(&restaurants, &durations)
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["fast", "slow", "unknown"]);
}

#[test]
fn test_listing_filter_and_facets() {
    let restaurants = normalize_records(&[
        json!({"id": "1", "fields": {"Name": "Jitlada", "Cuisine(s)": "Thai", "Neighborhood": "Thai Town"}}),
        json!({"id": "2", "fields": {"Name": "Kobawoo", "Cuisine(s)": "Korean", "Neighborhood": "Koreatown"}}),
        json!({"id": "3", "fields": {"Name": "Night + Market", "Cuisine(s)": "Thai", "Neighborhood": "West Hollywood"}}),
    ]);

    assert_eq!(cuisine_options(&restaurants), vec!["Korean", "Thai"]);

    let filter = ListingFilter::from_query(Some("Thai"), Some("Thai Town, Koreatown"));
    let ids: Vec<_> = filter.apply(restaurants.clone()).into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["1"]);

    let everything = ListingFilter::from_query(None, Some(" , "));
    assert!(everything.is_empty());
    assert_eq!(everything.apply(restaurants).len(), 3);
}
