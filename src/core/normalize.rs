use serde_json::{Map, Value};

use crate::core::coercion::{normalize_cuisine_list, to_nullable_string, to_number};
use crate::models::RestaurantEntity;

// Known column aliases, first match wins
const ID_KEYS: &[&str] = &["id", "ID", "Id"];
const NAME_KEYS: &[&str] = &["Name", "name", "TITLE", "title"];
const NEIGHBORHOOD_KEYS: &[&str] = &["Neighborhood", "neighborhood"];
const ADDRESS_KEYS: &[&str] = &["Address", "address"];
const CUISINE_KEYS: &[&str] = &["Cuisine(s)", "Cuisines", "cuisines"];
const LATITUDE_KEYS: &[&str] = &["Latitude", "latitude", "LAT", "Lat", "lat"];
const LONGITUDE_KEYS: &[&str] = &["Longitude", "longitude", "LNG", "Lng", "lng", "Long", "long"];
const MAPS_URL_KEYS: &[&str] = &[
    "Google Maps URL",
    "googleMapsUrl",
    "google_maps_url",
    "mapsUrl",
    "maps_url",
];

/// Look up the first alias that holds a non-null value
fn guess_value<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

fn guess_string(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    guess_value(fields, keys).and_then(to_nullable_string)
}

fn guess_number(fields: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    guess_value(fields, keys).and_then(to_number)
}

/// Normalize one raw record into a [`RestaurantEntity`]
///
/// The record may be a table row envelope (`{"id": .., "fields": {..}}`)
/// or a flat object. Returns `None` when no id can be found; a missing
/// or blank name falls back to the id.
pub fn normalize_record(raw: &Value) -> Option<RestaurantEntity> {
    let record = raw.as_object()?;
    let fields = record
        .get("fields")
        .and_then(Value::as_object)
        .unwrap_or(record);

    let id = record
        .get("id")
        .and_then(to_nullable_string)
        .or_else(|| guess_string(fields, ID_KEYS))?;
    let name = guess_string(fields, NAME_KEYS).unwrap_or_else(|| id.clone());

    Some(RestaurantEntity {
        cuisines: guess_value(fields, CUISINE_KEYS)
            .map(normalize_cuisine_list)
            .unwrap_or_default(),
        neighborhood: guess_string(fields, NEIGHBORHOOD_KEYS),
        address: guess_string(fields, ADDRESS_KEYS),
        maps_url: guess_string(fields, MAPS_URL_KEYS),
        latitude: guess_number(fields, LATITUDE_KEYS),
        longitude: guess_number(fields, LONGITUDE_KEYS),
        id,
        name,
    })
}

/// Normalize a batch of records, dropping the ones without an id
pub fn normalize_records(raw: &[Value]) -> Vec<RestaurantEntity> {
    let restaurants: Vec<RestaurantEntity> = raw.iter().filter_map(normalize_record).collect();

    let dropped = raw.len() - restaurants.len();
    if dropped > 0 {
        tracing::warn!(dropped, total = raw.len(), "Dropped records without an id");
    }

    restaurants
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_airtable_envelope() {
        let raw = json!({
            "id": "rec123",
            "createdTime": "2024-01-01T00:00:00.000Z",
            "fields": {
                "Name": " Night + Market ",
                "Cuisine(s)": ["Thai"],
                "Neighborhood": "West Hollywood",
                "Address": "9041 Sunset Blvd",
                "Google Maps URL": "https://maps.google.com/?cid=1",
                "Latitude": 34.0901,
                "Longitude": "-118.3868"
            }
        });

        let restaurant = normalize_record(&raw).unwrap();
        assert_eq!(restaurant.id, "rec123");
        assert_eq!(restaurant.name, "Night + Market");
        assert_eq!(restaurant.cuisines, vec!["Thai"]);
        assert_eq!(restaurant.neighborhood.as_deref(), Some("West Hollywood"));
        assert_eq!(restaurant.maps_url.as_deref(), Some("https://maps.google.com/?cid=1"));
        assert_eq!(restaurant.latitude, Some(34.0901));
        assert_eq!(restaurant.longitude, Some(-118.3868));
    }

    #[test]
    fn test_flat_record_with_aliases() {
        let raw = json!({
            "ID": 7,
            "title": "Guelaguetza",
            "cuisines": "Oaxacan, Mexican",
            "lat": "34.0617",
            "lng": "-118.2908"
        });

        let restaurant = normalize_record(&raw).unwrap();
        assert_eq!(restaurant.id, "7");
        assert_eq!(restaurant.name, "Guelaguetza");
        assert_eq!(restaurant.cuisines, vec!["Oaxacan", "Mexican"]);
        assert!(restaurant.coordinate().is_some());
    }

    #[test]
    fn test_first_alias_wins() {
        let raw = json!({"id": "a", "Name": "Upper", "name": "lower"});
        assert_eq!(normalize_record(&raw).unwrap().name, "Upper");
    }

    #[test]
    fn test_name_falls_back_to_id() {
        let raw = json!({"id": "rec9", "latitude": 1.0, "longitude": 2.0});
        assert_eq!(normalize_record(&raw).unwrap().name, "rec9");

        let blank = json!({"id": "rec9", "Name": "   "});
        assert_eq!(normalize_record(&blank).unwrap().name, "rec9");
    }

    #[test]
    fn test_missing_id_is_dropped() {
        assert!(normalize_record(&json!({"Name": "No Id"})).is_none());
        assert!(normalize_record(&json!({"id": "  ", "Name": "Blank"})).is_none());
        assert!(normalize_record(&json!("not an object")).is_none());
        assert!(normalize_record(&json!(null)).is_none());
    }

    #[test]
    fn test_blank_optionals_become_none() {
        let raw = json!({"id": "x", "Address": "  ", "Neighborhood": null, "Latitude": "n/a"});
        let restaurant = normalize_record(&raw).unwrap();
        assert_eq!(restaurant.address, None);
        assert_eq!(restaurant.neighborhood, None);
        assert_eq!(restaurant.latitude, None);
        assert!(restaurant.cuisines.is_empty());
        assert!(restaurant.coordinate().is_none());
    }

    #[test]
    fn test_normalize_is_idempotent_over_serialized_output() {
        let raw = json!({
            "id": "rec1",
            "fields": {"Name": "Sqirl", "Cuisines": "[\"Californian\"]", "Latitude": 34.08, "Longitude": -118.28}
        });

        let first = normalize_record(&raw).unwrap();
        let second = normalize_record(&serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(first, second);
        assert_eq!(normalize_record(&raw).unwrap(), first);
    }

    #[test]
    fn test_normalize_records_drops_rejects() {
        let raw = vec![json!({"id": "a"}), json!({"name": "orphan"}), json!({"id": "b"})];
        let restaurants = normalize_records(&raw);
        let ids: Vec<_> = restaurants.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
