use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{DurationMap, RestaurantEntity};

/// Distinct cuisines across all restaurants, sorted
pub fn cuisine_options(restaurants: &[RestaurantEntity]) -> Vec<String> {
    restaurants
        .iter()
        .flat_map(|r| r.cuisines.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct neighborhoods across all restaurants, sorted
pub fn neighborhood_options(restaurants: &[RestaurantEntity]) -> Vec<String> {
    restaurants
        .iter()
        .filter_map(|r| r.neighborhood.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Listing filter: any selected cuisine matches, neighborhood must be selected
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub cuisines: Vec<String>,
    pub neighborhoods: Vec<String>,
}

impl ListingFilter {
    /// Build from comma-separated query values
    pub fn from_query(cuisine: Option<&str>, neighborhood: Option<&str>) -> Self {
        Self {
            cuisines: split_selection(cuisine),
            neighborhoods: split_selection(neighborhood),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cuisines.is_empty() && self.neighborhoods.is_empty()
    }

    pub fn matches(&self, restaurant: &RestaurantEntity) -> bool {
        if !self.cuisines.is_empty()
            && !restaurant.cuisines.iter().any(|c| self.cuisines.contains(c))
        {
            return false;
        }

        if !self.neighborhoods.is_empty() {
            return restaurant
                .neighborhood
                .as_ref()
                .is_some_and(|n| self.neighborhoods.contains(n));
        }

        true
    }

    pub fn apply(&self, restaurants: Vec<RestaurantEntity>) -> Vec<RestaurantEntity> {
        if self.is_empty() {
            return restaurants;
        }
        restaurants.into_iter().filter(|r| self.matches(r)).collect()
    }
}

fn split_selection(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Order restaurants by known drive time, unknown last, ties by name
pub fn sort_by_drive_time(
    restaurants: &[RestaurantEntity],
    durations: &DurationMap,
) -> Vec<RestaurantEntity> {
    let mut sorted = restaurants.to_vec();
    sorted.sort_by(|a, b| {
        let time_a = known_duration(durations, &a.id);
        let time_b = known_duration(durations, &b.id);
        time_a
            .partial_cmp(&time_b)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted
}

fn known_duration(durations: &DurationMap, id: &str) -> f64 {
    durations
        .get(id)
        .copied()
        .filter(|secs| secs.is_finite())
        .unwrap_or(f64::INFINITY)
}
