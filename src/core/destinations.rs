use crate::models::{RestaurantEntity, RoutableDestination};

/// Select the restaurants that can be routed to
///
/// Keeps input order and skips anything without a finite latitude and
/// longitude. An empty result is not an error here; the orchestrator
/// decides what that means for the caller.
pub fn select_routable(restaurants: &[RestaurantEntity]) -> Vec<RoutableDestination> {
    restaurants
        .iter()
        .filter_map(|restaurant| {
            restaurant.coordinate().map(|coordinate| RoutableDestination {
                id: restaurant.id.clone(),
                coordinate,
            })
        })
        .collect()
}
