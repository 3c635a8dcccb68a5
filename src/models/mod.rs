// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinate, DriveTimeResult, DurationMap, RestaurantEntity, RoutableDestination};
pub use requests::{DriveTimesRequest, RestaurantsQuery};
pub use responses::{DriveTimesResponse, ErrorResponse, HealthResponse, RestaurantsResponse};
