// Core algorithm exports
pub mod batching;
pub mod coercion;
pub mod destinations;
pub mod listing;
pub mod normalize;
pub mod orchestrator;

pub use batching::{partition, DEFAULT_CHUNK_SIZE};
pub use coercion::{normalize_cuisine_list, to_nullable_string, to_number, CuisineShape};
pub use destinations::select_routable;
pub use listing::{cuisine_options, neighborhood_options, sort_by_drive_time, ListingFilter};
pub use normalize::{normalize_record, normalize_records};
pub use orchestrator::{DriveTimeError, DriveTimeOrchestrator};
