//! Batch processors over frozen maps: the boat-fit predicate and its
//! parallel map build, the water-body flood-fill filter, and the keep-area
//! splice.

pub mod boat_fit;
pub mod boat_nav;
pub mod cancel;
pub mod error;
pub mod splice;
pub mod water_body;

pub use boat_fit::BoatFitChecker;
pub use boat_nav::{build_boat_nav_map, build_boat_nav_map_in, BoatNavStats};
pub use cancel::CancellationToken;
pub use error::ProcessError;
pub use splice::splice_keep_areas;
pub use water_body::{
    build_water_mask, filter_water_bodies, filter_water_bodies_in, WaterBodyStats,
    DEFAULT_MIN_BODY_SIZE,
};
