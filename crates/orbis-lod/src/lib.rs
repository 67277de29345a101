//! Level-of-detail management for cube-sphere planets: frustum visibility,
//! adaptive triangle subdivision, distance-based depth selection and the
//! throttled rebuild driver.

mod error;
mod frustum;
mod planet_lod;
mod selector;
mod subdivider;
mod visibility;

pub use error::LodError;
pub use frustum::Frustum;
pub use planet_lod::{
    CameraPose, MAX_SUBDIVISION_DEPTH, PlanetLod, PlanetLodSettings, UpdateOutcome,
};
pub use selector::{LodSelector, UpdateThrottle};
pub use subdivider::{AdaptiveSubdivider, SubdivisionStats, SubdivisionSurface};
pub use visibility::VisibilityContext;
