//! Global constants for the folio page logic

/// Transparent 1x1 GIF shown while no project image is loaded
pub const PLACEHOLDER_IMAGE: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// Number of neighbours on each side of the current image to preload
pub const DEFAULT_PRELOAD_RADIUS: usize = 1;

/// Upper bound for a single image load before it is treated as failed
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 15_000;

/// How many `project` entries the grid shows before "view all"
pub const PROJECTS_VISIBLE_COUNT: usize = 4;

/// Category value that counts toward the grid limit
pub const PROJECT_CATEGORY: &str = "project";

/// Default subscription endpoint, relative to the page origin
pub const DEFAULT_SUBSCRIBE_ENDPOINT: &str = "/api/subscribe";

/// Card tilt animation
pub mod tilt {
    /// Full rotation range in degrees across the card (±half at the edges)
    pub const MAX_ROTATION_DEG: f32 = 20.0;
    /// Perspective while the pointer is over the card
    pub const HOVER_PERSPECTIVE_PX: u32 = 1500;
    /// Perspective of the resting card
    pub const REST_PERSPECTIVE_PX: u32 = 2000;
    /// Transition while tracking the pointer
    pub const TRACKING_TRANSITION: &str = "transform 0s ease";
    /// Transition back to rest
    pub const RELEASE_TRANSITION: &str = "transform 0.4s ease";
}
