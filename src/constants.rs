//! Global constants for the TagZero editor core

/// Maximum number of undo snapshots kept per image
pub const HISTORY_LIMIT: usize = 50;

/// Snap radius in screen pixels (divided by the zoom scale before use)
pub const SNAP_THRESHOLD_PX: f64 = 10.0;

/// Half-length of a rendered guide line, large enough to span any canvas
pub const GUIDE_EXTENT: f64 = 100_000.0;

/// Guide line stroke colour
pub const GUIDE_STROKE: &str = "rgb(0, 161, 255)";

/// Guide line dash pattern
pub const GUIDE_DASH: [f64; 2] = [4.0, 6.0];

/// Label name written when an annotation's label id does not resolve
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Version tag written into native exports
pub const NATIVE_FORMAT_VERSION: &str = "1.0";

/// Placeholder pixel dimension written where image sizes are required
pub const PLACEHOLDER_DIMENSION: u32 = 0;

/// Minimum view scale
pub const ZOOM_MIN: f64 = 0.1;

/// Maximum view scale
pub const ZOOM_MAX: f64 = 20.0;

/// Multiplicative step for zoom in/out commands
pub const ZOOM_STEP: f64 = 1.2;
