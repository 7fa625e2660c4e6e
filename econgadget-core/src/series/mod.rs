//! Series normalization: API payload shape, monthly filtering, rolling means.

pub mod normalize;
pub mod payload;
pub mod rolling;

pub use normalize::{normalize, normalize_body, Normalized, PointSkip, SkippedPoint};
pub use payload::{parse_payload, ApiResponse};
pub use rolling::{rolling_mean, LONG_WINDOW, SHORT_WINDOW};
