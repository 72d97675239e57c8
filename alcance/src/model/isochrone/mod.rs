mod debug_trace;
mod isochrone_error;
mod isochrone_ops;
mod isochrone_output_format;
mod isochrone_output_mode;
mod isochrone_request;
mod isochrone_result;
mod isochrone_style;
mod travel_mode;

pub use debug_trace::{DebugTrace, DiskTrace, RouteTrace, StopTrace};
pub use isochrone_error::IsochroneError;
pub use isochrone_ops::{fallback_circle, run_isochrone, smooth_ring, transit_isochrone};
pub use isochrone_output_format::IsochroneOutputFormat;
pub use isochrone_output_mode::IsochroneOutputMode;
pub use isochrone_request::{IsochroneRequest, MAX_MINUTES, MIN_MINUTES};
pub use isochrone_result::{Isochrone, IsochroneProperties};
pub use isochrone_style::{budget_color, DEFAULT_COLOR};
pub use travel_mode::TravelMode;
