mod reachability;
mod reachable_stop;
mod stop_area;
mod stop_locator;

pub use reachability::{traverse, walk_branch};
pub use reachable_stop::ReachableStop;
pub use stop_area::{stop_areas, StopArea};
pub use stop_locator::{locate, locate_with, nearest_in_chain, nearest_in_line, LocatedGroup, RouteGroup};
