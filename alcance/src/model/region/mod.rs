mod disjoint_set;
mod disk;
mod disk_boundary;
mod disk_grouping;
mod group_boundary;
mod region_builder;

pub use disjoint_set::DisjointSet;
pub use disk::{circle_points, circle_polygon, Disk};
pub use disk_boundary::DiskBoundary;
pub use disk_grouping::{are_connected, group_disks};
pub use group_boundary::{group_boundary, radial_envelope};
pub use region_builder::{origin_disk, stop_disk};
