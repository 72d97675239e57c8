pub mod fs_utils;
pub mod geo_utils;
