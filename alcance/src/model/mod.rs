pub mod config;
pub mod isochrone;
pub mod network;
pub mod reach;
pub mod region;
