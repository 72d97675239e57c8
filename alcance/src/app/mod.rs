pub mod cache;
pub mod cli;
mod isochrone_service;

pub use isochrone_service::IsochroneService;
