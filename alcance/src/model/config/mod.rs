mod alcance_configuration;
mod configuration_error;
mod isochrone_parameters;
mod network_config;

pub use alcance_configuration::AlcanceConfiguration;
pub use configuration_error::ConfigurationError;
pub use isochrone_parameters::IsochroneParameters;
pub use network_config::NetworkConfig;
