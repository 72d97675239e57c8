use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use super::{ConfigurationError, IsochroneParameters, NetworkConfig};

/// prefix of environment variables that override file settings, for example
/// `ALCANCE__PARAMETERS__WALK_SPEED_METERS_PER_MINUTE=75`.
pub const ENV_PREFIX: &str = "ALCANCE";

/// top-level run configuration for the isochrone engine.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlcanceConfiguration {
    pub network: NetworkConfig,
    pub parameters: IsochroneParameters,
}

impl AlcanceConfiguration {
    /// reads a TOML or JSON configuration file, applies environment overrides, and
    /// validates the result. relative network paths are resolved against the
    /// directory containing the file.
    pub fn from_file(path: &Path) -> Result<AlcanceConfiguration, ConfigurationError> {
        let filepath = path.display().to_string();
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            _ => return Err(ConfigurationError::UnsupportedFileType(filepath)),
        };
        let source = File::new(&filepath, format);
        let mut conf = Self::build(Config::builder().add_source(source), &filepath)?;
        if let Some(dir) = path.parent() {
            conf.network = conf.network.resolve_relative_to(dir);
        }
        Ok(conf)
    }

    /// configuration from defaults plus environment overrides only.
    pub fn from_env() -> Result<AlcanceConfiguration, ConfigurationError> {
        Self::build(Config::builder(), "environment")
    }

    /// parses configuration text in the given format. environment overrides still apply.
    pub fn from_contents(
        contents: &str,
        format: FileFormat,
    ) -> Result<AlcanceConfiguration, ConfigurationError> {
        let source = File::from_str(contents, format);
        Self::build(Config::builder().add_source(source), "inline configuration")
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        source_name: &str,
    ) -> Result<AlcanceConfiguration, ConfigurationError> {
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|source| ConfigurationError::ConfigReadError {
                msg: format!("failed reading '{source_name}'"),
                source,
            })?;
        let conf = config
            .try_deserialize::<AlcanceConfiguration>()
            .map_err(|source| ConfigurationError::ConfigReadError {
                msg: format!("failed decoding '{source_name}'"),
                source,
            })?;
        conf.parameters.validate()?;
        Ok(conf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml = r#"
            [network]
            stops_file = "stops.txt"
            adjacency_file = "adjacency_by_route.txt.gz"

            [parameters]
            walk_speed_meters_per_minute = 75.0
            boarding_seconds = 0.0
        "#;
        let conf = AlcanceConfiguration::from_contents(toml, FileFormat::Toml)
            .expect("test invariant failed: configuration should parse");
        assert_eq!(conf.network.stops_file.as_deref(), Some("stops.txt"));
        assert_eq!(conf.network.lines_file, None);
        assert_eq!(conf.parameters.walk_speed_meters_per_minute, 75.0);
        assert_eq!(conf.parameters.boarding_seconds, 0.0);
        assert_eq!(conf.parameters.max_walk_fraction, 0.7);
        assert_eq!(conf.parameters.group_envelope_buckets, 36);
    }

    #[test]
    fn test_invalid_parameter_rejected() {
        let json = r#"{ "parameters": { "max_walk_fraction": 1.5 } }"#;
        let result = AlcanceConfiguration::from_contents(json, FileFormat::Json);
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let result = AlcanceConfiguration::from_file(Path::new("alcance.yaml.bak"));
        assert!(matches!(
            result,
            Err(ConfigurationError::UnsupportedFileType(_))
        ));
    }
}
