use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// how the primary polygon of a transit isochrone is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IsochroneOutputMode {
    /// every group boundary merged into one smoothed ring around the origin
    #[default]
    Merged,
    /// the origin circle alone, with every disk attached to the debug trace
    Simple,
}

impl Display for IsochroneOutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IsochroneOutputMode::Merged => write!(f, "merged"),
            IsochroneOutputMode::Simple => write!(f, "simple"),
        }
    }
}
