use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::ConfigurationError;

/// tuning constants for the request-time isochrone computation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IsochroneParameters {
    /// walking speed used for every walking leg and disk radius
    pub walk_speed_meters_per_minute: f64,
    /// share of the time budget that may be spent walking to the first stop.
    /// also sets the origin disk radius.
    pub max_walk_fraction: f64,
    /// fixed overhead added once when boarding at the nearest stop
    pub boarding_seconds: f64,
    /// speed used to infer an in-vehicle time for adjacency edges that only carry a distance
    pub vehicle_fallback_speed_meters_per_second: f64,
    /// speed used for line assets without per-segment times
    pub rail_speed_meters_per_minute: f64,
    /// slack added to the sum of two radii when testing whether disks connect
    pub connection_tolerance_meters: f64,
    pub origin_step_degrees: f64,
    pub stop_step_degrees: f64,
    /// boundary samples taken from every member of a multi-disk group
    pub group_samples_per_disk: usize,
    pub group_envelope_buckets: usize,
    pub group_envelope_half_window_radians: f64,
    /// vertices of the origin circle returned in the simple output mode
    pub simple_circle_points: usize,
    /// vertices of the circle returned for walking, bike and car requests
    pub fallback_circle_points: usize,
    pub smoothing_self_weight: f64,
    pub smoothing_neighbor_weight: f64,
    pub fill_opacity: f64,
}

impl Default for IsochroneParameters {
    fn default() -> Self {
        Self {
            walk_speed_meters_per_minute: 80.0,
            max_walk_fraction: 0.7,
            boarding_seconds: 20.0,
            vehicle_fallback_speed_meters_per_second: 8.0,
            rail_speed_meters_per_minute: 500.0,
            connection_tolerance_meters: 200.0,
            origin_step_degrees: 15.0,
            stop_step_degrees: 20.0,
            group_samples_per_disk: 16,
            group_envelope_buckets: 36,
            group_envelope_half_window_radians: PI / 6.0,
            simple_circle_points: 32,
            fallback_circle_points: 8,
            smoothing_self_weight: 0.2,
            smoothing_neighbor_weight: 0.4,
            fill_opacity: 0.3,
        }
    }
}

impl IsochroneParameters {
    /// the longest walk to a first stop, in seconds, for a budget in minutes
    pub fn max_walk_seconds(&self, minutes: f64) -> f64 {
        minutes * 60.0 * self.max_walk_fraction
    }

    /// radius of the origin disk in meters for a budget in minutes
    pub fn max_walk_distance(&self, minutes: f64) -> f64 {
        minutes * self.max_walk_fraction * self.walk_speed_meters_per_minute
    }

    pub fn walk_seconds(&self, meters: f64) -> f64 {
        meters / self.walk_speed_meters_per_minute * 60.0
    }

    /// meters walkable in the given number of seconds
    pub fn walk_meters(&self, seconds: f64) -> f64 {
        seconds / 60.0 * self.walk_speed_meters_per_minute
    }

    pub fn origin_points(&self) -> usize {
        points_for_step(self.origin_step_degrees)
    }

    pub fn stop_points(&self) -> usize {
        points_for_step(self.stop_step_degrees)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        positive("walk_speed_meters_per_minute", self.walk_speed_meters_per_minute)?;
        positive(
            "vehicle_fallback_speed_meters_per_second",
            self.vehicle_fallback_speed_meters_per_second,
        )?;
        positive("rail_speed_meters_per_minute", self.rail_speed_meters_per_minute)?;
        if !(self.max_walk_fraction > 0.0 && self.max_walk_fraction <= 1.0) {
            return Err(invalid("max_walk_fraction", "must be in (0, 1]"));
        }
        non_negative("boarding_seconds", self.boarding_seconds)?;
        non_negative("connection_tolerance_meters", self.connection_tolerance_meters)?;
        for (name, step) in [
            ("origin_step_degrees", self.origin_step_degrees),
            ("stop_step_degrees", self.stop_step_degrees),
        ] {
            if !(step.is_finite() && step > 0.0 && step <= 120.0) {
                return Err(invalid(name, "must be in (0, 120] so a disk has at least 3 vertices"));
            }
        }
        for (name, n) in [
            ("group_samples_per_disk", self.group_samples_per_disk),
            ("group_envelope_buckets", self.group_envelope_buckets),
            ("simple_circle_points", self.simple_circle_points),
            ("fallback_circle_points", self.fallback_circle_points),
        ] {
            if n < 3 {
                return Err(invalid(name, "must be at least 3"));
            }
        }
        positive(
            "group_envelope_half_window_radians",
            self.group_envelope_half_window_radians,
        )?;
        non_negative("smoothing_self_weight", self.smoothing_self_weight)?;
        non_negative("smoothing_neighbor_weight", self.smoothing_neighbor_weight)?;
        let total = self.smoothing_self_weight + 2.0 * self.smoothing_neighbor_weight;
        if (total - 1.0).abs() > 1e-9 {
            return Err(invalid(
                "smoothing_self_weight",
                &format!("self weight plus both neighbor weights must sum to 1, found {total}"),
            ));
        }
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(invalid("fill_opacity", "must be in [0, 1]"));
        }
        Ok(())
    }
}

/// number of vertices produced when sampling a full circle at a fixed angular step
fn points_for_step(step_degrees: f64) -> usize {
    (360.0 / step_degrees).round().max(3.0) as usize
}

fn invalid(name: &str, message: &str) -> ConfigurationError {
    ConfigurationError::InvalidParameter {
        name: name.to_string(),
        message: message.to_string(),
    }
}

fn positive(name: &str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, &format!("must be a positive number, found {value}")))
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, &format!("must be a non-negative number, found {value}")))
    }
}
