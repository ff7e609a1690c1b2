use serde::Serialize;

use super::generator::ThrustCurveSample;
use crate::constants::STANDARD_GRAVITY;
use crate::errors::{require_positive, BallisticsError};
use crate::utils::numeric::trapezoid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThrustCurveSummary {
    pub burn_time: f64,                // s
    pub peak_chamber_pressure: f64,    // Pa
    pub average_chamber_pressure: f64, // Pa
    pub peak_thrust: f64,              // N
    pub average_thrust: f64,           // N
    pub total_impulse: f64,            // N·s
}

impl ThrustCurveSummary {
    pub fn from_samples(samples: &[ThrustCurveSample]) -> Result<Self, BallisticsError> {
        let (first, last) = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(BallisticsError::domain("cannot summarise an empty thrust curve")),
        };

        let times: Vec<f64> = samples.iter().map(|sample| sample.time).collect();
        let pressures: Vec<f64> = samples.iter().map(|s| s.chamber_pressure).collect();
        let thrusts: Vec<f64> = samples.iter().map(|s| s.thrust).collect();

        let burn_time = last.time - first.time;
        let total_impulse = trapezoid(&times, &thrusts)?;
        let pressure_integral = trapezoid(&times, &pressures)?;

        // A single sample has no duration to average over
        let (average_chamber_pressure, average_thrust) = if burn_time > 0.0 {
            (pressure_integral / burn_time, total_impulse / burn_time)
        } else {
            (first.chamber_pressure, first.thrust)
        };

        Ok(ThrustCurveSummary {
            burn_time,
            peak_chamber_pressure: pressures.iter().cloned().fold(f64::MIN, f64::max),
            average_chamber_pressure,
            peak_thrust: thrusts.iter().cloned().fold(f64::MIN, f64::max),
            average_thrust,
            total_impulse,
        })
    }

    pub fn delivered_specific_impulse(&self, propellant_mass: f64) -> Result<f64, BallisticsError> {
        require_positive("propellant mass", propellant_mass)?;
        Ok(self.total_impulse / (propellant_mass * STANDARD_GRAVITY))
    }
}
