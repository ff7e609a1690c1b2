use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::motor::{BurnProfile, BurnSample};
use crate::errors::{require_positive, BallisticsError};
use crate::utils::numeric::linspace;

// Cylindrical grain with a circular port, burning radially outward from the port.
// Ends are inhibited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubularGrain {
    pub inner_radius: f64, // m
    pub outer_radius: f64, // m
    pub length: f64,       // m
}

impl TubularGrain {
    pub fn new(inner_radius: f64, outer_radius: f64, length: f64) -> Result<Self, BallisticsError> {
        let grain = TubularGrain {
            inner_radius,
            outer_radius,
            length,
        };
        grain.validate()?;
        Ok(grain)
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        require_positive("grain inner radius", self.inner_radius)?;
        require_positive("grain outer radius", self.outer_radius)?;
        require_positive("grain length", self.length)?;
        if self.outer_radius <= self.inner_radius {
            return Err(BallisticsError::domain(format!(
                "grain outer radius {} m must exceed inner radius {} m",
                self.outer_radius, self.inner_radius
            )));
        }
        Ok(())
    }

    pub fn web_thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    // Port surface after the flame front has moved `regression_distance` outward.
    pub fn burn_area(&self, regression_distance: f64) -> Result<f64, BallisticsError> {
        if !(regression_distance >= 0.0 && regression_distance <= self.web_thickness()) {
            return Err(BallisticsError::domain(format!(
                "regression distance {} m is outside the web [0, {}] m",
                regression_distance,
                self.web_thickness()
            )));
        }
        Ok(2.0 * PI * (self.inner_radius + regression_distance) * self.length)
    }

    // Average of the initial port and the case-wall surfaces.
    pub fn mean_burn_area(&self) -> f64 {
        PI * self.length * (self.outer_radius + self.inner_radius)
    }

    pub fn propellant_volume(&self) -> f64 {
        PI * (self.outer_radius.powi(2) - self.inner_radius.powi(2)) * self.length
    }

    pub fn propellant_mass(&self, solid_density: f64) -> f64 {
        self.propellant_volume() * solid_density
    }

    /// Evenly spaced flame-front positions from ignition to web burnout.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` for an invalid grain or fewer than two steps.
    pub fn burn_profile(&self, steps: usize) -> Result<BurnProfile, BallisticsError> {
        self.validate()?;
        if steps < 2 {
            return Err(BallisticsError::domain(format!(
                "a burn profile needs at least 2 steps, got {}",
                steps
            )));
        }

        let samples = linspace(0.0, self.web_thickness(), steps)
            .into_iter()
            .map(|regression_distance| {
                Ok(BurnSample {
                    regression_distance,
                    burn_area: self.burn_area(regression_distance)?,
                })
            })
            .collect::<Result<Vec<_>, BallisticsError>>()?;

        BurnProfile::new(samples)
    }
}
