use serde::{Deserialize, Serialize};

use crate::constants::{
    KNSU_BURN_RATE_EXPONENT, KNSU_CHARACTERISTIC_VELOCITY, KNSU_DENSITY, KNSU_REFERENCE_BURN_RATE,
    KNSU_REFERENCE_PRESSURE, KNSU_SPECIFIC_HEAT_RATIO,
};
use crate::errors::{require_positive, BallisticsError};

/// Propellant burn-rate kinetics and combustion-gas properties, all in SI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropellantModel {
    pub burn_rate_exponent: f64,      // n, dimensionless
    pub burn_rate_coefficient: f64,   // a, m·s⁻¹·Pa⁻ⁿ
    pub solid_density: f64,           // kg/m³
    pub characteristic_velocity: f64, // c*, m/s
    pub specific_heat_ratio: f64,     // γ, dimensionless
}

impl PropellantModel {
    pub fn new(
        burn_rate_exponent: f64,
        burn_rate_coefficient: f64,
        solid_density: f64,
        characteristic_velocity: f64,
        specific_heat_ratio: f64,
    ) -> Result<Self, BallisticsError> {
        let propellant = PropellantModel {
            burn_rate_exponent,
            burn_rate_coefficient,
            solid_density,
            characteristic_velocity,
            specific_heat_ratio,
        };
        propellant.validate()?;
        Ok(propellant)
    }

    /// Builds the model from a measured burn rate `reference_rate` at
    /// `reference_pressure`, so that `a = r_ref * p_ref^-n`.
    pub fn from_reference_burn_rate(
        reference_rate: f64,
        reference_pressure: f64,
        burn_rate_exponent: f64,
        solid_density: f64,
        characteristic_velocity: f64,
        specific_heat_ratio: f64,
    ) -> Result<Self, BallisticsError> {
        require_positive("reference burn rate", reference_rate)?;
        require_positive("reference pressure", reference_pressure)?;
        check_exponent(burn_rate_exponent)?;

        let coefficient = reference_rate * reference_pressure.powf(-burn_rate_exponent);
        Self::new(
            burn_rate_exponent,
            coefficient,
            solid_density,
            characteristic_velocity,
            specific_heat_ratio,
        )
    }

    // Potassium nitrate / sucrose, burning at 15.29 mm/s at 6.9 MPa.
    pub fn knsu() -> Self {
        PropellantModel {
            burn_rate_exponent: KNSU_BURN_RATE_EXPONENT,
            burn_rate_coefficient: KNSU_REFERENCE_BURN_RATE
                * KNSU_REFERENCE_PRESSURE.powf(-KNSU_BURN_RATE_EXPONENT),
            solid_density: KNSU_DENSITY,
            characteristic_velocity: KNSU_CHARACTERISTIC_VELOCITY,
            specific_heat_ratio: KNSU_SPECIFIC_HEAT_RATIO,
        }
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        check_exponent(self.burn_rate_exponent)?;
        require_positive("burn rate coefficient", self.burn_rate_coefficient)?;
        require_positive("solid density", self.solid_density)?;
        require_positive("characteristic velocity", self.characteristic_velocity)?;
        if !(self.specific_heat_ratio.is_finite() && self.specific_heat_ratio > 1.0) {
            return Err(BallisticsError::domain(format!(
                "specific heat ratio must be greater than 1, got {}",
                self.specific_heat_ratio
            )));
        }
        Ok(())
    }

    pub fn regression_rate(&self, chamber_pressure: f64) -> Result<f64, BallisticsError> {
        regression_rate(
            chamber_pressure,
            self.burn_rate_coefficient,
            self.burn_rate_exponent,
        )
    }
}

/// Saint-Robert's law: `r = a * p_c^n`.
///
/// # Errors
///
/// Returns `DomainError` for a non-positive chamber pressure or coefficient,
/// or an exponent outside `(0, 1)`.
pub fn regression_rate(
    chamber_pressure: f64,
    coefficient: f64,
    exponent: f64,
) -> Result<f64, BallisticsError> {
    require_positive("chamber pressure", chamber_pressure)?;
    require_positive("burn rate coefficient", coefficient)?;
    check_exponent(exponent)?;

    Ok(coefficient * chamber_pressure.powf(exponent))
}

pub(crate) fn check_exponent(exponent: f64) -> Result<(), BallisticsError> {
    if exponent > 0.0 && exponent < 1.0 {
        Ok(())
    } else {
        Err(BallisticsError::domain(format!(
            "burn rate exponent must lie in (0, 1), got {}",
            exponent
        )))
    }
}
