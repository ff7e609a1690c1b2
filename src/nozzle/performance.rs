use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::isentropic::{
    area_ratio_from_mach, check_gamma, mach_from_pressure_ratio, pressure_ratio_from_mach,
    supersonic_mach_from_area_ratio, MachSolverConfig,
};
use crate::combustion::burn_rate::PropellantModel;
use crate::combustion::equilibrium::nozzle_mass_flow;
use crate::constants::STANDARD_GRAVITY;
use crate::errors::{require_positive, BallisticsError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NozzleGeometry {
    pub throat_area: f64, // m²
    pub exit_area: f64,   // m²
}

impl NozzleGeometry {
    pub fn new(throat_area: f64, exit_area: f64) -> Result<Self, BallisticsError> {
        let nozzle = NozzleGeometry {
            throat_area,
            exit_area,
        };
        nozzle.validate()?;
        Ok(nozzle)
    }

    pub fn from_exit_radius(throat_area: f64, exit_radius: f64) -> Result<Self, BallisticsError> {
        require_positive("exit radius", exit_radius)?;
        Self::new(throat_area, PI * exit_radius.powi(2))
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        require_positive("throat area", self.throat_area)?;
        require_positive("exit area", self.exit_area)?;
        if self.exit_area < self.throat_area {
            return Err(BallisticsError::domain(format!(
                "exit area {} m² is smaller than throat area {} m²",
                self.exit_area, self.throat_area
            )));
        }
        Ok(())
    }

    pub fn expansion_ratio(&self) -> f64 {
        self.exit_area / self.throat_area
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NozzlePerformance {
    pub mass_flow: f64,     // kg/s
    pub exit_mach: f64,
    pub exit_pressure: f64, // Pa
    pub exit_velocity: f64, // m/s
    pub thrust: f64,        // N
    pub thrust_coefficient: f64,
    pub specific_impulse: f64, // s
}

/// Ideal nozzle with the exit Mach number solved once for its geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NozzleModel {
    geometry: NozzleGeometry,
    gamma: f64,
    exit_mach: f64,
    exit_pressure_ratio: f64,
}

impl NozzleModel {
    pub fn new(
        geometry: NozzleGeometry,
        gamma: f64,
        config: &MachSolverConfig,
    ) -> Result<Self, BallisticsError> {
        geometry.validate()?;
        check_gamma(gamma)?;

        let exit_mach = supersonic_mach_from_area_ratio(geometry.expansion_ratio(), gamma, config)?;
        Ok(NozzleModel {
            geometry,
            gamma,
            exit_mach,
            exit_pressure_ratio: pressure_ratio_from_mach(exit_mach, gamma),
        })
    }

    pub fn geometry(&self) -> &NozzleGeometry {
        &self.geometry
    }

    pub fn exit_mach(&self) -> f64 {
        self.exit_mach
    }

    pub fn exit_pressure(&self, chamber_pressure: f64) -> f64 {
        chamber_pressure * self.exit_pressure_ratio
    }

    pub fn performance(
        &self,
        chamber_pressure: f64,
        ambient_pressure: f64,
        characteristic_velocity: f64,
    ) -> Result<NozzlePerformance, BallisticsError> {
        require_positive("chamber pressure", chamber_pressure)?;
        require_positive("characteristic velocity", characteristic_velocity)?;
        check_ambient(ambient_pressure)?;

        let mass_flow = nozzle_mass_flow(
            chamber_pressure,
            self.geometry.throat_area,
            characteristic_velocity,
        );
        let exit_pressure = self.exit_pressure(chamber_pressure);
        let exit_velocity = exit_velocity(
            chamber_pressure,
            exit_pressure,
            characteristic_velocity,
            self.gamma,
        );
        let pressure_thrust = (exit_pressure - ambient_pressure) * self.geometry.exit_area;
        let thrust = mass_flow * exit_velocity + pressure_thrust;

        Ok(NozzlePerformance {
            mass_flow,
            exit_mach: self.exit_mach,
            exit_pressure,
            exit_velocity,
            thrust,
            thrust_coefficient: thrust / (chamber_pressure * self.geometry.throat_area),
            specific_impulse: thrust / (mass_flow * STANDARD_GRAVITY),
        })
    }
}

fn check_ambient(ambient_pressure: f64) -> Result<(), BallisticsError> {
    if ambient_pressure.is_finite() && ambient_pressure >= 0.0 {
        Ok(())
    } else {
        Err(BallisticsError::domain(format!(
            "ambient pressure must be non-negative, got {}",
            ambient_pressure
        )))
    }
}

// Isentropic expansion from the chamber to p_e, written through c*.
pub fn exit_velocity(
    chamber_pressure: f64,
    exit_pressure: f64,
    characteristic_velocity: f64,
    gamma: f64,
) -> f64 {
    let expansion = 1.0 - (exit_pressure / chamber_pressure).powf((gamma - 1.0) / gamma);
    let momentum_coefficient = (2.0 * gamma * gamma / (gamma - 1.0)
        * (2.0 / (gamma + 1.0)).powf((gamma + 1.0) / (gamma - 1.0))
        * expansion)
        .sqrt();
    characteristic_velocity * momentum_coefficient
}

pub fn nozzle_performance(
    chamber_pressure: f64,
    geometry: &NozzleGeometry,
    ambient_pressure: f64,
    propellant: &PropellantModel,
    config: &MachSolverConfig,
) -> Result<NozzlePerformance, BallisticsError> {
    let model = NozzleModel::new(*geometry, propellant.specific_heat_ratio, config)?;
    model.performance(
        chamber_pressure,
        ambient_pressure,
        propellant.characteristic_velocity,
    )
}

/// Expansion ratio `A_e/A_t` of a nozzle that expands exactly to `exit_pressure`.
pub fn matched_expansion_ratio(
    chamber_pressure: f64,
    exit_pressure: f64,
    gamma: f64,
) -> Result<f64, BallisticsError> {
    require_positive("chamber pressure", chamber_pressure)?;
    require_positive("exit pressure", exit_pressure)?;
    if exit_pressure > chamber_pressure {
        return Err(BallisticsError::domain(format!(
            "exit pressure {} Pa exceeds chamber pressure {} Pa",
            exit_pressure, chamber_pressure
        )));
    }

    let exit_mach = mach_from_pressure_ratio(exit_pressure / chamber_pressure, gamma)?;
    if exit_mach < 1.0 {
        return Err(BallisticsError::domain(format!(
            "exit pressure {} Pa is above the sonic pressure for p_c = {} Pa",
            exit_pressure, chamber_pressure
        )));
    }
    Ok(area_ratio_from_mach(exit_mach, gamma))
}

/// Thrust of a nozzle designed to exit at `exit_pressure`, firing into that
/// same ambient pressure, so only the momentum term remains.
pub fn matched_thrust(
    throat_area: f64,
    chamber_pressure: f64,
    exit_pressure: f64,
    propellant: &PropellantModel,
) -> Result<f64, BallisticsError> {
    require_positive("throat area", throat_area)?;
    matched_expansion_ratio(
        chamber_pressure,
        exit_pressure,
        propellant.specific_heat_ratio,
    )?;

    let mass_flow = nozzle_mass_flow(
        chamber_pressure,
        throat_area,
        propellant.characteristic_velocity,
    );
    Ok(mass_flow
        * exit_velocity(
            chamber_pressure,
            exit_pressure,
            propellant.characteristic_velocity,
            propellant.specific_heat_ratio,
        ))
}
