use log::debug;
use serde::Serialize;

use super::burn_rate::PropellantModel;
use crate::errors::{require_positive, BallisticsError};

/// Chamber state at which combustion gas generation matches nozzle outflow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquilibriumState {
    pub chamber_pressure: f64, // Pa
    pub regression_rate: f64,  // m/s
}

// One point of the mass-balance illustration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MassBalancePoint {
    pub chamber_pressure: f64,
    pub nozzle_mass_flow: f64,
    pub combustion_mass_flow: f64,
}

impl MassBalancePoint {
    pub fn imbalance(&self) -> f64 {
        self.combustion_mass_flow - self.nozzle_mass_flow
    }
}

// Choked-throat outflow, kg/s.
pub fn nozzle_mass_flow(
    chamber_pressure: f64,
    throat_area: f64,
    characteristic_velocity: f64,
) -> f64 {
    chamber_pressure * throat_area / characteristic_velocity
}

// Gas generated by the regressing surface, kg/s.
pub fn combustion_mass_flow(
    chamber_pressure: f64,
    burn_area: f64,
    propellant: &PropellantModel,
) -> f64 {
    burn_area
        * propellant.solid_density
        * propellant.burn_rate_coefficient
        * chamber_pressure.powf(propellant.burn_rate_exponent)
}

/// Closed-form equilibrium chamber pressure,
/// `p_c = (A_b * rho * a * c* / A_t)^(1 / (1 - n))`.
///
/// # Errors
///
/// Returns `DomainError` if either area or any propellant property is
/// non-physical, or if the result is not a positive finite pressure.
pub fn equilibrium_pressure(
    burn_area: f64,
    throat_area: f64,
    propellant: &PropellantModel,
) -> Result<f64, BallisticsError> {
    require_positive("burn area", burn_area)?;
    require_positive("throat area", throat_area)?;
    propellant.validate()?;

    let area_ratio = burn_area / throat_area;
    let chamber_pressure = (area_ratio
        * propellant.solid_density
        * propellant.burn_rate_coefficient
        * propellant.characteristic_velocity)
        .powf(1.0 / (1.0 - propellant.burn_rate_exponent));

    if !(chamber_pressure.is_finite() && chamber_pressure > 0.0) {
        return Err(BallisticsError::domain(format!(
            "no representable equilibrium for burn/throat area ratio {}",
            area_ratio
        )));
    }

    debug!(
        "Equilibrium at A_b/A_t = {:.3}: p_c = {:.1} Pa",
        area_ratio, chamber_pressure
    );
    Ok(chamber_pressure)
}

pub fn equilibrium_state(
    burn_area: f64,
    throat_area: f64,
    propellant: &PropellantModel,
) -> Result<EquilibriumState, BallisticsError> {
    let chamber_pressure = equilibrium_pressure(burn_area, throat_area, propellant)?;
    let regression_rate = propellant.regression_rate(chamber_pressure)?;

    Ok(EquilibriumState {
        chamber_pressure,
        regression_rate,
    })
}

// Both mass-rate curves over a pressure grid.
pub fn mass_balance_curve(
    burn_area: f64,
    throat_area: f64,
    propellant: &PropellantModel,
    pressures: &[f64],
) -> Result<Vec<MassBalancePoint>, BallisticsError> {
    require_positive("burn area", burn_area)?;
    require_positive("throat area", throat_area)?;
    propellant.validate()?;

    pressures
        .iter()
        .map(|&chamber_pressure| {
            require_positive("grid pressure", chamber_pressure)?;
            Ok(MassBalancePoint {
                chamber_pressure,
                nozzle_mass_flow: nozzle_mass_flow(
                    chamber_pressure,
                    throat_area,
                    propellant.characteristic_velocity,
                ),
                combustion_mass_flow: combustion_mass_flow(chamber_pressure, burn_area, propellant),
            })
        })
        .collect()
}

/// Grid-search equilibrium: the pressure in `pressures` with the smallest
/// mass-rate imbalance. Only as accurate as the grid spacing; the first
/// minimum wins on ties.
pub fn sampled_equilibrium_pressure(
    burn_area: f64,
    throat_area: f64,
    propellant: &PropellantModel,
    pressures: &[f64],
) -> Result<f64, BallisticsError> {
    let curve = mass_balance_curve(burn_area, throat_area, propellant, pressures)?;

    curve
        .iter()
        .fold(None, |best: Option<&MassBalancePoint>, point| match best {
            Some(current) if current.imbalance().abs() <= point.imbalance().abs() => Some(current),
            _ => Some(point),
        })
        .map(|point| point.chamber_pressure)
        .ok_or_else(|| BallisticsError::domain("pressure grid is empty"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::numeric::linspace;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    const THROAT_AREA: f64 = 295.32e-6;

    fn mean_burn_area() -> f64 {
        PI * 0.42 * (50e-3 + 12.7e-3) / 2.0
    }

    #[test]
    fn test_knsu_closed_form_fixture() {
        let propellant = PropellantModel::knsu();
        let p_c = equilibrium_pressure(mean_burn_area(), THROAT_AREA, &propellant).unwrap();
        assert_relative_eq!(p_c, 2785092.554105686, max_relative = 1e-9);
    }

    #[test]
    fn test_grid_search_agrees_within_grid_step() {
        let propellant = PropellantModel::knsu();
        let grid = linspace(1e6, 10e6, 50);
        let step = grid[1] - grid[0];

        let sampled =
            sampled_equilibrium_pressure(mean_burn_area(), THROAT_AREA, &propellant, &grid)
                .unwrap();
        let exact = equilibrium_pressure(mean_burn_area(), THROAT_AREA, &propellant).unwrap();

        assert_relative_eq!(sampled, 2836734.693877551, max_relative = 1e-12);
        assert!((sampled - exact).abs() < step);
    }

    #[test]
    fn test_mass_flows_balance_at_equilibrium() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let propellant = PropellantModel::new(
                rng.gen_range(0.05..0.85),
                rng.gen_range(1e-6..1e-3),
                rng.gen_range(1000.0..2500.0),
                rng.gen_range(500.0..2000.0),
                rng.gen_range(1.05..1.4),
            )
            .unwrap();
            let burn_area = rng.gen_range(1e-3..0.5);
            let throat_area = rng.gen_range(1e-5..1e-2);

            let p_c = equilibrium_pressure(burn_area, throat_area, &propellant).unwrap();
            let outflow = nozzle_mass_flow(p_c, throat_area, propellant.characteristic_velocity);
            let generated = combustion_mass_flow(p_c, burn_area, &propellant);

            assert_relative_eq!(outflow, generated, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_pressure_increases_with_burn_area() {
        let propellant = PropellantModel::knsu();
        let pressures: Vec<f64> = linspace(0.01, 0.1, 20)
            .into_iter()
            .map(|burn_area| equilibrium_pressure(burn_area, THROAT_AREA, &propellant).unwrap())
            .collect();

        assert!(pressures.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn test_equilibrium_state_rate() {
        let propellant = PropellantModel::knsu();
        let state = equilibrium_state(mean_burn_area(), THROAT_AREA, &propellant).unwrap();
        assert_relative_eq!(
            state.regression_rate,
            propellant.burn_rate_coefficient * state.chamber_pressure.powf(0.319),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_invalid_areas() {
        let propellant = PropellantModel::knsu();
        assert!(matches!(
            equilibrium_pressure(0.0, THROAT_AREA, &propellant),
            Err(BallisticsError::DomainError(_))
        ));
        assert!(equilibrium_pressure(-0.01, THROAT_AREA, &propellant).is_err());
        assert!(equilibrium_pressure(0.04, 0.0, &propellant).is_err());
    }

    #[test]
    fn test_invalid_propellant() {
        let mut propellant = PropellantModel::knsu();
        propellant.burn_rate_exponent = 1.0;
        assert!(equilibrium_pressure(0.04, THROAT_AREA, &propellant).is_err());

        let mut propellant = PropellantModel::knsu();
        propellant.solid_density = 0.0;
        assert!(equilibrium_pressure(0.04, THROAT_AREA, &propellant).is_err());
    }

    #[test]
    fn test_mass_balance_curve_crosses_once() {
        let propellant = PropellantModel::knsu();
        let grid = linspace(1e5, 20e6, 200);
        let curve = mass_balance_curve(mean_burn_area(), THROAT_AREA, &propellant, &grid).unwrap();

        // Combustion dominates at low pressure, the nozzle at high pressure
        assert!(curve[0].imbalance() > 0.0);
        assert!(curve[199].imbalance() < 0.0);
        let sign_changes = curve
            .windows(2)
            .filter(|pair| pair[0].imbalance().signum() != pair[1].imbalance().signum())
            .count();
        assert_eq!(sign_changes, 1);

        assert_abs_diff_eq!(
            curve[0].nozzle_mass_flow,
            1e5 * THROAT_AREA / 919.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_empty_grid() {
        let propellant = PropellantModel::knsu();
        assert!(sampled_equilibrium_pressure(0.04, THROAT_AREA, &propellant, &[]).is_err());
    }
}
