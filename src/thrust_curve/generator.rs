use log::{debug, info};
use serde::Serialize;

use crate::combustion::burn_rate::PropellantModel;
use crate::combustion::equilibrium::{equilibrium_state, EquilibriumState};
use crate::constants::EXTINGUISHED_REGRESSION_RATE;
use crate::errors::BallisticsError;
use crate::grain::motor::MotorGeometry;
use crate::nozzle::isentropic::MachSolverConfig;
use crate::nozzle::performance::NozzleModel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThrustCurveSample {
    pub time: f64,             // s
    pub chamber_pressure: f64, // Pa
    pub thrust: f64,           // N
}

pub struct ThrustCurveGenerator<'a> {
    propellant: &'a PropellantModel,
    motor: &'a MotorGeometry,
    ambient_pressure: f64,
    solver_config: MachSolverConfig,
}

impl<'a> ThrustCurveGenerator<'a> {
    pub fn new(
        propellant: &'a PropellantModel,
        motor: &'a MotorGeometry,
        ambient_pressure: f64,
    ) -> Self {
        ThrustCurveGenerator {
            propellant,
            motor,
            ambient_pressure,
            solver_config: MachSolverConfig::default(),
        }
    }

    pub fn with_solver_config(mut self, solver_config: MachSolverConfig) -> Self {
        self.solver_config = solver_config;
        self
    }

    /// Runs the quasi-steady ballistics over every burn-area sample.
    ///
    /// Pressure, thrust and regression rate are found per sample; times are
    /// then accumulated from the regression distance covered at each rate.
    /// Any failing sample aborts the whole curve.
    pub fn generate(&self) -> Result<Vec<ThrustCurveSample>, BallisticsError> {
        self.propellant.validate()?;
        let profile = &self.motor.burn_profile;
        if profile.is_empty() {
            return Err(BallisticsError::domain("burn profile has no samples"));
        }

        let nozzle = NozzleModel::new(
            self.motor.nozzle,
            self.propellant.specific_heat_ratio,
            &self.solver_config,
        )?;

        let mut states: Vec<EquilibriumState> = Vec::with_capacity(profile.len());
        let mut thrusts = Vec::with_capacity(profile.len());
        for sample in profile.samples() {
            let state = equilibrium_state(
                sample.burn_area,
                nozzle.geometry().throat_area,
                self.propellant,
            )?;
            let performance = nozzle.performance(
                state.chamber_pressure,
                self.ambient_pressure,
                self.propellant.characteristic_velocity,
            )?;

            debug!(
                "x = {:.5} m, A_b = {:.5} m²: p_c = {:.1} Pa, F = {:.2} N, r = {:.6} m/s",
                sample.regression_distance,
                sample.burn_area,
                state.chamber_pressure,
                performance.thrust,
                state.regression_rate
            );
            states.push(state);
            thrusts.push(performance.thrust);
        }

        let rates: Vec<f64> = states.iter().map(|state| state.regression_rate).collect();
        let times = burn_times(&profile.distances(), &rates)?;

        let curve: Vec<ThrustCurveSample> = times
            .into_iter()
            .zip(states)
            .zip(thrusts)
            .map(|((time, state), thrust)| ThrustCurveSample {
                time,
                chamber_pressure: state.chamber_pressure,
                thrust,
            })
            .collect();

        if let Some(last) = curve.last() {
            info!(
                "Thrust curve: {} samples, last sample at {:.3} s",
                curve.len(),
                last.time
            );
        }
        Ok(curve)
    }
}

/// Time stamps for each sample: `t_0 = 0`, `t_{i+1} = t_i + (x_{i+1} - x_i) / r_i`.
///
/// # Errors
///
/// Returns `DomainError` if the inputs differ in length, or a regression
/// rate is effectively zero (the propellant has extinguished) or not finite.
pub fn burn_times(distances: &[f64], rates: &[f64]) -> Result<Vec<f64>, BallisticsError> {
    if distances.len() != rates.len() {
        return Err(BallisticsError::domain(format!(
            "got {} regression distances but {} regression rates",
            distances.len(),
            rates.len()
        )));
    }

    if let Some(index) = rates
        .iter()
        .position(|rate| !(rate.is_finite() && *rate > EXTINGUISHED_REGRESSION_RATE))
    {
        return Err(BallisticsError::domain(format!(
            "propellant extinguished: regression rate {} m/s at sample {}",
            rates[index], index
        )));
    }

    let mut times = Vec::with_capacity(distances.len());
    let mut time = 0.0;
    for (index, &rate) in rates.iter().enumerate() {
        times.push(time);
        if let Some(&next) = distances.get(index + 1) {
            time += (next - distances[index]) / rate;
        }
    }
    Ok(times)
}

pub fn thrust_curve(
    propellant: &PropellantModel,
    motor: &MotorGeometry,
    ambient_pressure: f64,
) -> Result<Vec<ThrustCurveSample>, BallisticsError> {
    ThrustCurveGenerator::new(propellant, motor, ambient_pressure).generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SEA_LEVEL_PRESSURE;
    use crate::grain::motor::BurnProfile;
    use crate::grain::tubular::TubularGrain;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    const THROAT_AREA: f64 = 295.32e-6;

    fn demo_motor() -> MotorGeometry {
        let grain = TubularGrain::new(6.35e-3, 25e-3, 42e-2).unwrap();
        MotorGeometry::new(
            THROAT_AREA,
            PI * 0.0237_f64.powi(2),
            grain.burn_profile(50).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_progressive_curve_fixture() {
        let propellant = PropellantModel::knsu();
        let motor = demo_motor();
        let curve = thrust_curve(&propellant, &motor, SEA_LEVEL_PRESSURE).unwrap();

        assert_eq!(curve.len(), 50);

        assert_eq!(curve[0].time, 0.0);
        assert_relative_eq!(curve[0].chamber_pressure, 738887.824108585, max_relative = 1e-9);
        assert_relative_eq!(curve[0].thrust, 202.76520755014957, max_relative = 1e-7);

        assert_relative_eq!(curve[1].time, 0.050768178993530276, max_relative = 1e-9);
        assert_relative_eq!(curve[24].thrust, 1233.8627737117743, max_relative = 1e-7);

        assert_relative_eq!(curve[49].time, 1.7201130079345845, max_relative = 1e-9);
        assert_relative_eq!(curve[49].chamber_pressure, 5527615.298546751, max_relative = 1e-9);
        assert_relative_eq!(curve[49].thrust, 2675.675413850611, max_relative = 1e-7);
    }

    #[test]
    fn test_times_strictly_increase() {
        let propellant = PropellantModel::knsu();
        let profile =
            BurnProfile::from_pairs(&[0.0, 1e-3, 2e-3, 5e-3, 6e-3], &[0.05, 0.03, 0.04, 0.04, 0.02])
                .unwrap();
        let motor = MotorGeometry::new(THROAT_AREA, 4.0 * THROAT_AREA, profile).unwrap();

        let curve = thrust_curve(&propellant, &motor, 0.0).unwrap();
        assert!(curve.windows(2).all(|pair| pair[1].time > pair[0].time));
    }

    #[test]
    fn test_single_sample_curve() {
        let propellant = PropellantModel::knsu();
        let profile = BurnProfile::from_pairs(&[0.0], &[0.04]).unwrap();
        let motor = MotorGeometry::new(THROAT_AREA, 4.0 * THROAT_AREA, profile).unwrap();

        let curve = thrust_curve(&propellant, &motor, 0.0).unwrap();
        assert_eq!(curve.len(), 1);
        assert_eq!(curve[0].time, 0.0);
    }

    #[test]
    fn test_non_positive_burn_area_aborts_curve() {
        let propellant = PropellantModel::knsu();
        let profile = BurnProfile::from_pairs(&[0.0, 1e-3, 2e-3], &[0.04, 0.0, 0.04]).unwrap();
        let motor = MotorGeometry::new(THROAT_AREA, 4.0 * THROAT_AREA, profile).unwrap();

        let result = thrust_curve(&propellant, &motor, SEA_LEVEL_PRESSURE);
        assert!(matches!(result, Err(BallisticsError::DomainError(_))));
    }

    #[test]
    fn test_empty_profile() {
        let propellant = PropellantModel::knsu();
        let motor =
            MotorGeometry::new(THROAT_AREA, 4.0 * THROAT_AREA, BurnProfile::default()).unwrap();
        assert!(thrust_curve(&propellant, &motor, SEA_LEVEL_PRESSURE).is_err());
    }

    #[test]
    fn test_solver_budget_surfaces_convergence_error() {
        let propellant = PropellantModel::knsu();
        let motor = demo_motor();
        let config = MachSolverConfig {
            max_iterations: 2,
            tolerance: 1e-12,
        };

        let result = ThrustCurveGenerator::new(&propellant, &motor, SEA_LEVEL_PRESSURE)
            .with_solver_config(config)
            .generate();
        assert!(matches!(result, Err(BallisticsError::ConvergenceError(_))));
    }

    #[test]
    fn test_burn_times_prefix_sum() {
        let times = burn_times(&[0.0, 1e-3, 3e-3], &[1e-3, 2e-3, 4e-3]).unwrap();
        assert_eq!(times.len(), 3);
        assert_relative_eq!(times[1], 1.0, max_relative = 1e-12);
        assert_relative_eq!(times[2], 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_rate_is_extinction() {
        let result = burn_times(&[0.0, 1e-3, 2e-3], &[5e-3, 0.0, 5e-3]);
        assert!(matches!(result, Err(BallisticsError::DomainError(_))));
        assert!(burn_times(&[0.0, 1e-3], &[5e-3, f64::NAN]).is_err());
        assert!(burn_times(&[0.0, 1e-3], &[5e-3]).is_err());
    }
}
