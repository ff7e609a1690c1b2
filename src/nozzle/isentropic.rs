use log::debug;

use crate::constants::{
    MACH_BRACKET_MAX_EXPANSIONS, MACH_SOLVER_MAX_ITERATIONS, MACH_SOLVER_TOLERANCE,
};
use crate::errors::{require_positive, BallisticsError};

/// Iteration budget for the supersonic area-Mach solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachSolverConfig {
    pub max_iterations: usize,
    pub tolerance: f64, // relative, on both bracket width and area-ratio residual
}

impl Default for MachSolverConfig {
    fn default() -> Self {
        MachSolverConfig {
            max_iterations: MACH_SOLVER_MAX_ITERATIONS,
            tolerance: MACH_SOLVER_TOLERANCE,
        }
    }
}

impl MachSolverConfig {
    pub fn validate(&self) -> Result<(), BallisticsError> {
        if self.max_iterations == 0 {
            return Err(BallisticsError::domain("max_iterations must be at least 1"));
        }
        require_positive("solver tolerance", self.tolerance)
    }
}

pub(crate) fn check_gamma(gamma: f64) -> Result<(), BallisticsError> {
    if gamma.is_finite() && gamma > 1.0 {
        Ok(())
    } else {
        Err(BallisticsError::domain(format!(
            "specific heat ratio must be greater than 1, got {}",
            gamma
        )))
    }
}

// A/A* for isentropic flow at the given Mach number.
pub fn area_ratio_from_mach(mach: f64, gamma: f64) -> f64 {
    let exponent = (gamma + 1.0) / (2.0 * (gamma - 1.0));
    let stagnation = 1.0 + 0.5 * (gamma - 1.0) * mach * mach;
    (2.0 / (gamma + 1.0) * stagnation).powf(exponent) / mach
}

// Static to stagnation pressure, p / p0.
pub fn pressure_ratio_from_mach(mach: f64, gamma: f64) -> f64 {
    (1.0 + 0.5 * (gamma - 1.0) * mach * mach).powf(-gamma / (gamma - 1.0))
}

/// Inverse of [`pressure_ratio_from_mach`]; closed form, no iteration.
pub fn mach_from_pressure_ratio(pressure_ratio: f64, gamma: f64) -> Result<f64, BallisticsError> {
    check_gamma(gamma)?;
    if !(pressure_ratio > 0.0 && pressure_ratio <= 1.0) {
        return Err(BallisticsError::domain(format!(
            "pressure ratio p/p0 must lie in (0, 1], got {}",
            pressure_ratio
        )));
    }

    let mach_squared =
        2.0 / (gamma - 1.0) * (pressure_ratio.powf(-(gamma - 1.0) / gamma) - 1.0);
    Ok(mach_squared.max(0.0).sqrt())
}

/// Exit Mach number on the supersonic branch for an expansion ratio `A_e/A_t`.
///
/// Bisection starting from the bracket `[1, 2]`, whose upper end is doubled
/// until it encloses the root.
///
/// # Errors
///
/// `DomainError` for an area ratio below 1 or `gamma <= 1`;
/// `ConvergenceError` when no bracket is found or the iteration budget runs
/// out before the tolerance is met.
pub fn supersonic_mach_from_area_ratio(
    area_ratio: f64,
    gamma: f64,
    config: &MachSolverConfig,
) -> Result<f64, BallisticsError> {
    check_gamma(gamma)?;
    config.validate()?;
    if !(area_ratio.is_finite() && area_ratio >= 1.0) {
        return Err(BallisticsError::domain(format!(
            "expansion ratio must be at least 1, got {}",
            area_ratio
        )));
    }
    if area_ratio == 1.0 {
        return Ok(1.0);
    }

    let residual = |mach: f64| area_ratio_from_mach(mach, gamma) - area_ratio;

    let mut low = 1.0;
    let mut high = 2.0;
    let mut expansions = 0;
    while residual(high) < 0.0 {
        if expansions == MACH_BRACKET_MAX_EXPANSIONS {
            return Err(BallisticsError::convergence(format!(
                "could not bracket exit Mach for expansion ratio {}",
                area_ratio
            )));
        }
        low = high;
        high *= 2.0;
        expansions += 1;
    }

    for iteration in 1..=config.max_iterations {
        let mid = 0.5 * (low + high);
        let mid_residual = residual(mid);

        let width_converged = high - low <= config.tolerance * mid;
        let residual_converged = mid_residual.abs() <= config.tolerance * area_ratio;
        if width_converged || residual_converged {
            debug!(
                "Exit Mach {:.6} for expansion ratio {:.4} after {} iterations",
                mid, area_ratio, iteration
            );
            return Ok(mid);
        }

        // A/A* grows monotonically with Mach on the supersonic branch
        if mid_residual < 0.0 {
            low = mid;
        } else {
            high = mid;
        }
    }

    Err(BallisticsError::convergence(format!(
        "exit Mach for expansion ratio {} did not converge in {} iterations",
        area_ratio, config.max_iterations
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_sonic_throat() {
        assert_abs_diff_eq!(area_ratio_from_mach(1.0, 1.4), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            pressure_ratio_from_mach(1.0, 1.0468),
            0.5960861322354045,
            max_relative = 1e-10
        );
    }

    #[test]
    fn test_air_table_values() {
        // Standard isentropic table, gamma = 1.4
        assert_relative_eq!(area_ratio_from_mach(2.0, 1.4), 1.6875, max_relative = 1e-4);
        assert_relative_eq!(pressure_ratio_from_mach(2.0, 1.4), 0.12780, max_relative = 1e-4);

        let config = MachSolverConfig::default();
        let mach = supersonic_mach_from_area_ratio(1.6875, 1.4, &config).unwrap();
        assert_relative_eq!(mach, 2.0, max_relative = 1e-5);
    }

    #[test]
    fn test_knsu_exit_mach() {
        let exit_area = std::f64::consts::PI * 0.0237_f64.powi(2);
        let ratio = exit_area / 295.32e-6;
        let mach =
            supersonic_mach_from_area_ratio(ratio, 1.0468, &MachSolverConfig::default()).unwrap();

        assert_relative_eq!(mach, 2.6195883719874784, max_relative = 1e-9);
        assert_relative_eq!(area_ratio_from_mach(mach, 1.0468), ratio, max_relative = 1e-9);
    }

    #[test]
    fn test_unit_area_ratio_is_sonic() {
        let mach = supersonic_mach_from_area_ratio(1.0, 1.2, &MachSolverConfig::default()).unwrap();
        assert_eq!(mach, 1.0);
    }

    #[test]
    fn test_large_area_ratio_expands_bracket() {
        let mach =
            supersonic_mach_from_area_ratio(150.0, 1.25, &MachSolverConfig::default()).unwrap();
        assert!(mach > 4.0);
        assert_relative_eq!(area_ratio_from_mach(mach, 1.25), 150.0, max_relative = 1e-9);
    }

    #[test]
    fn test_converging_nozzle_rejected() {
        let result = supersonic_mach_from_area_ratio(0.8, 1.2, &MachSolverConfig::default());
        assert!(matches!(result, Err(BallisticsError::DomainError(_))));
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let config = MachSolverConfig {
            max_iterations: 3,
            tolerance: 1e-12,
        };
        let result = supersonic_mach_from_area_ratio(5.975, 1.0468, &config);
        assert!(matches!(result, Err(BallisticsError::ConvergenceError(_))));
    }

    #[test]
    fn test_invalid_gamma() {
        let config = MachSolverConfig::default();
        assert!(supersonic_mach_from_area_ratio(4.0, 1.0, &config).is_err());
        assert!(mach_from_pressure_ratio(0.1, 0.9).is_err());
    }

    #[test]
    fn test_pressure_ratio_inverse() {
        for &mach in &[1.0, 1.7, 2.6, 4.2] {
            let ratio = pressure_ratio_from_mach(mach, 1.0468);
            let recovered = mach_from_pressure_ratio(ratio, 1.0468).unwrap();
            assert_relative_eq!(recovered, mach, max_relative = 1e-8);
        }
        assert!(mach_from_pressure_ratio(1.5, 1.2).is_err());
        assert_eq!(mach_from_pressure_ratio(1.0, 1.2).unwrap(), 0.0);
    }
}
