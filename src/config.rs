use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::combustion::burn_rate::PropellantModel;
use crate::constants::{
    DEFAULT_REGRESSION_STEPS, DEMO_EXIT_RADIUS, DEMO_GRAIN_INNER_RADIUS, DEMO_GRAIN_LENGTH,
    DEMO_GRAIN_OUTER_RADIUS, DEMO_THROAT_AREA, SEA_LEVEL_PRESSURE,
};
use crate::errors::BallisticsError;
use crate::grain::motor::MotorGeometry;
use crate::grain::tubular::TubularGrain;
use crate::nozzle::performance::NozzleGeometry;

/// Everything needed to fire a tubular-grain motor, as read from JSON.
///
/// Missing fields fall back to the KNSU demonstration motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    pub propellant: PropellantModel,
    pub grain: TubularGrain,
    pub nozzle: NozzleGeometry,
    pub ambient_pressure: f64, // Pa
    pub regression_steps: usize,
}

impl Default for MotorConfig {
    fn default() -> Self {
        MotorConfig {
            propellant: PropellantModel::knsu(),
            grain: TubularGrain {
                inner_radius: DEMO_GRAIN_INNER_RADIUS,
                outer_radius: DEMO_GRAIN_OUTER_RADIUS,
                length: DEMO_GRAIN_LENGTH,
            },
            nozzle: NozzleGeometry {
                throat_area: DEMO_THROAT_AREA,
                exit_area: std::f64::consts::PI * DEMO_EXIT_RADIUS.powi(2),
            },
            ambient_pressure: SEA_LEVEL_PRESSURE,
            regression_steps: DEFAULT_REGRESSION_STEPS,
        }
    }
}

impl MotorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, BallisticsError> {
        let config: MotorConfig = serde_json::from_str(json)
            .map_err(|e| BallisticsError::ConfigError(format!("invalid motor JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BallisticsError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            BallisticsError::ConfigError(format!("failed to read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_json_str(&contents)?;
        info!("Loaded motor configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, BallisticsError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BallisticsError::ConfigError(format!("failed to encode motor: {}", e)))
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        self.propellant.validate()?;
        self.grain.validate()?;
        self.nozzle.validate()?;
        if !(self.ambient_pressure.is_finite() && self.ambient_pressure >= 0.0) {
            return Err(BallisticsError::domain(format!(
                "ambient pressure must be non-negative, got {}",
                self.ambient_pressure
            )));
        }
        if self.regression_steps < 2 {
            return Err(BallisticsError::domain(format!(
                "regression_steps must be at least 2, got {}",
                self.regression_steps
            )));
        }
        Ok(())
    }

    pub fn motor_geometry(&self) -> Result<MotorGeometry, BallisticsError> {
        let burn_profile = self.grain.burn_profile(self.regression_steps)?;
        MotorGeometry::new(self.nozzle.throat_area, self.nozzle.exit_area, burn_profile)
    }
}
