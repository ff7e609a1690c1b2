pub mod combustion;
pub mod config;
pub mod constants;
pub mod errors;
pub mod grain;
pub mod nozzle;
pub mod telemetry_system;
pub mod thrust_curve;
pub mod utils;

pub use constants::*;
pub use errors::BallisticsError;

// Re-export the ballistics core
pub use combustion::burn_rate::{regression_rate, PropellantModel};
pub use combustion::equilibrium::{
    equilibrium_pressure, equilibrium_state, mass_balance_curve, sampled_equilibrium_pressure,
    EquilibriumState, MassBalancePoint,
};
pub use nozzle::isentropic::MachSolverConfig;
pub use nozzle::performance::{
    matched_expansion_ratio, matched_thrust, nozzle_performance, NozzleGeometry, NozzleModel,
    NozzlePerformance,
};
pub use thrust_curve::generator::{
    burn_times, thrust_curve, ThrustCurveGenerator, ThrustCurveSample,
};
pub use thrust_curve::summary::ThrustCurveSummary;

// Re-export grain geometry and configuration
pub use config::MotorConfig;
pub use grain::motor::{BurnProfile, BurnSample, MotorGeometry};
pub use grain::tubular::TubularGrain;

// Re-export the console report
pub use telemetry_system::telemetry::Telemetry;
