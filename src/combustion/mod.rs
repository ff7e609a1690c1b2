pub mod burn_rate;
pub mod equilibrium;
