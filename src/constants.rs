// Physical Constants
pub const STANDARD_GRAVITY: f64 = 9.80665; // m/s²
pub const SEA_LEVEL_PRESSURE: f64 = 101325.0; // Pa (pascals)

// Unit Conversions (display only, the core works in SI)
pub const MPA_TO_PSI: f64 = 145.037738;

// Numerical Parameters
pub const MACH_SOLVER_MAX_ITERATIONS: usize = 200;
pub const MACH_SOLVER_TOLERANCE: f64 = 1e-12;
pub const MACH_BRACKET_MAX_EXPANSIONS: usize = 64;
pub const EXTINGUISHED_REGRESSION_RATE: f64 = 1e-12; // m/s
pub const DEFAULT_REGRESSION_STEPS: usize = 50;

// Mass-balance search grid used for comparison with the closed form
pub const PRESSURE_GRID_MIN: f64 = 1e6; // Pa
pub const PRESSURE_GRID_MAX: f64 = 10e6; // Pa
pub const PRESSURE_GRID_POINTS: usize = 50;

// KNSU Propellant (Nakka)
pub const KNSU_SPECIFIC_HEAT_RATIO: f64 = 1.0468;
pub const KNSU_DENSITY: f64 = 1890.0; // kg/m³
pub const KNSU_BURN_RATE_EXPONENT: f64 = 0.319;
pub const KNSU_REFERENCE_BURN_RATE: f64 = 15.29e-3; // m/s at the reference pressure
pub const KNSU_REFERENCE_PRESSURE: f64 = 6.9e6; // Pa (~1000 PSI)
pub const KNSU_CHARACTERISTIC_VELOCITY: f64 = 919.0; // m/s

// Demonstration Motor
pub const DEMO_THROAT_AREA: f64 = 295.32e-6; // m²
pub const DEMO_EXIT_RADIUS: f64 = 0.0237; // m
pub const DEMO_GRAIN_INNER_RADIUS: f64 = 6.35e-3; // m
pub const DEMO_GRAIN_OUTER_RADIUS: f64 = 25e-3; // m
pub const DEMO_GRAIN_LENGTH: f64 = 42e-2; // m
