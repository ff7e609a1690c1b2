use log::{info, LevelFilter};
use motor_ballistics::utils::numeric::linspace;
use motor_ballistics::*;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    // Optional JSON motor description, otherwise the KNSU demonstration motor
    let config = match std::env::args().nth(1) {
        Some(path) => MotorConfig::load(path)?,
        None => {
            info!("No motor file given, firing the KNSU demonstration motor");
            MotorConfig::default()
        }
    };

    let propellant = config.propellant;
    let throat_area = config.nozzle.throat_area;

    // Equilibrium for the averaged burn area, closed form against the pressure grid
    let mean_burn_area = config.grain.mean_burn_area();
    let state = equilibrium_state(mean_burn_area, throat_area, &propellant)?;
    let grid = linspace(PRESSURE_GRID_MIN, PRESSURE_GRID_MAX, PRESSURE_GRID_POINTS);
    let sampled = sampled_equilibrium_pressure(mean_burn_area, throat_area, &propellant, &grid)?;

    println!("--- Chamber Pressure Equilibrium ---");
    println!("{}", Telemetry::format_equilibrium("Closed form", &state));
    println!(
        "Pressure grid ({} points): p_c = {}",
        grid.len(),
        Telemetry::format_pressure(sampled)
    );

    if state.chamber_pressure > SEA_LEVEL_PRESSURE {
        match matched_thrust(
            throat_area,
            state.chamber_pressure,
            SEA_LEVEL_PRESSURE,
            &propellant,
        ) {
            Ok(thrust) => println!(
                "Thrust (sea level, matched nozzle) = {}\n",
                Telemetry::format_thrust(thrust)
            ),
            Err(e) => println!("No matched sea-level nozzle: {}\n", e),
        }
    }

    // Progressive burn of the tubular grain
    let motor = config.motor_geometry()?;
    let curve =
        ThrustCurveGenerator::new(&propellant, &motor, config.ambient_pressure).generate()?;

    let mut telemetry = Telemetry::new();
    telemetry.collect_curve(&curve);
    telemetry.display_data();

    let summary = ThrustCurveSummary::from_samples(&curve)?;
    let propellant_mass = config.grain.propellant_mass(propellant.solid_density);
    let specific_impulse = summary.delivered_specific_impulse(propellant_mass).ok();
    Telemetry::display_summary(&summary, specific_impulse);

    Ok(())
}
