use crate::combustion::equilibrium::EquilibriumState;
use crate::constants::MPA_TO_PSI;
use crate::thrust_curve::generator::ThrustCurveSample;
use crate::thrust_curve::summary::ThrustCurveSummary;

// Console report of a static firing. All unit conversion for display happens here.
pub struct Telemetry {
    pub log: Vec<String>,
    max_chamber_pressure: f64,
    max_thrust: f64,
    last_time: f64,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            log: Vec::new(),
            max_chamber_pressure: 0.0,
            max_thrust: 0.0,
            last_time: 0.0,
        }
    }

    pub fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.3}s", minutes, seconds)
        } else {
            format!("{:.3}s", elapsed_time)
        }
    }

    pub fn format_pressure(pressure: f64) -> String {
        let megapascals = pressure * 1e-6;
        format!(
            "{:.3} MPa ({:.1} PSI)",
            megapascals,
            megapascals * MPA_TO_PSI
        )
    }

    pub fn format_thrust(thrust: f64) -> String {
        if thrust.abs() >= 1000.0 {
            format!("{:.3} kN", thrust / 1000.0)
        } else {
            format!("{:.1} N", thrust)
        }
    }

    pub fn format_equilibrium(label: &str, state: &EquilibriumState) -> String {
        format!(
            "{}: p_c = {} ({:.1} kPa), r = {:.3} mm/s",
            label,
            Self::format_pressure(state.chamber_pressure),
            state.chamber_pressure * 1e-3,
            state.regression_rate * 1e3
        )
    }

    pub fn collect_sample(&mut self, sample: &ThrustCurveSample) {
        if sample.chamber_pressure > self.max_chamber_pressure {
            self.max_chamber_pressure = sample.chamber_pressure;
        }
        if sample.thrust > self.max_thrust {
            self.max_thrust = sample.thrust;
        }
        self.last_time = sample.time;

        self.log.push(format!(
            "t = {:>9} | p_c = {:>26} | F = {:>10}",
            Self::format_time(sample.time),
            Self::format_pressure(sample.chamber_pressure),
            Self::format_thrust(sample.thrust)
        ));
    }

    pub fn collect_curve(&mut self, curve: &[ThrustCurveSample]) {
        for sample in curve {
            self.collect_sample(sample);
        }
    }

    pub fn display_data(&self) {
        println!("--- Thrust Curve ---");
        for entry in &self.log {
            println!("{}", entry);
        }
        println!("--- End of Thrust Curve ---");

        println!("\n--- Firing Summary ---");
        println!("Burn Time: {}", Self::format_time(self.last_time));
        println!(
            "Max Chamber Pressure: {}",
            Self::format_pressure(self.max_chamber_pressure)
        );
        println!("Max Thrust: {}", Self::format_thrust(self.max_thrust));
    }

    pub fn display_summary(summary: &ThrustCurveSummary, specific_impulse: Option<f64>) {
        println!("\n--- Performance ---");
        println!(
            "Average Chamber Pressure: {}",
            Self::format_pressure(summary.average_chamber_pressure)
        );
        println!("Average Thrust: {}", Self::format_thrust(summary.average_thrust));
        println!("Total Impulse: {:.1} N·s", summary.total_impulse);
        if let Some(isp) = specific_impulse {
            println!("Delivered Specific Impulse: {:.1} s", isp);
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}
