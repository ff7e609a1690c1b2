use serde::{Deserialize, Serialize};

use crate::errors::BallisticsError;
use crate::nozzle::performance::NozzleGeometry;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurnSample {
    pub regression_distance: f64, // m
    pub burn_area: f64,           // m²
}

// Burn area sampled along the flame-front travel. Distances are strictly
// increasing; areas are checked by the equilibrium solver.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<BurnSample>", into = "Vec<BurnSample>")]
pub struct BurnProfile {
    samples: Vec<BurnSample>,
}

impl TryFrom<Vec<BurnSample>> for BurnProfile {
    type Error = BallisticsError;

    fn try_from(samples: Vec<BurnSample>) -> Result<Self, Self::Error> {
        BurnProfile::new(samples)
    }
}

impl From<BurnProfile> for Vec<BurnSample> {
    fn from(profile: BurnProfile) -> Self {
        profile.samples
    }
}

impl BurnProfile {
    pub fn new(samples: Vec<BurnSample>) -> Result<Self, BallisticsError> {
        if let Some(sample) = samples
            .iter()
            .find(|sample| !sample.regression_distance.is_finite() || !sample.burn_area.is_finite())
        {
            return Err(BallisticsError::domain(format!(
                "burn sample {:?} is not finite",
                sample
            )));
        }

        if let Some(index) = samples
            .windows(2)
            .position(|pair| pair[1].regression_distance <= pair[0].regression_distance)
        {
            return Err(BallisticsError::domain(format!(
                "regression distance must increase strictly, but sample {} is at {} m after {} m",
                index + 1,
                samples[index + 1].regression_distance,
                samples[index].regression_distance
            )));
        }

        Ok(BurnProfile { samples })
    }

    pub fn from_pairs(distances: &[f64], burn_areas: &[f64]) -> Result<Self, BallisticsError> {
        if distances.len() != burn_areas.len() {
            return Err(BallisticsError::domain(format!(
                "got {} regression distances but {} burn areas",
                distances.len(),
                burn_areas.len()
            )));
        }

        Self::new(
            distances
                .iter()
                .zip(burn_areas)
                .map(|(&regression_distance, &burn_area)| BurnSample {
                    regression_distance,
                    burn_area,
                })
                .collect(),
        )
    }

    pub fn samples(&self) -> &[BurnSample] {
        &self.samples
    }

    pub fn distances(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|sample| sample.regression_distance)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorGeometry {
    pub nozzle: NozzleGeometry,
    pub burn_profile: BurnProfile,
}

impl MotorGeometry {
    pub fn new(
        throat_area: f64,
        exit_area: f64,
        burn_profile: BurnProfile,
    ) -> Result<Self, BallisticsError> {
        Ok(MotorGeometry {
            nozzle: NozzleGeometry::new(throat_area, exit_area)?,
            burn_profile,
        })
    }

    pub fn throat_area(&self) -> f64 {
        self.nozzle.throat_area
    }

    pub fn exit_area(&self) -> f64 {
        self.nozzle.exit_area
    }
}
