use mobility_core::errors::{ErrorInfo, MobilityError};
use serde::{Deserialize, Serialize};

fn condition_error(field: &str, value: f64, message: &str) -> MobilityError {
    MobilityError::Configuration(
        ErrorInfo::new("invalid-condition", message)
            .with_context("field", field)
            .with_context("value", value),
    )
}

/// Sheet carrier density in nm⁻², shared by all compositions or given per composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CarrierDensity {
    /// Same density at every composition.
    Uniform(f64),
    /// One density per composition, in composition order.
    PerComposition(Vec<f64>),
}

impl CarrierDensity {
    /// Density at composition index `index`.
    ///
    /// Callers validate the length first; a short per-composition array reads as zero.
    pub fn at(&self, index: usize) -> f64 {
        match self {
            CarrierDensity::Uniform(value) => *value,
            CarrierDensity::PerComposition(values) => values.get(index).copied().unwrap_or(0.0),
        }
    }

    /// Checks the length against the composition count and rejects negative densities.
    pub fn validate(&self, compositions: usize) -> Result<(), MobilityError> {
        let values: &[f64] = match self {
            CarrierDensity::Uniform(value) => std::slice::from_ref(value),
            CarrierDensity::PerComposition(values) => {
                if values.len() != compositions {
                    return Err(MobilityError::Configuration(
                        ErrorInfo::new(
                            "carrier-density-length",
                            "per-composition carrier density must match the composition count",
                        )
                        .with_context("densities", values.len())
                        .with_context("compositions", compositions),
                    ));
                }
                values
            }
        };
        for value in values {
            if !value.is_finite() || *value < 0.0 {
                return Err(condition_error(
                    "carrier_density",
                    *value,
                    "carrier density must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }

    /// Expands the density into one value per composition.
    pub fn resolve(&self, compositions: usize) -> Result<Vec<f64>, MobilityError> {
        self.validate(compositions)?;
        Ok((0..compositions).map(|idx| self.at(idx)).collect())
    }
}

impl Default for CarrierDensity {
    fn default() -> Self {
        CarrierDensity::Uniform(default_carrier_density())
    }
}

impl From<f64> for CarrierDensity {
    fn from(value: f64) -> Self {
        CarrierDensity::Uniform(value)
    }
}

impl From<Vec<f64>> for CarrierDensity {
    fn from(values: Vec<f64>) -> Self {
        CarrierDensity::PerComposition(values)
    }
}

fn default_carrier_density() -> f64 {
    0.1
}

fn default_temperature() -> f64 {
    300.0
}

fn default_rms_roughness() -> f64 {
    0.1
}

fn default_correlation_length() -> f64 {
    1.0
}

fn default_dislocation_density() -> f64 {
    1.0
}

fn default_dislocation_occupancy() -> f64 {
    0.1
}

/// Operating point shared by every composition of a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingCondition {
    /// Sheet carrier density (nm⁻²).
    #[serde(default)]
    pub carrier_density: CarrierDensity,
    /// Lattice temperature (K).
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Interface rms roughness Δ (nm).
    #[serde(default = "default_rms_roughness")]
    pub rms_roughness: f64,
    /// Roughness correlation length L (nm).
    #[serde(default = "default_correlation_length")]
    pub correlation_length: f64,
    /// Threading dislocation density (nm⁻²).
    #[serde(default = "default_dislocation_density")]
    pub dislocation_density: f64,
    /// Fraction of dislocation sites that are charged.
    #[serde(default = "default_dislocation_occupancy")]
    pub dislocation_occupancy: f64,
}

impl Default for OperatingCondition {
    fn default() -> Self {
        Self {
            carrier_density: CarrierDensity::default(),
            temperature: default_temperature(),
            rms_roughness: default_rms_roughness(),
            correlation_length: default_correlation_length(),
            dislocation_density: default_dislocation_density(),
            dislocation_occupancy: default_dislocation_occupancy(),
        }
    }
}

impl OperatingCondition {
    /// Validates the condition against a scan of `compositions` points.
    pub fn validate(&self, compositions: usize) -> Result<(), MobilityError> {
        self.carrier_density.validate(compositions)?;
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(condition_error(
                "temperature",
                self.temperature,
                "temperature must be positive",
            ));
        }
        let structural = [
            ("rms_roughness", self.rms_roughness),
            ("correlation_length", self.correlation_length),
            ("dislocation_density", self.dislocation_density),
            ("dislocation_occupancy", self.dislocation_occupancy),
        ];
        for (field, value) in structural {
            if !value.is_finite() || value < 0.0 {
                return Err(condition_error(
                    field,
                    value,
                    "structural parameters must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }
}
