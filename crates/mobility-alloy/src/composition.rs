use mobility_core::errors::{ErrorInfo, MobilityError};
use serde::{Deserialize, Serialize};

const DEFAULT_START: f64 = 0.01;
const DEFAULT_STOP: f64 = 0.99;
const DEFAULT_POINTS: usize = 101;

fn composition_error(code: &str, message: impl Into<String>) -> MobilityError {
    MobilityError::Configuration(ErrorInfo::new(code, message.into()))
}

/// Ordered mole fractions of the first binary.
///
/// The order given at construction is the iteration order of every table
/// derived from the set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CompositionSet {
    values: Vec<f64>,
}

impl CompositionSet {
    /// Creates a set from explicit mole fractions, each in [0, 1].
    pub fn new(values: Vec<f64>) -> Result<Self, MobilityError> {
        if values.is_empty() {
            return Err(composition_error(
                "empty-compositions",
                "composition set must contain at least one value",
            ));
        }
        if let Some((index, value)) = values
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite() || **value < 0.0 || **value > 1.0)
        {
            return Err(MobilityError::Configuration(
                ErrorInfo::new("composition-range", "mole fractions must lie in [0, 1]")
                    .with_context("index", index)
                    .with_context("value", value),
            ));
        }
        Ok(Self { values })
    }

    /// Promotes a single mole fraction to a one-element set.
    pub fn scalar(value: f64) -> Result<Self, MobilityError> {
        Self::new(vec![value])
    }

    /// `num` evenly spaced values from `start` to `stop`, both inclusive.
    pub fn linspace(start: f64, stop: f64, num: usize) -> Result<Self, MobilityError> {
        let values = match num {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (stop - start) / (num - 1) as f64;
                (0..num)
                    .map(|idx| {
                        if idx == num - 1 {
                            stop
                        } else {
                            start + step * idx as f64
                        }
                    })
                    .collect()
            }
        };
        Self::new(values)
    }

    /// 101 points on [0.01, 0.99]; the pure binaries are left out.
    pub fn default_scan() -> Self {
        let step = (DEFAULT_STOP - DEFAULT_START) / (DEFAULT_POINTS - 1) as f64;
        let values = (0..DEFAULT_POINTS)
            .map(|idx| {
                if idx == DEFAULT_POINTS - 1 {
                    DEFAULT_STOP
                } else {
                    DEFAULT_START + step * idx as f64
                }
            })
            .collect();
        Self { values }
    }

    /// Mole fractions in set order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of compositions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a validated set; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the mole fractions.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

impl Default for CompositionSet {
    fn default() -> Self {
        Self::default_scan()
    }
}

impl TryFrom<Vec<f64>> for CompositionSet {
    type Error = MobilityError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<CompositionSet> for Vec<f64> {
    fn from(set: CompositionSet) -> Self {
        set.values
    }
}

/// Configuration-file form of a composition set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompositionSpec {
    /// A single mole fraction.
    Scalar(f64),
    /// Explicit list of mole fractions.
    List(Vec<f64>),
    /// Evenly spaced range, both ends inclusive.
    Linspace {
        /// First value.
        start: f64,
        /// Last value.
        stop: f64,
        /// Number of points.
        num: usize,
    },
}

impl CompositionSpec {
    /// Resolves the specification into a validated set.
    pub fn resolve(&self) -> Result<CompositionSet, MobilityError> {
        match self {
            CompositionSpec::Scalar(value) => CompositionSet::scalar(*value),
            CompositionSpec::List(values) => CompositionSet::new(values.clone()),
            CompositionSpec::Linspace { start, stop, num } => {
                CompositionSet::linspace(*start, *stop, *num)
            }
        }
    }
}
