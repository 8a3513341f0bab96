use std::fmt;
use std::str::FromStr;

use mobility_core::errors::{ErrorInfo, MobilityError};
use serde::{Deserialize, Serialize};

/// Mobility model defining the set of rate expressions.
///
/// Bassaler et al., Adv. Electron. Mater. 2024, 2400069, complemented by
/// Zhang et al., Sci. China Ser. F 51, 780 (2008) for the phonon terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MobilityModel {
    /// Fang–Howard screened scattering rates combined with Matthiessen's rule.
    #[default]
    Bassaler,
}

impl MobilityModel {
    /// Name of the model as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            MobilityModel::Bassaler => "Bassaler",
        }
    }
}

impl fmt::Display for MobilityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MobilityModel {
    type Err = MobilityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Bassaler" => Ok(MobilityModel::Bassaler),
            other => Err(MobilityError::Configuration(
                ErrorInfo::new("unknown-model", "unsupported mobility model")
                    .with_context("model", other)
                    .with_hint("the only available model is Bassaler"),
            )),
        }
    }
}
