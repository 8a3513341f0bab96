use std::f64::consts::PI;

use mobility_alloy::MaterialPoint;
use mobility_core::constants::{
    FACT_B, FACT_IRF_DIS, FACT_POP_K0, FACT_Q_TF, HEXAGONAL_CELL_FACTOR, M0_BY_E,
};
use serde::{Deserialize, Serialize};

use crate::condition::OperatingCondition;

/// Kinematic and material quantities for one composition point.
///
/// Built once per composition index and shared read-only by every mechanism
/// evaluated at that index. Lengths in nm, wavevectors in nm⁻¹.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatteringContext {
    /// Alloy parameters at this composition.
    pub point: MaterialPoint,
    /// Sheet carrier density (nm⁻²).
    pub carrier_density: f64,
    /// Lattice temperature (K).
    pub temperature: f64,
    /// Interface rms roughness (nm).
    pub rms_roughness: f64,
    /// Roughness correlation length (nm).
    pub correlation_length: f64,
    /// Threading dislocation density (nm⁻²).
    pub dislocation_density: f64,
    /// Charged fraction of dislocation sites.
    pub dislocation_occupancy: f64,
    /// Fermi wavevector kF = √(2πn).
    pub fermi_wavevector: f64,
    /// Thomas–Fermi screening wavevector.
    pub thomas_fermi_wavevector: f64,
    /// Fang–Howard variational parameter b.
    pub fang_howard_b: f64,
    /// Shared interface roughness / dislocation prefactor (s⁻¹).
    pub screening_prefactor: f64,
    /// Wurtzite cell volume (nm³).
    pub cell_volume: f64,
    /// m*·m0/e (kg C⁻¹).
    pub mass_to_charge: f64,
    /// Polar optical phonon wavevector k0.
    pub phonon_wavevector: f64,
}

impl ScatteringContext {
    /// Derives the context for one composition at the given carrier density.
    pub fn build(point: &MaterialPoint, carrier_density: f64, condition: &OperatingCondition) -> Self {
        let mass_over_eps = point.effective_mass / point.static_dielectric;
        Self {
            point: *point,
            carrier_density,
            temperature: condition.temperature,
            rms_roughness: condition.rms_roughness,
            correlation_length: condition.correlation_length,
            dislocation_density: condition.dislocation_density,
            dislocation_occupancy: condition.dislocation_occupancy,
            fermi_wavevector: (2.0 * PI * carrier_density).sqrt(),
            thomas_fermi_wavevector: FACT_Q_TF * mass_over_eps,
            fang_howard_b: FACT_B * (carrier_density * mass_over_eps).cbrt(),
            screening_prefactor: FACT_IRF_DIS * mass_over_eps / point.static_dielectric,
            cell_volume: HEXAGONAL_CELL_FACTOR * point.lattice_a * point.lattice_a * point.lattice_c,
            mass_to_charge: point.effective_mass * M0_BY_E,
            phonon_wavevector: FACT_POP_K0 * (point.effective_mass * point.po_phonon_energy).sqrt(),
        }
    }

    /// Mole fraction of the first binary.
    pub fn composition(&self) -> f64 {
        self.point.composition
    }
}
