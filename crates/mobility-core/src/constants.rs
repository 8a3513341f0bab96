//! Physical constants and the unit-bundling prefactors used by the scattering rates.
//!
//! Lengths inside the engine are in nm, carrier densities in nm⁻², energies in
//! eV and temperatures in K. Each prefactor below folds the SI constants of its
//! rate expression into a single number; the derivation is recorded next to it.

/// Elementary charge in C (CODATA 2018, exact).
pub const ELECTRON_CHARGE: f64 = 1.602_176_634e-19;
/// Electron rest mass m0 in kg (CODATA 2018).
pub const ELECTRON_MASS: f64 = 9.109_383_701_5e-31;
/// Boltzmann constant in J/K (exact).
pub const BOLTZMANN: f64 = 1.380_649e-23;
/// Vacuum permittivity ε0 in C V⁻¹ m⁻¹ (CODATA 2018).
pub const EPSILON_0: f64 = 8.854_187_812_8e-12;
/// Reduced Planck constant in J s.
pub const HBAR: f64 = 1.054_571_817e-34;

/// m0 / e in kg C⁻¹.
pub const M0_BY_E: f64 = 5.685_630_103_565_723e-12;

/// m0·e² / (2π·ε0·ħ²) · 1e-9, Thomas–Fermi wavevector prefactor in nm⁻¹.
pub const FACT_Q_TF: f64 = 37.794_522_492_295_04;
/// (33π/4 · FACT_Q_TF)^(1/3), Fang–Howard `b` prefactor in nm^(-1/3).
pub const FACT_B: f64 = 9.931_409_618_986_013;
/// m0·e⁴ / (ħ³·ε0²), interface roughness and dislocation prefactor in s⁻¹.
pub const FACT_IRF_DIS: f64 = 6.528_368_003_403_906e18;
/// 3/16 · m0·e² / 1e18, alloy disorder prefactor in nm s⁻¹.
pub const FACT_ALLOY: f64 = 3.738_372_488_277_368_5e15;
/// m0·e²·k_B / (π·ħ³), acoustic phonon prefactor in kg K⁻¹ J² s⁻³.
pub const FACT_PHONON: f64 = 8.762_231_231_847_618e10;
/// √(2·m0·e/ħ²) · 1e9, polar optical phonon wavevector prefactor in nm⁻¹.
pub const FACT_POP_K0: f64 = 5.123_167_219_674_931;
/// π·ħ²·1e18 / (m0·k_B), degeneracy factor `y` prefactor in K nm².
pub const FACT_POP_Y: f64 = 2.777_985_128_879_875e3;
/// 1e-9 · e³·m0 / (2·ε0·ħ³), polar optical phonon rate prefactor.
pub const FACT_POP: f64 = 1.803_902_116_238_587_8e17;

/// √3 / 2, converts a²·c of a wurtzite cell into its volume.
pub const HEXAGONAL_CELL_FACTOR: f64 = 0.866_025_403_784_438_6;

/// Converts a mobility in m² V⁻¹ s⁻¹ into cm² V⁻¹ s⁻¹.
pub const MOBILITY_M2_TO_CM2: f64 = 1e4;

/// 1 / (e · 1e14), sheet resistance constant for n2d in nm⁻² and μ in cm² V⁻¹ s⁻¹, yields Ω/□.
pub const SHEET_RESISTANCE_FACTOR: f64 = 62_415.090_74;

/// e · 1e14 · 1e-6, lateral figure-of-merit constant yielding MW cm⁻².
pub const LFOM_FACTOR: f64 = 1.602_176_634e-11;

/// Direct bandgap critical field prefactor, `Ecr = 1.73e5 · Eg^2.5` in V/cm.
pub const CRITICAL_FIELD_DIRECT: f64 = 1.73e5;
/// Indirect bandgap critical field prefactor, `Ecr = 2.38e5 · Eg^2` in V/cm.
pub const CRITICAL_FIELD_INDIRECT: f64 = 2.38e5;

/// Angstrom to nm.
pub const ANGSTROM_TO_NM: f64 = 0.1;

/// Carrier densities (nm⁻²) below this value are treated as an empty channel.
pub const DEFAULT_CARRIER_FLOOR: f64 = 1e-10;

/// Compositions closer than this to 0 or 1 carry no alloy disorder.
pub const PURE_BINARY_TOLERANCE: f64 = 1e-8;
