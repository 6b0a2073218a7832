use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::variant::{QualityLevel, Retrieval};
use crate::utils::constants::MISSING_VALUE;

/// Geographic position of an observation, X = longitude, Y = latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoPoint {
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    /// Well-known-text rendering used by the export files (comma free).
    pub fn wkt(&self) -> String {
        format!("POINT ({} {})", self.longitude, self.latitude)
    }
}

/// Composite natural key of a persisted measurement.
///
/// No two records of the same variant may share a key; an unparseable date
/// keeps its `None` sentinel and still participates in the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeasurementKey {
    pub cruise: String,
    pub level: QualityLevel,
    pub date: Option<NaiveDate>,
    pub time: NaiveTime,
}

/// One canonical AOD observation; covers all three frequencies.
///
/// Frequency-dependent fields (standard deviations, observation counts) stay
/// at the missing-value sentinel for variants that do not carry them; the
/// per-variant field list in [`crate::schema`] governs which ones are
/// populated and exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AodMeasurement {
    pub cruise: String,
    pub level: QualityLevel,
    pub pi: String,
    pub pi_email: String,
    pub date: Option<NaiveDate>,
    pub time: NaiveTime,
    pub coordinates: GeoPoint,

    pub air_mass: f64,
    pub aod_340nm: f64,
    pub aod_380nm: f64,
    pub aod_440nm: f64,
    pub aod_500nm: f64,
    pub aod_675nm: f64,
    pub aod_870nm: f64,
    pub aod_1020nm: f64,
    pub aod_1640nm: f64,
    pub water_vapor: f64,
    pub angstrom_exponent_440_870: f64,

    pub std_340nm: f64,
    pub std_380nm: f64,
    pub std_440nm: f64,
    pub std_500nm: f64,
    pub std_675nm: f64,
    pub std_870nm: f64,
    pub std_1020nm: f64,
    pub std_1640nm: f64,
    pub std_water_vapor: f64,
    pub std_angstrom_exponent_440_870: f64,

    pub number_of_observations: Option<i64>,
    pub last_processing_date: Option<NaiveDate>,
    pub aeronet_number: Option<i64>,
    pub microtops_number: Option<i64>,
}

impl AodMeasurement {
    pub fn new(
        cruise: String,
        level: QualityLevel,
        pi: String,
        pi_email: String,
        date: Option<NaiveDate>,
        time: NaiveTime,
        coordinates: GeoPoint,
    ) -> Self {
        Self {
            cruise,
            level,
            pi,
            pi_email,
            date,
            time,
            coordinates,
            air_mass: MISSING_VALUE,
            aod_340nm: MISSING_VALUE,
            aod_380nm: MISSING_VALUE,
            aod_440nm: MISSING_VALUE,
            aod_500nm: MISSING_VALUE,
            aod_675nm: MISSING_VALUE,
            aod_870nm: MISSING_VALUE,
            aod_1020nm: MISSING_VALUE,
            aod_1640nm: MISSING_VALUE,
            water_vapor: MISSING_VALUE,
            angstrom_exponent_440_870: MISSING_VALUE,
            std_340nm: MISSING_VALUE,
            std_380nm: MISSING_VALUE,
            std_440nm: MISSING_VALUE,
            std_500nm: MISSING_VALUE,
            std_675nm: MISSING_VALUE,
            std_870nm: MISSING_VALUE,
            std_1020nm: MISSING_VALUE,
            std_1640nm: MISSING_VALUE,
            std_water_vapor: MISSING_VALUE,
            std_angstrom_exponent_440_870: MISSING_VALUE,
            number_of_observations: None,
            last_processing_date: None,
            aeronet_number: None,
            microtops_number: None,
        }
    }

    /// Table-driven setter used by the generic per-variant mapper.
    ///
    /// Returns false when the canonical name is not an AOD data field; the
    /// caller decides whether that is worth logging.
    pub fn set_field(&mut self, canonical: &str, raw: &str) -> bool {
        match canonical {
            "air_mass" => self.air_mass = parse_f64(raw),
            "aod_340nm" => self.aod_340nm = parse_f64(raw),
            "aod_380nm" => self.aod_380nm = parse_f64(raw),
            "aod_440nm" => self.aod_440nm = parse_f64(raw),
            "aod_500nm" => self.aod_500nm = parse_f64(raw),
            "aod_675nm" => self.aod_675nm = parse_f64(raw),
            "aod_870nm" => self.aod_870nm = parse_f64(raw),
            "aod_1020nm" => self.aod_1020nm = parse_f64(raw),
            "aod_1640nm" => self.aod_1640nm = parse_f64(raw),
            "water_vapor" => self.water_vapor = parse_f64(raw),
            "angstrom_exponent_440_870" => self.angstrom_exponent_440_870 = parse_f64(raw),
            "std_340nm" => self.std_340nm = parse_f64(raw),
            "std_380nm" => self.std_380nm = parse_f64(raw),
            "std_440nm" => self.std_440nm = parse_f64(raw),
            "std_500nm" => self.std_500nm = parse_f64(raw),
            "std_675nm" => self.std_675nm = parse_f64(raw),
            "std_870nm" => self.std_870nm = parse_f64(raw),
            "std_1020nm" => self.std_1020nm = parse_f64(raw),
            "std_1640nm" => self.std_1640nm = parse_f64(raw),
            "std_water_vapor" => self.std_water_vapor = parse_f64(raw),
            "std_angstrom_exponent_440_870" => {
                self.std_angstrom_exponent_440_870 = parse_f64(raw)
            }
            "number_of_observations" => self.number_of_observations = parse_i64(raw),
            "last_processing_date" => self.last_processing_date = parse_raw_date(raw),
            "aeronet_number" => self.aeronet_number = parse_i64(raw),
            "microtops_number" => self.microtops_number = parse_i64(raw),
            _ => return false,
        }
        true
    }

    /// Renders one canonical field back to its delimited-text form.
    pub fn field_value(&self, canonical: &str) -> Option<String> {
        let value = match canonical {
            "date" => render_date(self.date),
            "time" => self.time.format("%H:%M:%S").to_string(),
            "air_mass" => render_f64(self.air_mass),
            "aod_340nm" => render_f64(self.aod_340nm),
            "aod_380nm" => render_f64(self.aod_380nm),
            "aod_440nm" => render_f64(self.aod_440nm),
            "aod_500nm" => render_f64(self.aod_500nm),
            "aod_675nm" => render_f64(self.aod_675nm),
            "aod_870nm" => render_f64(self.aod_870nm),
            "aod_1020nm" => render_f64(self.aod_1020nm),
            "aod_1640nm" => render_f64(self.aod_1640nm),
            "water_vapor" => render_f64(self.water_vapor),
            "angstrom_exponent_440_870" => render_f64(self.angstrom_exponent_440_870),
            "std_340nm" => render_f64(self.std_340nm),
            "std_380nm" => render_f64(self.std_380nm),
            "std_440nm" => render_f64(self.std_440nm),
            "std_500nm" => render_f64(self.std_500nm),
            "std_675nm" => render_f64(self.std_675nm),
            "std_870nm" => render_f64(self.std_870nm),
            "std_1020nm" => render_f64(self.std_1020nm),
            "std_1640nm" => render_f64(self.std_1640nm),
            "std_water_vapor" => render_f64(self.std_water_vapor),
            "std_angstrom_exponent_440_870" => render_f64(self.std_angstrom_exponent_440_870),
            "number_of_observations" => render_opt_i64(self.number_of_observations),
            "last_processing_date" => render_date(self.last_processing_date),
            "aeronet_number" => render_opt_i64(self.aeronet_number),
            "microtops_number" => render_opt_i64(self.microtops_number),
            _ => return None,
        };
        Some(value)
    }

    /// Value of a plottable reading, if `canonical` names one.
    pub fn reading(&self, canonical: &str) -> Option<f64> {
        match canonical {
            "air_mass" => Some(self.air_mass),
            "aod_340nm" => Some(self.aod_340nm),
            "aod_380nm" => Some(self.aod_380nm),
            "aod_440nm" => Some(self.aod_440nm),
            "aod_500nm" => Some(self.aod_500nm),
            "aod_675nm" => Some(self.aod_675nm),
            "aod_870nm" => Some(self.aod_870nm),
            "aod_1020nm" => Some(self.aod_1020nm),
            "aod_1640nm" => Some(self.aod_1640nm),
            "water_vapor" => Some(self.water_vapor),
            "angstrom_exponent_440_870" => Some(self.angstrom_exponent_440_870),
            "std_340nm" => Some(self.std_340nm),
            "std_380nm" => Some(self.std_380nm),
            "std_440nm" => Some(self.std_440nm),
            "std_500nm" => Some(self.std_500nm),
            "std_675nm" => Some(self.std_675nm),
            "std_870nm" => Some(self.std_870nm),
            "std_1020nm" => Some(self.std_1020nm),
            "std_1640nm" => Some(self.std_1640nm),
            "std_water_vapor" => Some(self.std_water_vapor),
            "std_angstrom_exponent_440_870" => Some(self.std_angstrom_exponent_440_870),
            _ => None,
        }
    }
}

/// One canonical SDA observation; covers all three frequencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdaMeasurement {
    pub cruise: String,
    pub level: QualityLevel,
    pub pi: String,
    pub pi_email: String,
    pub date: Option<NaiveDate>,
    pub time: NaiveTime,
    pub coordinates: GeoPoint,

    pub julian_day: f64,
    pub air_mass: f64,
    pub solar_zenith_angle: f64,
    pub total_aod_500nm: f64,
    pub fine_mode_aod_500nm: f64,
    pub coarse_mode_aod_500nm: f64,
    pub fine_mode_fraction_500nm: f64,
    pub coarse_mode_fraction_500nm: f64,
    pub regression_dtau_a: f64,
    pub rmse_fine_mode_aod_500nm: f64,
    pub rmse_coarse_mode_aod_500nm: f64,
    pub rmse_fmf_and_cmf_fractions_500nm: f64,
    pub angstrom_exponent_total_500nm: f64,
    pub dae_dln_wavelength_total_500nm: f64,
    pub ae_fine_mode_500nm: f64,
    pub dae_dln_wavelength_fine_mode_500nm: f64,
    pub aod_870nm: f64,
    pub aod_675nm: f64,
    pub aod_500nm: f64,
    pub aod_440nm: f64,
    pub aod_380nm: f64,

    pub stdev_total_aod_500nm: f64,
    pub stdev_fine_mode_aod_500nm: f64,
    pub stdev_coarse_mode_aod_500nm: f64,
    pub stdev_fine_mode_fraction_500nm: f64,
    pub stdev_coarse_mode_fraction_500nm: f64,
    pub stdev_regression_dtau_a: f64,
    pub stdev_rmse_fine_mode_aod_500nm: f64,
    pub stdev_rmse_coarse_mode_aod_500nm: f64,
    pub stdev_rmse_fmf_and_cmf_fractions_500nm: f64,
    pub stdev_angstrom_exponent_total_500nm: f64,
    pub stdev_dae_dln_wavelength_total_500nm: f64,
    pub stdev_ae_fine_mode_500nm: f64,
    pub stdev_dae_dln_wavelength_fine_mode_500nm: f64,

    pub number_of_observations: Option<i64>,
    pub last_processing_date: Option<NaiveDate>,
    pub aeronet_number: Option<i64>,
    pub microtops_number: Option<i64>,
    pub number_of_wavelengths: Option<i64>,
    pub exact_wavelengths_for_input_aod: Option<String>,
}

impl SdaMeasurement {
    pub fn new(
        cruise: String,
        level: QualityLevel,
        pi: String,
        pi_email: String,
        date: Option<NaiveDate>,
        time: NaiveTime,
        coordinates: GeoPoint,
    ) -> Self {
        Self {
            cruise,
            level,
            pi,
            pi_email,
            date,
            time,
            coordinates,
            julian_day: MISSING_VALUE,
            air_mass: MISSING_VALUE,
            solar_zenith_angle: MISSING_VALUE,
            total_aod_500nm: MISSING_VALUE,
            fine_mode_aod_500nm: MISSING_VALUE,
            coarse_mode_aod_500nm: MISSING_VALUE,
            fine_mode_fraction_500nm: MISSING_VALUE,
            coarse_mode_fraction_500nm: MISSING_VALUE,
            regression_dtau_a: MISSING_VALUE,
            rmse_fine_mode_aod_500nm: MISSING_VALUE,
            rmse_coarse_mode_aod_500nm: MISSING_VALUE,
            rmse_fmf_and_cmf_fractions_500nm: MISSING_VALUE,
            angstrom_exponent_total_500nm: MISSING_VALUE,
            dae_dln_wavelength_total_500nm: MISSING_VALUE,
            ae_fine_mode_500nm: MISSING_VALUE,
            dae_dln_wavelength_fine_mode_500nm: MISSING_VALUE,
            aod_870nm: MISSING_VALUE,
            aod_675nm: MISSING_VALUE,
            aod_500nm: MISSING_VALUE,
            aod_440nm: MISSING_VALUE,
            aod_380nm: MISSING_VALUE,
            stdev_total_aod_500nm: MISSING_VALUE,
            stdev_fine_mode_aod_500nm: MISSING_VALUE,
            stdev_coarse_mode_aod_500nm: MISSING_VALUE,
            stdev_fine_mode_fraction_500nm: MISSING_VALUE,
            stdev_coarse_mode_fraction_500nm: MISSING_VALUE,
            stdev_regression_dtau_a: MISSING_VALUE,
            stdev_rmse_fine_mode_aod_500nm: MISSING_VALUE,
            stdev_rmse_coarse_mode_aod_500nm: MISSING_VALUE,
            stdev_rmse_fmf_and_cmf_fractions_500nm: MISSING_VALUE,
            stdev_angstrom_exponent_total_500nm: MISSING_VALUE,
            stdev_dae_dln_wavelength_total_500nm: MISSING_VALUE,
            stdev_ae_fine_mode_500nm: MISSING_VALUE,
            stdev_dae_dln_wavelength_fine_mode_500nm: MISSING_VALUE,
            number_of_observations: None,
            last_processing_date: None,
            aeronet_number: None,
            microtops_number: None,
            number_of_wavelengths: None,
            exact_wavelengths_for_input_aod: None,
        }
    }

    pub fn set_field(&mut self, canonical: &str, raw: &str) -> bool {
        match canonical {
            "julian_day" => self.julian_day = parse_f64(raw),
            "air_mass" => self.air_mass = parse_f64(raw),
            "solar_zenith_angle" => self.solar_zenith_angle = parse_f64(raw),
            "total_aod_500nm" => self.total_aod_500nm = parse_f64(raw),
            "fine_mode_aod_500nm" => self.fine_mode_aod_500nm = parse_f64(raw),
            "coarse_mode_aod_500nm" => self.coarse_mode_aod_500nm = parse_f64(raw),
            "fine_mode_fraction_500nm" => self.fine_mode_fraction_500nm = parse_f64(raw),
            "coarse_mode_fraction_500nm" => self.coarse_mode_fraction_500nm = parse_f64(raw),
            "regression_dtau_a" => self.regression_dtau_a = parse_f64(raw),
            "rmse_fine_mode_aod_500nm" => self.rmse_fine_mode_aod_500nm = parse_f64(raw),
            "rmse_coarse_mode_aod_500nm" => self.rmse_coarse_mode_aod_500nm = parse_f64(raw),
            "rmse_fmf_and_cmf_fractions_500nm" => {
                self.rmse_fmf_and_cmf_fractions_500nm = parse_f64(raw)
            }
            "angstrom_exponent_total_500nm" => {
                self.angstrom_exponent_total_500nm = parse_f64(raw)
            }
            "dae_dln_wavelength_total_500nm" => {
                self.dae_dln_wavelength_total_500nm = parse_f64(raw)
            }
            "ae_fine_mode_500nm" => self.ae_fine_mode_500nm = parse_f64(raw),
            "dae_dln_wavelength_fine_mode_500nm" => {
                self.dae_dln_wavelength_fine_mode_500nm = parse_f64(raw)
            }
            "aod_870nm" => self.aod_870nm = parse_f64(raw),
            "aod_675nm" => self.aod_675nm = parse_f64(raw),
            "aod_500nm" => self.aod_500nm = parse_f64(raw),
            "aod_440nm" => self.aod_440nm = parse_f64(raw),
            "aod_380nm" => self.aod_380nm = parse_f64(raw),
            "stdev_total_aod_500nm" => self.stdev_total_aod_500nm = parse_f64(raw),
            "stdev_fine_mode_aod_500nm" => self.stdev_fine_mode_aod_500nm = parse_f64(raw),
            "stdev_coarse_mode_aod_500nm" => self.stdev_coarse_mode_aod_500nm = parse_f64(raw),
            "stdev_fine_mode_fraction_500nm" => {
                self.stdev_fine_mode_fraction_500nm = parse_f64(raw)
            }
            "stdev_coarse_mode_fraction_500nm" => {
                self.stdev_coarse_mode_fraction_500nm = parse_f64(raw)
            }
            "stdev_regression_dtau_a" => self.stdev_regression_dtau_a = parse_f64(raw),
            "stdev_rmse_fine_mode_aod_500nm" => {
                self.stdev_rmse_fine_mode_aod_500nm = parse_f64(raw)
            }
            "stdev_rmse_coarse_mode_aod_500nm" => {
                self.stdev_rmse_coarse_mode_aod_500nm = parse_f64(raw)
            }
            "stdev_rmse_fmf_and_cmf_fractions_500nm" => {
                self.stdev_rmse_fmf_and_cmf_fractions_500nm = parse_f64(raw)
            }
            "stdev_angstrom_exponent_total_500nm" => {
                self.stdev_angstrom_exponent_total_500nm = parse_f64(raw)
            }
            "stdev_dae_dln_wavelength_total_500nm" => {
                self.stdev_dae_dln_wavelength_total_500nm = parse_f64(raw)
            }
            "stdev_ae_fine_mode_500nm" => self.stdev_ae_fine_mode_500nm = parse_f64(raw),
            "stdev_dae_dln_wavelength_fine_mode_500nm" => {
                self.stdev_dae_dln_wavelength_fine_mode_500nm = parse_f64(raw)
            }
            "number_of_observations" => self.number_of_observations = parse_i64(raw),
            "last_processing_date" => self.last_processing_date = parse_raw_date(raw),
            "aeronet_number" => self.aeronet_number = parse_i64(raw),
            "microtops_number" => self.microtops_number = parse_i64(raw),
            "number_of_wavelengths" => self.number_of_wavelengths = parse_i64(raw),
            "exact_wavelengths_for_input_aod" => {
                self.exact_wavelengths_for_input_aod = Some(raw.trim().to_string())
            }
            _ => return false,
        }
        true
    }

    pub fn field_value(&self, canonical: &str) -> Option<String> {
        let value = match canonical {
            "date" => render_date(self.date),
            "time" => self.time.format("%H:%M:%S").to_string(),
            "julian_day" => render_f64(self.julian_day),
            "air_mass" => render_f64(self.air_mass),
            "solar_zenith_angle" => render_f64(self.solar_zenith_angle),
            "total_aod_500nm" => render_f64(self.total_aod_500nm),
            "fine_mode_aod_500nm" => render_f64(self.fine_mode_aod_500nm),
            "coarse_mode_aod_500nm" => render_f64(self.coarse_mode_aod_500nm),
            "fine_mode_fraction_500nm" => render_f64(self.fine_mode_fraction_500nm),
            "coarse_mode_fraction_500nm" => render_f64(self.coarse_mode_fraction_500nm),
            "regression_dtau_a" => render_f64(self.regression_dtau_a),
            "rmse_fine_mode_aod_500nm" => render_f64(self.rmse_fine_mode_aod_500nm),
            "rmse_coarse_mode_aod_500nm" => render_f64(self.rmse_coarse_mode_aod_500nm),
            "rmse_fmf_and_cmf_fractions_500nm" => {
                render_f64(self.rmse_fmf_and_cmf_fractions_500nm)
            }
            "angstrom_exponent_total_500nm" => render_f64(self.angstrom_exponent_total_500nm),
            "dae_dln_wavelength_total_500nm" => render_f64(self.dae_dln_wavelength_total_500nm),
            "ae_fine_mode_500nm" => render_f64(self.ae_fine_mode_500nm),
            "dae_dln_wavelength_fine_mode_500nm" => {
                render_f64(self.dae_dln_wavelength_fine_mode_500nm)
            }
            "aod_870nm" => render_f64(self.aod_870nm),
            "aod_675nm" => render_f64(self.aod_675nm),
            "aod_500nm" => render_f64(self.aod_500nm),
            "aod_440nm" => render_f64(self.aod_440nm),
            "aod_380nm" => render_f64(self.aod_380nm),
            "stdev_total_aod_500nm" => render_f64(self.stdev_total_aod_500nm),
            "stdev_fine_mode_aod_500nm" => render_f64(self.stdev_fine_mode_aod_500nm),
            "stdev_coarse_mode_aod_500nm" => render_f64(self.stdev_coarse_mode_aod_500nm),
            "stdev_fine_mode_fraction_500nm" => render_f64(self.stdev_fine_mode_fraction_500nm),
            "stdev_coarse_mode_fraction_500nm" => {
                render_f64(self.stdev_coarse_mode_fraction_500nm)
            }
            "stdev_regression_dtau_a" => render_f64(self.stdev_regression_dtau_a),
            "stdev_rmse_fine_mode_aod_500nm" => render_f64(self.stdev_rmse_fine_mode_aod_500nm),
            "stdev_rmse_coarse_mode_aod_500nm" => {
                render_f64(self.stdev_rmse_coarse_mode_aod_500nm)
            }
            "stdev_rmse_fmf_and_cmf_fractions_500nm" => {
                render_f64(self.stdev_rmse_fmf_and_cmf_fractions_500nm)
            }
            "stdev_angstrom_exponent_total_500nm" => {
                render_f64(self.stdev_angstrom_exponent_total_500nm)
            }
            "stdev_dae_dln_wavelength_total_500nm" => {
                render_f64(self.stdev_dae_dln_wavelength_total_500nm)
            }
            "stdev_ae_fine_mode_500nm" => render_f64(self.stdev_ae_fine_mode_500nm),
            "stdev_dae_dln_wavelength_fine_mode_500nm" => {
                render_f64(self.stdev_dae_dln_wavelength_fine_mode_500nm)
            }
            "number_of_observations" => render_opt_i64(self.number_of_observations),
            "last_processing_date" => render_date(self.last_processing_date),
            "aeronet_number" => render_opt_i64(self.aeronet_number),
            "microtops_number" => render_opt_i64(self.microtops_number),
            "number_of_wavelengths" => render_opt_i64(self.number_of_wavelengths),
            "exact_wavelengths_for_input_aod" => self
                .exact_wavelengths_for_input_aod
                .clone()
                .unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }
}

/// A persisted measurement of either retrieval kind.
#[derive(Debug, Clone)]
pub enum CanonicalMeasurement {
    Aod(Box<AodMeasurement>),
    Sda(Box<SdaMeasurement>),
}

impl CanonicalMeasurement {
    pub fn retrieval(&self) -> Retrieval {
        match self {
            CanonicalMeasurement::Aod(_) => Retrieval::Aod,
            CanonicalMeasurement::Sda(_) => Retrieval::Sda,
        }
    }

    pub fn cruise(&self) -> &str {
        match self {
            CanonicalMeasurement::Aod(m) => &m.cruise,
            CanonicalMeasurement::Sda(m) => &m.cruise,
        }
    }

    pub fn level(&self) -> QualityLevel {
        match self {
            CanonicalMeasurement::Aod(m) => m.level,
            CanonicalMeasurement::Sda(m) => m.level,
        }
    }

    pub fn pi(&self) -> &str {
        match self {
            CanonicalMeasurement::Aod(m) => &m.pi,
            CanonicalMeasurement::Sda(m) => &m.pi,
        }
    }

    pub fn pi_email(&self) -> &str {
        match self {
            CanonicalMeasurement::Aod(m) => &m.pi_email,
            CanonicalMeasurement::Sda(m) => &m.pi_email,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CanonicalMeasurement::Aod(m) => m.date,
            CanonicalMeasurement::Sda(m) => m.date,
        }
    }

    pub fn time(&self) -> NaiveTime {
        match self {
            CanonicalMeasurement::Aod(m) => m.time,
            CanonicalMeasurement::Sda(m) => m.time,
        }
    }

    pub fn coordinates(&self) -> GeoPoint {
        match self {
            CanonicalMeasurement::Aod(m) => m.coordinates,
            CanonicalMeasurement::Sda(m) => m.coordinates,
        }
    }

    pub fn aeronet_number(&self) -> Option<i64> {
        match self {
            CanonicalMeasurement::Aod(m) => m.aeronet_number,
            CanonicalMeasurement::Sda(m) => m.aeronet_number,
        }
    }

    pub fn key(&self) -> MeasurementKey {
        MeasurementKey {
            cruise: self.cruise().to_string(),
            level: self.level(),
            date: self.date(),
            time: self.time(),
        }
    }

    pub fn field_value(&self, canonical: &str) -> Option<String> {
        match self {
            CanonicalMeasurement::Aod(m) => m.field_value(canonical),
            CanonicalMeasurement::Sda(m) => m.field_value(canonical),
        }
    }

    pub fn set_field(&mut self, canonical: &str, raw: &str) -> bool {
        match self {
            CanonicalMeasurement::Aod(m) => m.set_field(canonical, raw),
            CanonicalMeasurement::Sda(m) => m.set_field(canonical, raw),
        }
    }
}

fn parse_f64(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(MISSING_VALUE)
}

fn parse_i64(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Dates arrive as `DD:MM:YYYY`; separators are repaired to `-` before
/// parsing and failures collapse to the null sentinel.
pub fn parse_raw_date(raw: &str) -> Option<NaiveDate> {
    let repaired = raw.trim().replace(':', "-");
    NaiveDate::parse_from_str(&repaired, crate::utils::constants::RAW_DATE_FORMAT).ok()
}

pub fn parse_raw_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), crate::utils::constants::RAW_TIME_FORMAT).ok()
}

fn render_f64(value: f64) -> String {
    format!("{}", value)
}

fn render_date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%d:%m:%Y").to_string())
        .unwrap_or_default()
}

fn render_opt_i64(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
