//! Column tables for the Spectral Deconvolution Algorithm retrieval
//! (`.ONEILL_*` files).

/// Raw header label -> canonical field name.
///
/// The STDEV input-AOD channels are renamed for completeness but are not part
/// of any persisted shape; the per-variant field lists below drop them.
pub(super) const COLUMNS: &[(&str, &str)] = &[
    ("Date(dd:mm:yyyy)", "date"),
    ("Time(hh:mm:ss)", "time"),
    ("Julian_Day", "julian_day"),
    ("Air_Mass", "air_mass"),
    ("Latitude", "latitude"),
    ("Longitude", "longitude"),
    ("Total_AOD_500nm(tau_a)", "total_aod_500nm"),
    ("Fine_Mode_AOD_500nm(tau_f)", "fine_mode_aod_500nm"),
    ("Coarse_Mode_AOD_500nm(tau_c)", "coarse_mode_aod_500nm"),
    ("FineModeFraction_500nm(eta)", "fine_mode_fraction_500nm"),
    ("CoarseModeFraction_500nm(1_eta)", "coarse_mode_fraction_500nm"),
    (
        "2nd_Order_Reg_Fit_Error_Total_AOD_500nm(regression_dtau_a)",
        "regression_dtau_a",
    ),
    ("RMSE_Fine_Mode_AOD_500nm(Dtau_f)", "rmse_fine_mode_aod_500nm"),
    ("RMSE_Coarse_Mode_AOD_500nm(Dtau_c)", "rmse_coarse_mode_aod_500nm"),
    (
        "RMSE_FMF_and_CMF_Fractions_500nm(Deta)",
        "rmse_fmf_and_cmf_fractions_500nm",
    ),
    (
        "Angstrom_Exponent(AE)_Total_500nm(alpha)",
        "angstrom_exponent_total_500nm",
    ),
    (
        "dAE/dln(wavelength)_Total_500nm(alphap)",
        "dae_dln_wavelength_total_500nm",
    ),
    ("AE_Fine_Mode_500nm(alpha_f)", "ae_fine_mode_500nm"),
    (
        "dAE/dln(wavelength)_Fine_Mode_500nm(alphap_f)",
        "dae_dln_wavelength_fine_mode_500nm",
    ),
    ("870nm_Input_AOD", "aod_870nm"),
    ("675nm_Input_AOD", "aod_675nm"),
    ("500nm_Input_AOD", "aod_500nm"),
    ("440nm_Input_AOD", "aod_440nm"),
    ("380nm_Input_AOD", "aod_380nm"),
    ("STDEV-Total_AOD_500nm(tau_a)", "stdev_total_aod_500nm"),
    ("STDEV-Fine_Mode_AOD_500nm(tau_f)", "stdev_fine_mode_aod_500nm"),
    (
        "STDEV-Coarse_Mode_AOD_500nm(tau_c)",
        "stdev_coarse_mode_aod_500nm",
    ),
    (
        "STDEV-FineModeFraction_500nm(eta)",
        "stdev_fine_mode_fraction_500nm",
    ),
    (
        "STDEV-CoarseModeFraction_500nm(1_eta)",
        "stdev_coarse_mode_fraction_500nm",
    ),
    (
        "STDEV-2nd_Order_Reg_Fit_Error_Total_AOD_500nm(regression_dtau_a)",
        "stdev_regression_dtau_a",
    ),
    (
        "STDEV-RMSE_Fine_Mode_AOD_500nm(Dtau_f)",
        "stdev_rmse_fine_mode_aod_500nm",
    ),
    (
        "STDEV-RMSE_Coarse_Mode_AOD_500nm(Dtau_c)",
        "stdev_rmse_coarse_mode_aod_500nm",
    ),
    (
        "STDEV-RMSE_FMF_and_CMF_Fractions_500nm(Deta)",
        "stdev_rmse_fmf_and_cmf_fractions_500nm",
    ),
    (
        "STDEV-Angstrom_Exponent(AE)_Total_500nm(alpha)",
        "stdev_angstrom_exponent_total_500nm",
    ),
    (
        "STDEV-dAE/dln(wavelength)_Total_500nm(alphap)",
        "stdev_dae_dln_wavelength_total_500nm",
    ),
    ("STDEV-AE_Fine_Mode_500nm(alpha_f)", "stdev_ae_fine_mode_500nm"),
    (
        "STDEV-dAE/dln(wavelength)_Fine_Mode_500nm(alphap_f)",
        "stdev_dae_dln_wavelength_fine_mode_500nm",
    ),
    ("STDEV-870nm_Input_AOD", "stdev_aod_870nm"),
    ("STDEV-675nm_Input_AOD", "stdev_aod_675nm"),
    ("STDEV-500nm_Input_AOD", "stdev_aod_500nm"),
    ("STDEV-440nm_Input_AOD", "stdev_aod_440nm"),
    ("STDEV-380nm_Input_AOD", "stdev_aod_380nm"),
    ("Solar_Zenith_Angle", "solar_zenith_angle"),
    ("Number_of_Observations", "number_of_observations"),
    ("Last_Processing_Date(dd:mm:yyyy)", "last_processing_date"),
    ("AERONET_Number", "aeronet_number"),
    ("Microtops_Number", "microtops_number"),
    ("Number_of_Wavelengths", "number_of_wavelengths"),
    (
        "Exact_Wavelengths_for_Input_AOD(nm)",
        "exact_wavelengths_for_input_aod",
    ),
];

/// Persisted fields of the per-observation (all-points) shape.
pub(super) const POINT_FIELDS: &[&str] = &[
    "date",
    "time",
    "julian_day",
    "total_aod_500nm",
    "fine_mode_aod_500nm",
    "coarse_mode_aod_500nm",
    "fine_mode_fraction_500nm",
    "coarse_mode_fraction_500nm",
    "regression_dtau_a",
    "rmse_fine_mode_aod_500nm",
    "rmse_coarse_mode_aod_500nm",
    "rmse_fmf_and_cmf_fractions_500nm",
    "angstrom_exponent_total_500nm",
    "dae_dln_wavelength_total_500nm",
    "ae_fine_mode_500nm",
    "dae_dln_wavelength_fine_mode_500nm",
    "solar_zenith_angle",
    "air_mass",
    "aod_870nm",
    "aod_675nm",
    "aod_500nm",
    "aod_440nm",
    "aod_380nm",
    "last_processing_date",
    "aeronet_number",
    "microtops_number",
    "number_of_wavelengths",
    "exact_wavelengths_for_input_aod",
];

/// Persisted fields of the series and daily shapes.
pub(super) const STAT_FIELDS: &[&str] = &[
    "date",
    "time",
    "julian_day",
    "air_mass",
    "total_aod_500nm",
    "fine_mode_aod_500nm",
    "coarse_mode_aod_500nm",
    "fine_mode_fraction_500nm",
    "coarse_mode_fraction_500nm",
    "regression_dtau_a",
    "rmse_fine_mode_aod_500nm",
    "rmse_coarse_mode_aod_500nm",
    "rmse_fmf_and_cmf_fractions_500nm",
    "angstrom_exponent_total_500nm",
    "dae_dln_wavelength_total_500nm",
    "ae_fine_mode_500nm",
    "dae_dln_wavelength_fine_mode_500nm",
    "aod_870nm",
    "aod_675nm",
    "aod_500nm",
    "aod_440nm",
    "aod_380nm",
    "stdev_total_aod_500nm",
    "stdev_fine_mode_aod_500nm",
    "stdev_coarse_mode_aod_500nm",
    "stdev_fine_mode_fraction_500nm",
    "stdev_coarse_mode_fraction_500nm",
    "stdev_regression_dtau_a",
    "stdev_rmse_fine_mode_aod_500nm",
    "stdev_rmse_coarse_mode_aod_500nm",
    "stdev_rmse_fmf_and_cmf_fractions_500nm",
    "stdev_angstrom_exponent_total_500nm",
    "stdev_dae_dln_wavelength_total_500nm",
    "stdev_ae_fine_mode_500nm",
    "stdev_dae_dln_wavelength_fine_mode_500nm",
    "number_of_observations",
    "last_processing_date",
    "aeronet_number",
    "microtops_number",
    "number_of_wavelengths",
    "exact_wavelengths_for_input_aod",
];
