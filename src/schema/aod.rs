//! Column tables for the direct-AOD retrieval (`.lev*` files).

/// Raw header label -> canonical field name.
pub(super) const COLUMNS: &[(&str, &str)] = &[
    ("Date(dd:mm:yyyy)", "date"),
    ("Time(hh:mm:ss)", "time"),
    ("Air Mass", "air_mass"),
    ("Latitude", "latitude"),
    ("Longitude", "longitude"),
    ("AOD_340nm", "aod_340nm"),
    ("AOD_380nm", "aod_380nm"),
    ("AOD_440nm", "aod_440nm"),
    ("AOD_500nm", "aod_500nm"),
    ("AOD_675nm", "aod_675nm"),
    ("AOD_870nm", "aod_870nm"),
    ("AOD_1020nm", "aod_1020nm"),
    ("AOD_1640nm", "aod_1640nm"),
    ("Water Vapor(cm)", "water_vapor"),
    ("440-870nm_Angstrom_Exponent", "angstrom_exponent_440_870"),
    ("STD_340nm", "std_340nm"),
    ("STD_380nm", "std_380nm"),
    ("STD_440nm", "std_440nm"),
    ("STD_500nm", "std_500nm"),
    ("STD_675nm", "std_675nm"),
    ("STD_870nm", "std_870nm"),
    ("STD_1020nm", "std_1020nm"),
    ("STD_1640nm", "std_1640nm"),
    ("STD_Water_Vapor(cm)", "std_water_vapor"),
    ("STD_440-870nm_Angstrom_Exponent", "std_angstrom_exponent_440_870"),
    ("Number_of_Observations", "number_of_observations"),
    ("Last_Processing_Date(dd:mm:yyyy)", "last_processing_date"),
    ("AERONET_Number", "aeronet_number"),
    ("Microtops_Number", "microtops_number"),
];

/// Persisted fields of the per-observation (all-points) shape.
pub(super) const POINT_FIELDS: &[&str] = &[
    "date",
    "time",
    "air_mass",
    "aod_340nm",
    "aod_380nm",
    "aod_440nm",
    "aod_500nm",
    "aod_675nm",
    "aod_870nm",
    "aod_1020nm",
    "aod_1640nm",
    "water_vapor",
    "angstrom_exponent_440_870",
    "last_processing_date",
    "aeronet_number",
    "microtops_number",
];

/// Persisted fields of the series and daily shapes, which additionally carry
/// per-window standard deviations and the observation count.
pub(super) const STAT_FIELDS: &[&str] = &[
    "date",
    "time",
    "air_mass",
    "aod_340nm",
    "aod_380nm",
    "aod_440nm",
    "aod_500nm",
    "aod_675nm",
    "aod_870nm",
    "aod_1020nm",
    "aod_1640nm",
    "water_vapor",
    "angstrom_exponent_440_870",
    "std_340nm",
    "std_380nm",
    "std_440nm",
    "std_500nm",
    "std_675nm",
    "std_870nm",
    "std_1020nm",
    "std_1640nm",
    "std_water_vapor",
    "std_angstrom_exponent_440_870",
    "number_of_observations",
    "last_processing_date",
    "aeronet_number",
    "microtops_number",
];
