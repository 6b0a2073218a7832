pub mod header;
pub mod measurement;
pub mod site;
pub mod variant;

pub use header::{HeaderKey, HeaderRecord};
pub use measurement::{
    AodMeasurement, CanonicalMeasurement, GeoPoint, MeasurementKey, SdaMeasurement,
};
pub use site::Site;
pub use variant::{DatasetVariant, Frequency, QualityLevel, Retrieval};
