use chrono::{Local, NaiveDate};
use serde::Deserialize;
use validator::Validate;

use crate::error::{ProcessingError, Result};
use crate::models::{DatasetVariant, Frequency, QualityLevel, Retrieval};
use crate::store::BoundingBox;
use crate::utils::constants::man_epoch;

/// A download request as posted by the web layer.
///
/// Dates are ISO (`YYYY-MM-DD`) or empty; bounds are optional and only
/// filter when all four are present and ordered.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExportRequest {
    #[validate(length(min = 1, message = "no sites selected"))]
    pub sites: Vec<String>,

    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,

    #[validate(length(min = 1, message = "no retrievals selected"))]
    pub retrievals: Vec<String>,

    #[validate(length(min = 1, message = "no frequency selected"))]
    pub frequency: Vec<String>,

    #[validate(length(min = 1, message = "no quality levels selected"))]
    pub quality: Vec<String>,

    #[serde(default)]
    pub min_lat: Option<f64>,
    #[serde(default)]
    pub min_lng: Option<f64>,
    #[serde(default)]
    pub max_lat: Option<f64>,
    #[serde(default)]
    pub max_lng: Option<f64>,
}

impl ExportRequest {
    pub fn from_json(body: &str) -> Result<Self> {
        let request: ExportRequest = serde_json::from_str(body)
            .map_err(|e| ProcessingError::ExportQuery(format!("invalid JSON body: {e}")))?;
        request.validate()?;
        Ok(request)
    }

    /// Every selected (variant, level) combination, in request order.
    pub fn combinations(&self) -> Result<Vec<(DatasetVariant, QualityLevel)>> {
        let mut retrievals = Vec::new();
        for label in &self.retrievals {
            retrievals.push(Retrieval::from_request_label(label).ok_or_else(|| {
                ProcessingError::ExportQuery(format!("unknown retrieval '{label}'"))
            })?);
        }
        let mut frequencies = Vec::new();
        for label in &self.frequency {
            frequencies.push(Frequency::from_request_label(label).ok_or_else(|| {
                ProcessingError::ExportQuery(format!("unknown frequency '{label}'"))
            })?);
        }
        let mut levels = Vec::new();
        for label in &self.quality {
            levels.push(QualityLevel::from_request_label(label).ok_or_else(|| {
                ProcessingError::ExportQuery(format!("unknown quality '{label}'"))
            })?);
        }

        let mut combinations = Vec::new();
        for retrieval in &retrievals {
            for frequency in &frequencies {
                for level in &levels {
                    combinations.push((DatasetVariant::new(*retrieval, *frequency), *level));
                }
            }
        }
        Ok(combinations)
    }

    /// Inclusive date range, open-ended on either side.
    ///
    /// The frontend posts the MAN epoch and today's date as its full-range
    /// defaults; both collapse to "unbounded".
    pub fn date_range(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
        let start = parse_request_date(self.start_date.as_deref())?;
        let end = parse_request_date(self.end_date.as_deref())?;

        let today = Local::now().date_naive();
        let start = start.filter(|d| *d != man_epoch());
        let end = end.filter(|d| *d != today);
        Ok((start, end))
    }

    /// Partial or inverted bounds yield `None`: no geographic filter.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_bounds(self.min_lat, self.min_lng, self.max_lat, self.max_lng)
    }
}

fn parse_request_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ProcessingError::ExportQuery(format!("invalid date '{raw}', expected YYYY-MM-DD"))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_json() -> serde_json::Value {
        serde_json::json!({
            "sites": ["Cruise1"],
            "start_date": "",
            "end_date": "",
            "retrievals": ["AOD"],
            "frequency": ["Daily"],
            "quality": ["Level 1.5"]
        })
    }

    #[test]
    fn test_parse_minimal_request() {
        let request = ExportRequest::from_json(&base_json().to_string()).unwrap();
        assert_eq!(request.sites, vec!["Cruise1"]);
        assert_eq!(request.date_range().unwrap(), (None, None));
        assert!(request.bounding_box().is_none());

        let combos = request.combinations().unwrap();
        assert_eq!(combos.len(), 1);
        assert_eq!(
            combos[0],
            (
                DatasetVariant::new(Retrieval::Aod, Frequency::Daily),
                QualityLevel::Lev15
            )
        );
    }

    #[test]
    fn test_empty_selections_fail_validation() {
        let mut body = base_json();
        body["sites"] = serde_json::json!([]);
        assert!(ExportRequest::from_json(&body.to_string()).is_err());
    }

    #[test]
    fn test_unknown_labels_are_export_query_errors() {
        let mut body = base_json();
        body["quality"] = serde_json::json!(["Level 3.0"]);
        let request = ExportRequest::from_json(&body.to_string()).unwrap();
        assert!(matches!(
            request.combinations(),
            Err(ProcessingError::ExportQuery(_))
        ));
    }

    #[test]
    fn test_default_dates_collapse_to_unbounded() {
        let mut body = base_json();
        body["start_date"] = serde_json::json!("2004-10-16");
        body["end_date"] = serde_json::json!("2019-06-01");
        let request = ExportRequest::from_json(&body.to_string()).unwrap();
        let (start, end) = request.date_range().unwrap();
        assert_eq!(start, None);
        assert_eq!(end, NaiveDate::from_ymd_opt(2019, 6, 1));
    }

    #[test]
    fn test_partial_bounds_are_ignored() {
        let mut body = base_json();
        body["min_lat"] = serde_json::json!(-10.0);
        body["max_lat"] = serde_json::json!(10.0);
        let request = ExportRequest::from_json(&body.to_string()).unwrap();
        assert!(request.bounding_box().is_none());
    }

    #[test]
    fn test_full_cross_product() {
        let mut body = base_json();
        body["retrievals"] = serde_json::json!(["AOD", "SDA"]);
        body["frequency"] = serde_json::json!(["Point", "Daily"]);
        body["quality"] = serde_json::json!(["Level 1.5", "Level 2.0"]);
        let request = ExportRequest::from_json(&body.to_string()).unwrap();
        assert_eq!(request.combinations().unwrap().len(), 8);
    }
}
