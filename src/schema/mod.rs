//! Static mapping tables between raw archive header labels and canonical
//! snake_case field names, one catalogue per retrieval kind.

mod aod;
mod sda;

use crate::models::variant::{DatasetVariant, Frequency, Retrieval};
use crate::utils::constants::INT_ANNOTATION;

/// Ordered raw-label <-> canonical-name mapping plus the per-frequency
/// persisted field lists of one retrieval kind.
pub struct SchemaCatalogue {
    columns: &'static [(&'static str, &'static str)],
    point_fields: &'static [&'static str],
    series_fields: &'static [&'static str],
    daily_fields: &'static [&'static str],
}

static AOD_CATALOGUE: SchemaCatalogue = SchemaCatalogue {
    columns: aod::COLUMNS,
    point_fields: aod::POINT_FIELDS,
    series_fields: aod::STAT_FIELDS,
    daily_fields: aod::STAT_FIELDS,
};

static SDA_CATALOGUE: SchemaCatalogue = SchemaCatalogue {
    columns: sda::COLUMNS,
    point_fields: sda::POINT_FIELDS,
    series_fields: sda::STAT_FIELDS,
    daily_fields: sda::STAT_FIELDS,
};

impl SchemaCatalogue {
    pub fn for_retrieval(retrieval: Retrieval) -> &'static SchemaCatalogue {
        match retrieval {
            Retrieval::Aod => &AOD_CATALOGUE,
            Retrieval::Sda => &SDA_CATALOGUE,
        }
    }

    /// Canonical name for a raw header label.
    ///
    /// A trailing `(int)` annotation is stripped before lookup; labels the
    /// catalogue does not know pass through unchanged so unknown columns
    /// never fail the pipeline.
    pub fn canonical_for<'a>(&self, raw_label: &'a str) -> &'a str {
        let label = strip_int_annotation(raw_label);
        self.columns
            .iter()
            .find(|(raw, _)| *raw == label)
            .map(|(_, canonical)| *canonical)
            .unwrap_or(label)
    }

    /// Raw header label for a canonical field name (export direction).
    /// Unknown names pass through unchanged.
    pub fn raw_for<'a>(&self, canonical: &'a str) -> &'a str {
        self.columns
            .iter()
            .find(|(_, c)| *c == canonical)
            .map(|(raw, _)| *raw)
            .unwrap_or(canonical)
    }

    /// Persisted canonical fields of one record shape, in export order.
    pub fn fields(&self, frequency: Frequency) -> &'static [&'static str] {
        match frequency {
            Frequency::Point => self.point_fields,
            Frequency::Series => self.series_fields,
            Frequency::Daily => self.daily_fields,
        }
    }
}

/// Persisted canonical fields of a variant, in export order.
pub fn variant_fields(variant: DatasetVariant) -> &'static [&'static str] {
    SchemaCatalogue::for_retrieval(variant.retrieval).fields(variant.frequency)
}

/// Repairs the spurious `(int)` suffix some integer-precision channels carry.
pub fn strip_int_annotation(label: &str) -> &str {
    label.strip_suffix(INT_ANNOTATION).unwrap_or(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aod_lookup() {
        let catalogue = SchemaCatalogue::for_retrieval(Retrieval::Aod);
        assert_eq!(catalogue.canonical_for("AOD_500nm"), "aod_500nm");
        assert_eq!(catalogue.canonical_for("Water Vapor(cm)"), "water_vapor");
        assert_eq!(catalogue.canonical_for("Date(dd:mm:yyyy)"), "date");
    }

    #[test]
    fn test_int_annotation_strip_resolves_identically() {
        let catalogue = SchemaCatalogue::for_retrieval(Retrieval::Aod);
        assert_eq!(
            catalogue.canonical_for("AOD_500nm(int)"),
            catalogue.canonical_for("AOD_500nm")
        );
        // Only a trailing annotation is repaired.
        assert_eq!(catalogue.canonical_for("AOD_(int)500nm"), "AOD_(int)500nm");
    }

    #[test]
    fn test_unknown_labels_pass_through() {
        let catalogue = SchemaCatalogue::for_retrieval(Retrieval::Aod);
        assert_eq!(catalogue.canonical_for("Mystery_Column"), "Mystery_Column");
        assert_eq!(catalogue.raw_for("mystery_field"), "mystery_field");
    }

    #[test]
    fn test_sda_lookup_is_disjoint_from_aod() {
        let sda = SchemaCatalogue::for_retrieval(Retrieval::Sda);
        assert_eq!(sda.canonical_for("Total_AOD_500nm(tau_a)"), "total_aod_500nm");
        assert_eq!(sda.canonical_for("500nm_Input_AOD"), "aod_500nm");

        let aod = SchemaCatalogue::for_retrieval(Retrieval::Aod);
        assert_eq!(aod.canonical_for("500nm_Input_AOD"), "500nm_Input_AOD");
    }

    #[test]
    fn test_raw_for_inverts_canonical_for() {
        for retrieval in [Retrieval::Aod, Retrieval::Sda] {
            let catalogue = SchemaCatalogue::for_retrieval(retrieval);
            for (raw, canonical) in catalogue.columns {
                assert_eq!(catalogue.canonical_for(raw), *canonical);
                assert_eq!(catalogue.raw_for(canonical), *raw);
            }
        }
    }

    #[test]
    fn test_variant_fields_are_known_to_catalogue() {
        for variant in DatasetVariant::ALL {
            let catalogue = SchemaCatalogue::for_retrieval(variant.retrieval);
            for field in variant_fields(variant) {
                assert_ne!(
                    catalogue.raw_for(field),
                    *field,
                    "field {field} has no raw label"
                );
            }
        }
    }
}
