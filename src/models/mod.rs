//! Domain models for the esgboard pipeline.
//!
//! This module contains the vocabulary used throughout the pipeline:
//!
//! - [`Segment`] - Corporate size classification with its fixed display order
//! - [`Column`] - Registry of the expected CSV columns with display labels

// =============================================================================
// Segment
// =============================================================================

/// Corporate size classification of a financed company.
///
/// The display order is fixed: Large, then Medium, then Small. Rows whose
/// segment label matches none of the three recognized values stay in the
/// raw store but are excluded from segment-ordered views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    LargeCorporate,
    MediumCorporate,
    SmallCorporate,
}

impl Segment {
    /// Parse a segment from its display label.
    ///
    /// Matching is trimmed and case-insensitive; anything else is an
    /// unordered label.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "large corporate" => Some(Self::LargeCorporate),
            "medium corporate" => Some(Self::MediumCorporate),
            "small corporate" => Some(Self::SmallCorporate),
            _ => None,
        }
    }

    /// Display label, as it appears in the CSV.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LargeCorporate => "Large Corporate",
            Self::MediumCorporate => "Medium Corporate",
            Self::SmallCorporate => "Small Corporate",
        }
    }

    /// Identifier-safe name, used in chart names.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::LargeCorporate => "large_corporate",
            Self::MediumCorporate => "medium_corporate",
            Self::SmallCorporate => "small_corporate",
        }
    }

    /// The fixed display order: Large, Medium, Small.
    pub fn ordered() -> [Segment; 3] {
        [Self::LargeCorporate, Self::MediumCorporate, Self::SmallCorporate]
    }

    /// The three recognized labels in display order.
    pub fn ordered_labels() -> [&'static str; 3] {
        [
            Self::LargeCorporate.label(),
            Self::MediumCorporate.label(),
            Self::SmallCorporate.label(),
        ]
    }
}

// =============================================================================
// Column Registry
// =============================================================================

/// The expected columns of an ESG record, with their CSV headers and
/// display labels.
///
/// Chart code never references column names ad hoc: headers and labels
/// come from here and are validated once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Industry,
    Country,
    Segment,
    FinancedAmount,
    Co2Tons,
    WaterUsage,
    FloodRisk,
    WaterStress,
    DroughtRisk,
}

impl Column {
    /// Every required column, in CSV order.
    pub const REQUIRED: [Column; 9] = [
        Column::Industry,
        Column::Country,
        Column::Segment,
        Column::FinancedAmount,
        Column::Co2Tons,
        Column::WaterUsage,
        Column::FloodRisk,
        Column::WaterStress,
        Column::DroughtRisk,
    ];

    /// The three climate-risk columns, in heatmap order.
    pub const RISKS: [Column; 3] = [Column::FloodRisk, Column::WaterStress, Column::DroughtRisk];

    /// Exact CSV header.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Industry => "Industry",
            Self::Country => "Country",
            Self::Segment => "Segment",
            Self::FinancedAmount => "Financed Amount",
            Self::Co2Tons => "CO2 (tons)",
            Self::WaterUsage => "Water Usage (thousand m3)",
            Self::FloodRisk => "Flood Risk",
            Self::WaterStress => "Water Stress",
            Self::DroughtRisk => "Drought Risk",
        }
    }

    /// Display label for chart axes.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Industry => "Industry",
            Self::Country => "Country",
            Self::Segment => "Segment",
            Self::FinancedAmount => "Financed Amount (USD)",
            Self::Co2Tons => "CO₂ (tons)",
            Self::WaterUsage => "Water Usage (000 m³)",
            Self::FloodRisk => "Flood Risk",
            Self::WaterStress => "Water Stress Score",
            Self::DroughtRisk => "Drought Risk",
        }
    }

    /// Whether cells of this column are coerced to numbers at load time.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Industry | Self::Country | Self::Segment)
    }

    /// Look up a column by its exact CSV header.
    pub fn from_header(header: &str) -> Option<Self> {
        Self::REQUIRED.into_iter().find(|c| c.header() == header)
    }

    /// Headers of the three risk columns.
    pub fn risk_headers() -> [&'static str; 3] {
        [
            Column::FloodRisk.header(),
            Column::WaterStress.header(),
            Column::DroughtRisk.header(),
        ]
    }
}

/// Human-readable description of the expected schema, one line per column.
pub fn columns_description() -> String {
    let mut out = String::from("Expected columns:\n");
    for column in Column::REQUIRED {
        let kind = if column.is_numeric() { "number" } else { "string" };
        out.push_str(&format!(
            "  {:<28} {:<7} (label: {})\n",
            column.header(),
            kind,
            column.label()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_from_label() {
        assert_eq!(Segment::from_label("Large Corporate"), Some(Segment::LargeCorporate));
        assert_eq!(Segment::from_label("  medium corporate  "), Some(Segment::MediumCorporate));
        assert_eq!(Segment::from_label("SMALL CORPORATE"), Some(Segment::SmallCorporate));
        assert_eq!(Segment::from_label("Micro Corporate"), None);
        assert_eq!(Segment::from_label(""), None);
    }

    #[test]
    fn test_segment_label_roundtrip() {
        for segment in Segment::ordered() {
            assert_eq!(Segment::from_label(segment.label()), Some(segment));
        }
    }

    #[test]
    fn test_segment_order() {
        assert_eq!(
            Segment::ordered_labels(),
            ["Large Corporate", "Medium Corporate", "Small Corporate"]
        );
    }

    #[test]
    fn test_column_from_header() {
        assert_eq!(Column::from_header("CO2 (tons)"), Some(Column::Co2Tons));
        assert_eq!(Column::from_header("Water Usage (thousand m3)"), Some(Column::WaterUsage));
        assert_eq!(Column::from_header("co2 (tons)"), None);
    }

    #[test]
    fn test_numeric_flags() {
        assert!(!Column::Industry.is_numeric());
        assert!(!Column::Segment.is_numeric());
        assert!(Column::FinancedAmount.is_numeric());
        assert!(Column::DroughtRisk.is_numeric());
    }

    #[test]
    fn test_columns_description_mentions_every_header() {
        let description = columns_description();
        for column in Column::REQUIRED {
            assert!(description.contains(column.header()));
        }
    }
}
