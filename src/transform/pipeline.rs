//! Dashboard composition.
//!
//! Combines the ordering, aggregation, and reshaping stages into the full
//! set of chart-ready tables for one record-store snapshot. Each chart is
//! handed to the presentation adapter as a [`ChartSpec`]: a named table, a
//! chart-kind tag, and display metadata. The adapter owns everything
//! visual; the contract ends here.
//!
//! # Example
//!
//! ```rust,ignore
//! use esgboard::parser::load_csv_file;
//! use esgboard::transform::pipeline::build_dashboard;
//!
//! let table = load_csv_file("dataset.csv")?;
//! let dashboard = build_dashboard(&table)?;
//! println!("{} charts", dashboard.charts.len());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;
use crate::logs::{log_info, log_success, log_warning};
use crate::models::{Column, Segment};
use crate::table::{cell_str, Table};
use crate::transform::aggregate::{count_by, mean_by};
use crate::transform::ordering::{computed_order, fixed_order, Aggregate, Direction};
use crate::transform::reshape::{filter_by_segment, melt, pivot_matrix, RiskMatrix};

/// Column name for the melted risk-type dimension.
pub const RISK_TYPE_COLUMN: &str = "Risk Type";

/// Column name for the melted average-risk value.
pub const AVERAGE_RISK_COLUMN: &str = "Average Risk";

/// Decimal places for risk averages.
pub const RISK_PRECISION: u32 = 2;

/// Kind of chart a spec feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Box,
    Scatter,
    Heatmap,
}

/// Display metadata accompanying a chart table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    /// Chart title.
    pub title: String,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// Column the adapter colors by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_by: Option<String>,
    /// Explicit category display order for the x dimension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_order: Option<Vec<String>>,
}

/// One chart-ready table plus the metadata the adapter needs to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Stable chart identifier.
    pub name: String,
    /// Chart kind tag.
    pub kind: ChartKind,
    /// The data table.
    pub table: Table,
    /// Display metadata.
    pub meta: ChartMeta,
}

/// Everything one dashboard refresh hands to the presentation adapter.
///
/// The risk heatmap ships in both shapes (melted long rows inside
/// `charts`, the Country × risk-type grid in `risk_matrix`) and the
/// adapter picks whichever its renderer wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub charts: Vec<ChartSpec>,
    pub risk_matrix: RiskMatrix,
}

/// Number of rows whose segment label matches none of the recognized
/// segments. Such rows stay in the raw store but are excluded from
/// segment-ordered views.
pub fn unordered_segment_count(table: &Table) -> usize {
    table
        .rows()
        .iter()
        .filter(|row| {
            let label = cell_str(row, Column::Segment.header()).unwrap_or("");
            Segment::from_label(label).is_none()
        })
        .count()
}

/// Per-country means of the three risk columns, rounded to two decimals.
pub fn risk_means(table: &Table) -> PipelineResult<Table> {
    let means = mean_by(
        table,
        Column::Country.header(),
        &Column::risk_headers(),
        RISK_PRECISION,
    )?;
    Ok(means)
}

/// The Country × risk-type mean matrix.
pub fn risk_matrix(table: &Table) -> PipelineResult<RiskMatrix> {
    let means = risk_means(table)?;
    let melted = melt(
        &means,
        &[Column::Country.header()],
        &Column::risk_headers(),
        RISK_TYPE_COLUMN,
        AVERAGE_RISK_COLUMN,
    )?;
    let matrix = pivot_matrix(
        &melted,
        Column::Country.header(),
        RISK_TYPE_COLUMN,
        AVERAGE_RISK_COLUMN,
    )?;
    Ok(matrix)
}

/// Build every chart table for one record-store snapshot.
///
/// Pure with respect to its input: the table is only read, and re-running
/// over the same snapshot reproduces an identical dashboard.
pub fn build_dashboard(table: &Table) -> PipelineResult<Dashboard> {
    log_info("Building dashboard tables...");

    let unordered = unordered_segment_count(table);
    if unordered > 0 {
        log_warning(format!(
            "{} rows with unrecognized segment labels (excluded from segment views)",
            unordered
        ));
    }

    let mut charts = Vec::new();

    // 1. Bar: company counts per industry and country
    let counts = count_by(
        table,
        &[Column::Industry.header(), Column::Country.header()],
    )?;
    log_success(format!(
        "Company counts: {} industry/country pairs",
        counts.len()
    ));
    charts.push(ChartSpec {
        name: "company_counts".to_string(),
        kind: ChartKind::Bar,
        table: counts,
        meta: ChartMeta {
            title: "Number of Companies per Industry and Country".to_string(),
            x_label: Column::Industry.label().to_string(),
            y_label: "Company Count".to_string(),
            color_by: Some(Column::Country.header().to_string()),
            category_order: None,
        },
    });

    // 2. Box: CO₂ by industry within each segment, fixed segment order,
    //    industries ranked by descending median CO₂. The segment-ordered
    //    view tags each row with its rank in the fixed display order.
    let segmented = fixed_order(
        table,
        Column::Segment.header(),
        &Segment::ordered_labels(),
    );
    for segment in Segment::ordered() {
        let subset = filter_by_segment(&segmented, segment);
        if subset.is_empty() {
            log_warning(format!(
                "No rows for segment {}; skipping its chart",
                segment.label()
            ));
            continue;
        }

        let industry_order = computed_order(
            &subset,
            Column::Industry.header(),
            Column::Co2Tons.header(),
            Aggregate::Median,
            Direction::Descending,
        )?;
        log_success(format!(
            "{}: {} industries ranked by median CO₂",
            segment.label(),
            industry_order.len()
        ));

        charts.push(ChartSpec {
            name: format!("co2_by_industry_{}", segment.slug()),
            kind: ChartKind::Box,
            table: subset,
            meta: ChartMeta {
                title: format!("CO₂ Emissions by Industry – Segment: {}", segment.label()),
                x_label: Column::Industry.label().to_string(),
                y_label: Column::Co2Tons.label().to_string(),
                color_by: Some(Column::Industry.header().to_string()),
                category_order: Some(industry_order),
            },
        });
    }

    // 3. Scatter: CO₂ vs financed amount
    charts.push(ChartSpec {
        name: "co2_vs_financed".to_string(),
        kind: ChartKind::Scatter,
        table: table.clone(),
        meta: ChartMeta {
            title: "CO₂ vs Financed Amount by Industry".to_string(),
            x_label: Column::FinancedAmount.label().to_string(),
            y_label: Column::Co2Tons.label().to_string(),
            color_by: Some(Column::Industry.header().to_string()),
            category_order: None,
        },
    });

    // 4. Heatmap: melted per-country risk averages
    let means = risk_means(table)?;
    let melted = melt(
        &means,
        &[Column::Country.header()],
        &Column::risk_headers(),
        RISK_TYPE_COLUMN,
        AVERAGE_RISK_COLUMN,
    )?;
    log_success(format!(
        "Risk averages: {} countries",
        means.len()
    ));
    charts.push(ChartSpec {
        name: "risk_heatmap".to_string(),
        kind: ChartKind::Heatmap,
        table: melted.clone(),
        meta: ChartMeta {
            title: "Environmental Risk Averages by Country".to_string(),
            x_label: RISK_TYPE_COLUMN.to_string(),
            y_label: Column::Country.label().to_string(),
            color_by: Some(AVERAGE_RISK_COLUMN.to_string()),
            category_order: None,
        },
    });

    // 5. The same averages as a Country × risk-type grid
    let matrix = pivot_matrix(
        &melted,
        Column::Country.header(),
        RISK_TYPE_COLUMN,
        AVERAGE_RISK_COLUMN,
    )?;

    // 6. Scatter: water usage vs water stress
    charts.push(ChartSpec {
        name: "water_usage_vs_stress".to_string(),
        kind: ChartKind::Scatter,
        table: table.clone(),
        meta: ChartMeta {
            title: "Water Usage vs. Water Stress by Country".to_string(),
            x_label: Column::WaterStress.label().to_string(),
            y_label: Column::WaterUsage.label().to_string(),
            color_by: Some(Column::Country.header().to_string()),
            category_order: None,
        },
    });

    log_success(format!("Dashboard ready: {} charts", charts.len()));

    Ok(Dashboard { charts, risk_matrix: matrix })
}
