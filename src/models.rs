//! Data models for the survey report.
//!
//! This module contains the survey schema (raw headers and their display
//! aliases), the per-respondent record, and the aggregate tables produced
//! by the analysis step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A column of the survey dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Timestamp,
    Name,
    PreferredPark,
    PlaygroundScore,
    NumberOfChildren,
    SafetyScore,
    ActivityScore,
}

impl Column {
    /// Every column, in raw-header order.
    pub const ALL: [Column; 7] = [
        Column::Timestamp,
        Column::Name,
        Column::PreferredPark,
        Column::PlaygroundScore,
        Column::NumberOfChildren,
        Column::SafetyScore,
        Column::ActivityScore,
    ];

    /// Numeric columns, in the order the statistical summary lists them.
    pub const NUMERIC: [Column; 4] = [
        Column::PlaygroundScore,
        Column::NumberOfChildren,
        Column::SafetyScore,
        Column::ActivityScore,
    ];

    /// Score columns, in the order the per-group mean table lists them.
    pub const SCORES: [Column; 3] = [
        Column::SafetyScore,
        Column::ActivityScore,
        Column::PlaygroundScore,
    ];

    /// Header of this column in the raw CSV file.
    pub fn raw_name(self) -> &'static str {
        match self {
            Column::Timestamp => "timestamps",
            Column::Name => "nome",
            Column::PreferredPark => "melhor_praca",
            Column::PlaygroundScore => "nota_parque_infantil",
            Column::NumberOfChildren => "numero_filhos",
            Column::SafetyScore => "nota_seguranca",
            Column::ActivityScore => "nota_atividades",
        }
    }

    /// Display name used everywhere in the report.
    pub fn alias(self) -> &'static str {
        match self {
            Column::Timestamp => "Timestamp",
            Column::Name => "Name",
            Column::PreferredPark => "Preferred Park",
            Column::PlaygroundScore => "Playground Score",
            Column::NumberOfChildren => "Number of Children",
            Column::SafetyScore => "Safety Score",
            Column::ActivityScore => "Activity Score",
        }
    }

    /// Look up a column by its raw header. Unknown headers (e.g. `email`) are dropped at load.
    pub fn from_raw(header: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.raw_name() == header)
    }

    /// Look up a column by its display alias.
    #[cfg(test)]
    pub fn from_alias(alias: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.alias() == alias)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alias())
    }
}

/// Cell contents read as a missing value, the same set pandas uses.
const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse a numeric cell. Missing markers give `None`, any other text is an error.
pub fn parse_number(cell: &str) -> Result<Option<f64>, String> {
    let cell = cell.trim();
    if MISSING_MARKERS.contains(&cell) {
        return Ok(None);
    }

    let value: f64 = cell
        .parse()
        .map_err(|_| format!("`{}` is not a number", cell))?;

    Ok((!value.is_nan()).then_some(value))
}

/// Parse a child count. Whole floats such as `2.0` are accepted.
pub fn parse_count(cell: &str) -> Result<Option<u32>, String> {
    match parse_number(cell)? {
        None => Ok(None),
        Some(v) if v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&v) => {
            Ok(Some(v as u32))
        }
        Some(_) => Err(format!("`{}` is not a whole number of children", cell.trim())),
    }
}

fn score_cell<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = String::deserialize(deserializer)?;
    parse_number(&cell).map_err(serde::de::Error::custom)
}

fn count_cell<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = String::deserialize(deserializer)?;
    parse_count(&cell).map_err(serde::de::Error::custom)
}

/// One survey respondent (one CSV row).
///
/// Numeric cells are optional: an empty cell or a missing marker (`NaN`,
/// `NA`, `null`, ...) is a missing value, any other non-numeric cell fails
/// deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Response {
    #[serde(rename = "timestamps")]
    pub timestamp: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "melhor_praca")]
    pub preferred_park: String,
    #[serde(rename = "nota_parque_infantil", deserialize_with = "score_cell")]
    pub playground_score: Option<f64>,
    #[serde(rename = "numero_filhos", deserialize_with = "count_cell")]
    pub children: Option<u32>,
    #[serde(rename = "nota_seguranca", deserialize_with = "score_cell")]
    pub safety_score: Option<f64>,
    #[serde(rename = "nota_atividades", deserialize_with = "score_cell")]
    pub activity_score: Option<f64>,
}

impl Response {
    /// Numeric value of a column, `None` for missing values and text columns.
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::PlaygroundScore => self.playground_score,
            Column::NumberOfChildren => self.children.map(f64::from),
            Column::SafetyScore => self.safety_score,
            Column::ActivityScore => self.activity_score,
            Column::Timestamp | Column::Name | Column::PreferredPark => None,
        }
    }

    /// Cell as displayed in the raw data table.
    pub fn cell(&self, column: Column) -> String {
        fn number(value: Option<f64>) -> String {
            value.map(|v| v.to_string()).unwrap_or_else(|| "NaN".to_string())
        }

        match column {
            Column::Timestamp => self.timestamp.clone(),
            Column::Name => self.name.clone(),
            Column::PreferredPark => self.preferred_park.clone(),
            Column::NumberOfChildren => self
                .children
                .map(|c| c.to_string())
                .unwrap_or_else(|| "NaN".to_string()),
            other => number(self.value(other)),
        }
    }
}

/// A row label of the statistical summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Count,
    Mean,
    Std,
    Min,
    Q25,
    Median,
    Q75,
    Max,
}

impl Statistic {
    pub const ALL: [Statistic; 8] = [
        Statistic::Count,
        Statistic::Mean,
        Statistic::Std,
        Statistic::Min,
        Statistic::Q25,
        Statistic::Median,
        Statistic::Q75,
        Statistic::Max,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Statistic::Count => "count",
            Statistic::Mean => "mean",
            Statistic::Std => "std",
            Statistic::Min => "min",
            Statistic::Q25 => "25%",
            Statistic::Median => "50%",
            Statistic::Q75 => "75%",
            Statistic::Max => "max",
        }
    }
}

/// Descriptive statistics of a single numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: Column,
    /// Number of non-missing values.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    /// Returns a statistic by label; `count` is always defined.
    pub fn get(&self, statistic: Statistic) -> Option<f64> {
        match statistic {
            Statistic::Count => Some(self.count as f64),
            Statistic::Mean => self.mean,
            Statistic::Std => self.std,
            Statistic::Min => self.min,
            Statistic::Q25 => self.q25,
            Statistic::Median => self.median,
            Statistic::Q75 => self.q75,
            Statistic::Max => self.max,
        }
    }
}

/// The statistical summary table: one summary per numeric column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Describe {
    pub columns: Vec<ColumnSummary>,
}

impl Describe {
    pub fn column(&self, column: Column) -> Option<&ColumnSummary> {
        self.columns.iter().find(|s| s.column == column)
    }
}

/// Number of respondents choosing a park, for a given number of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkChoice {
    pub children: u32,
    pub park: String,
    pub count: usize,
}

/// Mean scores of the respondents with a given number of children.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildrenMeans {
    pub children: u32,
    pub safety: Option<f64>,
    pub activity: Option<f64>,
    pub playground: Option<f64>,
    /// Unweighted average of the three means above.
    pub overall: Option<f64>,
}

impl ChildrenMeans {
    pub fn score(&self, column: Column) -> Option<f64> {
        match column {
            Column::SafetyScore => self.safety,
            Column::ActivityScore => self.activity,
            Column::PlaygroundScore => self.playground,
            _ => None,
        }
    }
}

/// Mean of one score column per preferred park, parks in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkMeans {
    pub column: Column,
    pub parks: Vec<(String, Option<f64>)>,
}

/// Everything the analysis step computes from a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Number of respondents (input rows).
    pub respondents: usize,
    pub describe: Describe,
    pub park_choices: Vec<ParkChoice>,
    pub children_means: Vec<ChildrenMeans>,
    pub park_means: Vec<ParkMeans>,
}

/// Metadata about the generated report.
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    /// Report title.
    pub title: String,
    /// Path of the survey CSV.
    pub data_source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
}

/// The complete survey report.
#[derive(Debug, Clone)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub analysis: Analysis,
    /// Renamed raw rows, when the raw data table is shown.
    pub raw_data: Option<Vec<Response>>,
}
