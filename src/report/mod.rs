//! Report generation.
//!
//! The report is assembled once into a format-neutral [`Document`]
//! (sections of narrative, tables and charts) and then rendered as HTML
//! or Markdown.

pub mod charts;
pub mod html;
pub mod markdown;
pub mod narrative;
pub mod tables;

use crate::cli::OutputFormat;
use crate::models::Report;
use narrative::Block;
use plotly::Plot;
use tables::Table;

/// A chart together with the table of values it plots.
pub struct Chart {
    /// DOM id of the chart container.
    pub id: String,
    pub title: String,
    pub plot: Plot,
    pub data: Table,
}

pub enum Content {
    Text(Block),
    Table(Table),
    Chart(Chart),
}

/// A titled part of the report.
pub struct Section {
    pub title: Option<String>,
    /// Heading level (2 or deeper).
    pub level: u8,
    pub content: Vec<Content>,
}

impl Section {
    fn new(title: &str, level: u8) -> Self {
        Self {
            title: Some(title.to_string()),
            level,
            content: Vec::new(),
        }
    }

    fn untitled() -> Self {
        Self {
            title: None,
            level: 2,
            content: Vec::new(),
        }
    }

    fn text(mut self, blocks: Vec<Block>) -> Self {
        self.content.extend(blocks.into_iter().map(Content::Text));
        self
    }

    fn table(mut self, table: Table) -> Self {
        self.content.push(Content::Table(table));
        self
    }

    fn chart(mut self, chart: Chart) -> Self {
        self.content.push(Content::Chart(chart));
        self
    }
}

/// The assembled report.
pub struct Document {
    pub title: String,
    pub generated_at: String,
    pub data_source: String,
    pub respondents: usize,
    pub sections: Vec<Section>,
}

/// Lay out the report sections in reading order.
pub fn build_document(report: &Report, decimals: usize) -> Document {
    let analysis = &report.analysis;
    let mut sections = Vec::new();

    sections.push(Section::untitled().text(narrative::introduction()));
    sections.push(Section::new("Methodology", 2).text(narrative::methodology(analysis.respondents)));

    let results = Section::new("Survey Results", 2);
    sections.push(match report.raw_data {
        Some(ref responses) => results
            .text(narrative::survey_results())
            .table(tables::raw_data_table(responses)),
        None => results.text(narrative::survey_results_omitted(analysis.respondents)),
    });

    sections.push(
        Section::new("Statistical Summary", 3)
            .table(tables::describe_table(&analysis.describe, decimals))
            .text(narrative::statistical_summary(&analysis.describe, decimals)),
    );

    let mut comparison = Section::new("Comparison Between Parks", 3).text(narrative::park_comparison());
    for park_means in &analysis.park_means {
        comparison = comparison.chart(Chart {
            id: format!(
                "chart-{}",
                park_means.column.raw_name().replace('_', "-")
            ),
            title: charts::park_chart_title(park_means.column),
            plot: charts::park_score_chart(park_means),
            data: tables::park_means_table(park_means, decimals),
        });
    }
    sections.push(comparison);

    sections.push(
        Section::new("Hypothesis Testing", 3).text(narrative::hypothesis_introduction()),
    );
    sections.push(
        Section::new(
            "Hypothesis: Does the Number of Children Influence the Choice of Park?",
            3,
        )
        .text(narrative::hypothesis_question()),
    );

    sections.push(
        Section::new("Park Choice by Number of Children", 3)
            .text(narrative::park_choice_intro())
            .table(tables::park_choice_table(&analysis.park_choices))
            .text(narrative::park_choice(&analysis.park_choices)),
    );

    sections.push(
        Section::new("Mean Scores by Number of Children", 3)
            .text(narrative::children_means_intro())
            .table(tables::children_means_table(&analysis.children_means, decimals))
            .text(narrative::children_means(&analysis.children_means, decimals)),
    );

    sections.push(
        Section::new("Chart: Mean Scores by Number of Children", 4)
            .chart(Chart {
                id: "chart-overall-average".to_string(),
                title: charts::OVERALL_CHART_TITLE.to_string(),
                plot: charts::overall_by_children_chart(&analysis.children_means),
                data: tables::overall_trend_table(&analysis.children_means, decimals),
            })
            .text(narrative::trend_commentary(&analysis.children_means)),
    );

    sections.push(Section::new("Conclusion", 3).text(narrative::conclusion(analysis)));

    Document {
        title: report.metadata.title.clone(),
        generated_at: report
            .metadata
            .generated_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        data_source: report.metadata.data_source.clone(),
        respondents: analysis.respondents,
        sections,
    }
}

/// Render the report in the requested format.
pub fn render(report: &Report, format: OutputFormat, decimals: usize) -> String {
    let document = build_document(report, decimals);

    match format {
        OutputFormat::Html => html::render(&document),
        OutputFormat::Markdown => markdown::render(&document),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::dataset::Dataset;
    use crate::models::ReportMetadata;
    use chrono::Utc;
    use std::path::Path;

    pub(crate) fn sample_report(show_raw_data: bool) -> Report {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/survey_sample.csv");
        let dataset = Dataset::load(&path).unwrap();

        Report {
            metadata: ReportMetadata {
                title: "Park Survey".to_string(),
                data_source: "fixtures/survey_sample.csv".to_string(),
                generated_at: Utc::now(),
            },
            analysis: analyze(&dataset),
            raw_data: show_raw_data.then(|| dataset.into_responses()),
        }
    }

    fn titles(document: &Document) -> Vec<String> {
        document
            .sections
            .iter()
            .filter_map(|s| s.title.clone())
            .collect()
    }

    #[test]
    fn test_document_section_order() {
        let document = build_document(&sample_report(true), 2);

        assert_eq!(
            titles(&document),
            vec![
                "Methodology",
                "Survey Results",
                "Statistical Summary",
                "Comparison Between Parks",
                "Hypothesis Testing",
                "Hypothesis: Does the Number of Children Influence the Choice of Park?",
                "Park Choice by Number of Children",
                "Mean Scores by Number of Children",
                "Chart: Mean Scores by Number of Children",
                "Conclusion",
            ]
        );
        assert_eq!(document.respondents, 16);
    }

    #[test]
    fn test_document_has_four_charts() {
        let document = build_document(&sample_report(true), 2);
        let ids: Vec<&str> = document
            .sections
            .iter()
            .flat_map(|s| &s.content)
            .filter_map(|c| match c {
                Content::Chart(chart) => Some(chart.id.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(
            ids,
            vec![
                "chart-nota-seguranca",
                "chart-nota-atividades",
                "chart-nota-parque-infantil",
                "chart-overall-average"
            ]
        );
    }

    #[test]
    fn test_raw_data_table_is_optional() {
        let count_tables = |report: &Report| {
            build_document(report, 2)
                .sections
                .iter()
                .flat_map(|s| &s.content)
                .filter(|c| matches!(c, Content::Table(_)))
                .count()
        };

        assert_eq!(count_tables(&sample_report(true)), 4);
        assert_eq!(count_tables(&sample_report(false)), 3);
    }

    #[test]
    fn test_survey_results_without_raw_data_has_a_note() {
        let document = build_document(&sample_report(false), 2);
        let results = document
            .sections
            .iter()
            .find(|s| s.title.as_deref() == Some("Survey Results"))
            .unwrap();

        assert_eq!(results.content.len(), 1);
        match &results.content[0] {
            Content::Text(Block::Paragraph(note)) => assert!(note.contains("16 respondents")),
            _ => panic!("expected a note under Survey Results"),
        }
    }

    #[test]
    fn test_narrative_uses_configured_decimals() {
        let document = build_document(&sample_report(false), 4);
        let summary = document
            .sections
            .iter()
            .find(|s| s.title.as_deref() == Some("Statistical Summary"))
            .unwrap();

        let quotes_safety_mean = summary.content.iter().any(|c| match c {
            Content::Text(Block::Bullets(items)) => {
                items.iter().any(|i| i.contains("safety scored 8.3125,"))
            }
            _ => false,
        });
        assert!(quotes_safety_mean);
    }
}
