//! HTML report rendering.
//!
//! Produces a standalone page: tables and narrative are static markup,
//! charts are interactive plotly figures loaded from the plotly CDN.

use super::narrative::Block;
use super::tables::Table;
use super::{Chart, Content, Document, Section};
use maud::{html, Markup, PreEscaped, DOCTYPE};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

const STYLE: &str = "
    body {
        font-family: Arial, sans-serif;
        margin: 0 auto;
        max-width: 1100px;
        padding: 0 20px 40px;
        color: #262730;
    }
    .banner {
        padding: 20px;
        background: linear-gradient(135deg, #4a90e2, #145da0);
        border-radius: 12px;
        box-shadow: 0px 4px 6px rgba(0, 0, 0, 0.1);
        color: white;
        margin: 20px 0;
    }
    .banner h1 {
        margin: 0 0 8px;
        font-size: 32px;
    }
    .banner p {
        margin: 0;
        opacity: 0.8;
    }
    .table-wrap {
        overflow-x: auto;
        margin: 12px 0;
    }
    .table-wrap.scroll {
        max-height: 400px;
        overflow-y: auto;
    }
    table {
        border-collapse: collapse;
        font-size: 14px;
    }
    th, td {
        border: 1px solid #ddd;
        padding: 6px 10px;
        text-align: right;
    }
    th {
        background: #f0f2f6;
        position: sticky;
        top: 0;
    }
    td:first-child, th:first-child {
        text-align: left;
    }
    .chart {
        width: 100%;
        min-height: 500px;
        margin: 16px 0;
    }
    footer {
        margin-top: 40px;
        font-size: 12px;
        color: #888;
    }
";

/// Render the document as a complete HTML page.
pub fn render(document: &Document) -> String {
    page(document).into_string()
}

fn page(document: &Document) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (document.title) }
                script src=(PLOTLY_CDN) {}
                style { (PreEscaped(STYLE)) }
            }
            body {
                div class="banner" {
                    h1 { (document.title) }
                    p class="timestamp" {
                        "Generated on " (document.generated_at)
                        " from " (document.data_source)
                        " (" (document.respondents) " respondents)"
                    }
                }
                main {
                    @for section in &document.sections {
                        (render_section(section))
                    }
                }
                footer {
                    "Report generated by parksurvey v" (env!("CARGO_PKG_VERSION"))
                }
            }
        }
    }
}

fn render_section(section: &Section) -> Markup {
    html! {
        section {
            @if let Some(ref title) = section.title {
                (heading(section.level, title))
            }
            @for content in &section.content {
                @match content {
                    Content::Text(block) => { (render_block(block)) }
                    Content::Table(table) => { (render_table(table)) }
                    Content::Chart(chart) => { (render_chart(chart)) }
                }
            }
        }
    }
}

fn heading(level: u8, text: &str) -> Markup {
    match level {
        0..=2 => html! { h2 { (text) } },
        3 => html! { h3 { (text) } },
        _ => html! { h4 { (text) } },
    }
}

fn render_block(block: &Block) -> Markup {
    match block {
        Block::Paragraph(text) => html! { p { (text) } },
        Block::Bullets(items) => html! {
            ul {
                @for item in items {
                    li { (item) }
                }
            }
        },
    }
}

fn render_table(table: &Table) -> Markup {
    let class = if table.scrollable {
        "table-wrap scroll"
    } else {
        "table-wrap"
    };

    html! {
        div class=(class) {
            table {
                thead {
                    tr {
                        @for header in &table.headers {
                            th { (header) }
                        }
                    }
                }
                tbody {
                    @for row in &table.rows {
                        tr {
                            @for cell in row {
                                td { (cell) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_chart(chart: &Chart) -> Markup {
    html! {
        div class="chart" title=(chart.title) {
            (PreEscaped(chart.plot.to_inline_html(Some(chart.id.as_str()))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::build_document;
    use crate::report::tests::sample_report;

    #[test]
    fn test_render_page() {
        let output = render(&build_document(&sample_report(true), 2));

        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("<title>Park Survey</title>"));
        assert!(output.contains(PLOTLY_CDN));
        assert!(output.contains("<h2>Methodology</h2>"));
        assert!(output.contains("<h3>Statistical Summary</h3>"));
        assert!(output.contains("<h4>Chart: Mean Scores by Number of Children</h4>"));
        assert!(output.contains("<h3>Conclusion</h3>"));
        assert!(output.contains("16 respondents"));
    }

    #[test]
    fn test_render_one_container_per_chart() {
        let output = render(&build_document(&sample_report(true), 2));

        assert_eq!(output.matches("<div class=\"chart\"").count(), 4);
        assert!(output.contains("chart-overall-average"));
    }

    #[test]
    fn test_render_tables() {
        let output = render(&build_document(&sample_report(true), 2));

        assert!(output.contains("<div class=\"table-wrap scroll\">"));
        assert!(output.contains("<th>Preferred Park</th>"));
        assert!(output.contains("<th>Overall Average</th>"));
        assert!(output.contains("<td>25%</td>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let output = render_block(&Block::Paragraph("<b>5 & 6</b>".to_string())).into_string();
        assert_eq!(output, "<p>&lt;b&gt;5 &amp; 6&lt;/b&gt;</p>");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading(2, "A").into_string(), "<h2>A</h2>");
        assert_eq!(heading(3, "B").into_string(), "<h3>B</h3>");
        assert_eq!(heading(5, "C").into_string(), "<h4>C</h4>");
    }
}
