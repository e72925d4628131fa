//! Markdown report generation.
//!
//! Same sections as the HTML page. Charts cannot be drawn in Markdown, so
//! each chart is replaced by the table of values it plots.

use super::narrative::Block;
use super::tables::Table;
use super::{Content, Document, Section};

/// Generate the complete Markdown report.
pub fn render(document: &Document) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", document.title));
    output.push_str(&generate_metadata_section(document));
    output.push_str(&generate_table_of_contents(document));

    for section in &document.sections {
        output.push_str(&generate_section(section));
    }

    output.push_str(&generate_footer());

    output
}

fn generate_metadata_section(document: &Document) -> String {
    let mut section = String::new();

    section.push_str(&format!("- **Generated:** {}\n", document.generated_at));
    section.push_str(&format!("- **Data Source:** `{}`\n", document.data_source));
    section.push_str(&format!("- **Respondents:** {}\n", document.respondents));
    section.push('\n');

    section
}

/// GitHub-style heading anchor.
fn anchor(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-')
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}

fn generate_table_of_contents(document: &Document) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");

    for section in &document.sections {
        if let Some(ref title) = section.title {
            let indent = "  ".repeat(usize::from(section.level.saturating_sub(2)));
            toc.push_str(&format!("{}- [{}](#{})\n", indent, title, anchor(title)));
        }
    }

    toc.push('\n');

    toc
}

fn generate_section(section: &Section) -> String {
    let mut output = String::new();

    if let Some(ref title) = section.title {
        let level = usize::from(section.level.clamp(2, 4));
        output.push_str(&format!("{} {}\n\n", "#".repeat(level), title));
    }

    for content in &section.content {
        match content {
            Content::Text(block) => output.push_str(&generate_block(block)),
            Content::Table(table) => output.push_str(&generate_table(table)),
            Content::Chart(chart) => {
                output.push_str(&format!("**{}**\n\n", chart.title));
                output.push_str(&generate_table(&chart.data));
            }
        }
    }

    output
}

fn generate_block(block: &Block) -> String {
    match block {
        Block::Paragraph(text) => format!("{}\n\n", text),
        Block::Bullets(items) => {
            let mut list: String = items.iter().map(|item| format!("- {}\n", item)).collect();
            list.push('\n');
            list
        }
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

fn generate_table(table: &Table) -> String {
    if table.headers.is_empty() {
        return String::new();
    }

    let mut output = String::new();

    let headers: Vec<String> = table.headers.iter().map(|h| escape_cell(h)).collect();
    output.push_str(&format!("| {} |\n", headers.join(" | ")));

    let alignment: Vec<&str> = (0..table.headers.len())
        .map(|i| if i == 0 { ":---" } else { "---:" })
        .collect();
    output.push_str(&format!("|{}|\n", alignment.join("|")));

    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
        output.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    output.push('\n');

    output
}

fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!(
        "*Report generated by parksurvey v{}*\n",
        env!("CARGO_PKG_VERSION")
    ));

    footer
}
