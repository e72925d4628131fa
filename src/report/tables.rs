//! Tabular views of the survey data and its aggregates.

use crate::models::{ChildrenMeans, Column, Describe, ParkChoice, ParkMeans, Response, Statistic};

/// A rendered table: header row plus body rows of display strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Render inside a fixed-height scrolling box (long tables).
    pub scrollable: bool,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            scrollable: false,
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn scrollable(mut self) -> Self {
        self.scrollable = true;
        self
    }
}

/// Format a statistic; undefined values print as `NaN`.
pub fn format_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "NaN".to_string(),
    }
}

/// Every response under the aliased column names.
pub fn raw_data_table(responses: &[Response]) -> Table {
    let mut table = Table::new(Column::ALL.iter().map(|c| c.alias())).scrollable();

    for response in responses {
        table.push_row(Column::ALL.iter().map(|&c| response.cell(c)).collect());
    }

    table
}

/// Statistical summary: one row per statistic, one column per numeric column.
pub fn describe_table(describe: &Describe, decimals: usize) -> Table {
    let headers = std::iter::once("").chain(describe.columns.iter().map(|s| s.column.alias()));
    let mut table = Table::new(headers);

    for statistic in Statistic::ALL {
        let mut row = vec![statistic.label().to_string()];
        for summary in &describe.columns {
            row.push(match statistic {
                Statistic::Count => summary.count.to_string(),
                other => format_value(summary.get(other), decimals),
            });
        }
        table.push_row(row);
    }

    table
}

pub fn park_choice_table(choices: &[ParkChoice]) -> Table {
    let mut table = Table::new([
        Column::NumberOfChildren.alias(),
        Column::PreferredPark.alias(),
        "Count",
    ]);

    for choice in choices {
        table.push_row(vec![
            choice.children.to_string(),
            choice.park.clone(),
            choice.count.to_string(),
        ]);
    }

    table
}

pub fn children_means_table(rows: &[ChildrenMeans], decimals: usize) -> Table {
    let headers = std::iter::once(Column::NumberOfChildren.alias())
        .chain(Column::SCORES.iter().map(|c| c.alias()))
        .chain(std::iter::once("Overall Average"));
    let mut table = Table::new(headers);

    for means in rows {
        let mut row = vec![means.children.to_string()];
        row.extend(
            Column::SCORES
                .iter()
                .map(|&c| format_value(means.score(c), decimals)),
        );
        row.push(format_value(means.overall, decimals));
        table.push_row(row);
    }

    table
}

/// Data behind a per-park bar chart.
pub fn park_means_table(park_means: &ParkMeans, decimals: usize) -> Table {
    let mut table = Table::new([Column::PreferredPark.alias(), park_means.column.alias()]);

    for (park, mean) in &park_means.parks {
        table.push_row(vec![park.clone(), format_value(*mean, decimals)]);
    }

    table
}

/// Data behind the overall-average line chart.
pub fn overall_trend_table(rows: &[ChildrenMeans], decimals: usize) -> Table {
    let mut table = Table::new([Column::NumberOfChildren.alias(), "Overall Average"]);

    for means in rows {
        table.push_row(vec![
            means.children.to_string(),
            format_value(means.overall, decimals),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summarize;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(8.3125), 2), "8.31");
        assert_eq!(format_value(Some(7.0), 0), "7");
        assert_eq!(format_value(None, 2), "NaN");
    }

    #[test]
    fn test_describe_table_layout() {
        let describe = Describe {
            columns: vec![
                summarize(Column::SafetyScore, &[8.0, 9.0, 10.0]),
                summarize(Column::ActivityScore, &[]),
            ],
        };

        let table = describe_table(&describe, 2);
        assert_eq!(table.headers, vec!["", "Safety Score", "Activity Score"]);
        assert_eq!(table.rows.len(), 8);
        assert_eq!(table.rows[0], vec!["count", "3", "0"]);
        assert_eq!(table.rows[1], vec!["mean", "9.00", "NaN"]);
        assert_eq!(table.rows[5][0], "50%");
    }

    #[test]
    fn test_raw_data_table_uses_aliases() {
        let table = raw_data_table(&[Response {
            timestamp: "2024-10-01".to_string(),
            name: "Ana".to_string(),
            preferred_park: "Praça Matriz".to_string(),
            playground_score: Some(9.0),
            children: None,
            safety_score: Some(8.5),
            activity_score: Some(7.0),
        }]);

        assert!(table.scrollable);
        assert_eq!(table.headers[2], "Preferred Park");
        assert_eq!(table.headers.len(), 7);
        assert_eq!(
            table.rows[0],
            vec!["2024-10-01", "Ana", "Praça Matriz", "9", "NaN", "8.5", "7"]
        );
    }

    #[test]
    fn test_children_means_table_columns() {
        let table = children_means_table(
            &[ChildrenMeans {
                children: 2,
                safety: Some(8.25),
                activity: Some(8.5),
                playground: Some(8.5),
                overall: Some(8.416_666),
            }],
            2,
        );

        assert_eq!(
            table.headers,
            vec![
                "Number of Children",
                "Safety Score",
                "Activity Score",
                "Playground Score",
                "Overall Average"
            ]
        );
        assert_eq!(table.rows[0], vec!["2", "8.25", "8.50", "8.50", "8.42"]);
    }

    #[test]
    fn test_park_choice_table() {
        let table = park_choice_table(&[ParkChoice {
            children: 1,
            park: "Matinha do Bosque".to_string(),
            count: 3,
        }]);

        assert_eq!(table.headers, vec!["Number of Children", "Preferred Park", "Count"]);
        assert_eq!(table.rows, vec![vec!["1", "Matinha do Bosque", "3"]]);
    }
}
