//! Interactive charts rendered with plotly.

use crate::models::{ChildrenMeans, Column, ParkMeans};
use plotly::common::{Line, Marker, Mode, Title};
use plotly::layout::{Axis, Layout};
use plotly::{Bar, Plot, Scatter};

/// Viridis palette, dark to light.
const VIRIDIS: [&str; 8] = [
    "#440154", "#46327e", "#365c8d", "#277f8e", "#1fa187", "#4ac16d", "#a0da39", "#fde725",
];

const LINE_COLOR: &str = "orange";

/// Spread `n` colors evenly across the viridis palette.
pub fn viridis(n: usize) -> Vec<&'static str> {
    if n <= 1 {
        return VIRIDIS.iter().take(n).copied().collect();
    }
    (0..n)
        .map(|i| VIRIDIS[i * (VIRIDIS.len() - 1) / (n - 1)])
        .collect()
}

/// Short label for chart titles ("Safety Score" -> "Safety").
fn subject(column: Column) -> &'static str {
    match column {
        Column::SafetyScore => "Safety",
        Column::ActivityScore => "Activity",
        Column::PlaygroundScore => "Playground",
        other => other.alias(),
    }
}

pub fn park_chart_title(column: Column) -> String {
    format!("Mean {} Score by Park", subject(column))
}

pub const OVERALL_CHART_TITLE: &str = "Overall Average Score by Number of Children";

/// Bar chart of the mean score per park, y axis fixed to the 0-10 scale.
pub fn park_score_chart(park_means: &ParkMeans) -> Plot {
    let parks: Vec<String> = park_means.parks.iter().map(|(p, _)| p.clone()).collect();
    let means: Vec<Option<f64>> = park_means.parks.iter().map(|(_, m)| *m).collect();
    let colors = viridis(parks.len());

    let trace = Bar::new(parks, means)
        .name(park_means.column.alias())
        .marker(Marker::new().color_array(colors));

    let layout = Layout::new()
        .title(Title::new(&park_chart_title(park_means.column)))
        .show_legend(false)
        .x_axis(Axis::new().title(Title::new("Parks")).tick_angle(-45.0))
        .y_axis(
            Axis::new()
                .title(Title::new(park_means.column.alias()))
                .range(vec![0.0, 10.0])
                .dtick(1.0),
        );

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// Line chart of the overall average by number of children.
pub fn overall_by_children_chart(rows: &[ChildrenMeans]) -> Plot {
    let children: Vec<u32> = rows.iter().map(|r| r.children).collect();
    let overall: Vec<Option<f64>> = rows.iter().map(|r| r.overall).collect();

    let trace = Scatter::new(children, overall)
        .name("Overall Average")
        .mode(Mode::LinesMarkers)
        .line(Line::new().color(LINE_COLOR))
        .marker(Marker::new().color(LINE_COLOR).size(8));

    let layout = Layout::new()
        .title(Title::new(OVERALL_CHART_TITLE))
        .show_legend(true)
        .x_axis(
            Axis::new()
                .title(Title::new(Column::NumberOfChildren.alias()))
                .dtick(1.0)
                .show_grid(true),
        )
        .y_axis(
            Axis::new()
                .title(Title::new("Overall Average Score"))
                .show_grid(true),
        );

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}
