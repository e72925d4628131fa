//! Survey aggregation.
//!
//! This module computes the statistical summary of the numeric columns
//! and the group-by tables (counts and means) that the report shows.

use super::stats::{mean, mean_of_present, quantile, sample_std, sorted};
use crate::dataset::Dataset;
use crate::models::{
    Analysis, ChildrenMeans, Column, ColumnSummary, Describe, ParkChoice, ParkMeans, Response,
};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use tracing::debug;

/// Run every aggregation over the dataset.
pub fn analyze(dataset: &Dataset) -> Analysis {
    let analysis = Analysis {
        respondents: dataset.len(),
        describe: describe(dataset),
        park_choices: count_by_children_and_park(dataset.responses()),
        children_means: mean_scores_by_children(dataset.responses()),
        park_means: Column::SCORES
            .iter()
            .map(|&column| mean_score_by_park(dataset.responses(), column))
            .collect(),
    };

    debug!(
        "Aggregated {} respondents into {} park-choice groups and {} children groups",
        analysis.respondents,
        analysis.park_choices.len(),
        analysis.children_means.len()
    );

    analysis
}

/// Statistical summary (count, mean, std, min, quartiles, max) of every numeric column.
pub fn describe(dataset: &Dataset) -> Describe {
    Describe {
        columns: Column::NUMERIC
            .iter()
            .map(|&column| summarize(column, &dataset.values(column)))
            .collect(),
    }
}

/// Summarize the non-missing values of one column.
pub fn summarize(column: Column, values: &[f64]) -> ColumnSummary {
    let ordered = sorted(values);

    ColumnSummary {
        column,
        count: values.len(),
        mean: mean(values),
        std: sample_std(values),
        min: ordered.first().copied(),
        q25: quantile(&ordered, 0.25),
        median: quantile(&ordered, 0.5),
        q75: quantile(&ordered, 0.75),
        max: ordered.last().copied(),
    }
}

/// Count respondents per (number of children, preferred park).
///
/// Rows come out ordered by children, then park name. Respondents with no
/// number of children are not assigned to any group.
pub fn count_by_children_and_park(responses: &[Response]) -> Vec<ParkChoice> {
    let mut grouped: BTreeMap<(u32, String), usize> = BTreeMap::new();

    for response in responses {
        if let Some(children) = response.children {
            *grouped
                .entry((children, response.preferred_park.clone()))
                .or_insert(0) += 1;
        }
    }

    grouped
        .into_iter()
        .map(|((children, park), count)| ParkChoice {
            children,
            park,
            count,
        })
        .collect()
}

/// Mean of each score column per number of children, plus the overall average.
pub fn mean_scores_by_children(responses: &[Response]) -> Vec<ChildrenMeans> {
    let mut grouped: BTreeMap<u32, Vec<&Response>> = BTreeMap::new();

    for response in responses {
        if let Some(children) = response.children {
            grouped.entry(children).or_default().push(response);
        }
    }

    grouped
        .into_iter()
        .map(|(children, group)| {
            let score_mean =
                |column: Column| mean_of_present(group.iter().map(|r| r.value(column)));

            let safety = score_mean(Column::SafetyScore);
            let activity = score_mean(Column::ActivityScore);
            let playground = score_mean(Column::PlaygroundScore);

            ChildrenMeans {
                children,
                safety,
                activity,
                playground,
                overall: mean_of_present([safety, activity, playground]),
            }
        })
        .collect()
}

/// Mean of one score column per preferred park, in order of first appearance.
pub fn mean_score_by_park(responses: &[Response], column: Column) -> ParkMeans {
    let mut grouped: IndexMap<&str, Vec<Option<f64>>> = IndexMap::new();

    for response in responses {
        grouped
            .entry(response.preferred_park.as_str())
            .or_default()
            .push(response.value(column));
    }

    ParkMeans {
        column,
        parks: grouped
            .into_iter()
            .map(|(park, values)| (park.to_string(), mean_of_present(values)))
            .collect(),
    }
}

/// Total number of respondents across the park-choice table.
pub fn total_count(choices: &[ParkChoice]) -> usize {
    choices.iter().map(|c| c.count).sum()
}

/// The park chosen by the most respondents overall (ties go to the first name).
pub fn most_chosen_park(choices: &[ParkChoice]) -> Option<(String, usize)> {
    let mut totals: BTreeMap<&str, usize> = BTreeMap::new();

    for choice in choices {
        *totals.entry(choice.park.as_str()).or_default() += choice.count;
    }

    let mut best: Option<(&str, usize)> = None;
    for (park, count) in totals {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((park, count));
        }
    }

    best.map(|(park, count)| (park.to_string(), count))
}

/// The most chosen park among respondents with the given number of children.
pub fn favourite_park(choices: &[ParkChoice], children: u32) -> Option<&ParkChoice> {
    let mut best: Option<&ParkChoice> = None;

    for choice in choices.iter().filter(|c| c.children == children) {
        if best.map_or(true, |top| choice.count > top.count) {
            best = Some(choice);
        }
    }

    best
}
