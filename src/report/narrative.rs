//! Narrative text interleaved with the report's tables and charts.
//!
//! Most of the prose is fixed. Where it quotes figures (means, the most
//! chosen park, the direction of the trend) those come from the analysis
//! so the text stays true for any dataset.

use super::tables::format_value;
use crate::analysis::{favourite_park, most_chosen_park};
use crate::models::{Analysis, ChildrenMeans, Column, Describe, ParkChoice};

/// A unit of narrative text.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(String),
    Bullets(Vec<String>),
}

fn paragraph(text: impl Into<String>) -> Block {
    Block::Paragraph(text.into())
}

fn children_label(children: u32) -> String {
    match children {
        0 => "no children".to_string(),
        1 => "one child".to_string(),
        n => format!("{} children", n),
    }
}

pub fn introduction() -> Vec<Block> {
    vec![
        paragraph(
            "Welcome to our analysis of how satisfied the community is with its municipal parks. \
             The study is based on answers collected directly from park visitors, who rated \
             safety, the activities on offer and the children's playground.",
        ),
        paragraph(
            "We want to understand which factors drive the preference for, and satisfaction \
             with, these spaces, and to check whether different groups of visitors and \
             different parks are perceived differently.",
        ),
        paragraph(
            "The statistics and insights below can support the management of public spaces, \
             so that they meet the needs and expectations of the community. Let's explore the \
             results together!",
        ),
    ]
}

pub fn methodology(respondents: usize) -> Vec<Block> {
    vec![
        paragraph(format!(
            "To understand how the community sees its parks we ran a short survey answered by \
             {} participants. Each of them rated safety, available activities and the \
             children's area, and named the park they like best.",
            respondents
        )),
        paragraph(
            "We then summarised the answers to find what people value most and what could be \
             improved, and compared groups of respondents, such as families with more or fewer \
             children.",
        ),
        paragraph("Our goal is to turn this information into actions that make the parks better for everyone."),
    ]
}

pub fn survey_results() -> Vec<Block> {
    vec![paragraph("Below you can browse every answer collected by the survey.")]
}

pub fn survey_results_omitted(respondents: usize) -> Vec<Block> {
    vec![paragraph(format!(
        "The individual answers of the {} respondents are not listed in this report; the \
         sections below summarise them.",
        respondents
    ))]
}

pub fn statistical_summary(describe: &Describe, decimals: usize) -> Vec<Block> {
    let mean =
        |column: Column| format_value(describe.column(column).and_then(|s| s.mean), decimals);

    let lowest = Column::SCORES
        .iter()
        .filter_map(|&c| describe.column(c).and_then(|s| s.min))
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))));

    let perfect: Vec<&str> = Column::SCORES
        .iter()
        .filter(|&&c| describe.column(c).and_then(|s| s.max) == Some(10.0))
        .map(|c| c.alias())
        .collect();

    let mut insights = vec![
        format!(
            "Average ratings: safety scored {}, activities {} and the playground {} on average.",
            mean(Column::SafetyScore),
            mean(Column::ActivityScore),
            mean(Column::PlaygroundScore)
        ),
        format!(
            "Consistency: the lowest score given to any aspect was {}, while the quartiles show \
             where most participants placed their ratings.",
            format_value(lowest, decimals)
        ),
        format!(
            "Number of children: respondents have {} children on average, which makes the \
             playground a relevant factor.",
            mean(Column::NumberOfChildren)
        ),
    ];

    if !perfect.is_empty() {
        insights.push(format!(
            "Top marks: at least one participant gave a 10 for {}.",
            perfect.join(", ")
        ));
    }

    vec![
        paragraph(
            "This summary covers the scores participants gave to three aspects of the parks \
             (safety, activities and the children's playground) together with the number of \
             children of each respondent, which may shape how they perceive the parks.",
        ),
        Block::Bullets(insights),
    ]
}

pub fn park_comparison() -> Vec<Block> {
    vec![paragraph(
        "Here you can compare the mean score each park received for safety, activities and \
         the children's playground.",
    )]
}

pub fn hypothesis_introduction() -> Vec<Block> {
    vec![
        paragraph(
            "Testing a hypothesis is a way of checking whether differences in the data are real \
             or just coincidence.",
        ),
        paragraph(
            "Here we use the idea to see whether park ratings really change with factors such \
             as safety and infrastructure, which helps to make better decisions about the parks.",
        ),
    ]
}

pub fn hypothesis_question() -> Vec<Block> {
    vec![
        paragraph(
            "Does the number of children influence which park a family picks as its favourite? \
             Perhaps families with more children lean towards the parks with the best overall \
             ratings.",
        ),
        paragraph(
            "Below we look at whether the number of children goes together with preferring \
             parks rated higher for safety, activities and the playground.",
        ),
    ]
}

pub fn park_choice_intro() -> Vec<Block> {
    vec![paragraph(
        "The table below relates the number of children to the parks respondents chose:",
    )]
}

pub fn park_choice(choices: &[ParkChoice]) -> Vec<Block> {
    let Some((top_park, top_count)) = most_chosen_park(choices) else {
        return vec![paragraph("No respondent could be assigned to a group.")];
    };

    let mut findings = vec![format!(
        "{} is the most chosen park overall, picked by {} respondents.",
        top_park, top_count
    )];

    let smallest = choices.iter().map(|c| c.children).min();
    let largest = choices.iter().map(|c| c.children).max();

    if let Some(choice) = largest.and_then(|n| favourite_park(choices, n)) {
        findings.push(format!(
            "Among families with {}, the favourite is {}.",
            children_label(choice.children),
            choice.park
        ));
    }
    if smallest != largest {
        if let Some(choice) = smallest.and_then(|n| favourite_park(choices, n)) {
            findings.push(format!(
                "Among respondents with {}, the favourite is {}.",
                children_label(choice.children),
                choice.park
            ));
        }
    }

    vec![Block::Bullets(findings)]
}

pub fn children_means_intro() -> Vec<Block> {
    vec![paragraph(
        "The table below shows the mean safety, activity and playground scores, and their \
         overall average, for each number of children:",
    )]
}

pub fn children_means(rows: &[ChildrenMeans], decimals: usize) -> Vec<Block> {
    let best = rows
        .iter()
        .filter_map(|r| r.overall.map(|overall| (r.children, overall)))
        .fold(None, |acc: Option<(u32, f64)>, (children, overall)| match acc {
            Some((_, top)) if top >= overall => acc,
            _ => Some((children, overall)),
        });

    match best {
        Some((children, overall)) => vec![paragraph(format!(
            "Respondents with {} give the parks the highest overall average, {}.",
            children_label(children),
            format_value(Some(overall), decimals)
        ))],
        None => vec![paragraph("No overall average could be computed.")],
    }
}

/// Direction of the overall average from the fewest to the most children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

pub fn overall_trend(rows: &[ChildrenMeans]) -> Option<Trend> {
    let defined: Vec<f64> = rows.iter().filter_map(|r| r.overall).collect();
    let (first, last) = (defined.first()?, defined.last()?);

    if defined.len() < 2 || (last - first).abs() < 1e-9 {
        Some(Trend::Flat)
    } else if last > first {
        Some(Trend::Rising)
    } else {
        Some(Trend::Falling)
    }
}

pub fn trend_commentary(rows: &[ChildrenMeans]) -> Vec<Block> {
    let summary = match overall_trend(rows) {
        Some(Trend::Rising) => {
            "The line climbs: the more children a family has, the higher it rates the parks."
        }
        Some(Trend::Falling) => {
            "The line falls: families with more children rate the parks lower, which suggests \
             they expect more from them."
        }
        Some(Trend::Flat) => {
            "The line stays level: the number of children makes little difference to how the \
             parks are rated."
        }
        None => "There is not enough data to draw the line.",
    };

    vec![
        paragraph(summary),
        Block::Bullets(vec![
            "Larger families need places where children can play and have fun, so their \
             opinion of the parks matters."
                .to_string(),
            "Parks offering more options for children tend to be the best rated.".to_string(),
        ]),
    ]
}

pub fn conclusion(analysis: &Analysis) -> Vec<Block> {
    let mut blocks = vec![paragraph(format!(
        "Based on the {} answers analysed, we can summarise how the number of children \
         relates to the choice of favourite park:",
        analysis.respondents
    ))];

    blocks.extend(park_choice(&analysis.park_choices));

    let closing = match overall_trend(&analysis.children_means) {
        Some(Trend::Rising) => {
            "Families with more children also tend to rate the parks higher, which suggests \
             these spaces are important for leisure and fun for children of all ages."
        }
        Some(Trend::Falling) => {
            "Families with more children tend to rate the parks lower, so improvements aimed at \
             them could raise overall satisfaction."
        }
        _ => "Overall ratings are similar across family sizes.",
    };
    blocks.push(paragraph(closing));

    blocks
}
