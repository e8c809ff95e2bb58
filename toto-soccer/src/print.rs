use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use toto::market::Percentage;

use crate::data::SourceReport;
use crate::domain::Side;
use crate::model::{Estimate, HeadToHead};
use crate::scoregrid::Outcome;

pub fn outcome_label(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Win(Side::Home) => "1 (Home)".into(),
        Outcome::Draw => "X (Draw)".into(),
        Outcome::Win(Side::Away) => "2 (Away)".into(),
        Outcome::CorrectScore(score) => format!("{}-{}", score.home, score.away),
    }
}

pub fn tabulate_head_to_head(estimate: &Estimate) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Outcome".into(), "Fair price".into(), "Probability".into()],
        ));
    for (index, outcome) in HeadToHead::OUTCOMES.iter().enumerate() {
        let probability = estimate.head_to_head.probs()[index];
        table.push_row(Row::new(
            Styles::default(),
            vec![
                outcome_label(outcome).into(),
                estimate.fair_prices[index].to_string().into(),
                Percentage(probability).to_string().into(),
            ],
        ));
    }
    table
}

pub fn tabulate_strengths(estimate: &Estimate) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Team".into(),
                "Attack".into(),
                "Defence".into(),
                "xG".into(),
            ],
        ));
    for (team, strength, expected_goals) in [
        (
            &estimate.home_team,
            &estimate.home_strength,
            estimate.expectation.home_goals,
        ),
        (
            &estimate.away_team,
            &estimate.away_strength,
            estimate.expectation.away_goals,
        ),
    ] {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                team.to_string().into(),
                format!("{:.3}", strength.attack).into(),
                format!("{:.3}", strength.defence).into(),
                format!("{expected_goals:.3}").into(),
            ],
        ));
    }
    table
}

pub fn tabulate_reports(reports: &[SourceReport]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Source".into(), "Matches".into()],
        ));
    for report in reports {
        let outcome = match &report.outcome {
            Ok(matches) => matches.to_string(),
            Err(err) => format!("unavailable: {err}"),
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![report.source.to_string().into(), outcome.into()],
        ));
    }
    table
}

pub fn tabulate_teams(teams: &[String]) -> Table {
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(4)).with(HAlign::Right)),
        Col::new(Styles::default().with(MinWidth(10)).with(Left)),
    ]);
    for (index, team) in teams.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![(index + 1).to_string().into(), team.to_string().into()],
        ));
    }
    table
}
