//! Acquisition of historical results from CSV sources in the football-data.co.uk layout.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use toto::csv::{field, CsvReader, Header};

use crate::domain::{MatchDataset, MatchRecord};

/// The three most recent Eredivisie seasons, newest first.
pub const DEFAULT_SOURCES: [&str; 3] = [
    "https://www.football-data.co.uk/mmz4281/2425/N1.csv",
    "https://www.football-data.co.uk/mmz4281/2324/N1.csv",
    "https://www.football-data.co.uk/mmz4281/2223/N1.csv",
];

pub const HOME_TEAM: &str = "HomeTeam";
pub const AWAY_TEAM: &str = "AwayTeam";
pub const HOME_GOALS: &str = "FTHG";
pub const AWAY_GOALS: &str = "FTAG";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Source {
    Remote(String),
    File(PathBuf),
}

impl Source {
    pub fn defaults() -> Vec<Source> {
        DEFAULT_SOURCES
            .iter()
            .map(|url| Source::Remote(url.to_string()))
            .collect()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("source must not be blank")]
pub struct BlankSource;

impl FromStr for Source {
    type Err = BlankSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err(BlankSource)
        } else if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Source::Remote(s.into()))
        } else {
            Ok(Source::File(s.into()))
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceUnavailable {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(StatusCode),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("missing column {0}")]
    MissingColumn(&'static str),

    #[error("no header line")]
    Empty,
}

/// The result of loading a single source: the number of accepted rows, or why it was skipped.
#[derive(Debug)]
pub struct SourceReport {
    pub source: Source,
    pub outcome: Result<usize, SourceUnavailable>,
}

#[derive(Debug)]
pub struct Loaded {
    pub dataset: MatchDataset,
    pub reports: Vec<SourceReport>,
}
impl Loaded {
    pub fn failures(&self) -> impl Iterator<Item = (&Source, &SourceUnavailable)> {
        self.reports.iter().filter_map(|report| match &report.outcome {
            Ok(_) => None,
            Err(err) => Some((&report.source, err)),
        })
    }
}

/// Retrieves the raw text of a source.
pub trait Fetch {
    fn fetch(
        &self,
        source: &Source,
    ) -> impl Future<Output = Result<String, SourceUnavailable>> + Send;
}

/// Fetches remote sources over HTTP and reads file sources from the local disk.
pub struct HttpFetch {
    client: Client,
}
impl HttpFetch {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetch {
    async fn fetch(&self, source: &Source) -> Result<String, SourceUnavailable> {
        match source {
            Source::Remote(url) => {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SourceUnavailable::Status(status));
                }
                Ok(response.text().await?)
            }
            Source::File(path) => Ok(tokio::fs::read_to_string(path).await?),
        }
    }
}

/// Loads every source in order, concatenating the rows of those that succeed. Never fails as a
/// whole; failed sources are reported and skipped.
pub async fn load(sources: &[Source], fetch: &impl Fetch) -> Loaded {
    let mut records = vec![];
    let mut reports = Vec::with_capacity(sources.len());
    for source in sources {
        let outcome = match fetch.fetch(source).await {
            Ok(text) => parse_records(&text),
            Err(err) => Err(err),
        };
        let outcome = match outcome {
            Ok(mut source_records) => {
                info!("loaded {} matches from {source}", source_records.len());
                let count = source_records.len();
                records.append(&mut source_records);
                Ok(count)
            }
            Err(err) => {
                warn!("skipping {source}: {err}");
                Err(err)
            }
        };
        reports.push(SourceReport {
            source: source.clone(),
            outcome,
        });
    }
    Loaded {
        dataset: MatchDataset::new(records),
        reports,
    }
}

/// Parses CSV text into match records. Rows lacking any required field, or with goal counts that
/// are not non-negative whole numbers, are discarded.
pub fn parse_records(text: &str) -> Result<Vec<MatchRecord>, SourceUnavailable> {
    let mut reader = CsvReader::from_reader(text.as_bytes());
    let header = Header::from(reader.next().ok_or(SourceUnavailable::Empty)??);
    let columns = Columns::locate(&header)?;

    let mut records = vec![];
    let mut discarded = 0;
    for (line, record) in reader.enumerate() {
        let record = record?;
        if record.iter().all(|datum| datum.trim().is_empty()) {
            continue;
        }
        match columns.extract(&record) {
            Some(parsed) => records.push(parsed),
            None => {
                debug!("discarding line {}: {record:?}", line + 2);
                discarded += 1;
            }
        }
    }
    if discarded > 0 {
        debug!("discarded {discarded} incomplete rows");
    }
    Ok(records)
}

struct Columns {
    home_team: usize,
    away_team: usize,
    home_goals: usize,
    away_goals: usize,
}
impl Columns {
    fn locate(header: &Header) -> Result<Self, SourceUnavailable> {
        let position = |name: &'static str| {
            header
                .position(name)
                .ok_or(SourceUnavailable::MissingColumn(name))
        };
        Ok(Self {
            home_team: position(HOME_TEAM)?,
            away_team: position(AWAY_TEAM)?,
            home_goals: position(HOME_GOALS)?,
            away_goals: position(AWAY_GOALS)?,
        })
    }

    fn extract(&self, record: &[String]) -> Option<MatchRecord> {
        Some(MatchRecord::new(
            field(record, self.home_team)?,
            field(record, self.away_team)?,
            parse_goals(field(record, self.home_goals)?)?,
            parse_goals(field(record, self.away_goals)?)?,
        ))
    }
}

fn parse_goals(datum: &str) -> Option<u16> {
    datum.parse::<u16>().ok().or_else(|| {
        let goals = datum.parse::<f64>().ok()?;
        (goals >= 0.0 && goals.fract() == 0.0 && goals <= u16::MAX as f64).then_some(goals as u16)
    })
}

#[cfg(test)]
mod tests;
