use super::*;
use rustc_hash::FxHashMap;
use std::env;
use std::fs;

const SEASON: &str = "\u{feff}Div,Date,HomeTeam,AwayTeam,FTHG,FTAG,FTR
N1,09/08/2024,Ajax,Heerenveen,3,0,H
N1,10/08/2024,Feyenoord,Willem II,1,1,D
N1,10/08/2024,PSV,,2,0,H
N1,11/08/2024,Twente,Sparta,,,
N1,11/08/2024,Heracles,Utrecht,x,1,A

N1,12/08/2024,Go Ahead Eagles,NEC,2.0,1,H
N1,12/08/2024,AZ,Fortuna Sittard,-1,1,A
N1,13/08/2024,Groningen,Almere City,1.5,0,H
";

struct StubFetch {
    texts: FxHashMap<Source, String>,
}
impl StubFetch {
    fn new(texts: impl IntoIterator<Item = (Source, &'static str)>) -> Self {
        Self {
            texts: texts
                .into_iter()
                .map(|(source, text)| (source, text.to_string()))
                .collect(),
        }
    }
}

impl Fetch for StubFetch {
    async fn fetch(&self, source: &Source) -> Result<String, SourceUnavailable> {
        self.texts
            .get(source)
            .cloned()
            .ok_or(SourceUnavailable::Status(StatusCode::NOT_FOUND))
    }
}

fn remote(url: &str) -> Source {
    Source::Remote(url.into())
}

#[test]
fn parse_discards_incomplete_rows() {
    let records = parse_records(SEASON).unwrap();
    assert_eq!(
        vec![
            MatchRecord::new("Ajax", "Heerenveen", 3, 0),
            MatchRecord::new("Feyenoord", "Willem II", 1, 1),
            MatchRecord::new("Go Ahead Eagles", "NEC", 2, 1),
        ],
        records
    );
}

#[test]
fn parse_trims_fields() {
    let records = parse_records("HomeTeam,AwayTeam,FTHG,FTAG\r\n Ajax , PSV ,1, 2 \r\n").unwrap();
    assert_eq!(vec![MatchRecord::new("Ajax", "PSV", 1, 2)], records);
}

#[test]
fn parse_missing_column() {
    let err = parse_records("HomeTeam,AwayTeam,FTHG\nAjax,PSV,1\n").unwrap_err();
    assert!(matches!(err, SourceUnavailable::MissingColumn(AWAY_GOALS)), "{err:?}");
    assert_eq!("missing column FTAG", err.to_string());
}

#[test]
fn parse_empty_text() {
    assert!(matches!(parse_records(""), Err(SourceUnavailable::Empty)));
}

#[test]
fn parse_header_only() {
    assert_eq!(
        Vec::<MatchRecord>::new(),
        parse_records("HomeTeam,AwayTeam,FTHG,FTAG\n").unwrap()
    );
}

#[test]
fn parse_goals_whole_numbers_only() {
    assert_eq!(Some(0), parse_goals("0"));
    assert_eq!(Some(4), parse_goals("4.0"));
    assert_eq!(None, parse_goals("4.5"));
    assert_eq!(None, parse_goals("-2"));
    assert_eq!(None, parse_goals("NaN"));
    assert_eq!(None, parse_goals("seven"));
}

#[test]
fn source_from_str() {
    assert_eq!(
        remote("https://www.football-data.co.uk/mmz4281/2425/N1.csv"),
        Source::from_str(DEFAULT_SOURCES[0]).unwrap()
    );
    assert_eq!(
        Source::File("data/N1.csv".into()),
        Source::from_str(" data/N1.csv ").unwrap()
    );
    assert_eq!(BlankSource, Source::from_str("  ").unwrap_err());
    assert_eq!("data/N1.csv", Source::File("data/N1.csv".into()).to_string());
}

#[test]
fn defaults_newest_first() {
    let defaults = Source::defaults();
    assert_eq!(3, defaults.len());
    assert_eq!(remote(DEFAULT_SOURCES[2]), defaults[2]);
}

#[tokio::test]
async fn load_concatenates_in_source_order() {
    let fetch = StubFetch::new([
        (remote("a"), "HomeTeam,AwayTeam,FTHG,FTAG\nAjax,PSV,1,0\nPSV,Ajax,2,2\n"),
        (remote("b"), "FTAG,FTHG,AwayTeam,HomeTeam\n3,1,Ajax,Twente\n"),
    ]);
    let loaded = load(&[remote("a"), remote("b")], &fetch).await;
    assert_eq!(
        &[
            MatchRecord::new("Ajax", "PSV", 1, 0),
            MatchRecord::new("PSV", "Ajax", 2, 2),
            MatchRecord::new("Twente", "Ajax", 1, 3),
        ],
        loaded.dataset.records()
    );
    assert_eq!(0, loaded.failures().count());
    assert_eq!(
        vec![2, 1],
        loaded
            .reports
            .iter()
            .map(|report| *report.outcome.as_ref().unwrap())
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn load_skips_failed_sources() {
    let fetch = StubFetch::new([
        (remote("good"), "HomeTeam,AwayTeam,FTHG,FTAG\nAjax,PSV,1,0\n"),
        (remote("malformed"), "Home,Away\nAjax,PSV\n"),
    ]);
    let loaded = load(&[remote("missing"), remote("good"), remote("malformed")], &fetch).await;
    assert_eq!(1, loaded.dataset.len());
    assert_eq!(3, loaded.reports.len());
    let failures = loaded.failures().collect::<Vec<_>>();
    assert_eq!(2, failures.len());
    assert_eq!(&remote("missing"), failures[0].0);
    assert!(matches!(failures[0].1, SourceUnavailable::Status(status) if *status == StatusCode::NOT_FOUND));
    assert_eq!(&remote("malformed"), failures[1].0);
    assert!(matches!(failures[1].1, SourceUnavailable::MissingColumn(HOME_TEAM)));
}

#[tokio::test]
async fn load_with_every_source_failing() {
    let fetch = StubFetch::new([]);
    let loaded = load(&Source::defaults(), &fetch).await;
    assert!(loaded.dataset.is_empty());
    assert_eq!(3, loaded.failures().count());
}

#[tokio::test]
async fn http_fetch_reads_files() {
    let path = env::temp_dir().join(format!("toto-soccer-{}.csv", std::process::id()));
    fs::write(&path, SEASON).unwrap();
    let fetch = HttpFetch::new(HttpFetch::DEFAULT_TIMEOUT).unwrap();
    let missing = Source::File(path.with_extension("missing"));
    let loaded = load(&[Source::File(path.clone()), missing], &fetch).await;
    fs::remove_file(&path).unwrap();
    assert_eq!(3, loaded.dataset.len());
    let failures = loaded.failures().collect::<Vec<_>>();
    assert_eq!(1, failures.len());
    assert!(matches!(failures[0].1, SourceUnavailable::Io(_)));
}
