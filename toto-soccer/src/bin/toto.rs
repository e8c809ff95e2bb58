use std::env;
use std::error::Error;
use std::io;
use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{anyhow, bail};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use toto::market::FairPrice;
use toto_soccer::data::{HttpFetch, Source};
use toto_soccer::domain::MatchDataset;
use toto_soccer::model::{Config, Estimator};
use toto_soccer::scoregrid::MAX_GOALS;
use toto_soccer::{data, print, selection};

const QUIT: &str = "q";

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// CSV source to load, either a URL or a file path; repeat for several [default: the last
    /// three Eredivisie seasons]
    #[clap(short = 's', long = "source")]
    sources: Vec<Source>,

    /// home team; skips the interactive prompt when given with --away
    #[clap(long)]
    home: Option<String>,

    /// away team; skips the interactive prompt when given with --home
    #[clap(long)]
    away: Option<String>,

    /// goals a side beyond which the scoreline grid is truncated
    #[clap(long = "max-goals", default_value_t = MAX_GOALS)]
    max_goals: u8,

    /// download timeout, in seconds
    #[clap(long, default_value_t = HttpFetch::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// print estimates as JSON
    #[clap(long)]
    json: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.home.is_some() != self.away.is_some() {
            bail!("--home and --away must be specified together");
        }
        Ok(())
    }

    fn sources(&self) -> Vec<Source> {
        if self.sources.is_empty() {
            Source::defaults()
        } else {
            self.sources.clone()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let fetch = HttpFetch::new(Duration::from_secs(args.timeout))?;
    let loaded = data::load(&args.sources(), &fetch).await;
    println!(
        "Sources:\n{}",
        Console::default().render(&print::tabulate_reports(&loaded.reports))
    );
    let dataset = loaded.dataset;
    if dataset.is_empty() {
        return Err(anyhow!("no data available").into());
    }
    info!("{} matches loaded", dataset.len());

    let estimator = Estimator::try_from(Config {
        max_goals: args.max_goals,
    })?;
    match (&args.home, &args.away) {
        (Some(home), Some(away)) => {
            let teams = dataset.teams();
            let home = resolve(home, &teams)?;
            let away = resolve(away, &teams)?;
            price(&estimator, home, away, &dataset, args.json)?;
        }
        _ => interact(&estimator, &dataset, args.json)?,
    }
    Ok(())
}

fn resolve<'a>(input: &str, teams: &'a [String]) -> anyhow::Result<&'a str> {
    selection::resolve(input, teams).ok_or_else(|| anyhow!("unknown team '{input}'"))
}

fn price(
    estimator: &Estimator,
    home: &str,
    away: &str,
    dataset: &MatchDataset,
    json: bool,
) -> anyhow::Result<()> {
    let estimate = estimator.estimate(home, away, dataset)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        println!("{home} v {away}");
        println!(
            "Strengths:\n{}",
            Console::default().render(&print::tabulate_strengths(&estimate))
        );
        println!(
            "Fair odds:\n{}",
            Console::default().render(&print::tabulate_head_to_head(&estimate))
        );
        match &estimate.most_likely_score {
            Some(score) => println!("Most likely score: {}-{}", score.home, score.away),
            None => println!("Most likely score: {}", FairPrice::UNAVAILABLE),
        }
    }
    Ok(())
}

fn interact(estimator: &Estimator, dataset: &MatchDataset, json: bool) -> anyhow::Result<()> {
    let teams = dataset.teams();
    let (default_home, default_away) =
        selection::default_pair(&teams).ok_or_else(|| anyhow!("no teams to choose from"))?;
    println!(
        "Teams:\n{}",
        Console::default().render(&print::tabulate_teams(&teams))
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let Some(home) = prompt(&mut lines, "Home team", default_home, &teams)? else {
            return Ok(());
        };
        let Some(away) = prompt(&mut lines, "Away team", default_away, &teams)? else {
            return Ok(());
        };
        if let Err(err) = price(estimator, home, away, dataset, json) {
            println!("{err}");
        }
    }
}

/// Reads a team from the input, repeating the question until the answer resolves. `None` once
/// the input is exhausted or the user quits.
fn prompt<'a>(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
    default: &'a str,
    teams: &'a [String],
) -> anyhow::Result<Option<&'a str>> {
    loop {
        print!("{label} [{default}]: ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            return Ok(None);
        };
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case(QUIT) {
            return Ok(None);
        }
        if input.is_empty() {
            return Ok(Some(default));
        }
        match selection::resolve(input, teams) {
            Some(team) => return Ok(Some(team)),
            None => println!("unknown team '{input}'; enter a name or a number from the list"),
        }
    }
}
