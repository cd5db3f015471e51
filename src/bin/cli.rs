//! Command-line front end for keypoint highlighting
//!
//! Reads a JSON DOM snapshot from a file (or `-` for stdin), then extracts its
//! text, summarizes it, or highlights keypoints and prints the result.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use keypoint_highlight::extract::TextSource;
use keypoint_highlight::service::{Action, HttpSummarizer};
use keypoint_highlight::{HighlightOptions, MatchMode, PageSession, ServiceOptions};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "highlight-cli")]
#[command(version)]
#[command(about = "Highlight summarizer keypoints in a page snapshot", long_about = None)]
struct Cli {
    #[command(flatten)]
    service: ServiceArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ServiceArgs {
    /// Base URL of the summarization service
    #[arg(long, global = true, value_name = "URL", default_value = keypoint_highlight::config::DEFAULT_SERVICE_URL)]
    service_url: String,

    /// Service request timeout in seconds
    #[arg(long, global = true, value_name = "SECS", default_value = "30")]
    timeout: u64,

    /// Output language forwarded to the service
    #[arg(long, global = true)]
    language: Option<String>,

    /// Summary length forwarded to the service
    #[arg(long, global = true)]
    length: Option<String>,

    /// Answer with simulated results when the service is unreachable
    #[arg(long, global = true)]
    simulate: bool,

    /// Refuse to send text shorter than this many characters (the stock service needs 50)
    #[arg(long, global = true, value_name = "CHARS", default_value = "0")]
    min_length: usize,
}

#[derive(Args)]
struct SourceArgs {
    /// JSON DOM snapshot, or `-` for stdin
    #[arg(value_name = "DOM")]
    dom: PathBuf,

    /// Use this text instead of the page content
    #[arg(long)]
    selection: Option<String>,

    /// Use every rendered text node instead of the main content container
    #[arg(long)]
    whole_document: bool,
}

impl SourceArgs {
    fn source(&self) -> TextSource {
        match (&self.selection, self.whole_document) {
            (Some(selection), _) => TextSource::Selection(selection.clone()),
            (None, true) => TextSource::Document,
            (None, false) => TextSource::Page,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print the text that would be sent to the service
    Extract(SourceArgs),

    /// Summarize the page, or turn it into keypoints or bullet points
    Summarize {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, short = 'a', value_enum, default_value = "summarize")]
        action: ActionArg,

        /// Print the raw JSON result instead of display text
        #[arg(long)]
        json: bool,
    },

    /// Highlight keypoints in the page and print the marked-up document
    Highlight(HighlightArgs),

    /// Check that the summarization service is up
    Health,
}

#[derive(Args)]
struct HighlightArgs {
    /// JSON DOM snapshot, or `-` for stdin
    #[arg(value_name = "DOM")]
    dom: PathBuf,

    /// Keypoint to highlight (repeatable)
    #[arg(long = "keypoint", short = 'k', value_name = "TEXT")]
    keypoints: Vec<String>,

    /// File with one keypoint per line
    #[arg(long, value_name = "FILE")]
    keypoints_file: Option<PathBuf>,

    /// Ask the summarization service for keypoints
    #[arg(long, conflicts_with_all = ["keypoints", "keypoints_file"])]
    fetch: bool,

    /// Match keypoints case-insensitively
    #[arg(long, short = 'i')]
    case_insensitive: bool,

    /// Treat whitespace runs in keypoints and text as a single space
    #[arg(long, short = 'w')]
    collapse_whitespace: bool,

    /// Leave text that is already highlighted alone
    #[arg(long)]
    skip_marked: bool,

    /// Class set on highlight markers
    #[arg(long, default_value = keypoint_highlight::config::DEFAULT_MARKER_CLASS)]
    marker_class: String,

    /// Output format of the document
    #[arg(long, short = 'f', value_enum, default_value = "html")]
    format: OutputFormat,

    /// Write the highlight report as JSON to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ActionArg {
    Summarize,
    Keypoints,
    Bullet,
}

impl From<ActionArg> for Action {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Summarize => Action::Summarize,
            ActionArg::Keypoints => Action::Keypoints,
            ActionArg::Bullet => Action::Bullet,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Html,
    Json,
    Markdown,
}

impl ServiceArgs {
    fn options(&self) -> ServiceOptions {
        let mut options = ServiceOptions::new()
            .base_url(self.service_url.clone())
            .timeout(Duration::from_secs(self.timeout))
            .simulate_on_failure(self.simulate)
            .min_text_length(self.min_length);
        options.language = self.language.clone();
        options.length = self.length.clone();
        options
    }
}

impl HighlightArgs {
    fn options(&self) -> HighlightOptions {
        HighlightOptions::new()
            .marker_class(self.marker_class.clone())
            .skip_marked_text(self.skip_marked)
            .match_mode(MatchMode {
                case_insensitive: self.case_insensitive,
                collapse_whitespace: self.collapse_whitespace,
            })
    }

    fn supplied_keypoints(&self) -> Result<Vec<String>> {
        let mut keypoints = self.keypoints.clone();
        if let Some(path) = &self.keypoints_file {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading keypoints from {}", path.display()))?;
            keypoints.extend(contents.lines().filter(|l| !l.trim().is_empty()).map(str::to_string));
        }
        Ok(keypoints)
    }
}

fn open_session(service: &ServiceArgs, highlight: HighlightOptions, dom: &PathBuf) -> Result<PageSession> {
    let mut session = PageSession::new(service.options(), highlight);
    if dom.as_os_str() == "-" {
        let mut json = String::new();
        std::io::stdin().read_to_string(&mut json).context("reading DOM snapshot from stdin")?;
        session.load_json(&json)?;
    } else {
        session
            .load_file(dom)
            .with_context(|| format!("loading DOM snapshot from {}", dom.display()))?;
    }
    Ok(session)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Health => {
            let health = HttpSummarizer::new(&cli.service.options()).health()?;
            println!("{}", serde_json::to_string_pretty(&health)?);
            if !health.is_ok() {
                bail!("service reported status {:?}", health.status);
            }
        }
        Command::Extract(source) => {
            let session = open_session(&cli.service, HighlightOptions::default(), &source.dom)?;
            println!("{}", session.extract_text(&source.source())?);
        }
        Command::Summarize { source, action, json } => {
            let session = open_session(&cli.service, HighlightOptions::default(), &source.dom)?;
            let outcome = session.request(action.into(), &source.source())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", outcome.to_text());
            }
        }
        Command::Highlight(args) => {
            let mut session = open_session(&cli.service, args.options(), &args.dom)?;

            let report = if args.fetch {
                session.fetch_and_highlight()?.1
            } else {
                let keypoints = args.supplied_keypoints()?;
                if keypoints.is_empty() {
                    bail!("no keypoints given; pass --keypoint, --keypoints-file or --fetch");
                }
                session.highlight(&keypoints)
            };

            log::info!("{}", report.summary());
            for skipped in &report.skipped {
                log::warn!("keypoint {} skipped: {}", skipped.index, skipped.reason);
            }

            if let Some(path) = &args.report {
                std::fs::write(path, serde_json::to_string_pretty(&report)?)
                    .with_context(|| format!("writing report to {}", path.display()))?;
            }

            match args.format {
                OutputFormat::Html => println!("{}", session.to_html()),
                OutputFormat::Json => println!("{}", session.tree().to_json()?),
                OutputFormat::Markdown => println!("{}", session.to_markdown()),
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Cli::parse())
}
