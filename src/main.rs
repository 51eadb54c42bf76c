use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use classtalk::{
    BilibiliClient, BilibiliConfig, BilibiliError, Extra, HeuristicsConfig, RunReport, Speaker,
    SubtitleLine, build_dialogue, build_segmentation, lesson_dir, parse_bvid, parse_subtitle_file,
    process_lesson, write_artifacts,
};
use classtalk::render::stage_label;

#[derive(Parser)]
#[command(name = "classtalk")]
#[command(author, version, about = "Classroom dialogue transcripts from Bilibili subtitles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate dialogue transcripts (and optional lesson documents) for a video
    Process {
        /// BV id or bilibili video URL
        input: String,

        /// Output root directory
        #[arg(long, default_value = ".")]
        outdir: PathBuf,

        /// Optional outputs, comma-separated
        #[arg(long, value_enum, value_delimiter = ',')]
        extras: Vec<Extra>,

        /// Read subtitles from a local JSON file instead of fetching them
        #[arg(long)]
        subtitle_file: Option<PathBuf>,

        /// Video title to use with --subtitle-file
        #[arg(long, requires = "subtitle_file")]
        title: Option<String>,

        /// Heuristics configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show speaker attribution and stage segmentation for a subtitle file
    Analyze {
        /// Subtitle JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Heuristics configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            outdir,
            extras,
            subtitle_file,
            title,
            config,
            verbose,
        } => {
            setup_logging(verbose);
            let config = load_config(config.as_deref())?;
            let extras: BTreeSet<Extra> = extras.into_iter().collect();
            process_video(&input, &outdir, &extras, subtitle_file, title, &config).await
        }
        Commands::Analyze {
            input,
            config,
            verbose,
        } => {
            setup_logging(verbose);
            let config = load_config(config.as_deref())?;
            analyze_subtitles(&input, &config)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_config(path: Option<&Path>) -> Result<HeuristicsConfig> {
    match path {
        Some(path) => {
            info!("Loading heuristics config from {:?}", path);
            HeuristicsConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {:?}", path))
        }
        None => Ok(HeuristicsConfig::default()),
    }
}

async fn process_video(
    input: &str,
    outdir: &Path,
    extras: &BTreeSet<Extra>,
    subtitle_file: Option<PathBuf>,
    title: Option<String>,
    config: &HeuristicsConfig,
) -> Result<()> {
    let bvid = parse_bvid(input)?;

    let (title, cid, lines) = match subtitle_file {
        Some(path) => {
            info!("Loading subtitles from {:?}", path);
            let lines = parse_subtitle_file(&path).context("Failed to parse subtitle file")?;
            if lines.is_empty() {
                return Err(BilibiliError::EmptyBody.into());
            }
            (title.unwrap_or_else(|| bvid.clone()), None, lines)
        }
        None => {
            let client = BilibiliClient::new(BilibiliConfig::from_env())?;
            let lesson = client.fetch_lesson(&bvid).await?;
            (lesson.title, Some(lesson.cid), lesson.lines)
        }
    };

    info!("Processing {} subtitle lines", lines.len());
    let artifacts = process_lesson(&title, &lines, extras, config);

    let dir = lesson_dir(outdir, &bvid);
    let files = write_artifacts(&dir, &bvid, &artifacts)?;

    let report = RunReport {
        bvid,
        title,
        cid,
        files,
    };
    println!("{}", report.to_result_line()?);

    Ok(())
}

fn analyze_subtitles(input: &Path, config: &HeuristicsConfig) -> Result<()> {
    info!("Analyzing subtitles from {:?}", input);
    let lines: Vec<SubtitleLine> =
        parse_subtitle_file(input).context("Failed to parse subtitle file")?;

    let dialogue = build_dialogue(&lines, config);
    let segmentation = build_segmentation(&lines, config);

    println!("Subtitle Analysis");
    println!("=================");
    println!("Total lines: {}", lines.len());
    println!("Total turns: {}", dialogue.turns.len());
    println!(
        "Duration: {:.1}s",
        lines
            .last()
            .zip(lines.first())
            .map(|(last, first)| (last.end - first.start).max(0.0))
            .unwrap_or(0.0)
    );
    println!();

    println!("Speakers");
    println!("--------");
    for speaker in [Speaker::Teacher, Speaker::Student, Speaker::Class] {
        println!(
            "{}: {} lines, {} turns",
            speaker,
            dialogue.line_count(speaker),
            dialogue.turn_count(speaker)
        );
    }
    println!();

    println!("Stages");
    println!("------");
    if segmentation.used_fallback {
        println!("(keyword evidence incomplete, proportional split)");
    }
    for name in config.segmentation.stage_names() {
        println!("{}: {}", name, stage_label(&lines, &segmentation.ranges, name));
    }

    Ok(())
}
