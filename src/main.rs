use anyhow::Result;
use clap::{value_parser, Arg, Command};
use std::path::PathBuf;
use tracing::info;

use transcript_analyzer::{Config, ConfigBuilder, TranscriptPipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let matches = Command::new("Transcript Analyzer")
        .version(env!("CARGO_PKG_VERSION"))
        .author("TigreRoll")
        .about("Counts how often a sitcom character says a word, from fan-made transcripts")
        .arg(
            Arg::new("sitemap")
                .short('s')
                .long("sitemap")
                .value_name("URL")
                .help("Sitemap listing the transcript pages")
        )
        .arg(
            Arg::new("speaker")
                .short('p')
                .long("speaker")
                .value_name("NAME")
                .help("Speaker whose lines are searched [default: sheldon]")
        )
        .arg(
            Arg::new("word")
                .short('w')
                .long("word")
                .value_name("WORD")
                .help("Word to count [default: penny]")
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECS")
                .help("HTTP request timeout in seconds")
                .value_parser(value_parser!(u64))
        )
        .arg(
            Arg::new("top-speakers")
                .long("top-speakers")
                .value_name("N")
                .help("Log the N speakers with the most lines")
                .value_parser(value_parser!(usize))
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Read settings from a TOML file")
                .value_parser(value_parser!(PathBuf))
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue)
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");

    // Logs go to stderr; stdout carries only the answer
    tracing_subscriber::fmt()
        .with_env_filter(if verbose {
            "transcript_analyzer=debug,warn"
        } else {
            "transcript_analyzer=info,warn"
        })
        .with_writer(std::io::stderr)
        .init();

    let base = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let mut builder = ConfigBuilder::from_config(base);
    if let Some(sitemap) = matches.get_one::<String>("sitemap") {
        builder = builder.with_sitemap_url(sitemap.as_str());
    }
    if let Some(speaker) = matches.get_one::<String>("speaker") {
        builder = builder.with_speaker(speaker.as_str());
    }
    if let Some(word) = matches.get_one::<String>("word") {
        builder = builder.with_word(word.as_str());
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        builder = builder.with_timeout(*timeout);
    }
    if let Some(top) = matches.get_one::<usize>("top-speakers") {
        builder = builder.with_top_speakers(*top);
    }
    let config = builder.build();

    info!("🚀 Transcript Analyzer starting...");
    for line in config.summary().lines() {
        info!("{}", line);
    }

    let pipeline = TranscriptPipeline::new(config)?;
    let report = pipeline.run().await?;

    let top = pipeline.config().top_speakers;
    if top > 0 {
        info!("📊 Top {} speakers by lines:", top);
        for (speaker, count) in report.speaker_counts.most_common(top) {
            info!("   {:<20} {}", speaker, count);
        }
    }

    println!("{}", report.answer());
    Ok(())
}
