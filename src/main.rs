use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use chorus::lyrics::translate;
use chorus::sync::karaoke::{line_word_states, WordState};
use chorus::sync::line_index_at;
use chorus::{Resolver, SongInfo, OPEN_END};

#[derive(Debug, Parser)]
#[command(name = "chorus", version, about = "Lyric resolution and sync core (headless tools)")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct TrackArgs {
    /// Song id used by the id-keyed providers.
    #[arg(long)]
    id: String,
    #[arg(long)]
    title: String,
    #[arg(long)]
    artist: String,
    #[arg(long)]
    album: Option<String>,
    /// Known track duration in seconds (improves search matching).
    #[arg(long)]
    duration_secs: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve lyrics for a track and print timestamped lines.
    Fetch {
        #[command(flatten)]
        track: TrackArgs,
    },
    /// Print per-word karaoke states for the line active at a clock value.
    Karaoke {
        #[command(flatten)]
        track: TrackArgs,
        /// Playback clock value in milliseconds.
        #[arg(long)]
        at_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let cfg = chorus::config::load(cli.config.as_deref()).context("load config")?;
    let resolver = Resolver::new(&cfg);

    match cli.command {
        Command::Fetch { track } => {
            let song = song_info(track);
            let resolved = resolver.resolve(&song).await;
            println!("source: {}", resolved.source.label());
            for (i, line) in resolved.primary.lines.iter().enumerate() {
                if resolved.primary.synced {
                    print!("[{}] ", format_ms(line.start_ms));
                }
                print!("{}", line.text());
                if let Some(t) = translate::translation_at(resolved.translated.as_ref(), i) {
                    print!("  // {t}");
                }
                println!();
            }
        }
        Command::Karaoke { track, at_ms } => {
            let song = song_info(track);
            let resolved = resolver.resolve(&song).await;
            let word_track = resolved.word_synced.as_ref().unwrap_or(&resolved.primary);
            if !word_track.synced {
                println!("lyrics for this track carry no timing data");
                return Ok(());
            }
            match line_index_at(&word_track.lines, at_ms) {
                Some(index) => {
                    let line = &word_track.lines[index];
                    println!("at {}: {}", format_ms(at_ms), line.text().trim());
                    for (word, state) in line.words.iter().zip(line_word_states(line, at_ms)) {
                        let state = match state {
                            WordState::Upcoming => "upcoming".to_string(),
                            WordState::Playing { progress } => {
                                format!("playing {progress:.0}%")
                            }
                            WordState::Played => "played".to_string(),
                        };
                        println!("  {:<20} {}", word.text.trim(), state);
                    }
                }
                None => println!("no active line at {}", format_ms(at_ms)),
            }
        }
    }

    Ok(())
}

fn song_info(track: TrackArgs) -> SongInfo {
    SongInfo {
        id: track.id,
        title: track.title,
        artist: track.artist,
        album: track.album,
        duration_ms: track.duration_secs.map(|s| s * 1000),
    }
}

fn format_ms(ms: u64) -> String {
    if ms == OPEN_END {
        return "--:--.--".to_string();
    }
    let min = ms / 60_000;
    let sec = (ms % 60_000) / 1000;
    let cs = (ms % 1000) / 10;
    format!("{min:02}:{sec:02}.{cs:02}")
}
