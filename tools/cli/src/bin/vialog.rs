use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vialog::{Dialogue, ParseMode, ParseOptions};

#[derive(Parser)]
#[command(author, version, about = "Vialog dialogue file tool")]
struct Cli {
    /// Reject unrecognized or malformed lines instead of skipping them.
    #[arg(long, global = true, default_value_t = false)]
    strict: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every line of a dialogue with numbered answers.
    Show { dialogue: PathBuf },
    /// Write the starter template dialogue to a new file.
    New {
        output: PathBuf,
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Parse a dialogue file and report the first problem found.
    Check { dialogue: PathBuf },
    /// Re-serialize a dialogue file.
    Fmt {
        dialogue: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export a dialogue as JSON.
    Export {
        dialogue: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Navigate a dialogue and print the line that ends up active.
    Walk {
        dialogue: PathBuf,
        #[arg(long)]
        speaker: Option<String>,
        #[arg(long)]
        index: Option<usize>,
        #[arg(long, default_value_t = 0)]
        steps: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = ParseOptions {
        mode: if cli.strict {
            ParseMode::Strict
        } else {
            ParseMode::Permissive
        },
        ..ParseOptions::default()
    };
    match cli.command {
        Command::Show { dialogue } => show_dialogue(&dialogue, options),
        Command::New { output, force } => write_template(&output, force),
        Command::Check { dialogue } => check_dialogue(&dialogue, options),
        Command::Fmt { dialogue, output } => format_dialogue(&dialogue, output.as_deref(), options),
        Command::Export { dialogue, output } => {
            export_dialogue(&dialogue, output.as_deref(), options)
        }
        Command::Walk {
            dialogue,
            speaker,
            index,
            steps,
        } => walk_dialogue(&dialogue, speaker.as_deref(), index, steps, options),
    }
}

fn open(path: &Path, options: ParseOptions) -> Result<Dialogue> {
    Dialogue::open_from_file_with_options(path, options)
        .with_context(|| format!("open {}", path.display()))
}

fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content).with_context(|| format!("write {}", path.display()))
        }
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

fn show_dialogue(path: &Path, options: ParseOptions) -> Result<()> {
    let dialogue = open(path, options)?;
    print!("{dialogue}");
    Ok(())
}

fn write_template(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!("{} already exists, pass --force to replace it", output.display());
    }
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    Dialogue::create_template()
        .save(output)
        .with_context(|| format!("write {}", output.display()))
}

fn check_dialogue(path: &Path, options: ParseOptions) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    match Dialogue::parse_with_options(&content, options) {
        Ok(dialogue) => {
            println!("{}: {} lines", path.display(), dialogue.len());
            Ok(())
        }
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            anyhow::bail!("{} failed to parse", path.display());
        }
    }
}

fn format_dialogue(path: &Path, output: Option<&Path>, options: ParseOptions) -> Result<()> {
    let dialogue = open(path, options)?;
    let text = dialogue.serialize().context("serialize dialogue")?;
    emit(output, &text)
}

fn export_dialogue(path: &Path, output: Option<&Path>, options: ParseOptions) -> Result<()> {
    let dialogue = open(path, options)?;
    let mut json = dialogue.to_json().context("serialize dialogue")?;
    json.push('\n');
    emit(output, &json)
}

fn walk_dialogue(
    path: &Path,
    speaker: Option<&str>,
    index: Option<usize>,
    steps: usize,
    options: ParseOptions,
) -> Result<()> {
    let mut dialogue = open(path, options)?;
    if let Some(index) = index {
        dialogue.jump_to_index(index)?;
    }
    if let Some(speaker) = speaker {
        if !dialogue.jump_to_speaker(speaker) {
            tracing::warn!(speaker, "no line for speaker");
        }
    }
    for _ in 0..steps {
        dialogue.advance();
    }
    match dialogue.active_index() {
        Some(active) => {
            let line = dialogue.active_line()?;
            print!("[{active}] {line}");
        }
        None => println!("no active line"),
    }
    Ok(())
}
