use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stepcas::api::{Answer, Question, answer};
use stepcas::config::Config;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Solve equations, inequalities and expressions in x, step by step"
)]
struct Cli {
    /// Question to answer; read one per line from stdin when omitted
    question: Option<String>,

    /// Print answers as JSON
    #[arg(long)]
    json: bool,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(question) = cli.question {
        return print_answer(&mut out, &question, &config, cli.json);
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("reading question from stdin")?;
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        print_answer(&mut out, question, &config, cli.json)?;
    }
    Ok(())
}

fn print_answer(out: &mut impl Write, question: &str, config: &Config, json: bool) -> Result<()> {
    let reply = answer(
        &Question {
            question: question.to_string(),
        },
        config,
    );

    if json {
        writeln!(out, "{}", serde_json::to_string(&reply)?)?;
        return Ok(());
    }

    match reply {
        Answer::Solved { solution, steps } => {
            for (i, step) in steps.iter().enumerate() {
                writeln!(out, "{:>2}. {step}", i + 1)?;
            }
            writeln!(out, "=> {solution}")?;
        }
        Answer::Failed { detail } => writeln!(out, "failed: {detail}")?,
    }
    Ok(())
}
