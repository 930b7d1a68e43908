use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rumorph_lib::{shapes, tokenizers, MorphAnalyzer};

#[derive(Parser)]
#[command(name = "rumorph", about = "Russian morphological analyzer")]
struct Cli {
    /// Path to a compiled dictionary directory.
    #[arg(long)]
    dict: PathBuf,

    /// Words or sentences to analyze. If omitted, reads from stdin.
    input: Vec<String>,

    /// Print normal forms instead of full parses.
    #[arg(long)]
    normal_forms: bool,

    /// Print the full lexeme of the best parse.
    #[arg(long)]
    lexeme: bool,

    /// Inflect the best parse to carry the given grammemes (comma-separated,
    /// e.g. "plur,gent").
    #[arg(long)]
    inflect: Option<String>,

    /// Inflect the best parse to agree with a number.
    #[arg(long)]
    agree: Option<i64>,

    /// Show at most N parses per word (0 = all).
    #[arg(short = 'n', long = "top", default_value = "0")]
    top: usize,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let morph = MorphAnalyzer::open(&cli.dict)
        .with_context(|| format!("cannot open dictionary at {}", cli.dict.display()))?;

    if cli.input.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("failed to read stdin")?;
            if !line.trim().is_empty() {
                process_line(&line, &morph, &cli)?;
            }
        }
    } else {
        let joined = cli.input.join(" ");
        process_line(&joined, &morph, &cli)?;
    }
    Ok(())
}

fn process_line(line: &str, morph: &MorphAnalyzer, cli: &Cli) -> anyhow::Result<()> {
    for token in tokenizers::simple_word_tokenize(line) {
        process_word(&token, morph, cli)?;
    }
    Ok(())
}

fn process_word(word: &str, morph: &MorphAnalyzer, cli: &Cli) -> anyhow::Result<()> {
    let mut parses = morph.parse(word);

    if cli.normal_forms {
        let json = to_json(&morph.normal_forms(word), cli.pretty)?;
        println!("{word}\t{json}");
        return Ok(());
    }

    let Some(best) = parses.first() else {
        println!("{word}\t[]");
        return Ok(());
    };

    if cli.lexeme {
        let lexeme = morph.get_lexeme(best);
        println!("{word}\t{}", to_json(&lexeme, cli.pretty)?);
        return Ok(());
    }

    if let Some(grammemes) = &cli.inflect {
        let required: Vec<String> = grammemes
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();
        print_inflected(word, morph.inflect(best, &required));
        return Ok(());
    }

    if let Some(num) = cli.agree {
        print_inflected(word, morph.make_agree_with_number(best, num));
        return Ok(());
    }

    if cli.top > 0 {
        parses.truncate(cli.top);
    }
    println!("{word}\t{}", to_json(&parses, cli.pretty)?);
    Ok(())
}

/// Print an inflection result, transferring the capitalization of the input
/// word onto the produced form.
fn print_inflected(word: &str, result: Option<rumorph_lib::Parse>) {
    match result {
        Some(parse) => {
            let restored = shapes::restore_capitalization(&parse.word, word);
            println!("{word}\t{restored}\t{}", parse.tag);
        }
        None => println!("{word}\t-"),
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("JSON serialization failed")
}
