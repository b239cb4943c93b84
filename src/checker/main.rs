//! Standalone checker for saved model answers.
//!
//! Runs a passage answer through the same parser the bot uses and reports
//! which labeled fields were found, so prompt changes can be checked
//! offline against real model output.

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;

use scripture_bot::devotional::{PRAYER_MARKER, format_prayer, parse_passage};
use scripture_bot::generation::PassageField;

/// Explanation length the passage prompt asks for, in words.
const EXPLANATION_WORDS: std::ops::RangeInclusive<usize> = 80..=150;

/// Model answer checker.
#[derive(Parser, Debug)]
#[command(name = "check_response")]
#[command(about = "Checks a saved model answer against the labeled passage format")]
#[command(version)]
struct Args {
    /// Path to the saved answer, or "-" to read from stdin.
    #[arg(short, long, default_value = "-")]
    file: String,

    /// Treat the input as a prayer answer instead of a passage answer.
    #[arg(short, long)]
    prayer: bool,

    /// Show the parsed value of each field.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let raw = match read_input(&args.file) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("✗ Failed to read {}: {e}", args.file);
            return ExitCode::FAILURE;
        }
    };

    if args.prayer {
        check_prayer(&raw)
    } else {
        check_passage(&raw, args.verbose)
    }
}

fn read_input(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}

fn check_prayer(raw: &str) -> ExitCode {
    let text = raw.trim();
    let formatted = format_prayer(text);

    println!("Checking prayer ({} chars)\n", text.chars().count());

    if formatted == text {
        println!("✓ Prayer starts and ends with {PRAYER_MARKER}");
    } else {
        println!("⚠ Markers were added:");
        println!("  {formatted}");
    }

    ExitCode::SUCCESS
}

fn check_passage(raw: &str, verbose: bool) -> ExitCode {
    println!("Checking passage answer ({} chars)\n", raw.chars().count());

    let passage = parse_passage(raw);
    let mut warnings = 0;

    for field in PassageField::ALL {
        if passage.missing.contains(&field) {
            println!("✗ {field}: label not found");
            continue;
        }

        let value = passage.field(field);
        if value.is_empty() {
            warnings += 1;
            println!("⚠ {field}: label present but empty");
        } else {
            println!("✓ {field}");
        }

        if verbose {
            println!("  \"{}\"", truncate(value, 60));
        }
    }

    if !passage.missing.contains(&PassageField::Explanation) {
        let words = passage.explanation.split_whitespace().count();
        if !EXPLANATION_WORDS.contains(&words) {
            warnings += 1;
            println!(
                "⚠ Explanation has {words} words (asked for {}-{})",
                EXPLANATION_WORDS.start(),
                EXPLANATION_WORDS.end()
            );
        }
    }

    println!();

    let missing = passage.missing.len();
    if missing == 0 {
        println!("✓ All {} fields found!", PassageField::ALL.len());
        if warnings > 0 {
            println!("  ({warnings} warning(s))");
        }
        ExitCode::SUCCESS
    } else {
        println!(
            "✗ {missing} of {} fields missing; the bot would show placeholders",
            PassageField::ALL.len()
        );
        ExitCode::FAILURE
    }
}

/// Truncates a string for display.
fn truncate(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_owned()
    } else {
        format!("{}...", chars[..max_len].iter().collect::<String>())
    }
}
