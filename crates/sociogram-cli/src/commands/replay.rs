//! Replay a chat log through the engine.
//!
//! The engine expects normalized text, so this command owns the
//! protocol-side cleanup: mIRC formatting and color codes are stripped
//! from every message before it reaches the heuristics.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sociogram::prelude::*;
use std::path::Path;

use crate::config::Config;

pub fn run(log: &str, channel: Option<&str>, verbose: bool) -> Result<()> {
    let log = Path::new(log);
    if !log.exists() {
        bail!("Log file does not exist: {}", log.display());
    }

    let config = Config::load()?;
    let sink = JsonSnapshotWriter::new(
        &config.engine.output_dir,
        config.engine.create_archive,
        config.engine.create_current,
    );
    let mut network =
        Network::new(config.engine.clone(), Box::new(sink)).with_ignored(&config.ignore);

    let content = std::fs::read_to_string(log)
        .with_context(|| format!("Failed to read log: {}", log.display()))?;
    let lines: Vec<&str> = content.lines().collect();

    println!(
        "{} Replaying {} lines...",
        "→".blue(),
        lines.len().to_string().cyan()
    );

    let pb = ProgressBar::new(lines.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut skipped = 0usize;
    for line in &lines {
        match parse_line(line, channel) {
            Some((chan, nick, text)) => {
                let message = strip_formatting(text);
                if verbose {
                    pb.set_message(format!("{chan} <{nick}>"));
                }
                network.observe_message(chan, nick, &message);
            }
            None => {
                if !line.trim().is_empty() {
                    skipped += 1;
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    println!();
    println!("{} Replay complete!", "✓".green().bold());
    for (channel, stats) in network.stats() {
        println!("  {}: {}", channel.cyan(), stats);
    }
    if skipped > 0 {
        println!(
            "  {} unparseable lines skipped{}",
            skipped.to_string().yellow(),
            if channel.is_none() {
                " (two-column logs need --channel)"
            } else {
                ""
            }
        );
    }

    Ok(())
}

/// One log line: "channel<TAB>nick<TAB>message", or "nick<TAB>message"
/// with a default channel.
fn parse_line<'a>(line: &'a str, default_channel: Option<&'a str>) -> Option<(&'a str, &'a str, &'a str)> {
    let mut fields = line.splitn(3, '\t');
    let first = fields.next()?;
    let second = fields.next()?;
    match fields.next() {
        Some(message) => Some((first, second, message)),
        None => default_channel.map(|channel| (channel, first, second)),
    }
}

/// Strip mIRC formatting and color control codes.
///
/// Handles bold (0x02), color (0x03 with up to "NN,NN" digits), reset
/// (0x0F), reverse (0x16), italic (0x1D), strikethrough (0x1E), and
/// underline (0x1F).
pub fn strip_formatting(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut chars = message.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\u{2}' | '\u{f}' | '\u{16}' | '\u{1d}' | '\u{1e}' | '\u{1f}' => {}
            '\u{3}' => {
                let mut digits = 0;
                while digits < 2 && chars.peek().is_some_and(|d| d.is_ascii_digit()) {
                    chars.next();
                    digits += 1;
                }
                // A comma only belongs to the code when digits follow it.
                if digits > 0 && chars.peek() == Some(&',') {
                    let mut lookahead = chars.clone();
                    lookahead.next();
                    if lookahead.peek().is_some_and(|d| d.is_ascii_digit()) {
                        chars.next();
                        let mut background = 0;
                        while background < 2 && chars.peek().is_some_and(|d| d.is_ascii_digit()) {
                            chars.next();
                            background += 1;
                        }
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_column_lines_carry_their_channel() {
        assert_eq!(
            parse_line("#rust\talice\tbob: hi", None),
            Some(("#rust", "alice", "bob: hi"))
        );
    }

    #[test]
    fn two_column_lines_need_a_default_channel() {
        assert_eq!(
            parse_line("alice\tbob: hi", Some("#rust")),
            Some(("#rust", "alice", "bob: hi"))
        );
        assert_eq!(parse_line("alice\tbob: hi", None), None);
    }

    #[test]
    fn messages_may_contain_tabs() {
        assert_eq!(
            parse_line("#rust\talice\tcol1\tcol2", None),
            Some(("#rust", "alice", "col1\tcol2"))
        );
    }

    #[test]
    fn strips_simple_toggles() {
        assert_eq!(strip_formatting("\u{2}bold\u{2} and \u{1f}under\u{1f}"), "bold and under");
        assert_eq!(strip_formatting("plain text"), "plain text");
    }

    #[test]
    fn strips_color_codes_with_digits() {
        assert_eq!(strip_formatting("\u{3}4red\u{3} done"), "red done");
        assert_eq!(strip_formatting("\u{3}12,04text\u{f}"), "text");
    }

    #[test]
    fn bare_comma_after_color_code_is_kept() {
        assert_eq!(strip_formatting("\u{3}3green, then text"), "green, then text");
    }
}
