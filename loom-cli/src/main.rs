//! Loom CLI
//!
//! Parses an HTML fragment or a CSS stylesheet and prints the result.
//!
//! Usage:
//!   loom html <file>              Print the DOM tree
//!   loom css <file>               Print rules with selector specificity
//!   loom html --inline '<p>x</p>' Parse a string instead of a file
//!   loom css <file> --json        Print the parsed structure as JSON

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use loom_common::warning::{clear_warnings, recorded_warnings, set_quiet};
use loom_common::{ParseError, line_and_column};
use loom_css::{Rule, Stylesheet, parse_css};
use loom_dom::Node;
use loom_html::parse_html;
use owo_colors::OwoColorize;

#[derive(Parser)]
#[command(name = "loom", version, about = "Parse HTML or CSS and print the resulting tree")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse an HTML fragment and print its DOM tree
    Html(Input),
    /// Parse a CSS stylesheet and print its rules
    Css(Input),
}

#[derive(Args)]
struct Input {
    /// File to parse
    #[arg(required_unless_present = "inline", conflicts_with = "inline")]
    file: Option<PathBuf>,

    /// Parse this text instead of reading a file
    #[arg(long)]
    inline: Option<String>,

    /// Print the parsed structure as JSON
    #[arg(long, short)]
    json: bool,

    /// Suppress warnings about suspicious input
    #[arg(long, short)]
    quiet: bool,
}

impl Input {
    /// The source text and a label for error messages.
    fn read(&self) -> Result<(String, String)> {
        if let Some(text) = &self.inline {
            return Ok((text.clone(), "<inline>".to_string()));
        }
        let path = self
            .file
            .as_ref()
            .ok_or_else(|| anyhow!("no input file or --inline text provided"))?;
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        Ok((source, path.display().to_string()))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err:#}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    clear_warnings();
    match &cli.command {
        Command::Html(input) => {
            set_quiet(input.quiet);
            let (source, label) = input.read()?;
            let tree = parse_html(&source).map_err(|err| locate(err, &source, &label))?;
            print_html(&tree, input.json)?;
        }
        Command::Css(input) => {
            set_quiet(input.quiet);
            let (source, label) = input.read()?;
            let stylesheet = parse_css(&source).map_err(|err| locate(err, &source, &label))?;
            print_css(&stylesheet, input.json)?;
        }
    }

    let warnings = recorded_warnings().len();
    if warnings > 0 && !cli_is_quiet(cli) {
        eprintln!("{}", format!("{warnings} warning(s) reported").yellow());
    }
    Ok(())
}

fn cli_is_quiet(cli: &Cli) -> bool {
    match &cli.command {
        Command::Html(input) | Command::Css(input) => input.quiet,
    }
}

/// Attach `label:line:column` to a parse error.
fn locate(err: ParseError, source: &str, label: &str) -> anyhow::Error {
    let (line, column) = line_and_column(source, err.position());
    anyhow::Error::new(err).context(format!("{label}:{line}:{column}: parse failed"))
}

fn print_html(tree: &Node, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tree)?);
        return Ok(());
    }
    println!("{}", "=== DOM Tree ===".bold());
    print!("{tree}");
    Ok(())
}

fn print_css(stylesheet: &Stylesheet, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stylesheet)?);
        return Ok(());
    }
    println!(
        "{}",
        format!("=== Stylesheet ({} rules) ===", stylesheet.rules.len()).bold()
    );
    for (index, rule) in stylesheet.rules.iter().enumerate() {
        print_rule(index + 1, rule);
    }
    Ok(())
}

fn print_rule(number: usize, rule: &Rule) {
    println!("rule {number}");
    for selector in &rule.selectors {
        let specificity = selector.specificity();
        println!(
            "  {}  ({}, {}, {}) sum {}",
            selector.to_string().cyan(),
            specificity.a,
            specificity.b,
            specificity.c,
            specificity.sum()
        );
    }
    for declaration in &rule.declarations {
        println!("    {declaration}");
    }
}
