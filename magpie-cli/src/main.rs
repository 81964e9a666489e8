//! Magpie CLI: extract content from HTML with selector strings.
//!
//! Reads a document from a file, stdin, or an inline `--html` string,
//! evaluates a selector against it, and prints one result per match.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use magpie_scrape::{attrs, chroots, htmls, inner_htmls, parse, texts};
use magpie_select::parse_selector;

/// What to extract from each matched region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Concatenated text content.
    Texts,
    /// The region re-serialized as HTML.
    Html,
    /// The region's contents, outer tags dropped.
    InnerHtml,
    /// An attribute value (requires --attr).
    Attrs,
    /// An indented outline of the region's structure.
    Tree,
    /// Just the number of matches.
    Count,
}

/// Magpie, a command-line HTML extractor
#[derive(Parser, Debug)]
#[command(name = "magpie")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # All link texts in a page
    magpie texts a page.html

    # Serialized article bodies, from stdin
    curl -s https://example.com | magpie html article

    # href of every link inside list items
    magpie attrs --attr href "ul > li a" page.html

    # Class and attribute filters, JSON output
    magpie texts 'div.card[data-kind=news]' --json page.html

    # Inline input
    magpie texts a --html '<a>1</a><a>2</a>'

    # Inspect what the parser made of a messy page
    magpie tree article page.html
"#)]
struct Cli {
    /// What to print for each match
    #[arg(value_enum)]
    mode: Mode,

    /// Selector string, e.g. 'article > p.lead'
    selector: String,

    /// Path to an HTML file (stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Inline HTML instead of a file
    #[arg(long, value_name = "STRING", conflicts_with = "file")]
    html: Option<String>,

    /// Attribute name for the attrs mode
    #[arg(long, value_name = "KEY", required_if_eq("mode", "attrs"))]
    attr: Option<String>,

    /// Print results as a JSON document
    #[arg(long)]
    json: bool,
}

/// The JSON output shape.
#[derive(Serialize)]
struct Output<'a> {
    selector: &'a str,
    count: usize,
    matches: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = read_source(&cli)?;
    let selector = parse_selector(&cli.selector)
        .with_context(|| format!("invalid selector `{}`", cli.selector))?;

    let doc = parse(&source);
    let results: Vec<String> = match cli.mode {
        Mode::Texts => texts(&doc, &selector),
        Mode::Html => htmls(&doc, &selector),
        Mode::InnerHtml => inner_htmls(&doc, &selector),
        Mode::Attrs => {
            let key = cli.attr.as_deref().expect("clap enforces --attr for attrs");
            attrs(&doc, key, &selector)
        }
        Mode::Tree => chroots(&doc, &selector, |region| {
            Some(region.outline().trim_end().to_string())
        }),
        Mode::Count => htmls(&doc, &selector),
    }
    .unwrap_or_default();

    if cli.json {
        let output = Output {
            selector: &cli.selector,
            count: results.len(),
            matches: match cli.mode {
                Mode::Count => Vec::new(),
                _ => results.clone(),
            },
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if cli.mode == Mode::Count {
        println!("{}", results.len());
    } else {
        for result in &results {
            println!("{result}");
        }
    }

    if results.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

/// Load the document from --html, the file argument, or stdin.
fn read_source(cli: &Cli) -> Result<String> {
    if let Some(html) = &cli.html {
        return Ok(html.clone());
    }
    match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display())),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}
