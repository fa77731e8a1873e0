mod collector;
mod error;
mod fetcher;
mod headers;
mod parser;
mod pipeline;
mod record;
mod table;
mod template;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use url::Url;

use crate::error::ScraperError;
use crate::fetcher::Fetcher;
use crate::pipeline::Pipeline;
use crate::table::Table;
use crate::template::{PageTemplate, DEFAULT_APPEARANCES_HEADING, DEFAULT_CONTAINER};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "wiki-character-scraper")]
#[command(about = "Scrape character biographies and appearances from a fan wiki into a table", long_about = None)]
struct Args {
    /// Index page listing the character links
    #[arg(long, default_value = "https://www.residentevildatabase.com/personagens/")]
    index_url: String,

    /// JSON file mapping HTTP header names to values
    #[arg(long, default_value = "headers.json")]
    headers: PathBuf,

    /// CSS selector of the content container on every page
    #[arg(long, default_value = DEFAULT_CONTAINER)]
    container: String,

    /// Heading whose next element lists the appearances
    #[arg(long, default_value = DEFAULT_APPEARANCES_HEADING)]
    heading: String,

    /// Output format: json, csv, or text
    #[arg(short, long, default_value = "text", value_parser = ["json", "csv", "text", "txt"])]
    format: String,

    /// Rows shown by the text format
    #[arg(long, default_value = "5")]
    head: usize,

    /// Request timeout in seconds (HTTP client default when unset)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Delay between character requests in milliseconds
    #[arg(short, long, default_value = "0")]
    delay: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long)]
    quiet: bool,

    /// Save output to file
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    let log_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = Url::parse(&args.index_url) {
        return Err(ScraperError::InvalidUrl(format!("{}: {}", args.index_url, e)).into());
    }

    let headers = headers::load_headers(&args.headers)?;
    let fetcher = Fetcher::new(headers, args.timeout.map(Duration::from_secs))?;
    let template = PageTemplate::new(&args.container, &args.heading)?;
    let pipeline = Pipeline::new(fetcher, template, Duration::from_millis(args.delay));

    let table = pipeline.run(&args.index_url).await?;

    output_results(&table, &args)?;

    log::info!("Scraped {} character(s) into {} column(s)", table.height(), table.width());
    Ok(())
}

/// Output the table in the requested format
fn output_results(table: &Table, args: &Args) -> Result<()> {
    let output_str = match args.format.to_lowercase().as_str() {
        "json" => table.to_json()?,
        "csv" => table.to_csv()?,
        "text" | "txt" => table.to_text(args.head),
        other => {
            log::error!("Unknown format: {}", other);
            return Err(anyhow::anyhow!(
                "Unknown format '{}'. Use: json, csv, or text",
                other
            ));
        }
    };

    // Write to file or stdout
    if let Some(output_file) = &args.output {
        std::fs::write(output_file, &output_str)?;
        log::info!("Output saved to: {}", output_file);
    } else if !args.quiet {
        println!("{}", output_str);
    }

    Ok(())
}
