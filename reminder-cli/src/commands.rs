use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use extractors::{
    build_release_event, search_url, to_ics, PageAggregator, ReleaseDateExtractor,
};
use shared_types::{Candidate, ErrorResponse, PageExtraction, PageText};
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::config::AppConfig;

/// Text from `--text`, `--file`, or stdin, in that order of preference.
pub fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {:?}", path));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read text from stdin")?;
    Ok(buffer)
}

pub fn reference_date(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid reference date {:?}, expected YYYY-MM-DD", value)),
        None => Ok(Utc::now().date_naive()),
    }
}

pub fn resolve(input: &str, reference: NaiveDate, all: bool, json: bool) -> Result<()> {
    let extractor = ReleaseDateExtractor::new();

    if all {
        let candidates = extractor.candidates(input, reference);
        info!("Found {} plausible candidates", candidates.len());
        if json {
            println!("{}", serde_json::to_string_pretty(&candidates)?);
        } else {
            for candidate in &candidates {
                println!("{}", render_candidate(candidate));
            }
        }
        return Ok(());
    }

    match extractor.resolve(input, reference) {
        Some(candidate) => {
            info!(date = %candidate.canonical_date, "Release date found");
            if json {
                println!("{}", serde_json::to_string_pretty(&candidate)?);
            } else {
                println!("{}", render_candidate(&candidate));
            }
        }
        None => {
            info!("No release date found");
            if json {
                let response = ErrorResponse {
                    error: "No release date found in text".to_string(),
                };
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("No release date found.");
            }
        }
    }
    Ok(())
}

pub fn page(page: &PageText, reference: NaiveDate, config: &AppConfig, json: bool) -> Result<()> {
    let extractor = ReleaseDateExtractor::new();
    let aggregator = PageAggregator::new(&extractor, config.scoring.clone());
    let extraction = aggregator.extract(page, reference);

    if json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
    } else {
        println!("{}", render_extraction(&extraction));
    }

    if config.scoring.needs_search_fallback(&extraction) {
        let title = if extraction.title.is_empty() {
            "current page"
        } else {
            extraction.title.as_str()
        };
        let url = search_url(title, extraction.year(), &config.search)
            .context("Failed to build search URL")?;
        info!("Low confidence, offering a web search");
        println!("Search: {}", url);
    }
    Ok(())
}

pub fn event(title: &str, date: &str, ics: Option<&Path>, config: &AppConfig) -> Result<()> {
    let event = build_release_event(title, date, &config.reminders)?;

    match ics {
        Some(path) => {
            let document = to_ics(&event)?;
            std::fs::write(path, document)
                .with_context(|| format!("Failed to write calendar file {:?}", path))?;
            info!("Wrote reminder for {} to {:?}", date, path);
        }
        None => println!("{}", serde_json::to_string_pretty(&event)?),
    }
    Ok(())
}

pub fn search(title: &str, year: Option<i32>, config: &AppConfig) -> Result<()> {
    let url = search_url(title, year, &config.search).context("Failed to build search URL")?;
    println!("{}", url);
    Ok(())
}

fn render_candidate(candidate: &Candidate) -> String {
    format!(
        "{}  confidence {:.2}  [{}]  \"{}\"",
        candidate.canonical_date,
        candidate.confidence,
        candidate.pattern_label,
        candidate.context_snippet.trim()
    )
}

fn render_extraction(extraction: &PageExtraction) -> String {
    match &extraction.release_date {
        Some(date) => format!(
            "{}  confidence {:.2}  from {:?}  [{}]  \"{}\"",
            date,
            extraction.confidence,
            extraction.source.unwrap_or(shared_types::TextSource::Description),
            extraction.pattern_label,
            extraction.matched_context.trim()
        ),
        None => "No release date found on the page.".to_string(),
    }
}
