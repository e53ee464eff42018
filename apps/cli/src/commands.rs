//! Command handlers: thin orchestration over the pipeline modules plus the
//! artifact files they read and write.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::posting::{scrape_posting, FilterPolicy, PostingFilter};
use crate::resume;
use crate::state::AppState;
use crate::tailor;

const PARSED_RESUME_FILE: &str = "parsed_resume.txt";
const FILTERED_POSTING_FILE: &str = "filtered.txt";
const SUGGESTIONS_FILE: &str = "resume_suggestions.txt";

/// Parses a resume PDF and writes its cleaned text to the data directory.
pub async fn parse(state: &AppState, file: &str) -> Result<PathBuf, AppError> {
    let pdf_path = resolve_input_path(&state.config.data_dir, file);
    if !pdf_path.exists() {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Resume file not found: {}", pdf_path.display()),
        )));
    }

    let text = resume::parse_resume(&pdf_path)?;
    let out = write_artifact(&state.config.data_dir, PARSED_RESUME_FILE, &text)?;
    info!(path = %out.display(), "Parsed resume saved");
    Ok(out)
}

/// Fetches a posting URL, filters it to relevant sentences, and writes the
/// result. An empty result is still written; the caller is warned.
pub async fn fetch(state: &AppState, url: &str) -> Result<PathBuf, AppError> {
    let started = Instant::now();

    info!(url, "Scraping posting");
    let raw_text = scrape_posting(&state.http, url).await?;

    info!("Filtering posting text");
    let policy = FilterPolicy {
        score_threshold: state.config.score_threshold,
        min_line_tokens: state.config.min_line_tokens,
        min_sentence_tokens: state.config.min_sentence_tokens,
    };
    let filter = PostingFilter::new(state.classifier.clone(), policy);
    let filtered = filter.filter_posting(&raw_text).await?;

    if filtered.is_empty() {
        warn!(url, "No relevant sentences survived filtering");
    }

    let out = write_artifact(&state.config.data_dir, FILTERED_POSTING_FILE, &filtered)?;
    info!(
        path = %out.display(),
        "Filtered posting saved in {:.2}s",
        started.elapsed().as_secs_f64()
    );
    Ok(out)
}

/// Generates tailoring suggestions from the saved resume and posting
/// artifacts, writes them, and prints them to the terminal.
pub async fn suggest(state: &AppState) -> Result<PathBuf, AppError> {
    let data_dir = &state.config.data_dir;
    let resume_text = fs::read_to_string(data_dir.join(PARSED_RESUME_FILE))?;
    let job_text = fs::read_to_string(data_dir.join(FILTERED_POSTING_FILE))?;

    let started = Instant::now();
    info!("Requesting tailoring suggestions");
    let suggestions = tailor::tailor_resume(&state.llm, &resume_text, &job_text).await?;
    let rendered = tailor::render_suggestions(&suggestions);

    let out = write_artifact(data_dir, SUGGESTIONS_FILE, &rendered)?;
    println!("\n{rendered}\n");
    info!(
        path = %out.display(),
        "Tailoring suggestions saved in {:.2}s",
        started.elapsed().as_secs_f64()
    );
    Ok(out)
}

/// Interactive end-to-end run, prompting for the resume file and posting URL.
pub async fn run(state: &AppState) -> Result<(), AppError> {
    let file = prompt("Resume PDF in the data directory (e.g. resume.pdf): ")?;
    parse(state, &file).await?;

    let url = prompt("Job posting URL: ")?;
    fetch(state, &url).await?;

    suggest(state).await?;
    Ok(())
}

fn prompt(message: &str) -> Result<String, AppError> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Resolves a user-supplied input path: an existing path is used as given,
/// anything else is looked up inside the data directory.
fn resolve_input_path(data_dir: &Path, file: &str) -> PathBuf {
    let direct = PathBuf::from(file);
    if direct.exists() {
        direct
    } else {
        data_dir.join(file)
    }
}

/// Writes an artifact as plain UTF-8, creating the data directory on demand.
fn write_artifact(data_dir: &Path, name: &str, contents: &str) -> Result<PathBuf, AppError> {
    fs::create_dir_all(data_dir)?;
    let path = data_dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_artifact_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let path = write_artifact(&data_dir, "filtered.txt", "We are hiring.").unwrap();

        assert_eq!(path, data_dir.join("filtered.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "We are hiring.");
    }

    #[test]
    fn test_write_artifact_allows_empty_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(dir.path(), "filtered.txt", "").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_resolve_input_path_prefers_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("resume.pdf");
        fs::write(&existing, b"%PDF-1.4").unwrap();

        let resolved = resolve_input_path(Path::new("data"), existing.to_str().unwrap());
        assert_eq!(resolved, existing);
    }

    #[test]
    fn test_resolve_input_path_falls_back_to_data_dir() {
        let resolved = resolve_input_path(Path::new("data"), "resume.pdf");
        assert_eq!(resolved, Path::new("data").join("resume.pdf"));
    }
}
