//! Resume text extraction. PDF only for now; the cleanup step is shared by
//! any future input format.

use std::path::Path;

use tracing::debug;

use crate::errors::AppError;

/// Extracts and cleans the text of a PDF resume.
pub fn parse_resume(path: &Path) -> Result<String, AppError> {
    let raw = pdf_extract::extract_text(path).map_err(|e| AppError::Pdf(e.to_string()))?;
    debug!(path = %path.display(), chars = raw.len(), "Extracted resume text");

    let cleaned = clean_text(&raw);
    if cleaned.is_empty() {
        return Err(AppError::Pdf(format!(
            "No text could be extracted from {}",
            path.display()
        )));
    }
    Ok(cleaned)
}

/// Cleans extracted resume text: trims every line, drops blank lines, and
/// collapses runs of two or more spaces into a single tab. The tab keeps
/// columnar resume layouts (role on the left, dates on the right) readable
/// after extraction.
pub fn clean_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(collapse_space_runs)
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_space_runs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut spaces = 0usize;
    for c in line.chars() {
        if c == ' ' {
            spaces += 1;
            continue;
        }
        match spaces {
            0 => {}
            1 => out.push(' '),
            _ => out.push('\t'),
        }
        spaces = 0;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_trims_and_drops_blank_lines() {
        let raw = "  Jane Doe  \n\n\nSoftware Engineer\n   \n";
        assert_eq!(clean_text(raw), "Jane Doe\nSoftware Engineer");
    }

    #[test]
    fn test_clean_text_collapses_space_runs_into_tab() {
        let raw = "Acme Corp      2020-2023";
        assert_eq!(clean_text(raw), "Acme Corp\t2020-2023");
    }

    #[test]
    fn test_clean_text_keeps_single_spaces() {
        let raw = "Built a billing service in Rust";
        assert_eq!(clean_text(raw), "Built a billing service in Rust");
    }

    #[test]
    fn test_clean_text_empty_input() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("\n\n"), "");
    }

    #[test]
    fn test_parse_resume_missing_file_is_pdf_error() {
        let result = parse_resume(Path::new("/nonexistent/resume.pdf"));
        assert!(matches!(result, Err(AppError::Pdf(_))));
    }
}
