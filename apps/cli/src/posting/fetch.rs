//! Posting fetch: plain HTTP GET plus visible-text extraction. No JavaScript
//! rendering; static HTML only.

use scraper::{Html, Node};
use tracing::debug;

use crate::errors::AppError;

/// Browser-like User-Agent; plenty of job boards reject obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Subtrees that never contribute visible text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "head", "template"];

/// Builds the HTTP client used for posting fetches. The timeout applies to
/// the whole request; a slow job board fails the run rather than hanging it.
pub fn build_http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
}

/// Fetches a posting URL and returns its visible text, one text node per
/// line. Non-2xx responses are fatal.
pub async fn scrape_posting(http: &reqwest::Client, url: &str) -> Result<String, AppError> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::FetchStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let html = response.text().await?;
    debug!(url, bytes = html.len(), "Fetched posting HTML");

    Ok(visible_text(&html))
}

/// Extracts the document's visible text: every text node whose ancestors
/// include none of the skipped elements, separated by newlines.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(el) => SKIPPED_ELEMENTS.contains(&el.name()),
            _ => false,
        });
        if !hidden {
            out.push_str(text);
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_extracts_body_content() {
        let html = "<html><body><h1>Backend Engineer</h1><p>We are hiring now.</p></body></html>";
        let text = visible_text(html);
        assert!(text.contains("Backend Engineer"));
        assert!(text.contains("We are hiring now."));
    }

    #[test]
    fn test_visible_text_skips_script_and_style() {
        let html = r#"<html><head><style>body { color: red; }</style></head>
            <body><script>var tracking = "id";</script><p>Apply today to join us.</p></body></html>"#;
        let text = visible_text(html);
        assert!(text.contains("Apply today to join us."));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("tracking"));
    }

    #[test]
    fn test_visible_text_separates_nodes_with_newlines() {
        let html = "<body><div>First block</div><div>Second block</div></body>";
        let text = visible_text(html);
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines, vec!["First block", "Second block"]);
    }

    #[test]
    fn test_visible_text_empty_document() {
        assert!(visible_text("").trim().is_empty());
    }
}
