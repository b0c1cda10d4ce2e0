use regex::Regex;
use scraper::{Html, Selector};

/// Extensions that mark a URL as an image asset
const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

/// Checks if the URL points to an image based on its extension (case-insensitive)
pub fn is_image_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Extracts the text of the first level-1 heading, whitespace-collapsed
pub fn extract_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let heading_selector = Selector::parse("h1").unwrap();

    doc.select(&heading_selector).next().map(|heading| {
        heading
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Extracts whitespace-normalized body text, the representation uploaded to storage
pub fn extract_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let body_selector = Selector::parse("body").unwrap();

    doc.select(&body_selector)
        .flat_map(|n| n.text())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts the raw href value of every anchor element carrying one
pub fn extract_links(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let links = doc
        .select(&anchor_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("Found {} anchors", links.len());
    links
}

/// Replaces characters disallowed in filenames with underscores
pub fn sanitize_title(title: &str) -> String {
    let invalid = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
    invalid.replace_all(title, "_").into_owned()
}

/// Builds the storage key for a page title: prefix, sanitized title, `.txt` suffix
pub fn storage_key(prefix: &str, title: &str) -> String {
    format!("{}{}.txt", prefix, sanitize_title(title))
}
