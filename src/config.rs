use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for one crawl session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// URL the crawl starts from
    pub start_url: String,

    /// Prefix that both scopes the crawl to a domain and resolves relative links
    pub base_url: String,

    /// Bucket receiving one text object per page
    pub bucket: String,

    /// Prefix prepended to every storage key
    #[serde(default)]
    pub key_prefix: String,

    /// Credentials profile for the storage client (default chain when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Stop after visiting this many pages (unbounded when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<usize>,
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

impl CrawlConfig {
    /// Create a new configuration with default values for the optional fields
    pub fn new(start_url: &str, base_url: &str, bucket: &str, key_prefix: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            base_url: base_url.to_string(),
            bucket: bucket.to_string(),
            key_prefix: key_prefix.to_string(),
            profile: None,
            webdriver_url: default_webdriver_url(),
            max_pages: None,
        }
    }

    /// Set the credentials profile for the storage client
    pub fn with_profile(mut self, profile: &str) -> Self {
        self.profile = Some(profile.to_string());
        self
    }

    /// Override the WebDriver URL
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.webdriver_url = url.to_string();
        self
    }

    /// Limit the crawl to a maximum number of visited pages
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = CrawlConfig::new(
            "https://wiki.example/",
            "https://wiki.example/",
            "wiki-data",
            "pages/",
        );
        assert_eq!(config.start_url, "https://wiki.example/");
        assert_eq!(config.key_prefix, "pages/");
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert!(config.profile.is_none());
        assert!(config.max_pages.is_none());
    }

    #[test]
    fn test_builder_setters() {
        let config = CrawlConfig::new("https://wiki.example/", "https://wiki.example/", "b", "")
            .with_profile("archive")
            .with_webdriver_url("http://localhost:9515")
            .with_max_pages(50);
        assert_eq!(config.profile.as_deref(), Some("archive"));
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.max_pages, Some(50));
    }

    #[test]
    fn test_from_json_applies_defaults() {
        let config = CrawlConfig::from_json(
            r#"{"start_url":"https://wiki.example/","base_url":"https://wiki.example/","bucket":"wiki-data"}"#,
        )
        .unwrap();
        assert_eq!(config.bucket, "wiki-data");
        assert_eq!(config.key_prefix, "");
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert!(config.max_pages.is_none());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join("wiki-harvest-config-test.json");
        std::fs::write(
            &path,
            r#"{"start_url":"https://wiki.example/","base_url":"https://wiki.example/","bucket":"wiki-data","max_pages":10}"#,
        )
        .unwrap();
        let config = CrawlConfig::from_file(&path).unwrap();
        assert_eq!(config.max_pages, Some(10));
        std::fs::remove_file(&path).ok();
    }
}
