use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};

use crate::page;

/// One fetched URL: the rendered HTML plus its derived text representation
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// URL the page was fetched from
    pub url: String,

    /// Rendered HTML source
    pub html: String,

    /// Whitespace-normalized text content
    pub text: String,
}

/// Errors surfaced by a rendering session
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to reach WebDriver at {url}: {source}")]
    Connect {
        url: String,
        source: fantoccini::error::NewSessionError,
    },

    #[error(transparent)]
    Command(#[from] fantoccini::error::CmdError),

    #[error("{0}")]
    Failed(String),
}

/// Fetches and renders one page at a time
///
/// The session behind a renderer is acquired once before the crawl starts and
/// released once when it completes, whatever happened to individual pages.
#[async_trait]
pub trait PageRenderer {
    /// Fetch and render a single URL
    async fn render(&mut self, url: &str) -> Result<RenderedPage, RenderError>;

    /// Release the underlying session
    async fn close(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Renderer backed by a WebDriver browser session
pub struct WebDriverRenderer {
    client: Option<Client>,
}

impl WebDriverRenderer {
    /// Connect to the WebDriver instance at the given URL
    pub async fn connect(webdriver_url: &str) -> Result<Self, RenderError> {
        match ClientBuilder::native().connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                Ok(Self {
                    client: Some(client),
                })
            }
            Err(source) => Err(RenderError::Connect {
                url: webdriver_url.to_string(),
                source,
            }),
        }
    }
}

#[async_trait]
impl PageRenderer for WebDriverRenderer {
    async fn render(&mut self, url: &str) -> Result<RenderedPage, RenderError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| RenderError::Failed("rendering session already closed".to_string()))?;

        client.goto(url).await?;
        let html = client.source().await?;
        let text = page::extract_text(&html);

        Ok(RenderedPage {
            url: url.to_string(),
            html,
            text,
        })
    }

    async fn close(&mut self) -> Result<(), RenderError> {
        if let Some(client) = self.client.take() {
            client.close().await?;
            ::log::debug!("Closed WebDriver session");
        }
        Ok(())
    }
}
