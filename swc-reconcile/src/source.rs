//! Where a batch comes from: a JSON file, stdin, or the upstream feed URL

use std::path::PathBuf;

use swc_common::{Error, Result};
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchSource {
    File(PathBuf),
    Stdin,
    Url(String),
}

impl BatchSource {
    /// `-` reads stdin, `http(s)://` fetches, anything else is a file path
    pub fn parse(input: &str) -> Self {
        if input == "-" {
            BatchSource::Stdin
        } else if input.starts_with("http://") || input.starts_with("https://") {
            BatchSource::Url(input.to_string())
        } else {
            BatchSource::File(PathBuf::from(input))
        }
    }

    /// Read the whole payload as text
    pub async fn read(&self) -> Result<String> {
        match self {
            BatchSource::File(path) => {
                info!("Reading player batch from {}", path.display());
                Ok(tokio::fs::read_to_string(path).await?)
            }
            BatchSource::Stdin => {
                info!("Reading player batch from stdin");
                let mut payload = String::new();
                tokio::io::stdin().read_to_string(&mut payload).await?;
                Ok(payload)
            }
            BatchSource::Url(url) => {
                info!("Fetching player batch from {}", url);
                let response = reqwest::get(url)
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| Error::Fetch(format!("{}: {}", url, e)))?;
                response
                    .text()
                    .await
                    .map_err(|e| Error::Fetch(format!("{}: {}", url, e)))
            }
        }
    }
}
