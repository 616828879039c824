use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use reqwest::blocking::Client;

/// Downloads corpus files that are not on disk yet. Files are stored as
/// served (gzip for the public corpus); the reader decompresses on the fly.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building http client")?;
        Ok(Self { client })
    }

    /// Returns `true` when a download happened.
    pub fn download_file(&self, url: &str, path: &Path) -> anyhow::Result<bool> {
        if path.is_file() {
            tracing::info!(path = %path.display(), "file already present, not downloading");
            return Ok(false);
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        tracing::info!(url, path = %path.display(), "downloading");
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .with_context(|| format!("downloading {url}"))?;

        // a partial file must never be mistaken for a finished one
        let partial = path.with_extension("part");
        fs::write(&partial, &body).with_context(|| format!("writing {}", partial.display()))?;
        fs::rename(&partial, path)
            .with_context(|| format!("moving download into {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = body.len(), "download complete");
        Ok(true)
    }
}
