use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::error::{ProcessingError, Result};

/// Downloads the MAN tarball to `dest_dir`, returning the saved path.
///
/// A failed fetch aborts the current run; the caller retries manually later.
pub async fn fetch_archive(url: &str, dest_dir: &Path) -> Result<PathBuf> {
    info!(url, "fetching MAN archive");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(600))
        .build()?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProcessingError::Download(format!(
            "server responded with {status} for {url}"
        )));
    }

    let bytes = response.bytes().await?;
    info!(bytes = bytes.len(), "archive downloaded");

    std::fs::create_dir_all(dest_dir)?;
    let file_name = url.rsplit('/').next().unwrap_or("man_archive.tar.gz");
    let dest = dest_dir.join(file_name);
    std::fs::write(&dest, &bytes)?;

    Ok(dest)
}
