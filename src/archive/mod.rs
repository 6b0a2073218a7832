pub mod extract;
pub mod fetch;

pub use extract::unpack_archive;
pub use fetch::fetch_archive;

use std::path::Path;
use tracing::info;

use crate::error::Result;

/// Makes sure the source directory holds unpacked MAN data, downloading and
/// unpacking the upstream tarball when it does not. The tarball itself is
/// removed after a successful unpack.
pub async fn ensure_source_data(url: &str, source_dir: &Path) -> Result<bool> {
    let populated = source_dir.is_dir()
        && std::fs::read_dir(source_dir)?.next().is_some();
    if populated {
        info!(dir = %source_dir.display(), "source directory already populated, skipping download");
        return Ok(false);
    }

    let tarball = fetch_archive(url, source_dir).await?;
    unpack_archive(&tarball, source_dir)?;
    std::fs::remove_file(&tarball)?;
    Ok(true)
}
