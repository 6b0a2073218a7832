use flate2::read::GzDecoder;
use std::fs::File;
use std::path::Path;
use tar::Archive;
use tracing::info;

use crate::error::Result;

/// Unpacks a gzip-compressed tarball into `dest_dir`, preserving the
/// one-directory-per-site layout of the upstream archive.
pub fn unpack_archive(archive_path: &Path, dest_dir: &Path) -> Result<()> {
    info!(
        archive = %archive_path.display(),
        dest = %dest_dir.display(),
        "unpacking archive"
    );

    std::fs::create_dir_all(dest_dir)?;
    let file = File::open(archive_path)?;
    let gz = GzDecoder::new(file);
    let mut archive = Archive::new(gz);
    archive.unpack(dest_dir)?;

    Ok(())
}
