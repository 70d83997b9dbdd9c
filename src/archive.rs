//! Bundling rendered cards into a single ZIP archive

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{CardGenError, Result};

/// Bundle the given card files into one deflate-compressed ZIP.
///
/// Entries are named by file name only, so the archive unpacks flat.
/// An existing archive at the same path is overwritten.
///
/// # Errors
///
/// Returns `CardGenError::Archive` if the archive or any member cannot be
/// written.
pub fn bundle_cards(cards: &[PathBuf], archive_path: &Path) -> Result<()> {
    let file = File::create(archive_path)
        .map_err(|e| CardGenError::archive(format!("cannot create {}", archive_path.display()), e))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in cards {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CardGenError::Archive {
                message: format!("card path has no file name: {}", path.display()),
                source: None,
            })?;

        zip.start_file(name, options)
            .map_err(|e| CardGenError::archive("cannot start archive entry", e))?;
        let bytes = std::fs::read(path)
            .map_err(|e| CardGenError::archive(format!("cannot read {}", path.display()), e))?;
        zip.write_all(&bytes)
            .map_err(|e| CardGenError::archive("cannot write archive entry", e))?;
    }

    zip.finish()
        .map_err(|e| CardGenError::archive("cannot finalize archive", e))?;

    Ok(())
}
