//! Downloads the benchmark datasets and extracts SCADA archives.
//!
//! All network I/O lives here, outside the benchmark core. Downloads are
//! skipped for files already on disk, and transient HTTP failures are retried
//! with linear backoff at this boundary only.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::datasets::{self, DatasetSpecification, DATASETS};
use crate::error::Result;

const DOWNLOAD_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_secs(5);

/// Ensures every file of every cataloged dataset exists under `output_dir`.
pub fn collect_all(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    for dataset in DATASETS {
        collect_dataset(dataset, output_dir)?;
    }
    Ok(())
}

/// Collects the KMZ layout file and every SCADA archive of one dataset.
pub fn collect_dataset(dataset: &DatasetSpecification, output_dir: &Path) -> Result<()> {
    collect_file(dataset.kmz_filename, dataset.zenodo_record_url, output_dir)?;
    for archive_filename in dataset.scada_archive_filenames {
        collect_file(archive_filename, dataset.zenodo_record_url, output_dir)?;
    }
    Ok(())
}

/// Downloads one file from a Zenodo record unless it is already present.
///
/// ZIP archives are extracted into `output_dir` and the archive file deleted
/// afterwards, so an already-extracted archive is downloaded again on the
/// next run; keep the archive list small or re-run with the data in place.
pub fn collect_file(filename: &str, zenodo_record_url: &str, output_dir: &Path) -> Result<()> {
    let target = output_dir.join(filename);
    if target.is_file() {
        debug!(filename, "file already collected; skipping download");
        return Ok(());
    }

    let url = datasets::zenodo_file_url(zenodo_record_url, filename);
    info!(%url, "downloading benchmark data file");
    download_with_retry(&url, &target)?;

    let is_zip = target
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if is_zip {
        extract_archive(&target, output_dir)?;
        fs::remove_file(&target)?;
    }

    Ok(())
}

fn download_with_retry(url: &str, target: &Path) -> Result<()> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match download_file(url, target) {
            Ok(()) => return Ok(()),
            Err(err) => {
                // Drop any partially written file before retrying.
                let _ = fs::remove_file(target);
                if attempt >= DOWNLOAD_ATTEMPTS {
                    return Err(err);
                }
                warn!(%url, attempt, "download failed, retrying: {err}");
                thread::sleep(RETRY_BACKOFF * attempt);
            }
        }
    }
}

fn download_file(url: &str, target: &Path) -> Result<()> {
    let mut response = reqwest::blocking::get(url)?.error_for_status()?;
    let mut file = fs::File::create(target)?;
    response.copy_to(&mut file)?;
    Ok(())
}

pub(crate) fn extract_archive(archive_path: &Path, output_dir: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    info!(
        archive = %archive_path.display(),
        files = archive.len(),
        "extracting SCADA archive"
    );
    archive.extract(output_dir)?;
    Ok(())
}
