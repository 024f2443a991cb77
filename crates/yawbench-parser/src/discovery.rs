use std::path::{Path, PathBuf};

use crate::errors::ParserError;

const TURBINE_FILE_PREFIX: &str = "Turbine_Data_";
const TURBINE_FILE_SUFFIX: &str = ".csv";

/// One raw SCADA export located on disk, with the metadata carried by its
/// filename already extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurbineFile {
    pub wind_farm: String,
    pub turbine_number: i64,
    pub path: PathBuf,
}

/// Finds every turbine data file under `data_dir`, in path order.
///
/// Any file matching the `Turbine_Data*.csv` glob but not the full
/// `Turbine_Data_<farm>_<turbine>_<range>.csv` naming convention is treated
/// as a data integrity failure rather than silently skipped.
pub fn discover_turbine_files(data_dir: &Path) -> Result<Vec<TurbineFile>, ParserError> {
    let pattern = data_dir.join("**").join("Turbine_Data_*.csv");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| ParserError::InvalidDataDir {
            path: data_dir.display().to_string(),
        })?;

    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry.map_err(|err| err.into_error())?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ParserError::InvalidDataDir {
                path: path.display().to_string(),
            })?;
        let (wind_farm, turbine_number) = parse_turbine_filename(filename)?;
        files.push(TurbineFile {
            wind_farm,
            turbine_number,
            path: path.clone(),
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Returns the sorted, deduplicated names of all wind farms with data on
/// disk. Sorting makes the benchmark enumeration order reproducible across
/// runs and platforms.
pub fn available_wind_farms(data_dir: &Path) -> Result<Vec<String>, ParserError> {
    let mut names: Vec<String> = discover_turbine_files(data_dir)?
        .into_iter()
        .map(|file| file.wind_farm)
        .collect();
    names.sort();
    names.dedup();
    Ok(names)
}

pub(crate) fn parse_turbine_filename(filename: &str) -> Result<(String, i64), ParserError> {
    let mismatch = || ParserError::FilenamePattern {
        filename: filename.to_string(),
    };

    let stem = filename
        .strip_prefix(TURBINE_FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(TURBINE_FILE_SUFFIX))
        .ok_or_else(mismatch)?;

    let mut parts = stem.splitn(3, '_');
    let wind_farm = parts.next().filter(|part| !part.is_empty());
    let turbine = parts.next().and_then(|part| part.parse::<i64>().ok());
    let remainder = parts.next();

    match (wind_farm, turbine, remainder) {
        (Some(wind_farm), Some(turbine_number), Some(_)) if turbine_number > 0 => {
            Ok((wind_farm.to_string(), turbine_number))
        }
        _ => Err(mismatch()),
    }
}
