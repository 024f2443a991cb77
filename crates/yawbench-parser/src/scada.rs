use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use polars::prelude::*;
use tracing::debug;

use crate::discovery::discover_turbine_files;
use crate::errors::ParserError;
use crate::schema::{
    self, ScadaColumn, RAW_DATETIME_HEADER, SCADA_DATETIME_FORMAT, SCADA_METADATA_ROWS,
};

/// Parses and vertically concatenates every SCADA file belonging to one wind
/// farm into a single canonical table.
///
/// Rows are not deduplicated across source files; a (datetime,
/// turbine_number) pair may repeat if the source archives overlap. Files from
/// other wind farms under the same data directory are never included.
pub fn load_wind_farm(data_dir: &Path, wind_farm: &str) -> Result<DataFrame, ParserError> {
    let files: Vec<_> = discover_turbine_files(data_dir)?
        .into_iter()
        .filter(|file| file.wind_farm == wind_farm)
        .collect();

    if files.is_empty() {
        return Err(ParserError::NoDataFiles {
            wind_farm: wind_farm.to_string(),
        });
    }

    let mut combined: Option<DataFrame> = None;
    for file in &files {
        debug!(path = %file.path.display(), turbine_number = file.turbine_number, "parsing SCADA file");
        let content = fs::read_to_string(&file.path)?;
        let filename = file.path.display().to_string();
        let frame = parse_scada_file(&content, file.turbine_number, &filename)?;
        combined = Some(match combined {
            Some(acc) => acc.vstack(&frame)?,
            None => frame,
        });
    }

    // The files vector is non-empty, so at least one frame was parsed.
    combined.ok_or_else(|| ParserError::NoDataFiles {
        wind_farm: wind_farm.to_string(),
    })
}

/// Parses one raw SCADA export into the canonical schema, tagging every row
/// with `turbine_number`.
///
/// The Zenodo exports carry nine metadata lines before the header row; the
/// header selects which columns survive (extra vendor columns are dropped).
/// Empty and `NaN` measurement cells become nulls; an unparseable timestamp
/// is a hard error.
pub fn parse_scada_file(
    content: &str,
    turbine_number: i64,
    filename: &str,
) -> Result<DataFrame, ParserError> {
    let mut remainder = content;
    for _ in 0..SCADA_METADATA_ROWS {
        match remainder.find('\n') {
            Some(pos) => remainder = &remainder[pos + 1..],
            None => remainder = "",
        }
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(remainder.as_bytes());

    let headers = reader.headers()?.clone();
    let datetime_index = find_column(&headers, RAW_DATETIME_HEADER, filename)?;
    let mut measurement_indices = [0usize; ScadaColumn::ALL.len()];
    for (slot, column) in measurement_indices.iter_mut().zip(ScadaColumn::ALL) {
        *slot = find_column(&headers, column.raw_header(), filename)?;
    }

    let mut timestamps: Vec<i64> = Vec::new();
    let mut measurements: [Vec<Option<f64>>; ScadaColumn::ALL.len()] =
        std::array::from_fn(|_| Vec::new());

    for (row_index, record) in reader.records().enumerate() {
        let record = record?;
        let line_index = SCADA_METADATA_ROWS + 1 + row_index;

        let raw_timestamp = record.get(datetime_index).unwrap_or_default();
        timestamps.push(parse_timestamp(raw_timestamp, line_index)?);

        for ((values, &index), column) in measurements
            .iter_mut()
            .zip(&measurement_indices)
            .zip(ScadaColumn::ALL)
        {
            let raw = record.get(index).unwrap_or_default();
            values.push(parse_optional_f64(raw, column.raw_header(), line_index)?);
        }
    }

    let datetime = Series::new(schema::DATETIME.into(), timestamps)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;

    let height = datetime.len();
    let mut columns: Vec<Column> = Vec::with_capacity(ScadaColumn::ALL.len() + 2);
    columns.push(datetime.into());
    for (values, column) in measurements.into_iter().zip(ScadaColumn::ALL) {
        columns.push(Series::new(column.canonical_name().into(), values).into());
    }
    columns.push(Series::new(schema::TURBINE_NUMBER.into(), vec![turbine_number; height]).into());

    Ok(DataFrame::new(columns)?)
}

fn find_column(
    headers: &csv::StringRecord,
    raw_header: &'static str,
    filename: &str,
) -> Result<usize, ParserError> {
    headers
        .iter()
        .position(|header| header.trim() == raw_header)
        .ok_or_else(|| ParserError::MissingColumn {
            column: raw_header,
            filename: filename.to_string(),
        })
}

fn parse_timestamp(value: &str, line_index: usize) -> Result<i64, ParserError> {
    let trimmed = value.trim();
    NaiveDateTime::parse_from_str(trimmed, SCADA_DATETIME_FORMAT)
        .map(|dt| dt.and_utc().timestamp_micros())
        .map_err(|_| ParserError::Timestamp {
            line_index,
            value: trimmed.to_string(),
        })
}

fn parse_optional_f64(
    value: &str,
    column: &'static str,
    line_index: usize,
) -> Result<Option<f64>, ParserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ParserError::DataRow {
            line_index,
            column,
            value: trimmed.to_string(),
        })
}
