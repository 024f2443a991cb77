//! Derived columns appended to the raw table before filtering and estimation.

use polars::prelude::*;

use crate::error::Result;
use crate::schema;

/// Appends the `yaw_error` ground-truth column: the circular difference of
/// nacelle direction and wind direction, normalized to (-180, 180] degrees.
///
/// Pure with respect to its input; rows where either direction is null get a
/// null yaw error.
pub fn derive_columns(time_series: &DataFrame) -> Result<DataFrame> {
    let nacelle = time_series.column(schema::NACELLE_DIRECTION)?.f64()?;
    let wind_from = time_series.column(schema::WIND_FROM_DIRECTION)?.f64()?;

    let yaw_error: Vec<Option<f64>> = nacelle
        .into_iter()
        .zip(wind_from)
        .map(|(nacelle, wind_from)| match (nacelle, wind_from) {
            (Some(nacelle), Some(wind_from)) => Some(circular_difference(nacelle, wind_from)),
            _ => None,
        })
        .collect();

    let mut out = time_series.clone();
    out.with_column(Series::new(schema::YAW_ERROR.into(), yaw_error))?;
    Ok(out)
}

/// Signed angular difference `a - b` wrapped into (-180, 180] degrees.
pub fn circular_difference(a: f64, b: f64) -> f64 {
    180.0 - (180.0 - (a - b)).rem_euclid(360.0)
}
