use polars::prelude::*;

use crate::error::Result;
use crate::registry::DataFilterer;
use crate::schema;

const PITCH_ANGLE_MIN_DEG: f64 = -1.5;
const PITCH_ANGLE_MAX_DEG: f64 = 1.5;

/// Keeps rows whose pitch angle lies strictly between -1.5 and 1.5 degrees,
/// the band where the blades are close to fully powered operation.
pub struct BasicPitchAngleFilter;

impl DataFilterer for BasicPitchAngleFilter {
    fn name(&self) -> &'static str {
        "basic_pitch_angle_filter"
    }

    fn filter(&self, time_series: &DataFrame) -> Result<DataFrame> {
        let filtered = time_series
            .clone()
            .lazy()
            .filter(
                col(schema::PITCH_ANGLE)
                    .gt(lit(PITCH_ANGLE_MIN_DEG))
                    .and(col(schema::PITCH_ANGLE).lt(lit(PITCH_ANGLE_MAX_DEG))),
            )
            .collect()?;
        Ok(filtered)
    }
}
