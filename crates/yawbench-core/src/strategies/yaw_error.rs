use polars::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::registry::YawErrorEstimator;
use crate::schema;

/// Baseline yaw error estimator.
///
/// TODO: replace the pass-through with an actual power-curve fit per yaw
/// sector; for now this only exercises the benchmark plumbing end to end.
pub struct CurveFitYawError;

impl YawErrorEstimator for CurveFitYawError {
    fn name(&self) -> &'static str {
        "curve_fit_yaw_error"
    }

    fn estimate(
        &self,
        time_series: &DataFrame,
        turbine_number: i64,
        wind_speed_estimate: &DataFrame,
    ) -> Result<DataFrame> {
        debug!(
            rows = time_series.height(),
            turbine_number,
            "estimating yaw error"
        );

        let estimate = wind_speed_estimate
            .clone()
            .lazy()
            .select([
                col(schema::DATETIME),
                col(schema::WIND_SPEED).alias(schema::YAW_ERROR),
            ])
            .collect()?;
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WindSpeedEstimator;
    use crate::strategies::testing::two_turbine_table;
    use crate::strategies::OwnTurbineWindSpeed;

    #[test]
    fn relabels_the_wind_speed_estimate_as_yaw_error() {
        let table = two_turbine_table();
        let wind_speed = OwnTurbineWindSpeed
            .estimate(&table, 1)
            .expect("wind speed estimate failed");

        let estimate = CurveFitYawError
            .estimate(&table, 1, &wind_speed)
            .expect("yaw estimate failed");

        assert_eq!(
            estimate.get_column_names_str(),
            [schema::DATETIME, schema::YAW_ERROR]
        );
        assert_eq!(estimate.height(), wind_speed.height());
    }
}
