use polars::prelude::*;

use crate::error::Result;
use crate::registry::WindSpeedEstimator;
use crate::schema;

/// Uses the wind speed signal reported by the turbine being assessed.
pub struct OwnTurbineWindSpeed;

impl WindSpeedEstimator for OwnTurbineWindSpeed {
    fn name(&self) -> &'static str {
        "own_turbine_wind_speed"
    }

    fn estimate(&self, time_series: &DataFrame, turbine_number: i64) -> Result<DataFrame> {
        let estimate = time_series
            .clone()
            .lazy()
            .filter(col(schema::TURBINE_NUMBER).eq(lit(turbine_number)))
            .select([col(schema::DATETIME), col(schema::WIND_SPEED)])
            .collect()?;
        Ok(estimate)
    }
}

/// Uses the per-timestamp mean wind speed across all the other turbines of
/// the wind farm, which is unaffected by the assessed turbine's own yaw
/// misalignment.
pub struct MeanOtherTurbineWindSpeed;

impl WindSpeedEstimator for MeanOtherTurbineWindSpeed {
    fn name(&self) -> &'static str {
        "mean_other_turbine_wind_speed"
    }

    fn estimate(&self, time_series: &DataFrame, turbine_number: i64) -> Result<DataFrame> {
        let estimate = time_series
            .clone()
            .lazy()
            .filter(col(schema::TURBINE_NUMBER).neq(lit(turbine_number)))
            .group_by([col(schema::DATETIME)])
            .agg([col(schema::WIND_SPEED).mean()])
            .sort([schema::DATETIME], SortMultipleOptions::default())
            .collect()?;
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testing::two_turbine_table;

    #[test]
    fn own_turbine_estimate_selects_the_target_series() {
        let table = two_turbine_table();
        let estimate = OwnTurbineWindSpeed
            .estimate(&table, 2)
            .expect("estimate failed");

        assert_eq!(
            estimate.get_column_names_str(),
            [schema::DATETIME, schema::WIND_SPEED]
        );
        let wind_speed = estimate.column(schema::WIND_SPEED).unwrap().f64().unwrap();
        let values: Vec<f64> = wind_speed.into_iter().flatten().collect();
        assert_eq!(values, [8.4, 9.2, 7.9]);
    }

    #[test]
    fn mean_other_estimate_averages_everything_but_the_target() {
        let table = two_turbine_table();
        let estimate = MeanOtherTurbineWindSpeed
            .estimate(&table, 2)
            .expect("estimate failed");

        // Only turbine 1 remains, so the mean equals its own series,
        // ordered by timestamp.
        assert_eq!(estimate.height(), 3);
        let wind_speed = estimate.column(schema::WIND_SPEED).unwrap().f64().unwrap();
        let values: Vec<f64> = wind_speed.into_iter().flatten().collect();
        assert_eq!(values, [8.0, 9.0, 7.5]);
    }
}
