//! Benchmark case enumeration and execution.
//!
//! The runner owns the cross-product sweep over (wind farm x filterer x
//! wind-speed estimator x yaw-error estimator). Failures are contained per
//! case and per turbine so one bad combination cannot abort the rest of the
//! matrix; every failure is logged with its full case identity.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use polars::prelude::*;
use tracing::{error, info};

use crate::error::{BenchmarkError, Result};
use crate::processing;
use crate::registry::{
    ComponentKind, DataFilterer, Registry, WindSpeedEstimator, YawErrorEstimator,
};
use crate::schema;

/// One combination of the benchmark dimensions. Materialized lazily by the
/// enumerator, consumed once, and discarded.
#[derive(Clone)]
pub struct BenchmarkCase {
    pub wind_farm: String,
    pub filterer: Arc<dyn DataFilterer>,
    pub wind_speed_estimator: Arc<dyn WindSpeedEstimator>,
    pub yaw_error_estimator: Arc<dyn YawErrorEstimator>,
}

impl BenchmarkCase {
    pub fn id(&self) -> CaseId {
        CaseId {
            wind_farm: self.wind_farm.clone(),
            filterer: self.filterer.name(),
            wind_speed_estimator: self.wind_speed_estimator.name(),
            yaw_error_estimator: self.yaw_error_estimator.name(),
        }
    }
}

/// The four names identifying a case in logs and failure reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseId {
    pub wind_farm: String,
    pub filterer: &'static str,
    pub wind_speed_estimator: &'static str,
    pub yaw_error_estimator: &'static str,
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wind_farm={} filterer={} wind_speed_estimator={} yaw_error_estimator={}",
            self.wind_farm, self.filterer, self.wind_speed_estimator, self.yaw_error_estimator
        )
    }
}

/// Yaw-error estimate for one turbine within one case.
#[derive(Debug, Clone)]
pub struct TurbineResult {
    pub turbine_number: i64,
    pub yaw_error_estimate: DataFrame,
}

/// Outcome of one case: the per-turbine estimates that succeeded plus the
/// number of turbines whose estimators failed.
#[derive(Debug, Clone, Default)]
pub struct CaseReport {
    pub results: Vec<TurbineResult>,
    pub turbines_failed: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cases_completed: usize,
    pub cases_failed: usize,
    pub turbines_failed: usize,
}

/// Lazily enumerates the full Cartesian product of benchmark dimensions.
///
/// Nesting order is wind farm outermost, then filterer, then wind-speed
/// estimator, then yaw-error estimator innermost; each dimension iterates in
/// its source order (farms as given, components in registration order), so
/// the sweep is deterministic for a given registry and farm list.
pub fn enumerate_cases<'r>(
    registry: &'r Registry,
    wind_farms: &'r [String],
) -> impl Iterator<Item = BenchmarkCase> + 'r {
    wind_farms.iter().flat_map(move |wind_farm| {
        registry.data_filterers().iter().flat_map(move |filterer| {
            registry
                .wind_speed_estimators()
                .iter()
                .flat_map(move |wind_speed_estimator| {
                    registry
                        .yaw_error_estimators()
                        .iter()
                        .map(move |yaw_error_estimator| BenchmarkCase {
                            wind_farm: wind_farm.clone(),
                            filterer: Arc::clone(filterer),
                            wind_speed_estimator: Arc::clone(wind_speed_estimator),
                            yaw_error_estimator: Arc::clone(yaw_error_estimator),
                        })
                })
        })
    })
}

/// Runs the complete benchmark matrix over every wind farm with data under
/// `data_dir`.
///
/// Each farm is ingested and processed once; every case then works on its
/// own clone of the processed table. A farm whose ingestion fails has all of
/// its cases counted as failed and the sweep moves on.
pub fn run_benchmark(registry: &Registry, data_dir: &Path) -> Result<RunSummary> {
    ensure_registered(registry)?;

    let wind_farms = crate::parser::available_wind_farms(data_dir)?;
    if wind_farms.is_empty() {
        return Err(BenchmarkError::Configuration(format!(
            "no SCADA data files found under '{}'",
            data_dir.display()
        )));
    }
    info!(?wind_farms, "starting benchmark matrix");

    let mut summary = RunSummary::default();
    for wind_farm in &wind_farms {
        let processed = match load_processed_table(data_dir, wind_farm) {
            Ok(table) => table,
            Err(err) => {
                let skipped = cases_per_wind_farm(registry);
                error!(%wind_farm, %err, skipped_cases = skipped, "ingestion failed, skipping wind farm");
                summary.cases_failed += skipped;
                continue;
            }
        };

        for case in enumerate_cases(registry, std::slice::from_ref(wind_farm)) {
            let case_id = case.id();
            match run_case(&case, &processed) {
                Ok(report) => {
                    info!(
                        case = %case_id,
                        turbines = report.results.len(),
                        turbines_failed = report.turbines_failed,
                        "case completed"
                    );
                    summary.cases_completed += 1;
                    summary.turbines_failed += report.turbines_failed;
                }
                Err(err) => {
                    error!(case = %case_id, %err, "case failed");
                    summary.cases_failed += 1;
                }
            }
        }
    }

    Ok(summary)
}

/// Executes one case against an already processed table: filter, then per
/// distinct turbine a wind-speed estimate followed by a yaw-error estimate.
///
/// Turbines iterate in first-appearance order of the filtered table. An
/// empty filtered table is not an error; the report simply carries no
/// results. Estimator failures are logged with the case identity and the
/// turbine id, then the remaining turbines still run.
pub fn run_case(case: &BenchmarkCase, processed: &DataFrame) -> Result<CaseReport> {
    let filtered = case.filterer.filter(processed)?;
    let turbine_numbers = distinct_turbine_numbers(&filtered)?;

    let mut report = CaseReport::default();
    for turbine_number in turbine_numbers {
        match estimate_turbine(case, &filtered, turbine_number) {
            Ok(yaw_error_estimate) => {
                info!(
                    case = %case.id(),
                    turbine_number,
                    rows = yaw_error_estimate.height(),
                    "turbine yaw error estimated"
                );
                report.results.push(TurbineResult {
                    turbine_number,
                    yaw_error_estimate,
                });
            }
            Err(err) => {
                error!(case = %case.id(), turbine_number, %err, "turbine estimation failed");
                report.turbines_failed += 1;
            }
        }
    }

    Ok(report)
}

fn estimate_turbine(
    case: &BenchmarkCase,
    filtered: &DataFrame,
    turbine_number: i64,
) -> Result<DataFrame> {
    let wind_speed_estimate = case
        .wind_speed_estimator
        .estimate(filtered, turbine_number)?;
    case.yaw_error_estimator
        .estimate(filtered, turbine_number, &wind_speed_estimate)
}

fn load_processed_table(data_dir: &Path, wind_farm: &str) -> Result<DataFrame> {
    let raw = crate::parser::load_wind_farm(data_dir, wind_farm)?;
    processing::derive_columns(&raw)
}

fn distinct_turbine_numbers(filtered: &DataFrame) -> Result<Vec<i64>> {
    let column = filtered.column(schema::TURBINE_NUMBER)?.i64()?;
    let mut seen = Vec::new();
    for turbine_number in column.into_iter().flatten() {
        if !seen.contains(&turbine_number) {
            seen.push(turbine_number);
        }
    }
    Ok(seen)
}

fn ensure_registered(registry: &Registry) -> Result<()> {
    for kind in ComponentKind::ALL {
        if registry.count(kind) == 0 {
            return Err(BenchmarkError::Configuration(format!(
                "no {} registered; the benchmark matrix would be empty",
                kind.as_str()
            )));
        }
    }
    Ok(())
}

fn cases_per_wind_farm(registry: &Registry) -> usize {
    registry.count(ComponentKind::DataFilterer)
        * registry.count(ComponentKind::WindSpeedEstimator)
        * registry.count(ComponentKind::YawErrorEstimator)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::strategies::testing::two_turbine_table;

    struct PassAllFilter;

    impl DataFilterer for PassAllFilter {
        fn name(&self) -> &'static str {
            "pass_all"
        }

        fn filter(&self, time_series: &DataFrame) -> Result<DataFrame> {
            Ok(time_series.clone())
        }
    }

    struct DropAllFilter;

    impl DataFilterer for DropAllFilter {
        fn name(&self) -> &'static str {
            "drop_all"
        }

        fn filter(&self, time_series: &DataFrame) -> Result<DataFrame> {
            Ok(time_series.clear())
        }
    }

    /// Always returns turbine 1's wind speed series, whatever the target.
    #[derive(Default)]
    struct TurbineOneWindSpeed {
        calls: AtomicUsize,
    }

    impl WindSpeedEstimator for TurbineOneWindSpeed {
        fn name(&self) -> &'static str {
            "turbine_one_wind_speed"
        }

        fn estimate(&self, time_series: &DataFrame, _turbine_number: i64) -> Result<DataFrame> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let estimate = time_series
                .clone()
                .lazy()
                .filter(col(schema::TURBINE_NUMBER).eq(lit(1i64)))
                .select([col(schema::DATETIME), col(schema::WIND_SPEED)])
                .collect()?;
            Ok(estimate)
        }
    }

    /// Returns its wind-speed input unchanged.
    #[derive(Default)]
    struct PassThroughYawError {
        calls: AtomicUsize,
    }

    impl YawErrorEstimator for PassThroughYawError {
        fn name(&self) -> &'static str {
            "pass_through_yaw_error"
        }

        fn estimate(
            &self,
            _time_series: &DataFrame,
            _turbine_number: i64,
            wind_speed_estimate: &DataFrame,
        ) -> Result<DataFrame> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(wind_speed_estimate.clone())
        }
    }

    struct FailingYawError;

    impl YawErrorEstimator for FailingYawError {
        fn name(&self) -> &'static str {
            "failing_yaw_error"
        }

        fn estimate(
            &self,
            _time_series: &DataFrame,
            _turbine_number: i64,
            _wind_speed_estimate: &DataFrame,
        ) -> Result<DataFrame> {
            Err(BenchmarkError::Strategy {
                strategy: self.name(),
                message: "deliberate failure".to_string(),
            })
        }
    }

    fn scenario_registry() -> (
        Registry,
        Arc<TurbineOneWindSpeed>,
        Arc<PassThroughYawError>,
    ) {
        let wind_speed = Arc::new(TurbineOneWindSpeed::default());
        let yaw_error = Arc::new(PassThroughYawError::default());

        let mut registry = Registry::new();
        registry.register_data_filterer(Arc::new(PassAllFilter));
        registry.register_wind_speed_estimator(Arc::clone(&wind_speed) as Arc<dyn WindSpeedEstimator>);
        registry.register_yaw_error_estimator(Arc::clone(&yaw_error) as Arc<dyn YawErrorEstimator>);
        (registry, wind_speed, yaw_error)
    }

    #[test]
    fn enumerates_the_full_cartesian_product_in_nesting_order() {
        let mut registry = Registry::new();
        registry.register_data_filterer(Arc::new(PassAllFilter));
        registry.register_data_filterer(Arc::new(DropAllFilter));
        registry.register_wind_speed_estimator(Arc::new(TurbineOneWindSpeed::default()));
        registry.register_yaw_error_estimator(Arc::new(PassThroughYawError::default()));
        registry.register_yaw_error_estimator(Arc::new(FailingYawError));

        let wind_farms = vec!["Alpha".to_string(), "Bravo".to_string()];
        let ids: Vec<CaseId> = enumerate_cases(&registry, &wind_farms)
            .map(|case| case.id())
            .collect();

        // |W| * |F| * |S| * |Y| with no duplicates or omissions.
        assert_eq!(ids.len(), 2 * 2 * 1 * 2);

        let flattened: Vec<(String, &str, &str)> = ids
            .into_iter()
            .map(|id| (id.wind_farm, id.filterer, id.yaw_error_estimator))
            .collect();
        assert_eq!(
            flattened,
            [
                ("Alpha".to_string(), "pass_all", "pass_through_yaw_error"),
                ("Alpha".to_string(), "pass_all", "failing_yaw_error"),
                ("Alpha".to_string(), "drop_all", "pass_through_yaw_error"),
                ("Alpha".to_string(), "drop_all", "failing_yaw_error"),
                ("Bravo".to_string(), "pass_all", "pass_through_yaw_error"),
                ("Bravo".to_string(), "pass_all", "failing_yaw_error"),
                ("Bravo".to_string(), "drop_all", "pass_through_yaw_error"),
                ("Bravo".to_string(), "drop_all", "failing_yaw_error"),
            ]
        );
    }

    #[test]
    fn two_turbine_scenario_invokes_yaw_estimator_once_per_turbine() {
        let (registry, wind_speed, yaw_error) = scenario_registry();
        let wind_farms = vec!["Kelmarsh".to_string()];
        let table = two_turbine_table();

        let cases: Vec<BenchmarkCase> = enumerate_cases(&registry, &wind_farms).collect();
        assert_eq!(cases.len(), 1);

        let report = run_case(&cases[0], &table).expect("case failed");

        assert_eq!(yaw_error.calls.load(Ordering::SeqCst), 2);
        assert_eq!(wind_speed.calls.load(Ordering::SeqCst), 2);
        assert_eq!(report.turbines_failed, 0);

        // Both turbines' outputs equal turbine 1's own wind speed series.
        let expected = TurbineOneWindSpeed::default()
            .estimate(&table, 1)
            .expect("expected series");
        let turbines: Vec<i64> = report
            .results
            .iter()
            .map(|result| result.turbine_number)
            .collect();
        assert_eq!(turbines, [1, 2]);
        for result in &report.results {
            assert!(result.yaw_error_estimate.equals_missing(&expected));
        }
    }

    #[test]
    fn empty_filter_output_runs_zero_estimator_invocations() {
        let wind_speed = Arc::new(TurbineOneWindSpeed::default());
        let case = BenchmarkCase {
            wind_farm: "Kelmarsh".to_string(),
            filterer: Arc::new(DropAllFilter),
            wind_speed_estimator: Arc::clone(&wind_speed) as Arc<dyn WindSpeedEstimator>,
            yaw_error_estimator: Arc::new(PassThroughYawError::default()),
        };

        let report = run_case(&case, &two_turbine_table()).expect("case failed");

        assert!(report.results.is_empty());
        assert_eq!(report.turbines_failed, 0);
        assert_eq!(wind_speed.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn turbine_failures_are_contained_within_the_case() {
        let case = BenchmarkCase {
            wind_farm: "Kelmarsh".to_string(),
            filterer: Arc::new(PassAllFilter),
            wind_speed_estimator: Arc::new(TurbineOneWindSpeed::default()),
            yaw_error_estimator: Arc::new(FailingYawError),
        };

        let report = run_case(&case, &two_turbine_table()).expect("case-level failure");

        assert!(report.results.is_empty());
        assert_eq!(report.turbines_failed, 2);
    }

    #[test]
    fn turbines_iterate_in_first_appearance_order() {
        let table = two_turbine_table();
        // Reverse the row order so turbine 2 appears first.
        let reversed = table.reverse();
        let turbines = distinct_turbine_numbers(&reversed).expect("distinct failed");
        assert_eq!(turbines, [2, 1]);
    }

    #[test]
    fn empty_registry_kind_is_a_configuration_error() {
        let mut registry = Registry::new();
        registry.register_data_filterer(Arc::new(PassAllFilter));

        let err = ensure_registered(&registry).expect_err("expected configuration error");
        assert!(matches!(err, BenchmarkError::Configuration(_)));
    }
}
