//! Registry of the pluggable assessment components.
//!
//! The registry is an explicit value constructed once at startup and handed
//! to the runner by reference. Registration order is preserved and doubles as
//! the benchmark enumeration order. Duplicate registrations are legal; the
//! runner logs every case with all four component names, so duplicated
//! entries stay attributable in the output.

use std::sync::Arc;

use polars::prelude::DataFrame;

use crate::error::Result;
use crate::strategies::{
    BasicPitchAngleFilter, CurveFitYawError, MeanOtherTurbineWindSpeed, OwnTurbineWindSpeed,
};

/// Reduces a full time-series table to the rows worth assessing. The output
/// keeps the input schema.
pub trait DataFilterer: Send + Sync {
    fn name(&self) -> &'static str;
    fn filter(&self, time_series: &DataFrame) -> Result<DataFrame>;
}

/// Estimates the wind speed seen by one turbine. The output frame has two
/// columns: `datetime` and `wind_speed`.
pub trait WindSpeedEstimator: Send + Sync {
    fn name(&self) -> &'static str;
    fn estimate(&self, time_series: &DataFrame, turbine_number: i64) -> Result<DataFrame>;
}

/// Estimates a turbine's yaw error from the filtered table and a wind-speed
/// estimate. The output frame has two columns: `datetime` and `yaw_error`.
pub trait YawErrorEstimator: Send + Sync {
    fn name(&self) -> &'static str;
    fn estimate(
        &self,
        time_series: &DataFrame,
        turbine_number: i64,
        wind_speed_estimate: &DataFrame,
    ) -> Result<DataFrame>;
}

/// The closed set of component kinds a registry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    DataFilterer,
    WindSpeedEstimator,
    YawErrorEstimator,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::DataFilterer,
        ComponentKind::WindSpeedEstimator,
        ComponentKind::YawErrorEstimator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::DataFilterer => "data_filterer",
            ComponentKind::WindSpeedEstimator => "wind_speed_estimator",
            ComponentKind::YawErrorEstimator => "yaw_error_estimator",
        }
    }
}

#[derive(Default, Clone)]
pub struct Registry {
    data_filterers: Vec<Arc<dyn DataFilterer>>,
    wind_speed_estimators: Vec<Arc<dyn WindSpeedEstimator>>,
    yaw_error_estimators: Vec<Arc<dyn YawErrorEstimator>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The explicit bootstrap: every shipped strategy, registered in a fixed
    /// order. Adding a strategy means one new impl and one line here.
    pub fn with_builtin_strategies() -> Self {
        let mut registry = Self::new();
        registry.register_data_filterer(Arc::new(BasicPitchAngleFilter));
        registry.register_wind_speed_estimator(Arc::new(OwnTurbineWindSpeed));
        registry.register_wind_speed_estimator(Arc::new(MeanOtherTurbineWindSpeed));
        registry.register_yaw_error_estimator(Arc::new(CurveFitYawError));
        registry
    }

    pub fn register_data_filterer(&mut self, filterer: Arc<dyn DataFilterer>) {
        self.data_filterers.push(filterer);
    }

    pub fn register_wind_speed_estimator(&mut self, estimator: Arc<dyn WindSpeedEstimator>) {
        self.wind_speed_estimators.push(estimator);
    }

    pub fn register_yaw_error_estimator(&mut self, estimator: Arc<dyn YawErrorEstimator>) {
        self.yaw_error_estimators.push(estimator);
    }

    /// Registered filterers, in registration order. Empty when none exist.
    pub fn data_filterers(&self) -> &[Arc<dyn DataFilterer>] {
        &self.data_filterers
    }

    pub fn wind_speed_estimators(&self) -> &[Arc<dyn WindSpeedEstimator>] {
        &self.wind_speed_estimators
    }

    pub fn yaw_error_estimators(&self) -> &[Arc<dyn YawErrorEstimator>] {
        &self.yaw_error_estimators
    }

    pub fn count(&self, kind: ComponentKind) -> usize {
        match kind {
            ComponentKind::DataFilterer => self.data_filterers.len(),
            ComponentKind::WindSpeedEstimator => self.wind_speed_estimators.len(),
            ComponentKind::YawErrorEstimator => self.yaw_error_estimators.len(),
        }
    }
}
