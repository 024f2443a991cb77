//! Built-in strategy implementations for each component kind.
//!
//! These are deliberately simple baselines; the runner only ever sees them
//! through the registry traits.

mod filterers;
mod wind_speed;
mod yaw_error;

pub use filterers::BasicPitchAngleFilter;
pub use wind_speed::{MeanOtherTurbineWindSpeed, OwnTurbineWindSpeed};
pub use yaw_error::CurveFitYawError;
