pub mod errors;
pub mod schema;

mod discovery;
mod scada;

pub use discovery::{available_wind_farms, discover_turbine_files, TurbineFile};
pub use errors::ParserError;
pub use scada::{load_wind_farm, parse_scada_file};
