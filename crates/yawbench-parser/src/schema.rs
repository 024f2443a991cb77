//! Canonical column naming for the unified SCADA table.
//!
//! Every wind farm's raw files are renamed into this schema at ingestion so
//! that filterers and estimators never see vendor-specific headers.

/// Observation timestamp, `Datetime(Microseconds)`.
pub const DATETIME: &str = "datetime";
/// Turbine output power in kW.
pub const ACTIVE_POWER: &str = "active_power";
/// Measured wind speed in m/s.
pub const WIND_SPEED: &str = "wind_speed";
/// Direction the wind blows from, degrees.
pub const WIND_FROM_DIRECTION: &str = "wind_from_direction";
/// Nacelle heading, degrees.
pub const NACELLE_DIRECTION: &str = "nacelle_direction";
/// Blade pitch angle, degrees.
pub const PITCH_ANGLE: &str = "pitch_angle";
/// Integer identifying one physical turbine within one wind farm.
pub const TURBINE_NUMBER: &str = "turbine_number";
/// Circular difference of nacelle and wind direction, appended by processing.
pub const YAW_ERROR: &str = "yaw_error";

/// Number of metadata lines preceding the header row in the Zenodo SCADA
/// exports.
pub const SCADA_METADATA_ROWS: usize = 9;

pub(crate) const SCADA_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A measurement column selected from the raw SCADA export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScadaColumn {
    ActivePower,
    WindSpeed,
    WindFromDirection,
    NacelleDirection,
    PitchAngle,
}

impl ScadaColumn {
    pub const ALL: [ScadaColumn; 5] = [
        ScadaColumn::ActivePower,
        ScadaColumn::WindSpeed,
        ScadaColumn::WindFromDirection,
        ScadaColumn::NacelleDirection,
        ScadaColumn::PitchAngle,
    ];

    /// Header name as it appears in the raw file.
    pub fn raw_header(&self) -> &'static str {
        match self {
            ScadaColumn::ActivePower => "Power (kW)",
            ScadaColumn::WindSpeed => "Wind speed (m/s)",
            ScadaColumn::WindFromDirection => "Wind direction (°)",
            ScadaColumn::NacelleDirection => "Nacelle position (°)",
            ScadaColumn::PitchAngle => "Blade angle (pitch position) A (°)",
        }
    }

    pub fn canonical_name(&self) -> &'static str {
        match self {
            ScadaColumn::ActivePower => ACTIVE_POWER,
            ScadaColumn::WindSpeed => WIND_SPEED,
            ScadaColumn::WindFromDirection => WIND_FROM_DIRECTION,
            ScadaColumn::NacelleDirection => NACELLE_DIRECTION,
            ScadaColumn::PitchAngle => PITCH_ANGLE,
        }
    }
}

/// Raw header of the timestamp column, which doubles as the index column of
/// the source files.
pub const RAW_DATETIME_HEADER: &str = "# Date and time";
