//! Feature channels of the Next Day Wildfire Spread dataset
//!
//! Each training example is a square patch with one channel per feature. The
//! channel names are forwarded to the export platform as the selectors of the
//! exported table; the platform owns how each channel is computed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single dataset channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Feature {
    Elevation,
    WindDirection,
    WindSpeed,
    MinTemperature,
    MaxTemperature,
    SpecificHumidity,
    Precipitation,
    EnergyReleaseComponent,
    Drought,
    Vegetation,
    Population,
    PrevFireMask,
    FireMask,
}

impl Feature {
    /// All channels in dataset order, label last
    pub const ALL: [Feature; 13] = [
        Feature::Elevation,
        Feature::WindDirection,
        Feature::WindSpeed,
        Feature::MinTemperature,
        Feature::MaxTemperature,
        Feature::SpecificHumidity,
        Feature::Precipitation,
        Feature::Drought,
        Feature::Vegetation,
        Feature::Population,
        Feature::EnergyReleaseComponent,
        Feature::PrevFireMask,
        Feature::FireMask,
    ];

    /// Channel name as it appears in the exported records
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Elevation => "elevation",
            Feature::WindDirection => "th",
            Feature::WindSpeed => "vs",
            Feature::MinTemperature => "tmmn",
            Feature::MaxTemperature => "tmmx",
            Feature::SpecificHumidity => "sph",
            Feature::Precipitation => "pr",
            Feature::EnergyReleaseComponent => "erc",
            Feature::Drought => "pdsi",
            Feature::Vegetation => "NDVI",
            Feature::Population => "population",
            Feature::PrevFireMask => "PrevFireMask",
            Feature::FireMask => "FireMask",
        }
    }

    /// Source collection the platform derives the channel from
    pub fn source(&self) -> &'static str {
        match self {
            Feature::Elevation => "USGS/SRTMGL1_003",
            Feature::WindDirection
            | Feature::WindSpeed
            | Feature::MinTemperature
            | Feature::MaxTemperature
            | Feature::SpecificHumidity
            | Feature::Precipitation
            | Feature::EnergyReleaseComponent => "IDAHO_EPSCOR/GRIDMET",
            Feature::Drought => "GRIDMET/DROUGHT",
            Feature::Vegetation => "NOAA/VIIRS/001/VNP13A1",
            Feature::Population => "CIESIN/GPWv411/GPW_Population_Density",
            Feature::PrevFireMask | Feature::FireMask => "MODIS/006/MOD14A1",
        }
    }

    /// Short human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Feature::Elevation => "Elevation",
            Feature::WindDirection => "Wind direction",
            Feature::WindSpeed => "Wind speed",
            Feature::MinTemperature => "Minimum temperature",
            Feature::MaxTemperature => "Maximum temperature",
            Feature::SpecificHumidity => "Specific humidity",
            Feature::Precipitation => "Precipitation",
            Feature::EnergyReleaseComponent => "Energy release component",
            Feature::Drought => "Palmer drought severity index",
            Feature::Vegetation => "Normalized difference vegetation index",
            Feature::Population => "Population density",
            Feature::PrevFireMask => "Fire mask on the day of the sample",
            Feature::FireMask => "Fire mask on the following day",
        }
    }

    /// The label channel of the published dataset
    pub fn label() -> Feature {
        Feature::FireMask
    }

    /// Default input channels, every channel except the label
    pub fn default_inputs() -> Vec<Feature> {
        Self::ALL
            .iter()
            .copied()
            .filter(|f| *f != Self::label())
            .collect()
    }

    /// Parses a list of channel names, reporting the first unknown one
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Feature>, String> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(Feature::name).collect();
                format!("unknown feature '{s}'. Known features: {}", known.join(", "))
            })
    }
}

impl TryFrom<String> for Feature {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Feature> for String {
    fn from(feature: Feature) -> Self {
        feature.name().to_string()
    }
}
