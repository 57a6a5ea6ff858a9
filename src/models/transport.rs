use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Car,
    Bus,
    Train,
    Bike,
    Walk,
    Ebike,
}

impl TransportMode {
    pub const ALL: [TransportMode; 6] = [
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Bike,
        TransportMode::Walk,
        TransportMode::Ebike,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Bike => "bike",
            TransportMode::Walk => "walk",
            TransportMode::Ebike => "ebike",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(TransportMode::Car),
            "bus" => Ok(TransportMode::Bus),
            "train" => Ok(TransportMode::Train),
            "bike" => Ok(TransportMode::Bike),
            "walk" => Ok(TransportMode::Walk),
            "ebike" => Ok(TransportMode::Ebike),
            other => Err(AppError::InvalidMode(other.to_string())),
        }
    }
}

/// Per-mode constants: emissions factor, calorie burn factor, average speed.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TransportProfile {
    pub mode: TransportMode,
    pub co2_per_km: f64,
    pub cal_per_km: f64,
    pub speed_kmh: f64,
}

/// Immutable profile table, built once at startup and carried in `AppState`.
#[derive(Debug, Clone)]
pub struct TransportCatalog {
    // Stored in `TransportMode` declaration order so lookup is a plain index.
    profiles: [TransportProfile; 6],
}

impl TransportCatalog {
    pub fn standard() -> Self {
        let entry = |mode, co2_per_km, cal_per_km, speed_kmh| TransportProfile {
            mode,
            co2_per_km,
            cal_per_km,
            speed_kmh,
        };
        Self {
            profiles: [
                entry(TransportMode::Car, 0.21, 0.0, 40.0),
                entry(TransportMode::Bus, 0.105, 0.0, 30.0),
                entry(TransportMode::Train, 0.041, 0.0, 60.0),
                entry(TransportMode::Bike, 0.0, 30.0, 15.0),
                entry(TransportMode::Walk, 0.0, 50.0, 5.0),
                entry(TransportMode::Ebike, 0.015, 15.0, 20.0),
            ],
        }
    }

    pub fn profile(&self, mode: TransportMode) -> &TransportProfile {
        &self.profiles[mode as usize]
    }

    pub fn profiles(&self) -> &[TransportProfile] {
        &self.profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_str() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.as_str().parse::<TransportMode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "scooter".parse::<TransportMode>().unwrap_err();
        assert!(matches!(err, AppError::InvalidMode(m) if m == "scooter"));
    }

    #[test]
    fn catalog_lookup_matches_declaration_order() {
        let catalog = TransportCatalog::standard();
        for mode in TransportMode::ALL {
            assert_eq!(catalog.profile(mode).mode, mode);
        }
    }
}
