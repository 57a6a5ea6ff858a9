//! Converts (distance, mode) into derived journey metrics.
//!
//! Pure arithmetic over the injected profile table. CO2 saved is the
//! difference against driving the same distance by car and is deliberately
//! not clamped at zero (see DESIGN.md).

use serde::Serialize;

use crate::error::AppError;
use crate::models::transport::{TransportCatalog, TransportMode};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JourneyMetrics {
    pub travel_time_min: i64,
    pub co2_emissions_kg: f64,
    pub calories_burned: i64,
    pub co2_saved_kg: f64,
}

/// Request-path distance validation. The calculator itself is total over
/// non-negative input; callers reject anything else up front.
pub fn validate_distance(distance_km: f64) -> Result<f64, AppError> {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(AppError::InvalidDistance(distance_km));
    }
    Ok(distance_km)
}

pub fn calculate(
    catalog: &TransportCatalog,
    distance_km: f64,
    mode: TransportMode,
) -> JourneyMetrics {
    let profile = catalog.profile(mode);
    let car = catalog.profile(TransportMode::Car);

    let co2_emissions_kg = round2(distance_km * profile.co2_per_km);
    JourneyMetrics {
        travel_time_min: (distance_km / profile.speed_kmh * 60.0).round() as i64,
        co2_emissions_kg,
        calories_burned: (distance_km * profile.cal_per_km).round() as i64,
        co2_saved_kg: round2(distance_km * car.co2_per_km - co2_emissions_kg),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
