//! Customer-facing fare quotes.
//!
//! Independent of the pooling cost model in [`crate::cost`]: quotes are shown
//! before pooling happens and may disagree with the internal split.

use jiff::civil::Time;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::units::{Cost, Kilometers};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Bike,
    Scooter,
    Car,
    Van,
    Truck,
}

struct VehicleTariff {
    base: Cost,
    per_km: Cost,
    included_weight_kg: f64,
    per_extra_kg: Cost,
}

impl VehicleType {
    fn tariff(&self) -> VehicleTariff {
        match self {
            VehicleType::Bike => VehicleTariff {
                base: 30.0,
                per_km: 8.0,
                included_weight_kg: 5.0,
                per_extra_kg: 5.0,
            },
            VehicleType::Scooter => VehicleTariff {
                base: 40.0,
                per_km: 9.0,
                included_weight_kg: 10.0,
                per_extra_kg: 4.0,
            },
            VehicleType::Car => VehicleTariff {
                base: 80.0,
                per_km: 14.0,
                included_weight_kg: 50.0,
                per_extra_kg: 2.0,
            },
            VehicleType::Van => VehicleTariff {
                base: 150.0,
                per_km: 20.0,
                included_weight_kg: 300.0,
                per_extra_kg: 1.0,
            },
            VehicleType::Truck => VehicleTariff {
                base: 300.0,
                per_km: 30.0,
                included_weight_kg: 1000.0,
                per_extra_kg: 0.5,
            },
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    #[default]
    Standard,
    Express,
    Scheduled,
}

impl DeliveryType {
    pub fn multiplier(&self) -> f64 {
        match self {
            DeliveryType::Standard => 1.0,
            DeliveryType::Express => 1.5,
            DeliveryType::Scheduled => 0.9,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeContext {
    #[default]
    OffPeak,
    Peak,
    Night,
}

impl TimeContext {
    /// Peak is 08:00-10:59 and 17:00-20:59, night is 22:00-05:59.
    pub fn at(time: Time) -> Self {
        match time.hour() {
            8..=10 | 17..=20 => TimeContext::Peak,
            22..=23 | 0..=5 => TimeContext::Night,
            _ => TimeContext::OffPeak,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            TimeContext::OffPeak => 1.0,
            TimeContext::Peak => 1.25,
            TimeContext::Night => 1.15,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq)]
pub struct FareBreakdown {
    pub base: Cost,
    pub distance: Cost,
    pub weight_surcharge: Cost,
    pub delivery_multiplier: f64,
    pub time_multiplier: f64,
    pub total: Cost,
}

fn round_cents(value: Cost) -> Cost {
    (value * 100.0).round() / 100.0
}

/// Quotes a solo delivery. Negative distance or weight are treated as zero.
pub fn quote(
    distance: Kilometers,
    weight_kg: f64,
    vehicle_type: VehicleType,
    delivery_type: DeliveryType,
    time_context: TimeContext,
) -> FareBreakdown {
    let tariff = vehicle_type.tariff();

    let base = tariff.base;
    let distance_component = distance.value().max(0.0) * tariff.per_km;
    let extra_weight = (weight_kg.max(0.0) - tariff.included_weight_kg).max(0.0);
    let weight_surcharge = extra_weight * tariff.per_extra_kg;

    let delivery_multiplier = delivery_type.multiplier();
    let time_multiplier = time_context.multiplier();
    let total = (base + distance_component + weight_surcharge) * delivery_multiplier * time_multiplier;

    FareBreakdown {
        base: round_cents(base),
        distance: round_cents(distance_component),
        weight_surcharge: round_cents(weight_surcharge),
        delivery_multiplier,
        time_multiplier,
        total: round_cents(total),
    }
}
