use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoothStatus {
    Active,
    Maintenance,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TollBooth {
    pub id: String,
    pub name: String,
    pub location: String,
    pub status: BoothStatus,
    pub fee: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Motorcycle,
    Truck,
    Bus,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Car,
        VehicleType::Truck,
        VehicleType::Motorcycle,
        VehicleType::Bus,
    ];

    /// Factor applied to a booth's base fee.
    pub fn multiplier(self) -> f64 {
        match self {
            VehicleType::Car => 1.0,
            VehicleType::Motorcycle => 0.5,
            VehicleType::Truck => 2.0,
            VehicleType::Bus => 1.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Motorcycle => "motorcycle",
            VehicleType::Truck => "truck",
            VehicleType::Bus => "bus",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Car => "Cars",
            VehicleType::Motorcycle => "Motorcycles",
            VehicleType::Truck => "Trucks",
            VehicleType::Bus => "Buses",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "car" => Ok(VehicleType::Car),
            "motorcycle" => Ok(VehicleType::Motorcycle),
            "truck" => Ok(VehicleType::Truck),
            "bus" => Ok(VehicleType::Bus),
            other => Err(format!("unknown vehicle type '{}'", other)),
        }
    }
}

/// Booth entry as listed by `GET /booths`, with live figures for today.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoothSummary {
    #[serde(flatten)]
    pub booth: TollBooth,
    pub daily_revenue: f64,
    pub vehicle_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    pub booth_id: String,
    pub vehicle_type: VehicleType,
    pub multiplier: f64,
    pub amount_usd: f64,
    pub amount_eth: String,
    pub amount_wei: String,
    pub collection_address: String,
}
