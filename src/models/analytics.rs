use super::VehicleType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl TimeRange {
    pub fn days(self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(TimeRange::Week),
            "30d" => Ok(TimeRange::Month),
            "90d" => Ok(TimeRange::Quarter),
            other => Err(format!("unsupported range '{}', expected 7d, 30d or 90d", other)),
        }
    }
}

/// Live counters pushed to the dashboard feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_transactions: u64,
    pub confirmed_submissions: u64,
    pub failed_verifications: u64,
    pub rejected_submissions: u64,
    pub total_revenue: f64,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub revenue: f64,
    pub transactions: u64,
    pub cars: u64,
    pub trucks: u64,
    pub motorcycles: u64,
    pub buses: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTypeBreakdown {
    pub vehicle_type: VehicleType,
    pub label: String,
    pub count: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub owner_name: String,
    pub total_amount: f64,
    pub trip_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub total_revenue: f64,
    pub total_transactions: u64,
    pub avg_transaction_value: f64,
    pub daily: Vec<DailyBucket>,
    pub vehicle_types: Vec<VehicleTypeBreakdown>,
    pub top_vehicles: Vec<VehicleSummary>,
}
