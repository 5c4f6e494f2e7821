use crate::models::{
    AnalyticsReport, DailyBucket, Stats, TimeRange, Transaction, VehicleSummary, VehicleType,
    VehicleTypeBreakdown,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

const TOP_VEHICLES: usize = 10;

/// Outcome of one `POST /transactions`, as counted by [`Analytics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Confirmed,
    VerificationFailed,
    Rejected,
}

pub struct Analytics {
    confirmed: AtomicU64,
    failed: AtomicU64,
    rejected: AtomicU64,
    start_time: Instant,
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new()
    }
}

impl Analytics {
    pub fn new() -> Self {
        Self {
            confirmed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_submission(&self, outcome: SubmissionOutcome) {
        let counter = match outcome {
            SubmissionOutcome::Confirmed => &self.confirmed,
            SubmissionOutcome::VerificationFailed => &self.failed,
            SubmissionOutcome::Rejected => &self.rejected,
        };
        counter.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(?outcome, "Submission recorded");
    }

    pub fn stats(&self, transactions: &[Transaction]) -> Stats {
        Stats {
            total_transactions: transactions.len() as u64,
            confirmed_submissions: self.confirmed.load(Ordering::SeqCst),
            failed_verifications: self.failed.load(Ordering::SeqCst),
            rejected_submissions: self.rejected.load(Ordering::SeqCst),
            total_revenue: transactions.iter().map(|tx| tx.amount).sum(),
            uptime_seconds: self.uptime_seconds(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Windowed report over `transactions` for the `range` ending at `now`.
pub fn build_report(transactions: &[Transaction], range: TimeRange, now: DateTime<Utc>) -> AnalyticsReport {
    let days = range.days();
    let window_start = now - Duration::days(days);
    let in_window: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| tx.timestamp >= window_start)
        .collect();

    let total_revenue: f64 = in_window.iter().map(|tx| tx.amount).sum();
    let total_transactions = in_window.len() as u64;
    let avg_transaction_value = if in_window.is_empty() {
        0.0
    } else {
        total_revenue / in_window.len() as f64
    };

    AnalyticsReport {
        range,
        total_revenue,
        total_transactions,
        avg_transaction_value,
        daily: daily_buckets(&in_window, now.date_naive(), days),
        vehicle_types: vehicle_type_breakdown(&in_window),
        top_vehicles: top_vehicles(&in_window),
    }
}

/// One bucket per calendar day, oldest first, the last one being `today`.
fn daily_buckets(transactions: &[&Transaction], today: NaiveDate, days: i64) -> Vec<DailyBucket> {
    let mut buckets: Vec<DailyBucket> = (0..days)
        .rev()
        .map(|offset| DailyBucket {
            date: today - Duration::days(offset),
            revenue: 0.0,
            transactions: 0,
            cars: 0,
            trucks: 0,
            motorcycles: 0,
            buses: 0,
        })
        .collect();

    let first_day = today - Duration::days(days - 1);
    for tx in transactions {
        let offset = (tx.timestamp.date_naive() - first_day).num_days();
        let Some(bucket) = usize::try_from(offset).ok().and_then(|i| buckets.get_mut(i)) else {
            continue;
        };
        bucket.revenue += tx.amount;
        bucket.transactions += 1;
        match tx.vehicle_type.parse::<VehicleType>() {
            Ok(VehicleType::Car) => bucket.cars += 1,
            Ok(VehicleType::Truck) => bucket.trucks += 1,
            Ok(VehicleType::Motorcycle) => bucket.motorcycles += 1,
            Ok(VehicleType::Bus) => bucket.buses += 1,
            Err(_) => {}
        }
    }

    buckets
}

fn vehicle_type_breakdown(transactions: &[&Transaction]) -> Vec<VehicleTypeBreakdown> {
    VehicleType::ALL
        .iter()
        .map(|&vehicle_type| {
            let matching = transactions
                .iter()
                .filter(|tx| tx.vehicle_type == vehicle_type.as_str());
            let (count, revenue) = matching.fold((0u64, 0.0), |(count, revenue), tx| {
                (count + 1, revenue + tx.amount)
            });
            VehicleTypeBreakdown {
                vehicle_type,
                label: vehicle_type.label().to_string(),
                count,
                revenue,
            }
        })
        .collect()
}

fn top_vehicles(transactions: &[&Transaction]) -> Vec<VehicleSummary> {
    let mut by_vehicle: HashMap<&str, VehicleSummary> = HashMap::new();
    for tx in transactions {
        let summary = by_vehicle
            .entry(tx.vehicle_number.as_str())
            .or_insert_with(|| VehicleSummary {
                vehicle_number: tx.vehicle_number.clone(),
                vehicle_type: tx.vehicle_type.clone(),
                owner_name: if tx.owner_name.is_empty() {
                    "Unknown".to_string()
                } else {
                    tx.owner_name.clone()
                },
                total_amount: 0.0,
                trip_count: 0,
            });
        summary.total_amount += tx.amount;
        summary.trip_count += 1;
    }

    let mut ranked: Vec<VehicleSummary> = by_vehicle.into_values().collect();
    ranked.sort_by(|a, b| {
        b.total_amount
            .total_cmp(&a.total_amount)
            .then_with(|| a.vehicle_number.cmp(&b.vehicle_number))
    });
    ranked.truncate(TOP_VEHICLES);
    ranked
}
