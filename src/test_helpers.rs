use crate::models::{PaymentMethod, Transaction, TransactionStatus};
use chrono::{DateTime, Duration, Utc};

pub fn transaction(
    id: &str,
    vehicle_number: &str,
    vehicle_type: &str,
    toll_booth: &str,
    amount: f64,
    timestamp: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        vehicle_number: vehicle_number.to_string(),
        vehicle_type: vehicle_type.to_string(),
        toll_booth: toll_booth.to_string(),
        amount,
        timestamp,
        blockchain_hash: format!("0x{:052x}", amount.to_bits()),
        status: TransactionStatus::Confirmed,
        owner_name: "Jane Doe".to_string(),
        payment_method: PaymentMethod::Traditional,
        wallet_address: None,
        eth_amount: None,
        crypto_tx_hash: None,
    }
}

/// `count` transactions, newest first, one minute apart.
pub fn sample_transactions(count: usize) -> Vec<Transaction> {
    let now = Utc::now();
    (0..count)
        .map(|i| {
            transaction(
                &format!("tx_{}", count - i),
                &format!("CAR-{:04}", i),
                "car",
                "TB001",
                5.5,
                now - Duration::minutes(i as i64),
            )
        })
        .collect()
}
