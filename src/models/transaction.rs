use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Traditional,
    Crypto,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Traditional => write!(f, "traditional"),
            PaymentMethod::Crypto => write!(f, "crypto"),
        }
    }
}

/// A recorded toll payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub toll_booth: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    pub blockchain_hash: String,
    pub status: TransactionStatus,
    pub owner_name: String,
    pub payment_method: PaymentMethod,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_tx_hash: Option<String>,
}

/// Accepts `5.5` as well as `"5.5"`, the way dashboard forms submit amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(n) => Some(*n),
            NumberOrString::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for NumberOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberOrString::Number(n) => write!(f, "{}", n),
            NumberOrString::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Body of `POST /transactions`. Everything is optional so that the intake
/// service, not the JSON extractor, decides what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub vehicle_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub toll_booth: Option<String>,
    pub amount: Option<NumberOrString>,
    pub owner_name: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub wallet_address: Option<String>,
    pub eth_amount: Option<NumberOrString>,
    pub transaction_hash: Option<String>,
}
