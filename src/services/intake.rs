use crate::{
    error::TollError,
    models::{CreateTransactionRequest, PaymentMethod, Transaction, TransactionStatus},
    services::{simulation, wallet::WalletService, TransactionStore},
};
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Stand-in for on-chain confirmation.
pub trait Verifier: Send + Sync {
    fn verify(&self, transaction: &Transaction) -> bool;
}

/// Passes with a fixed probability.
#[derive(Debug, Clone)]
pub struct SimulatedVerifier {
    success_rate: f64,
}

impl SimulatedVerifier {
    pub fn new(success_rate: f64) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
        }
    }
}

impl Verifier for SimulatedVerifier {
    fn verify(&self, _transaction: &Transaction) -> bool {
        rand::thread_rng().gen_bool(self.success_rate)
    }
}

/// A submission that passed required-field validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayment {
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub toll_booth: String,
    pub amount: f64,
    pub owner_name: String,
    pub payment_method: PaymentMethod,
    pub wallet_address: Option<String>,
    pub eth_amount: Option<String>,
    pub crypto_tx_hash: Option<String>,
}

impl ValidatedPayment {
    /// A field counts as missing when absent, blank, or (for the amount)
    /// zero or not a finite number.
    pub fn from_request(request: CreateTransactionRequest) -> Result<Self, TollError> {
        let mut missing = Vec::new();

        let vehicle_number = required(request.vehicle_number, "vehicleNumber", &mut missing);
        let vehicle_type = required(request.vehicle_type, "vehicleType", &mut missing);
        let toll_booth = required(request.toll_booth, "tollBooth", &mut missing);
        let amount = request
            .amount
            .as_ref()
            .and_then(|a| a.as_f64())
            .filter(|a| *a != 0.0 && a.is_finite());
        if amount.is_none() {
            missing.push("amount".to_string());
        }
        let owner_name = required(request.owner_name, "ownerName", &mut missing);

        if !missing.is_empty() {
            return Err(TollError::MissingField(missing));
        }

        let payment_method = request.payment_method.unwrap_or_default();
        let (wallet_address, eth_amount, crypto_tx_hash) = match payment_method {
            PaymentMethod::Crypto => (
                request.wallet_address,
                request.eth_amount.map(|a| a.to_string()),
                request.transaction_hash,
            ),
            PaymentMethod::Traditional => (None, None, None),
        };

        Ok(Self {
            vehicle_number: vehicle_number.unwrap_or_default(),
            vehicle_type: vehicle_type.unwrap_or_default(),
            toll_booth: toll_booth.unwrap_or_default(),
            amount: amount.unwrap_or_default(),
            owner_name: owner_name.unwrap_or_default(),
            payment_method,
            wallet_address,
            eth_amount,
            crypto_tx_hash,
        })
    }
}

fn required(value: Option<String>, name: &str, missing: &mut Vec<String>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            missing.push(name.to_string());
            None
        }
    }
}

pub fn confirmation_message(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Crypto => "Crypto transaction confirmed on blockchain",
        PaymentMethod::Traditional => "Transaction confirmed on blockchain",
    }
}

/// Validates, verifies and records toll payments.
pub struct TransactionIntake {
    store: Arc<dyn TransactionStore>,
    verifier: Arc<dyn Verifier>,
    delay: Duration,
}

impl TransactionIntake {
    pub fn new(
        store: Arc<dyn TransactionStore>,
        verifier: Arc<dyn Verifier>,
        delay: Duration,
    ) -> Self {
        Self {
            store,
            verifier,
            delay,
        }
    }

    /// Records the payment only when verification passes; a failed
    /// verification leaves the store untouched.
    pub async fn submit(&self, request: CreateTransactionRequest) -> Result<Transaction, TollError> {
        let payment = ValidatedPayment::from_request(request)?;
        let mut transaction = Self::pending_transaction(payment);

        if let Some(address) = transaction.wallet_address.as_deref() {
            if !WalletService::is_valid_address(address) {
                tracing::warn!(
                    id = %transaction.id,
                    wallet = address,
                    "Crypto payment carries a malformed wallet address"
                );
            }
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if !self.verifier.verify(&transaction) {
            transaction.status = TransactionStatus::Failed;
            tracing::warn!(
                id = %transaction.id,
                vehicle = %transaction.vehicle_number,
                booth = %transaction.toll_booth,
                "Blockchain verification failed"
            );
            return Err(TollError::VerificationFailed);
        }

        transaction.status = TransactionStatus::Confirmed;
        self.store
            .append(transaction.clone())
            .await
            .map_err(|e| TollError::Internal(e.to_string()))?;

        tracing::info!(
            id = %transaction.id,
            vehicle = %transaction.vehicle_number,
            booth = %transaction.toll_booth,
            amount = transaction.amount,
            method = %transaction.payment_method,
            "Transaction confirmed"
        );

        Ok(transaction)
    }

    fn pending_transaction(payment: ValidatedPayment) -> Transaction {
        let now = Utc::now();
        let mut rng = rand::thread_rng();

        Transaction {
            id: simulation::transaction_id(&mut rng, now),
            vehicle_number: payment.vehicle_number,
            vehicle_type: payment.vehicle_type,
            toll_booth: payment.toll_booth,
            amount: payment.amount,
            timestamp: now,
            blockchain_hash: simulation::transaction_hash(&mut rng),
            status: TransactionStatus::Pending,
            owner_name: payment.owner_name,
            payment_method: payment.payment_method,
            wallet_address: payment.wallet_address,
            eth_amount: payment.eth_amount,
            crypto_tx_hash: payment.crypto_tx_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NumberOrString;
    use crate::services::InMemoryTransactionStore;
    use tokio_test::{assert_err, assert_ok};

    fn request() -> CreateTransactionRequest {
        CreateTransactionRequest {
            vehicle_number: Some("ABC-1234".into()),
            vehicle_type: Some("car".into()),
            toll_booth: Some("TB001".into()),
            amount: Some(NumberOrString::Number(5.5)),
            owner_name: Some("Jane Doe".into()),
            ..Default::default()
        }
    }

    fn intake(success_rate: f64) -> (TransactionIntake, Arc<InMemoryTransactionStore>) {
        let store = Arc::new(InMemoryTransactionStore::new());
        let intake = TransactionIntake::new(
            store.clone(),
            Arc::new(SimulatedVerifier::new(success_rate)),
            Duration::ZERO,
        );
        (intake, store)
    }

    #[tokio::test]
    async fn confirmed_payment_is_stored() {
        let (intake, store) = intake(1.0);

        let tx = assert_ok!(intake.submit(request()).await);
        assert_eq!(tx.status, TransactionStatus::Confirmed);
        assert!(tx.blockchain_hash.starts_with("0x"));
        assert!(tx.id.starts_with("tx_"));
        assert_eq!(tx.amount, 5.5);
        assert_eq!(tx.payment_method, PaymentMethod::Traditional);

        let stored = store.list().await.unwrap();
        assert_eq!(stored, vec![tx]);
    }

    #[tokio::test]
    async fn failed_verification_stores_nothing() {
        let (intake, store) = intake(0.0);

        let err = assert_err!(intake.submit(request()).await);
        assert!(matches!(err, TollError::VerificationFailed));
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_fields_are_reported_and_not_stored() {
        let (intake, store) = intake(1.0);
        let req = CreateTransactionRequest {
            vehicle_number: Some("  ".into()),
            owner_name: None,
            ..request()
        };

        match intake.submit(req).await {
            Err(TollError::MissingField(fields)) => {
                assert_eq!(fields, vec!["vehicleNumber", "ownerName"]);
            }
            other => panic!("expected missing field error, got {:?}", other),
        }
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[test]
    fn zero_non_finite_or_unparseable_amount_counts_as_missing() {
        for amount in [
            NumberOrString::Number(0.0),
            NumberOrString::Text("".into()),
            NumberOrString::Text("five".into()),
            NumberOrString::Text("inf".into()),
            NumberOrString::Text("-infinity".into()),
            NumberOrString::Text("NaN".into()),
        ] {
            let req = CreateTransactionRequest {
                amount: Some(amount),
                ..request()
            };
            assert!(matches!(
                ValidatedPayment::from_request(req),
                Err(TollError::MissingField(ref f)) if f == &vec!["amount".to_string()]
            ));
        }
    }

    #[test]
    fn string_amount_is_parsed() {
        let req = CreateTransactionRequest {
            amount: Some(NumberOrString::Text("7.25".into())),
            ..request()
        };
        let payment = ValidatedPayment::from_request(req).unwrap();
        assert_eq!(payment.amount, 7.25);
    }

    #[test]
    fn crypto_fields_only_kept_for_crypto_payments() {
        let crypto = CreateTransactionRequest {
            payment_method: Some(PaymentMethod::Crypto),
            wallet_address: Some("0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6".into()),
            eth_amount: Some(NumberOrString::Text("0.002750".into())),
            transaction_hash: Some("0xfeed".into()),
            ..request()
        };
        let payment = ValidatedPayment::from_request(crypto.clone()).unwrap();
        assert_eq!(payment.eth_amount.as_deref(), Some("0.002750"));
        assert_eq!(payment.crypto_tx_hash.as_deref(), Some("0xfeed"));

        let traditional = CreateTransactionRequest {
            payment_method: Some(PaymentMethod::Traditional),
            ..crypto
        };
        let payment = ValidatedPayment::from_request(traditional).unwrap();
        assert!(payment.wallet_address.is_none());
        assert!(payment.eth_amount.is_none());
        assert!(payment.crypto_tx_hash.is_none());
    }

    #[test]
    fn messages_depend_on_method() {
        assert_eq!(
            confirmation_message(PaymentMethod::Crypto),
            "Crypto transaction confirmed on blockchain"
        );
        assert_eq!(
            confirmation_message(PaymentMethod::Traditional),
            "Transaction confirmed on blockchain"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_simulated_delay() {
        let store = Arc::new(InMemoryTransactionStore::new());
        let intake = TransactionIntake::new(
            store.clone(),
            Arc::new(SimulatedVerifier::new(1.0)),
            Duration::from_millis(200),
        );

        let started = tokio::time::Instant::now();
        assert_ok!(intake.submit(request()).await);
        assert!(started.elapsed() >= Duration::from_millis(200));
    }
}
