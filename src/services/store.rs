use crate::models::Transaction;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Ordered record of confirmed toll payments, newest first.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Records a transaction as the newest entry.
    async fn append(&self, transaction: Transaction) -> Result<()>;

    /// Snapshot of every entry, newest first.
    async fn list(&self) -> Result<Vec<Transaction>>;

    async fn len(&self) -> Result<usize>;
}

/// Process-lifetime store. Contents are gone once the server stops.
#[derive(Default)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<VecDeque<Transaction>>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn append(&self, transaction: Transaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        tracing::debug!(
            id = %transaction.id,
            stored = transactions.len() + 1,
            "Appending transaction"
        );
        transactions.push_front(transaction);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.read().await.iter().cloned().collect())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.transactions.read().await.len())
    }
}
