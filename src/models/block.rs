use super::Transaction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const GENESIS_PREVIOUS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";
pub const GENESIS_HASH: &str =
    "000000000b9ef7a5d5f33727c0f81509afc6f79b5938b77ef8c6ceaec78a6cd4";

/// A display-only grouping of transactions. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    pub timestamp: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
    pub previous_hash: String,
    pub hash: String,
    pub nonce: u64,
}

impl Block {
    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }
}
