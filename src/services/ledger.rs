use crate::models::{Block, Transaction, GENESIS_HASH, GENESIS_PREVIOUS_HASH};
use crate::services::simulation;
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, SeedableRng};
use std::str::FromStr;

/// How block hashes and nonces are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashMode {
    /// Fresh random values on every build, so the same list renders a
    /// different chain each time.
    #[default]
    Simulated,
    /// Values seeded from block contents; an unchanged list yields the same
    /// hashes and nonces. Still not a digest.
    Deterministic,
}

impl FromStr for HashMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simulated" | "random" => Ok(HashMode::Simulated),
            "deterministic" | "stable" => Ok(HashMode::Deterministic),
            other => Err(format!("unknown hash mode '{}'", other)),
        }
    }
}

/// Groups transactions into a display-only chain.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    transactions_per_block: usize,
    mode: HashMode,
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new(3, HashMode::Simulated)
    }
}

impl BlockBuilder {
    pub fn new(transactions_per_block: usize, mode: HashMode) -> Self {
        Self {
            transactions_per_block: transactions_per_block.max(1),
            mode,
        }
    }

    pub fn build(&self, transactions: &[Transaction]) -> Vec<Block> {
        self.build_at(transactions, Utc::now())
    }

    /// Genesis first, then one block per `transactions_per_block` entries in
    /// list order. Each block links to its predecessor's hash.
    pub fn build_at(&self, transactions: &[Transaction], now: DateTime<Utc>) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(1 + transactions.len() / self.transactions_per_block + 1);
        blocks.push(genesis_block(now));

        for (i, chunk) in transactions.chunks(self.transactions_per_block).enumerate() {
            let index = i as u64 + 1;
            let previous_hash = blocks[i].hash.clone();
            let (hash, nonce) = self.seal(index, &previous_hash, chunk);

            blocks.push(Block {
                index,
                timestamp: chunk[0].timestamp,
                transactions: chunk.to_vec(),
                previous_hash,
                hash,
                nonce,
            });
        }

        tracing::debug!(
            blocks = blocks.len(),
            transactions = transactions.len(),
            mode = ?self.mode,
            "Built simulated chain"
        );

        blocks
    }

    fn seal(&self, index: u64, previous_hash: &str, transactions: &[Transaction]) -> (String, u64) {
        match self.mode {
            HashMode::Simulated => {
                let mut rng = rand::thread_rng();
                (simulation::block_hash(&mut rng), simulation::nonce(&mut rng))
            }
            HashMode::Deterministic => {
                let index_bytes = index.to_le_bytes();
                let parts = [index_bytes.as_slice(), previous_hash.as_bytes()]
                    .into_iter()
                    .chain(transactions.iter().map(|tx| tx.id.as_bytes()));
                let mut rng = StdRng::seed_from_u64(simulation::seed_from_parts(parts));
                (simulation::block_hash(&mut rng), simulation::nonce(&mut rng))
            }
        }
    }
}

pub fn genesis_block(now: DateTime<Utc>) -> Block {
    Block {
        index: 0,
        timestamp: now - Duration::days(1),
        transactions: Vec::new(),
        previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        hash: GENESIS_HASH.to_string(),
        nonce: 0,
    }
}

/// True when every block points at its predecessor and indices are dense.
pub fn verify_chain(blocks: &[Block]) -> bool {
    let Some(first) = blocks.first() else {
        return false;
    };
    if first.index != 0 || first.previous_hash != GENESIS_PREVIOUS_HASH {
        return false;
    }

    blocks.windows(2).all(|pair| {
        pair[1].index == pair[0].index + 1 && pair[1].previous_hash == pair[0].hash
    })
}
