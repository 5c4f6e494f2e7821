pub mod analytics;
pub mod booths;
pub mod intake;
pub mod ledger;
pub mod search;
pub mod simulation;
pub mod store;
pub mod wallet;

pub use analytics::{Analytics, SubmissionOutcome};
pub use booths::BoothRegistry;
pub use intake::{SimulatedVerifier, TransactionIntake, Verifier};
pub use ledger::{BlockBuilder, HashMode};
pub use search::TransactionFilter;
pub use store::{InMemoryTransactionStore, TransactionStore};
pub use wallet::WalletService;
