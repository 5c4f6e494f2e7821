pub mod blocks;
pub mod booths;
pub mod dashboard;
pub mod health;
pub mod stats;
pub mod transactions;

pub use blocks::*;
pub use booths::*;
pub use dashboard::*;
pub use health::*;
pub use stats::*;
pub use transactions::*;
