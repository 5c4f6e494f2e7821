pub mod analytics;
pub mod block;
pub mod booth;
pub mod response;
pub mod transaction;

pub use analytics::*;
pub use block::*;
pub use booth::*;
pub use response::*;
pub use transaction::*;
