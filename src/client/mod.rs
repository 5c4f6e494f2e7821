pub mod api;

pub use api::{ClientError, TollApiClient};
