// soundcheck-api: Async Rust client for the hosted content backend
// (rows + storage + auth surfaces).

pub mod auth;
pub mod error;
pub mod rows;
pub mod storage;
pub mod transport;

pub use auth::{AuthClient, AuthUser, Session, SignUpOutcome};
pub use error::Error;
pub use rows::RowsClient;
pub use storage::StorageClient;
pub use transport::TransportConfig;
