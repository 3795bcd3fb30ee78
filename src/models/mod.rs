pub mod types;

pub use types::{Account, ConnectionStatus, Snapshot};
