//! ledgersift-core: transaction model, merchant categorization, and run configuration.

pub mod error;
pub mod merchant;
pub mod transaction;

pub use error::ConfigError;
pub use merchant::{MerchantConfig, OTHER_CATEGORY};
pub use transaction::{Transaction, TransactionType};
