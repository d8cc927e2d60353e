//! CLI command implementations

pub mod choose;
pub mod comment;
pub mod pool;

pub use choose::ChooseArgs;
pub use comment::{FindArgs, FormatArgs};
pub use pool::PoolArgs;
