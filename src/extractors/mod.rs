//! Request extractors.

pub mod account_id;
pub mod json;
pub use account_id::AccountId;
pub use json::JsonBody;
