pub mod admin;
pub mod extractors;
pub mod health;
pub mod order;
pub mod response;
pub mod types;
pub mod user;

// Re-export commonly used types
pub use extractors::{Numeric, ValidatedJson};
pub use response::{method_not_allowed, Created};
