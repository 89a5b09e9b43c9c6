pub mod aggregate;

// Re-exports
pub use aggregate::{MutationResponse, ScheduledQuery, ScheduledQueryPayload};
