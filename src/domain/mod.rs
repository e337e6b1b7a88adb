// Domain layer - view models held by the client for one page lifetime
pub mod filter;
pub mod metrics;
pub mod payloads;
pub mod records;
pub mod sale_draft;
pub mod series;
pub mod session;
