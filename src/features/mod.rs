//! Domain-level frontend features and their shared logic. Routes import these
//! modules to keep view code focused while keeping security and API handling in
//! dedicated feature areas.

pub mod auth;
