// handlers/mod.rs - Handlers grouped by access level
//
// Public (no auth) → Protected (bearer token)

pub mod protected;
pub mod public;
