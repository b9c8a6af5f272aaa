// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Routed behind `middleware::require_auth`, so every handler here can take
// `Extension<AuthUser>` without checking for its absence.

pub mod academy; // /user/academy/*
pub mod admin; // /delete/:name
pub mod space; // /space/*
pub mod user; // /user/*
