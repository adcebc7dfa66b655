// src/middleware/mod.rs
pub mod rate_limit;
pub mod security;
