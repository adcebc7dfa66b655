// src/services/mod.rs
pub mod backend;

#[cfg(test)]
pub mod mock;
