// src/api/handlers/mod.rs
pub mod suggestions;
pub mod system;
