// src/generators/mod.rs
pub mod password;
pub mod uuid;

pub use password::{estimate_strength, generate_password, Strength};
