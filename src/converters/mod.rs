// src/converters/mod.rs
pub mod epoch;
pub mod units;
