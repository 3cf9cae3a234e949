// src/tools/mod.rs
pub mod codec;
pub mod json;
pub mod pomodoro;
pub mod regex;
