// src/handlers/mod.rs

pub mod auth;
pub mod papers;
pub mod profile;
pub mod quiz;
pub mod results;
