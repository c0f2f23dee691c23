//! genai-proxy: a stateless relay between browser clients and the Gemini API.
pub mod config;
pub mod endpoints;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
