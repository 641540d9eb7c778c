pub mod client;

pub use client::{TriviaClient, DEFAULT_BASE_URL};
