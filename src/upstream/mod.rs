pub mod client;

pub use client::{GenerationPayload, ImageApiClient};
