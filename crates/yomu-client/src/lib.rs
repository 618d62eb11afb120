mod client;
mod envelope;

pub use client::HttpBackend;
pub use envelope::{Envelope, ResponseStatus, decode};
