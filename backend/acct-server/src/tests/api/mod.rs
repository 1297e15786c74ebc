mod cookies;
mod envelope;
mod error;
