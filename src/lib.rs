pub mod alignment;
pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod ipa;
pub mod scorer;
// cmd and reports are modules of the binary crate (main.rs).
