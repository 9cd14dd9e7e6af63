pub mod checksum;
pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod fetch_head;
pub mod logging;
pub mod metadata;
pub mod payload;
pub mod sync;
