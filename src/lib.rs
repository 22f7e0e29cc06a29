pub mod browser;
pub mod companies;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod output;
pub mod signals;
pub mod thesis;
pub mod workspace;
