pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod identity;
pub mod portfolio;
pub mod req;
pub mod res;
pub mod server;
pub mod utils;
