pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod server;
pub mod ui;
