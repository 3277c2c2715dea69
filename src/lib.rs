pub mod api;
pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod error;
pub mod management;
pub mod models;
pub mod notify;
pub mod pages;
pub mod utils;
