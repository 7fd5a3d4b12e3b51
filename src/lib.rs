pub mod api;
pub mod config;
pub mod gateway;
pub mod humanize;
pub mod observability;
pub mod predictions;
