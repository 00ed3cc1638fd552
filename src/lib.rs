pub mod app_err;
pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod ocm;
pub mod regions;
