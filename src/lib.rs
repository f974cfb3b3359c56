#![allow(non_snake_case, clippy::upper_case_acronyms)]

use std::fmt::Display;
use tracing::log;

pub mod config_handler;
pub mod date_layout;
pub mod error;
pub mod fetch_service;
pub mod football_client;
pub mod forwarder;
pub mod ingest_api;
pub mod models;
pub mod models_api;
pub mod models_external;
pub mod nfl_client;
pub mod rest_client;

pub trait LogResult<T, E: Display> {
    fn ok_log(self, msg: &str) -> Option<T>;
}

impl<T, E: Display> LogResult<T, E> for Result<T, E> {
    fn ok_log(self, msg: &str) -> Option<T> {
        match self {
            Ok(o) => Some(o),
            Err(e) => {
                log::error!("{}: {}", msg, e);
                None
            }
        }
    }
}
