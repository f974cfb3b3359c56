#![allow(dead_code)]
pub mod external_server;
pub mod ingest_cli;
pub mod recording_sink;
