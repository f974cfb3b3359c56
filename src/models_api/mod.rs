pub mod football;
pub mod ingest;
pub mod nfl;
