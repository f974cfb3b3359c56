pub mod football;
pub mod nfl;
