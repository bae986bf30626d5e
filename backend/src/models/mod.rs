pub mod day;
pub mod progress;
