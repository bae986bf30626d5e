pub mod days;
pub mod health;
pub mod progress;
