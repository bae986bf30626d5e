pub mod progress_store;
