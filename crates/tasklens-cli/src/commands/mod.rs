pub mod config;
pub mod related;
pub mod suggest;
