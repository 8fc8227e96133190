pub mod config;
pub mod declare;
pub mod inspect;
