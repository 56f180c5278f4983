//! Data models: the extracted record, the candidate form and configuration.

pub mod config;
pub mod form;
pub mod record;
