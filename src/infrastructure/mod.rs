//! Filesystem and environment lookups shared by configuration and observability.

pub mod paths;

pub use paths::{config_file_path, default_data_dir, trace_file};
