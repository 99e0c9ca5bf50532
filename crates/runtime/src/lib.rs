mod config;
pub mod logging;
pub mod settings;

pub use config::{
    DEFAULT_CONFIG_FILE, LIST_DELIMITER, LOG_FILE_PREFIX, PROGRAM_LOG_LEVEL, PROGRAM_NAME,
    default_config_path, log_file_name, split_list,
};

pub use settings::{ConfigError, SweepConfig};
