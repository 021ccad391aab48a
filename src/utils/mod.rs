//! Utility module.
//!
//! Path helpers shared by the palettes.

mod paths;

pub use paths::{
    config_dir, expand_path, find_scripts_dir, global_config_file, MAX_SEARCH_DEPTH,
    SCRIPTS_DIR_NAME,
};
