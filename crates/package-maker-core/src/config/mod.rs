//! Configuration for package generation
//!
//! Values are resolved in this order, later sources winning:
//! built-in defaults, the stub manifest (framework versions), a YAML config
//! file, then `PACKAGE_MAKER_*` environment variables.

mod settings;

pub use settings::{
    MakerConfig, CONFIG_FILE, DEFAULT_LICENSE, ENV_CREATOR_EMAIL, ENV_CREATOR_NAME, ENV_PATH,
    ENV_STUBS,
};
