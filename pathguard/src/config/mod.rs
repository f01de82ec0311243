//! Configuration system for pathguard.
//!
//! This module describes the hosting platform the library works against:
//! its installation root, content and plugin directories, multisite layout,
//! directory allowlist, and the settings that drive directory hardening.
//! Sources supported:
//! - A `pathguard.yaml` file (explicit or discovered by walking up)
//! - Environment variable overrides (`PATHGUARD_*`)
//! - Programmatic configuration via builder pattern
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PATHGUARD_*`)
//! 3. Configuration file (`pathguard.yaml`)
//! 4. Built-in defaults (`<abspath>/wp-content`, `<content_dir>/plugins`)
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use pathguard::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let host = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/site"))
//!     .build()
//!     .unwrap();
//! println!("content dir: {}", host.content_dir.display());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use pathguard::config::{Config, ConfigBuilder, MultisiteConfig};
//! use std::path::PathBuf;
//!
//! let host = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config {
//!         abspath: Some(PathBuf::from("/srv/site")),
//!         multisite: Some(MultisiteConfig { enabled: Some(true), upload_blogs_dir: None }),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert!(host.multisite);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, HostConfig, MultisiteConfig};
pub use validator::ConfigValidator;
