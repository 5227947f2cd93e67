//! Application layer: session configuration.
//!
//! Everything a session reads once at start-up lives here, including the
//! host-provided parameters (the `CT` orientation key).
//!
//! # Usage
//!
//! ```
//! use std::collections::HashMap;
//!
//! use pathtask::app::SessionConfig;
//!
//! let mut params = HashMap::new();
//! params.insert("CT".to_string(), "strategy".to_string());
//! let config = SessionConfig::from_params(&params)?.with_seed(42);
//! # Ok::<(), pathtask::Error>(())
//! ```

pub mod config;

pub use config::SessionConfig;
