//! Tracing setup.
//!
//! The subscriber is installed only when `TSDOC_SCHEMA_LOG` or `RUST_LOG` is
//! set. `TSDOC_SCHEMA_LOG_FORMAT=json` switches to one JSON object per event.
//!
//! ```bash
//! TSDOC_SCHEMA_LOG=debug tsdoc-schema ./types.ts
//! TSDOC_SCHEMA_LOG=tsdoc_schema=trace TSDOC_SCHEMA_LOG_FORMAT=json tsdoc-schema ./types.ts
//! ```

use std::env;
use std::io;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "TSDOC_SCHEMA_LOG";
const FORMAT_VAR: &str = "TSDOC_SCHEMA_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// `TSDOC_SCHEMA_LOG` wins over `RUST_LOG`.
fn build_filter() -> Option<EnvFilter> {
    match env::var(LOG_VAR) {
        Ok(directives) => Some(EnvFilter::builder().parse_lossy(directives)),
        Err(_) if env::var_os("RUST_LOG").is_some() => Some(EnvFilter::from_default_env()),
        Err(_) => None,
    }
}

/// Install the global subscriber. All output goes to stderr; stdout carries
/// the schema.
pub fn init() {
    let Some(filter) = build_filter() else {
        return;
    };

    let format = LogFormat::parse(&env::var(FORMAT_VAR).unwrap_or_default());
    match format {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
}
