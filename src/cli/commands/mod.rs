//! CLI command implementations

pub mod curriculum;
pub mod generate;
pub mod play;
pub mod simulate;

use std::collections::HashMap;

use anyhow::Result;

use crate::{app::SessionConfig, cli::params::collect_params, curriculum::Orientation};

/// Resolve the orientation from `--orientation`, falling back to `CT` in
/// the host parameters.
pub(crate) fn resolve_orientation(
    orientation: Option<&str>,
    params: &[String],
) -> Result<Orientation> {
    if let Some(value) = orientation {
        return Ok(value.parse()?);
    }
    let params: HashMap<String, String> = collect_params(params)?;
    Ok(SessionConfig::from_params(&params)?.orientation)
}
