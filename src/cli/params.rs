//! Host parameters given as repeated `--param KEY=VALUE` flags

use std::collections::HashMap;

use crate::{Error, Result};

/// Split `KEY=VALUE` at the first `=`.
///
/// # Errors
///
/// Returns [`Error::ParseParam`] if there is no `=` or the key is empty.
pub fn parse_param(input: &str) -> Result<(String, String)> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::ParseParam {
            input: input.to_string(),
        }),
    }
}

/// Collect parameters; later keys override earlier ones.
pub fn collect_params<S: AsRef<str>>(inputs: &[S]) -> Result<HashMap<String, String>> {
    inputs
        .iter()
        .map(|input| parse_param(input.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("CT=strategy").unwrap(),
            ("CT".to_string(), "strategy".to_string())
        );
        assert_eq!(
            parse_param("CT=").unwrap(),
            ("CT".to_string(), String::new())
        );
        assert_eq!(parse_param("a=b=c").unwrap().1, "b=c");
        assert!(parse_param("CT").is_err());
        assert!(parse_param("=strategy").is_err());
    }

    #[test]
    fn test_later_params_override() {
        let params = collect_params(&["CT=concept", "CT=strategy"]).unwrap();
        assert_eq!(params["CT"], "strategy");
    }
}
