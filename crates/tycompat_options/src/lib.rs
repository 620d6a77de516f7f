//! tycompat_options: tsconfig-style options that change assignability.
//!
//! Only the `compilerOptions` entries that affect type relations are read;
//! every other key in a tsconfig.json file is ignored.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// The subset of TypeScript compiler options that affect assignability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub strict: Option<bool>,
    pub strict_null_checks: Option<bool>,
    pub strict_function_types: Option<bool>,
}

impl CompilerOptions {
    /// `strict` defaults to on; an individual flag overrides it.
    pub fn resolve(&self) -> CheckerOptions {
        let strict = self.strict.unwrap_or(true);
        let resolved = CheckerOptions {
            strict_null_checks: self.strict_null_checks.unwrap_or(strict),
            strict_function_types: self.strict_function_types.unwrap_or(strict),
        };
        tracing::debug!(
            strict,
            strict_null_checks = resolved.strict_null_checks,
            strict_function_types = resolved.strict_function_types,
            "resolved compiler options"
        );
        resolved
    }
}

/// Fully resolved options consumed by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerOptions {
    /// When off, `undefined` is assignable to every type.
    pub strict_null_checks: bool,
    /// When off, parameters are compared bivariantly instead of contravariantly.
    pub strict_function_types: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            strict_null_checks: true,
            strict_function_types: true,
        }
    }
}

/// The tsconfig.json file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    pub compiler_options: Option<CompilerOptions>,
}

impl TsConfig {
    pub fn checker_options(&self) -> CheckerOptions {
        self.compiler_options.clone().unwrap_or_default().resolve()
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tsconfig: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a tsconfig.json file from a string.
pub fn parse_tsconfig(content: &str) -> Result<TsConfig, OptionsError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a tsconfig.json file from a path.
pub fn parse_tsconfig_file(path: impl AsRef<Path>) -> Result<TsConfig, OptionsError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_tsconfig(&content)
}
