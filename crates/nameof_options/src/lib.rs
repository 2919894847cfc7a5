//! nameof_options: `nameof.json` parsing and source file discovery.
//!
//! The configuration file is camelCase JSON; every field is optional and
//! falls back to [`NameofOptions::default`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkdir::WalkDir;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "nameof.json";

/// Options for transforming a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NameofOptions {
    /// The identifier that marks a call.
    pub nameof_name: String,
    /// Modules whose import renames the marker, like a build-time macro.
    pub macro_modules: Vec<String>,
    /// Globs of files to transform, relative to the project root.
    pub include: Vec<String>,
    /// Globs of files and directories to skip.
    pub exclude: Vec<String>,
    /// Write transformed files here instead of in place.
    pub out_dir: Option<String>,
}

impl Default for NameofOptions {
    fn default() -> Self {
        Self {
            nameof_name: "nameof".to_string(),
            macro_modules: vec!["ts-nameof.macro".to_string(), "@typescript-nameof/babel-macro".to_string()],
            include: vec!["src/**/*.ts".to_string(), "src/**/*.tsx".to_string(), "src/**/*.js".to_string()],
            exclude: vec!["node_modules".to_string()],
            out_dir: None,
        }
    }
}

impl NameofOptions {
    /// Check values serde cannot check.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !is_identifier(&self.nameof_name) {
            return Err(OptionsError::InvalidNameofName {
                name: self.nameof_name.clone(),
            });
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("'{name}' is not a valid identifier for nameofName")]
    InvalidNameofName { name: String },
}

// ============================================================================
// Config file
// ============================================================================

/// Parse options from JSON text.
pub fn parse_config(content: &str) -> Result<NameofOptions, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse and validate the options file at `path`.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<NameofOptions, OptionsError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| OptionsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let options = parse_config(&content).map_err(|source| OptionsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    options.validate()?;
    log::debug!("loaded options from {}", path.display());
    Ok(options)
}

// ============================================================================
// Globs
// ============================================================================

/// A compiled include or exclude pattern.
///
/// `**` spans directories, `*` and `?` stay within one path segment.
/// Paths are matched relative to the project root with `/` separators.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    regex: Regex,
}

impl GlobPattern {
    /// A pattern matching exactly the paths it describes.
    pub fn new(pattern: &str) -> Result<Self, OptionsError> {
        Self::compile(pattern, "$")
    }

    /// A pattern that also matches everything below the paths it
    /// describes, as exclude entries do.
    pub fn with_descendants(pattern: &str) -> Result<Self, OptionsError> {
        Self::compile(pattern, "(?:/.*)?$")
    }

    fn compile(pattern: &str, suffix: &str) -> Result<Self, OptionsError> {
        let normalized = normalize(pattern);
        let mut source = String::from("^");
        source.push_str(&glob_to_regex(&normalized));
        source.push_str(suffix);
        let regex = Regex::new(&source).map_err(|source| OptionsError::Glob {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, relative_path: &str) -> bool {
        self.regex.is_match(relative_path)
    }
}

fn normalize(pattern: &str) -> String {
    let pattern = pattern.replace('\\', "/");
    let pattern = pattern.trim_start_matches("./");
    pattern.trim_end_matches('/').to_string()
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() * 2);
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("(?:.*/)?");
                } else {
                    out.push_str(".*");
                }
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            c => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    out
}

// ============================================================================
// Discovery
// ============================================================================

/// Files under `root` matching `options.include` and not
/// `options.exclude`, sorted.
pub fn discover_files(root: &Path, options: &NameofOptions) -> Result<Vec<PathBuf>, OptionsError> {
    let include = options
        .include
        .iter()
        .map(|pattern| GlobPattern::new(pattern))
        .collect::<Result<Vec<_>, _>>()?;
    let exclude = options
        .exclude
        .iter()
        .map(|pattern| GlobPattern::with_descendants(pattern))
        .collect::<Result<Vec<_>, _>>()?;

    fs::read_dir(root).map_err(|source| OptionsError::Read {
        path: root.to_path_buf(),
        source,
    })?;

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match relative_path(root, entry.path()) {
            Some(relative) if exclude.iter().any(|pattern| pattern.is_match(&relative)) => {
                log::trace!("excluded {}", relative);
                false
            }
            _ => true,
        });

    let mut result = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                log::warn!("skipping unreadable entry: {}", error);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(relative) = relative_path(root, entry.path()) else {
            continue;
        };
        if include.iter().any(|pattern| pattern.is_match(&relative)) {
            result.push(entry.into_path());
        }
    }
    result.sort();
    log::debug!("discovered {} file(s) under {}", result.len(), root.display());
    Ok(result)
}

/// `path` relative to `root`, with `/` separators.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = NameofOptions::default();
        assert_eq!(options.nameof_name, "nameof");
        assert_eq!(options.macro_modules, vec!["ts-nameof.macro", "@typescript-nameof/babel-macro"]);
        assert_eq!(options.exclude, vec!["node_modules"]);
        assert!(options.out_dir.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let options = parse_config(r#"{"nameofName": "nm", "outDir": "dist"}"#).unwrap();
        assert_eq!(options.nameof_name, "nm");
        assert_eq!(options.out_dir.as_deref(), Some("dist"));
        assert_eq!(options.include, NameofOptions::default().include);
    }

    #[test]
    fn test_validate_rejects_bad_marker() {
        let options = NameofOptions {
            nameof_name: "name of".to_string(),
            ..NameofOptions::default()
        };
        assert!(matches!(options.validate(), Err(OptionsError::InvalidNameofName { .. })));
        assert!(NameofOptions::default().validate().is_ok());
        assert!(is_identifier("$nameof_1"));
        assert!(!is_identifier("1nameof"));
    }

    #[test]
    fn test_glob_double_star() {
        let glob = GlobPattern::new("src/**/*.ts").unwrap();
        assert!(glob.is_match("src/a.ts"));
        assert!(glob.is_match("src/deep/er/a.ts"));
        assert!(!glob.is_match("src/a.tsx"));
        assert!(!glob.is_match("lib/a.ts"));
    }

    #[test]
    fn test_glob_single_segment() {
        let glob = GlobPattern::new("./src/?.js").unwrap();
        assert!(glob.is_match("src/a.js"));
        assert!(!glob.is_match("src/ab.js"));
        assert!(!glob.is_match("src/x/a.js"));
        assert_eq!(glob.as_str(), "./src/?.js");
    }

    #[test]
    fn test_exclude_matches_descendants() {
        let glob = GlobPattern::with_descendants("node_modules").unwrap();
        assert!(glob.is_match("node_modules"));
        assert!(glob.is_match("node_modules/pkg/index.ts"));
        assert!(!glob.is_match("src/node_modules_like.ts"));

        let nested = GlobPattern::with_descendants("**/generated/").unwrap();
        assert!(nested.is_match("src/generated/a.ts"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let glob = GlobPattern::new("src/a+b.(ts)").unwrap();
        assert!(glob.is_match("src/a+b.(ts)"));
        assert!(!glob.is_match("src/aab.ts"));
    }
}
