//! Text-level entry points: patch a file's text, or a batch of files.
//!
//! Only the replaced call sites are printed; everything else keeps its
//! original formatting.

use std::fs;
use std::path::{Path, PathBuf};

use nameof_core::TransformArena;
use nameof_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use nameof_options::NameofOptions;
use nameof_parser::parse_source_text;
use rayon::prelude::*;

use crate::error::TransformError;
use crate::transformer::{transform_source_file, Replacement};

/// Outcome of patching one text.
#[derive(Debug, Clone)]
pub struct ReplaceResult {
    /// The patched text, or `None` when nothing was replaced.
    pub output: Option<String>,
    /// Parse diagnostics followed by resolution errors.
    pub diagnostics: DiagnosticCollection,
    pub transformed_calls: usize,
}

impl ReplaceResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Replace every `nameof` call in `text`.
///
/// A file with parse errors is still transformed as far as it could be
/// parsed, with a warning that calls may have been missed.
pub fn replace_in_text(file_name: &str, text: &str, options: &NameofOptions) -> ReplaceResult {
    let arena = TransformArena::for_source(text.len());
    let parsed = parse_source_text(arena.bump(), file_name, text);
    let mut diagnostics = parsed.diagnostics;
    if diagnostics.has_errors() {
        diagnostics.add(Diagnostic::new(
            &messages::FILE_0_HAS_PARSE_ERRORS_RESULTS_MAY_BE_INCOMPLETE,
            &[file_name],
        ));
    }

    let transformed = transform_source_file(arena.bump(), parsed.source_file, options);
    diagnostics.extend(transformed.diagnostics);

    let calls = transformed.transformed_calls;
    if calls > 0 {
        log::info!(
            "{}: transformed {} nameof call(s), {} bytes of syntax",
            file_name,
            calls,
            arena.allocated_bytes()
        );
        let count = calls.to_string();
        diagnostics.add(Diagnostic::new(&messages::TRANSFORMED_0_CALLS_IN_1, &[&count, file_name]));
    } else {
        log::debug!("{}: no nameof calls", file_name);
    }

    let output = (!transformed.replacements.is_empty()).then(|| apply_replacements(text, &transformed.replacements));
    ReplaceResult {
        output,
        diagnostics,
        transformed_calls: calls,
    }
}

/// Splice `replacements` into `text`. A replacement nested in another one
/// is dropped; the outer one already contains its result.
pub fn apply_replacements(text: &str, replacements: &[Replacement]) -> String {
    let mut ordered: Vec<&Replacement> = replacements.iter().collect();
    ordered.sort_by(|a, b| a.range.pos.cmp(&b.range.pos).then(b.range.end.cmp(&a.range.end)));

    let mut output = String::with_capacity(text.len());
    let mut last_end = 0usize;
    for replacement in ordered {
        let start = replacement.range.pos as usize;
        let end = (replacement.range.end as usize).min(text.len());
        if start < last_end || start > end {
            continue;
        }
        output.push_str(&text[last_end..start]);
        output.push_str(&replacement.text);
        last_end = end;
    }
    output.push_str(&text[last_end..]);
    output
}

// ============================================================================
// Files
// ============================================================================

/// Where transformed files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Overwrite each changed file.
    InPlace,
    /// Write every file under this directory, mirroring its relative path.
    OutDir(PathBuf),
    /// Keep the output in memory for the caller to print.
    Stdout,
    /// Only collect diagnostics.
    Check,
}

/// Outcome of processing one file.
#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub result: Result<ReplaceResult, TransformError>,
    /// Where the output was written, if anywhere.
    pub written_to: Option<PathBuf>,
}

/// Transform `paths` in parallel, one arena and engine per file.
pub fn replace_in_files(paths: &[PathBuf], options: &NameofOptions, mode: &OutputMode) -> Vec<FileResult> {
    let base = std::env::current_dir().ok();
    paths
        .par_iter()
        .map(|path| {
            let (result, written_to) = match process_file(path, options, mode, base.as_deref()) {
                Ok((result, written_to)) => (Ok(result), written_to),
                Err(error) => (Err(error), None),
            };
            FileResult {
                path: path.clone(),
                result,
                written_to,
            }
        })
        .collect()
}

fn process_file(
    path: &Path,
    options: &NameofOptions,
    mode: &OutputMode,
    base: Option<&Path>,
) -> Result<(ReplaceResult, Option<PathBuf>), TransformError> {
    let text = fs::read_to_string(path).map_err(|source| TransformError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path.to_string_lossy();
    let result = replace_in_text(&file_name, &text, options);

    let target = match mode {
        OutputMode::InPlace if result.output.is_some() => Some(path.to_path_buf()),
        OutputMode::OutDir(dir) => Some(out_dir_path(dir, path, base)),
        _ => None,
    };
    let Some(target) = target else {
        return Ok((result, None));
    };

    let contents = result.output.as_deref().unwrap_or(&text);
    write_file(&target, contents)?;
    log::debug!("wrote {}", target.display());
    Ok((result, Some(target)))
}

/// `path` relative to `base`, placed under `dir`. Paths outside `base`
/// keep only their file name.
fn out_dir_path(dir: &Path, path: &Path, base: Option<&Path>) -> PathBuf {
    let relative = if path.is_relative() {
        Some(path)
    } else {
        base.and_then(|base| path.strip_prefix(base).ok())
    };
    match relative {
        Some(relative) => dir.join(relative),
        None => dir.join(path.file_name().unwrap_or(path.as_os_str())),
    }
}

fn write_file(target: &Path, contents: &str) -> Result<(), TransformError> {
    let to_error = |source| TransformError::Write {
        path: target.to_path_buf(),
        source,
    };
    if let Some(parent) = target.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(target, contents).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nameof_core::TextRange;

    fn replacement(pos: u32, end: u32, text: &str) -> Replacement {
        Replacement {
            range: TextRange::new(pos, end),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_apply_keeps_outermost() {
        let text = "f(nameof(nameof(x)));";
        let replacements = [replacement(9, 18, "\"x\""), replacement(2, 19, "\"y\"")];
        assert_eq!(apply_replacements(text, &replacements), "f(\"y\");");
    }

    #[test]
    fn test_apply_in_source_order() {
        let text = "a; b; c;";
        let replacements = [replacement(6, 7, "C"), replacement(0, 1, "A")];
        assert_eq!(apply_replacements(text, &replacements), "A; b; C;");
    }

    #[test]
    fn test_out_dir_path() {
        let dir = Path::new("out");
        assert_eq!(out_dir_path(dir, Path::new("src/a.ts"), None), PathBuf::from("out/src/a.ts"));
        assert_eq!(
            out_dir_path(dir, Path::new("/work/src/a.ts"), Some(Path::new("/work"))),
            PathBuf::from("out/src/a.ts")
        );
        assert_eq!(
            out_dir_path(dir, Path::new("/elsewhere/a.ts"), Some(Path::new("/work"))),
            PathBuf::from("out/a.ts")
        );
    }
}
