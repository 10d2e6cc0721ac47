//! Barrel index generation for a directory of wrapper files.
//!
//! Scans the output directory for wrapper files, recovers each file's
//! exported class name, and writes an `index.ts` re-exporting all of
//! them. The generated files themselves are the source of truth for
//! class names; a filename-derived fallback only covers files that
//! cannot be read back.

use crate::synth::{IndexEntry, Synthesizer};
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;
use svcgen_core::{Error, Result, Role};
use walkdir::WalkDir;

/// Name of the barrel file written into the wrapper directory.
pub const INDEX_FILE: &str = "index.ts";

static EXPORTED_CLASS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export class (\w+ClientService)").expect("valid exported class regex")
});

/// Builds the `index.ts` barrel for a wrapper directory.
#[derive(Debug)]
pub struct IndexAggregator {
    out_dir: PathBuf,
    wrapper_role: Role,
    synth: Synthesizer,
}

impl IndexAggregator {
    /// Creates an aggregator for the given wrapper directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the index template fails to register.
    pub fn new(out_dir: PathBuf, wrapper_role: Role) -> Result<Self> {
        Ok(Self {
            out_dir,
            wrapper_role,
            synth: Synthesizer::new()?,
        })
    }

    /// Scans the wrapper directory and writes `index.ts`.
    ///
    /// Every wrapper file present in the directory gets an entry; a
    /// file that cannot be read back falls back to a filename-derived
    /// class name rather than being dropped from the barrel. Returns
    /// the number of entries written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be walked, the
    /// template fails to render, or the index file cannot be written.
    pub fn run(&self) -> Result<usize> {
        let entries = self.collect_entries()?;
        let source = self.synth.render_index(&entries)?;

        let index_path = self.out_dir.join(INDEX_FILE);
        fs::write(&index_path, source)
            .map_err(|e| Error::io(index_path.display().to_string(), e))?;

        tracing::info!(
            path = %index_path.display(),
            entries = entries.len(),
            "wrote barrel index"
        );
        Ok(entries.len())
    }

    /// Collects one entry per wrapper file, in sorted order.
    fn collect_entries(&self) -> Result<Vec<IndexEntry>> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(&self.out_dir)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                Error::io(
                    self.out_dir.display().to_string(),
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
                )
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(base) = self.wrapper_role.strip(name) else {
                continue;
            };

            let class_name = match fs::read_to_string(entry.path()) {
                Ok(content) => Self::exported_class(&content)
                    .unwrap_or_else(|| fallback_class_name(base)),
                Err(e) => {
                    tracing::warn!(
                        path = %entry.path().display(),
                        error = %e,
                        "could not read wrapper back, deriving class name from filename"
                    );
                    fallback_class_name(base)
                }
            };

            // Import path relative to the index, without the .ts extension
            let file_stem = name.trim_end_matches(".ts").to_string();
            entries.push(IndexEntry {
                file_stem,
                class_name,
            });
        }

        Ok(entries)
    }

    /// Finds the exported wrapper class declared in a generated file.
    fn exported_class(content: &str) -> Option<String> {
        EXPORTED_CLASS_REGEX
            .captures(content)
            .map(|caps| caps[1].to_string())
    }
}

/// Derives a class name from a wrapper file's base identifier.
///
/// Only the first dotted segment contributes, capitalized as-is. This
/// mirrors the naming the generator itself would have produced for a
/// single-segment base.
fn fallback_class_name(base: &str) -> String {
    let first_segment = base.split('.').next().unwrap_or(base);
    let mut chars = first_segment.chars();
    let capitalized = match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("{capitalized}ServiceClientService")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn aggregator(dir: &TempDir) -> IndexAggregator {
        IndexAggregator::new(dir.path().to_path_buf(), Role::new("service").unwrap()).unwrap()
    }

    #[test]
    fn test_reads_class_name_from_file_content() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("gamehub-gateway.service.ts"),
            "export class GameServiceClientService implements OnModuleInit {}",
        )
        .unwrap();

        let count = aggregator(&tmp).run().unwrap();
        assert_eq!(count, 1);

        let index = fs::read_to_string(tmp.path().join(INDEX_FILE)).unwrap();
        assert!(index
            .contains("import { GameServiceClientService } from './gamehub-gateway.service';"));
        assert!(index.contains("  GameServiceClientService,"));
    }

    #[test]
    fn test_falls_back_to_filename_when_no_class_found() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("billing.service.ts"), "// no class here").unwrap();

        aggregator(&tmp).run().unwrap();

        let index = fs::read_to_string(tmp.path().join(INDEX_FILE)).unwrap();
        assert!(index.contains("import { BillingServiceClientService } from './billing.service';"));
    }

    #[test]
    fn test_fallback_uses_only_first_dotted_segment() {
        assert_eq!(
            fallback_class_name("gamehub-gateway"),
            "Gamehub-gatewayServiceClientService"
        );
        assert_eq!(fallback_class_name("auth.v2"), "AuthServiceClientService");
    }

    #[test]
    fn test_non_wrapper_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("readme.md"), "docs").unwrap();
        fs::write(tmp.path().join("helper.ts"), "export const X = 1;").unwrap();
        fs::write(
            tmp.path().join("auth.service.ts"),
            "export class AuthServiceClientService {}",
        )
        .unwrap();

        let count = aggregator(&tmp).run().unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_entries_are_sorted_by_file_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("zeta.service.ts"),
            "export class ZetaServiceClientService {}",
        )
        .unwrap();
        fs::write(
            tmp.path().join("alpha.service.ts"),
            "export class AlphaServiceClientService {}",
        )
        .unwrap();

        aggregator(&tmp).run().unwrap();

        let index = fs::read_to_string(tmp.path().join(INDEX_FILE)).unwrap();
        let alpha = index.find("AlphaServiceClientService").unwrap();
        let zeta = index.find("ZetaServiceClientService").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn test_overwrites_existing_index() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(INDEX_FILE), "// stale index").unwrap();
        fs::write(
            tmp.path().join("auth.service.ts"),
            "export class AuthServiceClientService {}",
        )
        .unwrap();

        aggregator(&tmp).run().unwrap();

        let index = fs::read_to_string(tmp.path().join(INDEX_FILE)).unwrap();
        assert!(!index.contains("stale"));
        assert!(index.contains("AuthServiceClientService"));
    }
}
