//! Batch generation over a directory tree.
//!
//! Discovers candidate definition files, filters out vendor
//! namespaces and files that can't possibly declare a client, runs
//! extraction and synthesis per file, and writes wrapper files to the
//! output directory. Per-file problems never stop the batch; the
//! summary and exit status report them at the end of the run.

use crate::extract::{CLIENT_MARKER, extract_service};
use crate::synth::Synthesizer;
use std::fs;
use std::path::{Path, PathBuf};
use svcgen_core::{Error, GenerationSummary, Result, Role};
use walkdir::WalkDir;

/// Vendor namespace segments excluded from generation by default.
///
/// Well-known protobuf types ship their own definition files but never
/// describe an application service.
pub const DEFAULT_EXCLUDED_NAMESPACES: &[&str] = &["google/protobuf"];

/// Configuration for one generation batch.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Root directory searched for definition files.
    pub types_dir: PathBuf,

    /// Directory wrapper files are written to (created if absent).
    pub out_dir: PathBuf,

    /// Import prefix from the output directory back to the definition
    /// files, e.g. `../types`.
    pub import_prefix: String,

    /// Role suffix of the definition files (`types`).
    pub source_role: Role,

    /// Role suffix given to generated wrappers (`service`).
    pub wrapper_role: Role,

    /// Namespace path fragments excluded before extraction.
    pub excluded_namespaces: Vec<String>,
}

/// Runs extraction and synthesis over every candidate definition file.
#[derive(Debug)]
pub struct BatchGenerator {
    config: BatchConfig,
    synth: Synthesizer,
}

impl BatchGenerator {
    /// Creates a generator for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the wrapper templates fail to register.
    pub fn new(config: BatchConfig) -> Result<Self> {
        Ok(Self {
            config,
            synth: Synthesizer::new()?,
        })
    }

    /// Runs the batch: discover, filter, extract, synthesize, write.
    ///
    /// Every output file is fully overwritten; outputs are always
    /// regenerated, never merged or hand-edited. Files that are not
    /// service files are skipped silently (info logging only); fatal
    /// per-file I/O errors are isolated to their file and counted in
    /// the summary.
    ///
    /// # Errors
    ///
    /// Returns an error only for unrecoverable conditions: the search
    /// root cannot be walked or the output directory cannot be
    /// created.
    pub fn run(&self) -> Result<GenerationSummary> {
        // Scoped, idempotent creation; no error if it already exists
        fs::create_dir_all(&self.config.out_dir)
            .map_err(|e| Error::io(self.config.out_dir.display().to_string(), e))?;

        let candidates = self.discover()?;
        tracing::info!(
            count = candidates.len(),
            dir = %self.config.types_dir.display(),
            "discovered candidate definition files"
        );

        let mut summary = GenerationSummary::default();

        for path in candidates {
            match self.generate_one(&path) {
                Ok(Outcome::Generated(out_path)) => {
                    summary.generated += 1;
                    tracing::info!(path = %out_path.display(), "generated wrapper");
                }
                Ok(Outcome::Skipped) => {
                    summary.skipped += 1;
                    tracing::info!(path = %path.display(), "not a service file, skipped");
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!(path = %path.display(), error = %e, "generation failed");
                }
            }
        }

        tracing::info!(
            generated = summary.generated,
            skipped = summary.skipped,
            failed = summary.failed,
            "generation run complete"
        );

        Ok(summary)
    }

    /// Finds definition files under the search root, in sorted order.
    ///
    /// Ordering between files is not semantically significant, but a
    /// deterministic order keeps runs reproducible.
    fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.config.types_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map_or_else(|| self.config.types_dir.clone(), Path::to_path_buf);
                Error::io(
                    path.display().to_string(),
                    e.into_io_error().unwrap_or_else(|| {
                        std::io::Error::other("directory walk failed")
                    }),
                )
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if self.config.source_role.strip(name).is_none() {
                continue;
            }
            if self.is_excluded(entry.path()) {
                tracing::debug!(path = %entry.path().display(), "excluded vendor namespace");
                continue;
            }

            files.push(entry.into_path());
        }

        Ok(files)
    }

    /// Checks whether a path lies under an excluded namespace segment.
    fn is_excluded(&self, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");
        self.config
            .excluded_namespaces
            .iter()
            .any(|ns| normalized.contains(ns.as_str()))
    }

    /// Processes one definition file end to end.
    fn generate_one(&self, path: &Path) -> Result<Outcome> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;

        // Cheap pre-filter; the extractor stays authoritative
        if !content.contains(CLIENT_MARKER) {
            return Ok(Outcome::Skipped);
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let base = self
            .config
            .source_role
            .strip(file_name)
            .unwrap_or(file_name);

        let Some(descriptor) = extract_service(&content, base) else {
            return Ok(Outcome::Skipped);
        };

        let source = self.synth.render_wrapper(
            &descriptor,
            &self.config.import_prefix,
            &self.config.source_role,
        )?;

        let out_path = self
            .config
            .out_dir
            .join(format!("{base}{}", self.config.wrapper_role.file_suffix()));
        fs::write(&out_path, source)
            .map_err(|e| Error::io(out_path.display().to_string(), e))?;

        Ok(Outcome::Generated(out_path))
    }
}

/// Per-file outcome of a generation attempt.
enum Outcome {
    Generated(PathBuf),
    Skipped,
}
