//! Role migration for generated files.
//!
//! Moves every file carrying one role suffix to another
//! (`.service.ts` to `.types.ts` and the like), rewriting relative
//! imports between siblings so the tree keeps compiling. Each file's
//! new copy is written before its original is deleted, so a failed
//! write never loses content.

use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use svcgen_core::{Error, MigrationSummary, Result, Role};
use walkdir::WalkDir;

/// Migrates files from one role suffix to another under a root.
#[derive(Debug)]
pub struct Migrator {
    root: PathBuf,
    from: Role,
    to: Role,
}

impl Migrator {
    /// Creates a migrator moving `from`-role files to the `to` role.
    ///
    /// # Errors
    ///
    /// Returns an error if both roles are the same.
    pub fn new(root: PathBuf, from: Role, to: Role) -> Result<Self> {
        if from == to {
            return Err(Error::InvalidArgument(format!(
                "source and target roles are both '{from}'"
            )));
        }
        Ok(Self { root, from, to })
    }

    /// Runs the migration over the whole tree.
    ///
    /// Files are processed independently; a failure on one file is
    /// logged, counted, and leaves that file's original in place
    /// while the rest of the batch continues. Running again on an
    /// already migrated tree finds no candidates and is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error only if the root directory cannot be walked.
    pub fn run(&self) -> Result<MigrationSummary> {
        let by_dir = self.discover()?;
        let mut summary = MigrationSummary::default();

        for (dir, bases) in &by_dir {
            for base in bases {
                match self.migrate_one(dir, base, bases) {
                    Ok(new_path) => {
                        summary.migrated += 1;
                        tracing::info!(path = %new_path.display(), "migrated");
                    }
                    Err(e) => {
                        summary.failed += 1;
                        tracing::error!(
                            dir = %dir.display(),
                            base,
                            error = %e,
                            "migration failed, original left in place"
                        );
                    }
                }
            }
        }

        tracing::info!(
            migrated = summary.migrated,
            failed = summary.failed,
            "migration run complete"
        );
        Ok(summary)
    }

    /// Groups candidate base identifiers by their parent directory.
    ///
    /// Sibling rewrites only ever look inside one directory; relative
    /// imports across directories keep their role suffix untouched.
    fn discover(&self) -> Result<Vec<(PathBuf, Vec<String>)>> {
        let mut by_dir: HashMap<PathBuf, Vec<String>> = HashMap::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                Error::io(
                    self.root.display().to_string(),
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
            let Some(base) = self.from.strip(name) else {
                continue;
            };
            let Some(parent) = entry.path().parent() else {
                continue;
            };
            by_dir
                .entry(parent.to_path_buf())
                .or_default()
                .push(base.to_string());
        }

        let mut dirs: Vec<_> = by_dir.into_iter().collect();
        dirs.sort();
        Ok(dirs)
    }

    /// Migrates a single file: rewrite sibling imports, write the new
    /// file, then delete the original.
    fn migrate_one(&self, dir: &Path, base: &str, siblings: &[String]) -> Result<PathBuf> {
        let old_path = dir.join(format!("{base}{}", self.from.file_suffix()));
        let new_path = dir.join(format!("{base}{}", self.to.file_suffix()));

        if siblings.iter().filter(|s| s.as_str() == base).count() > 1 {
            return Err(Error::DuplicateSibling {
                base: base.to_string(),
                dir: dir.display().to_string(),
            });
        }

        let content = fs::read_to_string(&old_path)
            .map_err(|e| Error::io(old_path.display().to_string(), e))?;
        let rewritten = self.rewrite_imports(&content, siblings);

        fs::write(&new_path, rewritten)
            .map_err(|e| Error::io(new_path.display().to_string(), e))?;
        fs::remove_file(&old_path)
            .map_err(|e| Error::io(old_path.display().to_string(), e))?;

        Ok(new_path)
    }

    /// Rewrites `./<sibling>.<from>` imports to the target role.
    ///
    /// Bases are matched exactly up to the role suffix and the quote
    /// delimiter, so `foo` never rewrites an import of `foobar`.
    fn rewrite_imports(&self, content: &str, siblings: &[String]) -> String {
        let mut result = content.to_string();

        for sibling in siblings {
            let pattern = format!(
                r#"from (['"])\./{}\.{}(['"])"#,
                regex::escape(sibling),
                regex::escape(self.from.as_str())
            );
            // Per-sibling pattern over already-validated role strings
            let Ok(re) = Regex::new(&pattern) else {
                continue;
            };
            result = re
                .replace_all(&result, |caps: &regex::Captures<'_>| {
                    format!("from {}./{sibling}.{}{}", &caps[1], self.to, &caps[2])
                })
                .into_owned();
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn migrator(root: &Path) -> Migrator {
        Migrator::new(
            root.to_path_buf(),
            Role::new("service").unwrap(),
            Role::new("types").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_identical_roles() {
        let err = Migrator::new(
            PathBuf::from("."),
            Role::new("types").unwrap(),
            Role::new("types").unwrap(),
        )
        .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_renames_and_rewrites_sibling_imports() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("a.service.ts"),
            "import { B } from './b.service';\nexport const A = 1;\n",
        )
        .unwrap();
        fs::write(tmp.path().join("b.service.ts"), "export const B = 2;\n").unwrap();

        let summary = migrator(tmp.path()).run().unwrap();
        assert_eq!(summary.migrated, 2);
        assert_eq!(summary.failed, 0);

        assert!(!tmp.path().join("a.service.ts").exists());
        assert!(!tmp.path().join("b.service.ts").exists());

        let a = fs::read_to_string(tmp.path().join("a.types.ts")).unwrap();
        assert!(a.contains("from './b.types';"));
    }

    #[test]
    fn test_preserves_quote_style() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("a.service.ts"),
            "import { B } from \"./b.service\";\n",
        )
        .unwrap();
        fs::write(tmp.path().join("b.service.ts"), "export const B = 2;\n").unwrap();

        migrator(tmp.path()).run().unwrap();

        let a = fs::read_to_string(tmp.path().join("a.types.ts")).unwrap();
        assert!(a.contains("from \"./b.types\";"));
    }

    #[test]
    fn test_exact_base_does_not_touch_longer_base() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("a.service.ts"),
            "import { F } from './foobar.service';\nimport { G } from './foo.service';\n",
        )
        .unwrap();
        fs::write(tmp.path().join("foo.service.ts"), "export const G = 1;\n").unwrap();
        fs::write(tmp.path().join("foobar.service.ts"), "export const F = 2;\n").unwrap();

        migrator(tmp.path()).run().unwrap();

        let a = fs::read_to_string(tmp.path().join("a.types.ts")).unwrap();
        assert!(a.contains("from './foo.types';"));
        assert!(a.contains("from './foobar.types';"));
    }

    #[test]
    fn test_cross_directory_imports_untouched() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(
            tmp.path().join("a.service.ts"),
            "import { S } from './sub/s.service';\n",
        )
        .unwrap();
        fs::write(sub.join("s.service.ts"), "export const S = 1;\n").unwrap();

        migrator(tmp.path()).run().unwrap();

        let a = fs::read_to_string(tmp.path().join("a.types.ts")).unwrap();
        assert!(a.contains("from './sub/s.service';"));
        assert!(tmp.path().join("sub/s.types.ts").exists());
    }

    #[test]
    fn test_write_failure_leaves_original_in_place() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.service.ts"), "export const A = 1;\n").unwrap();
        // A directory squatting on the target path makes the write fail
        fs::create_dir_all(tmp.path().join("a.types.ts")).unwrap();

        let summary = migrator(tmp.path()).run().unwrap();
        assert_eq!(summary.migrated, 0);
        assert_eq!(summary.failed, 1);
        assert!(tmp.path().join("a.service.ts").exists());
    }

    #[test]
    fn test_second_run_is_noop() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.service.ts"), "export const A = 1;\n").unwrap();

        let m = migrator(tmp.path());
        assert_eq!(m.run().unwrap().migrated, 1);

        let again = m.run().unwrap();
        assert_eq!(again.migrated, 0);
        assert_eq!(again.failed, 0);
    }
}
