//! Multi-file driver
//!
//! Processes files strictly in input order. Each file gets a header line (its
//! path as given) followed by its records. In parallel mode files are parsed on
//! the rayon pool into per-file buffers that are flushed in input order, so the
//! output is identical to a sequential run.

use crate::error::{Result, SpanError};
use crate::extractors::base::SpanExtractor;
use crate::extractors::manager::{ExtractorManager, FileUnit};
use crate::options::{ExtractOptions, FailurePolicy};
use crate::selection::SelectionSet;
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A file that was skipped under [`FailurePolicy::Skip`]
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: SpanError,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_processed: usize,
    pub records_emitted: usize,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Driver {
    manager: ExtractorManager,
    selection: SelectionSet,
}

impl Driver {
    pub fn new(selection: SelectionSet, options: ExtractOptions) -> Self {
        Self {
            manager: ExtractorManager::new(options),
            selection,
        }
    }

    pub fn options(&self) -> &ExtractOptions {
        self.manager.options()
    }

    /// Extract every file in `paths` into `out`
    ///
    /// Fails with [`SpanError::Usage`] when `paths` is empty. Under
    /// [`FailurePolicy::Abort`] the first per-file error ends the run; output for
    /// the files before it has already been written.
    pub fn run<W: Write>(&self, paths: &[PathBuf], out: &mut W) -> Result<RunSummary> {
        if paths.is_empty() {
            return Err(SpanError::Usage("no input files given".to_string()));
        }

        let result = if self.options().parallel {
            self.run_parallel(paths, out)
        } else {
            self.run_sequential(paths, out)
        };
        out.flush()?;

        let summary = result?;
        info!(
            "Processed {} file(s), {} record(s), {} failure(s)",
            summary.files_processed,
            summary.records_emitted,
            summary.failures.len()
        );
        Ok(summary)
    }

    fn run_sequential<W: Write>(&self, paths: &[PathBuf], out: &mut W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for path in paths {
            match self.manager.load(path) {
                Ok(unit) => {
                    summary.records_emitted += self.write_file(&unit, out)?;
                    summary.files_processed += 1;
                }
                Err(error) => self.handle_failure(path, error, &mut summary)?,
            }
        }
        Ok(summary)
    }

    fn run_parallel<W: Write>(&self, paths: &[PathBuf], out: &mut W) -> Result<RunSummary> {
        debug!("Parsing {} file(s) in parallel", paths.len());
        let rendered: Vec<Result<(Vec<u8>, usize)>> = paths
            .par_iter()
            .map(|path| -> Result<(Vec<u8>, usize)> {
                let unit = self.manager.load(path)?;
                let mut buffer = Vec::new();
                let count = self.write_file(&unit, &mut buffer)?;
                Ok((buffer, count))
            })
            .collect();

        let mut summary = RunSummary::default();
        for (path, result) in paths.iter().zip(rendered) {
            match result {
                Ok((buffer, count)) => {
                    out.write_all(&buffer)?;
                    summary.records_emitted += count;
                    summary.files_processed += 1;
                }
                Err(error) => self.handle_failure(path, error, &mut summary)?,
            }
        }
        Ok(summary)
    }

    /// Header line, then every record of the file; returns the record count
    fn write_file<W: Write>(&self, unit: &FileUnit, out: &mut W) -> Result<usize> {
        writeln!(out, "{}", unit.path.display())?;

        let extractor = SpanExtractor::new(
            unit.language.registry(),
            &self.selection,
            &unit.content,
            self.options().unit,
        );
        let mut count = 0;
        for record in unit.records(&extractor) {
            writeln!(out, "{}", record)?;
            count += 1;
        }

        debug!("{}: {} record(s)", unit.path.display(), count);
        Ok(count)
    }

    fn handle_failure(
        &self,
        path: &Path,
        error: SpanError,
        summary: &mut RunSummary,
    ) -> Result<()> {
        if !error.is_per_file() {
            return Err(error);
        }
        match self.options().on_error {
            FailurePolicy::Abort => Err(error),
            FailurePolicy::Skip => {
                warn!("Skipping {}: {}", path.display(), error);
                summary.failures.push(FileFailure {
                    path: path.to_path_buf(),
                    error,
                });
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::SpanUnit;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn run(
        names: &[&str],
        options: ExtractOptions,
        paths: &[PathBuf],
    ) -> (Result<RunSummary>, String) {
        let driver = Driver::new(SelectionSet::from_names(names.iter().copied()), options);
        let mut out = Vec::new();
        let result = driver.run(paths, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    const ALL: &[&str] = &["class", "function", "property", "field", "namespace", "comment"];

    #[test]
    fn test_no_files_is_usage_error() {
        let (result, out) = run(ALL, ExtractOptions::default(), &[]);
        assert!(matches!(result, Err(SpanError::Usage(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_declarations_precede_comments() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "A.cs", "// head\nclass A {\n    int x; // tail\n}\n");

        let (result, out) = run(ALL, ExtractOptions::default(), &[a.clone()]);
        let summary = result.unwrap();

        let expected = format!(
            "{}\nclass - [8-38]\nfield - [22-28]\ncomment - [0-7]\ncomment - [29-36]\n",
            a.display()
        );
        assert_eq!(out, expected);
        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.records_emitted, 4);
    }

    #[test]
    fn test_files_are_grouped_in_input_order() {
        let dir = TempDir::new().unwrap();
        let b = write(&dir, "B.cs", "class B {}");
        let a = write(&dir, "A.cs", "class A {}");

        let (result, out) = run(&["class"], ExtractOptions::default(), &[b.clone(), a.clone()]);
        result.unwrap();
        assert_eq!(
            out,
            format!("{}\nclass - [0-10]\n{}\nclass - [0-10]\n", b.display(), a.display())
        );
    }

    #[test]
    fn test_empty_selection_still_prints_header() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "A.cs", "// c\nclass A { void M() { } }");

        let (result, out) = run(&[], ExtractOptions::default(), &[a.clone()]);
        assert_eq!(result.unwrap().records_emitted, 0);
        assert_eq!(out, format!("{}\n", a.display()));
    }

    #[test]
    fn test_abort_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "A.cs", "class A {}");
        let missing = dir.path().join("Missing.cs");
        let c = write(&dir, "C.cs", "class C {}");

        let (result, out) = run(&["class"], ExtractOptions::default(), &[a.clone(), missing, c]);
        assert!(matches!(result, Err(SpanError::Read { .. })));
        assert_eq!(out, format!("{}\nclass - [0-10]\n", a.display()));
    }

    #[test]
    fn test_non_utf8_file_does_not_stop_the_run() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("A.cs");
        fs::write(&a, b"// caf\xe9\nclass A {}").unwrap();
        let b = write(&dir, "B.cs", "class B {}");

        let (result, out) = run(&["class"], ExtractOptions::default(), &[a.clone(), b.clone()]);
        let summary = result.unwrap();
        assert_eq!(summary.files_processed, 2);
        assert_eq!(
            out,
            format!("{}\nclass - [8-18]\n{}\nclass - [0-10]\n", a.display(), b.display())
        );
    }

    #[test]
    fn test_skip_continues_and_reports() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "A.cs", "class A {}");
        let unknown = write(&dir, "notes.txt", "class Z {}");
        let c = write(&dir, "C.cs", "class C {}");

        let options = ExtractOptions {
            on_error: FailurePolicy::Skip,
            ..Default::default()
        };
        let (result, out) = run(&["class"], options, &[a.clone(), unknown.clone(), c.clone()]);
        let summary = result.unwrap();

        assert_eq!(
            out,
            format!("{}\nclass - [0-10]\n{}\nclass - [0-10]\n", a.display(), c.display())
        );
        assert!(!summary.is_success());
        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].path, unknown);
        assert!(matches!(
            summary.failures[0].error,
            SpanError::UnsupportedLanguage { .. }
        ));
    }

    #[test]
    fn test_parallel_output_matches_sequential() {
        let dir = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..12)
            .map(|i| {
                let body = "    int f;\n".repeat(i + 1);
                write(
                    &dir,
                    &format!("F{}.cs", i),
                    &format!("// file {}\nclass F{} {{\n{}}}\n", i, i, body),
                )
            })
            .collect();

        let (sequential, expected) = run(ALL, ExtractOptions::default(), &paths);
        let parallel_options = ExtractOptions {
            parallel: true,
            ..Default::default()
        };
        let (parallel, actual) = run(ALL, parallel_options, &paths);

        assert_eq!(actual, expected);
        assert_eq!(
            sequential.unwrap().records_emitted,
            parallel.unwrap().records_emitted
        );
    }

    #[test]
    fn test_mixed_languages_and_line_unit() {
        let dir = TempDir::new().unwrap();
        let java = write(&dir, "A.java", "class A {\n  void m() {}\n}\n");
        let python = write(&dir, "a.py", "# note\ndef f():\n    pass\n");

        let options = ExtractOptions {
            unit: SpanUnit::Lines,
            ..Default::default()
        };
        let selection = ["class", "function", "comment"];
        let (result, out) = run(&selection, options, &[java.clone(), python.clone()]);
        result.unwrap();
        assert_eq!(
            out,
            format!(
                "{}\nclass - [1-3]\nfunction - [2-2]\n{}\nfunction - [2-3]\ncomment - [1-1]\n",
                java.display(),
                python.display()
            )
        );
    }
}
