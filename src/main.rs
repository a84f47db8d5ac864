use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use decl_spans::{
    init_logging, Driver, ExtractOptions, FailurePolicy, Language, RunSummary, SelectionSet,
    SpanError, SpanUnit,
};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

/// Print the spans of declarations and comments in source files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON array of category names to report (class, function, property,
    /// field, namespace, comment). Omit when --select is given.
    #[arg(value_name = "DECLARATIONS", required_unless_present = "select")]
    declarations: Option<PathBuf>,

    /// Source files, processed in the order given
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Comma-separated category names, used instead of a DECLARATIONS file
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    select: Option<Vec<String>>,

    /// Parse every file as this language (csharp, java, python)
    #[arg(long)]
    language: Option<Language>,

    /// Span coordinates: chars, bytes or lines
    #[arg(long, default_value = "chars")]
    unit: SpanUnit,

    /// Skip files that cannot be read or parsed instead of stopping
    #[arg(long)]
    keep_going: bool,

    /// Parse files in parallel (output order is unchanged)
    #[arg(long)]
    parallel: bool,

    /// Treat files with syntax errors as unparsable
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Selection source and input files
    ///
    /// With `--select`, the first positional argument is an input file rather
    /// than a declarations file.
    fn into_inputs(self) -> Result<(SelectionSet, Vec<PathBuf>, ExtractOptions)> {
        let options = ExtractOptions {
            unit: self.unit,
            on_error: if self.keep_going {
                FailurePolicy::Skip
            } else {
                FailurePolicy::Abort
            },
            parallel: self.parallel,
            strict: self.strict,
            language: self.language,
        };

        let Cli {
            declarations,
            files,
            select,
            ..
        } = self;
        let (selected, declarations, files) = match select {
            Some(names) => {
                let files: Vec<PathBuf> = declarations.into_iter().chain(files).collect();
                (Some(SelectionSet::from_names(names)), None, files)
            }
            None => (None, declarations, files),
        };

        if files.is_empty() {
            return Err(SpanError::Usage("no input files given".to_string()).into());
        }

        let selection = match (selected, declarations) {
            (Some(selection), _) => selection,
            (None, Some(path)) => SelectionSet::load(&path)?,
            (None, None) => {
                return Err(SpanError::Usage("no declarations file given".to_string()).into())
            }
        };

        Ok((selection, files, options))
    }
}

fn run(cli: Cli) -> Result<RunSummary> {
    let (selection, files, options) = cli.into_inputs()?;
    let driver = Driver::new(selection, options);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = driver.run(&files, &mut out)?;
    Ok(summary)
}

/// Help and version requests are not usage errors
fn is_informational(err: &clap::Error) -> bool {
    matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if is_informational(&e) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };
    init_logging(cli.verbose);

    match run(cli) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(summary) => {
            eprintln!("{} file(s) could not be processed:", summary.failures.len());
            for failure in &summary.failures {
                eprintln!("  {}", failure.error);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("decl-spans").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_declarations_file_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let decls = dir.path().join("decls.json");
        fs::write(&decls, r#"["class"]"#).unwrap();

        let cli = parse(&[decls.to_str().unwrap(), "A.cs", "B.java", "--unit", "lines"]);
        let (selection, files, options) = cli.into_inputs().unwrap();
        assert_eq!(selection.names().collect::<Vec<_>>(), vec!["class"]);
        assert_eq!(files, vec![PathBuf::from("A.cs"), PathBuf::from("B.java")]);
        assert_eq!(options.unit, SpanUnit::Lines);
        assert_eq!(options.on_error, FailurePolicy::Abort);
    }

    #[test]
    fn test_select_makes_first_positional_a_file() {
        let cli = parse(&["--select", "class,comment", "--keep-going", "A.cs", "b.py"]);
        let (selection, files, options) = cli.into_inputs().unwrap();
        assert_eq!(selection.len(), 2);
        assert_eq!(files, vec![PathBuf::from("A.cs"), PathBuf::from("b.py")]);
        assert_eq!(options.on_error, FailurePolicy::Skip);
    }

    #[test]
    fn test_no_files_is_usage_error() {
        let err = parse(&["decls.json"]).into_inputs().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SpanError>(),
            Some(SpanError::Usage(_))
        ));
    }

    #[test]
    fn test_missing_declarations_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["decl-spans"]).is_err());
        assert!(Cli::try_parse_from(["decl-spans", "--unit", "words", "d.json", "A.cs"]).is_err());
    }

    #[test]
    fn test_parse_failures_are_usage_errors() {
        let err = Cli::try_parse_from(["decl-spans"]).err().unwrap();
        assert!(!is_informational(&err));

        let err = Cli::try_parse_from(["decl-spans", "--bogus", "d.json", "A.cs"])
            .err()
            .unwrap();
        assert!(!is_informational(&err));

        for flag in ["--help", "--version"] {
            let err = Cli::try_parse_from(["decl-spans", flag]).err().unwrap();
            assert!(is_informational(&err), "{} should exit successfully", flag);
        }
    }

    #[test]
    fn test_language_override() {
        let cli = parse(&["--select", "class", "--language", "c#", "Script"]);
        let (_, _, options) = cli.into_inputs().unwrap();
        assert_eq!(options.language, Some(Language::CSharp));
    }
}
