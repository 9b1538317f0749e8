use std::process::ExitCode;
use std::{env, fs, io};

use htmlcompare::{compare_html, HtmlCompareError};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: htmlcompare <EXPECTED> <ACTUAL>")]
    Usage,
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Compare(#[from] HtmlCompareError),
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode, CliError> {
    let mut args = env::args().skip(1);
    let (Some(expected_path), Some(actual_path)) = (args.next(), args.next()) else {
        return Err(CliError::Usage);
    };
    let expected = read(expected_path)?;
    let actual = read(actual_path)?;

    let result = compare_html(&expected, &actual)?;
    match result.differences.first() {
        None => {
            println!("HTML in both files is the same.");
            Ok(ExitCode::SUCCESS)
        }
        Some(difference) => {
            println!("{}", difference.kind);
            println!("  at {}", difference.path);
            println!("-{}", difference.expected.as_deref().unwrap_or(""));
            println!("+{}", difference.actual.as_deref().unwrap_or(""));
            if result.differences.len() > 1 {
                println!("({} more differences)", result.differences.len() - 1);
            }
            Ok(ExitCode::from(1))
        }
    }
}

fn read(path: String) -> Result<String, CliError> {
    fs::read_to_string(&path).map_err(|source| CliError::Read { path, source })
}
