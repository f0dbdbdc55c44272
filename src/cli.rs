use crate::error::UsageError;
use crate::options::{CountOptions, parse_buffer_size};

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: $ readsfq [options] reads.fq
       $ gunzip -c reads.fq.gz | readsfq [options]
This will count the number of reads in a FASTQ file, giving an accurate count
even for files with multi-line reads.
Options:
-B [buffer_size]: Specify a file reading buffer size, in bytes. Default: 65535
                  WARNING: Lines longer than this will end up truncated.";

// `-h` keeps its historical meaning, so clap's own help/version are off.
#[derive(Debug, Parser)]
#[command(
    name = "readsfq",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct Args {
    #[arg(short = 'B', value_name = "buffer_size", allow_hyphen_values = true)]
    buffer_size: Option<String>,

    #[arg(value_name = "reads.fq")]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// `-h`: print [`USAGE`].
    Usage,
    Count {
        /// `None` reads standard input.
        input: Option<PathBuf>,
        options: CountOptions,
    },
}

/// Parse the full argument list (program name first).
pub fn parse_args<I, T>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    // `-h` wins even where it would otherwise be read as a `-B` value.
    if args.iter().skip(1).any(|arg| arg == "-h") {
        return Ok(Command::Usage);
    }

    let args = Args::try_parse_from(args)?;

    let mut options = CountOptions::default();
    if let Some(raw) = args.buffer_size.as_deref() {
        options.buffer_size = parse_buffer_size(raw)?;
    }

    let mut inputs = args.inputs.into_iter();
    let input = inputs.next();
    if inputs.next().is_some() {
        return Err(UsageError::TooManyInputs);
    }
    Ok(Command::Count { input, options })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DEFAULT_BUFFER_SIZE;

    #[test]
    fn no_args_reads_stdin_with_defaults() {
        let cmd = parse_args(["readsfq"]).unwrap();
        assert_eq!(
            cmd,
            Command::Count {
                input: None,
                options: CountOptions {
                    buffer_size: DEFAULT_BUFFER_SIZE
                },
            }
        );
    }

    #[test]
    fn file_and_buffer_size() {
        let cmd = parse_args(["readsfq", "-B", "1024", "reads.fq"]).unwrap();
        assert_eq!(
            cmd,
            Command::Count {
                input: Some(PathBuf::from("reads.fq")),
                options: CountOptions { buffer_size: 1024 },
            }
        );
        // Order does not matter.
        let cmd = parse_args(["readsfq", "reads.fq", "-B", "7"]).unwrap();
        assert!(matches!(
            cmd,
            Command::Count { options: CountOptions { buffer_size: 7 }, .. }
        ));
    }

    #[test]
    fn help_wins_over_everything_else() {
        assert_eq!(parse_args(["readsfq", "-h"]).unwrap(), Command::Usage);
        assert_eq!(
            parse_args(["readsfq", "-B", "10", "x.fq", "-h"]).unwrap(),
            Command::Usage
        );
        assert_eq!(parse_args(["readsfq", "-B", "-h"]).unwrap(), Command::Usage);
        assert_eq!(
            parse_args(["readsfq", "a.fq", "b.fq", "-h"]).unwrap(),
            Command::Usage
        );
    }

    #[test]
    fn repeated_buffer_size_keeps_last() {
        let cmd = parse_args(["readsfq", "-B", "5", "-B", "6"]).unwrap();
        assert_eq!(
            cmd,
            Command::Count {
                input: None,
                options: CountOptions { buffer_size: 6 },
            }
        );
    }

    #[test]
    fn bad_buffer_sizes() {
        for raw in ["abc", "0", "-5", "12345678901"] {
            let err = parse_args(["readsfq", "-B", raw]).unwrap_err();
            assert!(
                matches!(&err, UsageError::InvalidBufferSize(s) if s == raw),
                "{raw}: {err}"
            );
        }
        assert!(matches!(
            parse_args(["readsfq", "-B"]),
            Err(UsageError::Arguments(_))
        ));
    }

    #[test]
    fn only_one_input() {
        let err = parse_args(["readsfq", "a.fq", "b.fq"]).unwrap_err();
        assert!(matches!(err, UsageError::TooManyInputs));
        assert_eq!(err.to_string(), "Can only process one file argument");
    }

    #[test]
    fn unknown_flag_is_usage_error() {
        let err = parse_args(["readsfq", "-x"]).unwrap_err();
        assert!(matches!(err, UsageError::Arguments(_)));
        assert!(!err.to_string().starts_with("error:"));
    }
}
