//! Count the reads in a FASTQ file.
//!
//! - Streaming, line-by-line; the file is never held in memory.
//! - Multi-line sequence and quality blocks are handled by comparing the
//!   accumulated quality length against the sequence length.
//! - Lines longer than the configured buffer are truncated.
//! - Plain text only; pipe compressed input through `gunzip -c`.

pub mod cli;
pub mod counter;
pub mod error;
pub mod line;
pub mod options;
pub mod reader;

pub use crate::cli::{Command, USAGE, parse_args};
pub use crate::counter::{CountSummary, ReadCounter, ScanWarning, State, WarningTally};
pub use crate::error::{CountError, FormatError, IoContext, UsageError};
pub use crate::options::{CountOptions, DEFAULT_BUFFER_SIZE};
pub use crate::reader::{FastqCounter, Source, count_reads};
