use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("looked like a header line but does not start with \"@\"")]
    MissingHeader,
}

#[derive(Debug, Error)]
pub enum CountError {
    #[error("\"{}\": {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("read failed after line {} (byte {}): {source}", .ctx.line_num, .ctx.byte_pos)]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("Line {} {source}.", .ctx.line_num)]
    Format {
        #[source]
        source: FormatError,
        ctx: IoContext,
    },
}

impl CountError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn fmt_err(source: FormatError, ctx: IoContext) -> Self {
        Self::Format { source, ctx }
    }

    /// 1-based line the error was raised on, when it came from the scan.
    pub fn line_num(&self) -> Option<u64> {
        match self {
            Self::Open { .. } => None,
            Self::Io { ctx, .. } | Self::Format { ctx, .. } => Some(ctx.line_num),
        }
    }
}

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Invalid buffer size: \"{0}\"")]
    InvalidBufferSize(String),
    #[error("Can only process one file argument")]
    TooManyInputs,
    #[error("{}", clap_message(.0))]
    Arguments(#[from] clap::Error),
}

// clap renders its own "error: " prefix and trailing usage block.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
