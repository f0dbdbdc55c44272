use crate::counter::{CountSummary, ReadCounter};
use crate::error::{CountError, IoContext};
use crate::line::LineSource;
use crate::options::CountOptions;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

const READ_CAPACITY: usize = 256 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Reader,
}

/// Streaming read counter over a file, stdin, or any `BufRead`.
///
/// The input handle is owned here and dropped when [`FastqCounter::count`]
/// returns, on success and on error alike.
pub struct FastqCounter {
    src: Source,
    lines: LineSource<Box<dyn BufRead>>,
}

impl FastqCounter {
    /// Open a plain FASTQ file. Compressed input belongs upstream
    /// (`gunzip -c reads.fq.gz | readsfq`).
    pub fn from_path<P: AsRef<Path>>(path: P, opts: CountOptions) -> Result<Self, CountError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|source| CountError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let rdr: Box<dyn BufRead> = Box::new(BufReader::with_capacity(READ_CAPACITY, f));
        Ok(Self::with_source(Source::Path(path.to_path_buf()), rdr, opts))
    }

    pub fn from_stdin(opts: CountOptions) -> Self {
        let rdr: Box<dyn BufRead> = Box::new(BufReader::with_capacity(READ_CAPACITY, io::stdin()));
        Self::with_source(Source::Reader, rdr, opts)
    }

    /// Wrap an arbitrary `BufRead`.
    pub fn from_bufread<R: BufRead + 'static>(reader: R, opts: CountOptions) -> Self {
        Self::with_source(Source::Reader, Box::new(reader), opts)
    }

    fn with_source(src: Source, rdr: Box<dyn BufRead>, opts: CountOptions) -> Self {
        Self {
            src,
            lines: LineSource::new(rdr, opts.buffer_size),
        }
    }

    pub fn source(&self) -> &Source {
        &self.src
    }

    /// Scan to the end of input and return the tally.
    pub fn count(mut self) -> Result<CountSummary, CountError> {
        let mut counter = ReadCounter::new();
        loop {
            let line_num = self.lines.line_num() + 1;
            let line = match self.lines.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    let ctx = ctx_of(&self.lines);
                    return Err(CountError::io_err(e, ctx));
                }
            };
            if let Err(e) = counter.feed(line, line_num) {
                return Err(CountError::fmt_err(e, ctx_of(&self.lines)));
            }
        }
        let summary = counter.finish();
        log::debug!(
            "{:?}: {} reads in {} lines ({} bytes, {} warnings)",
            self.src,
            summary.reads,
            summary.lines,
            self.lines.byte_pos(),
            summary.warnings.total()
        );
        Ok(summary)
    }
}

#[inline]
fn ctx_of<R: BufRead>(lines: &LineSource<R>) -> IoContext {
    IoContext {
        byte_pos: lines.byte_pos(),
        line_num: lines.line_num(),
    }
}

/// Count the reads in any `BufRead`.
pub fn count_reads<R: BufRead + 'static>(
    reader: R,
    opts: CountOptions,
) -> Result<CountSummary, CountError> {
    FastqCounter::from_bufread(reader, opts).count()
}
