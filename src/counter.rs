//! The read-counting state machine.
//!
//! Records are delimited without parsing them: sequence lines are summed
//! until the `+` separator, then quality lines are summed until they cover
//! the sequence. Only then is the next line expected to be a header.

use crate::error::FormatError;
use crate::line::{content_len, is_empty_line};
use std::fmt;

/// What the next line is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Header,
    Sequence,
    Separator,
    Quality,
}

/// Non-fatal oddities noticed while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanWarning {
    /// Still collecting quality scores, but the line starts with `@`.
    HeaderMarkerInQuality { line: u64 },
    /// The record's quality block is longer than its sequence.
    ExcessQuality { line: u64, seq_len: u64, qual_len: u64 },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeaderMarkerInQuality { line } => write!(
                f,
                "looking for more quality scores on line {line} but it starts with \"@\"; \
                 this might be a header line and there were fewer quality scores than bases"
            ),
            Self::ExcessQuality {
                line,
                seq_len,
                qual_len,
            } => write!(
                f,
                "line {line}: counted more quality scores than bases ({qual_len} > {seq_len})"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarningTally {
    pub header_marker_in_quality: u64,
    pub excess_quality: u64,
}

impl WarningTally {
    fn record(&mut self, warning: &ScanWarning) {
        match warning {
            ScanWarning::HeaderMarkerInQuality { .. } => self.header_marker_in_quality += 1,
            ScanWarning::ExcessQuality { .. } => self.excess_quality += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.header_marker_in_quality + self.excess_quality
    }
}

/// Outcome of a completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSummary {
    pub reads: u64,
    pub lines: u64,
    /// State when input ran out; anything but `Header` means the last
    /// record was cut short (it is still counted).
    pub state: State,
    pub warnings: WarningTally,
}

#[derive(Debug, Clone)]
pub struct ReadCounter {
    state: State,
    num_reads: u64,
    seq_len: u64,
    qual_len: u64,
    lines: u64,
    warnings: WarningTally,
}

impl Default for ReadCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadCounter {
    pub fn new() -> Self {
        Self {
            state: State::Header,
            num_reads: 0,
            seq_len: 0,
            qual_len: 0,
            lines: 0,
            warnings: WarningTally::default(),
        }
    }

    /// Classify one line. `line_num` is its 1-based position, used only in
    /// diagnostics.
    pub fn feed(&mut self, line: &[u8], line_num: u64) -> Result<(), FormatError> {
        self.lines += 1;
        match self.state {
            State::Header => {
                // Blank lines are allowed between records.
                if is_empty_line(line) {
                    return Ok(());
                }
                if line.first() != Some(&b'@') {
                    return Err(FormatError::MissingHeader);
                }
                self.num_reads += 1;
                self.seq_len = 0;
                self.state = State::Sequence;
            }
            State::Sequence => {
                if line.first() == Some(&b'+') {
                    self.qual_len = 0;
                    self.state = State::Separator;
                } else {
                    self.seq_len += content_len(line) as u64;
                }
            }
            State::Separator | State::Quality => {
                if self.state == State::Quality && line.first() == Some(&b'@') {
                    self.warn(ScanWarning::HeaderMarkerInQuality { line: line_num });
                }
                self.state = State::Quality;
                self.qual_len += content_len(line) as u64;
                if self.qual_len >= self.seq_len {
                    self.state = State::Header;
                    if self.qual_len > self.seq_len {
                        self.warn(ScanWarning::ExcessQuality {
                            line: line_num,
                            seq_len: self.seq_len,
                            qual_len: self.qual_len,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn warn(&mut self, warning: ScanWarning) {
        log::warn!("{warning}");
        self.warnings.record(&warning);
    }

    /// End of input. The count stands whatever state the machine is in.
    pub fn finish(self) -> CountSummary {
        if self.state != State::Header {
            log::debug!(
                "input ended in {:?} state; last record is incomplete but counted",
                self.state
            );
        }
        CountSummary {
            reads: self.num_reads,
            lines: self.lines,
            state: self.state,
            warnings: self.warnings,
        }
    }

    #[inline]
    pub fn reads(&self) -> u64 {
        self.num_reads
    }
    #[inline]
    pub fn state(&self) -> State {
        self.state
    }
    #[inline]
    pub fn seq_len(&self) -> u64 {
        self.seq_len
    }
    #[inline]
    pub fn qual_len(&self) -> u64 {
        self.qual_len
    }
    #[inline]
    pub fn warnings(&self) -> WarningTally {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(data: &str) -> Result<ReadCounter, (u64, FormatError)> {
        let mut counter = ReadCounter::new();
        for (i, line) in data.split_inclusive('\n').enumerate() {
            let n = i as u64 + 1;
            counter.feed(line.as_bytes(), n).map_err(|e| (n, e))?;
        }
        Ok(counter)
    }

    #[test]
    fn walks_all_four_states() {
        let mut c = ReadCounter::new();
        c.feed(b"@r1\n", 1).unwrap();
        assert_eq!(c.state(), State::Sequence);
        assert_eq!(c.reads(), 1);
        c.feed(b"ACGT\n", 2).unwrap();
        assert_eq!(c.seq_len(), 4);
        c.feed(b"+r1\n", 3).unwrap();
        assert_eq!(c.state(), State::Separator);
        c.feed(b"!!\n", 4).unwrap();
        assert_eq!(c.state(), State::Quality);
        assert_eq!(c.qual_len(), 2);
        c.feed(b"!!\n", 5).unwrap();
        assert_eq!(c.state(), State::Header);
        assert_eq!(c.warnings().total(), 0);
    }

    #[test]
    fn split_sequence_and_quality_is_one_read() {
        let c = run("@r1\nACG\nT\n+\n!!!\n!\n").unwrap();
        assert_eq!(c.reads(), 1);
        assert_eq!(c.state(), State::Header);
        assert_eq!(c.warnings(), WarningTally::default());
    }

    #[test]
    fn quality_starting_with_at_is_quality() {
        // '@' is a legal quality score; first quality line is never flagged.
        let c = run("@r1\nACGT\n+\n@@@@\n@r2\nA\n+\n#\n").unwrap();
        assert_eq!(c.reads(), 2);
        assert_eq!(c.warnings().total(), 0);

        let c = run("@r1\nACGTAC\n+\n!!!\n@!!\n").unwrap();
        assert_eq!(c.reads(), 1);
        assert_eq!(c.warnings().header_marker_in_quality, 1);
        assert_eq!(c.state(), State::Header);
    }

    #[test]
    fn excess_quality_warns_but_completes() {
        let c = run("@r1\nACGT\n+\n!!!!!\n@r2\nAC\n+\n!!\n").unwrap();
        assert_eq!(c.reads(), 2);
        assert_eq!(c.warnings().excess_quality, 1);
        assert_eq!(c.warnings().header_marker_in_quality, 0);
    }

    #[test]
    fn one_line_can_raise_both_warnings() {
        let c = run("@r1\nACGT\n+\n!!\n@!!!\n").unwrap();
        assert_eq!(
            c.warnings(),
            WarningTally {
                header_marker_in_quality: 1,
                excess_quality: 1
            }
        );
    }

    #[test]
    fn missing_header_reports_line() {
        assert_eq!(run("ACGT\n+\n!!!!\n").unwrap_err(), (1, FormatError::MissingHeader));
        assert_eq!(
            run("@r1\nACGT\n+\n!!!!\nr2\nA\n+\n!\n").unwrap_err(),
            (5, FormatError::MissingHeader)
        );
    }

    #[test]
    fn blank_lines_only_skipped_in_header_position() {
        let c = run("\n\r\n\r\n@r1\nAC\n+\n!!\n\n@r2\nAC\n+\n!!\n").unwrap();
        assert_eq!(c.reads(), 2);

        // A blank line inside the sequence block contributes nothing.
        let c = run("@r1\nAC\n\nGT\n+\n!!!!\n").unwrap();
        assert_eq!(c.reads(), 1);
        assert_eq!(c.state(), State::Header);
    }

    #[test]
    fn truncated_record_still_counted() {
        let summary = run("@r1\nACGT\n+\n!!!!\n@r2\nACGT\n").unwrap().finish();
        assert_eq!(summary.reads, 2);
        assert_eq!(summary.state, State::Sequence);
        assert_eq!(summary.lines, 6);
    }

    #[test]
    fn empty_sequence_completes_on_first_quality_line() {
        let c = run("@r1\n+\n\n@r2\nA\n+\n!\n").unwrap();
        assert_eq!(c.reads(), 2);
        assert_eq!(c.state(), State::Header);
    }
}
