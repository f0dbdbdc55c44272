use crate::error::UsageError;

/// Default maximum line length, in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 65535;

/// More digits than this can overflow a 32-bit count.
const MAX_BUFFER_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountOptions {
    /// Lines longer than this are truncated before they are counted.
    pub buffer_size: usize,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Validate a `-B` value: 1 to 10 ASCII digits with a positive value.
pub fn parse_buffer_size(raw: &str) -> Result<usize, UsageError> {
    let invalid = || UsageError::InvalidBufferSize(raw.to_string());
    if raw.is_empty() || raw.len() > MAX_BUFFER_DIGITS {
        return Err(invalid());
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let value: u64 = raw.parse().map_err(|_| invalid())?;
    match usize::try_from(value) {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(size) => Ok(size),
    }
}
