use std::io::{self, BufRead};

/// Lazy, bounded line reader over any `BufRead`.
///
/// Each line keeps at most `limit` bytes (line ending included). The rest of
/// an over-long line is read and dropped, so memory use never grows past the
/// limit and line numbering stays in step with the input.
pub struct LineSource<R> {
    rdr: R,
    buf: Vec<u8>,
    limit: usize,
    line_num: u64,
    byte_pos: u64,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(rdr: R, limit: usize) -> Self {
        Self {
            rdr,
            buf: Vec::with_capacity(limit.min(64 * 1024)),
            limit,
            line_num: 0,
            byte_pos: 0,
        }
    }

    /// Next line, or `None` once the stream is exhausted.
    pub fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.buf.clear();
        let mut read_any = false;
        loop {
            let available = match self.rdr.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }
            let newline = available.iter().position(|&b| b == b'\n');
            let end = newline.map_or(available.len(), |i| i + 1);
            let room = self.limit.saturating_sub(self.buf.len());
            self.buf.extend_from_slice(&available[..end.min(room)]);

            self.rdr.consume(end);
            self.byte_pos += end as u64;
            read_any = true;
            if newline.is_some() {
                break;
            }
        }
        if !read_any {
            return Ok(None);
        }
        self.line_num += 1;
        Ok(Some(self.buf.as_slice()))
    }

    /// 1-based number of the line last returned; 0 before the first.
    #[inline]
    pub fn line_num(&self) -> u64 {
        self.line_num
    }

    #[inline]
    pub fn byte_pos(&self) -> u64 {
        self.byte_pos
    }
}

/// True for `""`, `"\n"`, `"\r"`, `"\r\n"`, and any line starting with NUL
/// (zero-length as a C string).
#[inline]
pub fn is_empty_line(line: &[u8]) -> bool {
    matches!(line, [] | [0, ..] | b"\n" | b"\r" | b"\r\n")
}

/// Number of bytes before the first `\n`, `\r` or NUL.
#[inline]
pub fn content_len(line: &[u8]) -> usize {
    line.iter()
        .position(|&b| matches!(b, b'\n' | b'\r' | 0))
        .unwrap_or(line.len())
}
