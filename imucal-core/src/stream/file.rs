//! Reading sample logs from files, pipes and stdin
//!
//! `SampleStream` pulls bytes from any `std::io::Read` through a fixed read
//! buffer and assembles lines in a bounded line buffer, so memory use does
//! not depend on the size of the log. Lines are decoded as UTF-8; a byte
//! order mark at the start of the log is ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use alloc::vec::Vec;

use super::{is_skippable, parse_line, Stream, StreamError};
use crate::constants::{LINE_BUFFER_SIZE, READ_BUFFER_SIZE};
use crate::errors::CalibrationResult;
use crate::sample::{Sample, SampleSet};

/// Statistics for a sample stream
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    /// Samples parsed successfully (before deduplication)
    pub samples_read: usize,
    /// Total lines processed
    pub lines_processed: usize,
    /// Blank and comment lines skipped
    pub skipped_lines: usize,
    /// Bytes read from the source
    pub bytes_read: usize,
}

/// Line-oriented sample reader
///
/// ```rust,no_run
/// use imucal_core::stream::SampleStream;
///
/// let mut stream = SampleStream::from_path("readings.txt")?;
/// let samples = stream.read_all()?;
/// println!("{} distinct samples", samples.len());
/// # Ok::<(), imucal_core::stream::StreamError<std::io::Error>>(())
/// ```
///
/// Each call to `poll_next` yields the next reading. Blank lines and lines
/// starting with `#` are skipped. A malformed line ends the read with
/// `StreamError::Format`; once the source is drained every further poll
/// returns `StreamError::EndOfStream`.
pub struct SampleStream<R> {
    reader: R,
    buffer: [u8; READ_BUFFER_SIZE],
    buffer_pos: usize,
    buffer_len: usize,
    line_buffer: heapless::Vec<u8, LINE_BUFFER_SIZE>,
    eof: bool,
    stats: StreamStats,
}

impl SampleStream<File> {
    /// Open a sample log on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StreamError<std::io::Error>> {
        let file = File::open(path).map_err(StreamError::Transport)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> SampleStream<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: [0; READ_BUFFER_SIZE],
            buffer_pos: 0,
            buffer_len: 0,
            line_buffer: heapless::Vec::new(),
            eof: false,
            stats: StreamStats::default(),
        }
    }

    /// Get statistics
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    /// Give back the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn refill_buffer(&mut self) -> Result<bool, StreamError<std::io::Error>> {
        if self.eof {
            return Ok(false);
        }

        if self.buffer_pos < self.buffer_len {
            self.buffer.copy_within(self.buffer_pos..self.buffer_len, 0);
            self.buffer_len -= self.buffer_pos;
        } else {
            self.buffer_len = 0;
        }
        self.buffer_pos = 0;

        let bytes_read = loop {
            match self.reader.read(&mut self.buffer[self.buffer_len..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(StreamError::Transport(e)),
            }
        };

        if bytes_read == 0 {
            self.eof = true;
            return Ok(self.buffer_len > 0);
        }

        self.buffer_len += bytes_read;
        self.stats.bytes_read += bytes_read;
        Ok(true)
    }

    /// Load the next line into `line_buffer`
    ///
    /// Returns `Ok(false)` once the source is drained. A final line without
    /// a trailing newline still counts as a line.
    fn read_line(&mut self) -> Result<bool, StreamError<std::io::Error>> {
        self.line_buffer.clear();
        let mut overflowed = false;

        loop {
            while self.buffer_pos < self.buffer_len {
                let byte = self.buffer[self.buffer_pos];
                self.buffer_pos += 1;

                if byte == b'\n' {
                    return self.finish_line(overflowed);
                } else if byte != b'\r' && !overflowed {
                    // Keep consuming an overlong line so the stream stays
                    // aligned on the next one
                    overflowed = self.line_buffer.push(byte).is_err();
                }
            }

            if !self.refill_buffer()? {
                if !self.line_buffer.is_empty() || overflowed {
                    return self.finish_line(overflowed);
                }
                return Ok(false);
            }
        }
    }

    /// Current line as text, without a leading byte order mark on line 1
    fn line_text(&self) -> Option<&str> {
        let line = core::str::from_utf8(&self.line_buffer).ok()?;
        if self.stats.lines_processed == 1 {
            return Some(line.strip_prefix('\u{feff}').unwrap_or(line));
        }
        Some(line)
    }

    /// True once every byte of the source has been consumed
    fn is_drained(&self) -> bool {
        self.eof && self.buffer_pos >= self.buffer_len
    }

    fn finish_line(&mut self, overflowed: bool) -> Result<bool, StreamError<std::io::Error>> {
        self.stats.lines_processed += 1;
        if overflowed {
            return Err(StreamError::Overflow {
                line: self.stats.lines_processed,
            });
        }
        Ok(true)
    }

    /// Drain the stream into a deduplicated `SampleSet`
    pub fn read_all(&mut self) -> Result<SampleSet, StreamError<std::io::Error>> {
        let mut readings = Vec::new();

        loop {
            match self.poll_next() {
                Ok(sample) => readings.push(sample),
                Err(nb::Error::WouldBlock) => continue,
                Err(nb::Error::Other(StreamError::EndOfStream)) => break,
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }

        let samples = SampleSet::load(readings);
        log_debug!(
            "Read {} samples ({} distinct) from {} lines",
            self.stats.samples_read,
            samples.len(),
            self.stats.lines_processed
        );
        Ok(samples)
    }
}

impl<R: Read> Stream for SampleStream<R> {
    type Item = Sample;
    type Error = StreamError<std::io::Error>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        loop {
            if !self.read_line()? {
                return Err(nb::Error::Other(StreamError::EndOfStream));
            }

            let line_number = self.stats.lines_processed;
            let (skip, parsed) = match self.line_text() {
                Some(line) => (is_skippable(line), parse_line(line)),
                None => (false, None),
            };
            if skip {
                self.stats.skipped_lines += 1;
                continue;
            }

            return match parsed {
                Some(sample) => {
                    self.stats.samples_read += 1;
                    Ok(sample)
                }
                None => Err(nb::Error::Other(StreamError::Format { line: line_number })),
            };
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_drained() {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

/// Read every sample from `reader` into a deduplicated set
///
/// Fails on the first malformed or overlong line, reporting its 1-based
/// line number.
pub fn read_samples<R: Read>(reader: R) -> CalibrationResult<SampleSet> {
    SampleStream::new(reader).read_all().map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalibrationError;
    use std::io::{Cursor, Write};

    /// Reader that hands out at most `chunk` bytes per call
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    fn stream(text: &str) -> SampleStream<Cursor<Vec<u8>>> {
        SampleStream::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn reads_samples_in_order() {
        let mut s = stream("1 2 3\n4,5,6\n-7 -8 -9\n");
        assert_eq!(s.poll_next().unwrap(), Sample::new(1, 2, 3));
        assert_eq!(s.poll_next().unwrap(), Sample::new(4, 5, 6));
        assert_eq!(s.poll_next().unwrap(), Sample::new(-7, -8, -9));
        assert!(matches!(s.poll_next(), Err(nb::Error::Other(StreamError::EndOfStream))));
    }

    #[test]
    fn end_of_stream_is_sticky() {
        let mut s = stream("1 2 3");
        assert!(s.poll_next().is_ok());
        for _ in 0..3 {
            assert!(matches!(s.poll_next(), Err(nb::Error::Other(StreamError::EndOfStream))));
        }
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let mut s = stream("# x y z\n\n1 2 3\r\n   \n4 5 6\r\n");
        let samples = s.read_all().unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(s.stats().skipped_lines, 3);
        assert_eq!(s.stats().lines_processed, 5);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let mut s = stream("1 2 3\n\nfoo bar\n4 5 6\n");
        assert!(s.poll_next().is_ok());
        assert!(matches!(
            s.poll_next(),
            Err(nb::Error::Other(StreamError::Format { line: 3 }))
        ));
    }

    #[test]
    fn overlong_line_is_rejected() {
        let long: String = core::iter::repeat('1').take(LINE_BUFFER_SIZE + 10).collect();
        let text = format!("1 2 3\n{}\n4 5 6\n", long);
        let mut s = stream(&text);

        assert!(s.poll_next().is_ok());
        assert!(matches!(
            s.poll_next(),
            Err(nb::Error::Other(StreamError::Overflow { line: 2 }))
        ));
        // The rest of the long line was consumed
        assert_eq!(s.poll_next().unwrap(), Sample::new(4, 5, 6));
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let samples = read_samples(Cursor::new(b"\xEF\xBB\xBF1 2 3\n4 5 6\n")).unwrap();
        assert_eq!(samples.as_slice(), &[Sample::new(1, 2, 3), Sample::new(4, 5, 6)]);

        let samples = read_samples(Cursor::new(b"\xEF\xBB\xBF# x y z\n7 8 9\n")).unwrap();
        assert_eq!(samples.as_slice(), &[Sample::new(7, 8, 9)]);
    }

    #[test]
    fn byte_order_mark_after_line_one_is_a_format_error() {
        let err = read_samples(Cursor::new(b"1 2 3\n\xEF\xBB\xBF4 5 6\n")).unwrap_err();
        assert_eq!(err, CalibrationError::Parse { line: 2 });
    }

    #[test]
    fn invalid_utf8_is_a_format_error() {
        let mut s = SampleStream::new(Cursor::new(b"1 2 3\n4 \xFF 6\n".to_vec()));
        assert!(s.poll_next().is_ok());
        assert!(matches!(
            s.poll_next(),
            Err(nb::Error::Other(StreamError::Format { line: 2 }))
        ));
    }

    #[test]
    fn size_hint_is_exact_once_drained() {
        let mut s = stream("1 2 3\n");
        assert_eq!(s.size_hint(), (0, None));

        assert!(s.poll_next().is_ok());
        assert!(s.poll_next().is_err());
        assert_eq!(s.size_hint(), (0, Some(0)));
    }

    #[test]
    fn into_inner_returns_the_reader() {
        let mut s = stream("1 2 3\n4 5 6\n");
        s.read_all().unwrap();

        let cursor = s.into_inner();
        assert_eq!(cursor.position(), 12);
    }

    #[test]
    fn lines_split_across_reads_are_reassembled() {
        let text = b"100 -200 300\n-400 500 -600\n";
        let mut s = SampleStream::new(Trickle { data: text, chunk: 3 });
        let samples = s.read_all().unwrap();

        assert_eq!(
            samples.as_slice(),
            &[Sample::new(100, -200, 300), Sample::new(-400, 500, -600)]
        );
        assert_eq!(s.stats().bytes_read, text.len());
    }

    #[test]
    fn read_samples_deduplicates() {
        let samples = read_samples(Cursor::new("1 2 3\n1 2 3\n4 5 6\n")).unwrap();
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn read_samples_maps_errors() {
        let err = read_samples(Cursor::new("1 2 3\n1 2\n")).unwrap_err();
        assert_eq!(err, CalibrationError::Parse { line: 2 });
    }

    #[test]
    fn reads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# captured while rotating the board").unwrap();
        writeln!(file, "10 20 30").unwrap();
        writeln!(file, "-10 -20 -30").unwrap();
        file.flush().unwrap();

        let mut s = SampleStream::from_path(file.path()).unwrap();
        let samples = s.read_all().unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(s.stats().samples_read, 2);
    }

    #[test]
    fn missing_file_is_a_transport_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SampleStream::from_path(dir.path().join("absent.txt"));
        assert!(matches!(result, Err(StreamError::Transport(_))));
    }
}
