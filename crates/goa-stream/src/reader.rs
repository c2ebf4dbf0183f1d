//! Line-oriented GAF record source
//!
//! Decompression and opening files stay with the caller; the reader takes any
//! [`BufRead`] and owns it, so the input is released when the reader (or the
//! stream wrapping it) is dropped.

use std::io::{BufRead, Lines};

use goa_core::{AnnotationRecord, GoaError, Result};

const COMMENT_PREFIX: char = '!';

/// Lazily parses GAF rows from a line source
pub struct GafReader<R> {
    lines: Lines<R>,
    line_no: usize,
    finished: bool,
}

impl<R: BufRead> GafReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            finished: false,
        }
    }

    /// Number of lines consumed so far, comments included
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for GafReader<R> {
    type Item = Result<AnnotationRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(GoaError::from(e).at_line(self.line_no + 1)));
                }
                None => {
                    self.finished = true;
                    tracing::debug!(lines = self.line_no, "Annotation source exhausted");
                    return None;
                }
            };
            self.line_no += 1;

            if line.starts_with(COMMENT_PREFIX) || line.trim().is_empty() {
                continue;
            }

            return Some(AnnotationRecord::parse_line(&line).map_err(|e| e.at_line(self.line_no)));
        }
    }
}

impl<R> std::fmt::Debug for GafReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GafReader")
            .field("line_no", &self.line_no)
            .field("finished", &self.finished)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
