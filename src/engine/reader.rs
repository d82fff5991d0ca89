//! Record reader.
//!
//! Loads `<dir>/<year>.txt` for every year of a span, in year order, and
//! keeps each line together with where it came from so later stages can
//! report `file:line` on failure. Files are small (one line per day), so
//! the whole span is read eagerly.

use crate::config::YearSpan;
use crate::error::CalendarError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One raw line of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Index into [`RawFeed::files`].
    pub file: usize,
    /// 1-based line number within that file.
    pub number: usize,
    pub text: String,
}

/// The concatenated lines of every file of a span, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFeed {
    files: Vec<PathBuf>,
    lines: Vec<SourceLine>,
}

impl RawFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the contents of one file. `path` is only used for reporting.
    pub fn push_file(&mut self, path: impl Into<PathBuf>, contents: &str) {
        let file = self.files.len();
        self.files.push(path.into());
        self.lines.extend(
            contents.lines().enumerate().map(|(idx, text)| SourceLine { file, number: idx + 1, text: text.to_string() }),
        );
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn path_of(&self, line: &SourceLine) -> &Path {
        &self.files[line.file]
    }
}

/// Path of the feed file for `year`.
pub fn year_file(dir: &Path, year: i32) -> PathBuf {
    dir.join(format!("{year}.txt"))
}

/// Read every file of `span` from `dir`.
///
/// A missing or unreadable file (including one that is not valid UTF-8)
/// aborts the read: a feed with a hole in it cannot be tracked.
pub fn read_span(dir: &Path, span: YearSpan) -> Result<RawFeed, CalendarError> {
    if span.start >= span.end {
        return Err(CalendarError::InvalidSpan { start: span.start, end: span.end });
    }

    let mut feed = RawFeed::new();
    for year in span.years() {
        let path = year_file(dir, year);
        let contents =
            std::fs::read_to_string(&path).map_err(|source| CalendarError::DataSource { path: path.clone(), source })?;
        let before = feed.len();
        feed.push_file(path, &contents);
        debug!(year, lines = feed.len() - before, "read feed file");
    }
    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_file_numbers_lines_from_one() {
        let mut feed = RawFeed::new();
        feed.push_file("a.txt", "first\nsecond\n");
        feed.push_file("b.txt", "third\r\n");

        assert_eq!(feed.files(), &[PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        let numbered: Vec<_> = feed.lines().iter().map(|l| (l.file, l.number, l.text.as_str())).collect();
        assert_eq!(numbered, vec![(0, 1, "first"), (0, 2, "second"), (1, 1, "third")]);
        assert_eq!(feed.path_of(&feed.lines()[2]), Path::new("b.txt"));
    }

    #[test]
    fn read_span_preserves_year_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2001.txt"), "b1\nb2\n").unwrap();
        std::fs::write(dir.path().join("2000.txt"), "a1\n").unwrap();

        let feed = read_span(dir.path(), YearSpan::new(2000, 2002).unwrap()).unwrap();
        let texts: Vec<_> = feed.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["a1", "b1", "b2"]);
        assert_eq!(feed.files()[0], dir.path().join("2000.txt"));
    }

    #[test]
    fn missing_year_is_a_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2000.txt"), "a1\n").unwrap();

        let err = read_span(dir.path(), YearSpan::new(2000, 2002).unwrap()).unwrap_err();
        match err {
            CalendarError::DataSource { path, source } => {
                assert_eq!(path, dir.path().join("2001.txt"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected DataSource, got {other:?}"),
        }
    }

    #[test]
    fn non_utf8_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2000.txt"), [0xff, 0xfe, 0x00]).unwrap();

        let err = read_span(dir.path(), YearSpan::new(2000, 2001).unwrap()).unwrap_err();
        assert!(matches!(err, CalendarError::DataSource { .. }));
    }

    #[test]
    fn inverted_span_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let span = YearSpan { start: 2001, end: 2000 };
        assert!(matches!(read_span(dir.path(), span), Err(CalendarError::InvalidSpan { .. })));
    }
}
