//! Files and lines statistics over a corpus of text files

use core::fmt;

use crate::statistics::Accumulator;
use crate::traits::{StatsError, Summary};

/// Delimiter separating lines within a file's text
pub const LINE_DELIMITER: char = '\n';

/// Statistics of files (their lengths in lines) and lines (their lengths in characters)
///
/// One call to [`ingest`](Self::ingest) accounts for exactly one file. The
/// caller is responsible for splitting its input at file boundaries.
///
/// # Example
///
/// ```
/// use srcstats::report::FileStatistics;
///
/// let mut stats = FileStatistics::new();
/// stats.ingest("ab\ncde\n\nf").ingest("hello");
///
/// assert_eq!(stats.files().count(), 2);
/// assert_eq!(stats.lines().count(), 5);
/// assert_eq!(stats.files().maximum(), Ok(4.0));
/// assert_eq!(stats.lines().maximum(), Ok(5.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FileStatistics {
    files: Accumulator,
    lines: Accumulator,
}

impl FileStatistics {
    /// Create empty statistics
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: Accumulator::new(),
            lines: Accumulator::new(),
        }
    }

    /// Files statistics; a file's value is its size in lines
    pub fn files(&self) -> &Accumulator {
        &self.files
    }

    /// Lines statistics; a line's value is its size in characters
    pub fn lines(&self) -> &Accumulator {
        &self.lines
    }

    /// Accumulate one file's full text
    ///
    /// Lines are the pieces between [`LINE_DELIMITER`]s, so a trailing
    /// delimiter yields a final empty line. Empty text is a file with zero
    /// lines. Carriage returns are not stripped and count as characters.
    pub fn ingest(&mut self, text: &str) -> &mut Self {
        let mut line_count = 0u64;
        let mut char_count = 0u64;

        if !text.is_empty() {
            for line in text.split(LINE_DELIMITER) {
                let length = line.chars().count() as u64;
                self.lines.fold_length(length);
                line_count += 1;
                char_count += length;
            }
        }

        self.files.fold_length(line_count);
        tracing::trace!(lines = line_count, characters = char_count, "ingested file");
        self
    }

    /// Merge statistics accumulated elsewhere, e.g. by another worker
    pub fn merge(&mut self, other: &Self) -> &mut Self {
        tracing::trace!(
            files = self.files.count(),
            other_files = other.files.count(),
            "merging file statistics"
        );
        self.files.merge(&other.files);
        self.lines.merge(&other.lines);
        self
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Print the title, then the files block, then the lines block
    ///
    /// ```text
    /// src
    /// 2 files
    ///   min  1 lines
    ///   ...
    ///
    /// 5 lines
    ///   min  0 characters
    ///   ...
    ///
    /// ```
    pub fn render<W>(&self, out: &mut W, title: &str) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        writeln!(out, "{title}")?;
        self.files.render(out, "files", "lines")?;

        writeln!(out)?;
        self.lines.render(out, "lines", "characters")?;

        writeln!(out)
    }

    /// Adapter rendering these statistics through [`fmt::Display`]
    ///
    /// Useful with `write!` on an `io::Write` sink or with `format!`.
    pub fn display<'a>(&'a self, title: &'a str) -> Rendered<'a> {
        Rendered { stats: self, title }
    }
}

impl Summary for FileStatistics {
    type Item = str;

    fn update(&mut self, item: &Self::Item) -> Result<(), StatsError> {
        self.ingest(item);
        Ok(())
    }

    fn merge(&mut self, other: &Self) {
        FileStatistics::merge(self, other);
    }

    fn clear(&mut self) {
        FileStatistics::clear(self);
    }

    fn count(&self) -> u64 {
        self.files.count()
    }
}

impl<'a> Extend<&'a str> for FileStatistics {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, files: I) {
        for text in files {
            self.ingest(text);
        }
    }
}

impl<'a> FromIterator<&'a str> for FileStatistics {
    fn from_iter<I: IntoIterator<Item = &'a str>>(files: I) -> Self {
        let mut stats = Self::new();
        stats.extend(files);
        stats
    }
}

/// Helper struct for rendering [`FileStatistics`] with a title
///
/// Created by [`FileStatistics::display`].
#[derive(Debug, Clone, Copy)]
pub struct Rendered<'a> {
    stats: &'a FileStatistics,
    title: &'a str,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.stats.render(f, self.title)
    }
}
