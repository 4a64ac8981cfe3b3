//! Writing wordlists as one word per line.

use serde::Deserialize;
use std::fmt;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

/// Line terminator written after every word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    /// `\r\n` on Windows, `\n` elsewhere
    #[default]
    Native,
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineEnding::Native => "native",
            LineEnding::Lf => "lf",
            LineEnding::Crlf => "crlf",
        };
        f.write_str(name)
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "native" => Ok(LineEnding::Native),
            "lf" | "unix" => Ok(LineEnding::Lf),
            "crlf" | "dos" | "windows" => Ok(LineEnding::Crlf),
            other => Err(format!(
                "unknown line ending '{}' (expected native, lf or crlf)",
                other
            )),
        }
    }
}

/// Totals reported once a writer is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSummary {
    pub words: u64,
    pub bytes: u64,
}

/// Buffered one-word-per-line writer.
///
/// The output is byte-identical whichever strategy produced the words.
/// With a `limit`, consumption of the source stops as soon as the limit is
/// reached, so a lazy wordlist is never enumerated past it.
///
/// ```
/// use wlgen::output::{LineEnding, WordlistWriter};
///
/// let mut buf = Vec::new();
/// let mut writer = WordlistWriter::new(&mut buf).line_ending(LineEnding::Lf);
/// writer.write_words(["1A", "1B"]).unwrap();
/// writer.finish().unwrap();
///
/// assert_eq!(buf, b"1A\n1B\n");
/// ```
pub struct WordlistWriter<W: Write> {
    inner: BufWriter<W>,
    ending: LineEnding,
    limit: Option<u64>,
    summary: WriteSummary,
}

impl<W: Write> WordlistWriter<W> {
    pub fn new(inner: W) -> Self {
        WordlistWriter {
            inner: BufWriter::with_capacity(64 * 1024, inner),
            ending: LineEnding::default(),
            limit: None,
            summary: WriteSummary::default(),
        }
    }

    pub fn line_ending(mut self, ending: LineEnding) -> Self {
        self.ending = ending;
        self
    }

    /// Stop after this many words in total.
    pub fn limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// Words still allowed before the limit is hit.
    pub fn remaining(&self) -> Option<u64> {
        self.limit.map(|l| l.saturating_sub(self.summary.words))
    }

    /// Writes one word. Returns `false` without writing if the limit is reached.
    pub fn write_word(&mut self, word: &str) -> io::Result<bool> {
        if self.remaining() == Some(0) {
            return Ok(false);
        }

        let ending = self.ending.as_str();
        self.inner.write_all(word.as_bytes())?;
        self.inner.write_all(ending.as_bytes())?;
        self.summary.words += 1;
        self.summary.bytes += (word.len() + ending.len()) as u64;
        Ok(true)
    }

    /// Writes words until the source or the limit runs out.
    ///
    /// Returns the number of words written by this call.
    pub fn write_words<I, S>(&mut self, words: I) -> io::Result<u64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.summary.words;
        let take = self
            .remaining()
            .map_or(usize::MAX, |r| usize::try_from(r).unwrap_or(usize::MAX));

        for word in words.into_iter().take(take) {
            self.write_word(word.as_ref())?;
        }

        Ok(self.summary.words - before)
    }

    pub fn summary(&self) -> WriteSummary {
        self.summary
    }

    /// Flushes buffered output and reports the totals.
    pub fn finish(mut self) -> io::Result<WriteSummary> {
        self.inner.flush()?;
        Ok(self.summary)
    }
}
