use std::cmp::Ordering;
use std::fmt;

use crate::error::Error;
use crate::frame_range::{format_ranges, FrameRange, Time};
use crate::pattern::{format_frame, parse_pattern, PatternFlavors};

/// A sequence of numbered files: `prefix`, `suffix`, a zero-padding width
/// and one or more frame ranges.
#[derive(Debug, Clone)]
pub struct Sequence {
    prefix: String,
    suffix: String,
    padding: usize,
    strict_padding: bool,
    ranges: Vec<FrameRange>,
}

/// Character used to pad frame numbers.
pub const FILL_CHAR: char = '0';

impl Sequence {
    pub fn new(
        prefix: impl Into<String>,
        padding: usize,
        suffix: impl Into<String>,
        first: Time,
        last: Time,
        step: Time,
        strict_padding: bool,
    ) -> Self {
        Sequence {
            prefix: prefix.into(),
            suffix: suffix.into(),
            padding,
            strict_padding,
            ranges: vec![FrameRange::new(first, last, step)],
        }
    }

    /// Build a sequence from a pattern string and a frame range. No check is
    /// made against the filesystem.
    pub fn from_pattern(
        pattern: &str,
        first: Time,
        last: Time,
        step: Time,
        accept: PatternFlavors,
    ) -> Result<Self, Error> {
        let info = parse_pattern(pattern, accept)
            .ok_or_else(|| Error::PatternUnrecognized(pattern.to_string()))?;
        Ok(Sequence {
            prefix: info.prefix,
            suffix: info.suffix,
            padding: info.padding,
            strict_padding: info.strict_padding,
            ranges: vec![FrameRange::new(first, last, step)],
        })
    }

    pub(crate) fn from_parts(
        prefix: String,
        suffix: String,
        padding: usize,
        strict_padding: bool,
        ranges: Vec<FrameRange>,
    ) -> Self {
        debug_assert!(!ranges.is_empty());
        Sequence {
            prefix,
            suffix,
            padding,
            strict_padding,
            ranges,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// 0 means no fixed padding, N >= 1 a fixed width.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// True iff the padding must be honored with leading zeros (at least one
    /// observed frame begins with `'0'`).
    pub fn is_strict_padding(&self) -> bool {
        self.strict_padding
    }

    pub fn ranges(&self) -> &[FrameRange] {
        &self.ranges
    }

    pub fn first_time(&self) -> Time {
        self.ranges[0].first
    }

    pub fn last_time(&self) -> Time {
        self.ranges[self.ranges.len() - 1].last
    }

    pub fn global_range(&self) -> (Time, Time) {
        (self.first_time(), self.last_time())
    }

    pub fn duration(&self) -> usize {
        (self.last_time() - self.first_time() + 1) as usize
    }

    pub fn nb_files(&self) -> usize {
        self.ranges.iter().map(FrameRange::nb_frames).sum()
    }

    /// Common step of the detected frames. Every range of a detected
    /// sequence carries it, so the first range is authoritative.
    pub fn step(&self) -> Time {
        self.ranges[0].step
    }

    /// Frames absent from the stepped progression `first, first+step, …,
    /// last`. A complete stepped sequence has none.
    pub fn nb_missing_files(&self) -> usize {
        let expected = ((self.last_time() - self.first_time()) / self.step() + 1) as usize;
        expected - self.nb_files()
    }

    /// True when the observed frames could not be described by a single
    /// range: there are gaps beyond the step.
    pub fn has_missing_file(&self) -> bool {
        self.ranges.len() != 1
    }

    /// Mark character for the standard pattern: `#` with fixed padding,
    /// `@` without.
    pub fn pattern_character(&self) -> char {
        if self.padding > 0 {
            '#'
        } else {
            '@'
        }
    }

    /// `prefix` + mark characters + `suffix`, e.g. `img.####.jpg`.
    pub fn standard_pattern(&self) -> String {
        let marks = self.pattern_character().to_string().repeat(self.padding.max(1));
        format!("{}{}{}", self.prefix, marks, self.suffix)
    }

    /// `prefix` + `%0Nd` (or `%d` without padding) + `suffix`.
    pub fn c_style_pattern(&self) -> String {
        if self.padding > 0 {
            format!("{}%0{}d{}", self.prefix, self.padding, self.suffix)
        } else {
            format!("{}%d{}", self.prefix, self.suffix)
        }
    }

    /// Filename of the given frame. For negative times the sign precedes the
    /// zero padding: `prefix.-0001.jpg`, not `prefix.000-1.jpg`.
    pub fn filename_at(&self, time: Time) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            format_frame(time, self.padding),
            self.suffix
        )
    }

    pub fn first_filename(&self) -> String {
        self.filename_at(self.first_time())
    }

    /// Check whether a filename belongs to this sequence, returning the
    /// parsed frame time and its raw text. A middle segment that is not an
    /// integer is an expected negative, not an error.
    pub fn is_in(&self, filename: &str) -> Option<(Time, String)> {
        let min = self.prefix.len() + self.suffix.len();
        if filename.len() <= min {
            return None;
        }
        if !filename.starts_with(&self.prefix) || !filename.ends_with(&self.suffix) {
            return None;
        }
        let middle = &filename[self.prefix.len()..filename.len() - self.suffix.len()];
        let time: Time = middle.parse().ok()?;
        Some((time, middle.to_string()))
    }

    /// Lazy iteration over all member frame times, in order.
    pub fn frames(&self) -> impl Iterator<Item = Time> + '_ {
        self.ranges.iter().flat_map(|range| range.iter())
    }

    /// Member frame times clamped to `[first, last]`.
    pub fn frames_between(&self, first: Time, last: Time) -> impl Iterator<Item = Time> + '_ {
        self.frames().filter(move |t| *t >= first && *t <= last)
    }

    /// Lazy iteration over member filenames, in frame order.
    pub fn files(&self) -> impl Iterator<Item = String> + '_ {
        self.frames().map(|t| self.filename_at(t))
    }
}

// strict padding is a rendering hint, not part of identity
impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix
            && self.suffix == other.suffix
            && self.padding == other.padding
            && self.ranges == other.ranges
    }
}

impl Eq for Sequence {}

impl Ord for Sequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.standard_pattern()
            .cmp(&other.standard_pattern())
            .then_with(|| self.prefix.cmp(&other.prefix))
            .then_with(|| self.padding.cmp(&other.padding))
            .then_with(|| self.ranges.cmp(&other.ranges))
    }
}

impl PartialOrd for Sequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.standard_pattern(), format_ranges(&self.ranges))
    }
}
