use bitflags::bitflags;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::frame_range::Time;
use crate::options::DetectOptions;

/// Standard pattern with `#` or `@` marks, optionally bracketed:
/// `img.####.jpg`, `img.[@@].jpg`.
static RE_STANDARD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\[?(#+|@+)\]?(.*?)$").expect("hardcoded regex"));

/// C style pattern: `img.%04d.jpg` or `img.%d.jpg`.
static RE_C_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\[?%([0-9]*)d\]?(.*?)$").expect("hardcoded regex"));

/// Bare frame number, preferring numbers surrounded by `.` or `_`:
/// `img.0123.jpg`.
static RE_FRAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?[_.]?)\[?([0-9]+)\]?([_.]?.*\.?.*?)$").expect("hardcoded regex"));

/// As `RE_FRAME` but the number may carry a sign: `img.-0123.jpg`.
static RE_FRAME_NEG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?[_.]?)\[?([-+]?[0-9]+)\]?([_.]?.*\.?.*?)$").expect("hardcoded regex")
});

/// One recognized pattern flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFlavor {
    Standard,
    CStyle,
    Frame,
    FrameNeg,
}

bitflags! {
    /// Mask of pattern flavors a caller accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PatternFlavors: u32 {
        const STANDARD = 0b0001;
        const C_STYLE = 0b0010;
        const FRAME = 0b0100;
        const FRAME_NEG = 0b1000;
    }
}

impl PatternFlavors {
    pub const DEFAULT: PatternFlavors = PatternFlavors::from_bits_truncate(0b0011);
    pub const ALL: PatternFlavors = PatternFlavors::from_bits_truncate(0b1111);
}

impl Default for PatternFlavors {
    fn default() -> Self {
        PatternFlavors::DEFAULT
    }
}

/// Prefix, suffix and padding information extracted from a pattern string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternInfo {
    pub flavor: PatternFlavor,
    pub prefix: String,
    pub suffix: String,
    pub padding: usize,
    pub strict_padding: bool,
}

/// Parse a pattern string against the accepted flavors, in precedence order
/// standard, C style, signed frame, frame. Returns `None` when no accepted
/// flavor matches the whole string.
pub fn parse_pattern(pattern: &str, accept: PatternFlavors) -> Option<PatternInfo> {
    if accept.contains(PatternFlavors::STANDARD) {
        if let Some(caps) = RE_STANDARD.captures(pattern) {
            let marks = &caps[2];
            return Some(PatternInfo {
                flavor: PatternFlavor::Standard,
                prefix: caps[1].to_string(),
                suffix: caps[3].to_string(),
                padding: marks.len(),
                strict_padding: marks.starts_with('#'),
            });
        }
    }
    if accept.contains(PatternFlavors::C_STYLE) {
        if let Some(caps) = RE_C_STYLE.captures(pattern) {
            // "%d" carries no padding value
            let padding = if caps[2].is_empty() {
                0
            } else {
                caps[2].parse().ok()?
            };
            return Some(PatternInfo {
                flavor: PatternFlavor::CStyle,
                prefix: caps[1].to_string(),
                suffix: caps[3].to_string(),
                padding,
                strict_padding: false,
            });
        }
    }
    if accept.contains(PatternFlavors::FRAME_NEG) {
        if let Some(caps) = RE_FRAME_NEG.captures(pattern) {
            return Some(PatternInfo {
                flavor: PatternFlavor::FrameNeg,
                prefix: caps[1].to_string(),
                suffix: caps[3].to_string(),
                padding: digit_width(&caps[2]),
                strict_padding: false,
            });
        }
    }
    if accept.contains(PatternFlavors::FRAME) {
        if let Some(caps) = RE_FRAME.captures(pattern) {
            return Some(PatternInfo {
                flavor: PatternFlavor::Frame,
                prefix: caps[1].to_string(),
                suffix: caps[3].to_string(),
                padding: digit_width(&caps[2]),
                strict_padding: false,
            });
        }
    }
    None
}

/// Report which flavor a pattern string matches under the current detection
/// options. The signed frame flavor is only tried when signed detection is
/// enabled.
pub fn check_pattern(pattern: &str, options: DetectOptions) -> Option<PatternFlavor> {
    if RE_STANDARD.is_match(pattern) {
        Some(PatternFlavor::Standard)
    } else if RE_C_STYLE.is_match(pattern) {
        Some(PatternFlavor::CStyle)
    } else if options.contains(DetectOptions::NEGATIVE) && RE_FRAME_NEG.is_match(pattern) {
        Some(PatternFlavor::FrameNeg)
    } else if RE_FRAME.is_match(pattern) {
        Some(PatternFlavor::Frame)
    } else {
        None
    }
}

/// Number of digits in a frame number string, excluding an optional sign.
pub(crate) fn digit_width(raw: &str) -> usize {
    raw.strip_prefix(['-', '+']).unwrap_or(raw).len()
}

/// Format a frame time with the given zero padding. For negative times the
/// sign precedes the padding, so the width refers to digits only:
/// `format_frame(-1, 4)` is `-0001`, not `000-1`.
pub(crate) fn format_frame(time: Time, padding: usize) -> String {
    if time >= 0 {
        format!("{:0width$}", time, width = padding)
    } else {
        format!("-{:0width$}", time.unsigned_abs(), width = padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_pattern() {
        let info = parse_pattern("img.####.jpg", PatternFlavors::DEFAULT).unwrap();
        assert_eq!(info.flavor, PatternFlavor::Standard);
        assert_eq!(info.prefix, "img.");
        assert_eq!(info.suffix, ".jpg");
        assert_eq!(info.padding, 4);
        assert!(info.strict_padding);

        let info = parse_pattern("img.@@.jpg", PatternFlavors::DEFAULT).unwrap();
        assert_eq!(info.padding, 2);
        assert!(!info.strict_padding);
    }

    #[test]
    fn test_standard_pattern_bracketed() {
        let info = parse_pattern("img.[####].jpg", PatternFlavors::DEFAULT).unwrap();
        assert_eq!(info.prefix, "img.");
        assert_eq!(info.suffix, ".jpg");
        assert_eq!(info.padding, 4);
    }

    #[test]
    fn test_c_style_pattern() {
        let info = parse_pattern("img.%04d.jpg", PatternFlavors::DEFAULT).unwrap();
        assert_eq!(info.flavor, PatternFlavor::CStyle);
        assert_eq!(info.padding, 4);
        assert!(!info.strict_padding);

        let info = parse_pattern("img.%d.jpg", PatternFlavors::DEFAULT).unwrap();
        assert_eq!(info.padding, 0);
    }

    #[test]
    fn test_frame_pattern() {
        // frame flavors are not in the default mask
        assert!(parse_pattern("img.0123.jpg", PatternFlavors::DEFAULT).is_none());

        let info = parse_pattern("img.0123.jpg", PatternFlavors::ALL).unwrap();
        assert_eq!(info.prefix, "img.");
        assert_eq!(info.padding, 4);

        // with only the unsigned flavor accepted, the flavor is Frame itself
        let info = parse_pattern("img.0123.jpg", PatternFlavors::FRAME).unwrap();
        assert_eq!(info.flavor, PatternFlavor::Frame);
    }

    #[test]
    fn test_frame_neg_pattern() {
        let info = parse_pattern("img.-0123.jpg", PatternFlavors::ALL).unwrap();
        assert_eq!(info.flavor, PatternFlavor::FrameNeg);
        // the sign does not count toward padding
        assert_eq!(info.padding, 4);
    }

    #[test]
    fn test_precedence() {
        // '#' wins over a frame interpretation
        let info = parse_pattern("img.##.jpg", PatternFlavors::ALL).unwrap();
        assert_eq!(info.flavor, PatternFlavor::Standard);
    }

    #[test]
    fn test_unrecognized() {
        assert!(parse_pattern("readme.txt", PatternFlavors::DEFAULT).is_none());
    }

    #[test]
    fn test_check_pattern() {
        assert_eq!(
            check_pattern("img.####.jpg", DetectOptions::default()),
            Some(PatternFlavor::Standard)
        );
        assert_eq!(
            check_pattern("img.%04d.jpg", DetectOptions::default()),
            Some(PatternFlavor::CStyle)
        );
        assert_eq!(
            check_pattern("img.-5.jpg", DetectOptions::default() | DetectOptions::NEGATIVE),
            Some(PatternFlavor::FrameNeg)
        );
        assert_eq!(
            check_pattern("img.5.jpg", DetectOptions::default()),
            Some(PatternFlavor::Frame)
        );
        assert_eq!(check_pattern("readme.txt", DetectOptions::default()), None);
    }

    #[test]
    fn test_format_frame() {
        assert_eq!(format_frame(1, 4), "0001");
        assert_eq!(format_frame(123, 0), "123");
        assert_eq!(format_frame(-1, 4), "-0001");
        assert_eq!(format_frame(-12, 0), "-12");
    }
}
