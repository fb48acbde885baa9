use crate::frame_range::Time;
use crate::options::DetectOptions;

/// The ordered non-numeric fragments of a filename. Two filenames are
/// candidate members of the same sequence iff their `FileStrings` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FileStrings {
    parts: Vec<String>,
}

impl FileStrings {
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn get(&self, index: usize) -> &str {
        &self.parts[index]
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

/// One numeric field of a filename, with its raw text preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNumber {
    raw: String,
    value: Time,
    padding: usize,
    nb_digits: usize,
}

impl FileNumber {
    fn new(raw: String, value: Time) -> Self {
        let digits = raw.strip_prefix(['-', '+']).unwrap_or(&raw);
        let nb_digits = digits.len();
        // a zero-padded field declares its width; a bare "0" does not
        let padding = if digits.starts_with('0') && nb_digits > 1 {
            nb_digits
        } else {
            0
        };
        FileNumber {
            raw,
            value,
            padding,
            nb_digits,
        }
    }

    /// Raw text as it appears in the filename, sign included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> Time {
        self.value
    }

    /// Declared width when the field is zero-padded, 0 otherwise.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Actual digit count, excluding an optional sign.
    pub fn nb_digits(&self) -> usize {
        self.nb_digits
    }
}

/// The numeric fields of a filename, interleaved between its `FileStrings`
/// fragments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileNumbers {
    numbers: Vec<FileNumber>,
}

impl FileNumbers {
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn get(&self, index: usize) -> &FileNumber {
        &self.numbers[index]
    }
}

/// Split a filename into string fragments and numeric fields.
///
/// Returns `None` when the filename holds no numeric field; the caller then
/// treats it as a plain file. Otherwise the decomposition satisfies
/// `strings.len() == numbers.len() + 1`, and interleaving fragments with the
/// raw fields reproduces the filename byte for byte.
pub fn decompose_filename(
    filename: &str,
    options: DetectOptions,
) -> Option<(FileStrings, FileNumbers)> {
    let negative = options.contains(DetectOptions::NEGATIVE);
    let chars: Vec<char> = filename.chars().collect();

    let mut parts: Vec<String> = Vec::new();
    let mut numbers: Vec<FileNumber> = Vec::new();
    let mut fragment = String::new();

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let signed_start = negative
            && (c == '-' || c == '+')
            && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())
            && (i == 0 || !chars[i - 1].is_ascii_digit());

        if c.is_ascii_digit() || signed_start {
            let start = i;
            if signed_start {
                i += 1;
            }
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let raw: String = chars[start..i].iter().collect();
            match raw.parse::<Time>() {
                Ok(value) => {
                    parts.push(std::mem::take(&mut fragment));
                    numbers.push(FileNumber::new(raw, value));
                }
                // a digit run too large for a frame index stays literal text
                Err(_) => fragment.push_str(&raw),
            }
        } else {
            fragment.push(c);
            i += 1;
        }
    }
    parts.push(fragment);

    if numbers.is_empty() {
        return None;
    }
    Some((FileStrings { parts }, FileNumbers { numbers }))
}

/// Splice raw numeric fields back between the skeleton fragments,
/// reproducing the original filename.
pub(crate) fn recompose(skeleton: &FileStrings, numbers: &FileNumbers) -> String {
    let mut out = String::new();
    for i in 0..numbers.len() {
        out.push_str(skeleton.get(i));
        out.push_str(numbers.get(i).raw());
    }
    out.push_str(skeleton.get(numbers.len()));
    out
}
