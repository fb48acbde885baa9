use bitflags::bitflags;

bitflags! {
    /// Flags steering how filenames are decomposed and grouped.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DetectOptions: u32 {
        /// Include filenames starting with a dot.
        const DOT_FILE = 0b0001;
        /// Capture a `+`/`-` sign immediately preceding a digit run.
        const NEGATIVE = 0b0010;
        /// A single numbered file is reported as a one-frame sequence
        /// instead of a plain file.
        const SEQUENCE_BASED_ON_FILENAME = 0b0100;
        /// Group files sharing a string skeleton into sequences. With this
        /// flag cleared every entry is reported as a plain file.
        const SEQUENCE_BASED_ON_NUMBERS = 0b1000;
    }
}

impl Default for DetectOptions {
    fn default() -> Self {
        DetectOptions::SEQUENCE_BASED_ON_NUMBERS
    }
}

bitflags! {
    /// Selects which categories a detector includes in its output.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TypeMask: u32 {
        const FILE = 0b001;
        const SEQUENCE = 0b010;
        const DIRECTORY = 0b100;
    }
}

impl Default for TypeMask {
    fn default() -> Self {
        TypeMask::all()
    }
}
