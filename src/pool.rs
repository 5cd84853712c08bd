const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

pub const DEFAULT_SPECIAL: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?";
pub const AMBIGUOUS: &str = "0OIl1";

pub const DEFAULT_LENGTH: i64 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub length: i64,
    pub no_upper: bool,
    pub no_digits: bool,
    pub no_special: bool,
    /// Replaces [`DEFAULT_SPECIAL`] when non-empty.
    pub special: String,
    pub no_ambiguous: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            no_upper: false,
            no_digits: false,
            no_special: false,
            special: String::new(),
            no_ambiguous: false,
        }
    }
}

impl Options {
    pub fn special_set(&self) -> &str {
        if self.special.is_empty() {
            DEFAULT_SPECIAL
        } else {
            &self.special
        }
    }
}

/// Assembles the characters eligible for sampling.
///
/// Lowercase letters are always present. A custom special set that overlaps
/// another category is kept as-is, so the shared characters are drawn more often.
pub fn build_pool(options: &Options) -> Vec<char> {
    let mut pool: Vec<char> = LOWERCASE.chars().collect();

    if !options.no_upper {
        pool.extend(UPPERCASE.chars());
    }
    if !options.no_digits {
        pool.extend(DIGITS.chars());
    }
    if !options.no_special {
        pool.extend(options.special_set().chars());
    }

    if options.no_ambiguous {
        pool.retain(|c| !is_ambiguous(*c));
    }

    pool
}

pub fn is_ambiguous(c: char) -> bool {
    AMBIGUOUS.contains(c)
}
