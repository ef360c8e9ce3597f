//! Recorded simulation times.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A simulation time as written on a time-marker line.
///
/// Keys compare and hash by their literal text, so `"1.0"` and `"1"` are
/// distinct keys even though they decode to the same value. This keeps
/// lookups exact: a caller asks for a time it saw in the log and gets
/// that time's entry, with no float-equality guesswork. Ordering uses the
/// decoded value, falling back to the text for equal values.
///
/// # Examples
///
/// ```
/// use tether_core::TimeKey;
///
/// let t = TimeKey::parse(" 2.50\n").unwrap();
/// assert_eq!(t.as_str(), "2.50");
/// assert_eq!(t.value(), 2.5);
/// assert!(TimeKey::parse("subV").is_none());
/// ```
#[derive(Clone, Debug)]
pub struct TimeKey {
    text: Arc<str>,
    value: f64,
}

impl TimeKey {
    /// Decode a time from the text of a marker line.
    ///
    /// Surrounding whitespace is ignored. Returns `None` when the text is
    /// not a finite floating-point number.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        let value: f64 = text.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(Self {
            text: Arc::from(text),
            value,
        })
    }

    /// The literal marker text, trimmed.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The decoded time value.
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl PartialEq for TimeKey {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for TimeKey {}

impl Hash for TimeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl indexmap::Equivalent<TimeKey> for str {
    fn equivalent(&self, key: &TimeKey) -> bool {
        self == key.as_str()
    }
}
