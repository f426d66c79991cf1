//! Number and unit detection in raw page text

use regex::{Matches, Regex};
use std::ops::Range;
use std::sync::LazyLock;

/// Characters past the end of a number searched for its unit
pub const UNIT_WINDOW_CHARS: usize = 20;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d[\d,.]*\b").expect("valid number regex"));

// `%` must not be followed by a word character; the regex crate has no
// lookahead, so that check happens in `unit_in`.
// `tonnes?` is listed before `tons?` on purpose: alternation is
// leftmost-first, and the other order reports "5 tonnes" as `ton`.
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)%|tCO2e|GJ|m³|m3|tonnes?|tons?|kg|kWh|MWh").expect("valid unit regex")
});

/// A number found in text, with the unit that follows it (if any)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberHit<'a> {
    /// The matched numeral, verbatim
    pub value: &'a str,
    /// The first unit token in the window, verbatim, or `""`
    pub unit: &'a str,
    /// Byte range of `value` within the text
    pub span: Range<usize>,
}

/// Lazy iterator over [`NumberHit`]s, in order of first occurrence
pub struct NumberHits<'a> {
    text: &'a str,
    numbers: Matches<'static, 'a>,
}

impl<'a> Iterator for NumberHits<'a> {
    type Item = NumberHit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.numbers.next()?;
        let window_end = self.text[m.end()..]
            .char_indices()
            .nth(UNIT_WINDOW_CHARS)
            .map(|(offset, _)| m.end() + offset)
            .unwrap_or(self.text.len());
        let window = &self.text[m.start()..window_end];

        Some(NumberHit {
            value: m.as_str(),
            unit: unit_in(window),
            span: m.range(),
        })
    }
}

/// First recognised unit token in `window`
fn unit_in(window: &str) -> &str {
    UNIT_RE
        .find_iter(window)
        .find(|m| {
            m.as_str() != "%"
                || !window[m.end()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_')
        })
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// Scan `text` for numbers and the unit that follows each
///
/// Every maximal numeral (`2.5`, `96.8`, `1,234`) is reported once, paired
/// with the first recognised unit within [`UNIT_WINDOW_CHARS`] characters of
/// its end. A unit belonging to a later number can be picked up by an
/// earlier one; hits are not deduplicated.
///
/// # Examples
///
/// ```
/// use sasb_miner::find_numbers_and_units;
///
/// let hits: Vec<_> = find_numbers_and_units("emissions totalled 2.5 tCO2e")
///     .map(|h| (h.value, h.unit))
///     .collect();
/// assert_eq!(hits, vec![("2.5", "tCO2e")]);
/// ```
pub fn find_numbers_and_units(text: &str) -> NumberHits<'_> {
    NumberHits {
        text,
        numbers: NUMBER_RE.find_iter(text),
    }
}
