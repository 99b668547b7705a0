//! String collation for sort keys.
//!
//! A [`Collator`] compares with CLDR collation data for its locale tag.
//! Tags that do not parse, or that no data can be loaded for, fall back to
//! a small kana-aware folding: primary ignores case, the
//! hiragana/katakana distinction, full-width forms, voicing marks and small
//! kana; secondary restores voicing and small kana. Either way, ties fall
//! back to code point order, so distinct strings never compare equal.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use icu_collator::CollatorOptions;
use icu_locid::Locale;
use icu_provider::DataLocale;

const VOICED: &str = "がぎぐげござじずぜぞだぢづでどばびぶべぼぱぴぷぺぽゔ";
const VOICED_BASE: &str = "かきくけこさしすせそたちつてとはひふへほはひふへほう";
const SMALL: &str = "ぁぃぅぇぉっゃゅょゎゕゖ";
const SMALL_BASE: &str = "あいうえおつやゆよわかけ";

/// Locale collator shared by every comparator built for one index.
#[derive(Clone)]
pub struct Collator {
    locale: String,
    cldr: Option<Arc<icu_collator::Collator>>,
}

impl Collator {
    pub fn new(locale: impl Into<String>) -> Self {
        let locale = locale.into();
        let cldr = load_cldr(&locale).map(Arc::new);
        Self { locale, cldr }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Whether comparisons use CLDR data rather than the built-in folding.
    pub fn uses_cldr(&self) -> bool {
        self.cldr.is_some()
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let ordering = match &self.cldr {
            Some(collator) => collator.compare(a, b),
            None => fold(a, Strength::Primary)
                .cmp(&fold(b, Strength::Primary))
                .then_with(|| fold(a, Strength::Secondary).cmp(&fold(b, Strength::Secondary))),
        };
        ordering.then_with(|| a.cmp(b))
    }
}

impl Default for Collator {
    fn default() -> Self {
        Self::new("und")
    }
}

impl fmt::Debug for Collator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collator")
            .field("locale", &self.locale)
            .field("cldr", &self.uses_cldr())
            .finish()
    }
}

fn load_cldr(tag: &str) -> Option<icu_collator::Collator> {
    let locale: Locale = match tag.parse() {
        Ok(locale) => locale,
        Err(err) => {
            log::warn!("invalid collation locale {:?} ({}), using kana folding", tag, err);
            return None;
        }
    };
    match icu_collator::Collator::try_new(&DataLocale::from(&locale), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(err) => {
            log::warn!("no collation data for {:?} ({}), using kana folding", tag, err);
            None
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Strength {
    Primary,
    Secondary,
}

fn fold(s: &str, strength: Strength) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let c = to_hiragana(to_half_width(c));
        let c = if strength == Strength::Primary {
            strip_voicing(c)
        } else {
            c
        };
        out.extend(c.to_lowercase());
    }
    out
}

fn to_half_width(c: char) -> char {
    match c {
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        '\u{3000}' => ' ',
        _ => c,
    }
}

fn to_hiragana(c: char) -> char {
    match c {
        '\u{30A1}'..='\u{30F6}' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
        _ => c,
    }
}

fn strip_voicing(c: char) -> char {
    map_char(c, VOICED, VOICED_BASE)
        .or_else(|| map_char(c, SMALL, SMALL_BASE))
        .unwrap_or(c)
}

fn map_char(c: char, from: &str, to: &str) -> Option<char> {
    let pos = from.chars().position(|f| f == c)?;
    to.chars().nth(pos)
}
