//! Locale-number adapter: the thin surface the formatter depends on for
//! localized numbers and CLDR plural categories.
//!
//! Plural selection is backed by `intl_pluralrules`. Numbers accepted as
//! text keep their visible fraction digits, which CLDR plural operands
//! are sensitive to (`1` is `one` in English, `1.0` is `other`). Digit
//! rendering uses the locale's CLDR decimal and grouping separators from
//! a curated table keyed by base language, with digits grouped in
//! threes; languages not in the table render with `.` and `,`. A full
//! CLDR-backed formatter can replace these bodies without changing the
//! signatures.

use std::collections::BTreeMap;

use intl_pluralrules::{PluralRuleType, PluralRules};
use lazy_static::lazy_static;
use unic_langid::LanguageIdentifier;

use crate::error::Error;
use crate::types::PluralCategory;

#[derive(Debug, Clone, Copy)]
struct NumberSymbols {
    decimal: char,
    group: char,
}

const DEFAULT_SYMBOLS: NumberSymbols = NumberSymbols {
    decimal: '.',
    group: ',',
};

lazy_static! {
    /// CLDR number symbols by base language subtag (curated subset).
    static ref SYMBOL_TABLE: BTreeMap<&'static str, NumberSymbols> = {
        let mut m: BTreeMap<&'static str, NumberSymbols> = BTreeMap::new();

        // Dot decimal, comma groups
        for code in [
            "en", "ja", "zh", "ko", "th", "he", "hi", "sw", "fil", "ms", "cy", "ga", "mt",
        ] {
            m.insert(code, NumberSymbols { decimal: '.', group: ',' });
        }

        // Comma decimal, dot groups
        for code in [
            "de", "nl", "da", "el", "es", "it", "pt", "tr", "id", "ro", "hr", "sr", "bs",
            "sl", "mk", "sq", "vi", "ca", "gl", "eu",
        ] {
            m.insert(code, NumberSymbols { decimal: ',', group: '.' });
        }

        // Comma decimal, no-break-space groups
        for code in [
            "fr", "ru", "uk", "be", "pl", "cs", "sk", "fi", "sv", "nb", "nn", "et", "lv",
            "lt", "hu", "bg", "kk",
        ] {
            m.insert(code, NumberSymbols { decimal: ',', group: '\u{00A0}' });
        }

        m
    };
}

fn symbols_for(locale: &LanguageIdentifier) -> NumberSymbols {
    SYMBOL_TABLE
        .get(locale.language.as_str())
        .copied()
        .unwrap_or(DEFAULT_SYMBOLS)
}

/// Formats an integer with the locale's grouping separator.
pub fn format_integer(locale: &LanguageIdentifier, value: i64) -> Result<String, Error> {
    let symbols = symbols_for(locale);
    let digits = value.unsigned_abs().to_string();
    let mut rendered = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        rendered.push('-');
    }
    push_grouped(&mut rendered, &digits, symbols.group);
    Ok(rendered)
}

/// Formats a decimal with the locale's separators, padding the fraction
/// with zeros up to `minimum_fraction_digits`. Non-finite values are not
/// formattable; values short enough to render in scientific notation are
/// returned as-is, ungrouped.
pub fn format_decimal(
    locale: &LanguageIdentifier,
    value: f64,
    minimum_fraction_digits: usize,
) -> Result<String, Error> {
    if !value.is_finite() {
        return Err(Error::NumberFormat {
            locale: locale.to_string(),
            value: value.to_string(),
        });
    }
    let neutral = value.to_string();
    if neutral.contains('e') || neutral.contains('E') {
        return Ok(neutral);
    }
    let symbols = symbols_for(locale);
    let neutral = pad_fraction(neutral, minimum_fraction_digits);
    let (int_part, fraction) = match neutral.find('.') {
        Some(at) => (&neutral[..at], Some(&neutral[at + 1..])),
        None => (neutral.as_str(), None),
    };
    let negative = int_part.starts_with('-');
    let digits = if negative { &int_part[1..] } else { int_part };

    let mut rendered = String::with_capacity(neutral.len() + digits.len() / 3 + 1);
    if negative {
        rendered.push('-');
    }
    push_grouped(&mut rendered, digits, symbols.group);
    if let Some(fraction) = fraction {
        rendered.push(symbols.decimal);
        rendered.push_str(fraction);
    }
    Ok(rendered)
}

fn pad_fraction(mut rendered: String, minimum_fraction_digits: usize) -> String {
    let fraction_digits = match rendered.find('.') {
        Some(at) => rendered.len() - at - 1,
        None => {
            if minimum_fraction_digits > 0 {
                rendered.push('.');
            }
            0
        }
    };
    for _ in fraction_digits..minimum_fraction_digits {
        rendered.push('0');
    }
    rendered
}

/// Inserts `separator` every three digits, counting from the right.
fn push_grouped(rendered: &mut String, digits: &str, separator: char) {
    if digits.len() <= 3 {
        rendered.push_str(digits);
        return;
    }
    let offset = digits.len() % 3;
    if offset > 0 {
        rendered.push_str(&digits[..offset]);
        rendered.push(separator);
    }
    for (index, byte) in digits[offset..].bytes().enumerate() {
        if index > 0 && index % 3 == 0 {
            rendered.push(separator);
        }
        rendered.push(byte as char);
    }
}

/// Returns the CLDR cardinal plural category of `number` (in textual
/// form, fraction digits intact) under `locale`. Falls back to the bare
/// language subtag when the full locale has no rule table of its own
/// (`en-GB` uses the `en` rules).
pub fn plural_category(
    locale: &LanguageIdentifier,
    number: &str,
) -> Result<PluralCategory, Error> {
    let rules = PluralRules::create(locale.clone(), PluralRuleType::CARDINAL)
        .or_else(|_| {
            let base = LanguageIdentifier::from_parts(locale.language, None, None, &[]);
            PluralRules::create(base, PluralRuleType::CARDINAL)
        })
        .map_err(|_| Error::PluralRules(locale.to_string()))?;
    let category = rules
        .select(number)
        .map_err(|_| Error::PluralRules(locale.to_string()))?;
    Ok(match category {
        intl_pluralrules::PluralCategory::ZERO => PluralCategory::Zero,
        intl_pluralrules::PluralCategory::ONE => PluralCategory::One,
        intl_pluralrules::PluralCategory::TWO => PluralCategory::Two,
        intl_pluralrules::PluralCategory::FEW => PluralCategory::Few,
        intl_pluralrules::PluralCategory::MANY => PluralCategory::Many,
        intl_pluralrules::PluralCategory::OTHER => PluralCategory::Other,
    })
}
