//! French spelling of monetary amounts, as printed at the foot of invoices:
//! `*** mille deux cent cinquante Da et quinze centimes.`
//!
//! The number rules follow standard French orthography for 0 to
//! 999 999 999 999 with two deliberate fixed points: "quatre-vingt" never
//! takes a plural `s`, and scale words agree in number ("million" /
//! "millions") while "mille" stays invariable.

use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::{
    amount::{MonetaryAmount, MAX_UNITS},
    config::Config,
    errors::AmountError,
};

const ZERO_WORD: &str = "zéro";

const TENS_NAMES: [&str; 10] = [
    "",
    "",
    "vingt",
    "trente",
    "quarante",
    "cinquante",
    "soixante",
    "soixante",
    "quatre-vingt",
    "quatre-vingt",
];

const UNIT_NAMES: [&str; 20] = [
    "",
    "un",
    "deux",
    "trois",
    "quatre",
    "cinq",
    "six",
    "sept",
    "huit",
    "neuf",
    "dix",
    "onze",
    "douze",
    "treize",
    "quatorze",
    "quinze",
    "seize",
    "dix-sept",
    "dix-huit",
    "dix-neuf",
];

// "un cent" is never said, hence the blank slot for 1.
const HUNDREDS_MULTIPLIERS: [&str; 10] = [
    "", "", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf",
];

struct Scale {
    divisor: u64,
    singular: &'static str,
    plural: &'static str,
}

const SCALES: [Scale; 2] = [
    Scale {
        divisor: 1_000_000_000,
        singular: "milliard",
        plural: "milliards",
    },
    Scale {
        divisor: 1_000_000,
        singular: "million",
        plural: "millions",
    },
];

/// Spells `0..=99`. Returns an empty string for zero.
///
/// The 70s and 90s reuse the teens ("soixante-douze", "quatre-vingt-dix-sept").
/// `value` must be below 100; debug builds assert it, release builds reduce
/// it modulo 100.
pub fn render_tens(value: u16) -> String {
    debug_assert!(value < 100, "render_tens called with {value}");
    let value = value % 100;
    let tens = usize::from(value / 10);
    let mut units = usize::from(value % 10);
    if matches!(tens, 1 | 7 | 9) {
        units += 10;
    }

    let liaison = match units {
        0 => "",
        1 if tens == 8 => "-",
        1 => " et ",
        11 if tens == 7 => " et ",
        _ if tens > 1 => "-",
        _ => "",
    };

    if tens == 0 {
        return UNIT_NAMES[units].to_string();
    }
    format!("{}{}{}", TENS_NAMES[tens], liaison, UNIT_NAMES[units])
}

/// Spells a three-digit group `0..=999`. Returns an empty string for zero.
///
/// `value` must be below 1000; debug builds assert it, release builds reduce
/// it modulo 1000. Use [`spell_integer`] for larger numbers.
pub fn render_hundreds(value: u16) -> String {
    debug_assert!(value < 1000, "render_hundreds called with {value}");
    let value = value % 1000;
    let hundreds = usize::from(value / 100);
    let remainder = value % 100;
    let rest = render_tens(remainder);

    match (hundreds, remainder) {
        (0, _) => rest,
        (1, 0) => "cent".to_string(),
        (1, _) => format!("cent {rest}"),
        (_, 0) => format!("{} cents", HUNDREDS_MULTIPLIERS[hundreds]),
        (_, _) => format!("{} cent {rest}", HUNDREDS_MULTIPLIERS[hundreds]),
    }
}

/// Spells an integer up to 999 999 999 999; zero reads "zéro".
pub fn spell_integer(value: u64) -> Result<String, AmountError> {
    if value > MAX_UNITS {
        return Err(AmountError::OutOfRange(value.to_string()));
    }
    Ok(spell_units(value))
}

fn spell_units(value: u64) -> String {
    if value == 0 {
        return ZERO_WORD.to_string();
    }

    let mut segments: Vec<String> = Vec::with_capacity(4);
    for scale in &SCALES {
        let group = group_of(value, scale.divisor);
        match group {
            0 => {}
            1 => segments.push(format!("{} {}", render_hundreds(group), scale.singular)),
            _ => segments.push(format!("{} {}", render_hundreds(group), scale.plural)),
        }
    }

    match group_of(value, 1_000) {
        0 => {}
        1 => segments.push("mille".to_string()),
        thousands => segments.push(format!("{} mille", render_hundreds(thousands))),
    }

    let units = group_of(value, 1);
    if units != 0 {
        segments.push(render_hundreds(units));
    }

    segments.join(" ")
}

fn group_of(value: u64, divisor: u64) -> u16 {
    ((value / divisor) % 1000) as u16
}

fn spell_cents(cents: u8) -> String {
    if cents == 0 {
        ZERO_WORD.to_string()
    } else {
        render_tens(u16::from(cents))
    }
}

/// Result of spelling an amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpelledAmount {
    text: String,
    integer_words: String,
    cents_words: String,
}

impl SpelledAmount {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn integer_words(&self) -> &str {
        &self.integer_words
    }

    pub fn cents_words(&self) -> &str {
        &self.cents_words
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for SpelledAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for SpelledAmount {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Spells amounts using fixed presentation words around the French number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountSpeller {
    marker: String,
    currency_unit: String,
    cents_unit: String,
}

impl Default for AmountSpeller {
    fn default() -> Self {
        Self {
            marker: "***".into(),
            currency_unit: "Da".into(),
            cents_unit: "centimes".into(),
        }
    }
}

static DEFAULT_SPELLER: Lazy<AmountSpeller> = Lazy::new(AmountSpeller::default);

impl AmountSpeller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            marker: config.marker.clone(),
            currency_unit: config.currency_unit.clone(),
            cents_unit: config.cents_unit.clone(),
        }
    }

    pub fn with_currency_unit(mut self, unit: impl Into<String>) -> Self {
        self.currency_unit = unit.into();
        self
    }

    pub fn with_cents_unit(mut self, unit: impl Into<String>) -> Self {
        self.cents_unit = unit.into();
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn spell(&self, amount: MonetaryAmount) -> SpelledAmount {
        let integer_words = spell_units(amount.units());
        let cents_words = spell_cents(amount.cents());
        let text = format!(
            "{} {} {} et {} {}.",
            self.marker, integer_words, self.currency_unit, cents_words, self.cents_unit
        );
        tracing::debug!(%amount, text = %text, "spelled amount");
        SpelledAmount {
            text,
            integer_words,
            cents_words,
        }
    }

    pub fn spell_f64(&self, value: f64) -> Result<SpelledAmount, AmountError> {
        MonetaryAmount::from_f64(value).map(|amount| self.spell(amount))
    }

    pub fn spell_str(&self, input: &str) -> Result<SpelledAmount, AmountError> {
        input
            .parse::<MonetaryAmount>()
            .map(|amount| self.spell(amount))
    }
}

/// Spells with the default `*** … Da et … centimes.` template.
pub fn spell(amount: MonetaryAmount) -> SpelledAmount {
    DEFAULT_SPELLER.spell(amount)
}

pub fn spell_f64(value: f64) -> Result<SpelledAmount, AmountError> {
    DEFAULT_SPELLER.spell_f64(value)
}
