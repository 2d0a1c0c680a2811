//! Locale-aware formatting for money, dates and relative times.
//!
//! A [`Formatter`] carries its locale and UTC offset explicitly; nothing here
//! reads the system clock, timezone or locale. "Now" is always an argument.

use crate::errors::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Locale {
    /// `$1,234.56`, `Mar 1, 2024`
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// `£1,234.56`, `1 Mar 2024`
    #[serde(rename = "en-GB")]
    EnGb,
    /// `1.234,56 €`, `01.03.2024`
    #[serde(rename = "de-DE")]
    DeDe,
    /// `1 234,56 €`, `01/03/2024`
    #[serde(rename = "fr-FR")]
    FrFr,
}

struct NumberStyle {
    symbol: &'static str,
    symbol_first: bool,
    decimal: char,
    group: char,
    date: &'static str,
    time: &'static str,
}

impl Locale {
    /// Every supported locale.
    pub const ALL: [Self; 4] = [Self::EnUs, Self::EnGb, Self::DeDe, Self::FrFr];

    /// BCP 47 tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::DeDe => "de-DE",
            Self::FrFr => "fr-FR",
        }
    }

    const fn style(self) -> NumberStyle {
        match self {
            Self::EnUs => NumberStyle {
                symbol: "$",
                symbol_first: true,
                decimal: '.',
                group: ',',
                date: "%b %-d, %Y",
                time: "%-I:%M %p",
            },
            Self::EnGb => NumberStyle {
                symbol: "£",
                symbol_first: true,
                decimal: '.',
                group: ',',
                date: "%-d %b %Y",
                time: "%H:%M",
            },
            Self::DeDe => NumberStyle {
                symbol: "€",
                symbol_first: false,
                decimal: ',',
                group: '.',
                date: "%d.%m.%Y",
                time: "%H:%M",
            },
            Self::FrFr => NumberStyle {
                symbol: "€",
                symbol_first: false,
                decimal: ',',
                group: ' ',
                date: "%d/%m/%Y",
                time: "%H:%M",
            },
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidValue {
                kind: "locale",
                value: s.to_string(),
            })
    }
}

/// Formatting service bound to one locale and UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formatter {
    locale: Locale,
    offset: FixedOffset,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            offset: Utc.fix(),
        }
    }
}

impl Formatter {
    /// Creates a formatter for `locale` at `utc_offset_minutes` east of UTC.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the offset is outside ±24 hours.
    pub fn new(locale: Locale, utc_offset_minutes: i32) -> Result<Self> {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| Error::Config {
                message: format!("UTC offset of {utc_offset_minutes} minutes is out of range"),
            })?;
        Ok(Self { locale, offset })
    }

    /// Formats a money amount, rounded to cents.
    #[must_use]
    pub fn currency(&self, amount: Decimal) -> String {
        let style = self.locale.style();
        let rounded = amount.round_dp(2);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        let digits = rounded.abs().to_string();
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        let number = format!(
            "{}{}{:0<2}",
            group_digits(int_part, style.group),
            style.decimal,
            frac_part
        );

        if style.symbol_first {
            format!("{sign}{}{number}", style.symbol)
        } else {
            format!("{sign}{number} {}", style.symbol)
        }
    }

    /// Formats a calendar date.
    #[must_use]
    pub fn date(&self, date: NaiveDate) -> String {
        date.format(self.locale.style().date).to_string()
    }

    /// Formats an instant as local date and time.
    #[must_use]
    pub fn timestamp(&self, at: DateTime<Utc>) -> String {
        let style = self.locale.style();
        let local = at.with_timezone(&self.offset);
        format!("{} {}", local.format(style.date), local.format(style.time))
    }

    /// Describes `then` relative to `now`; anything a week or older falls
    /// back to the local date. An instant more than a minute in the future
    /// is shown as a full local timestamp.
    #[must_use]
    pub fn relative(&self, then: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(then);
        let minutes = elapsed.num_minutes();
        let hours = elapsed.num_hours();
        let days = elapsed.num_days();

        if minutes < 0 {
            self.timestamp(then)
        } else if minutes < 1 {
            "just now".to_string()
        } else if hours < 1 {
            plural(minutes, "minute")
        } else if days < 1 {
            plural(hours, "hour")
        } else if days < 7 {
            plural(days, "day")
        } else {
            self.date(then.with_timezone(&self.offset).date_naive())
        }
    }

    /// Formats a percentage with one decimal place.
    #[must_use]
    pub fn percentage(&self, percent: f64) -> String {
        let shown = if percent.is_finite() { percent } else { 0.0 };
        let text = format!("{shown:.1}%");
        if self.locale.style().decimal == '.' {
            text
        } else {
            text.replace('.', ",")
        }
    }

    /// Text bar like `[████████░░] 80.0%`, clamped to 0-100 for the bar.
    #[must_use]
    pub fn progress_bar(&self, percent: f64, width: usize) -> String {
        let clamped = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };

        // Cast safety: clamped ∈ [0, 100] and width is a small column count,
        // so the product is within [0, width].
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let filled = ((clamped / 100.0) * width as f64).round() as usize;
        let empty = width.saturating_sub(filled);

        format!(
            "[{}{}] {}",
            "█".repeat(filled),
            "░".repeat(empty),
            self.percentage(percent)
        )
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

fn group_digits(int_part: &str, separator: char) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
