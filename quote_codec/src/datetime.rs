//! Packed calendar field decoding for bar timestamps.
//!
//! Every K-line record carries four raw bytes of date/time whose layout
//! depends on the bar granularity. Intraday categories pack a day word and a
//! minute-of-day word; everything else carries the calendar date as a plain
//! decimal number, stamped with the 15:00 market close.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Decoded bar timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarTime {
    /// Calendar year.
    pub year: u16,
    /// Calendar month, 1-12 for well-formed data.
    pub month: u8,
    /// Calendar day of month.
    pub day: u8,
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Minute of hour, 0-59.
    pub minute: u8,
}

impl BarTime {
    /// Decodes the four raw bytes for the given category.
    pub fn decode(category: Category, raw: [u8; 4]) -> Self {
        Self::decode_raw(category.wire(), raw)
    }

    /// Decodes the four raw bytes for a raw wire category.
    ///
    /// Discriminants outside the known set use the end-of-day layout, the
    /// same silent fallback the reference server client applies. That is a
    /// deliberate policy, not an error path; callers that want to reject
    /// unknown categories must do so before decoding.
    pub fn decode_raw(category: u16, raw: [u8; 4]) -> Self {
        let intraday = matches!(category, 0..=3 | 7 | 8);
        if !intraday && Category::from_repr(category).is_none() {
            log::debug!("unknown category {category}, decoding date with end-of-day layout");
        }

        if intraday {
            let zipday = u16::from_le_bytes([raw[0], raw[1]]);
            let tminutes = u16::from_le_bytes([raw[2], raw[3]]);
            BarTime {
                year: (zipday >> 11) + 2004,
                month: ((zipday % 2048) / 100) as u8,
                day: ((zipday % 2048) % 100) as u8,
                hour: (tminutes / 60) as u8,
                minute: (tminutes % 60) as u8,
            }
        } else {
            let zipday = u32::from_le_bytes(raw);
            BarTime {
                year: (zipday / 10_000) as u16,
                month: ((zipday % 10_000) / 100) as u8,
                day: (zipday % 100) as u8,
                // End-of-day bars are stamped with the market close.
                hour: 15,
                minute: 0,
            }
        }
    }

    /// Conversion into a `chrono` timestamp; `None` when the wire carried an
    /// out-of-range calendar value.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(i32::from(self.year), u32::from(self.month), u32::from(self.day))?
            .and_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
    }
}

impl fmt::Display for BarTime {
    /// Canonical `YYYY-MM-DD HH:MM` rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}
