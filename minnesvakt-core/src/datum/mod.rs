//! ## minnesvakt-core::datum
//! **Tracked calendar timestamps**
//!
//! A date record is a fixed 24-byte encoding of the conventional
//! calendar-struct fields: year as an offset from 1900, zero-based month,
//! day, hour, minute, second. Weekday and day-of-year are never derived;
//! callers must not rely on them. Capture goes through the [`Clock`] seam so
//! the wall-clock collaborator stays external to the core.
//!
//! Rendering uses strftime patterns via `chrono` into a growable buffer;
//! a malformed pattern or unrepresentable field combination is an explicit
//! error, never a truncated string.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use thiserror::Error;

use crate::alloc::registry::{cstring_buffer, Handle, MemoryRegistry};
use crate::error::RegistryError;
use crate::time::Clock;

/// Years in a date record are stored relative to this base.
pub const BASE_YEAR: i32 = 1900;

/// Fixed size of an encoded date record.
pub const DATE_RECORD_BYTES: usize = 24;

/// Failures raised by tracked date operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatumError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The handle resolves to a record that is not a 24-byte date record.
    #[error("tracked record is not a date record")]
    MalformedRecord,

    /// The stored fields do not form a representable timestamp.
    #[error("date fields do not form a representable timestamp")]
    UnrepresentableDate,

    #[error("malformed strftime pattern: {pattern:?}")]
    BadPattern { pattern: String },
}

/// Decoded calendar fields of a tracked date record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFields {
    /// Year minus [`BASE_YEAR`].
    pub years_since_base: i32,
    /// Zero-based month (January is 0).
    pub month0: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl DateFields {
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self {
            years_since_base: dt.year() - BASE_YEAR,
            month0: dt.month0(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }

    /// Reassembles a timestamp; `None` when the fields are out of range
    /// (for example a zero-based month of 12, or February 30th).
    pub fn to_datetime(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            self.years_since_base + BASE_YEAR,
            self.month0.checked_add(1)?,
            self.day,
        )?
        .and_hms_opt(self.hour, self.minute, self.second)
    }

    fn encode(self) -> [u8; DATE_RECORD_BYTES] {
        let mut bytes = [0u8; DATE_RECORD_BYTES];
        let fields = [
            self.years_since_base as u32,
            self.month0,
            self.day,
            self.hour,
            self.minute,
            self.second,
        ];
        for (chunk, field) in bytes.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&field.to_le_bytes());
        }
        bytes
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != DATE_RECORD_BYTES {
            return None;
        }
        let mut fields = [0u32; 6];
        for (field, chunk) in fields.iter_mut().zip(bytes.chunks_exact(4)) {
            *field = u32::from_le_bytes(chunk.try_into().ok()?);
        }
        Some(Self {
            years_since_base: fields[0] as i32,
            month0: fields[1],
            day: fields[2],
            hour: fields[3],
            minute: fields[4],
            second: fields[5],
        })
    }
}

/// Tracked date operation surface of the registry.
pub trait DatumOps {
    /// Captures the clock's current time into a new date record.
    fn new_date(&mut self, clock: &dyn Clock) -> Result<Handle, DatumError>;

    /// Allocates a date record from explicit fields. `month` is 1-12 at the
    /// call site and stored zero-based (a `month` of 0 wraps to an
    /// out-of-range record); no field validation or weekday derivation
    /// happens here, rendering validates on demand.
    fn new_date_time(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Handle, DatumError>;

    /// Replaces the previous date record with a fresh capture in the same
    /// slot. With no previous handle this behaves as [`DatumOps::new_date`].
    fn renew_date(
        &mut self,
        previous: Option<Handle>,
        clock: &dyn Clock,
    ) -> Result<Handle, DatumError>;

    /// Decodes a tracked date record.
    fn date_fields(&self, handle: Handle) -> Result<DateFields, DatumError>;

    /// Renders `date` through a strftime `pattern` into a newly tracked
    /// string.
    fn format_date(&mut self, date: Handle, pattern: &str) -> Result<Handle, DatumError>;

    /// Same rendering as [`DatumOps::format_date`], reusing the previous
    /// string's slot.
    fn reformat_date(
        &mut self,
        date: Handle,
        pattern: &str,
        previous: Option<Handle>,
    ) -> Result<Handle, DatumError>;
}

impl DatumOps for MemoryRegistry {
    fn new_date(&mut self, clock: &dyn Clock) -> Result<Handle, DatumError> {
        store_fields(self, DateFields::from_datetime(clock.now()))
    }

    fn new_date_time(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Handle, DatumError> {
        store_fields(
            self,
            DateFields {
                years_since_base: year - BASE_YEAR,
                month0: month.wrapping_sub(1),
                day,
                hour,
                minute,
                second,
            },
        )
    }

    fn renew_date(
        &mut self,
        previous: Option<Handle>,
        clock: &dyn Clock,
    ) -> Result<Handle, DatumError> {
        let fields = DateFields::from_datetime(clock.now());
        match previous {
            None => store_fields(self, fields),
            Some(handle) => {
                Ok(self.replace_content(handle, Box::new(fields.encode()))?)
            }
        }
    }

    fn date_fields(&self, handle: Handle) -> Result<DateFields, DatumError> {
        DateFields::decode(self.bytes(handle)?).ok_or(DatumError::MalformedRecord)
    }

    fn format_date(&mut self, date: Handle, pattern: &str) -> Result<Handle, DatumError> {
        let rendered = render_date(self, date, pattern)?;
        let handle = self.allocate(rendered.len() + 1)?;
        self.bytes_mut(handle)?[..rendered.len()].copy_from_slice(rendered.as_bytes());
        Ok(handle)
    }

    fn reformat_date(
        &mut self,
        date: Handle,
        pattern: &str,
        previous: Option<Handle>,
    ) -> Result<Handle, DatumError> {
        match previous {
            None => self.format_date(date, pattern),
            Some(handle) => {
                let rendered = render_date(self, date, pattern)?;
                Ok(self.replace_content(handle, cstring_buffer(&rendered)?)?)
            }
        }
    }
}

fn store_fields(
    registry: &mut MemoryRegistry,
    fields: DateFields,
) -> Result<Handle, DatumError> {
    let handle = registry.allocate(DATE_RECORD_BYTES)?;
    registry.bytes_mut(handle)?.copy_from_slice(&fields.encode());
    Ok(handle)
}

fn render_date(
    registry: &MemoryRegistry,
    date: Handle,
    pattern: &str,
) -> Result<String, DatumError> {
    let fields = registry.date_fields(date)?;
    let dt = fields.to_datetime().ok_or(DatumError::UnrepresentableDate)?;

    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(DatumError::BadPattern {
            pattern: pattern.to_owned(),
        });
    }

    let mut rendered = String::new();
    write!(rendered, "{}", dt.format_with_items(items.iter())).map_err(|_| {
        DatumError::BadPattern {
            pattern: pattern.to_owned(),
        }
    })?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextOps;
    use crate::time::FixedClock;

    fn test_clock() -> FixedClock {
        let instant = NaiveDate::from_ymd_opt(2016, 5, 1)
            .unwrap()
            .and_hms_opt(10, 30, 15)
            .unwrap();
        FixedClock::new(instant)
    }

    #[test]
    fn new_date_captures_the_clock() {
        let mut registry = MemoryRegistry::default();
        let clock = test_clock();
        let date = registry.new_date(&clock).unwrap();

        assert_eq!(registry.bytes(date).unwrap().len(), DATE_RECORD_BYTES);
        let fields = registry.date_fields(date).unwrap();
        assert_eq!(fields.years_since_base, 116);
        assert_eq!(fields.month0, 4);
        assert_eq!(fields.day, 1);
        assert_eq!(fields.second, 15);
    }

    #[test]
    fn explicit_fields_store_month_zero_based() {
        let mut registry = MemoryRegistry::default();
        let date = registry.new_date_time(1999, 12, 31, 23, 59, 58).unwrap();

        let fields = registry.date_fields(date).unwrap();
        assert_eq!(fields.years_since_base, 99);
        assert_eq!(fields.month0, 11);
        assert_eq!(fields.hour, 23);
    }

    #[test]
    fn renew_replaces_in_place() {
        let mut registry = MemoryRegistry::default();
        let clock = test_clock();
        let date = registry.new_date(&clock).unwrap();

        clock.advance(3600);
        let renewed = registry.renew_date(Some(date), &clock).unwrap();

        assert_eq!(renewed, date);
        assert_eq!(registry.slot_count(), 1);
        assert_eq!(registry.date_fields(renewed).unwrap().hour, 11);
    }

    #[test]
    fn format_date_renders_strftime_patterns() {
        let mut registry = MemoryRegistry::default();
        let date = registry.new_date_time(2016, 5, 1, 10, 30, 15).unwrap();

        let text = registry.format_date(date, "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(
            registry.string_text(text).unwrap(),
            "2016-05-01 10:30:15"
        );
    }

    #[test]
    fn long_renderings_are_not_truncated() {
        let mut registry = MemoryRegistry::default();
        let date = registry.new_date_time(2016, 5, 1, 10, 30, 15).unwrap();

        let pattern = "%Y-%m-%d %H:%M:%S / %Y-%m-%d %H:%M:%S / %Y-%m-%d";
        let text = registry.format_date(date, pattern).unwrap();
        let rendered = registry.string_text(text).unwrap();
        assert!(rendered.len() > 32);
        assert_eq!(
            rendered,
            "2016-05-01 10:30:15 / 2016-05-01 10:30:15 / 2016-05-01"
        );
    }

    #[test]
    fn reformat_reuses_the_previous_slot() {
        let mut registry = MemoryRegistry::default();
        let date = registry.new_date_time(2016, 5, 1, 10, 30, 15).unwrap();
        let first = registry.format_date(date, "%Y").unwrap();

        let second = registry
            .reformat_date(date, "%d/%m/%Y", Some(first))
            .unwrap();
        assert_eq!(second, first);
        assert_eq!(registry.string_text(second).unwrap(), "01/05/2016");
    }

    #[test]
    fn malformed_pattern_is_an_error() {
        let mut registry = MemoryRegistry::default();
        let date = registry.new_date_time(2016, 5, 1, 10, 30, 15).unwrap();

        let result = registry.format_date(date, "%Y %!");
        assert!(matches!(result, Err(DatumError::BadPattern { .. })));
    }

    #[test]
    fn non_date_record_is_rejected() {
        let mut registry = MemoryRegistry::default();
        let not_a_date = registry.new_string("just text").unwrap();

        assert_eq!(
            registry.date_fields(not_a_date),
            Err(DatumError::MalformedRecord)
        );
    }

    #[test]
    fn out_of_range_fields_fail_on_render() {
        let mut registry = MemoryRegistry::default();
        let date = registry.new_date_time(2023, 2, 30, 0, 0, 0).unwrap();

        assert_eq!(
            registry.format_date(date, "%Y-%m-%d"),
            Err(DatumError::UnrepresentableDate)
        );
    }

    #[test]
    fn month_zero_fails_on_render() {
        let mut registry = MemoryRegistry::default();
        let date = registry.new_date_time(2023, 0, 15, 0, 0, 0).unwrap();

        assert_eq!(
            registry.format_date(date, "%Y-%m-%d"),
            Err(DatumError::UnrepresentableDate)
        );
    }
}
