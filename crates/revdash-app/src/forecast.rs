// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::{Date, Month};

use crate::ids::ClientId;
use crate::model::ClientRecord;

pub const FORWARD_MONTHS: usize = 3;

/// Projection growth per forward month when no override exists:
/// month 1 keeps the current forecast +5%, month 2 +10%, month 3 +15%.
const GROWTH_STEP: f64 = 0.05;

/// Default projection for a forward-month cell without an override.
/// `offset` is 0-based among the three forward months.
pub fn derived_default(forecast: f64, offset: usize) -> f64 {
    forecast * (1.0 + GROWTH_STEP * (offset as f64 + 1.0))
}

/// The value a forecast cell displays: the stored override when
/// present, otherwise the derived default for that month's offset.
pub fn displayed_value(record: &ClientRecord, month: &str, offset: usize) -> f64 {
    record
        .future_forecast
        .get(month)
        .copied()
        .unwrap_or_else(|| derived_default(record.forecast, offset))
}

/// Labels for the three months after `today`, "January 2027" style.
/// Recomputed from the host clock at render time; overrides keyed by a
/// label from a previous session stop matching once the month rolls
/// over.
pub fn forward_month_labels(today: Date) -> [String; FORWARD_MONTHS] {
    std::array::from_fn(|offset| {
        shift_date_by_months(today, offset as i32 + 1)
            .map(format_month_label)
            .unwrap_or_default()
    })
}

/// The twelve months of `today`'s year, for the cosmetic historical
/// month selector on the this-month tab.
pub fn selector_month_labels(today: Date) -> Vec<String> {
    (1..=12)
        .filter_map(|number| Month::try_from(number).ok())
        .map(|month| format!("{month} {}", today.year()))
        .collect()
}

pub fn format_month_label(date: Date) -> String {
    format!("{} {}", date.month(), date.year())
}

pub fn shift_date_by_months(date: Date, months: i32) -> Option<Date> {
    let base_month = i32::from(date.month() as u8);
    let total_month = base_month - 1 + months;
    let year = date.year() + total_month.div_euclid(12);
    let month_number = (total_month.rem_euclid(12) + 1) as u8;
    let month = Month::try_from(month_number).ok()?;
    let max_day = last_day_of_month(year, month)?;
    let clamped_day = date.day().min(max_day);
    Date::from_calendar_date(year, month, clamped_day).ok()
}

fn last_day_of_month(year: i32, month: Month) -> Option<u8> {
    let (next_year, next_month) = if month == Month::December {
        (year + 1, Month::January)
    } else {
        let next = Month::try_from((month as u8) + 1).ok()?;
        (year, next)
    };

    let first_next_month = Date::from_calendar_date(next_year, next_month, 1).ok()?;
    let last = first_next_month - time::Duration::days(1);
    Some(last.day())
}

/// Edit buffer parse: thousands separators are stripped, anything that
/// is not a finite number is rejected.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Plain numeric rendering used to seed the edit buffer from the
/// displayed value (no separators, no trailing ".0" for whole values).
pub fn edit_buffer_for(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellEditState {
    #[default]
    Viewing,
    Editing {
        client: ClientId,
        month: String,
        buffer: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Committed {
        client: ClientId,
        month: String,
        value: f64,
    },
    RejectedInput,
    NotEditing,
}

/// Single-cell editor for the forecast grid: at most one cell is
/// editable at a time, tracked as an explicit (client, month) selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForecastEditor {
    state: CellEditState,
}

impl ForecastEditor {
    pub fn state(&self) -> &CellEditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, CellEditState::Editing { .. })
    }

    pub fn editing_cell(&self) -> Option<(ClientId, &str)> {
        match &self.state {
            CellEditState::Editing { client, month, .. } => Some((*client, month.as_str())),
            CellEditState::Viewing => None,
        }
    }

    pub fn buffer(&self) -> Option<&str> {
        match &self.state {
            CellEditState::Editing { buffer, .. } => Some(buffer.as_str()),
            CellEditState::Viewing => None,
        }
    }

    /// Starts editing a cell, seeding the buffer with the currently
    /// displayed value. Re-targeting while already editing moves the
    /// edit to the new cell and discards the old buffer.
    pub fn begin(&mut self, client: ClientId, month: impl Into<String>, displayed: f64) {
        self.state = CellEditState::Editing {
            client,
            month: month.into(),
            buffer: edit_buffer_for(displayed),
        };
    }

    pub fn insert_char(&mut self, ch: char) {
        if let CellEditState::Editing { buffer, .. } = &mut self.state {
            buffer.push(ch);
        }
    }

    pub fn delete_back(&mut self) {
        if let CellEditState::Editing { buffer, .. } = &mut self.state {
            buffer.pop();
        }
    }

    /// Parses and commits the buffer. On success the editor returns to
    /// viewing and the caller applies the value to the store; on parse
    /// failure nothing changes and the cell stays editable.
    pub fn commit(&mut self) -> CommitOutcome {
        let CellEditState::Editing { client, month, buffer } = &self.state else {
            return CommitOutcome::NotEditing;
        };

        let Some(value) = parse_amount(buffer) else {
            return CommitOutcome::RejectedInput;
        };

        let outcome = CommitOutcome::Committed {
            client: *client,
            month: month.clone(),
            value,
        };
        self.state = CellEditState::Viewing;
        outcome
    }

    /// Discards the buffer without touching the store.
    pub fn cancel(&mut self) {
        self.state = CellEditState::Viewing;
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CellEditState, CommitOutcome, ForecastEditor, derived_default, displayed_value,
        edit_buffer_for, forward_month_labels, parse_amount, selector_month_labels,
        shift_date_by_months,
    };
    use crate::ids::ClientId;
    use crate::model::ClientRecord;
    use std::collections::BTreeMap;
    use time::{Date, Month};

    fn record(forecast: f64) -> ClientRecord {
        ClientRecord {
            id: ClientId::new(1),
            name: "Client A".to_owned(),
            forecast,
            actual: 48_000.0,
            comment: String::new(),
            future_forecast: BTreeMap::new(),
        }
    }

    #[test]
    fn derived_defaults_step_five_percent_per_month() {
        assert_eq!(derived_default(50_000.0, 0), 52_500.0);
        assert_eq!(derived_default(50_000.0, 1), 55_000.0);
        assert_eq!(derived_default(50_000.0, 2), 57_500.0);
    }

    #[test]
    fn override_takes_precedence_over_derived_default() {
        let mut record = record(50_000.0);
        assert_eq!(displayed_value(&record, "March 2027", 0), 52_500.0);

        record
            .future_forecast
            .insert("March 2027".to_owned(), 61_000.0);
        assert_eq!(displayed_value(&record, "March 2027", 0), 61_000.0);
    }

    #[test]
    fn forward_labels_cross_year_boundary() {
        let today = Date::from_calendar_date(2026, Month::November, 15).expect("valid date");
        let labels = forward_month_labels(today);
        assert_eq!(
            labels,
            [
                "December 2026".to_owned(),
                "January 2027".to_owned(),
                "February 2027".to_owned(),
            ],
        );
    }

    #[test]
    fn month_shift_clamps_day_to_month_end() {
        let today = Date::from_calendar_date(2026, Month::January, 31).expect("valid date");
        let shifted = shift_date_by_months(today, 1).expect("shift succeeds");
        assert_eq!(shifted, Date::from_calendar_date(2026, Month::February, 28).unwrap());
    }

    #[test]
    fn selector_lists_twelve_months_of_current_year() {
        let today = Date::from_calendar_date(2026, Month::August, 25).expect("valid date");
        let months = selector_month_labels(today);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], "January 2026");
        assert_eq!(months[11], "December 2026");
    }

    #[test]
    fn parse_amount_strips_thousands_separators() {
        assert_eq!(parse_amount("52,500"), Some(52_500.0));
        assert_eq!(parse_amount("1,234,567.5"), Some(1_234_567.5));
        assert_eq!(parse_amount(" 42 "), Some(42.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn edit_buffer_renders_whole_values_without_fraction() {
        assert_eq!(edit_buffer_for(52_500.0), "52500");
        assert_eq!(edit_buffer_for(52_500.5), "52500.5");
    }

    #[test]
    fn commit_with_separator_input_exits_editing() {
        let mut editor = ForecastEditor::default();
        editor.begin(ClientId::new(1), "January 2027", 52_500.0);
        assert_eq!(editor.buffer(), Some("52500"));

        for _ in 0..5 {
            editor.delete_back();
        }
        for ch in "52,500".chars() {
            editor.insert_char(ch);
        }

        let outcome = editor.commit();
        assert_eq!(
            outcome,
            CommitOutcome::Committed {
                client: ClientId::new(1),
                month: "January 2027".to_owned(),
                value: 52_500.0,
            },
        );
        assert_eq!(editor.state(), &CellEditState::Viewing);
    }

    #[test]
    fn rejected_input_stays_editable() {
        let mut editor = ForecastEditor::default();
        editor.begin(ClientId::new(2), "January 2027", 55_000.0);
        for _ in 0..5 {
            editor.delete_back();
        }
        for ch in "abc".chars() {
            editor.insert_char(ch);
        }

        assert_eq!(editor.commit(), CommitOutcome::RejectedInput);
        assert!(editor.is_editing());
        assert_eq!(editor.buffer(), Some("abc"));
    }

    #[test]
    fn cancel_discards_buffer_without_commit() {
        let mut editor = ForecastEditor::default();
        editor.begin(ClientId::new(3), "February 2027", 57_500.0);
        editor.insert_char('9');
        editor.cancel();

        assert_eq!(editor.state(), &CellEditState::Viewing);
        assert_eq!(editor.commit(), CommitOutcome::NotEditing);
    }

    #[test]
    fn begin_retargets_existing_edit() {
        let mut editor = ForecastEditor::default();
        editor.begin(ClientId::new(1), "January 2027", 52_500.0);
        editor.begin(ClientId::new(2), "February 2027", 60_000.0);

        assert_eq!(
            editor.editing_cell(),
            Some((ClientId::new(2), "February 2027")),
        );
        assert_eq!(editor.buffer(), Some("60000"));
    }
}
