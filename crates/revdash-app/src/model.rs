// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::ClientId;

/// One client's revenue and comment data for the current period, plus
/// sparse forecast overrides for forward months keyed by month label
/// ("January 2027"). An absent entry means the derived default applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,
    pub name: String,
    pub forecast: f64,
    pub actual: f64,
    pub comment: String,
    pub future_forecast: BTreeMap<String, f64>,
}

impl ClientRecord {
    pub fn difference(&self) -> f64 {
        self.actual - self.forecast
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabKind {
    ThisMonth,
    NextThreeMonths,
}

impl TabKind {
    pub const ALL: [Self; 2] = [Self::ThisMonth, Self::NextThreeMonths];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ThisMonth => "this month",
            Self::NextThreeMonths => "next 3 months",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "this_month" => Some(Self::ThisMonth),
            "next_three_months" => Some(Self::NextThreeMonths),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThisMonth => "this_month",
            Self::NextThreeMonths => "next_three_months",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Name,
    Forecast,
    Actual,
    Difference,
}

impl SortKey {
    pub const ALL: [Self; 4] = [Self::Name, Self::Forecast, Self::Actual, Self::Difference];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "client",
            Self::Forecast => "forecast",
            Self::Actual => "actual",
            Self::Difference => "difference",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}
