use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Ordering;
use crate::domain::models::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    #[default]
    All,
    Upcoming,
    Past,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "date-asc")]
    DateAsc,
    #[serde(rename = "date-desc")]
    DateDesc,
    #[serde(rename = "title-asc")]
    TitleAsc,
    #[serde(rename = "price-asc")]
    PriceAsc,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    #[serde(default)]
    pub date: DateFilter,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
}

/// Filters (date window AND location substring) then sorts an in-memory
/// event list. Sorting is stable: ties keep their original relative order.
pub fn apply(events: Vec<Event>, filter: &EventFilter, now: DateTime<Utc>) -> Vec<Event> {
    let needle = filter
        .location
        .as_deref()
        .map(str::to_lowercase)
        .filter(|n| !n.is_empty());

    let mut out: Vec<Event> = events
        .into_iter()
        .filter(|e| match filter.date {
            DateFilter::All => true,
            DateFilter::Upcoming => !e.is_past(now),
            DateFilter::Past => e.is_past(now),
        })
        .filter(|e| {
            needle
                .as_deref()
                .is_none_or(|n| e.location_name.to_lowercase().contains(n))
        })
        .collect();

    match filter.sort {
        SortKey::DateAsc => out.sort_by(|a, b| a.starts_at().cmp(&b.starts_at())),
        SortKey::DateDesc => out.sort_by(|a, b| b.starts_at().cmp(&a.starts_at())),
        SortKey::TitleAsc => out.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        SortKey::PriceAsc => out.sort_by(|a, b| {
            a.price
                .unwrap_or(0.0)
                .partial_cmp(&b.price.unwrap_or(0.0))
                .unwrap_or(Ordering::Equal)
        }),
    }

    out
}
