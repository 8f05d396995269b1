use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::models::event::Event;
use crate::error::AppError;

/// Hard ceiling on tickets per checkout.
pub const MAX_TICKETS_PER_ORDER: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    TierUnavailable,
    SoldOut,
    CapacityExceeded { remaining: i64 },
    EventPast,
    InvalidCount,
}

impl Rejection {
    pub fn message(&self) -> String {
        match self {
            Rejection::TierUnavailable => "Selected ticket tier is no longer available".to_string(),
            Rejection::SoldOut => "This event is sold out".to_string(),
            Rejection::CapacityExceeded { remaining } => {
                format!("Only {} tickets remaining", remaining)
            }
            Rejection::EventPast => "This event has already taken place".to_string(),
            Rejection::InvalidCount => "Ticket count must be at least 1".to_string(),
        }
    }
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::SoldOut | Rejection::CapacityExceeded { .. } => {
                AppError::Conflict(rejection.message())
            }
            _ => AppError::Validation(rejection.message()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub unit_price: f64,
    pub total_amount: f64,
    pub is_free: bool,
    /// None for events with unlimited capacity.
    pub remaining_after: Option<i64>,
}

/// Prices one checkout against an event and validates it against capacity
/// and tier expiry. `active_bookings` is the count of non-cancelled rows
/// already held against the event.
///
/// An explicitly selected tier must exist and be unexpired; the base-price
/// fallback applies only when no tier is selected.
pub fn quote(
    event: &Event,
    tier_id: Option<&str>,
    count: u32,
    active_bookings: i64,
    now: DateTime<Utc>,
) -> Result<Quote, Rejection> {
    if count < 1 {
        return Err(Rejection::InvalidCount);
    }

    let unit_price = match tier_id {
        Some(id) => {
            let tier = event.tier(id).ok_or(Rejection::TierUnavailable)?;
            if tier.is_expired(now) {
                return Err(Rejection::TierUnavailable);
            }
            tier.parsed_price()
        }
        None => event.price.unwrap_or(0.0),
    };

    let remaining = event
        .ticket_capacity
        .map(|cap| cap as i64 - active_bookings);

    if let Some(r) = remaining {
        if r <= 0 {
            return Err(Rejection::SoldOut);
        }
        if count as i64 > r {
            return Err(Rejection::CapacityExceeded { remaining: r });
        }
    }

    if event.is_past(now) {
        return Err(Rejection::EventPast);
    }

    Ok(Quote {
        unit_price,
        total_amount: unit_price * count as f64,
        is_free: unit_price == 0.0,
        remaining_after: remaining.map(|r| r - count as i64),
    })
}

/// Upper bound for the ticket-count selector: min(10, remaining), floored
/// at 1 so the control never collapses.
pub fn max_selectable(event: &Event, active_bookings: i64) -> u32 {
    let ceiling = match event.ticket_capacity {
        Some(cap) => (cap as i64 - active_bookings)
            .clamp(0, MAX_TICKETS_PER_ORDER as i64),
        None => MAX_TICKETS_PER_ORDER as i64,
    };
    ceiling.max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::PriceTier;
    use chrono::{Duration, NaiveTime};

    fn event(price: Option<f64>, capacity: Option<i32>) -> Event {
        let now = Utc::now();
        Event {
            id: "ev1".to_string(),
            title: "Winter Recital".to_string(),
            description: "Chamber music".to_string(),
            date: (now + Duration::days(30)).date_naive(),
            time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            location_name: "Severance Hall".to_string(),
            location_lat: None,
            location_lng: None,
            price,
            price_tiers: Vec::new(),
            ticket_capacity: capacity,
            payment_instructions: None,
            user_id: "org1".to_string(),
            created_at: now,
        }
    }

    #[test]
    fn base_price_times_count() {
        let ev = event(Some(25.0), None);
        let q = quote(&ev, None, 3, 0, Utc::now()).unwrap();
        assert_eq!(q.unit_price, 25.0);
        assert_eq!(q.total_amount, 75.0);
        assert!(!q.is_free);
        assert_eq!(q.remaining_after, None);
    }

    #[test]
    fn null_and_zero_price_are_free() {
        let q = quote(&event(None, None), None, 2, 0, Utc::now()).unwrap();
        assert!(q.is_free);
        assert_eq!(q.total_amount, 0.0);

        let q = quote(&event(Some(0.0), None), None, 1, 0, Utc::now()).unwrap();
        assert!(q.is_free);
    }

    #[test]
    fn tier_price_overrides_base_price() {
        let mut ev = event(Some(50.0), None);
        ev.price_tiers = vec![
            PriceTier { id: "student".to_string(), name: "Student".to_string(), price: "0".to_string(), end_date: None },
            PriceTier { id: "premium".to_string(), name: "Premium".to_string(), price: "80".to_string(), end_date: None },
        ];

        let q = quote(&ev, Some("student"), 1, 0, Utc::now()).unwrap();
        assert_eq!(q.unit_price, 0.0);
        assert!(q.is_free, "a free tier overrides a nonzero base price");

        let q = quote(&ev, Some("premium"), 2, 0, Utc::now()).unwrap();
        assert_eq!(q.total_amount, 160.0);
    }

    #[test]
    fn unparseable_tier_price_is_free() {
        let mut ev = event(Some(30.0), None);
        ev.price_tiers = vec![PriceTier {
            id: "pwyc".to_string(),
            name: "Pay what you can".to_string(),
            price: "donation".to_string(),
            end_date: None,
        }];
        let q = quote(&ev, Some("pwyc"), 1, 0, Utc::now()).unwrap();
        assert!(q.is_free);
    }

    #[test]
    fn expired_tier_is_rejected() {
        let now = Utc::now();
        let mut ev = event(None, None);
        ev.price_tiers = vec![
            PriceTier { id: "early".to_string(), name: "Early bird".to_string(), price: "10".to_string(), end_date: Some(now - Duration::days(1)) },
            PriceTier { id: "reg".to_string(), name: "Regular".to_string(), price: "20".to_string(), end_date: None },
        ];

        assert_eq!(quote(&ev, Some("early"), 1, 0, now), Err(Rejection::TierUnavailable));
        assert_eq!(quote(&ev, Some("missing"), 1, 0, now), Err(Rejection::TierUnavailable));

        let q = quote(&ev, Some("reg"), 1, 0, now).unwrap();
        assert_eq!(q.unit_price, 20.0);
    }

    #[test]
    fn capacity_ceiling_is_exact() {
        let ev = event(Some(10.0), Some(10));
        let now = Utc::now();

        // Exactly the remainder drives remaining capacity to zero.
        let q = quote(&ev, None, 3, 7, now).unwrap();
        assert_eq!(q.remaining_after, Some(0));

        assert_eq!(
            quote(&ev, None, 4, 7, now),
            Err(Rejection::CapacityExceeded { remaining: 3 })
        );
    }

    #[test]
    fn sold_out_short_circuits_any_count() {
        let ev = event(Some(0.0), Some(5));
        let now = Utc::now();
        assert_eq!(quote(&ev, None, 1, 5, now), Err(Rejection::SoldOut));
        assert_eq!(quote(&ev, None, 3, 6, now), Err(Rejection::SoldOut));
    }

    #[test]
    fn zero_capacity_is_immediately_sold_out() {
        let ev = event(None, Some(0));
        assert_eq!(quote(&ev, None, 1, 0, Utc::now()), Err(Rejection::SoldOut));
    }

    #[test]
    fn past_event_is_rejected() {
        let now = Utc::now();
        let mut ev = event(Some(15.0), None);
        ev.date = (now - Duration::days(1)).date_naive();
        assert_eq!(quote(&ev, None, 1, 0, now), Err(Rejection::EventPast));
    }

    #[test]
    fn zero_count_is_rejected() {
        let ev = event(None, None);
        assert_eq!(quote(&ev, None, 0, 0, Utc::now()), Err(Rejection::InvalidCount));
    }

    #[test]
    fn selector_ceiling_clamps_to_remaining() {
        assert_eq!(max_selectable(&event(None, None), 0), 10);
        assert_eq!(max_selectable(&event(None, Some(3)), 1), 2);
        assert_eq!(max_selectable(&event(None, Some(50)), 0), 10);
        assert_eq!(max_selectable(&event(None, Some(4)), 4), 1);
    }
}
