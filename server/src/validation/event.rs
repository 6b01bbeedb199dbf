use chrono::{DateTime, Utc};

use super::{at_most, required, Rejection, EVENT_INFO_MAX, EVENT_LOCATION_MAX, EVENT_NAME_MAX};
use crate::models::{Event, EventInput, ValidEvent};

pub fn check_event(input: &EventInput, now: DateTime<Utc>) -> Result<ValidEvent, Rejection> {
    let name = required(input.name.as_deref(), "name")?;
    at_most(name, "name", EVENT_NAME_MAX)?;

    let location = required(input.location.as_deref(), "location")?;
    at_most(location, "location", EVENT_LOCATION_MAX)?;

    let additional_info = input.additional_info.clone().unwrap_or_default();
    at_most(&additional_info, "additional_info", EVENT_INFO_MAX)?;

    if input.event_date <= now {
        return Err(Rejection::EventDateNotInFuture);
    }

    Ok(ValidEvent {
        name: name.to_owned(),
        location: location.to_owned(),
        event_date: input.event_date,
        additional_info,
    })
}

/// Past events are frozen; upcoming ones accept the same rules as creation.
pub fn check_event_update(
    existing: &Event,
    input: &EventInput,
    now: DateTime<Utc>,
) -> Result<ValidEvent, Rejection> {
    if existing.is_past(now) {
        return Err(Rejection::EventIsPast);
    }
    check_event(input, now)
}

pub fn check_event_removal(existing: &Event, now: DateTime<Utc>) -> Result<(), Rejection> {
    if existing.is_past(now) {
        return Err(Rejection::EventIsPast);
    }
    Ok(())
}
