//! Service schedule: day/week/month windows and booking.

use std::fmt;

use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use dealer_client::{Appointment, AppointmentStatus, DealerClient, NewAppointment};

use crate::error::{DeskError, Result};

/// Length of a booked slot, in minutes.
pub const SLOT_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalendarView {
    Day,
    #[default]
    Week,
    Month,
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CalendarView::Day => "day",
            CalendarView::Week => "week",
            CalendarView::Month => "month",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Back,
    Next,
}

/// First and last day (inclusive) shown for `date`. Weeks start on Sunday.
pub fn window(view: CalendarView, date: NaiveDate) -> (NaiveDate, NaiveDate) {
    match view {
        CalendarView::Day => (date, date),
        CalendarView::Week => {
            let offset = u64::from(date.weekday().num_days_from_sunday());
            let start = date - Days::new(offset);
            (start, start + Days::new(6))
        }
        CalendarView::Month => {
            let start = date.with_day(1).unwrap_or(date);
            let end = start
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(start);
            (start, end)
        }
    }
}

/// Move the cursor one view-length back or forward.
pub fn navigate(view: CalendarView, date: NaiveDate, step: Step) -> NaiveDate {
    let moved = match (view, step) {
        (CalendarView::Day, Step::Next) => date.checked_add_days(Days::new(1)),
        (CalendarView::Day, Step::Back) => date.checked_sub_days(Days::new(1)),
        (CalendarView::Week, Step::Next) => date.checked_add_days(Days::new(7)),
        (CalendarView::Week, Step::Back) => date.checked_sub_days(Days::new(7)),
        (CalendarView::Month, Step::Next) => date.checked_add_months(Months::new(1)),
        (CalendarView::Month, Step::Back) => date.checked_sub_months(Months::new(1)),
    };
    moved.unwrap_or(date)
}

/// Appointments starting inside the window, earliest first.
pub fn visible_appointments<'a, Tz: TimeZone>(
    appointments: &'a [Appointment],
    view: CalendarView,
    date: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Appointment> {
    let (start, end) = window(view, date);
    let mut visible: Vec<_> = appointments
        .iter()
        .filter(|a| {
            let day = a.start_time.with_timezone(tz).date_naive();
            day >= start && day <= end
        })
        .collect();
    visible.sort_by_key(|a| a.start_time);
    visible
}

/// Booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Booking {
    pub title: String,
    pub customer: Option<i64>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl Booking {
    /// Resolve the form against a local zone into a one-hour SCHEDULED slot.
    pub fn to_new_appointment<Tz: TimeZone>(&self, tz: &Tz) -> Result<NewAppointment> {
        let (Some(customer), Some(date), Some(time)) = (self.customer, self.date, self.time) else {
            return Err(DeskError::missing(&["title", "customer", "date", "time"]));
        };
        if self.title.trim().is_empty() {
            return Err(DeskError::missing(&["title", "customer", "date", "time"]));
        }

        let local = date.and_time(time);
        let start = tz
            .from_local_datetime(&local)
            .earliest()
            .ok_or_else(|| DeskError::Invalid(format!("{local} does not exist in this time zone")))?
            .with_timezone(&Utc);

        Ok(NewAppointment {
            title: self.title.trim().to_string(),
            customer,
            start_time: start,
            end_time: start + Duration::minutes(SLOT_MINUTES),
            status: AppointmentStatus::Scheduled,
        })
    }
}

pub async fn book<Tz: TimeZone>(client: &DealerClient, booking: &Booking, tz: &Tz) -> Result<Appointment> {
    let request = booking.to_new_appointment(tz)?;
    let appointment = client.create_appointment(&request).await?;
    tracing::info!(
        appointment_id = appointment.id,
        start = %appointment.start_time,
        "Appointment booked"
    );
    Ok(appointment)
}

pub async fn set_status(client: &DealerClient, id: i64, status: AppointmentStatus) -> Result<()> {
    client.set_appointment_status(id, status).await?;
    tracing::info!(appointment_id = id, status = %status, "Appointment status changed");
    Ok(())
}

pub async fn cancel_booking(client: &DealerClient, id: i64) -> Result<()> {
    client.delete_appointment(id).await?;
    tracing::info!(appointment_id = id, "Appointment deleted");
    Ok(())
}
