use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Subcommand, ValueEnum};
use dealer_client::AppointmentStatus;
use dealer_core::calendar::{self, Booking, CalendarView, Step};
use dealer_core::Route;

use super::{clip, confirm, App};

const DELETE_PROMPT: &str = "Delete this appointment?";

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum ViewArg {
    Day,
    #[default]
    Week,
    Month,
}

impl From<ViewArg> for CalendarView {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Day => CalendarView::Day,
            ViewArg::Week => CalendarView::Week,
            ViewArg::Month => CalendarView::Month,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AppointmentStatusArg {
    Scheduled,
    Completed,
    Cancelled,
}

impl From<AppointmentStatusArg> for AppointmentStatus {
    fn from(arg: AppointmentStatusArg) -> Self {
        match arg {
            AppointmentStatusArg::Scheduled => AppointmentStatus::Scheduled,
            AppointmentStatusArg::Completed => AppointmentStatus::Completed,
            AppointmentStatusArg::Cancelled => AppointmentStatus::Cancelled,
        }
    }
}

#[derive(Subcommand)]
pub enum CalendarCommand {
    /// Appointments in a day, week or month window
    Show {
        #[arg(long, value_enum, default_value_t = ViewArg::Week)]
        view: ViewArg,

        /// Any day inside the window (default today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Shift the window back one view-length
        #[arg(long, conflicts_with = "next")]
        prev: bool,

        /// Shift the window forward one view-length
        #[arg(long)]
        next: bool,
    },

    /// Book a one-hour slot
    Book {
        #[arg(long)]
        title: String,
        #[arg(long)]
        customer: i64,
        #[arg(long)]
        date: NaiveDate,
        /// Local start time, HH:MM
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
    },

    /// Change an appointment's status
    Status {
        id: i64,
        status: AppointmentStatusArg,
    },

    /// Remove an appointment
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("expected HH:MM ({e})"))
}

pub async fn run(app: &App, cmd: CalendarCommand) -> Result<()> {
    app.open(Route::Calendar).await?;

    match cmd {
        CalendarCommand::Show {
            view,
            date,
            prev,
            next,
        } => {
            let view = CalendarView::from(view);
            let mut cursor = date.unwrap_or_else(|| Local::now().date_naive());
            if prev {
                cursor = calendar::navigate(view, cursor, Step::Back);
            } else if next {
                cursor = calendar::navigate(view, cursor, Step::Next);
            }

            let appointments = app.client.list_appointments().await?;
            let (start, end) = calendar::window(view, cursor);
            let visible = calendar::visible_appointments(&appointments, view, cursor, &Local);

            println!("{view} of {start} to {end}");
            println!(
                "{:<5} {:<17} {:<28} {:<20} {:<10}",
                "ID", "WHEN", "TITLE", "CUSTOMER", "STATUS"
            );
            for appt in &visible {
                let when = appt.start_time.with_timezone(&Local).format("%a %m-%d %H:%M");
                let customer = appt
                    .customer_name
                    .clone()
                    .unwrap_or_else(|| format!("#{}", appt.customer));
                println!(
                    "{:<5} {:<17} {:<28} {:<20} {:<10}",
                    appt.id,
                    when.to_string(),
                    clip(&appt.title, 28),
                    clip(&customer, 20),
                    appt.status.as_str()
                );
            }
            if visible.is_empty() {
                println!("(no appointments)");
            }
        }

        CalendarCommand::Book {
            title,
            customer,
            date,
            time,
        } => {
            let booking = Booking {
                title,
                customer: Some(customer),
                date: Some(date),
                time: Some(time),
            };
            let appt = calendar::book(&app.client, &booking, &Local).await?;
            println!(
                "Booked #{} {} at {}",
                appt.id,
                appt.title,
                appt.start_time.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            );
        }

        CalendarCommand::Status { id, status } => {
            let status = AppointmentStatus::from(status);
            calendar::set_status(&app.client, id, status).await?;
            println!("Appointment #{id} is now {status}");
        }

        CalendarCommand::Delete { id, yes } => {
            if !confirm(DELETE_PROMPT, yes)? {
                return Ok(());
            }
            calendar::cancel_booking(&app.client, id).await?;
            println!("Deleted appointment #{id}");
        }
    }
    Ok(())
}
