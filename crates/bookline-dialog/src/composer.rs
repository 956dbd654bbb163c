// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure outbound-message builders for each dialogue step.
//!
//! No network or I/O here: every function maps collected fields (and, for
//! the date prompt, a supplied "today") to an [`OutboundMessage`]. Field
//! values are substituted verbatim; date and time syntax is never
//! validated or reformatted.

use bookline_core::{BookingFields, ButtonOption, OutboundMessage};
use chrono::{Days, NaiveDate};

/// Number of date options offered by the ask-date prompt.
pub const DATE_OPTION_COUNT: u64 = 3;

/// Prompt asking for the user's full name.
pub fn ask_name() -> OutboundMessage {
    OutboundMessage::TextPrompt {
        body: "Please provide your full name for the appointment booking.".to_string(),
    }
}

/// Button prompt offering the next three calendar dates starting today.
///
/// Each option's id and title are the same `YYYY-MM-DD` string, ordered
/// ascending. `today` is passed in so the enumeration stays pure.
pub fn ask_date(today: NaiveDate) -> OutboundMessage {
    let buttons = (0..DATE_OPTION_COUNT)
        .map(|offset| {
            let date = today
                .checked_add_days(Days::new(offset))
                .unwrap_or(today)
                .format("%Y-%m-%d")
                .to_string();
            ButtonOption {
                id: date.clone(),
                title: date,
            }
        })
        .collect();

    OutboundMessage::ButtonPrompt {
        header: "Select a Date".to_string(),
        body: "Please select a date below to book your appointment:".to_string(),
        footer: "Powered by Bookline".to_string(),
        buttons,
    }
}

/// Prompt asking for the preferred appointment time.
pub fn ask_time() -> OutboundMessage {
    OutboundMessage::TextPrompt {
        body: "Please provide your preferred time for the appointment (e.g., 10:00 AM)."
            .to_string(),
    }
}

/// The confirmation sentence with the collected fields substituted verbatim.
pub fn confirmation_text(fields: &BookingFields) -> String {
    format!(
        "Thank you, {}! Your appointment is scheduled for {} at {}.",
        fields.name.as_deref().unwrap_or(""),
        fields.date.as_deref().unwrap_or(""),
        fields.time.as_deref().unwrap_or(""),
    )
}

/// Plain-text confirmation message.
pub fn confirmation(fields: &BookingFields) -> OutboundMessage {
    OutboundMessage::TextPrompt {
        body: confirmation_text(fields),
    }
}

/// Acknowledgement sent immediately when the booking trigger is tapped.
pub fn booking_acknowledgement() -> OutboundMessage {
    OutboundMessage::TextPrompt {
        body: "You have selected to book an appointment. Processing your request...".to_string(),
    }
}

/// Menu offering the booking trigger button, sent when a text message
/// arrives outside any active dialogue.
pub fn booking_menu(trigger_id: &str) -> OutboundMessage {
    OutboundMessage::ButtonPrompt {
        header: "Appointments".to_string(),
        body: "Hi! Tap the button below to book an appointment.".to_string(),
        footer: "Powered by Bookline".to_string(),
        buttons: vec![ButtonOption {
            id: trigger_id.to_string(),
            title: "Book an appointment".to_string(),
        }],
    }
}
