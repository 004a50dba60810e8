//! Derivation layer for booking views.
//!
//! Takes booking query results as delivered by the backend and derives what
//! the views show:
//! - `listing`: recurring grouping and the "today" section of the bookings list
//! - `presentation`: the display state of a single booking
//! - `export`: "add to calendar" payloads
//!
//! Everything here is a pure function of its inputs. "Now" and the viewer's
//! time zone are always passed in.

pub mod booking;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod listing;
pub mod pagination;
pub mod presentation;
pub mod recurrence;
pub mod viewer;

pub use booking::{Attendee, Booking, BookingStatus, Cursor, EventType, Page, RecurringInfo};
pub use error::{BookingsError, BookingsResult, EncodingError};
