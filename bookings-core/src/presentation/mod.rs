//! Display state of a single booking.

pub mod detail;
pub mod feedback;
pub mod state;
pub mod title;

pub use detail::{BookingDetail, DetailRequest};
pub use feedback::{Feedback, normalize_rating};
pub use state::{PresentationState, StatusFlags};
pub use title::{TitleContext, TitleKey, confirmation_title, page_title_key};
