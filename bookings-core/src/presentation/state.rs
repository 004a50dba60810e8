//! Mapping from booking status and context flags to a single display state.

use std::fmt;

use serde::Serialize;

/// Context flags of a booking as seen by the current viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFlags {
    /// Pending and the event type requires confirmation
    pub needs_confirmation: bool,
    /// Cancelled or rejected, or the viewer's seat is gone
    pub cancelled: bool,
    /// The link was issued for a single seat
    pub seat_scoped: bool,
    /// The booking was rerouted to another host or event
    pub rerouted: bool,
    /// A replacement booking exists
    pub rescheduled: bool,
    /// Ended before now
    pub past: bool,
}

impl StatusFlags {
    /// Eligible to be moved without cancelling first.
    pub fn reschedulable(&self) -> bool {
        !self.cancelled
    }
}

/// What the booking detail headline and actions are driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationState {
    NeedsConfirmation,
    Rerouted,
    NotAttendingSeat,
    Rescheduled,
    Cancelled,
    Past,
    Scheduled,
}

type Rule = (PresentationState, fn(&StatusFlags) -> bool);

/// Precedence order: the first matching rule wins, `Scheduled` when none does.
static RULES: [Rule; 6] = [
    (PresentationState::NeedsConfirmation, needs_confirmation),
    (PresentationState::Rerouted, rerouted),
    (PresentationState::NotAttendingSeat, left_seat),
    (PresentationState::Rescheduled, rescheduled),
    (PresentationState::Cancelled, cancelled_outright),
    (PresentationState::Past, past),
];

fn needs_confirmation(f: &StatusFlags) -> bool {
    f.needs_confirmation && f.reschedulable()
}

fn rerouted(f: &StatusFlags) -> bool {
    f.rerouted
}

fn left_seat(f: &StatusFlags) -> bool {
    f.cancelled && f.seat_scoped
}

fn rescheduled(f: &StatusFlags) -> bool {
    f.rescheduled
}

fn cancelled_outright(f: &StatusFlags) -> bool {
    f.cancelled && !f.seat_scoped
}

fn past(f: &StatusFlags) -> bool {
    f.past
}

impl PresentationState {
    pub const ALL: [PresentationState; 7] = [
        PresentationState::NeedsConfirmation,
        PresentationState::Rerouted,
        PresentationState::NotAttendingSeat,
        PresentationState::Rescheduled,
        PresentationState::Cancelled,
        PresentationState::Past,
        PresentationState::Scheduled,
    ];

    pub fn derive(flags: &StatusFlags) -> Self {
        RULES
            .iter()
            .find(|(_, applies)| applies(flags))
            .map(|(state, _)| *state)
            .unwrap_or(PresentationState::Scheduled)
    }

    /// Translation key of the detail page headline.
    pub fn headline_key(self, recurring: bool) -> &'static str {
        match (self, recurring) {
            (PresentationState::NeedsConfirmation, false) => "booking_submitted",
            (PresentationState::NeedsConfirmation, true) => "booking_submitted_recurring",
            (PresentationState::Rerouted, _) => "This meeting has been rerouted",
            (PresentationState::NotAttendingSeat, _) => "no_longer_attending",
            (PresentationState::Rescheduled, _) => "your_event_has_been_rescheduled",
            (PresentationState::Cancelled, _) => "event_cancelled",
            (PresentationState::Past, _) => "event_is_in_the_past",
            (PresentationState::Scheduled, false) => "meeting_is_scheduled",
            (PresentationState::Scheduled, true) => "meeting_is_scheduled_recurring",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PresentationState::NeedsConfirmation => "needs_confirmation",
            PresentationState::Rerouted => "rerouted",
            PresentationState::NotAttendingSeat => "not_attending_seat",
            PresentationState::Rescheduled => "rescheduled",
            PresentationState::Cancelled => "cancelled",
            PresentationState::Past => "past",
            PresentationState::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for PresentationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_scheduled() {
        assert_eq!(PresentationState::derive(&StatusFlags::default()), PresentationState::Scheduled);
    }

    #[test]
    fn confirmation_beats_past() {
        let flags = StatusFlags {
            needs_confirmation: true,
            past: true,
            ..StatusFlags::default()
        };
        assert!(flags.reschedulable());
        assert_eq!(PresentationState::derive(&flags), PresentationState::NeedsConfirmation);
    }

    #[test]
    fn cancelled_booking_never_needs_confirmation() {
        let flags = StatusFlags {
            needs_confirmation: true,
            cancelled: true,
            ..StatusFlags::default()
        };
        assert_eq!(PresentationState::derive(&flags), PresentationState::Cancelled);
    }

    #[test]
    fn seat_scoped_cancellation_is_not_attending() {
        let flags = StatusFlags {
            cancelled: true,
            seat_scoped: true,
            past: true,
            ..StatusFlags::default()
        };
        assert_eq!(PresentationState::derive(&flags), PresentationState::NotAttendingSeat);
    }

    #[test]
    fn reroute_beats_cancellation() {
        let flags = StatusFlags {
            rerouted: true,
            cancelled: true,
            ..StatusFlags::default()
        };
        assert_eq!(PresentationState::derive(&flags), PresentationState::Rerouted);
    }

    #[test]
    fn rescheduled_beats_cancelled_and_past() {
        let flags = StatusFlags {
            rescheduled: true,
            cancelled: true,
            past: true,
            ..StatusFlags::default()
        };
        assert_eq!(PresentationState::derive(&flags), PresentationState::Rescheduled);
    }

    #[test]
    fn past_when_nothing_else_applies() {
        let flags = StatusFlags {
            past: true,
            ..StatusFlags::default()
        };
        assert_eq!(PresentationState::derive(&flags), PresentationState::Past);
    }

    #[test]
    fn every_state_but_scheduled_has_exactly_one_rule() {
        for state in PresentationState::ALL {
            let rules = RULES.iter().filter(|(s, _)| *s == state).count();
            let expected = usize::from(state != PresentationState::Scheduled);
            assert_eq!(rules, expected, "{state}");
        }
    }

    #[test]
    fn recurring_headlines() {
        assert_eq!(
            PresentationState::Scheduled.headline_key(true),
            "meeting_is_scheduled_recurring"
        );
        assert_eq!(PresentationState::NeedsConfirmation.headline_key(false), "booking_submitted");
        assert_eq!(PresentationState::Cancelled.headline_key(true), "event_cancelled");
    }
}
