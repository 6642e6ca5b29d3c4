pub mod aggregate;

pub use aggregate::{Attendee, AttendeeDto, AttendeeId};
