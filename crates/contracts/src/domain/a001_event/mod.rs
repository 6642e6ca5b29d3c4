pub mod aggregate;
pub mod goal;

pub use aggregate::{Event, EventDto, EventId, EventPriority, EventStatus, EventType};
pub use goal::Goal;
