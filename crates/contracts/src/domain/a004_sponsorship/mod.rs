pub mod aggregate;

pub use aggregate::{Sponsorship, SponsorshipDto, SponsorshipId, SponsorshipStatus};
