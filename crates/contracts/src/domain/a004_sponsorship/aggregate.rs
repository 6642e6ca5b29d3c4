use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SponsorshipId(pub Uuid);

impl SponsorshipId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for SponsorshipId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SponsorshipId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SponsorshipStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl SponsorshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SponsorshipStatus::Pending => "pending",
            SponsorshipStatus::Confirmed => "confirmed",
            SponsorshipStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for SponsorshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(SponsorshipStatus::Pending),
            "confirmed" => Ok(SponsorshipStatus::Confirmed),
            "cancelled" | "canceled" => Ok(SponsorshipStatus::Cancelled),
            other => Err(format!("unknown sponsorship status '{}'", other)),
        }
    }
}

/// Sponsorship package bought for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sponsorship {
    #[serde(flatten)]
    pub base: BaseAggregate<SponsorshipId>,

    #[serde(rename = "eventId")]
    pub event_id: Uuid,
    /// Package tier, e.g. "Gold"
    pub level: String,
    /// Amount in minor units (cents)
    pub amount: i64,
    pub currency: String,
    pub status: SponsorshipStatus,
    #[serde(rename = "contactName")]
    pub contact_name: Option<String>,
    #[serde(rename = "contactEmail")]
    pub contact_email: Option<String>,
    pub notes: Option<String>,
}

impl Sponsorship {
    pub fn new_for_insert(dto: &SponsorshipDto) -> Self {
        let mut item = Self {
            base: BaseAggregate::new(SponsorshipId::new_v4()),
            event_id: dto.event_id,
            level: String::new(),
            amount: 0,
            currency: String::new(),
            status: SponsorshipStatus::default(),
            contact_name: None,
            contact_email: None,
            notes: None,
        };
        item.update(dto);
        item
    }

    pub fn update(&mut self, dto: &SponsorshipDto) {
        self.event_id = dto.event_id;
        self.level = dto.level.clone();
        self.amount = dto.amount;
        self.currency = dto
            .currency
            .clone()
            .unwrap_or_else(|| "USD".to_string())
            .to_uppercase();
        self.status = dto.status;
        self.contact_name = dto.contact_name.clone();
        self.contact_email = dto.contact_email.clone();
        self.notes = dto.notes.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Sponsorship level must not be empty".into());
        }
        if self.amount < 0 {
            return Err("Amount must not be negative".into());
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("Invalid currency code '{}'", self.currency));
        }
        if let Some(email) = &self.contact_email {
            if !email.contains('@') {
                return Err(format!("Invalid email '{}'", email));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for Sponsorship {
    type Id = SponsorshipId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "sponsorship"
    }

    fn element_name() -> &'static str {
        "Sponsorship"
    }

    fn list_name() -> &'static str {
        "Sponsorships"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorshipDto {
    pub id: Option<String>,
    #[serde(rename = "eventId")]
    pub event_id: Uuid,
    pub level: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: SponsorshipStatus,
    #[serde(rename = "contactName", default)]
    pub contact_name: Option<String>,
    #[serde(rename = "contactEmail", default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_defaults_and_validation() {
        let dto = SponsorshipDto {
            id: None,
            event_id: Uuid::new_v4(),
            level: "Gold".into(),
            amount: 500_000,
            currency: None,
            status: SponsorshipStatus::Pending,
            contact_name: None,
            contact_email: None,
            notes: None,
        };
        let mut item = Sponsorship::new_for_insert(&dto);
        assert_eq!(item.currency, "USD");
        assert!(item.validate().is_ok());

        item.currency = "EURO".into();
        assert!(item.validate().is_err());
    }
}
