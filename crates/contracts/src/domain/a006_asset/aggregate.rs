use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub Uuid);

impl AssetId {
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

impl AggregateId for AssetId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(AssetId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Slides,
    Video,
    Image,
    Document,
    #[default]
    Other,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Slides => "slides",
            AssetType::Video => "video",
            AssetType::Image => "image",
            AssetType::Document => "document",
            AssetType::Other => "other",
        }
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "slides" | "presentation" => Ok(AssetType::Slides),
            "video" | "recording" => Ok(AssetType::Video),
            "image" | "photo" => Ok(AssetType::Image),
            "document" => Ok(AssetType::Document),
            "other" => Ok(AssetType::Other),
            other => Err(format!("unknown asset type '{}'", other)),
        }
    }
}

/// Material produced for an event (slides, recordings, photos)
///
/// Only metadata is tracked; `location` points at the file, either a URL or a
/// path on shared storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    #[serde(flatten)]
    pub base: BaseAggregate<AssetId>,

    #[serde(rename = "eventId")]
    pub event_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub location: String,
    pub description: Option<String>,
    #[serde(rename = "uploadedBy")]
    pub uploaded_by: Option<String>,
}

impl Asset {
    pub fn new_for_insert(dto: &AssetDto, uploaded_by: Option<String>) -> Self {
        let mut item = Self {
            base: BaseAggregate::new(AssetId::new_v4()),
            event_id: dto.event_id,
            name: String::new(),
            asset_type: AssetType::default(),
            location: String::new(),
            description: None,
            uploaded_by,
        };
        item.update(dto);
        item
    }

    pub fn update(&mut self, dto: &AssetDto) {
        self.event_id = dto.event_id;
        self.name = dto.name.trim().to_string();
        self.asset_type = dto.asset_type;
        self.location = dto.location.trim().to_string();
        self.description = dto.description.clone().filter(|d| !d.trim().is_empty());
    }

    pub fn is_url(&self) -> bool {
        self.location.starts_with("http://") || self.location.starts_with("https://")
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Asset name must not be empty".into());
        }
        if self.location.is_empty() {
            return Err("Asset URL or path must not be empty".into());
        }
        if self.location.contains("://") && !self.is_url() {
            return Err(format!("Asset URL '{}' must be http(s)", self.location));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for Asset {
    type Id = AssetId;

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
        "a006"
    }

    fn collection_name() -> &'static str {
        "asset"
    }

    fn element_name() -> &'static str {
        "Asset"
    }

    fn list_name() -> &'static str {
        "Assets"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetDto {
    pub id: Option<String>,
    #[serde(rename = "eventId")]
    pub event_id: Uuid,
    pub name: String,
    #[serde(rename = "type", default)]
    pub asset_type: AssetType,
    /// URL or storage path
    #[serde(alias = "url", alias = "path")]
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(location: &str) -> AssetDto {
        AssetDto {
            id: None,
            event_id: Uuid::new_v4(),
            name: " Keynote slides ".into(),
            asset_type: AssetType::Slides,
            location: location.into(),
            description: Some("  ".into()),
        }
    }

    #[test]
    fn test_new_asset_keeps_uploader() {
        let asset = Asset::new_for_insert(
            &dto("https://cdn.example.org/keynote.pdf"),
            Some("alice".into()),
        );
        assert_eq!(asset.name, "Keynote slides");
        assert_eq!(asset.uploaded_by.as_deref(), Some("alice"));
        assert!(asset.description.is_none());
        assert!(asset.is_url());
        assert!(asset.validate().is_ok());
    }

    #[test]
    fn test_location_validation() {
        assert!(Asset::new_for_insert(&dto("/shared/ospo/2025/keynote.pdf"), None)
            .validate()
            .is_ok());
        assert!(Asset::new_for_insert(&dto("ftp://files.example.org/a.pdf"), None)
            .validate()
            .is_err());
        assert!(Asset::new_for_insert(&dto("   "), None).validate().is_err());
    }

    #[test]
    fn test_dto_accepts_url_key() {
        let json = r#"{
            "id": null,
            "eventId": "6f1c1a52-8a0b-4a4e-9a57-2d7f0c3f9a11",
            "name": "Talk recording",
            "type": "video",
            "url": "https://video.example.org/talk"
        }"#;
        let dto: AssetDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.asset_type, AssetType::Video);
        assert_eq!(dto.location, "https://video.example.org/talk");
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!("Presentation".parse::<AssetType>().unwrap(), AssetType::Slides);
        assert!("binary".parse::<AssetType>().is_err());
    }
}
