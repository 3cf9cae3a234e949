// src/generators/uuid.rs
use serde::Serialize;
use thiserror::Error;
use uuid::{Uuid, Variant};

pub const MAX_UUIDS: usize = 1000;

#[derive(Debug, Error)]
pub enum UuidToolError {
    #[error("Invalid UUID: {0}")]
    Invalid(#[from] uuid::Error),
}

pub type Result<T> = std::result::Result<T, UuidToolError>;

// Generate `count` random v4 UUIDs, clamped to 1..=MAX_UUIDS
pub fn generate(count: usize) -> Vec<String> {
    let count = count.clamp(1, MAX_UUIDS);
    (0..count)
        .map(|_| Uuid::new_v4().hyphenated().to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct UuidInfo {
    pub uuid: String,
    pub version: usize,
    pub variant: String,
}

// Validate a UUID and report its version and variant
pub fn inspect(text: &str) -> Result<UuidInfo> {
    let uuid = Uuid::parse_str(text.trim())?;
    let variant = match uuid.get_variant() {
        Variant::NCS => "NCS",
        Variant::RFC4122 => "RFC 4122",
        Variant::Microsoft => "Microsoft",
        Variant::Future => "Future",
        _ => "Unknown",
    };

    Ok(UuidInfo {
        uuid: uuid.hyphenated().to_string(),
        version: uuid.get_version_num(),
        variant: variant.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_uuids_are_v4_rfc4122() {
        let ids = generate(5);
        assert_eq!(ids.len(), 5);
        for id in &ids {
            assert_eq!(id.len(), 36);
            assert_eq!(id, &id.to_lowercase());
            let info = inspect(id).unwrap();
            assert_eq!(info.version, 4);
            assert_eq!(info.variant, "RFC 4122");
        }
    }

    #[test]
    fn count_is_clamped() {
        assert_eq!(generate(0).len(), 1);
        assert_eq!(generate(5000).len(), MAX_UUIDS);
    }

    #[test]
    fn inspect_rejects_garbage() {
        assert!(inspect("not-a-uuid").is_err());
        let info = inspect(" 6BA7B810-9DAD-11D1-80B4-00C04FD430C8 ").unwrap();
        assert_eq!(info.uuid, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
        assert_eq!(info.version, 1);
    }
}
