// [libs/domain/models/src/record.rs]
/*!
 * APARATO: JOURNAL RECORD MODELS (ESTRATO L2)
 * RESPONSABILIDAD: ESQUEMA DE ENTRADA DEL JOURNAL
 *
 * Un journal es un flujo de objetos JSON delimitados por LF; cada uno
 * describe un usuario y las líneas `authorized_keys` que publicó. El
 * esquema se valida vía `serde` en el momento del parseo en lugar de
 * recorrer un `serde_json::Value` dinámico a mano.
 */

use serde::{Deserialize, Serialize};

/// One journal entry: a user's public identity plus the raw
/// `authorized_keys` lines they published.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    /// Identity and profile fields for the publishing user.
    pub user: User,
    /// Ordered `authorized_keys` lines, algorithm prefix included.
    pub keys: Vec<String>,
}

/// Identity fields for a user, as collected by the (out-of-scope)
/// harvester. `id` is a positive integer, unique per user across all
/// journal chunks; records are appended in ascending `id` order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable numeric identifier, unique across all chunks.
    pub id: u64,
    /// Login handle.
    pub login: String,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional public email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional company/affiliation field.
    #[serde(default)]
    pub company: Option<String>,
    /// Optional free-text biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Optional free-text location.
    #[serde(default)]
    pub location: Option<String>,
    /// Optional personal or organization URL.
    #[serde(default)]
    pub website_url: Option<String>,
    /// ISO-8601 account creation timestamp.
    pub created_at: String,
    /// ISO-8601 last-update timestamp.
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_record() {
        let json = r#"{
            "user": {
                "id": 42,
                "login": "octocat",
                "createdAt": "2012-01-01T00:00:00Z",
                "updatedAt": "2012-01-01T00:00:00Z"
            },
            "keys": ["ssh-rsa AAAA..."]
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.user.id, 42);
        assert_eq!(record.user.login, "octocat");
        assert!(record.user.name.is_none());
        assert_eq!(record.keys.len(), 1);
    }

    #[test]
    fn deserializes_full_profile() {
        let json = r#"{
            "user": {
                "id": 7,
                "login": "torvalds",
                "name": "Linus Torvalds",
                "email": "linus@example.com",
                "company": "Linux Foundation",
                "bio": "kernel maintainer",
                "location": "Portland, OR",
                "websiteUrl": "https://example.com",
                "createdAt": "2011-09-03T15:26:22Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            },
            "keys": []
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.user.name.as_deref(), Some("Linus Torvalds"));
        assert!(record.keys.is_empty());
    }

    #[test]
    fn rejects_record_missing_required_field() {
        let json = r#"{"user": {"login": "octocat"}, "keys": []}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }
}
