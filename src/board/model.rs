/**
 * Board Models
 *
 * Three shapes of the same board:
 *
 * - [`BoardRecord`] - the stored document, carrying both identifier
 *   fields (`_id` ObjectId and, for post-migration records, `shortId`)
 * - [`Board`] - the client-facing shape with a single normalized `id`
 * - [`BoardDraft`] - creation input; identifier fields are store-assigned
 *   and never accepted from the caller
 *
 * Content fields (labels, members, groups, activities, createdBy) are
 * schemaless sequences owned by the frontend; they round-trip as raw
 * JSON values.
 */

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Board background style
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStyle {
    #[serde(default)]
    pub background: Background,
}

/// A board document as stored in the `board` collection
///
/// Legacy documents have no `shortId`; both shapes must decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub archived_at: Option<i64>,
    #[serde(default)]
    pub created_by: Option<Value>,
    #[serde(default)]
    pub style: BoardStyle,
    #[serde(default)]
    pub labels: Vec<Value>,
    #[serde(default)]
    pub members: Vec<Value>,
    #[serde(default)]
    pub groups: Vec<Value>,
    #[serde(default)]
    pub activities: Vec<Value>,
}

impl BoardRecord {
    /// The public identifier for this record: the short id when one was
    /// assigned, otherwise the legacy hex id.
    pub fn public_id(&self) -> String {
        match (&self.short_id, &self.internal_id) {
            (Some(short), _) => short.clone(),
            (None, Some(internal)) => internal.to_hex(),
            (None, None) => String::new(),
        }
    }

    /// Convert into the client-facing shape
    pub fn into_board(self) -> Board {
        let id = self.public_id();
        Board {
            id,
            title: self.title,
            is_starred: self.is_starred,
            archived_at: self.archived_at,
            created_by: self.created_by,
            style: self.style,
            labels: self.labels,
            members: self.members,
            groups: self.groups,
            activities: self.activities,
        }
    }
}

/// Client-facing board shape
///
/// Doubles as the full-replace update payload: omitted fields fall back
/// to their defaults and overwrite what was stored. There are no partial
/// (merge) updates; callers resend the whole object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub archived_at: Option<i64>,
    #[serde(default)]
    pub created_by: Option<Value>,
    #[serde(default)]
    pub style: BoardStyle,
    #[serde(default)]
    pub labels: Vec<Value>,
    #[serde(default)]
    pub members: Vec<Value>,
    #[serde(default)]
    pub groups: Vec<Value>,
    #[serde(default)]
    pub activities: Vec<Value>,
}

/// Creation input
///
/// Both identifier fields are store-assigned; a caller-supplied id is
/// not even representable here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub archived_at: Option<i64>,
    #[serde(default)]
    pub created_by: Option<Value>,
    #[serde(default)]
    pub style: Option<BoardStyle>,
    #[serde(default)]
    pub labels: Vec<Value>,
    #[serde(default)]
    pub members: Vec<Value>,
    #[serde(default)]
    pub groups: Vec<Value>,
    #[serde(default)]
    pub activities: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_public_id_prefers_short_id() {
        let record = BoardRecord {
            internal_id: Some(ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap()),
            short_id: Some("aB3dE5fG".to_string()),
            title: "Sprint 1".to_string(),
            is_starred: false,
            archived_at: None,
            created_by: None,
            style: BoardStyle::default(),
            labels: vec![],
            members: vec![],
            groups: vec![],
            activities: vec![],
        };
        assert_eq!(record.public_id(), "aB3dE5fG");
    }

    #[test]
    fn test_public_id_falls_back_to_legacy_hex() {
        let record = BoardRecord {
            internal_id: Some(ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap()),
            short_id: None,
            title: "Old Board".to_string(),
            is_starred: false,
            archived_at: None,
            created_by: None,
            style: BoardStyle::default(),
            labels: vec![],
            members: vec![],
            groups: vec![],
            activities: vec![],
        };
        assert_eq!(record.public_id(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_legacy_document_decodes_without_short_id() {
        let json = r#"{
            "_id": {"$oid": "507f1f77bcf86cd799439011"},
            "title": "Pre-migration board"
        }"#;
        let record: BoardRecord = serde_json::from_str(json).unwrap();
        assert!(record.short_id.is_none());
        assert!(record.labels.is_empty());
        assert_eq!(record.style, BoardStyle::default());
    }

    #[test]
    fn test_draft_ignores_unknown_fields_but_has_no_id() {
        let json = r#"{ "title": "New", "isStarred": true }"#;
        let draft: BoardDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.title, "New");
        assert!(draft.is_starred);
    }
}
