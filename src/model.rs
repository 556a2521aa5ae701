//! Records served by the catalog endpoint
//!
//! Facts, categories and research are owned by the remote data source and
//! never mutated here. Fields the reduced list query does not select default
//! to empty values so the same types serve both the list and detail payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// GraphQL `ID` scalars may arrive as JSON strings or numbers.
fn id_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Uint(n) => n.to_string(),
    })
}

/// A named tag used to filter facts. Flat, no hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "id_from_scalar")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A citation supporting one or more facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Research {
    #[serde(deserialize_with = "id_from_scalar")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub citation: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Research {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            description: None,
            citation: None,
            updated_at: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// URL to link to, ignoring blank values the CMS sometimes stores.
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// A single displayable statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(deserialize_with = "id_from_scalar")]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<Category>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub research: Vec<Research>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Fact {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            updated_at: None,
            categories: Vec::new(),
            research: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_research(mut self, research: Research) -> Self {
        self.research.push(research);
        self
    }

    pub fn has_category(&self, id: &str) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_become_strings() {
        let category: Category = serde_json::from_str(r#"{"id": 7, "name": "Water"}"#).unwrap();
        assert_eq!(category.id, "7");
        assert_eq!(category.name, "Water");
    }

    #[test]
    fn list_payload_with_reduced_research() {
        let json = r#"{
            "id": "3",
            "text": "Aquaponics uses less water",
            "categories": [{"id": "1", "name": "Water"}],
            "research": [{"id": "10"}, {"id": "11"}]
        }"#;
        let fact: Fact = serde_json::from_str(json).unwrap();
        assert_eq!(fact.research.len(), 2);
        assert!(fact.research[0].title.is_empty());
        assert!(fact.updated_at.is_none());
        assert!(fact.has_category("1"));
        assert!(!fact.has_category("2"));
    }

    #[test]
    fn detail_payload_with_timestamps() {
        let json = r#"{
            "id": "3",
            "text": "Aquaponics uses less water",
            "updated_at": "2021-05-04T12:00:00.000Z",
            "categories": null,
            "research": [{
                "id": "10",
                "title": "Water use study",
                "url": "https://example.org/study",
                "description": null,
                "citation": "Doe 2019",
                "updated_at": "2021-05-01T08:30:00.000Z"
            }]
        }"#;
        let fact: Fact = serde_json::from_str(json).unwrap();
        assert!(fact.categories.is_empty());
        assert!(fact.updated_at.is_some());
        assert_eq!(fact.research[0].link(), Some("https://example.org/study"));
        assert_eq!(fact.research[0].citation.as_deref(), Some("Doe 2019"));
    }

    #[test]
    fn blank_url_is_not_a_link() {
        let research = Research::new("1", "Untitled").with_url("   ");
        assert_eq!(research.link(), None);
    }
}
