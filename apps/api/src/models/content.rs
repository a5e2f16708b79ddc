use serde::{Deserialize, Serialize};

/// An addressable content record held in an ordered collection.
///
/// Every collection-held entity carries a durable `i64` id assigned by the
/// store's per-collection counter. Ids are unique within a collection;
/// vec position is the display order.
pub trait Entity {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

/// The profile singleton. Replaced wholesale on save — no id.
///
/// `avatar` and `resume_url` hold either a remote URL or an embedded
/// data-URL payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
}

/// A single skill with a 0–100 proficiency level.
///
/// Older backup documents carry skills without ids; `default` lets them
/// parse, and the store re-assigns ids on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub id: i64,
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub id: i64,
    pub degree: String,
    pub school: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub tech: Vec<String>,
    pub description: Vec<String>,
    pub image: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub issuer: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Entity for Skill {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Entity for Experience {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Entity for Education {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Entity for Project {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Entity for Certification {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
