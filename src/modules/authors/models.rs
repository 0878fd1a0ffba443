use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use shelf_db::Entity;
use shelf_http::{FieldError, Validate, Violations};
use time::Date;

const NAME_MAX: usize = 100;
const NATIONALITY_MAX: usize = 60;

/// Stored author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Server-assigned identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Name the author publishes under; unique across authors
    pub pseudonym: String,
    pub nationality: String,
    pub birth_date: Date,
}

impl Entity for Author {
    const KIND: &'static str = "author";

    fn id(&self) -> i64 {
        self.id
    }

    fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.pseudonym)
    }

    fn sortable_fields() -> &'static [&'static str] {
        &["id", "name", "pseudonym", "nationality", "birthDate"]
    }

    fn compare_by(&self, other: &Self, field: &str) -> Option<Ordering> {
        let ordering = match field {
            "id" => self.id.cmp(&other.id),
            "name" => self.name.cmp(&other.name),
            "pseudonym" => self.pseudonym.cmp(&other.pseudonym),
            "nationality" => self.nationality.cmp(&other.nationality),
            "birthDate" => self.birth_date.cmp(&other.birth_date),
            _ => return None,
        };
        Some(ordering)
    }
}

/// Body of `save` and `update` requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pseudonym: String,
    #[serde(default)]
    pub nationality: String,
    pub birth_date: Option<Date>,
}

/// Validated author fields, everything but the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDraft {
    pub name: String,
    pub pseudonym: String,
    pub nationality: String,
    pub birth_date: Date,
}

impl AuthorDraft {
    pub fn into_author(self, id: i64) -> Author {
        Author {
            id,
            name: self.name,
            pseudonym: self.pseudonym,
            nationality: self.nationality,
            birth_date: self.birth_date,
        }
    }
}

impl Validate for AuthorRequest {
    type Valid = AuthorDraft;

    fn validate(self) -> Result<AuthorDraft, Vec<FieldError>> {
        let mut violations = Violations::new();
        violations.not_blank("name", &self.name);
        violations.max_len("name", &self.name, NAME_MAX);
        violations.not_blank("pseudonym", &self.pseudonym);
        violations.max_len("pseudonym", &self.pseudonym, NAME_MAX);
        violations.not_blank("nationality", &self.nationality);
        violations.max_len("nationality", &self.nationality, NATIONALITY_MAX);
        let birth_date = violations.required("birthDate", self.birth_date);

        match birth_date {
            Some(birth_date) if violations.is_empty() => Ok(AuthorDraft {
                name: self.name,
                pseudonym: self.pseudonym,
                nationality: self.nationality,
                birth_date,
            }),
            _ => Err(violations.into_errors()),
        }
    }
}
