//! Wire types for the contacts API.

use serde::{Deserialize, Serialize};

use crate::store::{ContactRow, NewContact, Page};

pub const CONTACT_NOT_FOUND: &str = "Contato não encontrado";
pub const CONTACT_DELETED: &str = "Contato deletado";

/// Contact as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
        }
    }
}

/// Body of create and update requests. All three fields are required strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl From<ContactRequest> for NewContact {
    fn from(req: ContactRequest) -> Self {
        Self {
            name: req.name,
            phone: req.phone,
            email: req.email,
        }
    }
}

/// Query string of `GET /contacts/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl From<ListQuery> for Page {
    fn from(query: ListQuery) -> Self {
        Self::new(
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(Page::DEFAULT_LIMIT),
        )
    }
}

/// `{"message": ...}` or `{"error": ...}` body. Both go out with 200 OK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Message { message: String },
    Error { error: String },
}

impl Outcome {
    pub fn deleted() -> Self {
        Self::Message {
            message: CONTACT_DELETED.to_owned(),
        }
    }

    pub fn not_found() -> Self {
        Self::Error {
            error: CONTACT_NOT_FOUND.to_owned(),
        }
    }
}

/// Body of `PUT /contacts/{id}`: the updated contact, or a not-found payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UpdateResponse {
    Updated(Contact),
    Missing(Outcome),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_converts_field_by_field() {
        let row = ContactRow {
            id: 7,
            name: Some("Ana".into()),
            phone: None,
            email: Some("a@x.com".into()),
        };
        assert_eq!(
            serde_json::to_value(Contact::from(row)).unwrap(),
            json!({"id": 7, "name": "Ana", "phone": null, "email": "a@x.com"})
        );
    }

    #[test]
    fn request_requires_every_field() {
        let missing = serde_json::from_value::<ContactRequest>(json!({"name": "Ana", "phone": "123"}));
        assert!(missing.is_err());

        let wrong_type =
            serde_json::from_value::<ContactRequest>(json!({"name": "Ana", "phone": 123, "email": "a@x.com"}));
        assert!(wrong_type.is_err());
    }

    #[test]
    fn list_query_defaults() {
        assert_eq!(Page::from(ListQuery::default()), Page::new(0, 10));
        let query = ListQuery {
            skip: Some(5),
            limit: None,
        };
        assert_eq!(Page::from(query), Page::new(5, 10));
    }

    #[test]
    fn outcome_shapes() {
        assert_eq!(
            serde_json::to_value(Outcome::deleted()).unwrap(),
            json!({"message": "Contato deletado"})
        );
        assert_eq!(
            serde_json::to_value(UpdateResponse::Missing(Outcome::not_found())).unwrap(),
            json!({"error": "Contato não encontrado"})
        );
    }
}
