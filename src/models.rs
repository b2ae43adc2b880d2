use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::schema::books;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, diesel::Queryable, diesel::Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: BigDecimal,
    pub published_date: Option<NaiveDate>,
}

/// A validated book without an identity, used for both inserts and full-overwrite updates.
///
/// `treat_none_as_null` makes an update clear a stored published date when the
/// incoming one is absent, rather than leaving the column untouched.
#[derive(Debug, Clone, PartialEq, Eq, diesel::Insertable, diesel::AsChangeset)]
#[diesel(table_name = books)]
#[diesel(treat_none_as_null = true)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub price: BigDecimal,
    pub published_date: Option<NaiveDate>,
}

impl NewBook {
    pub fn with_id(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            price: self.price,
            published_date: self.published_date,
        }
    }
}

/// Request body for creating or replacing a book. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<BigDecimal>,
    pub published_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title cannot be blank")]
    BlankTitle,
    #[error("Author cannot be empty")]
    BlankAuthor,
    #[error("Price cannot be null")]
    MissingPrice,
}

impl BookPayload {
    pub fn validate(self) -> Result<NewBook, ValidationError> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(ValidationError::BlankTitle)?;
        let author = self
            .author
            .filter(|a| !a.trim().is_empty())
            .ok_or(ValidationError::BlankAuthor)?;
        let price = self.price.ok_or(ValidationError::MissingPrice)?;

        Ok(NewBook {
            title,
            author,
            price,
            published_date: self.published_date,
        })
    }
}

// JSON numbers keep their literal text (serde_json's `arbitrary_precision`),
// so 12345678901234567.89 is not squeezed through an f64.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "invalid price {other}: expected a number or a string"
            )))
        }
    };
    BigDecimal::from_str(text.trim())
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("invalid price '{text}': {e}")))
}
