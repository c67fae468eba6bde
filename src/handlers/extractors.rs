//! Common extractors for API handlers.
//!
//! [`ValidatedJson`] is the single entry point for JSON bodies: it maps
//! malformed payloads and `validator` rule failures onto [`ApiError`] so every
//! endpoint reports input problems with the same error body.
//! [`Numeric`] accepts numbers sent either as JSON numbers or as strings.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationErrors};

use crate::error::{handle_rejection, ApiError};

/// JSON body that has passed its `validator` rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(handle_rejection)?;
        value.validate().map_err(validation_error)?;
        Ok(ValidatedJson(value))
    }
}

/// Report the first failing field, in field-name order.
fn validation_error(errors: ValidationErrors) -> ApiError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    match fields.first() {
        Some((field, errs)) => {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("Invalid value for \"{}\".", field));
            ApiError::validation_field(field.to_string(), message)
        }
        None => ApiError::Validation("Invalid input provided.".to_string()),
    }
}

/// A numeric value sent as a JSON number or a numeric string.
///
/// Non-numeric strings are kept so the caller can report them as a
/// validation failure with its own message.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Decimal(Decimal),
    Invalid,
}

impl Numeric {
    /// Integer value, truncating any fractional part toward zero.
    pub fn as_id(&self) -> Option<i64> {
        match self {
            Numeric::Integer(n) => Some(*n),
            Numeric::Decimal(d) => d.trunc().to_i64(),
            Numeric::Invalid => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Numeric::Integer(n) => Some(Decimal::from(*n)),
            Numeric::Decimal(d) => Some(*d),
            Numeric::Invalid => None,
        }
    }

    fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<i64>() {
            return Numeric::Integer(n);
        }
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map(Numeric::Decimal)
            .unwrap_or(Numeric::Invalid)
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumericVisitor;

        impl Visitor<'_> for NumericVisitor {
            type Value = Numeric;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number or a numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Numeric, E> {
                Ok(Numeric::Integer(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Numeric, E> {
                Ok(i64::try_from(v)
                    .map(Numeric::Integer)
                    .unwrap_or(Numeric::Invalid))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Numeric, E> {
                Ok(Decimal::from_f64(v)
                    .map(Numeric::Decimal)
                    .unwrap_or(Numeric::Invalid))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Numeric, E> {
                Ok(Numeric::parse(v))
            }

            fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Numeric, E> {
                Ok(Numeric::Invalid)
            }
        }

        deserializer.deserialize_any(NumericVisitor)
    }
}
