//! Field deserializers for browser forms.
//!
//! Form values arrive as text and are often blank or mistyped. A value
//! that cannot be read is treated as absent and the field's own default
//! applies, so a malformed number never fails the whole request.

use chrono::NaiveDate;
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer,
};
use std::{fmt, str::FromStr};

struct LenientIntVisitor;

impl<'de> Visitor<'de> for LenientIntVisitor {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or integer text")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v).ok())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.trim().parse().ok())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

pub fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    deserializer.deserialize_any(LenientIntVisitor)
}

pub fn lenient_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Ok(lenient_i64(deserializer)?.and_then(|v| i32::try_from(v).ok()))
}

/// Trimmed text, with blank values read as absent.
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Required text; a missing field reads as empty and fails validation later.
pub fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text(deserializer)?.unwrap_or_default())
}

fn parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(text(deserializer)?.and_then(|s| s.parse().ok()))
}

pub fn lenient_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    parsed(deserializer)
}

/// Ids in query strings and forms; anything that is not an id is ignored.
pub fn lenient_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    parsed(deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::id::UserId;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient_i64")]
        amount: Option<i64>,
        #[serde(default, deserialize_with = "lenient_i32")]
        count: Option<i32>,
        #[serde(default, deserialize_with = "text")]
        comment: Option<String>,
        #[serde(default, deserialize_with = "lenient_date")]
        meal_date: Option<NaiveDate>,
        #[serde(default, deserialize_with = "lenient_id")]
        student_id: Option<UserId>,
    }

    fn form(body: &str) -> Sample {
        serde_urlencoded::from_str(body).unwrap()
    }

    #[test]
    fn numbers_from_form_text() {
        let s = form("amount=250&count=+3+");
        assert_eq!(s.amount, Some(250));
        assert_eq!(s.count, Some(3));
    }

    #[test]
    fn malformed_numbers_read_as_absent() {
        let s = form("amount=12abc&count=");
        assert_eq!(s.amount, None);
        assert_eq!(s.count, None);

        let s = form("count=99999999999");
        assert_eq!(s.count, None);
    }

    #[test]
    fn missing_fields_read_as_absent() {
        let s = form("");
        assert!(s.amount.is_none() && s.comment.is_none() && s.student_id.is_none());
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(form("comment=++").comment, None);
        assert_eq!(form("comment=+extra+sauce+").comment.as_deref(), Some("extra sauce"));
    }

    #[test]
    fn dates_and_ids_are_parsed_or_dropped() {
        let s = form("meal_date=2026-10-16&student_id=42");
        assert_eq!(s.meal_date, NaiveDate::from_ymd_opt(2026, 10, 16));
        assert_eq!(s.student_id, None);

        let id = UserId::new();
        let s = form(&format!("meal_date=yesterday&student_id={id}"));
        assert_eq!(s.meal_date, None);
        assert_eq!(s.student_id, Some(id));
    }

    #[test]
    fn json_numbers_and_text_are_both_accepted() {
        let s: Sample = serde_json::from_str(r#"{"amount": 120, "count": "2", "comment": null}"#).unwrap();
        assert_eq!(s.amount, Some(120));
        assert_eq!(s.count, Some(2));
        assert_eq!(s.comment, None);

        let s: Sample = serde_json::from_str(r#"{"amount": 1.5, "count": null}"#).unwrap();
        assert_eq!(s.amount, None);
        assert_eq!(s.count, None);
    }
}
