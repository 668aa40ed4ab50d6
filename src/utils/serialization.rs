use crate::domain::model::ErrorModel;
use crate::utils::error::{DeserializationError, SerializationError};
use chrono::{Datelike, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Encodes a date as the JSON string body the service expects, e.g. `"9999-12-31"`.
pub fn serialize_date(date: NaiveDate) -> Result<String, SerializationError> {
    if !(1..=9999).contains(&date.year()) {
        return Err(SerializationError::new(format!(
            "year {} cannot be written as an ISO-8601 date",
            date.year()
        )));
    }

    serde_json::to_string(&date.format(DATE_FORMAT).to_string()).map_err(|e| SerializationError {
        message: "date could not be encoded as JSON".to_string(),
        source: Some(Box::new(e)),
    })
}

/// Decodes a nullable date body. An empty body and JSON `null` both mean "no value".
pub fn deserialize_date(body: &str) -> Result<Option<NaiveDate>, DeserializationError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(None);
    }

    let raw: Option<String> = serde_json::from_str(body).map_err(|e| {
        DeserializationError::with_source(format!("expected a JSON date string, got {}", body), e)
    })?;

    match raw {
        None => Ok(None),
        Some(text) => parse_date(&text).map(Some),
    }
}

fn parse_date(text: &str) -> Result<NaiveDate, DeserializationError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| DeserializationError::with_source(format!("'{}' is not a valid date", text), e))
}

/// Best-effort decode of the service's error body.
pub fn deserialize_error(body: &str) -> Option<ErrorModel> {
    serde_json::from_str::<ErrorModel>(body)
        .ok()
        .filter(|e| e.status.is_some() || e.message.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_date_bounds() {
        let max = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        let min = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        assert_eq!(serialize_date(max).unwrap(), "\"9999-12-31\"");
        assert_eq!(serialize_date(min).unwrap(), "\"0001-01-01\"");

        let too_late = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        assert!(serialize_date(too_late).is_err());
        let too_early = NaiveDate::from_ymd_opt(0, 12, 31).unwrap();
        assert!(serialize_date(too_early).is_err());
    }

    #[test]
    fn test_deserialize_null_and_empty() {
        assert_eq!(deserialize_date("null").unwrap(), None);
        assert_eq!(deserialize_date("").unwrap(), None);
        assert_eq!(deserialize_date("  \n").unwrap(), None);
    }

    #[test]
    fn test_deserialize_valid_date() {
        assert_eq!(
            deserialize_date("\"2012-01-01\"").unwrap(),
            NaiveDate::from_ymd_opt(2012, 1, 1)
        );
    }

    #[test]
    fn test_deserialize_rejects_bad_dates() {
        // Payloads the test service uses for its invalid/overflow/underflow cases.
        assert!(deserialize_date("\"201O-18-90\"").is_err());
        assert!(deserialize_date("\"10000000000-12-31\"").is_err());
        assert!(deserialize_date("\"0000-00-00\"").is_err());
        assert!(deserialize_date("20120101").is_err());
        assert!(deserialize_date("{not json").is_err());
    }

    #[test]
    fn test_deserialize_error_model() {
        let model = deserialize_error(r#"{"status": 500, "message": "boom"}"#).unwrap();
        assert_eq!(model.status, Some(500));
        assert_eq!(model.message.as_deref(), Some("boom"));

        assert!(deserialize_error("{}").is_none());
        assert!(deserialize_error("plain text").is_none());
    }
}
