//! Form binding and validation for the add and rate pages.

use serde::Deserialize;
use thiserror::Error;

use crate::csrf;

pub const REVIEW_MAX_LEN: usize = 200;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,
    #[error("Not a valid float value.")]
    NotANumber,
    #[error("Field cannot be longer than {0} characters.")]
    TooLong(usize),
    #[error("The CSRF token is missing.")]
    CsrfMissing,
    #[error("The CSRF token is invalid.")]
    CsrfInvalid,
}

/// Validation failures keyed by field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors {
    errors: Vec<(&'static str, FieldError)>,
}

impl FormErrors {
    fn push(&mut self, field: &'static str, err: FieldError) {
        self.errors.push((field, err));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, name: &str) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |(f, _)| *f == name).map(|(_, e)| e)
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title_query: String,
    #[serde(default)]
    pub csrf_token: String,
}

impl AddForm {
    /// Yields the title query to search for.
    pub fn validate(&self, expected_csrf: Option<&str>) -> Result<String, FormErrors> {
        let mut errors = FormErrors::default();
        if let Err(e) = csrf::verify(expected_csrf, &self.csrf_token) {
            errors.push(csrf::CSRF_FIELD, e);
        }

        let query = self.title_query.trim();
        if query.is_empty() {
            errors.push("title_query", FieldError::Required);
        }

        errors.into_result(|| query.to_string())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RateForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rating {
    pub rating: f64,
    pub review: String,
}

impl RateForm {
    pub fn validate(&self, expected_csrf: Option<&str>) -> Result<Rating, FormErrors> {
        let mut errors = FormErrors::default();
        if let Err(e) = csrf::verify(expected_csrf, &self.csrf_token) {
            errors.push(csrf::CSRF_FIELD, e);
        }

        let raw = self.rating.trim();
        let mut rating = 0.0;
        if raw.is_empty() {
            errors.push("rating", FieldError::Required);
        } else {
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => rating = v,
                _ => errors.push("rating", FieldError::NotANumber),
            }
        }

        // Whitespace-only counts as missing; otherwise the review is kept verbatim.
        if self.review.trim().is_empty() {
            errors.push("review", FieldError::Required);
        } else if self.review.chars().count() > REVIEW_MAX_LEN {
            errors.push("review", FieldError::TooLong(REVIEW_MAX_LEN));
        }

        errors.into_result(|| Rating { rating, review: self.review.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(title: &str) -> AddForm {
        AddForm { title_query: title.to_string(), csrf_token: "tok".to_string() }
    }

    fn rate(rating: &str, review: &str) -> RateForm {
        RateForm {
            rating: rating.to_string(),
            review: review.to_string(),
            csrf_token: "tok".to_string(),
        }
    }

    #[test]
    fn add_requires_title() {
        let errs = add("   ").validate(Some("tok")).unwrap_err();
        assert_eq!(errs.field("title_query").collect::<Vec<_>>(), vec![&FieldError::Required]);
        assert_eq!(add(" Dune ").validate(Some("tok")).unwrap(), "Dune");
    }

    #[test]
    fn add_checks_csrf() {
        let errs = add("Dune").validate(Some("other")).unwrap_err();
        assert_eq!(errs.field("csrf_token").next(), Some(&FieldError::CsrfInvalid));
    }

    #[test]
    fn rate_accepts_any_float() {
        let r = rate("8.5", "Great").validate(Some("tok")).unwrap();
        assert_eq!(r, Rating { rating: 8.5, review: "Great".to_string() });

        // No range check.
        assert_eq!(rate("42", "ok").validate(Some("tok")).unwrap().rating, 42.0);
    }

    #[test]
    fn rate_reports_each_bad_field() {
        let errs = rate("seven", "").validate(Some("tok")).unwrap_err();
        assert_eq!(errs.field("rating").next(), Some(&FieldError::NotANumber));
        assert_eq!(errs.field("review").next(), Some(&FieldError::Required));

        let errs = rate("", "fine").validate(Some("tok")).unwrap_err();
        assert_eq!(errs.field("rating").next(), Some(&FieldError::Required));
        assert_eq!(rate("NaN", "fine").validate(Some("tok")).unwrap_err().field("rating").count(), 1);
    }

    #[test]
    fn review_is_kept_verbatim() {
        let r = rate("8.5", "  Great\n").validate(Some("tok")).unwrap();
        assert_eq!(r.review, "  Great\n");

        let errs = rate("8.5", " \n\t").validate(Some("tok")).unwrap_err();
        assert_eq!(errs.field("review").next(), Some(&FieldError::Required));
    }

    #[test]
    fn review_is_bounded() {
        let long = "x".repeat(REVIEW_MAX_LEN + 1);
        let errs = rate("5", &long).validate(Some("tok")).unwrap_err();
        assert_eq!(errs.field("review").next(), Some(&FieldError::TooLong(REVIEW_MAX_LEN)));
    }

    #[test]
    fn messages_match_form_layer() {
        assert_eq!(FieldError::Required.to_string(), "This field is required.");
        assert_eq!(FieldError::NotANumber.to_string(), "Not a valid float value.");
    }
}
