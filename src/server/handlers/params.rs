//! Request parameter types.

use serde::Deserialize;

use crate::server::error::ApiError;

/// Query params for the top districts endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TopDistrictsParams {
    pub year: Option<String>,
}

impl TopDistrictsParams {
    /// The requested year; an empty value means no filter.
    pub fn year(&self) -> Result<Option<i64>, ApiError> {
        match self.year.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_year(raw).map(Some),
        }
    }
}

pub fn parse_year(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::invalid("year", format!("expected an integer, got '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(year: Option<&str>) -> TopDistrictsParams {
        TopDistrictsParams {
            year: year.map(str::to_string),
        }
    }

    #[test]
    fn test_year_param() {
        assert_eq!(params(None).year().unwrap(), None);
        assert_eq!(params(Some("")).year().unwrap(), None);
        assert_eq!(params(Some("2020")).year().unwrap(), Some(2020));
        assert!(params(Some("twenty")).year().is_err());
    }
}
