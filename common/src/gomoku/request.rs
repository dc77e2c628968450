//! Untyped entry points for collaborators that receive moves as text.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::types::Side;

pub const MISSING_MOVE_FIELDS: &str = "X, Y and side are required!";
pub const NOT_AN_INTEGER: &str = "X or Y are not integers!";
pub const UNKNOWN_SIDE: &str = "Playing as who?";
pub const MISSING_CHAT_FIELDS: &str = "Message and player name need to be given!";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub x: Option<String>,
    pub y: Option<String>,
    pub side: Option<String>,
}

impl MoveRequest {
    pub fn new(x: impl Into<String>, y: impl Into<String>, side: impl Into<String>) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
            side: Some(side.into()),
        }
    }

    /// All three fields, or `None` if any is absent or blank.
    pub(crate) fn fields(&self) -> Option<(&str, &str, &str)> {
        let x = present(self.x.as_deref())?;
        let y = present(self.y.as_deref())?;
        let side = present(self.side.as_deref())?;
        Some((x, y, side))
    }
}

pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `"0"` is a valid coordinate; only absent or non-integer input is rejected.
pub fn parse_coordinate(value: &str) -> Result<i64, GameError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| GameError::InvalidArgument(NOT_AN_INTEGER.to_string()))
}

pub fn parse_side(value: Option<&str>) -> Result<Side, GameError> {
    present(value)
        .and_then(|side| side.parse::<Side>().ok())
        .ok_or_else(|| GameError::InvalidArgument(UNKNOWN_SIDE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_a_coordinate() {
        assert_eq!(parse_coordinate("0").unwrap(), 0);
        assert_eq!(parse_coordinate(" 7 ").unwrap(), 7);
        assert_eq!(parse_coordinate("-1").unwrap(), -1);
    }

    #[test]
    fn test_non_integers_are_invalid() {
        for value in ["abc", "3.5", "", "1e3"] {
            let err = parse_coordinate(value).unwrap_err();
            assert_eq!(err, GameError::InvalidArgument(NOT_AN_INTEGER.to_string()));
        }
    }

    #[test]
    fn test_blank_fields_count_as_missing() {
        assert!(MoveRequest::new("1", "2", "PLAYER1").fields().is_some());
        assert!(MoveRequest::new("1", " ", "PLAYER1").fields().is_none());
        let request = MoveRequest {
            side: None,
            ..MoveRequest::new("1", "2", "PLAYER1")
        };
        assert!(request.fields().is_none());
    }

    #[test]
    fn test_parse_side() {
        assert_eq!(parse_side(Some("PLAYER2")).unwrap(), Side::Player2);
        assert!(parse_side(Some("PLAYER3")).is_err());
        assert!(parse_side(None).is_err());
    }
}
