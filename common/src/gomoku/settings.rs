use serde::{Deserialize, Serialize};

use crate::config::Validate;

pub const DEFAULT_SIZE: usize = 10;
pub const DEFAULT_WIN_LENGTH: usize = 5;
pub const MAX_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GomokuSettings {
    pub size: usize,
    pub win_length: usize,
}

impl GomokuSettings {
    /// Zero for either value selects its default.
    pub fn new(size: usize, win_length: usize) -> Self {
        Self {
            size: if size == 0 { DEFAULT_SIZE } else { size },
            win_length: if win_length == 0 { DEFAULT_WIN_LENGTH } else { win_length },
        }
    }

    pub fn is_winnable(&self) -> bool {
        self.win_length <= self.size
    }
}

impl Default for GomokuSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            win_length: DEFAULT_WIN_LENGTH,
        }
    }
}

impl Validate for GomokuSettings {
    fn validate(&self) -> Result<(), String> {
        if self.size == 0 {
            return Err("board size must be greater than 0".to_string());
        }
        if self.size > MAX_SIZE {
            return Err(format!("board size must not exceed {}", MAX_SIZE));
        }
        if self.win_length == 0 {
            return Err("win_length must be greater than 0".to_string());
        }
        if !self.is_winnable() {
            return Err(format!(
                "win_length ({}) cannot exceed board size ({})",
                self.win_length, self.size
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_fall_back_to_defaults() {
        assert_eq!(GomokuSettings::new(0, 0), GomokuSettings::default());
        assert_eq!(GomokuSettings::new(15, 0).win_length, DEFAULT_WIN_LENGTH);
        assert_eq!(GomokuSettings::new(0, 4).size, DEFAULT_SIZE);
    }

    #[test]
    fn test_validate_rejects_unwinnable_settings() {
        assert!(GomokuSettings::default().validate().is_ok());
        assert!(GomokuSettings::new(4, 5).validate().is_err());
        assert!(GomokuSettings { size: 0, win_length: 5 }.validate().is_err());
        assert!(GomokuSettings::new(MAX_SIZE + 1, 5).validate().is_err());
    }
}
