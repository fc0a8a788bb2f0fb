use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language of the catalog. Every article carries one teaser block per variant.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Vi,
    En,
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported language '{0}': expected 'vi' or 'en'")]
pub struct LangError(String);

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::Vi => "vi",
            Lang::En => "en",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Lang::Vi => Lang::En,
            Lang::En => Lang::Vi,
        }
    }
}

impl FromStr for Lang {
    type Err = LangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vi" => Ok(Lang::Vi),
            "en" => Ok(Lang::En),
            other => Err(LangError(other.to_string())),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_codes() {
        assert_eq!("vi".parse::<Lang>().unwrap(), Lang::Vi);
        assert_eq!("en".parse::<Lang>().unwrap(), Lang::En);
    }

    #[test]
    fn rejects_unknown_and_uppercase_codes() {
        assert!("fr".parse::<Lang>().is_err());
        assert!("EN".parse::<Lang>().is_err());
        assert!("".parse::<Lang>().is_err());
    }

    #[test]
    fn default_is_vietnamese() {
        assert_eq!(Lang::default(), Lang::Vi);
    }

    #[test]
    fn toggle_swaps_language() {
        assert_eq!(Lang::Vi.toggle(), Lang::En);
        assert_eq!(Lang::En.toggle(), Lang::Vi);
    }

    #[test]
    fn display_matches_code() {
        assert_eq!(Lang::En.to_string(), "en");
        assert_eq!(format!("{}", Lang::Vi), "vi");
    }
}
