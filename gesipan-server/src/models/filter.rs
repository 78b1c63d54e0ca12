//! Search filters for the post list

use std::fmt;
use std::str::FromStr;

use super::validation::bounded_text;
use super::ValidationError;

/// Maximum length for a search key
const MAX_FKEY_LEN: usize = 50;

/// Column(s) a search matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    Title,
    Userid,
    Contents,
    /// Title or contents
    TitleContents,
}

impl FilterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Userid => "userid",
            Self::Contents => "contents",
            Self::TitleContents => "titcont",
        }
    }

    /// SQL predicate matching the pattern bound as `?1`.
    pub(crate) fn predicate(&self) -> &'static str {
        match self {
            Self::Title => r"title LIKE ?1 ESCAPE '\'",
            Self::Userid => r"userid LIKE ?1 ESCAPE '\'",
            Self::Contents => r"contents LIKE ?1 ESCAPE '\'",
            Self::TitleContents => r"(title LIKE ?1 ESCAPE '\' OR contents LIKE ?1 ESCAPE '\')",
        }
    }
}

impl FromStr for FilterType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "userid" => Ok(Self::Userid),
            "contents" => Ok(Self::Contents),
            "titcont" => Ok(Self::TitleContents),
            other => Err(ValidationError::InvalidVariant {
                field: "ftype",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub ftype: FilterType,
    fkey: String,
}

impl SearchFilter {
    pub fn new(ftype: &str, fkey: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            ftype: ftype.parse()?,
            fkey: bounded_text("fkey", fkey, MAX_FKEY_LEN)?,
        })
    }

    pub fn fkey(&self) -> &str {
        &self.fkey
    }

    /// `%fkey%` with LIKE wildcards in the key escaped.
    pub fn pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.fkey.len() + 2);
        pattern.push('%');
        for c in self.fkey.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// List URL prefix that keeps the filter across page links.
    pub fn base_url(&self) -> String {
        format!(
            "/board/list/{}/{}/",
            self.ftype,
            urlencoding::encode(&self.fkey)
        )
    }
}
