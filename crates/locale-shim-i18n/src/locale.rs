//! Locale codes and the asset path convention

use crate::error::{L10nError, L10nResult};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Locales requested when the caller does not choose any, in negotiation order
pub const DEFAULT_LOCALES: [&str; 2] = ["en", "es"];

/// Directory under the public base path that holds `.ftl` files
pub const LOCALE_DIR: &str = "locale";

/// Extension of Fluent resource files
pub const RESOURCE_EXTENSION: &str = "ftl";

/// A validated locale code such as `en` or `es-MX`.
///
/// The original spelling is kept because it names the resource file; the
/// parsed identifier is what Fluent bundles are keyed on. Codes that are not
/// valid language identifiers (including anything carrying `/` or `.`) are
/// rejected, so a code can never escape the locale directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleCode {
    code: String,
    langid: LanguageIdentifier,
}

impl LocaleCode {
    /// Parse and validate a locale code
    pub fn parse(code: &str) -> L10nResult<Self> {
        let code = code.trim();
        if code.is_empty() {
            return Err(L10nError::InvalidLocale(code.to_string()));
        }

        let langid = code
            .parse::<LanguageIdentifier>()
            .map_err(|_| L10nError::InvalidLocale(code.to_string()))?;

        Ok(Self {
            code: code.to_string(),
            langid,
        })
    }

    /// The code as it was written
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// The parsed language identifier
    pub fn language_identifier(&self) -> &LanguageIdentifier {
        &self.langid
    }

    /// File name of this locale's resource, e.g. `en.ftl`
    pub fn resource_file(&self) -> String {
        format!("{}.{RESOURCE_EXTENSION}", self.code)
    }
}

impl FromStr for LocaleCode {
    type Err = L10nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.code
    }
}

/// The default locale list, `["en", "es"]`
pub fn default_locales() -> Vec<LocaleCode> {
    DEFAULT_LOCALES
        .iter()
        .map(|code| LocaleCode {
            code: (*code).to_string(),
            langid: code.parse().unwrap_or_default(),
        })
        .collect()
}

/// Parse a list of locale codes, failing on the first invalid one
pub fn parse_locales<I, S>(codes: I) -> L10nResult<Vec<LocaleCode>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    codes
        .into_iter()
        .map(|code| LocaleCode::parse(code.as_ref()))
        .collect()
}

/// Location of a locale's resource: `<base>/locale/<code>.ftl`.
///
/// Trailing slashes on `base` are ignored; an empty base yields the
/// root-relative path `/locale/<code>.ftl`.
pub fn resource_url(base: &str, locale: &LocaleCode) -> String {
    format!(
        "{}/{LOCALE_DIR}/{}",
        base.trim_end_matches('/'),
        locale.resource_file()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_codes() {
        let en = LocaleCode::parse("en").unwrap();
        assert_eq!(en.as_str(), "en");
        assert_eq!(en.language_identifier().language.as_str(), "en");

        let region = LocaleCode::parse(" es-MX ").unwrap();
        assert_eq!(region.as_str(), "es-MX");
        assert_eq!(region.to_string(), "es-MX");
    }

    #[test]
    fn test_parse_rejects_invalid_codes() {
        for code in ["", "   ", "../etc/passwd", "en/../../x", "e.n", "not a locale"] {
            assert!(
                matches!(LocaleCode::parse(code), Err(L10nError::InvalidLocale(_))),
                "expected '{code}' to be rejected"
            );
        }
    }

    #[test]
    fn test_default_locales() {
        let locales = default_locales();
        let codes: Vec<&str> = locales.iter().map(LocaleCode::as_str).collect();
        assert_eq!(codes, vec!["en", "es"]);
        assert_eq!(locales[1].language_identifier().language.as_str(), "es");
    }

    #[test]
    fn test_resource_url() {
        let en = LocaleCode::parse("en").unwrap();
        assert_eq!(resource_url("", &en), "/locale/en.ftl");
        assert_eq!(resource_url("https://cdn.example.com/app", &en), "https://cdn.example.com/app/locale/en.ftl");
        assert_eq!(resource_url("https://cdn.example.com/app//", &en), "https://cdn.example.com/app/locale/en.ftl");
        assert_eq!(resource_url("public", &en), "public/locale/en.ftl");
    }

    #[test]
    fn test_parse_locales_preserves_order() {
        let locales = parse_locales(["es", "en", "fr"]).unwrap();
        let codes: Vec<&str> = locales.iter().map(AsRef::as_ref).collect();
        assert_eq!(codes, vec!["es", "en", "fr"]);

        assert!(parse_locales(["en", "??"]).is_err());
    }
}
