//! Custom validators for configuration fields

use locale_shim_i18n::LocaleCode;
use std::collections::HashSet;
use url::Url;
use validator::ValidationError;

/// Every entry must be a valid language identifier, and no entry may repeat.
#[allow(clippy::ptr_arg)]
pub fn validate_locales(locales: &Vec<String>) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for code in locales {
        let code = code.trim();
        if LocaleCode::parse(code).is_err() {
            let mut err = ValidationError::new("invalid_locale");
            err.message = Some(format!("'{code}' is not a valid locale code").into());
            return Err(err);
        }
        if !seen.insert(code) {
            let mut err = ValidationError::new("duplicate_locale");
            err.message = Some(format!("Locale '{code}' is listed more than once").into());
            return Err(err);
        }
    }

    Ok(())
}

/// http(s) bases must parse as URLs; anything else is taken as a directory.
pub fn validate_base_path(base: &str) -> Result<(), ValidationError> {
    if (base.starts_with("http://") || base.starts_with("https://")) && Url::parse(base).is_err() {
        return Err(ValidationError::new("invalid_base_url"));
    }
    Ok(())
}
