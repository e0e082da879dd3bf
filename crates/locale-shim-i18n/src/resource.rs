//! Parsing and validation of Fluent resources

use crate::error::{L10nError, L10nResult};
use crate::locale::LocaleCode;
use fluent_bundle::FluentResource;
use fluent_syntax::ast::Entry;
use std::sync::Arc;
use tracing::{debug, error};

/// Parse the body of a locale file into a shared [`FluentResource`].
///
/// Parsing is strict: any syntax error rejects the whole resource.
pub fn parse_resource(locale: &LocaleCode, source: String) -> L10nResult<Arc<FluentResource>> {
    let resource = FluentResource::try_new(source).map_err(|(_, errors)| {
        let errors: Vec<String> = errors.into_iter().map(|e| format!("{e:?}")).collect();
        error!("Failed to parse Fluent resource for '{}': {:?}", locale, errors);
        L10nError::ResourceParse {
            locale: locale.as_str().to_string(),
            errors,
        }
    })?;

    debug!("Parsed resource for '{}' ({} messages)", locale, message_count(&resource));
    Ok(Arc::new(resource))
}

/// Number of messages defined by a resource
pub fn message_count(resource: &FluentResource) -> usize {
    resource
        .entries()
        .filter(|entry| matches!(entry, Entry::Message(_)))
        .count()
}

/// Fail with [`L10nError::MissingResource`] if the resource defines no messages or terms.
pub fn ensure_present(locale: &LocaleCode, resource: &FluentResource) -> L10nResult<()> {
    let has_content = resource
        .entries()
        .any(|entry| matches!(entry, Entry::Message(_) | Entry::Term(_)));

    if has_content {
        Ok(())
    } else {
        error!("FluentResource for locale '{}' not found", locale);
        Err(L10nError::MissingResource {
            locale: locale.as_str().to_string(),
        })
    }
}
