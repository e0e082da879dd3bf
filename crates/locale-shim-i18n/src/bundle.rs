//! Per-locale Fluent bundles and message formatting

use crate::error::{L10nError, L10nResult};
use crate::locale::LocaleCode;
use crate::resource::message_count;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentError, FluentResource};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// A locale code associated with its resource, ready for message lookup.
///
/// Uses the concurrent bundle flavour so a finished context can be shared
/// across tasks and threads.
pub struct LocaleBundle {
    locale: LocaleCode,
    resource: Arc<FluentResource>,
    bundle: FluentBundle<Arc<FluentResource>>,
}

impl fmt::Debug for LocaleBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleBundle")
            .field("locale", &self.locale)
            .field("messages", &message_count(&self.resource))
            .finish_non_exhaustive()
    }
}

impl LocaleBundle {
    /// Build a bundle for `locale` holding `resource`
    pub fn new(locale: LocaleCode, resource: Arc<FluentResource>, use_isolating: bool) -> L10nResult<Self> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.language_identifier().clone()]);
        bundle.set_use_isolating(use_isolating);

        bundle
            .add_resource(Arc::clone(&resource))
            .map_err(|errors| L10nError::BundleCreation {
                locale: locale.as_str().to_string(),
                errors: describe(errors),
            })?;

        debug!("Created bundle for locale: {}", locale);
        Ok(Self {
            locale,
            resource,
            bundle,
        })
    }

    /// Locale of this bundle
    pub fn locale(&self) -> &LocaleCode {
        &self.locale
    }

    /// Number of messages in the bundle
    pub fn message_count(&self) -> usize {
        message_count(&self.resource)
    }

    /// Check if a message exists in the bundle
    pub fn has_message(&self, id: &str) -> bool {
        self.bundle.has_message(id)
    }

    /// Format the value of message `id`
    pub fn format(&self, id: &str, args: Option<&FluentArgs>) -> L10nResult<String> {
        let message = self.bundle.get_message(id).ok_or_else(|| not_found(id))?;
        let pattern = message.value().ok_or_else(|| not_found(id))?;

        let mut errors = Vec::new();
        let formatted = self.bundle.format_pattern(pattern, args, &mut errors);
        check_errors(id, errors)?;

        Ok(formatted.into_owned())
    }

    /// Format attribute `attribute` of message `id`
    pub fn format_attribute(&self, id: &str, attribute: &str, args: Option<&FluentArgs>) -> L10nResult<String> {
        let key = format!("{id}.{attribute}");
        let message = self.bundle.get_message(id).ok_or_else(|| not_found(&key))?;
        let attr = message.get_attribute(attribute).ok_or_else(|| not_found(&key))?;

        let mut errors = Vec::new();
        let formatted = self.bundle.format_pattern(attr.value(), args, &mut errors);
        check_errors(&key, errors)?;

        Ok(formatted.into_owned())
    }
}

fn not_found(id: &str) -> L10nError {
    L10nError::MessageNotFound { id: id.to_string() }
}

fn describe(errors: Vec<FluentError>) -> Vec<String> {
    errors.into_iter().map(|e| format!("{e:?}")).collect()
}

fn check_errors(id: &str, errors: Vec<FluentError>) -> L10nResult<()> {
    if errors.is_empty() {
        return Ok(());
    }

    let errors = describe(errors);
    warn!("Formatting errors for message '{}': {:?}", id, errors);
    Err(L10nError::MessageFormat {
        id: id.to_string(),
        errors,
    })
}

/// Build `Option<FluentArgs>` from `key => value` pairs
#[macro_export]
macro_rules! fluent_args {
    () => {
        None
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::FluentArgs::new();
        $(
            args.set($key, $value);
        )+
        Some(args)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::parse_resource;

    fn bundle(source: &str) -> LocaleBundle {
        let locale = LocaleCode::parse("en").unwrap();
        let resource = parse_resource(&locale, source.to_string()).unwrap();
        LocaleBundle::new(locale, resource, false).unwrap()
    }

    #[test]
    fn test_format_plain_and_with_args() {
        let bundle = bundle("hello = Hello!\nwelcome = Welcome, { $name }!\n");

        assert_eq!(bundle.format("hello", None).unwrap(), "Hello!");
        let args = crate::fluent_args!["name" => "Ana"];
        assert_eq!(bundle.format("welcome", args.as_ref()).unwrap(), "Welcome, Ana!");
        assert_eq!(bundle.message_count(), 2);
    }

    #[test]
    fn test_missing_variable_is_format_error() {
        let bundle = bundle("welcome = Welcome, { $name }!\n");
        let err = bundle.format("welcome", None).unwrap_err();
        assert!(matches!(err, L10nError::MessageFormat { ref id, .. } if id == "welcome"));
    }

    #[test]
    fn test_attribute_formatting() {
        let bundle = bundle("login = Log in\n    .title = Open the login form\n");
        assert_eq!(bundle.format_attribute("login", "title", None).unwrap(), "Open the login form");
        assert!(matches!(
            bundle.format_attribute("login", "missing", None),
            Err(L10nError::MessageNotFound { ref id }) if id == "login.missing"
        ));
    }

    #[test]
    fn test_duplicate_message_fails_bundle_creation() {
        let locale = LocaleCode::parse("en").unwrap();
        let resource = parse_resource(&locale, "a = one\na = two\n".to_string()).unwrap();
        let err = LocaleBundle::new(locale, resource, false).unwrap_err();
        assert!(matches!(err, L10nError::BundleCreation { ref locale, .. } if locale == "en"));
    }

    #[test]
    fn test_fluent_args_macro() {
        let bundle = bundle("count = { $n } items\n");
        let args = crate::fluent_args!["n" => 3];
        assert_eq!(bundle.format("count", args.as_ref()).unwrap(), "3 items");
    }
}
