//! The localization context handed to a composition tree

use crate::bundle::LocaleBundle;
use crate::error::{L10nError, L10nResult};
use crate::locale::LocaleCode;
use crate::markup::MarkupNode;
use fluent_bundle::FluentArgs;
use tracing::warn;

/// Function turning a formatted rich-text message into nodes
pub type MarkupParser = fn(&str) -> Vec<MarkupNode>;

/// Ordered bundles plus the markup parser used for rich-text messages.
///
/// Bundle order is negotiation order: lookups use the first bundle that
/// defines the requested message. A context is immutable once built.
#[derive(Debug)]
pub struct LocalizationContext {
    bundles: Vec<LocaleBundle>,
    markup_parser: MarkupParser,
}

impl LocalizationContext {
    /// Aggregate bundles (in negotiation order) with a markup parser
    pub fn new(bundles: Vec<LocaleBundle>, markup_parser: MarkupParser) -> Self {
        Self {
            bundles,
            markup_parser,
        }
    }

    /// All bundles, in negotiation order
    pub fn bundles(&self) -> &[LocaleBundle] {
        &self.bundles
    }

    /// Locale codes of the bundles, in negotiation order
    pub fn locales(&self) -> Vec<&LocaleCode> {
        self.bundles.iter().map(LocaleBundle::locale).collect()
    }

    /// Number of bundles
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Whether the context holds no bundles
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Bundle for a specific locale code
    pub fn bundle(&self, locale: &str) -> Option<&LocaleBundle> {
        self.bundles.iter().find(|bundle| bundle.locale().as_str() == locale)
    }

    /// First bundle, in negotiation order, that defines message `id`
    pub fn get_bundle(&self, id: &str) -> Option<&LocaleBundle> {
        self.bundles.iter().find(|bundle| bundle.has_message(id))
    }

    /// Whether any bundle defines message `id`
    pub fn has_message(&self, id: &str) -> bool {
        self.get_bundle(id).is_some()
    }

    /// Format message `id` using the first bundle that defines it
    pub fn format(&self, id: &str, args: Option<&FluentArgs>) -> L10nResult<String> {
        self.get_bundle(id)
            .ok_or_else(|| L10nError::MessageNotFound { id: id.to_string() })?
            .format(id, args)
    }

    /// Format attribute `attribute` of message `id`
    pub fn format_attribute(&self, id: &str, attribute: &str, args: Option<&FluentArgs>) -> L10nResult<String> {
        self.get_bundle(id)
            .ok_or_else(|| L10nError::MessageNotFound {
                id: format!("{id}.{attribute}"),
            })?
            .format_attribute(id, attribute, args)
    }

    /// Format message `id`, falling back to `fallback` (or the id itself) on any failure
    pub fn get_string(&self, id: &str, args: Option<&FluentArgs>, fallback: Option<&str>) -> String {
        self.format(id, args).unwrap_or_else(|e| {
            warn!("Falling back for message '{}': {}", id, e);
            fallback.unwrap_or(id).to_string()
        })
    }

    /// Format message `id` and parse the result as markup
    pub fn format_markup(&self, id: &str, args: Option<&FluentArgs>) -> L10nResult<Vec<MarkupNode>> {
        let formatted = self.format(id, args)?;
        Ok(self.parse_markup(&formatted))
    }

    /// Run the injected markup parser
    pub fn parse_markup(&self, html: &str) -> Vec<MarkupNode> {
        (self.markup_parser)(html)
    }
}
