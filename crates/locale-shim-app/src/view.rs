//! Views rendered beneath a localization provider

use crate::provider::LocalizationConsumer;
use locale_shim_i18n::markup::text_content;
use locale_shim_i18n::{FluentArgs, LocalizationContext};

/// Something that renders with the ambient localization.
///
/// Views are rendered before the context exists, so they must produce
/// sensible output when [`LocalizationConsumer::context`] is `None`.
pub trait View: Send + Sync {
    /// Render to text
    fn render(&self, l10n: &LocalizationConsumer) -> String;
}

impl<F> View for F
where
    F: Fn(&LocalizationConsumer) -> String + Send + Sync,
{
    fn render(&self, l10n: &LocalizationConsumer) -> String {
        self(l10n)
    }
}

/// A page that renders a list of messages, one per line.
///
/// Rich-text messages are reduced to their text. Until the context is ready
/// each line is the bracketed message id.
#[derive(Debug, Clone, Default)]
pub struct Page {
    ids: Vec<String>,
    args: Vec<(String, String)>,
}

impl Page {
    /// A page showing `ids` in order
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            args: Vec::new(),
        }
    }

    /// Pass `name = value` to every message
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((name.into(), value.into()));
        self
    }

    /// Message ids on this page
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    fn fluent_args(&self) -> Option<FluentArgs<'_>> {
        if self.args.is_empty() {
            return None;
        }
        let mut args = FluentArgs::new();
        for (name, value) in &self.args {
            args.set(name.as_str(), value.as_str());
        }
        Some(args)
    }

    fn render_line(&self, ctx: &LocalizationContext, id: &str, args: Option<&FluentArgs<'_>>) -> String {
        match ctx.format_markup(id, args) {
            Ok(nodes) => text_content(&nodes),
            Err(_) => ctx.get_string(id, args, None),
        }
    }
}

impl View for Page {
    fn render(&self, l10n: &LocalizationConsumer) -> String {
        let Some(ctx) = l10n.context() else {
            return self.ids.iter().map(|id| format!("[{id}]")).collect::<Vec<_>>().join("\n");
        };

        let args = self.fluent_args();
        self.ids
            .iter()
            .map(|id| self.render_line(&ctx, id, args.as_ref()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
