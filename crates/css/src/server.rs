//! Rendering on a server, where there is no document to inject into.

use crate::Styles;
use anyhow::Result;
use serde::Serialize;

/// CSS collected while rendering, ready to be inlined in a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticCss {
    /// Every rule generated during the render, concatenated.
    pub content: String,
    /// Identifiers to pass to [`Styles::rehydrate`] on the client.
    pub rendered_identifiers: Vec<String>,
}

/// Output of the render callback together with its CSS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticRender<T> {
    pub markup: T,
    pub css: StaticCss,
}

impl Styles {
    /// Run `render` with injection buffered and collect what it generated.
    ///
    /// The cache is reset before rendering, so every class used by `render`
    /// shows up in the result even if it was injected earlier.
    ///
    /// # Errors
    /// Errors from `render` itself, or when buffering cannot start.
    pub fn render_static<T, F>(&self, render: F) -> Result<StaticRender<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        {
            let mut injector = self.injector_mut()?;
            injector.reset();
            injector.start_buffering()?;
        }

        let markup = render()?;

        let mut injector = self.injector_mut()?;
        let content = injector.flush_to_string();
        let rendered_identifiers = injector.rendered_identifiers();
        Ok(StaticRender {
            markup,
            css: StaticCss {
                content,
                rendered_identifiers,
            },
        })
    }
}
