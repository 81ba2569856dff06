//! Helpers for tests that render components without a document.

use crate::Styles;
use anyhow::Result;

impl Styles {
    /// Buffer every injection instead of touching a document, starting from
    /// an empty cache.
    ///
    /// # Errors
    /// When called while this instance is generating.
    pub fn suppress_style_injection(&self) -> Result<()> {
        let mut injector = self.injector_mut()?;
        injector.reset();
        injector.start_buffering()?;
        Ok(())
    }

    /// Drop the buffer and the cache and go back to injecting normally.
    ///
    /// # Errors
    /// When called while this instance is generating.
    pub fn clear_buffer_and_resume_style_injection(&self) -> Result<()> {
        self.injector_mut()?.reset();
        Ok(())
    }

    /// Rules buffered since injection was suppressed.
    ///
    /// # Errors
    /// When called while this instance is generating.
    pub fn buffered_styles(&self) -> Result<Vec<String>> {
        Ok(self.injector_mut()?.buffered_rules().to_vec())
    }
}
