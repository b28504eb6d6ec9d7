//! Page automation port.
//!
//! The crawler drives the timetable page only through [`PagePort`]: a small
//! vocabulary of element lookups, reads, value setting and clicks. Bounded
//! waits are built on top of it in [`crate::wait`], so implementations stay
//! free of timing policy.
//!
//! The WebDriver-backed implementation lives in [`crate::webdriver`].

mod error;
#[cfg(test)]
pub(crate) mod mock;
mod visibility;

use std::fmt;
use std::future::Future;

pub use error::AutomationError;
pub use visibility::Visibility;

/// Capability to drive one live browser page.
///
/// All methods act on the single page owned by the implementation. Elements
/// are handles into the live DOM; two handles compare equal when they refer
/// to the same DOM node, so a re-rendered element compares unequal to the
/// one it replaced.
pub trait PagePort {
    /// Handle to an element on the page.
    type Element: Clone + PartialEq + fmt::Debug;

    /// Load `url` in the page.
    fn navigate(&self, url: &str) -> impl Future<Output = Result<(), AutomationError>>;

    /// All elements matching a CSS selector, in document order.
    fn find_all(
        &self,
        selector: &str,
    ) -> impl Future<Output = Result<Vec<Self::Element>, AutomationError>>;

    /// All descendants of `scope` matching a CSS selector, in document order.
    fn find_all_in(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> impl Future<Output = Result<Vec<Self::Element>, AutomationError>>;

    /// Rendered text of an element.
    fn text(&self, element: &Self::Element) -> impl Future<Output = Result<String, AutomationError>>;

    /// Value of an attribute, or `None` when the element doesn't carry it.
    fn attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> impl Future<Output = Result<Option<String>, AutomationError>>;

    /// Set the value of an input element without typing into it.
    fn set_value(
        &self,
        element: &Self::Element,
        value: &str,
    ) -> impl Future<Output = Result<(), AutomationError>>;

    /// Click an element.
    fn click(&self, element: &Self::Element) -> impl Future<Output = Result<(), AutomationError>>;

    /// Tear down the browser session.
    fn close(self) -> impl Future<Output = Result<(), AutomationError>>
    where
        Self: Sized;

    /// First element matching a CSS selector.
    fn find(&self, selector: &str) -> impl Future<Output = Result<Self::Element, AutomationError>> {
        async move {
            self.find_all(selector)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| AutomationError::ElementNotFound(selector.to_string()))
        }
    }

    /// Visibility of an element, judged from its inline `style` attribute.
    fn visibility(
        &self,
        element: &Self::Element,
    ) -> impl Future<Output = Result<Visibility, AutomationError>> {
        async move {
            let style = self.attribute(element, "style").await?;
            Ok(Visibility::from_style(style.as_deref()))
        }
    }
}
