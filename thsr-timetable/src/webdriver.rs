//! [`PagePort`] over a W3C WebDriver session.

use serde_json::Value;
use thirtyfour::prelude::*;
use tracing::debug;

use crate::page::{AutomationError, PagePort};

/// Script used to set an input's value without typing into it.
const SET_VALUE_SCRIPT: &str = "arguments[0].value = arguments[1];";

impl From<WebDriverError> for AutomationError {
    fn from(err: WebDriverError) -> Self {
        AutomationError::Driver(err.to_string())
    }
}

/// Element handle identified by its WebDriver element reference.
#[derive(Debug, Clone)]
pub struct DriverElement {
    id: String,
    inner: WebElement,
}

impl DriverElement {
    fn new(inner: WebElement) -> Self {
        Self {
            id: inner.element_id().to_string(),
            inner,
        }
    }
}

impl PartialEq for DriverElement {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// A Chrome page driven through a WebDriver server such as chromedriver.
pub struct WebDriverPage {
    driver: WebDriver,
}

impl WebDriverPage {
    /// Start a Chrome session on the WebDriver server at `server_url`.
    pub async fn connect(server_url: &str, headless: bool) -> Result<Self, AutomationError> {
        let mut caps = DesiredCapabilities::chrome();
        if headless {
            caps.set_headless()?;
            caps.add_arg("--disable-gpu")?;
        }

        debug!(server_url, headless, "starting browser session");
        let driver = WebDriver::new(server_url, caps).await?;
        Ok(Self { driver })
    }
}

impl PagePort for WebDriverPage {
    type Element = DriverElement;

    async fn navigate(&self, url: &str) -> Result<(), AutomationError> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<DriverElement>, AutomationError> {
        let found = self.driver.find_all(By::Css(selector)).await?;
        Ok(found.into_iter().map(DriverElement::new).collect())
    }

    async fn find_all_in(
        &self,
        scope: &DriverElement,
        selector: &str,
    ) -> Result<Vec<DriverElement>, AutomationError> {
        let found = scope.inner.find_all(By::Css(selector)).await?;
        Ok(found.into_iter().map(DriverElement::new).collect())
    }

    async fn text(&self, element: &DriverElement) -> Result<String, AutomationError> {
        Ok(element.inner.text().await?)
    }

    async fn attribute(
        &self,
        element: &DriverElement,
        name: &str,
    ) -> Result<Option<String>, AutomationError> {
        Ok(element.inner.attr(name).await?)
    }

    async fn set_value(&self, element: &DriverElement, value: &str) -> Result<(), AutomationError> {
        let args = vec![element.inner.to_json()?, Value::String(value.to_string())];
        self.driver.execute(SET_VALUE_SCRIPT, args).await?;
        Ok(())
    }

    async fn click(&self, element: &DriverElement) -> Result<(), AutomationError> {
        element.inner.click().await?;
        Ok(())
    }

    async fn close(self) -> Result<(), AutomationError> {
        self.driver.quit().await?;
        Ok(())
    }
}

