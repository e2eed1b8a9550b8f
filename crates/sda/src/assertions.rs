// Assertions - polling expectations on page elements
//
// `expect(&button).to_be_visible().await?` keeps re-checking the element
// until the condition holds or the timeout passes, then fails with
// `Error::AssertionTimeout` describing what was last observed.

use crate::capabilities::AsElement;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::text;
use std::future::Future;
use std::time::{Duration, Instant};

/// Default timeout for assertions
const DEFAULT_ASSERTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Default polling interval for assertions
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Creates an expectation for any structure (or bare element).
///
/// # Example
///
/// ```ignore
/// use sda::{expect, Locator};
/// use std::time::Duration;
///
/// let banner = page.text(Locator::id("banner"));
/// expect(&banner).to_have_text("Saved").await?;
/// expect(&banner)
///     .with_timeout(Duration::from_secs(10))
///     .not()
///     .to_be_visible()
///     .await?;
/// ```
pub fn expect<E: AsElement + ?Sized>(target: &E) -> Expectation {
    Expectation::new(target.element().clone())
}

/// Expectation wraps an element and provides assertion methods with auto-retry.
pub struct Expectation {
    element: Element,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

// to_* methods consume the expectation, matching the chained call style
#[allow(clippy::wrong_self_convention)]
impl Expectation {
    pub(crate) fn new(element: Element) -> Self {
        Self {
            element,
            timeout: DEFAULT_ASSERTION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            negate: false,
        }
    }

    /// Sets a custom timeout for this assertion.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom poll interval for this assertion.
    ///
    /// Default is 100ms.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Poll `observe` until its verdict (after negation) is true.
    ///
    /// `observe` returns the verdict and a short description of what it saw.
    async fn poll<F, Fut>(&self, expectation: &str, observe: F) -> Result<()>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<(bool, String)>>,
    {
        let start = Instant::now();

        loop {
            let (verdict, observed) = observe().await?;
            if verdict != self.negate {
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                let not = if self.negate { "NOT " } else { "" };
                return Err(Error::AssertionTimeout(format!(
                    "Expected element '{}' {}{}, but {} after {:?}",
                    self.element.locator(),
                    not,
                    expectation,
                    observed,
                    self.timeout
                )));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Asserts that the element can be found.
    pub async fn to_be_present(self) -> Result<()> {
        let element = &self.element;
        self.poll("to be present", move || async move {
            let present = element.exists().await?;
            Ok((present, format!("present={present}")))
        })
        .await
    }

    /// Asserts that the element is displayed.
    pub async fn to_be_visible(self) -> Result<()> {
        let element = &self.element;
        self.poll("to be visible", move || async move {
            let visible = element.is_displayed().await?;
            Ok((visible, format!("visible={visible}")))
        })
        .await
    }

    /// Asserts that the element is absent or not displayed.
    pub async fn to_be_hidden(self) -> Result<()> {
        self.not().to_be_visible().await
    }

    /// Asserts that the element carries the `disabled` attribute.
    pub async fn to_be_disabled(self) -> Result<()> {
        let element = &self.element;
        self.poll("to be disabled", move || async move {
            let disabled = element.is_disabled().await?;
            Ok((disabled, format!("disabled={disabled}")))
        })
        .await
    }

    /// Asserts that the element's text content equals `expected` (trimmed).
    pub async fn to_have_text(self, expected: &str) -> Result<()> {
        let expected = expected.trim();
        let description = format!("to have text '{expected}'");
        let element = &self.element;
        self.poll(&description, move || async move {
            let actual = text_content(element).await?;
            Ok((actual == expected, format!("had '{actual}'")))
        })
        .await
    }

    /// Asserts that the element's text content contains `expected`.
    pub async fn to_contain_text(self, expected: &str) -> Result<()> {
        let description = format!("to contain text '{expected}'");
        let element = &self.element;
        self.poll(&description, move || async move {
            let actual = text_content(element).await?;
            Ok((actual.contains(expected), format!("had '{actual}'")))
        })
        .await
    }

    /// Asserts that the element's `value` equals `expected`.
    pub async fn to_have_value(self, expected: &str) -> Result<()> {
        let description = format!("to have value '{expected}'");
        let element = &self.element;
        self.poll(&description, move || async move {
            let actual = element.property("value").await?;
            Ok((actual == expected, format!("had '{actual}'")))
        })
        .await
    }

    /// Asserts that attribute `name` equals `expected`.
    pub async fn to_have_attribute(self, name: &str, expected: &str) -> Result<()> {
        let description = format!("to have {name}='{expected}'");
        let element = &self.element;
        self.poll(&description, move || async move {
            let actual = element.attribute(name).await?;
            Ok((actual == expected, format!("had {name}='{actual}'")))
        })
        .await
    }
}

async fn text_content(element: &Element) -> Result<String> {
    Ok(text::clean(&element.property("textContent").await?))
}
