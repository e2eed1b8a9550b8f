// Settings - identifier attribute, keywords, waits and WebDriver endpoint
//
// Defaults match the conventions page objects are written against: testable
// nodes carry a `data-qa-id` attribute, structures find their helper buttons
// by keyword (`submit`, `cancel`, ...) inside that attribute, and waits give
// up after 30 seconds.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default identifier attribute
pub const DEFAULT_IDENTIFIER: &str = "data-qa-id";

/// Default bounded wait for `wait_until_present`
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default poll interval for waits
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Default WebDriver endpoint (geckodriver's default port)
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Browser requested from the WebDriver endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Firefox,
    Chrome,
}

impl std::str::FromStr for Browser {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "firefox" => Ok(Browser::Firefox),
            "chrome" | "chromium" => Ok(Browser::Chrome),
            other => Err(Error::Config(format!("unsupported browser '{other}'"))),
        }
    }
}

/// Keywords structures look for inside the identifier attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keywords {
    pub ascending: String,
    pub cancel: String,
    pub clear: String,
    pub close: String,
    pub descending: String,
    pub select_all: String,
    pub submit: String,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            ascending: "asc".to_string(),
            cancel: "cancel".to_string(),
            clear: "clear".to_string(),
            close: "close".to_string(),
            descending: "desc".to_string(),
            select_all: "select-all".to_string(),
            submit: "submit".to_string(),
        }
    }
}

/// Settings shared by every element built from the same page.
///
/// All fields have defaults; a JSON settings file only needs the fields it
/// overrides. Durations are written in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Attribute that marks testable nodes
    pub identifier: String,
    pub keywords: Keywords,
    /// Bounded wait used by `wait_until_present`
    #[serde(with = "millis", rename = "wait_timeout_ms")]
    pub wait_timeout: Duration,
    #[serde(with = "millis", rename = "poll_interval_ms")]
    pub poll_interval: Duration,
    pub webdriver_url: String,
    pub browser: Browser,
    pub headless: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            identifier: DEFAULT_IDENTIFIER.to_string(),
            keywords: Keywords::default(),
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            browser: Browser::default(),
            headless: true,
        }
    }
}

impl Settings {
    /// Create a new builder for Settings
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Defaults overridden by environment variables:
    ///
    /// - `SDA_IDENTIFIER`
    /// - `SDA_WAIT_TIMEOUT_MS`
    /// - `SDA_POLL_INTERVAL_MS`
    /// - `WEBDRIVER_URL`
    /// - `SDA_BROWSER` (`firefox` | `chrome`)
    /// - `SDA_HEADLESS` (`0`/`false` to show the browser)
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load a JSON settings file, then apply environment overrides.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::from(e).context(format!("reading {}", path.display())))?;
        let settings: Settings = serde_json::from_str(&text)?;
        settings.with_env_overrides(|key| std::env::var(key).ok())
    }

    fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(identifier) = var("SDA_IDENTIFIER") {
            self.identifier = identifier;
        }
        if let Some(ms) = var("SDA_WAIT_TIMEOUT_MS") {
            self.wait_timeout = parse_millis("SDA_WAIT_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = var("SDA_POLL_INTERVAL_MS") {
            self.poll_interval = parse_millis("SDA_POLL_INTERVAL_MS", &ms)?;
        }
        if let Some(url) = var("WEBDRIVER_URL") {
            self.webdriver_url = url;
        }
        if let Some(browser) = var("SDA_BROWSER") {
            self.browser = browser.parse()?;
        }
        if let Some(headless) = var("SDA_HEADLESS") {
            self.headless = !matches!(headless.as_str(), "0" | "false" | "no");
        }
        Ok(self)
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| Error::Config(format!("{key}={value:?}: {e}")))
}

/// Builder for Settings
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    identifier: Option<String>,
    keywords: Option<Keywords>,
    wait_timeout: Option<Duration>,
    poll_interval: Option<Duration>,
    webdriver_url: Option<String>,
    browser: Option<Browser>,
    headless: Option<bool>,
}

impl SettingsBuilder {
    /// Attribute that marks testable nodes
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// Set the bounded wait
    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = Some(timeout);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = Some(url.into());
        self
    }

    pub fn browser(mut self, browser: Browser) -> Self {
        self.browser = Some(browser);
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = Some(headless);
        self
    }

    /// Build the Settings
    pub fn build(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            identifier: self.identifier.unwrap_or(defaults.identifier),
            keywords: self.keywords.unwrap_or(defaults.keywords),
            wait_timeout: self.wait_timeout.unwrap_or(defaults.wait_timeout),
            poll_interval: self.poll_interval.unwrap_or(defaults.poll_interval),
            webdriver_url: self.webdriver_url.unwrap_or(defaults.webdriver_url),
            browser: self.browser.unwrap_or(defaults.browser),
            headless: self.headless.unwrap_or(defaults.headless),
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
