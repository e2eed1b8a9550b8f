// Site - the whole website behind one driver

use crate::driver::Driver;
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use url::Url;

/// Host-like URL without a scheme, e.g. `www.example.com/path?q=1`
static RE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<protocol>[a-zA-Z]+)://)?(?P<base_url>[\w.-]+\.\w{2,6})(?P<current_url>[/\w\-.?=&%]*)$")
        .expect("URL pattern compiles")
});

/// A website reached through one driver.
#[derive(Clone)]
pub struct Site {
    driver: Arc<dyn Driver>,
}

impl Site {
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// Host of the current URL, or `""` when it has none.
    pub async fn base_url(&self) -> Result<String> {
        let current = self.driver.current_url().await?;
        Ok(base_url_of(&current))
    }

    /// Navigate to `target`.
    ///
    /// Absolute URLs are opened as given; anything else is resolved against
    /// the current URL.
    pub async fn goto(&self, target: &str) -> Result<()> {
        let url = match Url::parse(target) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let current = self.driver.current_url().await?;
                let base = Url::parse(&current)
                    .map_err(|e| Error::InvalidArgument(format!("current URL '{current}': {e}")))?;
                base.join(target)
                    .map_err(|e| Error::InvalidArgument(format!("'{target}': {e}")))?
            }
            Err(e) => return Err(Error::InvalidArgument(format!("'{target}': {e}"))),
        };

        tracing::debug!("Navigating to {}", url);
        self.driver.goto(url.as_str()).await
    }
}

fn base_url_of(current: &str) -> String {
    if let Ok(url) = Url::parse(current)
        && let Some(host) = url.host_str()
    {
        return host.to_string();
    }

    RE_URL
        .captures(current)
        .and_then(|captures| captures.name("base_url"))
        .map(|host| host.as_str().to_string())
        .unwrap_or_default()
}
