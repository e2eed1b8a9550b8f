// Tab navigation - named links, one or more marked `active`

use super::{Button, wrapper};
use crate::capabilities::Clickable;
use crate::error::{Error, Result};
use crate::locator::Locator;

wrapper! {
    /// Navigation bar whose tabs carry identifier attributes.
    ///
    /// ```ignore
    /// let nav = page.tab_navigation(Locator::xpath(r#"//nav[@data-qa-id="main-nav"]"#));
    /// nav.select("reports").await?;
    /// assert_eq!(nav.selected().await?, vec!["main-nav-reports".to_string()]);
    /// ```
    TabNavigation
}

impl TabNavigation {
    /// Click the first tab whose identifier contains `name`, unless it is
    /// already active.
    pub async fn select(&self, name: &str) -> Result<bool> {
        if !self.exists().await? {
            return Err(Error::ElementNotFound(format!("navigation {}", self.locator())));
        }

        let tabs = self.find_all(self.contains_identifier("//*", name)).await?;
        let Some(tab) = tabs.into_iter().next() else {
            return Err(Error::ElementNotFound(format!("navigation item '{name}'")));
        };

        let classes = tab.class_name().await?;
        if classes.split_whitespace().any(|class| class == "active") {
            return Ok(true);
        }
        Button::from(tab).click().await
    }

    /// Identifiers of the active tabs
    pub async fn selected(&self) -> Result<Vec<String>> {
        let identifier = self.settings().identifier.clone();
        let active = self
            .find_all(Locator::xpath(format!(
                "//*[(self::a or self::input or self::button or self::li) and @{identifier} \
                 and contains(concat(' ', normalize-space(@class), ' '), ' active ')]"
            )))
            .await?;

        let mut names = Vec::with_capacity(active.len());
        for tab in active {
            names.push(tab.attribute(&identifier).await?);
        }
        Ok(names)
    }
}
