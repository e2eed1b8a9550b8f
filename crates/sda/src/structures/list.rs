// List - rows assembled from identifier suffixes
//
// Items inside a list are tagged `<anything>-<kind>[<index>]`, e.g.
// `users-name[0]`, `users-email[0]`, `users-name[1]`. Every tagged
// descendant is grouped into the row for its index under its kind.

use super::wrapper;
use crate::capabilities::Clickable;
use crate::element::Element;
use crate::error::Result;
use crate::locator::Locator;
use crate::text;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// `<list>-<kind>[<index>]`
static ROW_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\w+)\[(\d+)\]").expect("row pattern compiles"));

/// One list row: the tagged elements of that index, keyed by kind.
pub type Row = BTreeMap<String, Element>;

wrapper! {
    /// `<ul>`, `<ol>` or any container of tagged rows.
    ///
    /// ```ignore
    /// let users = page.list(Locator::xpath(r#"//ul[@data-qa-id="users"]"#));
    /// let first = users.row(0).await?.expect("at least one user");
    /// println!("{}", Text::from(first["name"].clone()).text().await?);
    /// users.click_where("jane", "edit").await?;
    /// ```
    List
}

impl Clickable for List {}

impl List {
    /// Unresolved lookup for every tagged descendant
    pub fn items(&self) -> Element {
        self.0
            .within(Locator::xpath(format!("//*[@{}]", self.settings().identifier)))
    }

    /// Rows in index order. Gaps in the indices are skipped.
    pub async fn rows(&self) -> Result<Vec<Row>> {
        let identifier = self.settings().identifier.clone();

        let mut rows: BTreeMap<usize, Row> = BTreeMap::new();
        for item in self
            .0
            .find_all(Locator::xpath(format!("//*[@{identifier}]")))
            .await?
        {
            let tag = item.attribute(&identifier).await?;
            let Some(captures) = ROW_PATTERN.captures(&tag) else {
                continue;
            };
            let Ok(index) = captures[2].parse::<usize>() else {
                continue;
            };
            rows.entry(index)
                .or_default()
                .insert(captures[1].to_string(), item);
        }

        Ok(rows.into_values().collect())
    }

    /// Number of rows
    pub async fn len(&self) -> Result<usize> {
        Ok(self.rows().await?.len())
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Row at position `index`, or `None` when out of range
    pub async fn row(&self, index: usize) -> Result<Option<Row>> {
        Ok(self.rows().await?.into_iter().nth(index))
    }

    /// Click the `kind` element of row `index`.
    ///
    /// Returns `false` when the row or the kind does not exist.
    pub async fn click_in_row(&self, index: usize, kind: &str) -> Result<bool> {
        match self.row(index).await?.and_then(|mut row| row.remove(kind)) {
            Some(target) => super::Button::from(target).click().await,
            None => Ok(false),
        }
    }

    /// Click the `kind` element of the first row where some element's text
    /// equals `value` (trimmed, case-insensitive).
    pub async fn click_where(&self, value: &str, kind: &str) -> Result<bool> {
        let wanted = value.trim().to_lowercase();

        for mut row in self.rows().await? {
            let mut found = false;
            for item in row.values() {
                let content = item.property("textContent").await?;
                if text::clean(&content).to_lowercase() == wanted {
                    found = true;
                    break;
                }
            }

            if found {
                return match row.remove(kind) {
                    Some(target) => super::Button::from(target).click().await,
                    None => Ok(false),
                };
            }
        }
        Ok(false)
    }
}
