// Table - headers, tagged rows, sortable columns and select-all
//
// Rows come from the `<tbody>` and are grouped like a `List`. A column is
// sortable when its `<th>` holds indicators tagged with the `asc` / `desc`
// keywords; the visible indicator tells the current order.

use super::{Button, List, Row, wrapper};
use crate::capabilities::Clickable;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::locator::{Locator, literal};
use crate::text;
use std::fmt;

/// Sort order of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
    /// Sortable but currently unsorted
    None,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => f.write_str("asc"),
            SortOrder::Descending => f.write_str("desc"),
            SortOrder::None => f.write_str("none"),
        }
    }
}

/// The column a table is currently sorted by
#[derive(Debug, Clone)]
pub struct SortState {
    /// The sorted `<th>`
    pub header: Element,
    /// Identifier of the sorted `<th>`
    pub column: String,
    pub order: SortOrder,
}

/// Header clicks needed to visit every state of a three-state sort control
const SORT_CYCLE: usize = 3;

wrapper! {
    /// `<table>` with tagged headers and rows.
    ///
    /// ```ignore
    /// let orders = page.table(Locator::xpath(r#"//table[@data-qa-id="orders"]"#));
    /// orders.set_sort("total", SortOrder::Descending).await?;
    /// let top = orders.rows().await?.into_iter().next();
    /// ```
    Table
}

impl Table {
    /// Rows of the `<tbody>`
    pub fn body(&self) -> List {
        List::from(self.within(Locator::xpath("//tbody")))
    }

    /// Text of each tagged `<th>`
    pub async fn headers(&self) -> Result<Vec<String>> {
        let mut headers = Vec::new();
        for th in self.header_cells().await? {
            headers.push(text::clean(&th.property("textContent").await?));
        }
        Ok(headers)
    }

    async fn header_cells(&self) -> Result<Vec<Element>> {
        self.find_all(Locator::xpath(format!("//th[@{}]", self.settings().identifier)))
            .await
    }

    pub async fn rows(&self) -> Result<Vec<Row>> {
        self.body().rows().await
    }

    pub async fn row(&self, index: usize) -> Result<Option<Row>> {
        self.body().row(index).await
    }

    pub async fn len(&self) -> Result<usize> {
        self.body().len().await
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// XPath predicate matching the sort indicators inside a header
    fn indicator_predicate(&self) -> String {
        let settings = self.settings();
        format!(
            "(contains(@{id}, {asc}) or contains(@{id}, {desc}))",
            id = settings.identifier,
            asc = literal(&settings.keywords.ascending),
            desc = literal(&settings.keywords.descending),
        )
    }

    /// Order shown by an indicator's identifier, matched word by word
    fn order_of(&self, identifier: &str) -> SortOrder {
        let keywords = &self.settings().keywords;
        let mut order = SortOrder::None;
        for word in text::words(identifier) {
            if word == keywords.descending {
                order = SortOrder::Descending;
            } else if word == keywords.ascending {
                order = SortOrder::Ascending;
            }
        }
        order
    }

    /// The currently sorted column, if any indicator is showing.
    pub async fn sort(&self) -> Result<Option<SortState>> {
        let indicators = self
            .find_all(Locator::xpath(format!(
                "//th//*[{} and not(contains(concat(' ', normalize-space(@class), ' '), ' ng-hide '))]",
                self.indicator_predicate()
            )))
            .await?;

        let identifier = self.settings().identifier.clone();
        for indicator in indicators {
            if !indicator.is_displayed().await? {
                continue;
            }

            let order = self.order_of(&indicator.attribute(&identifier).await?);
            if order == SortOrder::None {
                continue;
            }

            let Some(header) = indicator
                .find_all(Locator::xpath("/ancestor::th"))
                .await?
                .into_iter()
                .next()
            else {
                continue;
            };

            let column = header.attribute(&identifier).await?;
            return Ok(Some(SortState {
                header,
                column,
                order,
            }));
        }
        Ok(None)
    }

    /// Identifiers of the sortable columns
    pub async fn sorts(&self) -> Result<Vec<String>> {
        let identifier = self.settings().identifier.clone();
        let sortable = self
            .find_all(Locator::xpath(format!(
                "//th[@{identifier} and .//*[{}]]",
                self.indicator_predicate()
            )))
            .await?;

        let mut columns = Vec::with_capacity(sortable.len());
        for th in sortable {
            columns.push(th.attribute(&identifier).await?);
        }
        Ok(columns)
    }

    /// Click the sort control of `column` until the table is sorted by it in
    /// `order`.
    ///
    /// Gives up after one full cycle of the control and returns `false`.
    /// Fails with `ElementNotFound` when no header matches `column`, and
    /// `InvalidArgument` when `order` is `SortOrder::None`.
    pub async fn set_sort(&self, column: &str, order: SortOrder) -> Result<bool> {
        if order == SortOrder::None {
            return Err(Error::InvalidArgument(
                "sort order must be ascending or descending".to_string(),
            ));
        }

        let headers = self
            .find_all(self.contains_identifier("//th", column))
            .await?;
        let Some(header) = headers.into_iter().next() else {
            return Err(Error::ElementNotFound(format!("table column '{column}'")));
        };
        let header_id = header.attribute(&self.settings().identifier).await?;

        let controls = header
            .find_all(Locator::xpath(
                "//*[self::button or self::a or self::input or @ng-click]",
            ))
            .await?;
        let control = Button::from(controls.into_iter().next().unwrap_or(header));

        for attempt in 0..=SORT_CYCLE {
            if let Some(state) = self.sort().await?
                && state.column == header_id
                && state.order == order
            {
                return Ok(true);
            }

            if attempt == SORT_CYCLE {
                break;
            }
            tracing::debug!("Sorting '{}' towards {} (click {})", column, order, attempt + 1);
            control.click().await?;
        }

        tracing::warn!("Column '{}' never reached {} order", column, order);
        Ok(false)
    }

    /// Click the select-all checkbox in the header.
    pub async fn select_all(&self) -> Result<bool> {
        if !self.exists().await? {
            return Err(Error::ElementNotFound(format!("table {}", self.locator())));
        }

        let keyword = self.settings().keywords.select_all.clone();
        let boxes = self
            .find_all(Locator::xpath(format!(
                "{}//input",
                self.contains_identifier("//th", &keyword)
                    .path()
                    .unwrap_or_default()
            )))
            .await?;

        match boxes.into_iter().next() {
            Some(checkbox) => Button::from(checkbox).click().await,
            None => Err(Error::ElementNotFound("select-all checkbox".to_string())),
        }
    }
}
