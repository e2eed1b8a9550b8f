// Capabilities - behaviour structures opt into
//
// Each structure is a newtype over `Element`. It exposes that element through
// `AsElement` and picks the capability traits that make sense for it; the
// traits carry all behaviour as provided methods.

use crate::element::Element;
use crate::error::Result;
use crate::locator::Locator;
use crate::select_option::SelectOption;
use crate::text;
use async_trait::async_trait;

const HOVER_SCRIPT: &str = "arguments[0].dispatchEvent(new MouseEvent('mouseover', {bubbles: true, cancelable: true, view: window}));";

/// Access to the wrapped element
pub trait AsElement: Send + Sync {
    fn element(&self) -> &Element;
}

impl AsElement for Element {
    fn element(&self) -> &Element {
        self
    }
}

/// Click and hover.
#[async_trait]
pub trait Clickable: AsElement {
    /// Click the element.
    ///
    /// When the driver reports the element as not interactable, the window is
    /// scrolled to it and the click retried once. Returns `false` when the
    /// element is absent or refused both clicks.
    async fn click(&self) -> Result<bool> {
        click_element(self.element()).await
    }

    /// Move the pointer over the element (dispatches `mouseover`).
    async fn hover(&self) -> Result<()> {
        let element = self.element();
        if let Some(node) = element.resolve().await? {
            element.driver().execute_on(HOVER_SCRIPT, &node).await?;
        }
        Ok(())
    }
}

pub(crate) async fn click_element(element: &Element) -> Result<bool> {
    let Some(node) = element.resolve().await? else {
        return Ok(false);
    };

    match element.driver().click(&node).await {
        Ok(()) => return Ok(true),
        Err(e) if e.is_not_interactable() => {
            tracing::debug!("Click refused on {}, scrolling: {}", element.locator(), e);
        }
        Err(e) => return Err(e),
    }

    element.scroll_to().await?;
    match element.driver().click(&node).await {
        Ok(()) => Ok(true),
        Err(e) if e.is_not_interactable() => {
            tracing::warn!("Click refused twice on {}: {}", element.locator(), e);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Typing into form controls.
#[async_trait]
pub trait Input: AsElement {
    /// Send `text` to the element, clearing it first when `clear` is set.
    ///
    /// Returns `false` when the element is absent.
    async fn input(&self, text: &str, clear: bool) -> Result<bool> {
        let element = self.element();
        let Some(node) = element.resolve().await? else {
            return Ok(false);
        };

        if clear {
            element.driver().clear(&node).await?;
        }
        element.driver().send_keys(&node, text).await?;
        Ok(true)
    }

    /// Current value of the control
    async fn value(&self) -> Result<String> {
        self.element().property("value").await
    }
}

/// Text content accessors. All results are ASCII-folded and trimmed.
#[async_trait]
pub trait TextBearing: AsElement {
    /// `textContent`, including text hidden by CSS
    async fn text(&self) -> Result<String> {
        Ok(text::clean(&self.element().property("textContent").await?))
    }

    /// Text as rendered by the browser
    async fn visible_text(&self) -> Result<String> {
        let element = self.element();
        match element.resolve().await? {
            Some(node) => Ok(text::clean(&element.driver().text(&node).await?)),
            None => Ok(String::new()),
        }
    }

    /// Rendered text, falling back to `textContent` when nothing is rendered.
    async fn rendered_text(&self) -> Result<String> {
        let visible = self.visible_text().await?;
        if visible.is_empty() {
            return self.text().await;
        }
        Ok(visible)
    }
}

/// Checkbox-like selection state toggled by clicking.
#[async_trait]
pub trait Selective: Clickable {
    async fn selected(&self) -> Result<bool> {
        let element = self.element();
        match element.resolve().await? {
            Some(node) => element.driver().is_selected(&node).await,
            None => Ok(false),
        }
    }

    /// Click when not selected.
    async fn select(&self) -> Result<()> {
        if !self.selected().await? {
            self.click().await?;
        }
        Ok(())
    }

    /// Click when selected.
    async fn deselect(&self) -> Result<()> {
        if self.selected().await? {
            self.click().await?;
        }
        Ok(())
    }
}

/// One `<option>` of a `<select>`
struct OptionNode {
    element: Element,
    label: String,
    value: String,
    selected: bool,
}

/// `<select>` handling. Every operation is a no-op (`false` / empty) when
/// the element is absent or is not a `select`.
#[async_trait]
pub trait SelectField: AsElement {
    /// Labels of all options, in document order
    async fn options(&self) -> Result<Vec<String>> {
        Ok(option_nodes(self.element())
            .await?
            .into_iter()
            .map(|option| option.label)
            .collect())
    }

    /// Labels of the selected options
    async fn selected_options(&self) -> Result<Vec<String>> {
        Ok(option_nodes(self.element())
            .await?
            .into_iter()
            .filter(|option| option.selected)
            .map(|option| option.label)
            .collect())
    }

    /// Label of the first selected option
    async fn selected_first(&self) -> Result<Option<String>> {
        Ok(self.selected_options().await?.into_iter().next())
    }

    /// True when the select accepts several options
    async fn is_multiple(&self) -> Result<bool> {
        let multiple = self.element().attribute("multiple").await?;
        Ok(self.element().has_attribute("multiple").await? && multiple != "false")
    }

    /// Select the option(s) addressed by `option`.
    ///
    /// A multiple select gets every match; a single select the first one.
    /// Returns `false` when nothing matches.
    async fn select_option(&self, option: SelectOption) -> Result<bool> {
        let options = option_nodes(self.element()).await?;
        let multiple = self.is_multiple().await?;
        let mut matched = false;

        for (index, node) in options.iter().enumerate() {
            if !option.matches(&node.value, &node.label, index) {
                continue;
            }
            matched = true;
            if !node.selected {
                click_element(&node.element).await?;
            }
            if !multiple {
                break;
            }
        }

        if !matched {
            tracing::debug!("No option with {} in {}", option, self.element().locator());
        }
        Ok(matched)
    }

    /// Deselect the option(s) addressed by `option`. Multiple selects only.
    async fn deselect_option(&self, option: SelectOption) -> Result<bool> {
        if !self.is_multiple().await? {
            return Ok(false);
        }

        let mut matched = false;
        for (index, node) in option_nodes(self.element()).await?.iter().enumerate() {
            if option.matches(&node.value, &node.label, index) {
                matched = true;
                if node.selected {
                    click_element(&node.element).await?;
                }
            }
        }
        Ok(matched)
    }

    /// Clear every selected option. Multiple selects only.
    async fn deselect_all(&self) -> Result<bool> {
        if !self.is_multiple().await? {
            return Ok(false);
        }

        for node in option_nodes(self.element()).await? {
            if node.selected {
                click_element(&node.element).await?;
            }
        }
        Ok(true)
    }

    /// Select by visible label, then by value.
    async fn choose(&self, option: &str) -> Result<bool> {
        if self.select_option(SelectOption::Label(option.to_string())).await? {
            return Ok(true);
        }
        self.select_option(SelectOption::Value(option.to_string())).await
    }

    /// Deselect by visible label, then by value.
    async fn unchoose(&self, option: &str) -> Result<bool> {
        if self.deselect_option(SelectOption::Label(option.to_string())).await? {
            return Ok(true);
        }
        self.deselect_option(SelectOption::Value(option.to_string())).await
    }

    async fn choose_index(&self, index: usize) -> Result<bool> {
        self.select_option(SelectOption::Index(index)).await
    }
}

async fn option_nodes(select: &Element) -> Result<Vec<OptionNode>> {
    let Some(handle) = select.handle().await? else {
        return Ok(Vec::new());
    };
    let select = select.with_locator(Locator::element(handle));
    if select.tag_name().await? != "select" {
        return Ok(Vec::new());
    }

    let driver = select.driver();
    let mut options = Vec::new();
    for element in select.find_all(Locator::xpath("//option")).await? {
        let Some(node) = element.resolve().await? else {
            continue;
        };
        options.push(OptionNode {
            label: text::clean(&driver.text(&node).await?),
            value: driver.attribute(&node, "value").await?.unwrap_or_default(),
            selected: driver.is_selected(&node).await?,
            element,
        });
    }
    Ok(options)
}

/// Elements that open and close a container (menus, result lists).
#[async_trait]
pub trait Expandable: Clickable {
    /// The element shown while expanded
    fn container(&self) -> &Element;

    /// Click the element when the container is hidden.
    async fn expand(&self) -> Result<()> {
        if self.element().exists().await? && !self.container().is_displayed().await? {
            self.click().await?;
        }
        Ok(())
    }

    /// Close the container: text inputs lose focus, anything else is clicked.
    async fn collapse(&self) -> Result<()> {
        if !self.container().is_displayed().await? {
            return Ok(());
        }

        let element = self.element();
        let tag = element.tag_name().await?;
        let text_input = tag == "textarea"
            || (tag == "input" && matches!(element.attribute("type").await?.as_str(), "" | "text"));

        if text_input {
            element.blur().await
        } else {
            self.click().await.map(|_| ())
        }
    }
}
