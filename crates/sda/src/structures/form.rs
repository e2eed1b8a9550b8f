// Form - named fields addressed through the identifier attribute
//
// A field is the first descendant whose identifier attribute contains the
// field name, so `form.set("email", ...)` finds `data-qa-id="signup-email"`.
// Submit and cancel buttons are found the same way with the `submit` and
// `cancel` keywords.

use super::Button;
use crate::capabilities::{AsElement, Clickable, SelectField};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::select_option::SelectOption;
use crate::structures::Select;
use crate::text;
use std::fmt;
use std::ops::Deref;

/// Value assigned to a form field with [`Form::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl FieldValue {
    /// Truthiness for checkboxes, radios and click-to-set controls
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Bool(flag) => *flag,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        FieldValue::Bool(flag)
    }
}

/// `<form>` whose controls carry identifier attributes.
///
/// # Example
///
/// ```ignore
/// let login = page.form(Locator::xpath(r#"//form[@data-qa-id="login"]"#));
/// login.set("username", "jlane").await?;
/// login.set("remember-me", true).await?;
/// login.submit().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Form {
    element: Element,
    submit: Button,
    cancel: Button,
}

impl From<Element> for Form {
    fn from(element: Element) -> Self {
        let keywords = &element.settings().keywords;
        let submit = Button::from(element.keyword_child(&keywords.submit));
        let cancel = Button::from(element.keyword_child(&keywords.cancel));
        Self {
            element,
            submit,
            cancel,
        }
    }
}

impl AsElement for Form {
    fn element(&self) -> &Element {
        &self.element
    }
}

impl Deref for Form {
    type Target = Element;

    fn deref(&self) -> &Element {
        &self.element
    }
}

impl Form {
    /// Button found with the `submit` keyword
    pub fn submit_button(&self) -> &Button {
        &self.submit
    }

    /// Button found with the `cancel` keyword
    pub fn cancel_button(&self) -> &Button {
        &self.cancel
    }

    /// Unresolved lookup for the field called `name`
    pub fn field_locator(&self, name: &str) -> Element {
        self.element.keyword_child(name)
    }

    /// The first field whose identifier contains `name`.
    ///
    /// Fails with `ElementNotFound` when the form or the field is missing.
    pub async fn field(&self, name: &str) -> Result<Element> {
        if !self.element.exists().await? {
            return Err(Error::ElementNotFound(format!("form {}", self.element.locator())));
        }

        let candidates = self
            .element
            .find_all(self.element.contains_identifier("//*", name))
            .await?;
        candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::ElementNotFound(format!("form field '{name}'")))
    }

    /// All input, textarea, button and select controls carrying the
    /// identifier attribute.
    pub async fn fields(&self) -> Result<Vec<Element>> {
        let identifier = &self.element.settings().identifier;
        self.element
            .find_all(Locator::xpath(format!(
                "//*[@{identifier} and (self::input or self::textarea or self::button or self::select)]"
            )))
            .await
    }

    /// Current value of field `name`
    pub async fn get(&self, name: &str) -> Result<String> {
        self.field(name).await?.property("value").await
    }

    /// Assign `value` to field `name`, according to the control type:
    ///
    /// - `select`: option with that visible text
    /// - `input` button/reset/submit: click
    /// - `input` checkbox/radio: toggle until selected == truthiness
    /// - other `input`, `textarea`: clear and type
    /// - anything else: click when truthy
    pub async fn set(&self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        let field = self.field(name).await?;
        let node = field.require("form field").await?;
        let driver = field.driver().clone();
        let tag = field.tag_name().await?;

        tracing::debug!("Setting form field '{}' ({}) to {:?}", name, tag, value);

        match tag.as_str() {
            "select" => {
                let select = Select::from(field);
                let label = value.to_string();
                if !select.select_option(SelectOption::Label(label.clone())).await? {
                    return Err(Error::ElementNotFound(format!(
                        "option '{label}' in form field '{name}'"
                    )));
                }
            }
            "input" => {
                let kind = text::clean(&field.attribute("type").await?).to_ascii_lowercase();
                match kind.as_str() {
                    "button" | "reset" | "submit" => {
                        Button::from(field).click().await?;
                    }
                    "checkbox" | "radio" => {
                        if driver.is_selected(&node).await? != value.is_truthy() {
                            Button::from(field).click().await?;
                        }
                    }
                    _ => {
                        driver.clear(&node).await?;
                        driver.send_keys(&node, &value.to_string()).await?;
                    }
                }
            }
            "textarea" => {
                driver.clear(&node).await?;
                driver.send_keys(&node, &value.to_string()).await?;
            }
            _ => {
                if value.is_truthy() {
                    Button::from(field).click().await?;
                }
            }
        }
        Ok(())
    }

    /// Click the submit button. `false` when it is missing or refused.
    pub async fn submit(&self) -> Result<bool> {
        self.submit.click().await
    }

    /// Click the cancel button. `false` when it is missing or refused.
    pub async fn cancel(&self) -> Result<bool> {
        self.cancel.click().await
    }
}

/// A form shown as a dialog, with a `close` button.
#[derive(Debug, Clone)]
pub struct Modal {
    form: Form,
    close: Button,
}

impl From<Element> for Modal {
    fn from(element: Element) -> Self {
        let close = Button::from(element.keyword_child(&element.settings().keywords.close));
        Self {
            form: Form::from(element),
            close,
        }
    }
}

impl AsElement for Modal {
    fn element(&self) -> &Element {
        &self.form.element
    }
}

impl Deref for Modal {
    type Target = Form;

    fn deref(&self) -> &Form {
        &self.form
    }
}

impl Modal {
    pub fn close_button(&self) -> &Button {
        &self.close
    }

    /// Click the close button.
    pub async fn close(&self) -> Result<bool> {
        self.close.click().await
    }
}
