// Form controls: text inputs, checkboxes, radios and selects

use super::wrapper;
use crate::capabilities::{Clickable, Input, SelectField, Selective, TextBearing};
use crate::error::Result;
use crate::locator::{Locator, literal};
use crate::text;

wrapper! {
    /// `<input type="text">`, `<textarea>` and friends
    InputText
}

impl Clickable for InputText {}
impl Input for InputText {}

wrapper! {
    /// `<input type="checkbox">`
    InputCheckbox
}

impl Clickable for InputCheckbox {}
impl Selective for InputCheckbox {}

impl InputCheckbox {
    /// Text of the `<label for=...>` pointing at this input, or `""`.
    pub async fn label(&self) -> Result<String> {
        label_for(self).await
    }
}

wrapper! {
    /// `<input type="radio">`
    InputRadio
}

impl Clickable for InputRadio {}
impl Selective for InputRadio {}

impl InputRadio {
    /// Text of the `<label for=...>` pointing at this input, or `""`.
    pub async fn label(&self) -> Result<String> {
        label_for(self).await
    }
}

async fn label_for(input: &crate::element::Element) -> Result<String> {
    let id = input.id().await?;
    if id.is_empty() {
        return Ok(String::new());
    }

    let label = input.with_locator(Locator::xpath(format!("//label[@for={}]", literal(&id))));
    Ok(text::clean(&label.property("textContent").await?))
}

wrapper! {
    /// `<select>`
    ///
    /// ```ignore
    /// let country = page.select(Locator::name("country"));
    /// country.choose("Canada").await?;
    /// assert_eq!(country.selected_first().await?.as_deref(), Some("Canada"));
    /// ```
    Select
}

impl Clickable for Select {}
impl SelectField for Select {}
impl TextBearing for Select {}
