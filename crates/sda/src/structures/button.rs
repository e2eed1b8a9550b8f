// Buttons, links, plain text and images

use super::wrapper;
use crate::capabilities::{Clickable, TextBearing};
use crate::error::Result;

wrapper! {
    /// `<button>` or anything else that is clicked and labelled.
    ///
    /// ```ignore
    /// let save = page.button(Locator::xpath(r#"//button[@data-qa-id="save"]"#));
    /// if !save.is_disabled().await? {
    ///     save.click().await?;
    /// }
    /// ```
    Button
}

impl Clickable for Button {}
impl TextBearing for Button {}

wrapper! {
    /// `<a href>`
    Link
}

impl Clickable for Link {}
impl TextBearing for Link {}

impl Link {
    /// Link target as written in the markup
    pub async fn href(&self) -> Result<String> {
        self.attribute("href").await
    }
}

wrapper! {
    /// Block of text (`<p>`, `<span>`, headings)
    Text
}

impl TextBearing for Text {}

wrapper! {
    /// Generic container
    Div
}

impl Clickable for Div {}
impl TextBearing for Div {}

wrapper! {
    /// `<img>`
    Image
}

impl Clickable for Image {}

impl Image {
    pub async fn src(&self) -> Result<String> {
        self.attribute("src").await
    }

    pub async fn alt(&self) -> Result<String> {
        self.attribute("alt").await
    }
}
