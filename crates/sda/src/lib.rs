//! sda: page objects over a WebDriver session
//!
//! Test authors tag the nodes they care about with a data attribute
//! (`data-qa-id` by default) and describe pages with typed structures:
//! buttons, forms, lists, tables, dropdowns. Every lookup is done with one
//! XPath expression; locators written with any WebDriver strategy (id, CSS
//! selector, link text, ...) are normalized into XPath fragments that can be
//! joined to express nesting.
//!
//! # Examples
//!
//! ## Locator normalization
//!
//! ```ignore
//! use sda::{join, By, Locator};
//!
//! let id = Locator::id("foo").normalize();
//! assert_eq!(id.by(), &By::XPath);
//! assert_eq!(id.path(), Some(r#"/descendant-or-self::*[@id="foo"]"#));
//!
//! let nested = join([Locator::id("a"), Locator::tag_name("b")]);
//! assert_eq!(
//!     nested.path(),
//!     Some(r#"/descendant-or-self::*[@id="a"]/descendant-or-self::b"#)
//! );
//!
//! // Unknown strategies and untranslatable CSS normalize to nothing
//! assert_eq!(Locator::new("bogus_strategy", "x").expression(), "");
//! assert_eq!(Locator::css("###invalid").expression(), "");
//! ```
//!
//! ## A page object
//!
//! ```ignore
//! use sda::{Clickable, Locator, Page, Settings, WebDriverSession};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> sda::Result<()> {
//!     let settings = Settings::from_env()?;
//!     let session = Arc::new(WebDriverSession::connect(&settings).await?);
//!     let page = Page::new(session.clone(), Arc::new(settings));
//!
//!     sda::Site::new(session.clone()).goto("https://example.com/login").await?;
//!
//!     let login = page.form(Locator::xpath(r#"//form[@data-qa-id="login"]"#));
//!     login.set("username", "jlane").await?;
//!     login.set("password", "secret").await?;
//!     login.submit().await?;
//!
//!     page.button(Locator::css("nav .logout")).click().await?;
//!     session.close().await
//! }
//! ```
//!
//! # Logging
//!
//! Lookups, normalization misses and click retries are reported through
//! `tracing`; install a subscriber (e.g. `tracing-subscriber` with
//! `RUST_LOG=sda=debug`) to see them.

mod assertions;
pub mod capabilities;
pub mod config;
pub mod driver;
mod element;
mod error;
pub mod locator;
mod page;
mod select_option;
mod site;
pub mod structures;
pub mod text;

/// Default attribute that marks testable nodes
pub use config::DEFAULT_IDENTIFIER;

/// Default bound for `wait_until_present`, in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = config::DEFAULT_WAIT_TIMEOUT.as_millis() as u64;

pub use error::{Error, Result};

pub use assertions::{Expectation, expect};

pub use config::{Browser, Keywords, Settings, SettingsBuilder};

pub use driver::{Driver, NodeId, Rect};

#[cfg(feature = "webdriver")]
pub use driver::webdriver::WebDriverSession;

pub use locator::{By, ElementRef, Locator, LocatorSet, LocatorValue, join, join_values, normalize};

pub use element::Element;

pub use capabilities::{AsElement, Clickable, Expandable, Input, SelectField, Selective, TextBearing};

pub use select_option::SelectOption;

pub use structures::{
    Button, Div, Dropdown, DropdownForm, DropdownMenu, FieldValue, Form, Image, InputCheckbox,
    InputRadio, InputText, Link, List, Modal, Row, Search, SearchBox, Select, SortOrder, SortState,
    TabNavigation, Table, Text,
};

pub use page::Page;
pub use site::Site;
