// Driver - the seam between page objects and the browser
//
// Page objects never talk to a browser directly. They go through `Driver`,
// which exposes the handful of WebDriver primitives the wrappers need:
// XPath lookups, element interactions, script execution and navigation.
//
// Nodes are referred to by opaque `NodeId`s handed out by the driver.

#[cfg(feature = "webdriver")]
pub mod webdriver;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Opaque driver-side reference to a DOM node.
///
/// Cheap to clone; the WebDriver backend uses the W3C element id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Arc<str>);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(Arc::from(id))
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(Arc::from(id))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element position and size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Browser primitives used by page objects.
///
/// Implementations must map driver failures onto the crate's
/// [`Error`](crate::Error) variants: a rejected selector is
/// `InvalidSelector`, a node that cannot take input is `NotInteractable`,
/// and a handle whose node left the DOM is `StaleElement`.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate the current window to `url`
    async fn goto(&self, url: &str) -> Result<()>;

    /// URL of the current document
    async fn current_url(&self) -> Result<String>;

    /// Title of the current document
    async fn title(&self) -> Result<String>;

    /// All nodes matching `xpath`, evaluated against the document
    async fn find_elements(&self, xpath: &str) -> Result<Vec<NodeId>>;

    /// All nodes matching `xpath`, evaluated with `parent` as context node
    async fn find_elements_from(&self, parent: &NodeId, xpath: &str) -> Result<Vec<NodeId>>;

    async fn click(&self, node: &NodeId) -> Result<()>;

    async fn clear(&self, node: &NodeId) -> Result<()>;

    async fn send_keys(&self, node: &NodeId, text: &str) -> Result<()>;

    /// Content attribute as written in the markup
    async fn attribute(&self, node: &NodeId, name: &str) -> Result<Option<String>>;

    /// DOM property (e.g. `value`, `textContent`, `outerHTML`)
    async fn property(&self, node: &NodeId, name: &str) -> Result<Option<String>>;

    /// Lower-case element name
    async fn tag_name(&self, node: &NodeId) -> Result<String>;

    /// Rendered (visible) text
    async fn text(&self, node: &NodeId) -> Result<String>;

    async fn is_selected(&self, node: &NodeId) -> Result<bool>;

    async fn is_displayed(&self, node: &NodeId) -> Result<bool>;

    async fn rect(&self, node: &NodeId) -> Result<Rect>;

    /// Run `script` in the page and return its JSON result
    async fn execute(&self, script: &str) -> Result<Value>;

    /// Run `script` with `node` bound to `arguments[0]`
    async fn execute_on(&self, script: &str, node: &NodeId) -> Result<Value>;
}
