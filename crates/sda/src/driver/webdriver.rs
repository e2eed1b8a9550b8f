// WebDriver backend - `Driver` over a W3C WebDriver session
//
// Wraps a fantoccini `Client`. Elements found through the session are kept
// in a registry keyed by their W3C element id so that later calls can refer
// to them by `NodeId`. The registry is emptied on every `goto`.

use super::{Driver, NodeId, Rect};
use crate::config::{Browser, Settings};
use crate::error::{Error, Result};
use async_trait::async_trait;
use fantoccini::elements::Element as WdElement;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::{Client, ClientBuilder, Locator};
use parking_lot::Mutex;
use serde_json::{Map, Value, json};
use std::collections::HashMap;

/// Key of the element reference object in the W3C wire format
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// A live WebDriver session.
///
/// # Example
///
/// ```ignore
/// use sda::{Settings, WebDriverSession};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> sda::Result<()> {
///     let settings = Settings::from_env()?;
///     let session = Arc::new(WebDriverSession::connect(&settings).await?);
///     session.goto("https://example.com/").await?;
///     session.close().await
/// }
/// ```
///
/// Node ids handed out before a `goto` are forgotten by it and report
/// [`Error::StaleElement`] afterwards. Navigation triggered from the page
/// itself (a clicked link, a submitted form) does not reset the registry.
pub struct WebDriverSession {
    client: Client,
    elements: Registry<WdElement>,
}

/// Elements seen by the session, by node id
struct Registry<E> {
    nodes: Mutex<HashMap<NodeId, E>>,
}

impl<E: Clone> Registry<E> {
    fn new() -> Self {
        Self {
            nodes: Mutex::new(HashMap::new()),
        }
    }

    fn insert(&self, node: NodeId, element: E) {
        self.nodes.lock().insert(node, element);
    }

    fn get(&self, node: &NodeId) -> Result<E> {
        self.nodes
            .lock()
            .get(node)
            .cloned()
            .ok_or_else(|| Error::StaleElement(format!("unknown node {node}")))
    }

    fn clear(&self) {
        self.nodes.lock().clear();
    }

    fn len(&self) -> usize {
        self.nodes.lock().len()
    }
}

impl WebDriverSession {
    /// Open a session at `settings.webdriver_url`.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let url = settings.webdriver_url.clone();
        tracing::debug!(
            "Connecting to WebDriver at {} ({:?}, headless={})",
            url,
            settings.browser,
            settings.headless
        );

        let client = ClientBuilder::native()
            .capabilities(capabilities(settings.browser, settings.headless))
            .connect(&url)
            .await
            .map_err(|e| Error::ConnectionFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self::from_client(client))
    }

    /// Wrap an already connected fantoccini client.
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            elements: Registry::new(),
        }
    }

    /// The underlying fantoccini client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// End the WebDriver session.
    pub async fn close(&self) -> Result<()> {
        self.elements.clear();
        self.client.clone().close().await.map_err(map_error)
    }

    /// Register found elements, returning their node ids in document order
    fn register(&self, found: Vec<WdElement>) -> Result<Vec<NodeId>> {
        found
            .into_iter()
            .map(|element| {
                let node = element_id(&element)?;
                self.elements.insert(node.clone(), element);
                Ok(node)
            })
            .collect()
    }

    fn element(&self, node: &NodeId) -> Result<WdElement> {
        self.elements.get(node)
    }
}

fn capabilities(browser: Browser, headless: bool) -> Map<String, Value> {
    let mut caps = Map::new();
    match browser {
        Browser::Firefox => {
            caps.insert("browserName".to_string(), json!("firefox"));
            if headless {
                caps.insert(
                    "moz:firefoxOptions".to_string(),
                    json!({ "args": ["-headless"] }),
                );
            }
        }
        Browser::Chrome => {
            caps.insert("browserName".to_string(), json!("chrome"));
            if headless {
                caps.insert(
                    "goog:chromeOptions".to_string(),
                    json!({ "args": ["--headless=new", "--no-sandbox"] }),
                );
            }
        }
    }
    caps
}

/// W3C element id, read from the element's wire representation
fn element_id(element: &WdElement) -> Result<NodeId> {
    let wire = serde_json::to_value(element)?;
    wire.get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(NodeId::from)
        .ok_or_else(|| Error::Driver(format!("element reference without id: {wire}")))
}

fn map_error(err: CmdError) -> Error {
    let status = match &err {
        CmdError::Standard(wd) => Some((&wd.error, wd.message.to_string())),
        _ => None,
    };

    match status {
        Some((ErrorStatus::InvalidSelector, message)) => Error::InvalidSelector(message),
        Some((ErrorStatus::ElementNotInteractable, message))
        | Some((ErrorStatus::ElementClickIntercepted, message)) => Error::NotInteractable(message),
        Some((ErrorStatus::StaleElementReference, message)) => Error::StaleElement(message),
        Some((ErrorStatus::NoSuchElement, message)) => Error::ElementNotFound(message),
        _ => Error::Driver(err.to_string()),
    }
}

#[async_trait]
impl Driver for WebDriverSession {
    async fn goto(&self, url: &str) -> Result<()> {
        let forgotten = self.elements.len();
        self.elements.clear();
        tracing::debug!("goto {} (forgot {} elements)", url, forgotten);
        self.client.goto(url).await.map_err(map_error)
    }

    async fn current_url(&self) -> Result<String> {
        let url = self.client.current_url().await.map_err(map_error)?;
        Ok(url.to_string())
    }

    async fn title(&self) -> Result<String> {
        self.client.title().await.map_err(map_error)
    }

    async fn find_elements(&self, xpath: &str) -> Result<Vec<NodeId>> {
        tracing::debug!("find_elements: {}", xpath);
        let found = self
            .client
            .find_all(Locator::XPath(xpath))
            .await
            .map_err(map_error)?;
        self.register(found)
    }

    async fn find_elements_from(&self, parent: &NodeId, xpath: &str) -> Result<Vec<NodeId>> {
        tracing::debug!("find_elements_from {}: {}", parent, xpath);
        let found = self
            .element(parent)?
            .find_all(Locator::XPath(xpath))
            .await
            .map_err(map_error)?;
        self.register(found)
    }

    async fn click(&self, node: &NodeId) -> Result<()> {
        self.element(node)?.click().await.map_err(map_error)
    }

    async fn clear(&self, node: &NodeId) -> Result<()> {
        self.element(node)?.clear().await.map_err(map_error)
    }

    async fn send_keys(&self, node: &NodeId, text: &str) -> Result<()> {
        self.element(node)?.send_keys(text).await.map_err(map_error)
    }

    async fn attribute(&self, node: &NodeId, name: &str) -> Result<Option<String>> {
        self.element(node)?.attr(name).await.map_err(map_error)
    }

    async fn property(&self, node: &NodeId, name: &str) -> Result<Option<String>> {
        self.element(node)?.prop(name).await.map_err(map_error)
    }

    async fn tag_name(&self, node: &NodeId) -> Result<String> {
        let tag = self.element(node)?.tag_name().await.map_err(map_error)?;
        Ok(tag.to_ascii_lowercase())
    }

    async fn text(&self, node: &NodeId) -> Result<String> {
        self.element(node)?.text().await.map_err(map_error)
    }

    async fn is_selected(&self, node: &NodeId) -> Result<bool> {
        self.element(node)?.is_selected().await.map_err(map_error)
    }

    async fn is_displayed(&self, node: &NodeId) -> Result<bool> {
        self.element(node)?.is_displayed().await.map_err(map_error)
    }

    async fn rect(&self, node: &NodeId) -> Result<Rect> {
        let (x, y, width, height) = self.element(node)?.rectangle().await.map_err(map_error)?;
        Ok(Rect {
            x,
            y,
            width,
            height,
        })
    }

    async fn execute(&self, script: &str) -> Result<Value> {
        self.client.execute(script, vec![]).await.map_err(map_error)
    }

    async fn execute_on(&self, script: &str, node: &NodeId) -> Result<Value> {
        let argument = serde_json::to_value(self.element(node)?)?;
        self.client
            .execute(script, vec![argument])
            .await
            .map_err(map_error)
    }
}
