//! In-memory scripted driver shared by the integration tests.
//!
//! Tests register elements under a selector, then mutate them (or spawn a
//! task that does so after a delay) while a wait polls. Everything runs on
//! a paused tokio clock, so delays cost no real time.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use parking_lot::Mutex;
use serde_json::Value;
use webdriver_waits::{
    Alert, By, CdpDriver, ElementRef, Error, FrameRef, Locator, PageActions, Result, ScriptArg,
    Settings, WebDriver, WebElement,
};

// ============================================================================
// Tracing
// ============================================================================

/// Installs a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Page actions with default settings over a fake driver.
pub fn actions(driver: &Arc<FakeDriver>) -> PageActions {
    init_tracing();
    PageActions::new(driver.clone(), Settings::default())
}

/// Page actions with custom settings over a fake driver.
pub fn actions_with(driver: &Arc<FakeDriver>, settings: Settings) -> PageActions {
    init_tracing();
    PageActions::new(driver.clone(), settings)
}

pub fn encode(bytes: &[u8]) -> String {
    Base64Standard.encode(bytes)
}

// ============================================================================
// FakeElement
// ============================================================================

#[derive(Debug, Clone, Default)]
struct ElementState {
    displayed: bool,
    enabled: bool,
    stale: bool,
    text: String,
    tag: String,
    attributes: HashMap<String, String>,
    properties: HashMap<String, String>,
    screenshot: Option<String>,
    clicks: usize,
    clears: usize,
    submits: usize,
    keys: Vec<String>,
}

/// A scripted DOM element.
#[derive(Debug)]
pub struct FakeElement {
    state: Mutex<ElementState>,
}

impl FakeElement {
    /// A displayed, enabled element with this tag and no text.
    pub fn new(tag: &str) -> Self {
        Self {
            state: Mutex::new(ElementState {
                displayed: true,
                enabled: true,
                tag: tag.to_string(),
                ..ElementState::default()
            }),
        }
    }

    pub fn with_text(self, text: &str) -> Self {
        self.state.lock().text = text.to_string();
        self
    }

    pub fn hidden(self) -> Self {
        self.state.lock().displayed = false;
        self
    }

    pub fn disabled(self) -> Self {
        self.state.lock().enabled = false;
        self
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.state
            .lock()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_property(self, name: &str, value: &str) -> Self {
        self.state
            .lock()
            .properties
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_screenshot(self, bytes: &[u8]) -> Self {
        self.state.lock().screenshot = Some(encode(bytes));
        self
    }

    // ------------------------------------------------------------------------
    // Mutation while a wait runs
    // ------------------------------------------------------------------------

    pub fn set_displayed(&self, displayed: bool) {
        self.state.lock().displayed = displayed;
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.state.lock().enabled = enabled;
    }

    pub fn set_text(&self, text: &str) {
        self.state.lock().text = text.to_string();
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.state
            .lock()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&self, name: &str) {
        self.state.lock().attributes.remove(name);
    }

    pub fn set_stale(&self, stale: bool) {
        self.state.lock().stale = stale;
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    pub fn clicks(&self) -> usize {
        self.state.lock().clicks
    }

    pub fn clears(&self) -> usize {
        self.state.lock().clears
    }

    pub fn submits(&self) -> usize {
        self.state.lock().submits
    }

    pub fn keys(&self) -> Vec<String> {
        self.state.lock().keys.clone()
    }

    fn live(&self) -> Result<parking_lot::MutexGuard<'_, ElementState>> {
        let state = self.state.lock();
        if state.stale {
            return Err(Error::stale_element("element is no longer attached"));
        }
        Ok(state)
    }
}

#[async_trait]
impl WebElement for FakeElement {
    async fn is_displayed(&self) -> Result<bool> {
        Ok(self.live()?.displayed)
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(self.live()?.enabled)
    }

    async fn text(&self) -> Result<String> {
        let state = self.live()?;
        Ok(if state.displayed {
            state.text.clone()
        } else {
            String::new()
        })
    }

    async fn tag_name(&self) -> Result<String> {
        Ok(self.live()?.tag.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        let state = self.live()?;
        if name == "innerText" {
            return Ok(Some(state.text.clone()));
        }
        Ok(state.attributes.get(name).cloned())
    }

    async fn property(&self, name: &str) -> Result<Option<String>> {
        Ok(self.live()?.properties.get(name).cloned())
    }

    async fn click(&self) -> Result<()> {
        self.live()?.clicks += 1;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.live()?.clears += 1;
        Ok(())
    }

    async fn send_keys(&self, keys: &str) -> Result<()> {
        self.live()?.keys.push(keys.to_string());
        Ok(())
    }

    async fn submit(&self) -> Result<()> {
        self.live()?.submits += 1;
        Ok(())
    }

    async fn screenshot(&self) -> Result<String> {
        self.live()?
            .screenshot
            .clone()
            .ok_or_else(|| Error::driver("element screenshot unsupported"))
    }
}

// ============================================================================
// FakeDriver
// ============================================================================

#[derive(Debug, Default)]
struct DriverState {
    elements: Vec<(By, Arc<FakeElement>)>,
    lookups: usize,
    current_url: String,
    page_source: String,
    screenshot: String,
    visited: Vec<String>,
    scripts: Vec<String>,
    hovers: usize,
    double_clicks: usize,
    alert: Option<String>,
    alert_log: Vec<String>,
    frames: Vec<String>,
    frame_log: Vec<String>,
    handles: Vec<String>,
    current_window: Option<String>,
}

/// A scripted browser session.
#[derive(Debug)]
pub struct FakeDriver {
    browser: String,
    uc: bool,
    cdp: Option<FakeCdp>,
    connected: AtomicBool,
    reconnects: AtomicUsize,
    state: Arc<Mutex<DriverState>>,
}

impl FakeDriver {
    /// A connected Chrome session on `about:blank`.
    pub fn new() -> Self {
        Self {
            browser: "chrome".to_string(),
            uc: false,
            cdp: None,
            connected: AtomicBool::new(true),
            reconnects: AtomicUsize::new(0),
            state: Arc::new(Mutex::new(DriverState {
                current_url: "about:blank".to_string(),
                screenshot: encode(b"page"),
                handles: vec!["main".to_string()],
                ..DriverState::default()
            })),
        }
    }

    pub fn browser(mut self, name: &str) -> Self {
        self.browser = name.to_string();
        self
    }

    /// Runs in UC mode.
    pub fn uc(mut self) -> Self {
        self.uc = true;
        self
    }

    /// Attaches a CDP path.
    pub fn with_cdp(mut self) -> Self {
        self.cdp = Some(FakeCdp::default());
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    // ------------------------------------------------------------------------
    // DOM scripting
    // ------------------------------------------------------------------------

    /// Adds an element findable by `selector`, returning it for mutation.
    pub fn add(&self, selector: impl Into<Locator>, element: FakeElement) -> Arc<FakeElement> {
        let element = Arc::new(element);
        let by = selector.into().by().clone();
        self.state.lock().elements.push((by, element.clone()));
        element
    }

    /// Removes every element registered under `selector`.
    pub fn remove(&self, selector: impl Into<Locator>) {
        let by = selector.into().by().clone();
        self.state.lock().elements.retain(|(b, _)| *b != by);
    }

    pub fn set_page(&self, url: &str, source: &str) {
        let mut state = self.state.lock();
        state.current_url = url.to_string();
        state.page_source = source.to_string();
    }

    pub fn open_alert(&self, text: &str) {
        self.state.lock().alert = Some(text.to_string());
    }

    pub fn add_frame(&self, name: &str) {
        self.state.lock().frames.push(name.to_string());
    }

    pub fn open_window(&self, handle: &str) {
        self.state.lock().handles.push(handle.to_string());
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    pub fn lookups(&self) -> usize {
        self.state.lock().lookups
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.lock().visited.clone()
    }

    pub fn scripts(&self) -> Vec<String> {
        self.state.lock().scripts.clone()
    }

    pub fn hovers(&self) -> usize {
        self.state.lock().hovers
    }

    pub fn double_clicks(&self) -> usize {
        self.state.lock().double_clicks
    }

    pub fn alert_log(&self) -> Vec<String> {
        self.state.lock().alert_log.clone()
    }

    pub fn frame_log(&self) -> Vec<String> {
        self.state.lock().frame_log.clone()
    }

    pub fn current_window(&self) -> Option<String> {
        self.state.lock().current_window.clone()
    }

    pub fn reconnects(&self) -> usize {
        self.reconnects.load(Ordering::SeqCst)
    }

    pub fn cdp_calls(&self) -> Vec<String> {
        self.cdp
            .as_ref()
            .map(|cdp| cdp.calls.lock().clone())
            .unwrap_or_default()
    }

    fn lookup(&self, by: &By) -> Option<Arc<FakeElement>> {
        let mut state = self.state.lock();
        state.lookups += 1;
        state
            .elements
            .iter()
            .find(|(b, _)| b == by)
            .map(|(_, e)| e.clone())
    }
}

#[async_trait]
impl WebDriver for FakeDriver {
    async fn find_element(&self, by: &By) -> Result<ElementRef> {
        match self.lookup(by) {
            Some(element) => Ok(element as ElementRef),
            None => Err(Error::no_such_element(by.strategy(), by.value())),
        }
    }

    async fn find_elements(&self, by: &By) -> Result<Vec<ElementRef>> {
        let mut state = self.state.lock();
        state.lookups += 1;
        Ok(state
            .elements
            .iter()
            .filter(|(b, _)| b == by)
            .map(|(_, e)| e.clone() as ElementRef)
            .collect())
    }

    async fn get(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.visited.push(url.to_string());
        state.current_url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.state.lock().current_url.clone())
    }

    async fn page_source(&self) -> Result<String> {
        Ok(self.state.lock().page_source.clone())
    }

    async fn screenshot(&self) -> Result<String> {
        Ok(self.state.lock().screenshot.clone())
    }

    async fn execute_script(&self, script: &str, _args: Vec<ScriptArg>) -> Result<Value> {
        self.state.lock().scripts.push(script.to_string());
        Ok(Value::Null)
    }

    async fn hover(&self, element: &ElementRef) -> Result<()> {
        element.is_displayed().await?;
        self.state.lock().hovers += 1;
        Ok(())
    }

    async fn double_click(&self, element: &ElementRef) -> Result<()> {
        element.click().await?;
        element.click().await?;
        self.state.lock().double_clicks += 1;
        Ok(())
    }

    async fn switch_to_alert(&self) -> Result<Box<dyn Alert>> {
        if self.state.lock().alert.is_none() {
            return Err(Error::NoAlertPresent);
        }
        Ok(Box::new(FakeAlert {
            state: self.state.clone(),
        }))
    }

    async fn switch_to_frame(&self, frame: &FrameRef) -> Result<()> {
        let mut state = self.state.lock();
        let known = match frame {
            FrameRef::Index(i) => *i < state.frames.len(),
            FrameRef::Name(name) => state.frames.contains(name),
            FrameRef::Element(_) => true,
        };
        if !known {
            return Err(Error::no_such_frame(frame.describe()));
        }
        state.frame_log.push(frame.describe());
        Ok(())
    }

    async fn window_handles(&self) -> Result<Vec<String>> {
        Ok(self.state.lock().handles.clone())
    }

    async fn switch_to_window(&self, handle: &str) -> Result<()> {
        let mut state = self.state.lock();
        if !state.handles.iter().any(|h| h == handle) {
            return Err(Error::no_such_window(handle));
        }
        state.current_window = Some(handle.to_string());
        Ok(())
    }

    fn browser_name(&self) -> &str {
        &self.browser
    }

    fn is_using_uc(&self) -> bool {
        self.uc
    }

    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn connect(&self) -> Result<()> {
        self.reconnects.fetch_add(1, Ordering::SeqCst);
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn cdp(&self) -> Option<&dyn CdpDriver> {
        self.cdp.as_ref().map(|cdp| cdp as &dyn CdpDriver)
    }
}

// ============================================================================
// FakeAlert
// ============================================================================

struct FakeAlert {
    state: Arc<Mutex<DriverState>>,
}

impl FakeAlert {
    fn close(&self, action: &str) -> Result<()> {
        let mut state = self.state.lock();
        let text = state.alert.take().ok_or(Error::NoAlertPresent)?;
        state.alert_log.push(format!("{action}:{text}"));
        Ok(())
    }
}

#[async_trait]
impl Alert for FakeAlert {
    async fn text(&self) -> Result<String> {
        self.state.lock().alert.clone().ok_or(Error::NoAlertPresent)
    }

    async fn accept(&self) -> Result<()> {
        self.close("accept")
    }

    async fn dismiss(&self) -> Result<()> {
        self.close("dismiss")
    }
}

// ============================================================================
// FakeCdp
// ============================================================================

/// Records every protocol-level call as `"method:args"`.
#[derive(Debug, Default)]
pub struct FakeCdp {
    calls: Mutex<Vec<String>>,
}

impl FakeCdp {
    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl CdpDriver for FakeCdp {
    async fn open(&self, url: &str) -> Result<()> {
        self.record(format!("open:{url}"));
        Ok(())
    }

    async fn page_source(&self) -> Result<String> {
        self.record("page_source".to_string());
        Ok("<p>from cdp</p>".to_string())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.record(format!("click:{selector}"));
        Ok(())
    }

    async fn click_link(&self, link_text: &str) -> Result<()> {
        self.record(format!("click_link:{link_text}"));
        Ok(())
    }

    async fn click_if_visible(&self, selector: &str) -> Result<()> {
        self.record(format!("click_if_visible:{selector}"));
        Ok(())
    }

    async fn click_active_element(&self) -> Result<()> {
        self.record("click_active_element".to_string());
        Ok(())
    }

    async fn send_keys(&self, selector: &str, text: &str) -> Result<()> {
        self.record(format!("send_keys:{selector}:{text}"));
        Ok(())
    }

    async fn press_keys(&self, selector: &str, text: &str) -> Result<()> {
        self.record(format!("press_keys:{selector}:{text}"));
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        self.record(format!("type_text:{selector}:{text}"));
        Ok(())
    }

    async fn select(&self, selector: &str) -> Result<ElementRef> {
        self.record(format!("select:{selector}"));
        Ok(Arc::new(FakeElement::new("div")) as ElementRef)
    }

    async fn find_element(&self, selector: &str) -> Result<ElementRef> {
        self.record(format!("find_element:{selector}"));
        Ok(Arc::new(FakeElement::new("div")) as ElementRef)
    }

    async fn is_element_present(&self, selector: &str) -> Result<bool> {
        self.record(format!("is_element_present:{selector}"));
        Ok(true)
    }

    async fn is_element_visible(&self, selector: &str) -> Result<bool> {
        self.record(format!("is_element_visible:{selector}"));
        Ok(true)
    }

    async fn get_text(&self, selector: &str) -> Result<String> {
        self.record(format!("get_text:{selector}"));
        Ok("cdp text".to_string())
    }

    async fn assert_element(&self, selector: &str) -> Result<()> {
        self.record(format!("assert_element:{selector}"));
        Ok(())
    }

    async fn assert_element_present(&self, selector: &str) -> Result<()> {
        self.record(format!("assert_element_present:{selector}"));
        Ok(())
    }

    async fn assert_text(&self, text: &str, selector: &str) -> Result<()> {
        self.record(format!("assert_text:{text}:{selector}"));
        Ok(())
    }

    async fn assert_exact_text(&self, text: &str, selector: &str) -> Result<()> {
        self.record(format!("assert_exact_text:{text}:{selector}"));
        Ok(())
    }
}
