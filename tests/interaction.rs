//! Hover, click and keyboard actions.

mod common;

use std::time::Duration;

use tokio::time::{Instant, sleep};
use webdriver_waits::{Error, Key};

use common::{FakeDriver, FakeElement, actions};

const SECOND: Duration = Duration::from_secs(1);

// ============================================================================
// Hover
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_hover_and_click_revealed_item() {
    let driver = FakeDriver::new().shared();
    driver.add("#menu", FakeElement::new("li"));
    let actions = actions(&driver);

    let revealer = driver.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(300)).await;
        revealer.add("#menu .logout", FakeElement::new("a"));
    });

    let item = actions
        .hover_and_click("#menu", "#menu .logout", Some(SECOND), false)
        .await
        .unwrap();
    assert!(driver.hovers() >= 3);
    assert_eq!(item.text().await.unwrap(), "");
}

#[tokio::test(start_paused = true)]
async fn test_hover_and_js_click_runs_script() {
    let driver = FakeDriver::new().shared();
    driver.add("#menu", FakeElement::new("li"));
    let target = driver.add("#menu a", FakeElement::new("a"));
    let actions = actions(&driver);

    actions
        .hover_and_click("#menu", "#menu a", Some(SECOND), true)
        .await
        .unwrap();
    assert_eq!(target.clicks(), 0);
    assert_eq!(driver.scripts(), vec!["arguments[0].click();".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_hover_target_missing_fails_immediately() {
    let driver = FakeDriver::new().shared();
    let actions = actions(&driver);
    let start = Instant::now();

    let err = actions
        .hover_and_click("#nope", "#item", Some(SECOND), false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoSuchElement { .. }));
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_click_target_never_appears() {
    let driver = FakeDriver::new().shared();
    let menu = driver.add("#menu", FakeElement::new("li"));
    let actions = actions(&driver);
    let menu: webdriver_waits::ElementRef = menu;

    let err = actions
        .hover_element_and_click(&menu, "#menu .item", Some(SECOND))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Element {#menu .item} was not present after 1 second!"
    );
}

#[tokio::test(start_paused = true)]
async fn test_hover_element_and_double_click() {
    let driver = FakeDriver::new().shared();
    driver.add("#row", FakeElement::new("tr"));
    let cell = driver.add("#row td", FakeElement::new("td"));
    let actions = actions(&driver);

    let row = actions.hover_on_element("#row").await.unwrap();
    actions.hover_element(&row).await.unwrap();
    actions
        .hover_element_and_double_click(&row, "#row td", Some(SECOND))
        .await
        .unwrap();
    assert_eq!(driver.double_clicks(), 1);
    assert_eq!(cell.clicks(), 2);
    assert_eq!(driver.hovers(), 3);
}

// ============================================================================
// Click
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_click_waits_for_clickable() {
    let driver = FakeDriver::new().shared();
    let button = driver.add("#save", FakeElement::new("button").disabled());
    let actions = actions(&driver);

    let enable = button.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(500)).await;
        enable.set_enabled(true);
    });

    actions.click("#save", Some(SECOND)).await.unwrap();
    assert_eq!(button.clicks(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_click_link_by_text() {
    let driver = FakeDriver::new().shared();
    let link = driver.add("link=Docs", FakeElement::new("a"));
    let actions = actions(&driver);

    actions.click_link("Docs", Some(SECOND)).await.unwrap();
    assert_eq!(link.clicks(), 1);

    let err = actions.click_link("Blog", Some(SECOND)).await.unwrap_err();
    assert!(matches!(err, Error::LinkTextNotFound { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_click_if_visible_is_a_no_op_when_hidden() {
    let driver = FakeDriver::new().shared();
    let banner = driver.add("#cookie-ok", FakeElement::new("button").hidden());
    let actions = actions(&driver);
    let start = Instant::now();

    actions.click_if_visible("#cookie-ok", None).await.unwrap();
    assert_eq!(banner.clicks(), 0);
    assert_eq!(start.elapsed(), Duration::ZERO);

    actions
        .click_if_visible("#cookie-ok", Some(Duration::from_millis(500)))
        .await
        .unwrap();
    assert_eq!(banner.clicks(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_click_if_visible_waits_when_asked() {
    let driver = FakeDriver::new().shared();
    let banner = driver.add("#cookie-ok", FakeElement::new("button").hidden());
    let actions = actions(&driver);

    let show = banner.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(200)).await;
        show.set_displayed(true);
    });

    actions.click_if_visible("#cookie-ok", Some(SECOND)).await.unwrap();
    assert_eq!(banner.clicks(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_click_active_element_runs_script() {
    let driver = FakeDriver::new().shared();
    let actions = actions(&driver);

    actions.click_active_element().await.unwrap();
    assert_eq!(driver.scripts(), vec!["document.activeElement.click();".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_js_click_dispatches_mouse_event() {
    let driver = FakeDriver::new().shared();
    let covered = driver.add("#covered", FakeElement::new("a").hidden());
    let actions = actions(&driver);
    let start = Instant::now();

    actions.js_click("#covered", Some(SECOND)).await.unwrap();

    assert_eq!(covered.clicks(), 0);
    let scripts = driver.scripts();
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].contains("new MouseEvent('click'"));
    assert!(start.elapsed() >= Duration::from_millis(200));
}

// ============================================================================
// Keyboard
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_send_keys_with_trailing_newline_submits() {
    let driver = FakeDriver::new().shared();
    let search = driver.add("#q", FakeElement::new("input").hidden());
    let actions = actions(&driver);

    actions.send_keys("#q", "rust\n", Some(SECOND)).await.unwrap();
    assert_eq!(search.keys(), vec!["rust".to_string()]);
    assert_eq!(search.submits(), 1);

    actions.send_keys("#q", "more", Some(SECOND)).await.unwrap();
    assert_eq!(search.submits(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_press_keys_sends_each_character() {
    let driver = FakeDriver::new().shared();
    let field = driver.add("#code", FakeElement::new("input"));
    let actions = actions(&driver);

    actions.press_keys("#code", "ab\n", Some(SECOND)).await.unwrap();
    assert_eq!(
        field.keys(),
        vec!["a".to_string(), "b".to_string(), Key::Return.as_str().to_string()]
    );
    assert_eq!(field.submits(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_update_text_clears_first() {
    let driver = FakeDriver::new().shared();
    let field = driver.add("name=email", FakeElement::new("input"));
    let actions = actions(&driver);

    actions
        .update_text("name=email", "ada@example.com\n", Some(SECOND))
        .await
        .unwrap();
    assert_eq!(field.clears(), 1);
    assert_eq!(field.keys(), vec!["ada@example.com".to_string()]);
    assert_eq!(field.submits(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_update_text_needs_enabled_field() {
    let driver = FakeDriver::new().shared();
    driver.add("#locked", FakeElement::new("input").disabled());
    let actions = actions(&driver);

    let err = actions
        .update_text("#locked", "x", Some(SECOND))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ElementNotClickable { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_submit_form() {
    let driver = FakeDriver::new().shared();
    let form = driver.add("form#login", FakeElement::new("form"));
    let actions = actions(&driver);

    actions.submit("form#login").await.unwrap();
    assert_eq!(form.submits(), 1);
}
