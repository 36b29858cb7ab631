//! Alert, frame and window switching.

mod common;

use std::time::Duration;

use tokio::time::sleep;
use webdriver_waits::{Error, FrameRef, WindowRef};

use common::{FakeDriver, FakeElement, actions};

const SECOND: Duration = Duration::from_secs(1);

// ============================================================================
// Alerts
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_accepts_alert_that_opens_late() {
    let driver = FakeDriver::new().shared();
    let actions = actions(&driver);

    let opener = driver.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(300)).await;
        opener.open_alert("Saved!");
    });

    let text = actions.wait_for_and_accept_alert(Some(SECOND)).await.unwrap();
    assert_eq!(text, "Saved!");
    assert_eq!(driver.alert_log(), vec!["accept:Saved!".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_dismisses_alert() {
    let driver = FakeDriver::new().shared();
    driver.open_alert("Leave page?");
    let actions = actions(&driver);

    let text = actions.wait_for_and_dismiss_alert(Some(SECOND)).await.unwrap();
    assert_eq!(text, "Leave page?");
    assert_eq!(driver.alert_log(), vec!["dismiss:Leave page?".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_missing_alert_times_out() {
    let driver = FakeDriver::new().shared();
    let actions = actions(&driver);

    let err = actions
        .wait_for_and_switch_to_alert(Some(SECOND))
        .await
        .unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(err.to_string(), "Alert was not present after 1 seconds!");
}

// ============================================================================
// Frames
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_switches_to_named_frame() {
    let driver = FakeDriver::new().shared();
    driver.add_frame("payment");
    let actions = actions(&driver);

    actions
        .switch_to_frame("payment", Some(SECOND), false)
        .await
        .unwrap();
    actions
        .switch_to_frame(FrameRef::Index(0), Some(SECOND), false)
        .await
        .unwrap();
    assert_eq!(driver.frame_log(), vec!["payment".to_string(), "0".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_frame_selector_falls_back_to_iframe_element() {
    let driver = FakeDriver::new().shared();
    driver.add("iframe#pay", FakeElement::new("iframe"));
    let actions = actions(&driver);

    actions
        .switch_to_frame("iframe#pay", Some(SECOND), false)
        .await
        .unwrap();
    assert_eq!(driver.frame_log(), vec!["<element>".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_hidden_iframe_needs_invisible_flag() {
    let driver = FakeDriver::new().shared();
    driver.add("//iframe[@title='ads']", FakeElement::new("iframe").hidden());
    let actions = actions(&driver);

    let err = actions
        .switch_to_frame("//iframe[@title='ads']", Some(SECOND), false)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Frame {//iframe[@title='ads']} was not visible after 1 second!"
    );

    actions
        .switch_to_frame("//iframe[@title='ads']", Some(SECOND), true)
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_missing_frame_reports_presence() {
    let driver = FakeDriver::new().shared();
    let actions = actions(&driver);

    let err = actions
        .switch_to_frame("checkout", Some(SECOND), true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::FrameNotAvailable { presence: "present", .. }));
}

// ============================================================================
// Windows
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_switches_to_window_index_once_opened() {
    let driver = FakeDriver::new().shared();
    let actions = actions(&driver);

    let opener = driver.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(400)).await;
        opener.open_window("popup");
    });

    actions
        .switch_to_window(1_isize, Some(SECOND), true)
        .await
        .unwrap();
    assert_eq!(driver.current_window().as_deref(), Some("popup"));
}

#[tokio::test(start_paused = true)]
async fn test_last_window_index() {
    let driver = FakeDriver::new().shared();
    driver.open_window("second");
    driver.open_window("third");
    let actions = actions(&driver);

    actions
        .switch_to_window(WindowRef::LAST, Some(SECOND), false)
        .await
        .unwrap();
    assert_eq!(driver.current_window().as_deref(), Some("third"));
}

#[tokio::test(start_paused = true)]
async fn test_safari_mirrors_window_indices() {
    let driver = FakeDriver::new().browser("safari").shared();
    driver.open_window("newest");
    let actions = actions(&driver);

    actions
        .switch_to_window(0_isize, Some(SECOND), false)
        .await
        .unwrap();
    assert_eq!(driver.current_window().as_deref(), Some("newest"));
}

#[tokio::test(start_paused = true)]
async fn test_window_handle_switch_and_timeout() {
    let driver = FakeDriver::new().uc().shared();
    driver.open_window("popup");
    let actions = actions(&driver);

    actions
        .switch_to_window("popup", Some(SECOND), true)
        .await
        .unwrap();
    assert_eq!(driver.current_window().as_deref(), Some("popup"));

    let err = actions
        .switch_to_window("nowhere", Some(SECOND), true)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Window {nowhere} was not present after 1 second!");
}
