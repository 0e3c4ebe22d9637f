//! Selection Pipeline Integration Tests
//!
//! Exercises the tracker and the clipboard monitor together: the
//! code-content gate, the observation cooldown, the bounded history, and
//! the end-to-end poll-classify-record path over an in-memory clipboard.

use std::sync::Arc;

use tokio::time::Duration;

use codesense_analysis::Language;
use codesense_core::MemoryClipboard;
use codesense_desktop::{SelectionMonitor, SelectionTracker, HISTORY_CAPACITY};

fn js_sample(tag: usize) -> String {
    format!("function sample{tag}() {{\n  return {tag};\n}}\nconsole.log(sample{tag}());")
}

#[tokio::test(start_paused = true)]
async fn test_debounce_keeps_exactly_one_entry() {
    let tracker = SelectionTracker::new();

    assert!(tracker.observe(&js_sample(1)).await);
    tokio::time::advance(Duration::from_millis(400)).await;
    assert!(!tracker.observe(&js_sample(2)).await);

    let history = tracker.history().await;
    assert_eq!(history.len(), 1);
    assert!(history[0].sample.text.contains("sample1"));
}

#[tokio::test(start_paused = true)]
async fn test_history_keeps_ten_most_recent() {
    let tracker = SelectionTracker::new();

    for tag in 0..15 {
        assert!(tracker.observe(&js_sample(tag)).await);
        tokio::time::advance(Duration::from_millis(1500)).await;
    }

    let history = tracker.history().await;
    assert_eq!(history.len(), HISTORY_CAPACITY);
    for (offset, entry) in history.iter().enumerate() {
        let expected = 14 - offset;
        assert!(entry.sample.text.contains(&format!("sample{expected}")));
    }
}

#[tokio::test(start_paused = true)]
async fn test_accepted_samples_carry_analysis() {
    let tracker = SelectionTracker::new();
    assert!(tracker.observe(&js_sample(7)).await);

    let current = tracker.current().await.unwrap();
    assert_eq!(
        current.analysis.classification.language,
        Language::JavaScript
    );
    assert_eq!(current.analysis.profile.lines, 4);
    assert!(current.analysis.profile.has_functions);
}

#[tokio::test(start_paused = true)]
async fn test_monitor_to_tracker_pipeline() {
    let tracker = SelectionTracker::new();
    let clipboard = MemoryClipboard::new();
    let monitor = SelectionMonitor::new(tracker.clone(), Arc::new(clipboard.clone()));
    let token = monitor.cancellation_token();
    let handle = monitor.spawn();

    // Let the monitor prime on the empty clipboard.
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    // A copied snippet is picked up on the next poll.
    clipboard.set_text(js_sample(1)).await;
    tokio::time::advance(Duration::from_millis(600)).await;
    tokio::task::yield_now().await;
    assert_eq!(tracker.history().await.len(), 1);

    // Prose on the clipboard is polled but never recorded.
    clipboard.set_text("Lunch at noon, usual place?").await;
    tokio::time::advance(Duration::from_millis(1200)).await;
    tokio::task::yield_now().await;
    assert_eq!(tracker.history().await.len(), 1);

    // A later snippet lands once the cooldown has passed.
    clipboard.set_text(js_sample(2)).await;
    tokio::time::advance(Duration::from_millis(1200)).await;
    tokio::task::yield_now().await;
    let history = tracker.history().await;
    assert_eq!(history.len(), 2);
    assert!(history[0].sample.text.contains("sample2"));

    token.cancel();
    handle.await.unwrap();
}
