//! Selection Tracker
//!
//! Passive tracker for code the user has recently copied. Candidate text
//! samples are gated through the code-content heuristic, debounced with a
//! cooldown, classified, profiled, and recorded in a bounded
//! most-recent-first history. A single observer callback can be registered
//! to be notified of each accepted sample; registering a new one replaces
//! the previous.
//!
//! The tracker is the only mutator of its state; readers always receive
//! cloned snapshots, never live references.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing::debug;

use codesense_analysis::{Classification, LanguageClassifier, StructureProfile};

/// Maximum entries kept in the selection history
pub const HISTORY_CAPACITY: usize = 10;

/// Minimum time between two accepted observations
const OBSERVE_COOLDOWN: Duration = Duration::from_millis(1000);

/// A raw text sample and when it was observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSample {
    /// The observed text, verbatim
    pub text: String,
    /// Wall-clock time of observation
    pub captured_at: DateTime<Utc>,
}

/// Classification and structural profile of an accepted sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionAnalysis {
    /// Language classification
    pub classification: Classification,
    /// Structural metrics
    pub profile: StructureProfile,
}

/// One accepted observation: the sample plus its analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionEntry {
    /// The observed sample
    pub sample: TextSample,
    /// Its analysis
    pub analysis: SelectionAnalysis,
}

/// Observer callback invoked on each accepted observation.
pub type SelectionObserver = Arc<dyn Fn(&str, &SelectionAnalysis) + Send + Sync>;

/// Tracker state behind the lock.
struct TrackerState {
    current: Option<SelectionEntry>,
    history: VecDeque<SelectionEntry>,
    last_accepted: Option<Instant>,
    observer: Option<SelectionObserver>,
}

impl TrackerState {
    fn new() -> Self {
        Self {
            current: None,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
            last_accepted: None,
            observer: None,
        }
    }
}

/// Selection tracker service.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct SelectionTracker {
    classifier: Arc<LanguageClassifier>,
    state: Arc<RwLock<TrackerState>>,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionTracker {
    /// Create a tracker with an empty history.
    pub fn new() -> Self {
        Self {
            classifier: Arc::new(LanguageClassifier::new()),
            state: Arc::new(RwLock::new(TrackerState::new())),
        }
    }

    /// Offer a candidate text sample.
    ///
    /// Returns `true` when the sample was recorded. Samples that fail the
    /// code-content gate, or that arrive within the cooldown window of the
    /// previous accepted observation, are silently dropped: this is a
    /// debounce, not a queue.
    pub async fn observe(&self, text: &str) -> bool {
        if !self.classifier.is_code_content(text) {
            return false;
        }

        let observer;
        let entry;
        {
            let mut state = self.state.write().await;

            let now = Instant::now();
            if let Some(last) = state.last_accepted {
                if now.duration_since(last) < OBSERVE_COOLDOWN {
                    debug!("selection dropped: within cooldown");
                    return false;
                }
            }
            state.last_accepted = Some(now);

            entry = SelectionEntry {
                sample: TextSample {
                    text: text.to_string(),
                    captured_at: Utc::now(),
                },
                analysis: SelectionAnalysis {
                    classification: self.classifier.classify(text),
                    profile: StructureProfile::measure(text),
                },
            };

            state.history.push_front(entry.clone());
            state.history.truncate(HISTORY_CAPACITY);
            state.current = Some(entry.clone());
            observer = state.observer.clone();
        }

        debug!(
            language = %entry.analysis.classification.language,
            lines = entry.analysis.profile.lines,
            "selection recorded"
        );

        // Notify outside the lock so an observer can read the tracker.
        if let Some(observer) = observer {
            observer(&entry.sample.text, &entry.analysis);
        }

        true
    }

    /// Register the observer callback, replacing any previous one.
    pub async fn set_observer(&self, observer: SelectionObserver) {
        self.state.write().await.observer = Some(observer);
    }

    /// Remove the observer callback.
    pub async fn clear_observer(&self) {
        self.state.write().await.observer = None;
    }

    /// Snapshot of the most recent accepted observation.
    pub async fn current(&self) -> Option<SelectionEntry> {
        self.state.read().await.current.clone()
    }

    /// Snapshot of the history, most-recent first, bounded at capacity.
    pub async fn history(&self) -> Vec<SelectionEntry> {
        self.state.read().await.history.iter().cloned().collect()
    }

    /// Clear the current selection (history is retained).
    pub async fn clear(&self) {
        self.state.write().await.current = None;
    }
}
