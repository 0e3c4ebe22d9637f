//! Selection Services
//!
//! Tracking and monitoring of code the user copies: the tracker owns the
//! bounded history and debounce, the monitor feeds it by polling a
//! clipboard-like source.

pub mod monitor;
pub mod tracker;

pub use monitor::{MonitorConfig, SelectionMonitor};
pub use tracker::{
    SelectionAnalysis, SelectionEntry, SelectionObserver, SelectionTracker, TextSample,
    HISTORY_CAPACITY,
};
