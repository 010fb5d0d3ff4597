//! Step-by-step execution records
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod history;

pub use self::history::{HistoryError, Snapshot, SnapshotHistory, StepLabel};
