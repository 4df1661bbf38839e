//! Library entry point for sales-cli components.
//!
//! Exposes the console's reusable pieces (table engine, session monitor,
//! alert hub, loading gate, config and session store) so integration tests
//! can exercise them without going through the binary entry point.

pub mod alerts;
pub mod config;
pub mod error;
pub mod format;
pub mod loader;
pub mod monitor;
pub mod session;
pub mod store;
pub mod table;

pub use alerts::{Alert, AlertHub, AlertLevel};
pub use config::ConsoleConfig;
pub use error::{CLIError, Result};
pub use format::{format_cell, CellFormat};
pub use loader::LoadingGate;
pub use monitor::{MonitorState, SessionMonitor, TickOutcome};
pub use session::{ConsoleSession, OutputFormat};
pub use store::SessionStore;
pub use table::{
    page_strip, Align, ClientPagedTable, Column, PageEvent, PageItem, Row, RowAction,
    ServerPagedTable, Tone,
};
