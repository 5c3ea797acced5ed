//! Emergency-department patient records kept in a CSV file, with an audited
//! action boundary for search, filter, edit, and delete.
//!
//! # Examples
//!
//! Loading a table and summarising it:
//! ```
//! use aedrecords::{
//!     core::store::{RecordStore, StoreConfig},
//!     query,
//! };
//!
//! let dir = tempfile::tempdir().expect("tmp");
//! let path = dir.path().join("AED4weeks.csv");
//! std::fs::write(
//!     &path,
//!     "ID,Age,LoS,noofinvestigation,nooftreatment,noofpatients,Breachornot\n\
//!      P1,40,120,2,1,30,non-breach\n\
//!      P2,71,260,5,3,41,breach\n",
//! )
//! .expect("write");
//!
//! let store = RecordStore::open(&path, StoreConfig::default()).expect("open");
//! let summary = query::summarize(store.records());
//! assert_eq!(summary.total_count, 2);
//! assert_eq!(summary.breach_count, 1);
//! assert_eq!(summary.mean_length_of_stay, Some(190.0));
//! ```
//!
//! Audited session over the default files:
//! ```no_run
//! use aedrecords::{
//!     audit::FileAuditLog,
//!     config::AppConfig,
//!     core::store::RecordStore,
//!     session::{handle::Session, outcome::DeleteReply},
//! };
//!
//! let cfg = AppConfig::default();
//! let store = RecordStore::open(&cfg.data_file, cfg.store_config()).expect("open");
//! let audit = Box::new(FileAuditLog::new(&cfg.log_file));
//! let mut session = Session::new(store, audit, cfg.histogram_buckets);
//!
//! let view = session.dashboard().expect("dashboard");
//! println!("{} patients", view.summary.total_count);
//! assert_eq!(
//!     session.delete("P10000", false).expect("delete"),
//!     DeleteReply::ConfirmationRequired
//! );
//! ```
#![deny(missing_docs)]

/// User actions and their audit wording.
pub mod action;
/// Audit trail sinks.
pub mod audit;
/// Application settings.
pub mod config;
/// Core in-memory store and index helpers.
pub mod core;
/// Patient records, updates, and tables.
pub mod patient;
/// Table persistence abstraction and CSV implementation.
pub mod persist;
/// Read-only summaries, distributions, and filters.
pub mod query;
/// Audited action boundary.
pub mod session;
/// Shared primitive types and enums.
pub mod types;
