//! Persistence layer for stored leads.
//!
//! Every lead is a JSON file written atomically (temp file, then rename), so
//! a crash never leaves a half-written record behind.
//!
//! # Example
//!
//! ```no_run
//! use kuzka_models::{Lead, LeadSubmission};
//! use kuzka_persistence::LeadStore;
//!
//! let store = LeadStore::new("/var/lib/kuzkabuh");
//! let lead = Lead::from_submission(LeadSubmission {
//!     inn: "1234567890".into(),
//!     email: "a@b.ru".into(),
//!     name: None,
//!     phone: "+79991234567".into(),
//!     contact_time: "Завтра 10:00-12:00".into(),
//!     service: "Консультация".into(),
//!     urgency: "Обычная".into(),
//! });
//! store.save(&lead).unwrap();
//! let loaded = store.load(&lead.id).unwrap();
//! ```

pub mod atomic;
pub mod error;
pub mod lead_store;

pub use error::{PersistenceError, Result};
pub use lead_store::LeadStore;
