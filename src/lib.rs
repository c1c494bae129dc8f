//! alertwait - declarative alerts with asynchronous actions.
//!
//! Callers describe a modal alert and its actions as data, hand it to an
//! alert store for display, and await the user's eventual choice. Each alert
//! resolves exactly once, whichever action fires and whether or not its
//! callback fails.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use alertwait::{
//!     alerts::{ActionArgs, AlertArgs, AlertFactory},
//!     config::Config,
//!     store::MemoryStore,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = Arc::new(MemoryStore::new());
//! let factory = AlertFactory::new(store.clone(), &Config::default());
//!
//! let handle = factory.confirm(AlertArgs::new("Discard changes?", |actions| {
//!     vec![
//!         actions.confirm(ActionArgs::new().content("Discard")),
//!         actions.cancel(ActionArgs::new()),
//!     ]
//! }));
//!
//! // The presentation layer fires the action picked by the user
//! let alert = store.get(handle.id()).unwrap();
//! let cancel_id = alert.actions()[1].id().to_string();
//! store.trigger(handle.id(), &cancel_id).await;
//!
//! assert!(handle.wait().await);
//! assert!(store.is_empty());
//! # }
//! ```
//!
//! # Modules
//!
//! - [`alerts`] - Actions, alerts, the alert factory and the wait handle
//! - [`store`] - The alert store trait and an in-memory implementation
//! - [`id`] - Short random identifiers
//! - [`config`] - YAML and environment configuration
//! - [`console`] - Terminal rendering of alerts

pub mod alerts;
pub mod config;
pub mod console;
pub mod id;
pub mod store;
