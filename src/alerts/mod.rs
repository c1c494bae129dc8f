//! Alert construction and resolution.
//!
//! This module lets callers declare modal alerts whose actions run
//! asynchronous callbacks, and await the user's choice. It consists of:
//!
//! - [`Action`] and [`ActionFactory`]: actions built from caller intent
//! - [`ActionComposer`]: the `confirm`/`cancel` builders handed to declarations
//! - [`Alert`]: the record registered in the [`AlertStore`](crate::store::AlertStore)
//! - [`AlertFactory`]: builds alerts and returns an [`AlertHandle`]
//!
//! # Flow
//!
//! ```text
//! caller ── AlertFactory::confirm(args) ──► AlertStore::create_alert(alert)
//!   │                                              │
//!   │ handle.wait().await                          ▼ user picks an action
//!   │                                       AlertAction::handle(alert_id)
//!   │                                              │ on_click().await
//!   │                                              │ AlertStore::delete_alert(alert_id)
//!   ◄──────────── true if cancel, else false ──────┘
//! ```

mod action;
mod alert;
mod alert_factory;
mod resolution;

pub use crate::alerts::action::{
    Action, ActionArgs, ActionComposer, ActionFactory, ActionHandler, ActionMeta, ActionType,
    OnClick,
};
pub use crate::alerts::alert::{Alert, AlertAction, AlertArgs, AlertType, OnClose, SupervisedHandler};
pub use crate::alerts::alert_factory::{AlertFactory, AlertHandle};
pub use crate::alerts::resolution::Resolution;
