//! Alert records as registered in an [`AlertStore`](crate::store::AlertStore).
//!
//! An [`Alert`] owns its [`AlertAction`]s. Unlike the raw
//! [`Action`](crate::alerts::Action) built by the action factory, the handler
//! of an [`AlertAction`] is supervised: it settles the alert's resolution and
//! never returns an error.

use std::{fmt, sync::Arc};

use futures::future::BoxFuture;

use crate::alerts::{
    ActionComposer,
    action::{Action, ActionMeta, ActionType},
};

/// Caller callback run when the alert is closed by the presentation layer.
///
/// Returning `false` vetoes the close.
pub type OnClose = Arc<dyn Fn() -> bool + Send + Sync>;

/// Supervised handler of an [`AlertAction`], invoked with the alert id.
pub type SupervisedHandler = Arc<dyn Fn(&str) -> BoxFuture<'static, ()> + Send + Sync>;

/// Kind of an alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlertType {
    Success,
    Confirm,
    Warning,
    Error,
    Info,
    Form,
}

/// Caller description of an alert.
///
/// `F` is the declaration closure receiving the [`ActionComposer`] and
/// returning the actions in display order.
///
/// # Examples
///
/// ```
/// use alertwait::alerts::{ActionArgs, AlertArgs};
///
/// let args = AlertArgs::new("Delete the file?", |actions| {
///     vec![
///         actions.confirm(ActionArgs::new().content("Delete")),
///         actions.cancel(ActionArgs::new()),
///     ]
/// })
/// .description("This cannot be undone")
/// .strict(true);
/// ```
pub struct AlertArgs<F> {
    pub title: String,
    pub description: Option<String>,
    pub strict: bool,
    pub on_close: Option<OnClose>,
    pub actions: F,
}

impl<F> AlertArgs<F>
where
    F: FnOnce(&ActionComposer<'_>) -> Vec<Action>,
{
    pub fn new(title: impl Into<String>, actions: F) -> Self {
        AlertArgs {
            title: title.into(),
            description: None,
            strict: false,
            on_close: None,
            actions,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Prevents the presentation layer from closing the alert on an outside click.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn on_close(mut self, on_close: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.on_close = Some(Arc::new(on_close));
        self
    }
}

/// An action of a registered alert.
#[derive(Clone)]
pub struct AlertAction {
    pub meta: ActionMeta,
    handler: SupervisedHandler,
}

impl AlertAction {
    pub(crate) fn new(meta: ActionMeta, handler: SupervisedHandler) -> Self {
        AlertAction { meta, handler }
    }

    pub fn id(&self) -> &str {
        &self.meta.id
    }

    pub fn kind(&self) -> ActionType {
        self.meta.kind
    }

    /// Runs the supervised handler for the alert `alert_id`.
    ///
    /// The returned future never fails: errors of the caller's callback are
    /// turned into the alert's resolution.
    pub fn handle(&self, alert_id: &str) -> BoxFuture<'static, ()> {
        (self.handler)(alert_id)
    }
}

impl fmt::Debug for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertAction")
            .field("meta", &self.meta)
            .finish()
    }
}

/// An alert as registered in the store.
#[derive(Clone)]
pub struct Alert {
    pub id: String,
    pub kind: AlertType,
    pub title: String,
    pub description: Option<String>,
    pub strict: bool,
    pub(crate) on_close: Option<OnClose>,
    pub(crate) actions: Vec<AlertAction>,
}

impl Alert {
    /// Actions in display order.
    pub fn actions(&self) -> &[AlertAction] {
        &self.actions
    }

    /// Looks up an action by id.
    pub fn action(&self, action_id: &str) -> Option<&AlertAction> {
        self.actions.iter().find(|action| action.id() == action_id)
    }

    /// Runs the action `action_id` of this alert.
    ///
    /// Returns `false` if the alert has no such action.
    pub async fn trigger(&self, action_id: &str) -> bool {
        match self.action(action_id) {
            Some(action) => {
                action.handle(&self.id).await;
                true
            }
            None => false,
        }
    }

    /// Runs the caller's close callback.
    ///
    /// Returns whether the presentation layer may close the alert; `true`
    /// without a callback. The resolution is left untouched.
    pub fn close(&self) -> bool {
        self.on_close.as_ref().is_none_or(|on_close| on_close())
    }
}

impl fmt::Debug for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alert")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("strict", &self.strict)
            .field("actions", &self.actions)
            .finish()
    }
}
