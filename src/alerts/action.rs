//! Actions: the selectable responses of an alert.
//!
//! This module provides the [`ActionFactory`] that turns a caller's intent
//! ([`ActionArgs`]) into an [`Action`] record, and the [`ActionComposer`]
//! handed to every alert declaration closure.
//!
//! An [`Action`] owns a handler wrapping the caller's `on_click` callback.
//! When the handler runs it awaits the callback and, only if the callback
//! succeeded, asks the [`AlertStore`] to delete the alert. Turning a failed
//! callback into a resolution value is the job of the alert factory, not of
//! this module.

use std::{
    fmt,
    future::Future,
    sync::{Arc, Weak},
};

use futures::{FutureExt, future::BoxFuture};
use log::debug;

use crate::{config::Labels, id, store::AlertStore};

/// Caller supplied callback run when an action is selected.
pub type OnClick = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Handler of a raw [`Action`], invoked with the id of the alert it belongs to.
pub type ActionHandler = Arc<dyn Fn(&str) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Kind of an action.
///
/// Only [`ActionType::Cancel`] matters for the resolution of an alert: a
/// cancel action resolves the wait handle to `true`, every other kind to
/// `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionType {
    Confirm,
    Cancel,
    Link,
    Action,
}

/// Presentation metadata shared by raw and supervised actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionMeta {
    /// Unique id of the action.
    pub id: String,
    /// Kind of the action.
    pub kind: ActionType,
    /// Label of the button.
    pub content: Option<String>,
    /// Icon name.
    pub icon: Option<String>,
    /// Visual theme of the button.
    pub theme: Option<String>,
    /// Navigation target for link actions.
    pub to: Option<String>,
}

/// Caller intent used to build an [`Action`].
///
/// # Examples
///
/// ```
/// use alertwait::alerts::ActionArgs;
///
/// let args = ActionArgs::new()
///     .content("Delete")
///     .theme("danger")
///     .on_click(|| async { Ok::<(), anyhow::Error>(()) });
/// ```
#[derive(Clone, Default)]
pub struct ActionArgs {
    pub content: Option<String>,
    pub icon: Option<String>,
    pub theme: Option<String>,
    pub to: Option<String>,
    on_click: Option<OnClick>,
}

impl ActionArgs {
    /// Creates empty arguments: no label, no callback.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Sets the asynchronous callback run when the action is selected.
    ///
    /// The callback may fail; the value it returns on success is ignored.
    pub fn on_click<F, Fut, T, E>(mut self, on_click: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: 'static,
        E: Into<anyhow::Error> + 'static,
    {
        let on_click: OnClick = Arc::new(move || {
            let fut = on_click();
            async move {
                let result: anyhow::Result<()> = fut.await.map(|_| ()).map_err(Into::into);
                result
            }
            .boxed()
        });
        self.on_click = Some(on_click);
        self
    }

    /// Returns `true` if a callback was set.
    pub fn has_on_click(&self) -> bool {
        self.on_click.is_some()
    }
}

impl fmt::Debug for ActionArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionArgs")
            .field("content", &self.content)
            .field("icon", &self.icon)
            .field("theme", &self.theme)
            .field("to", &self.to)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

/// An action as produced by the [`ActionFactory`].
///
/// Its handler may fail: the error of the caller's callback is returned as is.
#[derive(Clone)]
pub struct Action {
    pub meta: ActionMeta,
    handler: ActionHandler,
}

impl Action {
    /// Id of the action.
    pub fn id(&self) -> &str {
        &self.meta.id
    }

    /// Kind of the action.
    pub fn kind(&self) -> ActionType {
        self.meta.kind
    }

    /// Runs the handler for the alert `alert_id`.
    pub fn handle(&self, alert_id: &str) -> BoxFuture<'static, anyhow::Result<()>> {
        (self.handler)(alert_id)
    }

    /// Splits the action into its metadata and handler.
    pub(crate) fn into_parts(self) -> (ActionMeta, ActionHandler) {
        (self.meta, self.handler)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("meta", &self.meta).finish()
    }
}

/// Builds [`Action`] records bound to an [`AlertStore`].
#[derive(Clone)]
pub struct ActionFactory {
    store: Arc<dyn AlertStore>,
    labels: Labels,
    id_length: usize,
}

impl ActionFactory {
    /// Creates a factory deleting alerts from `store` once an action succeeds.
    pub fn new(store: Arc<dyn AlertStore>, labels: Labels, id_length: usize) -> Self {
        ActionFactory {
            store,
            labels,
            id_length,
        }
    }

    /// Builds an action of kind `kind` from `args`.
    ///
    /// The handler awaits the `on_click` callback if there is one, then requests
    /// deletion of the alert it is invoked with. If the callback fails the
    /// error is returned and no deletion is requested.
    ///
    /// The handler only keeps a weak reference to the store: the store holds
    /// the alert, and so the handler, while it is displayed.
    pub fn create_action(&self, kind: ActionType, args: ActionArgs) -> Action {
        let ActionArgs {
            content,
            icon,
            theme,
            to,
            on_click,
        } = args;
        let id = id::generate(self.id_length);

        let store: Weak<dyn AlertStore> = Arc::downgrade(&self.store);
        let action_id = id.clone();
        let handler: ActionHandler = Arc::new(move |alert_id: &str| {
            let store = Weak::clone(&store);
            let on_click = on_click.clone();
            let alert_id = alert_id.to_owned();
            let action_id = action_id.clone();
            async move {
                if let Some(on_click) = on_click {
                    on_click().await?;
                }
                match store.upgrade() {
                    Some(store) => {
                        debug!("action {} done, deleting alert {}", action_id, alert_id);
                        store.delete_alert(&alert_id).await;
                    }
                    None => debug!(
                        "action {} done, store gone, alert {} not deleted",
                        action_id, alert_id
                    ),
                }
                Ok::<(), anyhow::Error>(())
            }
            .boxed()
        });

        Action {
            meta: ActionMeta {
                id,
                kind,
                content,
                icon,
                theme,
                to,
            },
            handler,
        }
    }

    /// Builds a [`ActionType::Confirm`] action.
    pub fn create_confirm_action(&self, args: ActionArgs) -> Action {
        self.create_action(ActionType::Confirm, args)
    }

    /// Builds a [`ActionType::Cancel`] action.
    ///
    /// The localized cancel label is used when `args` carries no content.
    pub fn create_cancel_action(&self, mut args: ActionArgs) -> Action {
        if args.content.is_none() {
            args.content = Some(self.labels.cancel.clone());
        }
        self.create_action(ActionType::Cancel, args)
    }
}

/// The builders handed to an alert declaration closure.
///
/// The set is closed: only `confirm` and `cancel` exist. Other kinds of
/// actions are built with [`ActionFactory::create_action`] directly, see
/// [`AlertFactory::action_factory`](crate::alerts::AlertFactory::action_factory).
pub struct ActionComposer<'a> {
    factory: &'a ActionFactory,
}

impl<'a> ActionComposer<'a> {
    pub(crate) fn new(factory: &'a ActionFactory) -> Self {
        ActionComposer { factory }
    }

    /// See [`ActionFactory::create_confirm_action`].
    pub fn confirm(&self, args: ActionArgs) -> Action {
        self.factory.create_confirm_action(args)
    }

    /// See [`ActionFactory::create_cancel_action`].
    pub fn cancel(&self, args: ActionArgs) -> Action {
        self.factory.create_cancel_action(args)
    }
}
