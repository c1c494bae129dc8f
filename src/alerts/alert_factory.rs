//! Alert factory: builds alerts, registers them and hands back a wait handle.
//!
//! This module provides the [`AlertFactory`] which turns an [`AlertArgs`]
//! declaration into an [`Alert`], registers it with the injected
//! [`AlertStore`] and returns an [`AlertHandle`] resolving to the user's
//! choice.
//!
//! # Resolution
//!
//! Every action declared for the alert is wrapped in a supervising handler:
//!
//! - the action's own handler succeeded: the alert resolves to `true` for a
//!   [`ActionType::Cancel`] action, `false` otherwise
//! - the action's handler failed or panicked: the alert resolves to `false`
//!   and the error stops there
//!
//! The first action to complete settles the alert. Later completions, for
//! example after a double click, are no-ops.

use std::{panic::AssertUnwindSafe, sync::Arc};

use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use log::{debug, info, warn};

use crate::{
    alerts::{
        ActionComposer,
        action::{Action, ActionFactory, ActionType},
        alert::{Alert, AlertAction, AlertArgs, AlertType, SupervisedHandler},
        resolution::{Resolution, Resolver},
    },
    config::Config,
    id,
    store::AlertStore,
};

/// Caller handle on a registered alert.
#[derive(Clone)]
pub struct AlertHandle {
    id: String,
    resolution: Resolution,
}

impl AlertHandle {
    /// Id of the registered alert.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Waits for the user's choice.
    ///
    /// Resolves to `true` if the alert was dismissed with a cancel action,
    /// `false` for any other action or if the action failed. It may be
    /// called any number of times; every future observes the same value.
    /// It stays pending as long as no action fires.
    pub fn wait(&self) -> Shared<BoxFuture<'static, bool>> {
        self.resolution.wait()
    }

    /// Returns `true` once an action settled the alert.
    pub fn is_settled(&self) -> bool {
        self.resolution.is_settled()
    }
}

/// Builds alerts and registers them with an [`AlertStore`].
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use alertwait::{
///     alerts::{ActionArgs, AlertArgs, AlertFactory},
///     config::Config,
///     store::MemoryStore,
/// };
///
/// # async fn example() {
/// let store = Arc::new(MemoryStore::new());
/// let factory = AlertFactory::new(store.clone(), &Config::default());
///
/// let handle = factory.confirm(AlertArgs::new("Leave the page?", |actions| {
///     vec![
///         actions.confirm(ActionArgs::new().content("Leave")),
///         actions.cancel(ActionArgs::new()),
///     ]
/// }));
///
/// // The presentation layer displays the alert and fires the chosen action.
/// let cancelled = handle.wait().await;
/// # }
/// ```
#[derive(Clone)]
pub struct AlertFactory {
    store: Arc<dyn AlertStore>,
    actions: ActionFactory,
    id_length: usize,
}

impl AlertFactory {
    /// Creates a factory registering alerts in `store`.
    ///
    /// An `id_length` below [`id::MIN_ID_LENGTH`] is raised to it.
    pub fn new(store: Arc<dyn AlertStore>, config: &Config) -> Self {
        let id_length = if config.id_length < id::MIN_ID_LENGTH {
            warn!(
                "id length {} too short, using {}",
                config.id_length,
                id::MIN_ID_LENGTH
            );
            id::MIN_ID_LENGTH
        } else {
            config.id_length
        };
        let actions = ActionFactory::new(Arc::clone(&store), config.labels.clone(), id_length);

        AlertFactory {
            store,
            actions,
            id_length,
        }
    }

    /// The factory used for the actions of the alerts.
    pub fn action_factory(&self) -> &ActionFactory {
        &self.actions
    }

    /// Builds an alert of kind `kind`, registers it and returns its handle.
    ///
    /// The declaration closure of `args` is called once with the
    /// [`ActionComposer`]. An alert declared without actions can never resolve.
    pub fn create_alert<F>(&self, kind: AlertType, args: AlertArgs<F>) -> AlertHandle
    where
        F: FnOnce(&ActionComposer<'_>) -> Vec<Action>,
    {
        let AlertArgs {
            title,
            description,
            strict,
            on_close,
            actions,
        } = args;
        let id = id::generate(self.id_length);
        let (resolution, resolver) = Resolution::new();

        let composer = ActionComposer::new(&self.actions);
        let actions: Vec<AlertAction> = actions(&composer)
            .into_iter()
            .map(|action| supervise(action, resolver.clone()))
            .collect();

        if actions.is_empty() {
            warn!("alert {} has no action and will never resolve", id);
        }
        info!(
            "registering {:?} alert {} \"{}\" with {} actions",
            kind,
            id,
            title,
            actions.len()
        );

        self.store.create_alert(Alert {
            id: id.clone(),
            kind,
            title,
            description,
            strict,
            on_close,
            actions,
        });

        AlertHandle { id, resolution }
    }

    /// Builds a [`AlertType::Success`] alert.
    pub fn success<F>(&self, args: AlertArgs<F>) -> AlertHandle
    where
        F: FnOnce(&ActionComposer<'_>) -> Vec<Action>,
    {
        self.create_alert(AlertType::Success, args)
    }

    /// Builds a [`AlertType::Warning`] alert.
    pub fn warning<F>(&self, args: AlertArgs<F>) -> AlertHandle
    where
        F: FnOnce(&ActionComposer<'_>) -> Vec<Action>,
    {
        self.create_alert(AlertType::Warning, args)
    }

    /// Builds a [`AlertType::Confirm`] alert.
    pub fn confirm<F>(&self, args: AlertArgs<F>) -> AlertHandle
    where
        F: FnOnce(&ActionComposer<'_>) -> Vec<Action>,
    {
        self.create_alert(AlertType::Confirm, args)
    }

    /// Builds a form alert. Form alerts are tagged [`AlertType::Confirm`].
    pub fn form<F>(&self, args: AlertArgs<F>) -> AlertHandle
    where
        F: FnOnce(&ActionComposer<'_>) -> Vec<Action>,
    {
        self.create_alert(AlertType::Confirm, args)
    }
}

/// Wraps the handler of `action` so that it settles `resolver` and never fails.
fn supervise(action: Action, resolver: Resolver) -> AlertAction {
    let (meta, handler) = action.into_parts();
    let is_cancel = meta.kind == ActionType::Cancel;
    let action_id = meta.id.clone();

    let supervised: SupervisedHandler = Arc::new(move |alert_id: &str| {
        let outcome = AssertUnwindSafe(handler(alert_id)).catch_unwind();
        let resolver = resolver.clone();
        let action_id = action_id.clone();
        let alert_id = alert_id.to_owned();
        async move {
            debug!("firing action {} of alert {}", action_id, alert_id);
            let value = match outcome.await {
                Ok(Ok(())) => is_cancel,
                Ok(Err(e)) => {
                    warn!("action {} of alert {} failed: {:#}", action_id, alert_id, e);
                    false
                }
                Err(_) => {
                    warn!("action {} of alert {} panicked", action_id, alert_id);
                    false
                }
            };
            if resolver.settle(value) {
                debug!("alert {} resolved to {}", alert_id, value);
            } else {
                debug!("alert {} already resolved, ignoring {}", alert_id, value);
            }
        }
        .boxed()
    });

    AlertAction::new(meta, supervised)
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use tokio::time::timeout;

    use super::*;
    use crate::{alerts::ActionArgs, store::MockAlertStore};

    /// Mock store capturing the registered alerts.
    fn create_capturing_store(created: Arc<Mutex<Vec<Alert>>>) -> MockAlertStore {
        let mut store = MockAlertStore::new();
        store
            .expect_create_alert()
            .returning(move |alert| created.lock().unwrap().push(alert));
        store
    }

    fn take_alert(created: &Arc<Mutex<Vec<Alert>>>) -> Alert {
        created.lock().unwrap().pop().unwrap()
    }

    #[tokio::test]
    async fn test_confirm_action_resolves_false_and_deletes() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let deleted = Arc::new(Mutex::new(Vec::new()));
        let mut store = create_capturing_store(Arc::clone(&created));
        let deleted_clone = Arc::clone(&deleted);
        store
            .expect_delete_alert()
            .times(1)
            .returning(move |id| deleted_clone.lock().unwrap().push(id.to_string()));
        let factory = AlertFactory::new(Arc::new(store), &Config::default());

        let handle = factory.create_alert(
            AlertType::Confirm,
            AlertArgs::new("T", |actions| {
                vec![actions.confirm(
                    ActionArgs::new()
                        .content("OK")
                        .on_click(|| async { Ok::<bool, anyhow::Error>(true) }),
                )]
            }),
        );
        let alert = take_alert(&created);
        assert_eq!(alert.id, handle.id());
        assert_eq!(alert.kind, AlertType::Confirm);

        alert.actions()[0].handle(&alert.id).await;

        assert!(!handle.wait().await);
        assert_eq!(*deleted.lock().unwrap(), vec![handle.id().to_string()]);
    }

    #[tokio::test]
    async fn test_cancel_action_resolves_true() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let mut store = create_capturing_store(Arc::clone(&created));
        store.expect_delete_alert().times(1).returning(|_| ());
        let factory = AlertFactory::new(Arc::new(store), &Config::default());

        let handle = factory.confirm(AlertArgs::new("T", |actions| {
            vec![
                actions.confirm(ActionArgs::new()),
                actions.cancel(ActionArgs::new()),
            ]
        }));
        let alert = take_alert(&created);
        let cancel_id = alert.actions()[1].id().to_string();

        assert!(alert.trigger(&cancel_id).await);

        assert!(handle.wait().await);
    }

    #[tokio::test]
    async fn test_link_and_custom_actions_resolve_false() {
        for kind in [ActionType::Link, ActionType::Action] {
            let created = Arc::new(Mutex::new(Vec::new()));
            let mut store = create_capturing_store(Arc::clone(&created));
            store.expect_delete_alert().times(1).returning(|_| ());
            let factory = AlertFactory::new(Arc::new(store), &Config::default());

            let handle = factory.create_alert(
                AlertType::Info,
                AlertArgs::new("T", |_| {
                    vec![
                        factory
                            .action_factory()
                            .create_action(kind, ActionArgs::new().to("/home")),
                    ]
                }),
            );
            let alert = take_alert(&created);
            alert.actions()[0].handle(&alert.id).await;

            assert!(!handle.wait().await);
        }
    }

    #[tokio::test]
    async fn test_failing_callback_resolves_false_without_delete() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let mut store = create_capturing_store(Arc::clone(&created));
        store.expect_delete_alert().times(0);
        let factory = AlertFactory::new(Arc::new(store), &Config::default());

        let handle = factory.confirm(AlertArgs::new("T", |actions| {
            vec![actions.cancel(
                ActionArgs::new().on_click(|| async { Err::<(), _>(anyhow::anyhow!("network")) }),
            )]
        }));
        let alert = take_alert(&created);

        alert.actions()[0].handle(&alert.id).await;

        assert!(!handle.wait().await);
    }

    #[tokio::test]
    async fn test_panicking_callback_resolves_false() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let mut store = create_capturing_store(Arc::clone(&created));
        store.expect_delete_alert().times(0);
        let factory = AlertFactory::new(Arc::new(store), &Config::default());

        let handle = factory.confirm(AlertArgs::new("T", |actions| {
            vec![actions.cancel(ActionArgs::new().on_click(|| async {
                if true {
                    panic!("callback panicked");
                }
                Ok::<(), anyhow::Error>(())
            }))]
        }));
        let alert = take_alert(&created);

        alert.actions()[0].handle(&alert.id).await;

        assert!(!handle.wait().await);
    }

    #[tokio::test]
    async fn test_first_completed_action_wins() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let mut store = create_capturing_store(Arc::clone(&created));
        store.expect_delete_alert().times(2).returning(|_| ());
        let factory = AlertFactory::new(Arc::new(store), &Config::default());

        let handle = factory.confirm(AlertArgs::new("T", |actions| {
            vec![
                actions.confirm(ActionArgs::new()),
                actions.cancel(ActionArgs::new()),
            ]
        }));
        let alert = take_alert(&created);

        alert.actions()[1].handle(&alert.id).await;
        alert.actions()[0].handle(&alert.id).await;

        assert!(handle.is_settled());
        assert!(handle.wait().await);
    }

    #[tokio::test]
    async fn test_multiple_waits_observe_same_resolution() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let mut store = create_capturing_store(Arc::clone(&created));
        store.expect_delete_alert().returning(|_| ());
        let factory = AlertFactory::new(Arc::new(store), &Config::default());

        let handle = factory.confirm(AlertArgs::new("T", |actions| {
            vec![actions.cancel(ActionArgs::new())]
        }));
        let first = tokio::spawn(handle.wait());
        let second = tokio::spawn(handle.wait());
        let alert = take_alert(&created);

        alert.actions()[0].handle(&alert.id).await;

        assert!(first.await.unwrap());
        assert!(second.await.unwrap());
    }

    #[tokio::test]
    async fn test_action_without_wait_only_deletes() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let mut store = create_capturing_store(Arc::clone(&created));
        store.expect_delete_alert().times(1).returning(|_| ());
        let factory = AlertFactory::new(Arc::new(store), &Config::default());

        let handle = factory.confirm(AlertArgs::new("T", |actions| {
            vec![actions.confirm(ActionArgs::new())]
        }));
        let alert = take_alert(&created);
        drop(handle);

        alert.actions()[0].handle(&alert.id).await;
    }

    #[tokio::test]
    async fn test_alert_without_actions_never_resolves() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let store = create_capturing_store(Arc::clone(&created));
        let factory = AlertFactory::new(Arc::new(store), &Config::default());

        let handle = factory.warning(AlertArgs::new("T", |_| Vec::new()));

        assert!(take_alert(&created).actions().is_empty());
        assert!(timeout(Duration::from_millis(20), handle.wait()).await.is_err());
    }

    #[test]
    fn test_typed_constructors_fix_type() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let store = create_capturing_store(Arc::clone(&created));
        let factory = AlertFactory::new(Arc::new(store), &Config::default());

        factory.success(AlertArgs::new("T", |_| Vec::new()));
        factory.warning(AlertArgs::new("T", |_| Vec::new()));
        factory.confirm(AlertArgs::new("T", |_| Vec::new()));
        factory.form(AlertArgs::new("T", |_| Vec::new()));

        let kinds: Vec<AlertType> = created.lock().unwrap().iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AlertType::Success,
                AlertType::Warning,
                AlertType::Confirm,
                AlertType::Confirm
            ]
        );
    }

    #[test]
    fn test_alert_keeps_caller_fields() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let store = create_capturing_store(Arc::clone(&created));
        let factory = AlertFactory::new(Arc::new(store), &Config::default());
        let closed = Arc::new(AtomicUsize::new(0));
        let closed_clone = Arc::clone(&closed);

        factory.form(
            AlertArgs::new("Title", |actions| {
                vec![
                    actions.confirm(ActionArgs::new().content("Save")),
                    actions.cancel(ActionArgs::new()),
                ]
            })
            .description("Description")
            .strict(true)
            .on_close(move || {
                closed_clone.fetch_add(1, Ordering::SeqCst);
                true
            }),
        );
        let alert = take_alert(&created);

        assert_eq!(alert.title, "Title");
        assert_eq!(alert.description.as_deref(), Some("Description"));
        assert!(alert.strict);
        assert_eq!(alert.actions().len(), 2);
        assert_eq!(alert.actions()[0].meta.content.as_deref(), Some("Save"));
        assert_eq!(alert.actions()[1].meta.content.as_deref(), Some("Cancel"));
        assert_ne!(alert.actions()[0].id(), alert.actions()[1].id());
        assert!(alert.close());
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_alerts_have_distinct_ids() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let store = create_capturing_store(Arc::clone(&created));
        let factory = AlertFactory::new(Arc::new(store), &Config::default());

        let first = factory.success(AlertArgs::new("A", |_| Vec::new()));
        let second = factory.success(AlertArgs::new("B", |_| Vec::new()));

        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_zero_id_length_is_raised_to_minimum() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let store = create_capturing_store(Arc::clone(&created));
        let config = Config {
            id_length: 0,
            ..Config::default()
        };
        let factory = AlertFactory::new(Arc::new(store), &config);

        let handle = factory.confirm(AlertArgs::new("T", |actions| {
            vec![actions.confirm(ActionArgs::new())]
        }));
        let alert = take_alert(&created);

        assert_eq!(handle.id().len(), id::MIN_ID_LENGTH);
        assert_eq!(alert.actions()[0].id().len(), id::MIN_ID_LENGTH);
    }
}
