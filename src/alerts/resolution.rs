//! Single-assignment resolution of an alert.
//!
//! A [`Resolution`] is created together with its alert. The settling side is
//! shared by every supervised action of the alert, the waiting side by every
//! caller of [`Resolution::wait`]. The first settle wins; later settles are
//! no-ops, and all waiters observe the same value.

use std::sync::{Arc, Mutex};

use futures::{
    FutureExt,
    channel::oneshot,
    future::{self, BoxFuture, Shared},
};

/// Settling side of a [`Resolution`].
#[derive(Clone)]
pub(crate) struct Resolver {
    sender: Arc<Mutex<Option<oneshot::Sender<bool>>>>,
}

impl Resolver {
    /// Settles the resolution with `value`.
    ///
    /// Returns `false` if it was already settled.
    pub(crate) fn settle(&self, value: bool) -> bool {
        let sender = match self.sender.lock() {
            Ok(mut sender) => sender.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match sender {
            Some(sender) => {
                // Nobody left to observe the value once every waiter is gone.
                let _ = sender.send(value);
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_settled(&self) -> bool {
        match self.sender.lock() {
            Ok(sender) => sender.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }
}

/// Waiting side of an alert, resolved exactly once.
///
/// The value is `true` if the alert was dismissed through a cancel action.
#[derive(Clone)]
pub struct Resolution {
    resolver: Resolver,
    outcome: Shared<BoxFuture<'static, bool>>,
}

impl Resolution {
    /// Creates an unsettled resolution and its resolver.
    pub(crate) fn new() -> (Resolution, Resolver) {
        let (sender, receiver) = oneshot::channel();
        let resolver = Resolver {
            sender: Arc::new(Mutex::new(Some(sender))),
        };
        // A dropped sender without a value means nobody will ever settle: stay pending.
        let outcome = receiver
            .then(|result| match result {
                Ok(value) => future::ready(value).left_future(),
                Err(_) => future::pending().right_future(),
            })
            .boxed()
            .shared();

        (
            Resolution {
                resolver: resolver.clone(),
                outcome,
            },
            resolver,
        )
    }

    /// Waits for the outcome.
    ///
    /// Every call returns a future over the same outcome, whether it is made
    /// before or after the alert was settled.
    pub fn wait(&self) -> Shared<BoxFuture<'static, bool>> {
        self.outcome.clone()
    }

    /// Returns `true` once an action settled the resolution.
    pub fn is_settled(&self) -> bool {
        self.resolver.is_settled()
    }
}
