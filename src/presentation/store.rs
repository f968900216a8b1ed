// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::{Mutex, PoisonError};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::trace;

use crate::error::FetchError;
use crate::model::UserFacingError;

/// Receiving end of a holder's one-shot effects
pub type EffectReceiver<E> = mpsc::UnboundedReceiver<E>;

/// View state plus one-shot effects for a single screen.
///
/// State lives in a watch cell: subscribers are told about every change and
/// a late subscriber sees the current value. Effects go through a queue with
/// exactly one receiver and are never replayed.
pub struct Store<S, E> {
    state: watch::Sender<S>,
    effects: mpsc::UnboundedSender<E>,
}

impl<S, E> Store<S, E> {
    pub fn new(initial: S) -> (Self, EffectReceiver<E>) {
        let (state, _) = watch::channel(initial);
        let (effects, receiver) = mpsc::unbounded_channel();
        (Self { state, effects }, receiver)
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }

    pub fn current(&self) -> S
    where
        S: Clone,
    {
        self.state.borrow().clone()
    }

    /// Replace the state with the reducer's output
    pub fn set_state(&self, reducer: impl FnOnce(&S) -> S) {
        self.state.send_modify(|state| *state = reducer(state));
    }

    /// Replace the state only if the reducer produces a new one; returns whether it did
    pub fn update_if(&self, reducer: impl FnOnce(&S) -> Option<S>) -> bool {
        self.state.send_if_modified(|state| match reducer(state) {
            Some(next) => {
                *state = next;
                true
            }
            None => false,
        })
    }

    pub fn send_effect(&self, effect: E) {
        if self.effects.send(effect).is_err() {
            trace!("effect dropped, receiver is gone");
        }
    }
}

/// Error text shown to the user, identical in state and effect
pub(crate) fn failure_message(error: &FetchError, fallback: &str) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Label for the snackbar button, if retrying can help
pub(crate) fn retry_action(error: &FetchError) -> Option<String> {
    UserFacingError::from(error).action_text().map(String::from)
}

/// Tasks owned by a state holder; all of them are aborted when the scope drops
#[derive(Default)]
pub struct TaskScope {
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskScope {
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        let tasks = self.tasks.get_mut().unwrap_or_else(PoisonError::into_inner);
        for task in tasks.drain(..) {
            task.abort();
        }
    }
}

/// Holds at most one running task; starting another aborts the current one
#[derive(Default)]
pub struct TaskSlot {
    current: Mutex<Option<JoinHandle<()>>>,
}

impl TaskSlot {
    pub fn replace<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.take() {
            previous.abort();
        }
        *current = Some(tokio::spawn(task));
    }

    /// Like [`TaskSlot::replace`], but only when `start` agrees.
    ///
    /// `start` runs while the slot is locked, so a concurrent [`TaskSlot::cancel`]
    /// happens either before the check or after the new task is in place.
    pub fn replace_if<F>(&self, start: impl FnOnce() -> bool, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if !start() {
            return false;
        }
        if let Some(previous) = current.take() {
            previous.abort();
        }
        *current = Some(tokio::spawn(task));
        true
    }

    pub fn cancel(&self) {
        if let Some(task) = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        if let Some(task) = self
            .current
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }
}
