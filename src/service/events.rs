// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Listener channels for editor events.
//!
//! Three channels: node added, session reset and validation errors. Each
//! holds any number of listeners, invoked synchronously in registration
//! order. Subscribing returns a [`Subscription`] that removes the listener
//! again through [`EventBus::unsubscribe`].

use crate::errors::ErrorMap;
use crate::graph::{NodeDescriptor, Role};

pub type AddListener = Box<dyn Fn(&NodeDescriptor, Role) + Send + Sync>;
pub type ResetListener = Box<dyn Fn() + Send + Sync>;
pub type ErrorListener = Box<dyn Fn(&ErrorMap) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Add,
    Reset,
    Error,
}

/// Handle for one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    channel: Channel,
    id: u64,
}

impl Subscription {
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    add: Vec<(u64, AddListener)>,
    reset: Vec<(u64, ResetListener)>,
    error: Vec<(u64, ErrorListener)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_add(&mut self, listener: AddListener) -> Subscription {
        let id = self.allocate();
        self.add.push((id, listener));
        Subscription { channel: Channel::Add, id }
    }

    pub fn on_reset(&mut self, listener: ResetListener) -> Subscription {
        let id = self.allocate();
        self.reset.push((id, listener));
        Subscription { channel: Channel::Reset, id }
    }

    pub fn on_error(&mut self, listener: ErrorListener) -> Subscription {
        let id = self.allocate();
        self.error.push((id, listener));
        Subscription { channel: Channel::Error, id }
    }

    /// Returns false when the subscription was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let id = subscription.id;
        match subscription.channel {
            Channel::Add => remove_by_id(&mut self.add, id),
            Channel::Reset => remove_by_id(&mut self.reset, id),
            Channel::Error => remove_by_id(&mut self.error, id),
        }
    }

    pub fn notify_add(&self, node: &NodeDescriptor, role: Role) {
        for (_, listener) in &self.add {
            listener(node, role);
        }
    }

    pub fn notify_reset(&self) {
        for (_, listener) in &self.reset {
            listener();
        }
    }

    pub fn notify_error(&self, errors: &ErrorMap) {
        for (_, listener) in &self.error {
            listener(errors);
        }
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

fn remove_by_id<T>(listeners: &mut Vec<(u64, T)>, id: u64) -> bool {
    let before = listeners.len();
    listeners.retain(|(existing, _)| *existing != id);
    listeners.len() != before
}
