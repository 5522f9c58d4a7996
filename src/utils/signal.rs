/*
 * gladeui
 *
 * Copyright 2022 - Manos Pitsidianakis
 *
 * This file is part of gladeui.
 *
 * gladeui is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * gladeui is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with gladeui. If not, see <http://www.gnu.org/licenses/>.
 */

//! # Signals
//!
//! Single-threaded observer lists. A [`Signal`] keeps its handlers in
//! connection order and hands out [`SignalHandlerId`]s that are unique for
//! the whole process, so an object exposing several signals can offer a
//! single `disconnect(id)` that tries all of them.
//!
//! Emission works on a snapshot of the handler list: handlers may connect,
//! disconnect or block other handlers (or themselves) while the signal is
//! being emitted. A handler disconnected or blocked by an earlier handler of
//! the same emission is not invoked.

use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalHandlerId(u64);

impl SignalHandlerId {
    fn next() -> Self {
        Self(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

type Callback<S, A> = Rc<dyn Fn(&S, &A)>;

struct Handler<S, A> {
    callback: Callback<S, A>,
    blocked: Cell<u32>,
}

pub struct Signal<S, A = ()> {
    name: &'static str,
    handlers: RefCell<IndexMap<SignalHandlerId, Handler<S, A>>>,
}

impl<S: 'static, A: 'static> Signal<S, A> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: RefCell::new(IndexMap::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn connect<F: Fn(&S, &A) + 'static>(&self, f: F) -> SignalHandlerId {
        let id = SignalHandlerId::next();
        self.handlers.borrow_mut().insert(
            id,
            Handler {
                callback: Rc::new(f),
                blocked: Cell::new(0),
            },
        );
        id
    }

    /// Returns `false` if `id` does not belong to this signal.
    pub fn disconnect(&self, id: SignalHandlerId) -> bool {
        self.handlers.borrow_mut().shift_remove(&id).is_some()
    }

    pub fn disconnect_all(&self) {
        self.handlers.borrow_mut().clear();
    }

    pub fn is_connected(&self, id: SignalHandlerId) -> bool {
        self.handlers.borrow().contains_key(&id)
    }

    /// Blocks are counted: a handler blocked twice needs two unblocks.
    pub fn block(&self, id: SignalHandlerId) -> bool {
        match self.handlers.borrow().get(&id) {
            Some(h) => {
                h.blocked.set(h.blocked.get() + 1);
                true
            }
            None => false,
        }
    }

    pub fn unblock(&self, id: SignalHandlerId) -> bool {
        match self.handlers.borrow().get(&id) {
            Some(h) => {
                h.blocked.set(h.blocked.get().saturating_sub(1));
                true
            }
            None => false,
        }
    }

    pub fn is_blocked(&self, id: SignalHandlerId) -> bool {
        self.handlers
            .borrow()
            .get(&id)
            .map(|h| h.blocked.get() > 0)
            .unwrap_or(false)
    }

    pub fn n_handlers(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn emit(&self, emitter: &S, args: &A) {
        let snapshot: Vec<(SignalHandlerId, Callback<S, A>)> = self
            .handlers
            .borrow()
            .iter()
            .map(|(id, h)| (*id, h.callback.clone()))
            .collect();
        for (id, callback) in snapshot {
            let runnable = self
                .handlers
                .borrow()
                .get(&id)
                .map(|h| h.blocked.get() == 0)
                .unwrap_or(false);
            if runnable {
                callback(emitter, args);
            }
        }
    }
}

impl<S, A> std::fmt::Debug for Signal<S, A> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.debug_struct("Signal")
            .field("name", &self.name)
            .field("handlers", &self.handlers.borrow().len())
            .finish()
    }
}

#[test]
fn test_signal_emission() {
    let sig: Signal<(), u32> = Signal::new("test");
    let hits = Rc::new(Cell::new(0));
    let id = sig.connect({
        let hits = hits.clone();
        move |_, v| hits.set(hits.get() + *v)
    });
    sig.emit(&(), &2);
    assert_eq!(hits.get(), 2);
    assert!(sig.block(id));
    sig.emit(&(), &2);
    assert_eq!(hits.get(), 2);
    assert!(sig.unblock(id));
    sig.emit(&(), &3);
    assert_eq!(hits.get(), 5);
    assert!(sig.disconnect(id));
    assert!(!sig.disconnect(id));
    sig.emit(&(), &3);
    assert_eq!(hits.get(), 5);
}

#[test]
fn test_signal_disconnect_during_emission() {
    let sig: Rc<Signal<(), ()>> = Rc::new(Signal::new("test"));
    let second_ran = Rc::new(Cell::new(false));
    let victim = Rc::new(Cell::new(None));
    sig.connect({
        let sig = Rc::downgrade(&sig);
        let victim = victim.clone();
        move |_, _| {
            if let (Some(sig), Some(id)) = (sig.upgrade(), victim.get()) {
                sig.disconnect(id);
            }
        }
    });
    let id = sig.connect({
        let second_ran = second_ran.clone();
        move |_, _| second_ran.set(true)
    });
    victim.set(Some(id));
    sig.emit(&(), &());
    assert!(!second_ran.get());
    assert_eq!(sig.n_handlers(), 1);
}
