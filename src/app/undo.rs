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

use std::any::TypeId;
use std::cell::{Cell, RefCell};

mod imp {
    #[derive(Debug)]
    pub struct Event {
        pub timestamp: u64,
        pub action: super::Action,
    }
}

use imp::Event;

#[derive(Debug, Default)]
pub struct UndoDatabase {
    database: RefCell<Vec<Event>>,
    timestamp: Cell<u64>,
    cursor: Cell<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStamp {
    pub t: TypeId,
    pub property: String,
    pub id: Box<[u8]>,
}

impl UndoDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_undo(&self) -> bool {
        !(self.database.borrow().is_empty() || self.cursor.get() == 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.get() < self.database.borrow().len()
    }

    pub fn len(&self) -> usize {
        self.database.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.database.borrow().is_empty()
    }

    /// Records an action that has already been performed, discarding
    /// everything that could have been redone.
    pub fn event(&self, action: Action) {
        let mut db = self.database.borrow_mut();
        let timestamp = self.timestamp.get();
        self.timestamp.set(timestamp + 1);
        db.truncate(self.cursor.get());
        db.push(Event { timestamp, action });
        self.cursor.set(db.len());
    }

    /// Undoes the last action, and every compressible action before it with
    /// the same stamp. Returns `false` if there was nothing to undo.
    pub fn undo(&self) -> bool {
        let mut did_undo = false;
        let mut db = self.database.borrow_mut();
        let mut cursor = self.cursor.get();
        loop {
            if let Some(last) = db[..cursor].last_mut() {
                log::debug!("undo event {}", last.timestamp);
                (last.action.undo)();
                did_undo = true;
            } else {
                break;
            }
            cursor -= 1;
            match (db[..cursor].last(), db.get(cursor)) {
                (Some(prev), Some(cur))
                    if prev.action.stamp == cur.action.stamp
                        && prev.action.compress
                        && cur.action.compress => {}
                _ => break,
            }
        }
        self.cursor.set(cursor);
        did_undo
    }

    pub fn redo(&self) -> bool {
        let mut did_redo = false;
        let mut db = self.database.borrow_mut();
        let mut cursor = self.cursor.get();
        loop {
            if let Some(next) = db.get_mut(cursor) {
                log::debug!("redo event {}", next.timestamp);
                (next.action.redo)();
                did_redo = true;
            } else {
                break;
            }
            cursor += 1;
            if cursor >= db.len() {
                break;
            }
            match (db.get(cursor - 1), db.get(cursor)) {
                (Some(prev), Some(cur))
                    if prev.action.stamp == cur.action.stamp
                        && prev.action.compress
                        && cur.action.compress => {}
                _ => break,
            }
        }
        self.cursor.set(cursor);
        did_redo
    }
}

pub struct Action {
    pub stamp: EventStamp,
    pub compress: bool,
    pub redo: Box<dyn FnMut()>,
    pub undo: Box<dyn FnMut()>,
}

impl std::fmt::Debug for Action {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.debug_struct("Action")
            .field("compress", &self.compress)
            .field(
                "stamp",
                &format!(
                    "{:?} {} {:?}",
                    self.stamp.t, self.stamp.property, self.stamp.id
                ),
            )
            .finish()
    }
}
