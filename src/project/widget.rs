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

use super::{Project, PropertyHandle, WeakProject, WidgetId};
use crate::property::Property;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static WIDGET_SERIAL: AtomicU64 = AtomicU64::new(0);

/// A signal a widget type can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalClass {
    pub name: String,
    pub owner_type: String,
    /// Whether the signal accepts a `::detail` suffix.
    pub detailed: bool,
}

impl SignalClass {
    pub fn new(name: &str, owner_type: &str) -> Self {
        Self {
            name: name.to_string(),
            owner_type: owner_type.to_string(),
            detailed: false,
        }
    }

    pub fn detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }
}

/// A callback connected to a widget signal.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SignalHandler {
    pub name: String,
    pub handler: String,
    pub detail: Option<String>,
    pub user_data: Option<String>,
    pub after: bool,
    pub swapped: bool,
}

impl SignalHandler {
    pub fn new(name: &str, handler: &str) -> Self {
        Self {
            name: name.to_string(),
            handler: handler.to_string(),
            ..Self::default()
        }
    }

    pub fn detail(mut self, detail: Option<&str>) -> Self {
        self.detail = detail.map(str::to_string);
        self
    }

    pub fn user_data(mut self, user_data: Option<&str>) -> Self {
        self.user_data = user_data.map(str::to_string);
        self
    }

    pub fn after(mut self, after: bool) -> Self {
        self.after = after;
        self
    }

    pub fn swapped(mut self, swapped: bool) -> Self {
        self.swapped = swapped;
        self
    }

    /// `name::detail` form used when saving.
    pub fn detailed_name(&self) -> String {
        match self.detail.as_deref() {
            Some(detail) if !detail.is_empty() => format!("{}::{}", self.name, detail),
            _ => self.name.clone(),
        }
    }
}

mod imp {
    use super::*;

    #[derive(Debug)]
    pub struct Widget {
        pub id: WidgetId,
        pub serial: u64,
        pub name: RefCell<String>,
        pub class_name: String,
        pub is_a: SmallVec<[String; 4]>,
        pub book: RefCell<Option<String>>,
        pub properties: RefCell<IndexMap<String, PropertyHandle>>,
        pub packing_properties: RefCell<IndexMap<String, PropertyHandle>>,
        pub signal_classes: RefCell<Vec<SignalClass>>,
        pub signals: RefCell<IndexMap<String, Vec<SignalHandler>>>,
        pub project: WeakProject,
    }
}

#[derive(Debug, Clone)]
pub struct Widget(Rc<imp::Widget>);

impl PartialEq for Widget {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Widget {}

impl Widget {
    pub(super) fn new(
        id: WidgetId,
        name: &str,
        class_name: &str,
        is_a: &[&str],
        project: WeakProject,
    ) -> Self {
        let mut types: SmallVec<[String; 4]> = SmallVec::new();
        types.push(class_name.to_string());
        types.extend(
            is_a.iter()
                .filter(|t| **t != class_name)
                .map(|t| t.to_string()),
        );
        Self(Rc::new(imp::Widget {
            id,
            serial: WIDGET_SERIAL.fetch_add(1, Ordering::Relaxed),
            name: RefCell::new(name.to_string()),
            class_name: class_name.to_string(),
            is_a: types,
            book: RefCell::new(None),
            properties: RefCell::new(IndexMap::default()),
            packing_properties: RefCell::new(IndexMap::default()),
            signal_classes: RefCell::new(vec![]),
            signals: RefCell::new(IndexMap::default()),
            project,
        }))
    }

    #[inline(always)]
    fn imp(&self) -> &imp::Widget {
        &self.0
    }

    pub fn id(&self) -> WidgetId {
        self.imp().id
    }

    pub(super) fn serial(&self) -> u64 {
        self.imp().serial
    }

    pub fn name(&self) -> String {
        self.imp().name.borrow().clone()
    }

    pub fn set_name(&self, name: &str) {
        *self.imp().name.borrow_mut() = name.to_string();
    }

    pub fn class_name(&self) -> &str {
        &self.imp().class_name
    }

    pub fn is_a(&self, type_name: &str) -> bool {
        self.imp().is_a.iter().any(|t| t == type_name)
    }

    /// Documentation book of the widget's catalog.
    pub fn book(&self) -> Option<String> {
        self.imp().book.borrow().clone()
    }

    pub fn set_book(&self, book: Option<&str>) {
        *self.imp().book.borrow_mut() = book.map(str::to_string);
    }

    pub fn project(&self) -> Option<Project> {
        self.imp().project.upgrade()
    }

    pub(super) fn insert_property(&self, id: &str, handle: PropertyHandle, packing: bool) {
        let map = if packing {
            &self.imp().packing_properties
        } else {
            &self.imp().properties
        };
        map.borrow_mut().insert(id.to_string(), handle);
    }

    pub(super) fn forget_property(&self, id: &str, packing: bool) {
        let map = if packing {
            &self.imp().packing_properties
        } else {
            &self.imp().properties
        };
        map.borrow_mut().shift_remove(id);
    }

    pub(super) fn property_handles(&self) -> Vec<PropertyHandle> {
        self.imp()
            .properties
            .borrow()
            .values()
            .chain(self.imp().packing_properties.borrow().values())
            .copied()
            .collect()
    }

    pub fn property(&self, id: &str) -> Option<Property> {
        let handle = *self.imp().properties.borrow().get(id)?;
        self.project()?.property(handle)
    }

    pub fn pack_property(&self, id: &str) -> Option<Property> {
        let handle = *self.imp().packing_properties.borrow().get(id)?;
        self.project()?.property(handle)
    }

    /// Regular (non-packing) properties in insertion order.
    pub fn properties(&self) -> Vec<Property> {
        let Some(project) = self.project() else {
            return vec![];
        };
        self.imp()
            .properties
            .borrow()
            .values()
            .filter_map(|h| project.property(*h))
            .collect()
    }

    pub fn add_signal_class(&self, class: SignalClass) {
        self.imp().signal_classes.borrow_mut().push(class);
    }

    pub fn signal_classes(&self) -> Vec<SignalClass> {
        self.imp().signal_classes.borrow().clone()
    }

    pub fn signal_handlers(&self, signal: &str) -> Vec<SignalHandler> {
        self.imp()
            .signals
            .borrow()
            .get(signal)
            .cloned()
            .unwrap_or_default()
    }

    pub fn add_signal_handler(&self, handler: SignalHandler) {
        self.imp()
            .signals
            .borrow_mut()
            .entry(handler.name.clone())
            .or_default()
            .push(handler);
        self.touch();
    }

    /// Inserts `handler` at `index` among its signal's handlers, or last if
    /// `index` is past the end.
    pub fn insert_signal_handler(&self, index: usize, handler: SignalHandler) {
        {
            let mut signals = self.imp().signals.borrow_mut();
            let list = signals.entry(handler.name.clone()).or_default();
            list.insert(index.min(list.len()), handler);
        }
        self.touch();
    }

    /// Returns the position `handler` held among its signal's handlers.
    pub fn remove_signal_handler(&self, handler: &SignalHandler) -> Option<usize> {
        let pos = {
            let mut signals = self.imp().signals.borrow_mut();
            let list = signals.get_mut(&handler.name)?;
            let pos = list.iter().position(|h| h == handler)?;
            list.remove(pos);
            if list.is_empty() {
                signals.shift_remove(&handler.name);
            }
            pos
        };
        self.touch();
        Some(pos)
    }

    /// Replaces `old` in place, keeping its position.
    pub fn change_signal_handler(&self, old: &SignalHandler, new: SignalHandler) -> bool {
        if old.name != new.name {
            if self.remove_signal_handler(old).is_none() {
                return false;
            }
            self.add_signal_handler(new);
            return true;
        }
        {
            let mut signals = self.imp().signals.borrow_mut();
            let Some(slot) = signals
                .get_mut(&old.name)
                .and_then(|list| list.iter_mut().find(|h| *h == old))
            else {
                return false;
            };
            *slot = new;
        }
        self.touch();
        true
    }

    fn touch(&self) {
        if let Some(project) = self.project() {
            project.set_modified(true);
        }
    }
}
