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

//! # Projects
//!
//! A [`Project`] owns every widget and property of one interface
//! description. Both live in generational arenas: a [`PropertyHandle`] or
//! [`WidgetId`] stays valid only while its target is alive, and a removed
//! slot is never confused with a later insertion.

use crate::property::{Property, PropertyClass};
use crate::utils::{Signal, SignalHandlerId};
use generational_arena::{Arena, Index};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

mod widget;

pub use widget::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyHandle(Index);

impl PropertyHandle {
    /// Slot and generation, stable for the handle's lifetime.
    pub fn into_raw_parts(self) -> (usize, u64) {
        self.0.into_raw_parts()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(Index);

impl WidgetId {
    pub fn into_raw_parts(self) -> (usize, u64) {
        self.0.into_raw_parts()
    }
}

mod imp {
    use super::*;

    #[derive(Debug)]
    pub struct Project {
        pub name: RefCell<String>,
        pub path: RefCell<Option<PathBuf>>,
        pub modified: Cell<bool>,
        pub properties: RefCell<Arena<Property>>,
        pub widgets: RefCell<Arena<Widget>>,
        pub notify_modified: Signal<super::Project>,
    }

    impl Drop for Project {
        fn drop(&mut self) {
            let properties: Vec<Property> = self
                .properties
                .get_mut()
                .drain()
                .map(|(_, property)| property)
                .collect();
            for property in properties {
                property.dispose();
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Project(Rc<imp::Project>);

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Project {}

/// Non-owning reference to a [`Project`].
#[derive(Debug, Clone, Default)]
pub struct WeakProject(Weak<imp::Project>);

impl WeakProject {
    pub fn upgrade(&self) -> Option<Project> {
        self.0.upgrade().map(Project)
    }
}

impl Project {
    pub fn new(name: &str) -> Self {
        Self(Rc::new(imp::Project {
            name: RefCell::new(name.to_string()),
            path: RefCell::new(None),
            modified: Cell::new(false),
            properties: RefCell::new(Arena::new()),
            widgets: RefCell::new(Arena::new()),
            notify_modified: Signal::new("notify::modified"),
        }))
    }

    #[inline(always)]
    fn imp(&self) -> &imp::Project {
        &self.0
    }

    pub fn downgrade(&self) -> WeakProject {
        WeakProject(Rc::downgrade(&self.0))
    }

    pub fn name(&self) -> String {
        self.imp().name.borrow().clone()
    }

    pub fn set_name(&self, name: &str) {
        *self.imp().name.borrow_mut() = name.to_string();
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.imp().path.borrow().clone()
    }

    pub fn set_path(&self, path: Option<&Path>) {
        *self.imp().path.borrow_mut() = path.map(Path::to_path_buf);
    }

    pub fn is_modified(&self) -> bool {
        self.imp().modified.get()
    }

    pub fn set_modified(&self, modified: bool) {
        if self.imp().modified.replace(modified) != modified {
            self.imp().notify_modified.emit(self, &());
        }
    }

    pub fn connect_modified_notify<F: Fn(&Project) + 'static>(&self, f: F) -> SignalHandlerId {
        self.imp().notify_modified.connect(move |p, _| f(p))
    }

    /// `is_a` lists the widget's class and every ancestor type it can
    /// stand in for.
    pub fn add_widget(&self, name: &str, class_name: &str, is_a: &[&str]) -> Widget {
        let mut widgets = self.imp().widgets.borrow_mut();
        let index = widgets.insert_with(|index| {
            Widget::new(WidgetId(index), name, class_name, is_a, self.downgrade())
        });
        widgets[index].clone()
    }

    /// Instantiates `klass` on `widget`. Packing classes land in the
    /// widget's packing properties.
    pub fn add_property(&self, widget: &Widget, klass: Rc<PropertyClass>) -> Property {
        let packing = klass.packing;
        let property = Property::new(klass, widget.id(), self.downgrade());
        let handle = PropertyHandle(self.imp().properties.borrow_mut().insert(property.clone()));
        property.set_handle(handle);
        widget.insert_property(property.id(), handle, packing);
        property
    }

    pub fn property(&self, handle: PropertyHandle) -> Option<Property> {
        self.imp().properties.borrow().get(handle.0).cloned()
    }

    pub fn widget(&self, id: WidgetId) -> Option<Widget> {
        self.imp().widgets.borrow().get(id.0).cloned()
    }

    pub fn widget_by_name(&self, name: &str) -> Option<Widget> {
        self.imp()
            .widgets
            .borrow()
            .iter()
            .map(|(_, w)| w)
            .find(|w| w.name() == name)
            .cloned()
    }

    /// Widgets in insertion order.
    pub fn widgets(&self) -> Vec<Widget> {
        let mut ret: Vec<Widget> = self
            .imp()
            .widgets
            .borrow()
            .iter()
            .map(|(_, w)| w.clone())
            .collect();
        ret.sort_by_key(|w| w.serial());
        ret
    }

    /// Removes the property and notifies its observers once it is gone.
    pub fn remove_property(&self, handle: PropertyHandle) -> bool {
        let Some(property) = self.imp().properties.borrow_mut().remove(handle.0) else {
            return false;
        };
        if let Some(widget) = self.widget(property.widget_id()) {
            widget.forget_property(property.id(), property.klass().packing);
        }
        property.dispose();
        true
    }

    pub fn remove_widget(&self, id: WidgetId) -> bool {
        let Some(widget) = self.imp().widgets.borrow_mut().remove(id.0) else {
            return false;
        };
        let handles = widget.property_handles();
        let removed: Vec<Property> = {
            let mut properties = self.imp().properties.borrow_mut();
            handles
                .into_iter()
                .filter_map(|h| properties.remove(h.0))
                .collect()
        };
        for property in removed {
            property.dispose();
        }
        self.set_modified(true);
        true
    }
}
