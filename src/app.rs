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

//! # Application context
//!
//! [`App`] is the shared state every editor is constructed with: settings,
//! the undo history, the displayable values registry and the loaded
//! projects. It is a cheap handle; clones refer to the same context.

use crate::error::Result;
use crate::project::{Project, PropertyHandle, SignalHandler, Widget, WidgetId};
use crate::property::{Property, Value};
use crate::utils::{Signal, SignalHandlerId};
use std::any::TypeId;
use std::cell::{Ref, RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::rc::Rc;

mod displayable;
pub use displayable::*;
mod undo;
pub use undo::*;
mod settings;
pub use settings::*;

/// Payload of the `doc-search` notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSearch {
    pub book: Option<String>,
    pub page: Option<String>,
    pub search: Option<String>,
}

mod imp {
    use super::*;

    #[derive(Debug)]
    pub struct App {
        pub settings: RefCell<Settings>,
        pub config_path: RefCell<Option<PathBuf>>,
        pub undo_db: UndoDatabase,
        pub displayable: RefCell<DisplayableValues>,
        pub projects: RefCell<Vec<Project>>,
        pub doc_search: Signal<super::App, DocSearch>,
    }
}

#[derive(Debug, Clone)]
pub struct App(Rc<imp::App>);

impl PartialEq for App {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for App {}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn stamp_bytes(parts: (usize, u64)) -> Box<[u8]> {
    let mut ret = Vec::with_capacity(16);
    ret.extend_from_slice(&(parts.0 as u64).to_ne_bytes());
    ret.extend_from_slice(&parts.1.to_ne_bytes());
    ret.into_boxed_slice()
}

impl App {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let mut displayable = DisplayableValues::new();
        displayable.merge_hidden(&settings.hidden_values);
        Self(Rc::new(imp::App {
            settings: RefCell::new(settings),
            config_path: RefCell::new(None),
            undo_db: UndoDatabase::new(),
            displayable: RefCell::new(displayable),
            projects: RefCell::new(vec![]),
            doc_search: Signal::new("doc-search"),
        }))
    }

    /// Reads the user's configuration; `config_save` writes it back to
    /// the same place.
    pub fn load() -> Result<Self> {
        Self::load_from(&Settings::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let ret = Self::with_settings(Settings::load_from(path)?);
        *ret.imp().config_path.borrow_mut() = Some(path.to_path_buf());
        Ok(ret)
    }

    #[inline(always)]
    fn imp(&self) -> &imp::App {
        &self.0
    }

    pub fn settings(&self) -> Ref<'_, Settings> {
        self.imp().settings.borrow()
    }

    /// Replaces the settings and applies their hidden values.
    pub fn set_settings(&self, settings: Settings) {
        self.imp()
            .displayable
            .borrow_mut()
            .merge_hidden(&settings.hidden_values);
        *self.imp().settings.borrow_mut() = settings;
    }

    pub fn config_path(&self) -> Option<PathBuf> {
        self.imp().config_path.borrow().clone()
    }

    pub fn config_save(&self) -> Result<()> {
        let path = match self.config_path() {
            Some(path) => path,
            None => Settings::default_path()?,
        };
        self.settings().save_to(&path).map_err(|err| {
            log::error!("Could not save configuration to {}: {}", path.display(), err);
            err
        })
    }

    pub fn displayable(&self) -> Ref<'_, DisplayableValues> {
        self.imp().displayable.borrow()
    }

    pub fn displayable_mut(&self) -> RefMut<'_, DisplayableValues> {
        self.imp().displayable.borrow_mut()
    }

    pub fn undo_db(&self) -> &UndoDatabase {
        &self.imp().undo_db
    }

    pub fn add_project(&self, project: &Project) {
        let mut projects = self.imp().projects.borrow_mut();
        if !projects.contains(project) {
            projects.push(project.clone());
        }
    }

    pub fn remove_project(&self, project: &Project) -> bool {
        let mut projects = self.imp().projects.borrow_mut();
        let len = projects.len();
        projects.retain(|p| p != project);
        projects.len() != len
    }

    pub fn projects(&self) -> Vec<Project> {
        self.imp().projects.borrow().clone()
    }

    pub fn project_by_path(&self, path: &Path) -> Option<Project> {
        self.imp()
            .projects
            .borrow()
            .iter()
            .find(|p| p.path().as_deref() == Some(path))
            .cloned()
    }

    pub fn is_project_loaded(&self, path: &Path) -> bool {
        self.project_by_path(path).is_some()
    }

    pub fn search_docs(&self, book: Option<&str>, page: Option<&str>, search: Option<&str>) {
        let search = DocSearch {
            book: book.map(str::to_string),
            page: page.map(str::to_string),
            search: search.map(str::to_string),
        };
        self.imp().doc_search.emit(self, &search);
    }

    pub fn connect_doc_search<F>(&self, f: F) -> SignalHandlerId
    where
        F: Fn(&App, &DocSearch) + 'static,
    {
        self.imp().doc_search.connect(f)
    }

    pub fn disconnect(&self, id: SignalHandlerId) -> bool {
        self.imp().doc_search.disconnect(id)
    }

    /// Writes `value` into `property` and records the change in the undo
    /// history. Values the property refuses leave no history entry.
    pub fn command_set_property(&self, property: &Property, value: Value) {
        if property.equals_value(&value) {
            return;
        }
        let (Some(handle), Some(project)) = (property.handle(), property.project()) else {
            property.set_value(value);
            return;
        };
        let old = property.value();
        if !property.set_value(value) {
            return;
        }
        let new = property.value();
        if new == old {
            return;
        }
        log::debug!("command: set {} to {:?}", property.id(), new);
        let compress = matches!(new, Value::String(_));
        let setter = |value: Value| -> Box<dyn FnMut()> {
            let project = project.downgrade();
            Box::new(move || {
                if let Some(property) = project.upgrade().and_then(|p| p.property(handle)) {
                    property.set_value(value.clone());
                }
            })
        };
        self.imp().undo_db.event(Action {
            stamp: Self::property_stamp(property, handle),
            compress,
            redo: setter(new),
            undo: setter(old),
        });
    }

    fn property_stamp(property: &Property, handle: PropertyHandle) -> EventStamp {
        EventStamp {
            t: TypeId::of::<Property>(),
            property: property.id().to_string(),
            id: stamp_bytes(handle.into_raw_parts()),
        }
    }

    fn signal_stamp(widget: &Widget, signal: &str) -> EventStamp {
        EventStamp {
            t: TypeId::of::<SignalHandler>(),
            property: signal.to_string(),
            id: stamp_bytes(widget.id().into_raw_parts()),
        }
    }

    fn signal_action<R, U>(&self, widget: &Widget, signal: &str, mut redo: R, mut undo: U)
    where
        R: FnMut(&Widget) + 'static,
        U: FnMut(&Widget) + 'static,
    {
        redo(widget);
        let Some(project) = widget.project() else {
            return;
        };
        let id: WidgetId = widget.id();
        let lookup = {
            let project = project.downgrade();
            move || project.upgrade().and_then(|p| p.widget(id))
        };
        let lookup2 = lookup.clone();
        self.imp().undo_db.event(Action {
            stamp: Self::signal_stamp(widget, signal),
            compress: false,
            redo: Box::new(move || {
                if let Some(widget) = lookup() {
                    redo(&widget);
                }
            }),
            undo: Box::new(move || {
                if let Some(widget) = lookup2() {
                    undo(&widget);
                }
            }),
        });
    }

    pub fn command_add_signal(&self, widget: &Widget, handler: SignalHandler) {
        log::debug!("command: add {} handler {}", handler.name, handler.handler);
        let name = handler.name.clone();
        let removed = handler.clone();
        self.signal_action(
            widget,
            &name,
            move |w| w.add_signal_handler(handler.clone()),
            move |w| {
                w.remove_signal_handler(&removed);
            },
        );
    }

    pub fn command_remove_signal(&self, widget: &Widget, handler: &SignalHandler) {
        log::debug!("command: remove {} handler {}", handler.name, handler.handler);
        let index = widget
            .signal_handlers(&handler.name)
            .iter()
            .position(|h| h == handler)
            .unwrap_or(usize::MAX);
        let removed = handler.clone();
        let added = handler.clone();
        self.signal_action(
            widget,
            &handler.name,
            move |w| {
                w.remove_signal_handler(&removed);
            },
            move |w| w.insert_signal_handler(index, added.clone()),
        );
    }

    pub fn command_change_signal(
        &self,
        widget: &Widget,
        old: &SignalHandler,
        new: SignalHandler,
    ) {
        if *old == new {
            return;
        }
        log::debug!("command: change {} handler {}", old.name, old.handler);
        let (old_r, new_r) = (old.clone(), new.clone());
        let (old_u, new_u) = (old.clone(), new);
        self.signal_action(
            widget,
            &old.name,
            move |w| {
                w.change_signal_handler(&old_r, new_r.clone());
            },
            move |w| {
                w.change_signal_handler(&new_u, old_u.clone());
            },
        );
    }

    pub fn can_undo(&self) -> bool {
        self.imp().undo_db.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.imp().undo_db.can_redo()
    }

    pub fn undo(&self) -> bool {
        self.imp().undo_db.undo()
    }

    pub fn redo(&self) -> bool {
        self.imp().undo_db.redo()
    }
}
