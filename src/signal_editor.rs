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

//! # Signal editor
//!
//! Toolkit independent model of the signal handler editor. For each signal
//! the loaded widget's class can emit, [`SignalEditor::rows`] lists the
//! connected handlers followed by a placeholder row used to add a new one.
//! Every edit goes through the undoable signal commands of [`App`].

use crate::app::App;
use crate::project::{SignalHandler, WeakProject, Widget, WidgetId};
use crate::utils::replace_char;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Callbacks offered for every signal after the generated names.
pub const STOCK_CALLBACKS: &[&str] = &[
    "gtk_widget_show",
    "gtk_widget_hide",
    "gtk_widget_grab_focus",
    "gtk_widget_destroy",
    "gtk_true",
    "gtk_false",
    "gtk_main_quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRow {
    pub signal: String,
    pub owner_type: String,
    pub detailed: bool,
    /// `None` on the placeholder row.
    pub handler: Option<SignalHandler>,
    /// The handler's detail, or the detail typed into the placeholder row.
    pub detail: Option<String>,
}

impl SignalRow {
    pub fn is_dummy(&self) -> bool {
        self.handler.is_none()
    }
}

mod imp {
    use super::*;

    #[derive(Debug)]
    pub struct SignalEditor {
        pub app: App,
        pub widget: RefCell<Option<(WeakProject, WidgetId)>>,
        pub pending_details: RefCell<IndexMap<String, String>>,
    }
}

#[derive(Debug, Clone)]
pub struct SignalEditor(Rc<imp::SignalEditor>);

impl SignalEditor {
    pub fn new(app: &App) -> Self {
        Self(Rc::new(imp::SignalEditor {
            app: app.clone(),
            widget: RefCell::new(None),
            pending_details: RefCell::new(IndexMap::default()),
        }))
    }

    #[inline(always)]
    fn imp(&self) -> &imp::SignalEditor {
        &self.0
    }

    pub fn load_widget(&self, widget: Option<&Widget>) {
        *self.imp().widget.borrow_mut() =
            widget.and_then(|w| Some((w.project()?.downgrade(), w.id())));
        self.imp().pending_details.borrow_mut().clear();
    }

    pub fn widget(&self) -> Option<Widget> {
        let widget = self.imp().widget.borrow();
        let (project, id) = widget.as_ref()?;
        project.upgrade()?.widget(*id)
    }

    pub fn rows(&self) -> Vec<SignalRow> {
        let Some(widget) = self.widget() else {
            return vec![];
        };
        let pending = self.imp().pending_details.borrow();
        let mut ret = vec![];
        for class in widget.signal_classes() {
            for handler in widget.signal_handlers(&class.name) {
                ret.push(SignalRow {
                    signal: class.name.clone(),
                    owner_type: class.owner_type.clone(),
                    detailed: class.detailed,
                    detail: handler.detail.clone(),
                    handler: Some(handler),
                });
            }
            ret.push(SignalRow {
                detail: pending.get(&class.name).cloned(),
                signal: class.name,
                owner_type: class.owner_type,
                detailed: class.detailed,
                handler: None,
            });
        }
        ret
    }

    fn row(&self, row: usize) -> Option<(Widget, SignalRow)> {
        let widget = self.widget()?;
        let row = self.rows().into_iter().nth(row)?;
        Some((widget, row))
    }

    /// On a handler row, renames the handler or removes it when `text` is
    /// empty. On a placeholder row, adds a handler named `text`.
    pub fn edit_handler(&self, row: usize, text: &str) {
        let Some((widget, row)) = self.row(row) else {
            return;
        };
        match row.handler {
            Some(old) if old.handler == text => {}
            Some(old) if text.is_empty() => self.imp().app.command_remove_signal(&widget, &old),
            Some(old) => {
                let new = SignalHandler {
                    handler: text.to_string(),
                    ..old.clone()
                };
                self.imp().app.command_change_signal(&widget, &old, new);
            }
            None if text.is_empty() => {}
            None => {
                let detail = self
                    .imp()
                    .pending_details
                    .borrow_mut()
                    .shift_remove(&row.signal);
                let new = SignalHandler::new(&row.signal, text).detail(detail.as_deref());
                self.imp().app.command_add_signal(&widget, new);
            }
        }
    }

    /// Only detailed signals take a detail.
    pub fn edit_detail(&self, row: usize, detail: &str) {
        let Some((widget, row)) = self.row(row) else {
            return;
        };
        if !row.detailed || detail.is_empty() || row.detail.as_deref() == Some(detail) {
            return;
        }
        match row.handler {
            Some(old) => {
                let new = old.clone().detail(Some(detail));
                self.imp().app.command_change_signal(&widget, &old, new);
            }
            None => {
                self.imp()
                    .pending_details
                    .borrow_mut()
                    .insert(row.signal, detail.to_string());
            }
        }
    }

    fn change<F: FnOnce(SignalHandler) -> SignalHandler>(&self, row: usize, f: F) {
        let Some((widget, row)) = self.row(row) else {
            return;
        };
        let Some(old) = row.handler else {
            return;
        };
        let new = f(old.clone());
        self.imp().app.command_change_signal(&widget, &old, new);
    }

    pub fn toggle_swapped(&self, row: usize) {
        self.change(row, |h| {
            let swapped = !h.swapped;
            h.swapped(swapped)
        });
    }

    pub fn toggle_after(&self, row: usize) {
        self.change(row, |h| {
            let after = !h.after;
            h.after(after)
        });
    }

    /// Empty user data clears it.
    pub fn edit_user_data(&self, row: usize, user_data: &str) {
        let user_data = (!user_data.is_empty()).then_some(user_data);
        self.change(row, |h| h.user_data(user_data));
    }

    /// Generated callback names followed by [`STOCK_CALLBACKS`].
    pub fn callback_suggestions(&self, row: usize) -> Vec<String> {
        let Some((widget, row)) = self.row(row) else {
            return vec![];
        };
        let signal = match row.detail.as_deref() {
            Some(detail) if row.detailed && !detail.is_empty() => {
                format!("{}_{}", detail, row.signal)
            }
            _ => row.signal,
        };
        let signal = replace_char(&signal, '-', '_');
        let name = widget.name();
        let mut ret = vec![
            format!("on_{}_{}", name, signal),
            format!("{}_{}_cb", name, signal),
        ];
        ret.extend(STOCK_CALLBACKS.iter().map(|s| s.to_string()));
        ret
    }

    /// Property names for `notify` rows, nothing for other signals.
    pub fn detail_suggestions(&self, row: usize) -> Vec<String> {
        let Some((widget, row)) = self.row(row) else {
            return vec![];
        };
        if row.signal != "notify" {
            return vec![];
        }
        widget
            .properties()
            .into_iter()
            .filter(|p| p.klass().visible && !p.klass().virtual_)
            .map(|p| p.id().to_string())
            .collect()
    }

    /// Asks the front-end to show the signal's documentation.
    pub fn search_docs(&self, row: usize) {
        let Some((widget, row)) = self.row(row) else {
            return;
        };
        self.imp().app.search_docs(
            widget.book().as_deref(),
            Some(row.owner_type.as_str()),
            Some(row.signal.as_str()),
        );
    }
}
