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

//! Toolkit independent model of the controls an editor drives.
//!
//! Writing different content into an [`Input`] emits `changed`, whether
//! the write came from the user or from the editor itself, like the
//! toolkit controls it stands in for.

use super::kind::{flags_text, ComboRow, FlagRow};
use crate::utils::{Color, Signal, SignalHandlerId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    SpinButton {
        value: f64,
        lower: f64,
        upper: f64,
        step: f64,
        digits: u32,
    },
    Switch {
        active: bool,
    },
    ComboBox {
        rows: Vec<ComboRow>,
        active: Option<usize>,
    },
    FlagsList {
        rows: Vec<FlagRow>,
        text: String,
    },
    Entry {
        text: String,
        editable: bool,
        /// Holds at most one character.
        single_char: bool,
    },
    TextView {
        text: String,
    },
    ColorButton {
        color: Color,
        text: String,
    },
}

impl Control {
    pub fn spin_button() -> Self {
        Self::SpinButton {
            value: 0.0,
            lower: f64::MIN,
            upper: f64::MAX,
            step: 1.0,
            digits: 0,
        }
    }

    pub fn entry(editable: bool) -> Self {
        Self::Entry {
            text: String::new(),
            editable,
            single_char: false,
        }
    }

    fn clear(&mut self) {
        match self {
            Self::SpinButton { value, .. } => *value = 0.0,
            Self::Switch { active } => *active = false,
            Self::ComboBox { active, .. } => *active = None,
            Self::FlagsList { rows, text } => {
                rows.iter_mut().for_each(|r| r.setting = false);
                text.clear();
            }
            Self::Entry { text, .. } | Self::TextView { text } => text.clear(),
            Self::ColorButton { color, text } => {
                *color = Color::BLACK;
                text.clear();
            }
        }
    }
}

mod imp {
    use super::*;

    #[derive(Debug)]
    pub struct Input {
        pub control: RefCell<Control>,
        pub sensitive: Cell<bool>,
        pub tooltip: RefCell<Option<String>>,
        pub revision: Cell<u64>,
        pub changed: Signal<super::Input>,
    }
}

#[derive(Debug, Clone)]
pub struct Input(Rc<imp::Input>);

impl PartialEq for Input {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Input {
    pub fn new(control: Control) -> Self {
        Self(Rc::new(imp::Input {
            control: RefCell::new(control),
            sensitive: Cell::new(true),
            tooltip: RefCell::new(None),
            revision: Cell::new(0),
            changed: Signal::new("changed"),
        }))
    }

    #[inline(always)]
    fn imp(&self) -> &imp::Input {
        &self.0
    }

    pub fn control(&self) -> Control {
        self.imp().control.borrow().clone()
    }

    /// Number of writes that changed the content.
    pub fn revision(&self) -> u64 {
        self.imp().revision.get()
    }

    pub fn sensitive(&self) -> bool {
        self.imp().sensitive.get()
    }

    pub fn set_sensitive(&self, sensitive: bool) {
        self.imp().sensitive.set(sensitive);
    }

    pub fn tooltip(&self) -> Option<String> {
        self.imp().tooltip.borrow().clone()
    }

    pub fn set_tooltip(&self, tooltip: Option<&str>) {
        *self.imp().tooltip.borrow_mut() = tooltip.map(str::to_string);
    }

    pub fn connect_changed<F: Fn(&Input) + 'static>(&self, f: F) -> SignalHandlerId {
        self.imp().changed.connect(move |i, _| f(i))
    }

    pub fn disconnect(&self, id: SignalHandlerId) -> bool {
        self.imp().changed.disconnect(id)
    }

    pub fn block_signal(&self, id: SignalHandlerId) -> bool {
        self.imp().changed.block(id)
    }

    pub fn unblock_signal(&self, id: SignalHandlerId) -> bool {
        self.imp().changed.unblock(id)
    }

    /// Re-emits `changed` without touching the content, like pressing enter
    /// or leaving the control.
    pub fn activate(&self) {
        self.imp().changed.emit(self, &());
    }

    /// Applies `f` and emits `changed` if it reports a content change.
    fn update<F: FnOnce(&mut Control) -> bool>(&self, f: F) -> bool {
        let changed = f(&mut self.imp().control.borrow_mut());
        if changed {
            self.imp().revision.set(self.imp().revision.get() + 1);
            self.imp().changed.emit(self, &());
        }
        changed
    }

    /// Resets the content to its neutral state.
    pub fn clear(&self) {
        self.update(|c| {
            let before = c.clone();
            c.clear();
            *c != before
        });
    }

    pub fn value(&self) -> Option<f64> {
        match *self.imp().control.borrow() {
            Control::SpinButton { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Clamped into the current range and rounded to the displayed digits.
    pub fn set_value(&self, new: f64) {
        self.update(|c| match c {
            Control::SpinButton {
                value,
                lower,
                upper,
                digits,
                ..
            } => {
                let new = if new.is_nan() {
                    *lower
                } else {
                    let factor = 10f64.powi(*digits as i32);
                    ((new * factor).round() / factor).clamp(*lower, *upper)
                };
                std::mem::replace(value, new) != new
            }
            _ => false,
        });
    }

    pub fn set_range(&self, new_lower: f64, new_upper: f64, new_step: f64, new_digits: u32) {
        self.update(|c| match c {
            Control::SpinButton {
                value,
                lower,
                upper,
                step,
                digits,
            } => {
                *lower = new_lower;
                *upper = new_upper.max(new_lower);
                *step = new_step;
                *digits = new_digits;
                let clamped = value.clamp(*lower, *upper);
                std::mem::replace(value, clamped) != clamped
            }
            _ => false,
        });
    }

    pub fn digits(&self) -> Option<u32> {
        match *self.imp().control.borrow() {
            Control::SpinButton { digits, .. } => Some(digits),
            _ => None,
        }
    }

    pub fn active(&self) -> Option<bool> {
        match *self.imp().control.borrow() {
            Control::Switch { active } => Some(active),
            _ => None,
        }
    }

    pub fn set_active(&self, new: bool) {
        self.update(|c| match c {
            Control::Switch { active } => std::mem::replace(active, new) != new,
            _ => false,
        });
    }

    pub fn rows(&self) -> Vec<ComboRow> {
        match &*self.imp().control.borrow() {
            Control::ComboBox { rows, .. } => rows.clone(),
            _ => vec![],
        }
    }

    /// Replaces the rows, dropping the selection if it falls off the end.
    pub fn set_rows(&self, new: Vec<ComboRow>) {
        self.update(|c| match c {
            Control::ComboBox { rows, active } => {
                *rows = new;
                match *active {
                    Some(i) if i >= rows.len() => {
                        *active = None;
                        true
                    }
                    _ => false,
                }
            }
            _ => false,
        });
    }

    pub fn active_index(&self) -> Option<usize> {
        match *self.imp().control.borrow() {
            Control::ComboBox { active, .. } => active,
            _ => None,
        }
    }

    pub fn set_active_index(&self, new: Option<usize>) {
        self.update(|c| match c {
            Control::ComboBox { rows, active } => {
                let new = new.filter(|i| *i < rows.len());
                std::mem::replace(active, new) != new
            }
            _ => false,
        });
    }

    pub fn flag_rows(&self) -> Vec<FlagRow> {
        match &*self.imp().control.borrow() {
            Control::FlagsList { rows, .. } => rows.clone(),
            _ => vec![],
        }
    }

    pub fn set_flag_rows(&self, new_rows: Vec<FlagRow>, new_text: &str) {
        self.update(|c| match c {
            Control::FlagsList { rows, text } => {
                let changed = *rows != new_rows || text != new_text;
                *rows = new_rows;
                *text = new_text.to_string();
                changed
            }
            _ => false,
        });
    }

    /// Flips the checkbox of row `index` and updates the summary text.
    pub fn toggle_flag(&self, index: usize) {
        self.update(|c| match c {
            Control::FlagsList { rows, text } => match rows.get_mut(index) {
                Some(row) => {
                    row.setting = !row.setting;
                    *text = flags_text(rows);
                    true
                }
                None => false,
            },
            _ => false,
        });
    }

    pub fn text(&self) -> Option<String> {
        match &*self.imp().control.borrow() {
            Control::FlagsList { text, .. }
            | Control::Entry { text, .. }
            | Control::TextView { text }
            | Control::ColorButton { text, .. } => Some(text.clone()),
            _ => None,
        }
    }

    pub fn set_text(&self, new: &str) {
        self.update(|c| match c {
            Control::Entry { text, .. } | Control::TextView { text } => {
                if text == new {
                    false
                } else {
                    *text = new.to_string();
                    true
                }
            }
            _ => false,
        });
    }

    pub fn editable(&self) -> bool {
        match *self.imp().control.borrow() {
            Control::Entry { editable, .. } => editable,
            Control::TextView { .. } => true,
            _ => false,
        }
    }

    pub fn set_single_char(&self, single: bool) {
        if let Control::Entry { single_char, .. } = &mut *self.imp().control.borrow_mut() {
            *single_char = single;
        }
    }

    /// Typing into the control. A single-character entry keeps only the
    /// first inserted character, replacing its content. Returns `false` if
    /// the control does not accept typing.
    pub fn insert_text(&self, new: &str) -> bool {
        if !self.editable() {
            return false;
        }
        self.update(|c| match c {
            Control::Entry {
                text, single_char, ..
            } => {
                let before = text.clone();
                if *single_char {
                    if let Some(first) = new.chars().next() {
                        *text = first.to_string();
                    }
                } else {
                    text.push_str(new);
                }
                *text != before
            }
            Control::TextView { text } => {
                text.push_str(new);
                !new.is_empty()
            }
            _ => false,
        });
        true
    }

    /// Erases the content. Single-character entries refuse deletion.
    pub fn delete_text(&self) -> bool {
        if !self.editable() {
            return false;
        }
        let mut accepted = false;
        self.update(|c| match c {
            Control::Entry {
                single_char: true, ..
            } => false,
            Control::Entry { text, .. } | Control::TextView { text } => {
                accepted = true;
                let changed = !text.is_empty();
                text.clear();
                changed
            }
            _ => false,
        });
        accepted
    }

    pub fn color(&self) -> Option<Color> {
        match *self.imp().control.borrow() {
            Control::ColorButton { color, .. } => Some(color),
            _ => None,
        }
    }

    pub fn set_color(&self, new: Color, new_text: &str) {
        self.update(|c| match c {
            Control::ColorButton { color, text } => {
                let changed = *color != new || text != new_text;
                *color = new;
                *text = new_text.to_string();
                changed
            }
            _ => false,
        });
    }
}
