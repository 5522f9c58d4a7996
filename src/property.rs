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

//! # Properties
//!
//! A [`Property`] is the observable value holder the editors bind to. It
//! lives in its [`Project`]'s arena; editors keep a [`PropertyHandle`] and
//! re-validate it on every access.

use crate::error::{Error, Result};
use crate::project::{Project, PropertyHandle, WeakProject, Widget, WidgetId};
use crate::utils::{Signal, SignalHandlerId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub mod class;
pub mod value;

pub use class::*;
pub use value::*;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PropertyState: u8 {
        /// Value differs from the class default.
        const CHANGED = 1 << 0;
        /// Not supported by the project's target toolkit version.
        const UNSUPPORTED = 1 << 1;
        /// Editing is disabled until the target version changes.
        const SUPPORT_DISABLED = 1 << 2;
    }
}

/// Outcome of a property's verify function.
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    Accept,
    Reject,
    Coerce(Value),
}

/// The three tooltips a property can show.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tooltips {
    pub tooltip: Option<String>,
    pub insensitive: Option<String>,
    pub support: Option<String>,
}

type VerifyFn = Rc<dyn Fn(&Property, &Value) -> Verification>;

mod imp {
    use super::*;

    pub struct Property {
        pub klass: Rc<PropertyClass>,
        pub value: RefCell<Value>,
        pub enabled: Cell<bool>,
        pub sensitive: Cell<bool>,
        pub state: Cell<PropertyState>,
        pub insensitive_tooltip: RefCell<Option<String>>,
        pub support_warning: RefCell<Option<String>>,
        pub verify: RefCell<Option<VerifyFn>>,
        pub widget: WidgetId,
        pub handle: Cell<Option<PropertyHandle>>,
        pub project: WeakProject,
        pub destroyed: Cell<bool>,
        pub value_changed: Signal<super::Property, (Value, Value)>,
        pub notify_enabled: Signal<super::Property>,
        pub notify_sensitive: Signal<super::Property>,
        pub notify_state: Signal<super::Property>,
        pub tooltip_changed: Signal<super::Property, Tooltips>,
        pub destroy: Signal<super::Property>,
    }

    impl std::fmt::Debug for Property {
        fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
            fmt.debug_struct("Property")
                .field("id", &self.klass.id)
                .field("value", &self.value.borrow())
                .field("enabled", &self.enabled.get())
                .field("sensitive", &self.sensitive.get())
                .field("state", &self.state.get())
                .field("handle", &self.handle.get())
                .finish()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Property(Rc<imp::Property>);

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Property {}

impl Property {
    pub(crate) fn new(klass: Rc<PropertyClass>, widget: WidgetId, project: WeakProject) -> Self {
        let value = klass.default_value();
        let enabled = !klass.optional || klass.optional_default;
        Self(Rc::new(imp::Property {
            value: RefCell::new(value),
            enabled: Cell::new(enabled),
            sensitive: Cell::new(true),
            state: Cell::new(PropertyState::empty()),
            insensitive_tooltip: RefCell::new(None),
            support_warning: RefCell::new(None),
            verify: RefCell::new(None),
            widget,
            handle: Cell::new(None),
            project,
            destroyed: Cell::new(false),
            value_changed: Signal::new("value-changed"),
            notify_enabled: Signal::new("notify::enabled"),
            notify_sensitive: Signal::new("notify::sensitive"),
            notify_state: Signal::new("notify::state"),
            tooltip_changed: Signal::new("tooltip-changed"),
            destroy: Signal::new("destroy"),
            klass,
        }))
    }

    #[inline(always)]
    fn imp(&self) -> &imp::Property {
        &self.0
    }

    pub fn klass(&self) -> &Rc<PropertyClass> {
        &self.imp().klass
    }

    pub fn id(&self) -> &str {
        &self.imp().klass.id
    }

    pub fn value(&self) -> Value {
        self.imp().value.borrow().clone()
    }

    pub fn handle(&self) -> Option<PropertyHandle> {
        self.imp().handle.get()
    }

    pub(crate) fn set_handle(&self, handle: PropertyHandle) {
        self.imp().handle.set(Some(handle));
    }

    pub fn widget_id(&self) -> WidgetId {
        self.imp().widget
    }

    pub fn project(&self) -> Option<Project> {
        self.imp().project.upgrade()
    }

    pub fn widget(&self) -> Option<Widget> {
        self.project()?.widget(self.imp().widget)
    }

    pub fn is_destroyed(&self) -> bool {
        self.imp().destroyed.get()
    }

    pub fn equals_value(&self, value: &Value) -> bool {
        *self.imp().value.borrow() == *value
    }

    /// Installs the function consulted on every write after the class
    /// constraints have been applied.
    pub fn set_verify_func<F>(&self, f: F)
    where
        F: Fn(&Property, &Value) -> Verification + 'static,
    {
        *self.imp().verify.borrow_mut() = Some(Rc::new(f));
    }

    /// Writes `value`, returning `false` if it was refused. The stored value
    /// may still differ from `value` if it was coerced.
    pub fn set_value(&self, value: Value) -> bool {
        match self.try_set_value(value) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("{}", err);
                false
            }
        }
    }

    pub fn try_set_value(&self, value: Value) -> Result<()> {
        if self.is_destroyed() {
            return Err(Error::Destroyed);
        }
        let kind = &self.klass().kind;
        if !kind.accepts(&value) {
            return Err(Error::TypeMismatch {
                property: self.id().to_string(),
                expected: kind.default_value().type_name(),
                found: value.type_name(),
            });
        }
        let mut value = kind.validate(&value).unwrap_or(value);
        let verify = self.imp().verify.borrow().clone();
        if let Some(verify) = verify {
            match verify(self, &value) {
                Verification::Accept => {}
                Verification::Reject => {
                    return Err(Error::Rejected {
                        property: self.id().to_string(),
                    });
                }
                Verification::Coerce(coerced) if kind.accepts(&coerced) => {
                    value = kind.validate(&coerced).unwrap_or(coerced);
                }
                Verification::Coerce(coerced) => {
                    return Err(Error::TypeMismatch {
                        property: self.id().to_string(),
                        expected: kind.default_value().type_name(),
                        found: coerced.type_name(),
                    });
                }
            }
        }
        if self.equals_value(&value) {
            return Ok(());
        }
        let old = self.imp().value.replace(value.clone());
        self.update_changed_state();
        if let Some(project) = self.project() {
            project.set_modified(true);
        }
        self.imp().value_changed.emit(self, &(old, value));
        Ok(())
    }

    /// Restores the class default.
    pub fn reset(&self) -> bool {
        self.set_value(self.klass().default_value())
    }

    pub fn is_default(&self) -> bool {
        self.equals_value(&self.klass().default_value())
    }

    fn update_changed_state(&self) {
        let mut state = self.state();
        state.set(PropertyState::CHANGED, !self.is_default());
        self.set_state(state);
    }

    fn set_state(&self, state: PropertyState) {
        if self.imp().state.replace(state) != state {
            self.imp().notify_state.emit(self, &());
        }
    }

    pub fn state(&self) -> PropertyState {
        self.imp().state.get()
    }

    pub fn enabled(&self) -> bool {
        self.imp().enabled.get()
    }

    /// Only meaningful for optional properties; disabled ones are not saved.
    pub fn set_enabled(&self, enabled: bool) {
        if self.imp().enabled.replace(enabled) == enabled {
            return;
        }
        if let Some(project) = self.project() {
            project.set_modified(true);
        }
        self.imp().notify_enabled.emit(self, &());
    }

    pub fn sensitive(&self) -> bool {
        self.imp().sensitive.get()
    }

    /// `reason` becomes the insensitive tooltip.
    pub fn set_sensitive(&self, sensitive: bool, reason: Option<&str>) {
        let reason = if sensitive {
            None
        } else {
            reason.map(str::to_string)
        };
        let tooltip_changed = self.imp().insensitive_tooltip.replace(reason.clone()) != reason;
        let sensitivity_changed = self.imp().sensitive.replace(sensitive) != sensitive;
        if tooltip_changed {
            self.imp().tooltip_changed.emit(self, &self.tooltips());
        }
        if sensitivity_changed {
            self.imp().notify_sensitive.emit(self, &());
        }
    }

    /// Flags the property as unsupported by the target version with
    /// `reason`, or clears the flag when `reason` is `None`.
    pub fn set_support_warning(&self, disable: bool, reason: Option<&str>) {
        let reason = reason.map(str::to_string);
        let tooltip_changed = self.imp().support_warning.replace(reason.clone()) != reason;
        let mut state = self.state();
        state.set(PropertyState::UNSUPPORTED, reason.is_some());
        state.set(PropertyState::SUPPORT_DISABLED, disable);
        if tooltip_changed {
            self.imp().tooltip_changed.emit(self, &self.tooltips());
        }
        self.set_state(state);
    }

    pub fn tooltips(&self) -> Tooltips {
        Tooltips {
            tooltip: self.klass().tooltip.clone(),
            insensitive: self.imp().insensitive_tooltip.borrow().clone(),
            support: self.imp().support_warning.borrow().clone(),
        }
    }

    /// Display string of the current value.
    pub fn make_string(&self) -> String {
        self.make_string_for(&self.imp().value.borrow())
    }

    pub fn make_string_for(&self, value: &Value) -> String {
        let project = self.project();
        self.klass().make_string(value, &|id| {
            project
                .as_ref()
                .and_then(|p| p.widget(id))
                .map(|w| w.name())
        })
    }

    pub fn connect_value_changed<F>(&self, f: F) -> SignalHandlerId
    where
        F: Fn(&Property, &Value, &Value) + 'static,
    {
        self.imp()
            .value_changed
            .connect(move |p, (old, new)| f(p, old, new))
    }

    pub fn connect_enabled_notify<F: Fn(&Property) + 'static>(&self, f: F) -> SignalHandlerId {
        self.imp().notify_enabled.connect(move |p, _| f(p))
    }

    pub fn connect_sensitive_notify<F: Fn(&Property) + 'static>(&self, f: F) -> SignalHandlerId {
        self.imp().notify_sensitive.connect(move |p, _| f(p))
    }

    pub fn connect_state_notify<F: Fn(&Property) + 'static>(&self, f: F) -> SignalHandlerId {
        self.imp().notify_state.connect(move |p, _| f(p))
    }

    pub fn connect_tooltip_changed<F>(&self, f: F) -> SignalHandlerId
    where
        F: Fn(&Property, &Tooltips) + 'static,
    {
        self.imp().tooltip_changed.connect(f)
    }

    /// Emitted once, after the property has left its project.
    pub fn connect_destroy<F: Fn(&Property) + 'static>(&self, f: F) -> SignalHandlerId {
        self.imp().destroy.connect(move |p, _| f(p))
    }

    pub fn disconnect(&self, id: SignalHandlerId) -> bool {
        let imp = self.imp();
        imp.value_changed.disconnect(id)
            || imp.notify_enabled.disconnect(id)
            || imp.notify_sensitive.disconnect(id)
            || imp.notify_state.disconnect(id)
            || imp.tooltip_changed.disconnect(id)
            || imp.destroy.disconnect(id)
    }

    pub fn block_signal(&self, id: SignalHandlerId) -> bool {
        let imp = self.imp();
        imp.value_changed.block(id)
            || imp.notify_enabled.block(id)
            || imp.notify_sensitive.block(id)
            || imp.notify_state.block(id)
            || imp.tooltip_changed.block(id)
            || imp.destroy.block(id)
    }

    pub fn unblock_signal(&self, id: SignalHandlerId) -> bool {
        let imp = self.imp();
        imp.value_changed.unblock(id)
            || imp.notify_enabled.unblock(id)
            || imp.notify_sensitive.unblock(id)
            || imp.notify_state.unblock(id)
            || imp.tooltip_changed.unblock(id)
            || imp.destroy.unblock(id)
    }

    /// Total number of connected handlers over every signal.
    pub fn n_handlers(&self) -> usize {
        let imp = self.imp();
        imp.value_changed.n_handlers()
            + imp.notify_enabled.n_handlers()
            + imp.notify_sensitive.n_handlers()
            + imp.notify_state.n_handlers()
            + imp.tooltip_changed.n_handlers()
            + imp.destroy.n_handlers()
    }

    pub(crate) fn dispose(&self) {
        let imp = self.imp();
        if imp.destroyed.replace(true) {
            return;
        }
        imp.destroy.emit(self, &());
        imp.value_changed.disconnect_all();
        imp.notify_enabled.disconnect_all();
        imp.notify_sensitive.disconnect_all();
        imp.notify_state.disconnect_all();
        imp.tooltip_changed.disconnect_all();
        imp.destroy.disconnect_all();
    }
}
