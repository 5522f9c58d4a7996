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

//! # Editor properties
//!
//! An [`EditorProperty`] pairs one [`Input`] with at most one [`Property`]
//! of a given [`PropertyClass`]. Property changes flow into the input under
//! the `loading` guard; input changes flow back through [`EditorProperty::commit`]
//! under the `committing` guard, with the editor's own value observer
//! blocked. A write the property refuses or coerces is reconciled by
//! loading the stored value back into the input.
//!
//! The editor never owns its property: it keeps the project and the
//! property's arena handle and re-validates them on every access.

use crate::app::{App, CommitMode};
use crate::project::{PropertyHandle, WeakProject, Widget};
use crate::property::{
    EnumClass, FlagsClass, ParamSpecKind, Property, PropertyClass, PropertyState, Value,
};
use crate::utils::{Color, FlagGuard, Inhibit, Signal, SignalHandlerId};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub mod dialogs;
pub mod input;
pub mod kind;

pub use dialogs::*;
pub use input::*;
pub use kind::*;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabelState {
    pub markup: String,
    pub bold: bool,
    pub sensitive: bool,
    pub tooltip: Option<String>,
    pub visible: bool,
}

/// The icon shown next to properties the target version does not support.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WarningState {
    pub visible: bool,
    pub tooltip: Option<String>,
}

/// Check box of optional properties.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckState {
    pub active: bool,
    pub sensitive: bool,
}

#[derive(Debug)]
struct Binding {
    project: WeakProject,
    handle: PropertyHandle,
    value_changed: SignalHandlerId,
    handlers: SmallVec<[SignalHandlerId; 6]>,
}

/// Arguments of the commit hook: the value and the hook's verdict.
type CommitArgs = (Value, Cell<Inhibit>);

mod imp {
    use super::*;

    pub struct EditorProperty {
        pub app: App,
        pub klass: Rc<PropertyClass>,
        pub kind: ValueKind,
        pub input: Input,
        pub input_changed: Cell<Option<SignalHandlerId>>,
        /// Input revision after the last load or commit.
        pub loaded_revision: Cell<u64>,
        pub label: RefCell<LabelState>,
        pub warning: RefCell<WarningState>,
        pub check: RefCell<Option<CheckState>>,
        pub visible: Cell<bool>,
        pub binding: RefCell<Option<Binding>>,
        pub loading: Cell<bool>,
        pub committing: Cell<bool>,
        pub use_command: Cell<bool>,
        pub commit: Signal<super::EditorProperty, CommitArgs>,
    }

    impl std::fmt::Debug for EditorProperty {
        fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
            fmt.debug_struct("EditorProperty")
                .field("property", &self.klass.id)
                .field("kind", &self.kind)
                .field("input", &self.input.control())
                .field("binding", &self.binding.borrow())
                .field("loading", &self.loading.get())
                .field("committing", &self.committing.get())
                .field("use_command", &self.use_command.get())
                .finish()
        }
    }

    impl Drop for EditorProperty {
        fn drop(&mut self) {
            let Some(binding) = self.binding.get_mut().take() else {
                return;
            };
            if let Some(property) = binding
                .project
                .upgrade()
                .and_then(|p| p.property(binding.handle))
            {
                for id in binding.handlers {
                    property.disconnect(id);
                }
            }
        }
    }
}

/// Unblocks the editor's value observer when dropped.
struct BlockGuard<'a> {
    property: &'a Property,
    id: Option<SignalHandlerId>,
}

impl<'a> BlockGuard<'a> {
    fn new(property: &'a Property, id: Option<SignalHandlerId>) -> Self {
        if let Some(id) = id {
            property.block_signal(id);
        }
        Self { property, id }
    }
}

impl Drop for BlockGuard<'_> {
    fn drop(&mut self) {
        if let Some(id) = self.id {
            self.property.unblock_signal(id);
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorProperty(Rc<imp::EditorProperty>);

impl PartialEq for EditorProperty {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for EditorProperty {}

impl EditorProperty {
    pub fn new(app: &App, klass: Rc<PropertyClass>) -> Self {
        let kind = ValueKind::for_class(&klass);
        let control = match kind {
            ValueKind::Numeric(_) => Control::spin_button(),
            ValueKind::Boolean => Control::Switch { active: false },
            ValueKind::Enum => Control::ComboBox {
                rows: vec![],
                active: None,
            },
            ValueKind::Flags => Control::FlagsList {
                rows: vec![],
                text: String::new(),
            },
            ValueKind::Unichar => Control::Entry {
                text: String::new(),
                editable: true,
                single_char: true,
            },
            ValueKind::Color => Control::ColorButton {
                color: Color::BLACK,
                text: String::new(),
            },
            ValueKind::Text { multiline: true } => Control::TextView {
                text: String::new(),
            },
            ValueKind::Text { multiline: false } | ValueKind::NamedIcon => Control::entry(true),
            ValueKind::Object | ValueKind::Objects => Control::entry(false),
        };
        let use_command = app.settings().commit_mode == CommitMode::Command;
        let ret = Self(Rc::new(imp::EditorProperty {
            app: app.clone(),
            kind,
            input: Input::new(control),
            input_changed: Cell::new(None),
            loaded_revision: Cell::new(0),
            label: RefCell::new(LabelState {
                markup: format!("{}:", klass.name),
                tooltip: klass.tooltip.clone(),
                visible: true,
                ..LabelState::default()
            }),
            warning: RefCell::new(WarningState::default()),
            check: RefCell::new(klass.optional.then(CheckState::default)),
            visible: Cell::new(true),
            binding: RefCell::new(None),
            loading: Cell::new(false),
            committing: Cell::new(false),
            use_command: Cell::new(use_command),
            commit: Signal::new("commit"),
            klass,
        }));
        let id = ret.imp().input.connect_changed({
            let weak = ret.downgrade();
            move |_| {
                if let Some(editor) = Self::upgrade(&weak) {
                    editor.on_control_changed();
                }
            }
        });
        ret.imp().input_changed.set(Some(id));
        ret.synchronize();
        ret
    }

    #[inline(always)]
    fn imp(&self) -> &imp::EditorProperty {
        &self.0
    }

    fn downgrade(&self) -> Weak<imp::EditorProperty> {
        Rc::downgrade(&self.0)
    }

    fn upgrade(weak: &Weak<imp::EditorProperty>) -> Option<Self> {
        weak.upgrade().map(Self)
    }

    pub fn app(&self) -> &App {
        &self.imp().app
    }

    pub fn klass(&self) -> &Rc<PropertyClass> {
        &self.imp().klass
    }

    pub fn kind(&self) -> ValueKind {
        self.imp().kind
    }

    pub fn input(&self) -> &Input {
        &self.imp().input
    }

    pub fn label(&self) -> LabelState {
        self.imp().label.borrow().clone()
    }

    pub fn warning(&self) -> WarningState {
        self.imp().warning.borrow().clone()
    }

    /// `None` unless the property class is optional.
    pub fn check(&self) -> Option<CheckState> {
        *self.imp().check.borrow()
    }

    pub fn is_visible(&self) -> bool {
        self.imp().visible.get()
    }

    pub fn is_loading(&self) -> bool {
        self.imp().loading.get()
    }

    pub fn is_committing(&self) -> bool {
        self.imp().committing.get()
    }

    pub fn use_command(&self) -> bool {
        self.imp().use_command.get()
    }

    pub fn set_use_command(&self, use_command: bool) {
        self.imp().use_command.set(use_command);
    }

    /// The bound property, if it is still alive.
    pub fn property(&self) -> Option<Property> {
        let binding = self.imp().binding.borrow();
        let binding = binding.as_ref()?;
        binding.project.upgrade()?.property(binding.handle)
    }

    /// Runs before every write. Returning `Inhibit(true)` skips the write;
    /// the input is still reconciled with the stored value.
    pub fn connect_commit<F>(&self, f: F) -> SignalHandlerId
    where
        F: Fn(&EditorProperty, &Value) -> Inhibit + 'static,
    {
        self.imp().commit.connect(move |editor, (value, inhibit)| {
            if f(editor, value).0 {
                inhibit.set(Inhibit(true));
            }
        })
    }

    pub fn disconnect_commit(&self, id: SignalHandlerId) -> bool {
        self.imp().commit.disconnect(id)
    }

    fn accepts(&self, property: &Property) -> bool {
        let klass = property.klass();
        Rc::ptr_eq(klass, self.klass())
            || (klass.id == self.klass().id && klass.kind == self.klass().kind)
    }

    /// Attaches to `property`, or detaches with `None`. The input shows the
    /// property's state when this returns.
    pub fn bind(&self, property: Option<&Property>) {
        let current = self.property();
        if current.as_ref() == property
            && (property.is_some() || self.imp().binding.borrow().is_none())
        {
            return;
        }
        if let Some(property) = property {
            if !self.accepts(property) {
                log::warn!(
                    "Editor for `{}` cannot bind property `{}` of a different class",
                    self.klass().id,
                    property.id()
                );
                return;
            }
            if property.handle().is_none() || property.project().is_none() {
                log::warn!("Property `{}` does not belong to a project", property.id());
                return;
            }
        }
        self.detach();
        if let Some(property) = property {
            self.attach(property);
        }
        self.synchronize();
    }

    fn detach(&self) {
        let Some(binding) = self.imp().binding.borrow_mut().take() else {
            return;
        };
        if let Some(property) = binding
            .project
            .upgrade()
            .and_then(|p| p.property(binding.handle))
        {
            for id in binding.handlers {
                property.disconnect(id);
            }
        }
    }

    fn attach(&self, property: &Property) {
        let (Some(handle), Some(project)) = (property.handle(), property.project()) else {
            return;
        };
        let weak = self.downgrade();
        let value_changed = property.connect_value_changed({
            let weak = weak.clone();
            move |_, _, _| {
                if let Some(editor) = Self::upgrade(&weak) {
                    editor.synchronize();
                }
            }
        });
        let mut handlers: SmallVec<[SignalHandlerId; 6]> = SmallVec::new();
        handlers.push(value_changed);
        handlers.push(property.connect_enabled_notify({
            let weak = weak.clone();
            move |p| {
                if let Some(editor) = Self::upgrade(&weak) {
                    editor.sync_sensitivity(Some(p));
                }
            }
        }));
        handlers.push(property.connect_sensitive_notify({
            let weak = weak.clone();
            move |p| {
                if let Some(editor) = Self::upgrade(&weak) {
                    editor.sync_sensitivity(Some(p));
                    editor.sync_tooltips(Some(p));
                }
            }
        }));
        handlers.push(property.connect_state_notify({
            let weak = weak.clone();
            move |p| {
                if let Some(editor) = Self::upgrade(&weak) {
                    editor.sync_label(Some(p));
                    editor.sync_sensitivity(Some(p));
                }
            }
        }));
        handlers.push(property.connect_tooltip_changed({
            let weak = weak.clone();
            move |p, _| {
                if let Some(editor) = Self::upgrade(&weak) {
                    editor.sync_tooltips(Some(p));
                }
            }
        }));
        handlers.push(property.connect_destroy(move |_| {
            if let Some(editor) = Self::upgrade(&weak) {
                log::debug!("Property `{}` destroyed, unbinding", editor.klass().id);
                editor.bind(None);
            }
        }));
        *self.imp().binding.borrow_mut() = Some(Binding {
            project: project.downgrade(),
            handle,
            value_changed,
            handlers,
        });
    }

    /// Binds the property of `widget` matching this editor's class, showing
    /// the editor only if there is one.
    pub fn load_by_widget(&self, widget: Option<&Widget>) {
        let klass = self.klass();
        let property = widget.and_then(|w| {
            if klass.packing {
                w.pack_property(&klass.id)
            } else {
                w.property(&klass.id)
            }
        });
        self.bind(property.as_ref());
        let visible = property.is_some();
        self.imp().visible.set(visible);
        self.imp().label.borrow_mut().visible = visible;
    }

    /// Refreshes everything the editor shows from the bound property.
    pub fn synchronize(&self) {
        let _loading = FlagGuard::raise(&self.imp().loading);
        let property = self.property();
        self.sync_tooltips(property.as_ref());
        self.sync_label(property.as_ref());
        self.sync_sensitivity(property.as_ref());
        self.load_value(property.as_ref());
        self.imp().loaded_revision.set(self.imp().input.revision());
    }

    fn sync_tooltips(&self, property: Option<&Property>) {
        let (tooltip, support) = match property {
            Some(p) => {
                let tooltips = p.tooltips();
                let tooltip = if p.sensitive() {
                    tooltips.tooltip
                } else {
                    tooltips.insensitive
                };
                (tooltip, tooltips.support)
            }
            None => (self.klass().tooltip.clone(), None),
        };
        self.imp().input.set_tooltip(tooltip.as_deref());
        self.imp().label.borrow_mut().tooltip = tooltip;
        self.imp().warning.borrow_mut().tooltip = support;
    }

    fn sync_label(&self, property: Option<&Property>) {
        let state = property.map(Property::state).unwrap_or_else(PropertyState::empty);
        let bold = state.contains(PropertyState::CHANGED);
        {
            let mut label = self.imp().label.borrow_mut();
            label.bold = bold;
            label.markup = if bold {
                format!("<b>{}:</b>", self.klass().name)
            } else {
                format!("{}:", self.klass().name)
            };
        }
        self.imp().warning.borrow_mut().visible = state.contains(PropertyState::UNSUPPORTED);
    }

    fn sync_sensitivity(&self, property: Option<&Property>) {
        let (sensitive, check) = match property {
            Some(p) => {
                let supported = !p.state().contains(PropertyState::SUPPORT_DISABLED);
                (
                    p.sensitive() && supported && p.enabled(),
                    CheckState {
                        active: p.enabled(),
                        sensitive: p.sensitive() && supported,
                    },
                )
            }
            None => (false, CheckState::default()),
        };
        self.imp().input.set_sensitive(sensitive);
        self.imp().label.borrow_mut().sensitive = sensitive;
        if let Some(state) = self.imp().check.borrow_mut().as_mut() {
            *state = check;
        }
    }

    fn enum_class(&self) -> Option<&Rc<EnumClass>> {
        match &self.klass().kind {
            ParamSpecKind::Enum { class, .. } => Some(class),
            _ => None,
        }
    }

    fn flags_class(&self) -> Option<&Rc<FlagsClass>> {
        match &self.klass().kind {
            ParamSpecKind::Flags { class, .. } => Some(class),
            _ => None,
        }
    }

    fn load_value(&self, property: Option<&Property>) {
        let input = &self.imp().input;
        let Some(property) = property else {
            input.clear();
            return;
        };
        let value = property.value();
        match self.kind() {
            ValueKind::Numeric(ty) => {
                if let ParamSpecKind::Numeric {
                    minimum, maximum, ..
                } = self.klass().kind
                {
                    let digits = if ty.is_float() {
                        self.app().settings().float_digits
                    } else {
                        0
                    };
                    let step = 10f64.powi(-(digits as i32));
                    input.set_range(minimum, maximum, step, digits);
                }
                let v = decode_numeric(&value).unwrap_or_else(|| {
                    log::warn!(
                        "Unsupported value type {} for numeric property `{}`",
                        value.type_name(),
                        property.id()
                    );
                    0.0
                });
                input.set_value(v);
            }
            ValueKind::Boolean => input.set_active(value.as_bool().unwrap_or(false)),
            ValueKind::Enum => {
                let rows = match self.enum_class() {
                    Some(class) => enum_rows(class, &self.app().displayable()),
                    None => vec![],
                };
                let index = (!rows.is_empty()).then(|| decode_enum(&rows, &value));
                input.set_rows(rows);
                input.set_active_index(index);
            }
            ValueKind::Flags => {
                let rows = match self.flags_class() {
                    Some(class) => decode_flags(class, &self.app().displayable(), &value),
                    None => vec![],
                };
                let text = flags_text(&rows);
                input.set_flag_rows(rows, &text);
            }
            ValueKind::Unichar => input.set_text(&decode_unichar(&value)),
            ValueKind::Color => input.set_color(decode_color(&value), &property.make_string()),
            ValueKind::Text { .. } => {
                let text = property.make_string();
                if input.text().as_deref() != Some(text.as_str()) {
                    input.set_text(&text);
                }
            }
            ValueKind::NamedIcon | ValueKind::Object | ValueKind::Objects => {
                input.set_text(&property.make_string())
            }
        }
    }

    fn on_control_changed(&self) {
        if self.is_loading() || self.is_committing() {
            return;
        }
        let Some(property) = self.property() else {
            return;
        };
        /* Activation without an edit must not write back a lossy decode. */
        if !self.kind().is_text()
            && self.imp().input.revision() == self.imp().loaded_revision.get()
        {
            return;
        }
        let Some(value) = self.encode(&property) else {
            return;
        };
        if self.kind() == ValueKind::Flags && property.equals_value(&value) {
            return;
        }
        self.commit(value);
    }

    /// Input content as a value of the property's type.
    fn encode(&self, property: &Property) -> Option<Value> {
        let input = &self.imp().input;
        match self.kind() {
            ValueKind::Numeric(ty) => Some(encode_numeric(ty, input.value()?)),
            ValueKind::Boolean => Some(Value::Boolean(input.active()?)),
            ValueKind::Enum => encode_enum(&input.rows(), input.active_index()),
            ValueKind::Flags => Some(encode_flags(&input.flag_rows())),
            ValueKind::Unichar => Some(encode_unichar(&input.text()?)),
            ValueKind::Color => Some(Value::Color(Some(input.color()?))),
            ValueKind::Text { .. } | ValueKind::NamedIcon => {
                let text = input.text()?;
                let stored = property.value();
                Some(encode_text(stored.as_str(), Some(text.as_str())))
            }
            ValueKind::Object | ValueKind::Objects => None,
        }
    }

    /// Writes `value` into the bound property, directly or as an undoable
    /// command, then reloads the input if the property ended up holding
    /// something else.
    pub fn commit(&self, value: Value) {
        if self.is_committing() || self.is_loading() {
            log::debug!(
                "Ignoring re-entrant commit to `{}` of {:?}",
                self.klass().id,
                value
            );
            return;
        }
        let Some(property) = self.property() else {
            return;
        };
        {
            let value_changed = self
                .imp()
                .binding
                .borrow()
                .as_ref()
                .map(|b| b.value_changed);
            let _committing = FlagGuard::raise(&self.imp().committing);
            let _blocked = BlockGuard::new(&property, value_changed);
            let args: CommitArgs = (value.clone(), Cell::new(Inhibit(false)));
            self.imp().commit.emit(self, &args);
            if !args.1.get().0 {
                if self.use_command() {
                    self.app().command_set_property(&property, value.clone());
                } else {
                    property.set_value(value.clone());
                }
            }
        }
        if property.is_destroyed() {
            return;
        }
        let stored = property.value();
        if stored != value || self.encode(&property).as_ref() != Some(&stored) {
            log::debug!(
                "Input of `{}` does not show {:?}, reloading",
                property.id(),
                stored
            );
            self.synchronize();
        } else {
            self.imp().loaded_revision.set(self.imp().input.revision());
        }
    }

    /// Flips the enabled state of an optional property.
    pub fn toggle_enabled(&self) {
        if !self.klass().optional {
            return;
        }
        if let Some(property) = self.property() {
            property.set_enabled(!property.enabled());
        }
    }

    fn object_candidates(&self, property: &Property) -> Vec<ObjectCandidate> {
        let (ParamSpecKind::Object { type_name } | ParamSpecKind::Objects { type_name }) =
            &self.klass().kind
        else {
            return vec![];
        };
        let Some(project) = property.project() else {
            return vec![];
        };
        let owner = property.widget_id();
        let current = property.value();
        project
            .widgets()
            .into_iter()
            .filter(|w| w.id() != owner && w.is_a(type_name))
            .map(|w| ObjectCandidate {
                selected: match &current {
                    Value::Object(Some(id)) => *id == w.id(),
                    Value::Objects(ids) => ids.contains(&w.id()),
                    _ => false,
                },
                id: w.id(),
                name: w.name(),
            })
            .collect()
    }

    fn empty_value(&self) -> Value {
        match self.kind() {
            ValueKind::Object => Value::Object(None),
            ValueKind::Objects => Value::Objects(vec![]),
            ValueKind::Color => Value::Color(None),
            _ => Value::String(None),
        }
    }

    /// Runs the chooser for this editor's kind and commits the outcome.
    /// Kinds edited in place are ignored.
    pub fn show_dialog(&self, dialogs: &dyn PropertyDialogs) {
        if !self.kind().uses_dialog() {
            return;
        }
        let Some(property) = self.property() else {
            return;
        };
        let stored = property.value();
        let name = &self.klass().name;
        let request = match self.kind() {
            ValueKind::Object => DialogRequest::Object {
                title: format!("Choose {} in this project", name),
                candidates: self.object_candidates(&property),
            },
            ValueKind::Objects => DialogRequest::Objects {
                title: format!("Choose {} in this project", name),
                candidates: self.object_candidates(&property),
            },
            ValueKind::Color => DialogRequest::Color {
                title: format!("Select {}", name),
                current: decode_color(&stored),
            },
            ValueKind::NamedIcon => DialogRequest::NamedIcon {
                title: format!("Select {}", name),
                current: stored.as_str().map(str::to_string),
            },
            ValueKind::Text { .. } => DialogRequest::Text {
                title: format!("Edit {}", name),
                current: stored.as_str().map(str::to_string),
            },
            _ => return,
        };
        let value = match dialogs.run(&request) {
            DialogResponse::Cancel => return,
            DialogResponse::Clear => self.empty_value(),
            DialogResponse::Accept(value) => value,
        };
        let value = match value {
            Value::String(text) if self.kind().is_text() => {
                encode_text(stored.as_str(), text.as_deref())
            }
            value => value,
        };
        if !self.klass().kind.accepts(&value) {
            log::warn!(
                "Dialog for `{}` returned a {} value",
                self.klass().id,
                value.type_name()
            );
            return;
        }
        self.commit(value);
    }
}
