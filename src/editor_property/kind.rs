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

//! Value kinds and their pure encode/decode functions.
//!
//! Decoding turns a stored [`Value`] into what an input shows, encoding
//! turns input content back into a [`Value`]. Nothing here touches a
//! property or an input.

use crate::app::DisplayableValues;
use crate::property::{
    EnumClass, FlagsClass, NumericType, ParamSpecKind, PropertyClass, Value,
};
use crate::utils::Color;

/// Selects the control and the codec an editor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Numeric(NumericType),
    Boolean,
    Enum,
    Flags,
    Unichar,
    Color,
    Text { multiline: bool },
    NamedIcon,
    Object,
    Objects,
}

impl ValueKind {
    pub fn for_class(klass: &PropertyClass) -> Self {
        match &klass.kind {
            ParamSpecKind::Numeric { ty, .. } => Self::Numeric(*ty),
            ParamSpecKind::Boolean { .. } => Self::Boolean,
            ParamSpecKind::Enum { .. } => Self::Enum,
            ParamSpecKind::Flags { .. } => Self::Flags,
            ParamSpecKind::Unichar { .. } => Self::Unichar,
            ParamSpecKind::Color { .. } => Self::Color,
            ParamSpecKind::String { multiline, .. } => Self::Text {
                multiline: *multiline,
            },
            ParamSpecKind::NamedIcon => Self::NamedIcon,
            ParamSpecKind::Object { .. } => Self::Object,
            ParamSpecKind::Objects { .. } => Self::Objects,
        }
    }

    /// Kinds whose stored value is a nullable string.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Text { .. } | Self::NamedIcon)
    }

    /// Kinds edited through a dialog rather than in place.
    pub fn uses_dialog(self) -> bool {
        matches!(
            self,
            Self::Object | Self::Objects | Self::Color | Self::NamedIcon | Self::Text { .. }
        )
    }
}

/// Widens a stored numeric value. `None` for non-numeric values.
pub fn decode_numeric(value: &Value) -> Option<f64> {
    value.as_f64()
}

pub fn encode_numeric(ty: NumericType, v: f64) -> Value {
    ty.narrow(v)
}

/// One selectable enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboRow {
    pub label: String,
    pub value: i32,
}

/// Enumerators not hidden by `displayable`, labelled with their display
/// name or nick.
pub fn enum_rows(class: &EnumClass, displayable: &DisplayableValues) -> Vec<ComboRow> {
    class
        .values
        .iter()
        .filter(|v| !displayable.is_disabled(&class.type_name, &v.nick))
        .map(|v| ComboRow {
            label: displayable
                .name(&class.type_name, &v.nick)
                .unwrap_or(&v.nick)
                .to_string(),
            value: v.value,
        })
        .collect()
}

/// Position of the row holding `value`, or the first row.
pub fn decode_enum(rows: &[ComboRow], value: &Value) -> usize {
    match value {
        Value::Enum(v) => rows.iter().position(|r| r.value == *v).unwrap_or(0),
        _ => 0,
    }
}

pub fn encode_enum(rows: &[ComboRow], active: Option<usize>) -> Option<Value> {
    Some(Value::Enum(rows.get(active?)?.value))
}

/// One checklist entry of a flags input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagRow {
    pub setting: bool,
    pub label: String,
    pub mask: u32,
}

/// Checklist rows for `value`, skipping hidden and zero-valued flags.
pub fn decode_flags(
    class: &FlagsClass,
    displayable: &DisplayableValues,
    value: &Value,
) -> Vec<FlagRow> {
    let value = match value {
        Value::Flags(v) => *v,
        _ => 0,
    };
    class
        .values
        .iter()
        .filter(|f| f.value != 0 && !displayable.is_disabled(&class.type_name, &f.nick))
        .map(|f| FlagRow {
            setting: (value & f.value) == f.value,
            label: displayable
                .name(&class.type_name, &f.nick)
                .unwrap_or(&f.name)
                .to_string(),
            mask: f.value,
        })
        .collect()
}

/// Labels of the set rows in table order, joined with `" | "`.
pub fn flags_text(rows: &[FlagRow]) -> String {
    rows.iter()
        .filter(|r| r.setting)
        .map(|r| r.label.as_str())
        .collect::<Vec<&str>>()
        .join(" | ")
}

pub fn encode_flags(rows: &[FlagRow]) -> Value {
    Value::Flags(
        rows.iter()
            .filter(|r| r.setting)
            .fold(0, |acc, r| acc | r.mask),
    )
}

pub fn decode_unichar(value: &Value) -> String {
    match value {
        Value::UInt(v) => char::from_u32(*v)
            .filter(|c| *c != '\0')
            .map(String::from)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Code point of the first character, zero for empty text.
pub fn encode_unichar(text: &str) -> Value {
    Value::UInt(text.chars().next().map(|c| c as u32).unwrap_or(0))
}

pub fn decode_color(value: &Value) -> Color {
    match value {
        Value::Color(Some(c)) => *c,
        _ => Color::BLACK,
    }
}

/// Applies the null/empty rule to an edited string.
///
/// A never-set value shown as empty and committed as empty stays unset; a
/// set value cleared to nothing becomes the empty string rather than unset.
pub fn encode_text(stored: Option<&str>, text: Option<&str>) -> Value {
    Value::String(match (stored, text) {
        (None, Some("")) => None,
        (Some(_), None) => Some(String::new()),
        (_, text) => text.map(str::to_string),
    })
}
