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

//! Static description of a property: what it holds, its limits and how it
//! should be presented.

use super::value::{NumericType, Value};
use crate::project::WidgetId;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub value: i32,
    pub name: String,
    pub nick: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumClass {
    pub type_name: String,
    pub values: Vec<EnumValue>,
}

impl EnumClass {
    pub fn new(type_name: &str, values: &[(i32, &str, &str)]) -> Self {
        Self {
            type_name: type_name.to_string(),
            values: values
                .iter()
                .map(|&(value, name, nick)| EnumValue {
                    value,
                    name: name.to_string(),
                    nick: nick.to_string(),
                })
                .collect(),
        }
    }

    pub fn get_value(&self, value: i32) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.value == value)
    }

    pub fn get_value_by_nick(&self, nick: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.nick == nick)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagsValue {
    pub value: u32,
    pub name: String,
    pub nick: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagsClass {
    pub type_name: String,
    pub values: Vec<FlagsValue>,
}

impl FlagsClass {
    pub fn new(type_name: &str, values: &[(u32, &str, &str)]) -> Self {
        Self {
            type_name: type_name.to_string(),
            values: values
                .iter()
                .map(|&(value, name, nick)| FlagsValue {
                    value,
                    name: name.to_string(),
                    nick: nick.to_string(),
                })
                .collect(),
        }
    }

    /// Union of every bit declared by this type.
    pub fn mask(&self) -> u32 {
        self.values.iter().fold(0, |acc, v| acc | v.value)
    }
}

/// Value type of a property together with its constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamSpecKind {
    Numeric {
        ty: NumericType,
        minimum: f64,
        maximum: f64,
        default: f64,
    },
    Boolean {
        default: bool,
    },
    Enum {
        class: Rc<EnumClass>,
        default: i32,
    },
    Flags {
        class: Rc<FlagsClass>,
        default: u32,
    },
    Unichar {
        default: char,
    },
    Color {
        alpha: bool,
    },
    String {
        default: Option<String>,
        multiline: bool,
    },
    NamedIcon,
    Object {
        type_name: String,
    },
    Objects {
        type_name: String,
    },
}

impl ParamSpecKind {
    pub fn numeric(ty: NumericType, minimum: f64, maximum: f64, default: f64) -> Self {
        Self::Numeric {
            ty,
            minimum,
            maximum,
            default,
        }
    }

    pub fn default_value(&self) -> Value {
        match self {
            Self::Numeric { ty, default, .. } => ty.narrow(*default),
            Self::Boolean { default } => Value::Boolean(*default),
            Self::Enum { default, .. } => Value::Enum(*default),
            Self::Flags { default, .. } => Value::Flags(*default),
            Self::Unichar { default } => Value::UInt(*default as u32),
            Self::Color { .. } => Value::Color(None),
            Self::String { default, .. } => Value::String(default.clone()),
            Self::NamedIcon => Value::String(None),
            Self::Object { .. } => Value::Object(None),
            Self::Objects { .. } => Value::Objects(vec![]),
        }
    }

    /// Whether `value` has the storage type of this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Numeric { ty, .. } => value.numeric_type() == Some(*ty),
            Self::Unichar { .. } => matches!(value, Value::UInt(_)),
            _ => self.default_value().is_same_type(value),
        }
    }

    /// Brings an accepted value inside the declared limits. Returns `None`
    /// when `value` is already valid.
    pub fn validate(&self, value: &Value) -> Option<Value> {
        match self {
            Self::Numeric {
                ty,
                minimum,
                maximum,
                ..
            } => {
                let v = value.as_f64()?;
                if v.is_nan() || v < *minimum || v > *maximum {
                    let clamped = if v.is_nan() {
                        *minimum
                    } else {
                        v.clamp(*minimum, *maximum)
                    };
                    Some(ty.narrow(clamped))
                } else {
                    None
                }
            }
            Self::Enum { class, default } => match value {
                Value::Enum(v) if class.get_value(*v).is_none() => Some(Value::Enum(*default)),
                _ => None,
            },
            Self::Flags { class, .. } => match value {
                Value::Flags(v) if v & !class.mask() != 0 => Some(Value::Flags(v & class.mask())),
                _ => None,
            },
            Self::Unichar { default } => match value {
                Value::UInt(v) if *v != 0 && char::from_u32(*v).is_none() => {
                    Some(Value::UInt(*default as u32))
                }
                _ => None,
            },
            Self::Color { alpha: false } => match value {
                Value::Color(Some(c)) if c.alpha != 1.0 => {
                    Some(Value::Color(Some(c.with_alpha(1.0))))
                }
                _ => None,
            },
            _ => None,
        }
    }
}

/// Description of a property shared by every instance of it.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyClass {
    pub id: String,
    pub name: String,
    pub tooltip: Option<String>,
    pub kind: ParamSpecKind,
    pub optional: bool,
    pub optional_default: bool,
    pub translatable: bool,
    pub packing: bool,
    pub visible: bool,
    pub virtual_: bool,
}

impl PropertyClass {
    pub fn new(id: &str, kind: ParamSpecKind) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            tooltip: None,
            kind,
            optional: false,
            optional_default: false,
            translatable: false,
            packing: false,
            visible: true,
            virtual_: false,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn tooltip(mut self, tooltip: &str) -> Self {
        self.tooltip = Some(tooltip.to_string());
        self
    }

    /// Optional properties can be switched off and are then not saved.
    pub fn optional(mut self, optional: bool, enabled_by_default: bool) -> Self {
        self.optional = optional;
        self.optional_default = enabled_by_default;
        self
    }

    pub fn translatable(mut self, translatable: bool) -> Self {
        self.translatable = translatable;
        self
    }

    pub fn packing(mut self, packing: bool) -> Self {
        self.packing = packing;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn virtual_(mut self, virtual_: bool) -> Self {
        self.virtual_ = virtual_;
        self
    }

    pub fn default_value(&self) -> Value {
        self.kind.default_value()
    }

    /// Formats `value` the way an editor would display it.
    pub fn make_string(
        &self,
        value: &Value,
        object_name: &dyn Fn(WidgetId) -> Option<String>,
    ) -> String {
        match (&self.kind, value) {
            (ParamSpecKind::Enum { class, .. }, Value::Enum(v)) => class
                .get_value(*v)
                .map(|e| e.nick.clone())
                .unwrap_or_default(),
            (ParamSpecKind::Flags { class, .. }, Value::Flags(v)) => class
                .values
                .iter()
                .filter(|f| f.value != 0 && (v & f.value) == f.value)
                .map(|f| f.name.as_str())
                .collect::<Vec<&str>>()
                .join(" | "),
            (ParamSpecKind::Unichar { .. }, Value::UInt(v)) => {
                char::from_u32(*v)
                    .filter(|c| *c != '\0')
                    .map(String::from)
                    .unwrap_or_default()
            }
            (_, Value::Color(Some(c))) => {
                if c.alpha >= 1.0 {
                    c.to_hex()
                } else {
                    c.to_string()
                }
            }
            (_, Value::Color(None)) => String::new(),
            (_, Value::String(s)) => s.clone().unwrap_or_default(),
            (_, Value::Boolean(b)) => if *b { "True" } else { "False" }.to_string(),
            (_, Value::Object(id)) => id.and_then(object_name).unwrap_or_default(),
            (_, Value::Objects(ids)) => ids
                .iter()
                .filter_map(|id| object_name(*id))
                .collect::<Vec<String>>()
                .join(", "),
            (_, Value::Float(v)) => format!("{}", v),
            (_, Value::Double(v)) => format!("{}", v),
            (_, other) => other
                .as_f64()
                .map(|v| format!("{}", v))
                .unwrap_or_default(),
        }
    }
}

#[test]
fn test_param_spec_validation() {
    let numeric = ParamSpecKind::numeric(NumericType::I32, 0.0, 10.0, 5.0);
    assert_eq!(numeric.default_value(), Value::Int(5));
    assert!(numeric.accepts(&Value::Int(2)));
    assert!(!numeric.accepts(&Value::UInt(2)));
    assert_eq!(numeric.validate(&Value::Int(2)), None);
    assert_eq!(numeric.validate(&Value::Int(20)), Some(Value::Int(10)));

    let class = Rc::new(FlagsClass::new(
        "Fl",
        &[(1, "A", "a"), (2, "B", "b"), (4, "C", "c")],
    ));
    let flags = ParamSpecKind::Flags {
        class: class.clone(),
        default: 0,
    };
    assert_eq!(class.mask(), 7);
    assert_eq!(flags.validate(&Value::Flags(9)), Some(Value::Flags(1)));

    let enumeration = ParamSpecKind::Enum {
        class: Rc::new(EnumClass::new("En", &[(3, "Three", "three")])),
        default: 3,
    };
    assert_eq!(enumeration.validate(&Value::Enum(8)), Some(Value::Enum(3)));

    let klass = PropertyClass::new("flags", flags);
    assert_eq!(klass.make_string(&Value::Flags(5), &|_| None), "A | C");
}
