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

use crate::project::WidgetId;
use crate::utils::Color;

/// A property value. Unicode scalar properties store their code point as
/// [`Value::UInt`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Char(i8),
    UChar(u8),
    Int16(i16),
    UInt16(u16),
    Int(i32),
    UInt(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(Option<String>),
    Enum(i32),
    Flags(u32),
    Color(Option<Color>),
    Object(Option<WidgetId>),
    Objects(Vec<WidgetId>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Char(_) => "gchar",
            Self::UChar(_) => "guchar",
            Self::Int16(_) => "gint16",
            Self::UInt16(_) => "guint16",
            Self::Int(_) => "gint",
            Self::UInt(_) => "guint",
            Self::Int64(_) => "gint64",
            Self::UInt64(_) => "guint64",
            Self::Float(_) => "gfloat",
            Self::Double(_) => "gdouble",
            Self::Boolean(_) => "gboolean",
            Self::String(_) => "gchararray",
            Self::Enum(_) => "GEnum",
            Self::Flags(_) => "GFlags",
            Self::Color(_) => "GdkRGBA",
            Self::Object(_) => "GObject",
            Self::Objects(_) => "GList",
        }
    }

    pub fn numeric_type(&self) -> Option<NumericType> {
        Some(match self {
            Self::Char(_) => NumericType::I8,
            Self::UChar(_) => NumericType::U8,
            Self::Int16(_) => NumericType::I16,
            Self::UInt16(_) => NumericType::U16,
            Self::Int(_) => NumericType::I32,
            Self::UInt(_) => NumericType::U32,
            Self::Int64(_) => NumericType::I64,
            Self::UInt64(_) => NumericType::U64,
            Self::Float(_) => NumericType::F32,
            Self::Double(_) => NumericType::F64,
            _ => return None,
        })
    }

    /// Widens any numeric variant to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        Some(match *self {
            Self::Char(v) => v as f64,
            Self::UChar(v) => v as f64,
            Self::Int16(v) => v as f64,
            Self::UInt16(v) => v as f64,
            Self::Int(v) => v as f64,
            Self::UInt(v) => v as f64,
            Self::Int64(v) => v as f64,
            Self::UInt64(v) => v as f64,
            Self::Float(v) => v as f64,
            Self::Double(v) => v,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => s.as_deref(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Boolean(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_same_type(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Some(v.to_string()))
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        Self::String(v)
    }
}

impl From<Color> for Value {
    fn from(v: Color) -> Self {
        Self::Color(Some(v))
    }
}

/// Storage width of a numeric property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl NumericType {
    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Narrows `v` to this type. Integers are rounded to the nearest value
    /// and saturate at the type's bounds; NaN becomes zero.
    pub fn narrow(self, v: f64) -> Value {
        let i = if v.is_nan() { 0.0 } else { v.round() };
        match self {
            Self::I8 => Value::Char(i as i8),
            Self::U8 => Value::UChar(i as u8),
            Self::I16 => Value::Int16(i as i16),
            Self::U16 => Value::UInt16(i as u16),
            Self::I32 => Value::Int(i as i32),
            Self::U32 => Value::UInt(i as u32),
            Self::I64 => Value::Int64(i as i64),
            Self::U64 => Value::UInt64(i as u64),
            Self::F32 => Value::Float(v as f32),
            Self::F64 => Value::Double(v),
        }
    }
}

#[test]
fn test_numeric_narrowing() {
    assert_eq!(NumericType::I32.narrow(2.6), Value::Int(3));
    assert_eq!(NumericType::U8.narrow(300.0), Value::UChar(255));
    assert_eq!(NumericType::U32.narrow(-4.0), Value::UInt(0));
    assert_eq!(NumericType::I64.narrow(f64::NAN), Value::Int64(0));
    assert_eq!(NumericType::F32.narrow(0.5), Value::Float(0.5));
    assert_eq!(Value::UInt16(7).as_f64(), Some(7.0));
    assert_eq!(Value::Boolean(true).as_f64(), None);
}
