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

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Debug, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

static NAMED_COLORS: Lazy<IndexMap<&'static str, Color>> = Lazy::new(|| {
    let mut m = IndexMap::new();
    m.insert("black", Color::BLACK);
    m.insert("white", Color::WHITE);
    m.insert("red", Color::RED);
    m.insert("green", Color::new(0.0, 128.0 / 255.0, 0.0));
    m.insert("lime", Color::GREEN);
    m.insert("blue", Color::BLUE);
    m.insert("yellow", Color::new(1.0, 1.0, 0.0));
    m.insert("cyan", Color::new(0.0, 1.0, 1.0));
    m.insert("magenta", Color::new(1.0, 0.0, 1.0));
    m.insert("gray", Color::new(190.0 / 255.0, 190.0 / 255.0, 190.0 / 255.0));
    m.insert("grey", Color::new(190.0 / 255.0, 190.0 / 255.0, 190.0 / 255.0));
    m.insert("orange", Color::new(1.0, 165.0 / 255.0, 0.0));
    m.insert("transparent", Color::new_alpha(0.0, 0.0, 0.0, 0.0));
    m
});

static RGB_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$")
        .unwrap()
});

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self::new_alpha(red, green, blue, 1.0)
    }

    pub const fn new_alpha(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)` and a
    /// handful of color names (case insensitive).
    pub fn try_parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::try_from_hex(s);
        }
        if let Some(caps) = RGB_FUNCTION.captures(s) {
            let channel = |i: usize| -> Option<f64> {
                let v: u16 = caps.get(i)?.as_str().parse().ok()?;
                (v <= 255).then_some(v as f64 / 255.0)
            };
            let alpha = match caps.get(4) {
                Some(a) => a.as_str().parse::<f64>().ok()?.clamp(0.0, 1.0),
                None => 1.0,
            };
            return Some(Self::new_alpha(channel(1)?, channel(2)?, channel(3)?, alpha));
        }
        NAMED_COLORS.get(s.to_ascii_lowercase().as_str()).copied()
    }

    pub fn try_from_hex(s: &str) -> Option<Self> {
        hex_color_to_rgb(s).map(|(r, g, b)| Color::new(r, g, b))
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn to_hex(&self) -> String {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.red), c(self.green), c(self.blue))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.alpha >= 1.0 {
            write!(
                fmt,
                "rgb({},{},{})",
                c(self.red),
                c(self.green),
                c(self.blue)
            )
        } else {
            write!(
                fmt,
                "rgba({},{},{},{})",
                c(self.red),
                c(self.green),
                c(self.blue),
                self.alpha
            )
        }
    }
}

pub fn hex_color_to_rgb(s: &str) -> Option<(f64, f64, f64)> {
    let digits = s.strip_prefix('#')?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => Some((
            u8::from_str_radix(&digits[0..2], 16).ok()? as f64 / 255.0,
            u8::from_str_radix(&digits[2..4], 16).ok()? as f64 / 255.0,
            u8::from_str_radix(&digits[4..6], 16).ok()? as f64 / 255.0,
        )),
        3 => Some((
            (17 * u8::from_str_radix(&digits[0..1], 16).ok()?) as f64 / 255.0,
            (17 * u8::from_str_radix(&digits[1..2], 16).ok()?) as f64 / 255.0,
            (17 * u8::from_str_radix(&digits[2..3], 16).ok()?) as f64 / 255.0,
        )),
        _ => None,
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, se: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.red, self.green, self.blue, self.alpha).serialize(se)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (r, g, b, a): (f64, f64, f64, f64) = <(f64, f64, f64, f64)>::deserialize(de)?;
        Ok(Self::new_alpha(r, g, b, a))
    }
}

#[test]
fn test_color_parse() {
    assert_eq!(Color::try_parse("Black"), Some(Color::BLACK));
    assert_eq!(Color::try_parse("#fff"), Some(Color::WHITE));
    assert_eq!(Color::try_parse("#FF0000"), Some(Color::RED));
    assert_eq!(Color::try_parse("rgb(0,0,255)"), Some(Color::BLUE));
    assert_eq!(
        Color::try_parse("rgba(255, 255, 255, 0.5)"),
        Some(Color::WHITE.with_alpha(0.5))
    );
    assert_eq!(Color::try_parse("rgb(256,0,0)"), None);
    assert_eq!(Color::try_parse("#12345"), None);
    assert_eq!(Color::try_parse("not a color"), None);
    assert_eq!(Color::RED.to_hex(), "#ff0000");
    assert_eq!(Color::RED.to_string(), "rgb(255,0,0)");
    assert_eq!(Color::BLACK.with_alpha(0.5).to_string(), "rgba(0,0,0,0.5)");
}
