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

//! Display names and visibility of enum and flags values, as registered by
//! widget catalogs and the user's settings.

use indexmap::IndexMap;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Displayable {
    pub name: Option<String>,
    pub disabled: bool,
}

#[derive(Debug, Default, Clone)]
pub struct DisplayableValues {
    values: IndexMap<(String, String), Displayable>,
}

impl DisplayableValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `nick` of `type_name` as `name` in editors.
    pub fn register(&mut self, type_name: &str, nick: &str, name: &str) {
        self.values
            .entry((type_name.to_string(), nick.to_string()))
            .or_default()
            .name = Some(name.to_string());
    }

    pub fn set_disabled(&mut self, type_name: &str, nick: &str, disabled: bool) {
        self.values
            .entry((type_name.to_string(), nick.to_string()))
            .or_default()
            .disabled = disabled;
    }

    pub fn name(&self, type_name: &str, nick: &str) -> Option<&str> {
        self.get(type_name, nick)?.name.as_deref()
    }

    pub fn is_disabled(&self, type_name: &str, nick: &str) -> bool {
        self.get(type_name, nick)
            .map(|d| d.disabled)
            .unwrap_or(false)
    }

    fn get(&self, type_name: &str, nick: &str) -> Option<&Displayable> {
        self.values
            .get(&(type_name.to_string(), nick.to_string()))
    }

    pub fn merge_hidden(&mut self, hidden: &IndexMap<String, Vec<String>>) {
        for (type_name, nicks) in hidden {
            for nick in nicks {
                self.set_disabled(type_name, nick, true);
            }
        }
    }
}

#[test]
fn test_displayable_values() {
    let mut values = DisplayableValues::new();
    values.register("GtkAlign", "fill", "Fill");
    assert_eq!(values.name("GtkAlign", "fill"), Some("Fill"));
    assert_eq!(values.name("GtkAlign", "start"), None);
    assert!(!values.is_disabled("GtkAlign", "fill"));

    let mut hidden = IndexMap::new();
    hidden.insert("GtkAlign".to_string(), vec!["fill".to_string()]);
    values.merge_hidden(&hidden);
    assert!(values.is_disabled("GtkAlign", "fill"));
    assert_eq!(values.name("GtkAlign", "fill"), Some("Fill"));
}
