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

use serde::{Deserialize, Serialize};

pub trait EnumValue: Serialize + Sized {
    fn name(&self) -> String {
        self.serialize(toml_edit::ser::ValueSerializer::new())
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    fn toml_deserialize<'de>(item: Option<&toml_edit::Item>) -> Option<Self>
    where
        Self: Deserialize<'de>,
    {
        use serde::de::IntoDeserializer;
        item.cloned()?
            .into_value()
            .ok()
            .map(toml_edit::Value::into_deserializer)
            .and_then(|p| <Self as Deserialize>::deserialize(p).ok())
    }

    fn kebab_str_deserialize<'de>(s: &str) -> Option<Self>
    where
        Self: Deserialize<'de>,
    {
        use serde::de::IntoDeserializer;
        <Self as Deserialize>::deserialize(toml_edit::Value::into_deserializer(
            toml_edit::value(s).into_value().ok()?,
        ))
        .ok()
    }

    fn kebab_case_variants() -> &'static [&'static str];
}

/// How editors write values back into properties.
#[derive(Debug, Deserialize, Serialize, Default, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CommitMode {
    /// Through the undoable command layer.
    #[default]
    Command,
    /// Straight into the property.
    Direct,
}

impl EnumValue for CommitMode {
    fn kebab_case_variants() -> &'static [&'static str] {
        &["command", "direct"]
    }
}

#[test]
fn test_parse_toml() {
    use toml_edit::Document;

    const TOML: &str = r##"commit-mode = "direct"
float-digits = 3

[hidden-values]
GtkJustification = ["fill"]
"##;
    let doc = TOML.parse::<Document>().unwrap();
    assert_eq!(doc["float-digits"].as_integer().unwrap(), 3);
    assert_eq!(
        <CommitMode as EnumValue>::toml_deserialize(Some(&doc["commit-mode"])).unwrap(),
        CommitMode::Direct
    );
    assert_eq!(
        <CommitMode as EnumValue>::toml_deserialize(doc.get("missing")),
        None
    );
    assert_eq!(
        <CommitMode as EnumValue>::kebab_str_deserialize("command"),
        Some(CommitMode::Command)
    );
    assert_eq!(<CommitMode as EnumValue>::kebab_str_deserialize("nope"), None);
    assert_eq!(CommitMode::Direct.name(), "direct");
    for v in CommitMode::kebab_case_variants() {
        assert!(<CommitMode as EnumValue>::kebab_str_deserialize(v).is_some());
    }
}
