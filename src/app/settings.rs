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

//! # Settings
//!
//! User preferences, persisted as TOML in `$XDG_CONFIG_HOME/gladeui/glade.toml`.
//! The parsed document is kept around so that saving preserves keys and
//! comments this crate does not know about.

use crate::error::Result;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use toml_edit::{Array, Document, Item};

pub mod types;

pub use types::*;

pub const CONFIG_PREFIX: &str = crate::APPLICATION_NAME;
pub const CONFIG_FILE: &str = "glade.toml";

pub const COMMIT_MODE: &str = "commit-mode";
pub const FLOAT_DIGITS: &str = "float-digits";
pub const HIDDEN_VALUES: &str = "hidden-values";

const MAX_FLOAT_DIGITS: u32 = 20;

#[derive(Debug, Clone)]
pub struct Settings {
    pub commit_mode: CommitMode,
    /// Decimal digits shown by floating point inputs.
    pub float_digits: u32,
    /// Enum/flags nicks hidden from editors, keyed by type name.
    pub hidden_values: IndexMap<String, Vec<String>>,
    document: Document,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            commit_mode: CommitMode::default(),
            float_digits: 2,
            hidden_values: IndexMap::default(),
            document: Document::new(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unknown or malformed entries are skipped with a warning.
    pub fn from_toml(s: &str) -> Result<Self> {
        let document = s.parse::<Document>()?;
        let mut ret = Self {
            document,
            ..Self::default()
        };
        if let Some(item) = ret.document.get(COMMIT_MODE) {
            match CommitMode::toml_deserialize(Some(item)) {
                Some(v) => ret.commit_mode = v,
                None => log::warn!(
                    "Ignoring invalid `{}` value {}, expected one of {:?}",
                    COMMIT_MODE,
                    item,
                    CommitMode::kebab_case_variants()
                ),
            }
        }
        if let Some(item) = ret.document.get(FLOAT_DIGITS) {
            match item.as_integer() {
                Some(v) if (0..=MAX_FLOAT_DIGITS as i64).contains(&v) => {
                    ret.float_digits = v as u32
                }
                _ => log::warn!("Ignoring invalid `{}` value {}", FLOAT_DIGITS, item),
            }
        }
        if let Some(item) = ret.document.get(HIDDEN_VALUES) {
            let Some(table) = item.as_table_like() else {
                log::warn!("Ignoring `{}`: expected a table", HIDDEN_VALUES);
                return Ok(ret);
            };
            for (type_name, nicks) in table.iter() {
                let Some(nicks) = nicks.as_array() else {
                    log::warn!(
                        "Ignoring `{}.{}`: expected an array of strings",
                        HIDDEN_VALUES,
                        type_name
                    );
                    continue;
                };
                ret.hidden_values.insert(
                    type_name.to_string(),
                    nicks
                        .iter()
                        .filter_map(|n| n.as_str().map(str::to_string))
                        .collect(),
                );
            }
        }
        Ok(ret)
    }

    pub fn to_toml(&self) -> String {
        let mut document = self.document.clone();
        document[COMMIT_MODE] = toml_edit::value(self.commit_mode.name());
        document[FLOAT_DIGITS] = toml_edit::value(self.float_digits as i64);
        if self.hidden_values.is_empty() {
            document.remove(HIDDEN_VALUES);
        } else {
            let mut table = toml_edit::Table::new();
            for (type_name, nicks) in &self.hidden_values {
                let mut array = Array::new();
                for nick in nicks {
                    array.push(nick.as_str());
                }
                table.insert(type_name, toml_edit::value(array));
            }
            document[HIDDEN_VALUES] = Item::Table(table);
        }
        document.to_string()
    }

    /// Looking the path up never creates directories; saving does.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = xdg::BaseDirectories::with_prefix(CONFIG_PREFIX)?;
        Ok(dirs.get_config_file(CONFIG_FILE))
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_toml(&s),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn load() -> Result<Self> {
        let dirs = xdg::BaseDirectories::with_prefix(CONFIG_PREFIX)?;
        match dirs.find_config_file(CONFIG_FILE) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml())?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn is_hidden(&self, type_name: &str, nick: &str) -> bool {
        self.hidden_values
            .get(type_name)
            .map(|nicks| nicks.iter().any(|n| n == nick))
            .unwrap_or(false)
    }
}
