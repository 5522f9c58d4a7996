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

//! # Error type
//!
//! The editor binding protocol never fails: rejected writes bounce back and
//! stale properties unbind. Errors only come out of the configuration layer
//! and the explicit, typed property setters.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse configuration: {0}")]
    Config(#[from] toml_edit::TomlError),
    #[error("could not locate configuration directory: {0}")]
    BaseDirectories(#[from] xdg::BaseDirectoriesError),
    #[error("property `{property}` holds values of type {expected}, got {found}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("value for property `{property}` was rejected")]
    Rejected { property: String },
    #[error("property was destroyed")]
    Destroyed,
}

