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

//! # gladeui
//!
//! Core of an interface designer's property editor: observable
//! [`Property`](property::Property) values organised in
//! [`Project`](project::Project)s, and the
//! [`EditorProperty`](editor_property::EditorProperty) binding that mirrors a
//! property into a toolkit independent input model and commits edits back,
//! optionally through the undo history of the [`App`](app::App) context.

pub mod app;
pub mod editor_property;
pub mod error;
pub mod project;
pub mod property;
pub mod signal_editor;
pub mod utils;

pub use error::Error;

pub const APPLICATION_NAME: &str = "gladeui";
pub const VERSION_INFO: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use super::app::{
        App, CommitMode, DisplayableValues, DocSearch, Settings, UndoDatabase,
    };
    pub use super::editor_property::*;
    pub use super::project::*;
    pub use super::property::*;
    pub use super::signal_editor::*;
    pub use super::utils::*;
    pub use super::{APPLICATION_NAME, VERSION_INFO};
    pub use indexmap::{IndexMap, IndexSet};
    pub use std::cell::{Cell, RefCell};
    pub use std::rc::Rc;
}
