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

//! Modal choosers for values that are not edited in place.

use crate::project::WidgetId;
use crate::property::Value;
use crate::utils::Color;

/// A widget offered by the object pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectCandidate {
    pub id: WidgetId,
    pub name: String,
    /// Part of the current value.
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogRequest {
    Object {
        title: String,
        candidates: Vec<ObjectCandidate>,
    },
    Objects {
        title: String,
        candidates: Vec<ObjectCandidate>,
    },
    Color {
        title: String,
        current: Color,
    },
    NamedIcon {
        title: String,
        current: Option<String>,
    },
    Text {
        title: String,
        current: Option<String>,
    },
}

impl DialogRequest {
    pub fn title(&self) -> &str {
        match self {
            Self::Object { title, .. }
            | Self::Objects { title, .. }
            | Self::Color { title, .. }
            | Self::NamedIcon { title, .. }
            | Self::Text { title, .. } => title,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogResponse {
    /// Commit this value.
    Accept(Value),
    /// Commit the empty value.
    Clear,
    Cancel,
}

/// Implemented by the front-end to run the modal dialogs.
pub trait PropertyDialogs {
    fn run(&self, request: &DialogRequest) -> DialogResponse;
}

impl<F> PropertyDialogs for F
where
    F: Fn(&DialogRequest) -> DialogResponse,
{
    fn run(&self, request: &DialogRequest) -> DialogResponse {
        self(request)
    }
}
