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

#![allow(dead_code)]

use gladeui::prelude::*;

pub struct Fixture {
    pub app: App,
    pub project: Project,
    pub window: Widget,
    pub button: Widget,
    pub label: Widget,
}

/// A project with a window holding a button and a label, registered with
/// a fresh application context using the default settings.
pub fn fixture() -> Fixture {
    let app = App::new();
    let project = Project::new("test project");
    project.set_path(Some(std::path::Path::new("/tmp/test-project.ui")));
    app.add_project(&project);
    let window = project.add_widget("window1", "GtkWindow", &["GtkWidget", "GObject"]);
    let button = project.add_widget("button1", "GtkButton", &["GtkWidget", "GObject"]);
    let label = project.add_widget("label1", "GtkLabel", &["GtkWidget", "GObject"]);
    Fixture {
        app,
        project,
        window,
        button,
        label,
    }
}

pub fn int_class(id: &str, minimum: f64, maximum: f64, default: f64) -> Rc<PropertyClass> {
    Rc::new(
        PropertyClass::new(
            id,
            ParamSpecKind::numeric(NumericType::I32, minimum, maximum, default),
        )
        .tooltip("An integer"),
    )
}

pub fn flags_class() -> Rc<PropertyClass> {
    Rc::new(PropertyClass::new(
        "events",
        ParamSpecKind::Flags {
            class: Rc::new(FlagsClass::new(
                "TestFlags",
                &[(1, "A", "a"), (2, "B", "b"), (4, "C", "c")],
            )),
            default: 0,
        },
    ))
}

pub fn enum_class() -> Rc<PropertyClass> {
    Rc::new(PropertyClass::new(
        "justify",
        ParamSpecKind::Enum {
            class: Rc::new(EnumClass::new(
                "TestJustification",
                &[
                    (0, "Left", "left"),
                    (10, "Right", "right"),
                    (20, "Fill", "fill"),
                ],
            )),
            default: 0,
        },
    ))
}

pub fn text_class(id: &str, multiline: bool) -> Rc<PropertyClass> {
    Rc::new(PropertyClass::new(
        id,
        ParamSpecKind::String {
            default: None,
            multiline,
        },
    ))
}

/// Counts commits seen by `editor`, whatever their outcome.
pub fn count_commits(editor: &EditorProperty) -> Rc<Cell<usize>> {
    let counter = Rc::new(Cell::new(0));
    editor.connect_commit({
        let counter = counter.clone();
        move |_, _| {
            counter.set(counter.get() + 1);
            Inhibit(false)
        }
    });
    counter
}
