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

mod utils;
use utils::*;

use gladeui::prelude::*;

#[test]
fn test_bind_is_idempotent() {
    let f = fixture();
    let property = f.project.add_property(&f.button, int_class("width", 0.0, 100.0, 5.0));
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    let commits = count_commits(&editor);

    editor.bind(Some(&property));
    let handlers = property.n_handlers();
    let revision = editor.input().revision();
    assert_eq!(handlers, 6);
    assert_eq!(editor.input().value(), Some(5.0));

    editor.bind(Some(&property));
    assert_eq!(property.n_handlers(), handlers);
    assert_eq!(editor.input().revision(), revision);
    assert_eq!(commits.get(), 0);
    assert_eq!(editor.property().as_ref(), Some(&property));
}

#[test]
fn test_synchronize_never_commits() {
    let f = fixture();
    let int = f.project.add_property(&f.button, int_class("width", 0.0, 100.0, 5.0));
    let flags = f.project.add_property(&f.button, flags_class());
    let justify = f.project.add_property(&f.label, enum_class());
    let text = f.project.add_property(&f.label, text_class("label", false));
    let boolean = f.project.add_property(
        &f.button,
        Rc::new(PropertyClass::new(
            "visible",
            ParamSpecKind::Boolean { default: false },
        )),
    );
    let color = f.project.add_property(
        &f.label,
        Rc::new(PropertyClass::new("color", ParamSpecKind::Color { alpha: true })),
    );
    let cases: Vec<(Property, Value)> = vec![
        (int, Value::Int(42)),
        (flags, Value::Flags(3)),
        (justify, Value::Enum(20)),
        (text, Value::from("hello")),
        (boolean, Value::Boolean(true)),
        (color, Value::from(Color::RED)),
    ];
    for (property, value) in cases {
        let editor = EditorProperty::new(&f.app, property.klass().clone());
        let commits = count_commits(&editor);
        let loads_seen = Rc::new(Cell::new(0));
        editor.input().connect_changed({
            let editor = editor.clone();
            let loads_seen = loads_seen.clone();
            move |_| {
                assert!(editor.is_loading());
                assert!(!editor.is_committing());
                loads_seen.set(loads_seen.get() + 1);
            }
        });
        editor.bind(Some(&property));
        let revision = editor.input().revision();
        assert!(property.set_value(value.clone()));
        assert!(editor.input().revision() > revision, "{:?}", value);
        assert!(loads_seen.get() > 0);
        assert_eq!(commits.get(), 0, "{:?}", value);
        assert!(property.equals_value(&value));
        assert!(!editor.is_loading());
        assert!(!editor.is_committing());
    }
    assert!(!f.app.can_undo());
}

#[test]
fn test_rejected_write_bounces_back() {
    let f = fixture();
    let property = f.project.add_property(&f.button, int_class("width", 0.0, 100.0, 5.0));
    property.set_verify_func(|_, value| match value {
        Value::Int(7) => Verification::Reject,
        Value::Int(v) if *v > 50 => Verification::Coerce(Value::Int(50)),
        _ => Verification::Accept,
    });
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.bind(Some(&property));

    editor.input().set_value(7.0);
    assert_eq!(property.value(), Value::Int(5));
    assert_eq!(editor.input().value(), Some(5.0));
    assert!(!f.app.can_undo());

    editor.input().set_value(80.0);
    assert_eq!(property.value(), Value::Int(50));
    assert_eq!(editor.input().value(), Some(50.0));

    editor.commit(Value::Int(7));
    assert_eq!(editor.input().value(), Some(50.0));
    assert!(!editor.is_committing());
    assert!(!editor.is_loading());

    editor.set_use_command(false);
    editor.input().set_value(7.0);
    assert_eq!(property.value(), Value::Int(50));
    assert_eq!(editor.input().value(), Some(50.0));
}

#[test]
fn test_text_null_and_empty() {
    let f = fixture();
    let property = f.project.add_property(&f.label, text_class("label", false));
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.bind(Some(&property));
    assert_eq!(editor.input().text().as_deref(), Some(""));

    editor.input().activate();
    assert_eq!(property.value(), Value::String(None));
    assert!(!f.project.is_modified());

    editor.input().set_text("abc");
    assert_eq!(property.value(), Value::from("abc"));
    editor.input().set_text("");
    assert_eq!(property.value(), Value::String(Some(String::new())));
    assert!(f.project.is_modified());

    property.set_value(Value::from("set"));
    editor.show_dialog(&|request: &DialogRequest| {
        assert_eq!(
            request,
            &DialogRequest::Text {
                title: "Edit label".to_string(),
                current: Some("set".to_string()),
            }
        );
        DialogResponse::Clear
    });
    assert_eq!(property.value(), Value::String(Some(String::new())));
}

#[test]
fn test_flags_round_trip() {
    let f = fixture();
    let property = f.project.add_property(&f.button, flags_class());
    property.set_value(Value::Flags(5));
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    let commits = count_commits(&editor);
    editor.bind(Some(&property));

    let rows = editor.input().flag_rows();
    assert_eq!(
        rows.iter()
            .map(|r| (r.label.as_str(), r.setting))
            .collect::<Vec<_>>(),
        vec![("A", true), ("B", false), ("C", true)]
    );
    assert_eq!(editor.input().text().as_deref(), Some("A | C"));

    /* Nothing changed, nothing to commit. */
    editor.input().activate();
    assert_eq!(commits.get(), 0);

    editor.input().toggle_flag(1);
    assert_eq!(property.value(), Value::Flags(7));
    assert_eq!(commits.get(), 1);
    assert_eq!(editor.input().text().as_deref(), Some("A | B | C"));
    assert_eq!(property.make_string(), "A | B | C");
}

#[test]
fn test_enum_fallback_to_first_row() {
    let f = fixture();
    f.app
        .displayable_mut()
        .set_disabled("TestJustification", "fill", true);
    f.app
        .displayable_mut()
        .register("TestJustification", "right", "Right aligned");
    let property = f.project.add_property(&f.label, enum_class());
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.bind(Some(&property));
    assert_eq!(
        editor
            .input()
            .rows()
            .iter()
            .map(|r| r.label.as_str())
            .collect::<Vec<_>>(),
        vec!["left", "Right aligned"]
    );

    property.set_value(Value::Enum(10));
    assert_eq!(editor.input().active_index(), Some(1));

    /* Hidden from the combo box: the first row is selected. */
    property.set_value(Value::Enum(20));
    assert_eq!(editor.input().active_index(), Some(0));
    assert_eq!(property.value(), Value::Enum(20));

    editor.input().set_active_index(Some(1));
    assert_eq!(property.value(), Value::Enum(10));
}

#[test]
fn test_unbind_detaches() {
    let f = fixture();
    let property = f.project.add_property(&f.button, int_class("width", 0.0, 100.0, 5.0));
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.bind(Some(&property));
    property.set_value(Value::Int(9));
    assert_eq!(editor.input().value(), Some(9.0));

    editor.bind(None);
    assert_eq!(property.n_handlers(), 0);
    assert_eq!(editor.property(), None);
    assert!(!editor.input().sensitive());
    let control = editor.input().control();
    let revision = editor.input().revision();

    property.set_value(Value::Int(11));
    property.set_sensitive(false, Some("nope"));
    assert_eq!(editor.input().control(), control);
    assert_eq!(editor.input().revision(), revision);

    /* Input is ignored while unbound. */
    editor.input().set_value(3.0);
    assert_eq!(property.value(), Value::Int(11));
}

#[test]
fn test_rebinding_switches_properties() {
    let f = fixture();
    let klass = int_class("width", 0.0, 100.0, 5.0);
    let first = f.project.add_property(&f.button, klass.clone());
    let second = f.project.add_property(&f.label, klass.clone());
    second.set_value(Value::Int(20));
    let editor = EditorProperty::new(&f.app, klass);
    editor.bind(Some(&first));
    editor.bind(Some(&second));
    assert_eq!(first.n_handlers(), 0);
    assert_eq!(second.n_handlers(), 6);
    assert_eq!(editor.input().value(), Some(20.0));

    editor.input().set_value(30.0);
    assert_eq!(first.value(), Value::Int(5));
    assert_eq!(second.value(), Value::Int(30));

    /* A property of another class is refused. */
    let other = f.project.add_property(&f.label, flags_class());
    editor.bind(Some(&other));
    assert_eq!(editor.property().as_ref(), Some(&second));
}

#[test]
fn test_destroyed_property_unbinds() {
    let f = fixture();
    let property = f.project.add_property(&f.button, int_class("width", 0.0, 100.0, 5.0));
    property.set_value(Value::Int(8));
    let handle = property.handle().unwrap();
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.bind(Some(&property));
    assert_eq!(editor.input().value(), Some(8.0));

    assert!(f.project.remove_property(handle));
    assert!(property.is_destroyed());
    assert_eq!(editor.property(), None);
    assert_eq!(editor.input().value(), Some(0.0));
    assert_eq!(f.project.property(handle), None);
    assert_eq!(f.button.property("width"), None);

    /* The freed slot is reused with a new generation. */
    let replacement = f.project.add_property(&f.button, property.klass().clone());
    assert_ne!(replacement.handle(), Some(handle));
    assert_eq!(editor.property(), None);
    editor.commit(Value::Int(1));
    assert_eq!(replacement.value(), Value::Int(5));
}

#[test]
fn test_removing_widget_unbinds() {
    let f = fixture();
    let property = f.project.add_property(&f.label, text_class("label", false));
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.load_by_widget(Some(&f.label));
    assert_eq!(editor.property().as_ref(), Some(&property));
    assert!(f.project.remove_widget(f.label.id()));
    assert!(property.is_destroyed());
    assert_eq!(editor.property(), None);
}

#[test]
fn test_undo_resynchronizes_input() {
    let f = fixture();
    let property = f.project.add_property(&f.button, int_class("width", 0.0, 100.0, 5.0));
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    assert!(editor.use_command());
    editor.bind(Some(&property));

    editor.input().set_value(3.0);
    editor.input().set_value(4.0);
    assert_eq!(property.value(), Value::Int(4));
    assert!(f.app.can_undo());

    assert!(f.app.undo());
    assert_eq!(property.value(), Value::Int(3));
    assert_eq!(editor.input().value(), Some(3.0));
    assert!(f.app.undo());
    assert_eq!(editor.input().value(), Some(5.0));
    assert!(!f.app.can_undo());

    assert!(f.app.redo());
    assert_eq!(editor.input().value(), Some(3.0));
    assert!(f.app.can_redo());
}

#[test]
fn test_text_edits_compress_into_one_undo_step() {
    let f = fixture();
    let property = f.project.add_property(&f.label, text_class("label", false));
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.bind(Some(&property));

    editor.input().insert_text("a");
    editor.input().insert_text("b");
    assert_eq!(property.value(), Value::from("ab"));
    assert_eq!(f.app.undo_db().len(), 2);

    assert!(f.app.undo());
    assert_eq!(property.value(), Value::String(None));
    assert_eq!(editor.input().text().as_deref(), Some(""));
    assert!(!f.app.can_undo());
}

#[test]
fn test_direct_commits_skip_history() {
    let mut settings = Settings::default();
    settings.commit_mode = CommitMode::Direct;
    let app = App::with_settings(settings);
    let project = Project::new("direct");
    let widget = project.add_widget("box1", "GtkBox", &[]);
    let property = project.add_property(&widget, int_class("spacing", 0.0, 10.0, 0.0));
    let editor = EditorProperty::new(&app, property.klass().clone());
    assert!(!editor.use_command());
    editor.bind(Some(&property));
    editor.input().set_value(2.0);
    assert_eq!(property.value(), Value::Int(2));
    assert!(!app.can_undo());
}

#[test]
fn test_multiline_text_rewritten_only_on_change() {
    let f = fixture();
    let property = f.project.add_property(&f.label, text_class("tooltip-text", true));
    property.set_value(Value::from("line one\nline two"));
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    assert_eq!(editor.kind(), ValueKind::Text { multiline: true });
    editor.bind(Some(&property));
    assert_eq!(
        editor.input().text().as_deref(),
        Some("line one\nline two")
    );
    let revision = editor.input().revision();
    editor.synchronize();
    editor.synchronize();
    assert_eq!(editor.input().revision(), revision);

    editor.input().insert_text("\nline three");
    assert_eq!(property.value(), Value::from("line one\nline two\nline three"));
    assert_eq!(editor.input().revision(), revision + 1);
}

#[test]
fn test_unichar_input() {
    let f = fixture();
    let property = f.project.add_property(
        &f.label,
        Rc::new(PropertyClass::new(
            "invisible-char",
            ParamSpecKind::Unichar { default: '*' },
        )),
    );
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.bind(Some(&property));
    assert_eq!(editor.input().text().as_deref(), Some("*"));

    assert!(editor.input().insert_text("xyz"));
    assert_eq!(editor.input().text().as_deref(), Some("x"));
    assert_eq!(property.value(), Value::UInt('x' as u32));

    assert!(!editor.input().delete_text());
    assert_eq!(property.value(), Value::UInt('x' as u32));
}

#[test]
fn test_color_defaults_to_black() {
    let f = fixture();
    let property = f.project.add_property(
        &f.label,
        Rc::new(PropertyClass::new("color", ParamSpecKind::Color { alpha: false })),
    );
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.input().set_color(Color::WHITE, "white");
    editor.bind(Some(&property));
    assert_eq!(editor.input().color(), Some(Color::BLACK));

    property.set_value(Value::from(Color::RED));
    assert_eq!(editor.input().color(), Some(Color::RED));
    assert_eq!(editor.input().text().as_deref(), Some("#ff0000"));

    /* Opaque colors only. */
    editor.input().set_color(Color::BLUE.with_alpha(0.5), "");
    assert_eq!(property.value(), Value::from(Color::BLUE));
    assert_eq!(editor.input().color(), Some(Color::BLUE));
}

#[test]
fn test_numeric_widening_and_narrowing() {
    let f = fixture();
    let property = f.project.add_property(
        &f.label,
        Rc::new(PropertyClass::new(
            "xalign",
            ParamSpecKind::numeric(NumericType::U8, 0.0, 255.0, 0.0),
        )),
    );
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.bind(Some(&property));
    assert_eq!(editor.input().digits(), Some(0));
    editor.input().set_value(3.6);
    assert_eq!(property.value(), Value::UChar(4));
    assert_eq!(editor.input().value(), Some(4.0));

    let float = f.project.add_property(
        &f.label,
        Rc::new(PropertyClass::new(
            "yalign",
            ParamSpecKind::numeric(NumericType::F64, 0.0, 1.0, 0.5),
        )),
    );
    let editor = EditorProperty::new(&f.app, float.klass().clone());
    editor.bind(Some(&float));
    assert_eq!(editor.input().digits(), Some(2));
    assert_eq!(editor.input().value(), Some(0.5));
    editor.input().set_value(0.25);
    assert_eq!(float.value(), Value::Double(0.25));
}

#[test]
fn test_load_by_widget_hides_missing_properties() {
    let f = fixture();
    let klass = text_class("label", false);
    let property = f.project.add_property(&f.button, klass.clone());
    let editor = EditorProperty::new(&f.app, klass);

    editor.load_by_widget(Some(&f.button));
    assert!(editor.is_visible());
    assert!(editor.label().visible);
    assert_eq!(editor.property().as_ref(), Some(&property));

    editor.load_by_widget(Some(&f.window));
    assert!(!editor.is_visible());
    assert!(!editor.label().visible);
    assert_eq!(editor.property(), None);

    editor.load_by_widget(None);
    assert!(!editor.is_visible());

    let packing = Rc::new(
        PropertyClass::new(
            "position",
            ParamSpecKind::numeric(NumericType::I32, 0.0, 10.0, 0.0),
        )
        .packing(true),
    );
    let child = f.project.add_property(&f.button, packing.clone());
    let editor = EditorProperty::new(&f.app, packing);
    editor.load_by_widget(Some(&f.button));
    assert_eq!(editor.property().as_ref(), Some(&child));
    assert_eq!(f.button.property("position"), None);
}

#[test]
fn test_label_warning_and_sensitivity() {
    let f = fixture();
    let property = f.project.add_property(&f.button, int_class("width", 0.0, 100.0, 5.0));
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.bind(Some(&property));
    assert_eq!(editor.label().markup, "width:");
    assert!(!editor.label().bold);
    assert!(editor.input().sensitive());
    assert_eq!(editor.input().tooltip().as_deref(), Some("An integer"));

    property.set_value(Value::Int(6));
    assert_eq!(editor.label().markup, "<b>width:</b>");
    assert!(editor.label().bold);
    property.reset();
    assert!(!editor.label().bold);

    property.set_sensitive(false, Some("Set by the parent"));
    assert!(!editor.input().sensitive());
    assert!(!editor.label().sensitive);
    assert_eq!(editor.input().tooltip().as_deref(), Some("Set by the parent"));
    property.set_sensitive(true, None);
    assert!(editor.input().sensitive());
    assert_eq!(editor.label().tooltip.as_deref(), Some("An integer"));

    property.set_support_warning(true, Some("Needs a newer toolkit"));
    assert!(editor.warning().visible);
    assert_eq!(
        editor.warning().tooltip.as_deref(),
        Some("Needs a newer toolkit")
    );
    assert!(!editor.input().sensitive());
    property.set_support_warning(false, Some("Needs a newer toolkit"));
    assert!(editor.warning().visible);
    assert!(editor.input().sensitive());
    property.set_support_warning(false, None);
    assert!(!editor.warning().visible);
}

#[test]
fn test_optional_property_check() {
    let f = fixture();
    let klass = Rc::new(
        PropertyClass::new(
            "default-width",
            ParamSpecKind::numeric(NumericType::I32, -1.0, 10000.0, -1.0),
        )
        .optional(true, false),
    );
    let property = f.project.add_property(&f.window, klass.clone());
    let plain = EditorProperty::new(&f.app, int_class("width", 0.0, 1.0, 0.0));
    assert_eq!(plain.check(), None);

    let editor = EditorProperty::new(&f.app, klass);
    editor.bind(Some(&property));
    assert_eq!(
        editor.check(),
        Some(CheckState {
            active: false,
            sensitive: true,
        })
    );
    assert!(!editor.input().sensitive());

    editor.toggle_enabled();
    assert!(property.enabled());
    assert!(editor.input().sensitive());
    assert_eq!(editor.check().map(|c| c.active), Some(true));
    assert!(f.project.is_modified());
}

#[test]
fn test_commit_hook_can_inhibit() {
    let f = fixture();
    let property = f.project.add_property(&f.button, int_class("width", 0.0, 100.0, 5.0));
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.bind(Some(&property));
    let id = editor.connect_commit(|editor, value| {
        assert!(editor.is_committing());
        assert!(!editor.is_loading());
        Inhibit(*value == Value::Int(9))
    });

    editor.input().set_value(9.0);
    assert_eq!(property.value(), Value::Int(5));
    assert_eq!(editor.input().value(), Some(5.0));
    assert!(!editor.is_committing());

    editor.input().set_value(8.0);
    assert_eq!(property.value(), Value::Int(8));

    assert!(editor.disconnect_commit(id));
    editor.input().set_value(9.0);
    assert_eq!(property.value(), Value::Int(9));
}

#[test]
fn test_object_dialog() {
    let f = fixture();
    let klass = Rc::new(PropertyClass::new(
        "default-widget",
        ParamSpecKind::Object {
            type_name: "GtkWidget".to_string(),
        },
    ));
    let property = f.project.add_property(&f.window, klass.clone());
    let other = f.project.add_widget("adjustment1", "GtkAdjustment", &["GObject"]);
    let editor = EditorProperty::new(&f.app, klass);
    editor.bind(Some(&property));
    assert_eq!(editor.input().text().as_deref(), Some(""));
    assert!(!editor.input().insert_text("typed"));

    let button = f.button.id();
    editor.show_dialog(&|request: &DialogRequest| {
        let DialogRequest::Object { candidates, .. } = request else {
            panic!("unexpected request {:?}", request);
        };
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["button1", "label1"]);
        assert!(candidates.iter().all(|c| !c.selected && c.id != other.id()));
        DialogResponse::Accept(Value::Object(Some(button)))
    });
    assert_eq!(property.value(), Value::Object(Some(button)));
    assert_eq!(editor.input().text().as_deref(), Some("button1"));

    editor.show_dialog(&|request: &DialogRequest| {
        let DialogRequest::Object { candidates, .. } = request else {
            panic!("unexpected request {:?}", request);
        };
        assert!(candidates[0].selected);
        DialogResponse::Cancel
    });
    assert_eq!(property.value(), Value::Object(Some(button)));

    /* Wrong type from the dialog: ignored. */
    editor.show_dialog(&|_: &DialogRequest| DialogResponse::Accept(Value::Int(1)));
    assert_eq!(property.value(), Value::Object(Some(button)));

    editor.show_dialog(&|_: &DialogRequest| DialogResponse::Clear);
    assert_eq!(property.value(), Value::Object(None));
    assert_eq!(editor.input().text().as_deref(), Some(""));
}

#[test]
fn test_objects_dialog() {
    let f = fixture();
    let klass = Rc::new(PropertyClass::new(
        "widgets",
        ParamSpecKind::Objects {
            type_name: "GtkWidget".to_string(),
        },
    ));
    let property = f.project.add_property(&f.window, klass.clone());
    let editor = EditorProperty::new(&f.app, klass);
    editor.bind(Some(&property));
    let ids = vec![f.button.id(), f.label.id()];
    editor.show_dialog(&|_: &DialogRequest| DialogResponse::Accept(Value::Objects(ids.clone())));
    assert_eq!(property.value(), Value::Objects(ids.clone()));
    assert_eq!(editor.input().text().as_deref(), Some("button1, label1"));
}

#[test]
fn test_color_dialog_updates_input() {
    let f = fixture();
    let property = f.project.add_property(
        &f.label,
        Rc::new(PropertyClass::new("background", ParamSpecKind::Color { alpha: false })),
    );
    let editor = EditorProperty::new(&f.app, property.klass().clone());
    editor.bind(Some(&property));
    editor.show_dialog(&|request: &DialogRequest| {
        assert_eq!(
            request,
            &DialogRequest::Color {
                title: "Select background".to_string(),
                current: Color::BLACK,
            }
        );
        DialogResponse::Accept(Value::from(Color::RED))
    });
    assert_eq!(property.value(), Value::from(Color::RED));
    assert_eq!(editor.input().color(), Some(Color::RED));
    assert_eq!(editor.input().text().as_deref(), Some("#ff0000"));

    editor.show_dialog(&|_: &DialogRequest| DialogResponse::Clear);
    assert_eq!(property.value(), Value::Color(None));
    assert_eq!(editor.input().color(), Some(Color::BLACK));

    /* Direct callers of `commit` see the input follow as well. */
    editor.commit(Value::from(Color::BLUE));
    assert_eq!(editor.input().color(), Some(Color::BLUE));
}

#[test]
fn test_activation_without_edit_keeps_stored_value() {
    let f = fixture();
    f.app
        .displayable_mut()
        .set_disabled("TestJustification", "fill", true);
    let ratio = f.project.add_property(
        &f.label,
        Rc::new(PropertyClass::new(
            "ratio",
            ParamSpecKind::numeric(NumericType::F64, 0.0, 1.0, 0.0),
        )),
    );
    let justify = f.project.add_property(&f.label, enum_class());
    let color = f.project.add_property(
        &f.label,
        Rc::new(PropertyClass::new("color", ParamSpecKind::Color { alpha: false })),
    );
    ratio.set_value(Value::Double(0.125));
    justify.set_value(Value::Enum(20));
    f.project.set_modified(false);

    let editors: Vec<EditorProperty> = [&ratio, &justify, &color]
        .into_iter()
        .map(|property| {
            let editor = EditorProperty::new(&f.app, property.klass().clone());
            editor.bind(Some(property));
            editor
        })
        .collect();
    assert_eq!(editors[0].input().value(), Some(0.13));
    assert_eq!(editors[1].input().active_index(), Some(0));
    for editor in &editors {
        let commits = count_commits(editor);
        editor.input().activate();
        assert_eq!(commits.get(), 0);
    }
    assert_eq!(ratio.value(), Value::Double(0.125));
    assert_eq!(justify.value(), Value::Enum(20));
    assert_eq!(color.value(), Value::Color(None));
    assert!(!f.project.is_modified());
    assert!(!f.app.can_undo());

    /* A real edit still goes through. */
    editors[0].input().set_value(0.5);
    assert_eq!(ratio.value(), Value::Double(0.5));
    assert!(f.app.can_undo());
}

#[test]
fn test_dropped_project_unbinds() {
    let Fixture {
        app,
        project,
        button,
        ..
    } = fixture();
    let property = project.add_property(&button, int_class("width-request", 0.0, 100.0, 0.0));
    property.set_value(Value::Int(42));
    let editor = EditorProperty::new(&app, property.klass().clone());
    editor.bind(Some(&property));
    assert_eq!(editor.input().value(), Some(42.0));
    assert!(editor.input().sensitive());

    assert!(app.remove_project(&project));
    drop(project);
    assert!(property.is_destroyed());
    assert!(editor.property().is_none());
    assert!(!editor.input().sensitive());
    assert!(!editor.label().sensitive);
    assert_eq!(editor.input().value(), Some(0.0));
    assert_eq!(property.n_handlers(), 0);
}
