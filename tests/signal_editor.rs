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

fn signal_fixture() -> (Fixture, SignalEditor) {
    let f = fixture();
    f.button.set_book(Some("gtk3"));
    f.button
        .add_signal_class(SignalClass::new("clicked", "GtkButton"));
    f.button
        .add_signal_class(SignalClass::new("notify", "GObject").detailed(true));
    f.project.add_property(&f.button, text_class("label", false));
    f.project.add_property(
        &f.button,
        Rc::new(
            PropertyClass::new(
                "use-underline",
                ParamSpecKind::Boolean { default: false },
            )
            .visible(false),
        ),
    );
    f.project.add_property(
        &f.button,
        Rc::new(PropertyClass::new("tooltip-markup", ParamSpecKind::NamedIcon).virtual_(true)),
    );
    f.project.add_property(&f.button, int_class("width-request", -1.0, 1000.0, -1.0));
    let editor = SignalEditor::new(&f.app);
    editor.load_widget(Some(&f.button));
    (f, editor)
}

fn handlers(rows: &[SignalRow]) -> Vec<(String, Option<String>)> {
    rows.iter()
        .map(|r| {
            (
                r.signal.clone(),
                r.handler.as_ref().map(|h| h.handler.clone()),
            )
        })
        .collect()
}

#[test]
fn test_rows_end_with_placeholder() {
    let (f, editor) = signal_fixture();
    let rows = editor.rows();
    assert_eq!(
        handlers(&rows),
        vec![("clicked".to_string(), None), ("notify".to_string(), None)]
    );
    assert!(rows.iter().all(SignalRow::is_dummy));

    editor.load_widget(None);
    assert!(editor.rows().is_empty());
    editor.load_widget(Some(&f.button));
    assert_eq!(editor.widget().map(|w| w.id()), Some(f.button.id()));
}

#[test]
fn test_edit_handler() {
    let (f, editor) = signal_fixture();

    /* Empty text on the placeholder does nothing. */
    editor.edit_handler(0, "");
    assert!(!f.app.can_undo());

    editor.edit_handler(0, "on_button1_clicked");
    assert_eq!(
        handlers(&editor.rows()),
        vec![
            ("clicked".to_string(), Some("on_button1_clicked".to_string())),
            ("clicked".to_string(), None),
            ("notify".to_string(), None),
        ]
    );
    assert!(f.project.is_modified());
    assert_eq!(f.app.undo_db().len(), 1);

    editor.edit_handler(0, "on_button1_clicked");
    assert_eq!(f.app.undo_db().len(), 1);

    editor.edit_handler(0, "gtk_main_quit");
    assert_eq!(
        f.button.signal_handlers("clicked"),
        vec![SignalHandler::new("clicked", "gtk_main_quit")]
    );

    editor.edit_handler(0, "");
    assert!(f.button.signal_handlers("clicked").is_empty());
    assert_eq!(editor.rows().len(), 2);

    assert!(f.app.undo());
    assert_eq!(
        f.button.signal_handlers("clicked"),
        vec![SignalHandler::new("clicked", "gtk_main_quit")]
    );
    assert!(f.app.undo());
    assert!(f.app.undo());
    assert!(f.button.signal_handlers("clicked").is_empty());
    assert!(f.app.redo());
    assert_eq!(
        f.button.signal_handlers("clicked"),
        vec![SignalHandler::new("clicked", "on_button1_clicked")]
    );
}

#[test]
fn test_detail_on_placeholder_is_kept_for_the_new_handler() {
    let (f, editor) = signal_fixture();
    /* Row 1 is the `notify` placeholder. */
    editor.edit_detail(1, "label");
    assert_eq!(editor.rows()[1].detail.as_deref(), Some("label"));
    assert!(editor.rows()[1].is_dummy());
    assert!(!f.app.can_undo());

    editor.edit_handler(1, "on_label_changed");
    let rows = editor.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[1].handler,
        Some(SignalHandler::new("notify", "on_label_changed").detail(Some("label")))
    );
    assert_eq!(rows[1].detail.as_deref(), Some("label"));
    assert!(rows[2].is_dummy());
    assert_eq!(rows[2].detail, None);
    assert_eq!(
        rows[1].handler.as_ref().map(SignalHandler::detailed_name),
        Some("notify::label".to_string())
    );

    editor.edit_detail(1, "width-request");
    assert_eq!(
        f.button.signal_handlers("notify")[0].detail.as_deref(),
        Some("width-request")
    );

    /* `clicked` takes no detail. */
    editor.edit_detail(0, "anything");
    assert_eq!(editor.rows()[0].detail, None);
}

#[test]
fn test_toggles_and_user_data() {
    let (f, editor) = signal_fixture();
    editor.edit_handler(0, "on_clicked");
    editor.toggle_after(0);
    editor.toggle_swapped(0);
    editor.edit_user_data(0, "label1");
    assert_eq!(
        f.button.signal_handlers("clicked"),
        vec![SignalHandler::new("clicked", "on_clicked")
            .after(true)
            .swapped(true)
            .user_data(Some("label1"))]
    );
    editor.edit_user_data(0, "");
    assert_eq!(f.button.signal_handlers("clicked")[0].user_data, None);

    /* Placeholders have nothing to toggle. */
    let len = f.app.undo_db().len();
    editor.toggle_after(1);
    assert_eq!(f.app.undo_db().len(), len);

    assert!(f.app.undo());
    assert_eq!(
        f.button.signal_handlers("clicked")[0].user_data.as_deref(),
        Some("label1")
    );
}

#[test]
fn test_suggestions() {
    let (_f, editor) = signal_fixture();
    let callbacks = editor.callback_suggestions(0);
    assert_eq!(callbacks[0], "on_button1_clicked");
    assert_eq!(callbacks[1], "button1_clicked_cb");
    assert_eq!(&callbacks[2..], STOCK_CALLBACKS);

    editor.edit_detail(1, "width-request");
    let callbacks = editor.callback_suggestions(1);
    assert_eq!(callbacks[0], "on_button1_width_request_notify");
    assert_eq!(callbacks[1], "button1_width_request_notify_cb");

    assert!(editor.detail_suggestions(0).is_empty());
    assert_eq!(
        editor.detail_suggestions(1),
        vec!["label".to_string(), "width-request".to_string()]
    );
    assert!(editor.callback_suggestions(5).is_empty());
}

#[test]
fn test_search_docs() {
    let (f, editor) = signal_fixture();
    let searches = Rc::new(RefCell::new(vec![]));
    f.app.connect_doc_search({
        let searches = searches.clone();
        move |_, search| searches.borrow_mut().push(search.clone())
    });
    editor.search_docs(1);
    assert_eq!(
        *searches.borrow(),
        vec![DocSearch {
            book: Some("gtk3".to_string()),
            page: Some("GObject".to_string()),
            search: Some("notify".to_string()),
        }]
    );
}

#[test]
fn test_undo_remove_keeps_handler_position() {
    let (f, editor) = signal_fixture();
    editor.edit_handler(0, "first");
    editor.edit_handler(1, "second");
    assert_eq!(
        f.button.signal_handlers("clicked"),
        vec![
            SignalHandler::new("clicked", "first"),
            SignalHandler::new("clicked", "second"),
        ]
    );
    editor.edit_handler(0, "");
    assert!(f.app.undo());
    assert_eq!(
        f.button.signal_handlers("clicked"),
        vec![
            SignalHandler::new("clicked", "first"),
            SignalHandler::new("clicked", "second"),
        ]
    );
    assert!(f.app.redo());
    assert_eq!(
        f.button.signal_handlers("clicked"),
        vec![SignalHandler::new("clicked", "second")]
    );
}
