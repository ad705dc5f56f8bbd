mod support;

use assert_matches::assert_matches;
use modal_stack::{Diagnostic, DialogOptions, Document, ModalConfig};
use pretty_assertions::assert_eq;
use support::Host;

#[test]
fn marked_element_receives_initial_focus() {
    let host = Host::new();
    let _dialog = host.open_dialog("dialog", DialogOptions::new().label("Pick"), |doc, root| {
        doc.append_new(root, "button", &[("id", "cancel")])
            .expect("append cancel");
        doc.append_new(root, "button", &[("id", "confirm"), ("data-autofocus", "")])
            .expect("append confirm");
    });

    assert_eq!(host.focused().as_deref(), Some("confirm"));
}

#[test]
fn marked_element_with_negative_tabindex_is_accepted() {
    let host = Host::new();
    let _dialog = host.open_dialog("dialog", DialogOptions::new().label("Read"), |doc, root| {
        doc.append_new(root, "button", &[("id", "close")])
            .expect("append close");
        doc.append_new(
            root,
            "h2",
            &[("id", "title"), ("tabindex", "-1"), ("data-autofocus", "")],
        )
        .expect("append title");
    });

    assert_eq!(host.focused().as_deref(), Some("title"));
}

#[test]
fn unusable_marker_falls_back_to_first_focusable() {
    let host = Host::new();
    let _dialog = host.open_dialog("dialog", DialogOptions::new().label("Form"), |doc, root| {
        doc.append_new(root, "input", &[("id", "name")])
            .expect("append name");
        doc.append_new(
            root,
            "button",
            &[("id", "submit"), ("disabled", ""), ("data-autofocus", "")],
        )
        .expect("append submit");
    });

    assert_eq!(host.focused().as_deref(), Some("name"));
    assert_eq!(host.diagnostics(), Vec::new());
}

#[test]
fn configured_marker_attribute_is_honoured() {
    let config = ModalConfig {
        autofocus_attribute: "data-initial".to_string(),
        ..ModalConfig::default()
    };
    let host = Host::with_config(config);
    let _dialog = host.open_dialog("dialog", DialogOptions::new().label("Pick"), |doc, root| {
        doc.append_new(root, "button", &[("id", "a"), ("data-autofocus", "")])
            .expect("append a");
        doc.append_new(root, "button", &[("id", "b"), ("data-initial", "")])
            .expect("append b");
    });

    assert_eq!(host.focused().as_deref(), Some("b"));
}

#[test]
fn dialog_without_focusable_content_reports_and_keeps_focus() {
    let host = Host::new();
    host.button(host.body(), "trigger");
    host.focus("trigger");

    let dialog = host.open_dialog("dialog", DialogOptions::new().label("Info"), |doc, root| {
        doc.append_new(root, "p", &[]).expect("append paragraph");
    });

    assert_eq!(host.focused().as_deref(), Some("trigger"));
    let diagnostics = host.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_matches!(
        &diagnostics[0],
        Diagnostic::NoFocusableElement { root, .. } if *root == dialog.root
    );
}

#[test]
fn unlabelled_dialog_reports_missing_label() {
    let host = Host::new();
    let _dialog = host.open_dialog("dialog", DialogOptions::new(), |doc, root| {
        doc.append_new(root, "button", &[]).expect("append button");
    });

    assert_matches!(
        host.diagnostics().as_slice(),
        [Diagnostic::MissingAccessibleLabel { .. }]
    );
}

#[test]
fn labelled_by_reference_counts_as_label() {
    let host = Host::new();
    let _dialog = host.open_dialog(
        "dialog",
        DialogOptions::new().labelled_by("dialog-title"),
        |doc, root| {
            doc.append_new(root, "h2", &[("id", "dialog-title")])
                .expect("append title");
            doc.append_new(root, "button", &[]).expect("append button");
        },
    );

    assert_eq!(host.diagnostics(), Vec::new());
}

#[test]
fn silenced_diagnostics_are_not_reported() {
    let config = ModalConfig {
        silence_diagnostics: true,
        ..ModalConfig::default()
    };
    let host = Host::with_config(config);
    let _dialog = host.open_dialog("dialog", DialogOptions::new(), |_, _| {});

    assert_eq!(host.diagnostics(), Vec::new());
}

#[test]
fn close_restores_focus_to_the_trigger() {
    let host = Host::new();
    host.button(host.body(), "trigger");
    host.focus("trigger");

    let dialog = host.open_with_buttons("dialog", &["ok"]);
    assert_eq!(host.focused().as_deref(), Some("ok"));
    dialog.close();

    assert_eq!(host.focused().as_deref(), Some("trigger"));
}

#[test]
fn explicit_final_focus_wins_over_the_trigger() {
    let host = Host::new();
    host.button(host.body(), "trigger");
    let elsewhere = host.button(host.body(), "elsewhere");
    host.focus("trigger");

    let dialog = host.open_dialog(
        "dialog",
        DialogOptions::new().label("Move").final_focus(elsewhere),
        |doc, root| {
            doc.append_new(root, "button", &[]).expect("append button");
        },
    );
    dialog.close();

    assert_eq!(host.focused().as_deref(), Some("elsewhere"));
}

#[test]
fn unfocusable_final_target_leaves_focus_alone() {
    let host = Host::new();
    let trigger = host.button(host.body(), "trigger");
    host.focus("trigger");

    let dialog = host.open_with_buttons("dialog", &["ok"]);
    host.doc
        .set_attribute(trigger, "disabled", "")
        .expect("disable trigger");
    dialog.close();

    // Focus was inside the removed dialog and nothing took it back.
    assert_eq!(host.doc.active_element(), None);
}

#[test]
fn dialog_opened_from_the_body_restores_nothing() {
    let host = Host::new();
    let dialog = host.open_with_buttons("dialog", &["ok"]);

    let entry = host.service.topmost().expect("dialog registered");
    assert_eq!(entry.prior_active(), None);

    dialog.close();
    assert_eq!(host.doc.active_element(), None);
}

#[test]
fn dropping_the_controller_restores_focus() {
    let host = Host::new();
    host.button(host.body(), "trigger");
    host.focus("trigger");

    let dialog = host.open_with_buttons("dialog", &["ok"]);
    let root = dialog.root;
    drop(dialog);

    assert_eq!(host.focused().as_deref(), Some("trigger"));
    assert_eq!(host.service.listener_count(), 0);
    host.doc.remove(root).expect("unmount");
}
