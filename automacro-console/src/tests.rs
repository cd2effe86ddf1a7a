use crate::args::Args;
use crate::shell::{MenuChoice, Shell};
use automacro::*;
use clap::Parser;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

fn session_in(dir: &Path) -> Session {
    Session::open(StoragePaths {
        config: dir.join("config.txt"),
        macros: dir.join("macros.txt"),
    })
}

/// Drive a shell over `script` and return its output, final session and sink
fn drive(session: Session, script: &str) -> (String, Session, RecordingSink) {
    let mut shell = Shell::new(
        Cursor::new(script.as_bytes().to_vec()),
        Vec::new(),
        session,
        RecordingSink::new(),
    );
    shell.run().expect("in-memory I/O does not fail");
    let (output, session, sink) = shell.into_parts();
    (String::from_utf8(output).expect("utf-8 output"), session, sink)
}

#[test]
fn test_menu_choice_numbers() {
    assert_eq!(MenuChoice::from_number(0), Some(MenuChoice::Quit));
    assert_eq!(MenuChoice::from_number(7), Some(MenuChoice::Load));
    assert_eq!(MenuChoice::from_number(8), None);
    assert_eq!(MenuChoice::from_number(-1), None);
}

#[test]
fn test_create_list_and_quit_saves() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let script = "3\nGreet\nkey\n72\nkey\n73\ndone\n1\n0\n";

    let (output, session, _) = drive(session_in(temp_dir.path()), script);

    assert!(output.contains("Macro added."));
    assert!(output.contains("1) Greet (2 steps)"));
    assert!(output.ends_with("Goodbye!\n"));
    assert_eq!(session.store.len(), 1);
    let saved = fs::read_to_string(temp_dir.path().join("macros.txt")).expect("saved on quit");
    assert_eq!(saved, "macro Greet\nkey 72\nkey 73\nend\n");
}

#[test]
fn test_create_with_empty_name() {
    let temp_dir = tempdir().expect("Failed to create temp dir");

    let (output, session, _) = drive(session_in(temp_dir.path()), "3\n\n0\n");

    assert!(output.contains("Name cannot be empty."));
    assert!(!output.contains("Macro added."));
    assert!(session.store.is_empty());
}

#[test]
fn test_run_macro_replays_against_sink() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("config.txt"), "default_delay_ms=50\n")
        .expect("Failed to write file");
    fs::write(
        temp_dir.path().join("macros.txt"),
        "macro Scenario\nmove 10 5\ndelay 200\nclick left\nend\n",
    )
    .expect("Failed to write file");

    let (output, _, sink) = drive(session_in(temp_dir.path()), "2\n1\n0\n");

    assert!(output.contains("Done."));
    assert_eq!(
        sink.calls,
        vec![
            SinkCall::Move { dx: 10, dy: 5 },
            SinkCall::Wait(Duration::from_millis(50)),
            SinkCall::Wait(Duration::from_millis(200)),
            SinkCall::Click(MouseButton::Left),
            SinkCall::Wait(Duration::from_millis(50)),
        ]
    );
}

#[test]
fn test_run_with_invalid_selection() {
    let temp_dir = tempdir().expect("Failed to create temp dir");

    let (output, _, _) = drive(session_in(temp_dir.path()), "2\n0\n");
    assert!(output.contains("No macros to run."));

    fs::write(temp_dir.path().join("macros.txt"), "macro Only\nkey 1\nend\n")
        .expect("Failed to write file");
    let (output, _, sink) = drive(session_in(temp_dir.path()), "2\n5\n2\nabc\n0\n");
    assert_eq!(output.matches("Invalid macro number.").count(), 2);
    assert!(sink.calls.is_empty());
}

#[test]
fn test_delete_by_position() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("macros.txt"),
        "macro A\nend\nmacro B\nend\nmacro C\nend\n",
    )
    .expect("Failed to write file");

    let (output, session, _) = drive(session_in(temp_dir.path()), "4\n4\n4\n1\n0\n");

    assert!(output.contains("Invalid macro number."));
    assert!(output.contains("Macro removed."));
    let names: Vec<&str> = session.store.macros().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C"]);
}

#[test]
fn test_set_default_delay() {
    let temp_dir = tempdir().expect("Failed to create temp dir");

    let (output, session, _) = drive(session_in(temp_dir.path()), "5\n-10\n5\n125\n0\n");

    assert!(output.contains("Invalid delay."));
    assert!(output.contains("Default delay set."));
    assert_eq!(session.config.default_delay_ms, 125);
    let saved = fs::read_to_string(temp_dir.path().join("config.txt")).expect("saved on quit");
    assert_eq!(saved, "default_delay_ms=125\n");
}

#[test]
fn test_load_restores_saved_state() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("macros.txt"), "macro Keep\nend\n")
        .expect("Failed to write file");

    // delete, then reload from disk before quitting
    let (output, session, _) = drive(session_in(temp_dir.path()), "4\n1\n7\n1\n0\n");

    assert!(output.contains("Loaded."));
    assert!(output.contains("1) Keep (0 steps)"));
    assert_eq!(session.store.len(), 1);
}

#[test]
fn test_unknown_option_and_end_of_input() {
    let temp_dir = tempdir().expect("Failed to create temp dir");

    let (output, _, _) = drive(session_in(temp_dir.path()), "9\nhello\n");

    assert_eq!(output.matches("Unknown option.").count(), 2);
    assert!(output.ends_with("Goodbye!\n"));
    assert!(temp_dir.path().join("config.txt").exists());
}

#[test]
fn test_save_failure_is_reported() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let session = Session::open(StoragePaths {
        config: temp_dir.path().to_path_buf(),
        macros: temp_dir.path().join("macros.txt"),
    });

    let (output, _, _) = drive(session, "6\n0\n");

    assert_eq!(output.matches("Failed to write config file.").count(), 2);
    assert!(output.contains("Saved."));
    assert!(!output.contains("Failed to write macros file."));
}

#[test]
fn test_args_defaults() {
    let args = Args::parse_from(["automacro"]);
    let paths = args.storage_paths();

    assert_eq!(paths, StoragePaths::default());
    assert!(!args.dry_run);
    assert!(args.run.is_none());
}

#[test]
fn test_args_overrides() {
    let args = Args::parse_from([
        "automacro",
        "--config",
        "cfg.txt",
        "--macros",
        "lib.txt",
        "--dry-run",
        "--run",
        "Greet",
    ]);

    assert_eq!(args.config, Path::new("cfg.txt"));
    assert_eq!(args.macros, Path::new("lib.txt"));
    assert!(args.dry_run);
    assert_eq!(args.run.as_deref(), Some("Greet"));
}
