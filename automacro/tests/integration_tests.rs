use automacro::*;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn paths_in(dir: &std::path::Path) -> StoragePaths {
    StoragePaths {
        config: dir.join("config.txt"),
        macros: dir.join("macros.txt"),
    }
}

#[test]
fn test_missing_resources_yield_defaults() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let session = Session::open(paths_in(temp_dir.path()));

    assert_eq!(session.config.default_delay_ms, 50);
    assert!(session.store.is_empty());
}

#[test]
fn test_session_save_and_reopen() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let paths = paths_in(temp_dir.path());

    let mut session = Session::open(paths.clone());
    assert!(session.set_default_delay(120));
    session.store.add(Macro {
        name: "Open menu".to_string(),
        actions: vec![
            Action::Key { vk: 18 },
            Action::Delay { ms: 300 },
            Action::Click {
                button: MouseButton::Right,
            },
        ],
    });
    assert!(session.save().is_ok());

    let config_text = fs::read_to_string(&paths.config).expect("config written");
    assert_eq!(config_text, "default_delay_ms=120\n");
    let macros_text = fs::read_to_string(&paths.macros).expect("macros written");
    assert_eq!(
        macros_text,
        "macro Open menu\nkey 18\ndelay 300\nclick right\nend\n"
    );

    let reopened = Session::open(paths);
    assert_eq!(reopened.config, session.config);
    assert_eq!(reopened.store, session.store);
}

#[test]
fn test_reload_discards_unsaved_changes() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let paths = paths_in(temp_dir.path());
    fs::write(&paths.macros, "macro Kept\nkey 1\nend\n").expect("Failed to write file");

    let mut session = Session::open(paths);
    assert_eq!(session.store.len(), 1);
    session.delete(1);
    assert!(session.set_default_delay(5));
    assert!(session.store.is_empty());

    session.reload();
    assert_eq!(session.store.len(), 1);
    assert_eq!(session.config.default_delay_ms, 50);
}

#[test]
fn test_write_failure_is_reported_and_memory_kept() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    // a directory cannot be written as a file
    let paths = StoragePaths {
        config: temp_dir.path().to_path_buf(),
        macros: temp_dir.path().join("macros.txt"),
    };

    let mut session = Session::open(paths.clone());
    session.store.add(Macro::new("Survivor"));
    let report = session.save();

    assert!(matches!(
        report.config,
        Err(MacroError::SaveError {
            resource: "config file",
            ..
        })
    ));
    assert!(report.macros.is_ok());
    assert!(!report.is_ok());
    assert_eq!(session.store.len(), 1);
    assert!(paths.macros.exists());
}

#[test]
fn test_malformed_file_loads_what_it_can() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let paths = paths_in(temp_dir.path());
    fs::write(
        &paths.macros,
        "junk before\nmacro First\nmove 1 nope\nkey 9\nmacro Second\r\ndelay 40\r\n",
    )
    .expect("Failed to write file");
    fs::write(&paths.config, "default_delay_ms=fast\n").expect("Failed to write file");

    let session = Session::open(paths);

    assert_eq!(session.config.default_delay_ms, 50);
    let listed: Vec<(String, usize)> = session
        .store
        .list()
        .into_iter()
        .map(|summary| (summary.name, summary.step_count))
        .collect();
    assert_eq!(
        listed,
        vec![("First".to_string(), 1), ("Second".to_string(), 1)]
    );
}

#[test]
fn test_run_by_position_and_name() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let paths = paths_in(temp_dir.path());
    fs::write(&paths.config, "default_delay_ms=25\n").expect("Failed to write file");
    fs::write(
        &paths.macros,
        "macro Nudge\nmove 5 0\nend\nmacro Type\nkey 72\nkey 73\nend\n",
    )
    .expect("Failed to write file");
    let session = Session::open(paths);

    let mut sink = RecordingSink::new();
    assert!(session.run(3, &mut sink).is_none());
    assert!(sink.calls.is_empty());

    let report = session.run(1, &mut sink).expect("position 1 exists");
    assert_eq!(report.steps, 1);
    assert_eq!(
        sink.calls,
        vec![
            SinkCall::Move { dx: 5, dy: 0 },
            SinkCall::Wait(Duration::from_millis(25)),
        ]
    );

    let mut sink = RecordingSink::new();
    session.run_named("Type", &mut sink).expect("macro exists");
    assert_eq!(sink.calls[0], SinkCall::Key(72));
    assert_eq!(sink.calls[2], SinkCall::Key(73));
    assert!(session.run_named("Missing", &mut sink).is_none());
}

#[test]
fn test_export_json_file() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("macros.json");
    let store = MacroStore::from_macros(vec![Macro {
        name: "Export".to_string(),
        actions: vec![Action::Delay { ms: 10 }],
    }]);

    store.export_json(&file_path).expect("Failed to export");

    let loaded_json = fs::read_to_string(&file_path).expect("Failed to read file");
    let loaded = MacroStore::from_json(&loaded_json).expect("Failed to deserialize");
    assert_eq!(loaded, store);
}

#[test]
fn test_dry_run_sink_is_always_available() {
    let mut sink = create_sink(true).expect("dry run sink");
    assert!(sink.key(65).is_ok());
    assert!(sink.move_relative(-3, 3).is_ok());
}
