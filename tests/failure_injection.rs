//! Failure and outcome injection on the registry and on single handles.

use filestub::{
    Error, FileData, InjectedFailure, OpenRegistry, ReadEffect, WriteEffect,
};

fn io_error() -> InjectedFailure {
    InjectedFailure::new("No such file or directory")
}

#[test]
fn global_failure_applies_to_every_open() {
    let mut registry = OpenRegistry::new();
    registry.fail_all(io_error());

    assert!(registry.open("/not/there_1", "r").is_err());
    assert!(registry.open("/not/there_2", "r").is_err());
    assert!(registry.open("/not/there_3", "r").is_err());
}

#[test]
fn exempted_path_opens_despite_global_failure() {
    let mut registry = OpenRegistry::new();
    registry.fail_all(io_error());
    registry.exempt_path("/is/there");

    assert!(registry.open("/not/there_1", "r").is_err());
    assert!(registry.open("/not/there_2", "r").is_err());
    assert!(registry.open("/is/there", "r").is_ok());
}

#[test]
fn failure_sequence_then_back_to_normal() {
    let mut registry = OpenRegistry::new();
    registry.fail_sequence(vec![
        Some(InjectedFailure::new("value error")),
        Some(InjectedFailure::new("runtime error")),
        None,
    ]);

    assert_eq!(
        registry.open("/not/there_1", "r").unwrap_err().to_string(),
        "injected failure: value error"
    );
    assert_eq!(
        registry.open("/not/there_2", "r").unwrap_err().to_string(),
        "injected failure: runtime error"
    );
    assert!(registry.open("/is/there", "r").is_ok());
}

#[test]
fn path_failure_fires_only_for_that_path() {
    let mut registry = OpenRegistry::new();
    registry.fail_path("/f", io_error());

    let err = registry.open("/f", "r").unwrap_err();
    assert!(matches!(err, Error::Injected(_)));
    assert!(registry.open("/other", "r").is_ok(), "other paths must open normally");
}

#[test]
fn cleared_path_failure_gives_way_to_effects_on_the_handle() {
    let mut registry = OpenRegistry::new();
    registry.fail_path("/path/to/error_file", io_error());
    assert!(registry.open("/path/to/allowed_file", "r").is_ok());
    assert!(registry.open("/path/to/error_file", "r").is_err());

    // Reset the open failure, then make reads and writes fail instead.
    registry.clear_path("/path/to/error_file");
    {
        let handle = registry.handle("/path/to/error_file");
        let mut file = handle.borrow_mut();
        file.set_read_effect(Some(ReadEffect::Fail(io_error())));
        file.set_write_effect(Some(WriteEffect::Fail(io_error())));
    }

    let file = registry.open_scoped("/path/to/error_file", "r").unwrap();
    assert!(file.read(None).is_err());
    assert!(file.write("bad write").is_err());
}

#[test]
fn read_failure_leaves_buffer_and_cursor_untouched() {
    let mut registry = OpenRegistry::with_default_contents("contents");
    {
        let handle = registry.handle("/f");
        handle.borrow_mut().set_contents(FileData::from("contents"));
        handle.borrow_mut().set_read_effect(Some(ReadEffect::Fail(io_error())));
    }

    let file = registry.open_scoped("/f", "r").unwrap();
    assert!(file.read(None).is_err());
    assert_eq!(file.tell(), 0);
    assert_eq!(file.contents(), "contents");
}

#[test]
fn hijacked_read_returns_canned_value_without_state_change() {
    let mut registry = OpenRegistry::new();
    registry
        .handle("/path/to/file")
        .borrow_mut()
        .set_read_effect(Some(ReadEffect::Yield(FileData::from("Hijacked!"))));

    let file = registry.open_scoped("/path/to/file", "w").unwrap();
    assert_eq!(file.read(None).unwrap(), "Hijacked!");
    assert_eq!(file.tell(), 0, "a hijacked read must not move the cursor");
}

#[test]
fn discarded_writes_are_logged_but_never_land() {
    let mut registry = OpenRegistry::new();
    registry
        .handle("/path/to/file")
        .borrow_mut()
        .set_write_effect(Some(WriteEffect::Discard));

    let file = registry.open_scoped("/path/to/file", "r").unwrap();
    file.write("text").unwrap();

    assert!(file.contents().is_empty(), "discarded writes must not reach the buffer");
    assert_eq!(file.tell(), 0);
    let handle = file.handle();
    drop(file);
    assert_eq!(handle.borrow().log().count_of("write"), 1);
}

#[test]
fn type_mismatch_fails_without_partial_write() {
    let mut registry = OpenRegistry::with_default_contents("text buffer");
    let file = registry.open_scoped("/f", "r").unwrap();

    let err = file.write(vec![0u8, 1, 2]).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
    assert_eq!(file.contents(), "text buffer");
}

#[test]
fn different_effects_for_different_files() {
    let mut registry = OpenRegistry::new();
    registry.fail_path("fail_on_open", io_error());
    registry
        .handle("fail_on_read")
        .borrow_mut()
        .set_read_effect(Some(ReadEffect::Fail(io_error())));
    registry
        .handle("fail_on_write")
        .borrow_mut()
        .set_write_effect(Some(WriteEffect::Fail(io_error())));

    {
        let file = registry.open_scoped("success", "w").unwrap();
        file.write("some text").unwrap();
    }

    assert!(registry.open("fail_on_open", "rb").is_err());

    {
        let file = registry.open_scoped("fail_on_read", "r").unwrap();
        assert!(file.read(None).is_err());
    }
    {
        let file = registry.open_scoped("fail_on_write", "w").unwrap();
        assert!(file.write("not to be written").is_err());
    }

    let file = registry.open_scoped("success", "r").unwrap();
    assert_eq!(file.read(None).unwrap(), "some text");
}

#[test]
fn failed_open_does_not_disturb_later_opens() {
    let mut registry = OpenRegistry::new();
    registry.fail_path("/f", InjectedFailure::new("boom"));

    assert!(registry.open("/f", "r").is_err());
    // The failure stays put for its own path and never migrates.
    assert!(registry.open("/other", "r").is_ok());
    assert!(registry.open("/f", "r").is_err());
    assert!(registry.open("/yet/another", "r").is_ok());
}
