use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WallfitError::invalid_geometry("x")
            .to_string()
            .contains("invalid geometry:")
    );
    assert!(
        WallfitError::unknown_layout_mode("zoom")
            .to_string()
            .contains("unknown layout mode: zoom")
    );
    assert!(
        WallfitError::unknown_target("x")
            .to_string()
            .contains("unknown target:")
    );
    assert!(
        WallfitError::surface_write("x")
            .to_string()
            .contains("surface write failure:")
    );
}

#[test]
fn stages_separate_input_from_platform_failures() {
    assert_eq!(WallfitError::missing_input("x").stage(), Stage::Input);
    assert_eq!(WallfitError::unknown_target("x").stage(), Stage::Input);
    assert_eq!(WallfitError::fetch("x").stage(), Stage::Acquire);
    assert_eq!(WallfitError::decode("x").stage(), Stage::Acquire);
    assert_eq!(WallfitError::invalid_geometry("x").stage(), Stage::Resolve);
    assert_eq!(WallfitError::composition("x").stage(), Stage::Compose);
    assert_eq!(WallfitError::surface_write("x").stage(), Stage::Dispatch);

    assert!(WallfitError::unknown_layout_mode("x").is_input_error());
    assert!(!WallfitError::surface_write("x").is_input_error());
    assert!(!WallfitError::fetch("x").is_input_error());
}
