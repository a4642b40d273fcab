use super::*;
use crate::system::fake::FakeRunner;

#[test]
fn test_parse_numeric_versions() {
    assert_eq!("14".parse::<MacosVersion>().unwrap(), MacosVersion::new(14, 0, 0));
    assert_eq!("13.6".parse::<MacosVersion>().unwrap(), MacosVersion::new(13, 6, 0));
    assert_eq!("14.2.1".parse::<MacosVersion>().unwrap(), MacosVersion::new(14, 2, 1));
}

#[test]
fn test_parse_release_names() {
    assert_eq!("sonoma".parse::<MacosVersion>().unwrap(), MacosVersion::SONOMA);
    assert_eq!("Monterey".parse::<MacosVersion>().unwrap(), MacosVersion::MONTEREY);
    assert_eq!("big sur".parse::<MacosVersion>().unwrap(), MacosVersion::new(11, 0, 0));
    assert_eq!("tahoe".parse::<MacosVersion>().unwrap().major, 26);
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("".parse::<MacosVersion>().is_err());
    assert!("catalina-ish".parse::<MacosVersion>().is_err());
    assert!("14.1.2.3".parse::<MacosVersion>().is_err());
}

#[test]
fn test_ordering_against_threshold() {
    let ventura: MacosVersion = "13.6.1".parse().unwrap();
    let sonoma: MacosVersion = "14.0".parse().unwrap();
    assert!(ventura < MacosVersion::SONOMA);
    assert!(sonoma >= MacosVersion::SONOMA);
    assert!(MacosVersion::new(26, 0, 0) > MacosVersion::SONOMA);
}

#[test]
fn test_display_and_codename() {
    assert_eq!(MacosVersion::new(14, 2, 1).to_string(), "14.2.1");
    assert_eq!(MacosVersion::new(12, 0, 0).to_string(), "12.0");
    assert_eq!(MacosVersion::new(13, 4, 0).codename(), Some("ventura"));
    assert_eq!(MacosVersion::new(10, 15, 0).codename(), None);
    assert_eq!(String::from(MacosVersion::MONTEREY), "monterey");
    assert_eq!(String::from(MacosVersion::new(14, 2, 0)), "14.2");
}

#[test]
fn test_detect_macos_uses_sw_vers() {
    let runner = FakeRunner::new();
    *runner.product_version.borrow_mut() = "15.1".to_string();
    assert_eq!(detect_macos(&runner).unwrap(), MacosVersion::new(15, 1, 0));
}

#[test]
fn test_detect_macos_without_sw_vers() {
    let runner = FakeRunner::new();
    runner.missing.borrow_mut().insert("sw_vers".to_string());
    let err = detect_macos(&runner).unwrap_err();
    assert!(matches!(err, InstallError::UnknownMacos { .. }));
    assert!(err.to_string().contains("--macos"));
}

#[test]
fn test_detect_macos_rejects_unparseable_output() {
    let runner = FakeRunner::new();
    *runner.product_version.borrow_mut() = "not-a-version".to_string();
    let err = detect_macos(&runner).unwrap_err();
    assert!(matches!(err, InstallError::UnknownMacos { ref reason } if reason.contains("not-a-version")));
}

#[test]
fn test_launch_agents_dir() {
    let host = Host::new(MacosVersion::MONTEREY, "/Users/dog", "/Applications");
    assert_eq!(host.launch_agents_dir(), PathBuf::from("/Users/dog/Library/LaunchAgents"));
}
