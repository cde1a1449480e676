use clap::Parser;
use single_hpp_release::cli::Args;
use single_hpp_release::config::{Config, UNSET_VERSION};
use std::path::{Path, PathBuf};

#[test]
fn test_no_flags_uses_defaults() {
    let args = Args::try_parse_from(["single-hpp-release"]).unwrap();

    assert_eq!(args.tag, None);
    assert_eq!(args.last_tag, None);
    assert!(!args.no_push);
    assert!(!args.skip_preflight);
    assert!(!args.verbose);
    assert_eq!(
        args.config,
        PathBuf::from(".config/single-hpp-release.toml")
    );
}

#[test]
fn test_parse_all_flags() {
    let args = Args::try_parse_from([
        "single-hpp-release",
        "--tag",
        "v.8.0.0",
        "--last-tag",
        "v.7.0.0",
        "--no-push",
        "--skip-preflight",
        "--config",
        "release.toml",
        "--verbose",
    ])
    .unwrap();

    assert_eq!(args.tag, Some("v.8.0.0".to_string()));
    assert_eq!(args.last_tag, Some("v.7.0.0".to_string()));
    assert!(args.no_push);
    assert!(args.skip_preflight);
    assert!(args.verbose);
    assert_eq!(args.config, PathBuf::from("release.toml"));
}

#[test]
fn test_short_tag_flag() {
    let args = Args::try_parse_from(["single-hpp-release", "-t", "v.9.0.0"]).unwrap();
    assert_eq!(args.tag, Some("v.9.0.0".to_string()));
}

#[test]
fn test_unknown_flag_rejected() {
    assert!(Args::try_parse_from(["single-hpp-release", "--hash"]).is_err());
}

#[test]
fn test_merge_args_override_config() {
    let args = Args::try_parse_from([
        "single-hpp-release",
        "--tag",
        "v.8.0.0",
        "--no-push",
        "--skip-preflight",
    ])
    .unwrap();

    let mut config = Config::default();
    config.merge_with_args(&args);

    assert_eq!(config.release.version, "v.8.0.0");
    assert_eq!(config.release.last_version, "v.7.0.0");
    assert!(!config.release.push_to_production);
    assert!(!config.release.preflight);
}

#[test]
fn test_merge_without_flags_keeps_config() {
    let args = Args::try_parse_from(["single-hpp-release"]).unwrap();

    let mut config = Config::default();
    config.release.push_to_production = true;
    config.merge_with_args(&args);

    let resolved = config.resolve(Path::new("/work"));
    assert_eq!(resolved.version, UNSET_VERSION);
    assert!(resolved.push_to_production);
    assert!(resolved.preflight);
}
