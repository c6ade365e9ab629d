use anyhow::Result;
use ironfold::config::{
    DEFAULT_FANOUT, ENV_FANOUT, ENV_MODE, ENV_PARTITIONS, ENV_THREADS, ModeConfig,
};
use ironfold::instances::Sum;
use ironfold::{ExecMode, MergeError, ReduceConfig, Reducer};
use std::collections::HashMap;
use std::io::Write;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_are_parallel_on_the_global_pool() {
    let cfg = ReduceConfig::default();
    assert_eq!(cfg.mode, ModeConfig::Parallel);
    assert_eq!(cfg.threads, None);
    assert_eq!(cfg.partitions, None);
    assert_eq!(cfg.fanout, DEFAULT_FANOUT);
    assert_eq!(
        cfg.exec_mode(),
        ExecMode::Parallel {
            threads: None,
            partitions: None
        }
    );
}

#[test]
fn json_fills_missing_fields_with_defaults() -> Result<()> {
    let cfg = ReduceConfig::from_json_str(r#"{ "threads": 2 }"#)?;
    assert_eq!(cfg.threads, Some(2));
    assert_eq!(cfg.fanout, DEFAULT_FANOUT);

    let cfg = ReduceConfig::from_json_str("{}")?;
    assert_eq!(cfg, ReduceConfig::default());
    Ok(())
}

#[test]
fn json_rejects_unknown_fields_and_bad_values() {
    assert!(matches!(
        ReduceConfig::from_json_str(r#"{ "fan_out": 4 }"#),
        Err(MergeError::Config(_))
    ));
    assert!(matches!(
        ReduceConfig::from_json_str(r#"{ "mode": "distributed" }"#),
        Err(MergeError::Config(_))
    ));
    assert!(matches!(
        ReduceConfig::from_json_str(r#"{ "fanout": 1 }"#),
        Err(MergeError::InvalidConfig(_))
    ));
    assert!(matches!(
        ReduceConfig::from_json_str(r#"{ "partitions": 0 }"#),
        Err(MergeError::InvalidConfig(_))
    ));
}

#[test]
fn config_file_round_trip() -> Result<()> {
    let cfg = ReduceConfig {
        mode: ModeConfig::Parallel,
        threads: Some(3),
        partitions: Some(12),
        fanout: 4,
    };
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(serde_json::to_string_pretty(&cfg)?.as_bytes())?;

    let loaded = ReduceConfig::from_file(file.path())?;
    assert_eq!(loaded, cfg);

    let reducer = Reducer::from_config(&loaded)?;
    assert_eq!(reducer.fanout(), 4);
    assert_eq!(reducer.reduce_or_identity((1..=64).collect(), &Sum::<u32>::new()), 2080);
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let err = ReduceConfig::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, MergeError::Io(_)));
    Ok(())
}

#[test]
fn environment_overrides() -> Result<()> {
    let cfg = ReduceConfig::from_env_with(env(&[(ENV_MODE, "Sequential"), (ENV_FANOUT, " 8 ")]))?;
    assert_eq!(cfg.mode, ModeConfig::Sequential);
    assert_eq!(cfg.fanout, 8);
    assert_eq!(cfg.exec_mode(), ExecMode::Sequential);

    let cfg = ReduceConfig::from_env_with(env(&[(ENV_THREADS, "2"), (ENV_PARTITIONS, "5")]))?;
    assert_eq!(
        cfg.exec_mode(),
        ExecMode::Parallel {
            threads: Some(2),
            partitions: Some(5)
        }
    );

    let cfg = ReduceConfig::from_env_with(env(&[]))?;
    assert_eq!(cfg, ReduceConfig::default());
    Ok(())
}

#[test]
fn environment_errors_name_the_variable() {
    let err = ReduceConfig::from_env_with(env(&[(ENV_THREADS, "many")])).unwrap_err();
    assert!(err.to_string().contains(ENV_THREADS));

    let err = ReduceConfig::from_env_with(env(&[(ENV_MODE, "gpu")])).unwrap_err();
    assert!(matches!(err, MergeError::InvalidConfig(_)));

    let err = ReduceConfig::from_env_with(env(&[(ENV_FANOUT, "1")])).unwrap_err();
    assert!(matches!(err, MergeError::InvalidConfig(_)));
}
