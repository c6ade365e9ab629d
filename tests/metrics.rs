//! Tests for the metrics module.
#![cfg(feature = "metrics")]

use anyhow::Result;
use ironfold::instances::{Concat, Sum};
use ironfold::metrics::{CounterMetric, GaugeMetric, Metric, MetricsCollector};
use ironfold::{ExecMode, MergeError, Reducer};
use serde_json::{Value, json};
use std::any::Any;

#[test]
fn test_counter_metric() {
    let mut collector = MetricsCollector::new();
    collector.register(Box::new(CounterMetric::with_value("test_counter", 5)));

    let snapshot = collector.snapshot();
    assert_eq!(snapshot.get("test_counter"), Some(&json!(5)));
    assert_eq!(collector.counter("test_counter"), Some(5));
}

#[test]
fn test_gauge_metric() {
    let mut collector = MetricsCollector::new();
    collector.register(Box::new(
        GaugeMetric::new("test_gauge", 42.5).with_description("Test gauge"),
    ));

    let snapshot = collector.snapshot();
    assert_eq!(snapshot.get("test_gauge"), Some(&json!(42.5)));
    assert_eq!(collector.counter("test_gauge"), None);

    let report = collector.to_json();
    assert_eq!(report["test_gauge"]["description"], json!("Test gauge"));
}

#[test]
fn test_increment_counter() {
    let collector = MetricsCollector::new();
    collector.increment_counter("hits", 2);
    collector.increment_counter("hits", 3);
    assert_eq!(collector.counter("hits"), Some(5));

    collector.set_counter("hits", 1);
    assert_eq!(collector.counter("hits"), Some(1));
}

#[test]
fn test_reducer_records_work() -> Result<()> {
    let metrics = MetricsCollector::new();
    let reducer = Reducer::new(ExecMode::Parallel {
        threads: None,
        partitions: Some(4),
    })?
    .with_metrics(metrics.clone());

    assert_eq!(reducer.reduce((1..=100).collect(), &Sum::<u64>::new())?, 5050);
    assert_eq!(metrics.counter("reduce_calls"), Some(1));
    assert_eq!(metrics.counter("items_reduced"), Some(100));
    assert_eq!(metrics.counter("merges"), Some(99));
    assert_eq!(metrics.counter("partitions"), Some(4));
    assert_eq!(metrics.snapshot().get("combine_levels"), Some(&json!(3.0)));
    assert!(metrics.elapsed().is_some());

    assert_eq!(reducer.reduce_or_identity(Vec::new(), &Concat), "");
    assert_eq!(metrics.counter("reduce_calls"), Some(2));
    assert_eq!(metrics.counter("empty_inputs"), Some(1));
    assert_eq!(metrics.counter("items_reduced"), Some(100));
    Ok(())
}

#[test]
fn test_sequential_reducer_metrics() -> Result<()> {
    let metrics = MetricsCollector::new();
    let reducer = Reducer::sequential().with_metrics(metrics.clone());
    let words: Vec<String> = ["x", "y", "z"].map(String::from).to_vec();
    assert_eq!(reducer.reduce(words, &Concat)?, "xyz");

    assert_eq!(metrics.counter("merges"), Some(2));
    assert_eq!(metrics.counter("partitions"), Some(1));
    assert_eq!(metrics.snapshot().get("combine_levels"), Some(&json!(1.0)));
    assert!(reducer.metrics().is_some());
    Ok(())
}

#[test]
fn test_save_to_file() -> Result<()> {
    let metrics = MetricsCollector::new();
    let reducer = Reducer::default().with_metrics(metrics.clone());
    reducer.reduce_or_identity(vec![1u32, 2, 3], &Sum::new());

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("metrics.json");
    metrics.save_to_file(path.to_str().unwrap_or("metrics.json"))?;

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(saved["items_reduced"]["value"], json!(3));
    assert!(saved.get("execution_time_ms").is_some());
    Ok(())
}

#[test]
fn test_save_to_missing_directory_is_an_io_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("absent").join("metrics.json");
    let err = MetricsCollector::new()
        .save_to_file(path.to_str().unwrap_or("absent/metrics.json"))
        .unwrap_err();
    assert!(matches!(err, MergeError::Io(_)));
    Ok(())
}

struct Label(&'static str);

impl Metric for Label {
    fn name(&self) -> &str {
        "label"
    }
    fn value(&self) -> Value {
        json!(self.0)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn test_custom_metric() {
    let mut collector = MetricsCollector::new();
    let custom: Vec<Box<dyn Metric>> = vec![
        Box::new(Label("nightly")),
        Box::new(CounterMetric::new("batches")),
    ];
    collector.register_all(custom);
    let snapshot = collector.snapshot();
    assert_eq!(snapshot.get("label"), Some(&json!("nightly")));
    assert_eq!(collector.counter("batches"), Some(0));

    // a counter increment replaces a non-counter metric of the same name
    collector.increment_counter("label", 1);
    assert_eq!(collector.counter("label"), Some(1));
}
