//! Integration tests for the batch redaction engine

use piiredact::config::{RedactionConfig, RedactionFormat};
use piiredact::domain::Record;
use piiredact::redaction::{Engine, PatternDefinition, PatternEntry, PatternRegistry};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

/// Transcription-like texts with a mix of PII types
const SAMPLE_TEXTS: [&str; 8] = [
    "My SSN is 123-45-6789",
    "my card is 4111 1111 1111 1111",
    "Call me at 555-123-4567",
    "you can email me at jane.doe@example.com",
    "the routing number is 021000021",
    "I was born on March 3rd, 1990",
    "nothing sensitive in this one",
    "connect from 192.168.1.10 with passport C12345678",
];

fn sample_batch(size: usize) -> Vec<Record> {
    (0..size)
        .map(|i| {
            Record::new(
                format!("chunk-{i:04}"),
                if i % 2 == 0 { "A" } else { "B" },
                SAMPLE_TEXTS[i % SAMPLE_TEXTS.len()],
            )
        })
        .collect()
}

fn engine_with_concurrency(max_concurrency: i64) -> Engine {
    let config = RedactionConfig {
        max_concurrency,
        ..RedactionConfig::default()
    };
    Engine::new(config).expect("default engine")
}

#[tokio::test]
async fn test_end_to_end_examples() {
    let engine = engine_with_concurrency(8);
    let output = engine.process(sample_batch(8)).await.unwrap();

    let texts: Vec<&str> = output.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(
        texts,
        [
            "My SSN is [SSN]",
            "my card is [CC]",
            "Call me at [PHONE]",
            "you can email me at [EMAIL]",
            "the routing number is [ROUTING]",
            "I was born on [DOB]",
            "nothing sensitive in this one",
            "connect from [IP] with passport [PASSPORT]",
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_does_not_change_output() {
    let input = sample_batch(1000);

    let sequential = engine_with_concurrency(1)
        .process(input.clone())
        .await
        .unwrap();
    let concurrent = engine_with_concurrency(8)
        .process(input.clone())
        .await
        .unwrap();

    assert_eq!(sequential.len(), 1000);
    assert_eq!(sequential, concurrent);

    for (i, (before, after)) in input.iter().zip(&concurrent).enumerate() {
        assert_eq!(before.id, after.id, "position {i}");
        assert_eq!(before.label, after.label, "position {i}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_non_positive_concurrency_falls_back() {
    let engine = engine_with_concurrency(0);
    let output = engine.process(sample_batch(16)).await.unwrap();
    assert_eq!(output.len(), 16);
    assert_eq!(output[0].text, "My SSN is [SSN]");
    assert_eq!(engine.snapshot().processed_records, 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_metrics_across_batches() {
    let engine = engine_with_concurrency(4);

    engine.process(sample_batch(8)).await.unwrap();
    engine.process(sample_batch(8)).await.unwrap();

    let metrics = engine.snapshot();
    assert_eq!(metrics.processed_records, 16);
    assert_eq!(metrics.redactions_for("SSN"), 2);
    assert_eq!(metrics.redactions_for("CC"), 2);
    assert_eq!(metrics.redactions_for("PHONE"), 2);
    assert_eq!(metrics.redactions_for("EMAIL"), 2);
    assert_eq!(metrics.redactions_for("ROUTING"), 2);
    assert_eq!(metrics.redactions_for("DOB"), 2);
    assert_eq!(metrics.redactions_for("IP"), 2);
    assert_eq!(metrics.redactions_for("PASSPORT"), 2);
    assert_eq!(metrics.redactions_for("DL"), 0);
    assert_eq!(metrics.total_redactions(), 16);
    assert!(metrics.processing_time_ns > 0);

    engine.reset();
    let metrics = engine.snapshot();
    assert_eq!(metrics.processed_records, 0);
    assert_eq!(metrics.total_redactions(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_engine_concurrent_callers() {
    let engine = Arc::new(engine_with_concurrency(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.process(sample_batch(100)).await })
        })
        .collect();

    for handle in handles {
        let output = handle.await.unwrap().unwrap();
        assert_eq!(output.len(), 100);
    }

    let metrics = engine.snapshot();
    assert_eq!(metrics.processed_records, 400);
    // 100 records cycle through 8 texts: texts 0-3 appear 13 times, 4-7 appear 12
    assert_eq!(metrics.redactions_for("SSN"), 4 * 13);
}

#[tokio::test]
async fn test_enabling_subset_leaves_other_pii() {
    let builtin = PatternRegistry::builtin().unwrap();
    let config = RedactionConfig::only(builtin.names(), &["SSN"]);
    let engine = Engine::new(config).unwrap();

    let output = engine
        .process(vec![
            Record::new("1", "A", "SSN 123-45-6789 card 4111 1111 1111 1111"),
            Record::new("2", "A", "mail jane.doe@example.com"),
        ])
        .await
        .unwrap();

    assert_eq!(output[0].text, "SSN [SSN] card 4111 1111 1111 1111");
    assert_eq!(output[1].text, "mail jane.doe@example.com");
    assert_eq!(engine.pattern_names(), ["SSN"]);
}

#[tokio::test]
async fn test_disabled_cc_is_never_redacted() {
    let config = RedactionConfig {
        enabled_patterns: HashMap::from([("CC".to_string(), false)]),
        ..RedactionConfig::default()
    };
    let engine = Engine::new(config).unwrap();

    let output = engine
        .process(vec![Record::new("1", "A", "card 4111 1111 1111 1111")])
        .await
        .unwrap();

    assert_eq!(output[0].text, "card 4111 1111 1111 1111");
    assert_eq!(engine.snapshot().redactions_for("CC"), 0);
}

#[tokio::test]
async fn test_card_next_to_other_numbers_is_redacted() {
    let engine = engine_with_concurrency(8);

    let output = engine
        .process(vec![
            Record::new("a", "", "card 4111111111111111 555-123-4567"),
            Record::new("b", "", "item 7 card 5500-0000-0000-0004 ok"),
        ])
        .await
        .unwrap();

    assert_eq!(output[0].text, "card [CC] [PHONE]");
    assert_eq!(output[1].text, "item 7 card [CC] ok");
    assert_eq!(engine.snapshot().redactions_for("CC"), 2);
}

#[tokio::test]
async fn test_custom_pattern_with_custom_format() {
    let config = RedactionConfig {
        redaction_format: RedactionFormat::new("***%s***"),
        custom_patterns: vec![PatternEntry {
            name: "EMPLOYEE_ID".to_string(),
            regex: r"\bEMP-\d{6}\b".to_string(),
            validator: None,
            description: Some("Internal employee id".to_string()),
        }],
        ..RedactionConfig::default()
    };
    let engine = Engine::new(config).unwrap();

    let output = engine
        .process(vec![Record::new("1", "A", "I am EMP-004211, SSN 123-45-6789")])
        .await
        .unwrap();

    assert_eq!(output[0].text, "I am ***EMPLOYEE_ID***, SSN ***SSN***");
    assert_eq!(engine.snapshot().redactions_for("EMPLOYEE_ID"), 1);
}

#[tokio::test]
async fn test_pattern_library_file() {
    let mut library = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        library,
        r#"
[[patterns]]
name = "MRN"
regex = '\bMRN-\d{{8}}\b'

[[patterns]]
name = "ACCOUNT_CARD"
regex = '\bACCT:\d{{16}}\b'
validator = "luhn"
"#
    )
    .unwrap();
    library.flush().unwrap();

    let config = RedactionConfig {
        pattern_library: Some(library.path().to_path_buf()),
        ..RedactionConfig::default()
    };
    config.validate().unwrap();
    let engine = Engine::new(config).unwrap();

    let names = engine.pattern_names();
    assert_eq!(&names[names.len() - 2..], ["MRN", "ACCOUNT_CARD"]);

    let output = engine
        .process(vec![Record::new("1", "A", "chart MRN-12345678")])
        .await
        .unwrap();
    assert_eq!(output[0].text, "chart [MRN]");
}

#[tokio::test]
async fn test_extra_compiled_patterns_run_last() {
    let extra = vec![PatternDefinition::compile("TICKET", r"\bTCK-\d+\b").unwrap()];
    let engine = Engine::with_custom_patterns(RedactionConfig::default(), extra).unwrap();

    assert_eq!(engine.pattern_names().last(), Some(&"TICKET"));

    let output = engine
        .process(vec![Record::new("1", "A", "see TCK-42 about 555-123-4567")])
        .await
        .unwrap();
    assert_eq!(output[0].text, "see [TICKET] about [PHONE]");
}

#[tokio::test]
async fn test_invalid_custom_regex_fails_build() {
    let config = RedactionConfig {
        custom_patterns: vec![PatternEntry {
            name: "BROKEN".to_string(),
            regex: r"(\d+".to_string(),
            validator: None,
            description: None,
        }],
        ..RedactionConfig::default()
    };

    let err = Engine::new(config).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("BROKEN"));
}

#[tokio::test]
async fn test_redacted_output_is_stable() {
    let engine = engine_with_concurrency(8);
    let once = engine.process(sample_batch(64)).await.unwrap();
    let twice = engine.process(once.clone()).await.unwrap();
    assert_eq!(once, twice);
}
