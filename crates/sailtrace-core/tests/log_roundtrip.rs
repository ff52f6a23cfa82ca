use pretty_assertions::assert_eq;
use sailtrace_core::error::TelemetryError;
use sailtrace_core::log::RawLog;
use sailtrace_core::record::FieldValue;

#[test]
fn test_load_dump_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("2011-03-14@10h32.log");
    std::fs::write(
        &source,
        "0,X18.0712,Y59.3215,R45,D1.5\n\
         1500,X18.0720,Y59.3221,R47,D1.5\n\
         3000,X18.0731,Y59.3230,R50,D1.4\n",
    )
    .unwrap();

    let log = RawLog::open(&source).unwrap();
    assert_eq!(log.len(), 3);

    let dumped = dir.path().join("2011-03-14@10h32-dump.log");
    log.dump_to_path(&dumped).unwrap();
    let reloaded = RawLog::open(&dumped).unwrap();

    assert_eq!(reloaded.len(), log.len());
    assert_eq!(reloaded.log_start_time(), log.log_start_time());
    for (a, b) in log.records().iter().zip(reloaded.records()) {
        assert_eq!(a.position(), b.position());
        assert_eq!(a.timestamp(), b.timestamp());
        assert_eq!(a.fields(), b.fields());
    }
}

#[test]
fn test_round_trip_reinfers_whole_valued_reals() {
    // 18.0 prints without a decimal point and comes back as an
    // integer; this is the documented lossy edge of the contract.
    let log = RawLog::from_lines("2011-03-14@10h32", ["0,X18.0,Y59.5"]).unwrap();
    let mut out = Vec::new();
    log.dump(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "0,X18,Y59.5\n");

    let reloaded = RawLog::from_lines("2011-03-14@10h32", [text.trim()]).unwrap();
    assert_eq!(
        reloaded.records()[0].field('X'),
        Some(&FieldValue::Integer(18))
    );
    // The position itself is unaffected.
    assert_eq!(reloaded.records()[0].position(), log.records()[0].position());
}

#[test]
fn test_source_without_start_time_constructs_no_log() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("undated.log");
    std::fs::write(&source, "0,X18.07,Y59.32\n").unwrap();

    let err = RawLog::open(&source).unwrap_err();
    assert!(matches!(err, TelemetryError::SourceNaming(_)));
}

#[test]
fn test_missing_file_reports_the_path() {
    let err = RawLog::open("/nonexistent/2011-03-14@10h32.log").unwrap_err();
    match err {
        TelemetryError::Io { path, .. } => {
            assert!(path.to_string_lossy().contains("nonexistent"));
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_dump_offsets_are_relative_to_start_time() {
    let log = RawLog::from_lines(
        "2011-03-14@10h32",
        ["500,X18.07,Y59.32", "2500,X18.08,Y59.33"],
    )
    .unwrap();
    let mut out = Vec::new();
    log.dump(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let offsets: Vec<&str> = text
        .lines()
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(offsets, vec!["500", "2500"]);
}
