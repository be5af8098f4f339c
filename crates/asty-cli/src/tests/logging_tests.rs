//! Tests for log subscriber construction.

use rstest::rstest;

use crate::config::Config;
use crate::logging::{DEFAULT_LOG_FILTER, LogFormat, LoggingError, subscriber};
use crate::output::OutputFormat;

fn config(log_filter: &str, log_format: LogFormat) -> Config {
    Config {
        log_filter: log_filter.to_owned(),
        log_format,
        output: OutputFormat::Human,
        max_search_nodes: None,
    }
}

#[rstest]
#[case::json(LogFormat::Json)]
#[case::compact(LogFormat::Compact)]
fn both_formats_build_a_subscriber(#[case] format: LogFormat) {
    assert!(subscriber(&config(DEFAULT_LOG_FILTER, format)).is_ok());
    assert!(subscriber(&config("asty::matcher=trace,warn", format)).is_ok());
}

#[test]
fn invalid_filters_are_reported_with_their_text() {
    let Err(error) = subscriber(&config("asty=notalevel", LogFormat::Json)) else {
        panic!("filter should be rejected");
    };
    assert!(matches!(error, LoggingError::Filter { .. }));
    assert!(error.to_string().contains("\"asty=notalevel\""));
}

#[rstest]
#[case("json", LogFormat::Json)]
#[case("Compact", LogFormat::Compact)]
fn log_formats_parse_case_insensitively(#[case] text: &str, #[case] expected: LogFormat) {
    assert_eq!(text.parse::<LogFormat>().expect("format"), expected);
    assert_eq!(expected.to_string(), text.to_ascii_lowercase());
}
