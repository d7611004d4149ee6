use gk_core::errors::{ErrorInfo, GkError};
use gk_core::{precision_error, range_error};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("part", 27)
        .with_context("reason", "example")
}

#[test]
fn range_error_surface() {
    let err = GkError::Range(sample_info("unsupported-part-size", "part 27 beyond table"));
    assert_eq!(err.code(), "unsupported-part-size");
    assert_eq!(err.info().context.get("part").map(String::as_str), Some("27"));
    assert!(!err.is_precision());
}

#[test]
fn precision_error_surface() {
    let err = precision_error("denominator-straddles-zero", "ball contains zero");
    assert!(err.is_precision());
    assert_eq!(err.info().code, "denominator-straddles-zero");
}

#[test]
fn display_includes_context_and_hint() {
    let err = GkError::Config(
        ErrorInfo::new("dimension", "dimension must be positive")
            .with_context("dimension", 0)
            .with_hint("set `dimension` to at least 1"),
    );
    let text = err.to_string();
    assert!(text.starts_with("config error: dimension must be positive (code: dimension)"));
    assert!(text.contains("dimension=0"));
    assert!(text.contains("hint: set `dimension` to at least 1"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = range_error("insufficient-generators", "level exceeds generators");
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Range");
    assert_eq!(json["detail"]["code"], "insufficient-generators");
    let decoded: GkError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn helpers_chain_context_and_hint() {
    let err = range_error("first-generator-not-origin", "first generator is not zero")
        .with_context("first", "1.73")
        .with_hint("start the levels with an odd degree");
    assert!(matches!(err, GkError::Range(_)));
    assert_eq!(err.info().context.get("first").map(String::as_str), Some("1.73"));
    assert_eq!(err.info().hint.as_deref(), Some("start the levels with an odd degree"));

    let err = precision_error("precision-budget-exhausted", "budget spent").with_context("working_prec", 256);
    assert!(err.is_precision());
    assert_eq!(err.info().context.get("working_prec").map(String::as_str), Some("256"));
}
