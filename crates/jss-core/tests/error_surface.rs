use jss_core::errors::{ErrorInfo, JssError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("value", "8")
        .with_context("reason", "example")
}

#[test]
fn backend_unavailable_surface() {
    let err = JssError::BackendUnavailable(sample_info("B001", "solver offline"));
    assert_eq!(err.info().code, "B001");
    assert_eq!(err.family(), "backend-unavailable");
    assert!(err.info().context.contains_key("value"));
}

#[test]
fn embedding_surface() {
    let err = JssError::Embedding(sample_info("E001", "no embedding found"));
    assert_eq!(err.info().code, "E001");
    assert_eq!(err.family(), "embedding");
}

#[test]
fn malformed_model_surface() {
    let err = JssError::MalformedModel(sample_info("M001", "horizon too short"));
    assert_eq!(err.info().code, "M001");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = JssError::Decode(sample_info("D001", "bad label").with_hint("check the model"));
    let rendered = err.to_string();
    assert_eq!(
        rendered,
        "decode error: [D001] bad label {reason=example, value=8} (hint: check the model)"
    );
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = JssError::Config(sample_info("C001", "no jobs"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], err.family());
    assert_eq!(json["detail"]["code"], "C001");
    let back: JssError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, err);
}

#[test]
fn context_attaches_to_any_family() {
    let err = JssError::Embedding(ErrorInfo::new("E002", "chain break")).with_context("trial", "3");
    assert_eq!(err.family(), "embedding");
    assert_eq!(err.info().context.get("trial").map(String::as_str), Some("3"));
}
