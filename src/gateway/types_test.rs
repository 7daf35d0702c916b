use super::*;

// =============================================================================
// GatewayError
// =============================================================================

#[test]
fn error_codes_are_stable() {
    assert_eq!(GatewayError::MissingApiKey { var: "KEY".into() }.code(), "E_MISSING_API_KEY");
    assert_eq!(GatewayError::ApiParse("json".into()).code(), "E_API_PARSE");
    assert_eq!(GatewayError::NotInlineImage.code(), "E_NOT_INLINE_IMAGE");
}

#[test]
fn retryable_on_transport_and_server_errors() {
    assert!(GatewayError::ApiRequest("timeout".into()).retryable());
    assert!(GatewayError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(GatewayError::ApiResponse { status: 503, body: String::new() }.retryable());
    assert!(!GatewayError::ApiResponse { status: 400, body: String::new() }.retryable());
    assert!(!GatewayError::ApiParse("bad".into()).retryable());
}

// =============================================================================
// AspectRatio
// =============================================================================

#[test]
fn aspect_ratio_defaults_to_square() {
    assert_eq!(AspectRatio::default(), AspectRatio::Square);
    assert_eq!(AspectRatio::default().to_string(), "1:1");
}

#[test]
fn aspect_ratio_parses_wire_form() {
    assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::Wide);
    assert_eq!(" 3:4 ".parse::<AspectRatio>().unwrap(), AspectRatio::Portrait);
    assert!("2:1".parse::<AspectRatio>().is_err());
}

// =============================================================================
// Data URLs
// =============================================================================

#[test]
fn data_url_defaults_to_png() {
    assert_eq!(to_data_url(None, "AAAA"), "data:image/png;base64,AAAA");
    assert_eq!(to_data_url(Some(""), "AAAA"), "data:image/png;base64,AAAA");
    assert_eq!(to_data_url(Some("image/webp"), "AAAA"), "data:image/webp;base64,AAAA");
}

#[test]
fn split_data_url_extracts_parts() {
    assert_eq!(split_data_url("data:image/jpeg;base64,QUJD"), Some(("image/jpeg", "QUJD")));
    assert_eq!(split_data_url("data:;base64,QUJD"), Some(("image/png", "QUJD")));
}

#[test]
fn split_data_url_rejects_other_urls() {
    assert!(split_data_url("https://example.test/cat.png").is_none());
    assert!(split_data_url("data:text/plain,hello").is_none());
    assert!(split_data_url("").is_none());
}

#[test]
fn full_prompt_puts_style_first() {
    assert_eq!(full_prompt("noir", "a detective"), "noir a detective");
    assert_eq!(full_prompt("", "a detective"), " a detective");
}
