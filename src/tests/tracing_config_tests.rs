use super::LogFormat;

#[test]
fn parses_known_formats_case_insensitively() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::parse(" Text "), LogFormat::Text);
}

#[test]
fn unknown_format_falls_back_to_text() {
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
    assert_eq!(LogFormat::default(), LogFormat::Text);
}
