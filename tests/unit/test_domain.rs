use promptly_api::{
    application::prompts::use_case::search_terms,
    domain::{
        report::entity::{ReportTarget, TargetType},
        user::value_objects::{EmailAddress, Password, Username},
        prompt::value_objects::{DEFAULT_OUTPUT_SEPARATOR, PromptOutput, parse_tags},
    },
};
use uuid::Uuid;

#[test]
fn username_enforces_length_and_charset() {
    assert!(Username::new("ada_lovelace".to_string()).is_ok());
    assert!(Username::new("ab".to_string()).is_err());
    assert!(Username::new("a".repeat(31)).is_err());
    assert!(Username::new("has space".to_string()).is_err());
    assert_eq!(Username::new("  ada  ".to_string()).unwrap().value, "ada");
}

#[test]
fn email_is_normalized_before_validation() {
    let email = EmailAddress::new("  Ada@Example.COM ".to_string()).unwrap();
    assert_eq!(email.value, "ada@example.com");
    assert!(EmailAddress::new("not-an-email".to_string()).is_err());
}

#[test]
fn password_has_minimum_length() {
    assert!(Password::new("12345".to_string()).is_err());
    assert!(Password::new("123456".to_string()).is_ok());
}

#[test]
fn legacy_output_with_image_is_split() {
    let raw = format!("A cat in a hat {} https://img.example/cat.png", DEFAULT_OUTPUT_SEPARATOR);
    let output = PromptOutput::decode_legacy(&raw, DEFAULT_OUTPUT_SEPARATOR);
    assert_eq!(output.text, "A cat in a hat");
    assert_eq!(output.image_url.as_deref(), Some("https://img.example/cat.png"));
    assert_eq!(output.encode_legacy(DEFAULT_OUTPUT_SEPARATOR), raw);
}

#[test]
fn legacy_output_without_separator_is_plain_text() {
    let output = PromptOutput::decode_legacy("just text", DEFAULT_OUTPUT_SEPARATOR);
    assert_eq!(output, PromptOutput::new("just text", None));
    assert_eq!(output.encode_legacy(DEFAULT_OUTPUT_SEPARATOR), "just text");
}

#[test]
fn tags_are_trimmed_and_empties_dropped() {
    assert_eq!(parse_tags(" art, ,photo ,"), vec!["art", "photo"]);
    assert!(parse_tags("").is_empty());
}

#[test]
fn search_terms_drop_stop_words_and_short_words() {
    assert_eq!(
        search_terms("The Art of a SUNSET in Paris art"),
        vec!["art", "sunset", "paris"]
    );
    assert!(search_terms("is in on a to").is_empty());
}

#[test]
fn target_type_parses_known_kinds_only() {
    assert_eq!("prompt".parse::<TargetType>().unwrap(), TargetType::Prompt);
    assert_eq!("comment".parse::<TargetType>().unwrap(), TargetType::Comment);
    assert!("user".parse::<TargetType>().is_err());
}

#[test]
fn report_target_serializes_as_tagged_pair() {
    let id = Uuid::now_v7();
    let target = ReportTarget::new(TargetType::Comment, id);
    assert_eq!(target.id(), id);
    assert_eq!(target.target_type(), TargetType::Comment);
    assert_eq!(
        serde_json::to_value(target).unwrap(),
        serde_json::json!({ "target_type": "comment", "target_id": id })
    );
}
