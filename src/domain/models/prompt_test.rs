use super::format_prompt;
use super::PromptMessage;
use super::Role;

#[test]
fn it_formats_role_and_content_per_line() {
    let messages = vec![
        PromptMessage::system("You are a fitness expert."),
        PromptMessage::user("How much protein do I need?"),
    ];

    insta::assert_snapshot!(format_prompt(&messages), @r###"
    system: You are a fitness expert.
    user: How much protein do I need?
    "###);
}

#[test]
fn it_formats_empty_input_as_empty_string() {
    assert_eq!(format_prompt(&[]), "".to_string());
}

#[test]
fn it_keeps_multiline_content_intact() {
    let messages = vec![PromptMessage::new(Role::Model, "Line one\nLine two")];
    assert_eq!(format_prompt(&messages), "model: Line one\nLine two");
}

#[test]
fn it_formats_identically_when_repeated() {
    let messages = vec![
        PromptMessage::system("Coach"),
        PromptMessage::user("Plan my week"),
    ];

    let first = format_prompt(&messages);
    let second = format_prompt(&messages);
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn it_displays_roles_lowercase() {
    assert_eq!(Role::System.to_string(), "system");
    assert_eq!(Role::User.to_string(), "user");
    assert_eq!(Role::Model.to_string(), "model");
}
