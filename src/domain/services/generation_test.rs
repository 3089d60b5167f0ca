use super::GenerationClient;
use super::FALLBACK_RESPONSE;
use crate::domain::models::PromptMessage;
use crate::infrastructure::backends::scripted::Reply;
use crate::infrastructure::backends::scripted::ScriptedBackend;
use crate::infrastructure::backends::scripted::DEFAULT_REPLY;

fn messages() -> Vec<PromptMessage> {
    return vec![
        PromptMessage::system("You are a fitness expert."),
        PromptMessage::user("Best post-workout meal?"),
    ];
}

#[tokio::test]
async fn it_concatenates_streamed_fragments() {
    let (backend, _prompts) = ScriptedBackend::new(vec![Reply::Fragments(vec![
        "Eat ",
        "protein ",
        "and carbs.",
    ])]);
    let client = GenerationClient::new(Box::new(backend));

    let res = client.generate(&messages()).await;
    assert_eq!(res.text, "Eat protein and carbs.");
    assert_eq!(res.error, None);
    assert!(!res.is_error());
}

#[tokio::test]
async fn it_sends_formatted_prompt() {
    let (backend, prompts) = ScriptedBackend::new(vec![]);
    let client = GenerationClient::new(Box::new(backend));

    client.generate(&messages()).await;

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    insta::assert_snapshot!(prompts[0], @r###"
    system: You are a fitness expert.
    user: Best post-workout meal?
    "###);
}

#[tokio::test]
async fn it_returns_empty_text_for_empty_stream() {
    let (backend, _prompts) = ScriptedBackend::new(vec![Reply::Fragments(vec![])]);
    let client = GenerationClient::new(Box::new(backend));

    let res = client.generate(&messages()).await;
    assert_eq!(res.text, "");
    assert!(!res.is_error());
}

#[tokio::test]
async fn it_falls_back_on_backend_failure() {
    let (backend, _prompts) = ScriptedBackend::new(vec![Reply::Failure("quota exceeded")]);
    let client = GenerationClient::new(Box::new(backend));

    let res = client.generate(&messages()).await;
    assert_eq!(res.text, FALLBACK_RESPONSE);
    assert_eq!(res.text, "I encountered an error. Please try again.");
    assert_eq!(res.error, Some("quota exceeded".to_string()));
    assert!(res.is_error());
}

#[tokio::test]
async fn it_stays_usable_after_failure() {
    let (backend, prompts) = ScriptedBackend::new(vec![
        Reply::Failure("connection reset"),
        Reply::Fragments(vec!["Back ", "online."]),
    ]);
    let client = GenerationClient::new(Box::new(backend));

    let first = client.generate(&messages()).await;
    let second = client.generate(&messages()).await;
    let third = client.generate(&messages()).await;

    assert!(first.is_error());
    assert_eq!(second.text, "Back online.");
    assert!(!second.is_error());
    assert_eq!(third.text, DEFAULT_REPLY);
    assert_eq!(prompts.lock().unwrap().len(), 3);
}
