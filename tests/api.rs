use serde_json::json;
use stepcas::{Answer, Config, Question, answer};

fn ask(text: &str, config: &Config) -> Answer {
    answer(
        &Question {
            question: text.to_string(),
        },
        config,
    )
}

#[test]
fn solved_answer_serializes_flat() {
    let reply = ask("x + 1 = 3", &Config::default());
    let value = serde_json::to_value(&reply).expect("serialize answer");
    assert_eq!(value["solution"], json!("$x = 2$"));
    assert_eq!(value["steps"].as_array().map(Vec::len), Some(4));
    assert!(value.get("detail").is_none());
}

#[test]
fn question_deserializes_from_json() {
    let question: Question =
        serde_json::from_str(r#"{"question": "2 + 2"}"#).expect("deserialize question");
    assert_eq!(question.question, "2 + 2");
}

#[test]
fn long_questions_are_refused() {
    let config = Config {
        max_input_chars: 4,
        ..Config::default()
    };
    match ask("x + 1 = 3", &config) {
        Answer::Failed { detail } => assert!(detail.contains("limit is 4"), "{detail}"),
        other => panic!("unexpected answer {other:?}"),
    }
}

#[test]
fn solver_errors_are_still_solved_answers() {
    match ask("2 +* 3", &Config::default()) {
        Answer::Solved { solution, steps } => {
            assert!(solution.starts_with("Error:"));
            assert_eq!(steps.len(), 1);
        }
        other => panic!("unexpected answer {other:?}"),
    }
}

#[test]
fn config_defaults_and_overrides() {
    assert_eq!(Config::from_toml("").expect("empty config"), Config::default());

    let config = Config::from_toml("max_input_chars = 64\nlog_steps = true").expect("config");
    assert_eq!(config.max_input_chars, 64);
    assert!(config.log_steps);

    assert!(Config::from_toml("max_input = 64").is_err());
}
