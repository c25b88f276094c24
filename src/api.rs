//! Request and response shapes for callers that speak JSON.

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::steps::solve_with_steps;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub question: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Solved { solution: String, steps: Vec<String> },
    Failed { detail: String },
}

/// Answer one question. Anything that goes wrong outside the solver's own
/// error reporting comes back as [`Answer::Failed`].
pub fn answer(question: &Question, config: &Config) -> Answer {
    let text = question.question.as_str();
    let length = text.chars().count();
    if length > config.max_input_chars {
        return Answer::Failed {
            detail: format!(
                "question is {length} characters long, the limit is {}",
                config.max_input_chars
            ),
        };
    }

    match panic::catch_unwind(AssertUnwindSafe(|| solve_with_steps(text))) {
        Ok(solved) => {
            if config.log_steps {
                for step in solved.steps.entries() {
                    info!("{step}");
                }
            }
            Answer::Solved {
                solution: solved.solution,
                steps: solved.steps.joined().split('\n').map(str::to_string).collect(),
            }
        }
        Err(payload) => {
            let detail = panic_message(payload.as_ref());
            warn!(question = text, %detail, "solver panicked");
            Answer::Failed { detail }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "solver panicked".to_string()
    }
}
