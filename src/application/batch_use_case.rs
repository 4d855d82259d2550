// ============================================================
// Layer 2 — Batch Use Case
// ============================================================
// Answers a list of questions one after another, each to
// completion before the next starts, and returns the
// (question, answer) pairs in input order.
//
// Questions file format: one question per line. Blank lines and
// lines starting with '#' are skipped.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::Path};

use crate::domain::traits::QuestionAnswerer;

/// One answered question, as printed or serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QaRecord {
    pub question: String,
    pub answer:   String,
}

pub struct BatchUseCase<'a> {
    answerer: &'a dyn QuestionAnswerer,
}

impl<'a> BatchUseCase<'a> {
    pub fn new(answerer: &'a dyn QuestionAnswerer) -> Self {
        Self { answerer }
    }

    pub fn run(&self, questions: &[String]) -> Vec<QaRecord> {
        tracing::info!("Answering {} questions", questions.len());
        questions
            .iter()
            .map(|q| QaRecord {
                question: q.clone(),
                answer:   self.answerer.answer(q),
            })
            .collect()
    }
}

/// Read questions from `path`, skipping blank and comment lines.
pub fn read_questions(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read questions from '{}'", path.display()))?;
    Ok(parse_questions(&text))
}

fn parse_questions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}
