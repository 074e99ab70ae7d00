//! Fixture level files and request bodies.

use serde_json::{json, Value};

/// One question entry in level file form.
pub fn question(level: &str, id: i64, answer: &str, question: &str, blanks: &[&str]) -> Value {
    json!({
        "id": id,
        "level": level,
        "question_text": question,
        "answer_text": answer,
        "blanks": blanks,
        "japanese": "",
        "pattern": "",
        "explanation": "",
    })
}

/// Build a level file document.
pub fn level_file(level: &str, title: &str, questions: Vec<Value>) -> String {
    json!({
        "level": level,
        "title": title,
        "total": questions.len(),
        "questions": questions,
    })
    .to_string()
}

/// Six questions, so the level spans two sets.
pub fn level1_json() -> String {
    level_file(
        "level1",
        "Beginner",
        vec![
            question("level1", 1, "I feel tired.", "I feel ______.", &["tired"]),
            question(
                "level1",
                2,
                "My son and his friend went to the park.",
                "My ______ and his ______ went to the park.",
                &["son", "friend"],
            ),
            question("level1", 3, "See you tomorrow.", "See you tomorrow.", &[]),
            question("level1", 4, "It is raining.", "It is ______.", &["raining"]),
            question("level1", 5, "I like cats.", "I like ______.", &["cats"]),
            question("level1", 6, "Where is the station?", "Where is the ______?", &["station"]),
        ],
    )
}

pub fn level2_json() -> String {
    level_file(
        "level2",
        "Intermediate",
        vec![question(
            "level2",
            1,
            "Could you open the window?",
            "______ you open the window?",
            &["Could"],
        )],
    )
}

/// Request body for POST /api/check.
pub fn check_request(user: &str, reference: &str, blanks: &[&str]) -> Value {
    json!({
        "user_answer": user,
        "reference_answer": reference,
        "blanks": blanks,
    })
}
