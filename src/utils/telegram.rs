use anyhow::{Context, Result};
use log::info;
use teloxide::prelude::{ChatId, Requester};
use teloxide::Bot;

use crate::config::NotifierConfig;
use crate::models::GradeDiff;

// Constructs a message string from a slice of GradeDiff, listing new or updated grades.
pub fn parse_new_grades_message(diffs: &[GradeDiff]) -> String {
    let mut message = String::from("📚 New grades on Quest! 📚\n\n");
    for diff in diffs {
        message.push_str(&format!(
            "📖 {} - {} ({}): {}\n",
            diff.course, diff.description, diff.term, diff.grade
        ));
    }
    message
}

// Sends the message to the configured chat.
pub async fn send(config: &NotifierConfig, message: &str) -> Result<()> {
    let bot = Bot::new(&config.bot_token);
    let sent = bot
        .send_message(ChatId(config.chat_id), message)
        .await
        .context("sending Telegram message")?;
    info!("Text message sent successfully {:?}", sent.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_lists_each_grade() {
        let diffs = [
            GradeDiff {
                term: "Fall 2018".into(),
                course: "CS 135".into(),
                description: "Designing Functional Programs".into(),
                grade: "92".into(),
            },
            GradeDiff {
                term: "Fall 2018".into(),
                course: "MATH 135".into(),
                description: "Algebra for Honours Mathematics".into(),
                grade: "85".into(),
            },
        ];
        let message = parse_new_grades_message(&diffs);
        assert!(message.contains("📖 CS 135 - Designing Functional Programs (Fall 2018): 92\n"));
        assert!(message.contains("📖 MATH 135 - Algebra for Honours Mathematics (Fall 2018): 85\n"));
    }
}
