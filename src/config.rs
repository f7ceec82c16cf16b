// Settings for the grade checker, read from the environment (and `.env`).

use std::env;
use std::fmt;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use simplelog::LevelFilter;

pub const USER_VAR: &str = "QUEST_USER";
pub const PASS_VAR: &str = "QUEST_PASS";
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "CHAT_ID";
pub const GRADES_FILE_VAR: &str = "GRADES_FILE";
pub const LOG_VAR: &str = "QUEST_LOG";

pub const DEFAULT_GRADES_FILE: &str = "grades.json";

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.is_empty())
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prompt {
    Username(&'static str),
    Password(&'static str),
}

// WatIAM credentials used to log into Quest.
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    // Reads QUEST_USER / QUEST_PASS, prompting for whichever is missing. The
    // password prompt does not echo.
    pub fn from_env() -> Result<Self> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        Self::resolve(env_lookup, |prompt_kind| match prompt_kind {
            Prompt::Username(label) => prompt(&mut input, label),
            Prompt::Password(label) => Ok(rpassword::prompt_password(label)?),
        })
    }

    fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        mut ask: impl FnMut(Prompt) -> Result<String>,
    ) -> Result<Self> {
        let user = match non_empty(&lookup, USER_VAR) {
            Some(user) => user,
            None => ask(Prompt::Username("Enter your Quest ID: ")).context("reading username")?,
        };
        let pass = match non_empty(&lookup, PASS_VAR) {
            Some(pass) => pass,
            None => ask(Prompt::Password("Enter your Quest password: ")).context("reading password")?,
        };
        Ok(Self { user, pass })
    }
}

fn prompt(input: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

// Telegram destination for new-grade notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifierConfig {
    pub bot_token: String,
    pub chat_id: i64,
}

impl NotifierConfig {
    // `None` unless both `BOT_TOKEN` and `CHAT_ID` are set.
    pub fn from_env() -> Result<Option<Self>> {
        Self::resolve(env_lookup)
    }

    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>> {
        let (Some(bot_token), Some(chat_id)) = (
            non_empty(&lookup, BOT_TOKEN_VAR),
            non_empty(&lookup, CHAT_ID_VAR),
        ) else {
            return Ok(None);
        };
        let chat_id = chat_id
            .parse()
            .with_context(|| format!("{CHAT_ID_VAR} must be an integer, got {chat_id:?}"))?;
        Ok(Some(Self { bot_token, chat_id }))
    }
}

pub fn grades_file() -> String {
    non_empty(&env_lookup, GRADES_FILE_VAR).unwrap_or_else(|| DEFAULT_GRADES_FILE.to_string())
}

// Log level from `QUEST_LOG`, defaulting to info.
pub fn log_level() -> LevelFilter {
    non_empty(&env_lookup, LOG_VAR)
        .and_then(|v| v.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_credentials_from_vars() {
        let creds = Credentials::resolve(vars(&[(USER_VAR, "j2doe"), (PASS_VAR, "hunter2")]), |_| {
            panic!("should not prompt")
        })
        .unwrap();
        assert_eq!(creds.user, "j2doe");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn test_credentials_prompt_for_missing() {
        let mut asked = Vec::new();
        let creds = Credentials::resolve(vars(&[(USER_VAR, "j2doe"), (PASS_VAR, "")]), |p| {
            asked.push(p);
            Ok("typed".to_string())
        })
        .unwrap();
        assert_eq!(creds.pass, "typed");
        assert_eq!(asked, [Prompt::Password("Enter your Quest password: ")]);
    }

    #[test]
    fn test_password_is_asked_without_echo() {
        let mut asked = Vec::new();
        Credentials::resolve(vars(&[]), |p| {
            asked.push(p);
            Ok("typed".to_string())
        })
        .unwrap();
        // Only the username prompt may be read as a plain echoed line.
        assert_eq!(
            asked,
            [
                Prompt::Username("Enter your Quest ID: "),
                Prompt::Password("Enter your Quest password: "),
            ]
        );
    }

    #[test]
    fn test_prompt_strips_newline() {
        let mut input = io::Cursor::new("j2doe\r\nrest");
        assert_eq!(prompt(&mut input, "").unwrap(), "j2doe");
    }

    #[test]
    fn test_notifier_requires_both_vars() {
        assert_eq!(NotifierConfig::resolve(vars(&[(BOT_TOKEN_VAR, "t")])).unwrap(), None);

        let cfg = NotifierConfig::resolve(vars(&[(BOT_TOKEN_VAR, "t"), (CHAT_ID_VAR, "-42")]))
            .unwrap()
            .unwrap();
        assert_eq!(cfg.chat_id, -42);

        assert!(NotifierConfig::resolve(vars(&[(BOT_TOKEN_VAR, "t"), (CHAT_ID_VAR, "x")])).is_err());
    }
}
