//! Shell commands typed into a terminal.

use crate::config::SshConfig;
use crate::error::{EncodeError, GrammarError};
use crate::sequence::{KeySequence, text_to_sequence};

/// Commands that need no arguments: phrase and command line.
pub const SIMPLE_COMMANDS: [(&str, &str); 3] = [
    ("firefox", "firefox"),
    ("print working directory", "pwd"),
    ("password gorilla", "passwordgorilla"),
];

/// Spoken stand-in for the configured user name.
pub const SELF_PHRASE: &str = "me";

pub fn simple_command(phrase: &str) -> Option<&'static str> {
    SIMPLE_COMMANDS
        .iter()
        .find(|(p, _)| *p == phrase)
        .map(|(_, command)| *command)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SshOption {
    XForwarding,
}

impl SshOption {
    pub const ALL: [SshOption; 1] = [SshOption::XForwarding];

    pub fn phrase(&self) -> &'static str {
        match self {
            SshOption::XForwarding => "[with] X forwarding",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            SshOption::XForwarding => "-Y",
        }
    }

    pub fn from_flag(flag: &str) -> Option<SshOption> {
        Self::ALL.into_iter().find(|o| o.flag() == flag)
    }
}

/// `ssh [options] [user@]server [command]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshCommand {
    pub options: Vec<SshOption>,
    pub user: Option<String>,
    pub server: String,
    pub command: Option<String>,
}

impl SshCommand {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            options: Vec::new(),
            user: None,
            server: server.into(),
            command: None,
        }
    }

    /// Build from spoken names, resolving them through the configured aliases.
    pub fn from_spoken(
        config: &SshConfig,
        user: Option<&str>,
        server: &str,
    ) -> Result<Self, GrammarError> {
        let host = config
            .hosts
            .get(server)
            .cloned()
            .ok_or_else(|| GrammarError::UnknownValue {
                what: "server",
                value: server.to_string(),
            })?;
        let user = match user {
            None => None,
            Some(SELF_PHRASE) => Some(config.user.clone().ok_or(GrammarError::UnknownValue {
                what: "user",
                value: SELF_PHRASE.to_string(),
            })?),
            Some(other) => Some(other.to_string()),
        };
        Ok(Self {
            user,
            ..Self::new(host)
        })
    }

    pub fn command_line(&self) -> String {
        let mut parts = vec!["ssh".to_string()];
        parts.extend(self.options.iter().map(|o| o.flag().to_string()));
        parts.push(match &self.user {
            Some(user) => format!("{user}@{}", self.server),
            None => self.server.clone(),
        });
        parts.extend(self.command.clone());
        parts.join(" ")
    }

    pub fn keys(&self) -> Result<KeySequence, EncodeError> {
        text_to_sequence(&self.command_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SshConfig {
        SshConfig {
            user: Some("nihlaeth".into()),
            hosts: [("hera boot".to_string(), "heraboot".to_string())]
                .into_iter()
                .collect(),
        }
    }

    #[test]
    fn command_line_layout() {
        let mut ssh = SshCommand::from_spoken(&config(), Some("me"), "hera boot").unwrap();
        ssh.options.push(SshOption::XForwarding);
        ssh.command = simple_command("print working directory").map(str::to_string);
        assert_eq!(ssh.command_line(), "ssh -Y nihlaeth@heraboot pwd");
        assert_eq!(
            SshCommand::new("iris").keys().unwrap().to_string(),
            "s,s,h,space,i,r,i,s"
        );
    }

    #[test]
    fn unknown_server() {
        assert!(matches!(
            SshCommand::from_spoken(&config(), None, "atlantis"),
            Err(GrammarError::UnknownValue { what: "server", .. })
        ));
    }

    #[test]
    fn self_without_configured_user() {
        let mut cfg = config();
        cfg.user = None;
        assert!(matches!(
            SshCommand::from_spoken(&cfg, Some("me"), "hera boot"),
            Err(GrammarError::UnknownValue { what: "user", .. })
        ));
    }
}
