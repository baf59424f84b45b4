//! `value(node)` for every rule: what the host types once an utterance is
//! recognized.

use tracing::warn;

use crate::charmap;
use crate::composer::{CommandSpec, NormalCommand, compose_repeated};
use crate::config::SshConfig;
use crate::error::GrammarError;
use crate::key::KeyCode;
use crate::sequence::{KeySequence, text_to_sequence};
use crate::types::{Digit, Motion, NormalAction, Operator, Register, TextObject, VisualKind};
use crate::vault::Vault;

use super::keyboard;
use super::locale::Locale;
use super::node::{ParseNode, RuleKind};
use super::shell::{SshCommand, SshOption, simple_command};
use super::window::{self, Direction};

fn required<'a>(node: &'a ParseNode, name: &'static str) -> Result<&'a ParseNode, GrammarError> {
    node.child(name).ok_or(GrammarError::MissingChild(name))
}

fn value_of<'a>(node: &'a ParseNode, name: &'static str) -> Result<&'a str, GrammarError> {
    required(node, name)?
        .value()
        .ok_or(GrammarError::MissingChild(name))
}

fn expect_kind(node: &ParseNode, kind: RuleKind) -> Result<(), GrammarError> {
    if node.kind() == Some(kind) {
        Ok(())
    } else {
        Err(GrammarError::UnexpectedNode(format!(
            "expected {kind:?} rule, got {node:?}"
        )))
    }
}

fn mapped_value(node: &ParseNode) -> Result<&str, GrammarError> {
    node.value()
        .ok_or_else(|| GrammarError::UnexpectedNode(format!("rule without value: {node:?}")))
}

fn digits(value: &str) -> Result<Vec<Digit>, GrammarError> {
    value
        .chars()
        .map(|c| {
            c.to_digit(10)
                .ok_or_else(|| GrammarError::UnknownValue {
                    what: "number",
                    value: value.to_string(),
                })
                .and_then(|d| Ok(Digit::try_from(d)?))
        })
        .collect()
}

fn register(value: &str) -> Result<Register, GrammarError> {
    let mut chars = value.chars();
    let name = match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => charmap::decode_token(value),
    };
    let name = name.ok_or_else(|| GrammarError::UnknownValue {
        what: "register",
        value: value.to_string(),
    })?;
    Ok(Register::new(name)?)
}

/// Keys typing the dictated `<text>`.
pub fn dictation(node: &ParseNode) -> Result<KeySequence, GrammarError> {
    let text = required(node, "text")?
        .text()
        .ok_or(GrammarError::MissingChild("text"))?;
    Ok(text_to_sequence(&text)?)
}

/// `[<n>] backspace[s]` and friends: a keyboard mapping rule whose value is
/// the key name, with an optional `<n>` count.
pub fn basic_key(node: &ParseNode) -> Result<KeySequence, GrammarError> {
    expect_kind(node, RuleKind::Keyboard)?;
    let name = mapped_value(node)?;
    let code = KeyCode::from_name(name).ok_or_else(|| GrammarError::UnknownValue {
        what: "key",
        value: name.to_string(),
    })?;
    let count = match node.child("n") {
        Some(ParseNode::Integer { value, .. }) => u32::try_from(*value)
            .ok()
            .filter(|n| (1..=keyboard::MAX_COUNT).contains(n))
            .ok_or(GrammarError::OutOfRange {
                what: "count",
                value: *value,
            })?,
        _ => 1,
    };
    if count > 1 && !keyboard::is_countable(code) {
        return Err(GrammarError::UnknownValue {
            what: "countable key",
            value: name.to_string(),
        });
    }
    Ok(keyboard::press(code, count))
}

/// `<operator> (<line>|to (<motion>|<operatormotion>) [<numbers>]
/// [into buffer <buffer>] [<mode> mode])`
pub fn command_spec(node: &ParseNode) -> Result<CommandSpec, GrammarError> {
    expect_kind(node, RuleKind::MotionOperator)?;
    let mut spec = CommandSpec::new(Operator::from_token(value_of(node, "operator")?)?);

    if let Some(buffer) = node.child("buffer") {
        spec = spec.register(register(mapped_value(buffer)?)?);
    }
    if node.has_child("line") {
        spec = spec.line();
    }
    if let Some(mode) = node.child("mode") {
        spec = spec.mode(VisualKind::from_token(mapped_value(mode)?)?);
    }
    for number in node.extract(RuleKind::Number) {
        spec.count.extend(digits(mapped_value(number)?)?);
    }
    let motions = node.extract(RuleKind::Motion);
    let objects = node.extract(RuleKind::TextObject);
    match (motions.as_slice(), objects.as_slice()) {
        ([], []) => {}
        ([motion], []) => spec = spec.motion(Motion::from_token(mapped_value(motion)?)?),
        ([], [object]) => {
            spec = spec.text_object(TextObject::from_token(mapped_value(object)?)?)
        }
        _ => {
            return Err(GrammarError::UnexpectedNode(format!(
                "expected one motion or text object, got {} motions and {} text objects",
                motions.len(),
                objects.len()
            )));
        }
    }
    Ok(spec)
}

/// One alternative of a normal-mode utterance.
pub fn normal_command(node: &ParseNode) -> Result<NormalCommand, GrammarError> {
    let inner = match node.kind() {
        Some(RuleKind::TrueVimNormal) => node.first_rule().ok_or_else(|| {
            GrammarError::UnexpectedNode("normal-mode rule without a command".to_string())
        })?,
        _ => node,
    };
    match inner.kind() {
        Some(RuleKind::MotionOperator) => Ok(NormalCommand::Operator(command_spec(inner)?)),
        Some(RuleKind::Motion) => Ok(NormalCommand::Motion(Motion::from_token(mapped_value(
            inner,
        )?)?)),
        Some(RuleKind::VimNormal) => Ok(NormalCommand::Normal(NormalAction::from_token(
            mapped_value(inner)?,
        )?)),
        Some(RuleKind::Number) => match digits(mapped_value(inner)?)?.as_slice() {
            [digit] => Ok(NormalCommand::Count(*digit)),
            _ => Err(GrammarError::UnknownValue {
                what: "count digit",
                value: mapped_value(inner)?.to_string(),
            }),
        },
        _ => Err(GrammarError::UnexpectedNode(format!("{inner:?}"))),
    }
}

/// Several normal-mode commands in one utterance.
pub fn normal_repetition(node: &ParseNode, max: usize) -> Result<KeySequence, GrammarError> {
    let commands = node
        .extract(RuleKind::TrueVimNormal)
        .into_iter()
        .map(normal_command)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(compose_repeated(&commands, max)?)
}

/// Recognizers hand dictation over with arbitrary case and padding; secrets
/// are sealed under the lowercase spoken form.
pub fn normalize_passphrase(spoken: &str) -> String {
    spoken.trim().to_lowercase()
}

/// `password <name> <passphrase>`
pub fn password(node: &ParseNode, vault: &Vault, locale: Locale) -> Result<KeySequence, GrammarError> {
    let name = required(node, "name")?;
    let name = name
        .value()
        .map(str::to_string)
        .or_else(|| name.text())
        .ok_or(GrammarError::MissingChild("name"))?;
    let passphrase = required(node, "passphrase")?
        .text()
        .ok_or(GrammarError::MissingChild("passphrase"))?;
    Ok(vault.retrieve(locale.code(), &name, &normalize_passphrase(&passphrase))?)
}

/// `workspace <n>` and `move [to] workspace <n>`.
pub fn workspace(node: &ParseNode, move_window: bool) -> Result<KeySequence, GrammarError> {
    let n = match required(node, "n")? {
        ParseNode::Integer { value, .. } => u32::try_from(*value).map_err(|_| {
            GrammarError::OutOfRange {
                what: "workspace",
                value: *value,
            }
        })?,
        other => return Err(GrammarError::UnexpectedNode(format!("{other:?}"))),
    };
    if move_window {
        window::move_to_workspace(n)
    } else {
        window::go_to_workspace(n)
    }
}

/// `window <direction>` and `move window [to the] <direction>`.
pub fn window_direction(node: &ParseNode, move_window: bool) -> Result<KeySequence, GrammarError> {
    let value = value_of(node, "direction")?;
    let direction = Direction::from_phrase(value).ok_or_else(|| GrammarError::UnknownValue {
        what: "direction",
        value: value.to_string(),
    })?;
    Ok(if move_window {
        window::move_window(direction)
    } else {
        window::focus(direction)
    })
}

/// `S S H [<ssh_options>] <server> [<command>]`
pub fn ssh(node: &ParseNode, config: &SshConfig) -> Result<KeySequence, GrammarError> {
    let server_rule = node
        .extract(RuleKind::SshServer)
        .into_iter()
        .next()
        .ok_or(GrammarError::MissingChild("server"))?;
    let user = server_rule.child("user").and_then(ParseNode::value);
    let mut command = SshCommand::from_spoken(config, user, value_of(server_rule, "server")?)?;

    for option in node.extract(RuleKind::SshOption) {
        let flag = mapped_value(option)?;
        command.options.push(SshOption::from_flag(flag).ok_or_else(|| {
            GrammarError::UnknownValue {
                what: "ssh option",
                value: flag.to_string(),
            }
        })?);
    }
    if let Some(simple) = node.extract(RuleKind::SimpleCommand).first() {
        let value = mapped_value(simple)?;
        command.command = Some(simple_command(value).unwrap_or(value).to_string());
    }
    Ok(command.keys()?)
}

/// `open process [<cmd>]`: the launcher, then an ssh or simple command.
pub fn open_process(node: &ParseNode, config: &SshConfig) -> Result<KeySequence, GrammarError> {
    let command = if let Some(remote) = node.child("ssh") {
        Some(ssh(remote, config)?)
    } else if let Some(local) = node.child("command") {
        Some(simple(local)?)
    } else {
        None
    };
    Ok(window::open_process(command.as_ref()))
}

/// A simple command typed into the terminal; the rule value is the spoken
/// phrase.
pub fn simple(node: &ParseNode) -> Result<KeySequence, GrammarError> {
    expect_kind(node, RuleKind::SimpleCommand)?;
    let value = mapped_value(node)?;
    let command = simple_command(value).unwrap_or(value);
    Ok(text_to_sequence(command)?)
}

/// Host-facing wrapper: a failed rule types nothing instead of interrupting
/// the recognition loop.
pub fn value_or_empty(rule: &str, result: Result<KeySequence, GrammarError>) -> KeySequence {
    match result {
        Ok(keys) => keys,
        Err(err) => {
            warn!(rule, error = %err, "rule produced no keys");
            KeySequence::new()
        }
    }
}
