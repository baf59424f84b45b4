use crate::error::CommandError;
use crate::sequence::KeySequence;
use crate::types::{Digit, Motion, NormalAction, Operator, Register, TextObject, VisualKind};

/// Upper bound on commands in one normal-mode utterance unless configured otherwise.
pub const DEFAULT_MAX_REPETITIONS: usize = 15;

/// What an operator acts on. A plain motion and a text object are
/// alternatives, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionTarget {
    Motion(Motion),
    TextObject(TextObject),
}

impl MotionTarget {
    pub fn keys(&self) -> KeySequence {
        match self {
            MotionTarget::Motion(m) => m.keys(),
            MotionTarget::TextObject(t) => t.keys(),
        }
    }
}

/// A recognized "operator over a motion" utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub register: Option<Register>,
    pub operator: Operator,
    /// Doubled-operator shorthand ("delete line" is `dd`).
    pub line: bool,
    pub mode: Option<VisualKind>,
    /// Count digits in the order they were spoken.
    pub count: Vec<Digit>,
    pub motion: Option<MotionTarget>,
}

impl CommandSpec {
    pub fn new(operator: Operator) -> Self {
        Self {
            register: None,
            operator,
            line: false,
            mode: None,
            count: Vec::new(),
            motion: None,
        }
    }

    pub fn register(mut self, register: Register) -> Self {
        self.register = Some(register);
        self
    }

    pub fn line(mut self) -> Self {
        self.line = true;
        self
    }

    pub fn mode(mut self, mode: VisualKind) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn digit(mut self, digit: Digit) -> Self {
        self.count.push(digit);
        self
    }

    pub fn motion(mut self, motion: Motion) -> Self {
        self.motion = Some(MotionTarget::Motion(motion));
        self
    }

    pub fn text_object(mut self, object: TextObject) -> Self {
        self.motion = Some(MotionTarget::TextObject(object));
        self
    }
}

/// Assemble the keys for an operator command.
///
/// Vim reads these keys positionally, so the order is fixed: register,
/// operator, repeated operator for the line form, forced mode, count digits,
/// motion. Absent parts are skipped.
pub fn compose(spec: &CommandSpec) -> Result<KeySequence, CommandError> {
    match (spec.line, spec.motion) {
        (false, None) => return Err(CommandError::IncompleteCommand),
        (true, Some(_)) => return Err(CommandError::ConflictingTarget),
        _ => {}
    }

    let mut keys = KeySequence::new();

    if let Some(register) = spec.register {
        keys.append(&register.keys()?);
    }

    let operator = spec.operator.keys();
    keys.append(&operator);
    if spec.line {
        keys.append(&operator);
    }

    // Overrides the operator's own charwise/linewise behaviour.
    if let Some(mode) = spec.mode {
        keys.append(&mode.keys());
    }

    // Vim multiplies this with any count typed before the operator.
    keys.extend(spec.count.iter().map(Digit::key));

    if let Some(target) = spec.motion {
        keys.append(&target.keys());
    }

    Ok(keys)
}

/// One element of a normal-mode utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalCommand {
    Operator(CommandSpec),
    Motion(Motion),
    Normal(NormalAction),
    Count(Digit),
}

impl NormalCommand {
    pub fn keys(&self) -> Result<KeySequence, CommandError> {
        match self {
            NormalCommand::Operator(spec) => compose(spec),
            NormalCommand::Motion(motion) => Ok(motion.keys()),
            NormalCommand::Normal(action) => Ok(action.keys()),
            NormalCommand::Count(digit) => Ok(KeySequence::from(digit.key())),
        }
    }
}

/// Several commands spoken in one breath, typed in recognition order.
pub fn compose_repeated(
    commands: &[NormalCommand],
    max: usize,
) -> Result<KeySequence, CommandError> {
    if commands.is_empty() || commands.len() > max {
        return Err(CommandError::RepetitionOutOfRange {
            got: commands.len(),
            max,
        });
    }
    let mut keys = KeySequence::new();
    for command in commands {
        keys.append(&command.keys()?);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(d: u32) -> Digit {
        Digit::try_from(d).unwrap()
    }

    #[test]
    fn delete_line() {
        let keys = compose(&CommandSpec::new(Operator::Delete).line()).unwrap();
        assert_eq!(keys.tokens(), vec!["d", "d"]);
    }

    #[test]
    fn yank_two_words() {
        let spec = CommandSpec::new(Operator::Yank).digit(digit(2)).motion(Motion::Word);
        assert_eq!(compose(&spec).unwrap().tokens(), vec!["y", "2", "w"]);
    }

    #[test]
    fn missing_motion_is_incomplete() {
        assert_eq!(
            compose(&CommandSpec::new(Operator::Change)),
            Err(CommandError::IncompleteCommand)
        );
    }

    #[test]
    fn line_with_motion_conflicts() {
        let spec = CommandSpec::new(Operator::Delete).line().motion(Motion::Word);
        assert_eq!(compose(&spec), Err(CommandError::ConflictingTarget));
    }

    #[test]
    fn full_assembly_order() {
        let spec = CommandSpec::new(Operator::SwapCase)
            .register(Register::new('a').unwrap())
            .mode(VisualKind::BlockWise)
            .digit(digit(2))
            .digit(digit(3))
            .text_object(TextObject::InnerParagraph);
        assert_eq!(
            compose(&spec).unwrap().to_string(),
            "dquote,a,g,tilde,ctrl-v,2,3,i,p"
        );
    }

    #[test]
    fn multi_key_operator_doubles_whole_sequence() {
        let keys = compose(&CommandSpec::new(Operator::Uppercase).line()).unwrap();
        assert_eq!(keys.to_string(), "g,shift-u,g,shift-u");
    }

    #[test]
    fn repeated_commands_concatenate() {
        let commands = [
            NormalCommand::Count(digit(3)),
            NormalCommand::Motion(Motion::Down),
            NormalCommand::Operator(CommandSpec::new(Operator::Delete).line()),
            NormalCommand::Normal(NormalAction::PasteBefore),
        ];
        let keys = compose_repeated(&commands, DEFAULT_MAX_REPETITIONS).unwrap();
        assert_eq!(keys.to_string(), "3,j,d,d,shift-p");
    }

    #[test]
    fn repeated_commands_are_bounded() {
        assert_eq!(
            compose_repeated(&[], 5),
            Err(CommandError::RepetitionOutOfRange { got: 0, max: 5 })
        );
        let many = vec![NormalCommand::Motion(Motion::Left); 6];
        assert_eq!(
            compose_repeated(&many, 5),
            Err(CommandError::RepetitionOutOfRange { got: 6, max: 5 })
        );
    }

    #[test]
    fn repeated_commands_propagate_errors() {
        let commands = [NormalCommand::Operator(CommandSpec::new(Operator::Yank))];
        assert_eq!(
            compose_repeated(&commands, 5),
            Err(CommandError::IncompleteCommand)
        );
    }
}
