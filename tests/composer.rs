use speechkeys::{
    CommandError, CommandSpec, DEFAULT_MAX_REPETITIONS, Digit, Motion, NormalAction,
    NormalCommand, Operator, Register, TextObject, VisualKind, compose, compose_repeated,
};

fn digit(d: u32) -> Digit {
    Digit::try_from(d).unwrap()
}

#[test]
fn test_delete_line() {
    let spec = CommandSpec::new(Operator::Delete).line();
    assert_eq!(compose(&spec).unwrap().tokens(), vec!["d", "d"]);
}

#[test]
fn test_yank_two_words() {
    let spec = CommandSpec::new(Operator::Yank)
        .digit(digit(2))
        .motion(Motion::Word);
    assert_eq!(compose(&spec).unwrap().tokens(), vec!["y", "2", "w"]);
}

#[test]
fn test_missing_motion_is_incomplete() {
    let spec = CommandSpec::new(Operator::Change).digit(digit(3));
    assert_eq!(compose(&spec), Err(CommandError::IncompleteCommand));
}

#[test]
fn test_line_and_motion_conflict() {
    let spec = CommandSpec::new(Operator::Delete).line().motion(Motion::Word);
    assert_eq!(compose(&spec), Err(CommandError::ConflictingTarget));
}

#[test]
fn test_full_command_order() {
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
fn test_multi_key_operator_doubles_for_line() {
    let spec = CommandSpec::new(Operator::Uppercase).line();
    assert_eq!(compose(&spec).unwrap().to_string(), "g,shift-u,g,shift-u");
}

#[test]
fn test_unnamed_register_and_line_mode() {
    let spec = CommandSpec::new(Operator::Yank)
        .register(Register::UNNAMED)
        .mode(VisualKind::LineWise)
        .motion(Motion::NextParagraph);
    assert_eq!(
        compose(&spec).unwrap().to_string(),
        "dquote,dquote,y,shift-v,rbrace"
    );
}

#[test]
fn test_repeated_commands_concatenate() {
    let commands = vec![
        NormalCommand::Count(digit(3)),
        NormalCommand::Motion(Motion::Down),
        NormalCommand::Normal(NormalAction::JoinLines),
        NormalCommand::Operator(CommandSpec::new(Operator::Delete).line()),
    ];
    assert_eq!(
        compose_repeated(&commands, DEFAULT_MAX_REPETITIONS)
            .unwrap()
            .to_string(),
        "3,j,shift-j,d,d"
    );
}

#[test]
fn test_repetition_bounds() {
    assert_eq!(
        compose_repeated(&[], DEFAULT_MAX_REPETITIONS),
        Err(CommandError::RepetitionOutOfRange { got: 0, max: 15 })
    );
    let many = vec![NormalCommand::Motion(Motion::Word); 16];
    assert_eq!(
        compose_repeated(&many, DEFAULT_MAX_REPETITIONS),
        Err(CommandError::RepetitionOutOfRange { got: 16, max: 15 })
    );
    assert!(compose_repeated(&many[..15], DEFAULT_MAX_REPETITIONS).is_ok());
}

#[test]
fn test_incomplete_command_inside_repetition() {
    let commands = vec![
        NormalCommand::Motion(Motion::Word),
        NormalCommand::Operator(CommandSpec::new(Operator::Delete)),
    ];
    assert_eq!(
        compose_repeated(&commands, DEFAULT_MAX_REPETITIONS),
        Err(CommandError::IncompleteCommand)
    );
}

#[test]
fn test_token_lookup_accepts_legacy_spellings() {
    assert_eq!(Motion::from_token("s-w").unwrap(), Motion::BigWord);
    assert_eq!(Motion::from_token("minus").unwrap(), Motion::NonBlankUp);
    assert!(matches!(
        Operator::from_token("q"),
        Err(CommandError::UnknownToken { kind: "operator", .. })
    ));
}

#[test]
fn test_token_lookup_past_the_first_motions() {
    assert_eq!(Motion::from_token("0").unwrap(), Motion::FirstChar);
    assert_eq!(Motion::from_token("zero").unwrap(), Motion::FirstChar);
    assert_eq!(Motion::from_token("w").unwrap(), Motion::Word);
    assert_eq!(Motion::from_token("g,e").unwrap(), Motion::BackEnd);
    assert_eq!(Motion::FirstVisibleChar.keys().to_string(), "g,0");

    let spec = CommandSpec::new(Operator::Delete).motion(Motion::from_token("shift-g").unwrap());
    assert_eq!(compose(&spec).unwrap().to_string(), "d,shift-g");
}

#[test]
fn test_invalid_digit_and_register() {
    assert_eq!(Digit::try_from(10u32), Err(CommandError::InvalidDigit(10)));
    assert_eq!(Register::new('!'), Err(CommandError::InvalidRegister('!')));
}
