use speechkeys::grammar::rules;
use speechkeys::grammar::{GrammarKind, Identity, Locale, ParseNode, Registry, RuleKind};
use speechkeys::{CommandSpec, Config, Digit, Motion, Operator, compose};

mod support;
use support::temp_vault;

fn operator_node(operator: &str, rest: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![ParseNode::choice("operator", operator)];
    children.extend(rest);
    ParseNode::rule(Some("motion_operator"), RuleKind::MotionOperator, children)
}

#[test]
fn test_parse_tree_matches_composer() {
    let node = operator_node(
        "c",
        vec![
            ParseNode::literal("to", "to"),
            ParseNode::mapped(Some("motion"), RuleKind::Motion, "e"),
            ParseNode::mapped(Some("numbers"), RuleKind::Number, "4"),
        ],
    );
    let from_tree = compose(&rules::command_spec(&node).unwrap()).unwrap();
    let direct = compose(
        &CommandSpec::new(Operator::Change)
            .digit(Digit::try_from(4u32).unwrap())
            .motion(Motion::WordEnd),
    )
    .unwrap();
    assert_eq!(from_tree, direct);
    assert_eq!(from_tree.to_string(), "c,4,e");
}

#[test]
fn test_unknown_operator_types_nothing() {
    let node = operator_node("q", vec![ParseNode::literal("line", "line")]);
    let keys = rules::value_or_empty(
        "motion_operator",
        rules::command_spec(&node).and_then(|spec| Ok(compose(&spec)?)),
    );
    assert!(keys.is_empty());
}

#[test]
fn test_password_through_host_wrapper() {
    let (_dir, vault) = temp_vault();
    vault.store("nld", "bank", "Pin 1234", "rode vis").unwrap();

    let node = |passphrase: &str| {
        ParseNode::rule(
            Some("password"),
            RuleKind::Other,
            vec![
                ParseNode::literal("password", "password"),
                ParseNode::choice("name", "bank"),
                ParseNode::dictation("passphrase", passphrase),
            ],
        )
    };

    let typed = rules::value_or_empty(
        "password",
        rules::password(&node("Rode Vis"), &vault, Locale::Dutch),
    );
    assert_eq!(typed.to_string(), "shift-p,i,n,space,1,2,3,4");

    let typed = rules::value_or_empty(
        "password",
        rules::password(&node("blauwe vis"), &vault, Locale::Dutch),
    );
    assert!(typed.is_empty());

    // English has no such secret.
    let typed = rules::value_or_empty(
        "password",
        rules::password(&node("rode vis"), &vault, Locale::English),
    );
    assert!(typed.is_empty());
}

#[test]
fn test_registry_reads_locale_from_config() {
    let config: Config = toml::from_str("locale = \"nld\"\nmax_repetitions = 5").unwrap();
    assert_eq!(config.max_repetitions, 5);

    let mut registry = Registry::with_translator(config, Box::new(Identity), None);
    registry.load_all();
    assert_eq!(registry.locale(), Locale::Dutch);
    for kind in GrammarKind::ALL {
        assert!(registry.is_loaded(kind));
        assert_eq!(registry.grammar(kind).unwrap().locale, Locale::Dutch);
    }
}

#[test]
fn test_yank_two_words_through_rules() {
    let node = operator_node(
        "y",
        vec![
            ParseNode::literal("to", "to"),
            ParseNode::mapped(Some("motion"), RuleKind::Motion, "w"),
            ParseNode::mapped(Some("numbers"), RuleKind::Number, "2"),
        ],
    );
    let keys = compose(&rules::command_spec(&node).unwrap()).unwrap();
    assert_eq!(keys.tokens(), vec!["y", "2", "w"]);
}

#[test]
fn test_vim_grammar_loads_every_motion() {
    let mut registry = Registry::with_translator(Config::default(), Box::new(Identity), None);
    assert!(registry.load(GrammarKind::Vim));
    let motions = registry
        .grammar(GrammarKind::Vim)
        .unwrap()
        .table("motion")
        .unwrap();
    assert_eq!(motions.phrases.len(), Motion::ALL.len());
    let first_char = motions.find("(zero|first char[acter])").unwrap();
    assert_eq!(first_char.keys.to_string(), "0");
}
