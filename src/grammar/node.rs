/// Which rule produced a [`ParseNode::Rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Number,
    Motion,
    TextObject,
    MotionOperator,
    VimNormal,
    TrueVimNormal,
    NormalRepetition,
    Keyboard,
    SshOption,
    SshServer,
    SimpleCommand,
    Other,
}

/// A recognized utterance as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    /// Fixed words of the grammar.
    Literal {
        name: Option<String>,
        words: Vec<String>,
    },
    /// The matched alternative of a choice list, already mapped to its value.
    Choice { name: String, value: String },
    /// A spoken integer.
    Integer { name: String, value: i64 },
    /// Free-form dictated words.
    Dictation { name: String, words: Vec<String> },
    Repetition {
        name: Option<String>,
        children: Vec<ParseNode>,
    },
    /// A referenced rule. Mapping rules carry the value of the matched phrase.
    Rule {
        name: Option<String>,
        kind: RuleKind,
        value: Option<String>,
        children: Vec<ParseNode>,
    },
}

impl ParseNode {
    pub fn literal(name: &str, words: &str) -> Self {
        ParseNode::Literal {
            name: Some(name.to_string()),
            words: words.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn choice(name: &str, value: &str) -> Self {
        ParseNode::Choice {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn integer(name: &str, value: i64) -> Self {
        ParseNode::Integer {
            name: name.to_string(),
            value,
        }
    }

    pub fn dictation(name: &str, text: &str) -> Self {
        ParseNode::Dictation {
            name: name.to_string(),
            words: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn repetition(name: Option<&str>, children: Vec<ParseNode>) -> Self {
        ParseNode::Repetition {
            name: name.map(str::to_string),
            children,
        }
    }

    /// A mapping rule matched with `value`.
    pub fn mapped(name: Option<&str>, kind: RuleKind, value: &str) -> Self {
        ParseNode::Rule {
            name: name.map(str::to_string),
            kind,
            value: Some(value.to_string()),
            children: Vec::new(),
        }
    }

    /// A compound rule built from `children`.
    pub fn rule(name: Option<&str>, kind: RuleKind, children: Vec<ParseNode>) -> Self {
        ParseNode::Rule {
            name: name.map(str::to_string),
            kind,
            value: None,
            children,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ParseNode::Choice { name, .. }
            | ParseNode::Integer { name, .. }
            | ParseNode::Dictation { name, .. } => Some(name),
            ParseNode::Literal { name, .. }
            | ParseNode::Repetition { name, .. }
            | ParseNode::Rule { name, .. } => name.as_deref(),
        }
    }

    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::Repetition { children, .. } | ParseNode::Rule { children, .. } => children,
            _ => &[],
        }
    }

    pub fn kind(&self) -> Option<RuleKind> {
        match self {
            ParseNode::Rule { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Mapped value of a choice or mapping rule.
    pub fn value(&self) -> Option<&str> {
        match self {
            ParseNode::Choice { value, .. } => Some(value),
            ParseNode::Rule { value, .. } => value.as_deref(),
            _ => None,
        }
    }

    /// Spoken words of a literal or dictation, joined by spaces.
    pub fn text(&self) -> Option<String> {
        match self {
            ParseNode::Literal { words, .. } | ParseNode::Dictation { words, .. } => {
                Some(words.join(" "))
            }
            _ => None,
        }
    }

    /// Pre-order fold over this node and every descendant.
    pub fn fold<'a, B, F>(&'a self, init: B, f: &mut F) -> B
    where
        F: FnMut(B, &'a ParseNode) -> B,
    {
        let acc = f(init, self);
        self.fold_below(acc, &|_| true, f)
    }

    /// Pre-order fold over the descendants, only walking into nodes for
    /// which `enter` holds.
    fn fold_below<'a, B, F>(&'a self, init: B, enter: &dyn Fn(&ParseNode) -> bool, f: &mut F) -> B
    where
        F: FnMut(B, &'a ParseNode) -> B,
    {
        let mut acc = init;
        for child in self.children() {
            acc = f(acc, child);
            if enter(child) {
                acc = child.fold_below(acc, enter, f);
            }
        }
        acc
    }

    /// Nodes below this one that belong to this rule: the walk stops at
    /// nested rules, which are yielded but not entered.
    fn own_descendants(&self) -> Vec<&ParseNode> {
        self.fold_below(Vec::new(), &|node| node.kind().is_none(), &mut |mut out, node| {
            out.push(node);
            out
        })
    }

    /// First descendant named `name`, not looking inside nested rules.
    pub fn child(&self, name: &str) -> Option<&ParseNode> {
        self.own_descendants()
            .into_iter()
            .find(|node| node.name() == Some(name))
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Nested rules of `kind` in recognition order, not looking inside
    /// nested rules.
    pub fn extract(&self, kind: RuleKind) -> Vec<&ParseNode> {
        self.own_descendants()
            .into_iter()
            .filter(|node| node.kind() == Some(kind))
            .collect()
    }

    /// First nested rule of any kind.
    pub fn first_rule(&self) -> Option<&ParseNode> {
        self.own_descendants()
            .into_iter()
            .find(|node| node.kind().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParseNode {
        ParseNode::rule(
            None,
            RuleKind::MotionOperator,
            vec![
                ParseNode::choice("operator", "d"),
                ParseNode::repetition(
                    Some("numbers"),
                    vec![
                        ParseNode::mapped(None, RuleKind::Number, "2"),
                        ParseNode::mapped(None, RuleKind::Number, "3"),
                    ],
                ),
                ParseNode::rule(
                    Some("motion"),
                    RuleKind::Motion,
                    vec![ParseNode::choice("inner", "w")],
                ),
            ],
        )
    }

    #[test]
    fn child_lookup_stops_at_rule_boundaries() {
        let node = sample();
        assert_eq!(node.child("operator").and_then(ParseNode::value), Some("d"));
        assert!(node.has_child("motion"));
        assert!(!node.has_child("inner"));
    }

    #[test]
    fn extract_keeps_recognition_order() {
        let node = sample();
        let numbers: Vec<_> = node
            .extract(RuleKind::Number)
            .into_iter()
            .filter_map(ParseNode::value)
            .collect();
        assert_eq!(numbers, vec!["2", "3"]);
    }

    #[test]
    fn fold_visits_everything() {
        let count = sample().fold(0, &mut |n, _| n + 1);
        assert_eq!(count, 7);
    }

    #[test]
    fn fold_is_pre_order() {
        let tree = sample();
        let names = tree.fold(Vec::new(), &mut |mut names, node| {
            names.extend(node.name());
            names
        });
        assert_eq!(names, vec!["operator", "numbers", "motion", "inner"]);
    }

    #[test]
    fn text_joins_words() {
        assert_eq!(
            ParseNode::dictation("text", "  hello   world ").text().as_deref(),
            Some("hello world")
        );
        assert_eq!(ParseNode::choice("a", "b").text(), None);
    }
}
