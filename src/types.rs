use crate::charmap;
use crate::error::CommandError;
use crate::key::KeyEvent;
use crate::sequence::KeySequence;

/// Declares a closed vocabulary of vim commands. Every entry carries the
/// English grammar phrase (also the translation key) and the injector
/// tokens it types.
macro_rules! key_table {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $phrase:literal, $token:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Grammar phrase in English; the key used for translation.
            pub fn phrase(&self) -> &'static str {
                match self {
                    $($name::$variant => $phrase,)+
                }
            }

            pub fn token(&self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }

            pub fn keys(&self) -> KeySequence {
                self.token()
                    .parse()
                    .expect("key table tokens are valid injector tokens")
            }

            /// Look up the entry typing `token`. Legacy spellings such as
            /// `s-w` or `minus` resolve to the same entry.
            pub fn from_token(token: &str) -> Result<Self, CommandError> {
                let unknown = || CommandError::UnknownToken {
                    kind: $kind,
                    token: token.to_string(),
                };
                let keys: KeySequence = token.parse().map_err(|_| unknown())?;
                Self::ALL
                    .iter()
                    .copied()
                    .find(|entry| entry.keys() == keys)
                    .ok_or_else(unknown)
            }
        }
    };
}

key_table! {
    /// Vim operators: verbs acting on the range a motion covers.
    pub enum Operator ("operator") {
        Change => "change", "c";
        Delete => "delete", "d";
        Yank => "yank", "y";
        SwapCase => "swap case", "g,tilde";
        Lowercase => "make lowercase", "g,u";
        Uppercase => "make uppercase", "g,shift-u";
        Filter => "filter", "exclamation";
        CFilter => "C filter", "equal";
        Format => "text formatting", "g,q";
        Rot13 => "rotation 13 encoding", "g,question";
        ShiftRight => "shift right", "rangle";
        ShiftLeft => "shift left", "langle";
        DefineFold => "define fold", "z,f";
        CallFunction => "call function", "g,at";
    }
}

key_table! {
    /// Cursor motions valid on their own and after an operator.
    pub enum Motion ("motion") {
        Left => "(backward|left)", "h";
        Right => "(forward|right)", "l";
        FirstChar => "(zero|first char[acter])", "0";
        FirstNonBlank => "(caret|first non-blank char[acter])", "caret";
        LastChar => "(dollar|last char[acter])", "dollar";
        LastVisibleNonBlank => "last visible non-blank char[acter]", "g,underscore";
        FirstVisibleChar => "first visible char[acter]", "g,0";
        FirstVisibleNonBlank => "first visible non-blank char[acter]", "g,caret";
        MiddleOfLine => "middle of line", "g,m";
        LastVisibleChar => "last visible char[acter]", "g,dollar";
        Column => "(pipe|column)", "bar";
        Up => "up", "k";
        Down => "down", "j";
        VisibleUp => "visible up", "g,k";
        VisibleDown => "visible down", "g,j";
        NonBlankUp => "(minus|linewise non-blank up)", "hyphen";
        NonBlankDown => "(plus|linewise non-blank down)", "plus";
        FirstNonBlankLineDown => "(underscore|first non-blank line down)", "underscore";
        Goto => "goto", "shift-g";
        EndOfLastLine => "end of [last] line", "ctrl-end";
        FirstLine => "first non-blank char[acter] on line", "g,g";
        MatchingPair => "percent", "percent";
        Word => "word", "w";
        BigWord => "(big|cap) word", "shift-w";
        WordEnd => "end", "e";
        BigWordEnd => "(big|cap) end", "shift-e";
        Back => "back", "b";
        BigBack => "(big|cap) back", "shift-b";
        BackEnd => "backward end", "g,e";
        BigBackEnd => "backward (big|cap) end", "g,shift-e";
        PreviousSentence => "((open|left) paren|previous sentence)", "lparen";
        NextSentence => "((close|right) paren|next sentence)", "rparen";
        PreviousParagraph => "((left|open) curly brace|previous paragraph)", "lbrace";
        NextParagraph => "((right|close) curly brace|next paragraph)", "rbrace";
        NextSectionStart => "next section start", "rbracket,rbracket";
        NextSectionEnd => "next section end", "rbracket,lbracket";
        PreviousSectionStart => "previous section start", "lbracket,rbracket";
        PreviousSectionEnd => "previous section end", "lbracket,lbracket";
        Ex => "ex", "colon";
    }
}

key_table! {
    /// Text objects, only valid in visual mode and after an operator.
    pub enum TextObject ("text object") {
        AWord => "a word", "a,w";
        InnerWord => "inner word", "i,w";
        ABigWord => "a (big|cap) word", "a,shift-w";
        InnerBigWord => "inner (big|cap) word", "i,shift-w";
        ASentence => "a sentence", "a,s";
        InnerSentence => "inner sentence", "i,s";
        AParagraph => "a paragraph", "a,p";
        InnerParagraph => "inner paragraph", "i,p";
        ABracketBlock => "a bracket block", "a,lbracket";
        InnerBracketBlock => "inner bracket block", "i,lbracket";
        AParenBlock => "a paren block", "a,b";
        InnerParenBlock => "inner paren block", "i,b";
        AnAngleBlock => "an angle block", "a,langle";
        InnerAngleBlock => "inner angle block", "i,langle";
        ATagBlock => "a tag block", "a,t";
        InnerTagBlock => "inner tag block", "i,t";
        ACurlyBlock => "a curly block", "a,shift-b";
        InnerCurlyBlock => "inner curly block", "i,shift-b";
        AQuotedString => "a quoted string", "a,dquote";
        InnerQuotedString => "inner quoted string", "i,dquote";
    }
}

key_table! {
    /// Selection kind forced onto an operator (`dv`, `dV`, `d<C-v>`).
    pub enum VisualKind ("mode") {
        /// Character-wise (v).
        CharWise => "character", "v";
        /// Line-wise (V).
        LineWise => "line", "shift-v";
        /// Block-wise (Ctrl-V).
        BlockWise => "block", "ctrl-v";
    }
}

key_table! {
    /// Single normal-mode commands that take no motion.
    pub enum NormalAction ("normal mode command") {
        Addition => "addition", "ctrl-a";
        ScrollBackScreen => "scroll back screen", "ctrl-b";
        Interrupt => "interrupt", "ctrl-c";
        ScrollDownHalf => "scroll down half", "ctrl-d";
        ScrollExtraUp => "scroll extra up", "ctrl-e";
        ScrollForwardScreen => "scroll forward screen", "ctrl-f";
        DisplayFileName => "display file name", "ctrl-g";
        RedrawScreen => "redraw screen", "ctrl-l";
        JumplistNewer => "jumplist newer", "ctrl-i";
        JumplistOlder => "jumplist older", "ctrl-o";
        Redo => "redo", "ctrl-r";
        TagOlder => "tag older", "ctrl-t";
        ScrollHalfUp => "scroll half up", "ctrl-u";
        VisualBlock => "visual block", "ctrl-v";
        Window => "window", "ctrl-w";
        Subtract => "subtract", "ctrl-x";
        ScrollDown => "scroll down", "ctrl-y";
        Suspend => "suspend", "ctrl-z";
        InsertMode => "insertmode", "ctrl-backslash,ctrl-g";
        Indent => "indent", "ctrl-rbracket";
        EditAlternate => "edit alternate", "ctrl-caret";
        CapAppend => "cap append", "shift-a";
        ChangeToEndOfLine => "copy to end of line", "shift-c";
        DeleteToEndOfLine => "delete to end of line", "shift-d";
        FindCharLeft => "find char[acter] left", "shift-f";
        LineFromTopOfScreen => "goto line from top of screen", "shift-h";
        InsertAtStartOfLine => "insert at start of line", "shift-i";
        JoinLines => "join lines", "shift-j";
        LookupKeyword => "lookup keyword", "shift-k";
        LineFromBottomOfScreen => "goto line from bottom of screen", "shift-l";
        MiddleOfScreen => "goto middle of screen", "shift-m";
        BackwardsNext => "backwards next", "shift-n";
        InsertLineAbove => "insert on newline before", "shift-o";
        PasteBefore => "paste before", "shift-p";
        ExMode => "external mode", "shift-q";
        ReplaceMode => "replace mode", "shift-r";
        SubstituteLine => "switch lines", "shift-s";
        BackwardsTill => "backwards move to char[acter]", "shift-t";
        UndoLine => "undo on line", "shift-u";
        VisualLine => "visual line", "shift-v";
        BackwardsDeleteChar => "backwards delete char[acter]", "shift-x";
        YankLine => "yank line", "shift-y";
        WriteAndQuit => "store and exit", "shift-z,shift-z";
        QuitWithoutWriting => "unsafe exit", "shift-z,shift-q";
        Append => "append", "a";
        Insert => "(insert|inner)", "i";
    }
}

/// A vim register named after `"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(char);

impl Register {
    /// The unnamed register, `""`.
    pub const UNNAMED: Register = Register('"');

    const SPECIAL: &'static str = "\"-*+_/.:%#=";

    pub fn new(name: char) -> Result<Self, CommandError> {
        if name.is_ascii_alphanumeric() || Self::SPECIAL.contains(name) {
            Ok(Register(name))
        } else {
            Err(CommandError::InvalidRegister(name))
        }
    }

    pub fn name(&self) -> char {
        self.0
    }

    /// `"` followed by the register key.
    pub fn keys(&self) -> Result<KeySequence, CommandError> {
        let mut keys = KeySequence::from(charmap::encode_char('"')?);
        keys.push(charmap::encode_char(self.0)?);
        Ok(keys)
    }
}

/// One spoken digit of a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digit(u8);

impl Digit {
    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn key(&self) -> KeyEvent {
        KeyEvent::char(char::from(b'0' + self.0))
    }
}

impl TryFrom<u32> for Digit {
    type Error = CommandError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value <= 9 {
            Ok(Digit(value as u8))
        } else {
            Err(CommandError::InvalidDigit(value))
        }
    }
}
