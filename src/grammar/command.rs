//! Command grammars
//!
//! One table entry per keyword, one matcher for all of them.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Trailing token asking the server to suppress its reply
pub const NOREPLY: &str = "noreply";

/// Command keywords the registry models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Cas,
    Add,
    Set,
    Replace,
    Append,
    Prepend,
    Incr,
    Decr,
    Delete,
    Get,
    Gets,
}

impl CommandKind {
    /// Number of modeled keywords
    pub const COUNT: usize = 11;

    /// Every keyword, in report order
    pub const ALL: [CommandKind; Self::COUNT] = [
        CommandKind::Cas,
        CommandKind::Add,
        CommandKind::Set,
        CommandKind::Replace,
        CommandKind::Append,
        CommandKind::Prepend,
        CommandKind::Incr,
        CommandKind::Decr,
        CommandKind::Delete,
        CommandKind::Get,
        CommandKind::Gets,
    ];

    /// The keyword as it appears at the start of a header
    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::Cas => "cas",
            CommandKind::Add => "add",
            CommandKind::Set => "set",
            CommandKind::Replace => "replace",
            CommandKind::Append => "append",
            CommandKind::Prepend => "prepend",
            CommandKind::Incr => "incr",
            CommandKind::Decr => "decr",
            CommandKind::Delete => "delete",
            CommandKind::Get => "get",
            CommandKind::Gets => "gets",
        }
    }

    /// Exact, case-sensitive keyword lookup
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Position in `ALL`, used to index per-command counters
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for CommandKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s).ok_or_else(|| format!("unknown command keyword: {}", s))
    }
}

/// Kinds of field a header may carry after its keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Opaque key token
    Key,
    /// Expiration time
    Exptime,
    /// Client flags
    Flags,
    /// Data block length
    Bytes,
    /// Unique id from a previous `gets`
    CasUnique,
    /// Increment/decrement amount
    Delta,
}

impl FieldKind {
    /// Whether a single token is valid for this field
    pub fn accepts(self, token: &str) -> bool {
        match self {
            FieldKind::Key => !token.is_empty() && !token.contains(char::is_whitespace),
            _ => !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

/// A header that matched one of the grammars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandMatch<'a> {
    pub kind: CommandKind,
    pub key: &'a str,
    pub noreply: bool,
}

/// Shape of one command's header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandGrammar {
    /// Keyword this grammar is registered under
    pub kind: CommandKind,

    /// Required fields after the keyword, in order
    pub fields: &'static [FieldKind],

    /// Whether a trailing `noreply` token is accepted
    pub noreply: bool,
}

const STORAGE_CAS: &[FieldKind] = &[
    FieldKind::Key,
    FieldKind::Exptime,
    FieldKind::Flags,
    FieldKind::Bytes,
    FieldKind::CasUnique,
];
const STORAGE: &[FieldKind] = &[
    FieldKind::Key,
    FieldKind::Exptime,
    FieldKind::Flags,
    FieldKind::Bytes,
];
const ARITHMETIC: &[FieldKind] = &[FieldKind::Key, FieldKind::Delta];
const KEY_ONLY: &[FieldKind] = &[FieldKind::Key];

impl CommandGrammar {
    /// The grammar registered for a keyword
    pub fn for_kind(kind: CommandKind) -> Self {
        let (fields, noreply) = match kind {
            CommandKind::Cas => (STORAGE_CAS, true),
            CommandKind::Add
            | CommandKind::Set
            | CommandKind::Replace
            | CommandKind::Append
            | CommandKind::Prepend => (STORAGE, true),
            CommandKind::Incr | CommandKind::Decr => (ARITHMETIC, true),
            CommandKind::Delete => (KEY_ONLY, true),
            CommandKind::Get | CommandKind::Gets => (KEY_ONLY, false),
        };
        Self { kind, fields, noreply }
    }

    /// Match a complete header against this grammar
    ///
    /// The header must start with the keyword itself; tokens are separated
    /// by exactly one space and trailing whitespace is ignored. Tabs or
    /// doubled spaces between tokens fail the match. `noreply` is only
    /// recognized as the final token, after every required field.
    pub fn matches<'a>(&self, header: &'a str) -> Option<CommandMatch<'a>> {
        let header = header.trim_end();
        if header.starts_with(char::is_whitespace) {
            return None;
        }

        let mut tokens = header.split(' ');
        if tokens.next()? != self.kind.keyword() {
            return None;
        }

        let mut key = "";
        for field in self.fields {
            let token = tokens.next()?;
            if !field.accepts(token) {
                return None;
            }
            if *field == FieldKind::Key {
                key = token;
            }
        }

        let noreply = match tokens.next() {
            None => false,
            Some(NOREPLY) if self.noreply => true,
            Some(_) => return None,
        };

        if tokens.next().is_some() {
            return None;
        }

        Some(CommandMatch {
            kind: self.kind,
            key,
            noreply,
        })
    }
}
