//! Grammar registry
//!
//! Built once at startup and read-only afterwards; share it behind an
//! `Arc` when several classifiers run at once.

use crate::error::Result;
use super::{CommandGrammar, CommandKind, CommandMatch, LineGrammar};

/// Every line and header shape the decoder recognizes
#[derive(Debug, Clone)]
pub struct Registry {
    /// Outer line patterns
    line: LineGrammar,

    /// One grammar per keyword, indexed by `CommandKind::index`
    commands: [CommandGrammar; CommandKind::COUNT],
}

impl Registry {
    /// Build the registry with all modeled commands
    pub fn new() -> Result<Self> {
        let line = LineGrammar::new()?;
        let commands = CommandKind::ALL.map(CommandGrammar::for_kind);

        tracing::debug!("Grammar registry built with {} command grammars", commands.len());

        Ok(Self { line, commands })
    }

    /// Outer line grammar
    pub fn line(&self) -> &LineGrammar {
        &self.line
    }

    /// Grammar registered for a kind
    pub fn grammar(&self, kind: CommandKind) -> &CommandGrammar {
        &self.commands[kind.index()]
    }

    /// Grammar registered for a keyword (exact, case-sensitive)
    pub fn lookup(&self, keyword: &str) -> Option<&CommandGrammar> {
        CommandKind::from_keyword(keyword).map(|kind| self.grammar(kind))
    }

    /// All grammars, in report order
    pub fn grammars(&self) -> impl Iterator<Item = &CommandGrammar> {
        self.commands.iter()
    }

    /// Match a header against every grammar
    ///
    /// Keywords are distinct first tokens, so at most one grammar can
    /// match; the first hit is the only one.
    pub fn match_header<'a>(&self, header: &'a str) -> Option<CommandMatch<'a>> {
        self.commands.iter().find_map(|grammar| grammar.matches(header))
    }
}
