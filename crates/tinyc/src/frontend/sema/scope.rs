//! Symbol table and scope management

use crate::common::{Position, Span};
use crate::types::CType;
use std::collections::HashMap;
use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

/// A symbol in the symbol table
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: CType,
    /// Where the name was declared
    pub span: Span,
    pub pos: Position,
}

/// Kind of symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    LocalVariable,
}

/// One lexical frame
#[derive(Debug, Default)]
struct Env {
    symbols: HashMap<DefaultSymbol, Symbol>,
}

/// Stack of nested frames, innermost last
///
/// The root frame is created with the scope and can never be popped.
pub struct Scope {
    interner: StringInterner<DefaultBackend>,
    envs: Vec<Env>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            interner: StringInterner::new(),
            envs: vec![Env::default()],
        }
    }

    /// Push a new empty frame
    pub fn enter_scope(&mut self) {
        self.envs.push(Env::default());
        tracing::trace!(depth = self.depth(), "enter scope");
    }

    /// Pop the innermost frame; returns false if only the root is left
    pub fn exit_scope(&mut self) -> bool {
        if self.envs.len() == 1 {
            tracing::warn!("attempt to exit the root scope");
            return false;
        }
        self.envs.pop();
        tracing::trace!(depth = self.depth(), "exit scope");
        true
    }

    /// Number of live frames, root included
    pub fn depth(&self) -> usize {
        self.envs.len()
    }

    /// Insert into the innermost frame, replacing any same-frame entry
    pub fn add_symbol(&mut self, name: &str, kind: SymbolKind, ty: CType, span: Span, pos: Position) {
        let key = self.interner.get_or_intern(name);
        let symbol = Symbol {
            name: name.to_string(),
            kind,
            ty,
            span,
            pos,
        };
        if let Some(env) = self.envs.last_mut() {
            env.symbols.insert(key, symbol);
        }
    }

    /// Look a name up, innermost frame first
    pub fn find_symbol(&self, name: &str) -> Option<&Symbol> {
        let key = self.interner.get(name)?;
        self.envs.iter().rev().find_map(|env| env.symbols.get(&key))
    }

    /// Look a name up in the innermost frame only
    pub fn find_in_current_frame(&self, name: &str) -> Option<&Symbol> {
        let key = self.interner.get(name)?;
        self.envs.last().and_then(|env| env.symbols.get(&key))
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope").field("envs", &self.envs).finish_non_exhaustive()
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
