//! Abstract Syntax Tree definitions

mod expr;
mod stmt;
mod visit;

pub use expr::*;
pub use stmt::*;
pub use visit::Visitor;

/// Identity of a `for` loop within one program
///
/// `break` and `continue` name their target loop through this handle. Ids are
/// handed out in source order, starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoopId(pub u32);

/// A complete program: the root that owns every node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_program(self)
    }

    /// Resolve a loop handle to its `for` statement
    pub fn find_loop(&self, id: LoopId) -> Option<&ForStmt> {
        self.stmts.iter().find_map(|s| s.find_loop(id))
    }
}
