//! The code generator: a fresh-label/fresh-temp IR buffer plus the
//! single-pass semantic/IR visitor that walks a [`tinyc_par::Program`],
//! consulting [`tinyc_sem::Tables`] for name resolution and a
//! [`tinyc_util::Handler`] for diagnostics, and appending SSA-form textual
//! IR to the buffer as it goes.

mod buffer;
mod types;
mod visitor;

pub use buffer::CodeBuffer;
pub use visitor::Visitor;

/// Lexes, type-checks and emits IR for `program`, returning the finished
/// textual module (fixed preamble, then `globals`, then `body`).
///
/// Every diagnostic path inside the visitor terminates the process through
/// `handler`, so this function either returns a complete module or doesn't
/// return at all.
pub fn compile(program: &mut tinyc_par::Program, handler: &tinyc_util::Handler) -> String {
    let mut visitor = Visitor::new(handler);
    visitor.visit_program(program);
    visitor.into_buffer().render()
}
