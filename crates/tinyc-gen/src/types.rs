//! Maps [`tinyc_par::Type`] to the LLVM-IR type spelling used in emitted
//! code. Kept separate from the visitor because every emission site needs
//! it, and it has no state of its own.

use tinyc_par::Type;

/// The LLVM-IR spelling of a built-in type (`i32`, `i8`, `i1`, `i8*`,
/// `void`). `STRING` only ever appears as a `Call` argument type in emitted
/// signatures; the language itself has no string-typed storage.
pub fn llvm_type(ty: Type) -> &'static str {
    match ty {
        Type::Int => "i32",
        Type::Byte => "i8",
        Type::Bool => "i1",
        Type::String => "i8*",
        Type::Void => "void",
    }
}
