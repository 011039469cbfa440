//! Compiler for the micro-shader expression language.
//!
//! A program is one or more function declarations. Each function has a
//! parameter list and a body of assignment statements; the body's final
//! value for each variable is whatever the caller reads back out after
//! [`mshade::call`] returns.
//!
//! ```text
//! function calcCircleArea(area, radius) {
//!     area = pi * sqr(radius);
//! }
//! ```
//!
//! Expressions are built from the four arithmetic operators, parenthesized
//! groups, and a closed set of built-in functions (`sel`, `min`, `max`,
//! `clamp`, `saturate`, `floor`, `ceil`, `abs`, `sqr`, `sqrt`, `pow`, `exp`,
//! `sin`, `cos`, `asin`, `acos`) plus the constant `pi`. There is no
//! control flow, no string or integer type, and no way to call one
//! function from another - see the glossary in the language reference for
//! the full built-in table and the opcode each one lowers to.
//!
//! [`compile`] is the only entry point; it turns source text directly
//! into a [`mshade::RuntimeImage`] with no intermediate syntax tree.

mod builtins;
mod lexer;
mod parser;
mod token;

use mshade::constants::MAX_SOURCE_BYTES;
use mshade::{LoadError, RuntimeImage};

/// Compiles micro-shader source into a runtime image ready for
/// [`mshade::call`].
///
/// Compilation is all-or-nothing: the first error encountered aborts the
/// load and no partial image is produced.
pub fn compile(source: &str) -> Result<RuntimeImage, LoadError> {
    if source.len() > MAX_SOURCE_BYTES {
        return Err(LoadError::SourceTooLarge);
    }

    let image = parser::Parser::compile(source)?;

    tracing::debug!(
        functions = image.function_count(),
        bytes = image.arena_len(),
        "compiled micro-shader source"
    );

    Ok(image)
}
