//! The lexical units the tokenizer produces.

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// End of the source text.
    Eof,
    /// An identifier: a keyword, a built-in, `pi`, or a variable name.
    Name(String),
    /// A numeric literal, already parsed to the value it denotes.
    Number(f32),
    /// A single-byte punctuation character: one of `(  )  {  }  ,  ;  =  + - * /`.
    Punct(u8),
}
