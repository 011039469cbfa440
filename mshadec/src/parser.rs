//! Single-pass recursive-descent compiler: tokens go in, bytecode comes
//! out directly. There is no intermediate syntax tree — each grammar
//! production emits its opcodes as it recognizes them and forgets the
//! token as soon as it has done so.
//!
//! Grammar (see the glossary for term definitions):
//!
//! ```text
//! program  := function*
//! function := "function" name "(" (name ("," name)*)? ")" "{" stmt* "}"
//! stmt     := "float" name "=" expr ";"
//!           | name "=" expr ";"
//! expr     := term (("+"|"-"|"*"|"/") term)*
//! term     := "(" expr ")"
//!           | "-" expr
//!           | number
//!           | "pi"
//!           | builtin "(" expr ("," expr)* ")"
//!           | name
//! ```
//!
//! The token stream is a single shared cursor: a production may leave
//! its last-read token sitting in `current` for its caller to inspect
//! without reading past it. This is how a parenthesized group and the
//! statement that contains it can agree on where one ends and the other
//! resumes without either side over-consuming. It is also why unary
//! minus, which recurses into a full `expr` rather than a `term`, binds
//! all the way out to the nearest statement or argument terminator.

use mshade::constants::{MAX_FUNCTIONS, MAX_VARS, STACK_DEPTH};
use mshade::{FunctionDescriptor, LoadError, Opcode, RuntimeImage};

use crate::builtins::{self, PI_NAME};
use crate::lexer::Lexer;
use crate::token::Token;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: u32,
    nest: i32,
    code: Vec<u8>,
    functions: Vec<FunctionDescriptor>,
    scope: Vec<String>,
    stack_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Parser<'a> {
        Parser {
            lexer: Lexer::new(source),
            current: Token::Eof,
            line: 1,
            nest: 0,
            code: Vec::new(),
            functions: Vec::new(),
            scope: Vec::new(),
            stack_depth: 0,
        }
    }

    fn bump(&mut self) -> Result<(), LoadError> {
        self.current = self.lexer.next_token()?;
        self.line = self.lexer.line;
        Ok(())
    }

    fn err_unexpected(&self, what: impl Into<String>) -> LoadError {
        LoadError::UnexpectedToken {
            line: self.line,
            what: what.into(),
        }
    }

    fn declare(&mut self, name: String) -> Result<usize, LoadError> {
        if self.scope.len() >= MAX_VARS {
            return Err(LoadError::TooManyVariables {
                line: self.line,
                limit: MAX_VARS,
            });
        }
        self.scope.push(name);
        Ok(self.scope.len() - 1)
    }

    fn resolve(&self, name: &str) -> Result<usize, LoadError> {
        self.scope
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| LoadError::UnresolvedVariable {
                line: self.line,
                name: name.to_string(),
            })
    }

    fn emit(&mut self, op: Opcode) {
        self.code.push(op.to_byte());
    }

    fn emit_idx(&mut self, op: Opcode, idx: usize) {
        self.code.push(op.to_byte());
        self.code.push(idx as u8);
    }

    fn emit_const(&mut self, value: f32) {
        self.code.push(Opcode::Const.to_byte());
        self.code.extend_from_slice(&value.to_ne_bytes());
    }

    fn emit_push(&mut self) -> Result<(), LoadError> {
        self.emit(Opcode::Push);
        self.stack_depth += 1;
        if self.stack_depth > STACK_DEPTH {
            return Err(LoadError::ExpressionTooDeep {
                line: self.line,
                limit: STACK_DEPTH,
            });
        }
        Ok(())
    }

    fn pop_n(&mut self, n: usize) {
        self.stack_depth -= n;
    }

    /// Parses every `function` declaration in the source and returns the
    /// resulting image.
    pub fn compile(source: &str) -> Result<RuntimeImage, LoadError> {
        let mut parser = Parser::new(source);
        loop {
            parser.bump()?;
            if matches!(parser.current, Token::Eof) {
                break;
            }
            match &parser.current {
                Token::Name(n) if n == "function" => {}
                _ => return Err(parser.err_unexpected("expected `function'")),
            }
            parser.parse_function()?;
        }
        Ok(RuntimeImage::from_parts(parser.functions, parser.code))
    }

    fn parse_function(&mut self) -> Result<(), LoadError> {
        if self.functions.len() >= MAX_FUNCTIONS {
            return Err(LoadError::TooManyFunctions {
                line: self.line,
                limit: MAX_FUNCTIONS,
            });
        }

        self.bump()?;
        let name = match &self.current {
            Token::Name(n) => n.clone(),
            _ => return Err(self.err_unexpected("expected function name")),
        };

        let code_offset = self.code.len();
        self.scope.clear();
        self.stack_depth = 0;

        self.bump()?;
        if !matches!(self.current, Token::Punct(b'(')) {
            return Err(self.err_unexpected("expected `(' in function declaration"));
        }

        let mut count = 0;
        loop {
            self.bump()?;
            if let Token::Punct(b')') = self.current {
                break;
            }
            if let Token::Punct(b',') = self.current {
                if count > 0 {
                    self.bump()?;
                }
            }
            let pname = match &self.current {
                Token::Name(n) => n.clone(),
                _ => return Err(self.err_unexpected("expected parameter name")),
            };
            self.declare(pname)?;
            count += 1;
        }

        self.bump()?;
        if !matches!(self.current, Token::Punct(b'{')) {
            return Err(self.err_unexpected("expected `{' in function declaration"));
        }

        loop {
            self.bump()?;
            if let Token::Punct(b'}') = self.current {
                self.emit(Opcode::Stop);
                break;
            }
            self.parse_stmt()?;
        }

        self.functions.push(FunctionDescriptor::new(name, code_offset));
        Ok(())
    }

    fn parse_stmt(&mut self) -> Result<(), LoadError> {
        let name = match &self.current {
            Token::Name(n) => n.clone(),
            _ => return Err(self.err_unexpected("expected name at start of statement")),
        };

        let idx = if name == "float" {
            self.bump()?;
            let var_name = match &self.current {
                Token::Name(n) => n.clone(),
                _ => return Err(self.err_unexpected("expected variable name in declaration")),
            };
            self.declare(var_name)?
        } else {
            self.resolve(&name)?
        };

        self.bump()?;
        if !matches!(self.current, Token::Punct(b'=')) {
            return Err(self.err_unexpected("expected `=' in statement"));
        }

        self.parse_expr(false)?;
        self.emit_idx(Opcode::Store, idx);
        Ok(())
    }

    /// Parses one expression. `isargs` is true while inside a built-in
    /// call's argument list, where `,` terminates the current argument
    /// instead of being an error and a bare `)` does not count against
    /// the parenthesis-nesting balance.
    fn parse_expr(&mut self, isargs: bool) -> Result<(), LoadError> {
        self.parse_term(isargs)?;

        loop {
            if matches!(self.current, Token::Punct(b',') | Token::Punct(b';')) {
                break;
            }

            self.bump()?;

            match self.current {
                Token::Punct(b',') => {
                    if !isargs {
                        return Err(self.err_unexpected("unexpected `,' outside a function call"));
                    }
                    break;
                }
                Token::Punct(b';') => {
                    if self.nest > 0 {
                        return Err(LoadError::UnbalancedParens { line: self.line });
                    }
                    break;
                }
                Token::Punct(b')') => {
                    if !isargs {
                        self.nest -= 1;
                        if self.nest < 0 {
                            return Err(LoadError::UnbalancedParens { line: self.line });
                        }
                    }
                    break;
                }
                Token::Punct(b'+') => {
                    self.emit_push()?;
                    self.parse_term(isargs)?;
                    self.emit(Opcode::Add);
                    self.pop_n(1);
                }
                Token::Punct(b'-') => {
                    self.emit_push()?;
                    self.parse_term(isargs)?;
                    self.emit(Opcode::Sub);
                    self.pop_n(1);
                }
                Token::Punct(b'*') => {
                    self.emit_push()?;
                    self.parse_term(isargs)?;
                    self.emit(Opcode::Mul);
                    self.pop_n(1);
                }
                Token::Punct(b'/') => {
                    self.emit_push()?;
                    self.parse_term(isargs)?;
                    self.emit(Opcode::Div);
                    self.pop_n(1);
                }
                _ => return Err(self.err_unexpected("expected an operator or end of expression")),
            }
        }

        Ok(())
    }

    fn parse_term(&mut self, isargs: bool) -> Result<(), LoadError> {
        self.bump()?;

        match self.current.clone() {
            Token::Punct(b'(') => {
                self.nest += 1;
                self.parse_expr(false)?;
            }

            Token::Punct(b'-') => {
                self.emit_const(0.0);
                self.emit_push()?;
                self.parse_expr(isargs)?;
                self.emit(Opcode::Sub);
                self.pop_n(1);
            }

            Token::Punct(p) => {
                return Err(self.err_unexpected(format!("unexpected token `{}'", p as char)));
            }

            Token::Name(name) => {
                if let Some(builtin) = builtins::lookup(&name) {
                    self.bump()?;
                    if !matches!(self.current, Token::Punct(b'(')) {
                        return Err(self.err_unexpected(format!("`{}' used as a variable", name)));
                    }
                    for _ in 0..builtin.arity - 1 {
                        self.parse_expr(true)?;
                        self.emit_push()?;
                    }
                    self.parse_expr(true)?;
                    self.emit(builtin.opcode);
                    self.pop_n((builtin.arity - 1) as usize);
                } else if name == PI_NAME {
                    self.emit_const(std::f32::consts::PI);
                } else {
                    let idx = self.resolve(&name)?;
                    self.emit_idx(Opcode::Load, idx);
                }
            }

            Token::Number(value) => {
                self.emit_const(value);
            }

            Token::Eof => {
                return Err(self.err_unexpected("unexpected end of file in expression"));
            }
        }

        Ok(())
    }
}
