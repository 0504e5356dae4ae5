use super::ast::{Instruction, Operand};
use crate::error::{Error, Result};
use crate::isa::{Register, Word};
use crate::lexer::{Lexer, Token, TokenKind};

/// Recursive-descent parser for line-oriented assembly
///
/// ```text
/// program     := (newline | instruction)* EndOfInput
/// instruction := Identifier operand (',' operand)*
/// operand     := Register | Identifier | Integer | '*' operand
/// ```
///
/// Tokens are pulled from the lexer on demand with one token of lookahead.
/// Each call to [`Parser::next_instruction`] yields one statement; the end
/// of the program is reported as [`Error::InputExhausted`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Option<Token<'a>>,
    finished: bool,
}

/// A token that can begin an operand
///
/// Line breaks and end of input end an operand list, so they have no
/// representation here.
enum OperandLead<'a> {
    Register(Token<'a>, Register),
    Identifier(Token<'a>),
    Integer(Token<'a>, Word),
    Asterisk(Token<'a>),
    Comma(Token<'a>),
}

impl<'a> OperandLead<'a> {
    fn classify(token: Token<'a>) -> Option<Self> {
        match token.kind {
            TokenKind::Register(register) => Some(OperandLead::Register(token, register)),
            TokenKind::Identifier => Some(OperandLead::Identifier(token)),
            TokenKind::Integer(value) => Some(OperandLead::Integer(token, value)),
            TokenKind::Asterisk => Some(OperandLead::Asterisk(token)),
            TokenKind::Comma => Some(OperandLead::Comma(token)),
            TokenKind::Newline | TokenKind::EndOfInput => None,
        }
    }
}

impl<'a> Parser<'a> {
    /// Creates a parser over `source`
    pub fn new(filename: &'a str, source: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(filename, source),
            current: None,
            finished: false,
        }
    }

    /// Parses every statement, stopping at the first error
    pub fn parse_all(filename: &'a str, source: &'a str) -> Result<'a, Vec<Instruction<'a>>> {
        Parser::new(filename, source).collect()
    }

    /// Parses the next statement, skipping blank lines
    pub fn next_instruction(&mut self) -> Result<'a, Instruction<'a>> {
        let token = loop {
            let token = self.current()?;
            if token.kind != TokenKind::Newline {
                break token;
            }
            self.advance()?;
        };

        match token.kind {
            TokenKind::EndOfInput => Err(Error::InputExhausted),
            TokenKind::Identifier => {
                self.advance()?;
                let operands = self.operands()?;
                Ok(Instruction::new(token, operands))
            }
            _ => Err(Error::UnexpectedToken {
                token,
                message: "Expected identifier.".to_string(),
            }),
        }
    }

    fn current(&mut self) -> Result<'a, Token<'a>> {
        if let Some(token) = self.current {
            return Ok(token);
        }
        let token = self.lexer.next_token()?;
        self.current = Some(token);
        Ok(token)
    }

    /// Moves past the current token; `EndOfInput` is never moved past
    fn advance(&mut self) -> Result<'a, ()> {
        if self.current()?.kind == TokenKind::EndOfInput {
            return Ok(());
        }
        self.current = Some(self.lexer.next_token()?);
        Ok(())
    }

    fn operands(&mut self) -> Result<'a, Vec<Operand<'a>>> {
        let mut operands = Vec::new();
        loop {
            let Some(lead) = OperandLead::classify(self.current()?) else {
                return Ok(operands);
            };
            operands.push(self.operand(lead)?);

            if self.current()?.kind != TokenKind::Comma {
                return Ok(operands);
            }
            self.advance()?;
        }
    }

    /// Parses one operand; a run of `*` is gathered in a loop and wrapped
    /// around the innermost operand afterwards
    fn operand(&mut self, lead: OperandLead<'a>) -> Result<'a, Operand<'a>> {
        let mut asterisks = Vec::new();
        let mut lead = lead;
        let innermost = loop {
            match lead {
                OperandLead::Register(token, register) => {
                    self.advance()?;
                    break Operand::Register { token, register };
                }
                OperandLead::Identifier(token) => {
                    self.advance()?;
                    break Operand::Identifier { token };
                }
                OperandLead::Integer(token, value) => {
                    self.advance()?;
                    break Operand::Immediate { token, value };
                }
                OperandLead::Asterisk(asterisk) => {
                    asterisks.push(asterisk);
                    self.advance()?;
                    let next = self.current()?;
                    lead = OperandLead::classify(next).ok_or_else(|| Error::UnexpectedToken {
                        token: next,
                        message: "Expected operand.".to_string(),
                    })?;
                }
                OperandLead::Comma(token) => {
                    return Err(Error::UnexpectedToken {
                        token,
                        message: "Expected operand.".to_string(),
                    })
                }
            }
        };
        Ok(Operand::with_indirection(asterisks, innermost))
    }
}

/// Lazily yields statements until the end of input or the first error
impl<'a> Iterator for Parser<'a> {
    type Item = Result<'a, Instruction<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_instruction() {
            Err(Error::InputExhausted) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
            Ok(instruction) => Some(Ok(instruction)),
        }
    }
}
