use std::fmt;

use crate::isa::{Register, Word};
use crate::lexer::Token;

/// A parsed operand
///
/// Pointers own their pointee and may nest to any depth; lowering decides
/// which shapes an instruction accepts. Walking, comparing, formatting and
/// dropping a pointer chain all run in constant stack space.
pub enum Operand<'a> {
    /// Register name, e.g. `A`
    Register {
        /// Source token
        token: Token<'a>,
        /// Register the token names
        register: Register,
    },
    /// Bare identifier
    Identifier {
        /// Source token
        token: Token<'a>,
    },
    /// Integer literal
    Immediate {
        /// Source token
        token: Token<'a>,
        /// Literal value
        value: Word,
    },
    /// `*operand`
    Pointer {
        /// The `*` token
        asterisk: Token<'a>,
        /// What is pointed through
        pointee: Box<Operand<'a>>,
    },
}

impl<'a> Operand<'a> {
    /// Wraps `innermost` in one pointer per asterisk
    ///
    /// `asterisks` are in source order, so the first one becomes the
    /// outermost pointer.
    pub fn with_indirection(asterisks: Vec<Token<'a>>, innermost: Operand<'a>) -> Self {
        asterisks
            .into_iter()
            .rev()
            .fold(innermost, |pointee, asterisk| Operand::Pointer {
                asterisk,
                pointee: Box::new(pointee),
            })
    }

    /// First token of the operand
    pub fn token(&self) -> Token<'a> {
        match self {
            Operand::Register { token, .. }
            | Operand::Identifier { token }
            | Operand::Immediate { token, .. } => *token,
            Operand::Pointer { asterisk, .. } => *asterisk,
        }
    }

    /// The operand under every `*` level
    pub fn innermost(&self) -> &Operand<'a> {
        let mut current = self;
        while let Operand::Pointer { pointee, .. } = current {
            current = pointee;
        }
        current
    }

    /// Number of `*` levels wrapping the innermost operand
    pub fn indirection_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Operand::Pointer { pointee, .. } = current {
            depth += 1;
            current = pointee;
        }
        depth
    }
}

impl Drop for Operand<'_> {
    fn drop(&mut self) {
        let Operand::Pointer { asterisk, pointee } = self else {
            return;
        };
        // Detach one level at a time so each dropped box holds a leaf
        let mut next = std::mem::replace(
            pointee.as_mut(),
            Operand::Identifier { token: *asterisk },
        );
        while let Operand::Pointer { asterisk, pointee } = &mut next {
            let inner = std::mem::replace(
                pointee.as_mut(),
                Operand::Identifier { token: *asterisk },
            );
            next = inner;
        }
    }
}

impl Clone for Operand<'_> {
    fn clone(&self) -> Self {
        let mut asterisks = Vec::new();
        let mut current = self;
        let innermost = loop {
            match current {
                Operand::Pointer { asterisk, pointee } => {
                    asterisks.push(*asterisk);
                    current = pointee;
                }
                Operand::Register { token, register } => {
                    break Operand::Register {
                        token: *token,
                        register: *register,
                    }
                }
                Operand::Identifier { token } => break Operand::Identifier { token: *token },
                Operand::Immediate { token, value } => {
                    break Operand::Immediate {
                        token: *token,
                        value: *value,
                    }
                }
            }
        };
        Operand::with_indirection(asterisks, innermost)
    }
}

impl PartialEq for Operand<'_> {
    fn eq(&self, other: &Self) -> bool {
        let (mut lhs, mut rhs) = (self, other);
        loop {
            match (lhs, rhs) {
                (
                    Operand::Pointer {
                        asterisk: a,
                        pointee: p,
                    },
                    Operand::Pointer {
                        asterisk: b,
                        pointee: q,
                    },
                ) => {
                    if a != b {
                        return false;
                    }
                    lhs = p;
                    rhs = q;
                }
                (
                    Operand::Register {
                        token: a,
                        register: r,
                    },
                    Operand::Register {
                        token: b,
                        register: s,
                    },
                ) => return a == b && r == s,
                (Operand::Identifier { token: a }, Operand::Identifier { token: b }) => {
                    return a == b
                }
                (
                    Operand::Immediate { token: a, value: v },
                    Operand::Immediate { token: b, value: w },
                ) => return a == b && v == w,
                _ => return false,
            }
        }
    }
}

impl Eq for Operand<'_> {}

impl fmt::Debug for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut depth = 0;
        let mut current = self;
        loop {
            match current {
                Operand::Pointer { asterisk, pointee } => {
                    write!(f, "Pointer {{ asterisk: {:?}, pointee: ", asterisk)?;
                    depth += 1;
                    current = pointee;
                }
                Operand::Register { token, register } => {
                    f.debug_struct("Register")
                        .field("token", token)
                        .field("register", register)
                        .finish()?;
                    break;
                }
                Operand::Identifier { token } => {
                    f.debug_struct("Identifier").field("token", token).finish()?;
                    break;
                }
                Operand::Immediate { token, value } => {
                    f.debug_struct("Immediate")
                        .field("token", token)
                        .field("value", value)
                        .finish()?;
                    break;
                }
            }
        }
        for _ in 0..depth {
            f.write_str(" }")?;
        }
        Ok(())
    }
}

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for _ in 0..self.indirection_depth() {
            f.write_str("*")?;
        }
        f.write_str(self.innermost().token().lexeme())
    }
}

/// One parsed statement: a mnemonic and its operands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction<'a> {
    /// The mnemonic identifier
    pub mnemonic: Token<'a>,
    /// Operands in source order
    pub operands: Vec<Operand<'a>>,
}

impl<'a> Instruction<'a> {
    /// Creates an instruction node
    pub fn new(mnemonic: Token<'a>, operands: Vec<Operand<'a>>) -> Self {
        Instruction { mnemonic, operands }
    }

    /// The mnemonic text
    pub fn mnemonic_name(&self) -> &'a str {
        self.mnemonic.lexeme()
    }
}

impl fmt::Display for Instruction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.mnemonic_name())?;
        for (index, operand) in self.operands.iter().enumerate() {
            let separator = if index == 0 { " " } else { ", " };
            write!(f, "{}{}", separator, operand)?;
        }
        Ok(())
    }
}
