//! Binary operator precedence.
//!
//! Every binary operator level is parsed by the same loop, see
//! [`Parser::parse_binary`][crate::grammar::Parser]. This table is what makes
//! each level different.

use parser::lexer::{Operator, Reserved, TokenKind};

/// The binary operator levels, loosest first.
///
/// `not` sits between [`And`][Precedence::And] and
/// [`Comparison`][Precedence::Comparison], but it's a prefix operator so it's
/// not in here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Or,
    And,
    Comparison,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Additive,
    Multiplicative,
}

impl Precedence {
    /// The loosest level, which all binary expressions start at.
    pub const LOOSEST: Precedence = Precedence::Or;

    /// The level whose expressions are the operands at this level, if it's
    /// not the tightest.
    pub fn tighter(self) -> Option<Precedence> {
        use Precedence::*;

        match self {
            Or => Some(And),
            And => Some(Comparison),
            Comparison => Some(BitOr),
            BitOr => Some(BitXor),
            BitXor => Some(BitAnd),
            BitAnd => Some(Shift),
            Shift => Some(Additive),
            Additive => Some(Multiplicative),
            Multiplicative => None,
        }
    }

    /// If `current` starts an operator at this level, the number of tokens in
    /// the operator. `next` is the token after `current`, which matters for
    /// `not in` and `is not`.
    pub fn operator(
        self,
        current: Option<TokenKind>,
        next: Option<TokenKind>,
    ) -> Option<usize> {
        use Operator::*;
        use TokenKind::{Operator as Op, Reserved as Word};

        let current = current?;

        let found = match self {
            Precedence::Or => current == Word(Reserved::Or),
            Precedence::And => current == Word(Reserved::And),
            Precedence::Comparison => {
                return comparison(current, next);
            }
            Precedence::BitOr => current == Op(Pipe),
            Precedence::BitXor => current == Op(Caret),
            Precedence::BitAnd => current == Op(Ampersand),
            Precedence::Shift => {
                matches!(current, Op(LessLess) | Op(GreaterGreater))
            }
            Precedence::Additive => matches!(current, Op(Plus) | Op(Minus)),
            Precedence::Multiplicative => {
                matches!(current, Op(Star) | Op(Slash) | Op(SlashSlash) | Op(Percent))
            }
        };

        found.then(|| 1)
    }
}

fn comparison(current: TokenKind, next: Option<TokenKind>) -> Option<usize> {
    use Operator::*;
    use TokenKind::{Operator as Op, Reserved as Word};

    match (current, next) {
        (Word(Reserved::Not), Some(Word(Reserved::In))) => Some(2),
        (Word(Reserved::Not), _) => None,
        (Word(Reserved::Is), Some(Word(Reserved::Not))) => Some(2),
        (Word(Reserved::Is), _) | (Word(Reserved::In), _) => Some(1),
        (
            Op(Less) | Op(Greater) | Op(EqualEqual) | Op(BangEqual)
            | Op(LessEqual) | Op(GreaterEqual),
            _,
        ) => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOT: TokenKind = TokenKind::Reserved(Reserved::Not);
    const IN: TokenKind = TokenKind::Reserved(Reserved::In);
    const IS: TokenKind = TokenKind::Reserved(Reserved::Is);

    #[test]
    fn ladder_ends() {
        let mut level = Precedence::LOOSEST;
        let mut count = 1;
        while let Some(next) = level.tighter() {
            assert!(next > level);
            level = next;
            count += 1;
        }
        assert_eq!(count, 9);
        assert_eq!(level, Precedence::Multiplicative);
    }

    #[test]
    fn multi_token_comparisons() {
        let c = Precedence::Comparison;
        assert_eq!(c.operator(Some(NOT), Some(IN)), Some(2));
        assert_eq!(c.operator(Some(NOT), None), None);
        assert_eq!(c.operator(Some(IS), Some(NOT)), Some(2));
        assert_eq!(c.operator(Some(IS), None), Some(1));
        assert_eq!(c.operator(Some(IN), None), Some(1));
    }

    #[test]
    fn operators_belong_to_one_level() {
        let star = Some(TokenKind::Operator(Operator::Star));
        assert_eq!(Precedence::Multiplicative.operator(star, None), Some(1));
        assert_eq!(Precedence::Additive.operator(star, None), None);
        assert_eq!(Precedence::Or.operator(None, None), None);
    }
}
