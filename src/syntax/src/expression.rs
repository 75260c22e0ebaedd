//! Expressions.
//!
//! The binary operators are all handled by [`Parser::parse_binary`], which
//! gets its operators from [`Precedence`]. Everything else has its own
//! method.
//!
//! Most of the interesting work here is deciding what something is after
//! having already parsed part of it. Collections only know what they are
//! after their first element, and a name only knows if it's an assignment
//! target once we've seen what follows it. In both cases we either wrap what
//! we have with [`precede`][parser::CompletedMarker::precede], or roll back
//! and parse it again knowing more.

use parser::lexer::{Operator, Reserved, TokenKind};
use parser::{CompletedMarker, Marker};

use crate::grammar::{
    Parser, EXPECTED_EXPRESSION, LBRACE, LBRACKET, LPAR, RBRACE, RBRACKET, RPAR,
};
use crate::kind::NodeKind;
use crate::precedence::Precedence;

// Entry points used by statements.
impl Parser<'_> {
    pub(crate) fn parse_single(&mut self, is_target: bool) -> bool {
        self.parse_test(is_target)
    }

    pub(crate) fn parse_expression_optional(&mut self) -> bool {
        self.parse_tuple(false, false)
    }

    pub(crate) fn parse_expression(&mut self) {
        if !self.parse_expression_optional() {
            self.b.error(EXPECTED_EXPRESSION);
        }
    }

    pub(crate) fn parse_target_expression(&mut self) {
        if !self.parse_tuple(true, false) {
            self.b.error(EXPECTED_EXPRESSION);
        }
    }
}

// Primary expressions
impl Parser<'_> {
    fn parse_primary(&mut self, is_target: bool) -> bool {
        let kind = match self.b.current() {
            Some(kind) => kind,
            None => return false,
        };

        match kind {
            TokenKind::Identifier if is_target => {
                self.token_node(NodeKind::TargetExpression)
            }
            TokenKind::Identifier => {
                self.token_node(NodeKind::ReferenceExpression)
            }
            TokenKind::Int => self.token_node(NodeKind::IntegerLiteralExpression),
            TokenKind::Float => self.token_node(NodeKind::FloatLiteralExpression),
            TokenKind::String | TokenKind::Bytes => {
                self.token_node(NodeKind::StringLiteralExpression)
            }
            LPAR | LBRACKET | LBRACE => return self.parse_display(kind, is_target),
            _ => return false,
        }

        true
    }

    /// Anything in brackets. Displays can hold comprehensions, which hold
    /// more displays, so this is where nesting is counted.
    fn parse_display(&mut self, open: TokenKind, is_target: bool) -> bool {
        self.depth_track(|p| {
            match open {
                LPAR => p.parse_parenthesized(is_target),
                LBRACKET => p.parse_list_literal(is_target),
                _ => p.parse_dict_display(),
            }
            true
        })
    }

    fn parse_list_literal(&mut self, is_target: bool) {
        self.assert_at(LBRACKET);
        let expr = self.b.mark();
        self.b.advance();

        if self.b.matches(RBRACKET) {
            expr.done(&mut self.b, NodeKind::ListLiteralExpression).keep();
            return;
        }

        if !self.parse_single(is_target) {
            self.b.error(EXPECTED_EXPRESSION);
        }

        if self.at_word(Reserved::For) {
            self.parse_comprehension(
                expr,
                Some(RBRACKET),
                NodeKind::ListCompExpression,
            );
            return;
        }

        while !self.b.at(RBRACKET) {
            if !self.b.matches(TokenKind::Comma) {
                self.b.error("expected ']' or ','");
            }
            if self.b.at(RBRACKET) {
                break;
            }
            if !self.parse_single(is_target) {
                self.b.error("expected an expression, ',' or ']'");
                break;
            }
        }

        self.b.check_matches(RBRACKET, "expected ']'");
        expr.done(&mut self.b, NodeKind::ListLiteralExpression).keep();
    }

    /// Parse the `for` and `if` clauses of a comprehension, then complete
    /// `expr` as `kind`.
    ///
    /// With no `end` the comprehension isn't closed here. That's for
    /// generators which are the only argument to a call, like
    /// `any(x for x in y)`.
    fn parse_comprehension(
        &mut self,
        expr: Marker,
        end: Option<TokenKind>,
        kind: NodeKind,
    ) {
        self.assert_at(TokenKind::Reserved(Reserved::For));

        loop {
            self.b.advance();
            self.parse_star_targets();
            self.parse_comprehension_range(kind == NodeKind::GeneratorExpression);

            while self.at_word(Reserved::If) {
                self.b.advance();
                if !self.parse_old_test(false) {
                    self.b.error(EXPECTED_EXPRESSION);
                }
            }

            if self.at_word(Reserved::For) {
                continue;
            }

            if let Some(end) = end {
                if !self.b.matches(end) {
                    self.b.error(format!("expected 'for' or '{}'", end.name()));
                }
            }

            break;
        }

        expr.done(&mut self.b, kind).keep();
    }

    /// The targets of a `for`, which are a tuple if there's a comma.
    pub(crate) fn parse_star_targets(&mut self) {
        let expr = self.b.mark();

        if !self.parse_star_expression(true) {
            self.b.error(EXPECTED_EXPRESSION);
            expr.drop(&mut self.b);
            return;
        }

        if !self.b.at(TokenKind::Comma) {
            expr.drop(&mut self.b);
            return;
        }

        while self.b.matches(TokenKind::Comma) {
            let item = self.b.mark();
            if !self.parse_star_expression(true) {
                item.rollback_to(&mut self.b);
                break;
            }
            item.drop(&mut self.b);
        }

        expr.done(&mut self.b, NodeKind::TupleExpression).keep();
    }

    fn parse_comprehension_range(&mut self, generator: bool) {
        self.b
            .check_matches(TokenKind::Reserved(Reserved::In), "expected 'in'");

        let found = if generator {
            self.parse_or_test(false)
        } else {
            self.parse_tuple(false, true)
        };

        if !found {
            self.b.error(EXPECTED_EXPRESSION);
        }
    }

    fn parse_parenthesized(&mut self, is_target: bool) {
        self.assert_at(LPAR);
        let expr = self.b.mark();
        self.b.advance();

        if self.b.matches(RPAR) {
            expr.done(&mut self.b, NodeKind::TupleExpression).keep();
            return;
        }

        self.parse_tuple(is_target, false);

        if self.at_word(Reserved::For) {
            self.parse_comprehension(
                expr,
                Some(RPAR),
                NodeKind::GeneratorExpression,
            );
            return;
        }

        let junk = self.b.mark();
        let mut empty = true;
        while !self.b.eof() && !self.b.at_any(&[RPAR, TokenKind::StatementBreak])
        {
            self.b.advance();
            empty = false;
        }

        if empty {
            junk.drop(&mut self.b);
        } else {
            junk.error(&mut self.b, "unexpected expression syntax").keep();
        }

        self.b.check_matches(RPAR, "expected ')'");
        expr.done(&mut self.b, NodeKind::ParenthesizedExpression).keep();
    }
}

// Dictionaries and sets
impl Parser<'_> {
    fn parse_dict_display(&mut self) {
        self.assert_at(LBRACE);
        let expr = self.b.mark();
        self.b.advance();

        if self.b.matches(RBRACE) {
            expr.done(&mut self.b, NodeKind::DictLiteralExpression).keep();
            return;
        }

        if self.at_operator(Operator::StarStar) {
            if !self.parse_double_star() {
                self.b.error(EXPECTED_EXPRESSION);
                expr.done(&mut self.b, NodeKind::DictLiteralExpression).keep();
                return;
            }
            self.parse_dict_content_tail(expr);
            return;
        }

        // The first element is parsed before we know if it's a key. If it
        // is, its marker becomes the key-value pair.
        let first = self.b.mark();
        if !self.parse_single(false) {
            self.b.error(EXPECTED_EXPRESSION);
            first.drop(&mut self.b);
            expr.done(&mut self.b, NodeKind::DictLiteralExpression).keep();
            return;
        }

        if self.b.matches(TokenKind::Colon) {
            self.parse_dict_tail(expr, first);
        } else {
            first.drop(&mut self.b);
            self.parse_set_tail(expr);
        }
    }

    fn parse_dict_tail(&mut self, expr: Marker, first: Marker) {
        if !self.parse_single(false) {
            self.b.error(EXPECTED_EXPRESSION);
            first.done(&mut self.b, NodeKind::KeyValueExpression).keep();
            self.b.matches(RBRACE);
            expr.done(&mut self.b, NodeKind::DictLiteralExpression).keep();
            return;
        }

        first.done(&mut self.b, NodeKind::KeyValueExpression).keep();

        if self.at_word(Reserved::For) {
            self.parse_comprehension(
                expr,
                Some(RBRACE),
                NodeKind::DictCompExpression,
            );
        } else {
            self.parse_dict_content_tail(expr);
        }
    }

    fn parse_dict_content_tail(&mut self, expr: Marker) {
        while !self.b.at(RBRACE) {
            self.b.check_matches(TokenKind::Comma, "expected ','");

            let found = if self.at_operator(Operator::StarStar) {
                self.parse_double_star()
            } else {
                self.parse_key_value()
            };

            if !found {
                break;
            }
        }

        self.b.check_matches(RBRACE, "expected '}'");
        expr.done(&mut self.b, NodeKind::DictLiteralExpression).keep();
    }

    fn parse_key_value(&mut self) -> bool {
        let pair = self.b.mark();
        if !self.parse_single(false) {
            pair.drop(&mut self.b);
            return false;
        }

        self.b.check_matches(TokenKind::Colon, "expected ':'");

        if !self.parse_single(false) {
            self.b.error("expected a value");
            pair.drop(&mut self.b);
            return false;
        }

        pair.done(&mut self.b, NodeKind::KeyValueExpression).keep();
        true
    }

    /// Sets share the dictionary's braces and node kinds, they're told apart
    /// by not having key-value pairs.
    fn parse_set_tail(&mut self, expr: Marker) {
        if self.at_word(Reserved::For) {
            self.parse_comprehension(
                expr,
                Some(RBRACE),
                NodeKind::DictCompExpression,
            );
            return;
        }

        while !self.b.at(RBRACE) {
            if !self.b.matches(TokenKind::Comma) {
                self.b.error("expected '}' or ','");
            }
            if self.b.at(RBRACE) {
                break;
            }
            if !self.parse_single(false) {
                self.b.error("expected an expression, ',' or '}'");
                break;
            }
        }

        self.b.check_matches(RBRACE, "expected '}'");
        expr.done(&mut self.b, NodeKind::DictLiteralExpression).keep();
    }
}

// Members, calls and subscripts
impl Parser<'_> {
    /// A primary expression followed by any number of `.name`, calls and
    /// subscripts.
    ///
    /// When `is_target` is set, only the last link of the chain is a target.
    /// Since we can't know which link is last until we're past it, the chain
    /// is parsed again whenever we find out a name we made a target isn't
    /// one. Subscripts are never targets, so once we've seen one we parse
    /// the whole chain as references.
    fn parse_member(&mut self, is_target: bool) -> bool {
        let mut recast_first = false;
        let mut recast_qualifiers = false;

        loop {
            let first_is_target = is_target && !recast_first;
            let mut expr = self.b.mark();

            if !self.parse_primary(first_is_target) {
                expr.drop(&mut self.b);
                return false;
            }

            let mut again = false;

            loop {
                match self.b.current() {
                    Some(TokenKind::Dot) => {
                        if first_is_target {
                            again = true;
                            expr.rollback_to(&mut self.b);
                            break;
                        }

                        self.b.advance();
                        self.b
                            .check_matches(TokenKind::Identifier, "expected a name");

                        let last = !self.b.at_any(&[TokenKind::Dot, LPAR, LBRACKET]);
                        let kind = if is_target && !recast_qualifiers && last {
                            NodeKind::TargetExpression
                        } else {
                            NodeKind::ReferenceExpression
                        };

                        expr = expr.done(&mut self.b, kind).precede(&mut self.b);
                    }

                    Some(LPAR) => {
                        // Arguments can be generators, which hold more calls.
                        self.depth_track(|p| {
                            p.parse_argument_list();
                            true
                        });
                        expr = expr
                            .done(&mut self.b, NodeKind::CallExpression)
                            .precede(&mut self.b);
                    }

                    Some(LBRACKET) => {
                        self.b.advance();
                        let done = self.parse_slice_or_subscription(expr);

                        if is_target && !recast_qualifiers {
                            recast_qualifiers = true;
                            again = true;
                            done.rollback_to(&mut self.b);
                            break;
                        }

                        expr = done.precede(&mut self.b);
                    }

                    _ => {
                        expr.drop(&mut self.b);
                        break;
                    }
                }
            }

            if !again {
                return true;
            }

            recast_first = true;
        }
    }

    /// The inside of `[...]` after an expression. The `[` is already
    /// consumed.
    ///
    /// This is a slice if any item has a colon, otherwise it's a subscript.
    fn parse_slice_or_subscription(&mut self, expr: Marker) -> CompletedMarker {
        if !self.at_slice() {
            if !self.parse_tuple(false, false) {
                self.b.error(EXPECTED_EXPRESSION);
            }
            self.b.check_matches(RBRACKET, "expected ']'");
            return expr.done(&mut self.b, NodeKind::SubscriptionExpression);
        }

        let item = self.b.mark();

        if self.b.at(TokenKind::Colon) {
            self.empty_node(NodeKind::EmptyExpression);
        } else if !self.parse_single(false) {
            self.b.error(EXPECTED_EXPRESSION);
        }

        if self.b.at(TokenKind::Colon) {
            return self.parse_slice_end(expr, item);
        }

        // The colon is in a later item.
        item.done(&mut self.b, NodeKind::SliceItem).keep();
        if !self.b.at_any(&[RBRACKET, TokenKind::Comma]) {
            self.b.error("expected ']' or ','");
        }

        self.parse_slice_list_tail();
        expr.done(&mut self.b, NodeKind::SliceExpression)
    }

    /// Look ahead to the closing `]` for a colon which makes this a slice.
    ///
    /// Colons in nested brackets and lambdas don't count. Deciding here means
    /// the items are only parsed once, so nested subscripts stay linear.
    fn at_slice(&self) -> bool {
        let mut depth = 0usize;
        let mut lambdas = 0usize;
        let mut n = 0;

        loop {
            match self.b.nth(n) {
                None | Some(TokenKind::StatementBreak) => return false,
                Some(TokenKind::Open(_)) => depth += 1,
                Some(TokenKind::Close(_)) if depth == 0 => return false,
                Some(TokenKind::Close(_)) => depth -= 1,
                Some(TokenKind::Reserved(Reserved::Lambda)) if depth == 0 => {
                    lambdas += 1
                }
                Some(TokenKind::Colon) if depth == 0 && lambdas > 0 => {
                    lambdas -= 1
                }
                Some(TokenKind::Colon) if depth == 0 => return true,
                Some(_) => {}
            }
            n += 1;
        }
    }

    /// The rest of a slice item after its start. We're at the first colon.
    fn parse_slice_end(&mut self, expr: Marker, item: Marker) -> CompletedMarker {
        self.b.advance();

        if self.b.at(RBRACKET) {
            self.empty_node(NodeKind::EmptyExpression);
            item.done(&mut self.b, NodeKind::SliceItem).keep();
            self.b.advance();
            return expr.done(&mut self.b, NodeKind::SliceExpression);
        }

        if self.b.at(TokenKind::Colon) {
            self.empty_node(NodeKind::EmptyExpression);
        } else {
            self.parse_single(false);
        }

        if !self.b.at_any(&[RBRACKET, TokenKind::Colon, TokenKind::Comma]) {
            self.b.error("expected ':' or ']'");
        }

        if self.b.matches(TokenKind::Colon) {
            self.parse_single(false);
        }

        item.done(&mut self.b, NodeKind::SliceItem).keep();

        if !self.b.at_any(&[RBRACKET, TokenKind::Comma]) {
            self.b.error("expected ']' or ','");
        }

        self.parse_slice_list_tail();
        expr.done(&mut self.b, NodeKind::SliceExpression)
    }

    /// Any more comma separated slice items, and the closing `]`.
    fn parse_slice_list_tail(&mut self) {
        while self.b.matches(TokenKind::Comma) {
            if self.b.at(RBRACKET) {
                break;
            }

            let item = self.b.mark();
            let found = self.parse_test(false);

            if self.b.matches(TokenKind::Colon) {
                self.parse_test(false);
                if self.b.matches(TokenKind::Colon) {
                    self.parse_test(false);
                }
            } else if !found {
                self.b.error(EXPECTED_EXPRESSION);
            }

            item.done(&mut self.b, NodeKind::SliceItem).keep();

            if !self.b.at_any(&[RBRACKET, TokenKind::Comma]) {
                self.b.error("expected ']' or ','");
                break;
            }
        }

        self.b.check_matches(RBRACKET, "expected ']'");
    }

    fn parse_argument_list(&mut self) {
        self.assert_at(LPAR);
        let list = self.b.mark();
        self.b.advance();

        let mut count = 0;
        while !self.b.at(RPAR) {
            count += 1;

            if count > 1 {
                if !self.b.matches(TokenKind::Comma) {
                    self.b.error("expected ',' or ')'");
                    break;
                }
                if self.b.at(RPAR) {
                    break;
                }
            }

            if self.at_operator(Operator::Star) || self.at_operator(Operator::StarStar) {
                let argument = self.b.mark();
                self.b.advance();
                if !self.parse_single(false) {
                    self.b.error(EXPECTED_EXPRESSION);
                }
                argument
                    .done(&mut self.b, NodeKind::StarArgumentExpression)
                    .keep();
                continue;
            }

            if self.b.at(TokenKind::Identifier) {
                let named = self.b.mark();
                self.b.advance();
                if self.b.matches(TokenKind::Equals) {
                    if !self.parse_single(false) {
                        self.b.error(EXPECTED_EXPRESSION);
                    }
                    named
                        .done(&mut self.b, NodeKind::NamedArgumentExpression)
                        .keep();
                    continue;
                }
                named.rollback_to(&mut self.b);
            }

            let argument = self.b.mark();
            let generator = self.b.mark();

            if !self.parse_single(false) {
                argument.rollback_to(&mut self.b);
                break;
            }

            if count == 1 && self.at_word(Reserved::For) {
                self.parse_comprehension(
                    generator,
                    None,
                    NodeKind::GeneratorExpression,
                );
            } else {
                generator.drop(&mut self.b);
            }

            argument.done(&mut self.b, NodeKind::ArgumentExpression).keep();
        }

        self.b.check_matches(RPAR, "expected ')'");
        list.done(&mut self.b, NodeKind::ArgumentList).keep();
    }
}

// Tuples, tests and lambdas
impl Parser<'_> {
    /// Comma separated expressions, which are only a tuple if there's a
    /// comma. A trailing comma is allowed.
    ///
    /// With `old_test` set the items can't be conditional expressions, so a
    /// following `if` is left alone. That's what comprehension ranges need.
    pub(crate) fn parse_tuple(&mut self, is_target: bool, old_test: bool) -> bool {
        let expr = self.b.mark();

        if !self.parse_tuple_item(is_target, old_test) {
            expr.drop(&mut self.b);
            return false;
        }

        if !self.b.at(TokenKind::Comma) {
            expr.drop(&mut self.b);
            return true;
        }

        while self.b.matches(TokenKind::Comma) {
            let item = self.b.mark();
            if !self.parse_tuple_item(is_target, old_test) {
                item.rollback_to(&mut self.b);
                break;
            }
            item.drop(&mut self.b);
        }

        expr.done(&mut self.b, NodeKind::TupleExpression).keep();
        true
    }

    fn parse_tuple_item(&mut self, is_target: bool, old_test: bool) -> bool {
        if old_test {
            self.parse_old_test(true)
        } else {
            self.parse_test(is_target)
        }
    }

    /// A full expression, including lambdas and `a if b else c`.
    pub(crate) fn parse_test(&mut self, is_target: bool) -> bool {
        self.depth_track(|p| p.parse_conditional(is_target))
    }

    fn parse_conditional(&mut self, is_target: bool) -> bool {
        if self.at_word(Reserved::Lambda) {
            return self.parse_lambda(false);
        }

        let expr = self.b.mark();
        if !self.parse_or_test(is_target) {
            expr.drop(&mut self.b);
            return false;
        }

        if !self.at_word(Reserved::If) {
            expr.drop(&mut self.b);
            return true;
        }

        let condition = self.b.mark();
        self.b.advance();

        if !self.parse_or_test(is_target) {
            self.b.error(EXPECTED_EXPRESSION);
        } else if self.at_word(Reserved::Else) {
            self.b.advance();
            if !self.parse_test(is_target) {
                self.b.error(EXPECTED_EXPRESSION);
            }
        } else if self.b.at(TokenKind::Colon) {
            // Really the start of an `if` statement, after an unclosed
            // bracket or a missing line break.
            condition.rollback_to(&mut self.b);
            expr.drop(&mut self.b);
            return true;
        } else {
            self.b.error("expected 'else'");
        }

        condition.drop(&mut self.b);
        expr.done(&mut self.b, NodeKind::ConditionalExpression).keep();
        true
    }

    fn parse_old_test(&mut self, old_test: bool) -> bool {
        if self.at_word(Reserved::Lambda) {
            self.parse_lambda(old_test)
        } else {
            self.parse_or_test(false)
        }
    }

    fn parse_lambda(&mut self, old_test: bool) -> bool {
        self.assert_at(TokenKind::Reserved(Reserved::Lambda));
        let expr = self.b.mark();
        self.b.advance();

        self.parse_parameter_list_contents(TokenKind::Colon, false);
        self.b.check_matches(TokenKind::Colon, "expected ':'");

        let found = if old_test {
            self.parse_old_test(true)
        } else {
            self.parse_single(false)
        };

        if !found {
            self.b.error(EXPECTED_EXPRESSION);
        }

        expr.done(&mut self.b, NodeKind::LambdaExpression).keep();
        true
    }
}

// Operators
impl Parser<'_> {
    pub(crate) fn parse_or_test(&mut self, is_target: bool) -> bool {
        self.parse_binary(Precedence::LOOSEST, is_target)
    }

    /// One level of left-associative binary operators.
    ///
    /// Each time an operator is found, what we have so far becomes the left
    /// side of a new binary expression.
    fn parse_binary(&mut self, level: Precedence, is_target: bool) -> bool {
        let mut expr = self.b.mark();

        if !self.parse_operand(level, is_target, true) {
            expr.drop(&mut self.b);
            return false;
        }

        while let Some(n) = level.operator(self.b.current(), self.b.nth(1)) {
            for _ in 0..n {
                self.b.advance();
            }

            if !self.parse_operand(level, is_target, false) {
                self.b.error(EXPECTED_EXPRESSION);
            }

            expr = expr
                .done(&mut self.b, NodeKind::BinaryExpression)
                .precede(&mut self.b);
        }

        expr.drop(&mut self.b);
        true
    }

    fn parse_operand(&mut self, level: Precedence, is_target: bool, left: bool) -> bool {
        match level {
            Precedence::And => self.parse_not(is_target),
            Precedence::Comparison if left => self.parse_star_expression(is_target),
            _ => match level.tighter() {
                Some(tighter) => self.parse_binary(tighter, is_target),
                None => self.parse_unary(is_target),
            },
        }
    }

    fn parse_not(&mut self, is_target: bool) -> bool {
        if !self.at_word(Reserved::Not) {
            return self.parse_binary(Precedence::Comparison, is_target);
        }

        self.depth_track(|p| {
            let expr = p.b.mark();
            p.b.advance();
            if !p.parse_not(is_target) {
                p.b.error(EXPECTED_EXPRESSION);
            }
            expr.done(&mut p.b, NodeKind::PrefixExpression).keep();
            true
        })
    }

    fn parse_star_expression(&mut self, is_target: bool) -> bool {
        if !self.at_operator(Operator::Star) {
            return self.parse_binary(Precedence::BitOr, is_target);
        }

        let expr = self.b.mark();
        self.b.advance();

        if !self.parse_binary(Precedence::BitOr, is_target) {
            self.b.error(EXPECTED_EXPRESSION);
            expr.drop(&mut self.b);
            return false;
        }

        expr.done(&mut self.b, NodeKind::StarExpression).keep();
        true
    }

    fn parse_double_star(&mut self) -> bool {
        if !self.at_operator(Operator::StarStar) {
            return self.parse_binary(Precedence::BitOr, false);
        }

        let expr = self.b.mark();
        self.b.advance();

        if !self.parse_binary(Precedence::BitOr, false) {
            self.b.error(EXPECTED_EXPRESSION);
            expr.drop(&mut self.b);
            return false;
        }

        expr.done(&mut self.b, NodeKind::DoubleStarExpression).keep();
        true
    }

    fn parse_unary(&mut self, is_target: bool) -> bool {
        let prefix = [
            TokenKind::Operator(Operator::Minus),
            TokenKind::Operator(Operator::Plus),
            TokenKind::Operator(Operator::Tilde),
        ];

        if !self.b.at_any(&prefix) {
            return self.parse_power(is_target);
        }

        self.depth_track(|p| {
            let expr = p.b.mark();
            p.b.advance();
            if !p.parse_unary(is_target) {
                p.b.error(EXPECTED_EXPRESSION);
            }
            expr.done(&mut p.b, NodeKind::PrefixExpression).keep();
            true
        })
    }

    /// `**` binds tighter than unary operators on its left but not on its
    /// right, so `-a ** -b` is `-(a ** (-b))`.
    fn parse_power(&mut self, is_target: bool) -> bool {
        let expr = self.b.mark();

        if !self.parse_member(is_target) {
            expr.drop(&mut self.b);
            return false;
        }

        if self.at_operator(Operator::StarStar) {
            self.b.advance();
            if !self.depth_track(|p| p.parse_unary(is_target)) {
                self.b.error(EXPECTED_EXPRESSION);
            }
            expr.done(&mut self.b, NodeKind::BinaryExpression).keep();
        } else {
            expr.drop(&mut self.b);
        }

        true
    }
}
