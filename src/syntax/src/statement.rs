//! Statements and suites.

use parser::lexer::{Reserved, TokenKind};

use crate::grammar::{Parser, EXPECTED_EXPRESSION, LPAR, RPAR};
use crate::kind::NodeKind;

const SB: TokenKind = TokenKind::StatementBreak;

impl Parser<'_> {
    /// Parse one statement, along with any empty statement breaks before it.
    ///
    /// This doesn't consume the dedent which ends a block, which is left for
    /// [`Parser::parse_suite`].
    pub(crate) fn parse_statement(&mut self) {
        while self.b.matches(SB) {}

        let after_semicolon = self.scope().is_after_semicolon();
        self.set_after_semicolon(false);

        let current = match self.b.current() {
            Some(kind) => kind,
            None => return,
        };

        match current {
            TokenKind::Dedent if self.stray_indents > 0 => {
                self.stray_indents -= 1;
                self.b.advance();
            }

            TokenKind::Dedent if self.blocks > 0 => {}

            TokenKind::Reserved(word @ (Reserved::If | Reserved::For | Reserved::Def)) => {
                if after_semicolon {
                    self.b.error("compound statements can't follow ';' on the same line");
                }

                match word {
                    Reserved::If => self.parse_if(),
                    Reserved::For => self.parse_for(),
                    _ => {
                        let def = self.b.mark();
                        self.parse_function(def);
                    }
                }
            }

            _ => self.parse_simple_statement(),
        }
    }

    pub(crate) fn parse_simple_statement(&mut self) {
        match self.b.current() {
            None => {}
            Some(TokenKind::Reserved(Reserved::Break)) => {
                self.parse_keyword_statement(NodeKind::BreakStatement)
            }
            Some(TokenKind::Reserved(Reserved::Continue)) => {
                self.parse_keyword_statement(NodeKind::ContinueStatement)
            }
            Some(TokenKind::Reserved(Reserved::Pass)) => {
                self.parse_keyword_statement(NodeKind::PassStatement)
            }
            Some(TokenKind::Reserved(Reserved::Return)) => self.parse_return(),
            Some(TokenKind::Reserved(Reserved::Load)) => self.parse_load(),
            Some(_) => self.parse_expression_statement(),
        }
    }

    fn parse_keyword_statement(&mut self, kind: NodeKind) {
        let statement = self.b.mark();
        self.b.advance();
        self.check_end_of_statement();
        statement.done(&mut self.b, kind).keep();
    }

    fn parse_return(&mut self) {
        self.assert_at(TokenKind::Reserved(Reserved::Return));
        let statement = self.b.mark();
        self.b.advance();

        if !self.b.eof() && !self.b.at_any(&[SB, TokenKind::Semicolon]) {
            self.parse_expression();
        }

        self.check_end_of_statement();
        statement.done(&mut self.b, NodeKind::ReturnStatement).keep();
    }

    /// A statement ends at a statement break, or a `;` if there's more on
    /// the same line.
    ///
    /// Inside an inline suite the `;` is left for the suite, which decides
    /// whether another statement follows.
    fn check_end_of_statement(&mut self) {
        if self.b.matches(SB) {
            self.set_after_semicolon(false);
        } else if self.b.at(TokenKind::Semicolon) {
            if !self.scope().is_suite() {
                self.b.advance();
                self.set_after_semicolon(true);
                if self.b.matches(SB) {
                    self.set_after_semicolon(false);
                }
            }
        } else if !self.b.eof() {
            self.b.error("expected end of statement");
        }
    }

    fn parse_if(&mut self) {
        self.assert_at(TokenKind::Reserved(Reserved::If));
        let statement = self.b.mark();
        self.b.advance();

        if !self.parse_test(false) {
            self.b.error(EXPECTED_EXPRESSION);
        }
        self.parse_colon_and_suite();

        while self.at_word(Reserved::Elif) {
            self.b.advance();
            if !self.parse_test(false) {
                self.b.error(EXPECTED_EXPRESSION);
            }
            self.parse_colon_and_suite();
        }

        if self.at_word(Reserved::Else) {
            self.b.advance();
            self.parse_colon_and_suite();
        }

        statement.done(&mut self.b, NodeKind::IfStatement).keep();
    }

    fn parse_for(&mut self) {
        self.assert_at(TokenKind::Reserved(Reserved::For));
        let statement = self.b.mark();
        self.b.advance();

        self.parse_star_targets();
        self.b
            .check_matches(TokenKind::Reserved(Reserved::In), "expected 'in'");
        self.parse_expression();
        self.parse_colon_and_suite();

        statement.done(&mut self.b, NodeKind::ForStatement).keep();
    }

    /// Look for the `:` before a suite, returning whether a suite should be
    /// parsed after it.
    ///
    /// Anything between here and the colon is wrapped in an error.
    fn expect_colon(&mut self) -> bool {
        if self.b.matches(TokenKind::Colon) {
            return true;
        }

        if self.b.at(SB) {
            self.b.error("expected ':'");
            return true;
        }

        let junk = self.b.mark();
        while !self.b.eof()
            && !self.b.at_any(&[TokenKind::Dedent, SB, TokenKind::Colon])
        {
            self.b.advance();
        }

        let found = self.b.matches(TokenKind::Colon);
        if !found {
            self.b.matches(SB);
        }

        junk.error(&mut self.b, "expected ':'").keep();
        found
    }

    pub(crate) fn parse_colon_and_suite(&mut self) {
        if self.expect_colon() {
            self.parse_suite();
        } else {
            self.empty_node(NodeKind::StatementList);
        }
    }

    /// The body of a compound statement.
    ///
    /// A suite is either an indented block on the following lines, or simple
    /// statements separated by `;` on the same line. Either way it becomes a
    /// [`StatementList`][NodeKind::StatementList]. The dedent which closes a
    /// block is consumed after the list, so it's part of the enclosing
    /// statement.
    pub(crate) fn parse_suite(&mut self) {
        if !self.b.matches(SB) {
            self.parse_inline_suite();
            return;
        }

        let list = self.b.mark();
        let indented = self.b.matches(TokenKind::Indent);

        if !indented {
            self.b.error("expected an indented block");
        } else if self.b.enter() {
            self.blocks += 1;
            while !self.b.eof() && !self.at_block_end() {
                self.parse_statement();
            }
            self.blocks -= 1;
            self.b.exit();
        } else {
            self.skip_block();
        }

        list.done(&mut self.b, NodeKind::StatementList).keep();

        if indented {
            self.b.matches(TokenKind::Dedent);
        }
    }

    fn parse_inline_suite(&mut self) {
        let list = self.b.mark();

        if self.b.eof() {
            self.b.error("expected a statement");
        } else {
            self.parse_inline_statement();
            while self.b.matches(TokenKind::Semicolon) {
                if self.b.matches(SB) {
                    break;
                }
                self.parse_inline_statement();
            }
        }

        list.done(&mut self.b, NodeKind::StatementList).keep();
    }

    fn parse_inline_statement(&mut self) {
        self.push_scope(self.scope().with_suite());
        self.parse_simple_statement();
        self.pop_scope();
    }

    /// Is the next token the dedent which closes the innermost block?
    fn at_block_end(&self) -> bool {
        self.b.at(TokenKind::Dedent) && self.stray_indents == 0
    }

    /// Wrap the rest of a block that's nested too deeply in an error, up to
    /// but not including its dedent.
    fn skip_block(&mut self) {
        log::debug!("skipping block nested past {} levels", self.blocks);

        let junk = self.b.mark();
        let mut depth = 1;

        while let Some(kind) = self.b.current() {
            match kind {
                TokenKind::Indent => depth += 1,
                TokenKind::Dedent => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            self.b.advance();
        }

        junk.error(&mut self.b, "block nested too deeply").keep();
    }

    /// Expression statements and assignments.
    ///
    /// What's on the left of an `=` is only known to be a target once we
    /// reach the `=`, so it's parsed again as one. Chained assignments like
    /// `a = b = 1` repeat this for each `=`.
    fn parse_expression_statement(&mut self) {
        let mut statement = self.b.mark();

        if !self.parse_expression_optional() {
            statement.rollback_to(&mut self.b);
            self.report_statement_error();
            return;
        }

        let kind = if let Some(TokenKind::CompoundAssign(_)) = self.b.current() {
            self.b.advance();
            if !self.parse_expression_optional() {
                self.b.error(EXPECTED_EXPRESSION);
            }
            NodeKind::AugAssignmentStatement
        } else if self.b.at(TokenKind::Equals) {
            statement.rollback_to(&mut self.b);
            statement = self.b.mark();
            self.parse_assignment_targets();
            NodeKind::AssignmentStatement
        } else {
            NodeKind::ExpressionStatement
        };

        self.check_end_of_statement();
        statement.done(&mut self.b, kind).keep();
    }

    fn parse_assignment_targets(&mut self) {
        self.parse_target_expression();
        if !self.b.check_matches(TokenKind::Equals, "expected '='") {
            return;
        }

        loop {
            let value = self.b.mark();

            if !self.parse_expression_optional() {
                value.drop(&mut self.b);
                self.b.error(EXPECTED_EXPRESSION);
                break;
            }

            if !self.b.at(TokenKind::Equals) {
                value.drop(&mut self.b);
                break;
            }

            value.rollback_to(&mut self.b);
            self.parse_target_expression();
            if !self.b.matches(TokenKind::Equals) {
                break;
            }
        }
    }

    /// Report a token that can't start a statement, and skip it.
    fn report_statement_error(&mut self) {
        let message = match self.b.current() {
            None => return,
            Some(TokenKind::InconsistentDedent) => {
                String::from("unindent does not match any outer indentation level")
            }
            Some(TokenKind::Indent) => {
                self.stray_indents += 1;
                String::from("unexpected indent")
            }
            Some(kind) => format!("statement expected, found {}", kind.name()),
        };

        self.b.advance_error(message);
    }
}

// Load statements
impl Parser<'_> {
    fn parse_load(&mut self) {
        self.assert_at(TokenKind::Reserved(Reserved::Load));
        let statement = self.b.mark();
        self.b.advance();

        self.parse_load_values();

        self.check_end_of_statement();
        statement.done(&mut self.b, NodeKind::LoadStatement).keep();
    }

    /// `("module", "symbol", alias = "symbol", ...)`
    fn parse_load_values(&mut self) {
        if !self.b.matches(LPAR) {
            self.b.error("expected '('");
            return;
        }

        let mut first = true;
        while !self.b.at(RPAR) {
            if first {
                first = false;
                self.parse_load_string();
                continue;
            }

            if !self.b.matches(TokenKind::Comma) {
                self.b.error("expected ',' or ')'");
                break;
            }
            if self.b.at(RPAR) {
                break;
            }

            if self.b.at(TokenKind::Identifier) {
                let named = self.b.mark();
                self.b.advance();
                if self.b.matches(TokenKind::Equals) {
                    self.parse_load_string();
                    named.done(&mut self.b, NodeKind::NamedLoadValue).keep();
                    continue;
                }
                named.rollback_to(&mut self.b);
            }

            let value = self.b.mark();
            self.parse_load_string();
            value.done(&mut self.b, NodeKind::StringLoadValue).keep();
        }

        self.b.check_matches(RPAR, "expected ')'");
    }

    fn parse_load_string(&mut self) {
        if self.b.at(TokenKind::String) {
            self.token_node(NodeKind::StringLiteralExpression);
        } else if self.b.eof() || self.b.at_any(&[SB, RPAR, TokenKind::Comma]) {
            self.b.error("expected a string");
        } else {
            self.b.advance_error("expected a string");
        }
    }
}
