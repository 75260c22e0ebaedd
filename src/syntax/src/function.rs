//! Function declarations and parameter lists.
//!
//! Parameters are tagged with what sort of parameter they are, but their
//! order isn't checked here. Something like `def f(**kw, a)` parses without
//! errors.

use parser::lexer::{Operator, Reserved, TokenKind};
use parser::Marker;

use crate::grammar::{Parser, EXPECTED_EXPRESSION, LPAR, RPAR};
use crate::kind::NodeKind;

impl Parser<'_> {
    /// `def name(parameters): suite`, completing `def` as the declaration.
    pub(crate) fn parse_function(&mut self, def: Marker) {
        self.assert_at(TokenKind::Reserved(Reserved::Def));
        self.b.advance();

        self.b
            .check_matches(TokenKind::Identifier, "expected a function name");

        if self.b.at(LPAR) {
            self.parse_parameter_list_contents(RPAR, true);
        } else {
            self.b.error("expected '('");
            self.empty_node(NodeKind::ParameterList);
        }

        self.push_scope(self.scope().with_function());
        self.parse_colon_and_suite();
        self.pop_scope();

        def.done(&mut self.b, NodeKind::FunctionDeclaration).keep();
    }

    /// A comma separated list of parameters up to `end`, as a
    /// [`ParameterList`][NodeKind::ParameterList].
    ///
    /// Function declarations pass `)` and have the list include the
    /// parentheses. Lambdas pass `:`, and the colon is left for the lambda.
    pub(crate) fn parse_parameter_list_contents(
        &mut self,
        end: TokenKind,
        consume_open: bool,
    ) {
        let list = self.b.mark();

        if consume_open {
            self.assert_at(LPAR);
            self.b.advance();
        }

        let mut first = true;
        while !self.b.eof() && !self.b.at(end) {
            if !first {
                if !self.b.check_matches(TokenKind::Comma, "expected ','") {
                    break;
                }
                if self.b.at(end) {
                    break;
                }
            }
            first = false;

            if !self.parse_parameter(end) {
                break;
            }
        }

        if end == RPAR {
            self.b.check_matches(RPAR, "expected ')'");
        }

        list.done(&mut self.b, NodeKind::ParameterList).keep();
    }

    fn parse_parameter(&mut self, end: TokenKind) -> bool {
        let parameter = self.b.mark();

        if self.at_operator(Operator::StarStar) {
            self.b.advance();
            self.b
                .check_matches(TokenKind::Identifier, "expected a parameter name");
            parameter
                .done(&mut self.b, NodeKind::KeywordVariadicParameter)
                .keep();
            return true;
        }

        if self.at_operator(Operator::Star) {
            self.b.advance();
            self.b.matches(TokenKind::Identifier);
            parameter
                .done(&mut self.b, NodeKind::VariadicParameter)
                .keep();
            return true;
        }

        if self.b.matches(TokenKind::Identifier) {
            let kind = if self.b.matches(TokenKind::Equals) {
                if !self.parse_single(false) {
                    self.b.error(EXPECTED_EXPRESSION);
                }
                NodeKind::OptionalParameter
            } else {
                NodeKind::MandatoryParameter
            };

            parameter.done(&mut self.b, kind).keep();
            return true;
        }

        let stop = [
            TokenKind::Comma,
            end,
            TokenKind::Colon,
            RPAR,
            TokenKind::StatementBreak,
        ];

        let mut skipped = false;
        while !self.b.eof() && !self.b.at_any(&stop) {
            self.b.advance();
            skipped = true;
        }

        if skipped {
            parameter.error(&mut self.b, "expected a parameter").keep();
            true
        } else {
            parameter.drop(&mut self.b);
            false
        }
    }
}
