//! The kinds of node in a Starlark syntax tree.

use parser::SyntaxKind;

/// What a node in the tree represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The root of every tree.
    File,
    /// Something which couldn't be parsed. These carry a message.
    Error,

    // Statements
    AssignmentStatement,
    AugAssignmentStatement,
    BreakStatement,
    ContinueStatement,
    ExpressionStatement,
    ForStatement,
    IfStatement,
    LoadStatement,
    /// A `name = "symbol"` part of a `load`.
    NamedLoadValue,
    /// A plain `"symbol"` part of a `load`, after the module.
    StringLoadValue,
    PassStatement,
    ReturnStatement,
    /// The body of a compound statement, either indented or inline.
    StatementList,

    // Functions
    FunctionDeclaration,
    ParameterList,
    MandatoryParameter,
    OptionalParameter,
    /// `*args`, or a bare `*`.
    VariadicParameter,
    /// `**kwargs`.
    KeywordVariadicParameter,

    // Expressions
    ArgumentList,
    ArgumentExpression,
    NamedArgumentExpression,
    /// `*args` or `**kwargs` in a call.
    StarArgumentExpression,
    BinaryExpression,
    CallExpression,
    ConditionalExpression,
    DictCompExpression,
    /// Dictionaries and sets, which share braces.
    DictLiteralExpression,
    DoubleStarExpression,
    /// A missing part of a slice, like the start in `a[:2]`.
    EmptyExpression,
    FloatLiteralExpression,
    GeneratorExpression,
    IntegerLiteralExpression,
    KeyValueExpression,
    LambdaExpression,
    ListCompExpression,
    ListLiteralExpression,
    ParenthesizedExpression,
    PrefixExpression,
    /// A name being read.
    ReferenceExpression,
    SliceExpression,
    SliceItem,
    StarExpression,
    /// String and bytes literals.
    StringLiteralExpression,
    SubscriptionExpression,
    /// A name being assigned to.
    TargetExpression,
    TupleExpression,
}

impl NodeKind {
    /// Is this some kind of statement?
    pub fn is_statement(self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            AssignmentStatement
                | AugAssignmentStatement
                | BreakStatement
                | ContinueStatement
                | ExpressionStatement
                | ForStatement
                | IfStatement
                | LoadStatement
                | PassStatement
                | ReturnStatement
                | FunctionDeclaration
        )
    }

    /// Is this a literal?
    pub fn is_literal(self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            IntegerLiteralExpression
                | FloatLiteralExpression
                | StringLiteralExpression
        )
    }
}

impl SyntaxKind for NodeKind {
    const ERROR: Self = NodeKind::Error;
    const ROOT: Self = NodeKind::File;
}
