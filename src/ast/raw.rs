//! The parser's output: every site that Oberon's grammar leaves ambiguous
//! is wrapped in [`NodeWrap`], carrying every alternative the parser could
//! not choose between.

use crate::ident::{Ident, NodeWrap, QualIdent};
use crate::ty::{AccessMode, FormalParams, Type};

pub type RawDesignatorSite = NodeWrap<RawDesignator>;
pub type RawExpressionSite = NodeWrap<RawExpression>;
pub type RawStatementSite = NodeWrap<RawStatement>;
pub type RawDeclarationSite = NodeWrap<RawDeclaration>;
pub type RawProcedureHeadingSite = NodeWrap<RawProcedureHeading>;
pub type RawProcedureBodySite = NodeWrap<RawProcedureBody>;

#[derive(Clone, Debug)]
pub enum RawDesignator {
    Variable(QualIdent),
    Field(Box<RawDesignatorSite>, Ident),
    TypeGuard(Box<RawDesignatorSite>, QualIdent),
    Dereference(Box<RawDesignatorSite>),
    Index(Box<RawDesignatorSite>, Vec<RawExpressionSite>),
    /// `designator(args)` parsed as a designator, i.e. the "procedure call
    /// used where a designator is expected" case.
    Call(Box<RawDesignatorSite>, Vec<RawExpressionSite>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Or,
    Mul,
    Div,
    Mod,
    And,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    In,
}

#[derive(Clone, Debug)]
pub enum RawExpression {
    Read(RawDesignatorSite),
    FunctionCall(RawDesignatorSite, Vec<RawExpressionSite>),
    IsA(Box<RawExpressionSite>, QualIdent),
    IntegerLiteral(i64),
    RealLiteral(f64),
    StringLiteral(String),
    BooleanLiteral(bool),
    Nil,
    Set(Vec<RawExpressionSite>),
    UnaryOp(UnOp, Box<RawExpressionSite>),
    BinaryOp(Box<RawExpressionSite>, BinOp, Box<RawExpressionSite>),
}

#[derive(Clone, Debug)]
pub enum RawStatement {
    ProcedureCall(RawDesignatorSite, Vec<RawExpressionSite>),
    Assignment(RawDesignatorSite, RawExpressionSite),
    If(Vec<(RawExpressionSite, Vec<RawStatementSite>)>, Option<Vec<RawStatementSite>>),
    While(RawExpressionSite, Vec<RawStatementSite>),
    Repeat(Vec<RawStatementSite>, RawExpressionSite),
    ForLoop {
        var: Ident,
        from: RawExpressionSite,
        to: RawExpressionSite,
        by: Option<RawExpressionSite>,
        body: Vec<RawStatementSite>,
    },
    Case(RawExpressionSite, Vec<(Vec<RawExpressionSite>, Vec<RawStatementSite>)>),
    Return(Option<RawExpressionSite>),
    Block(Vec<RawStatementSite>),
}

#[derive(Clone, Debug)]
pub enum RawDeclaration {
    ConstDeclaration { name: Ident, access: AccessMode, value: RawExpressionSite },
    TypeDeclaration { name: Ident, access: AccessMode, ty: Type },
    VarDeclaration { names: Vec<(Ident, AccessMode)>, ty: Type },
    ProcedureDeclaration { heading: RawProcedureHeadingSite, body: RawProcedureBodySite },
    ForwardDeclaration { name: Ident, access: AccessMode, params: Option<FormalParams> },
}

#[derive(Clone, Debug)]
pub enum RawProcedureHeading {
    Plain { name: Ident, access: AccessMode, params: FormalParams },
    TypeBound {
        receiver_name: Ident,
        receiver_type: QualIdent,
        name: Ident,
        access: AccessMode,
        params: FormalParams,
    },
}

impl RawProcedureHeading {
    pub fn name(&self) -> &Ident {
        match self {
            RawProcedureHeading::Plain { name, .. } => name,
            RawProcedureHeading::TypeBound { name, .. } => name,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RawProcedureBody {
    pub declarations: Vec<RawDeclarationSite>,
    pub statements: Vec<RawStatementSite>,
}

/// One entry of a module's import list. `alias` is [`Ident::empty`] when the
/// import was not renamed, per the same "no alias" convention `Ident`
/// reserves the empty string for.
#[derive(Clone, Debug)]
pub struct Import {
    pub alias: Ident,
    pub module: Ident,
}

#[derive(Clone, Debug)]
pub struct RawModule {
    pub name: Ident,
    pub imports: Vec<Import>,
    pub declarations: Vec<RawDeclarationSite>,
    pub body: Option<Vec<RawStatementSite>>,
}
