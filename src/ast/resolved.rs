//! The resolver's output: the same shapes as [`crate::ast::raw`] with every
//! ambiguous site collapsed from `NodeWrap<T>` (many alternatives) to
//! `Placed<T>` (exactly one).

use crate::ident::{Ident, Placed, QualIdent};
use crate::ty::{AccessMode, FormalParams, Type};

pub use super::raw::{BinOp, Import, UnOp};

pub type DesignatorSite = Placed<Designator>;
pub type ExpressionSite = Placed<Expression>;
pub type StatementSite = Placed<Statement>;
pub type DeclarationSite = Placed<Declaration>;

#[derive(Clone, Debug)]
pub enum Designator {
    Variable(QualIdent),
    Field(Box<DesignatorSite>, Ident),
    TypeGuard(Box<DesignatorSite>, QualIdent),
    Dereference(Box<DesignatorSite>),
    Index(Box<DesignatorSite>, Vec<ExpressionSite>),
    Call(Box<DesignatorSite>, Vec<ExpressionSite>),
}

impl Designator {
    /// A short, stable tag for the alternative's shape, used to report
    /// which interpretations survived when a site is ambiguous.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Designator::Variable(_) => "Variable",
            Designator::Field(..) => "Field",
            Designator::TypeGuard(..) => "TypeGuard",
            Designator::Dereference(_) => "Dereference",
            Designator::Index(..) => "Index",
            Designator::Call(..) => "Call",
        }
    }
}

#[derive(Clone, Debug)]
pub enum Expression {
    Read(DesignatorSite),
    FunctionCall(DesignatorSite, Vec<ExpressionSite>),
    IsA(Box<ExpressionSite>, QualIdent),
    IntegerLiteral(i64),
    RealLiteral(f64),
    StringLiteral(String),
    BooleanLiteral(bool),
    Nil,
    Set(Vec<ExpressionSite>),
    UnaryOp(UnOp, Box<ExpressionSite>),
    BinaryOp(Box<ExpressionSite>, BinOp, Box<ExpressionSite>),
}

impl Expression {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Read(_) => "Read",
            Expression::FunctionCall(..) => "FunctionCall",
            Expression::IsA(..) => "IsA",
            Expression::IntegerLiteral(_) => "IntegerLiteral",
            Expression::RealLiteral(_) => "RealLiteral",
            Expression::StringLiteral(_) => "StringLiteral",
            Expression::BooleanLiteral(_) => "BooleanLiteral",
            Expression::Nil => "Nil",
            Expression::Set(_) => "Set",
            Expression::UnaryOp(..) => "UnaryOp",
            Expression::BinaryOp(..) => "BinaryOp",
        }
    }
}

#[derive(Clone, Debug)]
pub enum Statement {
    ProcedureCall(DesignatorSite, Vec<ExpressionSite>),
    Assignment(DesignatorSite, ExpressionSite),
    If(Vec<(ExpressionSite, Vec<StatementSite>)>, Option<Vec<StatementSite>>),
    While(ExpressionSite, Vec<StatementSite>),
    Repeat(Vec<StatementSite>, ExpressionSite),
    ForLoop {
        var: Ident,
        from: ExpressionSite,
        to: ExpressionSite,
        by: Option<ExpressionSite>,
        body: Vec<StatementSite>,
    },
    Case(ExpressionSite, Vec<(Vec<ExpressionSite>, Vec<StatementSite>)>),
    Return(Option<ExpressionSite>),
    Block(Vec<StatementSite>),
}

impl Statement {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::ProcedureCall(..) => "ProcedureCall",
            Statement::Assignment(..) => "Assignment",
            Statement::If(..) => "If",
            Statement::While(..) => "While",
            Statement::Repeat(..) => "Repeat",
            Statement::ForLoop { .. } => "ForLoop",
            Statement::Case(..) => "Case",
            Statement::Return(_) => "Return",
            Statement::Block(_) => "Block",
        }
    }
}

#[derive(Clone, Debug)]
pub enum Declaration {
    ConstDeclaration { name: Ident, access: AccessMode, value: ExpressionSite },
    TypeDeclaration { name: Ident, access: AccessMode, ty: Type },
    VarDeclaration { names: Vec<(Ident, AccessMode)>, ty: Type },
    ProcedureDeclaration { heading: ProcedureHeading, body: ProcedureBody },
    ForwardDeclaration { name: Ident, access: AccessMode, params: Option<FormalParams> },
}

impl Declaration {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Declaration::ConstDeclaration { .. } => "ConstDeclaration",
            Declaration::TypeDeclaration { .. } => "TypeDeclaration",
            Declaration::VarDeclaration { .. } => "VarDeclaration",
            Declaration::ProcedureDeclaration { .. } => "ProcedureDeclaration",
            Declaration::ForwardDeclaration { .. } => "ForwardDeclaration",
        }
    }
}

#[derive(Clone, Debug)]
pub enum ProcedureHeading {
    Plain { name: Ident, access: AccessMode, params: FormalParams },
    TypeBound {
        receiver_name: Ident,
        receiver_type: QualIdent,
        name: Ident,
        access: AccessMode,
        params: FormalParams,
    },
}

impl ProcedureHeading {
    pub fn name(&self) -> &Ident {
        match self {
            ProcedureHeading::Plain { name, .. } => name,
            ProcedureHeading::TypeBound { name, .. } => name,
        }
    }

    pub fn access(&self) -> AccessMode {
        match self {
            ProcedureHeading::Plain { access, .. } => *access,
            ProcedureHeading::TypeBound { access, .. } => *access,
        }
    }

    pub fn params(&self) -> &FormalParams {
        match self {
            ProcedureHeading::Plain { params, .. } => params,
            ProcedureHeading::TypeBound { params, .. } => params,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProcedureBody {
    pub declarations: Vec<DeclarationSite>,
    pub statements: Vec<StatementSite>,
}

#[derive(Clone, Debug)]
pub struct ResolvedModule {
    pub name: Ident,
    pub imports: Vec<Import>,
    pub declarations: Vec<DeclarationSite>,
    pub body: Option<Vec<StatementSite>>,
}
