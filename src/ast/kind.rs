//! The closed set of clang node kinds the translator understands.

use std::fmt;

/// Kind tag of one front-end node.
///
/// Derived once from the raw `kind` string while deserializing. Kinds the
/// translator never dispatches on individually are folded into the
/// `Attribute`, `Comment` and `Unknown` groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The empty object `{}` clang emits for an absent child.
    Null,

    // --- Declarations ---
    TranslationUnitDecl,
    TypedefDecl,
    RecordDecl,
    FieldDecl,
    IndirectFieldDecl,
    EnumDecl,
    EnumConstantDecl,
    FunctionDecl,
    ParmVarDecl,
    VarDecl,
    LabelDecl,
    EmptyDecl,
    StaticAssertDecl,

    // --- Statements ---
    CompoundStmt,
    DeclStmt,
    ReturnStmt,
    IfStmt,
    WhileStmt,
    ForStmt,
    DoStmt,
    SwitchStmt,
    CaseStmt,
    DefaultStmt,
    BreakStmt,
    ContinueStmt,
    GotoStmt,
    LabelStmt,
    NullStmt,
    GccAsmStmt,

    // --- Expressions ---
    IntegerLiteral,
    CharacterLiteral,
    FloatingLiteral,
    StringLiteral,
    ConstantExpr,
    ParenExpr,
    ImplicitCastExpr,
    CStyleCastExpr,
    BinaryOperator,
    CompoundAssignOperator,
    UnaryOperator,
    ConditionalOperator,
    DeclRefExpr,
    MemberExpr,
    CallExpr,
    ArraySubscriptExpr,
    UnaryExprOrTypeTraitExpr,
    InitListExpr,
    ImplicitValueInitExpr,
    OpaqueValueExpr,
    ParenListExpr,
    VaArgExpr,
    OffsetOfExpr,
    StmtExpr,

    // --- C++ declarations ---
    NamespaceDecl,
    LinkageSpecDecl,
    CxxRecordDecl,
    CxxConstructorDecl,
    CxxDestructorDecl,
    CxxMethodDecl,
    UsingDecl,
    UsingShadowDecl,
    UsingDirectiveDecl,
    ClassTemplateDecl,
    ClassTemplateSpecializationDecl,
    ClassTemplatePartialSpecializationDecl,
    FunctionTemplateDecl,
    TemplateArgument,

    // --- C++ statements and expressions ---
    CxxForRangeStmt,
    CxxTryStmt,
    CxxConstructExpr,
    CxxMemberCallExpr,
    CxxOperatorCallExpr,
    ExprWithCleanups,
    MaterializeTemporaryExpr,
    CxxBindTemporaryExpr,
    UnresolvedLookupExpr,
    CxxThrowExpr,
    CxxDynamicCastExpr,
    CxxReinterpretCastExpr,
    CxxStaticCastExpr,
    CxxUnresolvedConstructExpr,
    CxxDependentScopeMemberExpr,
    CxxThisExpr,
    CxxBoolLiteralExpr,
    CxxNullPtrLiteralExpr,
    CxxFunctionalCastExpr,
    CxxDeleteExpr,
    CxxNewExpr,
    CxxTemporaryObjectExpr,

    // --- Groups ---
    /// Any `*Attr` node (`ColdAttr`, `DeprecatedAttr`, `AlignedAttr`, ...).
    Attribute,
    /// Any documentation comment node (`FullComment`, `ParagraphComment`, ...).
    Comment,
    Unknown,
}

impl NodeKind {
    pub fn from_clang(raw: &str) -> Self {
        use NodeKind::*;
        match raw {
            "" => Null,
            "TranslationUnitDecl" => TranslationUnitDecl,
            "TypedefDecl" => TypedefDecl,
            "RecordDecl" => RecordDecl,
            "FieldDecl" => FieldDecl,
            "IndirectFieldDecl" => IndirectFieldDecl,
            "EnumDecl" => EnumDecl,
            "EnumConstantDecl" => EnumConstantDecl,
            "FunctionDecl" => FunctionDecl,
            "ParmVarDecl" => ParmVarDecl,
            "VarDecl" => VarDecl,
            "LabelDecl" => LabelDecl,
            "EmptyDecl" => EmptyDecl,
            "StaticAssertDecl" => StaticAssertDecl,

            "CompoundStmt" => CompoundStmt,
            "DeclStmt" => DeclStmt,
            "ReturnStmt" => ReturnStmt,
            "IfStmt" => IfStmt,
            "WhileStmt" => WhileStmt,
            "ForStmt" => ForStmt,
            "DoStmt" => DoStmt,
            "SwitchStmt" => SwitchStmt,
            "CaseStmt" => CaseStmt,
            "DefaultStmt" => DefaultStmt,
            "BreakStmt" => BreakStmt,
            "ContinueStmt" => ContinueStmt,
            "GotoStmt" => GotoStmt,
            "LabelStmt" => LabelStmt,
            "NullStmt" => NullStmt,
            "GCCAsmStmt" => GccAsmStmt,

            "IntegerLiteral" => IntegerLiteral,
            "CharacterLiteral" => CharacterLiteral,
            "FloatingLiteral" => FloatingLiteral,
            "StringLiteral" => StringLiteral,
            "ConstantExpr" => ConstantExpr,
            "ParenExpr" => ParenExpr,
            "ImplicitCastExpr" => ImplicitCastExpr,
            "CStyleCastExpr" => CStyleCastExpr,
            "BinaryOperator" => BinaryOperator,
            "CompoundAssignOperator" => CompoundAssignOperator,
            "UnaryOperator" => UnaryOperator,
            "ConditionalOperator" => ConditionalOperator,
            "DeclRefExpr" => DeclRefExpr,
            "MemberExpr" => MemberExpr,
            "CallExpr" => CallExpr,
            "ArraySubscriptExpr" => ArraySubscriptExpr,
            "UnaryExprOrTypeTraitExpr" => UnaryExprOrTypeTraitExpr,
            "InitListExpr" => InitListExpr,
            "ImplicitValueInitExpr" => ImplicitValueInitExpr,
            "OpaqueValueExpr" => OpaqueValueExpr,
            "ParenListExpr" => ParenListExpr,
            "VAArgExpr" => VaArgExpr,
            "OffsetOfExpr" => OffsetOfExpr,
            "StmtExpr" => StmtExpr,

            "NamespaceDecl" => NamespaceDecl,
            "LinkageSpecDecl" => LinkageSpecDecl,
            "CXXRecordDecl" => CxxRecordDecl,
            "CXXConstructorDecl" => CxxConstructorDecl,
            "CXXDestructorDecl" => CxxDestructorDecl,
            "CXXMethodDecl" => CxxMethodDecl,
            "UsingDecl" => UsingDecl,
            "UsingShadowDecl" => UsingShadowDecl,
            "UsingDirectiveDecl" => UsingDirectiveDecl,
            "ClassTemplateDecl" => ClassTemplateDecl,
            "ClassTemplateSpecializationDecl" => ClassTemplateSpecializationDecl,
            "ClassTemplatePartialSpecializationDecl" => ClassTemplatePartialSpecializationDecl,
            "FunctionTemplateDecl" => FunctionTemplateDecl,
            "TemplateArgument" => TemplateArgument,

            "CXXForRangeStmt" => CxxForRangeStmt,
            "CXXTryStmt" => CxxTryStmt,
            "CXXConstructExpr" => CxxConstructExpr,
            "CXXMemberCallExpr" => CxxMemberCallExpr,
            "CXXOperatorCallExpr" => CxxOperatorCallExpr,
            "ExprWithCleanups" => ExprWithCleanups,
            "MaterializeTemporaryExpr" => MaterializeTemporaryExpr,
            "CXXBindTemporaryExpr" => CxxBindTemporaryExpr,
            "UnresolvedLookupExpr" => UnresolvedLookupExpr,
            "CXXThrowExpr" => CxxThrowExpr,
            "CXXDynamicCastExpr" => CxxDynamicCastExpr,
            "CXXReinterpretCastExpr" => CxxReinterpretCastExpr,
            "CXXStaticCastExpr" => CxxStaticCastExpr,
            "CXXUnresolvedConstructExpr" => CxxUnresolvedConstructExpr,
            "CXXDependentScopeMemberExpr" => CxxDependentScopeMemberExpr,
            "CXXThisExpr" => CxxThisExpr,
            "CXXBoolLiteralExpr" => CxxBoolLiteralExpr,
            "CXXNullPtrLiteralExpr" => CxxNullPtrLiteralExpr,
            "CXXFunctionalCastExpr" => CxxFunctionalCastExpr,
            "CXXDeleteExpr" => CxxDeleteExpr,
            "CXXNewExpr" => CxxNewExpr,
            "CXXTemporaryObjectExpr" => CxxTemporaryObjectExpr,

            other if other.ends_with("Attr") => Attribute,
            other if other.ends_with("Comment") => Comment,
            _ => Unknown,
        }
    }

    /// Wrapper kinds that only forward to their single child.
    pub fn is_transparent(self) -> bool {
        matches!(
            self,
            NodeKind::ImplicitCastExpr | NodeKind::ParenExpr | NodeKind::ConstantExpr
        )
    }

    /// Kinds carrying no translatable content (attributes, comments, the null child).
    pub fn is_annotation(self) -> bool {
        matches!(self, NodeKind::Attribute | NodeKind::Comment | NodeKind::Null)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
