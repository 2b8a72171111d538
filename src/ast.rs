// Copyright (C) Brian G. Milnes 2025

//! Typed wrappers over the rowan syntax tree
//!
//! Mirrors the cast-based ast layer the rewrite rules consume: each wrapper
//! is a zero-cost view over a `SyntaxNode` of the matching kind.

pub mod ast {
    use crate::syntax::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};
    use SyntaxKind::*;

    /// A typed view over a syntax node of a fixed kind.
    pub trait AstNode {
        fn can_cast(kind: SyntaxKind) -> bool
        where
            Self: Sized;
        fn cast(syntax: SyntaxNode) -> Option<Self>
        where
            Self: Sized;
        fn syntax(&self) -> &SyntaxNode;

        fn text(&self) -> String {
            self.syntax().text().to_string()
        }
    }

    macro_rules! ast_node {
        ($(#[$attr:meta])* $name:ident, $kind:ident) => {
            $(#[$attr])*
            #[derive(Debug, Clone, PartialEq, Eq)]
            pub struct $name(SyntaxNode);

            impl AstNode for $name {
                fn can_cast(kind: SyntaxKind) -> bool {
                    kind == $kind
                }
                fn cast(syntax: SyntaxNode) -> Option<Self> {
                    if syntax.kind() == $kind {
                        Some($name(syntax))
                    } else {
                        None
                    }
                }
                fn syntax(&self) -> &SyntaxNode {
                    &self.0
                }
            }
        };
    }

    ast_node!(SourceFile, SOURCE_FILE);
    ast_node!(ClassDecl, CLASS_DECL);
    ast_node!(AttrList, ATTR_LIST);
    ast_node!(Attr, ATTR);
    ast_node!(FieldDecl, FIELD_DECL);
    ast_node!(VarDeclarator, VAR_DECLARATOR);
    ast_node!(PropertyDecl, PROPERTY_DECL);
    ast_node!(AccessorList, ACCESSOR_LIST);
    ast_node!(Accessor, ACCESSOR);
    ast_node!(MethodDecl, METHOD_DECL);
    ast_node!(ParamList, PARAM_LIST);
    ast_node!(Param, PARAM);
    ast_node!(TypeRef, TYPE_REF);
    ast_node!(Name, NAME);
    ast_node!(Block, BLOCK);
    ast_node!(IfStmt, IF_STMT);
    ast_node!(ElseClause, ELSE_CLAUSE);
    ast_node!(ReturnStmt, RETURN_STMT);
    ast_node!(YieldStmt, YIELD_STMT);
    ast_node!(SwitchStmt, SWITCH_STMT);
    ast_node!(CaseSection, CASE_SECTION);
    ast_node!(CaseLabel, CASE_LABEL);
    ast_node!(LocalDecl, LOCAL_DECL);
    ast_node!(ExprStmt, EXPR_STMT);
    ast_node!(AssignExpr, ASSIGN_EXPR);
    ast_node!(BinExpr, BIN_EXPR);
    ast_node!(PrefixExpr, PREFIX_EXPR);
    ast_node!(ParenExpr, PAREN_EXPR);
    ast_node!(CallExpr, CALL_EXPR);
    ast_node!(ArgList, ARG_LIST);
    ast_node!(MemberExpr, MEMBER_EXPR);
    ast_node!(IndexExpr, INDEX_EXPR);
    ast_node!(NewExpr, NEW_EXPR);
    ast_node!(InitializerList, INITIALIZER_LIST);
    ast_node!(Literal, LITERAL);
    ast_node!(NameRef, NAME_REF);
    ast_node!(ThisExpr, THIS_EXPR);

    fn child_node<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
        parent.children().find_map(N::cast)
    }

    fn child_token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
        parent
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == kind)
    }

    // Statements -------------------------------------------------------

    /// Any statement kind, as a closed sum.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Stmt {
        Block(Block),
        If(IfStmt),
        Return(ReturnStmt),
        Yield(YieldStmt),
        Switch(SwitchStmt),
        Local(LocalDecl),
        Expr(ExprStmt),
        Other(SyntaxNode),
    }

    impl Stmt {
        pub fn cast(syntax: SyntaxNode) -> Option<Stmt> {
            if !syntax.kind().is_statement() {
                return None;
            }
            let stmt = match syntax.kind() {
                BLOCK => Stmt::Block(Block(syntax)),
                IF_STMT => Stmt::If(IfStmt(syntax)),
                RETURN_STMT => Stmt::Return(ReturnStmt(syntax)),
                YIELD_STMT => Stmt::Yield(YieldStmt(syntax)),
                SWITCH_STMT => Stmt::Switch(SwitchStmt(syntax)),
                LOCAL_DECL => Stmt::Local(LocalDecl(syntax)),
                EXPR_STMT => Stmt::Expr(ExprStmt(syntax)),
                _ => Stmt::Other(syntax),
            };
            Some(stmt)
        }

        pub fn syntax(&self) -> &SyntaxNode {
            match self {
                Stmt::Block(it) => it.syntax(),
                Stmt::If(it) => it.syntax(),
                Stmt::Return(it) => it.syntax(),
                Stmt::Yield(it) => it.syntax(),
                Stmt::Switch(it) => it.syntax(),
                Stmt::Local(it) => it.syntax(),
                Stmt::Expr(it) => it.syntax(),
                Stmt::Other(it) => it,
            }
        }
    }

    // Expressions ------------------------------------------------------

    /// Any expression kind, as a closed sum.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Expr {
        Assign(AssignExpr),
        Bin(BinExpr),
        Prefix(PrefixExpr),
        Paren(ParenExpr),
        Call(CallExpr),
        Member(MemberExpr),
        Index(IndexExpr),
        New(NewExpr),
        Initializer(InitializerList),
        Literal(Literal),
        NameRef(NameRef),
        This(ThisExpr),
    }

    impl Expr {
        pub fn cast(syntax: SyntaxNode) -> Option<Expr> {
            let expr = match syntax.kind() {
                ASSIGN_EXPR => Expr::Assign(AssignExpr(syntax)),
                BIN_EXPR => Expr::Bin(BinExpr(syntax)),
                PREFIX_EXPR => Expr::Prefix(PrefixExpr(syntax)),
                PAREN_EXPR => Expr::Paren(ParenExpr(syntax)),
                CALL_EXPR => Expr::Call(CallExpr(syntax)),
                MEMBER_EXPR => Expr::Member(MemberExpr(syntax)),
                INDEX_EXPR => Expr::Index(IndexExpr(syntax)),
                NEW_EXPR => Expr::New(NewExpr(syntax)),
                INITIALIZER_LIST => Expr::Initializer(InitializerList(syntax)),
                LITERAL => Expr::Literal(Literal(syntax)),
                NAME_REF => Expr::NameRef(NameRef(syntax)),
                THIS_EXPR => Expr::This(ThisExpr(syntax)),
                _ => return None,
            };
            Some(expr)
        }

        pub fn syntax(&self) -> &SyntaxNode {
            match self {
                Expr::Assign(it) => it.syntax(),
                Expr::Bin(it) => it.syntax(),
                Expr::Prefix(it) => it.syntax(),
                Expr::Paren(it) => it.syntax(),
                Expr::Call(it) => it.syntax(),
                Expr::Member(it) => it.syntax(),
                Expr::Index(it) => it.syntax(),
                Expr::New(it) => it.syntax(),
                Expr::Initializer(it) => it.syntax(),
                Expr::Literal(it) => it.syntax(),
                Expr::NameRef(it) => it.syntax(),
                Expr::This(it) => it.syntax(),
            }
        }

        pub fn text(&self) -> String {
            self.syntax().text().to_string()
        }

        /// `Some(true)`/`Some(false)` for the boolean literals, else None.
        pub fn as_bool_literal(&self) -> Option<bool> {
            if let Expr::Literal(literal) = self {
                match literal.token()?.kind() {
                    TRUE_KW => return Some(true),
                    FALSE_KW => return Some(false),
                    _ => {}
                }
            }
            None
        }

        /// True when the top-level operator is `||`.
        pub fn is_logical_or(&self) -> bool {
            matches!(self, Expr::Bin(bin) if bin.op_kind() == Some(PIPEPIPE))
        }

        /// True when the expression can stand as an `&&` operand without
        /// parentheses. `&&` chains stay flat; `||` and assignments need
        /// the parens.
        pub fn safe_as_and_operand(&self) -> bool {
            match self {
                Expr::Assign(_) => false,
                Expr::Bin(bin) => !matches!(bin.op_kind(), Some(PIPEPIPE)),
                _ => true,
            }
        }
    }

    /// Compare two expressions by their significant token streams,
    /// ignoring trivia. This is the "syntactically equivalent" test of the
    /// rewrite rules.
    pub fn syntactically_equal(a: &SyntaxNode, b: &SyntaxNode) -> bool {
        let tokens = |node: &SyntaxNode| {
            node.descendants_with_tokens()
                .filter_map(|element| element.into_token())
                .filter(|token| !token.kind().is_trivia())
                .map(|token| (token.kind(), token.text().to_string()))
                .collect::<Vec<_>>()
        };
        tokens(a) == tokens(b)
    }

    // Accessors ---------------------------------------------------------

    impl SourceFile {
        pub fn classes(&self) -> impl Iterator<Item = ClassDecl> {
            self.0.children().filter_map(ClassDecl::cast)
        }

        pub fn statements(&self) -> impl Iterator<Item = Stmt> {
            self.0.children().filter_map(Stmt::cast)
        }
    }

    impl ClassDecl {
        pub fn name(&self) -> Option<Name> {
            child_node(&self.0)
        }

        pub fn name_text(&self) -> Option<String> {
            self.name().map(|name| name.text().trim().to_string())
        }

        pub fn attr_lists(&self) -> impl Iterator<Item = AttrList> {
            self.0.children().filter_map(AttrList::cast)
        }

        pub fn has_modifier(&self, kind: SyntaxKind) -> bool {
            child_token(&self.0, kind).is_some()
        }

        pub fn is_partial(&self) -> bool {
            self.has_modifier(PARTIAL_KW)
        }

        pub fn fields(&self) -> impl Iterator<Item = FieldDecl> {
            self.0.children().filter_map(FieldDecl::cast)
        }

        pub fn properties(&self) -> impl Iterator<Item = PropertyDecl> {
            self.0.children().filter_map(PropertyDecl::cast)
        }

        pub fn methods(&self) -> impl Iterator<Item = MethodDecl> {
            self.0.children().filter_map(MethodDecl::cast)
        }
    }

    impl AttrList {
        pub fn attrs(&self) -> impl Iterator<Item = Attr> {
            self.0.children().filter_map(Attr::cast)
        }
    }

    impl Attr {
        pub fn name_text(&self) -> Option<String> {
            child_token(&self.0, IDENT).map(|token| token.text().to_string())
        }
    }

    impl FieldDecl {
        pub fn type_ref(&self) -> Option<TypeRef> {
            child_node(&self.0)
        }

        pub fn declarators(&self) -> impl Iterator<Item = VarDeclarator> {
            self.0.children().filter_map(VarDeclarator::cast)
        }

        pub fn attr_lists(&self) -> impl Iterator<Item = AttrList> {
            self.0.children().filter_map(AttrList::cast)
        }

        pub fn has_modifier(&self, kind: SyntaxKind) -> bool {
            child_token(&self.0, kind).is_some()
        }

        pub fn is_static(&self) -> bool {
            self.has_modifier(STATIC_KW)
        }

        pub fn is_volatile(&self) -> bool {
            self.has_modifier(VOLATILE_KW)
        }
    }

    impl VarDeclarator {
        pub fn name(&self) -> Option<Name> {
            child_node(&self.0)
        }

        pub fn name_text(&self) -> Option<String> {
            self.name().map(|name| name.text().trim().to_string())
        }

        pub fn initializer(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }
    }

    impl PropertyDecl {
        pub fn type_ref(&self) -> Option<TypeRef> {
            child_node(&self.0)
        }

        pub fn name(&self) -> Option<Name> {
            child_node(&self.0)
        }

        pub fn name_text(&self) -> Option<String> {
            self.name().map(|name| name.text().trim().to_string())
        }

        pub fn accessor_list(&self) -> Option<AccessorList> {
            child_node(&self.0)
        }

        pub fn has_modifier(&self, kind: SyntaxKind) -> bool {
            child_token(&self.0, kind).is_some()
        }

        pub fn is_static(&self) -> bool {
            self.has_modifier(STATIC_KW)
        }

        pub fn attr_lists(&self) -> impl Iterator<Item = AttrList> {
            self.0.children().filter_map(AttrList::cast)
        }

        /// Initializer expression after the accessor list, if any.
        pub fn initializer(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }
    }

    impl AccessorList {
        pub fn accessors(&self) -> impl Iterator<Item = Accessor> {
            self.0.children().filter_map(Accessor::cast)
        }

        pub fn getter(&self) -> Option<Accessor> {
            self.accessors().find(Accessor::is_get)
        }

        pub fn setter(&self) -> Option<Accessor> {
            self.accessors().find(Accessor::is_set)
        }
    }

    impl Accessor {
        pub fn is_get(&self) -> bool {
            child_token(&self.0, GET_KW).is_some()
        }

        pub fn is_set(&self) -> bool {
            child_token(&self.0, SET_KW).is_some()
        }

        pub fn body(&self) -> Option<Block> {
            child_node(&self.0)
        }

        /// An accessor with no block body (`get;`).
        pub fn is_auto(&self) -> bool {
            self.body().is_none()
        }
    }

    impl MethodDecl {
        pub fn type_ref(&self) -> Option<TypeRef> {
            child_node(&self.0)
        }

        pub fn name(&self) -> Option<Name> {
            child_node(&self.0)
        }

        pub fn name_text(&self) -> Option<String> {
            self.name().map(|name| name.text().trim().to_string())
        }

        pub fn param_list(&self) -> Option<ParamList> {
            child_node(&self.0)
        }

        pub fn body(&self) -> Option<Block> {
            child_node(&self.0)
        }

        pub fn has_modifier(&self, kind: SyntaxKind) -> bool {
            child_token(&self.0, kind).is_some()
        }

        pub fn is_static(&self) -> bool {
            self.has_modifier(STATIC_KW)
        }
    }

    impl ParamList {
        pub fn params(&self) -> impl Iterator<Item = Param> {
            self.0.children().filter_map(Param::cast)
        }
    }

    impl Param {
        pub fn type_ref(&self) -> Option<TypeRef> {
            child_node(&self.0)
        }

        pub fn name(&self) -> Option<Name> {
            child_node(&self.0)
        }

        pub fn name_text(&self) -> Option<String> {
            self.name().map(|name| name.text().trim().to_string())
        }
    }

    impl TypeRef {
        pub fn ident_token(&self) -> Option<SyntaxToken> {
            child_token(&self.0, IDENT)
        }

        pub fn base_name(&self) -> Option<String> {
            self.ident_token().map(|token| token.text().to_string())
        }

        pub fn array_dims(&self) -> usize {
            self.0
                .children_with_tokens()
                .filter(|element| element.kind() == L_BRACKET)
                .count()
        }
    }

    impl Name {
        pub fn ident_token(&self) -> Option<SyntaxToken> {
            child_token(&self.0, IDENT)
        }
    }

    impl Block {
        pub fn statements(&self) -> impl Iterator<Item = Stmt> {
            self.0.children().filter_map(Stmt::cast)
        }

        pub fn l_brace(&self) -> Option<SyntaxToken> {
            child_token(&self.0, L_BRACE)
        }

        pub fn r_brace(&self) -> Option<SyntaxToken> {
            child_token(&self.0, R_BRACE)
        }

        /// The single statement of a one-statement block.
        pub fn single_statement(&self) -> Option<Stmt> {
            let mut statements = self.statements();
            let first = statements.next()?;
            if statements.next().is_some() {
                return None;
            }
            Some(first)
        }
    }

    impl IfStmt {
        pub fn if_token(&self) -> Option<SyntaxToken> {
            child_token(&self.0, IF_KW)
        }

        pub fn l_paren(&self) -> Option<SyntaxToken> {
            child_token(&self.0, L_PAREN)
        }

        pub fn r_paren(&self) -> Option<SyntaxToken> {
            child_token(&self.0, R_PAREN)
        }

        pub fn condition(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }

        /// The branch taken when the condition holds.
        pub fn then_branch(&self) -> Option<Stmt> {
            self.0.children().find_map(Stmt::cast)
        }

        pub fn else_clause(&self) -> Option<ElseClause> {
            child_node(&self.0)
        }
    }

    impl ElseClause {
        pub fn else_token(&self) -> Option<SyntaxToken> {
            child_token(&self.0, ELSE_KW)
        }

        pub fn body(&self) -> Option<Stmt> {
            self.0.children().find_map(Stmt::cast)
        }

        /// The else-if continuation, when the body is another conditional.
        pub fn if_stmt(&self) -> Option<IfStmt> {
            child_node(&self.0)
        }
    }

    impl ReturnStmt {
        pub fn return_token(&self) -> Option<SyntaxToken> {
            child_token(&self.0, RETURN_KW)
        }

        pub fn expr(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }
    }

    impl YieldStmt {
        pub fn yield_token(&self) -> Option<SyntaxToken> {
            child_token(&self.0, YIELD_KW)
        }

        pub fn is_break(&self) -> bool {
            child_token(&self.0, BREAK_KW).is_some()
        }

        pub fn expr(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }
    }

    impl SwitchStmt {
        pub fn scrutinee(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }

        pub fn sections(&self) -> impl Iterator<Item = CaseSection> {
            self.0.children().filter_map(CaseSection::cast)
        }
    }

    impl CaseSection {
        pub fn labels(&self) -> impl Iterator<Item = CaseLabel> {
            self.0.children().filter_map(CaseLabel::cast)
        }

        pub fn statements(&self) -> impl Iterator<Item = Stmt> {
            self.0.children().filter_map(Stmt::cast)
        }
    }

    impl LocalDecl {
        pub fn type_ref(&self) -> Option<TypeRef> {
            child_node(&self.0)
        }

        pub fn declarators(&self) -> impl Iterator<Item = VarDeclarator> {
            self.0.children().filter_map(VarDeclarator::cast)
        }
    }

    impl ExprStmt {
        pub fn expr(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }
    }

    impl AssignExpr {
        pub fn lhs(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }

        pub fn rhs(&self) -> Option<Expr> {
            self.0.children().filter_map(Expr::cast).nth(1)
        }
    }

    impl BinExpr {
        pub fn lhs(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }

        pub fn rhs(&self) -> Option<Expr> {
            self.0.children().filter_map(Expr::cast).nth(1)
        }

        pub fn op_token(&self) -> Option<SyntaxToken> {
            self.0
                .children_with_tokens()
                .filter_map(|element| element.into_token())
                .find(|token| !token.kind().is_trivia())
        }

        pub fn op_kind(&self) -> Option<SyntaxKind> {
            self.op_token().map(|token| token.kind())
        }
    }

    impl PrefixExpr {
        pub fn op_token(&self) -> Option<SyntaxToken> {
            self.0
                .children_with_tokens()
                .filter_map(|element| element.into_token())
                .find(|token| matches!(token.kind(), BANG | MINUS))
        }

        pub fn operand(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }

        pub fn is_negation(&self) -> bool {
            self.op_token().is_some_and(|token| token.kind() == BANG)
        }
    }

    impl ParenExpr {
        pub fn inner(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }
    }

    impl CallExpr {
        pub fn callee(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }

        pub fn arg_list(&self) -> Option<ArgList> {
            child_node(&self.0)
        }

        /// Receiver and method name for `receiver.Method(...)` calls.
        pub fn method_call_parts(&self) -> Option<(Expr, String)> {
            if let Some(Expr::Member(member)) = self.callee() {
                let receiver = member.receiver()?;
                let name = member.name_text()?;
                return Some((receiver, name));
            }
            None
        }
    }

    impl ArgList {
        pub fn args(&self) -> impl Iterator<Item = Expr> {
            self.0.children().filter_map(Expr::cast)
        }

        pub fn arg_count(&self) -> usize {
            self.args().count()
        }
    }

    impl MemberExpr {
        pub fn receiver(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }

        pub fn name_ref(&self) -> Option<NameRef> {
            // The member name is the NAME_REF after the dot; a NAME_REF
            // receiver comes first in document order
            self.0.children().filter_map(NameRef::cast).last()
        }

        pub fn name_text(&self) -> Option<String> {
            self.name_ref().map(|name| name.text().trim().to_string())
        }
    }

    impl IndexExpr {
        pub fn base(&self) -> Option<Expr> {
            self.0.children().find_map(Expr::cast)
        }

        pub fn index(&self) -> Option<Expr> {
            self.0.children().filter_map(Expr::cast).nth(1)
        }
    }

    impl NewExpr {
        pub fn type_ref(&self) -> Option<TypeRef> {
            child_node(&self.0)
        }

        pub fn arg_list(&self) -> Option<ArgList> {
            child_node(&self.0)
        }

        pub fn initializer(&self) -> Option<InitializerList> {
            child_node(&self.0)
        }
    }

    impl InitializerList {
        pub fn elements(&self) -> impl Iterator<Item = Expr> {
            self.0.children().filter_map(Expr::cast)
        }

        pub fn element_count(&self) -> usize {
            self.elements().count()
        }

        pub fn separators(&self) -> impl Iterator<Item = SyntaxToken> {
            self.0
                .children_with_tokens()
                .filter_map(|element| element.into_token())
                .filter(|token| token.kind() == COMMA)
        }

        pub fn separator_count(&self) -> usize {
            self.separators().count()
        }

        pub fn r_brace(&self) -> Option<SyntaxToken> {
            child_token(&self.0, R_BRACE)
        }
    }

    impl Literal {
        pub fn token(&self) -> Option<SyntaxToken> {
            self.0
                .children_with_tokens()
                .filter_map(|element| element.into_token())
                .find(|token| !token.kind().is_trivia())
        }
    }

    impl NameRef {
        pub fn ident_token(&self) -> Option<SyntaxToken> {
            child_token(&self.0, IDENT)
        }
    }
}
