// Copyright (C) Brian G. Milnes 2025

//! Syntax kinds and the rowan language binding
//!
//! Defines the closed set of token and node kinds the engine consumes,
//! plus the trivia classification used by the relocation protocol.

pub mod syntax {
    /// Every token and node kind of the source language.
    ///
    /// Kinds the rewriter never touches still parse, but land in the
    /// `ERROR` catch-all rather than growing this enumeration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[allow(non_camel_case_types)]
    #[repr(u16)]
    pub enum SyntaxKind {
        // Trivia tokens
        WHITESPACE = 0,
        EOL,
        LINE_COMMENT,
        BLOCK_COMMENT,
        DIRECTIVE,

        // Literal and name tokens
        IDENT,
        INT_NUMBER,
        STRING,

        // Keyword tokens
        CLASS_KW,
        PARTIAL_KW,
        PUBLIC_KW,
        PRIVATE_KW,
        PROTECTED_KW,
        INTERNAL_KW,
        STATIC_KW,
        READONLY_KW,
        VOLATILE_KW,
        IF_KW,
        ELSE_KW,
        RETURN_KW,
        YIELD_KW,
        SWITCH_KW,
        CASE_KW,
        DEFAULT_KW,
        BREAK_KW,
        NEW_KW,
        THIS_KW,
        GET_KW,
        SET_KW,
        TRUE_KW,
        FALSE_KW,

        // Punctuation tokens
        L_PAREN,
        R_PAREN,
        L_BRACE,
        R_BRACE,
        L_BRACKET,
        R_BRACKET,
        COMMA,
        SEMICOLON,
        COLON,
        DOT,
        EQ,
        EQEQ,
        NEQ,
        LT,
        GT,
        LTEQ,
        GTEQ,
        AMPAMP,
        PIPEPIPE,
        BANG,
        PLUS,
        MINUS,
        STAR,
        SLASH,
        PERCENT,
        ERROR_TOKEN,

        // Nodes
        SOURCE_FILE,
        CLASS_DECL,
        ATTR_LIST,
        ATTR,
        FIELD_DECL,
        VAR_DECLARATOR,
        PROPERTY_DECL,
        ACCESSOR_LIST,
        ACCESSOR,
        METHOD_DECL,
        PARAM_LIST,
        PARAM,
        TYPE_REF,
        NAME,
        BLOCK,
        IF_STMT,
        ELSE_CLAUSE,
        RETURN_STMT,
        YIELD_STMT,
        SWITCH_STMT,
        CASE_SECTION,
        CASE_LABEL,
        LOCAL_DECL,
        EXPR_STMT,
        BREAK_STMT,
        EMPTY_STMT,
        ASSIGN_EXPR,
        BIN_EXPR,
        PREFIX_EXPR,
        PAREN_EXPR,
        CALL_EXPR,
        ARG_LIST,
        MEMBER_EXPR,
        INDEX_EXPR,
        NEW_EXPR,
        INITIALIZER_LIST,
        LITERAL,
        NAME_REF,
        THIS_EXPR,
        ERROR,
    }

    use SyntaxKind::*;

    impl SyntaxKind {
        pub fn is_trivia(self) -> bool {
            matches!(self, WHITESPACE | EOL | LINE_COMMENT | BLOCK_COMMENT | DIRECTIVE)
        }

        /// Trivia the relocation protocol may silently discard.
        pub fn is_whitespace_trivia(self) -> bool {
            matches!(self, WHITESPACE | EOL)
        }

        /// Trivia that must be relocated verbatim or block a rewrite.
        pub fn is_protected_trivia(self) -> bool {
            matches!(self, LINE_COMMENT | BLOCK_COMMENT | DIRECTIVE)
        }

        pub fn is_keyword(self) -> bool {
            (self as u16) >= (CLASS_KW as u16) && (self as u16) <= (FALSE_KW as u16)
        }

        pub fn is_statement(self) -> bool {
            matches!(
                self,
                BLOCK
                    | IF_STMT
                    | RETURN_STMT
                    | YIELD_STMT
                    | SWITCH_STMT
                    | LOCAL_DECL
                    | EXPR_STMT
                    | BREAK_STMT
                    | EMPTY_STMT
            )
        }

        pub fn is_expression(self) -> bool {
            matches!(
                self,
                ASSIGN_EXPR
                    | BIN_EXPR
                    | PREFIX_EXPR
                    | PAREN_EXPR
                    | CALL_EXPR
                    | MEMBER_EXPR
                    | INDEX_EXPR
                    | NEW_EXPR
                    | INITIALIZER_LIST
                    | LITERAL
                    | NAME_REF
                    | THIS_EXPR
            )
        }

        pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
            let kw = match text {
                "class" => CLASS_KW,
                "partial" => PARTIAL_KW,
                "public" => PUBLIC_KW,
                "private" => PRIVATE_KW,
                "protected" => PROTECTED_KW,
                "internal" => INTERNAL_KW,
                "static" => STATIC_KW,
                "readonly" => READONLY_KW,
                "volatile" => VOLATILE_KW,
                "if" => IF_KW,
                "else" => ELSE_KW,
                "return" => RETURN_KW,
                "yield" => YIELD_KW,
                "switch" => SWITCH_KW,
                "case" => CASE_KW,
                "default" => DEFAULT_KW,
                "break" => BREAK_KW,
                "new" => NEW_KW,
                "this" => THIS_KW,
                "get" => GET_KW,
                "set" => SET_KW,
                "true" => TRUE_KW,
                "false" => FALSE_KW,
                _ => return None,
            };
            Some(kw)
        }

        pub fn is_modifier(self) -> bool {
            matches!(
                self,
                PUBLIC_KW | PRIVATE_KW | PROTECTED_KW | INTERNAL_KW | STATIC_KW | READONLY_KW
                    | VOLATILE_KW | PARTIAL_KW
            )
        }
    }

    /// The rowan language for the C-like subject language.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub enum CLang {}

    impl rowan::Language for CLang {
        type Kind = SyntaxKind;

        fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
            assert!(raw.0 <= ERROR as u16);
            unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
        }

        fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
            rowan::SyntaxKind(kind as u16)
        }
    }

    pub type SyntaxNode = rowan::SyntaxNode<CLang>;
    pub type SyntaxToken = rowan::SyntaxToken<CLang>;
    pub type SyntaxElement = rowan::SyntaxElement<CLang>;

    /// Find all nodes of a specific kind in the syntax tree
    pub fn find_nodes(root: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
        root.descendants().filter(|node| node.kind() == kind).collect()
    }

    /// Find all nodes matching a predicate
    pub fn find_nodes_where<F>(root: &SyntaxNode, predicate: F) -> Vec<SyntaxNode>
    where
        F: Fn(&SyntaxNode) -> bool,
    {
        root.descendants().filter(|node| predicate(node)).collect()
    }

    /// Find the first token of a specific kind within a node
    pub fn find_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
        node.descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == kind)
    }

    /// Check if a node is inside another node of a specific kind
    pub fn is_inside_node_kind(node: &SyntaxNode, kind: SyntaxKind) -> bool {
        node.ancestors().skip(1).any(|parent| parent.kind() == kind)
    }

    /// Get the line number of a node (1-indexed)
    pub fn line_number(node: &SyntaxNode, source: &str) -> usize {
        let offset: usize = node.text_range().start().into();
        source[..offset].lines().count() + 1
    }

    /// Get all child nodes of a specific kind
    pub fn children_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
        node.children().filter(|child| child.kind() == kind).collect()
    }
}
