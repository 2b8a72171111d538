// Copyright (C) Brian G. Milnes 2025

//! Recursive-descent parser producing a lossless rowan tree
//!
//! Trivia tokens are flushed to the innermost open node just before the
//! next significant token, so node ranges start at significant tokens and
//! the tree's text reproduces the source byte for byte.

pub mod parser {
    use crate::lexer::lexer::{tokenize, Token};
    use crate::syntax::syntax::{SyntaxKind, SyntaxNode};
    use anyhow::Result;
    use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, Language};
    use SyntaxKind::*;

    #[derive(Debug, Clone)]
    pub struct ParseError {
        pub message: String,
        pub offset: usize,
    }

    /// Result of parsing: the green tree plus any recovered errors.
    pub struct Parse {
        green: GreenNode,
        errors: Vec<ParseError>,
    }

    impl Parse {
        pub fn syntax(&self) -> SyntaxNode {
            SyntaxNode::new_root(self.green.clone())
        }

        pub fn green(&self) -> GreenNode {
            self.green.clone()
        }

        pub fn errors(&self) -> &[ParseError] {
            &self.errors
        }

        pub fn ok(&self) -> bool {
            self.errors.is_empty()
        }
    }

    /// Parse a source file, recovering from errors.
    pub fn parse(source: &str) -> Parse {
        let tokens = tokenize(source);
        let mut offsets = Vec::with_capacity(tokens.len());
        let mut offset = 0;
        for token in &tokens {
            offsets.push(offset);
            offset += token.len;
        }
        let mut parser = Parser {
            source,
            tokens,
            offsets,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        };
        parser.parse_source_file();
        Parse { green: parser.builder.finish(), errors: parser.errors }
    }

    /// Parse a source file, failing on any parse error
    pub fn parse_source(source: &str) -> Result<SyntaxNode> {
        let parsed = parse(source);
        if !parsed.ok() {
            let first = &parsed.errors()[0];
            return Err(anyhow::anyhow!(
                "Parse error at offset {}: {}",
                first.offset,
                first.message
            ));
        }
        Ok(parsed.syntax())
    }

    struct Parser<'a> {
        source: &'a str,
        tokens: Vec<Token>,
        offsets: Vec<usize>,
        pos: usize,
        builder: GreenNodeBuilder<'static>,
        errors: Vec<ParseError>,
    }

    impl Parser<'_> {
        // Token access -------------------------------------------------

        fn nth_significant(&self, n: usize) -> Option<usize> {
            let mut seen = 0;
            for index in self.pos..self.tokens.len() {
                if self.tokens[index].kind.is_trivia() {
                    continue;
                }
                if seen == n {
                    return Some(index);
                }
                seen += 1;
            }
            None
        }

        fn current(&self) -> Option<SyntaxKind> {
            self.nth_significant(0).map(|i| self.tokens[i].kind)
        }

        fn nth(&self, n: usize) -> Option<SyntaxKind> {
            self.nth_significant(n).map(|i| self.tokens[i].kind)
        }

        fn at(&self, kind: SyntaxKind) -> bool {
            self.current() == Some(kind)
        }

        fn at_eof(&self) -> bool {
            self.current().is_none()
        }

        fn current_offset(&self) -> usize {
            self.nth_significant(0)
                .map(|i| self.offsets[i])
                .unwrap_or(self.source.len())
        }

        // Tree building ------------------------------------------------

        fn raw(kind: SyntaxKind) -> rowan::SyntaxKind {
            <crate::syntax::syntax::CLang as Language>::kind_to_raw(kind)
        }

        fn push_token(&mut self, index: usize) {
            let token = self.tokens[index];
            let start = self.offsets[index];
            let text = &self.source[start..start + token.len];
            self.builder.token(Self::raw(token.kind), text);
        }

        fn eat_trivia(&mut self) {
            while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
                self.push_token(self.pos);
                self.pos += 1;
            }
        }

        fn bump(&mut self) {
            self.eat_trivia();
            if self.pos < self.tokens.len() {
                self.push_token(self.pos);
                self.pos += 1;
            }
        }

        fn start_node(&mut self, kind: SyntaxKind) {
            self.eat_trivia();
            self.builder.start_node(Self::raw(kind));
        }

        fn finish_node(&mut self) {
            self.builder.finish_node();
        }

        fn checkpoint(&mut self) -> Checkpoint {
            self.eat_trivia();
            self.builder.checkpoint()
        }

        fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
            self.builder.start_node_at(checkpoint, Self::raw(kind));
        }

        fn eat(&mut self, kind: SyntaxKind) -> bool {
            if self.at(kind) {
                self.bump();
                true
            } else {
                false
            }
        }

        fn expect(&mut self, kind: SyntaxKind) {
            if !self.eat(kind) {
                self.error(format!("expected {kind:?}, found {:?}", self.current()));
            }
        }

        fn error(&mut self, message: String) {
            let offset = self.current_offset();
            self.errors.push(ParseError { message, offset });
        }

        fn error_and_bump(&mut self, message: &str) {
            self.error(message.to_string());
            self.start_node(ERROR);
            self.bump();
            self.finish_node();
        }

        // Declarations -------------------------------------------------

        fn parse_source_file(&mut self) {
            self.builder.start_node(Self::raw(SOURCE_FILE));
            while !self.at_eof() {
                if self.at_class_decl_start() {
                    self.parse_class_decl();
                } else {
                    self.parse_statement();
                }
            }
            self.eat_trivia();
            self.finish_node();
        }

        fn at_class_decl_start(&self) -> bool {
            // Modifiers and attribute lists may precede `class`
            let mut n = 0;
            loop {
                match self.nth(n) {
                    Some(CLASS_KW) => return true,
                    Some(k) if k.is_modifier() => n += 1,
                    Some(L_BRACKET) if n == 0 => {
                        // An attribute list at statement level only ever
                        // introduces a declaration in this subset
                        return true;
                    }
                    _ => return false,
                }
            }
        }

        fn parse_attr_lists(&mut self) {
            while self.at(L_BRACKET) {
                self.start_node(ATTR_LIST);
                self.bump();
                while !self.at(R_BRACKET) && !self.at_eof() {
                    self.start_node(ATTR);
                    self.expect(IDENT);
                    if self.at(L_PAREN) {
                        self.parse_arg_list();
                    }
                    self.finish_node();
                    if !self.eat(COMMA) {
                        break;
                    }
                }
                self.expect(R_BRACKET);
                self.finish_node();
            }
        }

        fn parse_modifiers(&mut self) {
            while self.current().is_some_and(SyntaxKind::is_modifier) {
                self.bump();
            }
        }

        fn parse_class_decl(&mut self) {
            self.start_node(CLASS_DECL);
            self.parse_attr_lists();
            self.parse_modifiers();
            self.expect(CLASS_KW);
            self.parse_name();
            self.expect(L_BRACE);
            while !self.at(R_BRACE) && !self.at_eof() {
                self.parse_member();
            }
            self.expect(R_BRACE);
            self.finish_node();
        }

        fn parse_name(&mut self) {
            self.start_node(NAME);
            self.expect(IDENT);
            self.finish_node();
        }

        fn parse_member(&mut self) {
            let checkpoint = self.checkpoint();
            self.parse_attr_lists();
            self.parse_modifiers();
            if self.at(CLASS_KW) {
                self.start_node_at(checkpoint, CLASS_DECL);
                self.expect(CLASS_KW);
                self.parse_name();
                self.expect(L_BRACE);
                while !self.at(R_BRACE) && !self.at_eof() {
                    self.parse_member();
                }
                self.expect(R_BRACE);
                self.finish_node();
                return;
            }
            if !self.at(IDENT) {
                self.error_and_bump("expected member declaration");
                return;
            }
            self.parse_type_ref();
            let name_checkpoint = self.checkpoint();
            self.parse_name();
            match self.current() {
                Some(L_PAREN) => {
                    self.start_node_at(checkpoint, METHOD_DECL);
                    self.parse_param_list();
                    self.parse_block();
                    self.finish_node();
                }
                Some(L_BRACE) => {
                    self.start_node_at(checkpoint, PROPERTY_DECL);
                    self.parse_accessor_list();
                    if self.eat(EQ) {
                        self.parse_expr();
                        self.expect(SEMICOLON);
                    }
                    self.finish_node();
                }
                _ => {
                    self.start_node_at(checkpoint, FIELD_DECL);
                    // Retroactively wrap the already-parsed NAME into the
                    // first declarator, then its optional initializer
                    self.start_node_at(name_checkpoint, VAR_DECLARATOR);
                    if self.eat(EQ) {
                        self.parse_expr();
                    }
                    self.finish_node();
                    while self.eat(COMMA) {
                        self.parse_var_declarator();
                    }
                    self.expect(SEMICOLON);
                    self.finish_node();
                }
            }
        }

        fn parse_var_declarator(&mut self) {
            self.start_node(VAR_DECLARATOR);
            self.parse_name();
            if self.eat(EQ) {
                self.parse_expr();
            }
            self.finish_node();
        }

        fn parse_type_ref(&mut self) {
            self.start_node(TYPE_REF);
            self.expect(IDENT);
            while self.at(L_BRACKET) && self.nth(1) == Some(R_BRACKET) {
                self.bump();
                self.bump();
            }
            self.finish_node();
        }

        fn parse_param_list(&mut self) {
            self.start_node(PARAM_LIST);
            self.expect(L_PAREN);
            while !self.at(R_PAREN) && !self.at_eof() {
                self.start_node(PARAM);
                self.parse_type_ref();
                self.parse_name();
                self.finish_node();
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.expect(R_PAREN);
            self.finish_node();
        }

        fn parse_accessor_list(&mut self) {
            self.start_node(ACCESSOR_LIST);
            self.expect(L_BRACE);
            while (self.at(GET_KW) || self.at(SET_KW)) && !self.at_eof() {
                self.start_node(ACCESSOR);
                self.bump();
                if self.at(L_BRACE) {
                    self.parse_block();
                } else {
                    self.expect(SEMICOLON);
                }
                self.finish_node();
            }
            self.expect(R_BRACE);
            self.finish_node();
        }

        // Statements ---------------------------------------------------

        fn parse_statement(&mut self) {
            match self.current() {
                Some(L_BRACE) => self.parse_block(),
                Some(IF_KW) => self.parse_if(),
                Some(RETURN_KW) => {
                    self.start_node(RETURN_STMT);
                    self.bump();
                    if !self.at(SEMICOLON) {
                        self.parse_expr();
                    }
                    self.expect(SEMICOLON);
                    self.finish_node();
                }
                Some(YIELD_KW) => {
                    self.start_node(YIELD_STMT);
                    self.bump();
                    if self.eat(BREAK_KW) {
                        // yield break carries no operand
                    } else {
                        self.expect(RETURN_KW);
                        self.parse_expr();
                    }
                    self.expect(SEMICOLON);
                    self.finish_node();
                }
                Some(SWITCH_KW) => self.parse_switch(),
                Some(BREAK_KW) => {
                    self.start_node(BREAK_STMT);
                    self.bump();
                    self.expect(SEMICOLON);
                    self.finish_node();
                }
                Some(SEMICOLON) => {
                    self.start_node(EMPTY_STMT);
                    self.bump();
                    self.finish_node();
                }
                Some(IDENT) if self.at_local_decl() => self.parse_local_decl(),
                Some(_) => {
                    if self.at_expr_start() {
                        self.start_node(EXPR_STMT);
                        self.parse_expr();
                        self.expect(SEMICOLON);
                        self.finish_node();
                    } else {
                        self.error_and_bump("expected statement");
                    }
                }
                None => {}
            }
        }

        fn at_local_decl(&self) -> bool {
            match self.nth(1) {
                Some(IDENT) => true,
                Some(L_BRACKET) => self.nth(2) == Some(R_BRACKET),
                _ => false,
            }
        }

        fn at_expr_start(&self) -> bool {
            matches!(
                self.current(),
                Some(
                    IDENT
                        | INT_NUMBER
                        | STRING
                        | TRUE_KW
                        | FALSE_KW
                        | L_PAREN
                        | BANG
                        | MINUS
                        | NEW_KW
                        | THIS_KW
                        | L_BRACE
                )
            )
        }

        fn parse_block(&mut self) {
            self.start_node(BLOCK);
            self.expect(L_BRACE);
            while !self.at(R_BRACE) && !self.at_eof() {
                self.parse_statement();
            }
            self.expect(R_BRACE);
            self.finish_node();
        }

        fn parse_if(&mut self) {
            self.start_node(IF_STMT);
            self.expect(IF_KW);
            self.expect(L_PAREN);
            self.parse_expr();
            self.expect(R_PAREN);
            self.parse_statement();
            if self.at(ELSE_KW) {
                self.start_node(ELSE_CLAUSE);
                self.bump();
                self.parse_statement();
                self.finish_node();
            }
            self.finish_node();
        }

        fn parse_switch(&mut self) {
            self.start_node(SWITCH_STMT);
            self.expect(SWITCH_KW);
            self.expect(L_PAREN);
            self.parse_expr();
            self.expect(R_PAREN);
            self.expect(L_BRACE);
            while (self.at(CASE_KW) || self.at(DEFAULT_KW)) && !self.at_eof() {
                self.parse_case_section();
            }
            self.expect(R_BRACE);
            self.finish_node();
        }

        fn parse_case_section(&mut self) {
            self.start_node(CASE_SECTION);
            while self.at(CASE_KW) || self.at(DEFAULT_KW) {
                self.start_node(CASE_LABEL);
                if self.eat(CASE_KW) {
                    self.parse_expr();
                } else {
                    self.bump();
                }
                self.expect(COLON);
                self.finish_node();
            }
            while !self.at(CASE_KW) && !self.at(DEFAULT_KW) && !self.at(R_BRACE) && !self.at_eof()
            {
                self.parse_statement();
            }
            self.finish_node();
        }

        fn parse_local_decl(&mut self) {
            self.start_node(LOCAL_DECL);
            self.parse_type_ref();
            self.parse_var_declarator();
            while self.eat(COMMA) {
                self.parse_var_declarator();
            }
            self.expect(SEMICOLON);
            self.finish_node();
        }

        // Expressions --------------------------------------------------

        fn parse_expr(&mut self) {
            self.parse_assign();
        }

        fn parse_assign(&mut self) {
            let checkpoint = self.checkpoint();
            self.parse_binary(0);
            if self.at(EQ) {
                self.start_node_at(checkpoint, ASSIGN_EXPR);
                self.bump();
                self.parse_assign();
                self.finish_node();
            }
        }

        fn binary_op_precedence(kind: SyntaxKind) -> Option<u8> {
            let precedence = match kind {
                PIPEPIPE => 1,
                AMPAMP => 2,
                EQEQ | NEQ => 3,
                LT | GT | LTEQ | GTEQ => 4,
                PLUS | MINUS => 5,
                STAR | SLASH | PERCENT => 6,
                _ => return None,
            };
            Some(precedence)
        }

        fn parse_binary(&mut self, min_precedence: u8) {
            let checkpoint = self.checkpoint();
            self.parse_unary();
            while let Some(op) = self.current() {
                let Some(precedence) = Self::binary_op_precedence(op) else {
                    break;
                };
                if precedence < min_precedence {
                    break;
                }
                self.start_node_at(checkpoint, BIN_EXPR);
                self.bump();
                self.parse_binary(precedence + 1);
                self.finish_node();
            }
        }

        fn parse_unary(&mut self) {
            if self.at(BANG) || self.at(MINUS) {
                self.start_node(PREFIX_EXPR);
                self.bump();
                self.parse_unary();
                self.finish_node();
            } else {
                self.parse_postfix();
            }
        }

        fn parse_postfix(&mut self) {
            let checkpoint = self.checkpoint();
            self.parse_primary();
            loop {
                match self.current() {
                    Some(L_PAREN) => {
                        self.start_node_at(checkpoint, CALL_EXPR);
                        self.parse_arg_list();
                        self.finish_node();
                    }
                    Some(DOT) => {
                        self.start_node_at(checkpoint, MEMBER_EXPR);
                        self.bump();
                        self.start_node(NAME_REF);
                        self.expect(IDENT);
                        self.finish_node();
                        self.finish_node();
                    }
                    Some(L_BRACKET) => {
                        self.start_node_at(checkpoint, INDEX_EXPR);
                        self.bump();
                        self.parse_expr();
                        self.expect(R_BRACKET);
                        self.finish_node();
                    }
                    _ => break,
                }
            }
        }

        fn parse_arg_list(&mut self) {
            self.start_node(ARG_LIST);
            self.expect(L_PAREN);
            while !self.at(R_PAREN) && !self.at_eof() {
                self.parse_expr();
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.expect(R_PAREN);
            self.finish_node();
        }

        fn parse_primary(&mut self) {
            match self.current() {
                Some(L_PAREN) => {
                    self.start_node(PAREN_EXPR);
                    self.bump();
                    self.parse_expr();
                    self.expect(R_PAREN);
                    self.finish_node();
                }
                Some(INT_NUMBER | STRING | TRUE_KW | FALSE_KW) => {
                    self.start_node(LITERAL);
                    self.bump();
                    self.finish_node();
                }
                Some(IDENT) => {
                    self.start_node(NAME_REF);
                    self.bump();
                    self.finish_node();
                }
                Some(THIS_KW) => {
                    self.start_node(THIS_EXPR);
                    self.bump();
                    self.finish_node();
                }
                Some(NEW_KW) => {
                    self.start_node(NEW_EXPR);
                    self.bump();
                    self.parse_type_ref();
                    if self.at(L_PAREN) {
                        self.parse_arg_list();
                    }
                    if self.at(L_BRACE) {
                        self.parse_initializer_list();
                    }
                    self.finish_node();
                }
                Some(L_BRACE) => self.parse_initializer_list(),
                _ => self.error_and_bump("expected expression"),
            }
        }

        fn parse_initializer_list(&mut self) {
            self.start_node(INITIALIZER_LIST);
            self.expect(L_BRACE);
            while !self.at(R_BRACE) && !self.at_eof() {
                self.parse_expr();
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.expect(R_BRACE);
            self.finish_node();
        }
    }
}
