// Copyright (C) Brian G. Milnes 2025

//! Trivia relocation protocol
//!
//! Shared logic every rewriter uses to decide which comments, whitespace
//! and directives move, merge, or are dropped when a span is deleted or
//! merged. Whitespace may be discarded; comments and directives must be
//! relocated verbatim into the replacement or the rewrite is withheld.

pub mod trivia {
    use crate::syntax::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};
    use rowan::TextRange;

    /// One atom of non-semantic content.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TriviaAtom {
        pub kind: SyntaxKind,
        pub text: String,
        pub range: TextRange,
    }

    impl TriviaAtom {
        fn from_token(token: &SyntaxToken) -> TriviaAtom {
            TriviaAtom {
                kind: token.kind(),
                text: token.text().to_string(),
                range: token.text_range(),
            }
        }

        pub fn is_protected(&self) -> bool {
            self.kind.is_protected_trivia()
        }
    }

    fn trivia_tokens_in(root: &SyntaxNode, range: TextRange) -> Vec<SyntaxToken> {
        root.descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| token.kind().is_trivia())
            .filter(|token| range.contains_range(token.text_range()))
            .collect()
    }

    /// Every trivia atom lying fully inside the range.
    pub fn atoms_in_range(root: &SyntaxNode, range: TextRange) -> Vec<TriviaAtom> {
        trivia_tokens_in(root, range)
            .iter()
            .map(TriviaAtom::from_token)
            .collect()
    }

    /// The atoms a rewrite of this range must find a destination for.
    pub fn protected_atoms_in_range(root: &SyntaxNode, range: TextRange) -> Vec<TriviaAtom> {
        atoms_in_range(root, range)
            .into_iter()
            .filter(TriviaAtom::is_protected)
            .collect()
    }

    /// True when any comment or directive lies fully inside the range.
    pub fn has_protected_trivia(root: &SyntaxNode, range: TextRange) -> bool {
        !protected_atoms_in_range(root, range).is_empty()
    }

    /// Trivia tokens immediately preceding the node's first token.
    pub fn leading_trivia(node: &SyntaxNode) -> Vec<TriviaAtom> {
        let mut atoms = Vec::new();
        let mut token = node.first_token().and_then(|first| first.prev_token());
        while let Some(current) = token {
            if !current.kind().is_trivia() {
                break;
            }
            atoms.push(TriviaAtom::from_token(&current));
            token = current.prev_token();
        }
        atoms.reverse();
        atoms
    }

    /// Trivia tokens following the node's last token, up to and including
    /// the first end-of-line.
    pub fn trailing_trivia(node: &SyntaxNode) -> Vec<TriviaAtom> {
        let mut atoms = Vec::new();
        let mut token = node.last_token().and_then(|last| last.next_token());
        while let Some(current) = token {
            if !current.kind().is_trivia() {
                break;
            }
            let is_eol = current.kind() == SyntaxKind::EOL;
            atoms.push(TriviaAtom::from_token(&current));
            if is_eol {
                break;
            }
            token = current.next_token();
        }
        atoms
    }

    /// The whitespace run opening the node's line, copied when a rewrite
    /// constructs multi-line replacements. Never computed, only copied.
    pub fn indentation_of(node: &SyntaxNode) -> String {
        let mut token = node.first_token().and_then(|first| first.prev_token());
        let mut indent = String::new();
        while let Some(current) = token {
            match current.kind() {
                SyntaxKind::WHITESPACE => {
                    indent = current.text().to_string();
                    token = current.prev_token();
                }
                SyntaxKind::EOL => return indent,
                _ => return String::new(),
            }
        }
        // Start of file counts as a line start
        indent
    }

    /// A relocation plan over one removed span: the rule marks each
    /// protected atom it has given a destination in the replacement text;
    /// an unaccounted atom vetoes the rewrite.
    #[derive(Debug)]
    pub struct RelocationPlan {
        protected: Vec<TriviaAtom>,
    }

    impl RelocationPlan {
        pub fn for_range(root: &SyntaxNode, range: TextRange) -> RelocationPlan {
            RelocationPlan { protected: protected_atoms_in_range(root, range) }
        }

        pub fn protected(&self) -> &[TriviaAtom] {
            &self.protected
        }

        /// True when every protected atom's text occurs verbatim in the
        /// replacement, counted as a multiset: relocated, never dropped.
        pub fn accounted_for_by(&self, replacement: &str) -> bool {
            let mut rest = replacement.to_string();
            for atom in &self.protected {
                match rest.find(&atom.text) {
                    Some(position) => {
                        rest.replace_range(position..position + atom.text.len(), "");
                    }
                    None => return false,
                }
            }
            true
        }

        /// Shorthand for the common all-or-nothing policy: a replacement
        /// is usable only if it accounts for every protected atom.
        pub fn permits(&self, replacement: &str) -> bool {
            self.protected.is_empty() || self.accounted_for_by(replacement)
        }
    }
}
