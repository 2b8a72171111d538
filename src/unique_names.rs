// Copyright (C) Brian G. Milnes 2025

//! Unique name generator
//!
//! Given a preferred base name and a source of reserved names, returns a
//! fresh collision-free identifier. Reserved-name sources are layered by
//! cost and consulted cheapest first, so a locally colliding candidate
//! never triggers a solution-wide search. Sets are built per request and
//! never cached across requests.

pub mod unique_names {
    use crate::cancel::cancel::CancelToken;
    use crate::semantics::semantics::{
        ReferenceSearch, SemanticModel, Symbol, WorkspaceReferenceSearch,
    };
    use crate::syntax::syntax::SyntaxNode;
    use anyhow::Result;
    use std::collections::BTreeSet;

    /// A materialized set of names a synthesized identifier must avoid.
    #[derive(Debug, Clone, Default)]
    pub struct ReservedNameSet {
        names: BTreeSet<String>,
    }

    impl ReservedNameSet {
        pub fn new() -> ReservedNameSet {
            ReservedNameSet::default()
        }

        pub fn from_names<I, S>(names: I) -> ReservedNameSet
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            ReservedNameSet {
                names: names.into_iter().map(Into::into).collect(),
            }
        }

        pub fn insert(&mut self, name: String) {
            self.names.insert(name);
        }

        pub fn extend<I: IntoIterator<Item = String>>(&mut self, names: I) {
            self.names.extend(names);
        }

        pub fn len(&self) -> usize {
            self.names.len()
        }

        pub fn is_empty(&self) -> bool {
            self.names.is_empty()
        }

        pub fn contains(&self, name: &str, case_sensitive: bool) -> bool {
            if case_sensitive {
                self.names.contains(name)
            } else {
                let lowered = name.to_lowercase();
                self.names.iter().any(|reserved| reserved.to_lowercase() == lowered)
            }
        }
    }

    /// One layer of reserved names, materialized on demand. Variants are
    /// ordered by construction cost.
    pub enum NameSource<'a> {
        /// An already-known set (cheapest).
        Set(ReservedNameSet),
        /// Names visible by lexical scope lookup at a position.
        Scope {
            model: &'a SemanticModel<'a>,
            at: SyntaxNode,
            doc_index: usize,
        },
        /// Declared member names of an enclosing type, overload sets
        /// included by name only.
        Members {
            model: &'a SemanticModel<'a>,
            class_name: String,
        },
        /// Names visible at every non-candidate reference location of a
        /// symbol, found by a solution-wide search. Dominant cost; the
        /// search is cancellable at each reference location.
        References {
            model: &'a SemanticModel<'a>,
            symbol: Symbol,
            cancel: CancelToken,
        },
    }

    impl NameSource<'_> {
        fn materialize(&self) -> Result<ReservedNameSet> {
            match self {
                NameSource::Set(set) => Ok(set.clone()),
                NameSource::Scope { model, at, doc_index } => Ok(ReservedNameSet {
                    names: model.visible_names_at(at, *doc_index),
                }),
                NameSource::Members { model, class_name } => {
                    let names = model
                        .class(class_name)
                        .map(|class| class.member_names())
                        .unwrap_or_default();
                    Ok(ReservedNameSet { names })
                }
                NameSource::References { model, symbol, cancel } => {
                    let search = WorkspaceReferenceSearch::new(model);
                    let locations = search.find_references(symbol, cancel)?;
                    let mut names = BTreeSet::new();
                    for location in locations {
                        cancel.check()?;
                        if location == candidate_location(symbol) {
                            continue;
                        }
                        let document = model.workspace().document(location.doc_index);
                        let root = document.root();
                        if let Some(node) = node_at(&root, location.range) {
                            names.append(&mut model.visible_names_at(&node, location.doc_index));
                        }
                    }
                    Ok(ReservedNameSet { names })
                }
            }
        }
    }

    fn candidate_location(
        symbol: &Symbol,
    ) -> crate::semantics::semantics::Location {
        crate::semantics::semantics::Location {
            doc_index: symbol.doc_index,
            range: symbol.decl_range,
        }
    }

    fn node_at(root: &SyntaxNode, range: rowan::TextRange) -> Option<SyntaxNode> {
        root.descendants()
            .find(|node| node.text_range() == range)
            .or_else(|| {
                root.descendants()
                    .filter(|node| node.text_range().contains_range(range))
                    .last()
            })
    }

    /// Cost-ordered layered sources with per-layer memoization for the
    /// lifetime of one request.
    pub struct ReservedNames<'a> {
        sources: Vec<NameSource<'a>>,
        materialized: Vec<Option<ReservedNameSet>>,
    }

    impl<'a> ReservedNames<'a> {
        pub fn new(sources: Vec<NameSource<'a>>) -> ReservedNames<'a> {
            let count = sources.len();
            ReservedNames { sources, materialized: vec![None; count] }
        }

        pub fn from_set(set: ReservedNameSet) -> ReservedNames<'a> {
            ReservedNames::new(vec![NameSource::Set(set)])
        }

        /// Check sources cheapest first, materializing each only when
        /// every cheaper one cleared the candidate.
        pub fn is_reserved(&mut self, name: &str, case_sensitive: bool) -> Result<bool> {
            for index in 0..self.sources.len() {
                if self.materialized[index].is_none() {
                    self.materialized[index] = Some(self.sources[index].materialize()?);
                }
                let set = self.materialized[index]
                    .as_ref()
                    .expect("just materialized");
                if set.contains(name, case_sensitive) {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }

    /// Append integer suffixes starting at 2 until the candidate is free.
    /// Terminates for every finite reserved set.
    pub fn ensure_unique(
        base_name: &str,
        reserved: &mut ReservedNames<'_>,
        case_sensitive: bool,
    ) -> Result<String> {
        let mut candidate = base_name.to_string();
        let mut suffix = 2u32;
        while reserved.is_reserved(&candidate, case_sensitive)? {
            candidate = format!("{base_name}{suffix}");
            suffix += 1;
        }
        Ok(candidate)
    }

    /// Infallible variant over a single materialized set.
    pub fn ensure_unique_in_set(
        base_name: &str,
        reserved: &ReservedNameSet,
        case_sensitive: bool,
    ) -> String {
        let mut candidate = base_name.to_string();
        let mut suffix = 2u32;
        while reserved.contains(&candidate, case_sensitive) {
            candidate = format!("{base_name}{suffix}");
            suffix += 1;
        }
        candidate
    }

    /// Synthesized asynchronous-operation names carry a fixed suffix; on
    /// collision the counter interleaves before the suffix:
    /// `base` -> `baseAsync` -> `base2Async` -> `base3Async` ...
    pub fn ensure_unique_async_name(
        base_name: &str,
        reserved: &mut ReservedNames<'_>,
        case_sensitive: bool,
    ) -> Result<String> {
        let mut candidate = format!("{base_name}Async");
        let mut counter = 2u32;
        while reserved.is_reserved(&candidate, case_sensitive)? {
            candidate = format!("{base_name}{counter}Async");
            counter += 1;
        }
        Ok(candidate)
    }
}
