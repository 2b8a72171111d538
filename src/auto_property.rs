// Copyright (C) Brian G. Milnes 2025

//! Auto-property promotion
//!
//! A property whose accessors are a trivial read and write of exactly
//! one private backing field collapses to an auto property: every other
//! reference to the field is redirected to the property across every
//! file declaring part of the containing type, the accessor bodies
//! become an empty accessor list, and the field declaration is deleted.
//! All edits are computed against document snapshots and applied as one
//! atomic update; cancellation aborts the whole rewrite.
//!
//! The paired inverse expands an auto property back into a full
//! property with a synthesized backing field, drawing the field name
//! from the unique name generator.

pub mod auto_property {
    use crate::ast::ast::{
        AstNode, Accessor, AssignExpr, ClassDecl, Expr, PropertyDecl, ReturnStmt, Stmt,
    };
    use crate::rules::rules::{
        Diagnostic, DocumentEdits, Finding, Rewrite, RewriteCandidate, RuleContext, RuleKind,
        Span, TextEdit,
    };
    use crate::semantics::semantics::{
        FieldInfo, Location, ReferenceSearch, SemanticModel, Symbol, WorkspaceReferenceSearch,
    };
    use crate::syntax::syntax::{SyntaxKind, SyntaxNode};
    use crate::trivia::trivia;
    use crate::unique_names::unique_names::{ensure_unique, NameSource, ReservedNames};
    use anyhow::Result;
    use rowan::{TextRange, TextSize};

    pub fn detect(root: &SyntaxNode, ctx: &RuleContext<'_>) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for node in root.descendants() {
            ctx.cancel.check()?;
            let Some(property) = PropertyDecl::cast(node) else {
                continue;
            };
            if let Some(finding) = check_property(root, &property, ctx)? {
                findings.push(finding);
            }
        }
        Ok(findings)
    }

    /// The field a trivial accessor body reads or writes: a bare name or
    /// a `this.`-qualified one.
    fn accessed_field_name(expr: &Expr) -> Option<String> {
        match expr {
            Expr::NameRef(name_ref) => Some(name_ref.text().trim().to_string()),
            Expr::Member(member) => {
                if matches!(member.receiver()?, Expr::This(_)) {
                    member.name_text()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// `get { return field; }`
    fn getter_field(getter: &Accessor) -> Option<(String, ReturnStmt)> {
        let body = getter.body()?;
        let Stmt::Return(return_stmt) = body.single_statement()? else {
            return None;
        };
        let name = accessed_field_name(&return_stmt.expr()?)?;
        Some((name, return_stmt))
    }

    /// `set { field = value; }`
    fn setter_field(setter: &Accessor) -> Option<(String, AssignExpr)> {
        let body = setter.body()?;
        let Stmt::Expr(expr_stmt) = body.single_statement()? else {
            return None;
        };
        let Expr::Assign(assign) = expr_stmt.expr()? else {
            return None;
        };
        let name = accessed_field_name(&assign.lhs()?)?;
        let Expr::NameRef(value) = assign.rhs()? else {
            return None;
        };
        if value.text().trim() != "value" {
            return None;
        }
        Some((name, assign))
    }

    /// The name reference inside an accessor body, for the symbol
    /// identity confirmation.
    fn name_ref_in(expr: &Expr) -> Option<crate::ast::ast::NameRef> {
        match expr {
            Expr::NameRef(name_ref) => Some(name_ref.clone()),
            Expr::Member(member) => member.name_ref(),
            _ => None,
        }
    }

    fn check_property(
        root: &SyntaxNode,
        property: &PropertyDecl,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<Finding>> {
        let model = ctx.model;
        let Some(class) = property.syntax().ancestors().find_map(ClassDecl::cast) else {
            return Ok(None);
        };
        let Some(class_name) = class.name_text() else {
            return Ok(None);
        };
        let Some(accessor_list) = property.accessor_list() else {
            return Ok(None);
        };

        let Some(getter) = accessor_list.getter() else {
            return Ok(None);
        };
        let setter = accessor_list.setter();
        if getter.is_auto() || setter.as_ref().is_some_and(Accessor::is_auto) {
            // Already an auto property
            return Ok(None);
        }

        let Some((field_name, getter_return)) = getter_field(&getter) else {
            return Ok(None);
        };
        let setter_assign = match &setter {
            Some(setter) => match setter_field(setter) {
                Some((name, assign)) if name == field_name => Some(assign),
                // A setter that writes a different field is not trivial
                _ => return Ok(None),
            },
            None => None,
        };

        // Exactly one unambiguous backing field, in the same class
        let Some(symbol) = model.unique_field(&class_name, &field_name) else {
            return Ok(None);
        };
        let Some(field) = model.field_info(&symbol) else {
            return Ok(None);
        };

        // Symbol identity must confirm for each accessor's reference
        let getter_ref = getter_return.expr().and_then(|expr| name_ref_in(&expr));
        let confirmed_getter = getter_ref
            .and_then(|name_ref| model.resolve_name(&name_ref, ctx.doc_index))
            .as_ref()
            == Some(&symbol);
        if !confirmed_getter {
            return Ok(None);
        }
        if let Some(assign) = &setter_assign {
            let setter_ref = assign.lhs().and_then(|lhs| name_ref_in(&lhs));
            let confirmed_setter = setter_ref
                .and_then(|name_ref| model.resolve_name(&name_ref, ctx.doc_index))
                .as_ref()
                == Some(&symbol);
            if !confirmed_setter {
                return Ok(None);
            }
        }

        if !eligible_field(field, property, ctx.doc_index) {
            return Ok(None);
        }
        let Some(class_info) = model.class(&class_name) else {
            return Ok(None);
        };
        if class_info.has_layout_attr {
            return Ok(None);
        }

        // Comments inside the rewritten spans have no destination
        let property_range = property.syntax().text_range();
        if trivia::has_protected_trivia(root, property_range) {
            return Ok(None);
        }
        let field_doc_root = model.workspace().document(field.doc_index).root();
        if trivia::has_protected_trivia(&field_doc_root, field.decl_range) {
            return Ok(None);
        }
        // Merging must not orphan preprocessor directives; a directive
        // adjacent to either span would be left wrapping nothing
        if has_directive_around(property.syntax()) {
            return Ok(None);
        }
        let field_node = field_doc_root
            .descendants()
            .find(|node| node.text_range() == field.decl_range);
        match field_node {
            Some(node) if !has_directive_around(&node) => {}
            _ => return Ok(None),
        }

        let Some(prop_name) = property.name_text() else {
            return Ok(None);
        };

        // Redirect every other reference to the field, across every file
        // declaring part of the containing type
        let search = WorkspaceReferenceSearch::new(model);
        let references = search.find_references(&symbol, ctx.cancel)?;
        let mut per_doc: Vec<DocumentEdits> = Vec::new();
        for location in &references {
            ctx.cancel.check()?;
            if location.doc_index == ctx.doc_index
                && property_range.contains_range(location.range)
            {
                continue;
            }
            if location.doc_index == field.doc_index
                && field.decl_range.contains_range(location.range)
            {
                continue;
            }
            let Some(edit) =
                reference_edit(model, location, &symbol, &class_name, &prop_name)?
            else {
                // A reference shape the rewrite cannot redirect
                return Ok(None);
            };
            if setter_assign.is_none() && edit.is_write {
                // A get-only auto property cannot absorb external writes
                return Ok(None);
            }
            push_edit(&mut per_doc, location.doc_index, edit.edit);
        }

        // Accessor bodies collapse to an empty accessor list
        let mut auto_list = String::from("{ get;");
        if setter_assign.is_some() {
            auto_list.push_str(" set;");
        }
        auto_list.push_str(" }");
        if let Some(initializer) = &field.initializer {
            auto_list.push_str(&format!(" = {initializer};"));
        }
        push_edit(
            &mut per_doc,
            ctx.doc_index,
            TextEdit { range: accessor_list.syntax().text_range(), replacement: auto_list },
        );

        // Delete the backing field, splitting its declaration if needed
        let field_edit = field_deletion_edit(&field_doc_root, field);
        push_edit(&mut per_doc, field.doc_index, field_edit);

        let primary = property
            .name()
            .map(|name| name.syntax().text_range())
            .unwrap_or(property_range);
        Ok(Some(Finding {
            diagnostic: Diagnostic {
                rule_id: RuleKind::AutoProperty.id().to_string(),
                primary_span: primary.into(),
                secondary_fade_spans: vec![Span::from(field.decl_range)],
                message_args: vec![prop_name, field_name],
            },
            rewrite: Rewrite::Workspace(per_doc),
        }))
    }

    /// A directive in the trivia run on either side of the node would be
    /// orphaned by deleting or merging it.
    fn has_directive_around(node: &SyntaxNode) -> bool {
        let mut token = node.first_token().and_then(|first| first.prev_token());
        while let Some(current) = token {
            if !current.kind().is_trivia() {
                break;
            }
            if current.kind() == SyntaxKind::DIRECTIVE {
                return true;
            }
            token = current.prev_token();
        }
        let mut token = node.last_token().and_then(|last| last.next_token());
        while let Some(current) = token {
            if !current.kind().is_trivia() {
                break;
            }
            if current.kind() == SyntaxKind::DIRECTIVE {
                return true;
            }
            token = current.next_token();
        }
        false
    }

    fn eligible_field(field: &FieldInfo, property: &PropertyDecl, doc_index: usize) -> bool {
        field.doc_index == doc_index
            && field.is_private
            && !field.is_volatile
            && !field.has_attrs
            && field.is_static == property.is_static()
            && property
                .type_ref()
                .map(|type_ref| crate::semantics::semantics::Type::from_type_ref(&type_ref))
                .is_some_and(|ty| ty == field.ty)
    }

    struct ReferenceEdit {
        edit: TextEdit,
        is_write: bool,
    }

    /// The single replacement for one reference location: member-access
    /// names are renamed in place, bare identifiers are qualified with
    /// `this.` (or the type name for statics).
    fn reference_edit(
        model: &SemanticModel<'_>,
        location: &Location,
        symbol: &Symbol,
        class_name: &str,
        prop_name: &str,
    ) -> Result<Option<ReferenceEdit>> {
        let root = model.workspace().document(location.doc_index).root();
        let Some(node) = root
            .descendants()
            .find(|node| node.text_range() == location.range
                && node.kind() == SyntaxKind::NAME_REF)
        else {
            return Ok(None);
        };
        let in_member_name_position = node
            .parent()
            .filter(|parent| parent.kind() == SyntaxKind::MEMBER_EXPR)
            .and_then(|parent| crate::ast::ast::MemberExpr::cast(parent))
            .and_then(|member| member.name_ref())
            .is_some_and(|name_ref| name_ref.syntax() == &node);

        let replacement = if in_member_name_position {
            prop_name.to_string()
        } else if symbol.is_static {
            format!("{class_name}.{prop_name}")
        } else {
            format!("this.{prop_name}")
        };

        // The written-to position is the assignment's left-hand side,
        // through any member qualification
        let target = if in_member_name_position {
            node.parent().unwrap_or_else(|| node.clone())
        } else {
            node.clone()
        };
        let is_write = target
            .parent()
            .and_then(AssignExpr::cast)
            .and_then(|assign| assign.lhs())
            .is_some_and(|lhs| lhs.syntax() == &target);

        Ok(Some(ReferenceEdit {
            edit: TextEdit { range: location.range, replacement },
            is_write,
        }))
    }

    /// Delete the field declarator, its whole declaration when it is the
    /// only one, including the line it occupied.
    fn field_deletion_edit(root: &SyntaxNode, field: &FieldInfo) -> TextEdit {
        if field.declarator_count == 1 {
            let range = line_extended_range(root, field.decl_range);
            return TextEdit { range, replacement: String::new() };
        }
        // Split the multi-variable declaration: drop the declarator and
        // one adjacent comma
        let range = declarator_with_comma(root, field.declarator_range)
            .unwrap_or(field.declarator_range);
        TextEdit { range, replacement: String::new() }
    }

    fn declarator_with_comma(root: &SyntaxNode, declarator: TextRange) -> Option<TextRange> {
        let node = root
            .descendants()
            .find(|node| node.text_range() == declarator)?;
        let following_comma = node
            .siblings_with_tokens(rowan::Direction::Next)
            .filter_map(|element| element.into_token())
            .find(|token| !token.kind().is_trivia())
            .filter(|token| token.kind() == SyntaxKind::COMMA);
        if let Some(comma) = following_comma {
            return Some(TextRange::new(declarator.start(), comma.text_range().end()));
        }
        let preceding_comma = node
            .siblings_with_tokens(rowan::Direction::Prev)
            .filter_map(|element| element.into_token())
            .find(|token| !token.kind().is_trivia())
            .filter(|token| token.kind() == SyntaxKind::COMMA)?;
        Some(TextRange::new(preceding_comma.text_range().start(), declarator.end()))
    }

    /// Extend a deletion over its line: the indentation before it and
    /// the line break after it.
    fn line_extended_range(root: &SyntaxNode, range: TextRange) -> TextRange {
        let mut start = range.start();
        let mut end = range.end();
        let node = root
            .descendants()
            .find(|node| node.text_range() == range);
        if let Some(node) = node {
            let mut token = node.first_token().and_then(|first| first.prev_token());
            while let Some(current) = token {
                if current.kind() == SyntaxKind::WHITESPACE {
                    start = current.text_range().start();
                    token = current.prev_token();
                } else {
                    break;
                }
            }
            let mut token = node.last_token().and_then(|last| last.next_token());
            while let Some(current) = token {
                match current.kind() {
                    SyntaxKind::WHITESPACE => {
                        end = current.text_range().end();
                        token = current.next_token();
                    }
                    SyntaxKind::EOL => {
                        end = current.text_range().end();
                        break;
                    }
                    _ => break,
                }
            }
        }
        TextRange::new(start, end)
    }

    fn push_edit(per_doc: &mut Vec<DocumentEdits>, doc_index: usize, edit: TextEdit) {
        if let Some(existing) = per_doc.iter_mut().find(|d| d.doc_index == doc_index) {
            existing.edits.push(edit);
        } else {
            per_doc.push(DocumentEdits { doc_index, edits: vec![edit] });
        }
    }

    // Inverse: expand an auto property -------------------------------------

    /// Expand `int X { get; set; }` into a full property over a fresh
    /// private backing field. The field name comes from the unique name
    /// generator, seeded by the naming-convention preference.
    pub fn expand_auto_property(
        root: &SyntaxNode,
        property: &PropertyDecl,
        ctx: &RuleContext<'_>,
    ) -> Result<Option<RewriteCandidate>> {
        let Some(class_name) = SemanticModel::enclosing_class_name(property.syntax()) else {
            return Ok(None);
        };
        let Some(accessor_list) = property.accessor_list() else {
            return Ok(None);
        };
        let Some(getter) = accessor_list.getter() else {
            return Ok(None);
        };
        let setter = accessor_list.setter();
        if !getter.is_auto() || !setter.as_ref().is_some_and(Accessor::is_auto) {
            return Ok(None);
        }
        let Some(prop_name) = property.name_text() else {
            return Ok(None);
        };
        let Some(type_text) = property.type_ref().map(|t| t.text().trim().to_string()) else {
            return Ok(None);
        };

        let mut base = camel_case(&prop_name);
        if ctx.settings.underscore_field_prefix {
            base.insert(0, '_');
        }
        let mut reserved = ReservedNames::new(vec![
            NameSource::Scope {
                model: ctx.model,
                at: property.syntax().clone(),
                doc_index: ctx.doc_index,
            },
            NameSource::Members { model: ctx.model, class_name },
        ]);
        let field_name = ensure_unique(&base, &mut reserved, true)?;

        let indent = trivia::indentation_of(property.syntax());
        let static_prefix = if property.is_static() { "static " } else { "" };
        let initializer = property
            .initializer()
            .map(|init| format!(" = {}", init.text().trim()))
            .unwrap_or_default();
        let field_decl =
            format!("private {static_prefix}{type_text} {field_name}{initializer};\n{indent}");

        let property_start = property.syntax().text_range().start();
        let insert_field = TextEdit {
            range: TextRange::new(property_start, property_start),
            replacement: field_decl,
        };
        let accessors = format!(
            "{{ get {{ return {field_name}; }} set {{ {field_name} = value; }} }}"
        );
        // The initializer moves onto the field
        let body_end = property
            .initializer()
            .map(|init| init.syntax().text_range().end())
            .map(|end| semicolon_after(root, end).unwrap_or(end))
            .unwrap_or_else(|| accessor_list.syntax().text_range().end());
        let replace_body = TextEdit {
            range: TextRange::new(accessor_list.syntax().text_range().start(), body_end),
            replacement: accessors,
        };

        Ok(Some(RewriteCandidate {
            rule_id: "expand-auto-property",
            target_span: property.syntax().text_range(),
            edits: vec![insert_field, replace_body],
            reformat: true,
        }))
    }

    fn semicolon_after(root: &SyntaxNode, offset: TextSize) -> Option<TextSize> {
        root.descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| token.text_range().start() >= offset)
            .find(|token| !token.kind().is_trivia())
            .filter(|token| token.kind() == SyntaxKind::SEMICOLON)
            .map(|token| token.text_range().end())
    }

    fn camel_case(name: &str) -> String {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
            None => name.to_string(),
        }
    }
}
