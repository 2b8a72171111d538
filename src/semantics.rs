// Copyright (C) Brian G. Milnes 2025

//! Workspace, symbols and the conservative type model
//!
//! Resolution that cannot be confirmed statically yields `Unknown`/`None`,
//! which makes every consulting rule decline. The model itself is plain
//! data (no tree handles), so it can be built once and shared across
//! parallel per-file analyses.

pub mod semantics {
    use crate::ast::ast::{
        AstNode, Accessor, ClassDecl, Expr, LocalDecl, MemberExpr, MethodDecl, NameRef,
        PropertyDecl, SourceFile, TypeRef, VarDeclarator,
    };
    use crate::cancel::cancel::CancelToken;
    use crate::parser::parser;
    use crate::syntax::syntax::{SyntaxKind, SyntaxNode};
    use anyhow::{Context, Result};
    use rowan::{GreenNode, TextRange};
    use std::collections::BTreeSet;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use SyntaxKind::*;

    // Documents ---------------------------------------------------------

    /// One parsed source document. Holds the green tree, which is cheap
    /// to share; callers materialize a root per use.
    #[derive(Debug, Clone)]
    pub struct Document {
        pub path: PathBuf,
        pub text: String,
        green: GreenNode,
    }

    impl Document {
        pub fn parse(path: PathBuf, text: String) -> Result<Document> {
            let parsed = parser::parse(&text);
            if !parsed.ok() {
                let first = &parsed.errors()[0];
                anyhow::bail!(
                    "{}: parse error at offset {}: {}",
                    path.display(),
                    first.offset,
                    first.message
                );
            }
            let green = parsed.green();
            Ok(Document { path, text, green })
        }

        pub fn root(&self) -> SyntaxNode {
            SyntaxNode::new_root(self.green.clone())
        }

        pub fn source_file(&self) -> Option<SourceFile> {
            SourceFile::cast(self.root())
        }
    }

    /// The snapshot a rewrite is computed against.
    #[derive(Debug, Clone, Default)]
    pub struct Workspace {
        documents: Vec<Document>,
    }

    impl Workspace {
        pub fn load(paths: &[PathBuf]) -> Result<Workspace> {
            let mut documents = Vec::new();
            for path in paths {
                let text = std::fs::read_to_string(path)
                    .context(format!("Failed to read {}", path.display()))?;
                documents.push(Document::parse(path.clone(), text)?);
            }
            Ok(Workspace { documents })
        }

        /// Assemble a workspace from already-parsed documents, e.g. when
        /// the driver skips files that fail to parse.
        pub fn from_documents(documents: Vec<Document>) -> Workspace {
            Workspace { documents }
        }

        /// In-memory workspace, used by tests and previews.
        pub fn in_memory(sources: &[(&str, &str)]) -> Result<Workspace> {
            let mut documents = Vec::new();
            for (name, text) in sources {
                documents.push(Document::parse(PathBuf::from(name), text.to_string())?);
            }
            Ok(Workspace { documents })
        }

        pub fn single(text: &str) -> Result<Workspace> {
            Workspace::in_memory(&[("<memory>", text)])
        }

        pub fn documents(&self) -> &[Document] {
            &self.documents
        }

        pub fn document(&self, index: usize) -> &Document {
            &self.documents[index]
        }

        pub fn len(&self) -> usize {
            self.documents.len()
        }

        pub fn is_empty(&self) -> bool {
            self.documents.is_empty()
        }
    }

    // Types --------------------------------------------------------------

    /// The conservative static type lattice.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Type {
        Void,
        Bool,
        Int,
        Str,
        Array(Box<Type>),
        Named(String),
        Unknown,
    }

    impl Type {
        pub fn from_type_ref(type_ref: &TypeRef) -> Type {
            let Some(base) = type_ref.base_name() else {
                return Type::Unknown;
            };
            let mut ty = Type::from_name(&base);
            for _ in 0..type_ref.array_dims() {
                ty = Type::Array(Box::new(ty));
            }
            ty
        }

        pub fn from_name(name: &str) -> Type {
            match name {
                "void" => Type::Void,
                "bool" => Type::Bool,
                "int" => Type::Int,
                "string" => Type::Str,
                _ => Type::Named(name.to_string()),
            }
        }

        pub fn is_unknown(&self) -> bool {
            matches!(self, Type::Unknown)
        }

        /// The integer count/length member this type exposes, if any.
        pub fn count_member(&self, model: &SemanticModel) -> Option<&'static str> {
            match self {
                Type::Array(_) => Some("Length"),
                Type::Named(name) if name == "List" => Some("Count"),
                Type::Named(name) => {
                    let class = model.class(name)?;
                    let has_count = class
                        .properties
                        .iter()
                        .any(|p| p.name == "Count" && p.ty == Type::Int);
                    if has_count {
                        Some("Count")
                    } else {
                        None
                    }
                }
                _ => None,
            }
        }

        /// Whether the type supports lookup by integer index.
        pub fn has_int_indexer(&self) -> bool {
            match self {
                Type::Array(_) => true,
                Type::Named(name) => name == "List",
                _ => false,
            }
        }

        pub fn element_type(&self) -> Type {
            match self {
                Type::Array(element) => (**element).clone(),
                _ => Type::Unknown,
            }
        }
    }

    // Symbols -------------------------------------------------------------

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SymbolKind {
        Class,
        Field,
        Property,
        Method,
        Local,
        Param,
    }

    /// Symbol identity: declaring document plus declaration range.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Symbol {
        pub kind: SymbolKind,
        pub name: String,
        pub class_name: Option<String>,
        pub doc_index: usize,
        pub decl_range: TextRange,
        pub ty: Type,
        pub is_static: bool,
    }

    /// A reference location found by the search collaborator.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Location {
        pub doc_index: usize,
        pub range: TextRange,
    }

    /// The "find all syntactic occurrences of symbol S" collaborator.
    pub trait ReferenceSearch {
        fn find_references(&self, symbol: &Symbol, cancel: &CancelToken)
            -> Result<Vec<Location>>;
    }

    // Class data -----------------------------------------------------------

    #[derive(Debug, Clone)]
    pub struct FieldInfo {
        pub name: String,
        pub ty: Type,
        pub is_static: bool,
        pub is_volatile: bool,
        pub is_private: bool,
        pub has_attrs: bool,
        pub doc_index: usize,
        pub declarator_range: TextRange,
        pub decl_range: TextRange,
        pub declarator_count: usize,
        pub initializer: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct PropertyInfo {
        pub name: String,
        pub ty: Type,
        pub is_static: bool,
        pub doc_index: usize,
        pub range: TextRange,
    }

    #[derive(Debug, Clone)]
    pub struct MethodInfo {
        pub name: String,
        pub return_ty: Type,
        pub is_static: bool,
        pub doc_index: usize,
        pub range: TextRange,
    }

    #[derive(Debug, Clone, Default)]
    pub struct ClassInfo {
        pub name: String,
        pub is_partial: bool,
        pub has_layout_attr: bool,
        /// Every declaration part: (document index, class node range).
        pub parts: Vec<(usize, TextRange)>,
        pub fields: Vec<FieldInfo>,
        pub properties: Vec<PropertyInfo>,
        pub methods: Vec<MethodInfo>,
    }

    impl ClassInfo {
        pub fn fields_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FieldInfo> {
            self.fields.iter().filter(move |field| field.name == name)
        }

        pub fn member_names(&self) -> BTreeSet<String> {
            let mut names = BTreeSet::new();
            names.extend(self.fields.iter().map(|f| f.name.clone()));
            names.extend(self.properties.iter().map(|p| p.name.clone()));
            names.extend(self.methods.iter().map(|m| m.name.clone()));
            names
        }
    }

    // The model ------------------------------------------------------------

    /// Plain-data semantic model over one workspace snapshot. Partial
    /// class declarations are merged by name.
    #[derive(Debug)]
    pub struct SemanticModel<'w> {
        workspace: &'w Workspace,
        classes: HashMap<String, ClassInfo>,
    }

    impl<'w> SemanticModel<'w> {
        /// Build the model, observing cancellation at each document.
        pub fn build(workspace: &'w Workspace, cancel: &CancelToken) -> Result<SemanticModel<'w>> {
            let mut classes: HashMap<String, ClassInfo> = HashMap::new();
            for (doc_index, document) in workspace.documents().iter().enumerate() {
                cancel.check()?;
                let root = document.root();
                for node in root.descendants() {
                    let Some(class) = ClassDecl::cast(node) else {
                        continue;
                    };
                    let Some(name) = class.name_text() else {
                        continue;
                    };
                    let info = classes.entry(name.clone()).or_default();
                    info.name = name.clone();
                    info.is_partial |= class.is_partial();
                    info.has_layout_attr |= class
                        .attr_lists()
                        .flat_map(|list| list.attrs().collect::<Vec<_>>())
                        .any(|attr| {
                            attr.name_text().is_some_and(|n| n.contains("Layout"))
                        });
                    info.parts.push((doc_index, class.syntax().text_range()));
                    collect_members(info, &class, doc_index);
                }
            }
            Ok(SemanticModel { workspace, classes })
        }

        pub fn workspace(&self) -> &'w Workspace {
            self.workspace
        }

        pub fn class(&self, name: &str) -> Option<&ClassInfo> {
            self.classes.get(name)
        }

        pub fn classes(&self) -> impl Iterator<Item = &ClassInfo> {
            self.classes.values()
        }

        /// The name of the class declaration lexically enclosing a node.
        pub fn enclosing_class_name(node: &SyntaxNode) -> Option<String> {
            node.ancestors()
                .find_map(ClassDecl::cast)
                .and_then(|class| class.name_text())
        }

        // Name resolution ------------------------------------------------

        /// Resolve a name reference to its symbol, or None when no single
        /// unambiguous declaration is visible.
        pub fn resolve_name(&self, name_ref: &NameRef, doc_index: usize) -> Option<Symbol> {
            let name = name_ref.ident_token()?.text().to_string();
            let node = name_ref.syntax();

            // Member position resolves through the receiver's type
            if let Some(member) = node.parent().and_then(MemberExpr::cast) {
                let is_member_name = member
                    .name_ref()
                    .is_some_and(|n| n.syntax() == node);
                let is_receiver = member
                    .receiver()
                    .is_some_and(|r| r.syntax() == node);
                if is_member_name && !is_receiver {
                    let receiver = member.receiver()?;
                    let receiver_ty = self.type_of(&receiver, doc_index);
                    return self.resolve_member(&receiver_ty, &name);
                }
            }

            // Setter bodies see the implicit `value` parameter
            if name == "value" {
                if let Some(property_ty) = enclosing_setter_property_type(node) {
                    return Some(Symbol {
                        kind: SymbolKind::Param,
                        name,
                        class_name: Self::enclosing_class_name(node),
                        doc_index,
                        decl_range: node.text_range(),
                        ty: property_ty,
                        is_static: false,
                    });
                }
            }

            if let Some(symbol) = resolve_local(node, &name, doc_index) {
                return Some(symbol);
            }
            if let Some(symbol) = resolve_param(node, &name, doc_index) {
                return Some(symbol);
            }
            if let Some(symbol) = self.resolve_class_member(node, &name, doc_index) {
                return Some(symbol);
            }
            if self.classes.contains_key(&name) {
                let class = &self.classes[&name];
                let (class_doc, class_range) = *class.parts.first()?;
                return Some(Symbol {
                    kind: SymbolKind::Class,
                    name,
                    class_name: None,
                    doc_index: class_doc,
                    decl_range: class_range,
                    ty: Type::Unknown,
                    is_static: true,
                });
            }
            None
        }

        fn resolve_member(&self, receiver_ty: &Type, name: &str) -> Option<Symbol> {
            let Type::Named(class_name) = receiver_ty else {
                return None;
            };
            let class = self.class(class_name)?;
            if let Some(field) = single(class.fields_named(name)) {
                return Some(field_symbol(class_name, field));
            }
            if let Some(property) = class.properties.iter().find(|p| p.name == name) {
                return Some(Symbol {
                    kind: SymbolKind::Property,
                    name: property.name.clone(),
                    class_name: Some(class_name.clone()),
                    doc_index: property.doc_index,
                    decl_range: property.range,
                    ty: property.ty.clone(),
                    is_static: property.is_static,
                });
            }
            if let Some(method) = class.methods.iter().find(|m| m.name == name) {
                return Some(Symbol {
                    kind: SymbolKind::Method,
                    name: method.name.clone(),
                    class_name: Some(class_name.clone()),
                    doc_index: method.doc_index,
                    decl_range: method.range,
                    ty: method.return_ty.clone(),
                    is_static: method.is_static,
                });
            }
            None
        }

        fn resolve_class_member(
            &self,
            node: &SyntaxNode,
            name: &str,
            _doc_index: usize,
        ) -> Option<Symbol> {
            let class_name = Self::enclosing_class_name(node)?;
            let class = self.class(&class_name)?;
            if let Some(field) = single(class.fields_named(name)) {
                return Some(field_symbol(&class_name, field));
            }
            self.resolve_member(&Type::Named(class_name), name)
        }

        /// The unique backing field of a class with the given name;
        /// None when zero or several declarations match.
        pub fn unique_field(&self, class_name: &str, field_name: &str) -> Option<Symbol> {
            let class = self.class(class_name)?;
            single(class.fields_named(field_name)).map(|field| field_symbol(class_name, field))
        }

        pub fn field_info(&self, symbol: &Symbol) -> Option<&FieldInfo> {
            let class = self.class(symbol.class_name.as_deref()?)?;
            class
                .fields
                .iter()
                .find(|field| field.declarator_range == symbol.decl_range
                    && field.doc_index == symbol.doc_index)
        }

        // Typing ---------------------------------------------------------

        pub fn type_of(&self, expr: &Expr, doc_index: usize) -> Type {
            match expr {
                Expr::Literal(literal) => match literal.token().map(|t| t.kind()) {
                    Some(TRUE_KW | FALSE_KW) => Type::Bool,
                    Some(INT_NUMBER) => Type::Int,
                    Some(STRING) => Type::Str,
                    _ => Type::Unknown,
                },
                Expr::Paren(paren) => paren
                    .inner()
                    .map(|inner| self.type_of(&inner, doc_index))
                    .unwrap_or(Type::Unknown),
                Expr::Prefix(prefix) => match prefix.op_token().map(|t| t.kind()) {
                    Some(BANG) => Type::Bool,
                    Some(MINUS) => Type::Int,
                    _ => Type::Unknown,
                },
                Expr::Bin(bin) => match bin.op_kind() {
                    Some(AMPAMP | PIPEPIPE | EQEQ | NEQ | LT | GT | LTEQ | GTEQ) => Type::Bool,
                    Some(PLUS | MINUS | STAR | SLASH | PERCENT) => {
                        // String concatenation keeps its operand type
                        match bin.lhs().map(|lhs| self.type_of(&lhs, doc_index)) {
                            Some(Type::Str) => Type::Str,
                            _ => Type::Int,
                        }
                    }
                    _ => Type::Unknown,
                },
                Expr::Assign(assign) => assign
                    .lhs()
                    .map(|lhs| self.type_of(&lhs, doc_index))
                    .unwrap_or(Type::Unknown),
                Expr::NameRef(name_ref) => self
                    .resolve_name(name_ref, doc_index)
                    .map(|symbol| symbol.ty)
                    .unwrap_or(Type::Unknown),
                Expr::This(this) => Self::enclosing_class_name(this.syntax())
                    .map(Type::Named)
                    .unwrap_or(Type::Unknown),
                Expr::Member(member) => self.type_of_member(member, doc_index),
                Expr::Index(index) => index
                    .base()
                    .map(|base| self.type_of(&base, doc_index).element_type())
                    .unwrap_or(Type::Unknown),
                Expr::Call(call) => self.type_of_call(call, doc_index),
                Expr::New(new_expr) => new_expr
                    .type_ref()
                    .map(|type_ref| Type::from_type_ref(&type_ref))
                    .unwrap_or(Type::Unknown),
                Expr::Initializer(_) => Type::Unknown,
            }
        }

        fn type_of_member(&self, member: &MemberExpr, doc_index: usize) -> Type {
            let Some(receiver) = member.receiver() else {
                return Type::Unknown;
            };
            let Some(name) = member.name_text() else {
                return Type::Unknown;
            };
            let receiver_ty = self.type_of(&receiver, doc_index);
            match (&receiver_ty, name.as_str()) {
                (Type::Array(_), "Length") => Type::Int,
                (Type::Named(class), "Count") if class == "List" => Type::Int,
                _ => self
                    .resolve_member(&receiver_ty, &name)
                    .map(|symbol| symbol.ty)
                    .unwrap_or(Type::Unknown),
            }
        }

        fn type_of_call(&self, call: &crate::ast::ast::CallExpr, doc_index: usize) -> Type {
            if let Some((receiver, method)) = call.method_call_parts() {
                let receiver_ty = self.type_of(&receiver, doc_index);
                let is_sequence = matches!(receiver_ty, Type::Array(_))
                    || matches!(&receiver_ty, Type::Named(name) if name == "List");
                if is_sequence {
                    return match method.as_str() {
                        "Any" => Type::Bool,
                        "First" | "Last" | "ElementAt" => receiver_ty.element_type(),
                        _ => Type::Unknown,
                    };
                }
                return self
                    .resolve_member(&receiver_ty, &method)
                    .filter(|symbol| symbol.kind == SymbolKind::Method)
                    .map(|symbol| symbol.ty)
                    .unwrap_or(Type::Unknown);
            }
            if let Some(Expr::NameRef(name_ref)) = call.callee() {
                return self
                    .resolve_name(&name_ref, doc_index)
                    .filter(|symbol| symbol.kind == SymbolKind::Method)
                    .map(|symbol| symbol.ty)
                    .unwrap_or(Type::Unknown);
            }
            Type::Unknown
        }

        /// True when the expression is a call that statically resolves to
        /// a void-returning method.
        pub fn is_void_call(&self, expr: &Expr, doc_index: usize) -> bool {
            matches!(expr, Expr::Call(_)) && self.type_of(expr, doc_index) == Type::Void
        }

        // Reserved names -------------------------------------------------

        /// Names visible by lexical scope lookup at a node: locals
        /// declared before it, enclosing parameters, members of the
        /// enclosing class, and class names.
        pub fn visible_names_at(&self, node: &SyntaxNode, _doc_index: usize) -> BTreeSet<String> {
            let mut names = BTreeSet::new();
            collect_locals_in_scope(node, &mut names);
            collect_params_in_scope(node, &mut names);
            if let Some(class_name) = Self::enclosing_class_name(node) {
                if let Some(class) = self.class(&class_name) {
                    names.extend(class.member_names());
                }
            }
            names.extend(self.classes.keys().cloned());
            names
        }
    }

    fn single<'a, I: Iterator<Item = &'a FieldInfo>>(mut iter: I) -> Option<&'a FieldInfo> {
        let first = iter.next()?;
        if iter.next().is_some() {
            return None;
        }
        Some(first)
    }

    fn field_symbol(class_name: &str, field: &FieldInfo) -> Symbol {
        Symbol {
            kind: SymbolKind::Field,
            name: field.name.clone(),
            class_name: Some(class_name.to_string()),
            doc_index: field.doc_index,
            decl_range: field.declarator_range,
            ty: field.ty.clone(),
            is_static: field.is_static,
        }
    }

    fn collect_members(info: &mut ClassInfo, class: &ClassDecl, doc_index: usize) {
        for field in class.fields() {
            let ty = field
                .type_ref()
                .map(|type_ref| Type::from_type_ref(&type_ref))
                .unwrap_or(Type::Unknown);
            let declarators: Vec<VarDeclarator> = field.declarators().collect();
            let count = declarators.len();
            let has_attrs = field.attr_lists().next().is_some();
            let is_private = !field.has_modifier(PUBLIC_KW)
                && !field.has_modifier(PROTECTED_KW)
                && !field.has_modifier(INTERNAL_KW);
            for declarator in declarators {
                let Some(name) = declarator.name_text() else {
                    continue;
                };
                info.fields.push(FieldInfo {
                    name,
                    ty: ty.clone(),
                    is_static: field.is_static(),
                    is_volatile: field.is_volatile(),
                    is_private,
                    has_attrs,
                    doc_index,
                    declarator_range: declarator.syntax().text_range(),
                    decl_range: field.syntax().text_range(),
                    declarator_count: count,
                    initializer: declarator.initializer().map(|init| init.text()),
                });
            }
        }
        for property in class.properties() {
            let Some(name) = property.name_text() else {
                continue;
            };
            info.properties.push(PropertyInfo {
                name,
                ty: property
                    .type_ref()
                    .map(|type_ref| Type::from_type_ref(&type_ref))
                    .unwrap_or(Type::Unknown),
                is_static: property.is_static(),
                doc_index,
                range: property.syntax().text_range(),
            });
        }
        for method in class.methods() {
            let Some(name) = method.name_text() else {
                continue;
            };
            info.methods.push(MethodInfo {
                name,
                return_ty: method
                    .type_ref()
                    .map(|type_ref| Type::from_type_ref(&type_ref))
                    .unwrap_or(Type::Unknown),
                is_static: method.is_static(),
                doc_index,
                range: method.syntax().text_range(),
            });
        }
    }

    fn enclosing_setter_property_type(node: &SyntaxNode) -> Option<Type> {
        let accessor = node.ancestors().find_map(Accessor::cast)?;
        if !accessor.is_set() {
            return None;
        }
        let property = accessor
            .syntax()
            .ancestors()
            .find_map(PropertyDecl::cast)?;
        property.type_ref().map(|type_ref| Type::from_type_ref(&type_ref))
    }

    fn declarator_symbol(
        declarator: &VarDeclarator,
        ty: &Type,
        doc_index: usize,
        name: &str,
    ) -> Option<Symbol> {
        if declarator.name_text()? != name {
            return None;
        }
        Some(Symbol {
            kind: SymbolKind::Local,
            name: name.to_string(),
            class_name: None,
            doc_index,
            decl_range: declarator.syntax().text_range(),
            ty: ty.clone(),
            is_static: false,
        })
    }

    /// Walk enclosing statement holders, scanning declarations that
    /// precede the reference position.
    fn resolve_local(node: &SyntaxNode, name: &str, doc_index: usize) -> Option<Symbol> {
        let position = node.text_range().start();
        for ancestor in node.ancestors() {
            let holds_statements = matches!(
                ancestor.kind(),
                SyntaxKind::BLOCK | SyntaxKind::CASE_SECTION | SyntaxKind::SOURCE_FILE
            );
            if !holds_statements {
                continue;
            }
            for child in ancestor.children() {
                if child.text_range().start() >= position {
                    break;
                }
                let Some(local) = LocalDecl::cast(child) else {
                    continue;
                };
                let ty = local
                    .type_ref()
                    .map(|type_ref| Type::from_type_ref(&type_ref))
                    .unwrap_or(Type::Unknown);
                for declarator in local.declarators() {
                    if let Some(symbol) = declarator_symbol(&declarator, &ty, doc_index, name) {
                        return Some(symbol);
                    }
                }
            }
        }
        None
    }

    fn resolve_param(node: &SyntaxNode, name: &str, doc_index: usize) -> Option<Symbol> {
        let method = node.ancestors().find_map(MethodDecl::cast)?;
        let param_list = method.param_list()?;
        for param in param_list.params() {
            if param.name_text().as_deref() == Some(name) {
                let ty = param
                    .type_ref()
                    .map(|type_ref| Type::from_type_ref(&type_ref))
                    .unwrap_or(Type::Unknown);
                return Some(Symbol {
                    kind: SymbolKind::Param,
                    name: name.to_string(),
                    class_name: SemanticModel::enclosing_class_name(node),
                    doc_index,
                    decl_range: param.syntax().text_range(),
                    ty,
                    is_static: false,
                });
            }
        }
        None
    }

    fn collect_locals_in_scope(node: &SyntaxNode, names: &mut BTreeSet<String>) {
        let position = node.text_range().start();
        for ancestor in node.ancestors() {
            let holds_statements = matches!(
                ancestor.kind(),
                SyntaxKind::BLOCK | SyntaxKind::CASE_SECTION | SyntaxKind::SOURCE_FILE
            );
            if !holds_statements {
                continue;
            }
            for child in ancestor.children() {
                if child.text_range().start() >= position {
                    break;
                }
                if let Some(local) = LocalDecl::cast(child) {
                    for declarator in local.declarators() {
                        if let Some(name) = declarator.name_text() {
                            names.insert(name);
                        }
                    }
                }
            }
        }
    }

    fn collect_params_in_scope(node: &SyntaxNode, names: &mut BTreeSet<String>) {
        if let Some(method) = node.ancestors().find_map(MethodDecl::cast) {
            if let Some(param_list) = method.param_list() {
                for param in param_list.params() {
                    if let Some(name) = param.name_text() {
                        names.insert(name);
                    }
                }
            }
        }
    }

    // Reference search ----------------------------------------------------

    /// Workspace-backed implementation of the reference-search
    /// collaborator: syntactic occurrences confirmed by resolution.
    pub struct WorkspaceReferenceSearch<'m, 'w> {
        model: &'m SemanticModel<'w>,
    }

    impl<'m, 'w> WorkspaceReferenceSearch<'m, 'w> {
        pub fn new(model: &'m SemanticModel<'w>) -> WorkspaceReferenceSearch<'m, 'w> {
            WorkspaceReferenceSearch { model }
        }
    }

    impl ReferenceSearch for WorkspaceReferenceSearch<'_, '_> {
        fn find_references(
            &self,
            symbol: &Symbol,
            cancel: &CancelToken,
        ) -> Result<Vec<Location>> {
            let mut locations = Vec::new();
            for (doc_index, document) in
                self.model.workspace().documents().iter().enumerate()
            {
                cancel.check()?;
                let root = document.root();
                for node in root.descendants() {
                    let Some(name_ref) = NameRef::cast(node) else {
                        continue;
                    };
                    if name_ref.text().trim() != symbol.name {
                        continue;
                    }
                    cancel.check()?;
                    let resolved = self.model.resolve_name(&name_ref, doc_index);
                    if resolved.as_ref() == Some(symbol) {
                        locations.push(Location {
                            doc_index,
                            range: name_ref.syntax().text_range(),
                        });
                    }
                }
            }
            Ok(locations)
        }
    }

}
