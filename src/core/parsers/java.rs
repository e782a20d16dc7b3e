//! Declaration-level parser for Java sources.
//!
//! Only the shape the conformance rules need is extracted: package and
//! imports, the top-level class or interface header, fields with their
//! initializer text, and method / constructor signatures. Bodies, nested
//! types and initializer blocks are skipped as balanced token groups.

use std::path::Path;

use crate::core::{
    error::ParseError,
    model::{FieldDecl, MethodDecl, Modifier, Modifiers, SourceUnit, UnitKind, resolve_type_name},
    parsers::lexer::{Token, TokenKind, tokenize},
};

/// Parse one source file into its declaration model.
///
/// When a file declares several top-level types, the one named after the
/// file wins; otherwise the first declaration is used.
pub fn parse_source(path: &str, source: &str) -> Result<SourceUnit, ParseError> {
    let tokens = tokenize(source).map_err(|e| ParseError::new(path, e.line, e.reason))?;
    Parser {
        path,
        source,
        tokens,
        pos: 0,
    }
    .parse_compilation_unit()
}

/// A top-level type declaration seen in the file.
struct TypeDecl {
    keyword: String,
    name: String,
    line: usize,
    /// `None` for declarations outside the modeled subset (enum, record, annotation).
    unit: Option<SourceUnit>,
}

/// Annotations and modifiers preceding a declaration.
#[derive(Default)]
struct Prefix {
    modifiers: Modifiers,
    annotations: Vec<String>,
}

impl Prefix {
    fn has_annotation(&self, simple_name: &str) -> bool {
        self.annotations.iter().any(|a| a == simple_name)
    }
}

struct Parser<'a> {
    path: &'a str,
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    // ============================================================
    // Compilation unit
    // ============================================================

    fn parse_compilation_unit(mut self) -> Result<SourceUnit, ParseError> {
        let mut package: Option<String> = None;
        let mut imports: Vec<String> = Vec::new();
        let mut on_demand_imports: Vec<String> = Vec::new();
        let mut declarations: Vec<TypeDecl> = Vec::new();

        while self.peek().is_some() {
            if self.is_punct(';') {
                self.pos += 1;
            } else if self.is_punct('@') && !self.is_ident_at(1, "interface") {
                self.parse_annotation()?;
            } else if self.is_ident("package") {
                if package.is_some() || !imports.is_empty() || !declarations.is_empty() {
                    return Err(self.error("misplaced package declaration"));
                }
                self.pos += 1;
                package = Some(self.parse_qualified_name(false)?);
                self.expect_punct(';', "after package declaration")?;
            } else if self.is_ident("import") {
                self.pos += 1;
                let is_static = self.eat_ident("static");
                let name = self.parse_qualified_name(true)?;
                self.expect_punct(';', "after import")?;
                if is_static {
                    continue;
                }
                match name.strip_suffix(".*") {
                    Some(pkg) => on_demand_imports.push(pkg.to_string()),
                    None => imports.push(name),
                }
            } else {
                let decl =
                    self.parse_type_declaration(package.as_deref(), &imports, &on_demand_imports)?;
                declarations.push(decl);
            }
        }

        self.select_declaration(declarations)
    }

    fn select_declaration(&self, declarations: Vec<TypeDecl>) -> Result<SourceUnit, ParseError> {
        let stem = Path::new(self.path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string());
        let index = declarations
            .iter()
            .position(|d| Some(&d.name) == stem.as_ref())
            .unwrap_or(0);

        let Some(decl) = declarations.into_iter().nth(index) else {
            return Err(ParseError::new(self.path, 1, "no type declaration found"));
        };
        match decl.unit {
            Some(unit) => Ok(unit),
            None => Err(ParseError::new(
                self.path,
                decl.line,
                format!(
                    "unsupported type declaration `{} {}`: only classes and interfaces are modeled",
                    decl.keyword, decl.name
                ),
            )),
        }
    }

    fn parse_type_declaration(
        &mut self,
        package: Option<&str>,
        imports: &[String],
        on_demand_imports: &[String],
    ) -> Result<TypeDecl, ParseError> {
        self.parse_prefix()?;
        let line = self.line();
        let keyword = if self.is_punct('@') && self.is_ident_at(1, "interface") {
            self.pos += 2;
            "@interface".to_string()
        } else {
            self.expect_ident("a type declaration")?
        };
        let name = self.expect_ident("a type name")?;

        let kind = match keyword.as_str() {
            "class" => Some(UnitKind::Class),
            "interface" => Some(UnitKind::Interface),
            "enum" | "record" | "@interface" => None,
            other => {
                return Err(ParseError::new(
                    self.path,
                    line,
                    format!("expected a type declaration, found `{}`", other),
                ));
            }
        };
        let Some(kind) = kind else {
            self.skip_to_body()?;
            self.skip_balanced('{', '}')?;
            return Ok(TypeDecl {
                keyword,
                name,
                line,
                unit: None,
            });
        };

        if self.is_punct('<') {
            self.skip_angles()?;
        }

        let mut written_supertype = None;
        let mut written_interfaces = Vec::new();
        while !self.is_punct('{') {
            if self.eat_ident("extends") {
                let types = self.parse_type_list()?;
                match kind {
                    UnitKind::Class if types.len() == 1 => {
                        written_supertype = types.into_iter().next();
                    }
                    UnitKind::Class => {
                        return Err(self.error("a class can extend only one type"));
                    }
                    UnitKind::Interface => written_interfaces.extend(types),
                }
            } else if self.eat_ident("implements") {
                written_interfaces.extend(self.parse_type_list()?);
            } else if self.eat_ident("permits") {
                self.parse_type_list()?;
            } else {
                return Err(self.unexpected(&format!("`{{` to open the body of `{}`", name)));
            }
        }

        if kind == UnitKind::Interface && written_interfaces.len() == 1 {
            written_supertype = written_interfaces.first().cloned();
        }
        let supertype = written_supertype
            .as_deref()
            .map(|t| resolve_type_name(t, package, imports));
        let interfaces = written_interfaces
            .iter()
            .map(|t| resolve_type_name(t, package, imports))
            .collect();

        let (fields, methods) = self.parse_body(&name, kind)?;

        Ok(TypeDecl {
            keyword,
            name: name.clone(),
            line,
            unit: Some(SourceUnit {
                path: self.path.to_string(),
                kind,
                name,
                package: package.map(str::to_string),
                imports: imports.to_vec(),
                on_demand_imports: on_demand_imports.to_vec(),
                supertype,
                written_supertype,
                interfaces,
                fields,
                methods,
            }),
        })
    }

    // ============================================================
    // Members
    // ============================================================

    fn parse_body(
        &mut self,
        type_name: &str,
        kind: UnitKind,
    ) -> Result<(Vec<FieldDecl>, Vec<MethodDecl>), ParseError> {
        let open_line = self.line();
        self.expect_punct('{', "to open the type body")?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        loop {
            if self.peek().is_none() {
                return Err(ParseError::new(
                    self.path,
                    open_line,
                    format!("unterminated body of `{}`", type_name),
                ));
            }
            if self.is_punct('}') {
                self.pos += 1;
                break;
            }
            if self.is_punct(';') {
                self.pos += 1;
            } else if self.is_punct('{') {
                self.skip_balanced('{', '}')?;
            } else if self.is_ident("static") && self.is_punct_at(1, '{') {
                self.pos += 1;
                self.skip_balanced('{', '}')?;
            } else {
                self.parse_member(type_name, kind, &mut fields, &mut methods)?;
            }
        }
        Ok((fields, methods))
    }

    fn parse_member(
        &mut self,
        type_name: &str,
        kind: UnitKind,
        fields: &mut Vec<FieldDecl>,
        methods: &mut Vec<MethodDecl>,
    ) -> Result<(), ParseError> {
        let prefix = self.parse_prefix()?;

        if self.at_nested_type() {
            self.skip_to_body()?;
            return self.skip_balanced('{', '}');
        }

        if self.is_punct('<') {
            self.skip_angles()?;
        }

        let has_override_marker = prefix.has_annotation("Override");

        if kind == UnitKind::Class && self.is_ident(type_name) && self.is_punct_at(1, '(') {
            let line = self.line();
            self.pos += 1;
            let parameter_types = self.parse_parameters()?;
            self.parse_method_tail(type_name)?;
            methods.push(MethodDecl {
                name: type_name.to_string(),
                parameter_types,
                is_constructor: true,
                is_static: false,
                is_default: false,
                has_override_marker,
                modifiers: prefix.modifiers,
                line,
            });
            return Ok(());
        }

        let declared_type = self.parse_type()?;
        let line = self.line();
        let name = self.expect_ident("a member name")?;

        if self.is_punct('(') {
            let parameter_types = self.parse_parameters()?;
            self.skip_dims();
            self.parse_method_tail(&name)?;
            methods.push(MethodDecl {
                is_static: prefix.modifiers.contains(&Modifier::Static),
                is_default: prefix.modifiers.contains(&Modifier::Default),
                name,
                parameter_types,
                is_constructor: false,
                has_override_marker,
                modifiers: prefix.modifiers,
                line,
            });
            return Ok(());
        }

        self.parse_field_declarators(declared_type, name, prefix.modifiers, line, fields)
    }

    fn parse_field_declarators(
        &mut self,
        type_name: String,
        first_name: String,
        modifiers: Modifiers,
        first_line: usize,
        fields: &mut Vec<FieldDecl>,
    ) -> Result<(), ParseError> {
        let mut name = first_name;
        let mut line = first_line;
        loop {
            self.skip_dims();
            let literal_initializer = if self.eat_punct('=') {
                Some(self.parse_initializer(&name)?)
            } else {
                None
            };

            if fields.iter().any(|f: &FieldDecl| f.name == name) {
                return Err(ParseError::new(
                    self.path,
                    line,
                    format!("duplicate field `{}`", name),
                ));
            }
            fields.push(FieldDecl {
                name,
                type_name: type_name.clone(),
                modifiers: modifiers.clone(),
                literal_initializer,
                line,
            });

            if self.eat_punct(',') {
                line = self.line();
                name = self.expect_ident("a field name")?;
                continue;
            }
            return self.expect_punct(';', "after field declaration");
        }
    }

    /// Collect the initializer expression up to the `,` or `;` that ends it.
    fn parse_initializer(&mut self, field: &str) -> Result<String, ParseError> {
        let start = self.pos;
        let start_line = self.line();
        let mut depth = 0usize;
        loop {
            let Some(token) = self.peek() else {
                return Err(ParseError::new(
                    self.path,
                    start_line,
                    format!("unterminated initializer of field `{}`", field),
                ));
            };
            if token.kind == TokenKind::Punct('<') {
                if let Some(end) = self.type_arguments_end(self.pos) {
                    self.pos = end;
                    continue;
                }
            }
            match token.kind {
                TokenKind::Punct('(' | '[' | '{') => depth += 1,
                TokenKind::Punct(')' | ']' | '}') => {
                    if depth == 0 {
                        return Err(self.unexpected("an initializer expression"));
                    }
                    depth -= 1;
                }
                TokenKind::Punct(',' | ';') if depth == 0 => break,
                _ => {}
            }
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.unexpected(&format!("an initializer for field `{}`", field)));
        }
        Ok(self.join(start, self.pos))
    }

    /// Index just past the `>` closing a type-argument list opened at `open`.
    ///
    /// Returns `None` when the tokens cannot form type arguments, so `a < b`
    /// and `x < y, z` stay comparisons.
    fn type_arguments_end(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind {
                TokenKind::Punct('<') => depth += 1,
                TokenKind::Punct('>') => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(index + 1);
                    }
                }
                TokenKind::Ident | TokenKind::Punct('.' | ',' | '?' | '[' | ']' | '&' | '@') => {}
                _ => return None,
            }
        }
        None
    }

    fn parse_parameters(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect_punct('(', "to open the parameter list")?;
        let mut types = Vec::new();
        if self.eat_punct(')') {
            return Ok(types);
        }
        loop {
            self.parse_prefix()?;
            let mut written = self.parse_type()?;
            if self.is_punct('.') && self.is_punct_at(1, '.') && self.is_punct_at(2, '.') {
                self.pos += 3;
                written.push_str("...");
            }
            if !self.eat_ident("this") {
                self.expect_ident("a parameter name")?;
                while self.is_punct('[') && self.is_punct_at(1, ']') {
                    self.pos += 2;
                    written.push_str("[]");
                }
                types.push(written);
            }
            if self.eat_punct(',') {
                continue;
            }
            self.expect_punct(')', "to close the parameter list")?;
            return Ok(types);
        }
    }

    /// `throws` clause followed by a body or `;`.
    fn parse_method_tail(&mut self, name: &str) -> Result<(), ParseError> {
        if self.eat_ident("throws") {
            self.parse_type_list()?;
        }
        if self.eat_punct(';') {
            return Ok(());
        }
        if self.is_punct('{') {
            return self.skip_balanced('{', '}');
        }
        Err(self.unexpected(&format!("a body for method `{}`", name)))
    }

    // ============================================================
    // Annotations, modifiers, types
    // ============================================================

    fn parse_prefix(&mut self) -> Result<Prefix, ParseError> {
        let mut prefix = Prefix::default();
        loop {
            if self.is_punct('@') && !self.is_ident_at(1, "interface") {
                let annotation = self.parse_annotation()?;
                prefix.annotations.push(annotation);
                continue;
            }

            let line = self.line();
            let modifier = if self.is_ident("non")
                && self.is_punct_at(1, '-')
                && self.is_ident_at(2, "sealed")
            {
                self.pos += 3;
                Modifier::NonSealed
            } else {
                match self.peek_ident().and_then(Modifier::from_keyword) {
                    Some(modifier) if modifier != Modifier::NonSealed => {
                        self.pos += 1;
                        modifier
                    }
                    _ => break,
                }
            };

            if !prefix.modifiers.insert(modifier) {
                return Err(ParseError::new(
                    self.path,
                    line,
                    format!("malformed modifiers: `{}` repeated", modifier),
                ));
            }
        }

        let visibility = [Modifier::Public, Modifier::Protected, Modifier::Private]
            .iter()
            .filter(|m| prefix.modifiers.contains(*m))
            .count();
        if visibility > 1 {
            return Err(self.error("malformed modifiers: conflicting visibility"));
        }
        Ok(prefix)
    }

    /// Parse `@Name(args)` and return the simple name.
    fn parse_annotation(&mut self) -> Result<String, ParseError> {
        self.expect_punct('@', "to start an annotation")?;
        let name = self.parse_qualified_name(false)?;
        if self.is_punct('(') {
            self.skip_balanced('(', ')')?;
        }
        Ok(name.rsplit('.').next().unwrap_or(&name).to_string())
    }

    fn parse_qualified_name(&mut self, allow_wildcard: bool) -> Result<String, ParseError> {
        let mut name = self.expect_ident("a name")?;
        while self.is_punct('.') {
            if allow_wildcard && self.is_punct_at(1, '*') {
                self.pos += 2;
                name.push_str(".*");
                break;
            }
            self.pos += 1;
            name.push('.');
            name.push_str(&self.expect_ident("a name")?);
        }
        Ok(name)
    }

    /// Parse a type reference and return it as written.
    fn parse_type(&mut self) -> Result<String, ParseError> {
        while self.is_punct('@') {
            self.parse_annotation()?;
        }
        let start = self.pos;
        self.expect_ident("a type")?;
        loop {
            if self.is_punct('<') {
                self.skip_angles()?;
            }
            if self.is_punct('.') && self.peek_kind_at(1) == Some(&TokenKind::Ident) {
                self.pos += 2;
                continue;
            }
            break;
        }
        while self.is_punct('[') && self.is_punct_at(1, ']') {
            self.pos += 2;
        }
        Ok(self.join(start, self.pos))
    }

    fn parse_type_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut types = vec![self.parse_type()?];
        while self.eat_punct(',') {
            types.push(self.parse_type()?);
        }
        Ok(types)
    }

    fn at_nested_type(&self) -> bool {
        if self.is_punct('@') && self.is_ident_at(1, "interface") {
            return true;
        }
        if self.is_ident("record") {
            return self.peek_kind_at(1) == Some(&TokenKind::Ident)
                && (self.is_punct_at(2, '(') || self.is_punct_at(2, '<'));
        }
        self.is_ident("class") || self.is_ident("interface") || self.is_ident("enum")
    }

    // ============================================================
    // Skipping
    // ============================================================

    fn skip_dims(&mut self) {
        while self.is_punct('[') && self.is_punct_at(1, ']') {
            self.pos += 2;
        }
    }

    /// Advance to the `{` that opens a type body.
    fn skip_to_body(&mut self) -> Result<(), ParseError> {
        let start_line = self.line();
        loop {
            let kind = self.peek().map(|t| t.kind.clone());
            match kind {
                None => {
                    return Err(ParseError::new(
                        self.path,
                        start_line,
                        "unterminated type declaration",
                    ));
                }
                Some(TokenKind::Punct('{')) => return Ok(()),
                Some(TokenKind::Punct('(')) => self.skip_balanced('(', ')')?,
                Some(TokenKind::Punct('<')) => self.skip_angles()?,
                Some(_) => self.pos += 1,
            }
        }
    }

    fn skip_balanced(&mut self, open: char, close: char) -> Result<(), ParseError> {
        let start_line = self.line();
        self.expect_punct(open, "")?;
        let mut depth = 1usize;
        while depth > 0 {
            let Some(token) = self.peek() else {
                return Err(ParseError::new(
                    self.path,
                    start_line,
                    format!("unterminated `{}` opened on line {}", open, start_line),
                ));
            };
            if token.is_punct(open) {
                depth += 1;
            } else if token.is_punct(close) {
                depth -= 1;
            }
            self.pos += 1;
        }
        Ok(())
    }

    fn skip_angles(&mut self) -> Result<(), ParseError> {
        self.skip_balanced('<', '>')
    }

    // ============================================================
    // Token helpers
    // ============================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn peek_ident(&self) -> Option<&'a str> {
        self.peek()
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text(self.source))
    }

    fn is_punct(&self, c: char) -> bool {
        self.is_punct_at(0, c)
    }

    fn is_punct_at(&self, offset: usize, c: char) -> bool {
        self.tokens
            .get(self.pos + offset)
            .is_some_and(|t| t.is_punct(c))
    }

    fn is_ident(&self, word: &str) -> bool {
        self.is_ident_at(0, word)
    }

    fn is_ident_at(&self, offset: usize, word: &str) -> bool {
        self.tokens
            .get(self.pos + offset)
            .is_some_and(|t| t.kind == TokenKind::Ident && t.text(self.source) == word)
    }

    fn eat_punct(&mut self, c: char) -> bool {
        let matched = self.is_punct(c);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn eat_ident(&mut self, word: &str) -> bool {
        let matched = self.is_ident(word);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn expect_punct(&mut self, c: char, context: &str) -> Result<(), ParseError> {
        if self.eat_punct(c) {
            return Ok(());
        }
        let expected = if context.is_empty() {
            format!("`{}`", c)
        } else {
            format!("`{}` {}", c, context)
        };
        Err(self.unexpected(&expected))
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        match self.peek_ident() {
            Some(text) => {
                self.pos += 1;
                Ok(text.to_string())
            }
            None => Err(self.unexpected(what)),
        }
    }

    /// Source text of `tokens[start..end]`, with every gap collapsed to one space.
    fn join(&self, start: usize, end: usize) -> String {
        let mut text = String::new();
        for (i, token) in self.tokens[start..end].iter().enumerate() {
            if i > 0 && token.spaced {
                text.push(' ');
            }
            text.push_str(token.text(self.source));
        }
        text
    }

    fn line(&self) -> usize {
        self.peek()
            .or(self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn error(&self, reason: &str) -> ParseError {
        ParseError::new(self.path, self.line(), reason)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::new(
                self.path,
                token.line,
                format!("expected {}, found `{}`", expected, token.text(self.source)),
            ),
            None => ParseError::new(
                self.path,
                self.line(),
                format!("expected {}, found end of file", expected),
            ),
        }
    }
}
