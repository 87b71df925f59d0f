//! The per-line driver and the dispatch table.
//!
//! The table is the grammar: an ordered list of rules, each pairing a
//! keyword with a guard over the parser state. A line is handled by the
//! first rule whose keyword matches its first token and whose guard
//! accepts the current context stack. Before the table runs, a fixed
//! pre-dispatch sequence handles multi-line comments, block ends,
//! contexts that consume every line, identifier bindings, and
//! relationship operator forms. Binding extraction precedes the arrow
//! tests: a bound line (`rel = a -> b`) carries `=` in second position,
//! so the arrow can only match on the stripped remainder.

use crate::base::{intern_identifier, is_valid_identifier};
use crate::workspace::ViewKind;

use super::context::Context;
use super::error::ParseFailure;
use super::grammar;
use super::include;
use super::tokens::TokenLine;
use super::{lexer, substitution, Binding, DslParser};

type Guard = fn(&DslParser) -> bool;
type Handler = fn(&mut DslParser, &TokenLine) -> Result<Option<Binding>, ParseFailure>;

impl DslParser {
    /// Parse one raw source line in the current context.
    pub(crate) fn parse_line(&mut self, raw: &str) -> Result<(), ParseFailure> {
        let trimmed = raw.trim();

        // Inside /* ... */ every line is skipped until one ends the
        // comment.
        if matches!(self.stack.peek(), Some(Context::MultilineComment)) {
            self.source_lines.push(raw.to_string());
            if trimmed.ends_with("*/") {
                self.stack.pop()?;
            }
            return Ok(());
        }
        if trimmed.starts_with("/*") {
            self.source_lines.push(raw.to_string());
            if !(trimmed.len() >= 4 && trimmed.ends_with("*/")) {
                self.stack.push(Context::MultilineComment);
            }
            return Ok(());
        }

        // Blank lines and single-line comments are preserved but not
        // dispatched.
        if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#') {
            self.source_lines.push(raw.to_string());
            return Ok(());
        }

        let mut tokens = lexer::tokenize(trimmed)?;
        substitution::expand(&mut tokens, &self.constants, self.is_restricted());
        if tokens.is_empty() {
            self.source_lines.push(raw.to_string());
            return Ok(());
        }

        // `}` as the sole token closes the innermost block.
        if tokens.len() == 1 && tokens[0] == "}" {
            self.source_lines.push(raw.to_string());
            self.stack.pop()?;
            return Ok(());
        }

        // An `!include` line is replaced in the preserved source by the
        // included content; every other line is recorded verbatim.
        let is_include = tokens[0].eq_ignore_ascii_case("!include");
        if !is_include {
            self.source_lines.push(raw.to_string());
        }

        let mut line = TokenLine::new(tokens);

        // Contexts that own every line inside their block consume it
        // whole; identifier bindings do not apply there.
        if self
            .stack
            .peek()
            .map(Context::consumes_all_lines)
            .unwrap_or(false)
        {
            self.dispatch_any_line(&line)?;
            return Ok(());
        }

        // Identifier binding: `name = <production ...>`.
        let mut binding_key = None;
        if line.len() >= 4 && line.get(1) == Some("=") {
            let name = line.get(0).unwrap_or("");
            if !is_valid_identifier(name) {
                return Err(ParseFailure::Identifier(format!(
                    "Identifier \"{name}\" contains invalid characters"
                )));
            }
            let key = intern_identifier(name);
            if self.elements.contains_key(&key) || self.relationships.contains_key(&key) {
                return Err(ParseFailure::Identifier(format!(
                    "The identifier \"{name}\" is already in use"
                )));
            }
            binding_key = Some(key);
            line.strip_prefix(2);
        }

        let produced = self.dispatch(&line)?;
        if let Some(key) = binding_key {
            match produced {
                Some(Binding::Element(id)) => self.register_element_identifier(key, id),
                Some(Binding::Relationship(id)) => {
                    self.relationships.insert(key, id);
                }
                // The production yielded neither; the binding is unused.
                None => {}
            }
        }
        Ok(())
    }

    /// One line inside a context that consumes every line (a `users`,
    /// `properties`, `perspectives` or `animation` block).
    fn dispatch_any_line(&mut self, line: &TokenLine) -> Result<Option<Binding>, ParseFailure> {
        let top = self.stack.peek().cloned();
        match top {
            Some(Context::Users) => grammar::workspace::parse_user(self, line),
            Some(Context::Properties { item }) => {
                grammar::elements::parse_property(self, line, item)
            }
            Some(Context::Perspectives { item }) => {
                grammar::elements::parse_perspective(self, line, item)
            }
            Some(Context::Animation { view }) => {
                grammar::views::parse_animation_step(self, line, view)
            }
            _ => Err(ParseFailure::Internal(
                "unhandled line-consuming context".to_string(),
            )),
        }
    }

    fn dispatch(&mut self, line: &TokenLine) -> Result<Option<Binding>, ParseFailure> {
        // Relationship operator forms. The stack top decides whether the
        // arrow declares a model relationship or a dynamic view step.
        if line.get(1) == Some("->") {
            if self.current_view_kind() == Some(ViewKind::Dynamic) {
                return grammar::views::parse_dynamic_step(self, line);
            }
            if self
                .stack
                .peek()
                .map(Context::allows_relationship)
                .unwrap_or(false)
            {
                return grammar::relationships::parse_explicit(self, line);
            }
        }
        if line.first() == Some("->")
            && self.stack.peek().and_then(Context::element).is_some()
        {
            return grammar::relationships::parse_implicit(self, line);
        }

        let Some(first) = line.first() else {
            return Err(ParseFailure::UnexpectedTokens);
        };
        for (keyword, guard, handler) in RULES {
            if first.eq_ignore_ascii_case(keyword) && guard(self) {
                tracing::debug!(
                    keyword = *keyword,
                    context = self.stack.peek().map(Context::name).unwrap_or("<top>"),
                    "dispatch"
                );
                return handler(self, line);
            }
        }
        Err(ParseFailure::UnexpectedTokens)
    }

    pub(crate) fn current_view_kind(&self) -> Option<ViewKind> {
        self.stack
            .peek()
            .and_then(Context::view)
            .map(|id| self.workspace.views.view(id).kind)
    }
}

// ============================================================================
// GUARDS
// ============================================================================

fn anywhere(_: &DslParser) -> bool {
    true
}

fn at_top(p: &DslParser) -> bool {
    p.stack.is_empty()
}

fn in_workspace(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::Workspace))
}

fn in_model(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::Model { .. }))
}

fn in_ungrouped_model(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::Model { group: None }))
}

fn in_workspace_or_model(p: &DslParser) -> bool {
    in_workspace(p) || in_model(p)
}

fn in_model_or_enterprise(p: &DslParser) -> bool {
    matches!(
        p.stack.peek(),
        Some(Context::Model { .. } | Context::Enterprise { .. })
    )
}

fn can_group(p: &DslParser) -> bool {
    p.stack.peek().map(Context::groupable).unwrap_or(false)
}

fn in_software_system(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::SoftwareSystem { .. }))
}

fn in_workspace_or_software_system(p: &DslParser) -> bool {
    in_workspace(p) || in_software_system(p)
}

fn in_container(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::Container { .. }))
}

fn in_deployment_scope(p: &DslParser) -> bool {
    matches!(
        p.stack.peek(),
        Some(Context::DeploymentEnvironment { .. } | Context::DeploymentNode { .. })
    )
}

fn in_deployment_node(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::DeploymentNode { .. }))
}

fn in_model_item(p: &DslParser) -> bool {
    p.stack
        .peek()
        .and_then(Context::model_item)
        .is_some()
}

fn in_technology_context(p: &DslParser) -> bool {
    matches!(
        p.stack.peek(),
        Some(
            Context::Container { .. }
                | Context::Component { .. }
                | Context::DeploymentNode { .. }
                | Context::InfrastructureNode { .. }
        )
    )
}

fn in_views(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::Views))
}

fn in_any_view(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::View { .. }))
}

/// Views that carry include/exclude expressions and animations: every
/// kind except dynamic.
fn in_element_view(p: &DslParser) -> bool {
    in_any_view(p)
        && p.current_view_kind()
            .map(ViewKind::has_element_expressions)
            .unwrap_or(false)
}

fn in_styles(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::Styles))
}

fn in_element_style(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::ElementStyle { .. }))
}

fn in_relationship_style(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::RelationshipStyle { .. }))
}

fn in_branding(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::Branding))
}

fn in_terminology(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::Terminology))
}

fn in_configuration(p: &DslParser) -> bool {
    matches!(p.stack.peek(), Some(Context::Configuration))
}

// ============================================================================
// THE DISPATCH TABLE
// ============================================================================

/// The grammar, as an ordered list of `(keyword, guard, handler)` rules.
/// Keywords are matched case-insensitively against the first token; the
/// first rule whose guard accepts the current stack wins.
static RULES: &[(&str, Guard, Handler)] = &[
    // Directives.
    ("!constant", anywhere, grammar::directives::parse_constant),
    ("!include", anywhere, include::parse_include_directive),
    (
        "!identifiers",
        in_workspace_or_model,
        grammar::directives::parse_identifiers,
    ),
    (
        "!impliedrelationships",
        in_model,
        grammar::directives::parse_implied_relationships,
    ),
    (
        "!docs",
        in_workspace_or_software_system,
        grammar::directives::parse_docs,
    ),
    (
        "!adrs",
        in_workspace_or_software_system,
        grammar::directives::parse_adrs,
    ),
    // Top-level structure.
    ("workspace", at_top, grammar::workspace::parse_workspace),
    ("model", in_workspace, grammar::workspace::parse_model),
    ("views", in_workspace, grammar::workspace::parse_views),
    (
        "configuration",
        in_workspace,
        grammar::workspace::parse_configuration,
    ),
    ("users", in_configuration, grammar::workspace::parse_users_block),
    // Model elements.
    ("enterprise", in_ungrouped_model, grammar::elements::parse_enterprise),
    ("group", can_group, grammar::elements::parse_group),
    ("person", in_model_or_enterprise, grammar::elements::parse_person),
    (
        "softwaresystem",
        in_model_or_enterprise,
        grammar::elements::parse_software_system,
    ),
    ("container", in_software_system, grammar::elements::parse_container),
    ("component", in_container, grammar::elements::parse_component),
    // Deployment.
    (
        "deploymentenvironment",
        in_model,
        grammar::deployment::parse_environment,
    ),
    ("deploymentnode", in_deployment_scope, grammar::deployment::parse_node),
    (
        "infrastructurenode",
        in_deployment_node,
        grammar::deployment::parse_infrastructure_node,
    ),
    (
        "softwaresysteminstance",
        in_deployment_node,
        grammar::deployment::parse_software_system_instance,
    ),
    (
        "containerinstance",
        in_deployment_node,
        grammar::deployment::parse_container_instance,
    ),
    // Fields on model items.
    ("description", in_model_item, grammar::elements::parse_description),
    ("technology", in_technology_context, grammar::elements::parse_technology),
    ("tags", in_model_item, grammar::elements::parse_tags),
    ("url", in_model_item, grammar::elements::parse_url),
    ("properties", in_model_item, grammar::elements::parse_properties_block),
    (
        "perspectives",
        in_model_item,
        grammar::elements::parse_perspectives_block,
    ),
    // Views.
    (
        "systemlandscape",
        in_views,
        grammar::views::parse_system_landscape_view,
    ),
    ("systemcontext", in_views, grammar::views::parse_system_context_view),
    ("container", in_views, grammar::views::parse_container_view),
    ("component", in_views, grammar::views::parse_component_view),
    ("dynamic", in_views, grammar::views::parse_dynamic_view),
    ("deployment", in_views, grammar::views::parse_deployment_view),
    ("filtered", in_views, grammar::views::parse_filtered_view),
    ("include", in_element_view, grammar::views::parse_include),
    ("exclude", in_element_view, grammar::views::parse_exclude),
    ("autolayout", in_any_view, grammar::views::parse_auto_layout),
    ("animation", in_element_view, grammar::views::parse_animation_block),
    ("title", in_any_view, grammar::views::parse_title),
    ("description", in_any_view, grammar::views::parse_view_description),
    // Styles.
    ("styles", in_views, grammar::styles::parse_styles_block),
    ("element", in_styles, grammar::styles::parse_element_style),
    ("relationship", in_styles, grammar::styles::parse_relationship_style),
    ("shape", in_element_style, grammar::styles::parse_element_style_property),
    ("icon", in_element_style, grammar::styles::parse_element_style_property),
    ("width", in_element_style, grammar::styles::parse_element_style_property),
    ("height", in_element_style, grammar::styles::parse_element_style_property),
    (
        "background",
        in_element_style,
        grammar::styles::parse_element_style_property,
    ),
    ("color", in_element_style, grammar::styles::parse_element_style_property),
    ("colour", in_element_style, grammar::styles::parse_element_style_property),
    (
        "fontsize",
        in_element_style,
        grammar::styles::parse_element_style_property,
    ),
    ("border", in_element_style, grammar::styles::parse_element_style_property),
    (
        "opacity",
        in_element_style,
        grammar::styles::parse_element_style_property,
    ),
    (
        "metadata",
        in_element_style,
        grammar::styles::parse_element_style_property,
    ),
    (
        "description",
        in_element_style,
        grammar::styles::parse_element_style_property,
    ),
    (
        "thickness",
        in_relationship_style,
        grammar::styles::parse_relationship_style_property,
    ),
    (
        "color",
        in_relationship_style,
        grammar::styles::parse_relationship_style_property,
    ),
    (
        "colour",
        in_relationship_style,
        grammar::styles::parse_relationship_style_property,
    ),
    (
        "dashed",
        in_relationship_style,
        grammar::styles::parse_relationship_style_property,
    ),
    (
        "routing",
        in_relationship_style,
        grammar::styles::parse_relationship_style_property,
    ),
    (
        "fontsize",
        in_relationship_style,
        grammar::styles::parse_relationship_style_property,
    ),
    (
        "width",
        in_relationship_style,
        grammar::styles::parse_relationship_style_property,
    ),
    (
        "position",
        in_relationship_style,
        grammar::styles::parse_relationship_style_property,
    ),
    (
        "opacity",
        in_relationship_style,
        grammar::styles::parse_relationship_style_property,
    ),
    // Themes, branding, terminology.
    ("theme", in_views, grammar::views::parse_themes),
    ("themes", in_views, grammar::views::parse_themes),
    ("branding", in_views, grammar::views::parse_branding_block),
    ("logo", in_branding, grammar::views::parse_logo),
    ("font", in_branding, grammar::views::parse_font),
    ("terminology", in_views, grammar::views::parse_terminology_block),
    ("enterprise", in_terminology, grammar::views::parse_terminology_term),
    ("person", in_terminology, grammar::views::parse_terminology_term),
    (
        "softwaresystem",
        in_terminology,
        grammar::views::parse_terminology_term,
    ),
    ("container", in_terminology, grammar::views::parse_terminology_term),
    ("component", in_terminology, grammar::views::parse_terminology_term),
    (
        "deploymentnode",
        in_terminology,
        grammar::views::parse_terminology_term,
    ),
    (
        "infrastructurenode",
        in_terminology,
        grammar::views::parse_terminology_term,
    ),
    (
        "relationship",
        in_terminology,
        grammar::views::parse_terminology_term,
    ),
];
