//! The DSL engine.
//!
//! [`DslParser`] owns everything that lives for the duration of a parse:
//! the workspace being built, the context stack, the identifier tables,
//! the constants, and the preserved source-line buffer. The per-line
//! machinery is split across submodules:
//!
//! - `lexer` - one line into tokens
//! - `substitution` - `${name}` expansion over tokens
//! - `context` - the stack of open blocks and its capability predicates
//! - `dispatcher` - the rule table mapping (keyword, context) to parsers
//! - `grammar` - the production parsers themselves
//! - `include` - the `!include` resolver

mod context;
mod dispatcher;
mod error;
mod grammar;
mod include;
mod lexer;
mod substitution;
mod tokens;

pub use error::ParserError;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::SourceLines;
use crate::project;
use crate::workspace::{
    ElementId, ElementStyle, IdentifierMode, RelationshipId, RelationshipStyle, View, Workspace,
};

use context::{Context, ContextStack};
use error::ParseFailure;

/// What a production parser returned, for identifier binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Binding {
    Element(ElementId),
    Relationship(RelationshipId),
}

/// Parser for the Blueprint workspace DSL.
///
/// A parser instance accumulates state across entry-point calls, so a
/// workspace may be assembled from several files or fragments. Instances
/// are not shareable; callers wanting parallelism create one per parse.
pub struct DslParser {
    restricted: bool,
    pub(crate) workspace: Workspace,
    pub(crate) stack: ContextStack,
    /// identifier -> element, lowercased keys.
    pub(crate) elements: FxHashMap<SmolStr, ElementId>,
    /// identifier -> relationship, lowercased keys.
    pub(crate) relationships: FxHashMap<SmolStr, RelationshipId>,
    /// Reverse map, used to build hierarchical identifiers.
    element_bindings: FxHashMap<ElementId, SmolStr>,
    pub(crate) constants: IndexMap<String, String>,
    /// Verbatim lines actually parsed; include directives are replaced by
    /// the included content.
    pub(crate) source_lines: Vec<String>,
    /// Stack of files being parsed, innermost last; anchors relative
    /// include paths.
    files: Vec<PathBuf>,
}

impl Default for DslParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DslParser {
    pub fn new() -> Self {
        Self {
            restricted: false,
            workspace: Workspace::new(),
            stack: ContextStack::new(),
            elements: FxHashMap::default(),
            relationships: FxHashMap::default(),
            element_bindings: FxHashMap::default(),
            constants: IndexMap::new(),
            source_lines: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Restricted mode disables everything that touches the filesystem,
    /// the network, or the process environment: `!include`, `!docs`,
    /// `!adrs`, branding logos, element style icons, and environment
    /// variable substitution. Each becomes a silent no-op.
    pub fn set_restricted(&mut self, restricted: bool) {
        self.restricted = restricted;
    }

    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    /// Parse an in-memory DSL fragment. Relative include paths resolve
    /// against the working directory.
    pub fn parse_str(&mut self, source: &str) -> Result<(), ParserError> {
        let lines = SourceLines::from_source(source).into_vec();
        self.run(&lines)?;
        self.finish()
    }

    /// Parse a DSL file, or every regular file beneath a directory in
    /// sorted order.
    pub fn parse_path(&mut self, path: impl AsRef<Path>) -> Result<(), ParserError> {
        let path = path.as_ref();
        if path.is_dir() {
            let files =
                project::collect_files(path).map_err(ParserError::without_line)?;
            tracing::debug!(directory = %path.display(), count = files.len(), "parsing directory");
            for file in files {
                self.parse_file(&file)?;
            }
        } else {
            self.parse_file(path)?;
        }
        self.finish()
    }

    /// The workspace built so far.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn into_workspace(self) -> Workspace {
        self.workspace
    }

    // ========================================================================
    // INTERNAL DRIVER
    // ========================================================================

    fn parse_file(&mut self, path: &Path) -> Result<(), ParserError> {
        let lines = project::load_lines(path).map_err(ParserError::without_line)?;
        self.files.push(path.to_path_buf());
        let result = self.run(&lines);
        self.files.pop();
        result
    }

    /// Drive the dispatcher over one line sequence. Line numbers are local
    /// to this sequence; included files restart at 1 in their own run.
    pub(crate) fn run(&mut self, lines: &[String]) -> Result<(), ParserError> {
        for (index, raw) in lines.iter().enumerate() {
            if let Err(failure) = self.parse_line(raw) {
                return Err(match failure {
                    ParseFailure::Nested(inner) => *inner,
                    other => ParserError {
                        message: other.to_string(),
                        line_number: index + 1,
                        source_line: raw.clone(),
                    },
                });
            }
        }
        Ok(())
    }

    /// End-of-input bookkeeping for the entry points: every block must be
    /// closed, and the preserved source is attached to the workspace.
    fn finish(&mut self) -> Result<(), ParserError> {
        if !self.stack.is_empty() {
            let name = self.stack.peek().map(Context::name).unwrap_or("block");
            return Err(ParserError {
                message: format!("Unexpected end of input: unclosed {name} block"),
                line_number: self.source_lines.len(),
                source_line: self.source_lines.last().cloned().unwrap_or_default(),
            });
        }
        self.workspace.set_source(self.source_lines.join("\n"));
        Ok(())
    }

    // ========================================================================
    // SHARED STATE HELPERS (used by the production parsers)
    // ========================================================================

    /// The file currently being parsed, if any; anchors relative paths.
    pub(crate) fn current_file(&self) -> Option<&Path> {
        self.files.last().map(PathBuf::as_path)
    }

    pub(crate) fn push_file(&mut self, path: PathBuf) {
        self.files.push(path);
    }

    pub(crate) fn pop_file(&mut self) {
        self.files.pop();
    }

    /// Resolve an element reference: the virtual `this` inside an element
    /// body, or a registered identifier.
    pub(crate) fn find_element(&self, name: &str) -> Result<ElementId, ParseFailure> {
        if name.eq_ignore_ascii_case("this") {
            return self
                .stack
                .peek()
                .and_then(Context::element)
                .ok_or_else(|| {
                    ParseFailure::Reference(
                        "\"this\" is only valid inside an element definition".to_string(),
                    )
                });
        }
        let key = crate::base::intern_identifier(name);
        self.elements
            .get(&key)
            .copied()
            .ok_or_else(|| ParseFailure::Reference(format!("The element \"{name}\" does not exist")))
    }

    /// Record an identifier binding for an element. In hierarchical mode
    /// the key is prefixed with the enclosing element's binding, when that
    /// element has one.
    pub(crate) fn register_element_identifier(&mut self, key: SmolStr, id: ElementId) {
        let key = match self.workspace.model.identifier_mode {
            IdentifierMode::Flat => key,
            IdentifierMode::Hierarchical => {
                let parent = self.workspace.model.element(id).parent;
                match parent.and_then(|p| self.element_bindings.get(&p)) {
                    Some(prefix) => SmolStr::new(format!("{prefix}.{key}")),
                    None => key,
                }
            }
        };
        self.elements.insert(key.clone(), id);
        self.element_bindings.insert(id, key);
    }

    /// The view whose block is currently open; an internal error if the
    /// dispatcher routed here from elsewhere.
    pub(crate) fn current_view_mut(&mut self) -> Result<&mut View, ParseFailure> {
        let view = self
            .stack
            .peek()
            .and_then(Context::view)
            .ok_or_else(|| ParseFailure::Internal("expected a view context".to_string()))?;
        Ok(self.workspace.views.view_mut(view))
    }

    pub(crate) fn current_element_style(&mut self) -> Result<&mut ElementStyle, ParseFailure> {
        match self.stack.peek() {
            Some(Context::ElementStyle { index }) => {
                Ok(&mut self.workspace.views.styles.elements[*index])
            }
            _ => Err(ParseFailure::Internal(
                "expected an element style context".to_string(),
            )),
        }
    }

    pub(crate) fn current_relationship_style(
        &mut self,
    ) -> Result<&mut RelationshipStyle, ParseFailure> {
        match self.stack.peek() {
            Some(Context::RelationshipStyle { index }) => {
                Ok(&mut self.workspace.views.styles.relationships[*index])
            }
            _ => Err(ParseFailure::Internal(
                "expected a relationship style context".to_string(),
            )),
        }
    }
}
