//! Visual styling for elements and relationships, keyed by tag.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ModelError;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[A-Fa-f0-9]{6}$").unwrap());

/// Validate a `#rrggbb` colour value.
pub fn parse_color(value: &str) -> Result<String, ModelError> {
    if HEX_COLOR.is_match(value) {
        Ok(value.to_lowercase())
    } else {
        Err(ModelError::invalid_value("colour", value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Box,
    RoundedBox,
    Circle,
    Ellipse,
    Hexagon,
    Cylinder,
    Pipe,
    Person,
    Robot,
    Folder,
    WebBrowser,
    MobileDevicePortrait,
    MobileDeviceLandscape,
    Component,
}

impl Shape {
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value.to_lowercase().as_str() {
            "box" => Ok(Self::Box),
            "roundedbox" => Ok(Self::RoundedBox),
            "circle" => Ok(Self::Circle),
            "ellipse" => Ok(Self::Ellipse),
            "hexagon" => Ok(Self::Hexagon),
            "cylinder" => Ok(Self::Cylinder),
            "pipe" => Ok(Self::Pipe),
            "person" => Ok(Self::Person),
            "robot" => Ok(Self::Robot),
            "folder" => Ok(Self::Folder),
            "webbrowser" => Ok(Self::WebBrowser),
            "mobiledeviceportrait" => Ok(Self::MobileDevicePortrait),
            "mobiledevicelandscape" => Ok(Self::MobileDeviceLandscape),
            "component" => Ok(Self::Component),
            other => Err(ModelError::invalid_value("shape", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    Solid,
    Dashed,
    Dotted,
}

impl Border {
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value.to_lowercase().as_str() {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            other => Err(ModelError::invalid_value("border", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    Direct,
    Orthogonal,
    Curved,
}

impl Routing {
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value.to_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "orthogonal" => Ok(Self::Orthogonal),
            "curved" => Ok(Self::Curved),
            other => Err(ModelError::invalid_value("routing", other)),
        }
    }
}

/// Style applied to elements carrying a tag.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub tag: String,
    pub shape: Option<Shape>,
    pub icon: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background: Option<String>,
    pub color: Option<String>,
    pub font_size: Option<u32>,
    pub border: Option<Border>,
    pub opacity: Option<u32>,
    pub metadata: Option<bool>,
    pub description: Option<bool>,
}

impl ElementStyle {
    fn new(tag: String) -> Self {
        Self {
            tag,
            shape: None,
            icon: None,
            width: None,
            height: None,
            background: None,
            color: None,
            font_size: None,
            border: None,
            opacity: None,
            metadata: None,
            description: None,
        }
    }
}

/// Style applied to relationships carrying a tag.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipStyle {
    pub tag: String,
    pub thickness: Option<u32>,
    pub color: Option<String>,
    pub dashed: Option<bool>,
    pub routing: Option<Routing>,
    pub font_size: Option<u32>,
    pub width: Option<u32>,
    pub position: Option<u32>,
    pub opacity: Option<u32>,
}

impl RelationshipStyle {
    fn new(tag: String) -> Self {
        Self {
            tag,
            thickness: None,
            color: None,
            dashed: None,
            routing: None,
            font_size: None,
            width: None,
            position: None,
            opacity: None,
        }
    }
}

/// All styles declared in the workspace, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Styles {
    pub elements: Vec<ElementStyle>,
    pub relationships: Vec<RelationshipStyle>,
}

impl Styles {
    /// Open a style for `tag`; returns its index for later field writes.
    pub fn add_element_style(&mut self, tag: String) -> usize {
        self.elements.push(ElementStyle::new(tag));
        self.elements.len() - 1
    }

    pub fn add_relationship_style(&mut self, tag: String) -> usize {
        self.relationships.push(RelationshipStyle::new(tag));
        self.relationships.len() - 1
    }
}
