// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::consts::{
    INITIAL_TOP_PX, LEFT_STEP_VW, SCHEMA_PROPERTY, SINK_INITIAL_LEFT_VW, SOURCE_INITIAL_LEFT_VW,
    TOP_STEP_PX, TRANSFORM_INITIAL_LEFT_VW,
};

/// Where a plugin sits in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Source,
    Transform,
    Sink,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Source, Role::Transform, Role::Sink];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Source => "source",
            Role::Transform => "transform",
            Role::Sink => "sink",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "source" => Some(Role::Source),
            "transform" => Some(Role::Transform),
            "sink" => Some(Role::Sink),
            _ => None,
        }
    }

    fn initial_left_vw(&self) -> u32 {
        match self {
            Role::Source => SOURCE_INITIAL_LEFT_VW,
            Role::Transform => TRANSFORM_INITIAL_LEFT_VW,
            Role::Sink => SINK_INITIAL_LEFT_VW,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The backend's declaration of a single plugin property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub required: bool,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Backend-declared properties of a plugin, keyed by property name.
pub type PropertySchema = BTreeMap<String, SchemaField>;

/// Whether the backend schema for a node has been loaded.
///
/// A node is `Pending` from the moment it lands on the canvas until its
/// schema has been fetched, and `Ready` once the schema is cached on the node
/// and every declared property has a value (possibly empty). On the wire this
/// is the `_backendProperties` field: `null` while pending, the schema map
/// once ready.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<PropertySchema>", into = "Option<PropertySchema>")]
pub enum SchemaState {
    #[default]
    Pending,
    Ready(PropertySchema),
}

impl SchemaState {
    pub fn is_ready(&self) -> bool {
        matches!(self, SchemaState::Ready(_))
    }

    pub fn schema(&self) -> Option<&PropertySchema> {
        match self {
            SchemaState::Ready(schema) => Some(schema),
            SchemaState::Pending => None,
        }
    }
}

impl From<Option<PropertySchema>> for SchemaState {
    fn from(value: Option<PropertySchema>) -> Self {
        value.map_or(SchemaState::Pending, SchemaState::Ready)
    }
}

impl From<SchemaState> for Option<PropertySchema> {
    fn from(value: SchemaState) -> Self {
        match value {
            SchemaState::Ready(schema) => Some(schema),
            SchemaState::Pending => None,
        }
    }
}

/// Canvas placement. `left` is in viewport-width units, `top` in pixels.
///
/// On the wire it is the node's CSS style, `{"left": "30vw", "top": "250px"}`.
/// Bare numbers are read as the same units and an empty string as an
/// unplaced node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StyleWire", into = "StyleWire")]
pub struct Position {
    pub left: u32,
    pub top: u32,
}

impl Position {
    /// Slot for the `index`-th node of `role`. Nodes of one role cascade
    /// down and slightly to the right of each other.
    pub fn for_slot(role: Role, index: usize) -> Self {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        Self {
            left: role
                .initial_left_vw()
                .saturating_add(index.saturating_mul(LEFT_STEP_VW)),
            top: INITIAL_TOP_PX.saturating_add(index.saturating_mul(TOP_STEP_PX)),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StyleWire {
    Placed { left: CssLength, top: CssLength },
    Unplaced(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CssLength {
    Number(u32),
    Text(String),
}

impl CssLength {
    fn in_unit(self, unit: &str) -> Result<u32, String> {
        match self {
            CssLength::Number(n) => Ok(n),
            CssLength::Text(text) => {
                let trimmed = text.trim();
                trimmed
                    .strip_suffix(unit)
                    .unwrap_or(trimmed)
                    .trim()
                    .parse()
                    .map_err(|_| format!("'{}' is not a length in {}", text, unit))
            }
        }
    }
}

impl From<Position> for StyleWire {
    fn from(position: Position) -> Self {
        StyleWire::Placed {
            left: CssLength::Text(format!("{}vw", position.left)),
            top: CssLength::Text(format!("{}px", position.top)),
        }
    }
}

impl TryFrom<StyleWire> for Position {
    type Error = String;

    fn try_from(wire: StyleWire) -> Result<Self, Self::Error> {
        match wire {
            StyleWire::Placed { left, top } => Ok(Position {
                left: left.in_unit("vw")?,
                top: top.in_unit("px")?,
            }),
            StyleWire::Unplaced(text) if text.trim().is_empty() => Ok(Position::default()),
            StyleWire::Unplaced(text) => Err(format!("'{}' is not a node style", text)),
        }
    }
}

/// A plugin placed on the canvas: palette metadata, user-entered properties,
/// the cached backend schema and the layout slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, rename = "style")]
    pub position: Position,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub output_schema: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default, rename = "_backendProperties")]
    pub schema: SchemaState,
    #[serde(rename = "type")]
    pub role: Role,
}

impl NodeDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            position: Position::default(),
            description: String::new(),
            output_schema: String::new(),
            properties: BTreeMap::new(),
            schema: SchemaState::Pending,
            role,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_schema(mut self, schema: PropertySchema) -> Self {
        self.schema = SchemaState::Ready(schema);
        self
    }

    pub fn with_output_schema(mut self, schema: impl Into<String>) -> Self {
        self.output_schema = schema.into();
        self
    }

    pub fn is_ready(&self) -> bool {
        self.schema.is_ready()
    }

    /// Backend-declared schema, once loaded.
    pub fn backend_schema(&self) -> Option<&PropertySchema> {
        self.schema.schema()
    }

    pub fn declares(&self, key: &str) -> bool {
        self.backend_schema()
            .is_some_and(|schema| schema.contains_key(key))
    }

    /// Cache a freshly fetched schema and reconcile properties against it.
    pub fn apply_schema(&mut self, schema: PropertySchema) {
        self.schema = SchemaState::Ready(schema);
        self.reconcile_properties();
    }

    /// Give every declared-but-unset property an empty value. Values the
    /// user already entered are never touched.
    pub fn reconcile_properties(&mut self) -> usize {
        let Some(schema) = self.schema.schema() else {
            return 0;
        };

        let mut added = 0;
        for key in schema.keys() {
            if !self.properties.contains_key(key) {
                self.properties.insert(key.clone(), String::new());
                added += 1;
            }
        }
        added
    }

    /// Replace the output schema. When the backend declares a `schema`
    /// property it mirrors the output schema, and is emptied when the output
    /// schema is cleared.
    pub fn set_output_schema(&mut self, schema: Option<String>) {
        self.output_schema = schema.unwrap_or_default();

        if self.declares(SCHEMA_PROPERTY) {
            self.properties
                .insert(SCHEMA_PROPERTY.to_string(), self.output_schema.clone());
        }
    }
}
