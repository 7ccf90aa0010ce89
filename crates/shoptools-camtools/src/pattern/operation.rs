//! Pattern operations and their property dispatch table.
//!
//! Operation properties are stored as a strongly typed struct of optionals.
//! Access by property name goes through [`PROPERTY_ACCESSORS`], a static
//! table mapping each [`PropertyName`] to a getter and a setter, guarded by
//! the operation-action-property catalog.

use crate::error::{PatternError, PatternResult};
use serde::{Deserialize, Serialize};
use shoptools_core::data::{
    applicable_properties, property_applies, OperationAction, OperationActionProperty,
    PropertyName,
};
use shoptools_core::geometry::{DirectionLeftRight, OffsetLeftRight, OffsetTopBottom};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

/// Typed property values of an operation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OperationProperties {
    /// Cut depth below the top of material
    #[serde(default)]
    pub depth: Option<String>,
    #[serde(default)]
    pub offset_x: Option<String>,
    #[serde(default)]
    pub offset_x_origin: Option<OffsetLeftRight>,
    #[serde(default)]
    pub offset_y: Option<String>,
    #[serde(default)]
    pub offset_y_origin: Option<OffsetTopBottom>,
    /// Plot length; when set the plot runs from the current point along `angle`
    #[serde(default)]
    pub length: Option<String>,
    #[serde(default)]
    pub angle: Option<String>,
    /// Kerf side of the plotted line
    #[serde(default)]
    pub direction: Option<DirectionLeftRight>,
}

/// One atomic action of a pattern
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternOperation {
    pub action: OperationAction,
    /// Grouping key, shown in G-code comments
    #[serde(default)]
    pub operation_name: String,
    /// Tool name; empty selects the general cutting tool
    #[serde(default)]
    pub tool: String,
    /// Property names hidden from the editor
    #[serde(default)]
    pub hidden_variables: BTreeSet<String>,
    #[serde(default)]
    pub properties: OperationProperties,
}

type Getter = fn(&PatternOperation) -> Option<String>;
type Setter = fn(&mut PatternOperation, PropertyName, &str) -> PatternResult<()>;

/// Getter and setter for one property
pub struct PropertyAccessor {
    pub name: PropertyName,
    pub get: Getter,
    pub set: Setter,
}

fn text_value(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn enum_value<T>(property: PropertyName, value: &str) -> PatternResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    if value.trim().is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|e| PatternError::InvalidValue {
            property,
            reason: e.to_string(),
        })
}

fn shown<T: Display>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(|v| v.to_string())
}

/// Dispatch table, one entry per [`PropertyName`]
pub static PROPERTY_ACCESSORS: &[PropertyAccessor] = &[
    PropertyAccessor {
        name: PropertyName::Action,
        get: |op| Some(op.action.to_string()),
        set: |op, name, value| {
            op.action = enum_value(name, value)?.unwrap_or_default();
            Ok(())
        },
    },
    PropertyAccessor {
        name: PropertyName::OperationName,
        get: |op| text_value(&op.operation_name),
        set: |op, _, value| {
            op.operation_name = value.trim().to_string();
            Ok(())
        },
    },
    PropertyAccessor {
        name: PropertyName::Tool,
        get: |op| text_value(&op.tool),
        set: |op, _, value| {
            op.tool = value.trim().to_string();
            Ok(())
        },
    },
    PropertyAccessor {
        name: PropertyName::Depth,
        get: |op| op.properties.depth.clone(),
        set: |op, _, value| {
            op.properties.depth = text_value(value);
            Ok(())
        },
    },
    PropertyAccessor {
        name: PropertyName::OffsetX,
        get: |op| op.properties.offset_x.clone(),
        set: |op, _, value| {
            op.properties.offset_x = text_value(value);
            Ok(())
        },
    },
    PropertyAccessor {
        name: PropertyName::OffsetXOrigin,
        get: |op| shown(&op.properties.offset_x_origin),
        set: |op, name, value| {
            op.properties.offset_x_origin = enum_value(name, value)?;
            Ok(())
        },
    },
    PropertyAccessor {
        name: PropertyName::OffsetY,
        get: |op| op.properties.offset_y.clone(),
        set: |op, _, value| {
            op.properties.offset_y = text_value(value);
            Ok(())
        },
    },
    PropertyAccessor {
        name: PropertyName::OffsetYOrigin,
        get: |op| shown(&op.properties.offset_y_origin),
        set: |op, name, value| {
            op.properties.offset_y_origin = enum_value(name, value)?;
            Ok(())
        },
    },
    PropertyAccessor {
        name: PropertyName::Length,
        get: |op| op.properties.length.clone(),
        set: |op, _, value| {
            op.properties.length = text_value(value);
            Ok(())
        },
    },
    PropertyAccessor {
        name: PropertyName::Angle,
        get: |op| op.properties.angle.clone(),
        set: |op, _, value| {
            op.properties.angle = text_value(value);
            Ok(())
        },
    },
    PropertyAccessor {
        name: PropertyName::Direction,
        get: |op| shown(&op.properties.direction),
        set: |op, name, value| {
            op.properties.direction = enum_value(name, value)?;
            Ok(())
        },
    },
];

/// Accessor for a property
pub fn accessor(name: PropertyName) -> &'static PropertyAccessor {
    PROPERTY_ACCESSORS
        .iter()
        .find(|a| a.name == name)
        .unwrap_or_else(|| unreachable!("no accessor registered for {name}"))
}

impl PatternOperation {
    pub fn new(action: OperationAction) -> Self {
        Self {
            action,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.operation_name = name.to_string();
        self
    }

    pub fn with_tool(mut self, tool: &str) -> Self {
        self.tool = tool.to_string();
        self
    }

    pub fn with_depth(mut self, depth: &str) -> Self {
        self.properties.depth = text_value(depth);
        self
    }

    pub fn with_offset_x(mut self, offset: &str, origin: OffsetLeftRight) -> Self {
        self.properties.offset_x = text_value(offset);
        self.properties.offset_x_origin = Some(origin);
        self
    }

    pub fn with_offset_y(mut self, offset: &str, origin: OffsetTopBottom) -> Self {
        self.properties.offset_y = text_value(offset);
        self.properties.offset_y_origin = Some(origin);
        self
    }

    /// Offsets from the left/bottom edges
    pub fn with_offset(self, x: &str, y: &str) -> Self {
        self.with_offset_x(x, OffsetLeftRight::Left)
            .with_offset_y(y, OffsetTopBottom::Bottom)
    }

    pub fn with_length(mut self, length: &str, angle: &str) -> Self {
        self.properties.length = text_value(length);
        self.properties.angle = text_value(angle);
        self
    }

    pub fn with_direction(mut self, direction: DirectionLeftRight) -> Self {
        self.properties.direction = Some(direction);
        self
    }

    pub fn hide(mut self, property: PropertyName) -> Self {
        self.hidden_variables.insert(property.to_string());
        self
    }

    /// Read a property by name
    pub fn get_property(
        &self,
        catalog: &[OperationActionProperty],
        name: PropertyName,
    ) -> PatternResult<Option<String>> {
        self.check_applies(catalog, name)?;
        Ok((accessor(name).get)(self))
    }

    /// Write a property by name; blank text clears it
    pub fn set_property(
        &mut self,
        catalog: &[OperationActionProperty],
        name: PropertyName,
        value: &str,
    ) -> PatternResult<()> {
        self.check_applies(catalog, name)?;
        (accessor(name).set)(self, name, value)
    }

    pub fn is_hidden(&self, name: PropertyName) -> bool {
        self.hidden_variables
            .iter()
            .any(|hidden| hidden.eq_ignore_ascii_case(name.as_str()))
    }

    /// Properties the editor shows: applicable and not hidden
    pub fn visible_properties(&self, catalog: &[OperationActionProperty]) -> Vec<PropertyName> {
        applicable_properties(catalog, self.action)
            .into_iter()
            .filter(|name| !self.is_hidden(*name))
            .collect()
    }

    fn check_applies(
        &self,
        catalog: &[OperationActionProperty],
        name: PropertyName,
    ) -> PatternResult<()> {
        if property_applies(catalog, self.action, name) {
            Ok(())
        } else {
            Err(PatternError::NotApplicable {
                property: name,
                action: self.action,
            })
        }
    }
}
