//! Operation actions and the operation-action-property catalog
//!
//! Every pattern operation has an [`OperationAction`]. Which properties an
//! operation exposes is decided by the catalog: a list of
//! [`OperationActionProperty`] entries, each naming a property, its data
//! type, and the actions it applies to.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What an operation does with the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OperationAction {
    /// Placeholder, produces no motion
    #[default]
    None,
    /// Cut a straight line at depth
    Plot,
    /// Drill straight down and retract
    Plunge,
    /// Non-cutting move at safe height
    Transit,
}

impl OperationAction {
    pub fn all() -> &'static [OperationAction] {
        &[
            OperationAction::None,
            OperationAction::Plot,
            OperationAction::Plunge,
            OperationAction::Transit,
        ]
    }

    /// Whether the action removes material and therefore needs a tool
    pub fn is_cutting(self) -> bool {
        matches!(self, Self::Plot | Self::Plunge)
    }
}

impl fmt::Display for OperationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Plot => write!(f, "Plot"),
            Self::Plunge => write!(f, "Plunge"),
            Self::Transit => write!(f, "Transit"),
        }
    }
}

impl FromStr for OperationAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "plot" => Ok(Self::Plot),
            "plunge" => Ok(Self::Plunge),
            "transit" => Ok(Self::Transit),
            _ => Err(Error::invalid_enum("OperationAction", s)),
        }
    }
}

/// Names of the properties an operation can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyName {
    Action,
    OperationName,
    Tool,
    Depth,
    OffsetX,
    OffsetXOrigin,
    OffsetY,
    OffsetYOrigin,
    Length,
    Angle,
    Direction,
}

impl PropertyName {
    pub fn all() -> &'static [PropertyName] {
        use PropertyName::*;
        &[
            Action,
            OperationName,
            Tool,
            Depth,
            OffsetX,
            OffsetXOrigin,
            OffsetY,
            OffsetYOrigin,
            Length,
            Angle,
            Direction,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::OperationName => "OperationName",
            Self::Tool => "Tool",
            Self::Depth => "Depth",
            Self::OffsetX => "OffsetX",
            Self::OffsetXOrigin => "OffsetXOrigin",
            Self::OffsetY => "OffsetY",
            Self::OffsetYOrigin => "OffsetYOrigin",
            Self::Length => "Length",
            Self::Angle => "Angle",
            Self::Direction => "Direction",
        }
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_enum("PropertyName", s))
    }
}

/// Data type of an operation property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyDataType {
    AngleString,
    MeasurementString,
    String,
    DirectionLeftRightEnum,
    OffsetLeftRightEnum,
    OffsetTopBottomEnum,
    ToolName,
    PlotActionEnum,
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationActionProperty {
    pub property_name: PropertyName,
    pub data_type: PropertyDataType,
    /// Actions the property applies to; `None` means every action
    #[serde(default)]
    pub include_actions: Option<Vec<OperationAction>>,
    /// Actions the property never applies to
    #[serde(default)]
    pub exclude_actions: Vec<OperationAction>,
}

impl OperationActionProperty {
    pub fn new(property_name: PropertyName, data_type: PropertyDataType) -> Self {
        Self {
            property_name,
            data_type,
            include_actions: None,
            exclude_actions: Vec::new(),
        }
    }

    pub fn including(mut self, actions: &[OperationAction]) -> Self {
        self.include_actions = Some(actions.to_vec());
        self
    }

    pub fn excluding(mut self, actions: &[OperationAction]) -> Self {
        self.exclude_actions = actions.to_vec();
        self
    }

    /// Included (or unrestricted) and not excluded
    pub fn applies_to(&self, action: OperationAction) -> bool {
        let included = self
            .include_actions
            .as_ref()
            .is_none_or(|actions| actions.contains(&action));
        included && !self.exclude_actions.contains(&action)
    }
}

/// Whether `property` applies to `action` under `catalog`
///
/// Properties missing from the catalog apply to nothing.
pub fn property_applies(
    catalog: &[OperationActionProperty],
    action: OperationAction,
    property: PropertyName,
) -> bool {
    catalog
        .iter()
        .find(|entry| entry.property_name == property)
        .is_some_and(|entry| entry.applies_to(action))
}

/// Properties that apply to `action`, in catalog order
pub fn applicable_properties(
    catalog: &[OperationActionProperty],
    action: OperationAction,
) -> Vec<PropertyName> {
    catalog
        .iter()
        .filter(|entry| entry.applies_to(action))
        .map(|entry| entry.property_name)
        .collect()
}

/// The built-in catalog
pub fn default_action_properties() -> Vec<OperationActionProperty> {
    use OperationAction::{None, Plot, Plunge, Transit};
    use PropertyDataType::*;

    vec![
        OperationActionProperty::new(PropertyName::Action, PlotActionEnum),
        OperationActionProperty::new(PropertyName::OperationName, String),
        OperationActionProperty::new(PropertyName::Tool, ToolName).including(&[Plot, Plunge]),
        OperationActionProperty::new(PropertyName::Depth, MeasurementString)
            .including(&[Plot, Plunge]),
        OperationActionProperty::new(PropertyName::OffsetX, MeasurementString).excluding(&[None]),
        OperationActionProperty::new(PropertyName::OffsetXOrigin, OffsetLeftRightEnum)
            .excluding(&[None]),
        OperationActionProperty::new(PropertyName::OffsetY, MeasurementString).excluding(&[None]),
        OperationActionProperty::new(PropertyName::OffsetYOrigin, OffsetTopBottomEnum)
            .excluding(&[None]),
        OperationActionProperty::new(PropertyName::Length, MeasurementString).including(&[Plot]),
        OperationActionProperty::new(PropertyName::Angle, AngleString).including(&[Plot]),
        OperationActionProperty::new(PropertyName::Direction, DirectionLeftRightEnum)
            .including(&[Plot]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_minus_exclude() {
        let entry =
            OperationActionProperty::new(PropertyName::Depth, PropertyDataType::MeasurementString)
                .including(&[OperationAction::Plot, OperationAction::Plunge])
                .excluding(&[OperationAction::Plunge]);
        assert!(entry.applies_to(OperationAction::Plot));
        assert!(!entry.applies_to(OperationAction::Plunge));
        assert!(!entry.applies_to(OperationAction::Transit));
    }

    #[test]
    fn test_absent_include_means_all_non_excluded() {
        let entry =
            OperationActionProperty::new(PropertyName::OffsetX, PropertyDataType::MeasurementString)
                .excluding(&[OperationAction::None]);
        assert!(entry.applies_to(OperationAction::Plot));
        assert!(entry.applies_to(OperationAction::Transit));
        assert!(!entry.applies_to(OperationAction::None));
    }

    #[test]
    fn test_default_catalog() {
        let catalog = default_action_properties();
        assert!(property_applies(&catalog, OperationAction::Plot, PropertyName::Direction));
        assert!(!property_applies(&catalog, OperationAction::Transit, PropertyName::Depth));
        assert!(!property_applies(&[], OperationAction::Plot, PropertyName::Depth));

        let transit = applicable_properties(&catalog, OperationAction::Transit);
        assert_eq!(
            transit,
            vec![
                PropertyName::Action,
                PropertyName::OperationName,
                PropertyName::OffsetX,
                PropertyName::OffsetXOrigin,
                PropertyName::OffsetY,
                PropertyName::OffsetYOrigin,
            ]
        );
    }

    #[test]
    fn test_property_name_parsing() {
        assert_eq!("offsetx".parse::<PropertyName>().unwrap(), PropertyName::OffsetX);
        assert!("Color".parse::<PropertyName>().is_err());
        assert_eq!("PLUNGE".parse::<OperationAction>().unwrap(), OperationAction::Plunge);
    }
}
