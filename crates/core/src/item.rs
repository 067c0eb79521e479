//! Inventory items and their stacking rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ParseKindError;

/// Identifier assigned to a stack when it first enters the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Broad item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A placeable block.
    Block,
    /// A tool.
    Tool,
    /// A crafting resource.
    Resource,
}

impl ItemKind {
    /// Canonical lowercase string key for commands/logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            ItemKind::Block => "block",
            ItemKind::Tool => "tool",
            ItemKind::Resource => "resource",
        }
    }

    /// Parse an item kind from a string key (case-insensitive).
    pub fn parse(input: &str) -> Result<Self, ParseKindError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(ItemKind::Block),
            "tool" => Ok(ItemKind::Tool),
            "resource" => Ok(ItemKind::Resource),
            _ => Err(ParseKindError::new("item kind", input)),
        }
    }
}

/// Material tag carried by block items and world blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Dirt (brown).
    Dirt,
    /// Grass (green top layer).
    Grass,
    /// Wood (tree trunks).
    Wood,
    /// Stone.
    Stone,
}

impl Material {
    /// Canonical lowercase string key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Material::Dirt => "dirt",
            Material::Grass => "grass",
            Material::Wood => "wood",
            Material::Stone => "stone",
        }
    }

    /// Parse a material from a string key (case-insensitive).
    pub fn parse(input: &str) -> Result<Self, ParseKindError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "dirt" => Ok(Material::Dirt),
            "grass" => Ok(Material::Grass),
            "wood" => Ok(Material::Wood),
            "stone" => Ok(Material::Stone),
            _ => Err(ParseKindError::new("material", input)),
        }
    }

    /// Display colour used by the presentation layer.
    pub const fn color(self) -> &'static str {
        match self {
            Material::Dirt => "#8B4513",
            Material::Grass => "#4CAF50",
            Material::Wood => "#5D4037",
            Material::Stone => "#9E9E9E",
        }
    }

    /// Name of the block item dropped when a block of this material is mined.
    pub const fn block_item_name(self) -> &'static str {
        match self {
            Material::Dirt => "Dirt Block",
            Material::Grass => "Grass Block",
            Material::Wood => "Wood Block",
            Material::Stone => "Stone Block",
        }
    }
}

/// Key under which identical items share one stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StackKey {
    /// Item category.
    pub kind: ItemKind,
    /// Display name.
    pub name: String,
}

/// Candidate stack handed to the store before it has an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    /// Item category.
    pub kind: ItemKind,
    /// Display name.
    pub name: String,
    /// Number of units being added.
    pub quantity: u32,
    /// Optional display colour (`#RRGGBB`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Optional material tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
}

impl NewItem {
    /// Create a candidate stack with no colour or material.
    pub fn new(kind: ItemKind, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            kind,
            name: name.into(),
            quantity,
            color: None,
            material: None,
        }
    }

    /// A single block item for the given material, as dropped by mining.
    pub fn block(material: Material) -> Self {
        Self {
            kind: ItemKind::Block,
            name: material.block_item_name().to_string(),
            quantity: 1,
            color: Some(material.color().to_string()),
            material: Some(material),
        }
    }

    /// Attach a display colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Stacking key of this candidate.
    pub fn stack_key(&self) -> StackKey {
        StackKey {
            kind: self.kind,
            name: self.name.clone(),
        }
    }
}

/// One inventory stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier of this stack.
    pub id: ItemId,
    /// Item category.
    pub kind: ItemKind,
    /// Display name.
    pub name: String,
    /// Units held in this stack.
    pub quantity: u32,
    /// Optional display colour (`#RRGGBB`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Optional material tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
}

impl InventoryItem {
    /// Materialise a candidate into a stack with the given identifier.
    pub fn from_new(id: ItemId, item: NewItem) -> Self {
        Self {
            id,
            kind: item.kind,
            name: item.name,
            quantity: item.quantity,
            color: item.color,
            material: item.material,
        }
    }

    /// Check whether a candidate belongs in this stack.
    pub fn matches(&self, item: &NewItem) -> bool {
        self.kind == item.kind && self.name == item.name
    }

    /// Stacking key of this stack.
    pub fn stack_key(&self) -> StackKey {
        StackKey {
            kind: self.kind,
            name: self.name.clone(),
        }
    }

    /// Whether this stack can be placed into the world.
    pub fn is_placeable(&self) -> bool {
        self.kind == ItemKind::Block && self.quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mined_block_items_carry_material_colour() {
        let grass = NewItem::block(Material::Grass);
        assert_eq!(grass.name, "Grass Block");
        assert_eq!(grass.color.as_deref(), Some("#4CAF50"));
        assert_eq!(grass.quantity, 1);

        let dirt = NewItem::block(Material::Dirt);
        assert_eq!(dirt.name, "Dirt Block");
        assert_eq!(dirt.color.as_deref(), Some("#8B4513"));
    }

    #[test]
    fn matching_ignores_colour_and_quantity() {
        let stack = InventoryItem::from_new(ItemId(1), NewItem::block(Material::Dirt));
        let other = NewItem::new(ItemKind::Block, "Dirt Block", 5).with_color("#000000");
        assert!(stack.matches(&other));

        let tool = NewItem::new(ItemKind::Tool, "Dirt Block", 1);
        assert!(!stack.matches(&tool));
    }

    #[test]
    fn kinds_and_materials_parse_case_insensitively() {
        assert_eq!(ItemKind::parse("Block"), Ok(ItemKind::Block));
        assert_eq!(Material::parse(" STONE "), Ok(Material::Stone));
        let err = ItemKind::parse("potion").unwrap_err();
        assert_eq!(err.to_string(), "unknown item kind: \"potion\"");
    }
}
