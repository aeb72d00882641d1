// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Terse construction of `tf_provider` block schemas.

use std::collections::HashMap;

use tf_provider::{Attribute, AttributeConstraint, AttributeType, Block, Description, NestedBlock};

/// Builds a [`Block`] attribute by attribute.
pub struct BlockBuilder {
	block: Block,
}

impl BlockBuilder {
	pub fn new(description: &str) -> Self {
		Self {
			block: Block {
				description: Description::plain(description),
				..Default::default()
			},
		}
	}

	fn attribute(
		mut self,
		name: &str,
		attr_type: AttributeType,
		constraint: AttributeConstraint,
		sensitive: bool,
		description: &str,
	) -> Self {
		self.block.attributes.insert(
			name.to_string(),
			Attribute {
				attr_type,
				description: Description::plain(description),
				constraint,
				sensitive,
				..Default::default()
			},
		);
		self
	}

	pub fn required_string(self, name: &str, description: &str) -> Self {
		self.attribute(name, AttributeType::String, AttributeConstraint::Required, false, description)
	}

	pub fn optional_string(self, name: &str, description: &str) -> Self {
		self.attribute(name, AttributeType::String, AttributeConstraint::Optional, false, description)
	}

	pub fn computed_string(self, name: &str, description: &str) -> Self {
		self.attribute(name, AttributeType::String, AttributeConstraint::Computed, false, description)
	}

	/// Optional and sensitive, for passwords and KMS secrets.
	pub fn secret(self, name: &str, description: &str) -> Self {
		self.attribute(name, AttributeType::String, AttributeConstraint::Optional, true, description)
	}

	pub fn required_int(self, name: &str, description: &str) -> Self {
		self.attribute(name, AttributeType::Number, AttributeConstraint::Required, false, description)
	}

	pub fn optional_int(self, name: &str, description: &str) -> Self {
		self.attribute(name, AttributeType::Number, AttributeConstraint::Optional, false, description)
	}

	pub fn computed_int(self, name: &str, description: &str) -> Self {
		self.attribute(name, AttributeType::Number, AttributeConstraint::Computed, false, description)
	}

	pub fn optional_bool(self, name: &str, description: &str) -> Self {
		self.attribute(name, AttributeType::Bool, AttributeConstraint::Optional, false, description)
	}

	pub fn computed_bool(self, name: &str, description: &str) -> Self {
		self.attribute(name, AttributeType::Bool, AttributeConstraint::Computed, false, description)
	}

	pub fn optional_strings(self, name: &str, description: &str) -> Self {
		self.attribute(
			name,
			AttributeType::List(Box::new(AttributeType::String)),
			AttributeConstraint::Optional,
			false,
			description,
		)
	}

	pub fn optional_ints(self, name: &str, description: &str) -> Self {
		self.attribute(
			name,
			AttributeType::List(Box::new(AttributeType::Number)),
			AttributeConstraint::Optional,
			false,
			description,
		)
	}

	pub fn optional_string_map(self, name: &str, description: &str) -> Self {
		self.attribute(
			name,
			AttributeType::Map(Box::new(AttributeType::String)),
			AttributeConstraint::Optional,
			false,
			description,
		)
	}

	/// A computed list of objects shaped like `item`, used by data sources.
	pub fn computed_objects(self, name: &str, item: &Block, sensitive: bool, description: &str) -> Self {
		self.attribute(
			name,
			AttributeType::List(Box::new(object_type(item))),
			AttributeConstraint::Computed,
			sensitive,
			description,
		)
	}

	/// At most one nested block.
	pub fn single(mut self, name: &str, block: Block) -> Self {
		self.block.blocks.insert(name.to_string(), NestedBlock::Optional(block));
		self
	}

	/// Any number of nested blocks.
	pub fn list(mut self, name: &str, block: Block) -> Self {
		self.block.blocks.insert(name.to_string(), NestedBlock::List(block));
		self
	}

	pub fn build(self) -> Block {
		self.block
	}
}

/// The attribute type of a value shaped like `block`. Covers the nesting modes
/// [`BlockBuilder`] produces.
pub fn object_type(block: &Block) -> AttributeType {
	let mut fields: HashMap<String, AttributeType> = block
		.attributes
		.iter()
		.map(|(name, attr)| (name.clone(), attr.attr_type.clone()))
		.collect();
	for (name, nested) in &block.blocks {
		let attr_type = match nested {
			NestedBlock::List(inner) => AttributeType::List(Box::new(object_type(inner))),
			NestedBlock::Optional(inner) => object_type(inner),
			_ => continue,
		};
		fields.insert(name.clone(), attr_type);
	}
	AttributeType::Object(fields)
}

/// Names of the attributes and nested blocks of `block`, for tests.
#[cfg(test)]
pub fn field_names(block: &Block) -> Vec<String> {
	let mut names: Vec<String> = block
		.attributes
		.keys()
		.chain(block.blocks.keys())
		.cloned()
		.collect();
	names.sort();
	names
}
