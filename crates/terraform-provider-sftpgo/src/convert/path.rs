// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fmt;

/// Location of an attribute inside a resource, used to point errors at the
/// configuration that caused them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrPath(Vec<Step>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
	Attr(&'static str),
	Index(usize),
	Key(String),
}

impl AttrPath {
	pub fn root() -> Self {
		Self::default()
	}

	pub fn attr(&self, name: &'static str) -> Self {
		self.with(Step::Attr(name))
	}

	pub fn index(&self, index: usize) -> Self {
		self.with(Step::Index(index))
	}

	pub fn key(&self, key: impl Into<String>) -> Self {
		self.with(Step::Key(key.into()))
	}

	pub fn steps(&self) -> &[Step] {
		&self.0
	}

	pub fn is_root(&self) -> bool {
		self.0.is_empty()
	}

	fn with(&self, step: Step) -> Self {
		let mut steps = self.0.clone();
		steps.push(step);
		Self(steps)
	}
}

impl fmt::Display for AttrPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			return f.write_str("<root>");
		}
		for (i, step) in self.0.iter().enumerate() {
			match step {
				Step::Attr(name) if i == 0 => f.write_str(name)?,
				Step::Attr(name) => write!(f, ".{name}")?,
				Step::Index(index) => write!(f, "[{index}]")?,
				Step::Key(key) => write!(f, "[{key:?}]")?,
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_terraform_style() {
		let path = AttrPath::root()
			.attr("virtual_folders")
			.index(2)
			.attr("name");
		assert_eq!(path.to_string(), "virtual_folders[2].name");

		let path = AttrPath::root().attr("permissions").key("/uploads");
		assert_eq!(path.to_string(), "permissions[\"/uploads\"]");
		assert_eq!(AttrPath::root().to_string(), "<root>");
	}
}
