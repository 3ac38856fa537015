//! Identifier derivation for emitted C names.

use cwrap_core::{Identity, Param, Rename, apply, to_snake_case};
use cwrap_model::{Class, Operation, OperationKind};

/// Derives every emitted identifier from model names.
///
/// The rename hook runs on each path segment before joining and case
/// conversion. Type spellings never pass through here.
pub struct Naming {
    rename: Box<dyn Rename>,
}

impl Naming {
    /// Marker appended to the wrapped-value member name.
    pub const MEMBER_MARKER: &'static str = "_";

    /// Simple name synthesized for constructors.
    pub const CONSTRUCTOR_NAME: &'static str = "create";

    /// Simple name synthesized for destructors.
    pub const DESTRUCTOR_NAME: &'static str = "destroy";

    pub fn new(rename: impl Rename + 'static) -> Self {
        Self {
            rename: Box::new(rename),
        }
    }

    /// Join the renamed segments of `path` with `_` and snake_case the result.
    pub fn path_identifier(&self, path: &[String]) -> String {
        to_snake_case(&apply(&*self.rename, path).join("_"))
    }

    /// Name of the opaque struct wrapping `class` (e.g., `ui_widget`).
    pub fn struct_name(&self, class: &Class) -> String {
        self.path_identifier(class.qualified_name().components())
    }

    /// Name of the struct's wrapped-value member (e.g., `widget_`).
    pub fn member_name(&self, class: &Class) -> String {
        format!("{}{}", self.self_name(class), Self::MEMBER_MARKER)
    }

    /// Name of the struct pointer parameter (e.g., `widget`).
    pub fn self_name(&self, class: &Class) -> String {
        to_snake_case(&self.rename.rename(class.name()))
    }

    /// Name of the forwarding function for `op`.
    ///
    /// Constructors and destructors are named `create` and `destroy` under
    /// their class's path.
    pub fn function_name(&self, op: &Operation) -> String {
        let path = match op.kind() {
            OperationKind::Constructor => op.qualified_name().with_simple_name(Self::CONSTRUCTOR_NAME),
            OperationKind::Destructor => op.qualified_name().with_simple_name(Self::DESTRUCTOR_NAME),
            OperationKind::Method => op.qualified_name().clone(),
        };
        self.path_identifier(path.components())
    }

    /// Name of the `index`th declared parameter; unnamed ones become `arg<index>`.
    pub fn param_name(&self, param: &Param, index: usize) -> String {
        if param.name.is_empty() {
            format!("arg{index}")
        } else {
            self.rename.rename(&param.name)
        }
    }
}

impl Default for Naming {
    fn default() -> Self {
        Self::new(Identity)
    }
}

impl std::fmt::Debug for Naming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Naming").finish_non_exhaustive()
    }
}
