//! The native target.

use crate::id::ObjectId;

/// Product type of an application bundle.
pub const APPLICATION_PRODUCT_TYPE: &str = "com.apple.product-type.application";

/// A `PBXNativeTarget`: the buildable product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTarget {
    /// Target name.
    pub name: String,
    /// Target-scope configuration list.
    pub build_configuration_list: ObjectId,
    /// Phases in execution order.
    pub build_phases: Vec<ObjectId>,
    /// Swift package products linked into the target.
    pub package_product_dependencies: Vec<ObjectId>,
    /// Name of the built product.
    pub product_name: String,
    /// File reference of the built product.
    pub product_reference: ObjectId,
    /// Xcode product type identifier.
    pub product_type: String,
}
