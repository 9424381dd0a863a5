//! Swift package references and the products consumed from them.

use crate::id::ObjectId;

/// Requirement kind written for every package reference.
pub const UP_TO_NEXT_MAJOR: &str = "upToNextMajorVersion";

/// An `XCRemoteSwiftPackageReference`: a remote package and its version
/// requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReference {
    /// Repository URL.
    pub url: String,
    /// Lowest acceptable version; anything up to the next major matches.
    pub minimum_version: String,
}

/// An `XCSwiftPackageProductDependency`: one product of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDependency {
    /// The package that vends the product.
    pub package: ObjectId,
    /// Product name as declared by the package.
    pub product_name: String,
}
