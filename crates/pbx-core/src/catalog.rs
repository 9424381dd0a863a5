//! The flat object table behind a project file.
//!
//! [`Catalog`] owns every object in the graph, keyed by [`ObjectId`]. Edges
//! between objects are plain identifiers; nothing holds a pointer to another
//! object. Insertion order is preserved because it decides the order objects
//! are written within their section.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::GraphError;
use crate::id::ObjectId;
use crate::types::{Isa, Object, Project};

/// All objects of one project, in insertion order.
///
/// # Examples
///
/// ```
/// use pbx_core::{Catalog, Group, Object, ObjectId};
///
/// let root = ObjectId::from_key("project");
/// let mut catalog = Catalog::new(root);
///
/// let group = ObjectId::from_key("group:main");
/// catalog.insert(group, Object::Group(Group::default()))?;
///
/// assert_eq!(catalog.len(), 1);
/// assert!(catalog.contains(group));
/// # Ok::<(), pbx_core::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    root: ObjectId,
    objects: Vec<(ObjectId, Object)>,
    index: FxHashMap<ObjectId, usize>,
}

impl Catalog {
    /// Creates an empty catalog whose root will be `root`.
    ///
    /// The root object itself is inserted like any other.
    #[must_use]
    pub fn new(root: ObjectId) -> Self {
        Self {
            root,
            objects: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Adds an object.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateObject`] if `id` is already present.
    pub fn insert(&mut self, id: ObjectId, object: Object) -> Result<(), GraphError> {
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateObject(id));
        }
        trace!(%id, isa = object.isa().as_str(), "insert object");
        self.index.insert(id, self.objects.len());
        self.objects.push((id, object));
        Ok(())
    }

    /// Returns the object with identifier `id`.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.index.get(&id).map(|&slot| &self.objects[slot].1)
    }

    /// Returns `true` if `id` is defined.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    /// The designated root identifier.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> ObjectId {
        self.root
    }

    /// The root project, if it has been inserted.
    #[must_use]
    pub fn project(&self) -> Option<&Project> {
        match self.get(self.root) {
            Some(Object::Project(project)) => Some(project),
            _ => None,
        }
    }

    /// Iterates over all objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    /// Iterates over the objects of one kind in insertion order.
    pub fn objects_of(&self, isa: Isa) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.iter().filter(move |(_, object)| object.isa() == isa)
    }

    /// Number of objects.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the catalog holds no objects.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Checks the structural invariants of the graph.
    ///
    /// - the root is a [`Project`]
    /// - every referenced identifier is defined
    /// - every configuration list's default names one of its configurations
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.project().is_none() {
            return Err(GraphError::InvalidRoot(self.root));
        }

        for (id, object) in self.iter() {
            if let Some(missing) = object.references().into_iter().find(|r| !self.contains(*r)) {
                return Err(GraphError::DanglingReference {
                    from: id,
                    to: missing,
                });
            }

            if let Object::ConfigurationList(list) = object {
                let listed = list.configurations.iter().any(|config| {
                    matches!(
                        self.get(*config),
                        Some(Object::BuildConfiguration(c)) if c.name == list.default_name
                    )
                });
                if !listed {
                    return Err(GraphError::InvalidDefaultConfiguration {
                        list: id,
                        name: list.default_name.as_str().to_owned(),
                    });
                }
            }
        }

        Ok(())
    }
}
