//! Identifier tables for shared objects.
//!
//! The stream writes an object's fields only the first time it appears; every
//! later occurrence is just its identifier. Generic objects, images and inline
//! arrays are numbered independently, so each gets its own table.

use std::collections::HashMap;

use crate::scene::ObjectId;

/// Which identifier space a lookup applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Namespace {
    Object,
    Image,
    Array,
}

/// Per-decode mapping from stream identifiers to arena handles.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    objects: HashMap<u32, ObjectId>,
    images: HashMap<u32, ObjectId>,
    arrays: HashMap<u32, ObjectId>,
}

impl Registry {
    fn table(&self, namespace: Namespace) -> &HashMap<u32, ObjectId> {
        match namespace {
            Namespace::Object => &self.objects,
            Namespace::Image => &self.images,
            Namespace::Array => &self.arrays,
        }
    }

    fn table_mut(&mut self, namespace: Namespace) -> &mut HashMap<u32, ObjectId> {
        match namespace {
            Namespace::Object => &mut self.objects,
            Namespace::Image => &mut self.images,
            Namespace::Array => &mut self.arrays,
        }
    }

    pub(crate) fn lookup(&self, namespace: Namespace, unique_id: u32) -> Option<ObjectId> {
        self.table(namespace).get(&unique_id).copied()
    }

    /// Bind `unique_id` to `handle`. An identifier is only ever registered
    /// after a failed lookup, so the first binding is the one that sticks.
    pub(crate) fn register(&mut self, namespace: Namespace, unique_id: u32, handle: ObjectId) {
        self.table_mut(namespace).entry(unique_id).or_insert(handle);
    }
}
