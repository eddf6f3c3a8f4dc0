//! Interned types.
//!
//! Types are hash-consed: structurally identical `TypeData` always receive
//! the same `TypeId`, so plain `TypeId` equality is structural equality.

use crate::ids::{DeclId, TypeId};
use rustc_hash::FxHashMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variance {
    Invariant,
    Out,
    In,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArg {
    Type { variance: Variance, ty: TypeId },
    Star,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// The top type, optionally nullable.
    Any { nullable: bool },
    /// A classifier type, possibly generic.
    Class {
        class: DeclId,
        args: Vec<TypeArg>,
        nullable: bool,
    },
    /// A use of a type parameter.
    Param { param: DeclId, nullable: bool },
}

impl TypeData {
    pub fn is_any_or_nullable_any(&self) -> bool {
        matches!(self, TypeData::Any { .. })
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeData::Any { nullable }
            | TypeData::Class { nullable, .. }
            | TypeData::Param { nullable, .. } => *nullable,
        }
    }

    /// Type arguments; empty for non-generic types.
    pub fn arguments(&self) -> &[TypeArg] {
        match self {
            TypeData::Class { args, .. } => args,
            TypeData::Any { .. } | TypeData::Param { .. } => &[],
        }
    }

    /// The classifier declaration behind this type, if any.
    pub fn classifier(&self) -> Option<DeclId> {
        match self {
            TypeData::Class { class, .. } => Some(*class),
            TypeData::Param { param, .. } => Some(*param),
            TypeData::Any { .. } => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TypeInterner {
    types: Vec<TypeData>,
    lookup: FxHashMap<TypeData, TypeId>,
}

impl TypeInterner {
    pub const ANY: TypeId = TypeId(0);
    pub const NULLABLE_ANY: TypeId = TypeId(1);

    pub fn new() -> Self {
        let mut interner = Self {
            types: Vec::new(),
            lookup: FxHashMap::default(),
        };
        interner.intern(TypeData::Any { nullable: false });
        interner.intern(TypeData::Any { nullable: true });
        interner
    }

    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.lookup.get(&data) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(data.clone());
        self.lookup.insert(data, id);
        id
    }

    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.types[id.index()]
    }

    pub fn class_type(&mut self, class: DeclId) -> TypeId {
        self.intern(TypeData::Class {
            class,
            args: Vec::new(),
            nullable: false,
        })
    }

    pub fn param_type(&mut self, param: DeclId) -> TypeId {
        self.intern(TypeData::Param {
            param,
            nullable: false,
        })
    }

    /// The nullable variant of `id`.
    pub fn nullable(&mut self, id: TypeId) -> TypeId {
        let data = match self.get(id).clone() {
            TypeData::Any { .. } => TypeData::Any { nullable: true },
            TypeData::Class { class, args, .. } => TypeData::Class {
                class,
                args,
                nullable: true,
            },
            TypeData::Param { param, .. } => TypeData::Param {
                param,
                nullable: true,
            },
        };
        self.intern(data)
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}
