//! type-wrapper chain resolution
//!
//! flattens `NON_NULL` / `LIST` wrappers around a named type into a
//! [`ResolvedType`]. nested lists collapse: `[[Int]]` resolves exactly like
//! `[Int]`, and a list admits `null` elements when any position inside it
//! is nullable.

use crate::error::{Error, Result};
use crate::introspection::{TypeKind, TypeRef};

/// wrappers the introspection queries expand
pub const MAX_WRAPPER_DEPTH: usize = 3;

/// flat view of a wrapped type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub base_kind: TypeKind,
    pub base_name: String,
    /// outermost wrapper is not `NON_NULL`
    pub nullable: bool,
    /// any wrapper is `LIST`
    pub is_list: bool,
    /// a `null` may appear somewhere inside the outermost list
    pub element_nullable: bool,
}

/// walk `ofType` links down to the named base type
pub fn resolve(ty: &TypeRef) -> Result<ResolvedType> {
    let mut wrappers = Vec::new();
    let mut current = ty;
    while let Some(inner) = &current.of_type {
        wrappers.push(current.kind);
        current = inner;
    }

    // a wrapper with nothing under it means the query cut the chain short
    if wrappers.len() > MAX_WRAPPER_DEPTH || current.kind.is_wrapper() {
        return Err(Error::UnsupportedTypeDepth {
            depth: wrappers.len() + usize::from(current.kind.is_wrapper()),
            type_name: current.name.clone(),
        });
    }

    let base_name = current.name.clone().ok_or_else(|| {
        Error::Schema(format!(
            "named {} type without a name",
            current.kind.as_str()
        ))
    })?;

    Ok(ResolvedType {
        base_kind: current.kind,
        base_name,
        nullable: ty.kind != TypeKind::NonNull,
        is_list: wrappers.contains(&TypeKind::List),
        element_nullable: element_nullable(&wrappers),
    })
}

/// true unless every position below the outermost `LIST` is `NON_NULL`
fn element_nullable(wrappers: &[TypeKind]) -> bool {
    let Some(outer) = wrappers.iter().position(|kind| *kind == TypeKind::List) else {
        return false;
    };
    let mut rest = wrappers[outer + 1..].iter();
    loop {
        match rest.next() {
            Some(TypeKind::NonNull) => match rest.next() {
                Some(TypeKind::List) => continue,
                _ => return false,
            },
            // a nested list or the base type without `NON_NULL` around it
            _ => return true,
        }
    }
}
