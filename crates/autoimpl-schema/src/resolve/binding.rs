use crate::{
    node::{Blueprint, ImplementationOf},
    resolve::ResolveError,
    types::{TypeRef, Visibility},
};

///
/// Binding
///
/// One marked field paired with the interface it implements.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Binding {
    pub field: String,
    pub field_ty: TypeRef,
    pub field_vis: Visibility,
    pub interface: String,
}

/// Resolve the interface a marker points at.
///
/// The payload is read through `ImplementationOf::value`; when that traps with
/// `MirroredType` the reference carried by the trap is used instead.
pub fn resolve_target_interface(marker: &ImplementationOf) -> Result<String, ResolveError> {
    let target = match marker.value() {
        Ok(interface) => interface.path(),
        Err(mirrored) => mirrored.into_type_ref(),
    };
    let target = target.trim();

    if target.is_empty() {
        return Err(ResolveError::InvalidMarker {
            target: String::new(),
            reason: "empty type reference".to_string(),
        });
    }
    if let Err(e) = syn::parse_str::<syn::Path>(target) {
        return Err(ResolveError::InvalidMarker {
            target: target.to_string(),
            reason: e.to_string(),
        });
    }

    Ok(target.to_string())
}

/// Collect bindings in field declaration order.
///
/// Private fields are not rejected here.
pub fn extract_bindings(blueprint: &Blueprint) -> Result<Vec<Binding>, ResolveError> {
    blueprint
        .fields
        .iter()
        .filter_map(|field| field.implementation_of.as_ref().map(|marker| (field, marker)))
        .map(|(field, marker)| {
            Ok(Binding {
                field: field.ident.clone(),
                field_ty: field.ty.clone(),
                field_vis: field.vis,
                interface: resolve_target_interface(marker)?,
            })
        })
        .collect()
}
