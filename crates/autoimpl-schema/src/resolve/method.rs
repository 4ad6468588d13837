use crate::{
    node::{Interface, MethodSignature, Schema},
    resolve::{InterfaceClosure, ResolveError},
};

///
/// EnumeratedMethod
///
/// A method signature tagged with the interface that declares it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumeratedMethod {
    pub owner: String,
    pub signature: MethodSignature,
}

/// Methods declared directly on `interface`; supertraits are not walked.
#[must_use]
pub fn declared_methods(interface: &Interface) -> &[MethodSignature] {
    &interface.methods
}

/// Methods of every closure member, in closure order.
///
/// Identical signatures on different members are all kept.
pub fn enumerate(
    schema: &Schema,
    closure: &InterfaceClosure,
) -> Result<Vec<EnumeratedMethod>, ResolveError> {
    let mut methods = Vec::new();

    for path in closure {
        let interface = schema.interface(path)?;
        methods.extend(declared_methods(interface).iter().map(|signature| EnumeratedMethod {
            owner: path.clone(),
            signature: signature.clone(),
        }));
    }

    Ok(methods)
}
