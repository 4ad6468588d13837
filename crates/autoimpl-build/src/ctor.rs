use crate::{
    diagnostics::{Diagnostic, DiagnosticSink},
    ident,
};
use autoimpl_schema::{
    node::{Blueprint, Param},
    types::Visibility,
};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

///
/// MirroredCtor
///
/// A public constructor on the generated type forwarding to the blueprint's
/// constructor of the same name.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MirroredCtor {
    pub blueprint: String,
    pub ident: String,
    pub params: Vec<Param>,
    pub source_vis: Visibility,
}

impl MirroredCtor {
    /// Whether the runtime factory can hold this constructor; borrowed
    /// parameters cannot travel through `dyn Any`.
    #[must_use]
    pub fn is_registrable(&self) -> bool {
        self.params.iter().all(|p| !p.ty.is_borrowed())
    }

    /// `<Blueprint>::<ctor>(<args>)`
    #[must_use]
    pub fn forward_call(&self) -> TokenStream {
        let blueprint = ident(&self.blueprint);
        let ctor = ident(&self.ident);
        let args = self.params.iter().map(|p| ident(&p.ident));

        quote!(#blueprint::#ctor(#(#args),*))
    }
}

impl ToTokens for MirroredCtor {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = ident(&self.ident);
        let params = self.params.iter().map(|p| {
            let param = ident(&p.ident);
            let ty = &p.ty;
            quote!(#param: #ty)
        });
        let call = self.forward_call();

        tokens.extend(quote! {
            #[must_use]
            pub fn #name(#(#params),*) -> Self {
                Self { base: #call }
            }
        });
    }
}

/// Mirror every blueprint constructor, warning on the ones that aren't public.
pub fn mirror(blueprint: &Blueprint, diags: &mut dyn DiagnosticSink) -> Vec<MirroredCtor> {
    blueprint
        .constructors
        .iter()
        .map(|ctor| {
            if !ctor.vis.is_public() {
                diags.report(Diagnostic::warning(format!(
                    "constructor {}::{} is not public; the mirrored constructor and the factory may be unable to reach it",
                    blueprint.path(),
                    ctor.ident
                )));
            }

            MirroredCtor {
                blueprint: blueprint.def.ident.clone(),
                ident: ctor.ident.clone(),
                params: ctor.params.clone(),
                source_vis: ctor.vis,
            }
        })
        .collect()
}
