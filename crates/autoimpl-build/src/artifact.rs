use crate::{ctor::MirroredCtor, delegate::DelegateMethod, ident};
use autoimpl_config_build::Config;
use autoimpl_schema::{
    node::Blueprint,
    resolve::{Binding, InterfaceClosure},
};
use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use std::collections::BTreeMap;

///
/// Delegation
///
/// Everything synthesized for one binding.
///

#[derive(Clone, Debug)]
pub struct Delegation {
    pub binding: Binding,
    pub closure: InterfaceClosure,
    pub methods: Vec<DelegateMethod>,
}

///
/// TraitImpl
/// one `impl <interface> for <Artifact>` block
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TraitImpl {
    pub interface: String,
    pub field: String,
    pub methods: Vec<DelegateMethod>,
}

///
/// Artifact
///
/// The generated wrapper for one blueprint. Immutable once assembled.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Artifact {
    pub name: String,
    pub package: String,
    pub blueprint: String,
    pub blueprint_path: String,
    pub impls: Vec<TraitImpl>,
    pub constructors: Vec<MirroredCtor>,
    pub runtime_crate: String,
}

impl Artifact {
    /// Qualified name, `<package>::<name>`.
    #[must_use]
    pub fn path(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.package, self.name)
        }
    }

    /// All synthesized methods, binding-then-closure order.
    pub fn methods(&self) -> impl Iterator<Item = &DelegateMethod> {
        self.impls.iter().flat_map(|imp| imp.methods.iter())
    }

    /// Interfaces implemented more than once, which the compiler will reject.
    /// Happens when two bindings share an ancestor.
    #[must_use]
    pub fn duplicate_impls(&self) -> Vec<&str> {
        let mut counts = BTreeMap::<&str, usize>::new();
        for imp in &self.impls {
            *counts.entry(imp.interface.as_str()).or_default() += 1;
        }

        counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(interface, _)| interface)
            .collect()
    }

    /// File the artifact is emitted to, e.g. `greeter_impl.rs`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.name.to_case(Case::Snake))
    }

    /// Source text with the provenance header.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "// @generated by autoimpl: implementation of {}. Do not edit.\n{}\n",
            self.blueprint_path,
            self.to_token_stream()
        )
    }

    fn runtime(&self) -> TokenStream {
        match syn::parse_str::<syn::Path>(&self.runtime_crate) {
            Ok(path) => path.to_token_stream(),
            Err(e) => e.to_compile_error(),
        }
    }

    /// `Generated` impl plus the load-time registration with the process-wide
    /// factory.
    fn registration(&self) -> TokenStream {
        let runtime = self.runtime();
        let generated = ident(&self.name);
        let blueprint = ident(&self.blueprint);
        let blueprint_path = &self.blueprint_path;
        let name = self.path();

        let ctors = self
            .constructors
            .iter()
            .filter(|c| c.is_registrable())
            .map(|ctor| {
                let ctor_name = ident(&ctor.ident);
                let tys: Vec<_> = ctor.params.iter().map(|p| &p.ty).collect();
                let locals: Vec<_> = (0..tys.len())
                    .map(|i| quote::format_ident!("a{i}"))
                    .collect();
                let input = if tys.is_empty() {
                    quote!(_)
                } else {
                    quote!(args)
                };

                quote! {
                    #runtime::factory::Constructor::new(
                        ::std::vec![#(#runtime::factory::Param::of::<#tys>()),*],
                        |#input| {
                            #( let #locals = args.take::<#tys>()?; )*
                            let instance: ::std::boxed::Box<dyn ::std::any::Any> =
                                ::std::boxed::Box::new(Self::#ctor_name(#(#locals),*));
                            ::std::result::Result::Ok(instance)
                        },
                    )
                }
            });

        quote! {
            impl #runtime::Generated for #generated {
                type Blueprint = #blueprint;
                const BLUEPRINT: &'static str = #blueprint_path;
                const NAME: &'static str = #name;

                fn constructors() -> ::std::vec::Vec<#runtime::factory::Constructor> {
                    ::std::vec![#(#ctors),*]
                }
            }

            #[#runtime::__reexports::ctor::ctor(
                unsafe,
                anonymous,
                crate_path = #runtime::__reexports::ctor
            )]
            fn __register() {
                <#generated as #runtime::Generated>::register();
            }
        }
    }
}

impl ToTokens for Artifact {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = ident(&self.name);
        let blueprint = ident(&self.blueprint);
        let doc = format!(" Generated implementation of {}", self.blueprint);
        let provenance = format!(" Blueprint: `{}`", self.blueprint_path);
        let ctors = &self.constructors;

        let impls = self.impls.iter().map(|imp| {
            let interface = match syn::parse_str::<syn::Path>(&imp.interface) {
                Ok(path) => path.to_token_stream(),
                Err(e) => e.to_compile_error(),
            };
            let methods = &imp.methods;

            quote! {
                impl #interface for #name {
                    #(#methods)*
                }
            }
        });

        let registration = self.registration();

        tokens.extend(quote! {
            #[doc = #doc]
            #[doc = ""]
            #[doc = #provenance]
            #[allow(non_camel_case_types)]
            pub struct #name {
                base: #blueprint,
            }

            #[allow(clippy::new_without_default)]
            impl #name {
                #(#ctors)*
            }

            impl ::core::ops::Deref for #name {
                type Target = #blueprint;

                fn deref(&self) -> &Self::Target {
                    &self.base
                }
            }

            impl ::core::ops::DerefMut for #name {
                fn deref_mut(&mut self) -> &mut Self::Target {
                    &mut self.base
                }
            }

            impl ::core::convert::AsRef<#blueprint> for #name {
                fn as_ref(&self) -> &#blueprint {
                    &self.base
                }
            }

            #(#impls)*

            #registration
        });
    }
}

/// Compose the generated type for `blueprint`.
#[must_use]
pub fn assemble(
    blueprint: &Blueprint,
    delegations: Vec<Delegation>,
    constructors: Vec<MirroredCtor>,
    config: &Config,
) -> Artifact {
    let impls = delegations
        .into_iter()
        .flat_map(|delegation| {
            let Delegation {
                binding,
                closure,
                methods,
            } = delegation;

            closure
                .iter()
                .map(|interface| TraitImpl {
                    interface: interface.to_string(),
                    field: binding.field.clone(),
                    methods: methods
                        .iter()
                        .filter(|m| m.owner == interface)
                        .cloned()
                        .collect(),
                })
                .collect::<Vec<_>>()
        })
        .collect();

    Artifact {
        name: format!("{}{}", blueprint.def.ident, config.suffix),
        package: blueprint.package().to_string(),
        blueprint: blueprint.def.ident.clone(),
        blueprint_path: blueprint.path(),
        impls,
        constructors,
        runtime_crate: config.runtime_crate.clone(),
    }
}
