use crate::ident;
use autoimpl_schema::{
    node::MethodSignature,
    resolve::{Binding, EnumeratedMethod},
    types::ReturnType,
};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

///
/// DelegateBody
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DelegateBody {
    /// `self.base.field.m(..);`, for methods returning nothing
    Statement,

    /// the forwarding call is the returned value
    Return,
}

impl DelegateBody {
    #[must_use]
    pub const fn for_return(returns: &ReturnType) -> Self {
        match returns {
            ReturnType::Unit => Self::Statement,
            ReturnType::Value(_) => Self::Return,
        }
    }
}

///
/// DelegateMethod
///
/// One generated override forwarding to a bound field.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateMethod {
    pub owner: String,
    pub field: String,
    pub signature: MethodSignature,
    pub body: DelegateBody,
}

impl DelegateMethod {
    /// `self.base.<field>.<method>(<params>)`
    #[must_use]
    pub fn forward_call(&self) -> TokenStream {
        let field = ident(&self.field);
        let method = ident(&self.signature.ident);
        let args = self.signature.params.iter().map(|p| ident(&p.ident));

        quote!(self.base.#field.#method(#(#args),*))
    }

    #[must_use]
    pub fn body_tokens(&self) -> TokenStream {
        let call = self.forward_call();

        match self.body {
            DelegateBody::Statement => quote!(#call;),
            DelegateBody::Return => quote!(#call),
        }
    }
}

impl ToTokens for DelegateMethod {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let sig = &self.signature;
        let name = ident(&sig.ident);
        let receiver = sig.receiver;
        let params = sig.params.iter().map(|p| {
            let param = ident(&p.ident);
            let ty = &p.ty;
            quote!(#param: #ty)
        });
        let returns = &sig.returns;
        let body = self.body_tokens();

        // the owning trait must be in scope for the call to resolve through
        // the field's own type, `Box<dyn Trait>` included; the include site
        // usually imports it already
        let owner = match syn::parse_str::<syn::Path>(&self.owner) {
            Ok(path) => path.to_token_stream(),
            Err(e) => e.to_compile_error(),
        };

        let docs = if sig.failures.is_empty() {
            quote!()
        } else {
            let list = sig
                .failures
                .iter()
                .map(|f| format!("`{f}`"))
                .collect::<Vec<_>>()
                .join(", ");
            let doc = format!(" Failures from the delegate ({list}) propagate unchanged.");
            quote!(#[doc = #doc])
        };

        tokens.extend(quote! {
            #docs
            #[inline]
            fn #name(#receiver #(, #params)*) #returns {
                #[allow(unused_imports)]
                use #owner as _;
                #body
            }
        });
    }
}

/// One override per enumerated method, in enumeration order.
#[must_use]
pub fn synthesize(binding: &Binding, methods: &[EnumeratedMethod]) -> Vec<DelegateMethod> {
    methods
        .iter()
        .map(|method| DelegateMethod {
            owner: method.owner.clone(),
            field: binding.field.clone(),
            signature: method.signature.clone(),
            body: DelegateBody::for_return(&method.signature.returns),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoimpl_schema::types::{Receiver, TypeRef, Visibility};

    fn binding() -> Binding {
        Binding {
            field: "speaker".to_string(),
            field_ty: TypeRef::new("Box<dyn crate::Speaker>"),
            field_vis: Visibility::Public,
            interface: "crate::Speaker".to_string(),
        }
    }

    fn enumerated(signature: MethodSignature) -> EnumeratedMethod {
        EnumeratedMethod {
            owner: "crate::Speaker".to_string(),
            signature,
        }
    }

    fn render(method: &DelegateMethod) -> syn::ImplItemFn {
        syn::parse2(method.to_token_stream()).expect("method should parse")
    }

    #[test]
    fn unit_methods_forward_as_a_bare_statement() {
        let methods = synthesize(
            &binding(),
            &[enumerated(
                MethodSignature::new("say")
                    .with_param("word", "&str")
                    .with_param("times", "u8"),
            )],
        );

        assert_eq!(methods[0].body, DelegateBody::Statement);
        let item = render(&methods[0]);
        assert_eq!(item.block.stmts.len(), 2);
        assert!(matches!(
            &item.block.stmts[0],
            syn::Stmt::Item(syn::Item::Use(u))
                if u.attrs.iter().any(|a| a.path().is_ident("allow"))
        ));
        assert!(matches!(
            &item.block.stmts[1],
            syn::Stmt::Expr(syn::Expr::MethodCall(_), Some(_))
        ));
        assert_eq!(
            methods[0].forward_call().to_string(),
            "self . base . speaker . say (word , times)"
        );
    }

    #[test]
    fn value_methods_return_the_forwarding_call() {
        let methods = synthesize(
            &binding(),
            &[enumerated(MethodSignature::new("speak").returning("String"))],
        );

        assert_eq!(methods[0].body, DelegateBody::Return);
        let item = render(&methods[0]);
        assert!(matches!(
            item.block.stmts.last(),
            Some(syn::Stmt::Expr(syn::Expr::MethodCall(_), None))
        ));
        assert!(matches!(item.sig.output, syn::ReturnType::Type(..)));
    }

    #[test]
    fn signature_is_copied_exactly() {
        let signature = MethodSignature::new("write")
            .with_receiver(Receiver::RefMut)
            .with_param("buf", "&[u8]")
            .returning("std::io::Result<usize>")
            .failing_with("std::io::Error");
        let methods = synthesize(&binding(), &[enumerated(signature.clone())]);

        assert_eq!(methods[0].signature, signature);
        let item = render(&methods[0]);
        assert_eq!(item.sig.ident, "write");
        assert_eq!(item.sig.inputs.len(), 2);
        assert!(matches!(
            item.sig.inputs.first(),
            Some(syn::FnArg::Receiver(r)) if r.mutability.is_some() && r.reference.is_some()
        ));
        let docs = item.attrs.iter().filter(|a| a.path().is_ident("doc")).count();
        assert_eq!(docs, 1, "failures are documented");
    }

    #[test]
    fn owned_receiver_is_preserved() {
        let methods = synthesize(
            &binding(),
            &[enumerated(
                MethodSignature::new("finish")
                    .with_receiver(Receiver::Value)
                    .returning("u32"),
            )],
        );

        let item = render(&methods[0]);
        assert!(matches!(
            item.sig.inputs.first(),
            Some(syn::FnArg::Receiver(r)) if r.reference.is_none()
        ));
    }
}
