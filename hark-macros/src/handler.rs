//! `#[handler]` - derive a `Handler` implementation from an impl block.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Attribute, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, ReturnType, Token, Type,
    Visibility, parse::Parse, parse_macro_input, spanned::Spanned,
};

/// Arguments for the `#[handler]` macro.
pub(crate) struct HandlerArgs {
    pub args: Type,
    pub output: Option<Type>,
}

impl Parse for HandlerArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut args = None;
        let mut output = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "args" => args = Some(input.parse()?),
                "output" => output = Some(input.parse()?),
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        let args = args.ok_or_else(|| {
            syn::Error::new(
                proc_macro2::Span::call_site(),
                "missing `args = Type`: the argument type of the listener",
            )
        })?;

        Ok(HandlerArgs { args, output })
    }
}

/// What `#[capability(..)]` says about one method.
#[derive(Default)]
struct CapabilityAttr {
    rename: Option<String>,
    skip: bool,
}

fn take_capability_attr(attrs: &mut Vec<Attribute>) -> syn::Result<CapabilityAttr> {
    let mut parsed = CapabilityAttr::default();
    let mut error = None;

    attrs.retain(|attr| {
        if !attr.path().is_ident("capability") {
            return true;
        }
        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                parsed.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.rename = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `rename = \"...\"`"))
            }
        });
        if let Err(e) = result {
            error.get_or_insert(e);
        }
        false
    });

    match error {
        Some(e) => Err(e),
        None => Ok(parsed),
    }
}

/// One exposed method.
struct Capability {
    name: String,
    call: TokenStream2,
}

fn takes_shared_self(method: &ImplItemFn) -> bool {
    matches!(
        method.sig.inputs.first(),
        Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() && receiver.mutability.is_none()
    )
}

fn returns_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Type(_, ty) => match &**ty {
            Type::Path(path) => path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Result"),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

fn capability_for(method: &ImplItemFn, name: String) -> syn::Result<Capability> {
    let fn_name = &method.sig.ident;

    if method.sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            method.sig.asyncness,
            "capability methods must be synchronous",
        ));
    }

    let mut bindings = Vec::new();
    let mut idents = Vec::new();
    for (index, arg) in method.sig.inputs.iter().skip(1).enumerate() {
        let FnArg::Typed(pat_type) = arg else {
            return Err(syn::Error::new(arg.span(), "unexpected receiver"));
        };
        let ident = format_ident!("__arg{}", index);
        let binding = if let Type::Reference(_) = &*pat_type.ty {
            quote! { let #ident = __call.require(#index)?; }
        } else {
            quote! { let #ident = ::core::clone::Clone::clone(__call.require(#index)?); }
        };
        bindings.push(binding);
        idents.push(ident);
    }

    let invoke = quote! { self.#fn_name(#(#idents),*) };
    let reply = if returns_result(&method.sig.output) {
        quote! { #invoke.map_err(::core::convert::Into::into) }
    } else {
        quote! { ::core::result::Result::Ok(#invoke) }
    };

    Ok(Capability {
        name,
        call: quote! {
            {
                #(#bindings)*
                #reply
            }
        },
    })
}

/// Implementation of the `#[handler]` macro.
pub fn handler_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as HandlerArgs);
    let mut input = parse_macro_input!(item as ItemImpl);

    if let Some((_, path, _)) = &input.trait_ {
        return syn::Error::new_spanned(path, "#[handler] goes on an inherent impl block")
            .to_compile_error()
            .into();
    }

    let mut capabilities = Vec::new();
    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };

        let attr = match take_capability_attr(&mut method.attrs) {
            Ok(attr) => attr,
            Err(e) => return e.to_compile_error().into(),
        };

        if attr.skip
            || !matches!(method.vis, Visibility::Public(_))
            || !takes_shared_self(method)
        {
            continue;
        }

        let name = attr
            .rename
            .unwrap_or_else(|| method.sig.ident.to_string());
        match capability_for(method, name) {
            Ok(capability) => capabilities.push(capability),
            Err(e) => return e.to_compile_error().into(),
        }
    }

    let args_ty = &args.args;
    let output_ty = args
        .output
        .as_ref()
        .map(|ty| quote! { #ty })
        .unwrap_or_else(|| quote! { () });
    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    let names: Vec<&String> = capabilities.iter().map(|c| &c.name).collect();
    let calls: Vec<&TokenStream2> = capabilities.iter().map(|c| &c.call).collect();

    let expanded = quote! {
        #input

        impl #impl_generics ::hark::Handler<#args_ty, #output_ty> for #self_ty #where_clause {
            fn responds_to(&self, capability: &::hark::Capability) -> bool {
                let declared: &[&str] = &[#(#names),*];
                declared.contains(&capability.as_str())
            }

            fn invoke(
                &self,
                __call: &::hark::Call<'_, #args_ty, #output_ty>,
            ) -> ::core::result::Result<#output_ty, ::hark::BoxError> {
                match __call.capability().as_str() {
                    #(#names => #calls,)*
                    _ => ::core::result::Result::Err(::std::boxed::Box::new(
                        ::hark::HarkError::MissingCapability(__call.capability().clone()),
                    )),
                }
            }
        }
    };

    TokenStream::from(expanded)
}
