use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Returns true when the derive input is a struct with a named `span` field.
fn has_span_field(input: &DeriveInput) -> bool {
    match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => fields.named.iter().any(|field| {
                field.ident.as_ref().is_some_and(|ident| ident == "span")
            }),
            _ => false,
        },
        _ => false,
    }
}

/// Derive macro for implementing `AstNode` on a parsed database node.
///
/// This implements `HasSpan`, `HasNodeType`, and the `AstNode` marker.
/// The struct must carry a `span: SymbolSpan` field.
///
/// # Example
///
/// ```ignore
/// #[derive(AstNode)]
/// struct RecordAlias {
///     pub record: String,
///     pub alias: String,
///     pub span: SymbolSpan,
/// }
/// ```
#[proc_macro_derive(AstNode)]
pub fn derive_ast_node(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) =
        input.generics.split_for_impl();

    if !has_span_field(&input) {
        return syn::Error::new_spanned(
            &input,
            "AstNode can only be derived for structs with a `span: SymbolSpan` field",
        )
        .to_compile_error()
        .into();
    }

    let type_name = name.to_string();

    let expanded = quote! {
        impl #impl_generics HasSpan for #name #ty_generics #where_clause {
            fn span(&self) -> &SymbolSpan {
                &self.span
            }
        }

        impl #impl_generics HasNodeType for #name #ty_generics #where_clause {
            fn node_type(&self) -> &'static str {
                #type_name
            }
        }

        impl #impl_generics AstNode for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}

/// Derive an inherent `name()` method for an enum that returns the variant name.
///
/// For unit variants, the match arm uses `Type::Variant`.
/// For tuple variants, it uses `Type::Variant(..)`.
/// For struct variants, it uses `Type::Variant { .. }`.
///
/// # Example
///
/// ```ignore
/// #[derive(EnumKindName)]
/// enum K { Unit, Tuple(u8), Struct { x: u8 } }
/// # impl K { /* name() generated */ }
/// ```
#[proc_macro_derive(EnumKindName)]
pub fn derive_enum_kind_name(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(
            &input,
            "EnumKindName can only be derived for enums",
        )
        .to_compile_error()
        .into();
    };

    let arms = data_enum.variants.iter().map(|v| {
        let v_ident = &v.ident;
        let v_name = v_ident.to_string();
        match &v.fields {
            Fields::Unit => quote! { #name::#v_ident => #v_name },
            Fields::Unnamed(_) => quote! { #name::#v_ident(..) => #v_name },
            Fields::Named(_) => quote! { #name::#v_ident { .. } => #v_name },
        }
    });

    let expanded = quote! {
        impl #name {
            /// Return the enum variant name.
            #[must_use]
            pub fn name(&self) -> &'static str {
                match self {
                    #( #arms, )*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
