use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Result, parse_macro_input};

/// Derives `rig_rete::Fact` for a struct with exactly one `#[fact(id)]` field
/// and exactly one `#[fact(timestamp)]` field.
///
/// ```ignore
/// #[derive(Fact)]
/// struct AlertFact {
///     #[fact(id)]
///     id: String,
///     #[fact(timestamp)]
///     received_at: chrono::DateTime<chrono::Utc>,
///     severity: Severity,
/// }
/// ```
#[proc_macro_derive(Fact, attributes(fact))]
pub fn derive_fact(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_fact(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_fact(input: &DeriveInput) -> Result<proc_macro2::TokenStream> {
    let fields = struct_fields(input)?;

    let id_field = find_tagged_field(fields, "id")?;
    let timestamp_field = find_tagged_field(fields, "timestamp")?;

    let id_ident = id_field.ident.as_ref().expect("named field");
    let id_ty = &id_field.ty;
    let ts_ident = timestamp_field.ident.as_ref().expect("named field");

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics rig_rete::Fact for #name #ty_generics #where_clause {
            type Id = #id_ty;

            fn id(&self) -> &Self::Id {
                &self.#id_ident
            }

            fn timestamp(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.#ts_ident
            }
        }
    })
}

fn struct_fields(input: &DeriveInput) -> Result<&syn::FieldsNamed> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields),
            other => Err(Error::new_spanned(
                other,
                "Fact can only be derived for structs with named fields",
            )),
        },
        _ => Err(Error::new(
            Span::call_site(),
            "Fact can only be derived for structs",
        )),
    }
}

fn find_tagged_field<'a>(fields: &'a syn::FieldsNamed, tag: &str) -> Result<&'a syn::Field> {
    let mut found = None;

    for field in &fields.named {
        if has_fact_tag(field, tag)? {
            if found.is_some() {
                return Err(Error::new_spanned(
                    field,
                    format!("duplicate #[fact({tag})] field"),
                ));
            }
            found = Some(field);
        }
    }

    found.ok_or_else(|| {
        Error::new(
            Span::call_site(),
            format!("missing #[fact({tag})] field"),
        )
    })
}

fn has_fact_tag(field: &syn::Field, tag: &str) -> Result<bool> {
    for attr in &field.attrs {
        if !attr.path().is_ident("fact") {
            continue;
        }
        let mut matched = false;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(tag) {
                matched = true;
            }
            Ok(())
        })?;
        if matched {
            return Ok(true);
        }
    }
    Ok(false)
}
