use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    Attribute, Expr, Field, Fields, Ident, ItemStruct, LitStr, Path, Token, meta::ParseNestedMeta,
    parse_macro_input, parse_quote,
};

#[derive(Default)]
struct RecordArgs {
    name: Option<LitStr>,
    traits: Option<Path>,
    active_model: Option<Ident>,
    id: Option<Ident>,
    created_at: Option<Ident>,
    updated_at: Option<Ident>,
}

impl RecordArgs {
    fn parse(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let key = meta
            .path
            .get_ident()
            .map(Ident::to_string)
            .unwrap_or_default();
        let value: LitStr = meta.value()?.parse()?;
        match key.as_str() {
            "name" => self.name = Some(value),
            "traits" => self.traits = Some(value.parse()?),
            "active_model" => self.active_model = Some(value.parse()?),
            "id" => self.id = Some(value.parse()?),
            "created_at" => self.created_at = Some(value.parse()?),
            "updated_at" => self.updated_at = Some(value.parse()?),
            _ => {
                return Err(meta.error(
                    "unknown record key; expected name, traits, active_model, id, created_at or updated_at",
                ));
            }
        }
        Ok(())
    }
}

/// Turns a sea-orm `Model` struct into a repository record.
///
/// Injects `id`, `created_at` and `updated_at` columns when the struct does not
/// declare them, and implements the repository traits for the generated
/// `ActiveModel` and `Entity`. Must be placed above `DeriveEntityModel`.
///
/// ```ignore
/// #[record(name = "User")]
/// #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
/// #[sea_orm(table_name = "users")]
/// pub struct Model { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn record(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = RecordArgs::default();
    let parser = syn::meta::parser(|meta| args.parse(meta));
    parse_macro_input!(attr with parser);

    let mut input = parse_macro_input!(item as ItemStruct);
    match expand(args, &mut input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: RecordArgs, input: &mut ItemStruct) -> syn::Result<TokenStream2> {
    let name = match args.name {
        Some(name) => name,
        None => table_name(&input.attrs)?.ok_or_else(|| {
            syn::Error::new_spanned(
                &input.ident,
                "record requires `name = \"..\"` or #[sea_orm(table_name = \"..\")]",
            )
        })?,
    };
    let traits = args
        .traits
        .unwrap_or_else(|| parse_quote!(crate::db::dao::base_traits));
    let active_model = args.active_model.unwrap_or_else(|| call_site("ActiveModel"));
    let id = args.id.unwrap_or_else(|| call_site("id"));
    let created_at = args.created_at.unwrap_or_else(|| call_site("created_at"));
    let updated_at = args.updated_at.unwrap_or_else(|| call_site("updated_at"));

    inject_columns(input, &id, &created_at, &updated_at)?;

    let id_column = column_ident(&id);
    let created_at_column = column_ident(&created_at);

    Ok(quote! {
        #input

        impl #traits::HasIdActiveModel for #active_model {
            fn set_id(&mut self, id: uuid::Uuid) {
                self.#id = sea_orm::ActiveValue::Set(id);
            }
        }

        impl #traits::TimestampedActiveModel for #active_model {
            fn set_created_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone) {
                self.#created_at = sea_orm::ActiveValue::Set(ts);
            }

            fn set_updated_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone) {
                self.#updated_at = sea_orm::ActiveValue::Set(ts);
            }
        }

        impl #traits::RecordEntity for Entity {
            const NAME: &'static str = #name;

            fn id_column() -> Column {
                Column::#id_column
            }

            fn created_at_column() -> Column {
                Column::#created_at_column
            }
        }
    })
}

/// Prepends the id and timestamp columns the struct leaves out.
fn inject_columns(
    input: &mut ItemStruct,
    id: &Ident,
    created_at: &Ident,
    updated_at: &Ident,
) -> syn::Result<()> {
    let struct_ident = input.ident.clone();
    let Fields::Named(fields) = &mut input.fields else {
        return Err(syn::Error::new_spanned(
            struct_ident,
            "record requires a struct with named fields",
        ));
    };

    let declared = |ident: &Ident| {
        fields
            .named
            .iter()
            .any(|field| field.ident.as_ref() == Some(ident))
    };

    let mut injected: Vec<Field> = Vec::new();
    if !declared(id) {
        injected.push(parse_quote! {
            #[sea_orm(primary_key, auto_increment = false)]
            pub #id: uuid::Uuid
        });
    }
    for column in [created_at, updated_at] {
        if !declared(column) {
            injected.push(parse_quote! {
                #[sea_orm(default_expr = "Expr::current_timestamp()")]
                pub #column: sea_orm::entity::prelude::DateTimeWithTimeZone
            });
        }
    }

    let own = std::mem::take(&mut fields.named);
    fields.named = injected.into_iter().chain(own).collect();
    Ok(())
}

/// Reads `table_name` out of the struct's `#[sea_orm(..)]` attributes.
fn table_name(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("sea_orm")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table_name") {
                found = Some(meta.value()?.parse::<LitStr>()?);
            } else if meta.input.peek(Token![=]) {
                let _: Expr = meta.value()?.parse()?;
            }
            Ok(())
        })?;
    }
    Ok(found)
}

fn call_site(name: &str) -> Ident {
    Ident::new(name, Span::call_site())
}

// sea-orm names `Column` variants after the field in PascalCase.
fn column_ident(field: &Ident) -> Ident {
    let pascal: String = field
        .to_string()
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    Ident::new(&pascal, field.span())
}
