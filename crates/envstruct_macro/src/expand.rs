//! Code generation for the `EnvStruct` derive macro.
//!
//! This module:
//! 1. Validates that the input is a non-generic struct with named fields
//! 2. Classifies each field (`#[env]`, `#[env_help]` or plain)
//! 3. Generates the `envstruct::EnvStruct` impl
//!
//! The generated `fields()` lists `#[env]` fields in declaration order and
//! `assemble()` takes their values back in the same order.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as QuoteStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{
    Data, DeriveInput, Error as SynError, Field, Fields, Ident, PathArguments, Result as SynResult,
    Type,
};

use crate::parse::{EnvAttr, FieldKind, Parser, StructAttr};

/// The main orchestrator for macro expansion.
pub struct Expander;

impl Expander {
    /// Main entry point for expanding the derive macro.
    ///
    /// # Errors
    ///
    /// Returns a `syn::Error` if:
    /// - The input is not a struct (enums and unions are not supported)
    /// - The struct has unnamed fields (tuple structs) or no fields (unit structs)
    /// - The struct has generic parameters
    /// - Any attribute has invalid syntax
    pub fn expand(input: DeriveInput) -> SynResult<TokenStream> {
        let struct_name = &input.ident;

        if !input.generics.params.is_empty() {
            return Err(SynError::new_spanned(
                &input.generics,
                "EnvStruct does not support generic structs",
            ));
        }

        let struct_attr = StructAttr::parse_from_struct(&input)?;
        let fields = Self::extract_struct_fields(&input)?;

        let kinds: Vec<(&Field, FieldKind)> = fields
            .iter()
            .map(|f| Parser::parse_field(f).map(|kind| (f, kind)))
            .collect::<SynResult<Vec<_>>>()?;

        let specs: Vec<QuoteStream> = kinds
            .iter()
            .filter_map(|(field, kind)| match kind {
                FieldKind::Env(attr) => Some(Self::generate_field_spec(field, attr)),
                FieldKind::Help | FieldKind::Plain => None,
            })
            .collect();

        let assignments: Vec<QuoteStream> = kinds
            .iter()
            .map(|(field, kind)| Self::generate_assignment(field, kind))
            .collect();

        let dotenv_path = struct_attr.dotenv.map(|path| {
            quote! {
                fn dotenv_path() -> ::std::option::Option<&'static str> {
                    ::std::option::Option::Some(#path)
                }
            }
        });

        let expanded = quote! {
            impl ::envstruct::EnvStruct for #struct_name {
                fn fields() -> ::std::vec::Vec<::envstruct::FieldSpec> {
                    ::std::vec![#(#specs),*]
                }

                fn assemble(
                    __values: &mut ::envstruct::Values,
                    __help: &mut ::envstruct::HelpSlot,
                ) -> ::std::result::Result<Self, ::envstruct::Error> {
                    ::std::result::Result::Ok(Self {
                        #(#assignments),*
                    })
                }

                #dotenv_path
            }
        };

        Ok(expanded.into())
    }

    /// Extract named fields from the struct, rejecting invalid types.
    fn extract_struct_fields(input: &DeriveInput) -> SynResult<&Punctuated<Field, Comma>> {
        match &input.data {
            Data::Struct(data_struct) => match &data_struct.fields {
                Fields::Named(fields_named) => Ok(&fields_named.named),

                Fields::Unnamed(fields_unnamed) => Err(SynError::new_spanned(
                    fields_unnamed,
                    "EnvStruct does not support tuple structs",
                )),

                Fields::Unit => Err(SynError::new_spanned(
                    &input.ident,
                    "EnvStruct does not support unit structs",
                )),
            },

            Data::Enum(data_enum) => Err(SynError::new_spanned(
                data_enum.enum_token,
                "EnvStruct can only be derived for structs, not enums",
            )),

            Data::Union(data_union) => Err(SynError::new_spanned(
                data_union.union_token,
                "EnvStruct can only be derived for structs, not unions",
            )),
        }
    }

    /// `::envstruct::FieldSpec::new::<Ty>("name", "label", Tags { .. })`
    fn generate_field_spec(field: &Field, attr: &EnvAttr) -> QuoteStream {
        let name = Self::field_name(field).to_string();
        let ty = &field.ty;
        let label = Self::type_label(ty);

        let var = Self::optional_str(attr.var.as_deref());
        let description = Self::optional_str(attr.description.as_deref());
        let default = Self::optional_str(attr.default.as_deref());
        let parser = Self::optional_str(attr.parser.as_deref());

        quote! {
            ::envstruct::FieldSpec::new::<#ty>(
                #name,
                #label,
                ::envstruct::Tags {
                    var: #var,
                    description: #description,
                    default: #default,
                    parser: #parser,
                },
            )
        }
    }

    fn generate_assignment(field: &Field, kind: &FieldKind) -> QuoteStream {
        let ident = Self::field_name(field);
        let ty = &field.ty;

        match kind {
            FieldKind::Env(_) => {
                let name = ident.to_string();
                quote! { #ident: __values.take::<#ty>(#name)? }
            }
            FieldKind::Help => quote! { #ident: __help.take::<#ty>() },
            FieldKind::Plain => quote! { #ident: ::std::default::Default::default() },
        }
    }

    fn field_name(field: &Field) -> &Ident {
        // Named fields always carry an ident.
        field
            .ident
            .as_ref()
            .unwrap_or_else(|| unreachable!("named field without ident"))
    }

    /// The last path segment of a plain type, empty for anything else.
    ///
    /// `u16` → `"u16"`, `std::path::PathBuf` → `"PathBuf"`,
    /// `Vec<String>` / `&str` / `(u8, u8)` → `""`.
    fn type_label(ty: &Type) -> String {
        match ty {
            Type::Path(type_path) if type_path.qself.is_none() => type_path
                .path
                .segments
                .last()
                .filter(|segment| matches!(segment.arguments, PathArguments::None))
                .map(|segment| segment.ident.to_string())
                .unwrap_or_default(),
            Type::Group(group) => Self::type_label(&group.elem),
            Type::Paren(paren) => Self::type_label(&paren.elem),
            _ => String::new(),
        }
    }

    fn optional_str(value: Option<&str>) -> QuoteStream {
        match value {
            Some(value) => quote! { ::std::option::Option::Some(#value) },
            None => quote! { ::std::option::Option::None },
        }
    }
}
