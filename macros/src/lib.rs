//! Derive macros for TaskHive stores.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates helpers for action enums (commands/events)
//!
//! # Example
//!
//! ```ignore
//! use taskhive_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum BoardAction {
//!     #[command]
//!     CreateTask { title: String },
//!
//!     #[event]
//!     TaskCreated { id: i64, title: String },
//! }
//!
//! // Generated methods:
//! assert!(BoardAction::CreateTask { title: "test".into() }.is_command());
//! assert_eq!(BoardAction::CreateTask { title: "test".into() }.name(), "CreateTask");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, parse_macro_input};

/// Derive macro for Action enums.
///
/// Generates helper methods for action enums:
/// - `is_command()` - Returns true if this variant is a command
/// - `is_event()` - Returns true if this variant is an event
/// - `name()` - Returns the variant name (used as a tracing field)
///
/// # Attributes
///
/// - `#[command]` - Mark a variant as a command (user intent)
/// - `#[event]` - Mark a variant as an event (resolved fact)
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - A variant has both `#[command]` and `#[event]` attributes
#[proc_macro_derive(Action, attributes(command, event))]
#[allow(clippy::expect_used)] // Proc macro panics become compile errors, not runtime panics
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut command_variants = Vec::new();
    let mut event_variants = Vec::new();

    for variant in &data_enum.variants {
        let variant_name = &variant.ident;
        let is_command = has_attribute(&variant.attrs, "command");
        let is_event = has_attribute(&variant.attrs, "event");

        if is_command && is_event {
            return syn::Error::new_spanned(
                variant,
                "Variant cannot be both #[command] and #[event]",
            )
            .to_compile_error()
            .into();
        }

        if is_command {
            command_variants.push(variant_name);
        }

        if is_event {
            event_variants.push(variant_name);
        }
    }

    // Map of variant names to their field shapes for pattern generation
    let variant_map: std::collections::HashMap<_, _> = data_enum
        .variants
        .iter()
        .map(|v| (&v.ident, &v.fields))
        .collect();

    let is_command_arms = command_variants.iter().map(|&variant| {
        let fields = *variant_map.get(variant).expect("variant must exist in map");
        variant_arm(variant, fields, quote! { true })
    });

    let is_event_arms = event_variants.iter().map(|&variant| {
        let fields = *variant_map.get(variant).expect("variant must exist in map");
        variant_arm(variant, fields, quote! { true })
    });

    let name_arms = data_enum.variants.iter().map(|variant| {
        let ident = &variant.ident;
        let label = ident.to_string();
        variant_arm(ident, &variant.fields, quote! { #label })
    });

    let expanded = quote! {
        impl #name {
            /// Returns true if this action is a command
            #[must_use]
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#is_command_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#is_event_arms)*
                    _ => false,
                }
            }

            /// Returns the variant name, for logging and tracing fields
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Build a match arm `Self::Variant ... => body,` for any field shape.
fn variant_arm(
    ident: &syn::Ident,
    fields: &Fields,
    body: proc_macro2::TokenStream,
) -> proc_macro2::TokenStream {
    match fields {
        Fields::Named(_) => quote! { Self::#ident { .. } => #body, },
        Fields::Unnamed(_) => quote! { Self::#ident(..) => #body, },
        Fields::Unit => quote! { Self::#ident => #body, },
    }
}

/// Helper function to check if an attribute list contains a specific attribute.
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
