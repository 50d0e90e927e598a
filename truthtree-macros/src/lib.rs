use quote::quote;
use syn::{parse_quote, Attribute, Expr, Lit, LitStr, Meta, MetaNameValue};
use synstructure::{decl_derive, Structure, VariantInfo};

/// Doc comment lines of a field, with the leading space of each line removed.
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    let mut lines = vec![];
    for attr in attrs.iter() {
        if let Ok(Meta::NameValue(MetaNameValue {
            path,
            lit: Lit::Str(doc_str),
            ..
        })) = attr.parse_meta()
        {
            if path.is_ident("doc") {
                let line = doc_str.value();
                lines.push(line.strip_prefix(' ').unwrap_or(&line).to_owned());
            }
        }
    }
    lines
}

fn single_variant<'a>(s: &'a Structure, derive: &str) -> &'a VariantInfo<'a> {
    match s.variants() {
        [variant] => variant,
        _ => panic!("{} requires a struct", derive),
    }
}

/// Derives a default instance from the documentation.
fn derive_doc_default(s: Structure) -> proc_macro2::TokenStream {
    let variant = single_variant(&s, "DocDefault");

    let default_re = regex::Regex::new(r"\(Default: (.*)\)").unwrap();

    let body = variant.construct(|field, _| {
        let mut default_value: Expr = parse_quote!(Default::default());
        for line in doc_lines(&field.attrs) {
            if let Some(default_str) = default_re.captures(&line) {
                let default_str = default_str.get(1).unwrap().as_str();
                let default_str = LitStr::new(default_str, proc_macro2::Span::call_site());
                default_value = default_str
                    .parse()
                    .expect("error parsing default expression");
            }
        }
        default_value
    });

    s.gen_impl(quote! {
        gen impl Default for @Self {
            fn default() -> Self {
                #body
            }
        }
    })
}

/// Derives a `help` function listing all fields together with their documentation.
fn derive_config_help(s: Structure) -> proc_macro2::TokenStream {
    let variant = single_variant(&s, "ConfigHelp");

    let mut help = String::new();

    for binding in variant.bindings() {
        let field = binding.ast();
        let name = field
            .ident
            .as_ref()
            .expect("ConfigHelp requires named fields");
        help.push_str(&format!("{}:\n", name));
        for line in doc_lines(&field.attrs) {
            help.push_str(&format!("    {}\n", line));
        }
        help.push('\n');
    }

    let name = &s.ast().ident;
    let (impl_generics, ty_generics, where_clause) = s.ast().generics.split_for_impl();

    quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Description of all configuration options.
            pub fn help() -> &'static str {
                #help
            }
        }
    }
}

decl_derive!([DocDefault] => derive_doc_default);
decl_derive!([ConfigHelp] => derive_config_help);
