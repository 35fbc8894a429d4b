use syn::{Attribute, Path, Token, punctuated::Punctuated};

/// Whether `attr` is a `#[derive(...)]` attribute that already lists `Clone`.
pub fn derives_clone(attr: &Attribute) -> bool {
    if !attr.path().is_ident("derive") {
        return false;
    }
    let Ok(paths) = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated) else {
        return false;
    };
    paths.iter().any(|path| path.is_ident("Clone"))
}
