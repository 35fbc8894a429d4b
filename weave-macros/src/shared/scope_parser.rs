use syn::{
    Attribute, ItemStruct, LitStr, Result, Token,
    parse::{Parse, ParseStream},
};

/// Provider scope types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderScope {
    Singleton,
    Request,
    Transient,
}

impl Default for ProviderScope {
    fn default() -> Self {
        Self::Singleton
    }
}

/// Controller scope types (only Singleton and Request)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerScope {
    Singleton,
    Request,
}

impl Default for ControllerScope {
    fn default() -> Self {
        Self::Singleton // Controllers are Singleton by default (like NestJS)
    }
}

/// Parse provider_struct attribute: #[provider_struct(scope = "request", init = "new", pub struct Foo { ... })]
pub struct ProviderStructArgs {
    pub scope: ProviderScope,
    pub init: Option<String>, // Optional custom constructor method name
    pub struct_def: ItemStruct,
}

/// Parse controller_struct attribute: #[controller_struct(scope = "request", pub struct Foo { ... })]
pub struct ControllerStructArgs {
    pub scope: ControllerScope,
    pub was_explicit: bool, // Did user explicitly write scope = "..."?
    pub struct_def: ItemStruct,
}

impl Parse for ProviderStructArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut scope = ProviderScope::default();
        let mut init: Option<String> = None;

        // Parse optional attributes: scope = "...", init = "..."
        while input.peek(syn::Ident) && !input.peek(Token![pub]) && !input.peek(Token![struct]) {
            let ident: syn::Ident = input.parse()?;

            if ident == "scope" {
                // Parse: scope = "request"
                let _eq: Token![=] = input.parse()?;
                let value: LitStr = input.parse()?;

                scope = match value.value().as_str() {
                    "singleton" => ProviderScope::Singleton,
                    "request" => ProviderScope::Request,
                    "transient" => ProviderScope::Transient,
                    other => {
                        return Err(syn::Error::new(
                            value.span(),
                            format!(
                                "Invalid scope: '{}'. Must be 'singleton', 'request', or 'transient'",
                                other
                            ),
                        ));
                    }
                };
            } else if ident == "init" {
                // Parse: init = "new"
                let _eq: Token![=] = input.parse()?;
                let value: LitStr = input.parse()?;
                init = Some(value.value());
            } else {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("Unknown attribute: '{}'. Expected 'scope' or 'init'", ident),
                ));
            }

            // Consume the comma after attribute
            if input.peek(Token![,]) {
                let _: Token![,] = input.parse()?;
            }
        }

        // Parse the struct definition
        let struct_def: ItemStruct = input.parse()?;

        Ok(ProviderStructArgs {
            scope,
            init,
            struct_def,
        })
    }
}

impl Parse for ControllerStructArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut scope = ControllerScope::default();
        let mut was_explicit = false;

        // Check if first token is "scope"
        let lookahead = input.lookahead1();
        if lookahead.peek(syn::Ident) {
            let ident: syn::Ident = input.fork().parse()?;

            if ident == "scope" {
                // Parse: scope = "request"
                let _ident: syn::Ident = input.parse()?;
                let _eq: Token![=] = input.parse()?;
                let value: LitStr = input.parse()?;

                was_explicit = true; // User explicitly set the scope
                scope = match value.value().as_str() {
                    "singleton" => ControllerScope::Singleton,
                    "request" => ControllerScope::Request,
                    other => {
                        return Err(syn::Error::new(
                            value.span(),
                            format!(
                                "Invalid controller scope: '{}'. Must be 'singleton' or 'request'. Note: Controllers cannot be 'transient'",
                                other
                            ),
                        ));
                    }
                };

                // Consume the comma after scope
                if input.peek(Token![,]) {
                    let _: Token![,] = input.parse()?;
                }
            }
        }

        // Parse the struct definition
        let struct_def: ItemStruct = input.parse()?;

        Ok(ControllerStructArgs {
            scope,
            was_explicit,
            struct_def,
        })
    }
}

/// Extract scope from attributes like #[scope("singleton")]
/// DEPRECATED: Use ProviderStructArgs instead
pub fn parse_scope_from_attrs(attrs: &[Attribute]) -> Result<ProviderScope> {
    for attr in attrs {
        if attr.path().is_ident("scope") {
            let value: LitStr = attr.parse_args()?;

            let scope = match value.value().as_str() {
                "singleton" => ProviderScope::Singleton,
                "request" => ProviderScope::Request,
                "transient" => ProviderScope::Transient,
                other => {
                    return Err(syn::Error::new(
                        value.span(),
                        format!(
                            "Invalid scope: '{}'. Must be 'singleton', 'request', or 'transient'",
                            other
                        ),
                    ));
                }
            };

            return Ok(scope);
        }
    }

    // Default to singleton if no scope attribute found
    Ok(ProviderScope::default())
}
