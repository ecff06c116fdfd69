use proc_macro::TokenStream;
use quote::quote;
use syn::{
  parse::{Parse, ParseStream},
  ItemFn,
};

/// Tests marked `mysql` only run when this was set while the crate was built.
const MYSQL_URL_ENV: &str = "QUEUE_DEPTH_MYSQL_URL";

fn is_support_mysql() -> bool {
  std::env::var(MYSQL_URL_ENV)
    .map(|url| !url.trim().is_empty())
    .unwrap_or(false)
}

struct Args {
  is_mysql: bool,
}

impl Parse for Args {
  fn parse(input: ParseStream) -> syn::Result<Self> {
    if input.is_empty() {
      return Ok(Self { is_mysql: false });
    }

    let ident = input.parse::<syn::Ident>()?;
    if ident != "mysql" {
      return Err(syn::Error::new(
        ident.span(),
        "expected `mysql` or no argument",
      ));
    }

    Ok(Self { is_mysql: true })
  }
}

#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
  let item_fn = syn::parse_macro_input!(item as ItemFn);
  let args = syn::parse_macro_input!(attr as Args);

  let attrs = item_fn.attrs;
  let test_name = item_fn.sig.ident;
  let output = item_fn.sig.output;
  let content = item_fn.block;

  let is_async = item_fn.sig.asyncness.is_some();

  // This value will only change when `queue_depth_test` is rebuilt
  let ignore = if args.is_mysql && !is_support_mysql() {
    quote! { #[ignore = "QUEUE_DEPTH_MYSQL_URL is not set"] }
  } else {
    quote! {}
  };

  let content = quote! {
    queue_depth_logger::init_logger_with_level(log::Level::Trace);

    #content
  };

  if is_async {
    return quote! {
      #(#attrs)*
      #ignore
      #[tokio::test]
      async fn #test_name() #output {
        #content
      }
    }
    .into();
  }

  quote! {
    #(#attrs)*
    #ignore
    #[test]
    fn #test_name() #output {
      #content
    }
  }
  .into()
}
