mod loggable;
mod parse;
mod traceable;

use proc_macro::TokenStream;

/// Declares a log event enum whose variants carry a message and a severity.
///
/// ```ignore
/// loggable! {
///     QueueLog {
///         #[error("Queued backup job: {name}")]
///         Queued { name: String } => Severity::Info,
///     }
/// }
/// ```
#[proc_macro]
pub fn loggable(input: TokenStream) -> TokenStream {
    loggable::loggable_impl(input)
}

/// Declares an error enum. Every variant without `#[no_source]` receives an
/// extra `err: String` field holding the rendered source error, and a
/// snake_case constructor taking the declared fields plus the source.
#[proc_macro]
pub fn traceable(input: TokenStream) -> TokenStream {
    traceable::traceable_impl(input)
}
