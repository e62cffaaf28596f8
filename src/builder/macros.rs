//! Macros for declaring large transition tables.

/// Declare many paths on a [`MachineBuilder`](crate::MachineBuilder) at once.
///
/// Each entry reads `from => label => to` and expands to one call to
/// [`MachineBuilder::path`](crate::MachineBuilder::path). Any expression
/// convertible to a state name or label works, so string constants shared
/// with a lexer can be used directly.
///
/// # Example
///
/// ```
/// use lexdfa::{paths, MachineBuilder};
///
/// let term = "semicolon";
/// let mut builder = MachineBuilder::new();
///
/// paths! {
///     builder;
///     "start" => "quoted" => "quoted",
///     "start" => term => "start",
///     "quoted" => term => "start",
/// }
///
/// assert_eq!(builder.describe().transition_count(), 3);
/// ```
#[macro_export]
macro_rules! paths {
    (
        $builder:expr;
        $($from:expr => $label:expr => $to:expr),* $(,)?
    ) => {{
        let builder: &mut $crate::MachineBuilder = &mut $builder;
        $(
            builder.path($from, $label, $to);
        )*
    }};
}
