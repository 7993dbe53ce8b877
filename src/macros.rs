//! Kind predicate generation macros
//!
//! These macros eliminate repetitive match code when asking "is this a row?"
//! across the closed set of node kinds. They use `paste` internally for
//! identifier concatenation.

/// Generate `is_xxx` predicates for each `NodeKind` variant
///
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool` - kind check (`TextArea` -> `is_text_area`)
///
/// # Forms
/// ```ignore
/// impl NodeKind {
///     impl_kind_predicates!(self; Row, Column, Text);
/// }
/// impl Node {
///     // `kind` names the field holding the NodeKind
///     impl_kind_predicates!(self.kind; Row, Column, Text);
/// }
/// ```
#[macro_export]
macro_rules! impl_kind_predicates {
    (self; $($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is the " $variant " kind"]
                #[inline]
                pub const fn [<is_ $variant:snake>](&self) -> bool {
                    matches!(self, Self::$variant)
                }
            )*
        }
    };
    (self.$field:ident; $($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " $variant " node"]
                #[inline]
                pub fn [<is_ $variant:snake>](&self) -> bool {
                    matches!(self.$field, $crate::kind::NodeKind::$variant)
                }
            )*
        }
    };
}

/// Generate infallible leaf constructors for kinds carrying text
///
/// # Example
/// ```ignore
/// impl Node {
///     impl_text_leaf_ctors!(text => Text, text_area => TextArea);
///     // Expands to: pub fn text(content: impl Into<CompactString>) -> Self { ... }
/// }
/// ```
#[macro_export]
macro_rules! impl_text_leaf_ctors {
    ($($method:ident => $variant:ident),* $(,)?) => {
        $(
            #[doc = concat!("Create a `", stringify!($variant), "` leaf with a fresh id")]
            pub fn $method(content: impl Into<::compact_str::CompactString>) -> Self {
                Self::leaf(
                    $crate::kind::NodeKind::$variant,
                    $crate::node::Payload::Text(content.into()),
                )
            }
        )*
    };
}

/// Generate infallible container constructors
///
/// # Example
/// ```ignore
/// impl Node {
///     impl_container_ctors!(row => Row, column => Column);
///     // Expands to: pub fn row(children: impl IntoIterator<Item = Node>) -> Self { ... }
/// }
/// ```
#[macro_export]
macro_rules! impl_container_ctors {
    ($($method:ident => $variant:ident),* $(,)?) => {
        $(
            #[doc = concat!("Create a `", stringify!($variant), "` container with a fresh id")]
            pub fn $method(children: impl IntoIterator<Item = $crate::node::Node>) -> Self {
                Self::container_unchecked($crate::kind::NodeKind::$variant, children)
            }
        )*
    };
}
