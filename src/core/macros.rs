//! Macro for declaring lifecycle status enums.

/// Declare a status enum and implement [`State`](crate::core::State) and
/// `Display` for it.
///
/// Each variant carries the label returned by `name()`. Variants listed under
/// `final:` and `error:` drive `is_final()` and `is_error()`.
///
/// # Example
///
/// ```
/// use parcel_lifecycle::core::State;
/// use parcel_lifecycle::state_enum;
///
/// state_enum! {
///     pub enum ManifestState {
///         Open => "OPEN",
///         Sealed => "SEALED",
///         Lost => "LOST",
///     }
///     final: [Sealed, Lost]
///     error: [Lost]
/// }
///
/// assert_eq!(ManifestState::Sealed.to_string(), "SEALED");
/// assert!(ManifestState::Lost.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $label),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
