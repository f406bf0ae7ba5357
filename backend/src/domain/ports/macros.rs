//! `define_port_error!` declares the error enums of the MY5 driven ports
//! (profile and favourite stores, the identity service and the ranking API).
//!
//! Each variant carries its display message inline and gets a snake_case
//! constructor taking `impl Into<_>` per field, so adapters can write
//! `FavoriteRepositoryError::connection(err.to_string())` or
//! `RankingApiError::timeout("...")` without spelling out the struct.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($($field: impl Into<$ty>),*)?) -> Self {
                        Self::$variant $( { $($field: $field.into()),* } )?
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    define_port_error! {
        /// Shaped like the store errors: message-only, multi-field and unit.
        pub enum SlotStoreError {
            Unavailable { message: String } => "store unavailable: {message}",
            Rejected { slot: u8, message: String } => "slot {slot} rejected: {message}",
            Locked => "board locked",
        }
    }

    #[rstest]
    #[case(SlotStoreError::unavailable("pool drained"), "store unavailable: pool drained")]
    #[case(SlotStoreError::rejected(2_u8, "duplicate"), "slot 2 rejected: duplicate")]
    #[case(SlotStoreError::locked(), "board locked")]
    fn constructors_render_their_message(#[case] err: SlotStoreError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn string_fields_accept_owned_and_borrowed() {
        assert_eq!(
            SlotStoreError::unavailable(String::from("down")),
            SlotStoreError::unavailable("down")
        );
        assert_eq!(SlotStoreError::locked(), SlotStoreError::Locked);
    }
}
