/// Declare a `String` newtype that rejects empty values.
macro_rules! nutype_string {
    ($(#[doc=$doc:literal])* $ident:ident) => {
        $(#[doc=$doc])*
        #[::nutype::nutype(
            validate(not_empty),
            derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, AsRef, Display, Serialize, Deserialize)
        )]
        pub struct $ident(String);
    };
}

pub(crate) use nutype_string;
