//! The `rdf:` and `xsd:` IRIs that the term model relies on.
//!
//! Well-known vocabularies are otherwise left to the application:
//! any [`IriRef`](crate::IriRef) can be used as a predicate, a class or a datatype.

/// Helper for creating a "namespace module"
/// defining a set of IRIs within a given IRI space.
///
/// # Safety
/// This macro is conceptually unsafe,
/// as it is never checked that the prefix IRI is a valid IRI reference.
macro_rules! namespace {
    ($iri_prefix:literal, $($suffix:ident),*) => {
        /// Prefix used in this namespace.
        pub static PREFIX: &str = $iri_prefix;

        lazy_static::lazy_static! {
            $(
                /// Generated term.
                #[allow(non_upper_case_globals)]
                pub static ref $suffix: $crate::IriRef =
                    $crate::IriRef::new_unchecked(concat!($iri_prefix, stringify!($suffix)));
            )*
        }
    };
}

/// The standard `rdf:` namespace (only the terms used by the term model).
pub mod rdf {
    namespace!(
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
        langString,
        PlainLiteral,
        XMLLiteral
    );
}

/// The standard `xsd:` namespace.
pub mod xsd {
    namespace!(
        "http://www.w3.org/2001/XMLSchema#",
        anyURI,
        base64Binary,
        boolean,
        byte,
        date,
        dateTime,
        decimal,
        double,
        duration,
        float,
        hexBinary,
        int,
        integer,
        language,
        long,
        negativeInteger,
        nonNegativeInteger,
        nonPositiveInteger,
        normalizedString,
        positiveInteger,
        short,
        string,
        time,
        token,
        unsignedByte,
        unsignedInt,
        unsignedLong,
        unsignedShort
    );
}
