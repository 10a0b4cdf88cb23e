use std::cmp::Ordering;
use std::collections::HashSet;

use crate::ns::{rdf, xsd};
use crate::*;
use test_case::test_case;

fn iri(txt: &str) -> Term {
    Term::Iri(IriRef::new_unchecked(txt))
}

fn typed(lex: &str, dt: &IriRef) -> Term {
    Term::Literal(Literal::typed(lex, dt.clone()))
}

fn plain(lex: &str) -> Term {
    Term::Literal(Literal::plain(lex))
}

fn tagged(lex: &str, tag: &str) -> Term {
    Term::Literal(Literal::lang(lex, LanguageTag::new_unchecked(tag)))
}

fn samples() -> Vec<Term> {
    vec![
        iri("http://example.org/b"),
        iri("http://example.org/a"),
        Term::BlankNode(BnodeId::new_unchecked("x")),
        Term::BlankNode(BnodeId::new_unchecked("a")),
        Term::Variable(VarName::new_unchecked("v")),
        plain("a"),
        plain("b"),
        typed("a", &xsd::string),
        tagged("a", "en"),
        tagged("a", "EN-gb"),
        tagged("b", "de"),
        typed("1", &xsd::integer),
        typed("01", &xsd::integer),
        typed("2", &xsd::byte),
        typed("1.5", &xsd::decimal),
        typed("1.0", &xsd::double),
        typed("NaN", &xsd::double),
        typed("-INF", &xsd::float),
        typed("zz", &xsd::double),
        typed("zz", &xsd::integer),
        typed("true", &xsd::boolean),
        typed("0", &xsd::boolean),
        typed("2024-09-17T12:34:56", &xsd::dateTime),
        typed("2024-09-17T12:34:56Z", &xsd::dateTime),
        typed("2024-09-17T13:34:56+01:00", &xsd::dateTime),
        typed("not a date", &xsd::dateTime),
        typed("x", &IriRef::new_unchecked("http://example.org/dt")),
        typed("y", &IriRef::new_unchecked("http://example.org/dt")),
        typed("x", &rdf::XMLLiteral),
    ]
}

#[test]
fn equality_is_consistent_with_hash() {
    let terms = samples();
    let set: HashSet<Term> = terms.iter().cloned().collect();
    // "1" and "01" are the same integer once normalized
    assert_eq!(set.len(), terms.len() - 1);
    for t in &terms {
        assert!(set.contains(t));
    }
}

#[test]
fn permissive_order_is_total() {
    let terms = samples();
    for a in &terms {
        assert_eq!(a.cmp(a), Ordering::Equal);
        for b in &terms {
            assert_eq!(a.cmp(b), b.cmp(a).reverse(), "{a} {b}");
            assert_eq!(a.cmp(b) == Ordering::Equal, a == b, "{a} {b}");
            for c in &terms {
                if a <= b && b <= c {
                    assert!(a <= c, "{a} <= {b} <= {c}");
                }
            }
        }
    }
}

#[test]
fn kind_precedence() {
    let mut terms = vec![
        typed("1", &xsd::integer),
        iri("http://example.org/"),
        Term::Variable(VarName::new_unchecked("v")),
        Term::BlankNode(BnodeId::new_unchecked("b")),
    ];
    terms.sort();
    let kinds: Vec<_> = terms.iter().map(Term::kind).collect();
    assert_eq!(
        kinds,
        vec![
            TermKind::BlankNode,
            TermKind::Variable,
            TermKind::Iri,
            TermKind::Literal
        ]
    );
}

#[test_case(typed("1", &xsd::integer), typed("2", &xsd::double) => Ordering::Less ; "integer below double")]
#[test_case(typed("2", &xsd::byte), typed("1.5", &xsd::decimal) => Ordering::Greater ; "byte above decimal")]
#[test_case(typed("NaN", &xsd::double), typed("99", &xsd::integer) => Ordering::Greater ; "nan last")]
#[test_case(typed("1.0", &xsd::double), typed("1", &xsd::integer) => Ordering::Greater ; "same value falls back to lexical")]
#[test_case(typed("zz", &xsd::integer), typed("1", &xsd::integer) => Ordering::Greater ; "ill-formed number after numbers")]
#[test_case(typed("1", &xsd::integer), plain("0") => Ordering::Less ; "numbers before strings")]
#[test_case(plain("a"), typed("a", &xsd::string) => Ordering::Less ; "plain before xsd string")]
#[test_case(plain("b"), tagged("a", "en") => Ordering::Less ; "untagged before tagged")]
#[test_case(tagged("b", "EN"), tagged("a", "fr") => Ordering::Less ; "tags before lexical forms")]
#[test_case(typed("false", &xsd::boolean), typed("true", &xsd::boolean) => Ordering::Less ; "booleans")]
#[test_case(typed("2030-01-01T00:00:00Z", &xsd::dateTime), typed("2000-01-01T00:00:00", &xsd::dateTime) => Ordering::Less ; "timezoned before naive")]
#[test_case(typed("9999-12-31T00:00:00", &xsd::dateTime), typed("oops", &xsd::dateTime) => Ordering::Less ; "ill-formed date time last")]
fn collation(t1: Term, t2: Term) -> Ordering {
    t1.cmp(&t2)
}

#[test_case(typed("1", &xsd::integer), plain("a") ; "number and string")]
#[test_case(typed("true", &xsd::boolean), typed("1", &xsd::integer) ; "boolean and number")]
#[test_case(typed("x", &IriRef::new_unchecked("http://example.org/dt")), plain("x") ; "unknown datatype")]
fn strict_incomparable(t1: Term, t2: Term) {
    let err = t1.compare(&t2, ComparisonMode::Strict).unwrap_err();
    assert_eq!(err.left, t1.to_string());
    assert!(t2.compare(&t1, ComparisonMode::Strict).is_err());
    assert_eq!(t1.compare(&t2, ComparisonMode::Permissive), Ok(t1.cmp(&t2)));
}

#[test_case(typed("1", &xsd::integer), typed("2.5", &xsd::double) ; "numbers")]
#[test_case(typed("zz", &xsd::integer), typed("2", &xsd::integer) ; "ill-formed number")]
#[test_case(plain("a"), typed("b", &xsd::string) ; "strings")]
#[test_case(tagged("a", "en"), tagged("b", "fr") ; "language strings")]
#[test_case(plain("a"), tagged("a", "en") ; "string and language string")]
#[test_case(iri("http://example.org/"), plain("a") ; "not literals")]
#[test_case(Term::BlankNode(BnodeId::new_unchecked("b")), iri("http://example.org/") ; "not literals either")]
fn strict_comparable(t1: Term, t2: Term) {
    assert_eq!(t1.compare(&t2, ComparisonMode::Strict), Ok(t1.cmp(&t2)));
}

#[test]
fn sort_is_deterministic() {
    let mut terms1 = samples();
    let mut terms2 = samples();
    terms2.reverse();
    terms1.sort();
    terms2.sort();
    assert_eq!(terms1, terms2);
}

#[test]
fn terms_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Term>();
    assert_send_sync::<TermConfig>();
}

#[test]
fn checked_constructors() {
    assert!(Term::new_iri("http://example.org/").unwrap().is_iri());
    assert!(matches!(
        Term::new_iri("a b"),
        Err(TermError::InvalidIri { .. })
    ));
    assert!(Term::new_bnode("b0").unwrap().is_blank_node());
    assert!(matches!(
        Term::new_bnode("_:b0"),
        Err(TermError::InvalidBlankNodeId(_))
    ));
    assert!(Term::new_variable("x").unwrap().is_variable());
    assert!(Term::new_variable("?x").is_err());
}
