//! Scenarios exercising graphs and datasets over a [`MemoryStore`].
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use lodestone_api::graph::{Graph, GraphView};
use lodestone_api::parser::{Parser, TripleSink};
use lodestone_api::plugin::{Plugin, PluginKind, PluginRegistry};
use lodestone_api::serializer::{Serializer, SerializerOptions};
use lodestone_api::store::{Store, StoreResult, StoreSource};
use lodestone_api::term::ns::xsd;
use lodestone_api::term::{BnodeId, ComparisonMode, IriRef, LanguageTag, Literal, Term, TermConfig};
use lodestone_api::triple::{GraphScope, Triple, TriplePattern};
use lodestone_api::{dataset::Dataset, Error, Result};
use test_case::test_case;

use crate::MemoryStore;

static TEST_SETUP: Once = Once::new();

fn setup() {
    TEST_SETUP.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// One triple per line, terms in N-Triples syntax separated by tabs,
/// with an optional fourth column for the graph name.
/// Terms may not contain tabs, quotes or backslashes.
struct TsvParser;

impl TsvParser {
    fn term(txt: &str, config: &TermConfig) -> Result<Term> {
        if let Some(iri) = txt.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            return Ok(Term::new_iri(iri.to_string())?);
        }
        if let Some(id) = txt.strip_prefix("_:") {
            return Ok(Term::new_bnode(id.to_string())?);
        }
        let Some(rest) = txt.strip_prefix('"') else {
            return Err(Error::parser(format!("Unrecognized term {txt}")));
        };
        let Some((lex, suffix)) = rest.rsplit_once('"') else {
            return Err(Error::parser(format!("Unterminated literal {txt}")));
        };
        let (datatype, language) = if let Some(tag) = suffix.strip_prefix('@') {
            (None, Some(LanguageTag::new(tag.to_string())?))
        } else if let Some(dt) = suffix.strip_prefix("^^<").and_then(|t| t.strip_suffix('>')) {
            (Some(IriRef::new(dt.to_string())?), None)
        } else if suffix.is_empty() {
            (None, None)
        } else {
            return Err(Error::parser(format!("Bad literal suffix {suffix}")));
        };
        Ok(Literal::with_config(lex, datatype, language, config).into())
    }
}

impl Parser for TsvParser {
    fn parse(&self, source: &mut dyn BufRead, sink: &mut dyn TripleSink) -> Result<()> {
        for line in source.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let config = *sink.config();
            let terms = line
                .split('\t')
                .map(|txt| Self::term(txt, &config))
                .collect::<Result<Vec<_>>>()?;
            match <[Term; 3]>::try_from(terms) {
                Ok([s, p, o]) => sink.add(Triple::new(s, p, o)?, None)?,
                Err(terms) => match <[Term; 4]>::try_from(terms) {
                    Ok([s, p, o, g]) => sink.add(Triple::new(s, p, o)?, Some(g))?,
                    Err(terms) => {
                        return Err(Error::parser(format!(
                            "Expected 3 or 4 terms, found {}",
                            terms.len()
                        )))
                    }
                },
            }
        }
        Ok(())
    }
}

struct TsvSerializer;

impl Serializer for TsvSerializer {
    fn serialize(
        &self,
        graph: &dyn GraphView,
        options: &SerializerOptions,
        target: &mut dyn Write,
    ) -> Result<()> {
        let mut quads = graph
            .quads(&TriplePattern::any())?
            .collect::<Result<Vec<_>>>()?;
        if options.sorted {
            quads.sort();
        }
        for (t, g) in quads {
            write!(target, "{}\t{}\t{}", t.s(), t.p(), t.o())?;
            if let Some(g) = g {
                write!(target, "\t{g}")?;
            }
            writeln!(target)?;
        }
        Ok(())
    }
}

fn registry() -> Arc<PluginRegistry> {
    setup();
    let registry = PluginRegistry::new();
    crate::register(&registry);
    registry.register("tsv", Plugin::parser(|| Box::new(TsvParser)));
    registry.register("tsv", Plugin::serializer(|| Box::new(TsvSerializer)));
    Arc::new(registry)
}

fn iri(suffix: &str) -> Term {
    IriRef::new_unchecked(format!("http://ex.org/{suffix}")).into()
}

fn triple(s: &str, p: &str, o: impl Into<Term>) -> Triple {
    Triple::new(iri(s), iri(p), o).unwrap()
}

fn integer(lex: &str) -> Literal {
    Literal::typed(lex, xsd::integer.clone())
}

#[test]
fn round_trip() -> Result<()> {
    let registry = registry();
    let mut g1 = Graph::open(registry.clone(), "memory")?;
    g1.add(triple("s", "p", integer("1")))?;
    g1.add(triple("s", "p", Literal::lang("chat", LanguageTag::new_unchecked("fr"))))?;
    g1.add(triple("s", "q", BnodeId::new_unchecked("b0")))?;
    g1.add(triple("s", "q", Literal::plain("plain")))?;
    g1.add(triple("s", "q", Literal::typed("plain", xsd::string.clone())))?;

    let data = g1.serialize("tsv")?;
    let mut g2 = Graph::open(registry, "memory")?;
    let stats = g2.parse(&mut &data[..], "tsv")?;
    assert_eq!(stats.read, 5);
    assert_eq!(stats.added, 5);
    assert_eq!(g1.sorted_triples()?, g2.sorted_triples()?);
    Ok(())
}

#[test]
fn ill_formed_literal_round_trip() -> Result<()> {
    let registry = registry();
    let mut g1 = Graph::open(registry.clone(), "memory")?;
    let abc = integer("abc");
    assert!(abc.is_ill_formed());
    g1.add(triple("s", "p", abc.clone()))?;

    let data = g1.serialize("tsv")?;
    let mut g2 = Graph::open(registry, "memory")?;
    g2.parse(&mut &data[..], "tsv")?;
    let objects = g2.objects()?;
    assert_eq!(objects.len(), 1);
    let lit = objects.iter().next().and_then(Term::as_literal).unwrap();
    assert_eq!(lit.lexical_form(), "abc");
    assert!(lit.is_ill_formed());
    assert!(g2.contains(&triple("s", "p", abc))?);
    Ok(())
}

#[test_case(true, "1", 1 ; "normalized")]
#[test_case(false, "01", 2 ; "verbatim")]
fn parse_with_config(normalize: bool, first_lex: &str, added: usize) {
    let registry = registry();
    let config = TermConfig::default().with_normalize(normalize);
    let mut g = Graph::open(registry, "memory").unwrap().with_config(config);
    let data = format!(
        "<http://ex.org/s>\t<http://ex.org/p>\t\"01\"^^<{0}>\n\
         <http://ex.org/s>\t<http://ex.org/p>\t\"1\"^^<{0}>\n",
        xsd::integer.as_str()
    );
    let stats = g.parse(&mut data.as_bytes(), "tsv").unwrap();
    assert_eq!(stats.read, 2);
    assert_eq!(stats.added, added);
    let objects: Vec<_> = g.objects().unwrap().into_iter().collect();
    assert_eq!(objects.len(), added);
    // both forms denote the integer 1, and sort by lexical form
    let lexical = objects[0].as_literal().map(Literal::lexical_form);
    assert_eq!(lexical, Some(first_lex));
}

#[test]
fn unknown_format() {
    let registry = registry();
    let mut g = Graph::open(registry, "memory").unwrap();
    assert!(matches!(
        g.parse(&mut "".as_bytes(), "turtle"),
        Err(Error::UnknownFormat(f)) if f == "turtle"
    ));
    assert!(matches!(g.serialize("turtle"), Err(Error::UnknownFormat(_))));
    assert!(matches!(
        Graph::open(g.registry().clone(), "sqlite"),
        Err(Error::PluginNotFound { kind: PluginKind::Store, .. })
    ));
}

#[test]
fn failed_parse_keeps_previous_triples() {
    let registry = registry();
    let mut g = Graph::open(registry, "memory").unwrap();
    let data = "<http://ex.org/s>\t<http://ex.org/p>\t\"ok\"\n\
                <http://ex.org/s>\t<http://ex.org/p>\n";
    let err = g.parse(&mut data.as_bytes(), "tsv").unwrap_err();
    assert!(matches!(err, Error::Parser(_)));
    assert_eq!(err.to_string(), "Expected 3 or 4 terms, found 2");
    assert_eq!(g.len().unwrap(), 1);

    let data = "\"s\"\t<http://ex.org/p>\t\"o\"\n";
    let err = g.parse(&mut data.as_bytes(), "tsv").unwrap_err();
    assert!(matches!(err, Error::MalformedTriple(_)));
}

#[test]
fn graph_queries() -> Result<()> {
    let registry = registry();
    let mut g = Graph::open(registry, "memory")?;
    g.add(triple("b", "p", integer("2")))?;
    g.add(triple("a", "p", integer("10")))?;
    g.add(triple("a", "q", integer("2")))?;
    assert_eq!(g.len()?, 3);
    assert!(!g.is_empty()?);
    assert_eq!(g.subjects()?.into_iter().collect::<Vec<_>>(), vec![iri("a"), iri("b")]);
    assert_eq!(g.predicates()?.len(), 2);
    // numeric order, not lexical
    assert_eq!(
        g.objects()?.into_iter().collect::<Vec<_>>(),
        vec![Term::from(integer("2")), Term::from(integer("10"))]
    );
    let pattern = TriplePattern::new(Some(iri("a")), None, None);
    assert_eq!(g.triples(&pattern)?.count(), 2);
    assert_eq!(g.remove(&pattern)?, 2);
    assert_eq!(g.len()?, 1);
    assert_eq!(
        g.sorted_triples()?,
        vec![triple("b", "p", integer("2"))]
    );
    Ok(())
}

#[test]
fn set_algebra_on_graphs() -> Result<()> {
    let registry = registry();
    let mut g1 = Graph::open(registry.clone(), "memory")?;
    let mut g2 = Graph::open(registry.clone(), "memory")?;
    for s in ["a", "b", "c"] {
        g1.add(triple(s, "p", Literal::plain("x")))?;
    }
    for s in ["b", "c", "d"] {
        g2.add(triple(s, "p", Literal::plain("x")))?;
    }
    assert_eq!(g1.union(&g2).len()?, 4);
    assert_eq!(g1.intersection(&g2).len()?, 2);
    assert_eq!(
        g1.difference(&g2).sorted_triples()?,
        vec![triple("a", "p", Literal::plain("x"))]
    );

    // views can be materialized...
    let mut g3 = Graph::open(registry.clone(), "memory")?;
    assert_eq!(g3.add_all(&g1.union(&g2))?, 4);
    assert_eq!(g3.add_all(&g2)?, 0);
    // ...or serialized
    let serializer = registry.serializer("tsv")?;
    let mut buf = vec![];
    let options = SerializerOptions::new().with_sorted(true);
    serializer.serialize(&g1.intersection(&g2), &options, &mut buf)?;
    let txt = String::from_utf8(buf).unwrap();
    assert_eq!(txt.lines().count(), 2);
    assert!(txt.starts_with("<http://ex.org/b>"));
    Ok(())
}

#[test]
fn dataset_default_and_merged() -> Result<()> {
    let registry = registry();
    let mut ds = Dataset::open(registry, "memory")?;
    let t = triple("s", "p", Literal::plain("o"));
    assert!(ds.add(t.clone(), Some(iri("g1")))?);
    assert!(!ds.add(t.clone(), Some(iri("g1")))?);

    assert!(!ds.default_graph()?.contains(&t)?);
    assert!(ds.merged()?.contains(&t)?);
    assert!(ds.graph(iri("g1"))?.contains(&t)?);
    assert!(!ds.graph(iri("g2"))?.contains(&t)?);
    assert!(ds.contains(&t, Some(&iri("g1")))?);
    assert!(!ds.contains(&t, None)?);
    assert_eq!(ds.contexts()?.into_iter().collect::<Vec<_>>(), vec![iri("g1")]);

    // graphs share the store of the dataset
    let mut g2 = ds.graph(iri("g2"))?;
    g2.add(t.clone())?;
    assert_eq!(g2.context(), Some(&iri("g2")));
    assert_eq!(ds.contexts()?.len(), 2);
    // a triple in several graphs counts once
    assert_eq!(ds.len()?, 1);
    assert_eq!(ds.quads(&TriplePattern::any())?.count(), 2);

    assert_eq!(ds.remove_graph(&iri("g1"))?, 1);
    assert_eq!(ds.contexts()?.into_iter().collect::<Vec<_>>(), vec![iri("g2")]);
    Ok(())
}

#[test]
fn merged_is_read_only() {
    let registry = registry();
    let ds = Dataset::open(registry, "memory").unwrap();
    let mut merged = ds.merged().unwrap();
    assert!(merged.is_read_only());
    let t = triple("s", "p", Literal::plain("o"));
    assert!(matches!(merged.add(t), Err(Error::ReadOnlyGraph)));
    assert!(matches!(
        merged.remove(&TriplePattern::any()),
        Err(Error::ReadOnlyGraph)
    ));
    assert!(matches!(
        merged.parse(&mut "".as_bytes(), "tsv"),
        Err(Error::ReadOnlyGraph)
    ));
}

#[test_case(Literal::plain("g").into() ; "literal")]
#[test_case(Term::new_variable("g").unwrap() ; "variable")]
fn invalid_context(ctx: Term) {
    let registry = registry();
    let mut ds = Dataset::open(registry.clone(), "memory").unwrap();
    assert!(matches!(ds.graph(ctx.clone()), Err(Error::InvalidContext(_))));
    let t = triple("s", "p", Literal::plain("o"));
    assert!(matches!(ds.add(t, Some(ctx.clone())), Err(Error::InvalidContext(_))));
    let store = registry.store("memory").unwrap();
    assert!(matches!(
        Graph::named(store, registry, ctx),
        Err(Error::InvalidContext(_))
    ));
}

#[test]
fn parsing_graph_names() -> Result<()> {
    let registry = registry();
    let data = "<http://ex.org/s>\t<http://ex.org/p>\t\"0\"\n\
                <http://ex.org/s>\t<http://ex.org/p>\t\"1\"\t<http://ex.org/g1>\n\
                <http://ex.org/s>\t<http://ex.org/p>\t\"2\"\t_:g2\n";

    // a dataset honours graph names
    let mut ds = Dataset::open(registry.clone(), "memory")?;
    ds.parse(&mut data.as_bytes(), "tsv")?;
    assert_eq!(ds.default_graph()?.len()?, 1);
    assert_eq!(ds.graph(iri("g1"))?.len()?, 1);
    assert_eq!(ds.graph(Term::new_bnode("g2")?)?.len()?, 1);

    // a graph puts everything in itself
    let store = registry.store("memory")?;
    let mut g = Graph::named(store.clone(), registry.clone(), iri("g"))?;
    g.parse(&mut data.as_bytes(), "tsv")?;
    assert_eq!(g.len()?, 3);
    assert_eq!(store.len(&GraphScope::Default).map_err(Error::Store)?, 0);

    // graph names must be IRIs or blank nodes
    let bad = "<http://ex.org/s>\t<http://ex.org/p>\t\"0\"\t\"g\"\n";
    assert!(matches!(
        ds.parse(&mut bad.as_bytes(), "tsv"),
        Err(Error::InvalidContext(_))
    ));
    Ok(())
}

#[test]
fn dataset_round_trip() -> Result<()> {
    let registry = registry();
    let mut ds1 = Dataset::open(registry.clone(), "memory")?;
    ds1.add(triple("s", "p", integer("0")), None)?;
    ds1.add(triple("s", "p", integer("1")), Some(iri("g1")))?;
    ds1.add(triple("s", "p", integer("1")), Some(iri("g2")))?;

    let mut buf = vec![];
    ds1.serialize_with("tsv", &SerializerOptions::new().with_sorted(true), &mut buf)?;
    let mut ds2 = Dataset::open(registry, "memory")?;
    let stats = ds2.parse(&mut &buf[..], "tsv")?;
    assert_eq!(stats.read, 3);
    let quads = |ds: &Dataset| -> Result<Vec<_>> {
        let mut v = ds.quads(&TriplePattern::any())?.collect::<Result<Vec<_>>>()?;
        v.sort();
        Ok(v)
    };
    assert_eq!(quads(&ds1)?, quads(&ds2)?);
    Ok(())
}

/// Counts how many times it is closed.
#[derive(Debug, Default)]
struct CountingStore {
    inner: MemoryStore,
    closed: Arc<AtomicUsize>,
}

impl CountingStore {
    fn new(closed: &Arc<AtomicUsize>) -> Arc<dyn Store> {
        Arc::new(CountingStore {
            inner: MemoryStore::new(),
            closed: closed.clone(),
        })
    }
}

impl Store for CountingStore {
    fn add(&self, t: &Triple, ctx: Option<&Term>) -> StoreResult<bool> {
        self.inner.add(t, ctx)
    }

    fn remove(&self, pattern: &TriplePattern, scope: &GraphScope) -> StoreResult<usize> {
        self.inner.remove(pattern, scope)
    }

    fn triples(&self, pattern: &TriplePattern, scope: &GraphScope) -> StoreResult<StoreSource> {
        self.inner.triples(pattern, scope)
    }

    fn contexts(&self) -> StoreResult<std::collections::BTreeSet<Term>> {
        self.inner.contexts()
    }

    fn close(&self) -> StoreResult<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        self.inner.close()
    }
}

#[test]
fn closed_graph() {
    let registry = registry();
    let mut g = Graph::open(registry, "memory").unwrap();
    let t = triple("s", "p", Literal::plain("o"));
    g.add(t.clone()).unwrap();
    g.close().unwrap();
    assert!(g.is_closed());
    assert!(matches!(g.add(t.clone()), Err(Error::GraphClosed)));
    assert!(matches!(g.contains(&t), Err(Error::GraphClosed)));
    assert!(matches!(g.len(), Err(Error::GraphClosed)));
    assert!(matches!(g.triples(&TriplePattern::any()), Err(Error::GraphClosed)));
    assert!(matches!(g.remove(&TriplePattern::any()), Err(Error::GraphClosed)));
    assert!(matches!(g.serialize("tsv"), Err(Error::GraphClosed)));
    assert!(matches!(
        g.parse(&mut "".as_bytes(), "tsv"),
        Err(Error::GraphClosed)
    ));
    assert!(matches!(g.subjects(), Err(Error::GraphClosed)));
    // closing again is harmless
    g.close().unwrap();
}

#[test]
fn store_is_closed_by_its_last_graph() {
    let registry = registry();
    let closed = Arc::new(AtomicUsize::new(0));
    let mut ds = Dataset::new(CountingStore::new(&closed), registry);
    let mut g1 = ds.graph(iri("g1")).unwrap();
    let t = triple("s", "p", Literal::plain("o"));

    ds.close().unwrap();
    assert!(matches!(ds.default_graph(), Err(Error::GraphClosed)));
    assert!(matches!(ds.contexts(), Err(Error::GraphClosed)));
    assert_eq!(closed.load(Ordering::SeqCst), 0);
    // g1 still holds the store
    assert!(g1.add(t.clone()).unwrap());
    assert!(g1.contains(&t).unwrap());

    g1.close().unwrap();
    assert_eq!(closed.load(Ordering::SeqCst), 1);
    g1.close().unwrap();
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn store_shared_by_named_graphs() {
    let registry = registry();
    let closed = Arc::new(AtomicUsize::new(0));
    let store = CountingStore::new(&closed);
    let mut g1 = Graph::named(store.clone(), registry.clone(), iri("g1")).unwrap();
    let mut g2 = Graph::named(store.clone(), registry, iri("g2")).unwrap();
    let t = triple("s", "p", Literal::plain("o"));
    g1.add(t.clone()).unwrap();
    g2.add(t.clone()).unwrap();

    g1.close().unwrap();
    assert_eq!(closed.load(Ordering::SeqCst), 0);
    assert_eq!(g2.len().unwrap(), 1);
    assert!(g2.contains(&t).unwrap());

    // the caller still holds the store
    g2.close().unwrap();
    assert_eq!(closed.load(Ordering::SeqCst), 0);
    assert_eq!(store.len(&GraphScope::Union).unwrap(), 1);
    store.close().unwrap();
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn store_is_closed_when_its_last_graph_is_dropped() {
    let registry = registry();
    let closed = Arc::new(AtomicUsize::new(0));
    let ds = Dataset::new(CountingStore::new(&closed), registry);
    let default = ds.default_graph().unwrap();
    drop(ds);
    assert_eq!(closed.load(Ordering::SeqCst), 0);
    drop(default);
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test_case(ComparisonMode::Permissive, true ; "permissive")]
#[test_case(ComparisonMode::Strict, false ; "strict")]
fn sorting_mixed_literals(mode: ComparisonMode, comparable: bool) {
    let registry = registry();
    let config = TermConfig::default().with_comparison(mode);
    let mut g = Graph::open(registry, "memory").unwrap().with_config(config);
    g.add(triple("s", "p", integer("1"))).unwrap();
    g.add(triple("s", "p", Literal::plain("a"))).unwrap();

    let sorted = g.sorted_triples();
    let objects = g.objects();
    if comparable {
        assert_eq!(sorted.unwrap().len(), 2);
        assert_eq!(objects.unwrap().len(), 2);
    } else {
        assert!(matches!(sorted, Err(Error::Incomparable(_))));
        assert!(matches!(objects, Err(Error::Incomparable(_))));
    }
    // the subjects are IRIs, always comparable
    assert_eq!(g.subjects().unwrap().len(), 1);
}

#[test]
fn strict_sorting_of_numbers() {
    let registry = registry();
    let config = TermConfig::default().with_comparison(ComparisonMode::Strict);
    let mut g = Graph::open(registry, "memory").unwrap().with_config(config);
    g.add(triple("s", "p", integer("2"))).unwrap();
    g.add(triple("s", "p", Literal::typed("1.5", xsd::decimal.clone()))).unwrap();
    // different subjects are compared before their objects
    g.add(triple("t", "p", Literal::plain("a"))).unwrap();
    let objects: Vec<_> = g
        .sorted_triples()
        .unwrap()
        .into_iter()
        .map(|t| t.o().clone())
        .collect();
    assert_eq!(
        objects,
        vec![
            Literal::typed("1.5", xsd::decimal.clone()).into(),
            integer("2").into(),
            Literal::plain("a").into(),
        ]
    );
}

#[test]
fn concurrent_lazy_resolution() {
    setup();
    let registry = Arc::new(PluginRegistry::new());
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();
    registry.register_lazy(PluginKind::Store, "slow", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(20));
        Ok(Plugin::store(|| {
            let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
            Ok(store)
        }))
    });
    std::thread::scope(|scope| {
        for i in 0..8 {
            let registry = registry.clone();
            scope.spawn(move || {
                let mut g = Graph::open(registry.clone(), "slow").unwrap();
                g.add(triple("s", "p", Literal::from(i as i64))).unwrap();
                assert_eq!(g.len().unwrap(), 1);
                // registering other plugins does not disturb resolution
                registry.register(format!("tsv{i}"), Plugin::parser(|| Box::new(TsvParser)));
            });
        }
    });
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(registry.names(PluginKind::Parser).len(), 8);
}
