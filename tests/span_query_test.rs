use nearspan::prelude::*;
use nearspan::query::{CountCollector, SpanQueryWrapper};

fn city_index() -> MemoryPositionIndex {
    let mut index = MemoryPositionIndex::new();
    index.add_document([("content", "New York is a big city")]).unwrap();
    index.add_document([("content", "york new city")]).unwrap();
    index.add_document([("content", "the city of New York")]).unwrap();
    index.add_document([("content", "New York City marathon"), ("title", "Race day")]).unwrap();
    index.add_document([("title", "new york")]).unwrap();
    index
}

#[test]
fn test_term_doc_freq() {
    let index = city_index();

    assert_eq!(index.doc_count(), 5);
    assert_eq!(index.term_doc_freq("content", "city").unwrap(), 4);
    assert_eq!(index.term_doc_freq("title", "new").unwrap(), 1);
    assert_eq!(index.term_doc_freq("content", "boston").unwrap(), 0);
}

#[test]
fn test_phrase_query() {
    let index = city_index();
    let query = SpanQueryBuilder::new("content").phrase(vec!["New", "york"]);
    let spans = query.near_spans(&index).unwrap();

    let found: Vec<Match> = spans.collect::<Result<_>>().unwrap();
    assert_eq!(
        found,
        vec![
            Match { doc: 0, start: 0, end: 2, slop: 0 },
            Match { doc: 2, start: 3, end: 5, slop: 0 },
            Match { doc: 3, start: 0, end: 2, slop: 0 },
        ]
    );
}

#[test]
fn test_nested_near_query() {
    let index = city_index();
    let builder = SpanQueryBuilder::new("content");
    let phrase = builder.phrase(vec!["new", "york"]);
    let city = builder.term("city");

    let clauses: Vec<Box<dyn SpanQuery>> = vec![Box::new(phrase.clone()), Box::new(city.clone())];
    let query = builder.near(clauses, 3);
    let found: Vec<Match> = query
        .near_spans(&index)
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(
        found,
        vec![
            Match { doc: 0, start: 0, end: 6, slop: 3 },
            Match { doc: 3, start: 0, end: 3, slop: 0 },
        ]
    );

    let clauses: Vec<Box<dyn SpanQuery>> = vec![Box::new(phrase), Box::new(city)];
    let tight = builder.near(clauses, 2);
    let found: Vec<Match> = tight
        .near_spans(&index)
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(found, vec![Match { doc: 3, start: 0, end: 3, slop: 0 }]);
}

#[test]
fn test_invalid_queries() {
    let index = city_index();
    let builder = SpanQueryBuilder::new("content");

    let clauses: Vec<Box<dyn SpanQuery>> = vec![Box::new(builder.term("new"))];
    let single = builder.near(clauses, 1);
    assert!(matches!(
        single.near_spans(&index),
        Err(NearSpanError::InvalidQuery(_))
    ));

    let clauses: Vec<Box<dyn SpanQuery>> = vec![
        Box::new(builder.term("new")),
        Box::new(SpanTermQuery::new("title", "york")),
    ];
    let mixed = builder.near(clauses, 1);
    assert!(matches!(
        mixed.near_spans(&index),
        Err(NearSpanError::InvalidQuery(_))
    ));
}

#[test]
fn test_matcher_over_documents() {
    let index = city_index();
    let query = SpanQueryBuilder::new("content").phrase(vec!["new", "york"]);
    let wrapper = SpanQueryWrapper::new(query);

    assert_eq!(wrapper.description(), "SpanNear(content, 2 clauses, slop=0)");
    assert_eq!(wrapper.cost(&index).unwrap(), 4);

    let mut matcher = wrapper.matcher(&index).unwrap();
    assert_eq!(matcher.doc_id(), 0);
    assert!(matcher.skip_to(1).unwrap());
    assert_eq!(matcher.doc_id(), 2);
    assert!(matcher.next().unwrap());
    assert_eq!(matcher.doc_id(), 3);
    assert!(!matcher.next().unwrap());
    assert!(matcher.is_exhausted());
}

#[test]
fn test_matcher_for_unknown_term_is_empty() {
    let index = city_index();
    let query = SpanQueryBuilder::new("content").proximity(vec!["new", "boston"], 5);
    let matcher = SpanQueryWrapper::new(query).matcher(&index).unwrap();

    assert!(matcher.is_exhausted());
    assert_eq!(matcher.cost(), 0);
}

#[test]
fn test_collectors() {
    let index = city_index();
    let query = SpanQueryBuilder::new("content").phrase(vec!["new", "york"]);

    let mut counter = CountCollector::new();
    counter.collect_all(&mut query.near_spans(&index).unwrap()).unwrap();
    assert_eq!(counter.total_matches(), 3);
    assert_eq!(counter.total_docs(), 3);

    let config = NearQueryConfig {
        max_docs: Some(2),
        ..NearQueryConfig::default()
    };
    let mut collector = MatchCollector::from_config(&config);
    collector
        .collect_all(&mut query.near_spans(&index).unwrap())
        .unwrap();

    assert!(!collector.needs_more());
    let docs: Vec<DocId> = collector.results().iter().map(|d| d.doc).collect();
    assert_eq!(docs, vec![0, 2]);
    assert_eq!(collector.total_matches(), 2);
}

#[test]
fn test_query_slop_from_config() {
    let index = city_index();
    let builder = SpanQueryBuilder::new("content");

    let query = builder
        .proximity(vec!["new", "city"], 0)
        .with_config(&NearQueryConfig::with_slop(4));
    assert_eq!(query.slop(), 4);

    let found: Vec<Match> = query
        .near_spans(&index)
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(
        found,
        vec![
            Match { doc: 0, start: 0, end: 6, slop: 4 },
            Match { doc: 1, start: 1, end: 3, slop: 0 },
            Match { doc: 3, start: 0, end: 3, slop: 1 },
        ]
    );
}
