// Grammar property tests
//
// Filter chains, connective bookkeeping, and re-parsing of rendered queries.

use cosmoql::{CosmosQuery, parse};

type Query = CosmosQuery<()>;

/// Connective patterns for a chain of `len` filters, as bit masks (1 = or).
fn patterns(len: usize) -> impl Iterator<Item = Vec<&'static str>> {
    let gaps = len.saturating_sub(1);
    (0..(1u32 << gaps)).map(move |mask| {
        (0..gaps)
            .map(|i| if mask & (1 << i) != 0 { "or" } else { "and" })
            .collect()
    })
}

fn chain(connectives: &[&str]) -> String {
    let mut text = String::from("select * from t where f0 = 0");
    for (i, word) in connectives.iter().enumerate() {
        text.push_str(&format!(" {} f{} = {}", word, i + 1, i + 1));
    }
    text
}

fn indices(filters: &[cosmoql::CosmosQueryFilter<()>]) -> Vec<usize> {
    filters
        .iter()
        .map(|f| f.column_name.column_name[1..].parse().unwrap())
        .collect()
}

#[test]
fn chain_preserves_every_filter_in_order() {
    for len in 1..=6 {
        for connectives in patterns(len) {
            let text = chain(&connectives);
            let query: Query = parse(&text).unwrap();
            let group = &query.where_clause.unwrap()[0];

            assert_eq!(group.and.len() + group.or.len(), len, "Failed for: {}", text);

            let and = indices(&group.and);
            let or = indices(&group.or);
            assert!(and.windows(2).all(|w| w[0] < w[1]), "Failed for: {}", text);
            assert!(or.windows(2).all(|w| w[0] < w[1]), "Failed for: {}", text);
        }
    }
}

#[test]
fn chain_files_filters_under_following_connective() {
    for len in 1..=6 {
        for connectives in patterns(len) {
            let text = chain(&connectives);
            let query: Query = parse(&text).unwrap();
            let group = &query.where_clause.unwrap()[0];
            let or = indices(&group.or);

            for i in 0..len {
                let word = connectives
                    .get(i)
                    .or(connectives.last())
                    .copied()
                    .unwrap_or("and");
                assert_eq!(or.contains(&i), word == "or", "Filter f{} in: {}", i, text);
            }
        }
    }
}

#[test]
fn rendered_query_parses_to_same_query() {
    let test_cases = vec![
        "select a, b from t where x = 1",
        "select * from t",
        "select * from t tAlias where x is not 'foo' and y > 5",
        "select c.name from people c where c.age >= 18 or c.city = 'O''Neil' or c.tag in ('a', 'b')",
        "select x from t where a = 1 or b = 2 and c = 3 and d = -4.5",
        "select x from t where a = 1 and b = 2 or c = 3",
        "select x from t where a <> true and b < 0.25 and c <= null",
        "select x /* note */ from t -- done",
    ];

    for text in test_cases {
        let query: Query = parse(text).unwrap();
        let rendered = query.to_string();
        let reparsed: Query = parse(&rendered).unwrap();
        assert_eq!(query, reparsed, "Rendered {:?} as {:?}", text, rendered);
    }
}

#[test]
fn rendered_query_text() {
    let query: Query = parse("select * from t tAlias where x is not 'foo' and y > 5").unwrap();
    assert_eq!(
        query.to_string(),
        "select * from t tAlias where x != 'foo' and y > 5"
    );

    let query: Query = parse("select x from t where a = 1 or b = 2 and c = 3").unwrap();
    assert_eq!(query.to_string(), "select x from t where a = 1 or b = 2 and c = 3");
}
