use factual::encoder_oauth1::percent_decode;
use factual::query::{
    Boost, Clear, DiffsQuery, FacetQuery, Flag, FlagProblem, MatchQuery, Metadata, Query,
    RawQuery, ResolveQuery, Submit, UrlQuery,
};
use pretty_assertions::assert_eq;

fn decoded(query: &impl UrlQuery) -> String {
    percent_decode(&query.to_url_query()).into_owned()
}

#[test]
fn read_query_defaults_to_nothing() {
    assert_eq!(Query::new().to_url_query(), "");
}

#[test]
fn read_query_full() {
    let query = Query::new()
        .search("coffee")
        .search("shop")
        .field("region")
        .equal("CA")
        .within_circle(34.06021, -118.41828, 500)
        .select(["name", "address"])
        .sort_desc("$distance")
        .limit(20)
        .offset(40)
        .include_row_count(true);
    assert_eq!(
        decoded(&query),
        concat!(
            r#"q=coffee shop&filters={"region":{"$eq":"CA"}}"#,
            r#"&geo={"$circle":{"$center":[34.06021,-118.41828],"$meters":500}}"#,
            "&include_count=true&select=name,address&sort=$distance:desc&limit=20&offset=40"
        )
    );
}

#[test]
fn read_query_is_fully_escaped() {
    let query = Query::new().search("Joe's (cafe)!");
    assert_eq!(query.to_url_query(), "q=Joe%27s%20%28cafe%29%21");
}

#[test]
fn several_filters_are_anded() {
    let query = Query::new()
        .field("name")
        .begins_with("Star")
        .field("rating")
        .greater_than_or_equal(4)
        .field("tel")
        .not_blank();
    assert_eq!(
        decoded(&query),
        r#"filters={"$and":[{"name":{"$bw":"Star"}},{"rating":{"$gte":4}},{"tel":{"$blank":false}}]}"#
    );
}

#[test]
fn or_groups_sub_queries() {
    let query = Query::new().or([
        Query::new().field("locality").equal("Los Angeles"),
        Query::new()
            .field("category_ids")
            .includes_any([338, 342]),
    ]);
    assert_eq!(
        decoded(&query),
        r#"filters={"$or":[{"locality":{"$eq":"Los Angeles"}},{"category_ids":{"$includes_any":[338,342]}}]}"#
    );
}

#[test]
fn in_list_and_prefix_lists() {
    let query = Query::new().field("region").in_list(["CA", "NV"]);
    assert_eq!(decoded(&query), r#"filters={"region":{"$in":["CA","NV"]}}"#);

    let query = Query::new().field("name").begins_with_any(["Mc", "Burger"]);
    assert_eq!(decoded(&query), r#"filters={"name":{"$bwin":["Mc","Burger"]}}"#);
}

#[test]
fn facet_query_ignores_paging() {
    let facets = FacetQuery::new(["region", "locality"])
        .rows(Query::new().search("starbucks").limit(5))
        .min_count_per_facet(10)
        .max_values_per_facet(3);
    assert_eq!(
        decoded(&facets),
        "q=starbucks&select=region,locality&min_count=10&limit=3"
    );
}

#[test]
fn resolve_and_match_values() {
    let resolve = ResolveQuery::new()
        .add("name", "McDonalds")
        .add("latitude", 34.05)
        .debug(true);
    assert_eq!(
        decoded(&resolve),
        r#"values={"latitude":34.05,"name":"McDonalds"}&debug=true"#
    );

    let matched = MatchQuery::new().add("tel", "(310) 555-0100");
    assert_eq!(decoded(&matched), r#"values={"tel":"(310) 555-0100"}"#);
}

#[test]
fn diffs_window() {
    assert_eq!(DiffsQuery::new(1_318_890_505_254).to_url_query(), "start=1318890505254");
    assert_eq!(
        DiffsQuery::between(1, 2).to_url_query(),
        DiffsQuery::new(1).end(2).to_url_query()
    );
}

#[test]
fn write_builders() {
    let metadata = Metadata::new("tester").comment("moved").reference("http://x.y/z");

    let submit = Submit::new(metadata.clone())
        .value("name", "New Name")
        .remove("fax");
    assert_eq!(
        decoded(&submit),
        r#"values={"fax":null,"name":"New Name"}&user=tester&comment=moved&reference=http://x.y/z"#
    );

    let clear = Clear::new(Metadata::new("tester"))
        .field("longitude")
        .field("latitude");
    assert_eq!(decoded(&clear), "fields=longitude,latitude&user=tester");

    let boost = Boost::new("abc").search("coffee").user("tester");
    assert_eq!(decoded(&boost), "factual_id=abc&q=coffee&user=tester");
}

#[test]
fn flag_with_and_without_preferred() {
    let flag = Flag::new(FlagProblem::Inaccurate, Metadata::new("tester")).field("tel");
    assert_eq!(decoded(&flag), r#"problem=inaccurate&fields=["tel"]&user=tester"#);

    let flag = Flag::new(FlagProblem::Duplicate, Metadata::default()).preferred("keep-me");
    assert_eq!(flag.to_url_query(), "problem=duplicate&preferred=keep-me");
}

#[test]
fn raw_query_keeps_order() {
    let raw = RawQuery::new().add("b", 2).add("a", "x y");
    assert_eq!(raw.to_url_query(), "b=2&a=x%20y");
}
