// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Completion corpus against the `world` fixture.
//!
//! Each case drives the full engine pipeline (parse → locate → scope →
//! generate → filter → render) on a document and asserts on the returned
//! labels, the way an editor would observe them.

use std::sync::Arc;

use tower_lsp::lsp_types::{Position, Url};

use squill_catalog::CatalogSnapshot;
use squill_lsp::{CompletionEngine, Document};
use squill_test_utils::{assert_labels_exact, assert_labels_include, world_snapshot};

const CITY_COLUMNS: &[&str] = &["ID", "Name", "CountryCode", "District", "Population"];

const COUNTRY_COLUMNS: &[&str] = &[
    "Code",
    "Name",
    "CountryCode",
    "Continent",
    "Region",
    "SurfaceArea",
    "IndepYear",
    "LifeExpectancy",
    "GNP",
    "GNPOld",
    "LocalName",
    "GovernmentForm",
    "HeadOfState",
    "Capital",
    "Code2",
];

fn test_document(input: &str) -> Document {
    let uri = Url::parse("file:///test.sql").unwrap();
    Document::new(uri, input.to_string(), 0, "sql".to_string())
}

async fn labels_at(input: &str, line: u32, character: u32) -> Vec<String> {
    let snapshot = Arc::new(world_snapshot().await);
    let engine = CompletionEngine::new(snapshot);
    engine.complete_labels(&test_document(input), Position::new(line, character))
}

// ---- multi-statement focus -------------------------------------------

#[tokio::test]
async fn test_columns_on_multiple_statements_focused_first() {
    let input = "SELECT c. FROM city as c;SELECT c. FROM country as c;";
    let labels = labels_at(input, 0, 9).await;
    assert_labels_exact(&labels, CITY_COLUMNS);
}

#[tokio::test]
async fn test_columns_on_multiple_statements_focused_second() {
    let input = "SELECT c. FROM city as c;SELECT c. FROM country as c;";
    let labels = labels_at(input, 0, 34).await;
    assert_labels_exact(&labels, COUNTRY_COLUMNS);
}

// ---- select expressions ----------------------------------------------

#[tokio::test]
async fn test_table_columns() {
    let labels = labels_at("select  from city", 0, 7).await;
    assert_labels_include(&labels, CITY_COLUMNS);
    assert_labels_include(&labels, &["city", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_filtered_table_columns() {
    let labels = labels_at("select Cou from city", 0, 10).await;
    assert_labels_include(&labels, &["CountryCode", "country", "countrylanguage"]);
    assert!(!labels.iter().any(|l| l == "ID"));
}

#[tokio::test]
async fn test_columns_of_table_with_database_qualifier() {
    let labels = labels_at("select  from world.city", 0, 7).await;
    assert_labels_include(&labels, CITY_COLUMNS);
}

#[tokio::test]
async fn test_columns_of_aliased_table() {
    let labels = labels_at("select  from city as c", 0, 7).await;
    assert_labels_include(&labels, CITY_COLUMNS);
    assert_labels_include(&labels, &["c", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_columns_of_aliased_table_with_database_qualifier() {
    let labels = labels_at("select  from world.city as c", 0, 7).await;
    assert_labels_include(&labels, CITY_COLUMNS);
    assert_labels_include(&labels, &["c"]);
}

#[tokio::test]
async fn test_columns_of_aliased_table_without_as() {
    let labels = labels_at("select  from city c", 0, 7).await;
    assert_labels_include(&labels, CITY_COLUMNS);
    assert_labels_include(&labels, &["c"]);
}

#[tokio::test]
async fn test_columns_of_dotted_alias() {
    let labels = labels_at("select c. from city as c", 0, 9).await;
    assert_labels_exact(&labels, CITY_COLUMNS);
}

#[tokio::test]
async fn test_filtered_columns_of_dotted_alias() {
    let labels = labels_at("select c.C from city as c", 0, 10).await;
    assert_labels_include(&labels, &["CountryCode"]);
    assert!(!labels.iter().any(|l| l == "ID"));
}

#[tokio::test]
async fn test_identifier_list() {
    let labels = labels_at("select id,  from city", 0, 11).await;
    assert_labels_include(&labels, CITY_COLUMNS);
    assert_labels_include(&labels, &["city", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_filtered_identifier_list() {
    let labels = labels_at("select id, cou from city", 0, 14).await;
    assert_labels_include(&labels, &["CountryCode", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_operand_in_comparison() {
    let labels = labels_at("select 1 = cou from city", 0, 14).await;
    assert_labels_include(&labels, &["CountryCode", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_operand_in_arithmetic() {
    let labels = labels_at("select 1 + cou from city", 0, 14).await;
    assert_labels_include(&labels, &["CountryCode", "country", "countrylanguage"]);
}

// ---- table references -------------------------------------------------

#[tokio::test]
async fn test_from_tables() {
    let labels = labels_at("select CountryCode from ", 0, 24).await;
    assert_labels_exact(
        &labels,
        &[
            "city",
            "country",
            "countrylanguage",
            "information_schema",
            "mysql",
            "performance_schema",
            "sys",
            "world",
        ],
    );
}

#[tokio::test]
async fn test_from_filtered_tables() {
    let labels = labels_at("select CountryCode from co", 0, 26).await;
    assert_labels_exact(&labels, &["country", "countrylanguage"]);
}

#[tokio::test]
async fn test_from_database_qualified_tables() {
    let labels = labels_at("select * from world.", 0, 20).await;
    assert_labels_exact(&labels, &["city", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_join_tables() {
    let labels = labels_at("select CountryCode from city join ", 0, 34).await;
    assert_labels_include(&labels, &["city", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_join_filtered_tables() {
    let labels = labels_at("select CountryCode from city join co", 0, 36).await;
    assert_labels_include(&labels, &["country", "countrylanguage"]);
    assert!(!labels.iter().any(|l| l == "city"));
}

#[tokio::test]
async fn test_insert_tables() {
    let labels = labels_at("INSERT INTO ", 0, 12).await;
    assert_labels_include(&labels, &["city", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_insert_filtered_tables() {
    let labels = labels_at("INSERT INTO co", 0, 14).await;
    assert_labels_include(&labels, &["country", "countrylanguage"]);
    assert!(!labels.iter().any(|l| l == "city"));
}

#[tokio::test]
async fn test_insert_columns() {
    let labels = labels_at("INSERT INTO city (", 0, 18).await;
    assert_labels_exact(&labels, CITY_COLUMNS);
}

#[tokio::test]
async fn test_insert_filtered_columns() {
    let labels = labels_at("INSERT INTO city (cou", 0, 21).await;
    assert_labels_exact(&labels, &["CountryCode"]);
}

#[tokio::test]
async fn test_insert_identifier_list() {
    let labels = labels_at("INSERT INTO city (id, cou", 0, 25).await;
    assert_labels_exact(&labels, &["CountryCode"]);
}

#[tokio::test]
async fn test_update_tables() {
    let labels = labels_at("UPDATE ", 0, 7).await;
    assert_labels_include(&labels, &["city", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_update_filtered_tables() {
    let labels = labels_at("UPDATE co", 0, 9).await;
    assert_labels_include(&labels, &["country", "countrylanguage"]);
}

#[tokio::test]
async fn test_update_columns() {
    let labels = labels_at("UPDATE city SET ", 0, 16).await;
    assert_labels_exact(&labels, CITY_COLUMNS);
}

#[tokio::test]
async fn test_update_filtered_columns() {
    let labels = labels_at("UPDATE city SET cou", 0, 19).await;
    assert_labels_exact(&labels, &["CountryCode"]);
}

#[tokio::test]
async fn test_update_assignment_list() {
    let labels = labels_at("UPDATE city SET CountryCode=12, Na", 0, 34).await;
    assert_labels_exact(&labels, &["Name"]);
}

#[tokio::test]
async fn test_delete_tables() {
    let labels = labels_at("DELETE FROM ", 0, 12).await;
    assert_labels_include(&labels, &["city", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_delete_filtered_tables() {
    let labels = labels_at("DELETE FROM co", 0, 14).await;
    assert_labels_include(&labels, &["country", "countrylanguage"]);
}

// ---- where and join conditions ----------------------------------------

#[tokio::test]
async fn test_where_columns() {
    let labels = labels_at("select * from city where ", 0, 25).await;
    assert_labels_include(&labels, CITY_COLUMNS);
}

#[tokio::test]
async fn test_where_columns_of_dotted_table() {
    let labels = labels_at("select * from city where city.", 0, 30).await;
    assert_labels_exact(&labels, CITY_COLUMNS);
}

#[tokio::test]
async fn test_where_left_of_comparison() {
    let labels = labels_at("select * from city where  = ID", 0, 25).await;
    assert_labels_include(&labels, CITY_COLUMNS);
}

#[tokio::test]
async fn test_where_right_of_comparison() {
    let labels = labels_at("select * from city where ID = ", 0, 30).await;
    assert_labels_include(&labels, CITY_COLUMNS);
}

#[tokio::test]
async fn test_where_dotted_left_of_comparison() {
    let labels = labels_at("select * from city where city. = city.ID", 0, 30).await;
    assert_labels_exact(&labels, CITY_COLUMNS);
}

#[tokio::test]
async fn test_where_dotted_right_of_comparison() {
    let labels = labels_at("select * from city where city.ID = city.", 0, 40).await;
    assert_labels_exact(&labels, CITY_COLUMNS);
}

#[tokio::test]
async fn test_join_on_columns() {
    let labels = labels_at("select * from city left join country on ", 0, 40).await;
    assert_labels_include(&labels, COUNTRY_COLUMNS);
    // the left side of the join contributes too
    assert_labels_include(&labels, &["District"]);
}

#[tokio::test]
async fn test_join_on_filtered_columns() {
    let labels = labels_at("select * from city left join country on co", 0, 52).await;
    assert_labels_include(&labels, &["Code", "Continent", "Code2"]);
}

// ---- order by / group by ----------------------------------------------

#[tokio::test]
async fn test_order_by_columns() {
    let labels = labels_at("SELECT ID, Name FROM city ORDER BY ", 0, 35).await;
    assert_labels_include(&labels, CITY_COLUMNS);
    assert_labels_include(&labels, &["city", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_group_by_columns() {
    let labels = labels_at("SELECT CountryCode, COUNT(*) FROM city GROUP BY ", 0, 48).await;
    assert_labels_include(&labels, CITY_COLUMNS);
    assert_labels_include(&labels, &["city", "country", "countrylanguage"]);
}

// ---- case expressions --------------------------------------------------

#[tokio::test]
async fn test_case_after_case_keyword() {
    let input = "SELECT `Language`, CASE Is WHEN 'T' THEN 'official' WHEN 'F' THEN 'unofficial' END AS is_official FROM countrylanguage;";
    let labels = labels_at(input, 0, 26).await;
    assert_labels_exact(&labels, &["IsOfficial"]);
}

#[tokio::test]
async fn test_case_in_when_condition() {
    let input = "SELECT `Language`, CASE IsOfficial WHEN Is THEN 'official' WHEN 'F' THEN 'unofficial' END AS is_official FROM countrylanguage;";
    let labels = labels_at(input, 0, 42).await;
    assert_labels_exact(&labels, &["IsOfficial"]);
}

#[tokio::test]
async fn test_case_in_then_result() {
    let input = "SELECT `Language`, CASE IsOfficial WHEN 'T' THEN Is WHEN 'F' THEN 'unofficial' END AS is_official FROM countrylanguage;";
    let labels = labels_at(input, 0, 51).await;
    assert_labels_exact(&labels, &["IsOfficial"]);
}

#[tokio::test]
async fn test_select_item_after_case_expression() {
    let input = "SELECT `Language`, CASE IsOfficial WHEN 'T' THEN Is WHEN 'F' THEN 'unofficial' END AS is_official, P FROM countrylanguage;";
    let labels = labels_at(input, 0, 100).await;
    assert_labels_exact(&labels, &["Percentage"]);
}

// ---- subqueries ---------------------------------------------------------

#[tokio::test]
async fn test_subquery_inner_columns() {
    let labels = labels_at("SELECT * FROM (SELECT Cou FROM city)", 0, 25).await;
    assert_labels_exact(&labels, &["CountryCode", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_subquery_inner_table_references() {
    let labels = labels_at("SELECT * FROM (SELECT * FROM ", 0, 29).await;
    assert_labels_include(&labels, &["city", "country", "countrylanguage"]);
}

#[tokio::test]
async fn test_subquery_derived_columns() {
    let input = "SELECT  FROM (SELECT ID as city_id, Name as city_name FROM city) as t";
    let labels = labels_at(input, 0, 7).await;
    assert_labels_include(&labels, &["t", "city_id", "city_name"]);
}

#[tokio::test]
async fn test_subquery_derived_columns_dotted() {
    let input = "SELECT t. FROM (SELECT ID as city_id, Name as city_name FROM city) as t";
    let labels = labels_at(input, 0, 9).await;
    assert_labels_exact(&labels, &["city_id", "city_name"]);
}

#[tokio::test]
async fn test_multiple_subqueries() {
    let input = "SELECT  FROM (SELECT Name as city_name FROM city) AS sub1, (SELECT LocalName as country_name FROM country) AS sub2 limit 1";
    let labels = labels_at(input, 0, 7).await;
    assert_labels_include(&labels, &["sub1", "sub2", "city_name", "country_name"]);
}

// ---- degradation --------------------------------------------------------

#[tokio::test]
async fn test_unknown_context_proposes_statement_keywords() {
    let labels = labels_at("", 0, 0).await;
    assert_labels_exact(&labels, &["SELECT", "INSERT", "UPDATE", "DELETE"]);
}

#[tokio::test]
async fn test_empty_scope_falls_back_to_keywords() {
    let labels = labels_at("select ", 0, 7).await;
    // no FROM yet: tables and keywords keep the list useful
    assert_labels_include(&labels, &["city", "FROM", "CASE"]);
}

#[tokio::test]
async fn test_empty_catalog_still_answers() {
    let engine = CompletionEngine::new(Arc::new(CatalogSnapshot::empty()));
    let document = test_document("select  from city");
    let labels = engine.complete_labels(&document, Position::new(0, 7));
    // the scope reference itself is still offered
    assert_labels_include(&labels, &["city"]);
}

#[tokio::test]
async fn test_every_offset_returns_a_list() {
    let inputs = [
        "SELECT c. FROM city as c;SELECT c. FROM country as c;",
        "SELECT * FROM (SELECT ID as city_id, Name as city_name FROM city) as t",
        "INSERT INTO city (cou",
        "UPDATE city SET CountryCode=12, Na",
        "select * from city where city.ID <= 10 and ",
        "-- comment\nselect /* x */ 1;",
        ") garbage ;; ~",
    ];
    let snapshot = Arc::new(world_snapshot().await);
    let engine = CompletionEngine::new(snapshot);
    for input in inputs {
        let document = test_document(input);
        for offset in 0..=input.chars().count() {
            // drive through the public position API on a single line basis
            let position = Position::new(0, offset as u32);
            let _ = engine.complete(&document, position);
        }
    }
}

#[tokio::test]
async fn test_prefix_monotonicity_when_typing() {
    // typing `c`, `co`, `cou` after FROM can only shrink the label set
    let snapshot = Arc::new(world_snapshot().await);
    let engine = CompletionEngine::new(snapshot);

    let mut previous: Option<Vec<String>> = None;
    for (input, col) in [
        ("select CountryCode from c", 25),
        ("select CountryCode from co", 26),
        ("select CountryCode from cou", 27),
    ] {
        let labels = engine.complete_labels(&test_document(input), Position::new(0, col));
        if let Some(previous) = &previous {
            for label in &labels {
                assert!(previous.contains(label), "{label} appeared while typing");
            }
        }
        previous = Some(labels);
    }
}
