//! Decoding realistic API payloads through the public model types.

use notion_rest::{
    to_plain_text, Block, BlockKind, Database, FormulaValue, NotionTime, Page, PageProperties,
    PaginatedList, PropertySchemaKind, PropertyValueKind, RichTextKind, SelectOption,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_temporal_codec_contract() {
    let t: NotionTime = serde_json::from_value(json!("2021-05-13T10:00:00Z")).unwrap();
    assert_eq!(serde_json::to_value(t).unwrap(), json!("2021-05-13T10:00:00Z"));

    let d: NotionTime = serde_json::from_value(json!("2021-05-13")).unwrap();
    assert_eq!(d.to_rfc3339().as_deref(), Some("2021-05-13T00:00:00Z"));

    assert!(serde_json::from_value::<NotionTime>(json!("not-a-date")).is_err());

    let unset: NotionTime = serde_json::from_value(json!(null)).unwrap();
    assert!(unset.is_unset());
}

#[test]
fn test_block_children_listing() {
    let list: PaginatedList<Block> = serde_json::from_value(json!({
        "object": "list",
        "results": [
            {"object": "block", "id": "a1", "type": "heading_2", "has_children": false,
             "heading_2": {"text": [{"type": "text", "text": {"content": "Lacinato kale"}}]}},
            {"object": "block", "id": "a2", "type": "to_do", "has_children": false,
             "to_do": {"text": [{"type": "text", "text": {"content": "Buy"}}], "checked": true}},
            {"object": "block", "id": "a3", "type": "some_future_type", "has_children": true,
             "some_future_type": {"anything": [1, 2, 3]}},
            {"object": "block", "id": "a4", "type": "paragraph", "has_children": false,
             "paragraph": {"rich_text": [{"type": "equation", "equation": {"expression": "e=mc^2"}}]}}
        ],
        "has_more": false,
        "next_cursor": null
    }))
    .unwrap();

    let types: Vec<&str> = list.results.iter().map(Block::block_type).collect();
    assert_eq!(
        types,
        vec!["heading_2", "to_do", "some_future_type", "paragraph"]
    );

    assert_eq!(list.results[0].plain_text(), "Lacinato kale");
    match &list.results[1].kind {
        BlockKind::ToDo(todo) => assert!(todo.checked),
        other => panic!("expected to_do, got {:?}", other),
    }
    match &list.results[2].kind {
        BlockKind::Unsupported(unsupported) => {
            assert_eq!(unsupported.block_type, "some_future_type");
            assert_eq!(unsupported.payload, Some(json!({"anything": [1, 2, 3]})));
        }
        other => panic!("expected fallback, got {:?}", other),
    }
    assert!(list.results[2].has_children);
    match &list.results[3].text().unwrap()[0].kind {
        RichTextKind::Equation(eq) => assert_eq!(eq.expression, "e=mc^2"),
        other => panic!("expected equation, got {:?}", other),
    }
    assert_eq!(list.next_cursor(), None);
}

#[test]
fn test_database_row_with_mixed_properties() {
    let page: Page = serde_json::from_value(json!({
        "object": "page",
        "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
        "created_time": "2021-05-13T10:00:00.000Z",
        "last_edited_time": "2021-05-13T11:00:00.000Z",
        "parent": {"type": "database_id", "database_id": "668d797c-76fa-4934-9b05-ad288df2d136"},
        "archived": false,
        "url": "https://www.notion.so/Tuscan-Kale-598337872cf94fdf8782e53db20768a5",
        "properties": {
            "Name": {"id": "title", "type": "title", "title": [
                {"type": "text", "text": {"content": "Tuscan "}, "plain_text": "Tuscan "},
                {"type": "text", "text": {"content": "Kale"}, "plain_text": "Kale"}
            ]},
            "Food group": {"id": "TJmr", "type": "select",
                           "select": {"id": "96eb622f", "name": "Vegetable", "color": "green"}},
            "Tags": {"id": "Jsfb", "type": "multi_select", "multi_select": [
                {"id": "1", "name": "Leafy", "color": "gray"}
            ]},
            "Cost of next trip": {"id": "WOd%3B", "type": "formula",
                                  "formula": {"type": "number", "number": 2}},
            "Last ordered": {"id": "Jsfb", "type": "date",
                             "date": {"start": "2021-05-10", "end": null}},
            "Owner": {"id": "own", "type": "people", "people": [
                {"object": "user", "id": "d40e767c-d7af-4b18-a86d-55c61f1e39a4"}
            ]},
            "Status": {"id": "st", "type": "status", "status": {"name": "Done"}}
        }
    }))
    .unwrap();

    assert_eq!(page.title(), "Tuscan Kale");
    assert_eq!(page.url.as_deref().map(|u| u.contains("Tuscan-Kale")), Some(true));

    let values = match &page.properties {
        PageProperties::Database(values) => values,
        other => panic!("expected database properties, got {:?}", other),
    };
    assert_eq!(values.len(), 7);

    match &values["Food group"].kind {
        PropertyValueKind::Select(Some(SelectOption { name, .. })) => assert_eq!(name, "Vegetable"),
        other => panic!("expected select, got {:?}", other),
    }
    assert_eq!(
        values["Cost of next trip"].kind,
        PropertyValueKind::Formula(FormulaValue::Number(Some(2.0)))
    );
    match &values["Owner"].kind {
        PropertyValueKind::People(people) => assert_eq!(people[0].user_type(), ""),
        other => panic!("expected people, got {:?}", other),
    }
    assert_eq!(values["Status"].property_type(), "status");
}

#[test]
fn test_database_schema() {
    let db: Database = serde_json::from_value(json!({
        "object": "database",
        "id": "668d797c-76fa-4934-9b05-ad288df2d136",
        "title": [{"type": "text", "text": {"content": "Grocery List"}}],
        "properties": {
            "Name": {"id": "title", "name": "Name", "type": "title", "title": {}},
            "Recipes": {"id": "Rl", "name": "Recipes", "type": "relation",
                        "relation": {"database_id": "a3b9c2a1-0000-4000-8000-000000000001",
                                     "synced_property_name": "Ingredients",
                                     "synced_property_id": "abc"}},
            "Count": {"id": "cnt", "name": "Count", "type": "rollup",
                      "rollup": {"relation_property_name": "Recipes",
                                 "relation_property_id": "Rl",
                                 "rollup_property_name": "Name",
                                 "rollup_property_id": "title",
                                 "function": "count"}}
        }
    }))
    .unwrap();

    assert_eq!(to_plain_text(&db.title), "Grocery List");
    match &db.properties["Recipes"].kind {
        PropertySchemaKind::Relation(relation) => {
            assert_eq!(relation.synced_property_name.as_deref(), Some("Ingredients"))
        }
        other => panic!("expected relation, got {:?}", other),
    }
    match &db.properties["Count"].kind {
        PropertySchemaKind::Rollup(rollup) => assert_eq!(rollup.function, "count"),
        other => panic!("expected rollup, got {:?}", other),
    }
}
