// benches/decode_bench.rs
//! Benchmarks for response decoding.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use notion_rest::{Block, Page, PaginatedList};
use serde_json::json;

fn sample_block(index: usize, text_length: usize) -> serde_json::Value {
    let text = "a".repeat(text_length);
    let block_type = match index % 4 {
        0 => "paragraph",
        1 => "heading_2",
        2 => "bulleted_list_item",
        _ => "some_future_type",
    };
    json!({
        "object": "block",
        "id": "12345678-1234-1234-1234-123456789abc",
        "created_time": "2024-01-01T00:00:00.000Z",
        "last_edited_time": "2024-01-01T00:00:00.000Z",
        "has_children": false,
        "archived": false,
        "type": block_type,
        block_type: {
            "text": [{
                "type": "text",
                "text": {"content": text, "link": null},
                "annotations": {
                    "bold": false, "italic": false, "strikethrough": false,
                    "underline": false, "code": false, "color": "default"
                },
                "plain_text": text,
                "href": null
            }]
        }
    })
}

fn block_list_bytes(count: usize) -> Vec<u8> {
    let results: Vec<_> = (0..count).map(|i| sample_block(i, 80)).collect();
    serde_json::to_vec(&json!({
        "object": "list",
        "results": results,
        "has_more": false,
        "next_cursor": null
    }))
    .unwrap()
}

fn database_row_bytes(property_count: usize) -> Vec<u8> {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "Name".to_string(),
        json!({"id": "title", "type": "title", "title": [{"type": "text", "text": {"content": "Row"}}]}),
    );
    for i in 0..property_count {
        let value = match i % 3 {
            0 => json!({"id": format!("n{}", i), "type": "number", "number": i}),
            1 => json!({"id": format!("s{}", i), "type": "select",
                        "select": {"id": "x", "name": "Option", "color": "blue"}}),
            _ => json!({"id": format!("d{}", i), "type": "date",
                        "date": {"start": "2021-05-13", "end": null}}),
        };
        properties.insert(format!("Property {}", i), value);
    }
    serde_json::to_vec(&json!({
        "object": "page",
        "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
        "parent": {"type": "database_id", "database_id": "668d797c-76fa-4934-9b05-ad288df2d136"},
        "archived": false,
        "properties": properties
    }))
    .unwrap()
}

fn bench_block_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_block_children");
    for count in [10, 100] {
        let bytes = block_list_bytes(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &bytes, |b, bytes| {
            b.iter(|| {
                let list: PaginatedList<Block> = serde_json::from_slice(black_box(bytes)).unwrap();
                list
            })
        });
    }
    group.finish();
}

fn bench_database_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_database_row");
    for count in [5, 50] {
        let bytes = database_row_bytes(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &bytes, |b, bytes| {
            b.iter(|| {
                let page: Page = serde_json::from_slice(black_box(bytes)).unwrap();
                page
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_block_lists, bench_database_rows);
criterion_main!(benches);
