//! Benchmarks for document and inline rendering.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quill_renderer::view::Tree;
use quill_renderer::{Doc, RenderContext, Renderer};
use serde_json::{Value, json};

fn str_node(text: &str) -> Value {
    json!({"tag": "str", "text": text})
}

/// Generate a document with `sections` sections of `paragraphs` paragraphs,
/// each section also holding a note and a code block.
fn generate_doc(sections: usize, paragraphs: usize) -> String {
    let mut children = vec![json!({
        "tag": "heading", "level": 1, "children": [str_node("Document Title")]
    })];

    for i in 0..sections {
        let mut body = vec![json!({
            "tag": "heading", "level": 2, "children": [str_node(&format!("Section {i}"))]
        })];
        for j in 0..paragraphs {
            body.push(json!({"tag": "para", "children": [
                str_node(&format!("Paragraph {j} in section {i} has ")),
                {"tag": "strong", "children": [str_node("bold")]},
                str_node(" and "),
                {"tag": "emph", "children": [str_node("italic")]},
                str_node(" text.")
            ]}));
        }
        body.push(json!({
            "tag": "div",
            "attributes": {"class": "note"},
            "children": [{"tag": "para", "children": [str_node("Remember this.")]}]
        }));
        body.push(json!({
            "tag": "code_block",
            "lang": "rust",
            "text": "fn main() {\n    println!(\"hi\");\n}\n",
            "attributes": {"highlight": "2"}
        }));
        children.push(json!({
            "tag": "section",
            "attributes": {"id": format!("section-{i}")},
            "children": body
        }));
    }

    json!({"tag": "doc", "children": children}).to_string()
}

fn bench_render_simple(c: &mut Criterion) {
    let doc = Doc::from_json(&generate_doc(1, 1)).unwrap();
    let renderer = Renderer::new();

    c.bench_function("render_simple_document", |b| {
        b.iter(|| renderer.render(&doc, &mut RenderContext::new()));
    });
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let renderer = Renderer::new();
    let mut group = c.benchmark_group("render_by_size");

    for (sections, paragraphs) in [(5, 2), (20, 3), (50, 5)] {
        let json = generate_doc(sections, paragraphs);
        let doc = Doc::from_json(&json).unwrap();

        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("document", format!("{sections}s_{paragraphs}p")),
            &doc,
            |b, doc| b.iter(|| renderer.render(doc, &mut RenderContext::new())),
        );
    }

    group.finish();
}

fn bench_inline_view(c: &mut Criterion) {
    let spans: Vec<Value> = (0..100)
        .map(|i| {
            if i % 2 == 0 {
                json!({"tag": "span", "attributes": {"class": "kbd"}, "children": [str_node("Ctrl+Shift+P")]})
            } else {
                json!({"tag": "span", "attributes": {"class": "menu"}, "children": [str_node("File > Open > Recent")]})
            }
        })
        .collect();
    let tree = Tree::from_json(&json!({"tag": "doc", "children": spans}).to_string()).unwrap();
    let ctx = RenderContext::new();

    c.bench_function("render_inline_100_spans", |b| {
        b.iter(|| tree.root(&ctx).render());
    });
}

criterion_group!(
    benches,
    bench_render_simple,
    bench_render_varying_sizes,
    bench_inline_view
);
criterion_main!(benches);
