use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mailgen_common::VNode;
use mailgen_compiler_html::{compile_to_html, CompileOptions};

fn section_row(n: usize) -> VNode {
    VNode::element("tr").with_child(
        VNode::element("td")
            .with_attr("style", "border-bottom: 3px solid #ddd; position: relative;")
            .with_child(
                VNode::element("div")
                    .with_attr("style", "margin: 20px; width: 80%;")
                    .with_child(
                        VNode::element("h2")
                            .with_id(format!("section{}_contentType", n))
                            .with_child(VNode::text(format!("Section {} Content Type", n))),
                    )
                    .with_child(
                        VNode::element("h1")
                            .with_id(format!("section{}_contentTitle", n))
                            .with_child(VNode::text(format!("Section {} Content Title", n))),
                    ),
            )
            .with_child(
                VNode::element("img")
                    .with_id(format!("section{}_contentImage", n))
                    .with_attr("src", "./images/placeholder.gif"),
            )
            .with_child(
                VNode::element("div")
                    .with_id(format!("section{}_contentBlurb", n))
                    .with_child(VNode::text("This is the blurb & more")),
            ),
    )
}

fn compile_single_row(c: &mut Criterion) {
    let row = section_row(1);

    c.bench_function("compile_single_row", |b| {
        b.iter(|| compile_to_html(black_box(&row), CompileOptions::default()))
    });
}

fn compile_large_document(c: &mut Criterion) {
    let tbody = VNode::element("tbody").with_children((1..=50).map(section_row).collect());
    let table = VNode::element("table").with_child(tbody);

    c.bench_function("compile_large_document_pretty", |b| {
        b.iter(|| compile_to_html(black_box(&table), CompileOptions::pretty()))
    });
}

criterion_group!(benches, compile_single_row, compile_large_document);
criterion_main!(benches);
