use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use serde_json::json;
use treadstock_cart::{selected_items, totals, Cart};
use treadstock_catalog::{normalize, InventoryItem};
use treadstock_core::ItemId;

fn build_catalog(size: usize) -> Vec<InventoryItem> {
    let raw: Vec<serde_json::Value> = (0..size)
        .map(|i| {
            json!({
                "id": i + 1,
                "size": format!("{}/55R16", 185 + (i % 6) * 10),
                "brand": (["Michelin", "Goodyear", "Bridgestone", "Continental"][i % 4]),
                "model": format!("Model {}", i % 17),
                "tread_32nds": (i % 11) as u64,
                "quantity": (i % 9) as u64,
                "price": 30 + (i % 90) as u64,
                "notes": "",
            })
        })
        .collect();
    normalize(&raw)
}

/// Cart selecting every other catalog item, plus a couple of stale ids.
fn build_cart(catalog: &[InventoryItem]) -> Cart {
    let mut entries: Vec<(ItemId, i64)> = catalog
        .iter()
        .step_by(2)
        .map(|item| (item.id, 2))
        .collect();
    entries.push((ItemId::new(u32::MAX), 3));
    entries.push((ItemId::new(u32::MAX - 1), 1));
    Cart::from_entries(entries)
}

fn bench_selection_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection_throughput");

    for catalog_size in [10, 100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*catalog_size as u64));
        group.bench_with_input(
            BenchmarkId::new("selected_items", catalog_size),
            catalog_size,
            |b, &size| {
                let catalog = build_catalog(size);
                let cart = build_cart(&catalog);
                b.iter(|| black_box(selected_items(black_box(&catalog), black_box(&cart))));
            },
        );
    }

    group.finish();
}

fn bench_totals_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("totals_throughput");

    for catalog_size in [10, 100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*catalog_size as u64));
        group.bench_with_input(
            BenchmarkId::new("totals", catalog_size),
            catalog_size,
            |b, &size| {
                let catalog = build_catalog(size);
                let cart = build_cart(&catalog);
                let selected = selected_items(&catalog, &cart);
                b.iter(|| black_box(totals(black_box(&selected))));
            },
        );
    }

    group.finish();
}

fn bench_quantity_edit_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantity_edit_latency");
    group.sample_size(1000);

    group.bench_function("clamp_edit", |b| {
        let catalog = build_catalog(100);
        let cart = build_cart(&catalog);
        let id = catalog[4].id;
        b.iter(|| {
            let mut edited = cart.clone();
            edited.clamp_edit(&catalog, black_box(id), black_box(7.0));
            black_box(edited)
        });
    });

    group.bench_function("step_through_range", |b| {
        let catalog = build_catalog(100);
        let id = catalog[4].id;
        b.iter(|| {
            let mut cart = Cart::new();
            for _ in 0..16 {
                cart.step(&catalog, black_box(id), 1);
            }
            black_box(cart)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_selection_throughput,
    bench_totals_throughput,
    bench_quantity_edit_latency
);
criterion_main!(benches);
